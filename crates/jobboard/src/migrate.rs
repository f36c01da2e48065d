//! SQL migrations via [`refinery`].
//!
//! Migration files live under `migrations/` and are embedded at compile
//! time.
//!
//! # Example
//!
//! ```ignore
//! let (mut client, connection) = tokio_postgres::connect(&url, NoTls).await?;
//! tokio::spawn(connection);
//! jobboard::migrate::run(&mut client).await?;
//! ```

use crate::error::BoardResult;

pub use refinery::{Report, Runner, embed_migrations};

mod embedded {
    refinery::embed_migrations!("migrations");
}

/// Return the runner for this crate's embedded migrations.
pub fn runner() -> Runner {
    embedded::migrations::runner()
}

/// Apply all pending migrations on the given connection.
pub async fn run(client: &mut tokio_postgres::Client) -> BoardResult<Report> {
    Ok(runner().run_async(client).await?)
}
