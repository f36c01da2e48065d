//! Dynamic SQL fragment compilation.
//!
//! Turns sparse request data into safely parameterized query fragments:
//!
//! - [`PartialUpdate`] compiles an arbitrary subset of a resource's fields
//!   into a `SET` clause,
//! - [`Predicate`] combines optional search filters into one boolean
//!   expression,
//! - [`assemble`] splices either into a query template and binds trailing
//!   fixed values (say, the id of an update-by-key).
//!
//! Values are never interpolated into query text; a [`Fragment`] keeps text
//! and values apart and numbers `$1, $2, ...` placeholders only when the
//! final SQL is rendered, so ordinals come out contiguous no matter how
//! fragments are composed.
//!
//! # Example
//!
//! ```ignore
//! let set = PartialUpdate::new()
//!     .set("title", "Engineer")
//!     .set_opt("salary", Some(100_000))
//!     .compile(&JOB_COLUMNS)?;
//! let query = assemble(
//!     "UPDATE jobs SET {} WHERE id = ? RETURNING id, title",
//!     Some(set),
//!     [Param::new(job_id)],
//! )?;
//! let row = db.query_one(&query.to_sql(), &query.params_ref()).await?;
//! ```

mod fragment;
mod predicate;
mod update;


pub use fragment::{Fragment, Param, assemble};
pub use predicate::Predicate;
pub use update::PartialUpdate;
