//! Request handlers.
//!
//! Each submodule provides async handler functions (list, get_by_id, create,
//! update, delete) for a single entity type. Handlers delegate to the
//! corresponding repository in `roster_db` and map errors via [`AppError`].
//!
//! [`AppError`]: crate::error::AppError

pub mod employee;
