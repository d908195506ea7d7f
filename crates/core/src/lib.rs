//! Domain types, errors and validation rules shared by the Roster crates.

pub mod employee;
pub mod error;
pub mod types;
