//! Domain model structs and DTOs.
//!
//! Each submodule contains a row struct matching the database table and a
//! `Deserialize` input DTO used for both inserts and full updates.

pub mod employee;
