//! Employee entity model and DTOs.

use std::str::FromStr;

use roster_core::employee::{validate_employee_fields, EmployeeDraft, RawField};
use roster_core::types::DbId;
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row};
use validator::ValidationErrors;

pub use roster_core::employee::ValidEmployee;

/// An employee row from the `employees` table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Employee {
    pub id: DbId,
    pub name: String,
    pub department: String,
    pub position: String,
    pub salary: Decimal,
}

/// Salary is stored as canonical decimal text, so rows are decoded by hand.
impl<'r> FromRow<'r, SqliteRow> for Employee {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let salary: String = row.try_get("salary")?;
        let salary = Decimal::from_str(&salary).map_err(|e| sqlx::Error::ColumnDecode {
            index: "salary".to_string(),
            source: Box::new(e),
        })?;

        Ok(Self {
            id: row.try_get("id")?,
            name: row.try_get("name")?,
            department: row.try_get("department")?,
            position: row.try_get("position")?,
            salary,
        })
    }
}

/// DTO for creating or fully replacing an employee.
///
/// Each field is read leniently: a missing or wrongly typed value becomes a
/// [`RawField`] variant instead of a deserialization failure, so it is
/// reported as a field error alongside every other one.
/// `id` is ignored on create and must match the path on update.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EmployeeInput {
    #[serde(default, deserialize_with = "lenient_id")]
    pub id: RawField<DbId>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub name: RawField<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub department: RawField<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub position: RawField<String>,
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub salary: RawField<Decimal>,
}

impl TryFrom<EmployeeInput> for ValidEmployee {
    type Error = ValidationErrors;

    fn try_from(input: EmployeeInput) -> Result<Self, Self::Error> {
        validate_employee_fields(EmployeeDraft {
            name: input.name,
            department: input.department,
            position: input.position,
            salary: input.salary,
        })
    }
}

fn lenient_id<'de, D: Deserializer<'de>>(deserializer: D) -> Result<RawField<DbId>, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::Null => RawField::Missing,
        Value::Number(n) => n.as_i64().map_or(RawField::WrongType, RawField::Present),
        _ => RawField::WrongType,
    })
}

fn lenient_text<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<RawField<String>, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::Null => RawField::Missing,
        Value::String(text) => RawField::Present(text),
        _ => RawField::WrongType,
    })
}

/// Only JSON numbers are salaries. The number's own text is parsed so the
/// decimal keeps the digits the client sent.
fn lenient_decimal<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<RawField<Decimal>, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::Null => RawField::Missing,
        Value::Number(n) => {
            let text = n.to_string();
            Decimal::from_str(&text)
                .or_else(|_| Decimal::from_scientific(&text))
                .map_or(RawField::WrongType, RawField::Present)
        }
        _ => RawField::WrongType,
    })
}
