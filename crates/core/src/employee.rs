//! Employee field constraints and the validation rule set applied on create
//! and update.
//!
//! Every rule is evaluated against the whole payload; violations are collected
//! into a single [`ValidationErrors`] rather than stopping at the first one.

use std::borrow::Cow;
use std::collections::BTreeMap;

use rust_decimal::Decimal;
use validator::{ValidationError, ValidationErrors};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Entity name used in not-found errors and log fields.
pub const ENTITY: &str = "Employee";

/// Maximum length of `name`, in characters.
pub const NAME_MAX_LEN: usize = 100;

/// Maximum length of `department`, in characters.
pub const DEPARTMENT_MAX_LEN: usize = 50;

/// Maximum length of `position`, in characters.
pub const POSITION_MAX_LEN: usize = 50;

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// A payload field as it arrived on the wire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawField<T> {
    /// Absent or `null`.
    Missing,
    /// Present, but not of the expected JSON type.
    WrongType,
    Present(T),
}

impl<T> Default for RawField<T> {
    fn default() -> Self {
        RawField::Missing
    }
}

/// The business fields of an employee payload, before validation.
#[derive(Debug, Clone, Default)]
pub struct EmployeeDraft {
    pub name: RawField<String>,
    pub department: RawField<String>,
    pub position: RawField<String>,
    pub salary: RawField<Decimal>,
}

/// Column values of an employee payload that has passed validation.
///
/// Repositories only accept this type, so an unvalidated payload cannot be
/// written.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidEmployee {
    pub name: String,
    pub department: String,
    pub position: String,
    pub salary: Decimal,
}

/// Validate all business fields of an employee.
///
/// Returns every violation at once, keyed by the JSON field name.
pub fn validate_employee_fields(draft: EmployeeDraft) -> Result<ValidEmployee, ValidationErrors> {
    let mut errors = ValidationErrors::new();

    let name = check_required_text(&mut errors, "name", "Name", draft.name, NAME_MAX_LEN);
    let department = check_required_text(
        &mut errors,
        "department",
        "Department",
        draft.department,
        DEPARTMENT_MAX_LEN,
    );
    let position = check_required_text(
        &mut errors,
        "position",
        "Position",
        draft.position,
        POSITION_MAX_LEN,
    );
    let salary = check_salary(&mut errors, draft.salary);

    match (name, department, position, salary) {
        (Some(name), Some(department), Some(position), Some(salary)) => Ok(ValidEmployee {
            name,
            department,
            position,
            salary,
        }),
        _ => Err(errors),
    }
}

/// Flatten [`ValidationErrors`] into `field -> [message, ...]`, sorted by field.
///
/// Errors without a message fall back to their code.
pub fn field_messages(errors: &ValidationErrors) -> BTreeMap<String, Vec<String>> {
    errors
        .field_errors()
        .into_iter()
        .map(|(field, errs)| {
            let messages = errs
                .iter()
                .map(|e| match &e.message {
                    Some(msg) => msg.to_string(),
                    None => e.code.to_string(),
                })
                .collect();
            (field.to_string(), messages)
        })
        .collect()
}

/// A present, non-empty string no longer than `max_len` characters.
///
/// Presence is raw: whitespace-only strings count as present. Returns the
/// value only when no error was recorded for the field.
fn check_required_text(
    errors: &mut ValidationErrors,
    field: &'static str,
    label: &str,
    value: RawField<String>,
    max_len: usize,
) -> Option<String> {
    let error = match value {
        RawField::Present(text) if text.is_empty() => {
            rule_error("required", format!("{label} is required"))
        }
        RawField::Present(text) if text.chars().count() > max_len => rule_error(
            "length",
            format!("{label} cannot exceed {max_len} characters"),
        ),
        RawField::Present(text) => return Some(text),
        RawField::Missing => rule_error("required", format!("{label} is required")),
        RawField::WrongType => rule_error("type", format!("{label} must be a string")),
    };
    errors.add(field, error);
    None
}

/// Salary must be a present, non-negative number. There is no upper bound.
fn check_salary(errors: &mut ValidationErrors, value: RawField<Decimal>) -> Option<Decimal> {
    let error = match value {
        RawField::Present(salary) if salary < Decimal::ZERO => {
            rule_error("range", "Salary must be a positive number".into())
        }
        RawField::Present(salary) => return Some(salary),
        RawField::Missing => rule_error("required", "Salary is required".into()),
        RawField::WrongType => rule_error("type", "Salary must be a number".into()),
    };
    errors.add("salary", error);
    None
}

fn rule_error(code: &'static str, message: String) -> ValidationError {
    let mut error = ValidationError::new(code);
    error.message = Some(Cow::Owned(message));
    error
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    fn text(value: &str) -> RawField<String> {
        RawField::Present(value.to_string())
    }

    fn valid() -> EmployeeDraft {
        EmployeeDraft {
            name: text("Ada"),
            department: text("Eng"),
            position: text("Engineer"),
            salary: RawField::Present(Decimal::from(100_000)),
        }
    }

    fn messages_for(draft: EmployeeDraft) -> BTreeMap<String, Vec<String>> {
        let errors = validate_employee_fields(draft).expect_err("expected validation errors");
        field_messages(&errors)
    }

    #[test]
    fn accepts_valid_payload() {
        let employee = validate_employee_fields(valid()).unwrap();
        assert_eq!(employee.name, "Ada");
        assert_eq!(employee.salary, Decimal::from(100_000));
    }

    #[test]
    fn accepts_zero_salary() {
        let draft = EmployeeDraft {
            salary: RawField::Present(Decimal::ZERO),
            ..valid()
        };
        assert!(validate_employee_fields(draft).is_ok());
    }

    #[test]
    fn accepts_fields_at_max_length() {
        let draft = EmployeeDraft {
            name: text(&"n".repeat(NAME_MAX_LEN)),
            department: text(&"d".repeat(DEPARTMENT_MAX_LEN)),
            position: text(&"p".repeat(POSITION_MAX_LEN)),
            ..valid()
        };
        assert!(validate_employee_fields(draft).is_ok());
    }

    #[test]
    fn whitespace_name_counts_as_present() {
        let draft = EmployeeDraft {
            name: text("   "),
            ..valid()
        };
        assert_eq!(validate_employee_fields(draft).unwrap().name, "   ");
    }

    #[test]
    fn empty_name_is_required_error() {
        let messages = messages_for(EmployeeDraft {
            name: text(""),
            ..valid()
        });
        assert_eq!(messages["name"], vec!["Name is required"]);
        assert_eq!(messages.len(), 1);
    }

    #[test]
    fn missing_fields_are_all_reported() {
        let messages = messages_for(EmployeeDraft::default());
        assert_eq!(messages["name"], vec!["Name is required"]);
        assert_eq!(messages["department"], vec!["Department is required"]);
        assert_eq!(messages["position"], vec!["Position is required"]);
        assert_eq!(messages["salary"], vec!["Salary is required"]);
    }

    #[test]
    fn wrong_types_are_reported_with_other_errors() {
        let messages = messages_for(EmployeeDraft {
            name: RawField::WrongType,
            department: RawField::Missing,
            position: text(&"p".repeat(POSITION_MAX_LEN + 1)),
            salary: RawField::WrongType,
        });
        assert_eq!(messages["name"], vec!["Name must be a string"]);
        assert_eq!(messages["department"], vec!["Department is required"]);
        assert_eq!(
            messages["position"],
            vec!["Position cannot exceed 50 characters"]
        );
        assert_eq!(messages["salary"], vec!["Salary must be a number"]);
    }

    #[test]
    fn overlong_fields_report_length_errors() {
        let messages = messages_for(EmployeeDraft {
            name: text(&"n".repeat(NAME_MAX_LEN + 1)),
            position: text(&"p".repeat(POSITION_MAX_LEN + 1)),
            ..valid()
        });
        assert_eq!(messages["name"], vec!["Name cannot exceed 100 characters"]);
        assert_eq!(
            messages["position"],
            vec!["Position cannot exceed 50 characters"]
        );
        assert!(!messages.contains_key("department"));
    }

    #[test]
    fn length_is_counted_in_characters() {
        // 50 two-byte characters: 100 bytes, still within the limit.
        let draft = EmployeeDraft {
            department: text(&"é".repeat(DEPARTMENT_MAX_LEN)),
            ..valid()
        };
        assert!(validate_employee_fields(draft).is_ok());
    }

    #[test]
    fn negative_salary_is_rejected() {
        let messages = messages_for(EmployeeDraft {
            salary: RawField::Present(Decimal::from(-5)),
            ..valid()
        });
        assert_eq!(messages["salary"], vec!["Salary must be a positive number"]);
    }

    #[test]
    fn negative_zero_salary_is_accepted() {
        let draft = EmployeeDraft {
            salary: RawField::Present(Decimal::from_str("-0.00").unwrap()),
            ..valid()
        };
        assert!(validate_employee_fields(draft).is_ok());
    }
}
