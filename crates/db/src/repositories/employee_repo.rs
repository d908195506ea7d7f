//! Repository for the `employees` table.

use roster_core::types::DbId;

use crate::models::employee::{Employee, ValidEmployee};
use crate::DbPool;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, department, position, salary";

/// Provides CRUD operations for employees.
pub struct EmployeeRepo;

impl EmployeeRepo {
    /// Insert a new employee, returning the created row with its assigned id.
    pub async fn create(pool: &DbPool, input: &ValidEmployee) -> Result<Employee, sqlx::Error> {
        let query = format!(
            "INSERT INTO employees (name, department, position, salary)
             VALUES (?1, ?2, ?3, ?4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Employee>(&query)
            .bind(&input.name)
            .bind(&input.department)
            .bind(&input.position)
            .bind(input.salary.to_string())
            .fetch_one(pool)
            .await
    }

    /// Find an employee by id.
    pub async fn find_by_id(pool: &DbPool, id: DbId) -> Result<Option<Employee>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM employees WHERE id = ?1");
        sqlx::query_as::<_, Employee>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all employees ordered by id.
    pub async fn list(pool: &DbPool) -> Result<Vec<Employee>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM employees ORDER BY id");
        sqlx::query_as::<_, Employee>(&query).fetch_all(pool).await
    }

    /// Overwrite every business column of an employee in place.
    ///
    /// Returns `false` if no row was touched, e.g. because it was deleted
    /// after the caller last saw it.
    pub async fn update(
        pool: &DbPool,
        id: DbId,
        input: &ValidEmployee,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE employees SET
                name = ?2,
                department = ?3,
                position = ?4,
                salary = ?5
             WHERE id = ?1",
        )
        .bind(id)
        .bind(&input.name)
        .bind(&input.department)
        .bind(&input.position)
        .bind(input.salary.to_string())
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Permanently delete an employee by id. Returns `true` if a row was removed.
    pub async fn delete(pool: &DbPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM employees WHERE id = ?1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Whether a row with the given id exists.
    pub async fn exists(pool: &DbPool, id: DbId) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM employees WHERE id = ?1)")
            .bind(id)
            .fetch_one(pool)
            .await
    }
}
