use validator::ValidationErrors;

use crate::types::DbId;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    /// One or more field-level rule violations, keyed by wire field name.
    #[error("Validation failed: {0}")]
    InvalidFields(#[from] ValidationErrors),

    #[error("Internal error: {0}")]
    Internal(String),
}
