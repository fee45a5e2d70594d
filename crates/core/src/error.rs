use crate::types::DbId;

/// Domain errors shared by the repositories and handlers.
///
/// Messages are user-facing and written in Spanish; the API layer returns
/// them verbatim in the `error` field.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// A row looked up by id does not exist. `entity` carries its article,
    /// e.g. `"la lección"`.
    #[error("No se encontró {entity} con id {id}")]
    NotFound { entity: &'static str, id: DbId },

    /// Input rejected by a validation rule.
    #[error("{0}")]
    Validation(String),

    /// The write would duplicate existing data.
    #[error("{0}")]
    Conflict(String),

    /// Missing, expired or revoked credentials.
    #[error("{0}")]
    Unauthorized(String),

    /// Authenticated, but the role, enrollment or drip window denies access.
    #[error("{0}")]
    Forbidden(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_names_entity_and_id() {
        let err = CoreError::NotFound {
            entity: "la lección",
            id: 5,
        };
        assert_eq!(err.to_string(), "No se encontró la lección con id 5");
    }

    #[test]
    fn message_variants_display_message_only() {
        let err = CoreError::Forbidden("Esta lección aún no está disponible".into());
        assert_eq!(err.to_string(), "Esta lección aún no está disponible");
    }
}
