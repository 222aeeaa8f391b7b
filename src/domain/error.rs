use thiserror::Error;

/// Errors raised while parsing or validating fleet records
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    #[error("unknown {entity} status {value:?}")]
    UnknownStatus { entity: &'static str, value: String },

    #[error("unknown license category {0:?}")]
    UnknownCategory(String),

    #[error("{entity} #{id}: {field} {message}")]
    Validation {
        entity: &'static str,
        id: u32,
        field: &'static str,
        message: String,
    },

    #[error("trip #{id}: start {start} is after end {end}")]
    InvalidTripWindow { id: u32, start: String, end: String },
}

impl DomainError {
    pub fn validation(
        entity: &'static str,
        id: u32,
        field: &'static str,
        message: impl Into<String>,
    ) -> Self {
        Self::Validation {
            entity,
            id,
            field,
            message: message.into(),
        }
    }
}

/// Normalize free text status spellings before matching.
///
/// Folds case, maps separators to `_` and strips the Portuguese accents the
/// backend constants never carry.
pub(crate) fn status_key(value: &str) -> String {
    value
        .trim()
        .chars()
        .map(|ch| match ch {
            ' ' | '-' => '_',
            'á' | 'à' | 'â' | 'ã' | 'Á' | 'À' | 'Â' | 'Ã' => 'a',
            'é' | 'ê' | 'É' | 'Ê' => 'e',
            'í' | 'Í' => 'i',
            'ó' | 'ô' | 'õ' | 'Ó' | 'Ô' | 'Õ' => 'o',
            'ú' | 'Ú' => 'u',
            'ç' | 'Ç' => 'c',
            other => other.to_ascii_lowercase(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_key_folds_accents_and_separators() {
        assert_eq!(status_key("Em Andamento"), "em_andamento");
        assert_eq!(status_key(" Disponível "), "disponivel");
        assert_eq!(status_key("on-trip"), "on_trip");
        assert_eq!(status_key("CONCLUÍDA"), "concluida");
    }

    #[test]
    fn test_validation_message() {
        let err = DomainError::validation("vehicle", 7, "capacity", "must be greater than zero");
        assert_eq!(err.to_string(), "vehicle #7: capacity must be greater than zero");
    }
}
