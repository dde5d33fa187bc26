use thiserror::Error;

#[derive(Error, Debug)]
pub enum RolodexError {
    /// Malformed input value or parameter.
    #[error("{0}")]
    Validation(String),

    /// Value already present where uniqueness is required.
    #[error("{0}")]
    Duplicate(String),

    /// Lookup target absent, or the collection is empty.
    #[error("{0}")]
    NotFound(String),

    /// Explicit position outside the valid bounds.
    #[error("{0}")]
    IndexOutOfRange(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Corrupted address book: {0}")]
    Corrupted(String),

    #[error("Store error: {0}")]
    Store(String),

    #[error("Config error: {0}")]
    Config(#[from] confique::Error),
}

impl RolodexError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn duplicate(msg: impl Into<String>) -> Self {
        Self::Duplicate(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn out_of_range(msg: impl Into<String>) -> Self {
        Self::IndexOutOfRange(msg.into())
    }
}

pub type Result<T> = std::result::Result<T, RolodexError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_domain_errors_display_their_message() {
        let err = RolodexError::not_found("No record with the name 'x' in the address book.");
        assert_eq!(
            err.to_string(),
            "No record with the name 'x' in the address book."
        );
    }

    #[test]
    fn test_io_error_converts() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "nope");
        let err: RolodexError = io.into();
        assert!(matches!(err, RolodexError::Io(_)));
        assert!(err.to_string().starts_with("IO error"));
    }
}
