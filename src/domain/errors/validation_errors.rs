use thiserror::Error;

/// Validation errors for object paths used in administrative operations
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("object path cannot be empty")]
    EmptyPath,

    #[error("object path too long: {actual} bytes (max: {max})")]
    PathTooLong { actual: usize, max: usize },

    #[error("invalid character in object path: {0:?}")]
    InvalidPathCharacter(char),

    #[error("object path cannot start with '/'")]
    PathStartsWithSlash,

    #[error("object path cannot contain '//'")]
    PathContainsDoubleSlash,
}
