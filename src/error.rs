use thiserror::Error;

/// Error type covering every core operation.
///
/// `StorageUnavailable` is fatal to the attempted operation; the remaining
/// variants are user-correctable rejections with no partial state change.
#[derive(Error, Debug)]
pub enum TrackerError {
    /// The database file cannot be opened, read, or written
    #[error("storage unavailable: {0}")]
    StorageUnavailable(#[from] rusqlite::Error),

    /// Registration hit the unique-username constraint
    #[error("username already taken: {0}")]
    DuplicateUsername(String),

    /// No user row matches the given username and password
    #[error("invalid username or password")]
    InvalidCredentials,

    /// Amount did not parse as a finite number
    #[error("amount must be a number, got {0:?}")]
    InvalidAmount(String),

    /// Category name does not resolve to a known category
    #[error("unknown category: {0:?}")]
    UnknownCategory(String),

    /// Input rejected before it reached the database
    #[error("validation error: {0}")]
    Validation(String),

    /// Password hashing infrastructure failure (not a credential mismatch)
    #[error("password hash error: {0}")]
    Hash(String),
}

impl TrackerError {
    /// True for rejections the user can correct and resubmit
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, Self::StorageUnavailable(_) | Self::Hash(_))
    }
}

/// Result type alias for core operations
pub type TrackerResult<T> = Result<T, TrackerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = TrackerError::DuplicateUsername("alice".into());
        assert_eq!(err.to_string(), "username already taken: alice");

        let err = TrackerError::UnknownCategory("Snacks".into());
        assert_eq!(err.to_string(), "unknown category: \"Snacks\"");

        let err = TrackerError::InvalidAmount("abc".into());
        assert_eq!(err.to_string(), "amount must be a number, got \"abc\"");
    }

    #[test]
    fn test_recoverable_classification() {
        assert!(TrackerError::InvalidCredentials.is_recoverable());
        assert!(TrackerError::InvalidAmount("x".into()).is_recoverable());

        let storage = TrackerError::from(rusqlite::Error::InvalidQuery);
        assert!(!storage.is_recoverable());
    }
}
