use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use rusqlite::params;
use serde::Serialize;

use crate::error::{TrackerError, TrackerResult};
use crate::store::Store;

/// Row id of a registered user.
pub type UserId = i64;

/// The authenticated user, passed explicitly to ledger and report calls for
/// the duration of interactive use.
#[derive(Debug, Clone, Serialize)]
pub struct Session {
    pub user_id: UserId,
    pub username: String,
}

impl Store {
    /// Insert a new user row with a salted Argon2 hash of the password.
    ///
    /// Uniqueness rides on the UNIQUE constraint rather than a separate
    /// existence check, so two racing registrations cannot both succeed.
    pub fn register(&self, username: &str, password: &str) -> TrackerResult<UserId> {
        if username.is_empty() {
            return Err(TrackerError::Validation("username must not be empty".into()));
        }

        let salt = SaltString::generate(&mut OsRng);
        let hash = Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| TrackerError::Hash(e.to_string()))?
            .to_string();

        let conn = self.conn();
        let result = conn.execute(
            "INSERT INTO users (username, password_hash) VALUES (?1, ?2)",
            params![username, hash],
        );

        match result {
            Ok(_) => {
                let id = conn.last_insert_rowid();
                log::debug!("registered user {username:?} as id {id}");
                Ok(id)
            }
            Err(rusqlite::Error::SqliteFailure(err, _))
                if err.code == rusqlite::ErrorCode::ConstraintViolation =>
            {
                log::warn!("registration rejected, username {username:?} taken");
                Err(TrackerError::DuplicateUsername(username.to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Look up the user by exact, case-sensitive username and verify the
    /// password against the stored hash.
    ///
    /// A missing user and a wrong password both surface as
    /// `InvalidCredentials`.
    pub fn authenticate(&self, username: &str, password: &str) -> TrackerResult<Session> {
        let conn = self.conn();
        let row = conn.query_row(
            "SELECT id, password_hash FROM users WHERE username = ?1",
            params![username],
            |row| Ok((row.get::<_, i64>(0)?, row.get::<_, String>(1)?)),
        );

        let (user_id, stored_hash) = match row {
            Ok(pair) => pair,
            Err(rusqlite::Error::QueryReturnedNoRows) => {
                return Err(TrackerError::InvalidCredentials)
            }
            Err(e) => return Err(e.into()),
        };

        let parsed = PasswordHash::new(&stored_hash).map_err(|e| TrackerError::Hash(e.to_string()))?;
        if Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_err()
        {
            log::warn!("failed login attempt for {username:?}");
            return Err(TrackerError::InvalidCredentials);
        }

        Ok(Session {
            user_id,
            username: username.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_then_authenticate() {
        let store = Store::open_in_memory().unwrap();

        let id = store.register("alice", "secret").unwrap();
        let session = store.authenticate("alice", "secret").unwrap();

        assert_eq!(session.user_id, id);
        assert_eq!(session.username, "alice");
    }

    #[test]
    fn test_duplicate_username_rejected() {
        let store = Store::open_in_memory().unwrap();
        store.register("alice", "secret").unwrap();

        let err = store.register("alice", "other").unwrap_err();
        assert!(matches!(err, TrackerError::DuplicateUsername(ref u) if u == "alice"));

        // First registration must remain usable
        assert!(store.authenticate("alice", "secret").is_ok());
        assert!(matches!(
            store.authenticate("alice", "other").unwrap_err(),
            TrackerError::InvalidCredentials
        ));
    }

    #[test]
    fn test_wrong_password_is_invalid_credentials() {
        let store = Store::open_in_memory().unwrap();
        store.register("alice", "secret").unwrap();

        let err = store.authenticate("alice", "wrong").unwrap_err();
        assert!(matches!(err, TrackerError::InvalidCredentials));
    }

    #[test]
    fn test_unknown_user_is_invalid_credentials() {
        let store = Store::open_in_memory().unwrap();

        let err = store.authenticate("nobody", "secret").unwrap_err();
        assert!(matches!(err, TrackerError::InvalidCredentials));
    }

    #[test]
    fn test_username_is_case_sensitive() {
        let store = Store::open_in_memory().unwrap();
        store.register("alice", "secret").unwrap();

        let err = store.authenticate("Alice", "secret").unwrap_err();
        assert!(matches!(err, TrackerError::InvalidCredentials));
    }

    #[test]
    fn test_empty_username_rejected() {
        let store = Store::open_in_memory().unwrap();

        let err = store.register("", "secret").unwrap_err();
        assert!(matches!(err, TrackerError::Validation(_)));
    }

    #[test]
    fn test_password_stored_hashed() {
        let store = Store::open_in_memory().unwrap();
        store.register("alice", "secret").unwrap();

        let stored: String = store
            .conn()
            .query_row(
                "SELECT password_hash FROM users WHERE username = 'alice'",
                [],
                |row| row.get(0),
            )
            .unwrap();

        assert_ne!(stored, "secret");
        assert!(stored.starts_with("$argon2"));
    }
}
