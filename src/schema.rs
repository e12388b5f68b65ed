use rusqlite::Connection;

use crate::error::TrackerResult;

/// Fixed category list, seeded once per fresh database.
pub const DEFAULT_CATEGORIES: [&str; 7] = [
    "Food",
    "Transportation",
    "Utilities",
    "Entertainment",
    "Healthcare",
    "Education",
    "Miscellaneous",
];

/// Create the three tables if absent.
///
/// Foreign keys are declared but the `foreign_keys` pragma is left off, so
/// they document intent without being enforced.
pub fn create_tables(conn: &Connection) -> TrackerResult<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS users (
            id            INTEGER PRIMARY KEY AUTOINCREMENT,
            username      TEXT    NOT NULL UNIQUE,
            password_hash TEXT    NOT NULL,
            created_at    TEXT    DEFAULT (datetime('now'))
        );

        CREATE TABLE IF NOT EXISTS categories (
            id   INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT    NOT NULL UNIQUE
        );

        CREATE TABLE IF NOT EXISTS expenses (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            user_id     INTEGER NOT NULL REFERENCES users(id),
            category_id INTEGER NOT NULL REFERENCES categories(id),
            amount      REAL    NOT NULL,
            date        TEXT    NOT NULL,
            description TEXT    NOT NULL DEFAULT ''
        );

        CREATE INDEX IF NOT EXISTS idx_expenses_user ON expenses(user_id);
        CREATE INDEX IF NOT EXISTS idx_expenses_category ON expenses(category_id);
        ",
    )?;

    Ok(())
}

/// Insert the fixed categories, skipping any that already exist by name.
pub fn seed_categories(conn: &Connection) -> TrackerResult<()> {
    let mut stmt = conn.prepare("INSERT OR IGNORE INTO categories (name) VALUES (?1)")?;
    for name in DEFAULT_CATEGORIES {
        stmt.execute([name])?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::Store;

    #[test]
    fn test_initialize_is_idempotent() {
        let store = Store::open_in_memory().unwrap();

        // open() already initialized once; run it twice more
        store.initialize().unwrap();
        store.initialize().unwrap();

        let categories = store.list_categories().unwrap();
        assert_eq!(categories.len(), 7, "re-seeding must not duplicate rows");
    }

    #[test]
    fn test_seed_contains_fixed_list() {
        let store = Store::open_in_memory().unwrap();
        let categories = store.list_categories().unwrap();

        for name in DEFAULT_CATEGORIES {
            assert!(
                categories.iter().any(|c| c == name),
                "missing seeded category {name:?}"
            );
        }
    }
}
