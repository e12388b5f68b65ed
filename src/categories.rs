use rusqlite::{params, Connection};

use crate::error::{TrackerError, TrackerResult};
use crate::store::Store;

impl Store {
    /// All category names, in insertion (seed) order. Read-only.
    pub fn list_categories(&self) -> TrackerResult<Vec<String>> {
        let conn = self.conn();
        let mut stmt = conn.prepare("SELECT name FROM categories ORDER BY id")?;
        let names = stmt
            .query_map([], |row| row.get(0))?
            .collect::<Result<Vec<String>, _>>()?;
        Ok(names)
    }
}

/// Resolve a category name to its row id, or `UnknownCategory`.
pub(crate) fn category_id(conn: &Connection, name: &str) -> TrackerResult<i64> {
    conn.query_row(
        "SELECT id FROM categories WHERE name = ?1",
        params![name],
        |row| row.get(0),
    )
    .map_err(|e| match e {
        rusqlite::Error::QueryReturnedNoRows => TrackerError::UnknownCategory(name.to_string()),
        other => other.into(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::DEFAULT_CATEGORIES;

    #[test]
    fn test_catalog_matches_seed_order() {
        let store = Store::open_in_memory().unwrap();
        let categories = store.list_categories().unwrap();

        assert_eq!(categories, DEFAULT_CATEGORIES);
    }

    #[test]
    fn test_category_id_lookup() {
        let store = Store::open_in_memory().unwrap();
        let conn = store.conn();

        assert!(category_id(&conn, "Food").unwrap() > 0);

        let err = category_id(&conn, "NotARealCategory").unwrap_err();
        assert!(matches!(err, TrackerError::UnknownCategory(ref n) if n == "NotARealCategory"));
    }
}
