use rusqlite::params;
use serde::Serialize;

use crate::accounts::UserId;
use crate::error::TrackerResult;
use crate::store::Store;

/// One bar of the report: a category and the summed amount spent in it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryTotal {
    pub category: String,
    pub total: f64,
}

impl Store {
    /// Sum of expense amounts per category for one user.
    ///
    /// Inner-join semantics: categories without a matching expense are
    /// omitted, and a user with no expenses gets an empty vec, not an
    /// error. Rows come back in category-name order so output is
    /// reproducible.
    pub fn summarize_by_category(&self, user_id: UserId) -> TrackerResult<Vec<CategoryTotal>> {
        let conn = self.conn();
        let mut stmt = conn.prepare(
            "SELECT c.name, SUM(e.amount) AS total
             FROM expenses e
             JOIN categories c ON e.category_id = c.id
             WHERE e.user_id = ?1
             GROUP BY c.name
             ORDER BY c.name",
        )?;

        let totals = stmt
            .query_map(params![user_id], |row| {
                Ok(CategoryTotal {
                    category: row.get(0)?,
                    total: row.get(1)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(totals)
    }
}
