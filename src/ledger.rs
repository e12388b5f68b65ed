use rusqlite::params;

use crate::accounts::UserId;
use crate::categories::category_id;
use crate::error::{TrackerError, TrackerResult};
use crate::store::Store;

/// Row id of a recorded expense.
pub type ExpenseId = i64;

impl Store {
    /// Append an expense row for the given user.
    ///
    /// The amount arrives as entered in the form and must parse as a finite
    /// number; the category name must resolve to a seeded category. Date and
    /// description are stored verbatim, empty values included.
    pub fn add_expense(
        &self,
        user_id: UserId,
        category_name: &str,
        amount: &str,
        date: &str,
        description: &str,
    ) -> TrackerResult<ExpenseId> {
        let amount = parse_amount(amount)?;

        let conn = self.conn();
        let category_id = category_id(&conn, category_name)?;

        conn.execute(
            "INSERT INTO expenses (user_id, category_id, amount, date, description)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![user_id, category_id, amount, date, description],
        )?;

        let id = conn.last_insert_rowid();
        log::debug!("expense {id}: user {user_id}, {category_name} {amount}");
        Ok(id)
    }
}

fn parse_amount(raw: &str) -> TrackerResult<f64> {
    match raw.trim().parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(TrackerError::InvalidAmount(raw.to_string())),
    }
}
