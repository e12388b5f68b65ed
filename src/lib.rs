// Expense Tracker - Core Library
// Persistence and query layer; the CLI front-end and tests consume this

pub mod accounts;
pub mod categories;
pub mod error;
pub mod ledger;
pub mod report;
pub mod schema;
pub mod store;

// Re-export commonly used types
pub use accounts::{Session, UserId};
pub use error::{TrackerError, TrackerResult};
pub use ledger::ExpenseId;
pub use report::CategoryTotal;
pub use schema::DEFAULT_CATEGORIES;
pub use store::Store;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
