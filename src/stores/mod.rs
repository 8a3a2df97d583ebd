//! Defines the data stores used by the application and their SQLite
//! implementations.

mod sqlite;
mod transaction;

pub use sqlite::SQLiteTransactionStore;
pub use transaction::TransactionStore;
