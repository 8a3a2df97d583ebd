//! Defines the route handlers for the JSON REST API.

mod stats;
mod transaction;

pub use stats::get_user_stats;
pub use transaction::{
    TransactionData, create_transaction, delete_transaction, get_transaction,
    get_user_transactions, update_transaction,
};
