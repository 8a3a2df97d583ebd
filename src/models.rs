//! Defines the domain data types for the transaction ledger.

use std::fmt::Display;

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// Alias for the integer type used for mapping to database IDs.
pub type DatabaseId = i64;

/// A newtype wrapper for integer user IDs.
///
/// This helps disambiguate user IDs from other types of IDs, leading to better compile time
/// errors, and more flexible generics that can have distinct implementations for multiple ID types.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, Hash)]
pub struct UserId(i64);

impl UserId {
    /// Create a new user ID.
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    /// Cast the user ID to a 64 bit integer.
    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

impl Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// A financial event tied to a user, i.e. money was spent or earned.
///
/// To create a new `Transaction`, use [Transaction::build].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// The ID of the transaction in the application database.
    pub id: DatabaseId,
    /// The ID of the user that the transaction belongs to.
    pub user_id: UserId,
    /// The full name of the account holder.
    pub full_name: String,
    /// The amount of money spent or earned in this transaction.
    pub amount: f64,
    /// When the transaction happened.
    #[serde(with = "time::serde::rfc3339")]
    pub date: OffsetDateTime,
    /// The kind of transaction, e.g. "credit" or "debit".
    pub transaction_type: String,
}

impl Transaction {
    /// Create a new transaction.
    ///
    /// Shortcut for [TransactionBuilder::new] for discoverability.
    pub fn build(amount: f64, user_id: UserId) -> TransactionBuilder {
        TransactionBuilder::new(amount, user_id)
    }
}

/// Builder for creating a new [Transaction].
///
/// The date defaults to the current time so that transactions recorded as
/// they happen need no explicit timestamp. Finalize the builder with
/// [TransactionBuilder::finalise] once the database has assigned an ID.
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionBuilder {
    /// The ID of the user that the transaction belongs to.
    pub user_id: UserId,
    /// The full name of the account holder.
    pub full_name: String,
    /// The amount of money spent or earned in this transaction.
    pub amount: f64,
    /// When the transaction happened.
    pub date: OffsetDateTime,
    /// The kind of transaction, e.g. "credit" or "debit".
    pub transaction_type: String,
}

impl TransactionBuilder {
    /// Create a builder for a transaction of `amount` belonging to `user_id`.
    pub fn new(amount: f64, user_id: UserId) -> Self {
        Self {
            user_id,
            full_name: String::new(),
            amount,
            date: OffsetDateTime::now_utc(),
            transaction_type: String::new(),
        }
    }

    /// Set the full name of the account holder.
    pub fn full_name(mut self, full_name: &str) -> Self {
        self.full_name = full_name.to_owned();
        self
    }

    /// Set the date and time when the transaction happened.
    pub fn date(mut self, date: OffsetDateTime) -> Self {
        self.date = date;
        self
    }

    /// Set the kind of transaction, e.g. "credit" or "debit".
    pub fn transaction_type(mut self, transaction_type: &str) -> Self {
        self.transaction_type = transaction_type.to_owned();
        self
    }

    /// Convert the builder into a [Transaction] with the given database ID.
    pub fn finalise(self, id: DatabaseId) -> Transaction {
        Transaction {
            id,
            user_id: self.user_id,
            full_name: self.full_name,
            amount: self.amount,
            date: self.date,
            transaction_type: self.transaction_type,
        }
    }
}

#[cfg(test)]
mod transaction_builder_tests {
    use time::{OffsetDateTime, macros::datetime};

    use super::{Transaction, UserId};

    #[test]
    fn builder_defaults_date_to_now() {
        let before = OffsetDateTime::now_utc();

        let builder = Transaction::build(12.3, UserId::new(1));

        let after = OffsetDateTime::now_utc();
        assert!(before <= builder.date && builder.date <= after);
    }

    #[test]
    fn finalise_carries_all_fields() {
        let date = datetime!(2024-01-15 13:45:00 UTC);

        let transaction = Transaction::build(42.0, UserId::new(7))
            .full_name("Jane Doe")
            .transaction_type("credit")
            .date(date)
            .finalise(99);

        assert_eq!(transaction.id, 99);
        assert_eq!(transaction.user_id, UserId::new(7));
        assert_eq!(transaction.full_name, "Jane Doe");
        assert_eq!(transaction.amount, 42.0);
        assert_eq!(transaction.date, date);
        assert_eq!(transaction.transaction_type, "credit");
    }
}
