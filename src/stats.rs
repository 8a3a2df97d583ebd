//! Per-user transaction statistics.
//!
//! Provides a pure function that summarises a user's transaction history:
//! the arithmetic mean of the amounts and the calendar day that occurs most
//! often among the transaction dates.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use time::Date;

use crate::{
    Error,
    models::{Transaction, UserId},
};

/// A summary of a user's transaction history.
///
/// Created fresh per invocation of [compute_user_stats] and never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserStatsSummary {
    /// The ID of the user the summary describes.
    pub user_id: UserId,
    /// The arithmetic mean of the user's transaction amounts.
    pub average_transaction: f64,
    /// The calendar day with the most transactions.
    pub highest_transaction_day: Date,
}

/// Summarise `transactions` for the user with `user_id`.
///
/// All records are assumed to belong to `user_id`; this is not re-validated.
///
/// The average is the running sum of the amounts divided by the count. The
/// highest transaction day is the calendar date (time-of-day truncated in
/// the record's own UTC offset) with the most transactions. When several
/// dates share the maximum count, the date whose first occurrence appears
/// earliest in input order wins, so the result is deterministic for a fixed
/// input order.
///
/// # Errors
/// Returns [Error::NotFound] if `transactions` is empty, since an average
/// over zero records is undefined.
pub fn compute_user_stats(
    user_id: UserId,
    transactions: &[Transaction],
) -> Result<UserStatsSummary, Error> {
    if transactions.is_empty() {
        return Err(Error::NotFound);
    }

    let total: f64 = transactions.iter().map(|transaction| transaction.amount).sum();
    let average_transaction = total / transactions.len() as f64;

    let mut counts: HashMap<Date, usize> = HashMap::new();
    for transaction in transactions {
        *counts.entry(transaction.date.date()).or_insert(0) += 1;
    }

    // Scan in input order with a strict comparison so that ties resolve to
    // the date that was encountered first.
    let mut highest_transaction_day = transactions[0].date.date();
    let mut highest_count = 0;

    for transaction in transactions {
        let day = transaction.date.date();
        let count = counts[&day];

        if count > highest_count {
            highest_count = count;
            highest_transaction_day = day;
        }
    }

    Ok(UserStatsSummary {
        user_id,
        average_transaction,
        highest_transaction_day,
    })
}
