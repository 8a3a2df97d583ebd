//! Defines the transaction store trait.

use crate::{
    Error,
    models::{DatabaseId, Transaction, TransactionBuilder, UserId},
};

/// Handles the creation and retrieval of transactions.
pub trait TransactionStore {
    /// Create a new transaction in the store.
    fn create(&mut self, builder: TransactionBuilder) -> Result<Transaction, Error>;

    /// Retrieve a transaction from the store by its ID.
    fn get(&self, id: DatabaseId) -> Result<Transaction, Error>;

    /// Retrieve all transactions belonging to `user_id`.
    ///
    /// An empty vector is returned if the specified user has no transactions,
    /// callers decide whether that is an error.
    fn get_by_user(&self, user_id: UserId) -> Result<Vec<Transaction>, Error>;

    /// Overwrite the transaction with `id` using the fields from `builder`.
    fn update(
        &mut self,
        id: DatabaseId,
        builder: TransactionBuilder,
    ) -> Result<Transaction, Error>;

    /// Remove the transaction with `id` from the store and return it.
    fn delete(&mut self, id: DatabaseId) -> Result<Transaction, Error>;

    /// Get the total number of transactions in the store.
    fn count(&self) -> Result<usize, Error>;
}
