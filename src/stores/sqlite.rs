//! Implements a SQLite backed transaction store.

use std::sync::{Arc, Mutex, MutexGuard};

use rusqlite::{Connection, Row};

use crate::{
    Error,
    db::{CreateTable, MapRow},
    models::{DatabaseId, Transaction, TransactionBuilder, UserId},
    stores::TransactionStore,
};

/// Stores transactions in a SQLite database.
#[derive(Debug, Clone)]
pub struct SQLiteTransactionStore {
    connection: Arc<Mutex<Connection>>,
}

impl SQLiteTransactionStore {
    /// Create a new store for the SQLite `connection`.
    pub fn new(connection: Arc<Mutex<Connection>>) -> Self {
        Self { connection }
    }

    fn connection(&self) -> Result<MutexGuard<'_, Connection>, Error> {
        self.connection
            .lock()
            .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
            .map_err(|_| Error::DatabaseLockError)
    }
}

impl TransactionStore for SQLiteTransactionStore {
    /// Create a new transaction in the database.
    ///
    /// # Errors
    /// Returns an [Error::SqlError] if there is an unexpected SQL error.
    fn create(&mut self, builder: TransactionBuilder) -> Result<Transaction, Error> {
        let transaction = self
            .connection()?
            .prepare(
                "INSERT INTO transactions (user_id, full_name, amount, date, transaction_type)
                 VALUES (?1, ?2, ?3, ?4, ?5)
                 RETURNING id, user_id, full_name, amount, date, transaction_type",
            )?
            .query_row(
                (
                    builder.user_id.as_i64(),
                    builder.full_name,
                    builder.amount,
                    builder.date,
                    builder.transaction_type,
                ),
                Self::map_row,
            )?;

        Ok(transaction)
    }

    /// Retrieve a transaction in the database by its `id`.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::NotFound] if `id` does not refer to a valid transaction,
    /// - or [Error::SqlError] if there is some other SQL error.
    fn get(&self, id: DatabaseId) -> Result<Transaction, Error> {
        let transaction = self
            .connection()?
            .prepare(
                "SELECT id, user_id, full_name, amount, date, transaction_type
                 FROM transactions WHERE id = :id",
            )?
            .query_row(&[(":id", &id)], Self::map_row)?;

        Ok(transaction)
    }

    /// Retrieve the transactions in the database that belong to `user_id`,
    /// ordered by insertion (ascending ID).
    ///
    /// The order matters: the statistics tie-break depends on input
    /// iteration order, so it must not be left to the SQL engine's scan
    /// order.
    ///
    /// # Errors
    /// This function will return an [Error::SqlError] if there is an SQL error.
    fn get_by_user(&self, user_id: UserId) -> Result<Vec<Transaction>, Error> {
        self.connection()?
            .prepare(
                "SELECT id, user_id, full_name, amount, date, transaction_type
                 FROM transactions WHERE user_id = :user_id ORDER BY id ASC",
            )?
            .query_map(&[(":user_id", &user_id.as_i64())], Self::map_row)?
            .map(|maybe_transaction| maybe_transaction.map_err(Error::SqlError))
            .collect()
    }

    /// Overwrite the transaction with `id` using the fields from `builder`.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::UpdateMissingTransaction] if `id` does not refer to a valid transaction,
    /// - or [Error::SqlError] if there is some other SQL error.
    fn update(
        &mut self,
        id: DatabaseId,
        builder: TransactionBuilder,
    ) -> Result<Transaction, Error> {
        self.connection()?
            .prepare(
                "UPDATE transactions
                 SET user_id = ?1, full_name = ?2, amount = ?3, date = ?4, transaction_type = ?5
                 WHERE id = ?6
                 RETURNING id, user_id, full_name, amount, date, transaction_type",
            )?
            .query_row(
                (
                    builder.user_id.as_i64(),
                    builder.full_name,
                    builder.amount,
                    builder.date,
                    builder.transaction_type,
                    id,
                ),
                Self::map_row,
            )
            .map_err(|error| match error {
                rusqlite::Error::QueryReturnedNoRows => Error::UpdateMissingTransaction,
                error => error.into(),
            })
    }

    /// Remove the transaction with `id` from the database and return it.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::DeleteMissingTransaction] if `id` does not refer to a valid transaction,
    /// - or [Error::SqlError] if there is some other SQL error.
    fn delete(&mut self, id: DatabaseId) -> Result<Transaction, Error> {
        self.connection()?
            .prepare(
                "DELETE FROM transactions WHERE id = :id
                 RETURNING id, user_id, full_name, amount, date, transaction_type",
            )?
            .query_row(&[(":id", &id)], Self::map_row)
            .map_err(|error| match error {
                rusqlite::Error::QueryReturnedNoRows => Error::DeleteMissingTransaction,
                error => error.into(),
            })
    }

    /// Get the total number of transactions in the database.
    ///
    /// # Errors
    /// This function will return an [Error::SqlError] if there is some SQL error.
    fn count(&self) -> Result<usize, Error> {
        self.connection()?
            .query_row("SELECT COUNT(id) FROM transactions;", [], |row| {
                row.get::<_, i64>(0)
            })
            .map(|count| count as usize)
            .map_err(|error| error.into())
    }
}

impl CreateTable for SQLiteTransactionStore {
    fn create_table(connection: &Connection) -> Result<(), rusqlite::Error> {
        connection.execute(
            "CREATE TABLE IF NOT EXISTS transactions (
                    id INTEGER PRIMARY KEY AUTOINCREMENT,
                    user_id INTEGER NOT NULL,
                    full_name TEXT NOT NULL,
                    amount REAL NOT NULL,
                    date TEXT NOT NULL,
                    transaction_type TEXT NOT NULL
                    )",
            (),
        )?;

        // Ensure the sequence starts at 1
        connection.execute(
            "INSERT OR IGNORE INTO sqlite_sequence (name, seq) VALUES ('transactions', 0)",
            (),
        )?;

        Ok(())
    }
}

impl MapRow for SQLiteTransactionStore {
    type ReturnType = Transaction;

    fn map_row_with_offset(row: &Row, offset: usize) -> Result<Self::ReturnType, rusqlite::Error> {
        Ok(Transaction {
            id: row.get(offset)?,
            user_id: UserId::new(row.get(offset + 1)?),
            full_name: row.get(offset + 2)?,
            amount: row.get(offset + 3)?,
            date: row.get(offset + 4)?,
            transaction_type: row.get(offset + 5)?,
        })
    }
}

#[cfg(test)]
mod sqlite_transaction_store_tests {
    use std::sync::{Arc, Mutex};

    use rusqlite::Connection;
    use time::macros::datetime;

    use crate::{
        Error,
        db::initialize,
        models::{Transaction, UserId},
        stores::TransactionStore,
    };

    use super::SQLiteTransactionStore;

    fn get_store() -> SQLiteTransactionStore {
        let conn = Connection::open_in_memory().unwrap();
        initialize(&conn).unwrap();

        SQLiteTransactionStore::new(Arc::new(Mutex::new(conn)))
    }

    #[test]
    fn create_succeeds() {
        let mut store = get_store();
        let builder = Transaction::build(12.3, UserId::new(1))
            .full_name("Jane Doe")
            .transaction_type("credit")
            .date(datetime!(2024-02-29 08:15:00 UTC));

        let transaction = store.create(builder.clone()).unwrap();

        assert_eq!(transaction, builder.finalise(transaction.id));
    }

    #[test]
    fn create_assigns_increasing_ids() {
        let mut store = get_store();

        let first = store.create(Transaction::build(1.0, UserId::new(1))).unwrap();
        let second = store.create(Transaction::build(2.0, UserId::new(1))).unwrap();

        assert!(second.id > first.id);
    }

    #[test]
    fn get_transaction_by_id_succeeds() {
        let mut store = get_store();
        let transaction = store
            .create(Transaction::build(42.0, UserId::new(2)).full_name("John Doe"))
            .unwrap();

        let selected_transaction = store.get(transaction.id);

        assert_eq!(Ok(transaction), selected_transaction);
    }

    #[test]
    fn get_transaction_fails_on_invalid_id() {
        let mut store = get_store();
        let transaction = store.create(Transaction::build(123.0, UserId::new(1))).unwrap();

        let maybe_transaction = store.get(transaction.id + 654);

        assert_eq!(maybe_transaction, Err(Error::NotFound));
    }

    #[test]
    fn get_by_user_returns_only_that_users_transactions() {
        let mut store = get_store();
        let user_id = UserId::new(1);
        let other_user_id = UserId::new(2);

        let want = vec![
            store.create(Transaction::build(1.0, user_id)).unwrap(),
            store.create(Transaction::build(2.0, user_id)).unwrap(),
            store.create(Transaction::build(3.0, user_id)).unwrap(),
        ];
        store.create(Transaction::build(4.0, other_user_id)).unwrap();

        let got = store.get_by_user(user_id).unwrap();

        assert_eq!(got, want, "transactions must come back in insertion order");
        assert!(got.windows(2).all(|pair| pair[0].id < pair[1].id));
    }

    #[test]
    fn get_by_user_returns_empty_vec_for_unknown_user() {
        let store = get_store();

        let transactions = store.get_by_user(UserId::new(999)).unwrap();

        assert_eq!(transactions, vec![]);
    }

    #[test]
    fn update_overwrites_fields() {
        let mut store = get_store();
        let transaction = store
            .create(
                Transaction::build(100.0, UserId::new(1))
                    .full_name("Jane Doe")
                    .transaction_type("credit"),
            )
            .unwrap();

        let updated = store
            .update(
                transaction.id,
                Transaction::build(150.0, UserId::new(1))
                    .full_name("Jane Doe")
                    .transaction_type("debit")
                    .date(datetime!(2024-01-15 12:00:00 UTC)),
            )
            .unwrap();

        assert_eq!(updated.id, transaction.id);
        assert_eq!(updated.amount, 150.0);
        assert_eq!(updated.transaction_type, "debit");
        assert_eq!(updated.date, datetime!(2024-01-15 12:00:00 UTC));
        assert_eq!(store.get(transaction.id), Ok(updated));
    }

    #[test]
    fn update_fails_on_missing_transaction() {
        let mut store = get_store();

        let result = store.update(999, Transaction::build(1.0, UserId::new(1)));

        assert_eq!(result, Err(Error::UpdateMissingTransaction));
    }

    #[test]
    fn delete_removes_and_returns_transaction() {
        let mut store = get_store();
        let transaction = store.create(Transaction::build(55.5, UserId::new(3))).unwrap();

        let deleted = store.delete(transaction.id).unwrap();

        assert_eq!(deleted, transaction);
        assert_eq!(store.get(transaction.id), Err(Error::NotFound));
    }

    #[test]
    fn delete_fails_on_missing_transaction() {
        let mut store = get_store();

        let result = store.delete(999);

        assert_eq!(result, Err(Error::DeleteMissingTransaction));
    }

    #[test]
    fn get_count() {
        let mut store = get_store();
        let want_count = 20;
        for i in 1..=want_count {
            store
                .create(Transaction::build(i as f64, UserId::new(1)))
                .expect("Could not create transaction");
        }

        let got_count = store.count().expect("Could not get count");

        assert_eq!(want_count, got_count);
    }

    #[test]
    fn round_trips_date_with_offset() {
        let mut store = get_store();
        let date = datetime!(2024-03-05 13:45:30 +13:00);

        let transaction = store
            .create(Transaction::build(9.99, UserId::new(1)).date(date))
            .unwrap();

        assert_eq!(store.get(transaction.id).unwrap().date, date);
    }
}
