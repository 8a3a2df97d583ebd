//! Implements a struct that holds the state of the REST server.

use std::sync::{Arc, Mutex};

use rusqlite::Connection;

use crate::{Error, db::initialize, stores::SQLiteTransactionStore};

/// The state of the REST server.
///
/// The database handle is opened once at process start, shared by the route
/// handlers through this struct, and dropped at shutdown. Nothing else in
/// the application holds process-wide mutable state.
#[derive(Debug, Clone)]
pub struct AppState {
    /// The store for reading and writing transactions.
    pub transaction_store: SQLiteTransactionStore,
}

impl AppState {
    /// Create a new [AppState] with a SQLite database connection.
    ///
    /// This function will initialize the database by adding the tables for the domain models.
    ///
    /// # Errors
    /// Returns an error if the database cannot be initialized.
    pub fn new(db_connection: Connection) -> Result<Self, Error> {
        initialize(&db_connection)?;

        let connection = Arc::new(Mutex::new(db_connection));

        Ok(Self {
            transaction_store: SQLiteTransactionStore::new(connection),
        })
    }
}
