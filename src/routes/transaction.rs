//! This file defines the routes for creating, fetching, updating and
//! deleting transactions.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::{
    AppState, Error,
    models::{DatabaseId, Transaction, TransactionBuilder, UserId},
    stores::TransactionStore,
};

/// The request body for creating or updating a transaction.
#[derive(Debug, Serialize, Deserialize)]
pub struct TransactionData {
    /// The ID of the user that the transaction belongs to.
    pub user_id: UserId,
    /// The full name of the account holder.
    pub full_name: String,
    /// The amount of money spent or earned in this transaction.
    pub amount: f64,
    /// When the transaction happened. Defaults to the current time when
    /// omitted.
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub date: Option<OffsetDateTime>,
    /// The kind of transaction, e.g. "credit" or "debit".
    pub transaction_type: String,
}

impl TransactionData {
    fn into_builder(self) -> TransactionBuilder {
        let builder = Transaction::build(self.amount, self.user_id)
            .full_name(&self.full_name)
            .transaction_type(&self.transaction_type);

        match self.date {
            Some(date) => builder.date(date),
            None => builder,
        }
    }
}

/// A route handler for creating a new transaction.
pub async fn create_transaction(
    State(state): State<AppState>,
    Json(data): Json<TransactionData>,
) -> Result<impl IntoResponse, Error> {
    let mut store = state.transaction_store;
    let transaction = store.create(data.into_builder())?;

    Ok((StatusCode::CREATED, Json(transaction)))
}

/// A route handler for getting a transaction by its database ID.
///
/// This function will return the status code 404 if the requested resource
/// does not exist (e.g., not created yet).
pub async fn get_transaction(
    State(state): State<AppState>,
    Path(transaction_id): Path<DatabaseId>,
) -> Result<impl IntoResponse, Error> {
    let transaction = state.transaction_store.get(transaction_id)?;

    Ok(Json(transaction))
}

/// A route handler for listing all of a user's transactions.
///
/// An unknown user produces an empty list, not an error.
pub async fn get_user_transactions(
    State(state): State<AppState>,
    Path(user_id): Path<UserId>,
) -> Result<impl IntoResponse, Error> {
    let transactions = state.transaction_store.get_by_user(user_id)?;

    Ok(Json(transactions))
}

/// A route handler for updating a transaction by its database ID.
///
/// This function will return the status code 404 if the transaction does
/// not exist.
pub async fn update_transaction(
    State(state): State<AppState>,
    Path(transaction_id): Path<DatabaseId>,
    Json(data): Json<TransactionData>,
) -> Result<impl IntoResponse, Error> {
    let mut store = state.transaction_store;
    let transaction = store.update(transaction_id, data.into_builder())?;

    Ok(Json(transaction))
}

/// A route handler for deleting a transaction by its database ID.
///
/// Responds with the deleted transaction, or the status code 404 if the
/// transaction does not exist.
pub async fn delete_transaction(
    State(state): State<AppState>,
    Path(transaction_id): Path<DatabaseId>,
) -> Result<impl IntoResponse, Error> {
    let mut store = state.transaction_store;
    let transaction = store.delete(transaction_id)?;

    Ok(Json(transaction))
}
