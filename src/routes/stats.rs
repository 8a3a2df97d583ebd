//! This file defines the route for serving per-user transaction statistics.

use axum::{
    Json,
    extract::{Path, State},
    response::IntoResponse,
};

use crate::{AppState, Error, models::UserId, stats::compute_user_stats, stores::TransactionStore};

/// A route handler that summarises a user's transaction history.
///
/// Responds with the user's [UserStatsSummary](crate::UserStatsSummary):
/// their average transaction amount and the calendar day they transacted on
/// most often. Responds with the status code 404 when the user has no
/// transactions, since an average over zero records is undefined.
pub async fn get_user_stats(
    State(state): State<AppState>,
    Path(user_id): Path<UserId>,
) -> Result<impl IntoResponse, Error> {
    let transactions = state.transaction_store.get_by_user(user_id)?;
    let summary = compute_user_stats(user_id, &transactions)?;

    Ok(Json(summary))
}
