//! Application router configuration.

use axum::{
    Json, Router,
    response::IntoResponse,
    routing::{get, post},
};
use serde_json::json;

use crate::{
    AppState, endpoints,
    routes::{
        create_transaction, delete_transaction, get_transaction, get_user_stats,
        get_user_transactions, update_transaction,
    },
};

/// Return a router with all the app's routes.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(endpoints::HELLO, get(get_hello))
        .route(endpoints::TRANSACTIONS, post(create_transaction))
        .route(
            endpoints::TRANSACTION,
            get(get_transaction)
                .put(update_transaction)
                .delete(delete_transaction),
        )
        .route(endpoints::USER_TRANSACTIONS, get(get_user_transactions))
        .route(endpoints::USER_STATS, get(get_user_stats))
        .with_state(state)
}

/// A route handler for checking that the server is up.
async fn get_hello() -> impl IntoResponse {
    Json(json!({ "message": "Hello world" }))
}
