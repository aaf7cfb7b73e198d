//! Defines the endpoint for listing sales.

use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{FromRef, State},
};
use rusqlite::Connection;

use crate::{
    AppState, Error,
    sale::{Sale, get_sales},
};

/// The state needed to list sales.
#[derive(Debug, Clone)]
pub struct SalesState {
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for SalesState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// A route handler for listing sales, newest first.
pub async fn get_sales_endpoint(State(state): State<SalesState>) -> Result<Json<Vec<Sale>>, Error> {
    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    let sales = get_sales(&connection)
        .inspect_err(|error| tracing::error!("could not get sales: {error}"))?;

    Ok(Json(sales))
}
