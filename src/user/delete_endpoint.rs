//! Defines the endpoint for deleting a user.

use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{FromRef, Path, State},
};
use rusqlite::Connection;
use serde_json::{Value, json};

use crate::{
    AppState, Error,
    user::{UserId, core::delete_user},
};

/// The state needed to delete a user.
#[derive(Debug, Clone)]
pub struct DeleteUserState {
    /// The database connection for managing users.
    db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for DeleteUserState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// A route handler for deleting a user, responds with a confirmation message.
pub async fn delete_user_endpoint(
    State(state): State<DeleteUserState>,
    Path(user_id): Path<UserId>,
) -> Result<Json<Value>, Error> {
    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    delete_user(user_id, &connection)
        .inspect_err(|error| tracing::debug!("could not delete user {user_id}: {error}"))?;

    tracing::info!("Deleted user {user_id}");

    Ok(Json(json!({ "message": "User deleted successfully" })))
}
