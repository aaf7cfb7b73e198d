//! Defines the endpoint for listing notifications.

use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{FromRef, State},
};
use rusqlite::Connection;

use crate::{
    AppState, Error,
    notification::{Notification, get_notifications},
};

/// The state needed to list notifications.
#[derive(Debug, Clone)]
pub struct NotificationsState {
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for NotificationsState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// A route handler for listing notifications, newest first.
pub async fn get_notifications_endpoint(
    State(state): State<NotificationsState>,
) -> Result<Json<Vec<Notification>>, Error> {
    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    let notifications = get_notifications(&connection)
        .inspect_err(|error| tracing::error!("could not get notifications: {error}"))?;

    Ok(Json(notifications))
}
