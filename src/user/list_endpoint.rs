//! Defines the endpoint for listing users.

use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{FromRef, State},
};
use rusqlite::Connection;

use crate::{
    AppState, Error,
    user::{User, core::get_all_users},
};

/// The state needed to list users.
#[derive(Debug, Clone)]
pub struct UsersState {
    /// The database connection for managing users.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for UsersState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// A route handler for listing users, responds with a JSON array.
pub async fn get_users_endpoint(State(state): State<UsersState>) -> Result<Json<Vec<User>>, Error> {
    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    let users = get_all_users(&connection)
        .inspect_err(|error| tracing::error!("could not get users: {error}"))?;

    Ok(Json(users))
}

#[cfg(test)]
mod tests {
    use serde_json::Value;

    use crate::{
        endpoints,
        user::insert_user,
        test_utils::{get_test_server, get_test_state, sample_user},
    };

    #[tokio::test]
    async fn lists_users_without_passwords() {
        let state = get_test_state();
        {
            let connection = state.db_connection.lock().unwrap();
            insert_user(sample_user(1, "ada"), &connection).unwrap();
            insert_user(sample_user(2, "grace"), &connection).unwrap();
        }
        let server = get_test_server(state);

        let response = server.get(endpoints::USERS).await;

        response.assert_status_ok();
        let users: Vec<Value> = response.json();
        assert_eq!(users.len(), 2);
        assert_eq!(users[0]["username"], "ada");
        assert_eq!(users[1]["email"], "grace@example.com");
        assert!(users.iter().all(|user| user.get("password").is_none()));
    }
}
