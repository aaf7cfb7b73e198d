//! Defines the endpoint for creating a user.

use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{FromRef, State, rejection::JsonRejection},
    http::StatusCode,
    response::IntoResponse,
};
use rusqlite::Connection;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::{
    AppState, Error, PasswordHash,
    user::{User, insert_user},
};

/// The state needed to create a user.
#[derive(Debug, Clone)]
pub struct CreateUserState {
    /// The database connection for managing users.
    pub db_connection: Arc<Mutex<Connection>>,
    /// The bcrypt cost used to hash new passwords.
    pub password_cost: u32,
}

impl FromRef<AppState> for CreateUserState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
            password_cost: PasswordHash::DEFAULT_COST,
        }
    }
}

/// The request body for creating a user.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct NewUser {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub firstname: String,
    #[serde(default)]
    pub lastname: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    pub phone_number: Option<String>,
    pub bio: Option<String>,
    pub job_description: Option<String>,
    pub address: Option<String>,
    pub sex: Option<String>,
    pub img: Option<String>,
}

/// A route handler for creating a user, responds with the created user.
pub async fn create_user_endpoint(
    State(state): State<CreateUserState>,
    payload: Result<Json<NewUser>, JsonRejection>,
) -> Result<impl IntoResponse, Error> {
    let Json(new_user) = payload?;

    // Hash before taking the lock, bcrypt is slow on purpose.
    check_required_fields(&new_user)?;
    let password_hash = PasswordHash::from_raw_password(&new_user.password, state.password_cost)?;

    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    let user = create_user(new_user, password_hash, OffsetDateTime::now_utc(), &connection)
        .inspect_err(|error| tracing::debug!("could not create user: {error}"))?;

    tracing::info!("Created user {}", user.user_id);

    Ok((StatusCode::CREATED, Json(user)))
}

/// Validate `new_user` and insert it with `password_hash`, stamped with `now`.
///
/// # Errors
/// Returns [Error::MissingFields] if the username, email or password is blank
/// and [Error::DuplicateUser] if the username or email is taken.
pub fn create_user(
    new_user: NewUser,
    password_hash: PasswordHash,
    now: OffsetDateTime,
    connection: &Connection,
) -> Result<User, Error> {
    check_required_fields(&new_user)?;

    insert_user(
        User {
            user_id: 0,
            username: new_user.username.trim().to_owned(),
            firstname: new_user.firstname.trim().to_owned(),
            lastname: new_user.lastname.trim().to_owned(),
            email: new_user.email.trim().to_owned(),
            password_hash,
            phone_number: new_user.phone_number,
            bio: new_user.bio,
            job_description: new_user.job_description,
            address: new_user.address,
            sex: new_user.sex,
            img: new_user.img,
            created_at: now,
            updated_at: now,
        },
        connection,
    )
}

fn check_required_fields(new_user: &NewUser) -> Result<(), Error> {
    let missing: Vec<_> = [
        ("username", &new_user.username),
        ("email", &new_user.email),
        ("password", &new_user.password),
    ]
    .into_iter()
    .filter(|(_, value)| value.trim().is_empty())
    .map(|(field, _)| field)
    .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(Error::MissingFields(missing))
    }
}
