//! Stockroom is the backend for an inventory-management dashboard.
//!
//! This library provides a REST API that serves JSON for products, users,
//! orders, sales, expenses and notifications, plus the reports the dashboard
//! charts are drawn from.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum::{
    Json,
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_server::Handle;
use serde_json::json;
use tokio::signal;

mod app_state;
mod dashboard;
mod database_id;
mod db;
mod endpoints;
mod expense;
mod logging;
mod notification;
mod order;
mod pagination;
mod password;
mod product;
mod routing;
mod sale;
mod seed;
mod timezone;
mod user;

#[cfg(test)]
mod test_utils;

pub use app_state::AppState;
pub use db::initialize as initialize_db;
pub use logging::{LOG_BODY_LENGTH_LIMIT, logging_middleware};
pub use pagination::PaginationConfig;
pub use password::PasswordHash;
pub use routing::build_router;
pub use seed::seed_database;

use crate::order::OrderId;

/// An async task that waits for either the ctrl+c or terminate signal, whichever comes first, and
/// then signals the server to shut down gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::debug!("Received ctrl+c signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
        _ = terminate => {
            tracing::debug!("Received terminate signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
    }
}

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// The requested resource was not found.
    ///
    /// Internally, this error may occur when a query returns no rows.
    #[error("the requested resource could not be found")]
    NotFound,

    /// An unhandled/unexpected SQL error.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(rusqlite::Error),

    /// Could not acquire the database lock
    #[error("could not acquire the database lock")]
    DatabaseLockError,

    /// The request body or query string could not be parsed into the
    /// expected schema.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// One or more required fields were missing or empty.
    #[error("missing required fields: {}", .0.join(", "))]
    MissingFields(Vec<&'static str>),

    /// A money amount was negative, NaN or infinite.
    #[error("{0} is not a valid amount, amounts must be finite and not negative")]
    InvalidAmount(f64),

    /// The username or email of a new user is already taken.
    #[error("username or email already exists")]
    DuplicateUser,

    /// The order items request did not say which order to look up.
    #[error("orderId is required")]
    MissingOrderId,

    /// The order has no items, or does not exist.
    #[error("no order items found for order {0}")]
    NoOrderItems(OrderId),

    /// An unexpected error occurred with the underlying hashing library.
    ///
    /// The error string should only be logged for debugging on the server.
    #[error("hashing failed: {0}")]
    HashingError(String),

    /// The configured timezone is not a canonical timezone name.
    #[error("invalid timezone {0}")]
    InvalidTimezoneError(String),

    /// Tried to update a product that does not exist
    #[error("tried to update a product that is not in the database")]
    UpdateMissingProduct,

    /// Tried to delete a product that does not exist
    #[error("tried to delete a product that is not in the database")]
    DeleteMissingProduct,

    /// Tried to delete a product that existing orders refer to
    #[error("the product is referenced by existing orders")]
    ProductInUse,

    /// Tried to delete a user that does not exist
    #[error("tried to delete a user that is not in the database")]
    DeleteMissingUser,

    /// A seed file could not be read or parsed.
    ///
    /// Callers should pass in the file path and the original error as a string.
    #[error("could not load seed file {0}: {1}")]
    SeedFileError(String, String),
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        match value {
            // Code 2067 occurs when a UNIQUE constraint failed.
            rusqlite::Error::SqliteFailure(sql_error, Some(ref desc))
                if sql_error.extended_code == 2067
                    && (desc.ends_with("user.username") || desc.ends_with("user.email")) =>
            {
                Error::DuplicateUser
            }
            rusqlite::Error::QueryReturnedNoRows => Error::NotFound,
            error => {
                tracing::error!("an unhandled SQL error occurred: {}", error);
                Error::SqlError(error)
            }
        }
    }
}

impl From<JsonRejection> for Error {
    fn from(rejection: JsonRejection) -> Self {
        Error::InvalidRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for Error {
    fn from(rejection: QueryRejection) -> Self {
        Error::InvalidRequest(rejection.body_text())
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            Error::NotFound => (
                StatusCode::NOT_FOUND,
                "The requested resource could not be found".to_owned(),
            ),
            Error::InvalidRequest(_) | Error::MissingFields(_) | Error::InvalidAmount(_) => {
                (StatusCode::BAD_REQUEST, capitalize(&self.to_string()))
            }
            Error::DuplicateUser => (
                StatusCode::BAD_REQUEST,
                "Username or email already exists".to_owned(),
            ),
            Error::MissingOrderId => (StatusCode::BAD_REQUEST, "orderId is required".to_owned()),
            Error::NoOrderItems(_) => (
                StatusCode::NOT_FOUND,
                "No order items found for this order".to_owned(),
            ),
            Error::UpdateMissingProduct => (
                StatusCode::NOT_FOUND,
                "Could not update product, the product could not be found".to_owned(),
            ),
            Error::DeleteMissingProduct => (
                StatusCode::NOT_FOUND,
                "Could not delete product, the product could not be found. \
                It may have already been deleted"
                    .to_owned(),
            ),
            Error::ProductInUse => (
                StatusCode::CONFLICT,
                "Could not delete product, existing orders refer to it".to_owned(),
            ),
            Error::DeleteMissingUser => (
                StatusCode::NOT_FOUND,
                "Could not delete user, the user could not be found".to_owned(),
            ),
            Error::InvalidTimezoneError(timezone) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!(
                    "Could not get local timezone \"{timezone}\". Check your server settings and \
                    ensure the timezone has been set to a valid, canonical timezone string"
                ),
            ),
            // Any errors that are not handled above are not intended to be shown to the client.
            error => {
                tracing::error!("An unexpected error occurred: {}", error);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An unexpected error occurred, check the server logs for more details"
                        .to_owned(),
                )
            }
        };

        (status, Json(json!({ "message": message }))).into_response()
    }
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();

    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
