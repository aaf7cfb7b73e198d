//! Defines the endpoint for creating a new product.

use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{FromRef, State, rejection::JsonRejection},
    http::StatusCode,
    response::IntoResponse,
};
use rusqlite::{Connection, params};
use serde::{Deserialize, Serialize};
use time::{OffsetDateTime, UtcOffset};

use crate::{
    AppState, Error,
    product::{Product, ProductStatus, core::check_product_fields, get_product},
};

/// The state needed to create a product.
#[derive(Debug, Clone)]
pub struct CreateProductState {
    /// The database connection for managing products.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for CreateProductState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// The request body for creating a product.
///
/// Required fields are optional here so that a request missing them gets a
/// list of what is missing rather than a deserialization error.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct NewProduct {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub brand: String,
    pub size: Option<String>,
    pub color: Option<String>,
    pub price: Option<f64>,
    pub stock_quantity: Option<i64>,
    pub description: Option<String>,
    pub img: Option<String>,
    pub status: Option<ProductStatus>,
    #[serde(alias = "rating")]
    pub ratings: Option<f64>,
}

/// A route handler for creating a new product, responds with the created product.
pub async fn create_product_endpoint(
    State(state): State<CreateProductState>,
    payload: Result<Json<NewProduct>, JsonRejection>,
) -> Result<impl IntoResponse, Error> {
    let Json(new_product) = payload?;

    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    let product = create_product(new_product, OffsetDateTime::now_utc(), &connection)
        .inspect_err(|error| tracing::debug!("could not create product: {error}"))?;

    tracing::info!("Created product {}", product.product_id);

    Ok((StatusCode::CREATED, Json(product)))
}

/// Validate `new_product` and insert it, stamped with `now`.
///
/// # Errors
/// Returns [Error::MissingFields] naming every absent required field, or the
/// errors from [check_product_fields].
pub fn create_product(
    new_product: NewProduct,
    now: OffsetDateTime,
    connection: &Connection,
) -> Result<Product, Error> {
    let mut missing = Vec::new();

    if new_product.name.trim().is_empty() {
        missing.push("name");
    }
    if new_product.brand.trim().is_empty() {
        missing.push("brand");
    }
    if new_product.price.is_none() {
        missing.push("price");
    }
    if new_product.stock_quantity.is_none() {
        missing.push("stockQuantity");
    }
    if new_product.status.is_none() {
        missing.push("status");
    }

    let (Some(price), Some(stock_quantity), Some(status), true) = (
        new_product.price,
        new_product.stock_quantity,
        new_product.status,
        missing.is_empty(),
    ) else {
        return Err(Error::MissingFields(missing));
    };

    check_product_fields(
        &new_product.name,
        &new_product.brand,
        price,
        stock_quantity,
        new_product.ratings,
    )?;

    let now = now.to_offset(UtcOffset::UTC);

    connection.execute(
        "INSERT INTO product (name, brand, size, color, price, stock_quantity, description, \
            img, status, ratings, created_at, updated_at)
        VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?11)",
        params![
            new_product.name.trim(),
            new_product.brand.trim(),
            new_product.size,
            new_product.color,
            price,
            stock_quantity,
            new_product.description,
            new_product.img,
            status,
            new_product.ratings,
            now,
        ],
    )?;

    get_product(connection.last_insert_rowid(), connection)
}
