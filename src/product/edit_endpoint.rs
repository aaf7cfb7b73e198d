//! Defines the endpoint for updating a product.

use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{FromRef, Path, State, rejection::JsonRejection},
};
use rusqlite::{Connection, params};
use serde::{Deserialize, Serialize};
use time::{OffsetDateTime, UtcOffset};

use crate::{
    AppState, Error,
    product::{Product, ProductId, ProductStatus, core::check_product_fields, get_product},
};

/// The state needed to update a product.
#[derive(Debug, Clone)]
pub struct EditProductState {
    /// The database connection for managing products.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for EditProductState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// The request body for updating a product.
///
/// Only the fields that are present are changed.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ProductUpdate {
    pub name: Option<String>,
    pub brand: Option<String>,
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

impl ProductUpdate {
    fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.brand.is_none()
            && self.size.is_none()
            && self.color.is_none()
            && self.price.is_none()
            && self.stock_quantity.is_none()
            && self.description.is_none()
            && self.img.is_none()
            && self.status.is_none()
            && self.ratings.is_none()
    }

    fn apply(self, mut product: Product) -> Product {
        if let Some(name) = self.name {
            product.name = name.trim().to_owned();
        }
        if let Some(brand) = self.brand {
            product.brand = brand.trim().to_owned();
        }
        if self.size.is_some() {
            product.size = self.size;
        }
        if self.color.is_some() {
            product.color = self.color;
        }
        if let Some(price) = self.price {
            product.price = price;
        }
        if let Some(stock_quantity) = self.stock_quantity {
            product.stock_quantity = stock_quantity;
        }
        if self.description.is_some() {
            product.description = self.description;
        }
        if self.img.is_some() {
            product.img = self.img;
        }
        if let Some(status) = self.status {
            product.status = status;
        }
        if self.ratings.is_some() {
            product.ratings = self.ratings;
        }

        product
    }
}

/// A route handler for updating a product, responds with the updated product.
pub async fn edit_product_endpoint(
    State(state): State<EditProductState>,
    Path(product_id): Path<ProductId>,
    payload: Result<Json<ProductUpdate>, JsonRejection>,
) -> Result<Json<Product>, Error> {
    let Json(update) = payload?;

    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    let product = update_product(product_id, update, OffsetDateTime::now_utc(), &connection)
        .inspect_err(|error| tracing::debug!("could not update product {product_id}: {error}"))?;

    tracing::info!("Updated product {product_id}");

    Ok(Json(product))
}

/// Apply `update` to the product with `product_id` and set its update time to `now`.
///
/// # Errors
/// Returns:
/// - [Error::InvalidRequest] if `update` has no fields,
/// - [Error::UpdateMissingProduct] if the product does not exist,
/// - the errors from [check_product_fields] if the updated product is invalid.
pub fn update_product(
    product_id: ProductId,
    update: ProductUpdate,
    now: OffsetDateTime,
    connection: &Connection,
) -> Result<Product, Error> {
    if update.is_empty() {
        return Err(Error::InvalidRequest(
            "the update did not contain any fields".to_owned(),
        ));
    }

    let product = match get_product(product_id, connection) {
        Ok(product) => product,
        Err(Error::NotFound) => return Err(Error::UpdateMissingProduct),
        Err(error) => return Err(error),
    };

    let mut product = update.apply(product);
    product.updated_at = now.to_offset(UtcOffset::UTC);

    check_product_fields(
        &product.name,
        &product.brand,
        product.price,
        product.stock_quantity,
        product.ratings,
    )?;

    let rows_affected = connection.execute(
        "UPDATE product SET name = ?1, brand = ?2, size = ?3, color = ?4, price = ?5, \
            stock_quantity = ?6, description = ?7, img = ?8, status = ?9, ratings = ?10, \
            updated_at = ?11
        WHERE id = ?12",
        params![
            product.name,
            product.brand,
            product.size,
            product.color,
            product.price,
            product.stock_quantity,
            product.description,
            product.img,
            product.status,
            product.ratings,
            product.updated_at,
            product_id,
        ],
    )?;

    if rows_affected == 0 {
        return Err(Error::UpdateMissingProduct);
    }

    Ok(product)
}
