//! Defines the endpoint for listing the items on an order.

use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{FromRef, Query, State, rejection::QueryRejection},
};
use rusqlite::Connection;
use serde::Deserialize;

use crate::{
    AppState, Error,
    order::{OrderId, OrderItem, get_order_items},
};

/// The state needed to list order items.
#[derive(Debug, Clone)]
pub struct OrderItemsState {
    /// The database connection for managing orders.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for OrderItemsState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct OrderItemsQuery {
    #[serde(rename = "orderId")]
    pub order_id: Option<OrderId>,
}

/// A route handler for listing the items on the order given by the `orderId`
/// query parameter.
pub async fn get_order_items_endpoint(
    State(state): State<OrderItemsState>,
    query: Result<Query<OrderItemsQuery>, QueryRejection>,
) -> Result<Json<Vec<OrderItem>>, Error> {
    let Query(query) = query?;
    let order_id = query.order_id.ok_or(Error::MissingOrderId)?;

    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    let items = get_order_items(order_id, &connection)
        .inspect_err(|error| tracing::error!("could not get items for order {order_id}: {error}"))?;

    if items.is_empty() {
        return Err(Error::NoOrderItems(order_id));
    }

    Ok(Json(items))
}
