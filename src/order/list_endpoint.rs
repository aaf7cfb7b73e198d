//! Defines the endpoint for listing orders.

use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{FromRef, Query, State, rejection::QueryRejection},
};
use rusqlite::Connection;
use serde::Deserialize;

use crate::{
    AppState, Error,
    order::{Order, core::get_orders},
    pagination::{PageBounds, PaginationConfig, page_bounds},
};

/// The state needed to list orders.
#[derive(Debug, Clone)]
pub struct OrdersState {
    /// The database connection for managing orders.
    pub db_connection: Arc<Mutex<Connection>>,
    /// The config that controls how to page through orders.
    pub pagination_config: PaginationConfig,
}

impl FromRef<AppState> for OrdersState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
            pagination_config: state.pagination_config.clone(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrdersQuery {
    pub page: Option<u64>,
    pub per_page: Option<u64>,
}

/// A route handler for listing orders, responds with a JSON array.
pub async fn get_orders_endpoint(
    State(state): State<OrdersState>,
    query: Result<Query<OrdersQuery>, QueryRejection>,
) -> Result<Json<Vec<Order>>, Error> {
    let Query(query) = query?;
    let bounds = page_bounds(query.page, query.per_page, &state.pagination_config)?
        .unwrap_or(PageBounds::UNBOUNDED);

    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    let orders = get_orders(bounds, &connection)
        .inspect_err(|error| tracing::error!("could not get orders: {error}"))?;

    Ok(Json(orders))
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use crate::{
        endpoints,
        order::{Order, insert_order},
        test_utils::{get_test_server, get_test_state, sample_order},
    };

    #[tokio::test]
    async fn lists_all_orders() {
        let state = get_test_state();
        {
            let connection = state.db_connection.lock().unwrap();
            insert_order(&sample_order(1, 10.0), &connection).unwrap();
            insert_order(&sample_order(2, 20.0), &connection).unwrap();
        }
        let server = get_test_server(state);

        let response = server.get(endpoints::ORDERS).await;

        response.assert_status_ok();
        let orders: Vec<Order> = response.json();
        assert_eq!(orders, vec![sample_order(1, 10.0), sample_order(2, 20.0)]);
    }

    #[tokio::test]
    async fn pages_orders() {
        let state = get_test_state();
        {
            let connection = state.db_connection.lock().unwrap();
            for id in 1..=3 {
                insert_order(&sample_order(id, 1.0), &connection).unwrap();
            }
        }
        let server = get_test_server(state);

        let response = server
            .get(endpoints::ORDERS)
            .add_query_param("page", 2)
            .add_query_param("perPage", 2)
            .await;

        response.assert_status_ok();
        let orders: Vec<Order> = response.json();
        assert_eq!(orders, vec![sample_order(3, 1.0)]);
    }

    #[tokio::test]
    async fn rejects_page_zero() {
        let server = get_test_server(get_test_state());

        let response = server
            .get(endpoints::ORDERS)
            .add_query_param("page", 0)
            .await;

        response.assert_status_bad_request();
    }

    #[tokio::test]
    async fn rejects_page_past_last_offset() {
        let server = get_test_server(get_test_state());

        let response = server
            .get(endpoints::ORDERS)
            .add_query_param("page", u64::MAX)
            .add_query_param("perPage", 100)
            .await;

        response.assert_status_bad_request();
        response.assert_json(&json!({ "message": "Invalid request: page is too large" }));
    }
}
