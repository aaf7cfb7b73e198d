//! Defines the endpoint for listing products.

use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{FromRef, Query, State, rejection::QueryRejection},
};
use rusqlite::Connection;
use serde::Deserialize;

use crate::{
    AppState, Error,
    pagination::{PageBounds, PaginationConfig, page_bounds},
    product::{Product, core::query_products},
};

/// The state needed to list products.
#[derive(Debug, Clone)]
pub struct ProductsState {
    /// The database connection for managing products.
    pub db_connection: Arc<Mutex<Connection>>,
    /// The config that controls how to page through products.
    pub pagination_config: PaginationConfig,
}

impl FromRef<AppState> for ProductsState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
            pagination_config: state.pagination_config.clone(),
        }
    }
}

/// The query string for listing products.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductsQuery {
    /// Only list products whose name or brand contains this text.
    pub search: Option<String>,
    pub page: Option<u64>,
    pub per_page: Option<u64>,
}

/// A route handler for listing products, responds with a JSON array.
///
/// Without `page` or `perPage` every matching product is returned.
pub async fn get_products_endpoint(
    State(state): State<ProductsState>,
    query: Result<Query<ProductsQuery>, QueryRejection>,
) -> Result<Json<Vec<Product>>, Error> {
    let Query(query) = query?;
    let bounds = page_bounds(query.page, query.per_page, &state.pagination_config)?
        .unwrap_or(PageBounds::UNBOUNDED);

    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    let products = query_products(query.search.as_deref(), bounds, &connection)
        .inspect_err(|error| tracing::error!("could not get products: {error}"))?;

    Ok(Json(products))
}

#[cfg(test)]
mod tests {
    use crate::{
        endpoints,
        product::{Product, insert_product},
        test_utils::{get_test_server, get_test_state, sample_product},
    };

    #[tokio::test]
    async fn lists_all_products() {
        let state = get_test_state();
        {
            let connection = state.db_connection.lock().unwrap();
            insert_product(&sample_product(1, "Linen Shirt", 12), &connection).unwrap();
            insert_product(&sample_product(2, "Hiking Boots", 3), &connection).unwrap();
        }
        let server = get_test_server(state);

        let response = server.get(endpoints::PRODUCTS).await;

        response.assert_status_ok();
        let products: Vec<Product> = response.json();
        assert_eq!(products.len(), 2);
        assert_eq!(products[0].name, "Linen Shirt");
        assert_eq!(products[1].name, "Hiking Boots");
    }

    #[tokio::test]
    async fn empty_inventory_is_empty_array() {
        let server = get_test_server(get_test_state());

        let response = server.get(endpoints::PRODUCTS).await;

        response.assert_status_ok();
        response.assert_json(&serde_json::json!([]));
    }

    #[tokio::test]
    async fn filters_and_pages() {
        let state = get_test_state();
        {
            let connection = state.db_connection.lock().unwrap();
            for id in 1..=4 {
                insert_product(&sample_product(id, "Shirt", 1), &connection).unwrap();
            }
            insert_product(&sample_product(5, "Boots", 1), &connection).unwrap();
        }
        let server = get_test_server(state);

        let response = server
            .get(endpoints::PRODUCTS)
            .add_query_param("search", "shirt")
            .add_query_param("page", 2)
            .add_query_param("perPage", 3)
            .await;

        response.assert_status_ok();
        let products: Vec<Product> = response.json();
        let ids: Vec<_> = products.iter().map(|product| product.product_id).collect();
        assert_eq!(ids, vec![4]);
    }

    #[tokio::test]
    async fn rejects_invalid_page() {
        let server = get_test_server(get_test_state());

        let response = server
            .get(endpoints::PRODUCTS)
            .add_query_param("page", "first")
            .await;

        response.assert_status_bad_request();
    }

    #[tokio::test]
    async fn serializes_camel_case_fields() {
        let state = get_test_state();
        insert_product(
            &sample_product(1, "Linen Shirt", 12),
            &state.db_connection.lock().unwrap(),
        )
        .unwrap();
        let server = get_test_server(state);

        let response = server.get(endpoints::PRODUCTS).await;

        let json: serde_json::Value = response.json();
        assert_eq!(json[0]["productId"], 1);
        assert_eq!(json[0]["stockQuantity"], 12);
        assert_eq!(json[0]["createdAt"], "2025-01-01T09:00:00Z");
    }
}
