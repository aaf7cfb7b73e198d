//! Defines the endpoint for deleting a product.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, Path, State},
    http::StatusCode,
};
use rusqlite::Connection;

use crate::{AppState, Error, product::ProductId};

/// The state needed to delete a product.
#[derive(Debug, Clone)]
pub struct DeleteProductState {
    /// The database connection for managing products.
    db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for DeleteProductState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// A route handler for deleting a product, responds with 204 No Content.
pub async fn delete_product_endpoint(
    State(state): State<DeleteProductState>,
    Path(product_id): Path<ProductId>,
) -> Result<StatusCode, Error> {
    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    delete_product(product_id, &connection)
        .inspect_err(|error| tracing::debug!("could not delete product {product_id}: {error}"))?;

    tracing::info!("Deleted product {product_id}");

    Ok(StatusCode::NO_CONTENT)
}

/// Delete a product by ID.
///
/// # Errors
/// Returns [Error::DeleteMissingProduct] if the product does not exist and
/// [Error::ProductInUse] if order items still refer to it.
pub fn delete_product(product_id: ProductId, connection: &Connection) -> Result<(), Error> {
    let rows_affected = connection
        .execute("DELETE FROM product WHERE id = ?1", [product_id])
        .map_err(|error| match error {
            // Code 787 occurs when a FOREIGN KEY constraint failed.
            rusqlite::Error::SqliteFailure(error, _) if error.extended_code == 787 => {
                Error::ProductInUse
            }
            error => error.into(),
        })?;

    if rows_affected == 0 {
        return Err(Error::DeleteMissingProduct);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;

    use crate::{
        Error, endpoints,
        endpoints::format_endpoint,
        order::{insert_order, insert_order_item},
        product::{delete_endpoint::delete_product, get_product, insert_product},
        test_utils::{
            get_test_connection, get_test_server, get_test_state, sample_order,
            sample_order_item, sample_product,
        },
    };

    #[test]
    fn deletes_product() {
        let connection = get_test_connection();
        insert_product(&sample_product(1, "Linen Shirt", 12), &connection).unwrap();

        delete_product(1, &connection).unwrap();

        assert_eq!(get_product(1, &connection), Err(Error::NotFound));
    }

    #[test]
    fn missing_product_cannot_be_deleted() {
        let connection = get_test_connection();

        assert_eq!(
            delete_product(1, &connection),
            Err(Error::DeleteMissingProduct)
        );
    }

    #[test]
    fn ordered_product_cannot_be_deleted() {
        let connection = get_test_connection();
        insert_product(&sample_product(1, "Linen Shirt", 12), &connection).unwrap();
        insert_order(&sample_order(1, 39.98), &connection).unwrap();
        insert_order_item(&sample_order_item(1, 1, 1, 2, 19.99), &connection).unwrap();

        assert_eq!(delete_product(1, &connection), Err(Error::ProductInUse));
        assert!(get_product(1, &connection).is_ok());
    }

    #[tokio::test]
    async fn endpoint_responds_no_content() {
        let state = get_test_state();
        insert_product(
            &sample_product(1, "Linen Shirt", 12),
            &state.db_connection.lock().unwrap(),
        )
        .unwrap();
        let server = get_test_server(state);

        let response = server.delete(&format_endpoint(endpoints::PRODUCT, 1)).await;

        response.assert_status(StatusCode::NO_CONTENT);
    }

    #[tokio::test]
    async fn endpoint_responds_not_found_for_missing_product() {
        let server = get_test_server(get_test_state());

        let response = server.delete(&format_endpoint(endpoints::PRODUCT, 1)).await;

        response.assert_status_not_found();
    }
}
