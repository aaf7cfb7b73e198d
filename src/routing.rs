//! Application router configuration.

use axum::{
    Router,
    response::Redirect,
    routing::{delete, get, put},
};

use crate::{
    AppState, Error,
    dashboard::get_dashboard_metrics,
    endpoints,
    expense::{
        get_expense_categories_endpoint, get_expenses_endpoint, get_grouped_expenses_endpoint,
    },
    notification::get_notifications_endpoint,
    order::{get_order_items_endpoint, get_orders_endpoint},
    product::{
        create_product_endpoint, delete_product_endpoint, edit_product_endpoint,
        get_products_endpoint,
    },
    sale::get_sales_endpoint,
    user::{create_user_endpoint, delete_user_endpoint, get_users_endpoint},
};

/// Return a router with all the app's routes.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(endpoints::ROOT, get(get_index_page))
        .route(endpoints::DASHBOARD, get(get_dashboard_metrics))
        .route(
            endpoints::PRODUCTS,
            get(get_products_endpoint).post(create_product_endpoint),
        )
        .route(
            endpoints::PRODUCT,
            put(edit_product_endpoint).delete(delete_product_endpoint),
        )
        .route(
            endpoints::USERS,
            get(get_users_endpoint).post(create_user_endpoint),
        )
        .route(endpoints::USER, delete(delete_user_endpoint))
        .route(endpoints::ORDERS, get(get_orders_endpoint))
        .route(endpoints::ORDER_ITEMS, get(get_order_items_endpoint))
        .route(endpoints::SALES, get(get_sales_endpoint))
        .route(endpoints::EXPENSES, get(get_expenses_endpoint))
        .route(endpoints::GROUPED_EXPENSES, get(get_grouped_expenses_endpoint))
        .route(
            endpoints::EXPENSE_CATEGORIES,
            get(get_expense_categories_endpoint),
        )
        .route(endpoints::NOTIFICATIONS, get(get_notifications_endpoint))
        .route(endpoints::SETTINGS, get(get_notifications_endpoint))
        .fallback(get_404_not_found)
        .with_state(state)
}

/// The root path '/' redirects to the dashboard metrics.
async fn get_index_page() -> Redirect {
    Redirect::to(endpoints::DASHBOARD)
}

async fn get_404_not_found() -> Error {
    Error::NotFound
}

#[cfg(test)]
mod root_route_tests {
    use axum::{http::StatusCode, response::IntoResponse};
    use serde_json::json;

    use crate::{
        endpoints,
        routing::get_index_page,
        test_utils::{get_test_server, get_test_state},
    };

    #[tokio::test]
    async fn root_redirects_to_dashboard() {
        let response = get_index_page().await.into_response();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);

        let location = response.headers().get("location").unwrap();
        assert_eq!(location, endpoints::DASHBOARD);
    }

    #[tokio::test]
    async fn unknown_route_is_json_not_found() {
        let server = get_test_server(get_test_state());

        let response = server.get("/coffee").await;

        response.assert_status_not_found();
        response.assert_json(&json!({ "message": "The requested resource could not be found" }));
    }
}
