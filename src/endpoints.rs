//! The API endpoint URIs.
//!
//! For endpoints that take a parameter, e.g., '/users/{user_id}', use [format_endpoint].

/// The root route which redirects to the dashboard metrics.
pub const ROOT: &str = "/";
/// The summary behind the dashboard front page.
pub const DASHBOARD: &str = "/dashboard";
/// The route to list and create products.
pub const PRODUCTS: &str = "/products";
/// The route to update or delete a single product.
pub const PRODUCT: &str = "/products/{product_id}";
/// The route to list and create users.
pub const USERS: &str = "/users";
/// The route to delete a single user.
pub const USER: &str = "/users/{user_id}";
/// The route to list orders.
pub const ORDERS: &str = "/orders";
/// The route to list the items on an order, selected with the `orderId` query parameter.
pub const ORDER_ITEMS: &str = "/orders/order-items";
/// The route to list sales.
pub const SALES: &str = "/sales";
/// The route to list expenses.
pub const EXPENSES: &str = "/expenses";
/// The route for expense totals by category and month.
pub const GROUPED_EXPENSES: &str = "/expenses/grouped";
/// The route to list the expense categories.
pub const EXPENSE_CATEGORIES: &str = "/expense-categories";
/// The route to list notifications.
pub const NOTIFICATIONS: &str = "/notifications";
/// The settings page lists notifications too.
pub const SETTINGS: &str = "/settings";

/// Replace the parameter in `endpoint_path` with `id`.
///
/// A parameter is a string that starts with a left brace, followed by
/// lowercase letters or underscores, and ends with a right brace.
/// For example, in the endpoint path '/users/{user_id}', '{user_id}' is the parameter.
///
/// This function assumes that an endpoint path contains a single parameter.
///
/// If no parameter is found in `endpoint_path`, the function returns the
/// the original `endpoint_path`.
pub fn format_endpoint(endpoint_path: &str, id: i64) -> String {
    let Some(param_start) = endpoint_path.find('{') else {
        return endpoint_path.to_owned();
    };

    let param_end = endpoint_path[param_start..]
        .find('}')
        .map(|offset| param_start + offset + 1)
        .unwrap_or(endpoint_path.len());

    format!(
        "{}{}{}",
        &endpoint_path[..param_start],
        id,
        &endpoint_path[param_end..]
    )
}

// These tests are here so that we know when we call `Uri::from_shared` it will not panic.
#[cfg(test)]
mod endpoints_tests {
    use axum::http::Uri;

    use crate::endpoints;

    use super::format_endpoint;

    fn assert_endpoint_is_valid_uri(uri: &str) {
        assert!(uri.parse::<Uri>().is_ok());
    }

    #[test]
    fn endpoints_are_valid_uris() {
        assert_endpoint_is_valid_uri(endpoints::ROOT);
        assert_endpoint_is_valid_uri(endpoints::DASHBOARD);
        assert_endpoint_is_valid_uri(endpoints::PRODUCTS);
        assert_endpoint_is_valid_uri(&format_endpoint(endpoints::PRODUCT, 1));
        assert_endpoint_is_valid_uri(endpoints::USERS);
        assert_endpoint_is_valid_uri(&format_endpoint(endpoints::USER, 1));
        assert_endpoint_is_valid_uri(endpoints::ORDERS);
        assert_endpoint_is_valid_uri(endpoints::ORDER_ITEMS);
        assert_endpoint_is_valid_uri(endpoints::SALES);
        assert_endpoint_is_valid_uri(endpoints::EXPENSES);
        assert_endpoint_is_valid_uri(endpoints::GROUPED_EXPENSES);
        assert_endpoint_is_valid_uri(endpoints::EXPENSE_CATEGORIES);
        assert_endpoint_is_valid_uri(endpoints::NOTIFICATIONS);
        assert_endpoint_is_valid_uri(endpoints::SETTINGS);
    }

    #[test]
    fn produces_valid_uri() {
        let formatted_path = format_endpoint("/hello/{world_id}", 1);

        assert_eq!(formatted_path, "/hello/1");
        assert!(formatted_path.parse::<Uri>().is_ok());
    }

    #[test]
    fn returns_original_path_with_no_parameter() {
        let formatted_path = format_endpoint("/hello/world", 1);

        assert_eq!(formatted_path, "/hello/world");
    }

    #[test]
    fn parameter_in_middle() {
        let formatted_path = format_endpoint("/products/{product_id}/stock", 42);

        assert_eq!(formatted_path, "/products/42/stock");
    }
}
