//! The dashboard metrics handler.
//!
//! Gathers everything the dashboard front page shows in one response so the
//! client does not need a request per card.

use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{FromRef, State},
};
use rusqlite::Connection;
use serde::Serialize;

use crate::{
    AppState, Error,
    expense::{
        Expense, ExpenseCategory, get_expense_categories, get_recent_expenses, get_total_spending,
    },
    order::{Order, get_recent_orders},
    product::{Product, get_trending_products},
    sale::{Sale, get_sales},
};

/// The number of products listed as trending.
const TRENDING_PRODUCT_COUNT: i64 = 10;

/// The state needed for the dashboard metrics.
#[derive(Debug, Clone)]
pub struct DashboardState {
    /// The database connection for reading every table the dashboard summarises.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for DashboardState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// The data behind the dashboard front page.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardMetrics {
    /// Every sale, newest first.
    pub sales_summary: Vec<Sale>,
    /// Every expense, newest first.
    pub expenses: Vec<Expense>,
    /// Every order, most recent order date first.
    pub orders: Vec<Order>,
    /// The products with the most stock on hand.
    pub trending_products: Vec<Product>,
    /// The sum of every expense amount.
    pub total_spending: f64,
    /// The categories the expense codes refer to, so the client can label them.
    pub expense_categories: Vec<ExpenseCategory>,
}

/// A route handler that responds with the [DashboardMetrics].
pub async fn get_dashboard_metrics(
    State(state): State<DashboardState>,
) -> Result<Json<DashboardMetrics>, Error> {
    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    let metrics = load_metrics(&connection)
        .inspect_err(|error| tracing::error!("could not load dashboard metrics: {error}"))?;

    Ok(Json(metrics))
}

fn load_metrics(connection: &Connection) -> Result<DashboardMetrics, Error> {
    Ok(DashboardMetrics {
        sales_summary: get_sales(connection)?,
        expenses: get_recent_expenses(connection)?,
        orders: get_recent_orders(connection)?,
        trending_products: get_trending_products(TRENDING_PRODUCT_COUNT, connection)?,
        total_spending: get_total_spending(connection)?,
        expense_categories: get_expense_categories(connection)?,
    })
}
