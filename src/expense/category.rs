//! The built-in expense categories and the endpoint that lists them.

use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{FromRef, State},
};
use rusqlite::{Connection, Row};
use serde::{Deserialize, Serialize};

use crate::{AppState, Error};

/// A kind of expense, identified by a five digit code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseCategory {
    pub code: String,
    pub category_name: String,
    pub description: String,
}

/// The categories every database starts with, as `(code, name, description)`.
const DEFAULT_CATEGORIES: [(&str, &str, &str); 7] = [
    (
        "01001",
        "Website & Platform Costs",
        "Hosting, domains, e-commerce platform fees and plugins",
    ),
    (
        "01002",
        "Product Costs",
        "Inventory purchases, manufacturing and packaging",
    ),
    (
        "01003",
        "Marketing & Advertising",
        "Paid ads, promotions and campaigns",
    ),
    (
        "01004",
        "Customer Support",
        "Help desk tools and support staff",
    ),
    (
        "01005",
        "Payment Processing Fees",
        "Card, gateway and payout fees",
    ),
    (
        "01006",
        "Social Media Management",
        "Scheduling tools, content creation and influencers",
    ),
    ("01007", "Miscellaneous", "Anything that fits nowhere else"),
];

pub fn create_expense_category_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS expense_category (
                code TEXT PRIMARY KEY,
                category_name TEXT NOT NULL,
                description TEXT NOT NULL
                )",
        (),
    )?;

    Ok(())
}

/// Add the built-in categories, leaving any that already exist untouched.
pub fn insert_default_categories(connection: &Connection) -> Result<(), rusqlite::Error> {
    let mut statement = connection.prepare(
        "INSERT OR IGNORE INTO expense_category (code, category_name, description)
        VALUES (?1, ?2, ?3)",
    )?;

    for category in DEFAULT_CATEGORIES {
        statement.execute(category)?;
    }

    Ok(())
}

fn map_row_to_category(row: &Row) -> Result<ExpenseCategory, rusqlite::Error> {
    Ok(ExpenseCategory {
        code: row.get(0)?,
        category_name: row.get(1)?,
        description: row.get(2)?,
    })
}

/// Get every expense category ordered by code.
pub fn get_expense_categories(connection: &Connection) -> Result<Vec<ExpenseCategory>, Error> {
    connection
        .prepare("SELECT code, category_name, description FROM expense_category ORDER BY code")?
        .query_map([], map_row_to_category)?
        .map(|maybe_category| maybe_category.map_err(|error| error.into()))
        .collect()
}

/// The state needed to list expense categories.
#[derive(Debug, Clone)]
pub struct ExpenseCategoriesState {
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for ExpenseCategoriesState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// A route handler for listing the expense categories.
pub async fn get_expense_categories_endpoint(
    State(state): State<ExpenseCategoriesState>,
) -> Result<Json<Vec<ExpenseCategory>>, Error> {
    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    let categories = get_expense_categories(&connection)
        .inspect_err(|error| tracing::error!("could not get expense categories: {error}"))?;

    Ok(Json(categories))
}

#[cfg(test)]
mod tests {
    use crate::{
        endpoints,
        expense::{ExpenseCategory, get_expense_categories, insert_default_categories},
        test_utils::{get_test_connection, get_test_server, get_test_state},
    };

    #[test]
    fn defaults_are_not_duplicated() {
        let connection = get_test_connection();

        insert_default_categories(&connection).unwrap();

        let got = get_expense_categories(&connection).unwrap();
        assert_eq!(got.len(), 7);
        assert_eq!(got[0].code, "01001");
        assert_eq!(got[6].category_name, "Miscellaneous");
    }

    #[tokio::test]
    async fn lists_categories() {
        let server = get_test_server(get_test_state());

        let response = server.get(endpoints::EXPENSE_CATEGORIES).await;

        response.assert_status_ok();
        let categories: Vec<ExpenseCategory> = response.json();
        let codes: Vec<_> = categories.iter().map(|c| c.code.as_str()).collect();
        assert_eq!(
            codes,
            ["01001", "01002", "01003", "01004", "01005", "01006", "01007"]
        );
    }
}
