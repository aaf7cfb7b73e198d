//! Defines the endpoint that reports expense totals by category and month.

use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{FromRef, State},
};
use rusqlite::Connection;

use crate::{
    AppState, Error,
    expense::{
        Expense,
        aggregation::{ExpenseSummary, aggregate},
        core::get_all_expenses,
    },
    timezone::{get_timezone, to_local_time},
};

/// The state needed to group expenses.
#[derive(Debug, Clone)]
pub struct GroupedExpensesState {
    pub db_connection: Arc<Mutex<Connection>>,
    /// The timezone whose calendar decides which month an expense falls in.
    pub local_timezone: String,
}

impl FromRef<AppState> for GroupedExpensesState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
            local_timezone: state.local_timezone.clone(),
        }
    }
}

/// A route handler that responds with `{ "categories": {...}, "months": {...} }`.
///
/// Months follow the server's local calendar.
pub async fn get_grouped_expenses_endpoint(
    State(state): State<GroupedExpensesState>,
) -> Result<Json<ExpenseSummary>, Error> {
    let timezone = get_timezone(&state.local_timezone)
        .ok_or_else(|| Error::InvalidTimezoneError(state.local_timezone.clone()))?;

    let expenses = {
        let connection = state
            .db_connection
            .lock()
            .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
            .map_err(|_| Error::DatabaseLockError)?;

        get_all_expenses(&connection)
            .inspect_err(|error| tracing::error!("could not get expenses: {error}"))?
    };

    let local_expenses: Vec<Expense> = expenses
        .into_iter()
        .map(|expense| Expense {
            timestamp: to_local_time(expense.timestamp, timezone),
            ..expense
        })
        .collect();

    Ok(Json(aggregate(&local_expenses)))
}
