//! Expense records and the queries for them.

use rusqlite::{Connection, Row, params};
use serde::{Deserialize, Serialize};
use time::{OffsetDateTime, UtcOffset};

use crate::{Error, database_id::DatabaseId, user::UserId};

pub type ExpenseId = DatabaseId;

/// One logged expense.
///
/// `category` holds an expense category code such as "01001". Codes are not
/// checked against the category table, so unknown codes are kept as is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Expense {
    pub expense_id: ExpenseId,
    pub category: String,
    pub amount: f64,
    #[serde(with = "time::serde::rfc3339")]
    pub timestamp: OffsetDateTime,
    pub description: Option<String>,
    /// The user who logged the expense.
    pub user_id: Option<UserId>,
}

/// Create the expense table.
///
/// # Errors
///
/// This function will return an error if the SQL query failed.
pub fn create_expense_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS expense (
                id INTEGER PRIMARY KEY,
                category TEXT NOT NULL,
                amount REAL NOT NULL CHECK (amount >= 0),
                timestamp TEXT NOT NULL,
                description TEXT,
                user_id INTEGER
                )",
        (),
    )?;

    connection.execute(
        "CREATE INDEX IF NOT EXISTS idx_expense_timestamp ON expense(timestamp);",
        (),
    )?;

    Ok(())
}

fn map_row_to_expense(row: &Row) -> Result<Expense, rusqlite::Error> {
    Ok(Expense {
        expense_id: row.get(0)?,
        category: row.get(1)?,
        amount: row.get(2)?,
        timestamp: row.get(3)?,
        description: row.get(4)?,
        user_id: row.get(5)?,
    })
}

/// Insert `expense` keeping its ID.
///
/// # Errors
/// Returns [Error::InvalidAmount] if the amount is negative, NaN or infinite.
pub fn insert_expense(expense: &Expense, connection: &Connection) -> Result<(), Error> {
    if !expense.amount.is_finite() || expense.amount < 0.0 {
        return Err(Error::InvalidAmount(expense.amount));
    }

    connection.execute(
        "INSERT INTO expense (id, category, amount, timestamp, description, user_id)
        VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            expense.expense_id,
            expense.category,
            expense.amount,
            expense.timestamp.to_offset(UtcOffset::UTC),
            expense.description,
            expense.user_id,
        ],
    )?;

    Ok(())
}

/// Get every expense ordered by ID.
pub fn get_all_expenses(connection: &Connection) -> Result<Vec<Expense>, Error> {
    connection
        .prepare(
            "SELECT id, category, amount, timestamp, description, user_id FROM expense
            ORDER BY id ASC",
        )?
        .query_map([], map_row_to_expense)?
        .map(|maybe_expense| maybe_expense.map_err(|error| error.into()))
        .collect()
}

/// Get every expense, the most recent first.
pub fn get_recent_expenses(connection: &Connection) -> Result<Vec<Expense>, Error> {
    connection
        .prepare(
            "SELECT id, category, amount, timestamp, description, user_id FROM expense
            ORDER BY timestamp DESC, id DESC",
        )?
        .query_map([], map_row_to_expense)?
        .map(|maybe_expense| maybe_expense.map_err(|error| error.into()))
        .collect()
}

/// The sum of every expense amount, zero when there are none.
pub fn get_total_spending(connection: &Connection) -> Result<f64, Error> {
    connection
        .query_row("SELECT COALESCE(SUM(amount), 0.0) FROM expense", [], |row| {
            row.get(0)
        })
        .map_err(|error| error.into())
}

#[cfg(test)]
mod tests {
    use time::macros::datetime;

    use crate::{
        Error,
        expense::core::{
            get_all_expenses, get_recent_expenses, get_total_spending, insert_expense,
        },
        test_utils::{get_test_connection, sample_expense},
    };

    #[test]
    fn inserted_expense_can_be_retrieved() {
        let connection = get_test_connection();
        let want = sample_expense(1, "01001", 10.0, datetime!(2025-03-05 09:30 UTC));

        insert_expense(&want, &connection).unwrap();

        assert_eq!(get_all_expenses(&connection), Ok(vec![want]));
    }

    #[test]
    fn unknown_category_is_stored() {
        let connection = get_test_connection();
        let want = sample_expense(1, "99999", 1.0, datetime!(2025-03-05 09:30 UTC));

        insert_expense(&want, &connection).unwrap();

        assert_eq!(get_all_expenses(&connection).unwrap()[0].category, "99999");
    }

    #[test]
    fn rejects_negative_amount() {
        let connection = get_test_connection();
        let expense = sample_expense(1, "01001", -5.0, datetime!(2025-03-05 09:30 UTC));

        let got = insert_expense(&expense, &connection);

        assert_eq!(got, Err(Error::InvalidAmount(-5.0)));
        assert_eq!(get_all_expenses(&connection), Ok(vec![]));
    }

    #[test]
    fn rejects_infinite_amount() {
        let connection = get_test_connection();
        let expense = sample_expense(1, "01001", f64::INFINITY, datetime!(2025-03-05 09:30 UTC));

        let got = insert_expense(&expense, &connection);

        assert_eq!(got, Err(Error::InvalidAmount(f64::INFINITY)));
    }

    #[test]
    fn rejects_nan_amount() {
        let connection = get_test_connection();
        let expense = sample_expense(1, "01001", f64::NAN, datetime!(2025-03-05 09:30 UTC));

        let got = insert_expense(&expense, &connection);

        assert!(matches!(got, Err(Error::InvalidAmount(amount)) if amount.is_nan()));
        assert_eq!(get_all_expenses(&connection), Ok(vec![]));
    }

    #[test]
    fn table_checks_amount() {
        let connection = get_test_connection();

        let got = connection.execute(
            "INSERT INTO expense (category, amount, timestamp) VALUES ('01001', -1, '2025-03-05')",
            (),
        );

        assert!(got.is_err());
    }

    #[test]
    fn recent_expenses_are_newest_first() {
        let connection = get_test_connection();
        let march = sample_expense(1, "01001", 10.0, datetime!(2025-03-05 09:30 UTC));
        let april = sample_expense(2, "01002", 5.0, datetime!(2025-04-01 09:30 UTC));
        insert_expense(&march, &connection).unwrap();
        insert_expense(&april, &connection).unwrap();

        assert_eq!(get_recent_expenses(&connection), Ok(vec![april, march]));
    }

    #[test]
    fn total_spending_sums_amounts() {
        let connection = get_test_connection();
        assert_eq!(get_total_spending(&connection), Ok(0.0));

        insert_expense(
            &sample_expense(1, "01001", 10.5, datetime!(2025-03-05 09:30 UTC)),
            &connection,
        )
        .unwrap();
        insert_expense(
            &sample_expense(2, "01002", 4.5, datetime!(2025-04-01 09:30 UTC)),
            &connection,
        )
        .unwrap();

        assert_eq!(get_total_spending(&connection), Ok(15.0));
    }
}
