//! Completed sales and the queries for them.

use rusqlite::{Connection, Row, params};
use serde::{Deserialize, Serialize};
use time::{OffsetDateTime, UtcOffset};

use crate::{Error, database_id::DatabaseId};

pub type SaleId = DatabaseId;

/// A completed sale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sale {
    pub sale_id: SaleId,
    #[serde(with = "time::serde::rfc3339")]
    pub sale_date: OffsetDateTime,
    pub total_amount: f64,
    pub status: String,
}

pub fn create_sale_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS sale (
                id INTEGER PRIMARY KEY,
                sale_date TEXT NOT NULL,
                total_amount REAL NOT NULL,
                status TEXT NOT NULL
                )",
        (),
    )?;

    connection.execute(
        "CREATE INDEX IF NOT EXISTS idx_sale_date ON sale(sale_date);",
        (),
    )?;

    Ok(())
}

fn map_row_to_sale(row: &Row) -> Result<Sale, rusqlite::Error> {
    Ok(Sale {
        sale_id: row.get(0)?,
        sale_date: row.get(1)?,
        total_amount: row.get(2)?,
        status: row.get(3)?,
    })
}

/// Insert `sale` keeping its ID.
///
/// # Errors
/// Returns [Error::InvalidAmount] if the total is negative or not finite.
pub fn insert_sale(sale: &Sale, connection: &Connection) -> Result<(), Error> {
    if !sale.total_amount.is_finite() || sale.total_amount < 0.0 {
        return Err(Error::InvalidAmount(sale.total_amount));
    }

    connection.execute(
        "INSERT INTO sale (id, sale_date, total_amount, status) VALUES (?1, ?2, ?3, ?4)",
        params![
            sale.sale_id,
            sale.sale_date.to_offset(UtcOffset::UTC),
            sale.total_amount,
            sale.status,
        ],
    )?;

    Ok(())
}

/// Get every sale, the most recent first.
pub fn get_sales(connection: &Connection) -> Result<Vec<Sale>, Error> {
    connection
        .prepare(
            "SELECT id, sale_date, total_amount, status FROM sale
            ORDER BY sale_date DESC, id DESC",
        )?
        .query_map([], map_row_to_sale)?
        .map(|maybe_sale| maybe_sale.map_err(|error| error.into()))
        .collect()
}

#[cfg(test)]
mod tests {
    use time::macros::datetime;

    use crate::{
        Error,
        sale::{Sale, get_sales, insert_sale},
        test_utils::{get_test_connection, sample_sale},
    };

    #[test]
    fn sales_are_newest_first() {
        let connection = get_test_connection();
        let january = sample_sale(1, datetime!(2025-01-15 12:00 UTC), 100.0);
        let march = sample_sale(2, datetime!(2025-03-15 12:00 UTC), 50.0);
        let february = sample_sale(3, datetime!(2025-02-15 12:00 UTC), 75.0);
        for sale in [&january, &march, &february] {
            insert_sale(sale, &connection).unwrap();
        }

        let got = get_sales(&connection).unwrap();

        assert_eq!(got, vec![march, february, january]);
    }

    #[test]
    fn rejects_nan_total() {
        let connection = get_test_connection();
        let sale = Sale {
            total_amount: f64::NAN,
            ..sample_sale(1, datetime!(2025-01-15 12:00 UTC), 0.0)
        };

        let got = insert_sale(&sale, &connection);

        assert!(matches!(got, Err(Error::InvalidAmount(amount)) if amount.is_nan()));
    }
}
