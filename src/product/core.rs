use rusqlite::{
    Connection, Row, ToSql, params,
    types::{FromSql, FromSqlError, FromSqlResult, ToSqlOutput, ValueRef},
};
use serde::{Deserialize, Serialize};
use time::{OffsetDateTime, UtcOffset};

use crate::{Error, database_id::DatabaseId, pagination::PageBounds};

pub type ProductId = DatabaseId;

/// The column list shared by every product query, in [map_row_to_product] order.
const PRODUCT_COLUMNS: &str = "id, name, brand, size, color, price, stock_quantity, \
    description, img, status, ratings, created_at, updated_at";

/// Whether a product can currently be ordered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProductStatus {
    /// In stock.
    Available,
    /// Listed but cannot be ordered right now.
    #[serde(rename = "Out of Stock")]
    OutOfStock,
}

impl ProductStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProductStatus::Available => "Available",
            ProductStatus::OutOfStock => "Out of Stock",
        }
    }
}

impl ToSql for ProductStatus {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(self.as_str().into())
    }
}

impl FromSql for ProductStatus {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        match value.as_str()? {
            "Available" => Ok(ProductStatus::Available),
            "Out of Stock" => Ok(ProductStatus::OutOfStock),
            _ => Err(FromSqlError::InvalidType),
        }
    }
}

/// An item stocked in the inventory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub product_id: ProductId,
    pub name: String,
    pub brand: String,
    pub size: Option<String>,
    pub color: Option<String>,
    /// The unit price in dollars.
    pub price: f64,
    pub stock_quantity: i64,
    pub description: Option<String>,
    /// A URL for the product image.
    pub img: Option<String>,
    pub status: ProductStatus,
    /// The average customer rating out of [MAX_RATING].
    pub ratings: Option<f64>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

/// The highest rating a product can have.
pub const MAX_RATING: f64 = 5.0;

pub fn create_product_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute_batch(
        "CREATE TABLE IF NOT EXISTS product (
            id INTEGER PRIMARY KEY,
            name TEXT NOT NULL,
            brand TEXT NOT NULL,
            size TEXT,
            color TEXT,
            price REAL NOT NULL CHECK (price >= 0),
            stock_quantity INTEGER NOT NULL CHECK (stock_quantity >= 0),
            description TEXT,
            img TEXT,
            status TEXT NOT NULL,
            ratings REAL,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_product_stock_quantity ON product(stock_quantity);",
    )?;

    Ok(())
}

pub fn map_row_to_product(row: &Row) -> Result<Product, rusqlite::Error> {
    Ok(Product {
        product_id: row.get(0)?,
        name: row.get(1)?,
        brand: row.get(2)?,
        size: row.get(3)?,
        color: row.get(4)?,
        price: row.get(5)?,
        stock_quantity: row.get(6)?,
        description: row.get(7)?,
        img: row.get(8)?,
        status: row.get(9)?,
        ratings: row.get(10)?,
        created_at: row.get(11)?,
        updated_at: row.get(12)?,
    })
}

/// Check the fields a client controls.
///
/// # Errors
/// Returns:
/// - [Error::MissingFields] if `name` or `brand` is blank,
/// - [Error::InvalidAmount] if `price` is negative or not finite,
/// - [Error::InvalidRequest] if `stock_quantity` is negative or `ratings` is out of range.
pub(super) fn check_product_fields(
    name: &str,
    brand: &str,
    price: f64,
    stock_quantity: i64,
    ratings: Option<f64>,
) -> Result<(), Error> {
    let mut missing = Vec::new();

    if name.trim().is_empty() {
        missing.push("name");
    }

    if brand.trim().is_empty() {
        missing.push("brand");
    }

    if !missing.is_empty() {
        return Err(Error::MissingFields(missing));
    }

    if !price.is_finite() || price < 0.0 {
        return Err(Error::InvalidAmount(price));
    }

    if stock_quantity < 0 {
        return Err(Error::InvalidRequest(
            "stockQuantity must not be negative".to_owned(),
        ));
    }

    if ratings.is_some_and(|ratings| !(0.0..=MAX_RATING).contains(&ratings)) {
        return Err(Error::InvalidRequest(format!(
            "ratings must be between 0 and {MAX_RATING}"
        )));
    }

    Ok(())
}

/// Insert `product` with its ID as given.
///
/// Timestamps are stored in UTC so that they sort correctly as text.
pub fn insert_product(product: &Product, connection: &Connection) -> Result<(), Error> {
    check_product_fields(
        &product.name,
        &product.brand,
        product.price,
        product.stock_quantity,
        product.ratings,
    )?;

    connection.execute(
        "INSERT INTO product (id, name, brand, size, color, price, stock_quantity, description, \
            img, status, ratings, created_at, updated_at)
        VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13)",
        params![
            product.product_id,
            product.name,
            product.brand,
            product.size,
            product.color,
            product.price,
            product.stock_quantity,
            product.description,
            product.img,
            product.status,
            product.ratings,
            product.created_at.to_offset(UtcOffset::UTC),
            product.updated_at.to_offset(UtcOffset::UTC),
        ],
    )?;

    Ok(())
}

/// Retrieve a single product by ID.
pub fn get_product(product_id: ProductId, connection: &Connection) -> Result<Product, Error> {
    connection
        .prepare(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM product WHERE id = :id"
        ))?
        .query_row(&[(":id", &product_id)], map_row_to_product)
        .map_err(|error| error.into())
}

/// Retrieve products ordered by ID.
///
/// `search` keeps only products whose name or brand contains it, ignoring
/// ASCII case. `bounds` selects a page of the results.
pub fn query_products(
    search: Option<&str>,
    bounds: PageBounds,
    connection: &Connection,
) -> Result<Vec<Product>, Error> {
    let pattern = search
        .map(str::trim)
        .filter(|term| !term.is_empty())
        .map(|term| format!("%{}%", escape_like(term)));

    connection
        .prepare(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM product
            WHERE ?1 IS NULL OR name LIKE ?1 ESCAPE '\\' OR brand LIKE ?1 ESCAPE '\\'
            ORDER BY id ASC
            LIMIT ?2 OFFSET ?3"
        ))?
        .query_map(
            params![pattern, bounds.limit, bounds.offset],
            map_row_to_product,
        )?
        .map(|maybe_product| maybe_product.map_err(|error| error.into()))
        .collect()
}

/// Retrieve the `limit` products with the most stock on hand.
pub fn get_trending_products(limit: i64, connection: &Connection) -> Result<Vec<Product>, Error> {
    connection
        .prepare(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM product ORDER BY stock_quantity DESC, id ASC LIMIT ?1"
        ))?
        .query_map([limit], map_row_to_product)?
        .map(|maybe_product| maybe_product.map_err(|error| error.into()))
        .collect()
}

fn escape_like(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());

    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }

    escaped
}

#[cfg(test)]
mod create_table_tests {
    use rusqlite::Connection;

    use super::create_product_table;

    #[test]
    fn sql_is_valid() {
        let connection =
            Connection::open_in_memory().expect("Could not initialise in-memory SQLite database");

        assert_eq!(Ok(()), create_product_table(&connection));
    }
}
