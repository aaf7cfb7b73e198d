//! Orders, their line items, and the queries for both.

use rusqlite::{Connection, Row, params};
use serde::{Deserialize, Serialize};
use time::{OffsetDateTime, UtcOffset};

use crate::{Error, database_id::DatabaseId, pagination::PageBounds, product::ProductId};

pub type OrderId = DatabaseId;

pub type OrderItemId = DatabaseId;

/// A customer order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub order_id: OrderId,
    #[serde(with = "time::serde::rfc3339")]
    pub order_date: OffsetDateTime,
    pub total_amount: f64,
    /// Free text such as "Pending" or "Shipped".
    pub status: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

/// One product line within an [Order].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    pub order_item_id: OrderItemId,
    pub order_id: OrderId,
    pub product_id: ProductId,
    pub quantity_ordered: i64,
    pub price_per_unit: f64,
    pub subtotal: f64,
}

/// Create the order table.
///
/// `order` is a keyword in SQL so the table name is always quoted.
pub fn create_order_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS \"order\" (
                id INTEGER PRIMARY KEY,
                order_date TEXT NOT NULL,
                total_amount REAL NOT NULL,
                status TEXT NOT NULL,
                created_at TEXT NOT NULL
                )",
        (),
    )?;

    connection.execute(
        "CREATE INDEX IF NOT EXISTS idx_order_date ON \"order\"(order_date);",
        (),
    )?;

    Ok(())
}

/// Create the order item table.
///
/// Deleting an order deletes its items. Deleting a product that is still on
/// an order fails with a foreign key error.
pub fn create_order_item_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS order_item (
                id INTEGER PRIMARY KEY,
                order_id INTEGER NOT NULL,
                product_id INTEGER NOT NULL,
                quantity_ordered INTEGER NOT NULL,
                price_per_unit REAL NOT NULL,
                subtotal REAL NOT NULL,
                FOREIGN KEY(order_id) REFERENCES \"order\"(id) ON UPDATE CASCADE ON DELETE CASCADE,
                FOREIGN KEY(product_id) REFERENCES product(id) ON UPDATE CASCADE
                )",
        (),
    )?;

    connection.execute(
        "CREATE INDEX IF NOT EXISTS idx_order_item_order ON order_item(order_id);",
        (),
    )?;

    Ok(())
}

fn map_row_to_order(row: &Row) -> Result<Order, rusqlite::Error> {
    Ok(Order {
        order_id: row.get(0)?,
        order_date: row.get(1)?,
        total_amount: row.get(2)?,
        status: row.get(3)?,
        created_at: row.get(4)?,
    })
}

fn map_row_to_order_item(row: &Row) -> Result<OrderItem, rusqlite::Error> {
    Ok(OrderItem {
        order_item_id: row.get(0)?,
        order_id: row.get(1)?,
        product_id: row.get(2)?,
        quantity_ordered: row.get(3)?,
        price_per_unit: row.get(4)?,
        subtotal: row.get(5)?,
    })
}

/// Insert `order` keeping its ID.
///
/// # Errors
/// Returns [Error::InvalidAmount] if the total is negative or not finite.
pub fn insert_order(order: &Order, connection: &Connection) -> Result<(), Error> {
    if !order.total_amount.is_finite() || order.total_amount < 0.0 {
        return Err(Error::InvalidAmount(order.total_amount));
    }

    connection.execute(
        "INSERT INTO \"order\" (id, order_date, total_amount, status, created_at)
        VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            order.order_id,
            order.order_date.to_offset(UtcOffset::UTC),
            order.total_amount,
            order.status,
            order.created_at.to_offset(UtcOffset::UTC),
        ],
    )?;

    Ok(())
}

/// Insert `item` keeping its ID.
///
/// # Errors
/// Returns an [Error::SqlError] if the order or product does not exist, and
/// [Error::InvalidAmount] if the unit price or subtotal is negative.
pub fn insert_order_item(item: &OrderItem, connection: &Connection) -> Result<(), Error> {
    for amount in [item.price_per_unit, item.subtotal] {
        if !amount.is_finite() || amount < 0.0 {
            return Err(Error::InvalidAmount(amount));
        }
    }

    connection.execute(
        "INSERT INTO order_item (id, order_id, product_id, quantity_ordered, price_per_unit, \
            subtotal)
        VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            item.order_item_id,
            item.order_id,
            item.product_id,
            item.quantity_ordered,
            item.price_per_unit,
            item.subtotal,
        ],
    )?;

    Ok(())
}

/// Get a page of orders ordered by ID.
pub fn get_orders(bounds: PageBounds, connection: &Connection) -> Result<Vec<Order>, Error> {
    connection
        .prepare(
            "SELECT id, order_date, total_amount, status, created_at FROM \"order\"
            ORDER BY id ASC
            LIMIT ?1 OFFSET ?2",
        )?
        .query_map([bounds.limit, bounds.offset], map_row_to_order)?
        .map(|maybe_order| maybe_order.map_err(|error| error.into()))
        .collect()
}

/// Get every order, the most recent order date first.
pub fn get_recent_orders(connection: &Connection) -> Result<Vec<Order>, Error> {
    connection
        .prepare(
            "SELECT id, order_date, total_amount, status, created_at FROM \"order\"
            ORDER BY order_date DESC, id DESC",
        )?
        .query_map([], map_row_to_order)?
        .map(|maybe_order| maybe_order.map_err(|error| error.into()))
        .collect()
}

/// Get the items on the order with `order_id`.
///
/// An unknown order has no items, so this returns an empty vector rather
/// than [Error::NotFound].
pub fn get_order_items(
    order_id: OrderId,
    connection: &Connection,
) -> Result<Vec<OrderItem>, Error> {
    connection
        .prepare(
            "SELECT id, order_id, product_id, quantity_ordered, price_per_unit, subtotal
            FROM order_item WHERE order_id = :order_id ORDER BY id ASC",
        )?
        .query_map(&[(":order_id", &order_id)], map_row_to_order_item)?
        .map(|maybe_item| maybe_item.map_err(|error| error.into()))
        .collect()
}
