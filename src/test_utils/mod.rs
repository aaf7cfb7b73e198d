#![allow(missing_docs)]

use axum_test::TestServer;
use rusqlite::Connection;
use time::{OffsetDateTime, macros::datetime};

use crate::{
    AppState, PaginationConfig, PasswordHash, build_router,
    db::initialize,
    expense::Expense,
    notification::NewNotification,
    order::{Order, OrderItem},
    product::{Product, ProductStatus},
    sale::Sale,
    user::User,
};

/// The timestamp every sample record is created at.
pub const SAMPLE_TIMESTAMP: OffsetDateTime = datetime!(2025-01-01 09:00 UTC);

#[track_caller]
pub fn get_test_connection() -> Connection {
    let connection = Connection::open_in_memory().unwrap();
    initialize(&connection).unwrap();
    connection
}

#[track_caller]
pub fn get_test_state() -> AppState {
    AppState::new(
        Connection::open_in_memory().unwrap(),
        "Etc/UTC",
        PaginationConfig::default(),
    )
    .unwrap()
}

#[track_caller]
pub fn get_test_server(state: AppState) -> TestServer {
    TestServer::try_new(build_router(state)).expect("Could not create test server.")
}

pub fn sample_product(product_id: i64, name: &str, stock_quantity: i64) -> Product {
    Product {
        product_id,
        name: name.to_owned(),
        brand: "Acme".to_owned(),
        size: Some("M".to_owned()),
        color: None,
        price: 19.99,
        stock_quantity,
        description: None,
        img: None,
        status: ProductStatus::Available,
        ratings: Some(4.5),
        created_at: SAMPLE_TIMESTAMP,
        updated_at: SAMPLE_TIMESTAMP,
    }
}

/// A user whose email is derived from `username` so samples never clash.
pub fn sample_user(user_id: i64, username: &str) -> User {
    User {
        user_id,
        username: username.to_owned(),
        firstname: "Test".to_owned(),
        lastname: "User".to_owned(),
        email: format!("{username}@example.com"),
        password_hash: PasswordHash::new_unchecked(
            "$2b$04$notarealhashnotarealhashnotarealhashnotarealh",
        ),
        phone_number: None,
        bio: None,
        job_description: None,
        address: None,
        sex: None,
        img: None,
        created_at: SAMPLE_TIMESTAMP,
        updated_at: SAMPLE_TIMESTAMP,
    }
}

pub fn sample_order(order_id: i64, total_amount: f64) -> Order {
    Order {
        order_id,
        order_date: SAMPLE_TIMESTAMP,
        total_amount,
        status: "Pending".to_owned(),
        created_at: SAMPLE_TIMESTAMP,
    }
}

pub fn sample_order_item(
    order_item_id: i64,
    order_id: i64,
    product_id: i64,
    quantity_ordered: i64,
    price_per_unit: f64,
) -> OrderItem {
    OrderItem {
        order_item_id,
        order_id,
        product_id,
        quantity_ordered,
        price_per_unit,
        subtotal: price_per_unit * quantity_ordered as f64,
    }
}

pub fn sample_sale(sale_id: i64, sale_date: OffsetDateTime, total_amount: f64) -> Sale {
    Sale {
        sale_id,
        sale_date,
        total_amount,
        status: "Completed".to_owned(),
    }
}

pub fn sample_expense(
    expense_id: i64,
    category: &str,
    amount: f64,
    timestamp: OffsetDateTime,
) -> Expense {
    Expense {
        expense_id,
        category: category.to_owned(),
        amount,
        timestamp,
        description: Some(format!("Expense {expense_id}")),
        user_id: None,
    }
}

pub fn sample_notification(notification_id: i64, user_id: i64, message: &str) -> NewNotification {
    NewNotification {
        notification_id,
        user_id,
        message: message.to_owned(),
        created_at: SAMPLE_TIMESTAMP,
        read_status: false,
    }
}
