//! Customer orders and the items on them.

mod core;
mod items_endpoint;
mod list_endpoint;

pub use core::{
    Order, OrderId, OrderItem, create_order_item_table, create_order_table, get_order_items,
    get_recent_orders, insert_order, insert_order_item,
};
pub use items_endpoint::get_order_items_endpoint;
pub use list_endpoint::get_orders_endpoint;
