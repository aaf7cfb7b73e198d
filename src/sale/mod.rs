//! Completed sales.

mod core;
mod list_endpoint;

pub use core::{Sale, create_sale_table, get_sales, insert_sale};
pub use list_endpoint::get_sales_endpoint;
