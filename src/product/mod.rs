//! Products stocked in the inventory and the endpoints for managing them.

mod core;
mod create_endpoint;
mod delete_endpoint;
mod edit_endpoint;
mod list_endpoint;

pub use core::{
    Product, ProductId, ProductStatus, create_product_table, get_product, get_trending_products,
    insert_product,
};
pub use create_endpoint::create_product_endpoint;
pub use delete_endpoint::delete_product_endpoint;
pub use edit_endpoint::edit_product_endpoint;
pub use list_endpoint::get_products_endpoint;
