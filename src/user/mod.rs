//! Staff users and the endpoints for managing them.

mod core;
mod create_endpoint;
mod delete_endpoint;
mod list_endpoint;

pub use core::{User, UserId, create_user_table, insert_user};
#[cfg(test)]
pub use core::get_user;
pub use create_endpoint::create_user_endpoint;
pub use delete_endpoint::delete_user_endpoint;
pub use list_endpoint::get_users_endpoint;
