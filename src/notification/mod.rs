//! Notifications for users.

mod core;
mod list_endpoint;

pub use core::{NewNotification, Notification, create_notification_table, get_notifications, insert_notification};
pub use list_endpoint::get_notifications_endpoint;
