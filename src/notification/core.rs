//! Notifications addressed to users.

use rusqlite::{Connection, Row, params};
use serde::{Deserialize, Serialize};
use time::{OffsetDateTime, UtcOffset};

use crate::{Error, database_id::DatabaseId, user::UserId};

pub type NotificationId = DatabaseId;

/// The part of a user shown alongside their notifications.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationUser {
    pub user_id: UserId,
    pub username: String,
}

/// A message for a user, as listed by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub notification_id: NotificationId,
    pub user_id: UserId,
    pub message: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    pub read_status: bool,
    pub user: NotificationUser,
}

/// A notification as stored, without the embedded user.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewNotification {
    pub notification_id: NotificationId,
    pub user_id: UserId,
    pub message: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(default)]
    pub read_status: bool,
}

/// Create the notification table.
///
/// A user's notifications are deleted along with the user.
pub fn create_notification_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS notification (
                id INTEGER PRIMARY KEY,
                user_id INTEGER NOT NULL,
                message TEXT NOT NULL,
                created_at TEXT NOT NULL,
                read_status INTEGER NOT NULL DEFAULT 0,
                FOREIGN KEY(user_id) REFERENCES user(id) ON UPDATE CASCADE ON DELETE CASCADE
                )",
        (),
    )?;

    Ok(())
}

fn map_row_to_notification(row: &Row) -> Result<Notification, rusqlite::Error> {
    let user_id = row.get(1)?;

    Ok(Notification {
        notification_id: row.get(0)?,
        user_id,
        message: row.get(2)?,
        created_at: row.get(3)?,
        read_status: row.get(4)?,
        user: NotificationUser {
            user_id,
            username: row.get(5)?,
        },
    })
}

/// Insert `notification` keeping its ID.
///
/// # Errors
/// Returns an [Error::SqlError] if the user does not exist.
pub fn insert_notification(
    notification: &NewNotification,
    connection: &Connection,
) -> Result<(), Error> {
    connection.execute(
        "INSERT INTO notification (id, user_id, message, created_at, read_status)
        VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            notification.notification_id,
            notification.user_id,
            notification.message,
            notification.created_at.to_offset(UtcOffset::UTC),
            notification.read_status,
        ],
    )?;

    Ok(())
}

/// Get every notification with its user, the most recent first.
pub fn get_notifications(connection: &Connection) -> Result<Vec<Notification>, Error> {
    connection
        .prepare(
            "SELECT notification.id, notification.user_id, notification.message, \
                notification.created_at, notification.read_status, user.username
            FROM notification
            INNER JOIN user ON user.id = notification.user_id
            ORDER BY notification.created_at DESC, notification.id DESC",
        )?
        .query_map([], map_row_to_notification)?
        .map(|maybe_notification| maybe_notification.map_err(|error| error.into()))
        .collect()
}
