//! Code for creating the user table and fetching users from the database.

use rusqlite::{Connection, Row, params};
use serde::Serialize;
use time::{OffsetDateTime, UtcOffset};

use crate::{Error, PasswordHash, database_id::DatabaseId};

pub type UserId = DatabaseId;

const USER_COLUMNS: &str = "id, username, firstname, lastname, email, password, phone_number, \
    bio, job_description, address, sex, img, created_at, updated_at";

/// A staff member with access to the dashboard.
///
/// The password hash is never serialized.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub user_id: UserId,
    pub username: String,
    pub firstname: String,
    pub lastname: String,
    pub email: String,
    #[serde(skip)]
    pub password_hash: PasswordHash,
    pub phone_number: Option<String>,
    pub bio: Option<String>,
    pub job_description: Option<String>,
    pub address: Option<String>,
    pub sex: Option<String>,
    /// A URL for the user's profile picture.
    pub img: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

/// Create the user table.
///
/// # Errors
///
/// This function will return an error if the SQL query failed.
pub fn create_user_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS user (
                id INTEGER PRIMARY KEY,
                username TEXT NOT NULL UNIQUE,
                firstname TEXT NOT NULL,
                lastname TEXT NOT NULL,
                email TEXT NOT NULL UNIQUE,
                password TEXT NOT NULL,
                phone_number TEXT,
                bio TEXT,
                job_description TEXT,
                address TEXT,
                sex TEXT,
                img TEXT,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
                )",
        (),
    )?;

    Ok(())
}

pub fn map_row_to_user(row: &Row) -> Result<User, rusqlite::Error> {
    let raw_password_hash: String = row.get(5)?;

    Ok(User {
        user_id: row.get(0)?,
        username: row.get(1)?,
        firstname: row.get(2)?,
        lastname: row.get(3)?,
        email: row.get(4)?,
        password_hash: PasswordHash::new_unchecked(&raw_password_hash),
        phone_number: row.get(6)?,
        bio: row.get(7)?,
        job_description: row.get(8)?,
        address: row.get(9)?,
        sex: row.get(10)?,
        img: row.get(11)?,
        created_at: row.get(12)?,
        updated_at: row.get(13)?,
    })
}

/// Insert `user`, keeping its ID. If `user.user_id` is zero or less, SQLite
/// picks the next free ID and the returned user carries it.
///
/// # Errors
///
/// Returns [Error::DuplicateUser] if the username or email is taken, or an
/// [Error::SqlError] if another SQL related error occurred.
pub fn insert_user(user: User, connection: &Connection) -> Result<User, Error> {
    let id = (user.user_id > 0).then_some(user.user_id);

    connection.execute(
        "INSERT INTO user (id, username, firstname, lastname, email, password, phone_number, \
            bio, job_description, address, sex, img, created_at, updated_at)
        VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14)",
        params![
            id,
            user.username,
            user.firstname,
            user.lastname,
            user.email,
            user.password_hash.as_ref(),
            user.phone_number,
            user.bio,
            user.job_description,
            user.address,
            user.sex,
            user.img,
            user.created_at.to_offset(UtcOffset::UTC),
            user.updated_at.to_offset(UtcOffset::UTC),
        ],
    )?;

    Ok(User {
        user_id: connection.last_insert_rowid(),
        ..user
    })
}

/// Get the user from the database with an ID equal to `user_id`.
///
/// # Errors
///
/// This function will return an error if:
/// - `user_id` does not belong to a registered user.
/// - there was an error trying to access the store.
pub fn get_user(user_id: UserId, connection: &Connection) -> Result<User, Error> {
    connection
        .prepare(&format!("SELECT {USER_COLUMNS} FROM user WHERE id = :id"))?
        .query_row(&[(":id", &user_id)], map_row_to_user)
        .map_err(|error| error.into())
}

/// Get every user ordered by ID.
pub fn get_all_users(connection: &Connection) -> Result<Vec<User>, Error> {
    connection
        .prepare(&format!("SELECT {USER_COLUMNS} FROM user ORDER BY id ASC"))?
        .query_map([], map_row_to_user)?
        .map(|maybe_user| maybe_user.map_err(|error| error.into()))
        .collect()
}

/// Delete a user by ID, along with their notifications.
///
/// # Errors
///
/// Returns [Error::DeleteMissingUser] if the user does not exist.
pub fn delete_user(user_id: UserId, connection: &Connection) -> Result<(), Error> {
    let rows_affected = connection.execute("DELETE FROM user WHERE id = ?1", [user_id])?;

    if rows_affected == 0 {
        return Err(Error::DeleteMissingUser);
    }

    Ok(())
}
