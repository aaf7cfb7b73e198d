//! Fills a database with records read from a directory of JSON files.

use std::{fs, io::ErrorKind, path::Path};

use rusqlite::Connection;
use serde::{Deserialize, de::DeserializeOwned};
use time::OffsetDateTime;

use crate::{
    Error, PasswordHash,
    expense::{Expense, insert_expense},
    notification::{NewNotification, insert_notification},
    order::{Order, OrderItem, insert_order, insert_order_item},
    product::{Product, insert_product},
    sale::{Sale, insert_sale},
    user::{User, UserId, insert_user},
};

/// A user as written in `users.json`, with a plaintext password.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SeedUser {
    user_id: UserId,
    username: String,
    #[serde(default)]
    firstname: String,
    #[serde(default)]
    lastname: String,
    email: String,
    password: String,
    phone_number: Option<String>,
    bio: Option<String>,
    job_description: Option<String>,
    address: Option<String>,
    sex: Option<String>,
    img: Option<String>,
    #[serde(default, with = "time::serde::rfc3339::option")]
    created_at: Option<OffsetDateTime>,
    #[serde(default, with = "time::serde::rfc3339::option")]
    updated_at: Option<OffsetDateTime>,
}

impl SeedUser {
    fn into_user(self, password_cost: u32, now: OffsetDateTime) -> Result<User, Error> {
        let password_hash = PasswordHash::from_raw_password(&self.password, password_cost)?;
        let created_at = self.created_at.unwrap_or(now);

        Ok(User {
            user_id: self.user_id,
            username: self.username,
            firstname: self.firstname,
            lastname: self.lastname,
            email: self.email,
            password_hash,
            phone_number: self.phone_number,
            bio: self.bio,
            job_description: self.job_description,
            address: self.address,
            sex: self.sex,
            img: self.img,
            created_at,
            updated_at: self.updated_at.unwrap_or(created_at),
        })
    }
}

/// Tables in the order their rows are deleted, dependants before the tables they refer to.
const TABLES_TO_CLEAR: [&str; 7] = [
    "notification",
    "order_item",
    "\"order\"",
    "sale",
    "expense",
    "product",
    "user",
];

/// Replace the rows in `connection` with the records in `data_dir`.
///
/// Reads `users.json`, `products.json`, `expenses.json`, `notifications.json`,
/// `sales.json`, `orders.json` and `orderItems.json`, each an array of records
/// with explicit IDs. Missing files are skipped. User passwords are hashed
/// with `password_cost`. Everything happens in one transaction, so on error
/// the database is left as it was.
///
/// Returns the number of records inserted.
///
/// # Errors
/// Returns [Error::SeedFileError] if a file cannot be read or parsed, or any
/// error from inserting a record.
pub fn seed_database(
    data_dir: &Path,
    password_cost: u32,
    connection: &Connection,
) -> Result<usize, Error> {
    let transaction = connection.unchecked_transaction()?;

    for table in TABLES_TO_CLEAR {
        transaction.execute(&format!("DELETE FROM {table}"), ())?;
        tracing::debug!("Cleared table {table}");
    }

    let now = OffsetDateTime::now_utc();
    let mut inserted = 0;

    if let Some(users) = load_records::<SeedUser>(data_dir, "users.json")? {
        for user in users {
            insert_user(user.into_user(password_cost, now)?, &transaction)?;
            inserted += 1;
        }
    }

    inserted += seed_table(data_dir, "products.json", |product: Product| {
        insert_product(&product, &transaction)
    })?;
    inserted += seed_table(data_dir, "expenses.json", |expense: Expense| {
        insert_expense(&expense, &transaction)
    })?;
    inserted += seed_table(
        data_dir,
        "notifications.json",
        |notification: NewNotification| insert_notification(&notification, &transaction),
    )?;
    inserted += seed_table(data_dir, "sales.json", |sale: Sale| {
        insert_sale(&sale, &transaction)
    })?;
    inserted += seed_table(data_dir, "orders.json", |order: Order| {
        insert_order(&order, &transaction)
    })?;
    inserted += seed_table(data_dir, "orderItems.json", |item: OrderItem| {
        insert_order_item(&item, &transaction)
    })?;

    transaction.commit()?;

    Ok(inserted)
}

fn seed_table<T, F>(data_dir: &Path, file_name: &str, mut insert: F) -> Result<usize, Error>
where
    T: DeserializeOwned,
    F: FnMut(T) -> Result<(), Error>,
{
    let Some(records) = load_records::<T>(data_dir, file_name)? else {
        return Ok(0);
    };

    let count = records.len();
    for record in records {
        insert(record)?;
    }

    tracing::info!("Seeded {count} records from {file_name}");

    Ok(count)
}

/// Parse `data_dir/file_name` as a JSON array, or `None` if the file does not exist.
fn load_records<T: DeserializeOwned>(
    data_dir: &Path,
    file_name: &str,
) -> Result<Option<Vec<T>>, Error> {
    let path = data_dir.join(file_name);

    let text = match fs::read_to_string(&path) {
        Ok(text) => text,
        Err(error) if error.kind() == ErrorKind::NotFound => {
            tracing::warn!("Skipping {}, the file does not exist", path.display());
            return Ok(None);
        }
        Err(error) => {
            return Err(Error::SeedFileError(
                path.display().to_string(),
                error.to_string(),
            ));
        }
    };

    serde_json::from_str(&text)
        .map(Some)
        .map_err(|error| Error::SeedFileError(path.display().to_string(), error.to_string()))
}

#[cfg(test)]
mod tests {
    use std::{fs, path::PathBuf};

    use crate::{
        Error,
        expense::get_total_spending,
        notification::get_notifications,
        order::get_order_items,
        product::get_product,
        seed::seed_database,
        test_utils::get_test_connection,
        user::get_user,
    };

    const TEST_PASSWORD_COST: u32 = 4;

    fn seed_data_dir() -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("seed_data")
    }

    /// A fresh, empty directory under the system temp directory.
    fn temp_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("stockroom-{name}-{}", std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn seeds_sample_data() {
        let connection = get_test_connection();

        let inserted = seed_database(&seed_data_dir(), TEST_PASSWORD_COST, &connection).unwrap();

        assert!(inserted > 0);
        let user = get_user(1, &connection).unwrap();
        assert!(user.password_hash.verify("password123").unwrap());
        assert!(get_product(1, &connection).is_ok());
        assert!(!get_order_items(1, &connection).unwrap().is_empty());
        assert!(!get_notifications(&connection).unwrap().is_empty());
        assert!(get_total_spending(&connection).unwrap() > 0.0);
    }

    #[test]
    fn seeding_twice_replaces_rows() {
        let connection = get_test_connection();

        let first = seed_database(&seed_data_dir(), TEST_PASSWORD_COST, &connection).unwrap();
        let second = seed_database(&seed_data_dir(), TEST_PASSWORD_COST, &connection).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn missing_files_are_skipped() {
        let connection = get_test_connection();
        let dir = temp_dir("empty");

        let inserted = seed_database(&dir, TEST_PASSWORD_COST, &connection).unwrap();

        assert_eq!(inserted, 0);
    }

    #[test]
    fn bad_json_rolls_back() {
        let connection = get_test_connection();
        seed_database(&seed_data_dir(), TEST_PASSWORD_COST, &connection).unwrap();
        let dir = temp_dir("bad-json");
        fs::write(dir.join("products.json"), "[{\"productId\": ").unwrap();

        let got = seed_database(&dir, TEST_PASSWORD_COST, &connection);

        assert!(matches!(
            got,
            Err(Error::SeedFileError(path, _)) if path.ends_with("products.json")
        ));
        assert!(get_user(1, &connection).is_ok(), "seeded rows were deleted");
    }
}
