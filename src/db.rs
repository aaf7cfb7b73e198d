//! Creates the application's database schema.

use rusqlite::Connection;

use crate::{
    Error,
    expense::{create_expense_category_table, create_expense_table, insert_default_categories},
    notification::create_notification_table,
    order::{create_order_item_table, create_order_table},
    product::create_product_table,
    sale::create_sale_table,
    user::create_user_table,
};

/// Create the tables for the domain models if they do not already exist and
/// insert the built-in expense categories.
///
/// Foreign key enforcement is switched on for `connection`.
///
/// # Errors
/// Returns an [Error::SqlError] if any of the SQL statements fail.
pub fn initialize(connection: &Connection) -> Result<(), Error> {
    // Has no effect inside a transaction, so it must come first.
    connection.pragma_update(None, "foreign_keys", true)?;

    let transaction = connection.unchecked_transaction()?;

    create_user_table(&transaction)?;
    create_product_table(&transaction)?;
    create_expense_category_table(&transaction)?;
    create_expense_table(&transaction)?;
    create_sale_table(&transaction)?;
    create_order_table(&transaction)?;
    create_order_item_table(&transaction)?;
    create_notification_table(&transaction)?;
    insert_default_categories(&transaction)?;

    transaction.commit()?;

    Ok(())
}
