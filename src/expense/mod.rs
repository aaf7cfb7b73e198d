//! Expenses, their categories, and the report that groups them.

mod aggregation;
mod category;
mod core;
mod grouped_endpoint;
mod list_endpoint;

pub use category::{
    ExpenseCategory, create_expense_category_table, get_expense_categories,
    get_expense_categories_endpoint, insert_default_categories,
};
pub use core::{
    Expense, create_expense_table, get_recent_expenses, get_total_spending, insert_expense,
};
pub use grouped_endpoint::get_grouped_expenses_endpoint;
pub use list_endpoint::get_expenses_endpoint;
