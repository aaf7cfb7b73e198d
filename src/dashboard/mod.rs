//! Dashboard module
//!
//! Provides the summary the dashboard front page is drawn from.

mod handlers;

pub use handlers::get_dashboard_metrics;
