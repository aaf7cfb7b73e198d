use std::path::PathBuf;

use clap::Parser;
use rusqlite::Connection;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use stockroom::{PasswordHash, initialize_db, seed_database};

/// Replace the contents of a stockroom database with the records in a directory of JSON files.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File path to the application SQLite database. It is created if it does not exist.
    #[arg(long)]
    db_path: String,

    /// The directory containing `users.json`, `products.json` and the other seed files.
    #[arg(long, default_value = "seed_data")]
    data_dir: PathBuf,
}

fn main() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();

    let connection = Connection::open(&args.db_path).expect("Could not open database file.");
    initialize_db(&connection).expect("Could not initialize database.");

    match seed_database(&args.data_dir, PasswordHash::DEFAULT_COST, &connection) {
        Ok(count) => tracing::info!("Seeded {count} records into {}", args.db_path),
        Err(error) => {
            tracing::error!("Seeding failed, the database was not changed: {error}");
            std::process::exit(1);
        }
    }
}
