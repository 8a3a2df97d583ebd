use std::error::Error;
use std::path::Path;
use std::process::exit;

use clap::Parser;
use rusqlite::Connection;
use time::{Duration, OffsetDateTime};

use ledgerd::{SQLiteTransactionStore, Transaction, TransactionStore, UserId, initialize_db};

/// A utility for creating a test database for the transaction ledger server.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File path to save the SQLite database to.
    #[arg(long, short)]
    output_path: String,
}

/// Create and populate a database for manual testing.
fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    let output_path = Path::new(&args.output_path);

    match output_path.extension() {
        None => {
            eprintln!("Output path must include a file extension (e.g., 'my_database.db').");
            exit(1);
        }
        Some(extension) if extension.is_empty() => {
            eprintln!("Output path must include a file extension (e.g., 'my_database.db').");
            exit(1);
        }
        _ => {}
    }

    if output_path.is_file() {
        eprintln!("File already exists at {output_path:#?}!");
        exit(1);
    }

    println!("Creating database at {output_path:#?}");
    let conn = Connection::open(output_path)?;

    initialize_db(&conn)?;

    println!("Creating test transactions...");

    let mut store = SQLiteTransactionStore::new(std::sync::Arc::new(std::sync::Mutex::new(conn)));
    let today = OffsetDateTime::now_utc();

    for (user_id, full_name, amount, days_ago, transaction_type) in [
        (1, "John Doe", 100.0, 0, "credit"),
        (1, "John Doe", 250.5, 0, "debit"),
        (1, "John Doe", 75.25, 2, "credit"),
        (2, "Jane Smith", 1200.0, 1, "credit"),
        (2, "Jane Smith", 15.99, 3, "debit"),
    ] {
        store.create(
            Transaction::build(amount, UserId::new(user_id))
                .full_name(full_name)
                .transaction_type(transaction_type)
                .date(today - Duration::days(days_ago)),
        )?;
    }

    println!("Success!");

    Ok(())
}
