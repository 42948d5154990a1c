pub mod add;
pub mod categories;
pub mod catchup;
pub mod init;
pub mod list;
pub mod recurring;
pub mod status;

use chrono::{NaiveDate, NaiveTime};
use clap::{Parser, Subcommand};
use rusqlite::Connection;

use crate::db::{get_connection, init_db};
use crate::error::{PennyError, Result};
use crate::settings::get_data_dir;

/// Open (and lazily initialize) the database in the configured data dir.
pub(crate) fn open_db() -> Result<Connection> {
    let data_dir = get_data_dir();
    std::fs::create_dir_all(&data_dir)?;
    let conn = get_connection(&data_dir.join("penny.db"))?;
    init_db(&conn)?;
    Ok(conn)
}

/// Parse a YYYY-MM-DD date into epoch milliseconds at midnight UTC.
pub(crate) fn parse_date(s: &str) -> Result<i64> {
    let date = NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map_err(|_| PennyError::InvalidDate(s.to_string()))?;
    Ok(date.and_time(NaiveTime::default()).and_utc().timestamp_millis())
}

/// Look up a category id by name (case-insensitive).
pub(crate) fn category_id(conn: &Connection, name: &str) -> Result<i64> {
    conn.query_row(
        "SELECT id FROM categories WHERE lower(name) = lower(?1) AND is_active = 1",
        [name],
        |row| row.get(0),
    )
    .map_err(|_| PennyError::UnknownCategory(name.to_string()))
}

#[derive(Parser)]
#[command(name = "penny", about = "Personal finance tracker CLI with recurring transactions.")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Set up Penny: choose a data directory and initialize the database.
    Init {
        /// Path for Penny data (default: ~/Documents/penny)
        #[arg(long = "data-dir")]
        data_dir: Option<String>,
    },
    /// Record a one-time transaction.
    Add {
        /// What the money was for
        description: String,
        /// Amount: positive income, negative expense
        #[arg(allow_negative_numbers = true)]
        amount: f64,
        /// Date: YYYY-MM-DD (default: today)
        #[arg(long)]
        date: Option<String>,
        /// Category name
        #[arg(long)]
        category: Option<String>,
        /// Payment method (e.g. "Visa ...1234")
        #[arg(long)]
        payment: Option<String>,
        /// Free-form notes
        #[arg(long)]
        notes: Option<String>,
    },
    /// Manage recurring transaction templates.
    Recurring {
        #[command(subcommand)]
        command: RecurringCommands,
    },
    /// List transactions (materializes any due recurring occurrences first).
    List {
        /// Only show a given month: YYYY-MM
        #[arg(long)]
        month: Option<String>,
        /// Maximum rows to show
        #[arg(long, default_value_t = 50)]
        limit: usize,
    },
    /// Materialize overdue recurring occurrences now.
    Catchup,
    /// Manage categories.
    Categories {
        #[command(subcommand)]
        command: CategoriesCommands,
    },
    /// Show current database and summary statistics.
    Status,
}

#[derive(Subcommand)]
pub enum RecurringCommands {
    /// Add a recurring template. Its first occurrence lands on --start.
    Add {
        /// What the money is for
        description: String,
        /// Amount: positive income, negative expense
        #[arg(allow_negative_numbers = true)]
        amount: f64,
        /// daily, weekly, monthly, or yearly
        #[arg(long)]
        frequency: String,
        /// First due date: YYYY-MM-DD
        #[arg(long)]
        start: String,
        /// Last date an occurrence may land on (inclusive): YYYY-MM-DD
        #[arg(long)]
        end: Option<String>,
        /// Category name
        #[arg(long)]
        category: Option<String>,
        /// Payment method
        #[arg(long)]
        payment: Option<String>,
        /// Free-form notes
        #[arg(long)]
        notes: Option<String>,
    },
    /// List recurring templates and their next due dates.
    List,
}

#[derive(Subcommand)]
pub enum CategoriesCommands {
    /// Add a category.
    Add {
        /// Category name
        name: String,
        /// income or expense
        #[arg(long, default_value = "expense")]
        kind: String,
    },
    /// List categories.
    List,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_date() {
        assert_eq!(parse_date("1970-01-01").unwrap(), 0);
        assert_eq!(parse_date("1970-01-02").unwrap(), 86_400_000);
        assert!(parse_date("01/02/2025").is_err());
        assert!(parse_date("2025-13-01").is_err());
    }
}
