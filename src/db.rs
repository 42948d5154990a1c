use std::path::Path;

use rusqlite::Connection;

use crate::error::Result;

// Timestamps are stored as INTEGER milliseconds since the Unix epoch.
// next_occurrence_cursor is nullable: rows created before the column existed
// carry NULL until the backfill pass assigns one.
pub const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS categories (
    id INTEGER PRIMARY KEY,
    name TEXT NOT NULL UNIQUE,
    category_type TEXT NOT NULL,
    is_active INTEGER DEFAULT 1,
    created_at INTEGER DEFAULT (strftime('%s','now') * 1000)
);

CREATE TABLE IF NOT EXISTS transactions (
    id INTEGER PRIMARY KEY,
    amount REAL NOT NULL,
    category_id INTEGER,
    description TEXT NOT NULL,
    payment_method TEXT,
    notes TEXT,
    date INTEGER NOT NULL,
    is_recurring_template INTEGER NOT NULL DEFAULT 0,
    recurring_frequency TEXT,
    recurring_end_date INTEGER,
    next_occurrence_cursor INTEGER,
    created_at INTEGER DEFAULT (strftime('%s','now') * 1000),
    updated_at INTEGER DEFAULT (strftime('%s','now') * 1000),
    FOREIGN KEY (category_id) REFERENCES categories(id)
);

CREATE INDEX IF NOT EXISTS idx_transactions_date ON transactions(date);
CREATE INDEX IF NOT EXISTS idx_templates_cursor
    ON transactions(next_occurrence_cursor) WHERE is_recurring_template = 1;
";

// (name, category_type)
const DEFAULT_CATEGORIES: &[(&str, &str)] = &[
    // Income
    ("Salary", "income"),
    ("Freelance", "income"),
    ("Interest", "income"),
    ("Other Income", "income"),
    // Expenses
    ("Rent & Mortgage", "expense"),
    ("Utilities", "expense"),
    ("Groceries", "expense"),
    ("Dining Out", "expense"),
    ("Transport", "expense"),
    ("Subscriptions", "expense"),
    ("Insurance", "expense"),
    ("Health", "expense"),
    ("Entertainment", "expense"),
    ("Shopping", "expense"),
    ("Travel", "expense"),
    ("Education", "expense"),
    ("Gifts & Donations", "expense"),
    ("Fees & Charges", "expense"),
    ("Uncategorized", "expense"),
];

pub fn get_connection(db_path: &Path) -> Result<Connection> {
    let conn = Connection::open(db_path)?;
    conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA foreign_keys=ON;")?;
    Ok(conn)
}

pub fn init_db(conn: &Connection) -> Result<()> {
    conn.execute_batch(SCHEMA)?;

    let count: i64 = conn.query_row("SELECT count(*) FROM categories", [], |row| row.get(0))?;
    if count == 0 {
        for (name, category_type) in DEFAULT_CATEGORIES {
            conn.execute(
                "INSERT INTO categories (name, category_type) VALUES (?1, ?2)",
                rusqlite::params![name, category_type],
            )?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_db() -> (tempfile::TempDir, Connection) {
        let dir = tempfile::tempdir().unwrap();
        let conn = get_connection(&dir.path().join("test.db")).unwrap();
        init_db(&conn).unwrap();
        (dir, conn)
    }

    #[test]
    fn test_init_db_creates_tables() {
        let (_dir, conn) = test_db();
        let tables: Vec<String> = conn
            .prepare("SELECT name FROM sqlite_master WHERE type='table' AND name NOT LIKE 'sqlite_%'")
            .unwrap()
            .query_map([], |row| row.get(0))
            .unwrap()
            .collect::<std::result::Result<Vec<_>, _>>()
            .unwrap();
        for expected in &["categories", "transactions"] {
            assert!(tables.contains(&expected.to_string()), "missing table: {expected}");
        }
    }

    #[test]
    fn test_init_db_is_idempotent() {
        let (_dir, conn) = test_db();
        init_db(&conn).unwrap();
        let count: i64 = conn.query_row("SELECT count(*) FROM categories", [], |r| r.get(0)).unwrap();
        assert_eq!(count, DEFAULT_CATEGORIES.len() as i64);
    }

    #[test]
    fn test_init_db_seeds_categories() {
        let (_dir, conn) = test_db();
        let income: i64 = conn.query_row(
            "SELECT count(*) FROM categories WHERE category_type = 'income'", [], |r| r.get(0),
        ).unwrap();
        let expense: i64 = conn.query_row(
            "SELECT count(*) FROM categories WHERE category_type = 'expense'", [], |r| r.get(0),
        ).unwrap();
        assert!(income >= 4, "expected >= 4 income categories, got {income}");
        assert!(expense >= 10, "expected >= 10 expense categories, got {expense}");
    }

    #[test]
    fn test_cursor_column_is_nullable() {
        let (_dir, conn) = test_db();
        conn.execute(
            "INSERT INTO transactions (amount, description, date, is_recurring_template, recurring_frequency) \
             VALUES (-9.99, 'Legacy sub', 1700000000000, 1, 'monthly')",
            [],
        ).unwrap();
        let cursor: Option<i64> = conn.query_row(
            "SELECT next_occurrence_cursor FROM transactions LIMIT 1", [], |r| r.get(0),
        ).unwrap();
        assert!(cursor.is_none());
    }
}
