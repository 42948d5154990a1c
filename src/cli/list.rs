use colored::Colorize;
use comfy_table::{Cell, Table};

use crate::cli::open_db;
use crate::error::Result;
use crate::fmt::{date, money};
use crate::schedule::now_millis;
use crate::startup::run_startup;
use crate::store::SqliteStore;

type Row = (i64, String, f64, Option<String>, Option<String>);

pub fn run(month: Option<&str>, limit: usize) -> Result<()> {
    // Materialize anything that has come due before the list is read, so
    // recurring occurrences are never missing from the view.
    let mut store = SqliteStore::new(open_db()?);
    let outcome = run_startup(&mut store, now_millis())?;
    if outcome.needs_refresh() {
        println!(
            "{}",
            format!("Materialized {} recurring transaction(s)", outcome.created).green()
        );
    }
    let conn = store.conn();

    let base = "SELECT t.date, t.description, t.amount, c.name, t.payment_method \
                FROM transactions t LEFT JOIN categories c ON t.category_id = c.id \
                WHERE t.is_recurring_template = 0";
    let map_row = |row: &rusqlite::Row<'_>| -> rusqlite::Result<Row> {
        Ok((
            row.get(0)?,
            row.get(1)?,
            row.get(2)?,
            row.get(3)?,
            row.get(4)?,
        ))
    };
    let rows: Vec<Row> = match month {
        Some(month) => {
            let sql = format!(
                "{base} AND strftime('%Y-%m', t.date / 1000, 'unixepoch') = ?1 \
                 ORDER BY t.date DESC, t.id DESC LIMIT ?2"
            );
            let mut stmt = conn.prepare(&sql)?;
            let rows = stmt
                .query_map(rusqlite::params![month, limit as i64], map_row)?
                .collect::<std::result::Result<Vec<_>, _>>()?;
            rows
        }
        None => {
            let sql = format!("{base} ORDER BY t.date DESC, t.id DESC LIMIT ?1");
            let mut stmt = conn.prepare(&sql)?;
            let rows = stmt
                .query_map([limit as i64], map_row)?
                .collect::<std::result::Result<Vec<_>, _>>()?;
            rows
        }
    };

    if rows.is_empty() {
        println!("No transactions.");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_header(vec!["Date", "Description", "Amount", "Category", "Payment"]);
    for (ts, description, amount, category, payment) in rows {
        let amount_cell = if amount < 0.0 {
            money(amount).red().to_string()
        } else {
            money(amount).green().to_string()
        };
        table.add_row(vec![
            Cell::new(date(ts)),
            Cell::new(description),
            Cell::new(amount_cell),
            Cell::new(category.unwrap_or_default()),
            Cell::new(payment.unwrap_or_default()),
        ]);
    }
    println!("Transactions\n{table}");
    Ok(())
}
