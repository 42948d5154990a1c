use comfy_table::{Cell, Table};

use crate::cli::{category_id, open_db, parse_date};
use crate::error::Result;
use crate::fmt::{date, money};
use crate::models::Frequency;
use crate::schedule::now_millis;

#[allow(clippy::too_many_arguments)]
pub fn add(
    description: &str,
    amount: f64,
    frequency: &str,
    start: &str,
    end: Option<&str>,
    category: Option<&str>,
    payment: Option<&str>,
    notes: Option<&str>,
) -> Result<()> {
    // Validation boundary: an unknown frequency is rejected here, before
    // anything is persisted. The engine never sees a malformed template.
    let frequency: Frequency = frequency.parse()?;
    let start = parse_date(start)?;
    let end = end.map(parse_date).transpose()?;

    let conn = open_db()?;
    let category_id = match category {
        Some(name) => Some(category_id(&conn, name)?),
        None => None,
    };
    let now = now_millis();

    // The start date is both the template's own date and its initial
    // cursor: the first due occurrence.
    conn.execute(
        "INSERT INTO transactions \
         (amount, category_id, description, payment_method, notes, date, \
          is_recurring_template, recurring_frequency, recurring_end_date, \
          next_occurrence_cursor, created_at, updated_at) \
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, 1, ?7, ?8, ?6, ?9, ?9)",
        rusqlite::params![
            amount,
            category_id,
            description,
            payment,
            notes,
            start,
            frequency.as_str(),
            end,
            now,
        ],
    )?;

    println!(
        "Added {frequency} recurring template: {description} {} starting {}",
        money(amount),
        date(start)
    );
    Ok(())
}

pub fn list() -> Result<()> {
    let conn = open_db()?;
    let mut stmt = conn.prepare(
        "SELECT id, description, amount, recurring_frequency, \
                next_occurrence_cursor, recurring_end_date \
         FROM transactions WHERE is_recurring_template = 1 ORDER BY id",
    )?;
    let rows: Vec<(i64, String, f64, String, Option<i64>, Option<i64>)> = stmt
        .query_map([], |row| {
            Ok((
                row.get(0)?,
                row.get(1)?,
                row.get(2)?,
                row.get(3)?,
                row.get(4)?,
                row.get(5)?,
            ))
        })?
        .collect::<std::result::Result<Vec<_>, _>>()?;

    let mut table = Table::new();
    table.set_header(vec!["ID", "Description", "Amount", "Frequency", "Next due", "Ends"]);
    for (id, description, amount, frequency, cursor, end) in rows {
        table.add_row(vec![
            Cell::new(id),
            Cell::new(description),
            Cell::new(money(amount)),
            Cell::new(frequency),
            Cell::new(cursor.map(date).unwrap_or_else(|| "(pending backfill)".to_string())),
            Cell::new(end.map(date).unwrap_or_default()),
        ]);
    }
    println!("Recurring templates\n{table}");
    Ok(())
}
