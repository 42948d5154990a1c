use crate::cli::{category_id, open_db, parse_date};
use crate::error::Result;
use crate::fmt::money;
use crate::schedule::now_millis;

pub fn run(
    description: &str,
    amount: f64,
    date: Option<&str>,
    category: Option<&str>,
    payment: Option<&str>,
    notes: Option<&str>,
) -> Result<()> {
    let conn = open_db()?;
    let now = now_millis();
    let date = match date {
        Some(d) => parse_date(d)?,
        None => now,
    };
    let category_id = match category {
        Some(name) => Some(category_id(&conn, name)?),
        None => None,
    };

    conn.execute(
        "INSERT INTO transactions \
         (amount, category_id, description, payment_method, notes, date, \
          is_recurring_template, created_at, updated_at) \
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, 0, ?7, ?7)",
        rusqlite::params![amount, category_id, description, payment, notes, date, now],
    )?;

    println!("Added transaction: {description} {}", money(amount));
    Ok(())
}
