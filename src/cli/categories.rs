use comfy_table::{Cell, Table};

use crate::cli::open_db;
use crate::error::{PennyError, Result};

pub fn add(name: &str, kind: &str) -> Result<()> {
    if kind != "income" && kind != "expense" {
        return Err(PennyError::Other(format!(
            "Invalid category kind: {kind} (expected income or expense)"
        )));
    }
    let conn = open_db()?;
    conn.execute(
        "INSERT INTO categories (name, category_type) VALUES (?1, ?2)",
        rusqlite::params![name, kind],
    )?;
    println!("Added category: {name}");
    Ok(())
}

pub fn list() -> Result<()> {
    let conn = open_db()?;
    let mut stmt = conn.prepare(
        "SELECT id, name, category_type FROM categories WHERE is_active = 1 \
         ORDER BY category_type, name",
    )?;
    let rows: Vec<(i64, String, String)> = stmt
        .query_map([], |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?)))?
        .collect::<std::result::Result<Vec<_>, _>>()?;

    let mut table = Table::new();
    table.set_header(vec!["ID", "Name", "Type"]);
    for (id, name, kind) in rows {
        table.add_row(vec![Cell::new(id), Cell::new(name), Cell::new(kind)]);
    }
    println!("Categories\n{table}");
    Ok(())
}
