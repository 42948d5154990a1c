use crate::cli::open_db;
use crate::error::Result;
use crate::schedule::now_millis;
use crate::settings::get_data_dir;

pub fn run() -> Result<()> {
    let data_dir = get_data_dir();
    let db_path = data_dir.join("penny.db");

    println!("Data dir:   {}", data_dir.display());
    println!("Database:   {}", db_path.display());

    if !db_path.exists() {
        println!();
        println!("Database not found. Run `penny init` to set up.");
        return Ok(());
    }

    let conn = open_db()?;
    let transactions: i64 = conn.query_row(
        "SELECT count(*) FROM transactions WHERE is_recurring_template = 0",
        [],
        |r| r.get(0),
    )?;
    let templates: i64 = conn.query_row(
        "SELECT count(*) FROM transactions WHERE is_recurring_template = 1",
        [],
        |r| r.get(0),
    )?;
    let due: i64 = conn.query_row(
        "SELECT count(*) FROM transactions WHERE is_recurring_template = 1 \
         AND next_occurrence_cursor IS NOT NULL AND next_occurrence_cursor <= ?1",
        [now_millis()],
        |r| r.get(0),
    )?;
    let legacy: i64 = conn.query_row(
        "SELECT count(*) FROM transactions WHERE is_recurring_template = 1 \
         AND next_occurrence_cursor IS NULL",
        [],
        |r| r.get(0),
    )?;
    let categories: i64 = conn.query_row("SELECT count(*) FROM categories", [], |r| r.get(0))?;

    println!();
    println!("Transactions:        {transactions}");
    println!("Recurring templates: {templates}");
    println!("  due now:           {due}");
    println!("  pending backfill:  {legacy}");
    println!("Categories:          {categories}");
    Ok(())
}
