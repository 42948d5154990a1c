use colored::Colorize;

use crate::cli::open_db;
use crate::error::Result;
use crate::schedule::now_millis;
use crate::startup::run_startup;
use crate::store::SqliteStore;

pub fn run() -> Result<()> {
    let mut store = SqliteStore::new(open_db()?);
    let outcome = run_startup(&mut store, now_millis())?;

    if outcome.backfilled > 0 {
        println!("Backfilled {} legacy template(s)", outcome.backfilled);
    }
    if outcome.created > 0 {
        println!("{}", format!("Materialized {} recurring transaction(s)", outcome.created).green());
    } else {
        println!("Nothing due.");
    }
    if outcome.failed > 0 {
        eprintln!(
            "{}",
            format!("{} template(s) failed to persist and will retry next run", outcome.failed).yellow()
        );
    }
    Ok(())
}
