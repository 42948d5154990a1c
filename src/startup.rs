use crate::error::Result;
use crate::recurrence::{backfill, run_catch_up};
use crate::store::Store;

#[derive(Debug, Default)]
pub struct StartupOutcome {
    /// Legacy templates that received an initial cursor this run.
    pub backfilled: usize,
    /// Occurrences materialized this run.
    pub created: usize,
    /// Templates whose batch failed and will be retried next run.
    pub failed: usize,
}

impl StartupOutcome {
    /// Whether a reader holding a cached transaction view should reload it.
    pub fn needs_refresh(&self) -> bool {
        self.created > 0
    }
}

/// Run the recurrence engine once, at process start, before the transaction
/// list is first read: backfill cursors onto legacy templates, then catch up
/// every due template. Safe to invoke on every launch.
pub fn run_startup<S: Store>(store: &mut S, now: i64) -> Result<StartupOutcome> {
    let backfilled = backfill(store, now)?;
    let catch_up = run_catch_up(store, now)?;
    Ok(StartupOutcome {
        backfilled,
        created: catch_up.created,
        failed: catch_up.failed,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{get_connection, init_db};
    use crate::schedule::DAY_MS;
    use crate::store::SqliteStore;

    const NOW: i64 = 1_750_000_000_000;

    fn test_store() -> (tempfile::TempDir, SqliteStore) {
        let dir = tempfile::tempdir().unwrap();
        let conn = get_connection(&dir.path().join("test.db")).unwrap();
        init_db(&conn).unwrap();
        (dir, SqliteStore::new(conn))
    }

    fn insert_template(store: &SqliteStore, frequency: &str, date: i64, cursor: Option<i64>) {
        store
            .conn()
            .execute(
                "INSERT INTO transactions \
                 (amount, description, date, is_recurring_template, recurring_frequency, \
                  next_occurrence_cursor, created_at, updated_at) \
                 VALUES (-10.0, 'Template', ?1, 1, ?2, ?3, ?1, ?1)",
                rusqlite::params![date, frequency, cursor],
            )
            .unwrap();
    }

    #[test]
    fn test_startup_backfills_before_catching_up() {
        let (_dir, mut store) = test_store();
        // Legacy row: gets a cursor past now, so it materializes nothing.
        insert_template(&store, "weekly", NOW - 50 * DAY_MS, None);
        // Seeded row two days behind: catches up normally.
        insert_template(&store, "daily", NOW - 2 * DAY_MS, Some(NOW - 2 * DAY_MS));

        let outcome = run_startup(&mut store, NOW).unwrap();
        assert_eq!(outcome.backfilled, 1);
        assert_eq!(outcome.created, 3);
        assert!(outcome.needs_refresh());
    }

    #[test]
    fn test_startup_is_a_noop_when_nothing_is_due() {
        let (_dir, mut store) = test_store();
        insert_template(&store, "monthly", NOW + 5 * DAY_MS, Some(NOW + 5 * DAY_MS));

        let outcome = run_startup(&mut store, NOW).unwrap();
        assert_eq!(outcome.backfilled, 0);
        assert_eq!(outcome.created, 0);
        assert!(!outcome.needs_refresh());
    }

    #[test]
    fn test_immediate_rerun_needs_no_refresh() {
        let (_dir, mut store) = test_store();
        insert_template(&store, "daily", NOW - DAY_MS, Some(NOW - DAY_MS));

        let first = run_startup(&mut store, NOW).unwrap();
        assert!(first.needs_refresh());
        let second = run_startup(&mut store, NOW).unwrap();
        assert!(!second.needs_refresh());
    }
}
