use rusqlite::Connection;

use crate::error::Result;
use crate::models::{Frequency, NewOccurrence, Template};

/// Persistence gateway consumed by the recurrence engine.
///
/// The engine never touches a connection directly; it is handed an
/// implementation of this trait so tests can substitute doubles and no module
/// holds a hidden global handle.
pub trait Store {
    /// Templates whose cursor is present and at or before `now`. Rows without
    /// a cursor are the backfill pass's problem, not catch-up's.
    fn templates_due_by(&self, now: i64) -> Result<Vec<Template>>;

    /// Templates flagged recurring with a valid frequency but no cursor yet
    /// (rows that predate the cursor column).
    fn templates_missing_cursor(&self) -> Result<Vec<Template>>;

    /// Insert every occurrence and advance the template's cursor in one
    /// atomic transaction, so a crash can never leave occurrences persisted
    /// against a stale cursor. Returns the number of occurrences inserted.
    fn materialize(
        &mut self,
        template_id: i64,
        occurrences: &[NewOccurrence],
        new_cursor: i64,
        updated_at: i64,
    ) -> Result<usize>;

    /// Assign the initial cursor to a legacy template. Only touches rows that
    /// still have no cursor.
    fn set_template_cursor(&mut self, template_id: i64, cursor: i64, updated_at: i64) -> Result<()>;
}

// Selection queries restrict the frequency to the four known values so a
// malformed legacy row can never reach the engine's loop.
const FREQ_GUARD: &str = "recurring_frequency IN ('daily', 'weekly', 'monthly', 'yearly')";

const TEMPLATE_COLUMNS: &str = "id, amount, category_id, description, payment_method, notes, \
     date, recurring_frequency, recurring_end_date, next_occurrence_cursor";

pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    pub fn new(conn: Connection) -> Self {
        Self { conn }
    }

    pub fn conn(&self) -> &Connection {
        &self.conn
    }

    fn select_templates(&self, where_clause: &str, params: &[&dyn rusqlite::ToSql]) -> Result<Vec<Template>> {
        let sql = format!("SELECT {TEMPLATE_COLUMNS} FROM transactions WHERE {where_clause} ORDER BY id");
        let mut stmt = self.conn.prepare(&sql)?;
        let rows: Vec<(i64, f64, Option<i64>, String, Option<String>, Option<String>, i64, String, Option<i64>, Option<i64>)> =
            stmt.query_map(params, |row| {
                Ok((
                    row.get(0)?,
                    row.get(1)?,
                    row.get(2)?,
                    row.get(3)?,
                    row.get(4)?,
                    row.get(5)?,
                    row.get(6)?,
                    row.get(7)?,
                    row.get(8)?,
                    row.get(9)?,
                ))
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        let mut templates = Vec::with_capacity(rows.len());
        for (id, amount, category_id, description, payment_method, notes, date, freq, end_date, cursor) in rows {
            templates.push(Template {
                id,
                amount,
                category_id,
                description,
                payment_method,
                notes,
                date,
                frequency: freq.parse::<Frequency>()?,
                end_date,
                cursor,
            });
        }
        Ok(templates)
    }
}

impl Store for SqliteStore {
    fn templates_due_by(&self, now: i64) -> Result<Vec<Template>> {
        self.select_templates(
            &format!(
                "is_recurring_template = 1 AND {FREQ_GUARD} \
                 AND next_occurrence_cursor IS NOT NULL AND next_occurrence_cursor <= ?1"
            ),
            &[&now],
        )
    }

    fn templates_missing_cursor(&self) -> Result<Vec<Template>> {
        self.select_templates(
            &format!("is_recurring_template = 1 AND {FREQ_GUARD} AND next_occurrence_cursor IS NULL"),
            &[],
        )
    }

    fn materialize(
        &mut self,
        template_id: i64,
        occurrences: &[NewOccurrence],
        new_cursor: i64,
        updated_at: i64,
    ) -> Result<usize> {
        let tx = self.conn.transaction()?;
        let mut inserted = 0usize;
        for occ in occurrences {
            tx.execute(
                "INSERT INTO transactions \
                 (amount, category_id, description, payment_method, notes, date, \
                  is_recurring_template, created_at, updated_at) \
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, 0, ?7, ?7)",
                rusqlite::params![
                    occ.amount,
                    occ.category_id,
                    occ.description,
                    occ.payment_method,
                    occ.notes,
                    occ.date,
                    updated_at,
                ],
            )?;
            inserted += 1;
        }
        // Forward-only: a cursor never rewinds, even if handed a stale value.
        tx.execute(
            "UPDATE transactions SET next_occurrence_cursor = ?1, updated_at = ?2 \
             WHERE id = ?3 AND is_recurring_template = 1 \
             AND (next_occurrence_cursor IS NULL OR next_occurrence_cursor <= ?1)",
            rusqlite::params![new_cursor, updated_at, template_id],
        )?;
        tx.commit()?;
        Ok(inserted)
    }

    fn set_template_cursor(&mut self, template_id: i64, cursor: i64, updated_at: i64) -> Result<()> {
        self.conn.execute(
            "UPDATE transactions SET next_occurrence_cursor = ?1, updated_at = ?2 \
             WHERE id = ?3 AND is_recurring_template = 1 AND next_occurrence_cursor IS NULL",
            rusqlite::params![cursor, updated_at, template_id],
        )?;
        Ok(())
    }
}
