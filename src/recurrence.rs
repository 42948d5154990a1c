use crate::error::Result;
use crate::models::{NewOccurrence, Template};
use crate::schedule::advance;
use crate::store::Store;

/// Upper bound on occurrences materialized per template per run. A template
/// further behind than this catches up over successive runs rather than
/// flooding one run with unbounded work.
pub const MAX_PER_TEMPLATE: usize = 60;

#[derive(Debug, Default)]
pub struct CatchUpOutcome {
    /// Occurrences actually persisted across all templates.
    pub created: usize,
    /// Templates whose batch committed (possibly with zero occurrences).
    pub processed: usize,
    /// Templates whose batch failed to persist; their cursors are untouched
    /// and they remain due for the next run.
    pub failed: usize,
}

struct TemplatePlan {
    occurrences: Vec<NewOccurrence>,
    cursor: i64,
}

/// Walk the cursor forward from its stored position, collecting one
/// occurrence per step, until it passes `now`, passes the end date, or hits
/// the per-run cap. The end date is inclusive: an occurrence landing exactly
/// on it is still generated.
fn plan_template(template: &Template, now: i64) -> TemplatePlan {
    // Due selection guarantees a cursor; the template's own date is its
    // first due date, so it doubles as the fallback.
    let mut cursor = template.cursor.unwrap_or(template.date);
    let mut occurrences = Vec::new();

    while cursor <= now && occurrences.len() < MAX_PER_TEMPLATE {
        if template.end_date.is_some_and(|end| cursor > end) {
            break;
        }
        occurrences.push(template.occurrence_on(cursor));
        cursor = advance(cursor, template.frequency);
    }

    TemplatePlan { occurrences, cursor }
}

/// Materialize every occurrence that has come due since the last run.
///
/// Each due template is handled independently: its overdue occurrences and
/// advanced cursor are computed in memory, then persisted as one atomic
/// batch. A persistence failure for one template leaves its cursor at the
/// pre-run value (it stays due and is retried on the next invocation) and
/// does not stop the remaining templates. The cursor is written once per
/// template per run, even when the loop produced nothing, so the next run
/// resumes from the same point without re-deriving anything.
pub fn run_catch_up<S: Store>(store: &mut S, now: i64) -> Result<CatchUpOutcome> {
    let due = store.templates_due_by(now)?;
    let mut outcome = CatchUpOutcome::default();

    for template in &due {
        let plan = plan_template(template, now);
        match store.materialize(template.id, &plan.occurrences, plan.cursor, now) {
            Ok(inserted) => {
                outcome.created += inserted;
                outcome.processed += 1;
            }
            Err(_) => outcome.failed += 1,
        }
    }

    Ok(outcome)
}

/// Assign an initial cursor to templates that predate the cursor column.
///
/// Walks `advance` from the template's own date to the first due date
/// strictly after `now` and persists it. Nothing is materialized for the
/// elapsed gap; this only establishes where catch-up resumes. Idempotent:
/// once every template has a cursor the selection is empty. Returns the
/// number of templates backfilled.
pub fn backfill<S: Store>(store: &mut S, now: i64) -> Result<usize> {
    let legacy = store.templates_missing_cursor()?;
    for template in &legacy {
        let mut cursor = template.date;
        while cursor <= now {
            cursor = advance(cursor, template.frequency);
        }
        store.set_template_cursor(template.id, cursor, now)?;
    }
    Ok(legacy.len())
}
