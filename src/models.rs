use std::fmt;
use std::str::FromStr;

use crate::error::PennyError;

/// How often a recurring template spawns occurrences.
///
/// Stored as lowercase text in the database. Parsing is the validation
/// boundary: an unrecognized frequency is rejected before a template is ever
/// persisted, so the engine can assume every template it reads carries one of
/// these four variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Frequency {
    Daily,
    Weekly,
    Monthly,
    Yearly,
}

impl Frequency {
    #[allow(dead_code)]
    pub const ALL: [Frequency; 4] = [
        Frequency::Daily,
        Frequency::Weekly,
        Frequency::Monthly,
        Frequency::Yearly,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Frequency::Daily => "daily",
            Frequency::Weekly => "weekly",
            Frequency::Monthly => "monthly",
            Frequency::Yearly => "yearly",
        }
    }
}

impl FromStr for Frequency {
    type Err = PennyError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "daily" => Ok(Frequency::Daily),
            "weekly" => Ok(Frequency::Weekly),
            "monthly" => Ok(Frequency::Monthly),
            "yearly" => Ok(Frequency::Yearly),
            other => Err(PennyError::InvalidFrequency(other.to_string())),
        }
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[allow(dead_code)]
#[derive(Debug, Clone)]
pub struct Category {
    pub id: i64,
    pub name: String,
    pub category_type: String,
    pub is_active: bool,
}

/// A transaction row flagged as a recurring template, with its recurrence
/// columns parsed. All timestamps are milliseconds since the Unix epoch.
#[derive(Debug, Clone)]
pub struct Template {
    pub id: i64,
    pub amount: f64,
    pub category_id: Option<i64>,
    pub description: String,
    pub payment_method: Option<String>,
    pub notes: Option<String>,
    /// The template's own date, i.e. its first due date. Backfill starts here.
    pub date: i64,
    pub frequency: Frequency,
    /// Inclusive: an occurrence landing exactly on the end date is generated.
    pub end_date: Option<i64>,
    /// Next due date. `None` on legacy rows until backfill runs.
    pub cursor: Option<i64>,
}

/// A concrete occurrence ready for insert, before an id is assigned.
#[derive(Debug, Clone)]
pub struct NewOccurrence {
    pub amount: f64,
    pub category_id: Option<i64>,
    pub description: String,
    pub payment_method: Option<String>,
    pub notes: Option<String>,
    pub date: i64,
}

impl Template {
    /// Copy the template's financial fields into an occurrence dated `date`.
    /// The occurrence is never itself a template.
    pub fn occurrence_on(&self, date: i64) -> NewOccurrence {
        NewOccurrence {
            amount: self.amount,
            category_id: self.category_id,
            description: self.description.clone(),
            payment_method: self.payment_method.clone(),
            notes: self.notes.clone(),
            date,
        }
    }
}
