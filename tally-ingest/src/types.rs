use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Tokenized CSV line; fields carry no meaning until mapped by a `ColumnMap`.
pub type RawRow = Vec<String>;

/// What to do with a row whose date field is empty.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MissingDate {
    /// Book the row on the current UTC day
    #[default]
    Today,
    /// Drop the row
    Discard,
}

impl std::str::FromStr for MissingDate {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "today" => Ok(MissingDate::Today),
            "discard" => Ok(MissingDate::Discard),
            other => Err(format!("unknown missing-date policy: {other} (expected today|discard)")),
        }
    }
}

/// Knobs for one parse call
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParseOptions {
    pub missing_date: MissingDate,
    /// Overrides "today" for the missing-date fallback; `None` uses the clock
    pub today: Option<NaiveDate>,
}

impl ParseOptions {
    pub fn with_missing_date(mut self, policy: MissingDate) -> Self {
        self.missing_date = policy;
        self
    }

    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = Some(today);
        self
    }
}
