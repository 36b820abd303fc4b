//! Operational calendar: which dates a fleet drives on.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use serde::Deserialize;

use vts_core::Date;

use crate::error::SimResult;

/// A holiday file entry.  Both published shapes are accepted:
/// `["2023-01-26", …]` and `[{"date": "2023-01-26", …}, …]`.
#[derive(Deserialize)]
#[serde(untagged)]
enum HolidayEntry {
    Plain(Date),
    Tagged {
        date: Date,
    },
}

/// Sundays plus a configured holiday list are non-operational; vehicles sit
/// parked at their depots on those days.
#[derive(Clone, Debug, Default)]
pub struct OperationalCalendar {
    holidays: HashSet<Date>,
}

impl OperationalCalendar {
    /// No holidays; only Sundays are non-operational.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Load a holiday list from a JSON file.
    pub fn load(path: &Path) -> SimResult<Self> {
        let text = fs::read_to_string(path)?;
        let entries: Vec<HolidayEntry> = serde_json::from_str(&text)?;
        let holidays = entries
            .into_iter()
            .map(|e| match e {
                HolidayEntry::Plain(date) | HolidayEntry::Tagged { date } => date,
            })
            .collect();
        Ok(Self { holidays })
    }

    pub fn is_holiday(&self, date: Date) -> bool {
        self.holidays.contains(&date)
    }

    pub fn is_operational(&self, date: Date) -> bool {
        !date.is_sunday() && !self.is_holiday(date)
    }
}
