//! External checkpoint feed.
//!
//! An operator-supplied tab-separated export of known fixes.  The columns
//! used are `Vehicle_Name`, `Date` (`DD/MM/YYYY`, ISO also accepted), `Time`
//! (`HH:MM:SS`) and `Lat_Lon` (`lat/lon`); anything else is carried but
//! ignored.  Each row stands alone — a malformed one is skipped with a
//! warning and never poisons the rest of the feed.
//!
//! The feed is parsed once into an index owned by the caller and shared
//! read-only across workers.

use std::path::Path;
use std::str::FromStr;

use rustc_hash::FxHashMap;

use vts_agent::Checkpoint;
use vts_core::{Date, Timestamp};

use crate::error::{SimError, SimResult};

/// Checkpoints indexed by `(vehicle name, date)`.
#[derive(Debug, Default)]
pub struct CheckpointFeed {
    index: FxHashMap<(String, Date), Vec<Checkpoint>>,
}

impl CheckpointFeed {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Parse a tab-separated feed file.
    pub fn load(path: &Path) -> SimResult<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(b'\t')
            .flexible(true)
            .from_path(path)?;

        let headers = reader.headers()?.clone();
        let col = |name: &str| headers.iter().position(|h| h == name);
        let (name_col, date_col, time_col, pos_col) =
            match (col("Vehicle_Name"), col("Date"), col("Time"), col("Lat_Lon")) {
                (Some(n), Some(d), Some(t), Some(p)) => (n, d, t, p),
                _ => {
                    return Err(SimError::Config(format!(
                        "checkpoint feed {} is missing required columns",
                        path.display()
                    )));
                }
            };

        let mut index: FxHashMap<(String, Date), Vec<Checkpoint>> = FxHashMap::default();
        let mut skipped = 0usize;
        for (line, row) in reader.records().enumerate() {
            let row = row?;
            match parse_row(&row, name_col, date_col, time_col, pos_col) {
                Some((name, date, checkpoint)) => {
                    index.entry((name, date)).or_default().push(checkpoint);
                }
                None => {
                    skipped += 1;
                    tracing::warn!(line = line + 2, "skipping malformed checkpoint row");
                }
            }
        }
        for events in index.values_mut() {
            events.sort_by_key(|c| c.timestamp);
        }
        tracing::info!(
            keys = index.len(),
            skipped,
            path = %path.display(),
            "checkpoint feed loaded"
        );
        Ok(Self { index })
    }

    /// Checkpoints for one vehicle-day, sorted by timestamp.  Lookup is by
    /// vehicle *name*, the feed's join key.
    pub fn events(&self, vehicle_name: &str, date: Date) -> &[Checkpoint] {
        self.index
            .get(&(vehicle_name.to_owned(), date))
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }
}

fn parse_row(
    row: &csv::StringRecord,
    name_col: usize,
    date_col: usize,
    time_col: usize,
    pos_col: usize,
) -> Option<(String, Date, Checkpoint)> {
    let name = row.get(name_col)?.trim();
    if name.is_empty() {
        return None;
    }
    let date = parse_feed_date(row.get(date_col)?.trim())?;

    let mut hms = row.get(time_col)?.trim().splitn(3, ':');
    let hour: u32 = hms.next()?.parse().ok()?;
    let minute: u32 = hms.next()?.parse().ok()?;
    let second: u32 = hms.next()?.parse().ok()?;
    if hour >= 24 || minute >= 60 || second >= 60 {
        return None;
    }

    let (lat_str, lon_str) = row.get(pos_col)?.trim().split_once('/')?;
    let lat: f64 = lat_str.trim().parse().ok()?;
    let lon: f64 = lon_str.trim().parse().ok()?;
    if !(-90.0..=90.0).contains(&lat) || !(-180.0..=180.0).contains(&lon) {
        return None;
    }

    let checkpoint = Checkpoint {
        timestamp: Timestamp::at(date, hour, minute, second),
        lat,
        lon,
    };
    Some((name.to_owned(), date, checkpoint))
}

/// Feed dates come as `DD/MM/YYYY`; ISO `YYYY-MM-DD` is accepted too.
fn parse_feed_date(s: &str) -> Option<Date> {
    if let Some((d, rest)) = s.split_once('/') {
        let (m, y) = rest.split_once('/')?;
        let day: u32 = d.parse().ok()?;
        let month: u32 = m.parse().ok()?;
        let year: i32 = y.parse().ok()?;
        if !(1..=12).contains(&month) || !(1..=31).contains(&day) {
            return None;
        }
        return Some(Date::new(year, month, day));
    }
    Date::from_str(s).ok()
}
