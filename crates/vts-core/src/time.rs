//! Civil date and timestamp model.
//!
//! # Design
//!
//! The simulation only needs calendar dates (for seeding, partitioning, and
//! the holiday calendar), second-resolution timestamps within a day, and an
//! hour-based shift window.  That is little enough that a dedicated datetime
//! crate buys nothing; dates use the standard days-from-civil algorithm and
//! timestamps are plain Unix seconds.  All arithmetic is integer-exact.

use std::fmt;
use std::str::FromStr;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::CoreError;

pub const SECS_PER_DAY: i64 = 86_400;

// ── Date ─────────────────────────────────────────────────────────────────────

/// A proleptic-Gregorian calendar date.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct Date {
    pub year: i32,
    pub month: u32,
    pub day: u32,
}

impl Date {
    pub fn new(year: i32, month: u32, day: u32) -> Self {
        debug_assert!((1..=12).contains(&month) && (1..=31).contains(&day));
        Self { year, month, day }
    }

    /// Days since the Unix epoch (1970-01-01).  Negative before the epoch.
    pub fn to_unix_days(self) -> i64 {
        let y = if self.month <= 2 { self.year as i64 - 1 } else { self.year as i64 };
        let era = if y >= 0 { y } else { y - 399 } / 400;
        let yoe = y - era * 400;
        let mp = if self.month > 2 { self.month - 3 } else { self.month + 9 } as i64;
        let doy = (153 * mp + 2) / 5 + self.day as i64 - 1;
        let doe = yoe * 365 + yoe / 4 - yoe / 100 + doy;
        era * 146_097 + doe - 719_468
    }

    /// Inverse of [`to_unix_days`](Self::to_unix_days).
    pub fn from_unix_days(days: i64) -> Self {
        let z = days + 719_468;
        let era = if z >= 0 { z } else { z - 146_096 } / 146_097;
        let doe = z - era * 146_097;
        let yoe = (doe - doe / 1460 + doe / 36_524 - doe / 146_096) / 365;
        let y = yoe + era * 400;
        let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
        let mp = (5 * doy + 2) / 153;
        let day = (doy - (153 * mp + 2) / 5 + 1) as u32;
        let month = if mp < 10 { mp + 3 } else { mp - 9 } as u32;
        let year = if month <= 2 { y + 1 } else { y } as i32;
        Self { year, month, day }
    }

    /// Day of week, `0 = Sunday .. 6 = Saturday`.
    pub fn weekday(self) -> u32 {
        // 1970-01-01 was a Thursday.
        (self.to_unix_days() + 4).rem_euclid(7) as u32
    }

    pub fn is_sunday(self) -> bool {
        self.weekday() == 0
    }

    /// The following calendar day.
    pub fn succ(self) -> Date {
        Date::from_unix_days(self.to_unix_days() + 1)
    }

    /// Iterate the inclusive date range `[self, last]` in calendar order.
    pub fn range_inclusive(self, last: Date) -> impl Iterator<Item = Date> {
        (self.to_unix_days()..=last.to_unix_days()).map(Date::from_unix_days)
    }
}

impl FromStr for Date {
    type Err = CoreError;

    /// Parse an ISO `YYYY-MM-DD` date.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bad = || CoreError::Parse(format!("invalid date {s:?}, expected YYYY-MM-DD"));
        let mut parts = s.splitn(3, '-');
        let year: i32 = parts.next().and_then(|p| p.parse().ok()).ok_or_else(bad)?;
        let month: u32 = parts.next().and_then(|p| p.parse().ok()).ok_or_else(bad)?;
        let day: u32 = parts.next().and_then(|p| p.parse().ok()).ok_or_else(bad)?;
        if !(1..=12).contains(&month) || !(1..=31).contains(&day) {
            return Err(bad());
        }
        Ok(Date::new(year, month, day))
    }
}

impl fmt::Display for Date {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}-{:02}", self.year, self.month, self.day)
    }
}

impl Serialize for Date {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Date {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(|e: CoreError| D::Error::custom(e.to_string()))
    }
}

// ── Timestamp ─────────────────────────────────────────────────────────────────

/// Unix seconds.  The simulation treats all times as naive local time; no
/// timezone conversion happens anywhere.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[derive(Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(pub i64);

impl Timestamp {
    /// Midnight at the start of `date`.
    pub fn at_midnight(date: Date) -> Self {
        Timestamp(date.to_unix_days() * SECS_PER_DAY)
    }

    /// `date` plus a second-of-day offset.
    pub fn at(date: Date, hour: u32, minute: u32, second: u32) -> Self {
        Timestamp(
            date.to_unix_days() * SECS_PER_DAY
                + (hour as i64) * 3600
                + (minute as i64) * 60
                + second as i64,
        )
    }

    pub fn date(self) -> Date {
        Date::from_unix_days(self.0.div_euclid(SECS_PER_DAY))
    }

    /// Seconds since midnight of the timestamp's own day.
    #[inline]
    pub fn second_of_day(self) -> u32 {
        self.0.rem_euclid(SECS_PER_DAY) as u32
    }

    #[inline]
    pub fn hour(self) -> u32 {
        self.second_of_day() / 3600
    }

    #[inline]
    pub fn minute(self) -> u32 {
        (self.second_of_day() % 3600) / 60
    }

    #[inline]
    pub fn second(self) -> u32 {
        self.second_of_day() % 60
    }

    #[inline]
    pub fn plus_secs(self, secs: i64) -> Timestamp {
        Timestamp(self.0 + secs)
    }

    #[inline]
    pub fn plus_minutes(self, minutes: i64) -> Timestamp {
        Timestamp(self.0 + minutes * 60)
    }

    /// Whole seconds elapsed from `earlier` to `self` (may be negative).
    #[inline]
    pub fn since(self, earlier: Timestamp) -> i64 {
        self.0 - earlier.0
    }

    /// Compact `HHMMSS.mmm` time-of-day used by the tracker text export.
    pub fn compact_time(self) -> String {
        format!("{:02}{:02}{:02}.000", self.hour(), self.minute(), self.second())
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {:02}:{:02}:{:02}",
            self.date(),
            self.hour(),
            self.minute(),
            self.second()
        )
    }
}

// ── ShiftWindow ───────────────────────────────────────────────────────────────

/// The hour range during which a vehicle drives and emits telemetry.
/// Half-open: a vehicle is on shift for hours in `[start_hour, end_hour)`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShiftWindow {
    pub start_hour: u32,
    pub end_hour: u32,
}

impl ShiftWindow {
    pub fn new(start_hour: u32, end_hour: u32) -> Self {
        Self { start_hour, end_hour }
    }

    #[inline]
    pub fn contains(self, hour: u32) -> bool {
        self.start_hour <= hour && hour < self.end_hour
    }

    /// `true` if the window is well-formed (`start < end <= 24`).
    pub fn is_valid(self) -> bool {
        self.start_hour < self.end_hour && self.end_hour <= 24
    }
}
