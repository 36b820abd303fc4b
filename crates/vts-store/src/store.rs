//! The partitioned telemetry store.

use std::fs;
use std::path::{Path, PathBuf};

use vts_agent::TelemetryRecord;
use vts_core::Date;

use crate::error::{StoreError, StoreResult};

/// Persists telemetry as one CSV partition per vehicle per day.
pub struct TelemetryStore {
    base_dir: PathBuf,
    telemetry_dir: PathBuf,
}

impl TelemetryStore {
    /// Open a store rooted at `base_dir`, creating the directory tree.
    pub fn new(base_dir: impl Into<PathBuf>) -> StoreResult<Self> {
        let base_dir = base_dir.into();
        let telemetry_dir = base_dir.join("telemetry");
        fs::create_dir_all(&telemetry_dir)?;
        Ok(Self { base_dir, telemetry_dir })
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Path of the partition for one vehicle-day.
    pub fn partition_path(&self, vehicle_id: &str, date: Date) -> PathBuf {
        self.telemetry_dir
            .join(format!("year={:04}", date.year))
            .join(format!("month={:02}", date.month))
            .join(format!("{vehicle_id}_{date}.csv"))
    }

    /// Merge `records` into the vehicle-day partition.
    ///
    /// Existing rows are read back and the union is sorted by timestamp.
    /// An incoming row with the same timestamp as a stored one replaces it,
    /// so re-running a simulation day rewrites the partition instead of
    /// duplicating it.
    pub fn write_day(
        &self,
        vehicle_id: &str,
        date: Date,
        records: &[TelemetryRecord],
    ) -> StoreResult<PathBuf> {
        let path = self.partition_path(vehicle_id, date);
        if records.is_empty() {
            return Ok(path);
        }
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let mut merged = if path.exists() { read_partition(&path)? } else { Vec::new() };
        merged.extend_from_slice(records);
        merged.sort_by_key(|r| r.timestamp);
        // Stable sort keeps incoming rows after stored ones at equal
        // timestamps; keeping the last of each run makes the new row win.
        merged.reverse();
        merged.dedup_by_key(|r| r.timestamp);
        merged.reverse();

        let mut writer = csv::Writer::from_path(&path)?;
        for record in &merged {
            writer.serialize(record)?;
        }
        writer.flush()?;
        tracing::debug!(vehicle_id, %date, rows = merged.len(), "partition written");
        Ok(path)
    }

    /// Read one vehicle-day back, sorted by timestamp.
    pub fn read_day(&self, vehicle_id: &str, date: Date) -> StoreResult<Vec<TelemetryRecord>> {
        let path = self.partition_path(vehicle_id, date);
        if !path.exists() {
            return Err(StoreError::MissingPartition {
                vehicle_id: vehicle_id.to_owned(),
                date,
            });
        }
        let mut records = read_partition(&path)?;
        records.sort_by_key(|r| r.timestamp);
        Ok(records)
    }
}

fn read_partition(path: &Path) -> StoreResult<Vec<TelemetryRecord>> {
    let mut reader = csv::Reader::from_path(path)?;
    let mut records = Vec::new();
    for row in reader.deserialize() {
        records.push(row?);
    }
    Ok(records)
}
