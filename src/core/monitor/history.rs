use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

const DEFAULT_CAPACITY: usize = 60;
const DEFAULT_MIN_SAMPLES: usize = 10;

/// One retained reading per tick: a snapshot subset plus derived figures.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryRecord {
    pub timestamp: i64,
    pub cpu_usage_percent: f64,
    pub memory_percent: f64,
    pub it_total_watts: f64,
    pub facility_watts: f64,
    pub hourly_co2_g: f64,
}

/// Fixed-capacity FIFO window of recent readings (for sparklines and the
/// power-spike check). Oldest record is evicted once capacity is exceeded.
///
/// Owned exclusively by the polling loop; nothing survives a restart.
#[derive(Debug, Clone)]
pub struct HistoryBuffer {
    capacity: usize,
    min_samples: usize,
    records: VecDeque<HistoryRecord>,
}

impl HistoryBuffer {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY, DEFAULT_MIN_SAMPLES)
    }

    pub fn with_capacity(capacity: usize, min_samples: usize) -> Self {
        // A zero minimum would make the mean of an empty window NaN
        Self {
            capacity: capacity.max(1),
            min_samples: min_samples.max(1),
            records: VecDeque::with_capacity(capacity.max(1)),
        }
    }

    pub fn push(&mut self, record: HistoryRecord) {
        if self.records.len() >= self.capacity {
            self.records.pop_front();
        }
        self.records.push_back(record);
    }

    pub fn latest(&self) -> Option<&HistoryRecord> {
        self.records.back()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Whether enough records are retained for the rolling mean to be usable
    pub fn has_enough_samples(&self) -> bool {
        self.records.len() >= self.min_samples
    }

    /// Arithmetic mean of facility watts over retained records.
    ///
    /// `None` until the minimum sample count is reached: "not yet
    /// available", not an error.
    pub fn mean_facility_watts(&self) -> Option<f64> {
        self.mean_by(|r| r.facility_watts)
    }

    fn mean_by(&self, field: impl Fn(&HistoryRecord) -> f64) -> Option<f64> {
        if !self.has_enough_samples() {
            return None;
        }
        let sum: f64 = self.records.iter().map(field).sum();
        Some(sum / self.records.len() as f64)
    }

    /// Instantaneous threshold test: is the given draw more than
    /// `anomaly_factor` times the rolling mean? No smoothing, no
    /// hysteresis; recomputed from scratch every tick.
    pub fn power_anomaly(&self, facility_watts: f64, anomaly_factor: f64) -> Option<bool> {
        self.mean_facility_watts()
            .map(|mean| facility_watts > mean * anomaly_factor)
    }

    /// Facility watts scaled by 10 for the sparkline widget (preserves one
    /// decimal of precision in integer form)
    pub fn facility_series(&self) -> Vec<u64> {
        self.records
            .iter()
            .map(|r| (r.facility_watts.max(0.0) * 10.0) as u64)
            .collect()
    }

    /// CPU usage scaled by 10 for the sparkline widget
    pub fn cpu_series(&self) -> Vec<u64> {
        self.records
            .iter()
            .map(|r| (r.cpu_usage_percent.max(0.0) * 10.0) as u64)
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &HistoryRecord> {
        self.records.iter()
    }
}

impl Default for HistoryBuffer {
    fn default() -> Self {
        Self::new()
    }
}
