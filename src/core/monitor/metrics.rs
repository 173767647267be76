use serde::{Deserialize, Serialize};

/// Raw resource-utilization snapshot captured once per tick.
///
/// Percent fields are clamped to [0, 100] at the collection boundary and
/// the snapshot is never mutated after creation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MetricsSnapshot {
    pub timestamp: i64, // Unix timestamp
    /// Reported host name; absent when the OS query fails
    pub hostname: Option<String>,
    pub uptime_seconds: u64,
    pub cpu_usage_percent: f64,
    /// Current CPU frequency; absent on platforms without a readable sensor
    pub cpu_frequency_mhz: Option<u64>,
    pub memory_used_gb: f64,
    pub memory_total_gb: f64,
    pub memory_percent: f64,
    pub disk_used_gb: f64,
    pub disk_total_gb: f64,
    pub disk_percent: f64,
    /// Disk read+write volume observed this tick; absent when process
    /// accounting is disabled
    pub disk_io_mb: Option<f64>,
    pub network_sent_mb: f64,
    pub network_received_mb: f64,
    /// Empty when no GPU was detected
    pub gpus: Vec<GpuReading>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GpuReading {
    pub name: String,
    pub load_percent: f64,
    pub memory_percent: f64,
    pub temperature_c: Option<u32>,
}

impl MetricsSnapshot {
    /// CPU frequency in GHz when the sensor is readable
    pub fn cpu_frequency_ghz(&self) -> Option<f64> {
        self.cpu_frequency_mhz.map(|mhz| mhz as f64 / 1000.0)
    }
}
