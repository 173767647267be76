use sysinfo::{
    CpuRefreshKind, Disks, MemoryRefreshKind, Networks, ProcessRefreshKind, RefreshKind, System,
};

use crate::error::Result;

use super::gpu::{detect_gpu_provider, GpuProvider};
use super::metrics::{GpuReading, MetricsSnapshot};

const BYTES_PER_GB: f64 = 1024.0 * 1024.0 * 1024.0;
const BYTES_PER_MB: f64 = 1024.0 * 1024.0;

/// Configuration for metrics collection
#[derive(Debug, Clone)]
pub struct CollectorConfig {
    pub collect_gpu: bool,
    pub collect_disks: bool,
    pub collect_network: bool,
    /// Track per-process disk I/O to derive tick-level disk activity
    pub collect_disk_io: bool,
}

impl Default for CollectorConfig {
    fn default() -> Self {
        Self {
            collect_gpu: true,
            collect_disks: true,
            collect_network: true,
            collect_disk_io: true,
        }
    }
}

/// Source of per-tick snapshots.
///
/// The production implementation reads the OS through `sysinfo`; tests
/// substitute canned or failing sources to drive the pipeline.
pub trait MetricsSource: Send {
    fn collect(&mut self) -> Result<MetricsSnapshot>;
}

/// Collects raw utilization counters from the operating system.
///
/// Every subsystem degrades independently: a missing frequency sensor or
/// absent GPU shows up as `None`/empty in the snapshot, never as a failed
/// tick. Only a broken refresh of the core System counters is an error.
pub struct MetricsCollector {
    system: System,
    disks: Disks,
    networks: Networks,
    gpu_provider: Option<Box<dyn GpuProvider>>,
    config: CollectorConfig,
}

impl MetricsCollector {
    /// Create a new MetricsCollector with default configuration
    pub fn new() -> Self {
        Self::with_config(CollectorConfig::default())
    }

    /// Create a new MetricsCollector with custom configuration
    pub fn with_config(config: CollectorConfig) -> Self {
        let mut refresh_kind = RefreshKind::nothing()
            .with_cpu(CpuRefreshKind::everything())
            .with_memory(MemoryRefreshKind::everything());

        if config.collect_disk_io {
            refresh_kind =
                refresh_kind.with_processes(ProcessRefreshKind::nothing().with_disk_usage());
        }

        let system = System::new_with_specifics(refresh_kind);
        let disks = Disks::new_with_refreshed_list();
        let networks = Networks::new_with_refreshed_list();

        // GPU detection may fail; that just means no GPU column
        let gpu_provider = if config.collect_gpu {
            match detect_gpu_provider() {
                Ok(provider) => Some(provider),
                Err(e) => {
                    log::debug!("No GPU provider available: {}", e);
                    None
                }
            }
        } else {
            None
        };

        Self {
            system,
            disks,
            networks,
            gpu_provider,
            config,
        }
    }

    /// Collect a snapshot of all configured subsystems
    pub fn collect(&mut self) -> Result<MetricsSnapshot> {
        self.system.refresh_all();

        let mut snapshot = MetricsSnapshot {
            timestamp: chrono::Utc::now().timestamp(),
            hostname: System::host_name(),
            uptime_seconds: System::uptime(),
            ..Default::default()
        };

        self.collect_cpu(&mut snapshot);
        self.collect_memory(&mut snapshot);

        if self.config.collect_disks {
            self.disks.refresh(true);
            self.collect_disks(&mut snapshot);
        }

        if self.config.collect_disk_io {
            snapshot.disk_io_mb = Some(self.collect_disk_io());
        }

        if self.config.collect_network {
            self.networks.refresh(true);
            self.collect_network(&mut snapshot);
        }

        snapshot.gpus = self.collect_gpus();

        Ok(snapshot)
    }

    fn collect_cpu(&self, snapshot: &mut MetricsSnapshot) {
        snapshot.cpu_usage_percent = clamp_percent(self.system.global_cpu_usage() as f64);

        // Some platforms report 0 when no frequency sensor is readable;
        // treat that as unavailable so the power model uses its fallback
        snapshot.cpu_frequency_mhz = self
            .system
            .cpus()
            .first()
            .map(|cpu| cpu.frequency())
            .filter(|&mhz| mhz > 0);
    }

    fn collect_memory(&self, snapshot: &mut MetricsSnapshot) {
        let total = self.system.total_memory();
        let used = self.system.used_memory().min(total);

        snapshot.memory_total_gb = total as f64 / BYTES_PER_GB;
        snapshot.memory_used_gb = used as f64 / BYTES_PER_GB;
        snapshot.memory_percent = if total > 0 {
            clamp_percent(used as f64 / total as f64 * 100.0)
        } else {
            0.0
        };
    }

    fn collect_disks(&self, snapshot: &mut MetricsSnapshot) {
        let mut total_bytes = 0u64;
        let mut used_bytes = 0u64;

        for disk in self.disks.iter() {
            let total = disk.total_space();
            total_bytes += total;
            used_bytes += total.saturating_sub(disk.available_space());
        }

        snapshot.disk_total_gb = total_bytes as f64 / BYTES_PER_GB;
        snapshot.disk_used_gb = used_bytes as f64 / BYTES_PER_GB;
        snapshot.disk_percent = if total_bytes > 0 {
            clamp_percent(used_bytes as f64 / total_bytes as f64 * 100.0)
        } else {
            0.0
        };
    }

    /// Sum of per-process read+write volume since the previous refresh
    fn collect_disk_io(&self) -> f64 {
        let bytes: u64 = self
            .system
            .processes()
            .values()
            .map(|proc| {
                let usage = proc.disk_usage();
                usage.read_bytes + usage.written_bytes
            })
            .sum();

        bytes as f64 / BYTES_PER_MB
    }

    fn collect_network(&self, snapshot: &mut MetricsSnapshot) {
        let mut received = 0u64;
        let mut sent = 0u64;

        for data in self.networks.values() {
            received += data.total_received();
            sent += data.total_transmitted();
        }

        snapshot.network_received_mb = received as f64 / BYTES_PER_MB;
        snapshot.network_sent_mb = sent as f64 / BYTES_PER_MB;
    }

    fn collect_gpus(&mut self) -> Vec<GpuReading> {
        let Some(provider) = self.gpu_provider.as_mut() else {
            return Vec::new();
        };

        match provider.read() {
            Ok(readings) => readings,
            Err(e) => {
                log::warn!("GPU read failed: {}", e);
                Vec::new()
            }
        }
    }
}

impl Default for MetricsCollector {
    fn default() -> Self {
        Self::new()
    }
}

impl MetricsSource for MetricsCollector {
    fn collect(&mut self) -> Result<MetricsSnapshot> {
        MetricsCollector::collect(self)
    }
}

fn clamp_percent(value: f64) -> f64 {
    value.clamp(0.0, 100.0)
}
