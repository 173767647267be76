//! Metrics -> power -> emissions derivation pipeline.
//!
//! Raw OS counters are sampled once per tick, mapped to a power estimate
//! and a carbon figure, and retained in a bounded rolling history for
//! trend display and the power-spike flag.

mod collector;
mod emissions;
mod gpu;
mod history;
mod metrics;
mod power;
mod runtime;

pub use collector::{CollectorConfig, MetricsCollector, MetricsSource};
pub use emissions::{estimate_emissions, EmissionsEstimate};
pub use gpu::{detect_gpu_provider, GpuProvider};
pub use history::{HistoryBuffer, HistoryRecord};
pub use metrics::{GpuReading, MetricsSnapshot};
pub use power::{estimate_power, PowerEstimate, PowerProfile};
pub use runtime::{Monitor, MonitorRuntime, ShutdownHandle, TickReport, TickUpdate};
