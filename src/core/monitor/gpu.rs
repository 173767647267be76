//! GPU readings through NVML.
//!
//! GPU metrics are optional everywhere: a host without a supported GPU (or
//! a build without the `nvml` feature) reports an empty list, never an
//! error at the tick level.

#[cfg(feature = "nvml")]
use nvml_wrapper::{enum_wrappers::device::TemperatureSensor, Nvml};

use super::metrics::GpuReading;
use crate::error::Result;
#[cfg(not(feature = "nvml"))]
use crate::error::EcotopError;

/// Trait for GPU metrics providers
pub trait GpuProvider: Send {
    /// Read current load/memory/temperature for every visible device
    fn read(&mut self) -> Result<Vec<GpuReading>>;
}

/// Detect a working GPU provider, if any.
///
/// Failure here means "no GPU on this host", which callers treat as an
/// absent subsystem rather than an error.
pub fn detect_gpu_provider() -> Result<Box<dyn GpuProvider>> {
    NvmlGpuProvider::new().map(|p| Box::new(p) as Box<dyn GpuProvider>)
}

/// NVIDIA GPU provider backed by NVML
pub struct NvmlGpuProvider {
    #[cfg(feature = "nvml")]
    nvml: Nvml,
}

impl NvmlGpuProvider {
    pub fn new() -> Result<Self> {
        #[cfg(feature = "nvml")]
        {
            let nvml = Nvml::init().map_err(|e| {
                crate::error::EcotopError::gpu_not_available(format!("Failed to init NVML: {}", e))
            })?;
            Ok(Self { nvml })
        }
        #[cfg(not(feature = "nvml"))]
        {
            Err(EcotopError::gpu_not_available(
                "NVIDIA GPU support not enabled",
            ))
        }
    }
}

impl GpuProvider for NvmlGpuProvider {
    fn read(&mut self) -> Result<Vec<GpuReading>> {
        #[cfg(feature = "nvml")]
        {
            let count = self.nvml.device_count().map_err(|e| {
                crate::error::EcotopError::metric_collection(format!(
                    "Failed to enumerate GPUs: {}",
                    e
                ))
            })?;

            let mut readings = Vec::with_capacity(count as usize);
            for index in 0..count {
                let Ok(device) = self.nvml.device_by_index(index) else {
                    continue;
                };

                let name = device
                    .name()
                    .unwrap_or_else(|_| format!("NVIDIA GPU {}", index));

                let load_percent = device
                    .utilization_rates()
                    .map(|u| u.gpu as f64)
                    .unwrap_or(0.0);

                let memory_percent = device
                    .memory_info()
                    .ok()
                    .filter(|m| m.total > 0)
                    .map(|m| (m.used as f64 / m.total as f64) * 100.0)
                    .unwrap_or(0.0);

                let temperature_c = device.temperature(TemperatureSensor::Gpu).ok();

                readings.push(GpuReading {
                    name,
                    load_percent,
                    memory_percent,
                    temperature_c,
                });
            }

            Ok(readings)
        }
        #[cfg(not(feature = "nvml"))]
        {
            Ok(Vec::new())
        }
    }
}
