//! Carbon-emissions model.
//!
//! Converts a facility power figure into CO2 mass using a fixed regional
//! grid-emission factor. There is no real-time grid-intensity lookup; the
//! factor is configuration (400 and 500 g/kWh are both in common use).

use serde::{Deserialize, Serialize};

/// CO2 output derived from exactly one facility-watts value.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EmissionsEstimate {
    pub hourly_g: f64,
    pub daily_kg: f64,
    pub annual_tonnes: f64,
}

/// Estimate CO2 emissions for a sustained power draw.
///
/// Total function: any non-negative wattage maps to a valid estimate.
pub fn estimate_emissions(facility_watts: f64, grid_factor_g_per_kwh: f64) -> EmissionsEstimate {
    let hourly_g = (facility_watts / 1000.0) * grid_factor_g_per_kwh;

    EmissionsEstimate {
        hourly_g,
        daily_kg: hourly_g * 24.0 / 1000.0,
        annual_tonnes: hourly_g * 24.0 * 365.0 / 1_000_000.0,
    }
}
