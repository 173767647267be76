//! Power-draw model.
//!
//! Maps a metrics snapshot to a component-wise power estimate using fixed
//! linear coefficients plus a facility-level PUE multiplier. The model is a
//! total function: optional inputs fall back to documented defaults and no
//! snapshot can make it fail.

use serde::{Deserialize, Serialize};

use super::metrics::MetricsSnapshot;

/// Coefficients for the power model.
///
/// These are configuration defaults, not measured ground truth: published
/// estimates for the same hardware class disagree (10 vs 15 W per busy GHz,
/// 0.3 vs 0.5 W/GB, PUE 1.2 vs 1.5). Validate against a real power meter
/// before trusting absolute numbers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PowerProfile {
    /// Watts drawn by a fully-busy core-GHz
    pub cpu_coefficient_w: f64,
    /// Assumed clock when the frequency sensor is unreadable
    pub cpu_frequency_fallback_ghz: f64,
    /// Watts per GB of resident memory
    pub memory_w_per_gb: f64,
    /// Disk draw while I/O is active
    pub disk_active_w: f64,
    /// Disk draw at rest
    pub disk_idle_w: f64,
    /// Power Usage Effectiveness: facility watts per IT watt
    pub pue: f64,
}

impl Default for PowerProfile {
    fn default() -> Self {
        Self {
            cpu_coefficient_w: 15.0,
            cpu_frequency_fallback_ghz: 2.5,
            memory_w_per_gb: 0.5,
            disk_active_w: 2.0,
            disk_idle_w: 0.5,
            pue: 1.5,
        }
    }
}

/// Component-wise power estimate derived from exactly one snapshot.
///
/// Values keep full precision; display layers round to one decimal.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PowerEstimate {
    pub cpu_watts: f64,
    pub memory_watts: f64,
    pub disk_watts: f64,
    pub it_total_watts: f64,
    pub facility_watts: f64,
    pub pue: f64,
}

/// Estimate power draw from a metrics snapshot.
pub fn estimate_power(profile: &PowerProfile, snapshot: &MetricsSnapshot) -> PowerEstimate {
    let freq_ghz = snapshot
        .cpu_frequency_ghz()
        .unwrap_or(profile.cpu_frequency_fallback_ghz);

    let cpu_watts = (snapshot.cpu_usage_percent / 100.0) * freq_ghz * profile.cpu_coefficient_w;

    // Linear in resident GB with a small utilization-fraction bonus
    let memory_watts = snapshot.memory_used_gb
        * profile.memory_w_per_gb
        * (snapshot.memory_percent / 100.0 + 0.1);

    // Two-level step, not a continuous function of load. Fall back to the
    // fill level when I/O accounting is unavailable.
    let disk_active = match snapshot.disk_io_mb {
        Some(io_mb) => io_mb > 0.0,
        None => snapshot.disk_percent > 50.0,
    };
    let disk_watts = if disk_active {
        profile.disk_active_w
    } else {
        profile.disk_idle_w
    };

    let it_total_watts = cpu_watts + memory_watts + disk_watts;
    let facility_watts = it_total_watts * profile.pue;

    PowerEstimate {
        cpu_watts,
        memory_watts,
        disk_watts,
        it_total_watts,
        facility_watts,
        pue: profile.pue,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot() -> MetricsSnapshot {
        MetricsSnapshot {
            cpu_usage_percent: 50.0,
            cpu_frequency_mhz: Some(2000),
            memory_used_gb: 4.0,
            memory_total_gb: 16.0,
            memory_percent: 25.0,
            disk_io_mb: Some(0.0),
            ..Default::default()
        }
    }

    #[test]
    fn test_reference_values() {
        let power = estimate_power(&PowerProfile::default(), &snapshot());

        // 0.5 * 2.0GHz * 15W
        assert!((power.cpu_watts - 15.0).abs() < 1e-9);
        // 4GB * 0.5W/GB * (0.25 + 0.1)
        assert!((power.memory_watts - 0.7).abs() < 1e-9);
        assert!((power.disk_watts - 0.5).abs() < 1e-9);
        assert!((power.it_total_watts - 16.2).abs() < 1e-9);
        assert!((power.facility_watts - 24.3).abs() < 1e-9);
    }

    #[test]
    fn test_idle_snapshot_draws_disk_idle_only() {
        let idle = MetricsSnapshot {
            cpu_usage_percent: 0.0,
            memory_used_gb: 0.0,
            memory_percent: 0.0,
            disk_io_mb: Some(0.0),
            ..Default::default()
        };

        let power = estimate_power(&PowerProfile::default(), &idle);
        assert_eq!(power.cpu_watts, 0.0);
        assert_eq!(power.memory_watts, 0.0);
        assert_eq!(power.it_total_watts, power.disk_watts);
        assert_eq!(power.disk_watts, 0.5);
    }

    #[test]
    fn test_frequency_fallback_never_fails() {
        let mut snap = snapshot();
        snap.cpu_frequency_mhz = None;

        let power = estimate_power(&PowerProfile::default(), &snap);
        // 0.5 * 2.5GHz fallback * 15W
        assert!((power.cpu_watts - 18.75).abs() < 1e-9);
    }

    #[test]
    fn test_cpu_watts_monotone_in_usage() {
        let profile = PowerProfile::default();
        let mut previous = -1.0;

        for usage in [0.0, 10.0, 25.0, 50.0, 75.0, 100.0] {
            let mut snap = snapshot();
            snap.cpu_usage_percent = usage;
            let power = estimate_power(&profile, &snap);
            assert!(power.cpu_watts >= previous);
            previous = power.cpu_watts;
        }
    }

    #[test]
    fn test_disk_step_uses_fill_level_without_io() {
        let profile = PowerProfile::default();

        let mut snap = snapshot();
        snap.disk_io_mb = None;
        snap.disk_percent = 80.0;
        assert_eq!(estimate_power(&profile, &snap).disk_watts, 2.0);

        snap.disk_percent = 20.0;
        assert_eq!(estimate_power(&profile, &snap).disk_watts, 0.5);

        snap.disk_io_mb = Some(12.5);
        assert_eq!(estimate_power(&profile, &snap).disk_watts, 2.0);
    }

    #[test]
    fn test_facility_dominates_it_when_pue_above_one() {
        let mut profile = PowerProfile::default();
        for pue in [1.0, 1.2, 1.5, 2.0] {
            profile.pue = pue;
            let power = estimate_power(&profile, &snapshot());
            assert!(power.facility_watts >= power.it_total_watts);
        }
    }
}
