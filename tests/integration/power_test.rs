use ecotop::core::monitor::{estimate_power, MetricsSnapshot, PowerProfile};

fn reference_snapshot() -> MetricsSnapshot {
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
fn test_reference_scenario_component_watts() {
    let power = estimate_power(&PowerProfile::default(), &reference_snapshot());

    assert!((power.cpu_watts - 15.0).abs() < 1e-9);
    assert!((power.memory_watts - 0.7).abs() < 1e-9);
    assert!((power.disk_watts - 0.5).abs() < 1e-9);
    assert!((power.it_total_watts - 16.2).abs() < 1e-9);
    assert!((power.facility_watts - 24.3).abs() < 1e-9);
}

#[test]
fn test_components_are_never_negative() {
    let profile = PowerProfile::default();

    for cpu in [0.0, 50.0, 100.0] {
        for mem_gb in [0.0, 4.0, 64.0] {
            let snapshot = MetricsSnapshot {
                cpu_usage_percent: cpu,
                memory_used_gb: mem_gb,
                memory_percent: 50.0,
                ..Default::default()
            };
            let power = estimate_power(&profile, &snapshot);

            assert!(power.cpu_watts >= 0.0);
            assert!(power.memory_watts >= 0.0);
            assert!(power.disk_watts > 0.0);
            assert!(
                (power.it_total_watts
                    - (power.cpu_watts + power.memory_watts + power.disk_watts))
                    .abs()
                    < 1e-9
            );
        }
    }
}

#[test]
fn test_increasing_cpu_usage_never_decreases_cpu_watts() {
    let profile = PowerProfile::default();
    let mut previous = f64::NEG_INFINITY;

    for usage in (0..=100).step_by(5) {
        let snapshot = MetricsSnapshot {
            cpu_usage_percent: usage as f64,
            cpu_frequency_mhz: Some(3200),
            ..Default::default()
        };
        let power = estimate_power(&profile, &snapshot);
        assert!(power.cpu_watts >= previous);
        previous = power.cpu_watts;
    }
}

#[test]
fn test_alternate_profile_coefficients() {
    // The lower-power variant observed in the wild: 10 W/GHz, 0.3 W/GB, PUE 1.2
    let profile = PowerProfile {
        cpu_coefficient_w: 10.0,
        memory_w_per_gb: 0.3,
        pue: 1.2,
        ..Default::default()
    };

    let power = estimate_power(&profile, &reference_snapshot());
    assert!((power.cpu_watts - 10.0).abs() < 1e-9);
    assert!((power.memory_watts - 0.42).abs() < 1e-9);
    assert!((power.facility_watts - power.it_total_watts * 1.2).abs() < 1e-9);
}
