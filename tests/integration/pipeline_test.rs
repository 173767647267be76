use ecotop::core::monitor::{
    estimate_emissions, estimate_power, CollectorConfig, MetricsSnapshot, MetricsSource, Monitor,
    PowerProfile, TickUpdate,
};
use ecotop::core::Config;
use ecotop::EcotopError;

#[test]
fn test_end_to_end_reference_scenario() {
    let snapshot = MetricsSnapshot {
        cpu_usage_percent: 50.0,
        cpu_frequency_mhz: Some(2000),
        memory_used_gb: 4.0,
        memory_total_gb: 16.0,
        memory_percent: 25.0,
        disk_io_mb: Some(0.0),
        ..Default::default()
    };

    let power = estimate_power(&PowerProfile::default(), &snapshot);
    let emissions = estimate_emissions(power.facility_watts, 400.0);

    assert!((power.facility_watts - 24.3).abs() < 1e-9);
    assert!((emissions.hourly_g - 9.72).abs() < 1e-9);
    assert!((emissions.daily_kg - 0.23328).abs() < 1e-6);
    assert!((emissions.annual_tonnes - 0.0851472).abs() < 1e-6);
}

#[test]
fn test_live_tick_produces_consistent_report() {
    let config = Config {
        min_samples: 1,
        ..Default::default()
    };
    let collector_config = CollectorConfig {
        collect_gpu: false,
        ..Default::default()
    };
    let mut monitor = Monitor::new(&config, collector_config);

    std::thread::sleep(sysinfo::MINIMUM_CPU_UPDATE_INTERVAL);

    match monitor.tick() {
        TickUpdate::Report(report) => {
            let power = &report.power;
            assert!(
                (power.it_total_watts
                    - (power.cpu_watts + power.memory_watts + power.disk_watts))
                    .abs()
                    < 1e-9
            );
            assert!(power.facility_watts >= power.it_total_watts);
            assert!(
                (report.emissions.hourly_g - power.facility_watts / 1000.0 * 400.0).abs() < 1e-9
            );
            assert_eq!(monitor.history().len(), 1);
        }
        other => panic!("expected a tick report, got {:?}", other),
    }
}

struct FailingSource;

impl MetricsSource for FailingSource {
    fn collect(&mut self) -> ecotop::Result<MetricsSnapshot> {
        Err(EcotopError::metric_collection("counters unavailable"))
    }
}

/// Fails on the first read, then delivers a fixed snapshot.
struct RecoveringSource {
    reads: u32,
}

impl MetricsSource for RecoveringSource {
    fn collect(&mut self) -> ecotop::Result<MetricsSnapshot> {
        self.reads += 1;
        if self.reads == 1 {
            return Err(EcotopError::metric_collection("transient fault"));
        }
        Ok(MetricsSnapshot {
            timestamp: 1_700_000_000 + self.reads as i64,
            cpu_usage_percent: 10.0,
            memory_used_gb: 2.0,
            memory_total_gb: 8.0,
            memory_percent: 25.0,
            disk_io_mb: Some(0.0),
            ..Default::default()
        })
    }
}

#[test]
fn test_failed_tick_reports_failure_and_keeps_history_empty() {
    let mut monitor = Monitor::with_source(Box::new(FailingSource), &Config::default());

    for _ in 0..3 {
        match monitor.tick() {
            TickUpdate::CollectionFailed { error, .. } => {
                assert!(error.contains("counters unavailable"));
            }
            other => panic!("expected a collection failure, got {:?}", other),
        }
    }
    assert!(monitor.history().is_empty());
}

#[test]
fn test_pipeline_recovers_after_failed_tick() {
    let mut monitor = Monitor::with_source(
        Box::new(RecoveringSource { reads: 0 }),
        &Config::default(),
    );

    assert!(matches!(
        monitor.tick(),
        TickUpdate::CollectionFailed { .. }
    ));
    assert!(monitor.history().is_empty());

    match monitor.tick() {
        TickUpdate::Report(report) => {
            assert!(report.power.it_total_watts > 0.0);
            assert_eq!(monitor.history().len(), 1);
        }
        other => panic!("expected a tick report, got {:?}", other),
    }
}

// The polling loop enforces no timeout on metric acquisition: a hung OS
// call hangs the whole loop. Accepted for a non-critical tool, recorded
// here so the gap stays visible.
#[test]
#[ignore = "missing safeguard: metric acquisition has no timeout"]
fn test_collection_timeout_is_not_enforced() {}
