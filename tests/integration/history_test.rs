use ecotop::core::monitor::{HistoryBuffer, HistoryRecord};

fn record(timestamp: i64, facility_watts: f64) -> HistoryRecord {
    HistoryRecord {
        timestamp,
        cpu_usage_percent: 25.0,
        memory_percent: 50.0,
        it_total_watts: facility_watts / 1.5,
        facility_watts,
        hourly_co2_g: facility_watts * 0.4,
    }
}

#[test]
fn test_capacity_holds_for_any_append_sequence() {
    for capacity in [1, 2, 30, 60] {
        let mut history = HistoryBuffer::with_capacity(capacity, 1);
        for i in 0..(capacity as i64 * 3 + 7) {
            history.push(record(i, 20.0));
            assert!(history.len() <= capacity);
        }
    }
}

#[test]
fn test_oldest_record_evicted_after_capacity_plus_one() {
    let capacity = 30;
    let mut history = HistoryBuffer::with_capacity(capacity, 1);

    for i in 0..=(capacity as i64) {
        history.push(record(i, 20.0));
    }

    let timestamps: Vec<i64> = history.iter().map(|r| r.timestamp).collect();
    assert_eq!(timestamps.len(), capacity);
    assert_eq!(timestamps.first(), Some(&1));
    assert_eq!(timestamps.last(), Some(&(capacity as i64)));
    // Relative order preserved
    assert!(timestamps.windows(2).all(|w| w[0] < w[1]));
}

#[test]
fn test_anomaly_flag_matches_threshold_definition() {
    let mut history = HistoryBuffer::with_capacity(60, 10);
    for i in 0..10 {
        history.push(record(i, 20.0 + i as f64)); // mean = 24.5
    }

    let mean = history.mean_facility_watts().unwrap();
    assert!((mean - 24.5).abs() < 1e-9);

    for current in [10.0, 24.5, 31.85, 31.86, 100.0] {
        let expected = current > mean * 1.3;
        assert_eq!(history.power_anomaly(current, 1.3), Some(expected));
    }
}

#[test]
fn test_restart_resets_history_and_anomaly_state() {
    let mut history = HistoryBuffer::with_capacity(60, 10);
    for i in 0..30 {
        history.push(record(i, 20.0));
    }
    assert!(history.power_anomaly(50.0, 1.3).is_some());

    // A fresh buffer is the restart scenario: nothing persists
    let fresh = HistoryBuffer::with_capacity(60, 10);
    assert!(fresh.is_empty());
    assert_eq!(fresh.mean_facility_watts(), None);
    assert_eq!(fresh.power_anomaly(50.0, 1.3), None);
}
