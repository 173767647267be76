use ecotop::core::Config;

#[test]
fn test_config_defaults_match_documented_profile() {
    let config = Config::default();

    assert_eq!(config.grid_emission_factor, 400.0);
    assert_eq!(config.polling_interval_seconds, 5);
    assert_eq!(config.history_capacity, 60);
    assert_eq!(config.min_samples, 10);
    assert_eq!(config.anomaly_factor, 1.3);
    assert_eq!(config.power.cpu_coefficient_w, 15.0);
    assert_eq!(config.power.cpu_frequency_fallback_ghz, 2.5);
    assert_eq!(config.power.memory_w_per_gb, 0.5);
    assert_eq!(config.power.pue, 1.5);
}

#[test]
fn test_config_json_round_trip() {
    let mut config = Config::default();
    config.set_value("grid-emission-factor", "500").unwrap();
    config.set_value("cpu-coefficient-w", "10").unwrap();

    let json = serde_json::to_string_pretty(&config).unwrap();
    let restored: Config = serde_json::from_str(&json).unwrap();

    assert_eq!(restored.grid_emission_factor, 500.0);
    assert_eq!(restored.power.cpu_coefficient_w, 10.0);
    assert_eq!(restored.history_capacity, config.history_capacity);
}

#[test]
fn test_corrupt_file_content_falls_back_to_defaults() {
    use std::io::Write;

    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "{{ not json at all").unwrap();

    let data = std::fs::read_to_string(file.path()).unwrap();
    let config: Config = serde_json::from_str(&data).unwrap_or_default();

    assert_eq!(config.grid_emission_factor, 400.0);
}

#[test]
fn test_set_value_validation() {
    let mut config = Config::default();

    assert!(config.set_value("pue", "1.2").is_ok());
    assert!(config.set_value("pue", "0.9").is_err());
    assert!(config.set_value("anomaly-factor", "abc").is_err());
    assert!(config.set_value("unknown-key", "1").is_err());
}
