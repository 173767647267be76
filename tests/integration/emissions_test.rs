use ecotop::core::monitor::estimate_emissions;

#[test]
fn test_reference_scenario() {
    let emissions = estimate_emissions(24.3, 400.0);

    assert!((emissions.hourly_g - 9.72).abs() < 1e-9);
    assert!((emissions.daily_kg - 0.23328).abs() < 1e-6);
    assert!((emissions.annual_tonnes - 0.0851472).abs() < 1e-6);
}

#[test]
fn test_daily_and_annual_are_exact_scalings_of_hourly() {
    for watts in [0.0, 0.1, 24.3, 150.0, 3000.0] {
        for factor in [400.0, 500.0] {
            let emissions = estimate_emissions(watts, factor);

            assert!((emissions.daily_kg - emissions.hourly_g * 24.0 / 1000.0).abs() < 1e-12);
            assert!(
                (emissions.annual_tonnes - emissions.hourly_g * 8760.0 / 1_000_000.0).abs()
                    < 1e-12
            );
        }
    }
}
