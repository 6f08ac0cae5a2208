//! Integration tests for scenario files and presets.

mod common;

use city_energy_plan::config::ScenarioConfig;
use city_energy_plan::io::export::write_csv;

#[test]
fn shipped_default_scenario_matches_preset() {
    let from_file = ScenarioConfig::from_toml_file(&common::scenario_path("default.toml")).unwrap();
    assert!(from_file.validate().is_empty());
    let preset = ScenarioConfig::default_city();
    assert_eq!(from_file.run().unwrap(), preset.run().unwrap());
}

#[test]
fn zero_cost_bucket_scenario_runs_without_fault() {
    let cfg = ScenarioConfig::from_toml_file(&common::scenario_path("free_pilot.toml")).unwrap();
    assert!(cfg.validate().is_empty(), "{:?}", cfg.validate());
    let projection = cfg.run().unwrap();

    // 1000 apartments * 250 * 12 = 3 M kWh, 5% off in year 1 despite no budget.
    assert_eq!(projection.years[0].scale, 1.0);
    assert!(common::approx_eq(projection.years[0].consumption_kwh, 2_850_000.0));
    for y in &projection.years[1..] {
        assert!(y.measures.is_empty());
        assert_eq!(y.consumption_kwh, projection.years[0].consumption_kwh);
    }
}

#[test]
fn presets_produce_distinct_trajectories() {
    let finals: Vec<f64> = ["default", "very_cold", "sunny", "no_budget"]
        .iter()
        .map(|name| {
            ScenarioConfig::from_preset(name)
                .unwrap()
                .run()
                .unwrap()
                .final_consumption_kwh()
        })
        .collect();
    for (i, a) in finals.iter().enumerate() {
        for b in &finals[i + 1..] {
            assert_ne!(a, b);
        }
    }
}

#[test]
fn negative_apartments_rejected_before_simulation() {
    let cfg = ScenarioConfig::from_toml_str(
        r#"
[buildings]
apartments = -1
"#,
    )
    .unwrap();
    let errors = cfg.validate();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].field, "buildings.apartments");
    assert!(cfg.run().is_err());
}

#[test]
fn missing_scenario_file_reports_path() {
    let err = ScenarioConfig::from_toml_file(&common::scenario_path("nope.toml")).unwrap_err();
    assert_eq!(err.field, "scenario");
    assert!(err.message.contains("nope.toml"));
}

#[test]
fn csv_export_of_default_city() {
    let projection = ScenarioConfig::default_city().run().unwrap();
    let mut buf = Vec::new();
    write_csv(&projection, &mut buf).unwrap();
    let text = String::from_utf8(buf).unwrap();
    let last = text.lines().last().unwrap();
    assert!(last.starts_with("10,years_5_10,"));
    assert!(last.ends_with("Smart_meter:5.0;Smart_home:3.0"));
}
