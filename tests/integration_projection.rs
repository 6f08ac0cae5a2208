//! Integration tests for the ten-year projection.

mod common;

use city_energy_plan::plan::climate::{Bucket, ClimatePlanTable, HORIZON_YEARS};
use city_energy_plan::plan::measure::MeasureCatalog;
use city_energy_plan::plan::types::Inventory;
use city_energy_plan::plan::{PlanError, Simulator, simulate};

fn climates() -> Vec<String> {
    ClimatePlanTable::builtin()
        .names()
        .map(ToString::to_string)
        .collect()
}

#[test]
fn empty_inventory_stays_at_zero() {
    for climate in climates() {
        let projection = simulate(&Inventory::new(), 100.0, &climate).unwrap();
        assert_eq!(projection.base_yearly_kwh, 0.0);
        assert_eq!(projection.consumption_series(), vec![0.0; 10]);

        let catalog = MeasureCatalog::builtin();
        let plans = ClimatePlanTable::builtin();
        let plan = plans.get(&climate).unwrap();
        for (year, applied) in projection.plan_series().iter().enumerate() {
            let bucket = Bucket::for_year(year as u32 + 1);
            let scheduled = plan.measures(bucket);
            let total_cost: f64 = scheduled.iter().map(|m| catalog.get(m).unwrap().cost).sum();
            let scale = (100.0 / total_cost).min(1.0);
            assert_eq!(applied.len(), scheduled.len());
            for (a, name) in applied.iter().zip(scheduled) {
                assert_eq!(&a.name, name);
                let effect = catalog.get(name).unwrap().effect;
                assert!(common::approx_eq(a.scaled_effect, effect * scale));
            }
        }
    }
}

#[test]
fn never_constrained_moderate_compounds_bucket_multipliers() {
    let projection = simulate(&common::single_unit_inventory(), 1000.0, "Moderate").unwrap();
    assert_eq!(projection.base_yearly_kwh, 1200.0);

    let catalog = MeasureCatalog::builtin();
    let plans = ClimatePlanTable::builtin();
    let moderate = plans.get("Moderate").unwrap();
    let mut expected = 1200.0;
    for (i, consumption) in projection.consumption_series().iter().enumerate() {
        let bucket = Bucket::for_year(i as u32 + 1);
        expected *= moderate
            .measures(bucket)
            .iter()
            .map(|m| 1.0 - catalog.get(m).unwrap().effect)
            .product::<f64>();
        assert!(
            common::approx_eq(*consumption, expected),
            "year {}: {consumption} vs {expected}",
            i + 1
        );
    }
}

#[test]
fn zero_budget_keeps_consumption_constant() {
    let inventory = common::city_inventory(40_000, 5_000, 300);
    let base = inventory.base_yearly_kwh();
    for climate in climates() {
        let projection = simulate(&inventory, 0.0, &climate).unwrap();
        assert_eq!(projection.consumption_series(), vec![base; 10]);
        for year in &projection.years {
            assert_eq!(year.scale, 0.0);
            assert!(year.measures.iter().all(|m| m.scaled_effect == 0.0));
        }
    }
}

#[test]
fn unknown_climate_fails_without_output() {
    let err = simulate(&common::single_unit_inventory(), 100.0, "Tropical").unwrap_err();
    match err {
        PlanError::UnknownClimate { name, available } => {
            assert_eq!(name, "Tropical");
            assert_eq!(available, climates());
        }
        other => panic!("expected unknown climate, got {other:?}"),
    }
}

#[test]
fn consumption_is_non_increasing() {
    let inventory = common::city_inventory(40_000, 5_000, 300);
    for climate in climates() {
        for budget in [0.0, 5.0, 37.5, 100.0, 10_000.0] {
            let series = simulate(&inventory, budget, &climate)
                .unwrap()
                .consumption_series();
            for pair in series.windows(2) {
                assert!(pair[1] <= pair[0], "{climate} @ {budget}: {series:?}");
            }
            assert!(series[0] <= inventory.base_yearly_kwh());
        }
    }
}

#[test]
fn scale_stays_in_unit_interval_and_drops_only_when_underfunded() {
    let inventory = common::city_inventory(40_000, 5_000, 300);
    for climate in climates() {
        for budget in [0.0, 12.0, 45.0, 100.0] {
            let projection = simulate(&inventory, budget, &climate).unwrap();
            for y in &projection.years {
                assert!((0.0..=1.0).contains(&y.scale));
                if y.scale < 1.0 {
                    assert!(y.total_cost > y.available_budget);
                }
            }
        }
    }
}

#[test]
fn reinvested_budget_never_drops_below_original() {
    let inventory = common::city_inventory(40_000, 5_000, 300);
    for budget in [0.0, 20.0, 100.0] {
        let projection = simulate(&inventory, budget, "Mixed").unwrap();
        assert!(projection.years.iter().all(|y| y.available_budget >= budget));
    }
}

#[test]
fn default_city_savings_lift_later_budgets() {
    // 154.8 M kWh base: year 1 saves tens of M kWh, worth tens of budget units.
    let inventory = common::city_inventory(40_000, 5_000, 300);
    let projection = simulate(&inventory, 10.0, "Moderate").unwrap();
    assert!(projection.years[1].available_budget > 10.0);
    assert!(common::approx_eq(
        projection.years[1].available_budget,
        10.0 + projection.years[0].saved_kwh / 1e6
    ));
}

#[test]
fn identical_inputs_give_identical_outputs() {
    let inventory = common::city_inventory(12_345, 678, 9);
    let a = simulate(&inventory, 33.3, "Sunny").unwrap();
    let b = simulate(&inventory, 33.3, "Sunny").unwrap();
    assert_eq!(a, b);
    let bits = |s: Vec<f64>| s.into_iter().map(f64::to_bits).collect::<Vec<_>>();
    assert_eq!(bits(a.consumption_series()), bits(b.consumption_series()));
}

#[test]
fn series_always_cover_the_horizon() {
    let inventories = [
        Inventory::new(),
        common::single_unit_inventory(),
        common::city_inventory(40_000, 5_000, 300),
    ];
    for inventory in &inventories {
        for climate in climates() {
            let projection = simulate(inventory, 50.0, &climate).unwrap();
            assert_eq!(projection.consumption_series().len(), HORIZON_YEARS as usize);
            assert_eq!(projection.plan_series().len(), HORIZON_YEARS as usize);
            let years: Vec<u32> = projection.years.iter().map(|y| y.year).collect();
            assert_eq!(years, (1..=HORIZON_YEARS).collect::<Vec<_>>());
        }
    }
}

#[test]
fn simulator_is_shareable_across_threads() {
    let sim = Simulator::builtin().unwrap();
    let inventory = common::city_inventory(40_000, 5_000, 300);
    let expected = sim.simulate(&inventory, 100.0, "Sunny", 1.0).unwrap();
    std::thread::scope(|s| {
        let handles: Vec<_> = (0..4)
            .map(|_| s.spawn(|| sim.simulate(&inventory, 100.0, "Sunny", 1.0).unwrap()))
            .collect();
        for h in handles {
            assert_eq!(h.join().unwrap(), expected);
        }
    });
}
