//! Ten-year consumption projection with budget-scaled measures and reinvested savings.

use std::sync::LazyLock;

use tracing::{debug, info};

use super::climate::{Bucket, ClimatePlan, ClimatePlanTable, HORIZON_YEARS};
use super::error::PlanError;
use super::measure::{Measure, MeasureCatalog};
use super::types::{AppliedMeasure, Inventory, Projection, YearRecord};

/// Default currency value of one unit of saved energy.
pub const DEFAULT_PRICE_PER_UNIT_ENERGY: f64 = 1.0;

/// Converts saved energy times price into the unit budgets are expressed in.
pub const SAVINGS_UNIT_DIVISOR: f64 = 1e6;

static BUILTIN: LazyLock<Result<Simulator, PlanError>> =
    LazyLock::new(|| Simulator::new(MeasureCatalog::builtin(), ClimatePlanTable::builtin()));

/// Projection engine bound to a consistent measure catalog and climate table.
///
/// Holds no per-run state, so one instance can serve concurrent callers.
#[derive(Debug, Clone)]
pub struct Simulator {
    catalog: MeasureCatalog,
    plans: ClimatePlanTable,
}

impl Simulator {
    /// Binds reference tables after checking that every scheduled measure exists.
    ///
    /// # Errors
    ///
    /// Returns `PlanError::MissingMeasure` for a dangling plan reference.
    pub fn new(catalog: MeasureCatalog, plans: ClimatePlanTable) -> Result<Self, PlanError> {
        plans.validate_against(&catalog)?;
        debug!(
            measures = catalog.len(),
            climates = plans.len(),
            "reference tables validated"
        );
        Ok(Self { catalog, plans })
    }

    /// Process-wide simulator over the built-in tables, validated on first use.
    ///
    /// # Errors
    ///
    /// Returns the validation error of the built-in tables, if any.
    pub fn builtin() -> Result<&'static Self, PlanError> {
        LazyLock::force(&BUILTIN).as_ref().map_err(Clone::clone)
    }

    pub fn catalog(&self) -> &MeasureCatalog {
        &self.catalog
    }

    pub fn plans(&self) -> &ClimatePlanTable {
        &self.plans
    }

    /// Projects yearly consumption over [`HORIZON_YEARS`] years.
    ///
    /// Each year the bucket's measures are funded up to `scale =
    /// min(1, available / total_cost)` and applied multiplicatively to the
    /// previous year's consumption. The currency value of the energy saved
    /// is added to the *original* budget for the following year only.
    ///
    /// A bucket whose measures cost nothing is funded in full (`scale = 1`).
    ///
    /// # Errors
    ///
    /// Returns `PlanError::InvalidInput` for a negative or non-finite budget
    /// or a non-positive price, and `PlanError::UnknownClimate` when
    /// `climate` is not in the table. No partial projection is produced.
    pub fn simulate(
        &self,
        inventory: &Inventory,
        budget: f64,
        climate: &str,
        price_per_unit_energy: f64,
    ) -> Result<Projection, PlanError> {
        if !budget.is_finite() || budget < 0.0 {
            return Err(PlanError::invalid(
                "city.budget",
                "must be a finite number >= 0",
            ));
        }
        if !price_per_unit_energy.is_finite() || price_per_unit_energy <= 0.0 {
            return Err(PlanError::invalid(
                "city.price_per_unit_energy",
                "must be a finite number > 0",
            ));
        }
        let plan = self.plans.get(climate)?;

        let base_yearly_kwh = inventory.base_yearly_kwh();
        let mut available_budget = budget;
        let mut current_kwh = base_yearly_kwh;
        let mut years = Vec::with_capacity(HORIZON_YEARS as usize);

        for year in 1..=HORIZON_YEARS {
            let bucket = Bucket::for_year(year);
            let active = self.active_measures(plan, bucket)?;

            let total_cost: f64 = active.iter().map(|m| m.cost).sum();
            let scale = funding_scale(available_budget, total_cost);
            let multiplier: f64 = active.iter().map(|m| 1.0 - m.effect * scale).product();
            let new_kwh = current_kwh * multiplier;

            let saved_kwh = current_kwh - new_kwh;
            let saved_budget = saved_kwh * price_per_unit_energy / SAVINGS_UNIT_DIVISOR;

            debug!(
                year,
                bucket = %bucket,
                available_budget,
                total_cost,
                scale,
                consumption_kwh = new_kwh,
                "simulated year"
            );

            years.push(YearRecord {
                year,
                bucket,
                available_budget,
                total_cost,
                scale,
                consumption_kwh: new_kwh,
                saved_kwh,
                saved_budget,
                measures: active
                    .iter()
                    .map(|m| AppliedMeasure {
                        name: m.name.clone(),
                        scaled_effect: m.effect * scale,
                        color: m.color,
                    })
                    .collect(),
            });

            available_budget = budget + saved_budget;
            current_kwh = new_kwh;
        }

        info!(
            climate,
            budget,
            base_yearly_kwh,
            final_kwh = current_kwh,
            "projection complete"
        );

        Ok(Projection {
            climate: plan.name.clone(),
            budget,
            price_per_unit_energy,
            base_yearly_kwh,
            years,
        })
    }

    fn active_measures(
        &self,
        plan: &ClimatePlan,
        bucket: Bucket,
    ) -> Result<Vec<&Measure>, PlanError> {
        plan.measures(bucket)
            .iter()
            .map(|name| {
                self.catalog
                    .get(name)
                    .ok_or_else(|| PlanError::MissingMeasure {
                        climate: plan.name.clone(),
                        bucket,
                        measure: name.clone(),
                    })
            })
            .collect()
    }
}

/// Funding-adequacy ratio in `[0, 1]`; measures that cost nothing are fully funded.
pub fn funding_scale(available_budget: f64, total_cost: f64) -> f64 {
    if total_cost > 0.0 {
        (available_budget / total_cost).min(1.0)
    } else {
        1.0
    }
}

/// Runs the built-in tables with the default energy price.
///
/// # Errors
///
/// See [`Simulator::simulate`].
pub fn simulate(
    inventory: &Inventory,
    budget: f64,
    climate: &str,
) -> Result<Projection, PlanError> {
    Simulator::builtin()?.simulate(inventory, budget, climate, DEFAULT_PRICE_PER_UNIT_ENERGY)
}
