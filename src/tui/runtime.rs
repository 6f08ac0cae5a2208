//! TUI application state: the scenario being explored and its projection.

use crate::config::ScenarioConfig;
use crate::plan::{PlanError, Simulator};
use crate::plan::types::Projection;

/// Budget change per `+`/`-` key press.
pub const BUDGET_STEP: f64 = 10.0;

/// Index of the scenario's climate, or the first climate when it is not in the table.
fn home_climate(climates: &[String], base: &ScenarioConfig) -> usize {
    climates
        .iter()
        .position(|c| *c == base.city.climate)
        .unwrap_or(0)
}

/// Interactive state: the base scenario, the user's climate and budget
/// choices, and the projection they produce.
pub struct App {
    base: ScenarioConfig,
    simulator: Simulator,
    climates: Vec<String>,
    climate_idx: usize,
    /// Currently selected annual budget.
    pub budget: f64,
    /// Projection for the current selection, or why it failed.
    pub projection: Result<Projection, PlanError>,
    /// Set when the user asked to leave.
    pub quit: bool,
}

impl App {
    /// Checks the scenario's tables once and runs the initial projection.
    ///
    /// # Errors
    ///
    /// Returns the first inconsistency in the scenario's reference tables.
    pub fn new(base: ScenarioConfig) -> Result<Self, PlanError> {
        let simulator = base.simulator()?.into_owned();
        let climates: Vec<String> = simulator
            .plans()
            .names()
            .map(ToString::to_string)
            .collect();
        let climate_idx = home_climate(&climates, &base);
        let budget = base.city.budget;
        let mut scenario = base.clone();
        if let Some(climate) = climates.get(climate_idx) {
            scenario.city.climate.clone_from(climate);
        }
        let projection = scenario.run_with(&simulator);
        Ok(Self {
            base,
            simulator,
            climates,
            climate_idx,
            budget,
            projection,
            quit: false,
        })
    }

    /// Name of the selected climate.
    pub fn climate(&self) -> &str {
        self.climates
            .get(self.climate_idx)
            .map_or(self.base.city.climate.as_str(), String::as_str)
    }

    fn recompute(&mut self) {
        let mut scenario = self.base.clone();
        scenario.city.climate = self.climate().to_string();
        scenario.city.budget = self.budget;
        self.projection = scenario.run_with(&self.simulator);
    }

    /// Selects the next climate, wrapping around.
    pub fn next_climate(&mut self) {
        if !self.climates.is_empty() {
            self.climate_idx = (self.climate_idx + 1) % self.climates.len();
            self.recompute();
        }
    }

    /// Selects the previous climate, wrapping around.
    pub fn prev_climate(&mut self) {
        if !self.climates.is_empty() {
            self.climate_idx = (self.climate_idx + self.climates.len() - 1) % self.climates.len();
            self.recompute();
        }
    }

    /// Raises the budget by [`BUDGET_STEP`].
    pub fn budget_up(&mut self) {
        self.budget += BUDGET_STEP;
        self.recompute();
    }

    /// Lowers the budget by [`BUDGET_STEP`], never below zero.
    pub fn budget_down(&mut self) {
        self.budget = (self.budget - BUDGET_STEP).max(0.0);
        self.recompute();
    }

    /// Returns to the scenario's own climate and budget.
    pub fn reset(&mut self) {
        self.climate_idx = home_climate(&self.climates, &self.base);
        self.budget = self.base.city.budget;
        self.recompute();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_on_scenario_climate() {
        let app = App::new(ScenarioConfig::sunny()).unwrap();
        assert_eq!(app.climate(), "Sunny");
        assert!(app.projection.is_ok());
    }

    #[test]
    fn climate_cycles_both_ways() {
        let mut app = App::new(ScenarioConfig::default_city()).unwrap();
        app.prev_climate();
        assert_eq!(app.climate(), "Mixed");
        app.next_climate();
        app.next_climate();
        assert_eq!(app.climate(), "Very cold");
        assert_eq!(
            app.projection.as_ref().map(|p| p.climate.as_str()),
            Ok("Very cold")
        );
    }

    #[test]
    fn budget_never_negative() {
        let mut app = App::new(ScenarioConfig::no_budget()).unwrap();
        app.budget_down();
        assert_eq!(app.budget, 0.0);
        app.budget_up();
        assert_eq!(app.budget, BUDGET_STEP);
        app.reset();
        assert_eq!(app.budget, 0.0);
    }

    #[test]
    fn inconsistent_tables_fail_before_first_frame() {
        let base = ScenarioConfig::from_toml_str(
            r#"
[[climates]]
name = "Moderate"
year_1 = ["Heat_pump"]
"#,
        )
        .unwrap();
        assert!(matches!(
            App::new(base),
            Err(PlanError::MissingMeasure { .. })
        ));
    }

    #[test]
    fn unknown_scenario_climate_falls_back_to_first() {
        let mut base = ScenarioConfig::default_city();
        base.city.climate = "Tropical".to_string();
        let mut app = App::new(base).unwrap();
        assert_eq!(app.climate(), "Moderate");
        assert!(app.projection.is_ok());
        app.next_climate();
        app.reset();
        assert_eq!(app.climate(), "Moderate");
    }
}
