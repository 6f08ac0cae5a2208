//! Projection inputs and outputs: building inventory, per-year records.

use std::fmt;

use serde::Serialize;

use super::climate::Bucket;
use super::error::PlanError;
use super::measure::HexColor;

/// Months per simulated year.
pub const MONTHS_PER_YEAR: f64 = 12.0;

/// kWh in one million kWh, the unit used by charts and tables.
pub const KWH_PER_MILLION: f64 = 1e6;

/// A named category of building stock.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BuildingClass {
    name: String,
    count: u64,
    monthly_kwh_per_unit: f64,
}

impl BuildingClass {
    /// Creates a building class.
    ///
    /// `count` is signed so that negative values coming from forms or
    /// scenario files are rejected here instead of wrapping.
    ///
    /// # Errors
    ///
    /// Returns `PlanError::InvalidInput` if `count < 0` or
    /// `monthly_kwh_per_unit` is not a finite number > 0.
    pub fn new(
        name: impl Into<String>,
        count: i64,
        monthly_kwh_per_unit: f64,
    ) -> Result<Self, PlanError> {
        let name = name.into();
        let count = u64::try_from(count)
            .map_err(|_| PlanError::invalid(format!("buildings.{name}.count"), "must be >= 0"))?;
        if !monthly_kwh_per_unit.is_finite() || monthly_kwh_per_unit <= 0.0 {
            return Err(PlanError::invalid(
                format!("buildings.{name}.monthly_kwh_per_unit"),
                "must be a finite number > 0",
            ));
        }
        Ok(Self {
            name,
            count,
            monthly_kwh_per_unit,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn count(&self) -> u64 {
        self.count
    }

    pub fn monthly_kwh_per_unit(&self) -> f64 {
        self.monthly_kwh_per_unit
    }

    /// Yearly consumption of the whole class (kWh).
    pub fn yearly_kwh(&self) -> f64 {
        self.count as f64 * self.monthly_kwh_per_unit * MONTHS_PER_YEAR
    }
}

/// Building stock of a city, in insertion order. Class names are unique.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Inventory {
    classes: Vec<BuildingClass>,
}

impl Inventory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a class, returning the extended inventory.
    ///
    /// # Errors
    ///
    /// Returns `PlanError::DuplicateName` if a class with the same name exists.
    pub fn with(mut self, class: BuildingClass) -> Result<Self, PlanError> {
        self.push(class)?;
        Ok(self)
    }

    /// Adds a class in place.
    ///
    /// # Errors
    ///
    /// Returns `PlanError::DuplicateName` if a class with the same name exists.
    pub fn push(&mut self, class: BuildingClass) -> Result<(), PlanError> {
        if self.get(class.name()).is_some() {
            return Err(PlanError::DuplicateName {
                table: "buildings",
                name: class.name,
            });
        }
        self.classes.push(class);
        Ok(())
    }

    /// Looks up a class by name.
    pub fn get(&self, name: &str) -> Option<&BuildingClass> {
        self.classes.iter().find(|c| c.name == name)
    }

    pub fn classes(&self) -> &[BuildingClass] {
        &self.classes
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    /// Total yearly consumption before any measure (kWh). Zero when empty.
    pub fn base_yearly_kwh(&self) -> f64 {
        self.classes.iter().map(BuildingClass::yearly_kwh).sum()
    }
}

/// A measure as realised in one year at the available funding level.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AppliedMeasure {
    /// Catalog name.
    pub name: String,
    /// Realised effect: nominal effect times the year's scale.
    pub scaled_effect: f64,
    /// Display colour.
    pub color: HexColor,
}

impl AppliedMeasure {
    /// Realised effect in percent.
    pub fn percent(&self) -> f64 {
        self.scaled_effect * 100.0
    }
}

impl fmt::Display for AppliedMeasure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({:.1}%)", self.name, self.percent())
    }
}

/// Complete record of one simulated year.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct YearRecord {
    /// 1-based year index.
    pub year: u32,
    /// Bucket the year's measures were taken from.
    pub bucket: Bucket,
    /// Budget available at the start of the year.
    pub available_budget: f64,
    /// Nominal cost of the year's measures.
    pub total_cost: f64,
    /// Funding-adequacy ratio in `[0, 1]`.
    pub scale: f64,
    /// Consumption after the year's measures (kWh).
    pub consumption_kwh: f64,
    /// Energy saved against the previous year (kWh).
    pub saved_kwh: f64,
    /// Currency equivalent of `saved_kwh`, added to next year's budget.
    pub saved_budget: f64,
    /// Measures applied this year, in schedule order.
    pub measures: Vec<AppliedMeasure>,
}

impl YearRecord {
    /// Consumption in millions of kWh.
    pub fn consumption_mkwh(&self) -> f64 {
        self.consumption_kwh / KWH_PER_MILLION
    }

    /// Whether the budget fell short of the year's measure cost.
    pub fn is_funding_constrained(&self) -> bool {
        self.scale < 1.0
    }
}

impl fmt::Display for YearRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "year={:>2} ({:<10}) | budget={:>8.2}  cost={:>6.2}  scale={:.3} | \
             consumption={:>8.2} M kWh  saved={:>8.2} M kWh",
            self.year,
            self.bucket.to_string(),
            self.available_budget,
            self.total_cost,
            self.scale,
            self.consumption_mkwh(),
            self.saved_kwh / KWH_PER_MILLION,
        )?;
        if !self.measures.is_empty() {
            write!(f, " |")?;
            for m in &self.measures {
                write!(f, " {m}")?;
            }
        }
        Ok(())
    }
}

/// Ten-year consumption projection under one climate plan.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Projection {
    /// Climate whose plan was applied.
    pub climate: String,
    /// Annual budget the run was given.
    pub budget: f64,
    /// Currency value of one unit of saved energy.
    pub price_per_unit_energy: f64,
    /// Yearly consumption before any measure (kWh).
    pub base_yearly_kwh: f64,
    /// One record per year, ascending.
    pub years: Vec<YearRecord>,
}

impl Projection {
    /// Yearly consumption after measures, year 1 first.
    pub fn consumption_series(&self) -> Vec<f64> {
        self.years.iter().map(|y| y.consumption_kwh).collect()
    }

    /// Applied measures per year, year 1 first.
    pub fn plan_series(&self) -> Vec<&[AppliedMeasure]> {
        self.years.iter().map(|y| y.measures.as_slice()).collect()
    }

    /// Splits the projection into its consumption and plan series.
    pub fn into_series(self) -> (Vec<f64>, Vec<Vec<AppliedMeasure>>) {
        self.years
            .into_iter()
            .map(|y| (y.consumption_kwh, y.measures))
            .unzip()
    }

    /// Consumption in the last simulated year, or the base when no year ran.
    pub fn final_consumption_kwh(&self) -> f64 {
        self.years
            .last()
            .map_or(self.base_yearly_kwh, |y| y.consumption_kwh)
    }
}
