//! TOML-based scenario configuration and preset definitions.

use std::borrow::Cow;
use std::fmt;
use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::plan::climate::{ClimatePlan, ClimatePlanTable};
use crate::plan::measure::{Measure, MeasureCatalog};
use crate::plan::simulator::DEFAULT_PRICE_PER_UNIT_ENERGY;
use crate::plan::types::{BuildingClass, Inventory, Projection};
use crate::plan::{PlanError, Simulator};

/// Monthly consumption of one apartment (kWh).
pub const APARTMENT_MONTHLY_KWH: f64 = 250.0;
/// Monthly consumption of one private house (kWh).
pub const PRIVATE_HOUSE_MONTHLY_KWH: f64 = 400.0;
/// Monthly consumption of one public building (kWh).
pub const PUBLIC_BUILDING_MONTHLY_KWH: f64 = 3000.0;

/// Top-level scenario configuration parsed from TOML.
///
/// All fields have defaults matching the `default` preset. Load from
/// TOML with [`ScenarioConfig::from_toml_file`] or use
/// [`ScenarioConfig::default_city`] for the built-in default.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScenarioConfig {
    /// Climate, budget and energy price.
    #[serde(default)]
    pub city: CityConfig,
    /// Building stock counts.
    #[serde(default)]
    pub buildings: BuildingsConfig,
    /// Replacement measure catalog; the built-in one is used when absent.
    #[serde(default)]
    pub measures: Option<Vec<Measure>>,
    /// Replacement climate plan table; the built-in one is used when absent.
    #[serde(default)]
    pub climates: Option<Vec<ClimatePlan>>,
}

/// Climate, budget and energy price.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CityConfig {
    /// Climate plan to apply.
    pub climate: String,
    /// Annual budget for measures (>= 0).
    pub budget: f64,
    /// Currency value of one unit of saved energy (> 0).
    pub price_per_unit_energy: f64,
}

impl Default for CityConfig {
    fn default() -> Self {
        Self {
            climate: "Moderate".to_string(),
            budget: 100.0,
            price_per_unit_energy: DEFAULT_PRICE_PER_UNIT_ENERGY,
        }
    }
}

/// Building stock counts. Signed so negative input is reported, not misparsed.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BuildingsConfig {
    /// Number of apartments.
    pub apartments: i64,
    /// Number of private houses.
    pub private_houses: i64,
    /// Number of public buildings.
    pub public_buildings: i64,
}

impl Default for BuildingsConfig {
    fn default() -> Self {
        Self {
            apartments: 40_000,
            private_houses: 5_000,
            public_buildings: 300,
        }
    }
}

/// Per-run overrides from CLI flags or API query parameters.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Overrides {
    pub climate: Option<String>,
    pub budget: Option<f64>,
    pub apartments: Option<i64>,
    pub houses: Option<i64>,
    pub public: Option<i64>,
    pub price: Option<f64>,
}

/// Configuration error with field path and constraint description.
#[derive(Debug)]
pub struct ConfigError {
    /// Dotted field path (e.g., `"buildings.apartments"`).
    pub field: String,
    /// Human-readable constraint description.
    pub message: String,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "config error: {}: {}", self.field, self.message)
    }
}

impl std::error::Error for ConfigError {}

impl From<PlanError> for ConfigError {
    fn from(e: PlanError) -> Self {
        Self {
            field: e.field(),
            message: e.to_string(),
        }
    }
}

impl ScenarioConfig {
    /// Returns the default city: 40 000 apartments, 5 000 houses,
    /// 300 public buildings, budget 100, moderate climate.
    pub fn default_city() -> Self {
        Self::default()
    }

    /// Default city in a very cold climate.
    pub fn very_cold() -> Self {
        Self::with_climate("Very cold")
    }

    /// Default city in a sunny climate.
    pub fn sunny() -> Self {
        Self::with_climate("Sunny")
    }

    /// Default city in a mixed climate.
    pub fn mixed() -> Self {
        Self::with_climate("Mixed")
    }

    /// Default city with no budget: consumption stays flat.
    pub fn no_budget() -> Self {
        Self {
            city: CityConfig {
                budget: 0.0,
                ..CityConfig::default()
            },
            ..Self::default()
        }
    }

    fn with_climate(climate: &str) -> Self {
        Self {
            city: CityConfig {
                climate: climate.to_string(),
                ..CityConfig::default()
            },
            ..Self::default()
        }
    }

    /// Available preset names.
    pub const PRESETS: &[&str] = &["default", "very_cold", "sunny", "mixed", "no_budget"];

    /// Loads a scenario from a named preset.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the preset name is unknown.
    pub fn from_preset(name: &str) -> Result<Self, ConfigError> {
        match name {
            "default" => Ok(Self::default_city()),
            "very_cold" => Ok(Self::very_cold()),
            "sunny" => Ok(Self::sunny()),
            "mixed" => Ok(Self::mixed()),
            "no_budget" => Ok(Self::no_budget()),
            _ => Err(ConfigError {
                field: "preset".to_string(),
                message: format!(
                    "unknown preset \"{name}\", available: {}",
                    Self::PRESETS.join(", ")
                ),
            }),
        }
    }

    /// Parses a scenario from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the file cannot be read or the TOML is invalid.
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError {
            field: "scenario".to_string(),
            message: format!("cannot read \"{}\": {e}", path.display()),
        })?;
        Self::from_toml_str(&content)
    }

    /// Parses a scenario from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the TOML is invalid or contains unknown fields.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        toml::from_str(s).map_err(|e| ConfigError {
            field: "toml".to_string(),
            message: e.to_string(),
        })
    }

    /// Applies non-empty overrides on top of the scenario.
    pub fn apply(&mut self, overrides: &Overrides) {
        if let Some(climate) = &overrides.climate {
            self.city.climate.clone_from(climate);
        }
        if let Some(budget) = overrides.budget {
            self.city.budget = budget;
        }
        if let Some(price) = overrides.price {
            self.city.price_per_unit_energy = price;
        }
        if let Some(n) = overrides.apartments {
            self.buildings.apartments = n;
        }
        if let Some(n) = overrides.houses {
            self.buildings.private_houses = n;
        }
        if let Some(n) = overrides.public {
            self.buildings.public_buildings = n;
        }
    }

    /// Builds the building inventory with the fixed per-unit consumption constants.
    ///
    /// # Errors
    ///
    /// Returns `PlanError::InvalidInput` for a negative count, reported
    /// against the scenario field that holds it.
    pub fn inventory(&self) -> Result<Inventory, PlanError> {
        let b = &self.buildings;
        let classes = [
            ("apartments", b.apartments, APARTMENT_MONTHLY_KWH),
            ("private_houses", b.private_houses, PRIVATE_HOUSE_MONTHLY_KWH),
            ("public_buildings", b.public_buildings, PUBLIC_BUILDING_MONTHLY_KWH),
        ];
        let mut inventory = Inventory::new();
        for (name, count, monthly) in classes {
            let class = BuildingClass::new(name, count, monthly).map_err(|e| match e {
                PlanError::InvalidInput { message, .. } => {
                    PlanError::invalid(format!("buildings.{name}"), message)
                }
                other => other,
            })?;
            inventory.push(class)?;
        }
        Ok(inventory)
    }

    /// Returns the simulator for this scenario's reference tables.
    ///
    /// Borrows the process-wide built-in simulator unless the scenario
    /// replaces the measures or climates.
    ///
    /// # Errors
    ///
    /// Returns the first inconsistency between the effective tables.
    pub fn simulator(&self) -> Result<Cow<'static, Simulator>, PlanError> {
        if self.measures.is_none() && self.climates.is_none() {
            return Simulator::builtin().map(Cow::Borrowed);
        }
        let catalog = match &self.measures {
            Some(measures) => MeasureCatalog::new(measures.clone())?,
            None => MeasureCatalog::builtin(),
        };
        let plans = match &self.climates {
            Some(plans) => ClimatePlanTable::new(plans.clone())?,
            None => ClimatePlanTable::builtin(),
        };
        Simulator::new(catalog, plans).map(Cow::Owned)
    }

    /// Runs the projection described by this scenario.
    ///
    /// Builds the simulator for every call; long-lived callers build it once
    /// with [`ScenarioConfig::simulator`] and use [`ScenarioConfig::run_with`].
    ///
    /// # Errors
    ///
    /// Returns the first input or configuration error; nothing is simulated then.
    pub fn run(&self) -> Result<Projection, PlanError> {
        self.run_with(&*self.simulator()?)
    }

    /// Runs this scenario's city parameters against an already validated simulator.
    ///
    /// # Errors
    ///
    /// Returns the first input error, or `PlanError::UnknownClimate`.
    pub fn run_with(&self, simulator: &Simulator) -> Result<Projection, PlanError> {
        let inventory = self.inventory()?;
        simulator.simulate(
            &inventory,
            self.city.budget,
            &self.city.climate,
            self.city.price_per_unit_energy,
        )
    }

    /// Validates all fields and returns a list of errors.
    ///
    /// Returns an empty vector if configuration is valid.
    pub fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        let b = &self.buildings;
        for (field, count) in [
            ("buildings.apartments", b.apartments),
            ("buildings.private_houses", b.private_houses),
            ("buildings.public_buildings", b.public_buildings),
        ] {
            if count < 0 {
                errors.push(ConfigError {
                    field: field.into(),
                    message: format!("must be >= 0, got {count}"),
                });
            }
        }

        let c = &self.city;
        if !c.budget.is_finite() || c.budget < 0.0 {
            errors.push(ConfigError {
                field: "city.budget".into(),
                message: "must be a finite number >= 0".into(),
            });
        }
        if !c.price_per_unit_energy.is_finite() || c.price_per_unit_energy <= 0.0 {
            errors.push(ConfigError {
                field: "city.price_per_unit_energy".into(),
                message: "must be a finite number > 0".into(),
            });
        }

        match self.simulator() {
            Ok(sim) => {
                if let Err(e) = sim.plans().get(&c.climate) {
                    errors.push(e.into());
                }
            }
            Err(e) => errors.push(e.into()),
        }

        errors
    }
}
