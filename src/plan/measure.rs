//! Efficiency measures and the catalog they are resolved from.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::error::PlanError;

/// Presentation colour of a measure, written as `#RRGGBB`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct HexColor {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
}

impl HexColor {
    /// Creates a colour from its channels.
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

impl FromStr for HexColor {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let hex = s
            .strip_prefix('#')
            .ok_or_else(|| format!("colour \"{s}\" must start with '#'"))?;
        if hex.len() != 6 || !hex.is_ascii() {
            return Err(format!("colour \"{s}\" must have the form #RRGGBB"));
        }
        let channel = |i: usize| {
            u8::from_str_radix(&hex[i..i + 2], 16)
                .map_err(|_| format!("colour \"{s}\" has a non-hex digit"))
        };
        Ok(Self::new(channel(0)?, channel(2)?, channel(4)?))
    }
}

impl TryFrom<String> for HexColor {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<HexColor> for String {
    fn from(c: HexColor) -> Self {
        c.to_string()
    }
}

impl fmt::Display for HexColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

/// A named efficiency intervention.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Measure {
    /// Catalog key referenced by climate plans.
    pub name: String,
    /// Nominal cost of applying the measure fully for one year.
    pub cost: f64,
    /// Fractional consumption reduction when fully funded, in `[0, 1)`.
    pub effect: f64,
    /// Display colour.
    pub color: HexColor,
}

impl Measure {
    /// Creates a measure after checking its cost and effect ranges.
    ///
    /// # Errors
    ///
    /// Returns `PlanError::InvalidInput` if `cost` is negative or not finite,
    /// or `effect` is outside `[0, 1)`.
    pub fn new(
        name: impl Into<String>,
        cost: f64,
        effect: f64,
        color: HexColor,
    ) -> Result<Self, PlanError> {
        let measure = Self {
            name: name.into(),
            cost,
            effect,
            color,
        };
        measure.validate()?;
        Ok(measure)
    }

    /// Checks the range constraints of an already constructed measure.
    ///
    /// # Errors
    ///
    /// See [`Measure::new`].
    pub fn validate(&self) -> Result<(), PlanError> {
        if self.name.trim().is_empty() {
            return Err(PlanError::invalid("measures.name", "must not be empty"));
        }
        if !self.cost.is_finite() || self.cost < 0.0 {
            return Err(PlanError::invalid(
                format!("measures.{}.cost", self.name),
                "must be a finite number >= 0",
            ));
        }
        if !(0.0..1.0).contains(&self.effect) {
            return Err(PlanError::invalid(
                format!("measures.{}.effect", self.name),
                "must be in [0.0, 1.0)",
            ));
        }
        Ok(())
    }
}

/// Built-in measures: name, cost, effect, colour.
const BUILTIN_MEASURES: &[(&str, f64, f64, HexColor)] = &[
    ("LED", 15.0, 0.08, HexColor::new(0xFF, 0xD7, 0x00)),
    ("Insulation", 25.0, 0.15, HexColor::new(0xFF, 0x45, 0x00)),
    ("Solar", 30.0, 0.20, HexColor::new(0x1E, 0x90, 0xFF)),
    ("Smart_meter", 10.0, 0.05, HexColor::new(0x32, 0xCD, 0x32)),
    ("Smart_home", 6.0, 0.03, HexColor::new(0xFF, 0x69, 0xB4)),
];

/// Ordered, name-unique set of measures.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct MeasureCatalog {
    measures: Vec<Measure>,
}

impl MeasureCatalog {
    /// Builds a catalog, rejecting invalid measures and duplicate names.
    ///
    /// # Errors
    ///
    /// Returns the first `PlanError` found.
    pub fn new(measures: Vec<Measure>) -> Result<Self, PlanError> {
        for (i, m) in measures.iter().enumerate() {
            m.validate()?;
            if measures[..i].iter().any(|other| other.name == m.name) {
                return Err(PlanError::DuplicateName {
                    table: "measures",
                    name: m.name.clone(),
                });
            }
        }
        Ok(Self { measures })
    }

    /// The five measures the city planner ships with.
    pub fn builtin() -> Self {
        Self {
            measures: BUILTIN_MEASURES
                .iter()
                .map(|&(name, cost, effect, color)| Measure {
                    name: name.to_string(),
                    cost,
                    effect,
                    color,
                })
                .collect(),
        }
    }

    /// Looks a measure up by name.
    pub fn get(&self, name: &str) -> Option<&Measure> {
        self.measures.iter().find(|m| m.name == name)
    }

    /// Iterates measures in catalog order.
    pub fn iter(&self) -> impl Iterator<Item = &Measure> {
        self.measures.iter()
    }

    pub fn len(&self) -> usize {
        self.measures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.measures.is_empty()
    }
}
