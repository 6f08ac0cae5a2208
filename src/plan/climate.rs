//! Climate profiles and the year buckets their measure schedules are keyed by.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::error::PlanError;
use super::measure::MeasureCatalog;

/// Number of simulated years in a projection.
pub const HORIZON_YEARS: u32 = 10;

/// Year range sharing one scheduled measure set.
///
/// Boundaries live only in [`Bucket::for_year`], [`Bucket::first_year`] and
/// [`Bucket::last_year`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Bucket {
    /// Year 1.
    #[serde(rename = "year_1")]
    FirstYear,
    /// Years 2 to 4.
    #[serde(rename = "years_2_4")]
    EarlyYears,
    /// Years 5 to 10.
    #[serde(rename = "years_5_10")]
    LateYears,
}

impl Bucket {
    /// All buckets in chronological order.
    pub const ALL: [Self; 3] = [Self::FirstYear, Self::EarlyYears, Self::LateYears];

    /// Classifies a 1-based simulation year.
    ///
    /// ```
    /// use city_energy_plan::plan::climate::Bucket;
    ///
    /// assert_eq!(Bucket::for_year(1), Bucket::FirstYear);
    /// assert_eq!(Bucket::for_year(4), Bucket::EarlyYears);
    /// assert_eq!(Bucket::for_year(5), Bucket::LateYears);
    /// ```
    pub const fn for_year(year: u32) -> Self {
        match year {
            ..=1 => Self::FirstYear,
            2..=4 => Self::EarlyYears,
            _ => Self::LateYears,
        }
    }

    /// First year (inclusive) covered by the bucket.
    pub const fn first_year(self) -> u32 {
        match self {
            Self::FirstYear => 1,
            Self::EarlyYears => 2,
            Self::LateYears => 5,
        }
    }

    /// Last year (inclusive) covered by the bucket.
    pub const fn last_year(self) -> u32 {
        match self {
            Self::FirstYear => 1,
            Self::EarlyYears => 4,
            Self::LateYears => HORIZON_YEARS,
        }
    }

    /// Field name used for the bucket in scenario files and exports.
    pub const fn key(self) -> &'static str {
        match self {
            Self::FirstYear => "year_1",
            Self::EarlyYears => "years_2_4",
            Self::LateYears => "years_5_10",
        }
    }
}

impl fmt::Display for Bucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (first, last) = (self.first_year(), self.last_year());
        if first == last {
            write!(f, "year {first}")
        } else {
            write!(f, "years {first}-{last}")
        }
    }
}

/// Measure schedule of one climate category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ClimatePlan {
    /// Climate name, the lookup key.
    pub name: String,
    /// Measures applied in year 1.
    #[serde(default)]
    pub year_1: Vec<String>,
    /// Measures applied in years 2 to 4.
    #[serde(default)]
    pub years_2_4: Vec<String>,
    /// Measures applied in years 5 to 10.
    #[serde(default)]
    pub years_5_10: Vec<String>,
}

impl ClimatePlan {
    /// Measure names scheduled for `bucket`, in application order.
    pub fn measures(&self, bucket: Bucket) -> &[String] {
        match bucket {
            Bucket::FirstYear => &self.year_1,
            Bucket::EarlyYears => &self.years_2_4,
            Bucket::LateYears => &self.years_5_10,
        }
    }

    fn from_static(name: &str, buckets: [&[&str]; 3]) -> Self {
        let owned = |names: &[&str]| -> Vec<String> { names.iter().map(ToString::to_string).collect() };
        Self {
            name: name.to_string(),
            year_1: owned(buckets[0]),
            years_2_4: owned(buckets[1]),
            years_5_10: owned(buckets[2]),
        }
    }
}

/// Built-in climate plans, one bucket list per [`Bucket::ALL`] entry.
const BUILTIN_PLANS: &[(&str, [&[&str]; 3])] = &[
    (
        "Moderate",
        [
            &["LED", "Insulation", "Solar"],
            &["Solar"],
            &["Smart_meter", "Smart_home"],
        ],
    ),
    (
        "Very cold",
        [
            &["LED", "Insulation"],
            &["Insulation"],
            &["Smart_meter", "Smart_home"],
        ],
    ),
    (
        "Sunny",
        [
            &["LED", "Solar"],
            &["Solar"],
            &["Smart_meter", "Smart_home"],
        ],
    ),
    (
        "Mixed",
        [
            &["LED", "Insulation", "Solar"],
            &["Solar"],
            &["Smart_meter", "Smart_home"],
        ],
    ),
];

/// Ordered, name-unique climate plan table.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ClimatePlanTable {
    plans: Vec<ClimatePlan>,
}

impl ClimatePlanTable {
    /// Builds a table, rejecting duplicate climate names.
    ///
    /// Measure references are checked separately by
    /// [`ClimatePlanTable::validate_against`].
    ///
    /// # Errors
    ///
    /// Returns `PlanError::DuplicateName` on a repeated climate, or
    /// `PlanError::InvalidInput` on an empty one.
    pub fn new(plans: Vec<ClimatePlan>) -> Result<Self, PlanError> {
        for (i, p) in plans.iter().enumerate() {
            if p.name.trim().is_empty() {
                return Err(PlanError::invalid("climates.name", "must not be empty"));
            }
            if plans[..i].iter().any(|other| other.name == p.name) {
                return Err(PlanError::DuplicateName {
                    table: "climates",
                    name: p.name.clone(),
                });
            }
        }
        Ok(Self { plans })
    }

    /// The four climate categories the city planner ships with.
    pub fn builtin() -> Self {
        Self {
            plans: BUILTIN_PLANS
                .iter()
                .map(|(name, buckets)| ClimatePlan::from_static(name, *buckets))
                .collect(),
        }
    }

    /// Resolves a climate by name.
    ///
    /// # Errors
    ///
    /// Returns `PlanError::UnknownClimate` listing the known names.
    pub fn get(&self, name: &str) -> Result<&ClimatePlan, PlanError> {
        self.plans
            .iter()
            .find(|p| p.name == name)
            .ok_or_else(|| PlanError::UnknownClimate {
                name: name.to_string(),
                available: self.names().map(ToString::to_string).collect(),
            })
    }

    /// Climate names in table order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.plans.iter().map(|p| p.name.as_str())
    }

    /// Iterates plans in table order.
    pub fn iter(&self) -> impl Iterator<Item = &ClimatePlan> {
        self.plans.iter()
    }

    pub fn len(&self) -> usize {
        self.plans.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plans.is_empty()
    }

    /// Checks that every scheduled measure exists in `catalog`.
    ///
    /// # Errors
    ///
    /// Returns `PlanError::MissingMeasure` for the first dangling reference.
    pub fn validate_against(&self, catalog: &MeasureCatalog) -> Result<(), PlanError> {
        for plan in &self.plans {
            for bucket in Bucket::ALL {
                if let Some(missing) = plan
                    .measures(bucket)
                    .iter()
                    .find(|name| catalog.get(name).is_none())
                {
                    return Err(PlanError::MissingMeasure {
                        climate: plan.name.clone(),
                        bucket,
                        measure: missing.clone(),
                    });
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bucket_boundaries() {
        let buckets: Vec<Bucket> = (1..=HORIZON_YEARS).map(Bucket::for_year).collect();
        assert_eq!(buckets[0], Bucket::FirstYear);
        assert!(buckets[1..4].iter().all(|&b| b == Bucket::EarlyYears));
        assert!(buckets[4..].iter().all(|&b| b == Bucket::LateYears));
    }

    #[test]
    fn bucket_ranges_agree_with_classifier() {
        for bucket in Bucket::ALL {
            for year in bucket.first_year()..=bucket.last_year() {
                assert_eq!(Bucket::for_year(year), bucket, "year {year}");
            }
        }
    }

    #[test]
    fn bucket_display() {
        assert_eq!(Bucket::FirstYear.to_string(), "year 1");
        assert_eq!(Bucket::LateYears.to_string(), "years 5-10");
    }

    #[test]
    fn builtin_table_resolves_against_builtin_catalog() {
        let table = ClimatePlanTable::builtin();
        assert_eq!(
            table.names().collect::<Vec<_>>(),
            ["Moderate", "Very cold", "Sunny", "Mixed"]
        );
        assert!(table.validate_against(&MeasureCatalog::builtin()).is_ok());
    }

    #[test]
    fn moderate_schedule() {
        let table = ClimatePlanTable::builtin();
        let moderate = table.get("Moderate").expect("built in");
        assert_eq!(moderate.measures(Bucket::FirstYear), ["LED", "Insulation", "Solar"]);
        assert_eq!(moderate.measures(Bucket::EarlyYears), ["Solar"]);
        assert_eq!(
            moderate.measures(Bucket::LateYears),
            ["Smart_meter", "Smart_home"]
        );
    }

    #[test]
    fn unknown_climate_fails_lookup() {
        let table = ClimatePlanTable::builtin();
        let err = table.get("Tropical").unwrap_err();
        assert!(matches!(err, PlanError::UnknownClimate { ref name, .. } if name == "Tropical"));
    }

    #[test]
    fn dangling_measure_is_reported() {
        let table = ClimatePlanTable::new(vec![ClimatePlan {
            name: "Arid".to_string(),
            year_1: vec!["LED".to_string()],
            years_2_4: vec![],
            years_5_10: vec!["Heat_pump".to_string()],
        }])
        .expect("names are unique");
        let err = table
            .validate_against(&MeasureCatalog::builtin())
            .unwrap_err();
        assert_eq!(
            err,
            PlanError::MissingMeasure {
                climate: "Arid".to_string(),
                bucket: Bucket::LateYears,
                measure: "Heat_pump".to_string(),
            }
        );
    }

    #[test]
    fn duplicate_climates_are_rejected() {
        let plan = ClimatePlan {
            name: "Sunny".to_string(),
            year_1: vec![],
            years_2_4: vec![],
            years_5_10: vec![],
        };
        assert!(ClimatePlanTable::new(vec![plan.clone(), plan]).is_err());
    }
}
