//! Error taxonomy shared by the reference tables and the simulator.

use std::error::Error;
use std::fmt;

use super::climate::Bucket;

/// Failure raised while assembling reference tables or running a projection.
///
/// Every variant except [`PlanError::InvalidInput`] is a configuration
/// problem: retrying with the same tables cannot succeed.
#[derive(Debug, Clone, PartialEq)]
pub enum PlanError {
    /// The requested climate is not a key of the climate plan table.
    UnknownClimate {
        /// Requested climate name.
        name: String,
        /// Climates known to the table, in table order.
        available: Vec<String>,
    },
    /// A climate plan schedules a measure that the catalog does not define.
    MissingMeasure {
        /// Climate whose plan holds the dangling reference.
        climate: String,
        /// Bucket the reference was found in.
        bucket: Bucket,
        /// Measure name that failed to resolve.
        measure: String,
    },
    /// Two entries of the same table share a name.
    DuplicateName {
        /// Table the duplicate lives in (`"measures"`, `"climates"` or `"buildings"`).
        table: &'static str,
        /// Repeated name.
        name: String,
    },
    /// A caller-supplied value is outside its valid range.
    InvalidInput {
        /// Dotted path of the offending value.
        field: String,
        /// Human-readable constraint description.
        message: String,
    },
}

impl PlanError {
    pub(crate) fn invalid(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidInput {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Returns `true` for configuration failures, `false` for bad caller input.
    pub fn is_configuration(&self) -> bool {
        !matches!(self, Self::InvalidInput { .. })
    }

    /// Dotted scenario path the error refers to, used when reporting against a config file.
    pub fn field(&self) -> String {
        match self {
            Self::UnknownClimate { .. } => "city.climate".to_string(),
            Self::MissingMeasure {
                climate, bucket, ..
            } => format!("climates.{climate}.{}", bucket.key()),
            Self::DuplicateName { table, .. } => (*table).to_string(),
            Self::InvalidInput { field, .. } => field.clone(),
        }
    }
}

impl fmt::Display for PlanError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownClimate { name, available } => write!(
                f,
                "unknown climate \"{name}\", available: {}",
                available.join(", ")
            ),
            Self::MissingMeasure {
                climate,
                bucket,
                measure,
            } => write!(
                f,
                "climate \"{climate}\" schedules unknown measure \"{measure}\" in {bucket}"
            ),
            Self::DuplicateName { table, name } => {
                write!(f, "duplicate name \"{name}\" in {table}")
            }
            Self::InvalidInput { field, message } => write!(f, "invalid {field}: {message}"),
        }
    }
}

impl Error for PlanError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_climate_lists_alternatives() {
        let err = PlanError::UnknownClimate {
            name: "Tropical".to_string(),
            available: vec!["Moderate".to_string(), "Sunny".to_string()],
        };
        assert_eq!(
            err.to_string(),
            "unknown climate \"Tropical\", available: Moderate, Sunny"
        );
        assert!(err.is_configuration());
        assert_eq!(err.field(), "city.climate");
    }

    #[test]
    fn missing_measure_points_at_bucket() {
        let err = PlanError::MissingMeasure {
            climate: "Sunny".to_string(),
            bucket: Bucket::EarlyYears,
            measure: "Heat_pump".to_string(),
        };
        assert_eq!(err.field(), "climates.Sunny.years_2_4");
        assert!(err.to_string().contains("Heat_pump"));
    }

    #[test]
    fn invalid_input_is_not_configuration() {
        let err = PlanError::invalid("buildings.apartments", "must be >= 0");
        assert!(!err.is_configuration());
        assert_eq!(err.field(), "buildings.apartments");
    }
}
