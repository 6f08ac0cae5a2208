//! Post-hoc summary metrics of a projection.

use std::fmt;

use serde::Serialize;

use super::types::{KWH_PER_MILLION, Projection};

/// Aggregate indicators derived from a complete projection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectionSummary {
    /// Yearly consumption before any measure (kWh).
    pub base_yearly_kwh: f64,
    /// Consumption in the last simulated year (kWh).
    pub final_yearly_kwh: f64,
    /// `base - final` (kWh).
    pub reduction_kwh: f64,
    /// Reduction relative to the base, in percent; 0 when the base is 0.
    pub reduction_pct: f64,
    /// Sum over years of `base - consumption` (kWh).
    pub cumulative_saved_kwh: f64,
    /// Years in which the budget could not fully fund the scheduled measures.
    pub constrained_years: Vec<u32>,
    /// Mean funding scale across years.
    pub mean_scale: f64,
}

impl ProjectionSummary {
    /// Computes all indicators from the per-year records.
    pub fn from_projection(projection: &Projection) -> Self {
        let base = projection.base_yearly_kwh;
        let final_kwh = projection.final_consumption_kwh();
        let reduction_kwh = base - final_kwh;
        let reduction_pct = if base > 0.0 {
            100.0 * reduction_kwh / base
        } else {
            0.0
        };

        let cumulative_saved_kwh = projection
            .years
            .iter()
            .map(|y| base - y.consumption_kwh)
            .sum();

        let constrained_years = projection
            .years
            .iter()
            .filter(|y| y.is_funding_constrained())
            .map(|y| y.year)
            .collect();

        let mean_scale = if projection.years.is_empty() {
            0.0
        } else {
            projection.years.iter().map(|y| y.scale).sum::<f64>() / projection.years.len() as f64
        };

        Self {
            base_yearly_kwh: base,
            final_yearly_kwh: final_kwh,
            reduction_kwh,
            reduction_pct,
            cumulative_saved_kwh,
            constrained_years,
            mean_scale,
        }
    }
}

impl fmt::Display for ProjectionSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "--- Projection Summary ---")?;
        writeln!(
            f,
            "Base consumption:      {:.2} M kWh/year",
            self.base_yearly_kwh / KWH_PER_MILLION
        )?;
        writeln!(
            f,
            "Year 10 consumption:   {:.2} M kWh/year",
            self.final_yearly_kwh / KWH_PER_MILLION
        )?;
        writeln!(
            f,
            "Reduction:             {:.2} M kWh ({:.1}%)",
            self.reduction_kwh / KWH_PER_MILLION,
            self.reduction_pct
        )?;
        writeln!(
            f,
            "Cumulative savings:    {:.2} M kWh",
            self.cumulative_saved_kwh / KWH_PER_MILLION
        )?;
        writeln!(f, "Mean funding scale:    {:.3}", self.mean_scale)?;
        if self.constrained_years.is_empty() {
            write!(f, "Underfunded years:     none")
        } else {
            let years: Vec<String> = self
                .constrained_years
                .iter()
                .map(ToString::to_string)
                .collect();
            write!(f, "Underfunded years:     {}", years.join(", "))
        }
    }
}
