/// Climate profiles and year buckets.
pub mod climate;
pub mod error;
pub mod kpi;
/// Efficiency measure catalog.
pub mod measure;
pub mod simulator;
pub mod types;

pub use error::PlanError;
pub use simulator::{Simulator, simulate};
