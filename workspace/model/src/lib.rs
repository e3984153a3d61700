//! Domain model for the rental forecasting plan.
//!
//! The types here mirror the persisted snapshot shape one-to-one: a plan is a
//! single serializable object holding the global settings, the ordered lease
//! segments, and the three sparse override maps. Everything derived from the
//! plan (per-month rows, running totals) lives in the `compute` crate.

pub mod lease;
pub mod plan;
pub mod window;

pub use lease::{LeaseSegment, MoveOutDetails, SegmentKind};
pub use plan::{ForecastPlan, RepairEntry};
pub use window::AnalysisWindow;

// Re-export tracing for use in this crate
pub use tracing;
