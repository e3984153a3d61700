use thiserror::Error;

/// Error types for the compute module
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ComputeError {
    /// The forecast horizon is outside the supported range.
    #[error("Unsupported forecast horizon: {0} years (expected 1-10)")]
    InvalidHorizon(u32),

    /// The analysis start month is not a calendar month.
    #[error("Invalid analysis start month: {0} (expected 1-12)")]
    InvalidStartMonth(u32),

    /// A lease segment covers no months at all.
    #[error("Lease segment {0} has zero duration")]
    EmptySegment(u64),

    /// The analysis window walked outside the representable calendar range.
    #[error("Month {0} falls outside the representable calendar range")]
    DateRange(u32),
}

/// Type alias for Result with ComputeError
pub type Result<T> = std::result::Result<T, ComputeError>;
