use thiserror::Error;

/// Top-level error type for the geometry kernel.
#[derive(Debug, Error)]
pub enum KernelError {
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error(transparent)]
    Topology(#[from] TopologyError),

    #[error(transparent)]
    Operation(#[from] OperationError),

    #[error(transparent)]
    Tessellation(#[from] TessellationError),
}

/// Errors related to geometric computations.
#[derive(Debug, Error)]
pub enum GeometryError {
    #[error("parameter {parameter} = {value} is out of range [{min}, {max}]")]
    ParameterOutOfRange {
        parameter: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("degenerate geometry: {0}")]
    Degenerate(String),

    #[error("zero-length vector")]
    ZeroVector,
}

/// Errors related to topological lookups and construction.
#[derive(Debug, Error)]
pub enum TopologyError {
    #[error("entity not found: {0}")]
    EntityNotFound(String),

    #[error("wire is not closed")]
    WireNotClosed,

    #[error("invalid topology: {0}")]
    InvalidTopology(String),
}

/// Errors related to kernel operations and queries.
#[derive(Debug, Error)]
pub enum OperationError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("operation failed: {0}")]
    Failed(String),

    #[error("computation did not converge: {0}")]
    NotConverged(String),
}

/// Errors related to tessellation.
#[derive(Debug, Error)]
pub enum TessellationError {
    #[error("invalid tessellation parameters: {0}")]
    InvalidParameters(String),

    #[error("tessellation failed: {0}")]
    Failed(String),
}

/// Convenience type alias for results using [`KernelError`].
pub type Result<T> = std::result::Result<T, KernelError>;

/// Why a measurement produced no value.
///
/// None of these is fatal: the controller logs the diagnostic and simply
/// creates no display for the input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MeasureError {
    /// The picked entity is of the wrong kind for the requested measurement.
    #[error("{0}")]
    NotApplicable(String),

    /// The kernel ran but produced no usable data.
    #[error("{0}")]
    ComputationFailed(String),

    /// The input is of a supported kind but the computation does not exist yet.
    #[error("{0}")]
    Unimplemented(String),
}

impl MeasureError {
    /// Create a not-applicable error.
    #[must_use]
    pub fn not_applicable(message: impl Into<String>) -> Self {
        Self::NotApplicable(message.into())
    }

    /// Create a computation-failed error.
    #[must_use]
    pub fn computation_failed(message: impl Into<String>) -> Self {
        Self::ComputationFailed(message.into())
    }

    /// Create an unimplemented-capability error.
    #[must_use]
    pub fn unimplemented(message: impl Into<String>) -> Self {
        Self::Unimplemented(message.into())
    }

    /// Returns the human-readable diagnostic.
    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            Self::NotApplicable(msg) | Self::ComputationFailed(msg) | Self::Unimplemented(msg) => {
                msg
            }
        }
    }
}

/// Result type alias for measurement driver operations.
pub type MeasureResult<T> = std::result::Result<T, MeasureError>;

/// A unit token that names no known unit.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {kind} unit: {token:?}")]
pub struct UnitError {
    /// Which family of units was being parsed ("length" or "angle").
    pub kind: &'static str,
    /// The rejected token.
    pub token: String,
}

/// Errors reading or writing a measurement configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid measurement configuration: {0}")]
    Json(#[from] serde_json::Error),
}
