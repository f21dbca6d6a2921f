use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Invalid data: {0}")]
    InvalidData(String),
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("GeoJSON error: {0}")]
    GeoJsonError(String),
    #[error(transparent)]
    Planner(#[from] PlannerError),
}

/// Failures of a single journey query. None of them leaves the network in a
/// modified state, the planner can be queried again right away.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PlannerError {
    #[error("Invalid time format: {0:?} (expected HH;MM or HH;MM;SS)")]
    InvalidTime(String),
    #[error("Stop name must not be empty")]
    EmptyStopName,
    #[error("No stops found with the name: {0}")]
    UnknownStop(String),
    #[error("Start and destination are the same: {0}")]
    SameOriginDestination(String),
    #[error("Inconsistent network data: {0}")]
    StructuralInconsistency(String),
}

impl PlannerError {
    /// True for errors caused by the query itself rather than by the network
    pub fn is_invalid_input(&self) -> bool {
        !matches!(self, PlannerError::StructuralInconsistency(_))
    }
}
