use std::collections::TryReserveError;

/// Error types for flight path construction and trail maintenance.
#[derive(Debug)]
pub enum FlightError {
    /// A path needs at least two waypoints.
    TooFewWaypoints { count: usize },
    /// Waypoint `index` coincides with its predecessor (or, on a closed
    /// path, the last waypoint coincides with the first).
    DuplicateWaypoint { index: usize },
    NonFiniteWaypoint { index: usize },
    /// The trail buffer could not grow. Unrecoverable for the session.
    TrailExhausted(TryReserveError),
}

impl From<TryReserveError> for FlightError {
    fn from(err: TryReserveError) -> Self {
        FlightError::TrailExhausted(err)
    }
}

impl std::fmt::Display for FlightError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FlightError::TooFewWaypoints { count } => {
                write!(f, "Flight path needs at least 2 waypoints, got {}", count)
            }
            FlightError::DuplicateWaypoint { index } => {
                write!(f, "Waypoint {} duplicates the previous waypoint", index)
            }
            FlightError::NonFiniteWaypoint { index } => {
                write!(f, "Waypoint {} has a non-finite coordinate", index)
            }
            FlightError::TrailExhausted(e) => write!(f, "Trail buffer exhausted: {}", e),
        }
    }
}

impl std::error::Error for FlightError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FlightError::TrailExhausted(e) => Some(e),
            _ => None,
        }
    }
}
