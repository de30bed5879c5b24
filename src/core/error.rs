use thiserror::Error;

/// Rejected launch parameter. Raised before any sample is computed.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum ValidationError {
    #[error("Velocity cannot be negative (got {value} m/s).")]
    NegativeVelocity { value: f64 },

    #[error("Angle must be between 0 and 90 degrees (got {value}).")]
    AngleOutOfRange { value: f64 },

    #[error("Initial height cannot be negative (got {value} m).")]
    NegativeInitialHeight { value: f64 },

    #[error("Gravity must be a positive value (got {value} m/s^2).")]
    NonPositiveGravity { value: f64 },

    #[error("{parameter} must be a finite number (got {value}).")]
    NonFinite { parameter: &'static str, value: f64 },
}

#[derive(Clone, Debug, PartialEq, Error)]
pub enum SimulationError {
    #[error(transparent)]
    Invalid(#[from] ValidationError),

    #[error("Trajectory did not reach the ground within {limit} samples; inputs are too extreme.")]
    DomainOverflow { limit: usize },
}
