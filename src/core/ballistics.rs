use serde::Serialize;

use crate::core::error::{SimulationError, ValidationError};

pub const EARTH_GRAVITY_MPS2: f64 = 9.8;
pub const SAMPLE_STEP_S: f64 = 0.05;
pub const MAX_SAMPLES: usize = 1_000_000;

/// Launch conditions that passed validation. Immutable once built.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct ProjectileParameters {
    speed_mps: f64,
    angle_deg: f64,
    height_m: f64,
    gravity_mps2: f64,
}

impl ProjectileParameters {
    pub fn new(
        speed_mps: f64,
        angle_deg: f64,
        height_m: f64,
        gravity_mps2: f64,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            speed_mps: check_speed(speed_mps)?,
            angle_deg: check_angle(angle_deg)?,
            height_m: check_height(height_m)?,
            gravity_mps2: check_gravity(gravity_mps2)?,
        })
    }

    pub fn speed_mps(&self) -> f64 {
        self.speed_mps
    }

    pub fn angle_deg(&self) -> f64 {
        self.angle_deg
    }

    pub fn height_m(&self) -> f64 {
        self.height_m
    }

    pub fn gravity_mps2(&self) -> f64 {
        self.gravity_mps2
    }
}

fn require_finite(parameter: &'static str, value: f64) -> Result<f64, ValidationError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ValidationError::NonFinite { parameter, value })
    }
}

pub fn check_speed(value: f64) -> Result<f64, ValidationError> {
    let value = require_finite("Velocity", value)?;
    if value < 0.0 {
        return Err(ValidationError::NegativeVelocity { value });
    }
    Ok(value)
}

pub fn check_angle(value: f64) -> Result<f64, ValidationError> {
    let value = require_finite("Angle", value)?;
    if !(0.0..=90.0).contains(&value) {
        return Err(ValidationError::AngleOutOfRange { value });
    }
    Ok(value)
}

pub fn check_height(value: f64) -> Result<f64, ValidationError> {
    let value = require_finite("Initial height", value)?;
    if value < 0.0 {
        return Err(ValidationError::NegativeInitialHeight { value });
    }
    Ok(value)
}

pub fn check_gravity(value: f64) -> Result<f64, ValidationError> {
    let value = require_finite("Gravity", value)?;
    if value <= 0.0 {
        return Err(ValidationError::NonPositiveGravity { value });
    }
    Ok(value)
}

pub fn velocity_components(params: &ProjectileParameters) -> (f64, f64) {
    let theta = params.angle_deg.to_radians();
    let vx = params.speed_mps * theta.cos();
    let vy = params.speed_mps * theta.sin();
    (vx, vy)
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct TrajectorySample {
    pub t: f64,
    pub x: f64,
    pub y: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Summary {
    pub max_height_m: f64,
    pub total_distance_m: f64,
}

impl Summary {
    fn starting_at(sample: &TrajectorySample) -> Self {
        Self {
            max_height_m: sample.y,
            total_distance_m: sample.x,
        }
    }

    fn include(self, sample: &TrajectorySample) -> Self {
        Self {
            max_height_m: self.max_height_m.max(sample.y),
            total_distance_m: self.total_distance_m.max(sample.x),
        }
    }
}

/// Max height and max horizontal distance over the retained samples.
///
/// Distance is a true maximum rather than the last sample's `x`, so the
/// result does not depend on `x` being monotonic.
pub fn extract_summary(samples: &[TrajectorySample]) -> Option<Summary> {
    let (first, rest) = samples.split_first()?;
    Some(
        rest.iter()
            .fold(Summary::starting_at(first), Summary::include),
    )
}

/// A computed flight: every retained sample plus the derived metrics.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TrajectoryResult {
    parameters: ProjectileParameters,
    samples: Vec<TrajectorySample>,
    flight_time_s: f64,
    max_height_m: f64,
    total_distance_m: f64,
}

impl TrajectoryResult {
    pub fn parameters(&self) -> &ProjectileParameters {
        &self.parameters
    }

    pub fn samples(&self) -> &[TrajectorySample] {
        &self.samples
    }

    /// Time of the step that went below ground, one `SAMPLE_STEP_S` past
    /// the last retained sample.
    pub fn flight_time_s(&self) -> f64 {
        self.flight_time_s
    }

    pub fn max_height_m(&self) -> f64 {
        self.max_height_m
    }

    pub fn total_distance_m(&self) -> f64 {
        self.total_distance_m
    }

    pub fn launch(&self) -> TrajectorySample {
        self.samples[0]
    }

    /// Last point above ground. The launch sample is always retained, so
    /// this never indexes an empty sequence.
    pub fn impact(&self) -> TrajectorySample {
        self.samples[self.samples.len() - 1]
    }
}

/// Closed-form flight metrics, used as a reference next to the sampled ones.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct AnalyticSolution {
    pub flight_time_s: f64,
    pub max_height_m: f64,
    pub range_m: f64,
}

impl AnalyticSolution {
    pub fn for_parameters(params: &ProjectileParameters) -> Self {
        let (vx, vy) = velocity_components(params);
        let g = params.gravity_mps2;

        // Positive root of 0.5*g*t^2 - vy*t - height = 0
        let disc = vy * vy + 2.0 * g * params.height_m;
        let flight_time_s = (vy + disc.sqrt()) / g;

        Self {
            flight_time_s,
            max_height_m: params.height_m + (vy * vy) / (2.0 * g),
            range_m: vx * flight_time_s,
        }
    }
}

pub struct TrajectorySampler {
    params: ProjectileParameters,
    vx: f64,
    vy: f64,
    max_samples: usize,
}

impl TrajectorySampler {
    pub fn new(params: ProjectileParameters) -> Self {
        let (vx, vy) = velocity_components(&params);
        Self {
            params,
            vx,
            vy,
            max_samples: MAX_SAMPLES,
        }
    }

    pub fn with_max_samples(mut self, max_samples: usize) -> Self {
        self.max_samples = max_samples.max(1);
        self
    }

    pub fn position_at(&self, time_s: f64) -> (f64, f64) {
        let x = self.vx * time_s;
        let y = self.params.height_m + (self.vy * time_s)
            - (0.5 * self.params.gravity_mps2 * time_s * time_s);
        (x, y)
    }

    pub fn compute_trajectory(&self) -> Result<TrajectoryResult, SimulationError> {
        let launch = TrajectorySample {
            t: 0.0,
            x: 0.0,
            y: self.params.height_m,
        };
        let mut samples = vec![launch];

        // Time comes from the step index so it does not drift over long flights.
        let mut step = 1usize;
        let flight_time_s = loop {
            let t = step as f64 * SAMPLE_STEP_S;
            let (x, y) = self.position_at(t);
            if y < 0.0 {
                break t;
            }
            if samples.len() >= self.max_samples {
                return Err(SimulationError::DomainOverflow {
                    limit: self.max_samples,
                });
            }
            samples.push(TrajectorySample { t, x, y });
            step += 1;
        };

        let summary = extract_summary(&samples).unwrap_or(Summary::starting_at(&launch));

        Ok(TrajectoryResult {
            parameters: self.params,
            samples,
            flight_time_s,
            max_height_m: summary.max_height_m,
            total_distance_m: summary.total_distance_m,
        })
    }
}

pub fn compute(params: ProjectileParameters) -> Result<TrajectoryResult, SimulationError> {
    TrajectorySampler::new(params).compute_trajectory()
}
