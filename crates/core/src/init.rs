use thiserror::Error;
use uom::si::f64::Time;

use crate::{ModelKind, Settled1f, ValueRange, time};

/// Configuration shared by every channel driven with the same tuning.
///
/// An `ImpelInit` names the [`ModelKind`] that advances its channels and
/// carries the tuning constants that model reads on every step.
/// It is built once, validated when a channel is bound, and never changed by
/// the engine.
///
/// Rates are per millisecond: `max_velocity` is in value units per ms and
/// `accel_per_difference` is in ms⁻².
///
/// # Example
///
/// ```
/// use std::f32::consts::PI;
///
/// use impel_core::{ImpelInit, ModelKind, Settled1f, ValueRange, time::millis};
///
/// let init = ImpelInit::new(ModelKind::new("overshoot"))
///     .with_range(ValueRange::modular(-PI, PI))
///     .with_max_velocity(0.021)
///     .with_max_delta(3.141)
///     .with_accel_per_difference(0.00032)
///     .with_wrong_direction_multiplier(4.0)
///     .with_max_delta_time(millis(10.0))
///     .with_at_target(Settled1f::new(0.087, 0.00059));
///
/// assert!(init.validate().is_ok());
/// assert!(init.modular());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImpelInit {
    kind: ModelKind,
    range: ValueRange,
    max_velocity: f32,
    max_delta: f32,
    accel_per_difference: f32,
    wrong_direction_multiplier: f32,
    max_delta_time: Time,
    smoothing_half_life: Time,
    at_target: Settled1f,
}

/// Errors that can occur when validating an [`ImpelInit`].
#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum InitError {
    #[error("range bounds must be finite, got [{min}, {max}]")]
    NonFiniteRange { min: f32, max: f32 },

    #[error("range is empty: min {min} is not below max {max}")]
    EmptyRange { min: f32, max: f32 },

    #[error("max_velocity must be non-negative, got {0}")]
    MaxVelocity(f32),

    #[error("max_delta must be non-negative, got {0}")]
    MaxDelta(f32),

    #[error("accel_per_difference must be finite and non-negative, got {0}")]
    AccelPerDifference(f32),

    #[error("wrong_direction_multiplier must be finite and non-negative, got {0}")]
    WrongDirectionMultiplier(f32),

    #[error("max_delta_time must be greater than zero, got {0} ms")]
    MaxDeltaTime(f32),

    #[error("smoothing_half_life must be greater than zero, got {0} ms")]
    SmoothingHalfLife(f32),

    #[error("at_target tolerances must be non-negative")]
    AtTarget,
}

impl ImpelInit {
    /// Creates a configuration for `kind` with permissive defaults.
    ///
    /// The defaults are a bounded `[0, 1]` range, no velocity or delta caps,
    /// no acceleration, a wrong-direction multiplier of one, a 10 ms maximum
    /// step, a 100 ms smoothing half-life, and zero settle tolerances.
    #[must_use]
    pub fn new(kind: ModelKind) -> Self {
        Self {
            kind,
            range: ValueRange::default(),
            max_velocity: f32::INFINITY,
            max_delta: f32::INFINITY,
            accel_per_difference: 0.0,
            wrong_direction_multiplier: 1.0,
            max_delta_time: time::millis(10.0),
            smoothing_half_life: time::millis(100.0),
            at_target: Settled1f::default(),
        }
    }

    /// Checks every tuning constant.
    ///
    /// # Errors
    ///
    /// Returns the first [`InitError`] found.
    pub fn validate(&self) -> Result<(), InitError> {
        let (min, max) = (self.range.min(), self.range.max());
        if !min.is_finite() || !max.is_finite() {
            return Err(InitError::NonFiniteRange { min, max });
        }
        if min >= max {
            return Err(InitError::EmptyRange { min, max });
        }
        if self.max_velocity.is_nan() || self.max_velocity < 0.0 {
            return Err(InitError::MaxVelocity(self.max_velocity));
        }
        if self.max_delta.is_nan() || self.max_delta < 0.0 {
            return Err(InitError::MaxDelta(self.max_delta));
        }
        if !self.accel_per_difference.is_finite() || self.accel_per_difference < 0.0 {
            return Err(InitError::AccelPerDifference(self.accel_per_difference));
        }
        if !self.wrong_direction_multiplier.is_finite() || self.wrong_direction_multiplier < 0.0 {
            return Err(InitError::WrongDirectionMultiplier(
                self.wrong_direction_multiplier,
            ));
        }

        let max_delta_time = time::as_millis(self.max_delta_time);
        if max_delta_time.is_nan() || max_delta_time <= 0.0 {
            return Err(InitError::MaxDeltaTime(max_delta_time));
        }

        let half_life = time::as_millis(self.smoothing_half_life);
        if half_life.is_nan() || half_life <= 0.0 {
            return Err(InitError::SmoothingHalfLife(half_life));
        }

        let Settled1f {
            max_difference,
            max_velocity,
        } = self.at_target;
        if max_difference.is_nan()
            || max_difference < 0.0
            || max_velocity.is_nan()
            || max_velocity < 0.0
        {
            return Err(InitError::AtTarget);
        }

        Ok(())
    }

    #[must_use]
    pub fn with_range(self, range: ValueRange) -> Self {
        Self { range, ..self }
    }

    #[must_use]
    pub fn with_max_velocity(self, max_velocity: f32) -> Self {
        Self {
            max_velocity,
            ..self
        }
    }

    #[must_use]
    pub fn with_max_delta(self, max_delta: f32) -> Self {
        Self { max_delta, ..self }
    }

    #[must_use]
    pub fn with_accel_per_difference(self, accel_per_difference: f32) -> Self {
        Self {
            accel_per_difference,
            ..self
        }
    }

    #[must_use]
    pub fn with_wrong_direction_multiplier(self, wrong_direction_multiplier: f32) -> Self {
        Self {
            wrong_direction_multiplier,
            ..self
        }
    }

    #[must_use]
    pub fn with_max_delta_time(self, max_delta_time: Time) -> Self {
        Self {
            max_delta_time,
            ..self
        }
    }

    #[must_use]
    pub fn with_smoothing_half_life(self, smoothing_half_life: Time) -> Self {
        Self {
            smoothing_half_life,
            ..self
        }
    }

    #[must_use]
    pub fn with_at_target(self, at_target: Settled1f) -> Self {
        Self { at_target, ..self }
    }

    /// Returns the model kind that advances channels using this configuration.
    #[must_use]
    pub fn kind(&self) -> ModelKind {
        self.kind
    }

    #[must_use]
    pub fn range(&self) -> &ValueRange {
        &self.range
    }

    #[must_use]
    pub fn modular(&self) -> bool {
        self.range.is_modular()
    }

    #[must_use]
    pub fn min(&self) -> f32 {
        self.range.min()
    }

    #[must_use]
    pub fn max(&self) -> f32 {
        self.range.max()
    }

    #[must_use]
    pub fn max_velocity(&self) -> f32 {
        self.max_velocity
    }

    #[must_use]
    pub fn max_delta(&self) -> f32 {
        self.max_delta
    }

    #[must_use]
    pub fn accel_per_difference(&self) -> f32 {
        self.accel_per_difference
    }

    #[must_use]
    pub fn wrong_direction_multiplier(&self) -> f32 {
        self.wrong_direction_multiplier
    }

    #[must_use]
    pub fn max_delta_time(&self) -> Time {
        self.max_delta_time
    }

    #[must_use]
    pub fn smoothing_half_life(&self) -> Time {
        self.smoothing_half_life
    }

    /// Returns the tolerances that decide when a channel has settled.
    #[must_use]
    pub fn at_target(&self) -> &Settled1f {
        &self.at_target
    }

    /// Limits `velocity` to `±max_velocity`.
    #[must_use]
    pub fn clamp_velocity(&self, velocity: f32) -> f32 {
        velocity.max(-self.max_velocity).min(self.max_velocity)
    }

    /// Limits a single-step position change to `±max_delta`.
    #[must_use]
    pub fn clamp_delta(&self, delta: f32) -> f32 {
        delta.max(-self.max_delta).min(self.max_delta)
    }
}
