use std::fmt;

use uom::si::f64::Time;

use crate::{ImpelInit, ImpellerState, time};

/// Identifies a registered motion model.
///
/// An [`ImpelInit`] names the kind of model that drives its channels; the
/// [registry](crate::registry) maps each kind to a factory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ModelKind(&'static str);

impl ModelKind {
    #[must_use]
    pub const fn new(name: &'static str) -> Self {
        Self(name)
    }

    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.0
    }
}

impl fmt::Display for ModelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

/// Advances one impelled channel through time.
///
/// Implementors provide [`ImpelModel::step`], which integrates a single pass
/// no longer than the configuration's `max_delta_time`.
/// The provided [`ImpelModel::update`] splits an arbitrary frame time into
/// such passes, so no pass ever applies forces computed for a longer span than
/// the configuration was tuned for.
///
/// A model instance is created per channel, so implementations may keep
/// per-channel bookkeeping in `self`.
pub trait ImpelModel: fmt::Debug {
    /// Returns the kind this model was registered under.
    fn kind(&self) -> ModelKind;

    /// Integrates `state` forward by `dt_ms` milliseconds.
    ///
    /// Callers guarantee `0 < dt_ms <= max_delta_time`.
    fn step(&mut self, init: &ImpelInit, dt_ms: f32, state: &mut ImpellerState);

    /// Advances `state` by `delta_time`.
    ///
    /// Zero, negative, or NaN times leave the state untouched.
    /// Times longer than `max_delta_time` are integrated as several passes,
    /// the last one taking the remainder. At most [`MAX_PASSES_PER_UPDATE`]
    /// passes run; time beyond that is dropped, as if the frame had been
    /// clamped.
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_precision_loss,
        clippy::cast_sign_loss
    )]
    fn update(&mut self, init: &ImpelInit, delta_time: Time, state: &mut ImpellerState) {
        let max_pass = time::as_millis(init.max_delta_time());
        let requested = time::as_millis(delta_time);

        if max_pass.is_nan() || max_pass <= 0.0 || requested.is_nan() || requested <= 0.0 {
            return;
        }

        let cap = MAX_PASSES_PER_UPDATE as f32 * max_pass;
        let total = if requested > cap {
            tracing::warn!(
                requested_ms = requested,
                integrated_ms = cap,
                "frame time exceeds the pass limit; dropping the excess"
            );
            cap
        } else {
            requested
        };

        let passes = ((total / max_pass).ceil() as u32).min(MAX_PASSES_PER_UPDATE);
        for pass in 0..passes {
            let dt = (total - pass as f32 * max_pass).min(max_pass);
            if dt > 0.0 {
                self.step(init, dt, state);
            }
        }
    }
}

/// The most passes a single [`ImpelModel::update`] will run.
///
/// With the default 10 ms `max_delta_time` this covers 100 seconds of
/// simulated time in one frame.
pub const MAX_PASSES_PER_UPDATE: u32 = 10_000;
