//! A spring-like model that overshoots its target and settles.
//!
//! Each pass integrates semi-implicitly:
//!
//! ```text
//! difference = distance(value, target)
//! accel      = difference * accel_per_difference * (wrong_direction ? multiplier : 1)
//! velocity   = clamp(velocity + accel * dt, ±max_velocity)
//! value      = value + clamp(velocity * dt, ±max_delta)
//! ```
//!
//! Moving away from the target multiplies the acceleration, so the channel
//! spends longer moving toward its target than away from it and the
//! oscillation dies out quickly.
//!
//! Once the channel satisfies its `at_target` tolerances the velocity is set
//! to zero and the value snaps onto the target. A channel that is merely
//! stopped, with no acceleration or a zero velocity cap, stays where it is.

use impel_core::{ImpelInit, ImpelModel, ImpellerState, ModelKind, registry};

/// The overshoot-and-settle motion model.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OvershootModel;

impl OvershootModel {
    /// The kind under which this model registers.
    pub const KIND: ModelKind = ModelKind::new("overshoot");

    /// Registers this model with the process-wide registry.
    ///
    /// Returns `false` if it was already registered.
    pub fn register() -> bool {
        registry::register(Self::KIND, || Box::new(Self))
    }

    /// Returns a default configuration that selects this model.
    #[must_use]
    pub fn init() -> ImpelInit {
        ImpelInit::new(Self::KIND)
    }
}

impl ImpelModel for OvershootModel {
    fn kind(&self) -> ModelKind {
        Self::KIND
    }

    fn step(&mut self, init: &ImpelInit, dt_ms: f32, state: &mut ImpellerState) {
        let range = init.range();
        let difference = state.difference(range);
        let (velocity, settled) = next_velocity(init, difference, state.velocity, dt_ms);

        // A settled channel sits exactly on its target.
        let proposed = if settled {
            state.target_value
        } else {
            state.value + init.clamp_delta(velocity * dt_ms)
        };

        let (value, clamped) = range.clamp(proposed);
        state.value = value;
        state.velocity = clamped.stop_outward(velocity);
    }
}

/// Integrates velocity for one pass.
///
/// Returns the new velocity and whether the channel has settled. A settled
/// channel's velocity is zero.
fn next_velocity(init: &ImpelInit, difference: f32, velocity: f32, dt_ms: f32) -> (f32, bool) {
    let wrong_direction = velocity * difference < 0.0;
    let multiplier = if wrong_direction {
        init.wrong_direction_multiplier()
    } else {
        1.0
    };

    let accel = difference * init.accel_per_difference() * multiplier;
    let velocity = init.clamp_velocity(velocity + accel * dt_ms);

    if init.at_target().settled(difference, velocity) {
        (0.0, true)
    } else {
        (velocity, false)
    }
}
