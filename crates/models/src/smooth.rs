use impel_core::{ImpelInit, ImpelModel, ImpellerState, ModelKind, registry, time};

/// An exponential-approach model that never overshoots.
///
/// Each pass closes a fixed fraction of the remaining distance, set by the
/// configuration's smoothing half-life:
///
/// ```text
/// step     = difference * (1 - 0.5^(dt / half_life))
/// step     = clamp(step, ±min(max_delta, max_velocity * dt))
/// velocity = step / dt
/// ```
///
/// The fraction lies in `(0, 1)` and the caps only shorten the step, so the
/// value approaches its target monotonically. The incoming velocity, the
/// acceleration constant, and the wrong-direction multiplier are not used.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SmoothModel;

impl SmoothModel {
    /// The kind under which this model registers.
    pub const KIND: ModelKind = ModelKind::new("smooth");

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

impl ImpelModel for SmoothModel {
    fn kind(&self) -> ModelKind {
        Self::KIND
    }

    fn step(&mut self, init: &ImpelInit, dt_ms: f32, state: &mut ImpellerState) {
        let range = init.range();
        let difference = state.difference(range);

        let half_life = time::as_millis(init.smoothing_half_life());
        let fraction = 1.0 - 0.5_f32.powf(dt_ms / half_life);
        let limit = init.max_delta().min(init.max_velocity() * dt_ms);
        let delta = (difference * fraction).max(-limit).min(limit);
        let velocity = delta / dt_ms;

        let (proposed, velocity) = if init.at_target().settled(difference - delta, velocity) {
            (state.target_value, 0.0)
        } else {
            (state.value + delta, velocity)
        };

        let (value, clamped) = range.clamp(proposed);
        state.value = value;
        state.velocity = clamped.stop_outward(velocity);
    }
}
