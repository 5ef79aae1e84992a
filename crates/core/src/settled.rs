use crate::{ImpellerState, ValueRange};

/// Tolerances that decide when an impelled value has come to rest.
///
/// A channel is *settled* when it is within `max_difference` of its target
/// **and** moving no faster than `max_velocity`. Both conditions must hold at
/// the same time; a value that merely passes through its target is not settled.
///
/// # Examples
///
/// ```
/// use impel_core::Settled1f;
///
/// let at_target = Settled1f::new(0.1, 0.01);
///
/// assert!(at_target.settled(0.05, 0.0));
/// assert!(!at_target.settled(0.05, 0.5));
/// assert!(!at_target.settled(1.0, 0.0));
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Settled1f {
    /// Largest distance from the target that still counts as arrived.
    pub max_difference: f32,
    /// Largest speed that still counts as stopped.
    pub max_velocity: f32,
}

/// A channel's distance to its target and current velocity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Progress {
    /// Signed, range-aware distance from the current value to the target.
    pub difference: f32,
    /// Current rate of change.
    pub velocity: f32,
}

/// Anything whose progress toward a target can be checked by [`Settled1f`].
pub trait Settleable {
    /// Returns the current progress, or `None` if there is nothing to check
    /// (for example, a handle that is not bound to a simulation).
    fn progress(&self) -> Option<Progress>;
}

impl Settled1f {
    #[must_use]
    pub fn new(max_difference: f32, max_velocity: f32) -> Self {
        Self {
            max_difference,
            max_velocity,
        }
    }

    /// Returns `true` if both `difference` and `velocity` are within tolerance.
    #[must_use]
    pub fn settled(&self, difference: f32, velocity: f32) -> bool {
        difference.abs() <= self.max_difference && velocity.abs() <= self.max_velocity
    }

    /// Evaluates the predicate against a raw simulation state.
    #[must_use]
    pub fn settled_state(&self, state: &ImpellerState, range: &ValueRange) -> bool {
        self.settled(state.difference(range), state.velocity)
    }

    /// Evaluates the predicate against any [`Settleable`] channel.
    ///
    /// Channels that report no progress are never settled.
    #[must_use]
    pub fn is_settled<S: Settleable + ?Sized>(&self, channel: &S) -> bool {
        channel
            .progress()
            .is_some_and(|p| self.settled(p.difference, p.velocity))
    }
}

impl Settleable for Progress {
    fn progress(&self) -> Option<Progress> {
        Some(*self)
    }
}
