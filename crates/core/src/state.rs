use crate::ValueRange;

/// The mutable simulation state of one impelled channel.
///
/// Callers set the state once when binding a channel; afterwards only the
/// channel's model changes it, once per engine frame.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ImpellerState {
    pub value: f32,
    pub velocity: f32,
    pub target_value: f32,
}

impl ImpellerState {
    #[must_use]
    pub fn new(value: f32, velocity: f32, target_value: f32) -> Self {
        Self {
            value,
            velocity,
            target_value,
        }
    }

    /// A motionless state that is already at its target.
    #[must_use]
    pub fn at_rest(value: f32) -> Self {
        Self::new(value, 0.0, value)
    }

    /// Returns the signed distance from `value` to `target_value` within `range`.
    #[must_use]
    pub fn difference(&self, range: &ValueRange) -> f32 {
        range.distance(self.value, self.target_value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    #[test]
    fn at_rest_has_no_difference() {
        let state = ImpellerState::at_rest(42.0);
        assert_relative_eq!(state.velocity, 0.0);
        assert_relative_eq!(state.difference(&ValueRange::bounded(0.0, 100.0)), 0.0);
    }

    #[test]
    fn difference_points_toward_target() {
        let state = ImpellerState::new(10.0, 0.0, 30.0);
        assert_relative_eq!(state.difference(&ValueRange::bounded(0.0, 100.0)), 20.0);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn saved_state_restores_a_channel() {
        let json = r#"{ "value": 12.5, "velocity": -0.25, "target_value": 40.0 }"#;

        let state: ImpellerState = serde_json::from_str(json).unwrap();
        assert_eq!(state, ImpellerState::new(12.5, -0.25, 40.0));

        let saved = serde_json::to_value(state).unwrap();
        assert_eq!(saved["target_value"], 40.0);
    }
}
