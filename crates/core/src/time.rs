use uom::si::{f64::Time, time::millisecond};

/// Converts a [`Time`] into the millisecond scale that tuning rates use.
///
/// Velocities and accelerations in an [`ImpelInit`](crate::ImpelInit) are
/// expressed per millisecond, so models integrate in milliseconds.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn as_millis(time: Time) -> f32 {
    time.get::<millisecond>() as f32
}

/// Creates a [`Time`] from a number of milliseconds.
#[must_use]
pub fn millis(ms: f64) -> Time {
    Time::new::<millisecond>(ms)
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use uom::si::time::second;

    #[test]
    fn round_trips_frame_sized_times() {
        assert_relative_eq!(as_millis(millis(10.0)), 10.0);
        assert_relative_eq!(as_millis(Time::new::<second>(0.5)), 500.0);
    }
}
