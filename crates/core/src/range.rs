/// The domain an impelled value lives in.
///
/// A range is either *modular*, where values wrap around like angles, or
/// *bounded*, where values are clamped to the closed interval `[min, max]`.
///
/// Modular ranges keep values in the right-open interval `[min, max)` and
/// measure distances along the shorter of the two arcs between two values.
///
/// # Examples
///
/// ```
/// use std::f32::consts::PI;
///
/// use impel_core::ValueRange;
///
/// let angles = ValueRange::modular(-PI, PI);
///
/// // Moving past +π wraps around to the negative side.
/// assert!(angles.normalize(PI + 0.1) < 0.0);
///
/// // The shortest way from +π to -π + 1 is forward by one radian.
/// assert!((angles.distance(PI, -PI + 1.0) - 1.0).abs() < 1e-5);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ValueRange {
    min: f32,
    max: f32,
    modular: bool,
}

/// Which side of a bounded range, if any, a value was clamped to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Clamped {
    /// The value was already within the range.
    Within,
    /// The value was raised to the minimum.
    Min,
    /// The value was lowered to the maximum.
    Max,
}

impl Clamped {
    /// Removes any part of `velocity` that pushes further past the clamped bound.
    ///
    /// Velocity pointing back into the range is kept.
    #[must_use]
    pub fn stop_outward(self, velocity: f32) -> f32 {
        match self {
            Self::Within => velocity,
            Self::Min => velocity.max(0.0),
            Self::Max => velocity.min(0.0),
        }
    }
}

impl ValueRange {
    /// Creates a range that wraps values into `[min, max)`.
    #[must_use]
    pub fn modular(min: f32, max: f32) -> Self {
        Self {
            min,
            max,
            modular: true,
        }
    }

    /// Creates a range that clamps values into `[min, max]`.
    #[must_use]
    pub fn bounded(min: f32, max: f32) -> Self {
        Self {
            min,
            max,
            modular: false,
        }
    }

    #[must_use]
    pub fn min(&self) -> f32 {
        self.min
    }

    #[must_use]
    pub fn max(&self) -> f32 {
        self.max
    }

    #[must_use]
    pub fn is_modular(&self) -> bool {
        self.modular
    }

    /// Returns `max - min`.
    #[must_use]
    pub fn width(&self) -> f32 {
        self.max - self.min
    }

    /// Wraps `value` into `[min, max)` for modular ranges.
    ///
    /// Bounded ranges return `value` unchanged; use [`ValueRange::clamp`] to
    /// bring a value into a bounded range.
    #[must_use]
    pub fn normalize(&self, value: f32) -> f32 {
        if self.modular {
            wrap(value, self.min, self.width())
        } else {
            value
        }
    }

    /// Returns the signed distance travelled when moving from `from` to `to`.
    ///
    /// For modular ranges this is the shorter way around, in
    /// `[-width / 2, width / 2)`. For bounded ranges it is `to - from`.
    #[must_use]
    pub fn distance(&self, from: f32, to: f32) -> f32 {
        let difference = to - from;
        if !self.modular {
            return difference;
        }

        let width = self.width();
        let half = 0.5 * width;
        wrap(difference, -half, width)
    }

    /// Clamps `value` into `[min, max]` and reports which bound, if any, applied.
    ///
    /// Modular ranges never clamp; they report [`Clamped::Within`] with the
    /// normalized value.
    #[must_use]
    pub fn clamp(&self, value: f32) -> (f32, Clamped) {
        if self.modular {
            (self.normalize(value), Clamped::Within)
        } else if value < self.min {
            (self.min, Clamped::Min)
        } else if value > self.max {
            (self.max, Clamped::Max)
        } else {
            (value, Clamped::Within)
        }
    }

    /// Returns `true` if `value` lies within the range's valid interval.
    ///
    /// That is `[min, max)` for modular ranges and `[min, max]` otherwise.
    #[must_use]
    pub fn contains(&self, value: f32) -> bool {
        if self.modular {
            (self.min..self.max).contains(&value)
        } else {
            (self.min..=self.max).contains(&value)
        }
    }
}

impl Default for ValueRange {
    /// The bounded unit interval `[0, 1]`.
    fn default() -> Self {
        Self::bounded(0.0, 1.0)
    }
}

/// Wraps `value` into `[start, start + width)`.
fn wrap(value: f32, start: f32, width: f32) -> f32 {
    if width.is_nan() || width <= 0.0 || !value.is_finite() {
        return value;
    }

    let wrapped = start + (value - start).rem_euclid(width);

    // `rem_euclid` can round up to exactly `width` for tiny negative offsets.
    if wrapped >= start + width {
        start
    } else {
        wrapped
    }
}
