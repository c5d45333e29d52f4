//! Scalar ranges: valid ray parameters and keyframe time spans.

/// A range of `f32` values between `min` and `max`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Interval {
    pub min: f32,
    pub max: f32,
}

impl Interval {
    pub fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    /// Length of the interval (max - min).
    pub fn size(&self) -> f32 {
        self.max - self.min
    }

    /// True if `x` lies strictly between the bounds.
    pub fn surrounds(&self, x: f32) -> bool {
        self.min < x && x < self.max
    }

    /// Position of x inside the interval, 0 at min and 1 at max.
    ///
    /// Degenerate intervals map everything to 0.
    pub fn fraction(&self, x: f32) -> f32 {
        let size = self.size();
        if size > 0.0 {
            (x - self.min) / size
        } else {
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interval_size() {
        assert_eq!(Interval::new(2.0, 7.0).size(), 5.0);
        assert_eq!(Interval::new(-5.0, 5.0).size(), 10.0);
    }

    #[test]
    fn test_surrounds_excludes_bounds() {
        let ahead = Interval::new(1e-5, f32::INFINITY);

        assert!(!ahead.surrounds(0.0));
        assert!(!ahead.surrounds(1e-5));
        assert!(ahead.surrounds(2e-5));
        assert!(ahead.surrounds(1e30));
        assert!(!ahead.surrounds(f32::INFINITY));
    }

    #[test]
    fn test_fraction() {
        let span = Interval::new(2.0, 6.0);
        assert_eq!(span.fraction(2.0), 0.0);
        assert_eq!(span.fraction(3.0), 0.25);
        assert_eq!(span.fraction(6.0), 1.0);

        assert_eq!(Interval::new(3.0, 3.0).fraction(3.0), 0.0);
    }
}
