//! Piecewise cubic Hermite curves over 3D control points.

use nalgebra::{Point3, Vector3};

use crate::table::{ArcLengthTable, TABLE_SAMPLES};

/// Hermite spline through 3D control points with per-point tangents.
///
/// N points define N-1 segments spanned uniformly by a global parameter
/// u in [0, 1]. Tangents are stored both raw and pre-scaled by 1/(N-1), so
/// segment evaluation works in local coordinates; the scaled copies are
/// refreshed whenever the point count changes. An arc-length table rebuilt on
/// every mutation supports constant-speed traversal.
#[derive(Debug, Clone, Default)]
pub struct Spline {
    points: Vec<Point3<f64>>,
    tangents: Vec<Vector3<f64>>,
    scaled_tangents: Vec<Vector3<f64>>,
    table: ArcLengthTable,
}

impl Spline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of control points.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn points(&self) -> &[Point3<f64>] {
        &self.points
    }

    pub fn tangents(&self) -> &[Vector3<f64>] {
        &self.tangents
    }

    /// Drop every control point and tangent, returning to the empty state.
    pub fn clear(&mut self) {
        self.points.clear();
        self.tangents.clear();
        self.scaled_tangents.clear();
        self.table = ArcLengthTable::empty();
    }

    /// Append a control point with its tangent.
    pub fn add_point(&mut self, position: Point3<f64>, tangent: Vector3<f64>) {
        self.points.push(position);
        self.tangents.push(tangent);
        self.rescale_tangents();
        self.rebuild_table();
    }

    /// Replace a control point. Tangent scaling is unaffected.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of range.
    pub fn update_point(&mut self, index: usize, position: Point3<f64>) {
        self.points[index] = position;
        self.rebuild_table();
    }

    /// Replace a tangent.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of range.
    pub fn update_tangent(&mut self, index: usize, tangent: Vector3<f64>) {
        self.tangents[index] = tangent;
        self.rescale_tangents();
        self.rebuild_table();
    }

    /// Position on the curve at global parameter `u`, clamped into [0, 1].
    ///
    /// Returns the origin with fewer than 2 control points.
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::cast_precision_loss
    )]
    pub fn position_at(&self, u: f64) -> Point3<f64> {
        let n = self.points.len();
        if n < 2 {
            return Point3::origin();
        }
        let scaled = u.clamp(0.0, 1.0) * (n - 1) as f64;
        let a = scaled.floor() as usize;
        let b = scaled.ceil() as usize;
        let s = scaled.fract();

        let h00 = 2.0 * s.powi(3) - 3.0 * s.powi(2) + 1.0;
        let h01 = -2.0 * s.powi(3) + 3.0 * s.powi(2);
        let h10 = s.powi(3) - 2.0 * s.powi(2) + s;
        let h11 = s.powi(3) - s.powi(2);

        Point3::from(
            self.points[a].coords * h00
                + self.points[b].coords * h01
                + self.scaled_tangents[a] * h10
                + self.scaled_tangents[b] * h11,
        )
    }

    /// Cumulative arc length from the curve start to parameter `u`.
    pub fn arc_length_at(&self, u: f64) -> f64 {
        self.table.length_at(u)
    }

    /// Parameter whose arc length matches `s`, by table bisection.
    pub fn parameter_at_length(&self, s: f64) -> f64 {
        self.table.parameter_at(s)
    }

    /// Linear ramp in arc length: `t` in [0, 1] maps to `t * total length`.
    pub fn constant_velocity_length(&self, t: f64) -> f64 {
        t * self.table.total_length()
    }

    #[allow(clippy::cast_precision_loss)]
    fn rescale_tangents(&mut self) {
        let n = self.points.len();
        if n < 2 {
            self.scaled_tangents.clone_from(&self.tangents);
            return;
        }
        let scale = 1.0 / (n - 1) as f64;
        self.scaled_tangents.clear();
        self.scaled_tangents
            .extend(self.tangents.iter().map(|t| t * scale));
    }

    fn rebuild_table(&mut self) {
        if self.points.len() < 2 {
            self.table = ArcLengthTable::empty();
            return;
        }
        let table = ArcLengthTable::from_curve(TABLE_SAMPLES, |u| self.position_at(u));
        self.table = table;
    }
}
