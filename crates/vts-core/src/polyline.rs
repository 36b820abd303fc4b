//! `Polyline` — an ordered coordinate sequence with distance-parameterized
//! queries.
//!
//! A mission's route geometry is a polyline; the agent's only notion of
//! position is "meters along this polyline".  All queries here share the
//! planar metric from [`geo`](crate::geo) so cumulative progress and stored
//! geometry never disagree.

use crate::geo::GeoPoint;

/// How far ahead (meters) `bearing_at` looks to estimate the tangent heading.
const LOOKAHEAD_M: f64 = 5.0;

/// An immutable polyline with precomputed cumulative segment lengths.
#[derive(Clone, Debug)]
pub struct Polyline {
    points: Vec<GeoPoint>,
    /// `cum_m[i]` = meters from the start to `points[i]`.  Same length as
    /// `points`; `cum_m[0] == 0`.
    cum_m: Vec<f64>,
}

impl Polyline {
    /// Construct from a coordinate sequence.
    ///
    /// A single-point polyline is valid (zero length, every query returns
    /// that point).  An empty sequence is not.
    ///
    /// # Panics
    /// Panics in debug mode if `points` is empty.
    pub fn new(points: Vec<GeoPoint>) -> Self {
        debug_assert!(!points.is_empty(), "polyline needs at least one point");
        let mut cum_m = Vec::with_capacity(points.len());
        let mut total = 0.0;
        cum_m.push(0.0);
        for w in points.windows(2) {
            total += w[0].planar_distance_m(w[1]);
            cum_m.push(total);
        }
        Self { points, cum_m }
    }

    /// Total length in meters.
    #[inline]
    pub fn length_m(&self) -> f64 {
        *self.cum_m.last().unwrap_or(&0.0)
    }

    /// The raw coordinate sequence.
    #[inline]
    pub fn points(&self) -> &[GeoPoint] {
        &self.points
    }

    /// The first coordinate (route start / depot).
    #[inline]
    pub fn start(&self) -> GeoPoint {
        self.points[0]
    }

    /// The point at `meters` along the line.  Clamped to `[0, length_m]`.
    pub fn point_at(&self, meters: f64) -> GeoPoint {
        let m = meters.clamp(0.0, self.length_m());
        if self.points.len() == 1 {
            return self.points[0];
        }
        // First segment whose far endpoint is at or beyond m.
        let i = self.cum_m.partition_point(|&c| c < m).max(1);
        let i = i.min(self.points.len() - 1);
        let seg_start = self.cum_m[i - 1];
        let seg_len = self.cum_m[i] - seg_start;
        let t = if seg_len > 0.0 { (m - seg_start) / seg_len } else { 0.0 };
        let a = self.points[i - 1];
        let b = self.points[i];
        GeoPoint::new(a.lat + (b.lat - a.lat) * t, a.lon + (b.lon - a.lon) * t)
    }

    /// Tangent heading at `meters`, from the bearing to a short lookahead
    /// point further along the line.  Near the end the window slides
    /// backwards so the bearing stays well-defined.
    pub fn bearing_at(&self, meters: f64) -> f64 {
        let len = self.length_m();
        if len == 0.0 {
            return 0.0;
        }
        let m = meters.clamp(0.0, len);
        let (a, b) = if m + LOOKAHEAD_M <= len {
            (self.point_at(m), self.point_at(m + LOOKAHEAD_M))
        } else {
            (self.point_at((len - LOOKAHEAD_M).max(0.0)), self.point_at(len))
        };
        a.bearing_to(b)
    }

    /// Project `p` onto the line: meters along the polyline of the nearest
    /// point to `p`.  Linear scan over segments.
    ///
    /// Used to reconcile route progress after a forced checkpoint moves the
    /// vehicle off its interpolated position.
    pub fn project(&self, p: GeoPoint) -> f64 {
        if self.points.len() < 2 {
            return 0.0;
        }
        let mut best_d2 = f64::INFINITY;
        let mut best_m = 0.0;
        for i in 1..self.points.len() {
            let a = self.points[i - 1];
            let b = self.points[i];
            let abx = b.lon - a.lon;
            let aby = b.lat - a.lat;
            let seg2 = abx * abx + aby * aby;
            let t = if seg2 > 0.0 {
                (((p.lon - a.lon) * abx + (p.lat - a.lat) * aby) / seg2).clamp(0.0, 1.0)
            } else {
                0.0
            };
            let fx = a.lon + abx * t;
            let fy = a.lat + aby * t;
            let dx = p.lon - fx;
            let dy = p.lat - fy;
            let d2 = dx * dx + dy * dy;
            if d2 < best_d2 {
                best_d2 = d2;
                best_m = self.cum_m[i - 1] + (self.cum_m[i] - self.cum_m[i - 1]) * t;
            }
        }
        best_m
    }
}
