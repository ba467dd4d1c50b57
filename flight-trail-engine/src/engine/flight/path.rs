use bevy::math::Vec3;
use constants::flight::{DEGENERATE_EPSILON, KNOT_EPSILON};
use serde::{Deserialize, Serialize};

use super::error::FlightError;

/// Knot parameterisation of the Catmull-Rom spline.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CurveKind {
    /// Knot spacing proportional to the square root of chord length.
    #[default]
    Centripetal,
    /// Knot spacing proportional to chord length.
    Chordal,
    /// Evenly spaced knots with tension 0.5.
    Uniform,
}

impl CurveKind {
    /// Exponent applied to the squared chord length when spacing knots.
    fn knot_power(self) -> Option<f32> {
        match self {
            CurveKind::Centripetal => Some(0.25),
            CurveKind::Chordal => Some(0.5),
            CurveKind::Uniform => None,
        }
    }
}

/// Cubic polynomial `c0 + c1 u + c2 u^2 + c3 u^3` over one waypoint interval.
#[derive(Debug, Clone, Copy, PartialEq)]
struct CubicSegment {
    c0: Vec3,
    c1: Vec3,
    c2: Vec3,
    c3: Vec3,
}

impl CubicSegment {
    /// Hermite form from endpoints and endpoint tangents.
    fn hermite(x1: Vec3, x2: Vec3, t1: Vec3, t2: Vec3) -> Self {
        Self {
            c0: x1,
            c1: t1,
            c2: -3.0 * x1 + 3.0 * x2 - 2.0 * t1 - t2,
            c3: 2.0 * x1 - 2.0 * x2 + t1 + t2,
        }
    }

    fn catmull_rom(p0: Vec3, p1: Vec3, p2: Vec3, p3: Vec3, kind: CurveKind) -> Self {
        let Some(power) = kind.knot_power() else {
            return Self::hermite(p1, p2, 0.5 * (p2 - p0), 0.5 * (p3 - p1));
        };

        let mut dt0 = p0.distance_squared(p1).powf(power);
        let mut dt1 = p1.distance_squared(p2).powf(power);
        let mut dt2 = p2.distance_squared(p3).powf(power);

        // Coincident knots would divide by zero below
        if dt1 < KNOT_EPSILON {
            dt1 = 1.0;
        }
        if dt0 < KNOT_EPSILON {
            dt0 = dt1;
        }
        if dt2 < KNOT_EPSILON {
            dt2 = dt1;
        }

        let t1 = (p1 - p0) / dt0 - (p2 - p0) / (dt0 + dt1) + (p2 - p1) / dt1;
        let t2 = (p2 - p1) / dt1 - (p3 - p1) / (dt1 + dt2) + (p3 - p2) / dt2;

        Self::hermite(p1, p2, t1 * dt1, t2 * dt1)
    }

    fn position(&self, u: f32) -> Vec3 {
        self.c0 + u * (self.c1 + u * (self.c2 + u * self.c3))
    }

    fn derivative(&self, u: f32) -> Vec3 {
        self.c1 + u * (2.0 * self.c2 + 3.0 * u * self.c3)
    }
}

/// Immutable interpolated flight path through a fixed list of waypoints.
///
/// Progress `t` maps linearly onto the segment index: with `k` segments,
/// segment `i` covers `[i / k, (i + 1) / k)`. A closed path has one extra
/// segment running from the last waypoint back to the first.
#[derive(Debug, Clone)]
pub struct PathModel {
    waypoints: Vec<Vec3>,
    closed: bool,
    kind: CurveKind,
    segments: Vec<CubicSegment>,
}

impl PathModel {
    pub fn new(waypoints: Vec<Vec3>, closed: bool, kind: CurveKind) -> Result<Self, FlightError> {
        validate_waypoints(&waypoints, closed)?;

        let n = waypoints.len();
        let segment_count = if closed { n } else { n - 1 };
        let segments = (0..segment_count)
            .map(|i| {
                let p1 = waypoints[i];
                let p2 = waypoints[(i + 1) % n];
                let p0 = if closed || i > 0 {
                    waypoints[(i + n - 1) % n]
                } else {
                    2.0 * p1 - p2
                };
                let p3 = if closed || i + 2 < n {
                    waypoints[(i + 2) % n]
                } else {
                    2.0 * p2 - p1
                };
                CubicSegment::catmull_rom(p0, p1, p2, p3, kind)
            })
            .collect();

        Ok(Self {
            waypoints,
            closed,
            kind,
            segments,
        })
    }

    pub fn waypoints(&self) -> &[Vec3] {
        &self.waypoints
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    pub fn kind(&self) -> CurveKind {
        self.kind
    }

    pub fn segment_count(&self) -> usize {
        self.segments.len()
    }

    /// Position on the curve. Out-of-range progress wraps into `[0, 1)`.
    pub fn position_at(&self, t: f32) -> Vec3 {
        let (segment, u) = self.locate(normalize_progress(t));
        segment.position(u)
    }

    /// Unit direction of travel, or `Vec3::ZERO` where the derivative vanishes
    /// (cusps). Callers keep their previous valid tangent in that case.
    pub fn tangent_at(&self, t: f32) -> Vec3 {
        let (segment, u) = self.locate(normalize_progress(t));
        let derivative = segment.derivative(u);
        if derivative.length_squared() < DEGENERATE_EPSILON || !derivative.is_finite() {
            return Vec3::ZERO;
        }
        derivative.normalize()
    }

    /// Polyline length of the curve sampled at `samples` evenly spaced
    /// progress values, including the end of the final segment.
    pub fn approximate_length(&self, samples: usize) -> f32 {
        let samples = samples.max(self.segments.len());
        let mut previous = self.segments[0].position(0.0);
        let mut length = 0.0;
        for i in 1..=samples {
            let (segment, u) = self.locate(i as f32 / samples as f32);
            let point = segment.position(u);
            length += previous.distance(point);
            previous = point;
        }
        length
    }

    /// Maps `t` in `[0, 1]` to a segment and its local parameter.
    fn locate(&self, t: f32) -> (&CubicSegment, f32) {
        let count = self.segments.len();
        let scaled = t.clamp(0.0, 1.0) * count as f32;
        let index = (scaled.floor() as usize).min(count - 1);
        (&self.segments[index], scaled - index as f32)
    }
}

/// Wraps any progress value into `[0, 1)`. Non-finite input maps to 0.
pub fn normalize_progress(t: f32) -> f32 {
    if !t.is_finite() {
        return 0.0;
    }
    let wrapped = t.rem_euclid(1.0);
    // rem_euclid of a tiny negative value rounds up to exactly 1.0
    if wrapped >= 1.0 { 0.0 } else { wrapped }
}

fn validate_waypoints(waypoints: &[Vec3], closed: bool) -> Result<(), FlightError> {
    if waypoints.len() < 2 {
        return Err(FlightError::TooFewWaypoints {
            count: waypoints.len(),
        });
    }

    if let Some(index) = waypoints.iter().position(|p| !p.is_finite()) {
        return Err(FlightError::NonFiniteWaypoint { index });
    }

    for (index, pair) in waypoints.windows(2).enumerate() {
        if pair[0].distance_squared(pair[1]) < DEGENERATE_EPSILON {
            return Err(FlightError::DuplicateWaypoint { index: index + 1 });
        }
    }

    let first = waypoints[0];
    let last = waypoints[waypoints.len() - 1];
    if closed && first.distance_squared(last) < DEGENERATE_EPSILON {
        return Err(FlightError::DuplicateWaypoint { index: 0 });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square(side: f32, altitude: f32) -> Vec<Vec3> {
        vec![
            Vec3::new(0.0, altitude, 0.0),
            Vec3::new(side, altitude, 0.0),
            Vec3::new(side, altitude, side),
            Vec3::new(0.0, altitude, side),
        ]
    }

    #[test]
    fn starts_at_first_waypoint() {
        for kind in [CurveKind::Centripetal, CurveKind::Chordal, CurveKind::Uniform] {
            for closed in [true, false] {
                let path = PathModel::new(square(10.0, 5.0), closed, kind).unwrap();
                assert!(path.position_at(0.0).distance(Vec3::new(0.0, 5.0, 0.0)) < 1e-5);
            }
        }
    }

    #[test]
    fn passes_through_every_waypoint() {
        let waypoints = square(10.0, 5.0);
        let path = PathModel::new(waypoints.clone(), true, CurveKind::Centripetal).unwrap();
        for (i, waypoint) in waypoints.iter().enumerate() {
            let t = i as f32 / path.segment_count() as f32;
            assert!(path.position_at(t).distance(*waypoint) < 1e-4);
        }
    }

    #[test]
    fn closed_loop_returns_to_start() {
        let path = PathModel::new(square(10.0, 5.0), true, CurveKind::Centripetal).unwrap();
        let near_end = path.position_at(1.0 - 1e-5);
        assert!(near_end.distance(Vec3::new(0.0, 5.0, 0.0)) < 1e-2);
    }

    #[test]
    fn out_of_range_progress_wraps() {
        let path = PathModel::new(square(10.0, 5.0), true, CurveKind::Centripetal).unwrap();
        assert!(path.position_at(1.25).distance(path.position_at(0.25)) < 1e-4);
        assert!(path.position_at(-0.25).distance(path.position_at(0.75)) < 1e-4);
        assert_eq!(path.position_at(f32::NAN), path.position_at(0.0));
    }

    #[test]
    fn normalized_progress_stays_in_unit_interval() {
        for t in [-3.5, -1e-9, 0.0, 0.999_999_9, 1.0, 7.25] {
            let wrapped = normalize_progress(t);
            assert!((0.0..1.0).contains(&wrapped), "{t} -> {wrapped}");
        }
    }

    #[test]
    fn overshoot_is_bounded_by_segment_length() {
        let waypoints = vec![
            Vec3::new(0.0, 4.0, 0.0),
            Vec3::new(12.0, 6.0, 1.0),
            Vec3::new(13.0, 5.0, 9.0),
            Vec3::new(-2.0, 7.0, 8.0),
            Vec3::new(-6.0, 4.0, 2.0),
        ];
        for kind in [CurveKind::Centripetal, CurveKind::Chordal, CurveKind::Uniform] {
            let path = PathModel::new(waypoints.clone(), true, kind).unwrap();
            let count = path.segment_count();
            for i in 0..count {
                let a = waypoints[i];
                let b = waypoints[(i + 1) % waypoints.len()];
                let reach = a.distance(b);
                for step in 0..=20 {
                    let t = (i as f32 + step as f32 / 20.0) / count as f32;
                    let point = path.position_at(t);
                    let midpoint = (a + b) * 0.5;
                    assert!(point.distance(midpoint) <= reach * 1.5, "{kind:?} segment {i}");
                }
            }
        }
    }

    #[test]
    fn tangent_is_unit_length() {
        let path = PathModel::new(square(10.0, 5.0), true, CurveKind::Centripetal).unwrap();
        for i in 0..100 {
            let tangent = path.tangent_at(i as f32 / 100.0);
            assert!((tangent.length() - 1.0).abs() < 1e-4);
        }
    }

    #[test]
    fn tangent_follows_direction_of_travel() {
        let path = PathModel::new(square(10.0, 5.0), true, CurveKind::Centripetal).unwrap();
        let tangent = path.tangent_at(0.125);
        assert!(tangent.x > 0.9);
    }

    #[test]
    fn cusp_reports_zero_tangent() {
        let a = Vec3::new(0.0, 0.0, 0.0);
        let b = Vec3::new(4.0, 0.0, 0.0);
        let path = PathModel::new(vec![a, b, a], false, CurveKind::Uniform).unwrap();
        assert_eq!(path.tangent_at(0.5), Vec3::ZERO);
        assert!(path.tangent_at(0.25).is_finite());
    }

    #[test]
    fn approximate_length_of_straight_line() {
        let path = PathModel::new(
            vec![Vec3::ZERO, Vec3::new(10.0, 0.0, 0.0)],
            false,
            CurveKind::Centripetal,
        )
        .unwrap();
        assert!((path.approximate_length(256) - 10.0).abs() < 1e-3);
    }

    #[test]
    fn rejects_invalid_waypoints() {
        assert!(matches!(
            PathModel::new(vec![Vec3::ZERO], false, CurveKind::Uniform),
            Err(FlightError::TooFewWaypoints { count: 1 })
        ));
        assert!(matches!(
            PathModel::new(vec![Vec3::ZERO, Vec3::X, Vec3::X], false, CurveKind::Uniform),
            Err(FlightError::DuplicateWaypoint { index: 2 })
        ));
        assert!(matches!(
            PathModel::new(vec![Vec3::ZERO, Vec3::X, Vec3::ZERO], true, CurveKind::Uniform),
            Err(FlightError::DuplicateWaypoint { index: 0 })
        ));
        assert!(matches!(
            PathModel::new(vec![Vec3::ZERO, Vec3::splat(f32::NAN)], false, CurveKind::Uniform),
            Err(FlightError::NonFiniteWaypoint { index: 1 })
        ));
    }
}
