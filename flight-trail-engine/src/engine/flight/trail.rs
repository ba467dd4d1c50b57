use bevy::math::Vec3;
use constants::flight::{TRAIL_ADMISSION_THRESHOLD, TRAIL_MAX_POINTS};
use serde::{Deserialize, Serialize};

use super::error::FlightError;

/// What happens to old trail points as the aircraft keeps looping.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrailRetention {
    /// Keep every admitted point for the whole session.
    Unbounded,
    /// Drop the trail each time progress wraps back to the start.
    #[default]
    ClearOnLoop,
    /// Keep only the newest `n` points.
    MostRecent(usize),
}

impl TrailRetention {
    pub fn most_recent_default() -> Self {
        TrailRetention::MostRecent(TRAIL_MAX_POINTS)
    }
}

/// Flat vertex data for a dashed line strip.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TrailGeometry {
    /// `x, y, z` per trail point.
    pub positions: Vec<f32>,
    /// Cumulative arc length at each point, starting at 0.
    pub line_distances: Vec<f32>,
}

impl TrailGeometry {
    pub fn vertex_count(&self) -> usize {
        self.line_distances.len()
    }

    pub fn total_length(&self) -> f32 {
        self.line_distances.last().copied().unwrap_or(0.0)
    }

    pub fn position_attribute(&self) -> Vec<[f32; 3]> {
        self.positions
            .chunks_exact(3)
            .map(|p| [p[0], p[1], p[2]])
            .collect()
    }
}

/// Distance-gated trail of past vehicle positions.
///
/// Each admitted point triggers a full rebuild of [`TrailGeometry`] from the
/// point sequence.
#[derive(Debug, Clone)]
pub struct TrailBuilder {
    threshold: f32,
    retention: TrailRetention,
    points: Vec<Vec3>,
    cursor: Option<Vec3>,
    geometry: TrailGeometry,
    revision: u64,
}

impl TrailBuilder {
    pub fn new(threshold: f32, retention: TrailRetention) -> Self {
        Self {
            threshold: threshold.max(0.0),
            retention,
            points: Vec::new(),
            cursor: None,
            geometry: TrailGeometry::default(),
            revision: 0,
        }
    }

    pub fn threshold(&self) -> f32 {
        self.threshold
    }

    pub fn retention(&self) -> TrailRetention {
        self.retention
    }

    pub fn points(&self) -> &[Vec3] {
        &self.points
    }

    pub fn geometry(&self) -> &TrailGeometry {
        &self.geometry
    }

    /// Bumped on every rebuild, clear or release.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Admits `position` if it lies further than the threshold from the last
    /// admitted point, then rebuilds the geometry. Returns whether it was admitted.
    pub fn maybe_append(&mut self, position: Vec3) -> Result<bool, FlightError> {
        if !position.is_finite() {
            return Ok(false);
        }
        if let Some(previous) = self.cursor {
            if position.distance(previous) <= self.threshold {
                return Ok(false);
            }
        }

        self.points.try_reserve(1)?;
        self.points.push(position);
        if let TrailRetention::MostRecent(limit) = self.retention {
            let excess = self.points.len().saturating_sub(limit.max(1));
            self.points.drain(..excess);
        }
        self.cursor = Some(position);

        self.rebuild()?;
        Ok(true)
    }

    /// Re-flattens every point into fresh buffers.
    pub fn rebuild(&mut self) -> Result<&TrailGeometry, FlightError> {
        let mut positions = Vec::new();
        positions.try_reserve_exact(self.points.len() * 3)?;
        let mut line_distances = Vec::new();
        line_distances.try_reserve_exact(self.points.len())?;

        let mut travelled = 0.0;
        let mut previous: Option<Vec3> = None;
        for point in &self.points {
            if let Some(previous) = previous {
                travelled += previous.distance(*point);
            }
            positions.extend_from_slice(&point.to_array());
            line_distances.push(travelled);
            previous = Some(*point);
        }

        self.geometry = TrailGeometry {
            positions,
            line_distances,
        };
        self.revision += 1;
        Ok(&self.geometry)
    }

    /// Applies the retention policy at a loop boundary. Returns whether the
    /// trail was cleared.
    pub fn on_loop_completed(&mut self) -> bool {
        if self.retention == TrailRetention::ClearOnLoop {
            self.clear();
            return true;
        }
        false
    }

    /// Swaps gating and retention, dropping the current trail. The revision
    /// keeps counting so renderers still notice the change.
    pub fn reconfigure(&mut self, threshold: f32, retention: TrailRetention) {
        self.threshold = threshold.max(0.0);
        self.retention = retention;
        self.clear();
    }

    pub fn clear(&mut self) {
        self.points.clear();
        self.cursor = None;
        self.geometry.positions.clear();
        self.geometry.line_distances.clear();
        self.revision += 1;
    }

    /// Drops all buffers including their capacity.
    pub fn release(&mut self) {
        self.points = Vec::new();
        self.cursor = None;
        self.geometry = TrailGeometry::default();
        self.revision += 1;
    }
}

impl Default for TrailBuilder {
    fn default() -> Self {
        Self::new(TRAIL_ADMISSION_THRESHOLD, TrailRetention::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn builder() -> TrailBuilder {
        TrailBuilder::new(0.5, TrailRetention::Unbounded)
    }

    #[test]
    fn first_point_is_always_admitted() {
        let mut trail = builder();
        assert!(trail.maybe_append(Vec3::new(3.0, 2.0, 1.0)).unwrap());
        assert_eq!(trail.points().len(), 1);
    }

    #[test]
    fn close_points_are_not_both_admitted() {
        let mut trail = builder();
        assert!(trail.maybe_append(Vec3::ZERO).unwrap());
        assert!(!trail.maybe_append(Vec3::new(0.3, 0.0, 0.0)).unwrap());
        assert!(!trail.maybe_append(Vec3::new(0.0, 0.0, 0.5)).unwrap());
        assert_eq!(trail.points().len(), 1);
    }

    #[test]
    fn distant_points_are_both_admitted() {
        let mut trail = builder();
        assert!(trail.maybe_append(Vec3::ZERO).unwrap());
        assert!(trail.maybe_append(Vec3::new(0.51, 0.0, 0.0)).unwrap());
        assert!(trail.maybe_append(Vec3::new(0.51, 0.6, 0.0)).unwrap());
    }

    #[test]
    fn gating_measures_from_last_admitted_point() {
        let mut trail = builder();
        trail.maybe_append(Vec3::ZERO).unwrap();
        // Each step is short, but they accumulate against the cursor.
        assert!(!trail.maybe_append(Vec3::new(0.2, 0.0, 0.0)).unwrap());
        assert!(!trail.maybe_append(Vec3::new(0.4, 0.0, 0.0)).unwrap());
        assert!(trail.maybe_append(Vec3::new(0.6, 0.0, 0.0)).unwrap());
    }

    #[test]
    fn geometry_matches_admitted_points() {
        let mut trail = builder();
        let points = [
            Vec3::new(0.0, 1.0, 0.0),
            Vec3::new(3.0, 1.0, 0.0),
            Vec3::new(3.0, 1.0, 4.0),
            Vec3::new(3.0, 1.0, 4.0),
            Vec3::new(3.0, 2.0, 4.0),
        ];
        let mut admitted = 0;
        for point in points {
            if trail.maybe_append(point).unwrap() {
                admitted += 1;
            }
        }
        assert_eq!(admitted, 4);

        let geometry = trail.geometry();
        assert_eq!(geometry.positions.len(), 3 * admitted);
        assert_eq!(geometry.vertex_count(), admitted);
        assert_eq!(
            geometry.positions,
            vec![0.0, 1.0, 0.0, 3.0, 1.0, 0.0, 3.0, 1.0, 4.0, 3.0, 2.0, 4.0]
        );
        assert_eq!(geometry.line_distances, vec![0.0, 3.0, 7.0, 8.0]);
        assert_eq!(geometry.total_length(), 8.0);
        assert_eq!(geometry.position_attribute()[1], [3.0, 1.0, 0.0]);
    }

    #[test]
    fn line_distances_never_decrease() {
        let mut trail = builder();
        for i in 0..200 {
            let angle = i as f32 * 0.1;
            trail
                .maybe_append(Vec3::new(angle.cos() * 8.0, 4.0, angle.sin() * 8.0))
                .unwrap();
        }
        let distances = &trail.geometry().line_distances;
        assert!(distances.windows(2).all(|pair| pair[0] <= pair[1]));
        assert_eq!(trail.geometry().positions.len(), 3 * trail.points().len());
    }

    #[test]
    fn rejects_non_finite_positions() {
        let mut trail = builder();
        assert!(!trail.maybe_append(Vec3::new(f32::NAN, 0.0, 0.0)).unwrap());
        assert!(!trail.maybe_append(Vec3::splat(f32::INFINITY)).unwrap());
        assert!(trail.points().is_empty());
    }

    #[test]
    fn most_recent_retention_caps_points() {
        let mut trail = TrailBuilder::new(0.5, TrailRetention::MostRecent(3));
        for i in 0..6 {
            trail.maybe_append(Vec3::new(i as f32, 0.0, 0.0)).unwrap();
        }
        assert_eq!(
            trail.points(),
            &[
                Vec3::new(3.0, 0.0, 0.0),
                Vec3::new(4.0, 0.0, 0.0),
                Vec3::new(5.0, 0.0, 0.0)
            ]
        );
        assert_eq!(trail.geometry().line_distances, vec![0.0, 1.0, 2.0]);
        assert_eq!(
            TrailRetention::most_recent_default(),
            TrailRetention::MostRecent(TRAIL_MAX_POINTS)
        );
    }

    #[test]
    fn loop_completion_follows_retention() {
        let mut clearing = TrailBuilder::new(0.5, TrailRetention::ClearOnLoop);
        clearing.maybe_append(Vec3::ZERO).unwrap();
        clearing.maybe_append(Vec3::X).unwrap();
        assert!(clearing.on_loop_completed());
        assert!(clearing.points().is_empty());
        assert_eq!(clearing.geometry().vertex_count(), 0);
        // The cursor is reset too, so the next point starts a new trail.
        assert!(clearing.maybe_append(Vec3::new(0.1, 0.0, 0.0)).unwrap());

        let mut keeping = builder();
        keeping.maybe_append(Vec3::ZERO).unwrap();
        assert!(!keeping.on_loop_completed());
        assert_eq!(keeping.points().len(), 1);
    }

    #[test]
    fn revision_tracks_changes() {
        let mut trail = builder();
        assert_eq!(trail.revision(), 0);
        trail.maybe_append(Vec3::ZERO).unwrap();
        assert_eq!(trail.revision(), 1);
        trail.maybe_append(Vec3::new(0.1, 0.0, 0.0)).unwrap();
        assert_eq!(trail.revision(), 1);
        trail.release();
        assert_eq!(trail.revision(), 2);
        assert!(trail.points().is_empty());
        assert!(trail.geometry().positions.is_empty());
    }

    #[test]
    fn reconfigure_clears_and_keeps_counting() {
        let mut trail = builder();
        trail.maybe_append(Vec3::ZERO).unwrap();
        trail.reconfigure(2.0, TrailRetention::MostRecent(10));
        assert!(trail.points().is_empty());
        assert_eq!(trail.revision(), 2);
        assert_eq!(trail.threshold(), 2.0);
        assert_eq!(trail.retention(), TrailRetention::MostRecent(10));

        trail.maybe_append(Vec3::ZERO).unwrap();
        assert!(!trail.maybe_append(Vec3::new(1.5, 0.0, 0.0)).unwrap());
    }
}
