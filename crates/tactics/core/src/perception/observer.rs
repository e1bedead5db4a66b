use std::collections::HashMap;

use super::{HearingParameters, ObserverId, VisionParameters};
use crate::config::PerceptionConfig;
use crate::entity::EntityId;
use crate::grid::{GridOracle, WorldPoint};

/// An agent's senses: pose, vision cone, and per-target awareness gauges.
#[derive(Clone, Debug, PartialEq)]
pub struct Observer {
    pub id: ObserverId,
    pub position: WorldPoint,
    /// Facing direction; need not be normalized.
    pub forward: WorldPoint,
    pub vision: VisionParameters,
    awareness: HashMap<EntityId, f32>,
}

impl Observer {
    pub fn new(id: ObserverId, position: WorldPoint, forward: WorldPoint, vision: VisionParameters) -> Self {
        Self {
            id,
            position,
            forward,
            vision,
            awareness: HashMap::new(),
        }
    }

    pub fn set_pose(&mut self, position: WorldPoint, forward: WorldPoint) {
        self.position = position;
        if forward.with_z(0.0).length() > f32::EPSILON {
            self.forward = forward;
        }
    }

    /// Distance, cone, then grid line of sight, all in the plane.
    pub fn has_clear_los(&self, grid: &dyn GridOracle, point: WorldPoint) -> bool {
        let distance = self.position.planar_distance(point);
        if distance > self.vision.distance {
            return false;
        }
        if distance > f32::EPSILON {
            let forward = self.forward.with_z(0.0).normalized();
            let toward = (point - self.position).with_z(0.0).normalized();
            if forward.dot(toward) < self.vision.min_cosine() {
                return false;
            }
        }
        grid.line_of_sight(self.position, point)
    }

    /// A target moving faster than the hearing threshold within range.
    pub fn can_hear(&self, hearing: &HearingParameters, position: WorldPoint, velocity: WorldPoint) -> bool {
        velocity.length() > hearing.min_speed && self.position.planar_distance(position) < hearing.range
    }

    pub fn awareness_of(&self, entity: EntityId) -> f32 {
        self.awareness.get(&entity).copied().unwrap_or(0.0)
    }

    /// Moves the gauge for `entity` one tick and returns the new level.
    ///
    /// Sight fills the gauge in `time_to_acknowledge` seconds, its absence
    /// drains it in `time_to_lose`; hearing adds a weighted share of the
    /// sight rate on top.
    pub fn update_awareness(
        &mut self,
        entity: EntityId,
        sees: bool,
        hears: bool,
        dt: f32,
        config: &PerceptionConfig,
    ) -> f32 {
        let mut delta = if sees {
            rate(config.time_to_acknowledge) * dt
        } else {
            -rate(config.time_to_lose) * dt
        };
        if let (true, Some(hearing)) = (hears, config.hearing.as_ref()) {
            delta += hearing.weight * rate(config.time_to_acknowledge) * dt;
        }

        let level = self.awareness.entry(entity).or_insert(0.0);
        let next = *level + delta;
        *level = if next.is_nan() { *level } else { next.clamp(0.0, 1.0) };
        *level
    }

    pub fn forget(&mut self, entity: EntityId) {
        self.awareness.remove(&entity);
    }
}

/// Per-second gauge change for a ramp of `seconds`; instant when not positive.
fn rate(seconds: f32) -> f32 {
    if seconds > 0.0 { 1.0 / seconds } else { f32::INFINITY }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::TileGrid;

    fn observer_at(x: f32, y: f32, forward: WorldPoint) -> Observer {
        Observer::new(
            EntityId(1),
            WorldPoint::planar(x, y),
            forward,
            VisionParameters::new(90.0, 5.0),
        )
    }

    #[test]
    fn cone_distance_and_walls() {
        let grid = TileGrid::from_ascii(&["......", "......", "...#.."], 1.0, WorldPoint::ZERO).unwrap();
        let observer = observer_at(0.5, 2.5, WorldPoint::planar(1.0, 0.0));

        assert!(observer.has_clear_los(&grid, WorldPoint::planar(2.5, 2.5)));
        assert!(observer.has_clear_los(&grid, WorldPoint::planar(2.5, 1.0)));
        // Behind the wall at (3, 2).
        assert!(!observer.has_clear_los(&grid, WorldPoint::planar(4.5, 2.5)));
        // Outside the 45 degree half-angle.
        assert!(!observer.has_clear_los(&grid, WorldPoint::planar(0.9, 0.5)));
        // Too far.
        let far = observer_at(0.5, 0.5, WorldPoint::planar(1.0, 0.0));
        assert!(!far.has_clear_los(&TileGrid::open(10, 1).unwrap(), WorldPoint::planar(9.5, 0.5)));
    }

    #[test]
    fn awareness_ramps_and_decays() {
        let config = PerceptionConfig::new();
        let mut observer = observer_at(0.0, 0.0, WorldPoint::planar(1.0, 0.0));
        let target = EntityId(7);

        assert!((observer.update_awareness(target, true, false, 1.0, &config) - 0.5).abs() < 1e-6);
        assert_eq!(observer.update_awareness(target, true, false, 1.5, &config), 1.0);
        assert!((observer.update_awareness(target, false, false, 0.25, &config) - 0.5).abs() < 1e-6);
        assert_eq!(observer.update_awareness(target, false, false, 1.0, &config), 0.0);
        assert_eq!(observer.awareness_of(EntityId(99)), 0.0);
    }

    #[test]
    fn hearing_only_counts_when_configured() {
        let mut config = PerceptionConfig::new();
        let mut observer = observer_at(0.0, 0.0, WorldPoint::planar(1.0, 0.0));
        let target = EntityId(3);

        assert_eq!(observer.update_awareness(target, false, true, 0.1, &config), 0.0);

        config.hearing = Some(HearingParameters::default());
        let hearing = HearingParameters::default();
        assert!(observer.can_hear(&hearing, WorldPoint::planar(100.0, 0.0), WorldPoint::planar(300.0, 0.0)));
        assert!(!observer.can_hear(&hearing, WorldPoint::planar(100.0, 0.0), WorldPoint::planar(50.0, 0.0)));

        // Seen and heard: 0.5/s sight plus 0.25/s hearing.
        let level = observer.update_awareness(target, true, true, 1.0, &config);
        assert!((level - 0.75).abs() < 1e-6);
    }
}
