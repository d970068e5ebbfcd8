//! Vision cone perception
//!
//! Sight is purely distance + angle: no occlusion or raycasting.

use glam::Vec2;

use crate::normalize;

/// Facing used when an agent has never moved
pub const DEFAULT_FACING: Vec2 = Vec2::X;

/// Slack on the cone edge so f32 rounding in acos does not reject targets
/// sitting exactly on the boundary
const ANGLE_TOLERANCE_DEG: f32 = 1e-4;

/// Check whether `target_pos` lies inside the cone of sight of an agent at
/// `agent_pos` looking along `agent_facing`.
///
/// The cone is symmetric about the facing direction with a full opening of
/// `sight_angle_degrees`; the boundary is inclusive. Targets farther than
/// `sight_distance` are never seen.
pub fn is_target_in_sight(
    agent_pos: Vec2,
    agent_facing: Vec2,
    target_pos: Vec2,
    sight_distance: f32,
    sight_angle_degrees: f32,
) -> bool {
    let to_target = target_pos - agent_pos;
    let dist = to_target.length();
    if dist > sight_distance {
        return false;
    }

    let forward = if agent_facing == Vec2::ZERO {
        DEFAULT_FACING
    } else {
        agent_facing.normalize_or(DEFAULT_FACING)
    };
    // Standing on top of the target: nothing to measure an angle against
    let dir = normalize(to_target);
    if dir == Vec2::ZERO {
        return true;
    }

    let dot = forward.dot(dir).clamp(-1.0, 1.0);
    let angle_deg = dot.acos().to_degrees();
    angle_deg <= sight_angle_degrees * 0.5 + ANGLE_TOLERANCE_DEG
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn at_angle(deg: f32, dist: f32) -> Vec2 {
        let rad = deg.to_radians();
        Vec2::new(rad.cos(), rad.sin()) * dist
    }

    #[test]
    fn test_target_ahead_in_range() {
        assert!(is_target_in_sight(Vec2::ZERO, Vec2::X, Vec2::new(5.0, 0.0), 8.0, 120.0));
    }

    #[test]
    fn test_target_beyond_distance() {
        assert!(!is_target_in_sight(Vec2::ZERO, Vec2::X, Vec2::new(10.0, 0.0), 8.0, 120.0));
    }

    #[test]
    fn test_target_at_exact_distance_is_seen() {
        assert!(is_target_in_sight(Vec2::ZERO, Vec2::X, Vec2::new(8.0, 0.0), 8.0, 120.0));
    }

    #[test]
    fn test_target_behind() {
        assert!(!is_target_in_sight(Vec2::ZERO, Vec2::X, Vec2::new(-3.0, 0.0), 8.0, 120.0));
    }

    #[test]
    fn test_cone_boundary_inclusive() {
        let facing = Vec2::X;
        let on_edge = Vec2::new(0.5, 3.0_f32.sqrt() / 2.0) * 4.0; // 60°
        assert!(is_target_in_sight(Vec2::ZERO, facing, on_edge, 8.0, 120.0));

        let past_edge = at_angle(60.001, 4.0);
        assert!(!is_target_in_sight(Vec2::ZERO, facing, past_edge, 8.0, 120.0));

        let inside = at_angle(59.9, 4.0);
        assert!(is_target_in_sight(Vec2::ZERO, facing, inside, 8.0, 120.0));
    }

    #[test]
    fn test_zero_facing_defaults_to_positive_x() {
        assert!(is_target_in_sight(Vec2::ZERO, Vec2::ZERO, Vec2::new(3.0, 0.5), 8.0, 120.0));
        assert!(!is_target_in_sight(Vec2::ZERO, Vec2::ZERO, Vec2::new(-3.0, 0.0), 8.0, 120.0));
    }

    #[test]
    fn test_unnormalized_facing() {
        let facing = Vec2::new(0.0, -7.0);
        assert!(is_target_in_sight(Vec2::ZERO, facing, Vec2::new(0.5, -4.0), 8.0, 120.0));
        assert!(!is_target_in_sight(Vec2::ZERO, facing, Vec2::new(0.0, 4.0), 8.0, 120.0));
    }

    #[test]
    fn test_offset_agent_position() {
        let agent = Vec2::new(5.0, 5.0);
        assert!(is_target_in_sight(agent, Vec2::Y, Vec2::new(5.0, 9.0), 8.0, 120.0));
        assert!(!is_target_in_sight(agent, Vec2::Y, Vec2::new(5.0, 1.0), 8.0, 120.0));
    }

    proptest! {
        #[test]
        fn prop_never_sees_beyond_distance(
            fx in -1.0f32..1.0, fy in -1.0f32..1.0,
            angle in 0.0f32..360.0,
            extra in 0.01f32..50.0,
            sight in 0.5f32..20.0,
            cone in 0.0f32..360.0,
        ) {
            let target = at_angle(angle, sight + extra);
            prop_assert!(!is_target_in_sight(Vec2::ZERO, Vec2::new(fx, fy), target, sight, cone));
        }

        #[test]
        fn prop_full_circle_sees_everything_in_range(
            angle in 0.0f32..360.0,
            dist in 0.01f32..7.9,
        ) {
            let target = at_angle(angle, dist);
            prop_assert!(is_target_in_sight(Vec2::ZERO, Vec2::Y, target, 8.0, 360.0));
        }
    }
}
