//! Hit detection between agents
//!
//! Everything here is a plain AABB test on boxes rebuilt from current
//! positions. No response or separation is computed; contact only counts.

use glam::Vec2;

use super::aabb::Aabb;
use super::agent::Agent;

/// True unless `a` and `b` are separated on some axis (boundary contact
/// overlaps). Symmetric in its arguments.
#[inline]
pub fn aabb_overlap(a: &Aabb, b: &Aabb) -> bool {
    a.overlaps(b)
}

/// Check whether two agents' hitboxes touch at their current positions
pub fn agents_touch(a: &impl Agent, b: &impl Agent) -> bool {
    aabb_overlap(&a.hitbox(), &b.hitbox())
}

/// Check an agent's hitbox against a fixed square box (e.g. a torch)
pub fn agent_touches_box(agent: &impl Agent, center: Vec2, half_extent: f32) -> bool {
    aabb_overlap(&agent.hitbox(), &Aabb::from_center(center, Vec2::splat(half_extent)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn boxed(x: f32, y: f32, hw: f32, hh: f32) -> Aabb {
        Aabb::from_center(Vec2::new(x, y), Vec2::new(hw, hh))
    }

    #[test]
    fn test_overlapping_boxes() {
        let a = boxed(0.0, 0.0, 0.5, 0.6);
        let b = boxed(0.7, 0.5, 0.4, 0.5);
        assert!(aabb_overlap(&a, &b));
    }

    #[test]
    fn test_separated_on_one_axis() {
        let a = boxed(0.0, 0.0, 0.5, 0.5);
        // Overlapping in y but not in x
        let b = boxed(2.0, 0.0, 0.5, 0.5);
        assert!(!aabb_overlap(&a, &b));
        // Overlapping in x but not in y
        let c = boxed(0.0, -3.0, 0.5, 0.5);
        assert!(!aabb_overlap(&a, &c));
    }

    #[test]
    fn test_touching_edges_overlap() {
        let a = Aabb { min_x: 0.0, max_x: 1.0, min_y: 0.0, max_y: 1.0 };
        let right = Aabb { min_x: 1.0, max_x: 2.0, min_y: 0.0, max_y: 1.0 };
        let corner = Aabb { min_x: 1.0, max_x: 2.0, min_y: 1.0, max_y: 2.0 };
        assert!(aabb_overlap(&a, &right));
        assert!(aabb_overlap(&a, &corner));
    }

    #[test]
    fn test_contained_box_overlaps() {
        let outer = boxed(0.0, 0.0, 5.0, 5.0);
        let inner = boxed(1.0, 1.0, 0.1, 0.1);
        assert!(aabb_overlap(&outer, &inner));
        assert!(aabb_overlap(&inner, &outer));
    }

    proptest! {
        #[test]
        fn prop_overlap_is_symmetric(
            ax in -20.0f32..20.0, ay in -20.0f32..20.0,
            aw in 0.01f32..5.0, ah in 0.01f32..5.0,
            bx in -20.0f32..20.0, by in -20.0f32..20.0,
            bw in 0.01f32..5.0, bh in 0.01f32..5.0,
        ) {
            let a = boxed(ax, ay, aw, ah);
            let b = boxed(bx, by, bw, bh);
            prop_assert_eq!(aabb_overlap(&a, &b), aabb_overlap(&b, &a));
        }

        #[test]
        fn prop_box_overlaps_itself(
            x in -20.0f32..20.0, y in -20.0f32..20.0,
            w in 0.0f32..5.0, h in 0.0f32..5.0,
        ) {
            let a = boxed(x, y, w, h);
            prop_assert!(aabb_overlap(&a, &a));
        }
    }
}
