//! Collision detection and response
//!
//! Everything is tested in the horizontal (x, z) plane; height is ignored.
//! Blocks and barriers share the same square footprint of `BLOCK_WIDTH`.

use glam::Vec2;

use super::state::{Barrier, BlockState, GameState, Side};
use crate::consts::BLOCK_WIDTH;

/// Half extent of every box footprint
pub const BOX_HALF_EXTENT: f32 = BLOCK_WIDTH / 2.0;

/// Result of a block hit
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlockHit {
    pub row: usize,
    pub column: usize,
    /// Block state after the hit
    pub state: BlockState,
}

/// Result of a barrier hit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BarrierHit {
    pub side: Side,
    pub index: usize,
}

/// Sphere vs axis-aligned box overlap
///
/// Clamps the sphere centre onto the box to find the closest point, then
/// compares squared distance. Touching exactly at `radius` is not a hit.
#[inline]
pub fn sphere_box_collision(sphere: Vec2, radius: f32, box_center: Vec2, half_extent: f32) -> bool {
    let half = Vec2::splat(half_extent);
    let closest = sphere.clamp(box_center - half, box_center + half);
    sphere.distance_squared(closest) < radius * radius
}

/// Flip one velocity component based on which axis dominates the offset
/// from box centre to sphere centre
#[inline]
pub fn reflect_off_box(vel: Vec2, sphere: Vec2, box_center: Vec2) -> Vec2 {
    let offset = sphere - box_center;
    if offset.x.abs() > offset.y.abs() {
        Vec2::new(-vel.x, vel.y)
    } else {
        Vec2::new(vel.x, -vel.y)
    }
}

/// Resolve the first live block the marble overlaps, in row-major order.
///
/// Reflects the marble, advances the block's damage and stops; at most one
/// block is resolved per call.
pub fn check_block_collisions(state: &mut GameState) -> Option<BlockHit> {
    let sphere = state.marble.ground_pos();
    let radius = state.marble.radius;

    for row in state.blocks.iter_mut() {
        for block in row.iter_mut() {
            if !block.is_alive() {
                continue;
            }
            let center = block.ground_pos();
            if !sphere_box_collision(sphere, radius, center, BOX_HALF_EXTENT) {
                continue;
            }

            state.marble.vel = reflect_off_box(state.marble.vel, sphere, center);
            let new_state = block.damage();
            return Some(BlockHit {
                row: block.row,
                column: block.column,
                state: new_state,
            });
        }
    }

    None
}

/// Bounce off the first overlapping barrier (left before right at each index)
pub fn check_barrier_collisions(state: &mut GameState) -> Option<BarrierHit> {
    let sphere = state.marble.ground_pos();
    let radius = state.marble.radius;

    let hit = state
        .left_barriers
        .iter()
        .zip(state.right_barriers.iter())
        .flat_map(|(left, right)| [left, right])
        .find(|barrier| barrier_overlaps(barrier, sphere, radius))
        .map(|barrier| BarrierHit {
            side: barrier.side,
            index: barrier.index,
        });

    if hit.is_some() {
        state.marble.vel.x = -state.marble.vel.x;
    }
    hit
}

fn barrier_overlaps(barrier: &Barrier, sphere: Vec2, radius: f32) -> bool {
    sphere_box_collision(sphere, radius, barrier.ground_pos(), BOX_HALF_EXTENT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use glam::Vec3;
    use proptest::prelude::*;

    fn marble_at(state: &mut GameState, x: f32, z: f32, vel: Vec2) {
        state.marble.pos = Vec3::new(x, MARBLE_ORIGIN.y, z);
        state.marble.vel = vel;
    }

    #[test]
    fn test_sphere_inside_box() {
        assert!(sphere_box_collision(
            Vec2::new(0.0, 121.0),
            2.0,
            Vec2::new(0.0, 120.0),
            5.0
        ));
    }

    #[test]
    fn test_touching_is_not_a_hit() {
        // Box edge at x = 5, sphere centre at x = 7 with radius 2
        assert!(!sphere_box_collision(
            Vec2::new(7.0, 0.0),
            2.0,
            Vec2::ZERO,
            5.0
        ));
        assert!(sphere_box_collision(
            Vec2::new(6.9, 0.0),
            2.0,
            Vec2::ZERO,
            5.0
        ));
    }

    #[test]
    fn test_corner_uses_true_distance() {
        // Diagonal distance to the corner (5, 5) is ~2.12 > 2
        assert!(!sphere_box_collision(
            Vec2::new(6.5, 6.5),
            2.0,
            Vec2::ZERO,
            5.0
        ));
    }

    #[test]
    fn test_reflect_axis_selection() {
        let vel = Vec2::new(0.3, 0.5);
        let side_hit = reflect_off_box(vel, Vec2::new(6.0, 1.0), Vec2::ZERO);
        assert_eq!(side_hit, Vec2::new(-0.3, 0.5));

        let face_hit = reflect_off_box(vel, Vec2::new(1.0, -6.0), Vec2::ZERO);
        assert_eq!(face_hit, Vec2::new(0.3, -0.5));

        // Ties flip the depth component
        let tie = reflect_off_box(vel, Vec2::new(3.0, 3.0), Vec2::ZERO);
        assert_eq!(tie, Vec2::new(0.3, -0.5));
    }

    #[test]
    fn test_front_face_hit_flips_depth_and_damages() {
        let mut state = GameState::default();
        let (row, column) = (0, 4);
        state.block_mut(row, column).pos = Vec3::new(0.0, 0.0, BLOCK_Z);
        marble_at(&mut state, 0.0, 121.0, Vec2::new(0.0, MARBLE_SPEED));

        let hit = check_block_collisions(&mut state).expect("should hit");
        assert_eq!((hit.row, hit.column), (row, column));
        assert_eq!(hit.state, BlockState::HitOnce);
        assert_eq!(state.marble.vel, Vec2::new(0.0, -MARBLE_SPEED));
        assert_eq!(state.block(row, column).state, BlockState::HitOnce);
    }

    #[test]
    fn test_second_hit_kills_block() {
        let mut state = GameState::default();
        let target = state.block(0, 0).ground_pos();
        state.block_mut(0, 0).state = BlockState::HitOnce;
        marble_at(&mut state, target.x, target.y - 6.0, Vec2::new(0.0, 0.6));

        let hit = check_block_collisions(&mut state).expect("should hit");
        assert_eq!(hit.state, BlockState::Dead);
        assert_eq!(state.block(0, 0).pos, GRAVEYARD);
        assert_eq!(state.destroyed_count(), 1);

        // Dead blocks are skipped from now on
        assert!(check_block_collisions(&mut state).is_none());
    }

    #[test]
    fn test_only_first_block_in_scan_order_resolves() {
        let mut state = GameState::default();
        // Stack two live blocks on the same spot; row 0 wins
        state.block_mut(0, 2).pos = Vec3::new(0.0, 0.0, 50.0);
        state.block_mut(1, 7).pos = Vec3::new(0.0, 0.0, 50.0);
        marble_at(&mut state, 0.0, 50.0, Vec2::new(0.0, 0.6));

        let hit = check_block_collisions(&mut state).expect("should hit");
        assert_eq!((hit.row, hit.column), (0, 2));
        assert_eq!(state.block(1, 7).state, BlockState::Normal);
    }

    #[test]
    fn test_barrier_bounce_flips_x_only() {
        let mut state = GameState::default();
        marble_at(&mut state, BARRIER_X - 6.0, 25.0, Vec2::new(0.4, 0.3));

        let hit = check_barrier_collisions(&mut state).expect("should hit");
        assert_eq!(hit, BarrierHit { side: Side::Right, index: 1 });
        assert_eq!(state.marble.vel, Vec2::new(-0.4, 0.3));
    }

    #[test]
    fn test_barrier_scan_prefers_left() {
        let mut state = GameState::default();
        // Pull a right barrier onto the left one so both overlap
        state.right_barriers[0].pos = state.left_barriers[0].pos;
        marble_at(&mut state, -BARRIER_X, 0.0, Vec2::new(-0.4, 0.3));

        let hit = check_barrier_collisions(&mut state).expect("should hit");
        assert_eq!(hit.side, Side::Left);
        assert_eq!(hit.index, 0);
    }

    #[test]
    fn test_open_lane_has_no_barrier_hit() {
        let mut state = GameState::default();
        marble_at(&mut state, 0.0, 60.0, Vec2::new(0.1, 0.5));
        assert!(check_barrier_collisions(&mut state).is_none());
        assert_eq!(state.marble.vel, Vec2::new(0.1, 0.5));
    }

    proptest! {
        #[test]
        fn prop_collision_matches_closest_point_distance(
            sx in -30.0f32..30.0,
            sz in -30.0f32..30.0,
            r in 0.1f32..8.0,
        ) {
            let sphere = Vec2::new(sx, sz);
            let cx = sx.clamp(-5.0, 5.0);
            let cz = sz.clamp(-5.0, 5.0);
            let d2 = (sx - cx) * (sx - cx) + (sz - cz) * (sz - cz);
            prop_assert_eq!(sphere_box_collision(sphere, r, Vec2::ZERO, 5.0), d2 < r * r);
        }

        #[test]
        fn prop_exact_radius_never_hits(r in 0.5f32..8.0, along_x in any::<bool>()) {
            let sphere = if along_x {
                Vec2::new(5.0 + r, 0.0)
            } else {
                Vec2::new(0.0, -(5.0 + r))
            };
            // The offset from the edge is exactly r only when 5 + r - 5 is exact
            let gap = if along_x { sphere.x - 5.0 } else { -sphere.y - 5.0 };
            prop_assume!(gap == r);
            prop_assert!(!sphere_box_collision(sphere, r, Vec2::ZERO, 5.0));
        }

        #[test]
        fn prop_reflection_flips_exactly_one_component(
            vx in -1.0f32..1.0,
            vz in -1.0f32..1.0,
            ox in -6.0f32..6.0,
            oz in -6.0f32..6.0,
        ) {
            let vel = Vec2::new(vx, vz);
            let out = reflect_off_box(vel, Vec2::new(ox, oz), Vec2::ZERO);
            let x_flipped = out.x == -vx && out.y == vz;
            let z_flipped = out.x == vx && out.y == -vz;
            prop_assert!(x_flipped || z_flipped);
        }
    }
}
