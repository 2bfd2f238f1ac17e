//! Foliage distance propagation.
//!
//! After a tree is written, each leaf inside the structure's box is
//! relabelled with its hop count to the nearest trunk voxel through other
//! leaves, using the 26-neighbourhood. Leaves further than
//! `LEAF_DECAY_DISTANCE - 1` hops keep the decay distance.
//!
//! The frontier is a leveled queue, one ordered set per distance, drained
//! lowest level first and lowest coordinate first within a level. A cell is
//! settled the first time it is popped, so each leaf is written at most
//! once, and equal grids always settle in the same order.

use std::collections::{BTreeSet, HashSet};

use glam::IVec3;

use crate::math::{around_offsets, BlockBox};
use crate::voxel::shape::VoxelShape;
use crate::voxel::voxel::{UpdateFlags, LEAF_DECAY_DISTANCE};
use crate::voxel::world::VoxelGrid;

const LEVELS: usize = LEAF_DECAY_DISTANCE as usize;

/// Relabel leaf distances inside `bounds`, seeded from `trunk`.
///
/// Only the distance attribute of leaves already in the grid changes; no
/// voxel is created or removed and trunk voxels are never written.
/// Returns the shape of every settled cell (trunk and reached leaves),
/// which drives the edge-consistency pass.
pub fn propagate_leaf_distances(
    grid: &mut dyn VoxelGrid,
    bounds: BlockBox,
    trunk: &HashSet<IVec3>,
) -> VoxelShape {
    let mut shape = VoxelShape::new(bounds);
    let mut levels: [BTreeSet<[i32; 3]>; LEVELS] = Default::default();
    levels[0].extend(trunk.iter().map(|pos| pos.to_array()));

    let offsets: Vec<IVec3> = around_offsets().collect();
    let mut level = 0;
    let mut relabelled = 0usize;

    while level < LEVELS {
        let Some(cell) = levels[level].pop_first() else {
            level += 1;
            continue;
        };
        let pos = IVec3::from_array(cell);

        if !bounds.contains(pos) || shape.is_full(pos) {
            continue;
        }
        shape.fill(pos);

        if level != 0 {
            let state = grid.get_voxel(pos);
            if state.leaf_distance() != Some(level as u8) {
                grid.set_voxel(pos, state.with_leaf_distance(level as u8), UpdateFlags::ALL_KNOWN_SHAPE);
                relabelled += 1;
            }
        }

        for offset in &offsets {
            let neighbor = pos + *offset;
            if !bounds.contains(neighbor) || shape.is_full(neighbor) {
                continue;
            }
            let Some(existing) = grid.get_voxel(neighbor).leaf_distance() else {
                continue;
            };
            let next = existing.min(level as u8 + 1) as usize;
            if next < LEVELS {
                levels[next].insert(neighbor.to_array());
                // A pre-existing leaf may already sit closer than this frontier
                level = level.min(next);
            }
        }
    }

    log::trace!("relabelled {relabelled} leaves in {:?}..{:?}", bounds.min, bounds.max);
    shape
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::voxel::voxel::{VoxelState, Wood};
    use crate::voxel::world::SparseGrid;

    fn leaf() -> VoxelState {
        VoxelState::leaves(Wood::Palm)
    }

    fn distance_at(grid: &SparseGrid, pos: IVec3) -> Option<u8> {
        grid.get_voxel(pos).leaf_distance()
    }

    /// Log at the origin with a straight row of leaves along +x
    fn row_grid(len: i32) -> (SparseGrid, HashSet<IVec3>, BlockBox) {
        let mut grid = SparseGrid::new(1, -16, 16);
        grid.put(IVec3::ZERO, VoxelState::Log(Wood::Palm));
        for x in 1..=len {
            grid.put(IVec3::new(x, 0, 0), leaf());
        }
        let trunk = HashSet::from([IVec3::ZERO]);
        let bounds = BlockBox::new(IVec3::ZERO, IVec3::new(len, 0, 0));
        (grid, trunk, bounds)
    }

    #[test]
    fn test_row_gets_hop_counts() {
        let (mut grid, trunk, bounds) = row_grid(9);
        propagate_leaf_distances(&mut grid, bounds, &trunk);

        for x in 1..=6 {
            assert_eq!(distance_at(&grid, IVec3::new(x, 0, 0)), Some(x as u8));
        }
        // Beyond reach: untouched, still at the decay threshold
        for x in 7..=9 {
            assert_eq!(distance_at(&grid, IVec3::new(x, 0, 0)), Some(LEAF_DECAY_DISTANCE));
        }
    }

    #[test]
    fn test_trunk_never_relabelled() {
        let (mut grid, trunk, bounds) = row_grid(3);
        grid.clear_logs();
        propagate_leaf_distances(&mut grid, bounds, &trunk);

        assert_eq!(grid.get_voxel(IVec3::ZERO), VoxelState::Log(Wood::Palm));
        assert!(!grid.writes().contains(&IVec3::ZERO));
        assert_eq!(grid.writes().len(), 3);
    }

    #[test]
    fn test_diagonal_neighbours_connect() {
        let mut grid = SparseGrid::new(1, -16, 16);
        grid.put(IVec3::ZERO, VoxelState::Log(Wood::Palm));
        grid.put(IVec3::new(1, 1, 1), leaf());
        grid.put(IVec3::new(2, 2, 2), leaf());
        let trunk = HashSet::from([IVec3::ZERO]);
        let bounds = BlockBox::new(IVec3::ZERO, IVec3::splat(2));

        propagate_leaf_distances(&mut grid, bounds, &trunk);
        assert_eq!(distance_at(&grid, IVec3::new(1, 1, 1)), Some(1));
        assert_eq!(distance_at(&grid, IVec3::new(2, 2, 2)), Some(2));
    }

    #[test]
    fn test_shortest_of_two_sources() {
        // Logs at both ends of a 7-leaf row: the middle is 4 hops from either
        let (mut grid, mut trunk, _) = row_grid(7);
        grid.put(IVec3::new(8, 0, 0), VoxelState::Log(Wood::Palm));
        trunk.insert(IVec3::new(8, 0, 0));
        let bounds = BlockBox::new(IVec3::ZERO, IVec3::new(8, 0, 0));

        propagate_leaf_distances(&mut grid, bounds, &trunk);
        let got: Vec<_> = (1..=7).map(|x| distance_at(&grid, IVec3::new(x, 0, 0)).unwrap()).collect();
        assert_eq!(got, vec![1, 2, 3, 4, 3, 2, 1]);
    }

    #[test]
    fn test_leaves_outside_bounds_untouched() {
        let (mut grid, trunk, _) = row_grid(4);
        let bounds = BlockBox::new(IVec3::ZERO, IVec3::new(2, 0, 0));
        propagate_leaf_distances(&mut grid, bounds, &trunk);

        assert_eq!(distance_at(&grid, IVec3::new(2, 0, 0)), Some(2));
        assert_eq!(distance_at(&grid, IVec3::new(3, 0, 0)), Some(LEAF_DECAY_DISTANCE));
    }

    #[test]
    fn test_closer_existing_distance_kept() {
        let (mut grid, trunk, bounds) = row_grid(5);
        // A leaf already supported by some other tree at distance 1
        grid.put(IVec3::new(4, 0, 0), leaf().with_leaf_distance(1));
        propagate_leaf_distances(&mut grid, bounds, &trunk);

        // x=3 settles from the trunk side before the closer leaf is reached
        assert_eq!(distance_at(&grid, IVec3::new(3, 0, 0)), Some(3));
        assert_eq!(distance_at(&grid, IVec3::new(4, 0, 0)), Some(1));
        assert_eq!(distance_at(&grid, IVec3::new(5, 0, 0)), Some(2));
    }

    /// Two frontier leaves at the same level, each beside a leaf already
    /// held at distance 1 by something outside the structure
    fn tie_grid() -> (SparseGrid, HashSet<IVec3>, BlockBox) {
        let (mut grid, trunk, _) = row_grid(2);
        grid.put(IVec3::new(3, 0, -1), leaf());
        grid.put(IVec3::new(3, 0, 1), leaf());
        grid.put(IVec3::new(4, 0, 0), leaf().with_leaf_distance(1));
        let bounds = BlockBox::new(IVec3::new(0, 0, -1), IVec3::new(4, 0, 1));
        (grid, trunk, bounds)
    }

    #[test]
    fn test_same_level_ties_settle_in_fixed_order() {
        let outcomes: HashSet<(Option<u8>, Option<u8>)> = (0..50)
            .map(|_| {
                let (mut grid, trunk, bounds) = tie_grid();
                propagate_leaf_distances(&mut grid, bounds, &trunk);
                (
                    distance_at(&grid, IVec3::new(3, 0, -1)),
                    distance_at(&grid, IVec3::new(3, 0, 1)),
                )
            })
            .collect();
        // The lower z is settled from the trunk side first; the other then
        // takes the shorter route through the distance-1 leaf
        assert_eq!(outcomes, HashSet::from([(Some(3), Some(2))]));
    }

    #[test]
    fn test_shape_marks_settled_cells() {
        let (mut grid, trunk, bounds) = row_grid(8);
        let shape = propagate_leaf_distances(&mut grid, bounds, &trunk);
        // Trunk plus the six reachable leaves
        assert_eq!(shape.count(), 7);
        assert!(shape.is_full(IVec3::ZERO));
        assert!(!shape.is_full(IVec3::new(7, 0, 0)));
    }
}
