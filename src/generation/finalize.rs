//! Post-write pass shared by every structure generator

use crate::generation::foliage::propagate_leaf_distances;
use crate::generation::placement::StructureVoxels;
use crate::generation::{PlacementError, PlacementResult};
use crate::voxel::shape::VoxelShape;
use crate::voxel::voxel::UpdateFlags;
use crate::voxel::world::VoxelGrid;

/// How far a boundary-shape update may cascade from the structure surface
pub const EDGE_UPDATE_RADIUS: u8 = 3;

/// Close out one placement attempt.
///
/// Computes the envelope of everything `voxels` recorded, relabels leaf
/// distances inside it from the trunk set and re-evaluates voxel shapes
/// across the structure's surface. Fails with `EmptyResult` when nothing
/// was written.
pub fn finalize(grid: &mut dyn VoxelGrid, voxels: &StructureVoxels) -> PlacementResult {
    let envelope = voxels.envelope().ok_or(PlacementError::EmptyResult)?;
    let shape = propagate_leaf_distances(grid, envelope, &voxels.trunk);
    let flags = UpdateFlags::ALL
        .without(UpdateFlags::NEIGHBORS)
        .with_shape_radius(EDGE_UPDATE_RADIUS);
    update_shape_at_edge(grid, &shape, flags);
    Ok(envelope)
}

/// Ask the grid to refresh both voxels on either side of every exposed
/// face of `shape`, so pre-existing neighbours see the new structure.
pub fn update_shape_at_edge(grid: &mut dyn VoxelGrid, shape: &VoxelShape, flags: UpdateFlags) {
    let mut faces = 0usize;
    for (pos, dir) in shape.exposed_faces() {
        grid.refresh_shape(pos, dir, flags);
        grid.refresh_shape(pos + dir.offset(), dir.opposite(), flags);
        faces += 1;
    }
    log::trace!("refreshed {faces} edge faces");
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::IVec3;
    use crate::math::{BlockBox, BlockPosExt, Direction};
    use crate::voxel::voxel::{VoxelState, Wood};
    use crate::voxel::world::SparseGrid;

    #[test]
    fn test_empty_structure_fails() {
        let mut grid = SparseGrid::new(1, 0, 64);
        let result = finalize(&mut grid, &StructureVoxels::new());
        assert_eq!(result, Err(PlacementError::EmptyResult));
        assert!(grid.writes().is_empty());
        assert!(grid.shape_refreshes().is_empty());
    }

    #[test]
    fn test_finalize_small_tree() {
        let mut grid = SparseGrid::new(1, 0, 64);
        let mut voxels = StructureVoxels::new();
        let base = IVec3::new(4, 10, 4);
        for dy in 0..3 {
            voxels.place_stem(&mut grid, base.above(dy), VoxelState::Log(Wood::Palm));
        }
        let top = base.above(3);
        voxels.place_foliage(&mut grid, top, VoxelState::leaves(Wood::Palm));
        voxels.place_foliage(&mut grid, top + IVec3::X, VoxelState::leaves(Wood::Palm));

        let envelope = finalize(&mut grid, &voxels).unwrap();
        assert_eq!(envelope, BlockBox::new(base, top + IVec3::X));
        assert_eq!(grid.get_voxel(top).leaf_distance(), Some(1));
        assert_eq!(grid.get_voxel(top + IVec3::X).leaf_distance(), Some(1));
    }

    #[test]
    fn test_edge_faces_refresh_both_sides() {
        let mut grid = SparseGrid::new(1, 0, 64);
        let pos = IVec3::new(0, 5, 0);
        let mut shape = VoxelShape::new(BlockBox::new(pos, pos));
        shape.fill(pos);

        update_shape_at_edge(&mut grid, &shape, UpdateFlags::CLIENTS);
        let refreshes = grid.shape_refreshes();
        // Six faces, two refreshes each
        assert_eq!(refreshes.len(), 12);
        assert!(refreshes.contains(&(pos, Direction::Up)));
        assert!(refreshes.contains(&(pos.above(1), Direction::Down)));
        // Refreshes never write voxels themselves
        assert!(grid.writes().is_empty());
    }
}
