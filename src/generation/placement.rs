//! Voxel placement primitives and the pre-placement validator.
//!
//! Every write a generator makes goes through one of the `place_*`/`set_*`
//! helpers so it is recorded by role in [`StructureVoxels`]. The validator
//! functions are pure reads and run before the first write.

use std::collections::HashSet;

use glam::IVec3;

use crate::math::{BlockBox, BlockPosExt};
use crate::voxel::voxel::{UpdateFlags, VoxelState};
use crate::voxel::world::VoxelGrid;

/// Coordinates written by one placement attempt, partitioned by role.
///
/// Sets are idempotent: re-adding a coordinate is a no-op. A coordinate
/// lives in at most one of `trunk` and `foliage`; trunk always wins.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StructureVoxels {
    pub trunk: HashSet<IVec3>,
    pub foliage: HashSet<IVec3>,
    pub substrate: HashSet<IVec3>,
    pub decoration: HashSet<IVec3>,
}

impl StructureVoxels {
    pub fn new() -> Self {
        Self::default()
    }

    /// All recorded coordinates, trunk first
    pub fn iter_all(&self) -> impl Iterator<Item = IVec3> + '_ {
        self.trunk.iter()
            .chain(self.foliage.iter())
            .chain(self.substrate.iter())
            .chain(self.decoration.iter())
            .copied()
    }

    /// Number of distinct coordinates recorded across all roles
    pub fn len(&self) -> usize {
        self.trunk.len() + self.foliage.len() + self.substrate.len() + self.decoration.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Bounding box of every recorded coordinate
    pub fn envelope(&self) -> Option<BlockBox> {
        BlockBox::encapsulating(self.iter_all())
    }

    /// Write a trunk voxel if the grid accepts tree growth there.
    ///
    /// Returns whether the write happened; `false` is a skip, not an error.
    pub fn place_stem(&mut self, grid: &mut dyn VoxelGrid, pos: IVec3, state: VoxelState) -> bool {
        if !grid.is_valid_growth_target(pos) {
            log::trace!("stem not placed at {pos}: not a growth target");
            return false;
        }
        self.foliage.remove(&pos);
        self.trunk.insert(pos);
        grid.set_voxel(pos, state, UpdateFlags::ALL_KNOWN_SHAPE);
        true
    }

    /// Write a foliage voxel if the grid accepts tree growth there and no
    /// trunk voxel of this structure already occupies the cell.
    pub fn place_foliage(&mut self, grid: &mut dyn VoxelGrid, pos: IVec3, state: VoxelState) -> bool {
        if self.trunk.contains(&pos) {
            log::trace!("foliage not placed at {pos}: trunk occupies cell");
            return false;
        }
        if !grid.is_valid_growth_target(pos) {
            log::trace!("foliage not placed at {pos}: not a growth target");
            return false;
        }
        self.foliage.insert(pos);
        grid.set_voxel(pos, state, UpdateFlags::ALL_KNOWN_SHAPE);
        true
    }

    /// Unconditionally write a substrate voxel (root soil, matted floor)
    pub fn set_substrate(&mut self, grid: &mut dyn VoxelGrid, pos: IVec3, state: VoxelState, flags: UpdateFlags) {
        self.substrate.insert(pos);
        grid.set_voxel(pos, state, flags);
    }

    /// Unconditionally write a plant or attachment that is neither trunk nor
    /// leaf; callers check the target cell themselves.
    pub fn set_decoration(&mut self, grid: &mut dyn VoxelGrid, pos: IVec3, state: VoxelState, flags: UpdateFlags) {
        self.decoration.insert(pos);
        grid.set_voxel(pos, state, flags);
    }
}

/// True if a structure rooted at `y` with a `height` trunk and foliage
/// reaching `canopy_extent` above it would leave the world's vertical limits.
pub fn exceeds_world_height(grid: &dyn VoxelGrid, y: i32, height: i32, canopy_extent: i32) -> bool {
    let (min_y, max_y) = grid.height_limits();
    y < min_y + 1 || y + height + canopy_extent >= max_y
}

/// True if the column of cells a tree of `height` will sweep is free.
///
/// Checks the anchor cell itself, then a 3x3 square per trunk level,
/// widening to 5x5 for the top two levels and the crown above.
pub fn is_envelope_available(grid: &dyn VoxelGrid, anchor: IVec3, height: i32) -> bool {
    for dy in 0..=height + 1 {
        let level = anchor.above(dy);
        let half = if dy == 0 {
            0
        } else if dy >= height - 1 {
            2
        } else {
            1
        };
        for dx in -half..=half {
            for dz in -half..=half {
                if !grid.is_valid_growth_target(level + IVec3::new(dx, 0, dz)) {
                    return false;
                }
            }
        }
    }
    true
}
