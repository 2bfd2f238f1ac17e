//! Tall rainforest tree: five fused trunk columns, leaf puffs and
//! understory canopies on the way up, and a wide crown with radial
//! branches at the top.

use glam::IVec3;

use crate::core::Error;
use crate::generation::config::RainforestConfig;
use crate::generation::finalize::finalize;
use crate::generation::placement::{exceeds_world_height, is_envelope_available, StructureVoxels};
use crate::generation::rng::RandomSource;
use crate::generation::shapes::{line, ring};
use crate::generation::{log_outcome, FeatureGenerator, PlacementError, PlacementResult, StructureFamily};
use crate::math::{BlockPosExt, Direction};
use crate::voxel::voxel::{UpdateFlags, VoxelState, Wood};
use crate::voxel::world::VoxelGrid;

/// Trunk footprint: centre plus the four lateral neighbours
const FOOTPRINT: [IVec3; 5] = [
    IVec3::new(0, 0, 0),
    IVec3::new(-1, 0, 0),
    IVec3::new(1, 0, 0),
    IVec3::new(0, 0, -1),
    IVec3::new(0, 0, 1),
];

/// Lateral footprint cells whose substrate is checked, after the centre
const ROOT_CHECKS: [Direction; 4] = [Direction::East, Direction::West, Direction::North, Direction::South];

/// Horizontal directions of the crown branches, z-major
const BRANCH_DIRECTIONS: [IVec3; 8] = [
    IVec3::new(-1, 0, -1),
    IVec3::new(0, 0, -1),
    IVec3::new(1, 0, -1),
    IVec3::new(-1, 0, 0),
    IVec3::new(1, 0, 0),
    IVec3::new(-1, 0, 1),
    IVec3::new(0, 0, 1),
    IVec3::new(1, 0, 1),
];

/// Places tall five-trunk rainforest trees.
#[derive(Clone, Debug, Default)]
pub struct RainforestTreeGenerator {
    config: RainforestConfig,
}

impl RainforestTreeGenerator {
    /// Generator for a validated config
    pub fn new(config: RainforestConfig) -> Result<Self, Error> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &RainforestConfig {
        &self.config
    }

    fn check(&self, grid: &dyn VoxelGrid, anchor: IVec3, height: i32) -> Result<(), PlacementError> {
        if exceeds_world_height(grid, anchor.y, height, self.config.canopy_extent) {
            return Err(PlacementError::BoundsExceeded);
        }
        if !is_envelope_available(grid, anchor, height) {
            return Err(PlacementError::SpaceOccupied);
        }
        let roots = std::iter::once(anchor).chain(ROOT_CHECKS.iter().map(|d| anchor.relative(*d)));
        for root in roots {
            if !grid.can_support_growth(root.below(1)) {
                return Err(PlacementError::UnsupportedSubstrate);
            }
        }
        Ok(())
    }

    /// Horizontal leaf ring; leaves only fill air
    fn leaf_disc(
        voxels: &mut StructureVoxels,
        grid: &mut dyn VoxelGrid,
        center: IVec3,
        outer: i32,
        inner: i32,
    ) {
        let leaf = VoxelState::leaves(Wood::Mahogany);
        for pos in ring(center, outer, inner) {
            if grid.is_air(pos) {
                voxels.place_foliage(grid, pos, leaf);
            }
        }
    }

    fn branch(voxels: &mut StructureVoxels, grid: &mut dyn VoxelGrid, from: IVec3, to: IVec3) {
        for pos in line(from, to) {
            voxels.place_stem(grid, pos, VoxelState::Log(Wood::Mahogany));
        }
    }

    /// One trunk level: five logs, then maybe a leaf puff and an understory canopy
    fn grow_level(
        &self,
        voxels: &mut StructureVoxels,
        grid: &mut dyn VoxelGrid,
        anchor: IVec3,
        height: i32,
        y: i32,
        rng: &mut dyn RandomSource,
    ) {
        let cfg = &self.config;
        let level = anchor.with_y(y);
        for offset in FOOTPRINT {
            voxels.place_stem(grid, level + offset, VoxelState::Log(Wood::Mahogany));
        }

        let climbed = y - anchor.y;
        if climbed > height / 2 && rng.next_int(cfg.small_leaf_chance) == 0 {
            let nx = rng.next_int(3) - 1 + anchor.x;
            let nz = rng.next_int(3) - 1 + anchor.z;
            Self::leaf_disc(voxels, grid, IVec3::new(nx, y + 1, nz), 1, 0);
            Self::leaf_disc(voxels, grid, IVec3::new(nx, y, nz), 2, 1);
        }

        if climbed > height - height / 4
            && climbed < height - 3
            && rng.next_int(cfg.second_canopy_chance) == 0
        {
            let nx = anchor.x + rng.next_int(9) - 4;
            let nz = anchor.z + rng.next_int(9) - 4;
            let size = rng.next_int(cfg.understory_size_variance) + cfg.understory_base_size;

            Self::leaf_disc(voxels, grid, IVec3::new(nx, y + 3, nz), size - 2, 0);
            Self::leaf_disc(voxels, grid, IVec3::new(nx, y + 2, nz), size - 1, size - 3);
            Self::leaf_disc(voxels, grid, IVec3::new(nx, y + 1, nz), size, size - 1);
            Self::branch(voxels, grid, level.below(2), IVec3::new(nx, y + 2, nz));
        }
    }

    /// Stacked crown discs and the radial branches beneath them
    fn grow_crown(
        &self,
        voxels: &mut StructureVoxels,
        grid: &mut dyn VoxelGrid,
        anchor: IVec3,
        height: i32,
        rng: &mut dyn RandomSource,
    ) {
        let cfg = &self.config;
        let size = rng.next_int(cfg.crown_size_variance) + cfg.crown_base_size;
        let top = anchor.above(height);

        Self::leaf_disc(voxels, grid, top, size - 2, 0);
        Self::leaf_disc(voxels, grid, top.below(1), size - 1, size - 4);
        Self::leaf_disc(voxels, grid, top.below(2), size, size - 1);

        let branch_y = top.y - 1;
        for dir in BRANCH_DIRECTIONS {
            let reach = if dir.x != 0 && dir.z != 0 { size / 2 } else { size - 4 };
            let jitter_x = 1 - rng.next_int(3);
            let jitter_z = 1 - rng.next_int(3);
            let end = anchor + dir * reach + IVec3::new(jitter_x, 0, jitter_z);
            Self::branch(voxels, grid, top.with_y(branch_y), end.with_y(branch_y));
        }
    }
}

impl FeatureGenerator for RainforestTreeGenerator {
    fn family(&self) -> StructureFamily {
        StructureFamily::RainforestTree
    }

    fn place(&self, grid: &mut dyn VoxelGrid, anchor: IVec3, rng: &mut dyn RandomSource) -> PlacementResult {
        let height = rng.next_int(self.config.height_variance) + self.config.base_height;

        if let Err(reason) = self.check(grid, anchor, height) {
            let result = Err(reason);
            log_outcome(self.family(), anchor, &result, 0);
            return result;
        }

        let mut voxels = StructureVoxels::new();
        for offset in FOOTPRINT {
            voxels.set_substrate(grid, (anchor + offset).below(1), VoxelState::Dirt, UpdateFlags::ALL);
        }

        for y in anchor.y..anchor.y + height {
            self.grow_level(&mut voxels, grid, anchor, height, y, rng);
        }
        self.grow_crown(&mut voxels, grid, anchor, height, rng);

        let result = finalize(grid, &voxels);
        log_outcome(self.family(), anchor, &result, voxels.len());
        result
    }
}
