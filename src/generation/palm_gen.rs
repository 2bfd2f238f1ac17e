//! Compact palm tree: a single straight trunk topped with a radiating
//! frond pattern and a few coconuts hanging off the crown.

use glam::IVec3;

use crate::core::Error;
use crate::generation::config::PalmConfig;
use crate::generation::finalize::finalize;
use crate::generation::placement::{exceeds_world_height, is_envelope_available, StructureVoxels};
use crate::generation::rng::RandomSource;
use crate::generation::{log_outcome, FeatureGenerator, PlacementError, PlacementResult, StructureFamily};
use crate::math::{BlockPosExt, Direction};
use crate::voxel::voxel::{UpdateFlags, VoxelState, Wood};
use crate::voxel::world::{substrate_of, VoxelGrid};

/// Frond cells relative to `(anchor.x, anchor.y + height, anchor.z)`.
///
/// Four arms rise one voxel and droop back down at their tips, with short
/// diagonal spurs between them and a single tuft on top.
const FRONDS: [IVec3; 29] = [
    IVec3::new(0, 2, 0),
    // +z arm
    IVec3::new(0, 1, 1),
    IVec3::new(0, 1, 2),
    IVec3::new(0, 1, 3),
    IVec3::new(0, 0, 4),
    // +x arm
    IVec3::new(1, 1, 0),
    IVec3::new(2, 1, 0),
    IVec3::new(3, 1, 0),
    IVec3::new(4, 0, 0),
    // -z arm
    IVec3::new(0, 1, -1),
    IVec3::new(0, 1, -2),
    IVec3::new(0, 1, -3),
    IVec3::new(0, 0, -4),
    // -x arm, diagonal ring around the crown interleaved
    IVec3::new(-1, 1, 0),
    IVec3::new(-1, 1, -1),
    IVec3::new(-1, 1, 1),
    IVec3::new(1, 1, -1),
    IVec3::new(1, 1, 1),
    IVec3::new(-2, 1, 0),
    IVec3::new(-3, 1, 0),
    IVec3::new(-4, 0, 0),
    // diagonal spurs
    IVec3::new(2, 1, 2),
    IVec3::new(2, 1, -2),
    IVec3::new(-2, 1, 2),
    IVec3::new(-2, 1, -2),
    IVec3::new(3, 0, 3),
    IVec3::new(3, 0, -3),
    IVec3::new(-3, 0, 3),
    IVec3::new(-3, 0, -3),
];

/// Every direction but up, in the order coconut draws are made
const COCONUT_DIRECTIONS: [Direction; 5] = [
    Direction::Down,
    Direction::North,
    Direction::South,
    Direction::West,
    Direction::East,
];

/// Places single-trunk palm trees.
#[derive(Clone, Debug, Default)]
pub struct PalmTreeGenerator {
    config: PalmConfig,
}

impl PalmTreeGenerator {
    /// Generator for a validated config
    pub fn new(config: PalmConfig) -> Result<Self, Error> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &PalmConfig {
        &self.config
    }

    fn check(&self, grid: &dyn VoxelGrid, anchor: IVec3, height: i32) -> Result<(), PlacementError> {
        if exceeds_world_height(grid, anchor.y, height, self.config.canopy_extent) {
            return Err(PlacementError::BoundsExceeded);
        }
        if !is_envelope_available(grid, anchor, height) {
            return Err(PlacementError::SpaceOccupied);
        }
        if !grid.can_support_growth(substrate_of(anchor)) {
            return Err(PlacementError::UnsupportedSubstrate);
        }
        Ok(())
    }

    /// Hang coconuts on the air or leaf cells around `crown`, facing it
    fn spawn_coconuts(
        &self,
        voxels: &mut StructureVoxels,
        grid: &mut dyn VoxelGrid,
        crown: IVec3,
        rng: &mut dyn RandomSource,
    ) {
        for dir in COCONUT_DIRECTIONS {
            let pos = crown.relative(dir);
            if rng.next_int(self.config.coconut_chance) == 0 && grid.is_air_or_foliage(pos) {
                voxels.foliage.remove(&pos);
                let coconut = VoxelState::Coconut { facing: dir.opposite() };
                voxels.set_decoration(grid, pos, coconut, UpdateFlags::ALL);
            }
        }
    }
}

impl FeatureGenerator for PalmTreeGenerator {
    fn family(&self) -> StructureFamily {
        StructureFamily::PalmTree
    }

    fn place(&self, grid: &mut dyn VoxelGrid, anchor: IVec3, rng: &mut dyn RandomSource) -> PlacementResult {
        let height = rng.next_int(self.config.height_variance) + self.config.base_height;

        if let Err(reason) = self.check(grid, anchor, height) {
            let result = Err(reason);
            log_outcome(self.family(), anchor, &result, 0);
            return result;
        }

        let mut voxels = StructureVoxels::new();
        let ground = substrate_of(anchor);
        if self.config.convert_grass && grid.get_voxel(ground) == VoxelState::GrassBlock {
            voxels.set_substrate(grid, ground, VoxelState::Dirt, UpdateFlags::ALL);
        }

        let crown = anchor.above(height);
        let leaf = VoxelState::leaves(Wood::Palm);
        for offset in FRONDS {
            voxels.place_foliage(grid, crown + offset, leaf);
        }

        // Trunk runs two past the crown so the top fronds hang off wood
        for dy in 0..height + 2 {
            voxels.place_stem(grid, anchor.above(dy), VoxelState::Log(Wood::Palm));
        }

        self.spawn_coconuts(&mut voxels, grid, crown, rng);

        let result = finalize(grid, &voxels);
        log_outcome(self.family(), anchor, &result, voxels.len());
        result
    }
}
