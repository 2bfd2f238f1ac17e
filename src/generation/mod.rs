//! Structure generation — places trees and underwater plant clusters.
//!
//! Each generator runs one placement attempt in three phases:
//! 1. Pure-read prechecks (vertical bounds, free space, substrate)
//! 2. Voxel writes through the placement primitives
//! 3. Finalization (envelope, leaf distances, edge shape refresh)
//!
//! A failed precheck aborts before the first write, so a caller may retry
//! elsewhere without cleaning up.

pub mod config;
pub mod rng;
pub mod noise_field;
pub mod placement;
pub mod shapes;
pub mod foliage;
pub mod finalize;
pub mod palm_gen;
pub mod rainforest_gen;
pub mod seagrass_gen;

pub use config::{FeatureConfig, PalmConfig, RainforestConfig, SeagrassConfig};
pub use rng::{LegacyRandom, RandomSource};
pub use noise_field::{NoiseCache, SelectorNoise};
pub use placement::StructureVoxels;
pub use palm_gen::PalmTreeGenerator;
pub use rainforest_gen::RainforestTreeGenerator;
pub use seagrass_gen::SeagrassGenerator;

use glam::IVec3;
use thiserror::Error;

use crate::math::BlockBox;
use crate::voxel::world::VoxelGrid;

/// Kinds of structure this module can place
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StructureFamily {
    PalmTree,
    RainforestTree,
    Seagrass,
}

impl StructureFamily {
    pub fn name(self) -> &'static str {
        match self {
            StructureFamily::PalmTree => "palm",
            StructureFamily::RainforestTree => "rainforest",
            StructureFamily::Seagrass => "seagrass",
        }
    }
}

/// Bounding box of every voxel written by one successful attempt
pub type StructureEnvelope = BlockBox;

/// Why a placement attempt wrote nothing.
///
/// All variants are expected outcomes during world generation; none leaves
/// the grid modified.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Error)]
pub enum PlacementError {
    #[error("structure would leave the world's vertical limits")]
    BoundsExceeded,
    #[error("structure envelope overlaps occupied space")]
    SpaceOccupied,
    #[error("anchor footprint cannot support growth")]
    UnsupportedSubstrate,
    #[error("no voxel was written")]
    EmptyResult,
    #[error("skipped by random density thinning")]
    Thinned,
}

impl PlacementError {
    pub const ALL: [PlacementError; 5] = [
        PlacementError::BoundsExceeded,
        PlacementError::SpaceOccupied,
        PlacementError::UnsupportedSubstrate,
        PlacementError::EmptyResult,
        PlacementError::Thinned,
    ];
}

pub type PlacementResult = std::result::Result<StructureEnvelope, PlacementError>;

/// One kind of placeable structure.
///
/// Implementors hold only immutable configuration and shared read-only
/// noise, so one instance may serve placements on many threads.
pub trait FeatureGenerator: Send + Sync {
    fn family(&self) -> StructureFamily;

    /// Run one placement attempt rooted at `anchor`.
    ///
    /// On `Err` the grid is unchanged. Draws from `rng` in a fixed order, so
    /// equal seeds, anchors and grid contents give equal structures.
    fn place(
        &self,
        grid: &mut dyn VoxelGrid,
        anchor: IVec3,
        rng: &mut dyn RandomSource,
    ) -> PlacementResult;

    /// `place`, collapsed to whether anything was placed
    fn try_place(&self, grid: &mut dyn VoxelGrid, anchor: IVec3, rng: &mut dyn RandomSource) -> bool {
        self.place(grid, anchor, rng).is_ok()
    }
}

/// Log the outcome of an attempt the way every generator reports it
pub(crate) fn log_outcome(family: StructureFamily, anchor: IVec3, result: &PlacementResult, voxels: usize) {
    match result {
        Ok(envelope) => log::debug!(
            "Placed {} at {anchor}: {voxels} voxels in {}..{}",
            family.name(), envelope.min, envelope.max
        ),
        Err(reason) => log::debug!("No {} at {anchor}: {reason}", family.name()),
    }
}
