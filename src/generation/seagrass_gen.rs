//! Submerged plant clusters.
//!
//! Scans a disc around the anchor and, per water column, picks a plant
//! family from the column depth (deep or shallow) and a world-seeded
//! selector field, so neighbouring columns tend to agree. There is no
//! all-or-nothing precheck: dry or unsuitable columns are skipped one by one.

use std::sync::Arc;

use glam::IVec3;

use crate::core::Error;
use crate::generation::config::SeagrassConfig;
use crate::generation::finalize::finalize;
use crate::generation::noise_field::{NoiseCache, SelectorNoise};
use crate::generation::placement::StructureVoxels;
use crate::generation::rng::RandomSource;
use crate::generation::{log_outcome, FeatureGenerator, PlacementError, PlacementResult, StructureFamily};
use crate::math::BlockPosExt;
use crate::voxel::voxel::{BlockHalf, SeagrassKind, UpdateFlags, VoxelState};
use crate::voxel::world::{HeightmapKind, VoxelGrid};

/// Plant states of one family
#[derive(Debug, PartialEq, Eq)]
pub struct SeagrassPalette {
    pub short: SeagrassKind,
    pub matted: SeagrassKind,
    /// Two-voxel form, absent for families that only grow short
    pub tall: Option<SeagrassKind>,
    /// Rare flowering substitute for the short and tall forms
    pub flowering: Option<&'static SeagrassPalette>,
}

static DEEP_SELECTED: SeagrassPalette = SeagrassPalette {
    short: SeagrassKind::Sickle,
    matted: SeagrassKind::Sickle,
    tall: Some(SeagrassKind::Sickle),
    flowering: None,
};

static DEEP_OTHER: SeagrassPalette = SeagrassPalette {
    short: SeagrassKind::Noodle,
    matted: SeagrassKind::Noodle,
    tall: None,
    flowering: None,
};

static FLOWERING_EEL: SeagrassPalette = SeagrassPalette {
    short: SeagrassKind::FloweringEel,
    matted: SeagrassKind::Eel,
    tall: Some(SeagrassKind::FloweringEel),
    flowering: None,
};

static SHALLOW_SELECTED: SeagrassPalette = SeagrassPalette {
    short: SeagrassKind::Eel,
    matted: SeagrassKind::Eel,
    tall: Some(SeagrassKind::Eel),
    flowering: Some(&FLOWERING_EEL),
};

static SHALLOW_OTHER: SeagrassPalette = SeagrassPalette {
    short: SeagrassKind::Fern,
    matted: SeagrassKind::Fern,
    tall: Some(SeagrassKind::Fern),
    flowering: None,
};

/// Family for a depth class and selector outcome
pub fn palette(deep: bool, selected: bool) -> &'static SeagrassPalette {
    match (deep, selected) {
        (true, true) => &DEEP_SELECTED,
        (true, false) => &DEEP_OTHER,
        (false, true) => &SHALLOW_SELECTED,
        (false, false) => &SHALLOW_OTHER,
    }
}

/// Places seagrass clusters on the sea floor.
pub struct SeagrassGenerator {
    config: SeagrassConfig,
    noise: Arc<NoiseCache>,
}

impl SeagrassGenerator {
    /// Generator sharing an existing noise cache
    pub fn new(config: SeagrassConfig, noise: Arc<NoiseCache>) -> Result<Self, Error> {
        config.validate()?;
        Ok(Self { config, noise })
    }

    /// Generator with its own cache for `seed`
    pub fn for_seed(config: SeagrassConfig, seed: u64) -> Result<Self, Error> {
        let noise = Arc::new(NoiseCache::new(seed, config.first_octave));
        Self::new(config, noise)
    }

    pub fn config(&self) -> &SeagrassConfig {
        &self.config
    }

    pub fn noise(&self) -> &Arc<NoiseCache> {
        &self.noise
    }

    /// Plant one water column; `column.y` is the height the selector is sampled at
    fn plant_column(
        &self,
        voxels: &mut StructureVoxels,
        grid: &mut dyn VoxelGrid,
        column: IVec3,
        fields: [&SelectorNoise; 2],
        rng: &mut dyn RandomSource,
    ) {
        let cfg = &self.config;
        let (cx, cz) = (column.x, column.z);
        let floor = grid.height(HeightmapKind::OceanFloor, cx, cz);
        let surface = grid.height(HeightmapKind::WorldSurface, cx, cz);
        let depth = surface - floor;
        if depth <= 0 {
            return;
        }

        let deep = depth >= cfg.deep_threshold;
        let selected = fields[deep as usize].select(cx, column.y, cz);
        let family = palette(deep, selected);
        let matted = family.matted;
        let (mut short, mut tall) = (family.short, family.tall);

        if let Some(flowering) = family.flowering {
            if rng.next_int(cfg.flowering_chance) == 0 {
                short = flowering.short;
                tall = flowering.tall;
            }
        }

        let (min_y, _) = grid.height_limits();
        if rng.next_int(cfg.matted_chance) > 0 && floor > min_y {
            let bed = IVec3::new(cx, floor - 1, cz);
            voxels.set_substrate(grid, bed, VoxelState::MattedSeagrass(matted), UpdateFlags::CLIENTS);
        }

        let local = IVec3::new(cx, floor, cz);
        if !grid.is_water(local) {
            return;
        }

        if let Some(kind) = tall {
            if rng.next_int(cfg.tall_chance) == 0 && grid.is_water(local.above(1)) {
                let upper = VoxelState::TallSeagrass { kind, half: BlockHalf::Upper };
                let lower = VoxelState::TallSeagrass { kind, half: BlockHalf::Lower };
                voxels.set_decoration(grid, local.above(1), upper, UpdateFlags::CLIENTS);
                voxels.set_decoration(grid, local, lower, UpdateFlags::CLIENTS);
                return;
            }
        }

        let short_chance = if tall.is_some() { cfg.short_chance } else { cfg.short_chance_without_tall };
        if rng.next_int(short_chance) == 0 {
            voxels.set_decoration(grid, local, VoxelState::Seagrass(short), UpdateFlags::CLIENTS);
            return;
        }

        if rng.next_int(cfg.pickle_chance) == 0 {
            let pickles = rng.next_int(cfg.max_pickles as i32) as u8 + 1;
            voxels.set_decoration(grid, local, VoxelState::SeaPickle { pickles }, UpdateFlags::CLIENTS);
        }
    }
}

impl FeatureGenerator for SeagrassGenerator {
    fn family(&self) -> StructureFamily {
        StructureFamily::Seagrass
    }

    fn place(&self, grid: &mut dyn VoxelGrid, anchor: IVec3, rng: &mut dyn RandomSource) -> PlacementResult {
        let cfg = &self.config;
        if rng.next_int(cfg.skip_chance) == 0 {
            let result = Err(PlacementError::Thinned);
            log_outcome(self.family(), anchor, &result, 0);
            return result;
        }

        let fresh;
        let fields = if grid.seed() == self.noise.seed() {
            [self.noise.field(false), self.noise.field(true)]
        } else {
            log::warn!(
                "Noise cache built for seed {} used on grid with seed {}; building uncached fields",
                self.noise.seed(), grid.seed()
            );
            fresh = [
                SelectorNoise::for_variant(grid.seed(), false, cfg.first_octave),
                SelectorNoise::for_variant(grid.seed(), true, cfg.first_octave),
            ];
            [&fresh[0], &fresh[1]]
        };

        let radius = rng.next_int(cfg.radius_variance) + cfg.base_radius;
        let mut voxels = StructureVoxels::new();
        for x in -radius..=radius {
            for z in -radius..=radius {
                if x * x + z * z > radius * radius {
                    continue;
                }
                self.plant_column(&mut voxels, grid, anchor + IVec3::new(x, 0, z), fields, rng);
            }
        }

        let result = finalize(grid, &voxels);
        log_outcome(self.family(), anchor, &result, voxels.len());
        result
    }
}
