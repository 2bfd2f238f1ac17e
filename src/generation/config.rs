//! Tunable constants for the structure generators.
//!
//! Every `*_chance` field `n` means "one in `n`": the generator draws
//! `next_int(n)` and acts on zero. Every `*_variance` field `v` adds a
//! uniform draw from `[0, v)` to its base value.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::error::Error;
use crate::core::types::Result;

/// Configuration for all structure generators.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeatureConfig {
    pub palm: PalmConfig,
    pub rainforest: RainforestConfig,
    pub seagrass: SeagrassConfig,
}

/// Compact palm-like tree
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PalmConfig {
    pub base_height: i32,
    pub height_variance: i32,
    /// Per-direction coconut chance around the trunk top
    pub coconut_chance: i32,
    /// Voxels the fronds reach above the trunk height
    pub canopy_extent: i32,
    /// Turn grass under the trunk into dirt
    pub convert_grass: bool,
}

impl Default for PalmConfig {
    fn default() -> Self {
        Self {
            base_height: 6,
            height_variance: 4,
            coconut_chance: 2,
            canopy_extent: 2,
            convert_grass: true,
        }
    }
}

/// Tall five-trunk rainforest tree
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RainforestConfig {
    pub base_height: i32,
    pub height_variance: i32,
    pub canopy_extent: i32,
    /// Per-level chance of a leaf puff beside the trunk (upper half only)
    pub small_leaf_chance: i32,
    /// Per-level chance of an understory canopy (top quarter only)
    pub second_canopy_chance: i32,
    pub understory_base_size: i32,
    pub understory_size_variance: i32,
    pub crown_base_size: i32,
    pub crown_size_variance: i32,
}

impl Default for RainforestConfig {
    fn default() -> Self {
        Self {
            base_height: 15,
            height_variance: 15,
            canopy_extent: 1,
            small_leaf_chance: 3,
            second_canopy_chance: 3,
            understory_base_size: 5,
            understory_size_variance: 3,
            crown_base_size: 9,
            crown_size_variance: 5,
        }
    }
}

/// Submerged plant cluster
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeagrassConfig {
    /// Chance the whole cluster is skipped
    pub skip_chance: i32,
    pub base_radius: i32,
    pub radius_variance: i32,
    /// Water columns at least this deep use the deep-water families
    pub deep_threshold: i32,
    pub flowering_chance: i32,
    /// Matted cover is laid unless `next_int(matted_chance)` rolls zero
    pub matted_chance: i32,
    pub tall_chance: i32,
    pub short_chance: i32,
    /// Short-form chance for families without a tall form
    pub short_chance_without_tall: i32,
    pub pickle_chance: i32,
    pub max_pickles: u8,
    /// Noise feature scale, the field varies over about `2^-first_octave` voxels
    pub first_octave: i32,
}

impl Default for SeagrassConfig {
    fn default() -> Self {
        Self {
            skip_chance: 4,
            base_radius: 8,
            radius_variance: 4,
            deep_threshold: 18,
            flowering_chance: 8,
            matted_chance: 8,
            tall_chance: 10,
            short_chance: 8,
            short_chance_without_tall: 3,
            pickle_chance: 80,
            max_pickles: 4,
            first_octave: -6,
        }
    }
}

fn require_positive(name: &str, value: i32) -> Result<()> {
    if value <= 0 {
        return Err(Error::InvalidConfig(format!("{name} must be positive, got {value}")));
    }
    Ok(())
}

impl FeatureConfig {
    /// Parse from a JSON string; missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from file
    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Save to file as pretty JSON, creating parent directories
    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Reject values the generators cannot draw from
    pub fn validate(&self) -> Result<()> {
        self.palm.validate()?;
        self.rainforest.validate()?;
        self.seagrass.validate()
    }
}

impl PalmConfig {
    pub fn validate(&self) -> Result<()> {
        require_positive("palm.base_height", self.base_height)?;
        require_positive("palm.height_variance", self.height_variance)?;
        require_positive("palm.coconut_chance", self.coconut_chance)
    }
}

impl RainforestConfig {
    pub fn validate(&self) -> Result<()> {
        require_positive("rainforest.base_height", self.base_height)?;
        require_positive("rainforest.height_variance", self.height_variance)?;
        require_positive("rainforest.small_leaf_chance", self.small_leaf_chance)?;
        require_positive("rainforest.second_canopy_chance", self.second_canopy_chance)?;
        require_positive("rainforest.understory_base_size", self.understory_base_size)?;
        require_positive("rainforest.understory_size_variance", self.understory_size_variance)?;
        require_positive("rainforest.crown_base_size", self.crown_base_size)?;
        require_positive("rainforest.crown_size_variance", self.crown_size_variance)
    }
}

impl SeagrassConfig {
    pub fn validate(&self) -> Result<()> {
        require_positive("seagrass.skip_chance", self.skip_chance)?;
        require_positive("seagrass.base_radius", self.base_radius)?;
        require_positive("seagrass.radius_variance", self.radius_variance)?;
        require_positive("seagrass.flowering_chance", self.flowering_chance)?;
        require_positive("seagrass.matted_chance", self.matted_chance)?;
        require_positive("seagrass.tall_chance", self.tall_chance)?;
        require_positive("seagrass.short_chance", self.short_chance)?;
        require_positive("seagrass.short_chance_without_tall", self.short_chance_without_tall)?;
        require_positive("seagrass.pickle_chance", self.pickle_chance)?;
        if !(1..=4).contains(&self.max_pickles) {
            return Err(Error::InvalidConfig(format!(
                "seagrass.max_pickles must be in 1..=4, got {}", self.max_pickles
            )));
        }
        Ok(())
    }
}
