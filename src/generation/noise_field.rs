//! Deterministic selector noise and its process-scoped cache.
//!
//! Generators threshold the field at zero to make binary choices (which
//! plant family to place) that vary smoothly across space instead of
//! flickering from cell to cell. The field depends only on the world seed,
//! never on the per-placement random source.

use std::sync::OnceLock;

use noise::{NoiseFn, Perlin};

use crate::generation::rng::{LegacyRandom, RandomSource};

/// Frequency ratio between the two summed samplers; irrational-ish so
/// their lattices never line up.
const INPUT_FACTOR: f64 = 1.018_126_888_217_522_7;
/// Normalizes a single-octave pair toward unit deviation
const VALUE_FACTOR: f64 = (1.0 / 6.0) / (0.1 * (1.0 + 1.0 / 1.0));
/// Mixed into the world seed for the `true` variant
const VARIANT_SALT: u64 = 0x9E37_79B9_7F4A_7C15;

/// Normal-distributed scalar field built from two Perlin samplers.
pub struct SelectorNoise {
    first: Perlin,
    second: Perlin,
    frequency: f64,
}

impl SelectorNoise {
    /// Build the field for a seed.
    ///
    /// `first_octave` sets the feature scale: the field varies over roughly
    /// `2^-first_octave` voxels.
    pub fn new(seed: u64, first_octave: i32) -> Self {
        let mut rng = LegacyRandom::new(seed as i64);
        let first = Perlin::new(rng.next_long() as u32);
        let second = Perlin::new(rng.next_long() as u32);
        Self {
            first,
            second,
            frequency: 2f64.powi(first_octave),
        }
    }

    /// Field for one variant of a world. The two variants are seeded
    /// apart, so their patterns are independent.
    pub fn for_variant(world_seed: u64, variant: bool, first_octave: i32) -> Self {
        let seed = if variant { world_seed ^ VARIANT_SALT } else { world_seed };
        Self::new(seed, first_octave)
    }

    /// Sample the field at a voxel position
    pub fn value(&self, x: f64, y: f64, z: f64) -> f64 {
        let f = self.frequency;
        let g = f * INPUT_FACTOR;
        let a = self.first.get([x * f, y * f, z * f]);
        let b = self.second.get([x * g, y * g, z * g]);
        (a + b) * VALUE_FACTOR
    }

    /// Binary choice at a position: the field is above zero
    pub fn select(&self, x: i32, y: i32, z: i32) -> bool {
        self.value(x as f64, y as f64, z as f64) > 0.0
    }
}

/// Lazily built seagrass selector fields for one world, one per variant
/// (the depth class: `true` for deep water).
///
/// Construction happens at most once per variant even under concurrent
/// first access; afterwards lookups are a single atomic load and always
/// return the same instance. Share it by reference (or `Arc`) across
/// placements.
pub struct NoiseCache {
    seed: u64,
    first_octave: i32,
    slots: [OnceLock<SelectorNoise>; 2],
}

impl NoiseCache {
    pub fn new(seed: u64, first_octave: i32) -> Self {
        Self {
            seed,
            first_octave,
            slots: [OnceLock::new(), OnceLock::new()],
        }
    }

    /// World seed the cached fields are built from
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Field for a variant, building it on first request
    pub fn field(&self, variant: bool) -> &SelectorNoise {
        self.slots[variant as usize].get_or_init(|| {
            log::debug!("Building seagrass selector noise (variant={variant}) from seed {}", self.seed);
            SelectorNoise::for_variant(self.seed, variant, self.first_octave)
        })
    }

    /// Number of fields built so far
    pub fn built_count(&self) -> usize {
        self.slots.iter().filter(|s| s.get().is_some()).count()
    }
}
