//! Canopy - procedural tree and seagrass placement for sparse voxel grids

pub mod core;
pub mod math;
pub mod voxel;
pub mod generation;
