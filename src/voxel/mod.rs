//! Voxel states, grid access and occupancy shapes

pub mod voxel;
pub mod world;
pub mod shape;

pub use voxel::{UpdateFlags, VoxelState, LEAF_DECAY_DISTANCE};
pub use world::{HeightmapKind, SparseGrid, VoxelGrid};
pub use shape::VoxelShape;
