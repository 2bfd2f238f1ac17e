//! Integer voxel math

pub mod bounds;
pub mod direction;

pub use bounds::BlockBox;
pub use direction::{around_offsets, BlockPosExt, Direction};
