//! Voxel state type and write flags

use crate::math::Direction;

/// Leaf distance at which foliage is considered unsupported and decays.
///
/// Freshly placed leaves start here; the foliage pass relabels the
/// ones it can reach from a trunk.
pub const LEAF_DECAY_DISTANCE: u8 = 7;

/// Wood species for logs and leaves
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Wood {
    Palm,
    Mahogany,
}

/// Submerged plant species
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SeagrassKind {
    Sickle,
    Noodle,
    Eel,
    FloweringEel,
    Fern,
}

/// Which half of a two-voxel plant a cell holds
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BlockHalf {
    Lower,
    Upper,
}

/// Placed material plus its orientation/variant metadata.
///
/// Generators only construct the states they place and classify
/// everything else through the predicates below.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum VoxelState {
    #[default]
    Air,
    Water,
    Stone,
    Sand,
    Dirt,
    GrassBlock,
    /// Short plants that trees may grow through
    TallGrass,
    Log(Wood),
    Leaves {
        wood: Wood,
        /// Hops to the nearest log, `LEAF_DECAY_DISTANCE` when unsupported
        distance: u8,
    },
    /// Fruit hanging off a trunk, `facing` points back at the trunk
    Coconut { facing: Direction },
    Seagrass(SeagrassKind),
    MattedSeagrass(SeagrassKind),
    TallSeagrass { kind: SeagrassKind, half: BlockHalf },
    /// Light-emitting cluster; brightness grows with `pickles` (1-4)
    SeaPickle { pickles: u8 },
}

impl VoxelState {
    /// Fresh, unsupported leaves of the given wood
    pub fn leaves(wood: Wood) -> Self {
        VoxelState::Leaves { wood, distance: LEAF_DECAY_DISTANCE }
    }

    pub fn is_air(&self) -> bool {
        matches!(self, VoxelState::Air)
    }

    pub fn is_leaves(&self) -> bool {
        matches!(self, VoxelState::Leaves { .. })
    }

    pub fn is_log(&self) -> bool {
        matches!(self, VoxelState::Log(_))
    }

    /// Water or a plant that only lives submerged
    pub fn is_water_like(&self) -> bool {
        matches!(
            self,
            VoxelState::Water
                | VoxelState::Seagrass(_)
                | VoxelState::TallSeagrass { .. }
                | VoxelState::SeaPickle { .. }
        )
    }

    /// Soil a sapling can root in
    pub fn is_soil(&self) -> bool {
        matches!(self, VoxelState::Dirt | VoxelState::GrassBlock | VoxelState::Sand)
    }

    /// Cells a growing tree may overwrite
    pub fn is_replaceable_by_trees(&self) -> bool {
        matches!(self, VoxelState::Air | VoxelState::Leaves { .. } | VoxelState::TallGrass)
    }

    /// Solid for heightmap purposes (everything that stops a falling entity)
    pub fn blocks_motion(&self) -> bool {
        matches!(
            self,
            VoxelState::Stone
                | VoxelState::Sand
                | VoxelState::Dirt
                | VoxelState::GrassBlock
                | VoxelState::Log(_)
                | VoxelState::Leaves { .. }
                | VoxelState::MattedSeagrass(_)
        )
    }

    /// Distance-to-support attribute, present only on leaves
    pub fn leaf_distance(&self) -> Option<u8> {
        match self {
            VoxelState::Leaves { distance, .. } => Some(*distance),
            _ => None,
        }
    }

    /// Copy with a new leaf distance; non-leaf states are returned unchanged
    pub fn with_leaf_distance(self, distance: u8) -> Self {
        match self {
            VoxelState::Leaves { wood, .. } => VoxelState::Leaves { wood, distance },
            other => other,
        }
    }
}

/// Downstream consistency updates requested by a voxel write.
///
/// Mirrors the host's bit flags: the low bits select which updates fire,
/// `shape_radius` bounds how far a boundary-shape update may cascade.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct UpdateFlags {
    bits: u8,
    shape_radius: u8,
}

impl UpdateFlags {
    /// Notify neighbouring voxels
    pub const NEIGHBORS: Self = Self::from_bits(1 << 0);
    /// Propagate to observers of the grid
    pub const CLIENTS: Self = Self::from_bits(1 << 1);
    /// Skip shape recomputation, the writer knows the final shape
    pub const KNOWN_SHAPE: Self = Self::from_bits(1 << 4);
    pub const ALL: Self = Self::from_bits(Self::NEIGHBORS.bits | Self::CLIENTS.bits);
    /// What structure writes use for trunk and foliage cells
    pub const ALL_KNOWN_SHAPE: Self = Self::from_bits(Self::ALL.bits | Self::KNOWN_SHAPE.bits);

    pub const fn from_bits(bits: u8) -> Self {
        Self { bits, shape_radius: 0 }
    }

    pub const fn bits(self) -> u8 {
        self.bits
    }

    pub const fn shape_radius(self) -> u8 {
        self.shape_radius
    }

    /// Request boundary-shape updates up to `radius` voxels away
    pub const fn with_shape_radius(self, radius: u8) -> Self {
        Self { bits: self.bits, shape_radius: radius }
    }

    pub const fn contains(self, other: Self) -> bool {
        self.bits & other.bits == other.bits
    }

    pub const fn without(self, other: Self) -> Self {
        Self { bits: self.bits & !other.bits, shape_radius: self.shape_radius }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_leaves_are_unsupported() {
        let leaves = VoxelState::leaves(Wood::Palm);
        assert_eq!(leaves.leaf_distance(), Some(LEAF_DECAY_DISTANCE));
        assert_eq!(leaves.with_leaf_distance(2).leaf_distance(), Some(2));
    }

    #[test]
    fn test_distance_only_on_leaves() {
        assert_eq!(VoxelState::Log(Wood::Palm).leaf_distance(), None);
        assert_eq!(VoxelState::Air.with_leaf_distance(3), VoxelState::Air);
    }

    #[test]
    fn test_classification() {
        assert!(VoxelState::Air.is_replaceable_by_trees());
        assert!(VoxelState::leaves(Wood::Mahogany).is_replaceable_by_trees());
        assert!(!VoxelState::Water.is_replaceable_by_trees());
        assert!(!VoxelState::Log(Wood::Palm).is_replaceable_by_trees());

        assert!(VoxelState::Seagrass(SeagrassKind::Eel).is_water_like());
        assert!(!VoxelState::MattedSeagrass(SeagrassKind::Eel).is_water_like());

        assert!(VoxelState::Sand.is_soil());
        assert!(!VoxelState::Stone.is_soil());
    }

    #[test]
    fn test_update_flags() {
        assert_eq!(UpdateFlags::ALL.bits(), 3);
        assert_eq!(UpdateFlags::ALL_KNOWN_SHAPE.bits(), 19);
        assert!(UpdateFlags::ALL.contains(UpdateFlags::CLIENTS));
        assert!(!UpdateFlags::CLIENTS.contains(UpdateFlags::NEIGHBORS));
        assert_eq!(UpdateFlags::ALL.without(UpdateFlags::NEIGHBORS), UpdateFlags::CLIENTS);

        let edge = UpdateFlags::ALL.with_shape_radius(3);
        assert_eq!(edge.shape_radius(), 3);
        assert_eq!(edge.without(UpdateFlags::NEIGHBORS).shape_radius(), 3);
        assert_eq!(UpdateFlags::default().bits(), 0);
    }
}
