//! Grid directions and coordinate helpers

use glam::IVec3;

/// One of the six face directions of a voxel.
///
/// North is -Z, east is +X, matching the host world's compass.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    Down,
    Up,
    North,
    South,
    West,
    East,
}

impl Direction {
    /// All directions in canonical order (down, up, then the four laterals)
    pub const ALL: [Direction; 6] = [
        Direction::Down,
        Direction::Up,
        Direction::North,
        Direction::South,
        Direction::West,
        Direction::East,
    ];

    /// Unit offset of this direction
    pub fn offset(self) -> IVec3 {
        match self {
            Direction::Down => IVec3::NEG_Y,
            Direction::Up => IVec3::Y,
            Direction::North => IVec3::NEG_Z,
            Direction::South => IVec3::Z,
            Direction::West => IVec3::NEG_X,
            Direction::East => IVec3::X,
        }
    }

    pub fn opposite(self) -> Direction {
        match self {
            Direction::Down => Direction::Up,
            Direction::Up => Direction::Down,
            Direction::North => Direction::South,
            Direction::South => Direction::North,
            Direction::West => Direction::East,
            Direction::East => Direction::West,
        }
    }
}

/// Block-position arithmetic on `IVec3`.
pub trait BlockPosExt: Sized {
    fn above(self, n: i32) -> Self;
    fn below(self, n: i32) -> Self;
    fn relative(self, dir: Direction) -> Self;
    fn with_y(self, y: i32) -> Self;
}

impl BlockPosExt for IVec3 {
    fn above(self, n: i32) -> Self {
        self + IVec3::new(0, n, 0)
    }

    fn below(self, n: i32) -> Self {
        self - IVec3::new(0, n, 0)
    }

    fn relative(self, dir: Direction) -> Self {
        self + dir.offset()
    }

    fn with_y(self, y: i32) -> Self {
        IVec3::new(self.x, y, self.z)
    }
}

/// The 26 offsets of the 3x3x3 cube around a voxel, excluding the center.
///
/// Iterated x-fastest, then y, then z.
pub fn around_offsets() -> impl Iterator<Item = IVec3> {
    (-1..=1).flat_map(|z| {
        (-1..=1).flat_map(move |y| {
            (-1..=1).map(move |x| IVec3::new(x, y, z))
        })
    }).filter(|o| *o != IVec3::ZERO)
}
