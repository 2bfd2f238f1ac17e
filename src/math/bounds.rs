//! Integer axis-aligned voxel box

use glam::IVec3;

/// Inclusive axis-aligned box of voxel coordinates.
///
/// Both corners are part of the box, so a single voxel is
/// `BlockBox::new(p, p)` with a span of one on every axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct BlockBox {
    pub min: IVec3,
    pub max: IVec3,
}

impl BlockBox {
    /// Create box from two corners, in any order
    pub fn new(a: IVec3, b: IVec3) -> Self {
        Self {
            min: a.min(b),
            max: a.max(b),
        }
    }

    /// Smallest box enclosing every coordinate, or `None` when empty
    pub fn encapsulating<I>(coords: I) -> Option<Self>
    where
        I: IntoIterator<Item = IVec3>,
    {
        let mut iter = coords.into_iter();
        let first = iter.next()?;
        let mut bounds = Self::new(first, first);
        for coord in iter {
            bounds.expand(coord);
        }
        Some(bounds)
    }

    /// Number of voxels along each axis
    pub fn span(&self) -> IVec3 {
        self.max - self.min + IVec3::ONE
    }

    /// Total voxel count
    pub fn volume(&self) -> usize {
        let s = self.span();
        s.x as usize * s.y as usize * s.z as usize
    }

    /// Check if coordinate is inside the box (inclusive)
    pub fn contains(&self, p: IVec3) -> bool {
        p.x >= self.min.x && p.x <= self.max.x &&
        p.y >= self.min.y && p.y <= self.max.y &&
        p.z >= self.min.z && p.z <= self.max.z
    }

    /// Expand box to include coordinate
    pub fn expand(&mut self, p: IVec3) {
        self.min = self.min.min(p);
        self.max = self.max.max(p);
    }
}
