//! Discrete voxel shape: a bitset over a [`BlockBox`]

use glam::IVec3;

use crate::math::{BlockBox, Direction};

/// Occupancy bitset covering one box of the grid.
///
/// Coordinates outside the box read as empty and are ignored on fill.
#[derive(Clone, Debug)]
pub struct VoxelShape {
    bounds: BlockBox,
    words: Vec<u64>,
}

impl VoxelShape {
    pub fn new(bounds: BlockBox) -> Self {
        let words = bounds.volume().div_ceil(64);
        Self {
            bounds,
            words: vec![0; words],
        }
    }

    fn index(&self, pos: IVec3) -> Option<usize> {
        if !self.bounds.contains(pos) {
            return None;
        }
        let local = pos - self.bounds.min;
        let span = self.bounds.span();
        Some((local.x + local.z * span.x + local.y * span.x * span.z) as usize)
    }

    /// Mark a cell as full; returns false if it was already full or outside
    pub fn fill(&mut self, pos: IVec3) -> bool {
        match self.index(pos) {
            Some(i) => {
                let mask = 1u64 << (i % 64);
                let word = &mut self.words[i / 64];
                let was_empty = *word & mask == 0;
                *word |= mask;
                was_empty
            }
            None => false,
        }
    }

    pub fn is_full(&self, pos: IVec3) -> bool {
        self.index(pos)
            .map(|i| self.words[i / 64] & (1u64 << (i % 64)) != 0)
            .unwrap_or(false)
    }

    pub fn count(&self) -> usize {
        self.words.iter().map(|w| w.count_ones() as usize).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.words.iter().all(|w| *w == 0)
    }

    /// Iterate full cells, x-fastest then z then y
    pub fn iter_full(&self) -> impl Iterator<Item = IVec3> + '_ {
        let span = self.bounds.span();
        let min = self.bounds.min;
        (0..span.y).flat_map(move |y| {
            (0..span.z).flat_map(move |z| {
                (0..span.x).map(move |x| min + IVec3::new(x, y, z))
            })
        }).filter(|p| self.is_full(*p))
    }

    /// Exposed faces: every (full cell, direction) whose neighbour is not full
    pub fn exposed_faces(&self) -> impl Iterator<Item = (IVec3, Direction)> + '_ {
        self.iter_full().flat_map(move |pos| {
            Direction::ALL
                .into_iter()
                .filter(move |dir| !self.is_full(pos + dir.offset()))
                .map(move |dir| (pos, dir))
        })
    }
}
