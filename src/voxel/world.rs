//! Grid access port and an in-memory sparse implementation
//!
//! Generators never own the world. They read and write it through
//! [`VoxelGrid`], whose implementor is responsible for persistence,
//! chunk loading and serializing concurrent writes per region.

use std::collections::HashMap;

use glam::IVec3;

use crate::math::{BlockPosExt, Direction};
use crate::voxel::voxel::{UpdateFlags, VoxelState};

/// Which column height definition to query
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HeightmapKind {
    /// One above the highest voxel that blocks motion (the sea floor under water)
    OceanFloor,
    /// One above the highest non-air voxel (the open-water surface over the sea)
    WorldSurface,
}

/// Read/write access to the voxel grid, as seen by a structure generator.
///
/// The classification predicates are ground truth: generators never
/// second-guess them by inspecting states themselves.
pub trait VoxelGrid {
    /// World seed, used for the deterministic noise fields
    fn seed(&self) -> u64;

    /// Vertical build limits as `(min_y, max_y)`, `max_y` exclusive
    fn height_limits(&self) -> (i32, i32);

    /// Column height at `(x, z)` under the given definition
    fn height(&self, kind: HeightmapKind, x: i32, z: i32) -> i32;

    fn get_voxel(&self, pos: IVec3) -> VoxelState;

    fn set_voxel(&mut self, pos: IVec3, state: VoxelState, flags: UpdateFlags);

    /// Whether a growing tree may occupy `pos` (air, foliage, small plants)
    fn is_valid_growth_target(&self, pos: IVec3) -> bool;

    fn is_air(&self, pos: IVec3) -> bool;

    fn is_water(&self, pos: IVec3) -> bool;

    /// Whether the voxel at `pos` is substrate a tree can root in
    fn can_support_growth(&self, pos: IVec3) -> bool;

    fn is_air_or_foliage(&self, pos: IVec3) -> bool {
        let state = self.get_voxel(pos);
        state.is_air() || state.is_leaves()
    }

    /// Re-evaluate the shape of the voxel at `pos` after its neighbour
    /// in direction `toward` changed.
    fn refresh_shape(&mut self, _pos: IVec3, _toward: Direction, _flags: UpdateFlags) {}
}

/// Sparse in-memory grid: unset cells are air.
///
/// Records every write and shape refresh so callers can audit what a
/// placement touched.
#[derive(Clone, Debug)]
pub struct SparseGrid {
    voxels: HashMap<IVec3, VoxelState>,
    seed: u64,
    min_y: i32,
    max_y: i32,
    writes: Vec<IVec3>,
    shape_refreshes: Vec<(IVec3, Direction)>,
}

impl SparseGrid {
    /// Create an empty grid with the given seed and vertical limits (`max_y` exclusive)
    pub fn new(seed: u64, min_y: i32, max_y: i32) -> Self {
        Self {
            voxels: HashMap::new(),
            seed,
            min_y,
            max_y,
            writes: Vec::new(),
            shape_refreshes: Vec::new(),
        }
    }

    /// Fill an inclusive box without logging the writes
    pub fn fill(&mut self, a: IVec3, b: IVec3, state: VoxelState) {
        let min = a.min(b);
        let max = a.max(b);
        for x in min.x..=max.x {
            for y in min.y..=max.y {
                for z in min.z..=max.z {
                    self.put(IVec3::new(x, y, z), state);
                }
            }
        }
    }

    /// Set a single voxel without logging the write
    pub fn put(&mut self, pos: IVec3, state: VoxelState) {
        if state.is_air() {
            self.voxels.remove(&pos);
        } else {
            self.voxels.insert(pos, state);
        }
    }

    /// Every coordinate written through [`VoxelGrid::set_voxel`], in order
    pub fn writes(&self) -> &[IVec3] {
        &self.writes
    }

    /// Every shape refresh requested, in order
    pub fn shape_refreshes(&self) -> &[(IVec3, Direction)] {
        &self.shape_refreshes
    }

    /// Forget the write and refresh logs, keeping the voxels
    pub fn clear_logs(&mut self) {
        self.writes.clear();
        self.shape_refreshes.clear();
    }

    /// All non-air voxels
    pub fn snapshot(&self) -> &HashMap<IVec3, VoxelState> {
        &self.voxels
    }

    /// Number of non-air voxels
    pub fn voxel_count(&self) -> usize {
        self.voxels.len()
    }

    fn in_bounds(&self, pos: IVec3) -> bool {
        pos.y >= self.min_y && pos.y < self.max_y
    }
}

impl VoxelGrid for SparseGrid {
    fn seed(&self) -> u64 {
        self.seed
    }

    fn height_limits(&self) -> (i32, i32) {
        (self.min_y, self.max_y)
    }

    fn height(&self, kind: HeightmapKind, x: i32, z: i32) -> i32 {
        for y in (self.min_y..self.max_y).rev() {
            let state = self.get_voxel(IVec3::new(x, y, z));
            let counts = match kind {
                HeightmapKind::OceanFloor => state.blocks_motion(),
                HeightmapKind::WorldSurface => !state.is_air(),
            };
            if counts {
                return y + 1;
            }
        }
        self.min_y
    }

    fn get_voxel(&self, pos: IVec3) -> VoxelState {
        self.voxels.get(&pos).copied().unwrap_or_default()
    }

    fn set_voxel(&mut self, pos: IVec3, state: VoxelState, _flags: UpdateFlags) {
        // Out-of-range writes are dropped, as the host does above the build limit
        if !self.in_bounds(pos) {
            return;
        }
        self.put(pos, state);
        self.writes.push(pos);
    }

    fn is_valid_growth_target(&self, pos: IVec3) -> bool {
        self.in_bounds(pos) && self.get_voxel(pos).is_replaceable_by_trees()
    }

    fn is_air(&self, pos: IVec3) -> bool {
        self.get_voxel(pos).is_air()
    }

    fn is_water(&self, pos: IVec3) -> bool {
        self.get_voxel(pos).is_water_like()
    }

    fn can_support_growth(&self, pos: IVec3) -> bool {
        self.get_voxel(pos).is_soil()
    }

    fn refresh_shape(&mut self, pos: IVec3, toward: Direction, _flags: UpdateFlags) {
        self.shape_refreshes.push((pos, toward));
    }
}

/// Column helper used by tests and the demo: fill `floor_y` with `top`
/// over a square footprint, with stone underneath down to `min_y`.
pub fn fill_ground(grid: &mut SparseGrid, center: IVec3, half_size: i32, floor_y: i32, top: VoxelState) {
    let (min_y, _) = grid.height_limits();
    grid.fill(
        IVec3::new(center.x - half_size, min_y, center.z - half_size),
        IVec3::new(center.x + half_size, floor_y - 1, center.z + half_size),
        VoxelState::Stone,
    );
    grid.fill(
        IVec3::new(center.x - half_size, floor_y, center.z - half_size),
        IVec3::new(center.x + half_size, floor_y, center.z + half_size),
        top,
    );
}

/// Below the anchor: the cell a sapling at `anchor` would root in
pub fn substrate_of(anchor: IVec3) -> IVec3 {
    anchor.below(1)
}
