use std::collections::HashSet;
use std::sync::Arc;

use criterion::{criterion_group, criterion_main, Criterion, black_box};

use canopy_gen::generation::foliage::propagate_leaf_distances;
use canopy_gen::generation::{
    FeatureGenerator, LegacyRandom, NoiseCache, PalmTreeGenerator, RainforestTreeGenerator,
    SeagrassConfig, SeagrassGenerator,
};
use canopy_gen::math::BlockBox;
use canopy_gen::voxel::voxel::{VoxelState, Wood};
use canopy_gen::voxel::world::{fill_ground, SparseGrid};

use glam::IVec3;

const SEED: u64 = 12345;

fn island(top: VoxelState) -> SparseGrid {
    let mut grid = SparseGrid::new(SEED, 0, 128);
    fill_ground(&mut grid, IVec3::ZERO, 16, 10, top);
    grid.clear_logs();
    grid
}

fn bench_palm(c: &mut Criterion) {
    let base = island(VoxelState::Sand);
    let generator = PalmTreeGenerator::default();

    c.bench_function("place_palm", |b| {
        let mut seed = 0i64;
        b.iter(|| {
            seed += 1;
            let mut grid = base.clone();
            let result = generator.place(&mut grid, IVec3::new(0, 11, 0), &mut LegacyRandom::new(seed));
            black_box(result)
        });
    });
}

fn bench_rainforest(c: &mut Criterion) {
    let base = island(VoxelState::GrassBlock);
    let generator = RainforestTreeGenerator::default();

    c.bench_function("place_rainforest", |b| {
        let mut seed = 0i64;
        b.iter(|| {
            seed += 1;
            let mut grid = base.clone();
            let result = generator.place(&mut grid, IVec3::new(0, 11, 0), &mut LegacyRandom::new(seed));
            black_box(result)
        });
    });
}

fn bench_seagrass(c: &mut Criterion) {
    let mut base = island(VoxelState::Sand);
    base.fill(IVec3::new(-16, 11, -16), IVec3::new(16, 40, 16), VoxelState::Water);
    base.clear_logs();
    let noise = Arc::new(NoiseCache::new(SEED, -6));
    let generator = SeagrassGenerator::new(SeagrassConfig::default(), noise).unwrap();

    c.bench_function("place_seagrass", |b| {
        let mut seed = 0i64;
        b.iter(|| {
            seed += 1;
            let mut grid = base.clone();
            let result = generator.place(&mut grid, IVec3::new(0, 11, 0), &mut LegacyRandom::new(seed));
            black_box(result)
        });
    });
}

fn bench_leaf_propagation(c: &mut Criterion) {
    // Solid 13x5x13 leaf slab over a single log
    let mut base = SparseGrid::new(SEED, 0, 64);
    base.fill(IVec3::new(-6, 20, -6), IVec3::new(6, 24, 6), VoxelState::leaves(Wood::Mahogany));
    base.put(IVec3::new(0, 22, 0), VoxelState::Log(Wood::Mahogany));
    let trunk = HashSet::from([IVec3::new(0, 22, 0)]);
    let bounds = BlockBox::new(IVec3::new(-6, 20, -6), IVec3::new(6, 24, 6));

    c.bench_function("propagate_leaf_distances_slab", |b| {
        b.iter(|| {
            let mut grid = base.clone();
            let shape = propagate_leaf_distances(&mut grid, black_box(bounds), &trunk);
            black_box(shape.count())
        });
    });
}

criterion_group!(
    benches,
    bench_palm,
    bench_rainforest,
    bench_seagrass,
    bench_leaf_propagation,
);
criterion_main!(benches);
