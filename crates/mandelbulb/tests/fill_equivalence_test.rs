//! Sequential and tiled-parallel fills must agree cell for cell.

use mandelbulb::*;
use proptest::prelude::*;

fn settings(divisions: [i64; 3]) -> FillSettings {
    MandelbulbConfig::new()
        .with_divisions(divisions[0], divisions[1], divisions[2])
        .with_order(8)
        .with_max_iterations(12)
        .with_transform(
            Vec3::new(-0.1, 0.05, 0.2),
            Vec3::new(1.2, 1.0, 0.9),
            Vec3::new(15.0, -30.0, 45.0),
        )
        .validate()
        .unwrap()
}

fn blank(settings: &FillSettings, tile_size: u32) -> VoxelVolume {
    VoxelVolume::new(
        "density",
        settings.resolution,
        settings.bound_min,
        settings.bound_max,
    )
    .with_tile_size(tile_size)
    .with_background(-1.0)
}

fn sequential_reference(settings: &FillSettings) -> Vec<f32> {
    let mut volume = blank(settings, TILE_SIZE);
    fill_sequential(&mut volume, settings);
    volume.to_linear()
}

#[test]
fn test_equivalent_across_worker_counts_and_tile_sizes() {
    let settings = settings([23, 17, 19]);
    let reference = sequential_reference(&settings);

    for threads in [0, 1, 2, 3, 8] {
        for tile_size in [1, 3, 7, 16, 32] {
            let mut volume = blank(&settings, tile_size);
            fill_parallel(&mut volume, &settings, threads).unwrap();
            assert_eq!(
                volume.to_linear(),
                reference,
                "threads={threads} tile_size={tile_size}"
            );
        }
    }
}

#[test]
fn test_repeated_runs_are_identical() {
    let settings = settings([16, 16, 16]);
    let reference = sequential_reference(&settings);
    for _ in 0..4 {
        let mut volume = blank(&settings, TILE_SIZE);
        fill(&mut volume, &settings.with_strategy(FillStrategy::default())).unwrap();
        assert_eq!(volume.to_linear(), reference);
    }
}

#[test]
fn test_every_cell_written_once_with_binary_value() {
    let settings = settings([33, 2, 17]);
    for strategy in [
        FillStrategy::Sequential,
        FillStrategy::Parallel { threads: 0 },
        FillStrategy::Parallel { threads: 4 },
    ] {
        let mut volume = blank(&settings, 8);
        fill(&mut volume, &settings.with_strategy(strategy)).unwrap();
        let values = volume.to_linear();
        assert_eq!(values.len(), 33 * 2 * 17);
        assert!(values.iter().all(|&v| v == 0.0 || v == 1.0), "{strategy:?}");
    }
}

#[test]
fn test_refill_overwrites_previous_contents() {
    let settings = settings([12, 12, 12]);
    let mut volume = blank(&settings, TILE_SIZE);
    fill(&mut volume, &settings).unwrap();
    let first = volume.to_linear();

    // Fill something else, then the first settings again.
    let again = settings.with_strategy(FillStrategy::Sequential);
    let other = MandelbulbConfig::new()
        .with_divisions(12, 12, 12)
        .with_transform(Vec3::splat(5.0), Vec3::ONE, Vec3::ZERO)
        .validate()
        .unwrap();
    fill(&mut volume, &other).unwrap();
    assert_eq!(volume.count_value(1.0), 12 * 12 * 12);

    fill(&mut volume, &again).unwrap();
    assert_eq!(volume.to_linear(), first);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn strategies_agree_on_random_grids(
        rx in 1i64..10,
        ry in 1i64..10,
        rz in 1i64..10,
        order in 1i64..10,
        max_iterations in 1i64..24,
        offset in (-0.5f32..0.5, -0.5f32..0.5, -0.5f32..0.5),
        rotation in (-180.0f32..180.0, -180.0f32..180.0, -180.0f32..180.0),
        tile_size in 1u32..6,
        threads in 0usize..4,
    ) {
        let settings = MandelbulbConfig::new()
            .with_divisions(rx, ry, rz)
            .with_order(order)
            .with_max_iterations(max_iterations)
            .with_transform(
                Vec3::new(offset.0, offset.1, offset.2),
                Vec3::ONE,
                Vec3::new(rotation.0, rotation.1, rotation.2),
            )
            .validate()
            .unwrap();

        let reference = sequential_reference(&settings);
        let mut volume = blank(&settings, tile_size);
        fill_parallel(&mut volume, &settings, threads).unwrap();
        prop_assert_eq!(volume.to_linear(), reference);
    }
}
