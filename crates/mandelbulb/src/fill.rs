//! Grid filling.
//!
//! Both strategies evaluate every voxel through [`sample_voxel`], so for the
//! same settings they produce bit-identical grids. They differ only in the
//! order voxels are visited and how many threads visit them.

use std::time::Instant;

use glam::UVec3;
use mandelbulb_core::{
    grid_index_to_eval_point, MandelbulbError, Result, VoxelContainer, VoxelSpace,
};
use mandelbulb_volume::{VolumeSpace, VoxelTile, VoxelVolume};
use rayon::prelude::*;

use crate::config::{FillSettings, FillStrategy};

/// Computes the density of one voxel.
#[must_use]
pub fn sample_voxel<S: VoxelSpace + ?Sized>(
    index: UVec3,
    space: &S,
    settings: &FillSettings,
) -> f32 {
    let point = grid_index_to_eval_point(index, space, &settings.matrix);
    settings.fractal.density(point)
}

/// Fills every cell on the calling thread, z outermost and x innermost.
pub fn fill_sequential<C: VoxelContainer + ?Sized>(container: &mut C, settings: &FillSettings) {
    let res = container.resolution();
    for z in 0..res.z {
        for y in 0..res.y {
            for x in 0..res.x {
                let index = UVec3::new(x, y, z);
                let value = sample_voxel(index, &*container, settings);
                container.set_value(index, value);
            }
        }
    }
}

/// Fills every tile of `volume` on a worker pool.
///
/// Each worker owns the `&mut` borrow of the tile it is filling, so writes
/// never overlap. With `threads == 0` the global rayon pool is used, otherwise
/// a dedicated pool of that size is built for this call.
pub fn fill_parallel(
    volume: &mut VoxelVolume,
    settings: &FillSettings,
    threads: usize,
) -> Result<()> {
    let space = volume.space();
    let tiles = volume.tiles_mut();

    if threads == 0 {
        fill_tiles(tiles, space, settings);
    } else {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build()
            .map_err(|e| MandelbulbError::ThreadPool(e.to_string()))?;
        pool.install(|| fill_tiles(tiles, space, settings));
    }
    Ok(())
}

fn fill_tiles(tiles: &mut [VoxelTile], space: VolumeSpace, settings: &FillSettings) {
    tiles.par_iter_mut().for_each(|tile| {
        tile.fill_with(|index| sample_voxel(index, &space, settings));
    });
}

/// Fills `volume` with the strategy selected in `settings`.
///
/// A volume whose resolution differs from `settings.resolution` is resized
/// first, and its bounds are set to the settings' bounds. Every cell is
/// overwritten.
pub fn fill(volume: &mut VoxelVolume, settings: &FillSettings) -> Result<()> {
    if volume.resolution() != settings.resolution {
        volume.resize(settings.resolution);
    }
    volume.set_bounds(settings.bound_min, settings.bound_max);
    let start = Instant::now();

    match settings.strategy {
        FillStrategy::Sequential => fill_sequential(volume, settings),
        FillStrategy::Parallel { threads } => fill_parallel(volume, settings, threads)?,
    }

    log::debug!(
        "filled '{}' ({} voxels, {} tiles, {:?}) in {} us",
        volume.name(),
        volume.num_voxels(),
        volume.num_tiles(),
        settings.strategy,
        start.elapsed().as_micros()
    );
    Ok(())
}
