//! Demo generating a Mandelbulb density volume.
//!
//! Demonstrates:
//! - Loading a JSON configuration (first argument, optional)
//! - Sequential vs. tiled-parallel fills on the same settings
//! - Printing the middle Z slice as ASCII
//!
//! Run with `RUST_LOG=debug` to see per-fill timings.

use std::time::Instant;

use mandelbulb::{FillStrategy, MandelbulbConfig, UVec3, VoxelVolume};

fn main() -> mandelbulb::Result<()> {
    mandelbulb::init_logging();

    let config = match std::env::args().nth(1) {
        Some(path) => MandelbulbConfig::from_json_file(path)?,
        None => MandelbulbConfig::new().with_divisions(48, 48, 48),
    };
    println!("{}", config.to_json_string()?);

    let settings = config.validate()?;
    let mut timings = Vec::new();
    let mut last = None;
    for strategy in [
        FillStrategy::Sequential,
        FillStrategy::Parallel { threads: 0 },
    ] {
        let mut volume = VoxelVolume::new(
            mandelbulb::DEFAULT_VOLUME_NAME,
            settings.resolution,
            settings.bound_min,
            settings.bound_max,
        );
        let start = Instant::now();
        mandelbulb::fill(&mut volume, &settings.with_strategy(strategy))?;
        timings.push((strategy, start.elapsed()));

        if let Some(previous) = last.replace(volume.to_linear()) {
            assert_eq!(previous, volume.to_linear(), "strategies disagree");
        }
        if strategy.is_parallel() {
            print_slice(&volume, settings.fractal.polarity.value(true));
        }
    }

    for (strategy, elapsed) in timings {
        println!("{strategy:?}: {:.3} ms", elapsed.as_secs_f64() * 1000.0);
    }
    Ok(())
}

#[allow(clippy::float_cmp)]
fn print_slice(volume: &VoxelVolume, inside_value: f32) {
    let res = volume.resolution();
    let z = res.z / 2;
    for y in (0..res.y).rev() {
        let row: String = (0..res.x)
            .map(|x| match volume.value(UVec3::new(x, y, z)) {
                Some(v) if v == inside_value => '#',
                _ => '.',
            })
            .collect();
        println!("{row}");
    }
}
