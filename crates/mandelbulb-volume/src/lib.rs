//! Volume container for mandelbulb-rs.
//!
//! [`VoxelVolume`] is the grid a fill writes into. It implements the
//! [`VoxelSpace`](mandelbulb_core::VoxelSpace) and
//! [`VoxelContainer`](mandelbulb_core::VoxelContainer) seams from
//! `mandelbulb-core`, and keeps its cells in [`VoxelTile`]s laid out by a
//! [`TileLayout`].

#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]

pub mod tile;
pub mod volume;

pub use tile::{TileLayout, VoxelTile, TILE_SIZE};
pub use volume::{VolumeSpace, VoxelVolume, DEFAULT_VOLUME_NAME};
