//! PNG and JSON export of generated islands.
//!
//! Image export is a presentation concern; the library hands images over
//! in-memory and these helpers just write them to disk.

use std::fs::File;
use std::io;
use std::path::Path;

use serde::Serialize;

use crate::grid::Grid;
use crate::island::Island;
use crate::simulation::npc::Npc;
use crate::simulation::types::Feature;
use crate::terrain;

/// Export the raw height map as a grayscale PNG.
pub fn export_height_map(island: &Island, path: &str) -> Result<(), image::ImageError> {
    island.height_map_as_image().save(path)
}

/// Export the height map colored by terrain band.
pub fn export_colored_height_map(island: &Island, path: &str) -> Result<(), image::ImageError> {
    island.colored_height_map_as_image().save(path)
}

/// Export a raw byte field (e.g. the erosion field) as a grayscale PNG.
pub fn export_byte_field(field: &Grid<u8>, path: &str) -> Result<(), image::ImageError> {
    terrain::grayscale(field).save(path)
}

/// Snapshot of the mutable simulation state for inspection between runs.
/// The height map is regenerable from the seed and is left out.
#[derive(Serialize)]
pub struct SimulationSnapshot<'a> {
    pub seed: u64,
    pub width: usize,
    pub height: usize,
    pub tick: u64,
    pub spawns: &'a [Npc],
    pub features: &'a [Feature],
}

impl<'a> SimulationSnapshot<'a> {
    pub fn of(island: &'a Island) -> Self {
        Self {
            seed: island.seed(),
            width: island.width,
            height: island.height,
            tick: island.current_tick,
            spawns: &island.spawns,
            features: &island.features,
        }
    }
}

/// Write the simulation state as pretty-printed JSON.
pub fn export_snapshot(island: &Island, path: impl AsRef<Path>) -> io::Result<()> {
    let file = File::create(path)?;
    serde_json::to_writer_pretty(file, &SimulationSnapshot::of(island))
        .map_err(|e| io::Error::new(io::ErrorKind::Other, e))
}
