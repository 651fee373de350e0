//! Terrain synthesis and classification.
//!
//! Blends the multi-band noise field with the rolling-particle erosion field
//! into a byte height map, and classifies bytes into the seven terrain bands
//! used for colorized rendering and habitability queries.

use image::{GrayImage, ImageBuffer, Luma, Rgb, RgbImage};

use crate::erosion::{self, RollingParticleParams};
use crate::grid::Grid;
use crate::noise_field::NoiseField;
use crate::seeds::IslandSeeds;

/// Weight of the erosion field when blended into the noise byte.
const EROSION_OPACITY: f64 = 0.5;

/// Synthesize the island height map: per cell, the averaged noise byte is
/// blended with the erosion byte at a fixed opacity and truncated.
pub fn synthesize_height_map(seeds: &IslandSeeds, width: usize, height: usize) -> Grid<u8> {
    let noise = NoiseField::new(seeds.noise);
    let roller = erosion::simulate(
        seeds.erosion,
        width,
        height,
        &RollingParticleParams::default(),
    );

    let mut map = Grid::new_with(width, height, 0u8);
    for y in 0..height {
        for x in 0..width {
            let noise_byte = f64::from(noise.sample_byte(x as i32, y as i32));
            let erosion_byte = f64::from(*roller.get(x, y));
            let blended =
                (1.0 - EROSION_OPACITY) * noise_byte + EROSION_OPACITY * erosion_byte;
            map.set(x, y, blended as u8);
        }
    }
    map
}

/// The seven ordered terrain bands a height byte classifies into.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TerrainBand {
    DeepWater,
    ShallowWater,
    Beach,
    Grass,
    Forest,
    Hills,
    Mountain,
}

impl TerrainBand {
    /// Classify a height byte. Total over the byte range; the thresholds are
    /// exclusive upper bounds (79 is deep water, 80 is shallow water).
    pub fn from_height(height: u8) -> Self {
        match height {
            0..=79 => TerrainBand::DeepWater,
            80..=89 => TerrainBand::ShallowWater,
            90..=99 => TerrainBand::Beach,
            100..=149 => TerrainBand::Grass,
            150..=229 => TerrainBand::Forest,
            230..=239 => TerrainBand::Hills,
            240..=255 => TerrainBand::Mountain,
        }
    }

    /// Display color for the colorized height map.
    pub fn color(&self) -> [u8; 3] {
        match self {
            TerrainBand::DeepWater => [0x26, 0x2f, 0x71],
            TerrainBand::ShallowWater => [0x46, 0x4d, 0x85],
            TerrainBand::Beach => [0xd4, 0xbc, 0x6a],
            TerrainBand::Grass => [0x2d, 0x88, 0x2d],
            TerrainBand::Forest => [0x00, 0x4e, 0x00],
            TerrainBand::Hills => [0x4b, 0x2d, 0x12],
            TerrainBand::Mountain => [0xf2, 0xed, 0xe6],
        }
    }

    pub fn is_water(&self) -> bool {
        matches!(self, TerrainBand::DeepWater | TerrainBand::ShallowWater)
    }

    /// Critters settle on open grassland.
    pub fn is_habitable(&self) -> bool {
        matches!(self, TerrainBand::Grass)
    }
}

/// Render the height map with each cell colored by its terrain band.
pub fn colorize(map: &Grid<u8>) -> RgbImage {
    ImageBuffer::from_fn(map.width as u32, map.height as u32, |x, y| {
        let band = TerrainBand::from_height(*map.get(x as usize, y as usize));
        Rgb(band.color())
    })
}

/// Render the raw height map as a grayscale image.
pub fn grayscale(map: &Grid<u8>) -> GrayImage {
    ImageBuffer::from_fn(map.width as u32, map.height as u32, |x, y| {
        Luma([*map.get(x as usize, y as usize)])
    })
}
