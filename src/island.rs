//! Island container
//!
//! Owns the generated height map and the spawned critters, and drives the
//! whole simulation one discrete step at a time. The island is never mutated
//! while agents are ticking; world changes requested by completed actions are
//! applied afterwards, in spawn order.

use image::{GrayImage, RgbImage};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;
use thiserror::Error;

use crate::grid::Grid;
use crate::seeds::IslandSeeds;
use crate::simulation::actions::WorldEffect;
use crate::simulation::activity_log::{ActivityCategory, ActivityLog};
use crate::simulation::npc::Npc;
use crate::simulation::params::SimulationParams;
use crate::simulation::types::{Feature, FeatureKind, Position, WorldQuery};
use crate::terrain::{self, TerrainBand};

/// Failures when generating an island.
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("invalid island dimensions {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },
}

/// Pool of critter names used by `fill_with_critters`.
const CRITTER_NAMES: [&str; 12] = [
    "Pip", "Tove", "Bramble", "Sorrel", "Nutkin", "Hazel", "Fern", "Moss", "Thistle", "Rowan",
    "Clover", "Briar",
];

/// A generated island and everything living on it.
pub struct Island {
    pub width: usize,
    pub height: usize,
    seeds: IslandSeeds,
    height_map: Grid<u8>,
    pub spawns: Vec<Npc>,
    pub features: Vec<Feature>,
    pub current_tick: u64,
    params: SimulationParams,
}

impl Island {
    /// Generate a new island with default simulation parameters.
    pub fn generate(seed: u64, width: usize, height: usize) -> Result<Island, GenerationError> {
        Self::generate_with_params(seed, width, height, SimulationParams::default())
    }

    pub fn generate_with_params(
        seed: u64,
        width: usize,
        height: usize,
        params: SimulationParams,
    ) -> Result<Island, GenerationError> {
        if width == 0 || height == 0 {
            return Err(GenerationError::InvalidDimensions { width, height });
        }

        let seeds = IslandSeeds::from_master(seed);
        let height_map = terrain::synthesize_height_map(&seeds, width, height);

        Ok(Island {
            width,
            height,
            seeds,
            height_map,
            spawns: Vec::new(),
            features: Vec::new(),
            current_tick: 0,
            params,
        })
    }

    /// Master seed this island was generated from.
    pub fn seed(&self) -> u64 {
        self.seeds.master
    }

    pub fn params(&self) -> &SimulationParams {
        &self.params
    }

    /// The raw height map. Immutable after generation.
    pub fn height_map(&self) -> &Grid<u8> {
        &self.height_map
    }

    /// Append a critter. Duplicate names are allowed.
    pub fn add(&mut self, npc: Npc) {
        self.spawns.push(npc);
    }

    /// Features of the given kind within Euclidean `radius` of `position`.
    /// Linear scan; empty when none match.
    pub fn within_radius(
        &self,
        kind: FeatureKind,
        radius: f64,
        position: Position,
    ) -> Vec<&Feature> {
        self.features
            .iter()
            .filter(|f| f.kind == kind && f.position.distance(&position) <= radius)
            .collect()
    }

    /// Seed the initial critter population on habitable cells, by rejection
    /// sampling over the height map.
    pub fn fill_with_critters(&mut self, log: &mut ActivityLog) {
        let mut rng = ChaCha8Rng::seed_from_u64(self.seeds.spawns);
        let count = self.params.initial_critters;

        let mut placed = 0;
        let mut attempts = 0;
        let max_attempts = count * 100;

        while placed < count && attempts < max_attempts {
            attempts += 1;

            let x = rng.gen_range(0..self.width);
            let y = rng.gen_range(0..self.height);
            let band = TerrainBand::from_height(*self.height_map.get(x, y));
            if !band.is_habitable() {
                continue;
            }

            let npc = Npc::new(
                critter_name(placed),
                Position::new(x as i32, y as i32),
                rng.gen(),
                &self.params,
            );
            log.record(
                self.current_tick,
                &npc.name,
                ActivityCategory::World,
                format!("settled at {}", npc.position),
            );
            self.add(npc);
            placed += 1;
        }
    }

    /// Advance the island by one discrete step: tick every critter in spawn
    /// order, then apply the world effects their completed actions produced.
    pub fn tick(&mut self, log: &mut ActivityLog) {
        self.current_tick += 1;
        let tick = self.current_tick;

        let mut spawns = std::mem::take(&mut self.spawns);
        let mut effects = Vec::new();
        for npc in &mut spawns {
            if let Some(effect) = npc.tick(&*self, &self.params, tick, log) {
                effects.push(effect);
            }
        }
        self.spawns = spawns;

        for effect in effects {
            self.apply_effect(effect, tick, log);
        }
    }

    /// Like `tick`, but agents run concurrently. Each agent owns its RNG and
    /// only queries the island, so results match the sequential tick; events
    /// and effects are merged back in spawn order.
    pub fn tick_parallel(&mut self, log: &mut ActivityLog) {
        self.current_tick += 1;
        let tick = self.current_tick;

        let mut spawns = std::mem::take(&mut self.spawns);
        let results: Vec<(ActivityLog, Option<WorldEffect>)> = {
            let world = &*self;
            spawns
                .par_iter_mut()
                .map(|npc| {
                    let mut local = ActivityLog::new();
                    let effect = npc.tick(world, &world.params, tick, &mut local);
                    (local, effect)
                })
                .collect()
        };
        self.spawns = spawns;

        for (local, effect) in results {
            log.merge(local);
            if let Some(effect) = effect {
                self.apply_effect(effect, tick, log);
            }
        }
    }

    fn apply_effect(&mut self, effect: WorldEffect, tick: u64, log: &mut ActivityLog) {
        match effect {
            WorldEffect::DugHole { position } => {
                log.record(
                    tick,
                    "island",
                    ActivityCategory::World,
                    format!("a rabbit hole appeared at {}", position),
                );
                self.features.push(Feature {
                    kind: FeatureKind::RabbitHole,
                    position,
                });
            }
        }
    }

    /// Render the height map with terrain band colors.
    pub fn colored_height_map_as_image(&self) -> RgbImage {
        terrain::colorize(&self.height_map)
    }

    /// Render the raw height map as grayscale.
    pub fn height_map_as_image(&self) -> GrayImage {
        terrain::grayscale(&self.height_map)
    }
}

impl WorldQuery for Island {
    fn width(&self) -> usize {
        self.width
    }

    fn height(&self) -> usize {
        self.height
    }

    fn height_at(&self, position: Position) -> Option<u8> {
        if self.height_map.in_bounds(position.x, position.y) {
            Some(*self.height_map.get(position.x as usize, position.y as usize))
        } else {
            None
        }
    }

    fn features_within(
        &self,
        kind: FeatureKind,
        radius: f64,
        position: Position,
    ) -> Vec<&Feature> {
        self.within_radius(kind, radius, position)
    }
}

fn critter_name(index: usize) -> String {
    let name = CRITTER_NAMES[index % CRITTER_NAMES.len()];
    let generation = index / CRITTER_NAMES.len();
    if generation == 0 {
        name.to_string()
    } else {
        format!("{} {}", name, generation + 1)
    }
}
