//! Seed management for island generation
//!
//! Provides separate seeds for each generation system, allowing fine-grained
//! control over which aspects of generation to vary or keep constant.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

/// Seeds for all island generation systems.
///
/// Each system gets its own seed, derived from a master seed by default.
#[derive(Clone, Copy, Debug)]
pub struct IslandSeeds {
    /// Master seed (used for display/reference)
    pub master: u64,
    /// Terrain noise field (base island shape)
    pub noise: u64,
    /// Rolling-particle erosion field
    pub erosion: u64,
    /// Critter spawn placement and per-agent RNG streams
    pub spawns: u64,
}

impl IslandSeeds {
    /// Create seeds from a master seed, deriving all sub-seeds deterministically.
    pub fn from_master(master: u64) -> Self {
        Self {
            master,
            noise: derive_seed(master, "noise"),
            erosion: derive_seed(master, "erosion"),
            spawns: derive_seed(master, "spawns"),
        }
    }
}

/// Derive a sub-seed from a master seed and a system name.
/// Uses hashing to ensure different systems get different but deterministic seeds.
fn derive_seed(master: u64, system: &str) -> u64 {
    let mut hasher = DefaultHasher::new();
    master.hash(&mut hasher);
    system.hash(&mut hasher);
    hasher.finish()
}

impl std::fmt::Display for IslandSeeds {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "IslandSeeds {{ master: {}, noise: {}, erosion: {}, spawns: {} }}",
            self.master, self.noise, self.erosion, self.spawns,
        )
    }
}
