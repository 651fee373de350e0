//! Configuration parameters for the critter simulation

use serde::{Deserialize, Serialize};

/// Tunables for critter needs, actions and spawning.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SimulationParams {
    // Needs
    /// Hunger level at or above which an agent counts as hungry
    pub hunger_threshold: u32,
    /// Thirst level at or above which an agent counts as thirsty
    pub thirst_threshold: u32,
    /// Base tiredness cap; each agent adds its own stamina offset
    pub base_tiredness_cap: u32,
    /// Upper bound (exclusive) of the per-agent stamina offset rolled at spawn
    pub stamina_range: u32,

    // Actions
    /// Ticks spent foraging before food is found
    pub find_food_duration: u32,
    /// Ticks spent searching before water is found
    pub find_water_duration: u32,
    /// Ticks slept before waking up rested
    pub sleep_duration: u32,
    /// Ticks of digging before a shelter hole is finished
    pub dig_hole_duration: u32,
    /// Energy of foraged food items
    pub forage_energy: u32,
    /// Energy of found drink items
    pub water_energy: u32,

    // World interaction
    /// Radius searched for existing shelter before digging a new hole
    pub shelter_search_radius: f64,

    // Spawning
    /// Number of critters placed by `fill_with_critters`
    pub initial_critters: usize,
}

impl Default for SimulationParams {
    fn default() -> Self {
        Self {
            hunger_threshold: 40,
            thirst_threshold: 30,
            base_tiredness_cap: 80,
            stamina_range: 20,

            find_food_duration: 4,
            find_water_duration: 3,
            sleep_duration: 6,
            dig_hole_duration: 8,
            forage_energy: 25,
            water_energy: 20,

            shelter_search_radius: 30.0,

            initial_critters: 10,
        }
    }
}
