//! Planned and executed critter behaviors

use serde::{Deserialize, Serialize};

use crate::simulation::params::SimulationParams;
use crate::simulation::types::Position;

/// The closed set of behaviors an agent can plan and execute. Dispatch is an
/// exhaustive match, so an unknown action cannot exist at runtime.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActionKind {
    FindFood,
    FindWater,
    Sleep,
    DigHole,
}

impl ActionKind {
    /// Present-tense description for narration.
    pub fn describe(&self) -> &'static str {
        match self {
            ActionKind::FindFood => "looking for food",
            ActionKind::FindWater => "looking for water",
            ActionKind::Sleep => "sleeping",
            ActionKind::DigHole => "digging a hole",
        }
    }

    /// Ticks an agent must spend on this action before it completes.
    pub fn duration(&self, params: &SimulationParams) -> u32 {
        match self {
            ActionKind::FindFood => params.find_food_duration,
            ActionKind::FindWater => params.find_water_duration,
            ActionKind::Sleep => params.sleep_duration,
            ActionKind::DigHole => params.dig_hole_duration,
        }
    }
}

impl std::fmt::Display for ActionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ActionKind::FindFood => "find-food",
            ActionKind::FindWater => "find-water",
            ActionKind::Sleep => "sleep",
            ActionKind::DigHole => "dig-hole",
        };
        f.write_str(name)
    }
}

/// A change to the island requested by a completed action.
///
/// Agents never mutate the island directly; the island applies these after
/// every agent has ticked, so the world stays read-only within a tick.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum WorldEffect {
    /// A shelter hole was finished at the given position
    DugHole { position: Position },
}
