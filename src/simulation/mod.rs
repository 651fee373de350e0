//! Critter simulation
//!
//! Needs-driven agents living on a generated island. Each tick an agent's
//! needs rise, get converted into planned actions, and the current action is
//! executed against a read-only view of the island. Observability goes
//! through the injected [`ActivityLog`] rather than any logging facility.

pub mod actions;
pub mod activity_log;
pub mod items;
pub mod npc;
pub mod params;
pub mod types;

pub use actions::{ActionKind, WorldEffect};
pub use activity_log::{ActivityCategory, ActivityEntry, ActivityLog, ActivityStats};
pub use items::{Item, ItemCategory};
pub use npc::Npc;
pub use params::SimulationParams;
pub use types::{Feature, FeatureKind, Position, WorldQuery};
