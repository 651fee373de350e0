//! Core types shared between the island and the critter simulation

use serde::{Deserialize, Serialize};

/// A cell position on the island.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another position.
    pub fn distance(&self, other: &Position) -> f64 {
        let dx = f64::from(self.x - other.x);
        let dy = f64::from(self.y - other.y);
        (dx * dx + dy * dy).sqrt()
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Kinds of world features critters can create and search for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FeatureKind {
    /// A dug shelter hole
    RabbitHole,
}

impl FeatureKind {
    pub fn describe(&self) -> &'static str {
        match self {
            FeatureKind::RabbitHole => "rabbit hole",
        }
    }
}

/// A fixed feature placed on the island.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Feature {
    pub kind: FeatureKind,
    pub position: Position,
}

/// Read-only view of the island handed to an agent during its tick.
///
/// Agents never hold a reference back to the island; they receive this
/// capability per tick and may only query through it.
pub trait WorldQuery {
    fn width(&self) -> usize;
    fn height(&self) -> usize;

    /// Height byte at a position, or None when out of bounds.
    fn height_at(&self, position: Position) -> Option<u8>;

    /// Features of the given kind within Euclidean `radius` of `position`.
    fn features_within(&self, kind: FeatureKind, radius: f64, position: Position)
        -> Vec<&Feature>;
}
