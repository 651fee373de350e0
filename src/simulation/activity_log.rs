//! Activity log
//!
//! The observability sink for the simulation: agents and the island record
//! what happened each tick, and callers decide how to surface it. The core
//! tick logic has no dependency on any logging facility.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

/// Maximum number of entries retained in the log
const MAX_ACTIVITY_ENTRIES: usize = 200;

/// Category of a recorded event
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActivityCategory {
    /// A need crossed its threshold
    Need,
    /// An inventory item was consumed
    Consumption,
    /// An action was enqueued
    Planning,
    /// An action was started or finished
    Action,
    /// The island itself changed (e.g. a hole was dug)
    World,
}

impl ActivityCategory {
    /// Short label for display
    pub fn label(&self) -> &'static str {
        match self {
            ActivityCategory::Need => "NEED",
            ActivityCategory::Consumption => "EAT",
            ActivityCategory::Planning => "PLAN",
            ActivityCategory::Action => "ACT",
            ActivityCategory::World => "WLD",
        }
    }
}

/// One recorded event
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ActivityEntry {
    /// Tick when this happened
    pub tick: u64,
    /// Name of the agent involved, or "island" for world events
    pub actor: String,
    pub category: ActivityCategory,
    pub message: String,
}

/// Counters kept alongside the entries
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityStats {
    pub total_events: u64,
    pub needs_raised: u64,
    pub items_consumed: u64,
    pub actions_planned: u64,
    pub action_events: u64,
    pub world_events: u64,
}

/// Bounded event log drained by the caller.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ActivityLog {
    entries: VecDeque<ActivityEntry>,
    pub stats: ActivityStats,
}

impl ActivityLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(
        &mut self,
        tick: u64,
        actor: &str,
        category: ActivityCategory,
        message: String,
    ) {
        self.stats.total_events += 1;
        match category {
            ActivityCategory::Need => self.stats.needs_raised += 1,
            ActivityCategory::Consumption => self.stats.items_consumed += 1,
            ActivityCategory::Planning => self.stats.actions_planned += 1,
            ActivityCategory::Action => self.stats.action_events += 1,
            ActivityCategory::World => self.stats.world_events += 1,
        }

        self.entries.push_back(ActivityEntry {
            tick,
            actor: actor.to_string(),
            category,
            message,
        });
        while self.entries.len() > MAX_ACTIVITY_ENTRIES {
            self.entries.pop_front();
        }
    }

    /// Remove and return all pending entries, oldest first.
    pub fn drain(&mut self) -> Vec<ActivityEntry> {
        self.entries.drain(..).collect()
    }

    pub fn entries(&self) -> impl Iterator<Item = &ActivityEntry> {
        self.entries.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Fold another log into this one, preserving the other's entry order.
    /// Used by the parallel tick to merge per-agent logs in spawn order.
    pub fn merge(&mut self, other: ActivityLog) {
        self.stats.total_events += other.stats.total_events;
        self.stats.needs_raised += other.stats.needs_raised;
        self.stats.items_consumed += other.stats.items_consumed;
        self.stats.actions_planned += other.stats.actions_planned;
        self.stats.action_events += other.stats.action_events;
        self.stats.world_events += other.stats.world_events;

        self.entries.extend(other.entries);
        while self.entries.len() > MAX_ACTIVITY_ENTRIES {
            self.entries.pop_front();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_and_drain() {
        let mut log = ActivityLog::new();
        log.record(1, "Pip", ActivityCategory::Need, "is hungry".into());
        log.record(1, "Pip", ActivityCategory::Planning, "plans to eat".into());

        let entries = log.drain();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].category, ActivityCategory::Need);
        assert!(log.is_empty());
        // Stats survive the drain.
        assert_eq!(log.stats.total_events, 2);
        assert_eq!(log.stats.actions_planned, 1);
    }

    #[test]
    fn test_log_is_bounded() {
        let mut log = ActivityLog::new();
        for i in 0..(MAX_ACTIVITY_ENTRIES as u64 + 50) {
            log.record(i, "x", ActivityCategory::Action, "tick".into());
        }
        assert_eq!(log.entries().count(), MAX_ACTIVITY_ENTRIES);
        assert_eq!(log.stats.total_events, MAX_ACTIVITY_ENTRIES as u64 + 50);
    }

    #[test]
    fn test_merge_preserves_order_and_stats() {
        let mut a = ActivityLog::new();
        a.record(1, "Pip", ActivityCategory::Action, "first".into());
        let mut b = ActivityLog::new();
        b.record(1, "Tove", ActivityCategory::World, "second".into());

        a.merge(b);
        let entries = a.drain();
        assert_eq!(entries[0].actor, "Pip");
        assert_eq!(entries[1].actor, "Tove");
        assert_eq!(a.stats.total_events, 2);
        assert_eq!(a.stats.world_events, 1);
    }
}
