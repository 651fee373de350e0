//! Critter agents and the per-tick state machine
//!
//! Each agent carries need levels (hunger, thirst, tiredness), an inventory
//! and a plan/action queue. `tick` converts needs into planned actions and
//! executes the current one against a read-only world view. An agent is
//! always in exactly one of three states: idle (nothing current, nothing
//! planned), planning (queue non-empty, nothing current) or acting.

use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::simulation::actions::{ActionKind, WorldEffect};
use crate::simulation::activity_log::{ActivityCategory, ActivityLog};
use crate::simulation::items::{Item, ItemCategory};
use crate::simulation::params::SimulationParams;
use crate::simulation::types::{FeatureKind, Position, WorldQuery};
use crate::terrain::TerrainBand;

/// An autonomous creature living on the island.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Npc {
    pub name: String,
    pub position: Position,
    pub age: u32,
    pub hunger: u32,
    pub thirst: u32,
    pub tiredness: u32,
    /// Per-agent tiredness headroom, rolled once at spawn
    pub stamina: u32,
    pub inventory: Vec<Item>,
    pub planned_actions: Vec<ActionKind>,
    pub current_action: Option<ActionKind>,
    pub time_spent_on_current_action: u32,
    /// Agent-local RNG stream; keeps shuffles deterministic per agent even
    /// when agents tick in parallel
    rng: ChaCha8Rng,
}

impl Npc {
    pub fn new(
        name: impl Into<String>,
        position: Position,
        seed: u64,
        params: &SimulationParams,
    ) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let stamina = if params.stamina_range > 0 {
            rng.gen_range(0..params.stamina_range)
        } else {
            0
        };

        Self {
            name: name.into(),
            position,
            age: 0,
            hunger: 0,
            thirst: 0,
            tiredness: 0,
            stamina,
            inventory: Vec::new(),
            planned_actions: Vec::new(),
            current_action: None,
            time_spent_on_current_action: 0,
            rng,
        }
    }

    /// Tiredness level at which the agent wants to sleep.
    pub fn tiredness_cap(&self, params: &SimulationParams) -> u32 {
        params.base_tiredness_cap + self.stamina
    }

    pub fn is_tired(&self, params: &SimulationParams) -> bool {
        self.tiredness >= self.tiredness_cap(params)
    }

    pub fn is_hungry(&self, params: &SimulationParams) -> bool {
        self.hunger >= params.hunger_threshold
    }

    pub fn is_thirsty(&self, params: &SimulationParams) -> bool {
        self.thirst >= params.thirst_threshold
    }

    /// True when the action is already queued or currently executing.
    /// Guards the planner against duplicate entries.
    pub fn has_planned(&self, action: ActionKind) -> bool {
        self.current_action == Some(action) || self.planned_actions.contains(&action)
    }

    fn plan_action(&mut self, action: ActionKind, tick: u64, log: &mut ActivityLog) {
        debug_assert!(!self.has_planned(action));
        self.planned_actions.push(action);
        log.record(
            tick,
            &self.name,
            ActivityCategory::Planning,
            format!("planned {}", action),
        );
    }

    fn find_item_in_inventory(&self, category: ItemCategory) -> Option<usize> {
        self.inventory.iter().position(|item| item.category == category)
    }

    /// Advance this agent by one step against a read-only world view.
    /// Returns a world effect when a completed action changed the island.
    pub fn tick<W: WorldQuery + ?Sized>(
        &mut self,
        world: &W,
        params: &SimulationParams,
        tick: u64,
        log: &mut ActivityLog,
    ) -> Option<WorldEffect> {
        self.age += 1;
        self.hunger += 1;
        self.thirst += 1;
        self.tiredness += 1;

        if self.is_tired(params) && !self.has_planned(ActionKind::Sleep) {
            log.record(
                tick,
                &self.name,
                ActivityCategory::Need,
                format!(
                    "is feeling tired (tiredness {}, cap {})",
                    self.tiredness,
                    self.tiredness_cap(params)
                ),
            );
            self.plan_action(ActionKind::Sleep, tick, log);
        }

        if self.is_hungry(params) {
            // Eat from the inventory before going out looking for food.
            if let Some(idx) = self.find_item_in_inventory(ItemCategory::Food) {
                let item = self.inventory.remove(idx);
                let before = self.hunger;
                self.hunger = self.hunger.saturating_sub(item.energy);
                log.record(
                    tick,
                    &self.name,
                    ActivityCategory::Consumption,
                    format!("ate {} (-{} hunger)", item.name, before - self.hunger),
                );
            }

            if self.is_hungry(params) && !self.has_planned(ActionKind::FindFood) {
                log.record(
                    tick,
                    &self.name,
                    ActivityCategory::Need,
                    format!("is feeling hungry ({} hunger)", self.hunger),
                );
                self.plan_action(ActionKind::FindFood, tick, log);
            }
        }

        if self.is_thirsty(params) {
            if let Some(idx) = self.find_item_in_inventory(ItemCategory::Drink) {
                let item = self.inventory.remove(idx);
                let before = self.thirst;
                self.thirst = self.thirst.saturating_sub(item.energy);
                log.record(
                    tick,
                    &self.name,
                    ActivityCategory::Consumption,
                    format!("drank {} (-{} thirst)", item.name, before - self.thirst),
                );
            }

            if self.is_thirsty(params) && !self.has_planned(ActionKind::FindWater) {
                log.record(
                    tick,
                    &self.name,
                    ActivityCategory::Need,
                    format!("is feeling thirsty ({} thirst)", self.thirst),
                );
                self.plan_action(ActionKind::FindWater, tick, log);
            }
        }

        if !self.is_tired(params) && !self.is_hungry(params) && !self.is_thirsty(params) {
            // Basic needs are covered; look after shelter if none is close.
            let has_shelter_nearby = !world
                .features_within(
                    FeatureKind::RabbitHole,
                    params.shelter_search_radius,
                    self.position,
                )
                .is_empty();

            if !self.has_planned(ActionKind::DigHole) && !has_shelter_nearby {
                log.record(
                    tick,
                    &self.name,
                    ActivityCategory::Need,
                    "decided to dig a hole for shelter".to_string(),
                );
                self.plan_action(ActionKind::DigHole, tick, log);
            }
        }

        // Select the next action to work on. Time on the current action only
        // accumulates from the tick after selection.
        let was_acting = self.current_action.is_some();
        if self.current_action.is_none() && !self.planned_actions.is_empty() {
            if self.planned_actions.len() > 1 {
                self.planned_actions.shuffle(&mut self.rng);
            }

            let action = self.planned_actions.remove(0);
            self.current_action = Some(action);
            self.time_spent_on_current_action = 0;
            log.record(
                tick,
                &self.name,
                ActivityCategory::Action,
                format!("started to {}", action),
            );
        }

        self.perform_current_action(world, params, tick, was_acting, log)
    }

    fn perform_current_action<W: WorldQuery + ?Sized>(
        &mut self,
        world: &W,
        params: &SimulationParams,
        tick: u64,
        was_acting: bool,
        log: &mut ActivityLog,
    ) -> Option<WorldEffect> {
        let action = self.current_action?;
        if was_acting {
            self.time_spent_on_current_action += 1;
        }

        let mut effect = None;
        let completed = match action {
            ActionKind::FindFood => {
                self.wander(world);
                let done = self.time_spent_on_current_action >= params.find_food_duration;
                if done {
                    let item = Item::food("berries", params.forage_energy);
                    log.record(
                        tick,
                        &self.name,
                        ActivityCategory::Action,
                        format!("found {}", item.name),
                    );
                    self.inventory.push(item);
                }
                done
            }
            ActionKind::FindWater => {
                self.wander(world);
                let done = self.time_spent_on_current_action >= params.find_water_duration;
                if done {
                    let item = Item::drink("fresh water", params.water_energy);
                    log.record(
                        tick,
                        &self.name,
                        ActivityCategory::Action,
                        format!("found {}", item.name),
                    );
                    self.inventory.push(item);
                }
                done
            }
            ActionKind::Sleep => {
                let done = self.time_spent_on_current_action >= params.sleep_duration;
                if done {
                    self.tiredness = 0;
                    log.record(
                        tick,
                        &self.name,
                        ActivityCategory::Action,
                        "woke up rested".to_string(),
                    );
                }
                done
            }
            ActionKind::DigHole => {
                let done = self.time_spent_on_current_action >= params.dig_hole_duration;
                if done {
                    effect = Some(WorldEffect::DugHole {
                        position: self.position,
                    });
                }
                done
            }
        };

        if completed {
            log.record(
                tick,
                &self.name,
                ActivityCategory::Action,
                format!("finished {}", action.describe()),
            );
            self.current_action = None;
        }

        effect
    }

    /// Take one random step, staying on land and inside the island.
    fn wander<W: WorldQuery + ?Sized>(&mut self, world: &W) {
        let dx = self.rng.gen_range(-1..=1);
        let dy = self.rng.gen_range(-1..=1);
        let candidate = Position::new(self.position.x + dx, self.position.y + dy);

        if let Some(height) = world.height_at(candidate) {
            if !TerrainBand::from_height(height).is_water() {
                self.position = candidate;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation::types::Feature;

    /// Flat grassland world with configurable features.
    struct TestWorld {
        width: usize,
        height: usize,
        features: Vec<Feature>,
    }

    impl TestWorld {
        fn open() -> Self {
            Self {
                width: 100,
                height: 100,
                features: Vec::new(),
            }
        }

        fn with_hole(position: Position) -> Self {
            Self {
                width: 100,
                height: 100,
                features: vec![Feature {
                    kind: FeatureKind::RabbitHole,
                    position,
                }],
            }
        }
    }

    impl WorldQuery for TestWorld {
        fn width(&self) -> usize {
            self.width
        }

        fn height(&self) -> usize {
            self.height
        }

        fn height_at(&self, position: Position) -> Option<u8> {
            if position.x >= 0
                && position.y >= 0
                && (position.x as usize) < self.width
                && (position.y as usize) < self.height
            {
                Some(120) // grass everywhere
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
            self.features
                .iter()
                .filter(|f| f.kind == kind && f.position.distance(&position) <= radius)
                .collect()
        }
    }

    fn test_npc(params: &SimulationParams) -> Npc {
        Npc::new("Pip", Position::new(50, 50), 7, params)
    }

    #[test]
    fn test_needs_increase_by_one_per_tick() {
        let params = SimulationParams::default();
        let world = TestWorld::with_hole(Position::new(50, 50));
        let mut log = ActivityLog::new();
        let mut npc = test_npc(&params);

        npc.tick(&world, &params, 1, &mut log);
        assert_eq!(npc.age, 1);
        assert_eq!(npc.hunger, 1);
        assert_eq!(npc.thirst, 1);
        assert_eq!(npc.tiredness, 1);

        npc.tick(&world, &params, 2, &mut log);
        assert_eq!(npc.hunger, 2);
        assert_eq!(npc.thirst, 2);
        assert_eq!(npc.tiredness, 2);
    }

    #[test]
    fn test_auto_consumption_clamps_at_zero() {
        let params = SimulationParams {
            hunger_threshold: 10,
            ..SimulationParams::default()
        };
        let world = TestWorld::with_hole(Position::new(50, 50));
        let mut log = ActivityLog::new();
        let mut npc = test_npc(&params);
        npc.hunger = 25;
        npc.inventory.push(Item::food("apple", 30));

        npc.tick(&world, &params, 1, &mut log);

        // 25 -> 26 after the increment, then the apple clamps it to 0.
        assert_eq!(npc.hunger, 0);
        assert!(npc.inventory.is_empty());
        assert!(!npc.has_planned(ActionKind::FindFood));
    }

    #[test]
    fn test_consumption_rechecks_hunger() {
        let params = SimulationParams::default(); // hunger threshold 40
        let world = TestWorld::with_hole(Position::new(50, 50));
        let mut log = ActivityLog::new();

        // Still hungry after eating: plans to find more food.
        let mut npc = test_npc(&params);
        npc.hunger = 80;
        npc.inventory.push(Item::food("apple", 30));
        npc.tick(&world, &params, 1, &mut log);
        assert_eq!(npc.hunger, 51);
        assert!(npc.has_planned(ActionKind::FindFood));

        // Satisfied after eating: no plan.
        let mut npc = test_npc(&params);
        npc.hunger = 60;
        npc.inventory.push(Item::food("apple", 30));
        npc.tick(&world, &params, 1, &mut log);
        assert_eq!(npc.hunger, 31);
        assert!(!npc.has_planned(ActionKind::FindFood));
    }

    #[test]
    fn test_drinking_reduces_thirst() {
        let params = SimulationParams {
            thirst_threshold: 10,
            ..SimulationParams::default()
        };
        let world = TestWorld::with_hole(Position::new(50, 50));
        let mut log = ActivityLog::new();
        let mut npc = test_npc(&params);
        npc.thirst = 15;
        npc.inventory.push(Item::drink("fresh water", 20));

        npc.tick(&world, &params, 1, &mut log);
        assert_eq!(npc.thirst, 0);
        assert!(npc.inventory.is_empty());
    }

    #[test]
    fn test_no_duplicate_planning() {
        let params = SimulationParams::default();
        let world = TestWorld::with_hole(Position::new(50, 50));
        let mut log = ActivityLog::new();
        let mut npc = test_npc(&params);
        npc.hunger = 100; // persistently hungry, nothing to eat

        npc.tick(&world, &params, 1, &mut log);
        assert_eq!(npc.current_action, Some(ActionKind::FindFood));

        for t in 2..6 {
            npc.tick(&world, &params, t, &mut log);
            let queued = npc
                .planned_actions
                .iter()
                .filter(|a| **a == ActionKind::FindFood)
                .count();
            let current = (npc.current_action == Some(ActionKind::FindFood)) as usize;
            assert!(queued + current <= 1, "find-food duplicated at tick {}", t);
        }
    }

    #[test]
    fn test_action_lifecycle_on_selection() {
        let params = SimulationParams::default();
        let world = TestWorld::with_hole(Position::new(50, 50));
        let mut log = ActivityLog::new();
        let mut npc = test_npc(&params);
        npc.planned_actions.push(ActionKind::Sleep);

        npc.tick(&world, &params, 1, &mut log);

        assert_eq!(npc.current_action, Some(ActionKind::Sleep));
        assert!(npc.planned_actions.is_empty());
        assert_eq!(npc.time_spent_on_current_action, 0);
    }

    #[test]
    fn test_tiredness_cap_triggers_sleep() {
        let params = SimulationParams::default();
        let world = TestWorld::with_hole(Position::new(50, 50));
        let mut log = ActivityLog::new();
        let mut npc = test_npc(&params);
        npc.tiredness = npc.tiredness_cap(&params) - 1;

        npc.tick(&world, &params, 1, &mut log);
        assert_eq!(npc.current_action, Some(ActionKind::Sleep));
    }

    #[test]
    fn test_sleep_resets_tiredness() {
        let params = SimulationParams::default();
        let world = TestWorld::with_hole(Position::new(50, 50));
        let mut log = ActivityLog::new();
        let mut npc = test_npc(&params);
        npc.current_action = Some(ActionKind::Sleep);
        npc.time_spent_on_current_action = params.sleep_duration - 1;
        npc.tiredness = 40;

        npc.tick(&world, &params, 1, &mut log);

        assert_eq!(npc.tiredness, 0);
        assert_eq!(npc.current_action, None);
    }

    #[test]
    fn test_content_npc_digs_shelter() {
        let params = SimulationParams::default();
        let world = TestWorld::open();
        let mut log = ActivityLog::new();
        let mut npc = test_npc(&params);

        npc.tick(&world, &params, 1, &mut log);
        assert!(npc.has_planned(ActionKind::DigHole));
    }

    #[test]
    fn test_nearby_shelter_suppresses_digging() {
        let params = SimulationParams::default();
        let world = TestWorld::with_hole(Position::new(60, 50)); // 10 cells away
        let mut log = ActivityLog::new();
        let mut npc = test_npc(&params);

        npc.tick(&world, &params, 1, &mut log);
        assert!(!npc.has_planned(ActionKind::DigHole));
    }

    #[test]
    fn test_dig_hole_completion_reports_effect() {
        let params = SimulationParams::default();
        let world = TestWorld::with_hole(Position::new(50, 50));
        let mut log = ActivityLog::new();
        let mut npc = test_npc(&params);
        npc.current_action = Some(ActionKind::DigHole);
        npc.time_spent_on_current_action = params.dig_hole_duration - 1;

        let effect = npc.tick(&world, &params, 1, &mut log);

        assert_eq!(
            effect,
            Some(WorldEffect::DugHole {
                position: npc.position
            })
        );
        assert_eq!(npc.current_action, None);
    }

    #[test]
    fn test_shuffle_keeps_multiset() {
        let params = SimulationParams::default();
        let world = TestWorld::with_hole(Position::new(50, 50));
        let mut log = ActivityLog::new();
        let mut npc = test_npc(&params);
        let original = vec![
            ActionKind::FindFood,
            ActionKind::FindWater,
            ActionKind::Sleep,
            ActionKind::DigHole,
        ];
        npc.planned_actions = original.clone();

        npc.tick(&world, &params, 1, &mut log);

        let mut remaining = npc.planned_actions.clone();
        remaining.push(npc.current_action.expect("an action was selected"));
        remaining.sort_by_key(|a| a.to_string());

        let mut expected = original;
        expected.sort_by_key(|a| a.to_string());
        assert_eq!(remaining, expected);
    }

    #[test]
    fn test_find_food_stocks_inventory() {
        let params = SimulationParams::default();
        let world = TestWorld::with_hole(Position::new(50, 50));
        let mut log = ActivityLog::new();
        let mut npc = test_npc(&params);
        npc.current_action = Some(ActionKind::FindFood);
        npc.time_spent_on_current_action = params.find_food_duration - 1;

        npc.tick(&world, &params, 1, &mut log);

        assert_eq!(npc.inventory.len(), 1);
        assert_eq!(npc.inventory[0].category, ItemCategory::Food);
        assert_eq!(npc.current_action, None);
    }

    #[test]
    fn test_same_seed_same_behavior() {
        let params = SimulationParams::default();
        let world = TestWorld::open();

        let run = || {
            let mut log = ActivityLog::new();
            let mut npc = test_npc(&params);
            for t in 1..=50 {
                npc.tick(&world, &params, t, &mut log);
            }
            (npc.position, npc.planned_actions.clone(), npc.current_action)
        };

        assert_eq!(run(), run());
    }
}
