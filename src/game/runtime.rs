//! Game Runtime
//!
//! Owns every level, the player and the per-level counters, and advances
//! them one fixed step at a time. Rendering and input live outside; this
//! module only sees a `MoveIntent` and `dt`.

use std::collections::HashMap;
use crate::settings::{GameSettings, RuleSettings};
use crate::world::{CollisionBox, Level, LevelError, LevelId, GAME_COMPLETE};
use super::event::{
    CoinCollectedEvent, Events, GameCompletedEvent, LevelChangedEvent, PortalLockedEvent, RespawnEvent,
};
use super::physics::{step_player, StepOutcome};
use super::player::{MoveIntent, Player};

/// Fixed-step accumulator.
///
/// Real frame time goes in, whole simulation steps come out, so the
/// simulation always runs at the tuned step size regardless of frame rate.
#[derive(Debug, Clone)]
pub struct FrameClock {
    step: f32,
    max_steps: u32,
    accumulator: f32,
}

impl FrameClock {
    pub fn new(step: f32, max_steps: u32) -> Self {
        Self { step, max_steps, accumulator: 0.0 }
    }

    pub fn from_settings(rules: &RuleSettings) -> Self {
        Self::new(rules.fixed_timestep, rules.max_steps_per_frame)
    }

    /// Simulation step in seconds
    pub fn step(&self) -> f32 {
        self.step
    }

    /// Add `frame_time` seconds and return how many steps to run now.
    /// Backlog beyond `max_steps` is dropped.
    pub fn advance(&mut self, frame_time: f32) -> u32 {
        if frame_time.is_finite() && frame_time > 0.0 {
            self.accumulator += frame_time;
        }
        let mut steps = 0;
        while self.accumulator >= self.step && steps < self.max_steps {
            self.accumulator -= self.step;
            steps += 1;
        }
        if steps == self.max_steps {
            self.accumulator = self.accumulator.min(self.step);
        }
        steps
    }
}

/// Whether the run is still going
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GameStatus {
    #[default]
    Playing,
    /// Final portal taken
    Completed,
}

/// Best completion time per level, kept for the process lifetime
#[derive(Debug, Clone, Default)]
pub struct BestTimes {
    times: HashMap<LevelId, f32>,
}

impl BestTimes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, level: LevelId) -> Option<f32> {
        self.times.get(&level).copied()
    }

    /// Keep `time` if it beats the stored best. Returns whether it did.
    pub fn record(&mut self, level: LevelId, time: f32) -> bool {
        match self.times.get(&level) {
            Some(&best) if best <= time => false,
            _ => {
                self.times.insert(level, time);
                true
            }
        }
    }

    /// Sum of all recorded bests
    pub fn total(&self) -> f32 {
        self.times.values().sum()
    }

    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }
}

/// Format seconds as `MM:SS`
pub fn format_time(seconds: f32) -> String {
    let total = seconds.max(0.0) as u32;
    format!("{:02}:{:02}", total / 60, total % 60)
}

/// Full game state for one run
pub struct GameState {
    levels: Vec<Level>,
    /// Index into `levels`
    current: usize,
    pub player: Player,
    pub settings: GameSettings,
    /// Coins collected on the current level
    pub coins_collected: u32,
    /// Seconds spent on the current level
    pub level_time: f32,
    /// Seconds simulated since the run started
    pub sim_time: f32,
    pub best_times: BestTimes,
    pub total_score: u32,
    pub status: GameStatus,
    pub events: Events,
    /// Set while the player stands in a locked portal, so the hint fires once
    touching_locked_portal: bool,
    /// Reused collision box buffer
    boxes: Vec<CollisionBox>,
}

impl GameState {
    /// Start a run on the first level of `levels`.
    pub fn new(levels: Vec<Level>, settings: GameSettings) -> Result<Self, LevelError> {
        let current = levels
            .iter()
            .position(|l| l.id == LevelId::Earth)
            .ok_or(LevelError::NotGenerated(LevelId::Earth))?;
        let spawn = levels[current].theme().spawn;
        let player = Player::new(spawn, &settings.player);

        Ok(Self {
            levels,
            current,
            player,
            settings,
            coins_collected: 0,
            level_time: 0.0,
            sim_time: 0.0,
            best_times: BestTimes::new(),
            total_score: 0,
            status: GameStatus::Playing,
            events: Events::new(),
            touching_locked_portal: false,
            boxes: Vec::new(),
        })
    }

    pub fn level(&self) -> &Level {
        &self.levels[self.current]
    }

    pub fn level_mut(&mut self) -> &mut Level {
        &mut self.levels[self.current]
    }

    pub fn current_level(&self) -> LevelId {
        self.levels[self.current].id
    }

    pub fn remaining_coins(&self) -> usize {
        self.level().remaining_coins()
    }

    pub fn total_coins(&self) -> usize {
        self.level().coins.len()
    }

    pub fn portal_open(&self) -> bool {
        self.level().portal.is_open(self.coins_collected)
    }

    pub fn portal_distance(&self) -> f32 {
        self.level().portal.position.distance(self.player.position)
    }

    fn level_index(&self, id: LevelId) -> Result<usize, LevelError> {
        self.levels
            .iter()
            .position(|l| l.id == id)
            .ok_or(LevelError::NotGenerated(id))
    }

    /// Switch to `id`, spawn the player at `spawn` and reset per-level counters
    pub fn enter_level(&mut self, id: LevelId, spawn: crate::math::Vec3) -> Result<(), LevelError> {
        self.current = self.level_index(id)?;
        self.player = Player::new(spawn, &self.settings.player);
        self.coins_collected = 0;
        self.level_time = 0.0;
        self.touching_locked_portal = false;
        self.boxes.clear();
        Ok(())
    }

    /// Advance the game by one step.
    ///
    /// Errors only when a portal names a level that does not exist; nothing
    /// is recorded for the level in that case.
    pub fn tick(&mut self, intent: &MoveIntent, dt: f32) -> Result<(), LevelError> {
        if self.status == GameStatus::Completed {
            return Ok(());
        }

        self.sim_time += dt;
        self.level_time += dt;
        let level_id = self.current_level();
        let debug = self.settings.debug_collision;

        let level = &mut self.levels[self.current];
        level.update_platforms(dt, self.sim_time);

        if intent.jump {
            self.player.jump();
        }

        level.collision_boxes_into(&mut self.boxes);
        let fell_from = self.player.position;
        let outcome = step_player(&mut self.player, intent, &self.settings.player, &self.boxes, dt, debug);
        if outcome == StepOutcome::Respawned {
            self.events.respawn.send(RespawnEvent {
                level: level_id,
                fell_from,
                position: self.player.position,
            });
        }

        let reach = self.settings.rules.coin_radius + self.player.radius;
        for (i, coin) in level.coins.iter_mut().enumerate() {
            coin.update(dt, self.sim_time);
            if coin.try_collect(self.player.position, reach) {
                self.coins_collected += 1;
                self.events.coin_collected.send(CoinCollectedEvent {
                    level: level_id,
                    coin: i,
                    position: coin.position,
                    collected: self.coins_collected,
                });
            }
        }

        self.check_portal()
    }

    fn check_portal(&mut self) -> Result<(), LevelError> {
        let level_id = self.current_level();
        let portal = &self.levels[self.current].portal;

        if !portal.in_reach(self.player.position, self.player.radius) {
            self.touching_locked_portal = false;
            return Ok(());
        }

        if !portal.is_open(self.coins_collected) {
            if !self.touching_locked_portal {
                self.touching_locked_portal = true;
                self.events.portal_locked.send(PortalLockedEvent {
                    level: level_id,
                    collected: self.coins_collected,
                    required: portal.required_coins,
                });
            }
            return Ok(());
        }

        let target = portal.target_level;
        let spawn = portal.target_spawn;

        // Validate before touching any records
        let next = if target == GAME_COMPLETE {
            None
        } else {
            let id = LevelId::from_index(target)?;
            self.level_index(id)?;
            Some(id)
        };

        let time = self.level_time;
        let new_best = self.best_times.record(level_id, time);
        self.total_score += self.coins_collected;

        match next {
            Some(to) => {
                self.enter_level(to, spawn)?;
                self.events.level_changed.send(LevelChangedEvent {
                    from: level_id,
                    to,
                    time,
                    new_best,
                });
            }
            None => {
                self.status = GameStatus::Completed;
                self.events.game_completed.send(GameCompletedEvent {
                    total_score: self.total_score,
                    total_time: self.best_times.total(),
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use crate::math::Vec3;
    use crate::world::{generate_all, BlockKind, Coin};

    const DT: f32 = 0.016;

    /// Generated levels with every coin removed, so counters are under test control
    fn coinless_game() -> GameState {
        let settings = GameSettings::default();
        let mut rng = StdRng::seed_from_u64(7);
        let mut levels = generate_all(&mut rng, &settings);
        for level in &mut levels {
            level.coins.clear();
        }
        match GameState::new(levels, settings) {
            Ok(game) => game,
            Err(e) => panic!("earth level missing: {}", e),
        }
    }

    fn stand_in_portal(game: &mut GameState) {
        game.player.position = game.level().portal.position;
        game.player.velocity = Vec3::ZERO;
    }

    #[test]
    fn test_frame_clock_steps() {
        let mut clock = FrameClock::new(0.016, 5);
        assert_eq!(clock.advance(0.010), 0);
        assert_eq!(clock.advance(0.010), 1);
        assert_eq!(clock.advance(0.032), 2);
    }

    #[test]
    fn test_frame_clock_caps_backlog() {
        let mut clock = FrameClock::new(0.016, 5);
        assert_eq!(clock.advance(1.0), 5);
        assert!(clock.advance(0.0) <= 1);
        assert_eq!(clock.advance(f32::NAN), 0);
    }

    #[test]
    fn test_best_times_keep_minimum() {
        let mut best = BestTimes::new();
        assert!(best.record(LevelId::Earth, 10.0));
        assert!(!best.record(LevelId::Earth, 12.0));
        assert_eq!(best.get(LevelId::Earth), Some(10.0));
        assert!(best.record(LevelId::Earth, 8.0));
        assert_eq!(best.get(LevelId::Earth), Some(8.0));
        assert_eq!(best.get(LevelId::Nether), None);
    }

    #[test]
    fn test_format_time() {
        assert_eq!(format_time(0.0), "00:00");
        assert_eq!(format_time(75.9), "01:15");
    }

    #[test]
    fn test_starts_on_earth_at_spawn() {
        let game = coinless_game();
        assert_eq!(game.current_level(), LevelId::Earth);
        assert_eq!(game.player.position, Vec3::new(0.0, 2.0, 0.0));
        assert_eq!(game.status, GameStatus::Playing);
    }

    #[test]
    fn test_new_requires_first_level() {
        let settings = GameSettings::default();
        let err = GameState::new(Vec::new(), settings).err();
        assert_eq!(err, Some(LevelError::NotGenerated(LevelId::Earth)));
    }

    #[test]
    fn test_portal_stays_locked_below_threshold() {
        let mut game = coinless_game();
        game.coins_collected = 4;
        stand_in_portal(&mut game);

        assert!(game.tick(&MoveIntent::idle(), DT).is_ok());
        assert_eq!(game.current_level(), LevelId::Earth);
        assert_eq!(game.events.portal_locked.len(), 1);
        assert!(game.best_times.is_empty());

        // Standing still in the portal does not repeat the hint
        assert!(game.tick(&MoveIntent::idle(), DT).is_ok());
        assert_eq!(game.events.portal_locked.len(), 1);
    }

    #[test]
    fn test_portal_moves_to_next_level() {
        let mut game = coinless_game();
        game.coins_collected = 5;
        stand_in_portal(&mut game);

        assert!(game.tick(&MoveIntent::idle(), DT).is_ok());
        assert_eq!(game.current_level(), LevelId::Nether);
        assert_eq!(game.player.position, LevelId::Nether.theme().spawn);
        assert_eq!(game.player.velocity, Vec3::ZERO);
        assert_eq!(game.coins_collected, 0);
        assert_eq!(game.level_time, 0.0);
        assert_eq!(game.total_score, 5);
        assert!(game.best_times.get(LevelId::Earth).is_some());

        let changes: Vec<_> = game.events.level_changed.drain().collect();
        assert_eq!(changes.len(), 1);
        assert_eq!(changes[0].from, LevelId::Earth);
        assert_eq!(changes[0].to, LevelId::Nether);
        assert!(changes[0].new_best);
    }

    #[test]
    fn test_final_portal_completes_game() {
        let mut game = coinless_game();
        let spawn = LevelId::Diamond.theme().spawn;
        assert!(game.enter_level(LevelId::Diamond, spawn).is_ok());
        game.coins_collected = 6;
        stand_in_portal(&mut game);

        assert!(game.tick(&MoveIntent::idle(), DT).is_ok());
        assert_eq!(game.status, GameStatus::Completed);
        assert_eq!(game.total_score, 6);
        assert_eq!(game.events.game_completed.len(), 1);
        assert!(game.best_times.get(LevelId::Diamond).is_some());

        // Completed runs no longer advance
        let time = game.sim_time;
        assert!(game.tick(&MoveIntent::idle(), DT).is_ok());
        assert_eq!(game.sim_time, time);
    }

    #[test]
    fn test_unknown_portal_target_is_an_error() {
        let mut game = coinless_game();
        game.level_mut().portal.target_level = 9;
        game.coins_collected = 5;
        stand_in_portal(&mut game);

        assert_eq!(game.tick(&MoveIntent::idle(), DT), Err(LevelError::UnknownLevel(9)));
        assert!(game.best_times.is_empty());
        assert_eq!(game.total_score, 0);
        assert_eq!(game.current_level(), LevelId::Earth);
    }

    #[test]
    fn test_coin_collected_once() {
        let mut game = coinless_game();
        let pos = game.player.position;
        game.level_mut().coins.push(Coin::new(pos, BlockKind::Gold, 0.0));

        assert!(game.tick(&MoveIntent::idle(), DT).is_ok());
        assert_eq!(game.coins_collected, 1);
        assert_eq!(game.remaining_coins(), 0);
        assert_eq!(game.events.coin_collected.len(), 1);

        assert!(game.tick(&MoveIntent::idle(), DT).is_ok());
        assert_eq!(game.coins_collected, 1);
        assert_eq!(game.events.coin_collected.len(), 1);
    }

    #[test]
    fn test_fall_respawns_with_event() {
        let mut game = coinless_game();
        game.player.position = Vec3::new(3.0, -6.0, 3.0);

        assert!(game.tick(&MoveIntent::idle(), DT).is_ok());
        assert_eq!(game.player.position, game.player.start_position);
        assert_eq!(game.events.respawn.len(), 1);
    }
}
