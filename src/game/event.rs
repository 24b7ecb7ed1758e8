//! Event System
//!
//! The simulation reports what happened during a tick through typed event
//! queues. The frame loop drains them afterwards for logging and the HUD,
//! so gameplay code never has to know who is listening.

use crate::math::Vec3;
use crate::world::LevelId;

/// A queue for events of a single type.
/// Events are collected during the frame and drained at specific points.
#[derive(Debug)]
pub struct EventQueue<T> {
    events: Vec<T>,
}

impl<T> EventQueue<T> {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    /// Send an event (add to queue)
    pub fn send(&mut self, event: T) {
        self.events.push(event);
    }

    /// Drain all events (returns iterator and clears queue)
    pub fn drain(&mut self) -> impl Iterator<Item = T> + '_ {
        self.events.drain(..)
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Clear all events without processing
    pub fn clear(&mut self) {
        self.events.clear();
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }
}

impl<T> Default for EventQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Container for all game events
#[derive(Debug, Default)]
pub struct Events {
    pub coin_collected: EventQueue<CoinCollectedEvent>,
    /// Player touched a portal without enough coins
    pub portal_locked: EventQueue<PortalLockedEvent>,
    pub level_changed: EventQueue<LevelChangedEvent>,
    /// Player fell below the death plane
    pub respawn: EventQueue<RespawnEvent>,
    /// Final portal taken
    pub game_completed: EventQueue<GameCompletedEvent>,
}

impl Events {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear all event queues. Call at end of frame.
    pub fn clear_all(&mut self) {
        self.coin_collected.clear();
        self.portal_locked.clear();
        self.level_changed.clear();
        self.respawn.clear();
        self.game_completed.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.coin_collected.is_empty()
            && self.portal_locked.is_empty()
            && self.level_changed.is_empty()
            && self.respawn.is_empty()
            && self.game_completed.is_empty()
    }
}

// =============================================================================
// Event Types
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoinCollectedEvent {
    pub level: LevelId,
    /// Index into the level's coin list
    pub coin: usize,
    pub position: Vec3,
    /// Coins collected on this level, including this one
    pub collected: u32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PortalLockedEvent {
    pub level: LevelId,
    pub collected: u32,
    pub required: u32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LevelChangedEvent {
    pub from: LevelId,
    pub to: LevelId,
    /// Time spent on the level being left
    pub time: f32,
    /// Whether `time` became the new best for `from`
    pub new_best: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RespawnEvent {
    pub level: LevelId,
    /// Where the player fell from
    pub fell_from: Vec3,
    pub position: Vec3,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GameCompletedEvent {
    pub total_score: u32,
    /// Sum of best times over all levels
    pub total_time: f32,
}
