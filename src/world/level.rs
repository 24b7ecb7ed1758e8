//! Level aggregate
//!
//! A level is everything generated for one theme: island clusters, coins and
//! the exit portal. Levels live in memory only and are regenerated on start.

use super::coin::Coin;
use super::island::{CollisionBox, FloatingIsland};
use super::portal::Portal;
use super::theme::{LevelId, LevelTheme};

/// Error type for level lookup and transitions
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LevelError {
    /// A level index outside 1..=4 that is not the game-complete sentinel
    UnknownLevel(u32),
    /// A level id with no generated level data
    NotGenerated(LevelId),
}

impl std::fmt::Display for LevelError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LevelError::UnknownLevel(i) => write!(f, "Unknown level index: {}", i),
            LevelError::NotGenerated(id) => write!(f, "Level not generated: {}", id.name()),
        }
    }
}

impl std::error::Error for LevelError {}

#[derive(Debug, Clone)]
pub struct Level {
    pub id: LevelId,
    pub islands: Vec<FloatingIsland>,
    pub coins: Vec<Coin>,
    pub portal: Portal,
}

impl Level {
    pub fn theme(&self) -> LevelTheme {
        self.id.theme()
    }

    /// Advance every island and the portal
    pub fn update_platforms(&mut self, dt: f32, sim_time: f32) {
        for island in &mut self.islands {
            island.update(dt, sim_time);
        }
        self.portal.update(dt);
    }

    /// Current collision boxes of all islands, in island order
    pub fn collision_boxes(&self) -> Vec<CollisionBox> {
        let mut boxes = Vec::with_capacity(self.islands.len() * 9);
        self.collision_boxes_into(&mut boxes);
        boxes
    }

    /// Like [`Level::collision_boxes`] but reuses the caller's buffer
    pub fn collision_boxes_into(&self, boxes: &mut Vec<CollisionBox>) {
        boxes.clear();
        for (i, island) in self.islands.iter().enumerate() {
            island.collision_boxes(i, boxes);
        }
    }

    pub fn remaining_coins(&self) -> usize {
        self.coins.iter().filter(|c| !c.is_collected()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::Vec3;
    use crate::settings::PlatformSettings;
    use crate::world::island::{IslandBlock, MotionPattern};
    use crate::world::theme::BlockKind;

    fn tiny_level() -> Level {
        let settings = PlatformSettings::default();
        let blocks = vec![
            IslandBlock { offset: Vec3::ZERO, stalactite: None },
            IslandBlock { offset: Vec3::new(1.0, 0.0, 0.0), stalactite: None },
        ];
        Level {
            id: LevelId::Earth,
            islands: vec![
                FloatingIsland::new(Vec3::ZERO, 1.0, MotionPattern::None, BlockKind::Grass, blocks.clone(), 0.0, &settings),
                FloatingIsland::new(Vec3::new(4.0, 0.0, 0.0), 1.0, MotionPattern::Vertical, BlockKind::Grass, blocks, 0.0, &settings),
            ],
            coins: vec![
                Coin::new(Vec3::new(0.0, 2.0, 0.0), BlockKind::Gold, 0.0),
                Coin::new(Vec3::new(4.0, 2.0, 0.0), BlockKind::Gold, 0.0),
            ],
            portal: Portal::new(Vec3::new(8.0, 6.0, 0.0), 2, Vec3::ZERO, 90.0),
        }
    }

    #[test]
    fn test_boxes_cover_every_block_in_order() {
        let level = tiny_level();
        let boxes = level.collision_boxes();
        assert_eq!(boxes.len(), 4);
        assert_eq!(boxes[0].owner.island, 0);
        assert_eq!(boxes[3].owner.island, 1);
        assert_eq!(boxes[3].owner.block, 1);
    }

    #[test]
    fn test_remaining_coins_excludes_collected() {
        let mut level = tiny_level();
        assert_eq!(level.remaining_coins(), 2);
        let pos = level.coins[0].effective_position();
        level.coins[0].try_collect(pos, 0.8);
        assert_eq!(level.remaining_coins(), 1);
    }
}
