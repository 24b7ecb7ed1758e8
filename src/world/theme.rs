//! Level identifiers and per-level themes

use serde::{Serialize, Deserialize};
use crate::math::Vec3;
use super::level::LevelError;

/// Portal target index meaning "no next level, the game is complete"
pub const GAME_COMPLETE: u32 = 0;

/// The four themed levels, in play order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LevelId {
    Earth,
    Nether,
    End,
    Diamond,
}

impl LevelId {
    pub const ALL: [LevelId; 4] = [LevelId::Earth, LevelId::Nether, LevelId::End, LevelId::Diamond];

    /// 1-based level number
    pub fn index(self) -> u32 {
        match self {
            LevelId::Earth => 1,
            LevelId::Nether => 2,
            LevelId::End => 3,
            LevelId::Diamond => 4,
        }
    }

    /// Resolve a 1-based level number
    pub fn from_index(index: u32) -> Result<LevelId, LevelError> {
        match index {
            1 => Ok(LevelId::Earth),
            2 => Ok(LevelId::Nether),
            3 => Ok(LevelId::End),
            4 => Ok(LevelId::Diamond),
            other => Err(LevelError::UnknownLevel(other)),
        }
    }

    /// Portal target for this level: the next level, or [`GAME_COMPLETE`]
    pub fn next_index(self) -> u32 {
        match self {
            LevelId::Diamond => GAME_COMPLETE,
            other => other.index() + 1,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            LevelId::Earth => "earth",
            LevelId::Nether => "nether",
            LevelId::End => "end",
            LevelId::Diamond => "diamond",
        }
    }

    pub fn theme(self) -> LevelTheme {
        match self {
            LevelId::Earth => LevelTheme {
                block: BlockKind::Grass,
                coin: BlockKind::Gold,
                spawn: Vec3::new(0.0, 2.0, 0.0),
                sky_color: [0.5, 0.7, 1.0, 1.0],
                ground_color: [0.2, 0.2, 0.3, 1.0],
            },
            LevelId::Nether => LevelTheme {
                block: BlockKind::Netherrack,
                coin: BlockKind::Lapis,
                spawn: Vec3::new(0.0, 4.0, 0.0),
                sky_color: [0.3, 0.1, 0.1, 1.0],
                ground_color: [0.3, 0.1, 0.1, 1.0],
            },
            LevelId::End => LevelTheme {
                block: BlockKind::Emerald,
                coin: BlockKind::Emerald,
                spawn: Vec3::new(0.0, 2.0, 0.0),
                sky_color: [0.1, 0.1, 0.2, 1.0],
                ground_color: [0.1, 0.3, 0.1, 1.0],
            },
            LevelId::Diamond => LevelTheme {
                block: BlockKind::Purple,
                coin: BlockKind::Gold,
                spawn: Vec3::new(0.0, 2.0, 0.0),
                sky_color: [0.2, 0.5, 0.8, 1.0],
                ground_color: [0.4, 0.6, 0.8, 1.0],
            },
        }
    }
}

/// Palette identifier for island blocks and coins.
/// The core only passes these through; the asset registry resolves them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BlockKind {
    Grass,
    Netherrack,
    SoulSand,
    EndStone,
    Obsidian,
    Diamond,
    Emerald,
    Gold,
    Purple,
    Lapis,
}

impl BlockKind {
    pub const ALL: [BlockKind; 10] = [
        BlockKind::Grass,
        BlockKind::Netherrack,
        BlockKind::SoulSand,
        BlockKind::EndStone,
        BlockKind::Obsidian,
        BlockKind::Diamond,
        BlockKind::Emerald,
        BlockKind::Gold,
        BlockKind::Purple,
        BlockKind::Lapis,
    ];

    /// String identifier used as the asset key
    pub fn id(self) -> &'static str {
        match self {
            BlockKind::Grass => "grass",
            BlockKind::Netherrack => "netherrack",
            BlockKind::SoulSand => "soul_sand",
            BlockKind::EndStone => "end_stone",
            BlockKind::Obsidian => "obsidian",
            BlockKind::Diamond => "diamond",
            BlockKind::Emerald => "emerald",
            BlockKind::Gold => "gold",
            BlockKind::Purple => "purple",
            BlockKind::Lapis => "lapis",
        }
    }
}

/// Visual and spawn parameters of a level
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LevelTheme {
    /// Block palette for every cluster in the level
    pub block: BlockKind,
    /// Coin palette
    pub coin: BlockKind,
    /// Player start position
    pub spawn: Vec3,
    /// Clear colour (RGBA)
    pub sky_color: [f32; 4],
    /// Colour of the far ground plane (RGBA)
    pub ground_color: [f32; 4],
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_round_trip() {
        for id in LevelId::ALL {
            assert_eq!(LevelId::from_index(id.index()).unwrap(), id);
        }
    }

    #[test]
    fn test_out_of_range_index_is_error() {
        assert!(matches!(LevelId::from_index(0), Err(LevelError::UnknownLevel(0))));
        assert!(matches!(LevelId::from_index(7), Err(LevelError::UnknownLevel(7))));
    }

    #[test]
    fn test_last_level_targets_game_complete() {
        assert_eq!(LevelId::Earth.next_index(), 2);
        assert_eq!(LevelId::End.next_index(), 4);
        assert_eq!(LevelId::Diamond.next_index(), GAME_COMPLETE);
    }
}
