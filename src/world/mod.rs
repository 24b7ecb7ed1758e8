//! World data
//!
//! Everything a level is made of: themed floating-island clusters with their
//! motion patterns, coins, the exit portal, and the procedural generator that
//! builds all of it from a random stream.

pub mod theme;
pub mod island;
pub mod coin;
pub mod portal;
pub mod level;
pub mod generator;

pub use theme::{LevelId, LevelTheme, BlockKind, GAME_COMPLETE};
pub use island::{FloatingIsland, IslandBlock, MotionPattern, CollisionBox, BoxOwner};
pub use coin::Coin;
pub use portal::Portal;
pub use level::{Level, LevelError};
pub use generator::{generate_all, generate_level};
