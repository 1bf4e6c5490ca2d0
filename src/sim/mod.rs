//! Simulation module
//!
//! All gameplay logic lives here:
//! - One `tick` per rendered frame, fixed order of phases
//! - Randomness only through a caller-supplied RNG
//! - Stable iteration order (platforms and enemies are never removed mid-level)
//! - No rendering or audio playback

pub mod collision;
pub mod level;
pub mod rect;
pub mod state;
pub mod tick;

pub use collision::land_on;
pub use level::{MAX_LEVEL, build_level, is_playable, level_width};
pub use rect::Rect;
pub use state::{
    Collectible, CollectibleKind, Cosmetics, Enemy, EnemyKind, EnemyProfile, Faction, Facing,
    LevelExit, Motion, Platform, PlatformKind, Player, Projectile, World,
};
pub use tick::{StepOutcome, TickInput, tick};
