//! Space Venture - simulation core of a 2D side-scrolling platformer
//!
//! Core modules:
//! - `sim`: Per-frame simulation (physics, collisions, enemy AI, level content)
//! - `game`: Top-level screen state machine
//! - `session`: Cross-screen state (stats, character customization)
//! - `audio`: Sound cue triggers emitted by the simulation
//! - `settings`: Runtime preferences

pub mod audio;
pub mod game;
pub mod session;
pub mod settings;
pub mod sim;

pub use audio::{AudioManager, SoundCue};
pub use game::{Game, Hud, Screen, UiAction};
pub use session::Session;
pub use settings::{Resolution, Settings};

/// Game configuration constants
pub mod consts {
    /// Fixed frame timestep (60 Hz target frame rate)
    pub const FRAME_DT: f32 = 1.0 / 60.0;
    /// Tolerance for behavior timers; `FRAME_DT` summed in f32 falls a few
    /// ulps short of whole seconds
    pub const TIMER_SLACK: f32 = 1e-3;

    /// Downward acceleration added to vertical velocity every frame
    pub const GRAVITY: f32 = 0.5;
    /// Vertical velocity applied on jump (negative = up)
    pub const JUMP_FORCE: f32 = -12.0;
    /// Horizontal player speed while a direction is held
    pub const MOVE_SPEED: f32 = 5.0;

    /// Player spawn rectangle at every level (re)initialization
    pub const PLAYER_START_X: f32 = 100.0;
    pub const PLAYER_START_Y: f32 = 300.0;
    pub const PLAYER_WIDTH: f32 = 80.0;
    pub const PLAYER_HEIGHT: f32 = 120.0;

    pub const MAX_HEALTH: i32 = 100;
    pub const MAX_ENERGY: i32 = 100;

    /// Feet slice starts this far above the bottom edge...
    pub const FEET_OFFSET: f32 = 5.0;
    /// ...and is this tall
    pub const FEET_HEIGHT: f32 = 10.0;

    /// Damage and bounce from landing on a deadly platform
    pub const HAZARD_DAMAGE: i32 = 10;
    pub const HAZARD_BOUNCE: f32 = -8.0;

    /// Enemy body contact
    pub const CONTACT_DAMAGE: i32 = 5;
    pub const CONTACT_KNOCKBACK_X: f32 = 8.0;
    pub const CONTACT_KNOCKBACK_Y: f32 = -5.0;

    /// Projectile hitbox
    pub const PROJECTILE_WIDTH: f32 = 15.0;
    pub const PROJECTILE_HEIGHT: f32 = 8.0;

    /// Vertical travel of a vertically moving platform between reversals
    pub const VERTICAL_MOVER_RANGE: f32 = 100.0;

    /// Currency awarded on touching an exit portal
    pub const LEVEL_COMPLETION_BONUS: u32 = 500;

    /// Default viewport (camera clamp uses the width)
    pub const VIEWPORT_WIDTH: f32 = 1280.0;
    pub const VIEWPORT_HEIGHT: f32 = 720.0;
}
