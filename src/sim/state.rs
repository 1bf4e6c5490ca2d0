//! Entity model and per-level world state
//!
//! Everything the simulation step mutates lives in [`World`]. Renderers and
//! the audio layer only ever read it.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::rect::Rect;
use crate::consts::*;

/// Horizontal facing direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Facing {
    Left,
    #[default]
    Right,
}

impl Facing {
    /// +1.0 for right, -1.0 for left
    #[inline]
    pub fn sign(self) -> f32 {
        match self {
            Facing::Left => -1.0,
            Facing::Right => 1.0,
        }
    }

    pub fn flipped(self) -> Self {
        match self {
            Facing::Left => Facing::Right,
            Facing::Right => Facing::Left,
        }
    }
}

/// Presentation-only attributes copied from the character customization
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Cosmetics {
    pub suit: usize,
    pub hairstyle: usize,
    pub beard_style: usize,
    /// RGBA
    pub skin_color: [u8; 4],
    /// RGBA
    pub hair_color: [u8; 4],
    pub helmet: bool,
}

/// The player character
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub rect: Rect,
    pub vel: Vec2,
    pub is_jumping: bool,
    pub can_jump: bool,
    pub facing: Facing,
    /// May dip to zero or below on the frame damage lands
    pub health: i32,
    pub max_health: i32,
    pub energy: i32,
    pub score: u32,
    pub currency: u32,
    pub cosmetics: Cosmetics,
}

impl Default for Player {
    fn default() -> Self {
        Self {
            rect: Rect::new(PLAYER_START_X, PLAYER_START_Y, PLAYER_WIDTH, PLAYER_HEIGHT),
            vel: Vec2::ZERO,
            is_jumping: false,
            can_jump: false,
            facing: Facing::Right,
            health: MAX_HEALTH,
            max_health: MAX_HEALTH,
            energy: MAX_ENERGY,
            score: 0,
            currency: 0,
            cosmetics: Cosmetics::default(),
        }
    }
}

impl Player {
    /// Put the player back at the level spawn point. Stats are untouched.
    pub fn reset_position(&mut self) {
        self.rect = Rect::new(PLAYER_START_X, PLAYER_START_Y, PLAYER_WIDTH, PLAYER_HEIGHT);
        self.vel = Vec2::ZERO;
        self.is_jumping = false;
        self.can_jump = false;
        self.facing = Facing::Right;
    }

    pub fn heal(&mut self, amount: u32) {
        self.health = self.health.saturating_add_unsigned(amount).min(self.max_health);
    }

    pub fn is_defeated(&self) -> bool {
        self.health <= 0
    }
}

/// How an enemy kind moves vertically
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Motion {
    /// Gravity plus platform landing
    Ground,
    /// No gravity or platform collision; sinusoidal bob
    Hover,
}

/// Per-kind enemy behavior table
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnemyProfile {
    pub width: f32,
    pub height: f32,
    pub speed: f32,
    pub health: i32,
    pub reward: u32,
    pub motion: Motion,
    /// Seconds between ranged attacks
    pub fire_interval: f32,
    pub projectile_speed: f32,
    pub projectile_damage: i32,
}

/// Enemy types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EnemyKind {
    Basic,
    Flying,
    Heavy,
}

impl EnemyKind {
    /// Type index (0, 1, 2) used by the score formula
    pub fn index(self) -> u32 {
        match self {
            EnemyKind::Basic => 0,
            EnemyKind::Flying => 1,
            EnemyKind::Heavy => 2,
        }
    }

    pub fn profile(self) -> EnemyProfile {
        match self {
            EnemyKind::Basic => EnemyProfile {
                width: 60.0,
                height: 80.0,
                speed: 2.0,
                health: 3,
                reward: 10,
                motion: Motion::Ground,
                fire_interval: 3.0,
                projectile_speed: 8.0,
                projectile_damage: 1,
            },
            EnemyKind::Flying => EnemyProfile {
                width: 70.0,
                height: 60.0,
                speed: 3.0,
                health: 2,
                reward: 15,
                motion: Motion::Hover,
                fire_interval: 2.0,
                projectile_speed: 8.0,
                projectile_damage: 1,
            },
            EnemyKind::Heavy => EnemyProfile {
                width: 80.0,
                height: 100.0,
                speed: 1.0,
                health: 5,
                reward: 25,
                motion: Motion::Ground,
                fire_interval: 4.0,
                projectile_speed: 6.0,
                projectile_damage: 2,
            },
        }
    }

    /// Score awarded on defeat
    pub fn score_value(self) -> u32 {
        100 * (self.index() + 1)
    }
}

/// An enemy entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub rect: Rect,
    pub vel: Vec2,
    pub active: bool,
    pub facing: Facing,
    pub health: i32,
    pub kind: EnemyKind,
    /// Seconds since the last ranged attack
    pub timer: f32,
    pub reward: u32,
}

impl Enemy {
    pub fn spawn(x: f32, y: f32, kind: EnemyKind, facing: Facing) -> Self {
        let profile = kind.profile();
        Self {
            rect: Rect::new(x, y, profile.width, profile.height),
            vel: Vec2::new(profile.speed * facing.sign(), 0.0),
            active: true,
            facing,
            health: profile.health,
            kind,
            timer: 0.0,
            reward: profile.reward,
        }
    }

    /// Spawn point for a projectile at the leading edge, vertically centered
    pub fn muzzle(&self) -> (f32, f32) {
        let x = match self.facing {
            Facing::Right => self.rect.right(),
            Facing::Left => self.rect.x,
        };
        (x, self.rect.center_y())
    }
}

/// Platform types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PlatformKind {
    #[default]
    Static,
    Moving,
    Breakable,
}

/// A platform entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Platform {
    pub rect: Rect,
    /// Spikes: damage and bounce on landing
    pub deadly: bool,
    pub kind: PlatformKind,
    /// Nonzero only for moving platforms
    pub vel: Vec2,
    /// y at the last vertical reversal (vertical movers only)
    pub anchor_y: f32,
}

impl Platform {
    pub fn solid(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            rect: Rect::new(x, y, w, h),
            deadly: false,
            kind: PlatformKind::Static,
            vel: Vec2::ZERO,
            anchor_y: y,
        }
    }

    pub fn hazard(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            deadly: true,
            ..Self::solid(x, y, w, h)
        }
    }

    pub fn moving(x: f32, y: f32, w: f32, h: f32, vel: Vec2) -> Self {
        Self {
            kind: PlatformKind::Moving,
            vel,
            ..Self::solid(x, y, w, h)
        }
    }

    pub fn breakable(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            kind: PlatformKind::Breakable,
            ..Self::solid(x, y, w, h)
        }
    }

    /// Move a breakable platform out of the playable area. It stays in the
    /// collection so indices remain stable for the rest of the level.
    pub fn shatter(&mut self) {
        self.rect.x = -(self.rect.w + 100.0);
    }

    /// Advance a moving platform one frame and bounce it off its limits
    pub fn advance(&mut self, level_width: f32) {
        if self.kind != PlatformKind::Moving {
            return;
        }
        self.rect.translate(self.vel);

        if self.vel.x != 0.0 && (self.rect.x < 0.0 || self.rect.x > level_width - self.rect.w) {
            self.vel.x = -self.vel.x;
        }

        if self.vel.y != 0.0 && (self.rect.y - self.anchor_y).abs() >= VERTICAL_MOVER_RANGE {
            self.vel.y = -self.vel.y;
            self.anchor_y = self.rect.y;
        }
    }
}

/// Which side fired a projectile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Faction {
    Player,
    Enemy,
}

/// A projectile entity (horizontal travel only)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projectile {
    pub rect: Rect,
    pub vel: Vec2,
    pub active: bool,
    pub faction: Faction,
    pub damage: i32,
}

impl Projectile {
    pub fn new(x: f32, y: f32, vel_x: f32, faction: Faction, damage: i32) -> Self {
        Self {
            rect: Rect::new(x, y, PROJECTILE_WIDTH, PROJECTILE_HEIGHT),
            vel: Vec2::new(vel_x, 0.0),
            active: true,
            faction,
            damage,
        }
    }
}

/// Collectible types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CollectibleKind {
    Coin,
    Health,
    Powerup,
}

impl CollectibleKind {
    /// Hitbox edge length (collectibles are square)
    pub fn size(self) -> f32 {
        match self {
            CollectibleKind::Coin => 30.0,
            CollectibleKind::Health | CollectibleKind::Powerup => 40.0,
        }
    }

    pub fn value(self) -> u32 {
        match self {
            CollectibleKind::Coin => 5,
            CollectibleKind::Health => 20,
            CollectibleKind::Powerup => 10,
        }
    }
}

/// A collectible entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Collectible {
    pub rect: Rect,
    pub active: bool,
    pub value: u32,
    pub kind: CollectibleKind,
}

impl Collectible {
    pub fn spawn(x: f32, y: f32, kind: CollectibleKind) -> Self {
        let size = kind.size();
        Self {
            rect: Rect::new(x, y, size, size),
            active: true,
            value: kind.value(),
            kind,
        }
    }
}

/// The level exit portal
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LevelExit {
    pub rect: Rect,
    pub active: bool,
    pub target_level: u32,
}

/// Complete per-run world state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct World {
    /// Current level index (1-based)
    pub level: u32,
    /// Playable horizontal extent
    pub width: f32,
    /// Horizontal camera offset
    pub camera_x: f32,
    /// Viewport width the camera clamps against
    pub viewport_width: f32,
    /// Simulation frozen while set
    pub paused: bool,
    pub player: Player,
    pub platforms: Vec<Platform>,
    pub enemies: Vec<Enemy>,
    pub projectiles: Vec<Projectile>,
    pub collectibles: Vec<Collectible>,
    pub exit: LevelExit,
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

impl World {
    /// Empty world with a fresh player; populate it with `build_level`
    pub fn new() -> Self {
        Self {
            level: 1,
            width: 4000.0,
            camera_x: 0.0,
            viewport_width: VIEWPORT_WIDTH,
            paused: false,
            player: Player::default(),
            platforms: Vec::new(),
            enemies: Vec::new(),
            projectiles: Vec::new(),
            collectibles: Vec::new(),
            exit: LevelExit::default(),
        }
    }

    /// Drop every level entity
    pub fn clear_entities(&mut self) {
        self.platforms.clear();
        self.enemies.clear();
        self.projectiles.clear();
        self.collectibles.clear();
        self.exit = LevelExit::default();
    }

    /// Remove spent projectiles and picked-up collectibles
    pub fn compact(&mut self) {
        self.projectiles.retain(|p| p.active);
        self.collectibles.retain(|c| c.active);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enemy_spawn_uses_profile() {
        let enemy = Enemy::spawn(500.0, 600.0, EnemyKind::Heavy, Facing::Left);
        assert_eq!(enemy.rect, Rect::new(500.0, 600.0, 80.0, 100.0));
        assert_eq!(enemy.vel, Vec2::new(-1.0, 0.0));
        assert_eq!(enemy.health, 5);
        assert_eq!(enemy.reward, 25);
        assert!(enemy.active);
    }

    #[test]
    fn test_score_values() {
        assert_eq!(EnemyKind::Basic.score_value(), 100);
        assert_eq!(EnemyKind::Flying.score_value(), 200);
        assert_eq!(EnemyKind::Heavy.score_value(), 300);
    }

    #[test]
    fn test_heavy_trades_speed_for_damage() {
        let basic = EnemyKind::Basic.profile();
        let heavy = EnemyKind::Heavy.profile();
        assert!(heavy.speed < basic.speed);
        assert!(heavy.health > basic.health);
        assert!(heavy.projectile_speed < basic.projectile_speed);
        assert!(heavy.projectile_damage > basic.projectile_damage);
    }

    #[test]
    fn test_heal_caps_at_max() {
        let mut player = Player::default();
        player.health = 90;
        player.heal(20);
        assert_eq!(player.health, MAX_HEALTH);

        player.health = -5;
        player.heal(u32::MAX);
        assert_eq!(player.health, MAX_HEALTH);
    }

    #[test]
    fn test_vertical_mover_reverses_after_range() {
        let mut platform = Platform::moving(1350.0, 200.0, 60.0, 20.0, Vec2::new(0.0, 2.0));
        // 50 frames at 2px reaches the 100px range exactly
        for _ in 0..50 {
            platform.advance(2500.0);
        }
        assert_eq!(platform.rect.y, 300.0);
        assert_eq!(platform.vel.y, -2.0);
        assert_eq!(platform.anchor_y, 300.0);

        for _ in 0..50 {
            platform.advance(2500.0);
        }
        assert_eq!(platform.rect.y, 200.0);
        assert_eq!(platform.vel.y, 2.0);
    }

    #[test]
    fn test_horizontal_mover_bounces_at_level_edge() {
        let mut platform = Platform::moving(1345.0, 450.0, 150.0, 30.0, Vec2::new(1.0, 0.0));
        for _ in 0..10 {
            platform.advance(1500.0);
        }
        assert!(platform.vel.x < 0.0);
    }

    #[test]
    fn test_shatter_moves_platform_out_of_level() {
        let mut platform = Platform::breakable(1600.0, 550.0, 120.0, 30.0);
        platform.shatter();
        assert!(platform.rect.right() < 0.0);
    }

    #[test]
    fn test_compact_keeps_only_active() {
        let mut world = World::new();
        world
            .projectiles
            .push(Projectile::new(0.0, 0.0, 1.0, Faction::Player, 1));
        let mut spent = Projectile::new(10.0, 0.0, 1.0, Faction::Enemy, 1);
        spent.active = false;
        world.projectiles.push(spent);
        let mut taken = Collectible::spawn(0.0, 0.0, CollectibleKind::Coin);
        taken.active = false;
        world.collectibles.push(taken);

        world.compact();
        assert_eq!(world.projectiles.len(), 1);
        assert!(world.collectibles.is_empty());
    }
}
