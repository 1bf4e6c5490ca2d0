//! Level content
//!
//! Levels are compiled-in layouts. The only randomness is enemy starting
//! facing and the scattered coins of level 3, both drawn from the RNG the
//! caller passes in.

use glam::Vec2;
use rand::Rng;

use super::rect::Rect;
use super::state::{
    Collectible, CollectibleKind, Enemy, EnemyKind, Facing, LevelExit, Platform, World,
};

/// Highest level index; an exit targeting anything above it ends the run
pub const MAX_LEVEL: u32 = 3;

/// Ground strip: this many tiles of 100x30 at y = 650
const GROUND_TILES: u32 = 40;
const GROUND_Y: f32 = 650.0;
const GROUND_TILE_W: f32 = 100.0;
const GROUND_TILE_H: f32 = 30.0;

/// Level 3 scatters this many coins over the playable area
const SCATTERED_COINS: usize = 20;

const EXIT_W: f32 = 60.0;
const EXIT_H: f32 = 100.0;

/// Playable width of a level
pub fn level_width(level: u32) -> f32 {
    match level {
        1 => 1500.0,
        2 => 2500.0,
        _ => 4000.0,
    }
}

/// Whether `level` names an authored level
pub fn is_playable(level: u32) -> bool {
    (1..=MAX_LEVEL).contains(&level)
}

/// Repopulate `world` with the content of `level`
///
/// All entity collections and the exit are cleared first, the level width
/// is set, and the camera returns to the origin. The player is not touched.
pub fn build_level(world: &mut World, level: u32, rng: &mut impl Rng) {
    world.clear_entities();

    for i in 0..GROUND_TILES {
        world.platforms.push(Platform::solid(
            i as f32 * GROUND_TILE_W,
            GROUND_Y,
            GROUND_TILE_W,
            GROUND_TILE_H,
        ));
    }

    match level {
        1 => build_level_1(world, rng),
        2 => build_level_2(world, rng),
        3 => build_level_3(world, rng),
        other => log::warn!("No layout for level {}, building bare ground", other),
    }

    world.level = level;
    world.width = level_width(level);
    world.camera_x = 0.0;

    log::info!(
        "Level {}: width={}, platforms={}, enemies={}, collectibles={}",
        level,
        world.width,
        world.platforms.len(),
        world.enemies.len(),
        world.collectibles.len()
    );
}

fn spawn_enemy(world: &mut World, x: f32, y: f32, kind: EnemyKind, rng: &mut impl Rng) {
    let facing = if rng.random_bool(0.5) {
        Facing::Right
    } else {
        Facing::Left
    };
    world.enemies.push(Enemy::spawn(x, y, kind, facing));
}

fn spawn_collectible(world: &mut World, x: f32, y: f32, kind: CollectibleKind) {
    world.collectibles.push(Collectible::spawn(x, y, kind));
}

fn place_exit(world: &mut World, x: f32, target_level: u32) {
    world.exit = LevelExit {
        rect: Rect::new(x, 550.0, EXIT_W, EXIT_H),
        active: true,
        target_level,
    };
}

/// The three ledges every level starts with
fn opening_ledges(world: &mut World) {
    world.platforms.push(Platform::solid(300.0, 500.0, 200.0, 30.0));
    world.platforms.push(Platform::solid(600.0, 400.0, 150.0, 30.0));
    world.platforms.push(Platform::solid(900.0, 350.0, 200.0, 30.0));
}

fn build_level_1(world: &mut World, rng: &mut impl Rng) {
    use CollectibleKind::Coin;

    opening_ledges(world);

    // Jumping challenge
    world.platforms.push(Platform::solid(400.0, 300.0, 80.0, 20.0));
    world.platforms.push(Platform::solid(520.0, 250.0, 60.0, 20.0));
    world.platforms.push(Platform::solid(650.0, 220.0, 50.0, 20.0));

    world.platforms.push(Platform::hazard(800.0, 630.0, 100.0, 20.0));

    spawn_enemy(world, 500.0, 600.0, EnemyKind::Basic, rng);
    spawn_enemy(world, 950.0, 300.0, EnemyKind::Basic, rng);

    for (x, y) in [
        (350.0, 450.0),
        (650.0, 350.0),
        (950.0, 300.0),
        (400.0, 270.0),
        (520.0, 220.0),
        (650.0, 190.0),
    ] {
        spawn_collectible(world, x, y, Coin);
    }

    place_exit(world, 1200.0, 2);
}

fn build_level_2(world: &mut World, rng: &mut impl Rng) {
    use CollectibleKind::{Coin, Health};

    opening_ledges(world);
    world
        .platforms
        .push(Platform::moving(1300.0, 450.0, 150.0, 30.0, Vec2::new(1.0, 0.0)));
    world.platforms.push(Platform::breakable(1600.0, 550.0, 120.0, 30.0));
    world.platforms.push(Platform::breakable(1900.0, 500.0, 120.0, 30.0));

    world.platforms.push(Platform::solid(1100.0, 300.0, 80.0, 20.0));
    world.platforms.push(Platform::solid(1200.0, 250.0, 80.0, 20.0));
    world
        .platforms
        .push(Platform::moving(1350.0, 200.0, 60.0, 20.0, Vec2::new(0.0, 1.5)));

    for x in [800.0, 1400.0, 1700.0] {
        world.platforms.push(Platform::hazard(x, 630.0, 100.0, 20.0));
    }

    spawn_enemy(world, 500.0, 600.0, EnemyKind::Basic, rng);
    spawn_enemy(world, 700.0, 350.0, EnemyKind::Flying, rng);
    spawn_enemy(world, 950.0, 300.0, EnemyKind::Basic, rng);
    spawn_enemy(world, 1500.0, 400.0, EnemyKind::Basic, rng);
    spawn_enemy(world, 1800.0, 450.0, EnemyKind::Flying, rng);

    for (x, y) in [
        (350.0, 450.0),
        (650.0, 350.0),
        (950.0, 300.0),
        (1350.0, 400.0),
        (1700.0, 500.0),
        (1950.0, 450.0),
        (1100.0, 270.0),
        (1200.0, 220.0),
        (1350.0, 170.0),
    ] {
        spawn_collectible(world, x, y, Coin);
    }
    spawn_collectible(world, 1200.0, 600.0, Health);

    place_exit(world, 2200.0, 3);
}

fn build_level_3(world: &mut World, rng: &mut impl Rng) {
    use CollectibleKind::{Coin, Health, Powerup};

    opening_ledges(world);
    world
        .platforms
        .push(Platform::moving(1300.0, 450.0, 150.0, 30.0, Vec2::new(1.0, 0.0)));
    world.platforms.push(Platform::breakable(1600.0, 550.0, 120.0, 30.0));
    world.platforms.push(Platform::breakable(1900.0, 500.0, 120.0, 30.0));
    world.platforms.push(Platform::solid(2200.0, 600.0, 100.0, 30.0));
    world
        .platforms
        .push(Platform::moving(2500.0, 550.0, 150.0, 30.0, Vec2::new(1.2, 0.0)));
    world.platforms.push(Platform::solid(2800.0, 450.0, 200.0, 30.0));
    world
        .platforms
        .push(Platform::moving(3200.0, 400.0, 150.0, 30.0, Vec2::new(1.5, 0.0)));

    // Stairway up
    world.platforms.push(Platform::solid(2900.0, 350.0, 60.0, 20.0));
    world.platforms.push(Platform::solid(3000.0, 300.0, 60.0, 20.0));
    world.platforms.push(Platform::solid(3100.0, 250.0, 60.0, 20.0));

    world
        .platforms
        .push(Platform::moving(2600.0, 300.0, 80.0, 20.0, Vec2::new(0.0, 2.0)));
    world
        .platforms
        .push(Platform::moving(2800.0, 250.0, 60.0, 20.0, Vec2::new(1.8, 0.0)));

    // Breakable sequence
    world.platforms.push(Platform::breakable(1750.0, 450.0, 60.0, 20.0));
    world.platforms.push(Platform::breakable(1850.0, 400.0, 60.0, 20.0));
    world.platforms.push(Platform::breakable(1950.0, 350.0, 60.0, 20.0));

    for x in [800.0, 1400.0, 2000.0, 2600.0, 3000.0] {
        world.platforms.push(Platform::hazard(x, 630.0, 100.0, 20.0));
    }

    spawn_enemy(world, 500.0, 600.0, EnemyKind::Basic, rng);
    spawn_enemy(world, 700.0, 350.0, EnemyKind::Flying, rng);
    spawn_enemy(world, 1100.0, 600.0, EnemyKind::Heavy, rng);
    spawn_enemy(world, 1500.0, 400.0, EnemyKind::Basic, rng);
    spawn_enemy(world, 1900.0, 450.0, EnemyKind::Flying, rng);
    spawn_enemy(world, 2400.0, 500.0, EnemyKind::Heavy, rng);
    spawn_enemy(world, 2900.0, 400.0, EnemyKind::Flying, rng);
    spawn_enemy(world, 3300.0, 350.0, EnemyKind::Heavy, rng);

    // Unseeded in the shipped game: positions differ run to run
    for _ in 0..SCATTERED_COINS {
        let x = rng.random_range(300..=3500) as f32;
        let y = rng.random_range(200..=500) as f32;
        spawn_collectible(world, x, y, Coin);
    }

    for (x, y) in [
        (2900.0, 320.0),
        (3000.0, 270.0),
        (3100.0, 220.0),
        (2600.0, 270.0),
        (2800.0, 220.0),
        (1750.0, 420.0),
        (1850.0, 370.0),
        (1950.0, 320.0),
    ] {
        spawn_collectible(world, x, y, Coin);
    }

    spawn_collectible(world, 1200.0, 600.0, Health);
    spawn_collectible(world, 2300.0, 550.0, Health);
    spawn_collectible(world, 1700.0, 500.0, Powerup);
    spawn_collectible(world, 3000.0, 400.0, Powerup);

    // Final level: target beyond MAX_LEVEL ends the run
    place_exit(world, 3500.0, MAX_LEVEL + 1);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{Faction, PlatformKind, Projectile};
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn built(level: u32, seed: u64) -> World {
        let mut world = World::new();
        let mut rng = Pcg32::seed_from_u64(seed);
        build_level(&mut world, level, &mut rng);
        world
    }

    #[test]
    fn test_level_1_layout() {
        let world = built(1, 1);
        assert_eq!(world.width, 1500.0);
        assert_eq!(world.platforms.len(), 47);
        assert_eq!(world.enemies.len(), 2);
        assert_eq!(world.collectibles.len(), 6);
        assert!(world.exit.active);
        assert_eq!(world.exit.target_level, 2);
        assert_eq!(world.platforms.iter().filter(|p| p.deadly).count(), 1);
    }

    #[test]
    fn test_level_2_layout() {
        let world = built(2, 1);
        assert_eq!(world.width, 2500.0);
        assert_eq!(world.platforms.len(), 40 + 12);
        assert_eq!(world.enemies.len(), 5);
        assert_eq!(world.collectibles.len(), 10);
        let movers = world
            .platforms
            .iter()
            .filter(|p| p.kind == PlatformKind::Moving)
            .count();
        assert_eq!(movers, 2);
        assert_eq!(world.exit.target_level, 3);
    }

    #[test]
    fn test_level_3_layout() {
        let world = built(3, 1);
        assert_eq!(world.width, 4000.0);
        assert_eq!(world.platforms.len(), 40 + 23);
        assert_eq!(world.enemies.len(), 8);
        assert_eq!(world.collectibles.len(), 20 + 8 + 4);
        assert!(world.exit.target_level > MAX_LEVEL);
    }

    #[test]
    fn test_ground_strip_spans_level() {
        let world = built(1, 1);
        let ground: Vec<_> = world.platforms.iter().take(40).collect();
        assert!(ground.iter().all(|p| p.rect.y == 650.0 && !p.deadly));
        assert_eq!(ground.last().map(|p| p.rect.right()), Some(4000.0));
    }

    #[test]
    fn test_rebuild_discards_previous_level() {
        let mut world = built(3, 7);
        world
            .projectiles
            .push(Projectile::new(10.0, 10.0, 5.0, Faction::Player, 1));
        world.camera_x = 900.0;

        let mut rng = Pcg32::seed_from_u64(7);
        build_level(&mut world, 1, &mut rng);
        assert!(world.projectiles.is_empty());
        assert_eq!(world.enemies.len(), 2);
        assert_eq!(world.camera_x, 0.0);
        assert_eq!(world.level, 1);
    }

    #[test]
    fn test_scattered_coins_stay_in_range() {
        let world = built(3, 42);
        for coin in world.collectibles.iter().take(20) {
            assert_eq!(coin.kind, CollectibleKind::Coin);
            assert!((300.0..=3500.0).contains(&coin.rect.x));
            assert!((200.0..=500.0).contains(&coin.rect.y));
        }
    }

    #[test]
    fn test_same_seed_same_level() {
        let a = built(3, 99);
        let b = built(3, 99);
        let pos = |w: &World| -> Vec<(f32, f32)> {
            w.collectibles.iter().map(|c| (c.rect.x, c.rect.y)).collect()
        };
        assert_eq!(pos(&a), pos(&b));
    }

    #[test]
    fn test_unknown_level_is_bare_ground() {
        let world = built(9, 1);
        assert_eq!(world.platforms.len(), 40);
        assert!(world.enemies.is_empty());
        assert!(!world.exit.active);
    }
}
