//! Whole-world properties of the simulation step

use proptest::prelude::*;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use space_venture::consts::{FRAME_DT, GRAVITY, PLAYER_WIDTH};
use space_venture::session::Weapon;
use space_venture::sim::{Faction, Projectile, TickInput, World, build_level, tick};

fn level(level: u32, seed: u64) -> World {
    let mut world = World::new();
    let mut rng = Pcg32::seed_from_u64(seed);
    build_level(&mut world, level, &mut rng);
    world
}

fn input_strategy() -> impl Strategy<Value = TickInput> {
    (any::<bool>(), any::<bool>(), any::<bool>(), any::<bool>()).prop_map(
        |(left, right, jump, fire)| TickInput {
            left,
            right,
            jump,
            fire,
            pause: false,
        },
    )
}

proptest! {
    #[test]
    fn free_fall_accelerates_by_gravity(v0 in -20i32..20, frames in 1usize..60) {
        let mut world = World::new();
        world.player.vel.y = v0 as f32;
        let start_y = world.player.rect.y;

        let mut expected_y = start_y;
        for n in 1..=frames {
            tick(&mut world, &TickInput::default(), Weapon::default(), FRAME_DT);
            let vy = v0 as f32 + GRAVITY * n as f32;
            expected_y += vy;
            prop_assert_eq!(world.player.vel.y, vy);
        }
        prop_assert_eq!(world.player.rect.y, expected_y);
    }

    #[test]
    fn player_and_camera_stay_in_bounds(
        lvl in 1u32..=3,
        seed in any::<u64>(),
        inputs in prop::collection::vec(input_strategy(), 1..240),
    ) {
        let mut world = level(lvl, seed);
        for input in &inputs {
            tick(&mut world, input, Weapon::PlasmaRifle, FRAME_DT);
            let x = world.player.rect.x;
            prop_assert!(x >= 0.0 && x <= world.width - PLAYER_WIDTH);

            let max_camera = (world.width - world.viewport_width).max(0.0);
            prop_assert!(world.camera_x >= 0.0 && world.camera_x <= max_camera);

            prop_assert!(world.projectiles.iter().all(|p| p.active));
            prop_assert!(world.collectibles.iter().all(|c| c.active));
        }
    }

    #[test]
    fn identical_runs_are_identical(
        seed in any::<u64>(),
        inputs in prop::collection::vec(input_strategy(), 1..120),
    ) {
        let mut a = level(2, seed);
        let mut b = level(2, seed);
        for input in &inputs {
            let out_a = tick(&mut a, input, Weapon::BlasterPistol, FRAME_DT);
            let out_b = tick(&mut b, input, Weapon::BlasterPistol, FRAME_DT);
            prop_assert_eq!(out_a, out_b);
        }
        prop_assert_eq!(
            serde_json::to_string(&a).unwrap(),
            serde_json::to_string(&b).unwrap()
        );
    }
}

#[test]
fn own_shots_never_hurt_their_faction() {
    let mut world = World::new();
    world.player.rect.y = 0.0;
    world.player.vel.y = -GRAVITY;
    let (px, py) = (world.player.rect.x, world.player.rect.y);

    // A player shot drifting through the player
    world
        .projectiles
        .push(Projectile::new(px + 10.0, py + 40.0, 0.0, Faction::Player, 5));
    tick(&mut world, &TickInput::default(), Weapon::default(), FRAME_DT);
    assert_eq!(world.player.health, 100);
    assert_eq!(world.projectiles.len(), 1);

    // The same shot from the enemy side lands
    world.projectiles.clear();
    world
        .projectiles
        .push(Projectile::new(px + 10.0, py + 40.0, 0.0, Faction::Enemy, 5));
    tick(&mut world, &TickInput::default(), Weapon::default(), FRAME_DT);
    assert_eq!(world.player.health, 95);
    assert!(world.projectiles.is_empty());
}
