//! Per-frame simulation step
//!
//! One call advances the world by one rendered frame: input, physics,
//! collision response, enemy AI, pickups, camera and compaction, in that
//! order. Transitions (exit reached, player defeated) are reported back to
//! the caller rather than applied here.

use super::collision::{first_enemy_hit, hits_any_platform, land_on, standing_on};
use super::state::{
    CollectibleKind, Enemy, Faction, Facing, Motion, PlatformKind, Player, Projectile, World,
};
use crate::audio::SoundCue;
use crate::consts::*;
use crate::session::Weapon;

/// Input state for a single frame
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Left held
    pub left: bool,
    /// Right held (wins over left)
    pub right: bool,
    /// Jump pressed this frame
    pub jump: bool,
    /// Fire pressed this frame
    pub fire: bool,
    /// Pause toggle pressed this frame
    pub pause: bool,
}

/// What happened during a step that the caller must act on
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StepOutcome {
    /// Sound cues in the order they were raised
    pub cues: Vec<SoundCue>,
    /// Target level of the exit portal touched this frame
    pub exit_reached: Option<u32>,
    /// Player health is at or below zero
    pub player_defeated: bool,
}

/// Advance the world by one frame
pub fn tick(world: &mut World, input: &TickInput, weapon: Weapon, dt: f32) -> StepOutcome {
    let mut out = StepOutcome::default();

    if input.pause {
        world.paused = !world.paused;
        log::debug!("Pause toggled: {}", world.paused);
    }
    if world.paused {
        return out;
    }

    move_player(&mut world.player, input, &mut out);
    resolve_platforms(world, &mut out);

    if input.fire {
        fire_player(world, weapon, &mut out);
    }

    let width = world.width;
    world.player.rect.clamp_x(0.0, width);

    update_enemies(world, dt, &mut out);
    update_projectiles(world, &mut out);
    collect_pickups(world, &mut out);
    check_exit(world, &mut out);
    follow_camera(world);

    out.player_defeated = world.player.is_defeated();

    world.compact();
    out
}

/// Instant horizontal velocity, gravity, jump, then integrate position
fn move_player(player: &mut Player, input: &TickInput, out: &mut StepOutcome) {
    if input.right {
        player.vel.x = MOVE_SPEED;
        player.facing = Facing::Right;
    } else if input.left {
        player.vel.x = -MOVE_SPEED;
        player.facing = Facing::Left;
    } else {
        player.vel.x = 0.0;
    }

    player.vel.y += GRAVITY;

    if input.jump && player.can_jump {
        player.vel.y = JUMP_FORCE;
        player.is_jumping = true;
        player.can_jump = false;
        out.cues.push(SoundCue::Jump);
    }

    player.rect.translate(player.vel);
}

/// Player landing, hazards, breakables, and moving platforms
fn resolve_platforms(world: &mut World, out: &mut StepOutcome) {
    let World {
        player,
        platforms,
        width,
        ..
    } = world;

    player.can_jump = false;

    for platform in platforms.iter_mut() {
        if land_on(&mut player.rect, &mut player.vel, &platform.rect) {
            player.is_jumping = false;
            player.can_jump = true;

            if platform.deadly {
                player.health -= HAZARD_DAMAGE;
                player.vel.y = HAZARD_BOUNCE;
                out.cues.push(SoundCue::Hit);
            }
            if platform.kind == PlatformKind::Breakable {
                platform.shatter();
            }
        }

        if platform.kind == PlatformKind::Moving {
            platform.advance(*width);

            // Ride horizontally only; vertical carry jitters
            if player.can_jump && standing_on(&player.rect, &platform.rect) {
                player.rect.x += platform.vel.x;
            }
        }
    }
}

fn fire_player(world: &mut World, weapon: Weapon, out: &mut StepOutcome) {
    let player = &world.player;
    let x = match player.facing {
        Facing::Right => player.rect.right(),
        Facing::Left => player.rect.x,
    };
    world.projectiles.push(Projectile::new(
        x,
        player.rect.center_y(),
        weapon.projectile_speed() * player.facing.sign(),
        Faction::Player,
        weapon.damage(),
    ));
    out.cues.push(SoundCue::Shoot);
}

/// Horizontal patrol that turns around at the level edges
fn patrol(enemy: &mut Enemy, width: f32) {
    enemy.rect.x += enemy.vel.x;
    if enemy.rect.x < 0.0 || enemy.rect.x > width - enemy.rect.w {
        enemy.vel.x = -enemy.vel.x;
        enemy.facing = enemy.facing.flipped();
    }
}

fn update_enemies(world: &mut World, dt: f32, out: &mut StepOutcome) {
    let World {
        player,
        platforms,
        enemies,
        projectiles,
        width,
        ..
    } = world;

    for enemy in enemies.iter_mut().filter(|e| e.active) {
        let profile = enemy.kind.profile();

        match profile.motion {
            Motion::Ground => {
                patrol(enemy, *width);
                enemy.vel.y += GRAVITY;
                enemy.rect.y += enemy.vel.y;
                for platform in platforms.iter() {
                    land_on(&mut enemy.rect, &mut enemy.vel, &platform.rect);
                }
                enemy.timer += dt;
            }
            Motion::Hover => {
                enemy.timer += dt;
                patrol(enemy, *width);
                enemy.rect.y += (enemy.timer * 2.0).sin() * 2.0;
            }
        }

        if enemy.timer + TIMER_SLACK >= profile.fire_interval {
            let (x, y) = enemy.muzzle();
            projectiles.push(Projectile::new(
                x,
                y,
                profile.projectile_speed * enemy.facing.sign(),
                Faction::Enemy,
                profile.projectile_damage,
            ));
            out.cues.push(SoundCue::Shoot);
            enemy.timer = 0.0;
        }

        // No cooldown: sustained overlap damages every frame
        if player.rect.intersects(&enemy.rect) {
            player.health -= CONTACT_DAMAGE;
            player.vel.x = if player.rect.x < enemy.rect.x {
                -CONTACT_KNOCKBACK_X
            } else {
                CONTACT_KNOCKBACK_X
            };
            player.vel.y = CONTACT_KNOCKBACK_Y;
            out.cues.push(SoundCue::Hit);
        }
    }
}

fn update_projectiles(world: &mut World, out: &mut StepOutcome) {
    let World {
        player,
        platforms,
        enemies,
        projectiles,
        width,
        ..
    } = world;

    for proj in projectiles.iter_mut().filter(|p| p.active) {
        proj.rect.translate(proj.vel);

        if proj.rect.x < 0.0 || proj.rect.x > *width {
            proj.active = false;
            continue;
        }
        if hits_any_platform(&proj.rect, platforms) {
            proj.active = false;
            continue;
        }

        match proj.faction {
            Faction::Enemy => {
                if proj.rect.intersects(&player.rect) {
                    player.health -= proj.damage;
                    proj.active = false;
                    out.cues.push(SoundCue::Hit);
                }
            }
            Faction::Player => {
                let Some(index) = first_enemy_hit(&proj.rect, enemies) else {
                    continue;
                };
                let enemy = &mut enemies[index];
                enemy.health -= proj.damage;
                proj.active = false;
                out.cues.push(SoundCue::Hit);

                if enemy.health <= 0 {
                    enemy.active = false;
                    player.score += enemy.kind.score_value();
                    player.currency += enemy.reward;
                    log::debug!(
                        "{:?} enemy defeated: +{} score, +{} currency",
                        enemy.kind,
                        enemy.kind.score_value(),
                        enemy.reward
                    );
                }
            }
        }
    }
}

fn collect_pickups(world: &mut World, out: &mut StepOutcome) {
    let World {
        player,
        collectibles,
        ..
    } = world;

    for item in collectibles.iter_mut().filter(|c| c.active) {
        if !player.rect.intersects(&item.rect) {
            continue;
        }
        match item.kind {
            CollectibleKind::Coin => player.currency += item.value,
            CollectibleKind::Health => player.heal(item.value),
            CollectibleKind::Powerup => player.score += item.value * 10,
        }
        item.active = false;
        out.cues.push(SoundCue::Coin);
    }
}

/// Exit contact fires once: the portal is disabled on the same frame
fn check_exit(world: &mut World, out: &mut StepOutcome) {
    if world.exit.active && world.player.rect.intersects(&world.exit.rect) {
        world.exit.active = false;
        out.exit_reached = Some(world.exit.target_level);
        out.cues.push(SoundCue::Portal);
        log::info!(
            "Exit reached on level {} -> {}",
            world.level,
            world.exit.target_level
        );
    }
}

fn follow_camera(world: &mut World) {
    let rect = &world.player.rect;
    let target = rect.x - world.viewport_width / 2.0 + rect.w / 2.0;
    world.camera_x = target.min(world.width - world.viewport_width).max(0.0);
}
