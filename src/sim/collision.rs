//! Collision detection and response for axis-aligned rectangles
//!
//! Ground contact uses only a thin feet slice at the bottom of a body, so
//! walking into the side of a platform never snaps a body on top of it.

use glam::Vec2;

use super::rect::Rect;
use super::state::{Enemy, Platform};

/// Resolve a falling body against a platform top
///
/// Only a body moving downward (`vel.y > 0`) whose feet overlap the
/// platform lands. On landing the body's bottom edge is snapped to the
/// platform's top edge and vertical velocity is zeroed. Returns whether
/// the body landed.
pub fn land_on(body: &mut Rect, vel: &mut Vec2, platform: &Rect) -> bool {
    if vel.y <= 0.0 || !body.feet().intersects(platform) {
        return false;
    }

    body.y = platform.y - body.h;
    vel.y = 0.0;
    true
}

/// Whether a body is currently standing on a platform (feet overlap)
#[inline]
pub fn standing_on(body: &Rect, platform: &Rect) -> bool {
    body.feet().intersects(platform)
}

/// Check a rectangle against every platform
pub fn hits_any_platform(rect: &Rect, platforms: &[Platform]) -> bool {
    platforms.iter().any(|p| rect.intersects(&p.rect))
}

/// Index of the first active enemy overlapping `rect`
pub fn first_enemy_hit(rect: &Rect, enemies: &[Enemy]) -> Option<usize> {
    enemies
        .iter()
        .position(|e| e.active && rect.intersects(&e.rect))
}
