//! Point-feature projection: flat-colored squares sized by distance,
//! occluded per screen column against the wall depth buffer.

use raylib::prelude::*;

use crate::core::actor::Player;
use crate::core::monster::normalize_angle;
use crate::render::framebuffer::Framebuffer;
use crate::settings::Settings;

/// Project one world-space feature. Drawn only when its (uncorrected)
/// distance is less than the wall depth recorded for its screen column;
/// walls must have filled the buffer already.
pub fn draw_sprite(
    fb: &mut Framebuffer,
    player: &Player,
    zbuffer: &[f32],
    world_x: f32,
    world_y: f32,
    color: Color,
    settings: &Settings,
) {
    let dx = world_x - player.x;
    let dy = world_y - player.y;
    let dist = dx.hypot(dy);
    if dist < settings.min_sprite_distance {
        return;
    }

    let diff = normalize_angle(dy.atan2(dx) - player.angle);
    if diff.abs() > settings.fov / 2.0 {
        return;
    }

    let width = fb.width as f32;
    let height = fb.height as f32;
    let screen_x = (diff + settings.fov / 2.0) / settings.fov * width;
    let size = height / (dist + 1e-4);

    let column = (screen_x / settings.ray_width() as f32) as usize;
    match zbuffer.get(column) {
        Some(&wall_depth) if dist < wall_depth => {}
        _ => return,
    }

    fb.set_current_color(color);
    fb.fill_rect(
        (screen_x - size / 2.0) as i32,
        ((height - size) / 2.0) as i32,
        size as i32,
        size as i32,
    );
}
