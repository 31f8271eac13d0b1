//! Frame composition: ceiling and floor, walls, feature sprites, overlays,
//! and the compass HUD.

use raylib::prelude::*;

use crate::core::monster::MonsterColor;
use crate::core::session::{Session, TickReport};
use crate::render::framebuffer::Framebuffer;
use crate::render::line::draw_line;
use crate::render::raycaster::render_walls;
use crate::render::sprites::draw_sprite;
use crate::settings::Settings;

const CEIL_TOP: Color = Color::new(10, 12, 18, 255);
const CEIL_MID: Color = Color::new(20, 24, 32, 255);
const FLOOR_NEAR: Color = Color::new(56, 58, 62, 255);
const FLOOR_FAR: Color = Color::new(26, 28, 30, 255);

const EXIT_COLOR: Color = Color::new(0, 0, 0, 255);
const FAKE_EXIT_COLOR: Color = Color::new(40, 40, 40, 255);
const COMPASS_SPRITE_COLOR: Color = Color::new(70, 70, 70, 255);
const FAKE_EXIT_FLASH: Color = Color::new(120, 0, 120, 255);
const COMPASS_DIAL: Color = Color::new(60, 60, 60, 255);
const COMPASS_NEEDLE: Color = Color::new(255, 255, 0, 255);
const OVERLAY_ALPHA: u8 = 70;

pub fn monster_tint(color: MonsterColor) -> Color {
    match color {
        MonsterColor::Red => Color::new(255, 0, 0, 255),
        MonsterColor::Blue => Color::new(0, 0, 255, 255),
        MonsterColor::Green => Color::new(0, 255, 0, 255),
    }
}

#[inline]
fn lerp_color(a: Color, b: Color, t: f32) -> Color {
    let t = t.clamp(0.0, 1.0);
    let f = |x: u8, y: u8| -> u8 { ((x as f32) * (1.0 - t) + (y as f32) * t) as u8 };
    Color::new(f(a.r, b.r), f(a.g, b.g), f(a.b, b.b), 255)
}

fn paint_ceiling_and_floor(fb: &mut Framebuffer) {
    let w = fb.width;
    let h = fb.height;
    let hh = h / 2;
    for y in 0..hh {
        let t = y as f32 / hh as f32;
        fb.set_current_color(lerp_color(CEIL_TOP, CEIL_MID, t));
        for x in 0..w {
            fb.set_pixel(x, y);
        }
    }
    for y in hh..h {
        let t = (y - hh) as f32 / (h - hh) as f32;
        fb.set_current_color(lerp_color(FLOOR_FAR, FLOOR_NEAR, t));
        for x in 0..w {
            fb.set_pixel(x, y);
        }
    }
}

/// Composite one frame from the session state and this tick's report. Walls
/// fill the whole depth buffer before any sprite is tested against it;
/// feature order is fixed (exit, fake exits, compass, monsters).
pub fn draw_frame(
    fb: &mut Framebuffer,
    session: &Session,
    report: &TickReport,
    zbuffer: &mut [f32],
    settings: &Settings,
) {
    paint_ceiling_and_floor(fb);
    render_walls(fb, &session.grid, &session.player, zbuffer, settings);

    let (ex, ey) = session.grid.exit_center();
    draw_sprite(fb, &session.player, zbuffer, ex, ey, EXIT_COLOR, settings);
    for &(fx, fy) in session.grid.fake_exits() {
        draw_sprite(
            fb,
            &session.player,
            zbuffer,
            fx as f32 + 0.5,
            fy as f32 + 0.5,
            FAKE_EXIT_COLOR,
            settings,
        );
    }
    if let Some((cx, cy)) = session.grid.compass_sprite() {
        draw_sprite(fb, &session.player, zbuffer, cx, cy, COMPASS_SPRITE_COLOR, settings);
    }
    for monster in &session.monsters {
        draw_sprite(
            fb,
            &session.player,
            zbuffer,
            monster.x,
            monster.y,
            monster_tint(monster.color),
            settings,
        );
    }

    if let Some(color) = report.spotted_by {
        fb.apply_overlay(monster_tint(color), OVERLAY_ALPHA);
    }
    if let Some(angle) = report.compass_angle {
        draw_compass(fb, angle - session.player.angle);
    }
    if report.hit_fake_exit {
        fb.apply_overlay(FAKE_EXIT_FLASH, OVERLAY_ALPHA);
    }
}

/// Needle dial at the bottom center; `rel` is the exit bearing relative to
/// the player's facing.
fn draw_compass(fb: &mut Framebuffer, rel: f32) {
    let cx = fb.width as i32 / 2;
    let cy = fb.height as i32 - 40;
    fb.set_current_color(COMPASS_DIAL);
    fb.fill_circle(cx, cy, 22);

    let ax = cx + (rel.sin() * 14.0) as i32;
    let ay = cy - (rel.cos() * 14.0) as i32;
    for off in -1..=1 {
        draw_line(fb, cx + off, cy, ax + off, ay, COMPASS_NEEDLE);
    }
}
