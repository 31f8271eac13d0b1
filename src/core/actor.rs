//! Kinematics shared by the player and monsters.

use crate::core::grid::Grid;
use crate::settings::Settings;

/// Axis-separated slide collision. X is attempted against the original y,
/// then Y against the possibly-updated x; a diagonal into a corner slides
/// along the open axis instead of stopping dead.
pub fn slide_move(grid: &Grid, x: &mut f32, y: &mut f32, dx: f32, dy: f32) {
    let nx = *x + dx;
    if !grid.is_wall(nx, *y) {
        *x = nx;
    }
    let ny = *y + dy;
    if !grid.is_wall(*x, ny) {
        *y = ny;
    }
}

pub struct Player {
    pub x: f32,
    pub y: f32,
    /// Facing angle in radians.
    pub angle: f32,
    pub stamina: f32,
}

impl Player {
    pub fn new(start: (f32, f32), settings: &Settings) -> Self {
        Self {
            x: start.0,
            y: start.1,
            angle: 0.0,
            stamina: settings.stamina_max,
        }
    }

    pub fn move_by(&mut self, grid: &Grid, dx: f32, dy: f32) {
        slide_move(grid, &mut self.x, &mut self.y, dx, dy);
    }

    /// Per-tick stamina update; returns the movement speed for this tick.
    /// Stamina is clamped to [0, stamina_max] on every path.
    pub fn advance_stamina(&mut self, running: bool, dt: f32, settings: &Settings) -> f32 {
        let speed = if running && self.stamina > 0.0 {
            self.stamina -= settings.stamina_drain * dt;
            settings.run_speed
        } else {
            self.stamina += settings.stamina_regen * dt;
            settings.walk_speed
        };
        self.stamina = self.stamina.clamp(0.0, settings.stamina_max);
        speed
    }
}
