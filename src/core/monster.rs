//! Monster behavior: color-keyed freeze policies, line of sight, roam and
//! chase movement.

use rand::Rng;

use crate::core::actor::{Player, slide_move};
use crate::core::grid::Grid;
use crate::settings::Settings;

/// Normalize an angle to [-pi, pi].
#[inline]
pub fn normalize_angle(mut a: f32) -> f32 {
    while a > std::f32::consts::PI {
        a -= 2.0 * std::f32::consts::PI;
    }
    while a < -std::f32::consts::PI {
        a += 2.0 * std::f32::consts::PI;
    }
    a
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MonsterColor {
    Red,
    Blue,
    Green,
}

impl MonsterColor {
    /// Whether this variant skips its entire update for the tick. Blue stops
    /// while the player watches it; green only moves while watched; red never
    /// freezes.
    pub fn frozen(self, looking_at: bool) -> bool {
        match self {
            MonsterColor::Blue => looking_at,
            MonsterColor::Green => !looking_at,
            MonsterColor::Red => false,
        }
    }
}

pub struct Monster {
    pub x: f32,
    pub y: f32,
    pub angle: f32,
    pub color: MonsterColor,
    /// Current roam waypoint; None until the first roam decision.
    target: Option<(f32, f32)>,
}

impl Monster {
    pub fn new(x: f32, y: f32, color: MonsterColor) -> Self {
        Self {
            x,
            y,
            angle: 0.0,
            color,
            target: None,
        }
    }

    /// Range gate, then a fixed-step sample march along the sight line. The
    /// step is a precision/performance trade-off: a wall thinner than one
    /// step can be missed at grazing angles.
    pub fn can_see_player(&self, player: &Player, grid: &Grid, settings: &Settings) -> bool {
        let dx = player.x - self.x;
        let dy = player.y - self.y;
        let dist = dx.hypot(dy);
        if dist > settings.vision_range {
            return false;
        }
        let angle = dy.atan2(dx);
        let steps = (dist / settings.vision_step) as i32;
        for i in 0..steps {
            let sx = self.x + angle.cos() * settings.vision_step * i as f32;
            let sy = self.y + angle.sin() * settings.vision_step * i as f32;
            if grid.is_wall(sx, sy) {
                return false;
            }
        }
        true
    }

    pub fn caught_player(&self, player: &Player, settings: &Settings) -> bool {
        (self.x - player.x).hypot(self.y - player.y) < settings.capture_radius
    }

    /// One behavior tick: freeze policy, then chase or roam, then advance
    /// along the facing with the shared slide collision.
    pub fn update<R: Rng>(
        &mut self,
        player: &Player,
        grid: &Grid,
        looking_at: bool,
        rng: &mut R,
        dt: f32,
        settings: &Settings,
    ) {
        if self.color.frozen(looking_at) {
            return;
        }

        let dx = player.x - self.x;
        let dy = player.y - self.y;
        let dist_to_player = dx.hypot(dy);

        if self.can_see_player(player, grid, settings) && dist_to_player <= settings.chase_radius {
            self.angle = dy.atan2(dx);
        } else {
            let reached = match self.target {
                None => true,
                Some((tx, ty)) => (tx - self.x).hypot(ty - self.y) < settings.reach_threshold,
            };
            if reached {
                let free = grid.free_tile_centers();
                if !free.is_empty() {
                    self.target = Some(free[rng.gen_range(0..free.len())]);
                }
            }
            if let Some((tx, ty)) = self.target {
                self.angle = (ty - self.y).atan2(tx - self.x);
            }
        }

        let step_x = self.angle.cos() * settings.monster_speed * dt;
        let step_y = self.angle.sin() * settings.monster_speed * dt;
        slide_move(grid, &mut self.x, &mut self.y, step_x, step_y);
    }
}
