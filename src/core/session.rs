//! Per-tick orchestration: input, movement, monster updates, and the outcome
//! signals surfaced to the session owner.
//!
//! The tick is pure simulation over (input snapshot, delta time); the render
//! layer reads the session state plus the returned report afterwards, so the
//! whole loop is testable without a window.

use log::{debug, info};
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::core::actor::Player;
use crate::core::grid::Grid;
use crate::core::monster::{Monster, MonsterColor, normalize_angle};
use crate::settings::Settings;

/// One tick's worth of sampled input.
#[derive(Debug, Clone, Copy, Default)]
pub struct InputSnapshot {
    /// Accumulated pointer delta, already scaled to radians.
    pub turn: f32,
    pub forward: bool,
    pub backward: bool,
    pub strafe_left: bool,
    pub strafe_right: bool,
    pub run: bool,
    pub quit: bool,
}

/// Terminal signal for the surrounding menu/session collaborator. The core
/// only reports; navigation and process exit stay with the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Caught(MonsterColor),
    Won,
    Exited,
}

/// Everything the render layer needs from one tick besides the state itself.
#[derive(Debug, Clone, Copy, Default)]
pub struct TickReport {
    pub outcome: Option<Outcome>,
    /// Color of the last monster evaluated that currently sees the player.
    pub spotted_by: Option<MonsterColor>,
    /// The player stepped on a fake exit this tick and was sent back to
    /// spawn; the scene flashes an overlay for it.
    pub hit_fake_exit: bool,
    /// Relative-to-world bearing toward the real exit, once the compass is
    /// held.
    pub compass_angle: Option<f32>,
}

pub struct Session {
    pub grid: Grid,
    pub player: Player,
    pub monsters: Vec<Monster>,
    rng: StdRng,
}

impl Session {
    pub fn new(grid: Grid, settings: &Settings) -> Self {
        Self::with_seed(grid, settings, rand::random())
    }

    /// Seeded constructor; monster roaming is deterministic for a given seed.
    pub fn with_seed(grid: Grid, settings: &Settings, seed: u64) -> Self {
        let player = Player::new(grid.player_start(), settings);
        let monsters = grid
            .monster_starts()
            .iter()
            .map(|&(x, y, color)| Monster::new(x, y, color))
            .collect();
        Self {
            grid,
            player,
            monsters,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Advance the world by one tick. Caught is checked before won; the
    /// first terminal outcome ends the session.
    pub fn tick(&mut self, input: &InputSnapshot, dt: f32, settings: &Settings) -> TickReport {
        let mut report = TickReport::default();

        if input.quit {
            report.outcome = Some(Outcome::Exited);
            return report;
        }

        self.player.angle += input.turn;

        // Each held key is an independent slide, so opposite keys cancel and
        // adjacent keys compound on the diagonal.
        let speed = self.player.advance_stamina(input.run, dt, settings);
        let dx = self.player.angle.cos() * speed * dt;
        let dy = self.player.angle.sin() * speed * dt;
        if input.forward {
            self.player.move_by(&self.grid, dx, dy);
        }
        if input.backward {
            self.player.move_by(&self.grid, -dx, -dy);
        }
        if input.strafe_left {
            self.player.move_by(&self.grid, dy, -dx);
        }
        if input.strafe_right {
            self.player.move_by(&self.grid, -dy, dx);
        }

        for monster in &mut self.monsters {
            let looking = looking_at_monster(&self.player, monster, settings);
            monster.update(&self.player, &self.grid, looking, &mut self.rng, dt, settings);
        }

        // Overlay tint: the last monster with a clear view wins.
        for monster in &self.monsters {
            if monster.can_see_player(&self.player, &self.grid, settings) {
                report.spotted_by = Some(monster.color);
            }
        }

        self.grid
            .check_compass_pickup(self.player.x, self.player.y, settings.pickup_radius);
        report.compass_angle = self.grid.compass_angle(self.player.x, self.player.y);

        if self.grid.reached_fake_exit(self.player.x, self.player.y) {
            report.hit_fake_exit = true;
            let (sx, sy) = self.grid.player_start();
            debug!("fake exit hit at ({:.1}, {:.1}), back to spawn", self.player.x, self.player.y);
            self.player.x = sx;
            self.player.y = sy;
        }

        if let Some(monster) = self
            .monsters
            .iter()
            .find(|m| m.caught_player(&self.player, settings))
        {
            info!("player caught by the {:?} monster", monster.color);
            report.outcome = Some(Outcome::Caught(monster.color));
        } else if self.grid.reached_real_exit(self.player.x, self.player.y) {
            info!("player reached the exit");
            report.outcome = Some(Outcome::Won);
        }

        report
    }
}

/// True when the player's view is roughly centered on the monster: the
/// angular difference between facing and the player-to-monster bearing stays
/// under a sixth of the field of view.
fn looking_at_monster(player: &Player, monster: &Monster, settings: &Settings) -> bool {
    let bearing = (monster.y - player.y).atan2(monster.x - player.x);
    normalize_angle(bearing - player.angle).abs() < settings.fov / 6.0
}
