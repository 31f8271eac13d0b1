//! Tunable constants for the simulation and renderer.
//!
//! Owned by the binary and injected into the core; nothing in here is a
//! process-wide global. `settings.json` next to the executable overrides the
//! defaults field by field.

use log::warn;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub screen_width: u32,
    pub screen_height: u32,
    /// Horizontal field of view in radians.
    pub fov: f32,
    /// Rays per frame; one screen column of `ray_width()` pixels each.
    pub num_rays: u32,
    /// March increment for wall rays, in grid units.
    pub ray_step: f32,
    /// Maximum march distance before a ray gives up, in grid units.
    pub max_depth: f32,
    /// Features closer than this are not projected (degenerate sprites).
    pub min_sprite_distance: f32,
    pub mouse_sensitivity: f32,
    pub walk_speed: f32,
    pub run_speed: f32,
    pub stamina_max: f32,
    pub stamina_drain: f32,
    pub stamina_regen: f32,
    pub monster_speed: f32,
    pub vision_range: f32,
    /// Sample spacing for the monster line-of-sight march, in grid units.
    /// Walls thinner than one step can be missed at grazing angles.
    pub vision_step: f32,
    pub chase_radius: f32,
    pub capture_radius: f32,
    pub pickup_radius: f32,
    /// How close a monster must get to its roam target before re-picking.
    pub reach_threshold: f32,
    pub tick_rate: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            screen_width: 1200,
            screen_height: 800,
            fov: std::f32::consts::FRAC_PI_3,
            num_rays: 300,
            ray_step: 0.01,
            max_depth: 20.0,
            min_sprite_distance: 0.3,
            mouse_sensitivity: 0.002,
            walk_speed: 1.8,
            run_speed: 3.2,
            stamina_max: 100.0,
            stamina_drain: 25.0,
            stamina_regen: 15.0,
            monster_speed: 1.6,
            vision_range: 8.0,
            vision_step: 0.1,
            chase_radius: 3.0,
            capture_radius: 0.6,
            pickup_radius: 0.6,
            reach_threshold: 0.3,
            tick_rate: 60,
        }
    }
}

impl Settings {
    /// Pixel width of one ray column.
    pub fn ray_width(&self) -> u32 {
        (self.screen_width / self.num_rays).max(1)
    }

    /// Read overrides from a JSON file; a missing file is not an error.
    pub fn load_or_default(path: &str) -> Self {
        match std::fs::read_to_string(path) {
            Ok(text) => match serde_json::from_str(&text) {
                Ok(settings) => settings,
                Err(err) => {
                    warn!("ignoring {path}: {err}");
                    Self::default()
                }
            },
            Err(_) => Self::default(),
        }
    }
}
