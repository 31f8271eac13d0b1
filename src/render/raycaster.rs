//! Wall casting: one ray per screen column into a fisheye-corrected depth
//! buffer.

use raylib::prelude::*;

use crate::core::actor::Player;
use crate::core::grid::Grid;
use crate::render::framebuffer::Framebuffer;
use crate::settings::Settings;

/// March a single ray from (ox, oy); returns the raw (uncorrected) distance
/// to the first wall sample, or None once the march exhausts `max_depth`.
pub fn cast_ray(grid: &Grid, ox: f32, oy: f32, angle: f32, settings: &Settings) -> Option<f32> {
    let cos_a = angle.cos();
    let sin_a = angle.sin();
    let steps = (settings.max_depth / settings.ray_step) as u32;
    for i in 1..=steps {
        let d = i as f32 * settings.ray_step;
        if grid.is_wall(ox + cos_a * d, oy + sin_a * d) {
            return Some(d);
        }
    }
    None
}

/// Cast and draw every wall column, filling `zbuffer` with perpendicular
/// depths. The correction happens before the store so sprite occlusion
/// compares against corrected values; columns with no hit get infinity.
pub fn render_walls(
    fb: &mut Framebuffer,
    grid: &Grid,
    player: &Player,
    zbuffer: &mut [f32],
    settings: &Settings,
) {
    let height = fb.height as f32;
    let ray_width = settings.ray_width() as i32;
    let angle_step = settings.fov / settings.num_rays as f32;

    for (ray, z) in zbuffer
        .iter_mut()
        .enumerate()
        .take(settings.num_rays as usize)
    {
        let ray_angle = player.angle - settings.fov / 2.0 + ray as f32 * angle_step;
        let Some(raw) = cast_ray(grid, player.x, player.y, ray_angle, settings) else {
            *z = f32::INFINITY;
            continue;
        };

        let depth = raw * (player.angle - ray_angle).cos();
        *z = depth;

        let strip_h = (height / (depth + 1e-4)).min(height);
        let shade = (200.0 - depth * 30.0).max(20.0) as u8;
        fb.set_current_color(Color::new(shade, shade, shade, 255));
        fb.fill_rect(
            ray as i32 * ray_width,
            ((height - strip_h) / 2.0) as i32,
            ray_width,
            strip_h as i32,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::grid::LevelDoc;

    fn grid_from(rows: &[&str]) -> Grid {
        Grid::from_doc(&LevelDoc {
            map: rows.iter().map(|r| r.to_string()).collect(),
        })
        .unwrap()
    }

    fn corridor() -> Grid {
        // straight east-west corridor, wall at x = 5
        grid_from(&["#####", "#P..#", "#..E#", "#####"])
    }

    fn test_settings() -> Settings {
        Settings {
            screen_width: 64,
            screen_height: 64,
            num_rays: 64,
            ..Default::default()
        }
    }

    fn centered_player() -> Player {
        let settings = Settings::default();
        let mut player = Player::new((1.5, 1.5), &settings);
        player.angle = 0.0;
        player
    }

    #[test]
    fn ray_stops_at_the_first_wall() {
        let grid = corridor();
        let settings = test_settings();
        let raw = cast_ray(&grid, 1.5, 1.5, 0.0, &settings).unwrap();
        // wall tile starts at x = 4, so the march covers 2.5 units
        assert!((raw - 2.5).abs() < 2.0 * settings.ray_step);
    }

    #[test]
    fn ray_gives_up_past_max_depth() {
        let grid = corridor();
        let mut settings = test_settings();
        settings.max_depth = 1.0;
        assert!(cast_ray(&grid, 1.5, 1.5, 0.0, &settings).is_none());
    }

    #[test]
    fn center_ray_depth_equals_raw_distance() {
        let grid = corridor();
        let settings = test_settings();
        let mut fb = Framebuffer::new(settings.screen_width, settings.screen_height);
        let mut zbuffer = vec![0.0; settings.num_rays as usize];
        let player = centered_player();

        render_walls(&mut fb, &grid, &player, &mut zbuffer, &settings);

        // the middle column points exactly along the facing: cos(0) = 1
        let center = settings.num_rays as usize / 2;
        let raw = cast_ray(&grid, 1.5, 1.5, 0.0, &settings).unwrap();
        assert!((zbuffer[center] - raw).abs() < 2.0 * settings.ray_step);
    }

    #[test]
    fn edge_ray_depth_is_shorter_than_raw() {
        let grid = corridor();
        let settings = test_settings();
        let mut fb = Framebuffer::new(settings.screen_width, settings.screen_height);
        let mut zbuffer = vec![0.0; settings.num_rays as usize];
        let player = centered_player();

        render_walls(&mut fb, &grid, &player, &mut zbuffer, &settings);

        let edge_angle = player.angle - settings.fov / 2.0;
        let raw = cast_ray(&grid, 1.5, 1.5, edge_angle, &settings).unwrap();
        assert!(zbuffer[0] < raw);
    }

    #[test]
    fn every_column_gets_a_depth() {
        let grid = corridor();
        let settings = test_settings();
        let mut fb = Framebuffer::new(settings.screen_width, settings.screen_height);
        let mut zbuffer = vec![0.0; settings.num_rays as usize];
        let player = centered_player();

        render_walls(&mut fb, &grid, &player, &mut zbuffer, &settings);
        assert!(zbuffer.iter().all(|&z| z > 0.0));
    }

    #[test]
    fn open_column_stores_infinity() {
        // no wall within reach when max_depth is tiny
        let grid = corridor();
        let mut settings = test_settings();
        settings.max_depth = 0.5;
        let mut fb = Framebuffer::new(settings.screen_width, settings.screen_height);
        let mut zbuffer = vec![0.0; settings.num_rays as usize];
        let player = centered_player();

        render_walls(&mut fb, &grid, &player, &mut zbuffer, &settings);
        assert!(zbuffer.iter().all(|&z| z.is_infinite()));
    }

    #[test]
    fn nearer_walls_paint_taller_and_brighter_strips() {
        let grid = corridor();
        let settings = test_settings();
        let mut fb = Framebuffer::new(settings.screen_width, settings.screen_height);
        let mut zbuffer = vec![0.0; settings.num_rays as usize];
        let mut player = centered_player();
        player.angle = std::f32::consts::PI; // face the near wall at x = 1

        render_walls(&mut fb, &grid, &player, &mut zbuffer, &settings);

        let mid_y = settings.screen_height / 2;
        let near_shade = fb.get_pixel(settings.screen_width / 2, mid_y).r;

        // shade falls off linearly with depth but never below the floor
        let depth = zbuffer[settings.num_rays as usize / 2];
        let expected = (200.0 - depth * 30.0).max(20.0) as u8;
        assert_eq!(near_shade, expected);
    }
}
