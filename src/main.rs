// main.rs
#![allow(dead_code)]

mod core;
mod process_events;
mod render;
mod settings;

use std::env;
use std::thread;
use std::time::Duration;

use log::{error, info};
use raylib::prelude::*;

use crate::core::grid::Grid;
use crate::core::session::{Outcome, Session};
use crate::process_events::process_events;
use crate::render::framebuffer::Framebuffer;
use crate::render::scene::draw_frame;
use crate::settings::Settings;

fn main() {
    env_logger::init();

    let level_path = env::args()
        .nth(1)
        .unwrap_or_else(|| "levels/level1.json".to_string());
    let settings = Settings::load_or_default("settings.json");

    let grid = match Grid::load(&level_path) {
        Ok(grid) => grid,
        Err(err) => {
            error!("failed to load {level_path}: {err}");
            std::process::exit(1);
        }
    };
    info!(
        "loaded {} ({}x{}, {} monsters)",
        level_path,
        grid.width(),
        grid.height(),
        grid.monster_starts().len()
    );

    let mut session = Session::new(grid, &settings);

    let (mut window, raylib_thread) = raylib::init()
        .size(settings.screen_width as i32, settings.screen_height as i32)
        .title("Maze Horror")
        .build();

    // capture the cursor for mouse look
    window.disable_cursor();

    let mut framebuffer = Framebuffer::new(settings.screen_width, settings.screen_height);
    let mut zbuffer = vec![f32::INFINITY; settings.num_rays as usize];

    let image = Image::gen_image_color(
        settings.screen_width as i32,
        settings.screen_height as i32,
        Color::BLACK,
    );
    let mut screen_tex = window
        .load_texture_from_image(&raylib_thread, &image)
        .expect("framebuffer texture");

    let frame_ms = 1000 / settings.tick_rate.max(1) as u64;

    let outcome = loop {
        if window.window_should_close() {
            break Outcome::Exited;
        }

        let dt = window.get_frame_time();
        let input = process_events(&window, &settings);

        let report = session.tick(&input, dt, &settings);

        draw_frame(&mut framebuffer, &session, &report, &mut zbuffer, &settings);
        framebuffer.upload_to_texture(&mut screen_tex);

        let fps_now = window.get_fps();
        let sprint_on = input.run && session.player.stamina > 0.0;

        {
            let mut d = window.begin_drawing(&raylib_thread);
            d.clear_background(Color::BLACK);
            d.draw_texture(&screen_tex, 0, 0, Color::WHITE);
            d.draw_text(&format!("FPS: {fps_now}"), 10, 10, 20, Color::WHITE);
            if sprint_on {
                d.draw_text("SPRINT", 10, 40, 20, Color::RED);
            }
        }

        if let Some(outcome) = report.outcome {
            break outcome;
        }

        thread::sleep(Duration::from_millis(frame_ms));
    };

    match outcome {
        Outcome::Won => info!("you escaped the maze"),
        Outcome::Caught(color) => info!("caught by the {color:?} monster"),
        Outcome::Exited => info!("session exited"),
    }
}
