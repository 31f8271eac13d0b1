//! Input sampling: raylib events condensed into one snapshot per tick.

use raylib::prelude::*;

use crate::core::session::InputSnapshot;
use crate::settings::Settings;

/// Sample mouse look plus WASD, sprint, and escape into a single snapshot.
/// The pointer delta is scaled to radians here so the core never sees pixels.
pub fn process_events(rl: &RaylibHandle, settings: &Settings) -> InputSnapshot {
    let mouse = rl.get_mouse_delta();
    InputSnapshot {
        turn: mouse.x * settings.mouse_sensitivity,
        forward: rl.is_key_down(KeyboardKey::KEY_W),
        backward: rl.is_key_down(KeyboardKey::KEY_S),
        strafe_left: rl.is_key_down(KeyboardKey::KEY_A),
        strafe_right: rl.is_key_down(KeyboardKey::KEY_D),
        run: rl.is_key_down(KeyboardKey::KEY_LEFT_SHIFT),
        quit: rl.is_key_pressed(KeyboardKey::KEY_ESCAPE),
    }
}
