//! Rendering: CPU framebuffer pipeline for the raycast view.
//!
//! Re-exports:
//! - `framebuffer`: CPU framebuffer and overlay blending
//! - `line`: Bresenham integer line drawing
//! - `raycaster`: Per-column wall casting and the depth buffer
//! - `sprites`: Point-feature billboard squares
//! - `scene`: Full-frame composition (walls, sprites, overlays, HUD)

pub mod framebuffer;
pub mod line;
pub mod raycaster;
pub mod scene;
pub mod sprites;
