//! CPU framebuffer: a plain RGBA8 pixel buffer uploaded to a raylib texture
//! once per frame.

use raylib::core::texture::RaylibTexture2D;
use raylib::prelude::*;

pub struct Framebuffer {
    pub color_buffer: Vec<Color>,
    pub width: u32,
    pub height: u32,
    pub background_color: Color,
    pub current_color: Color,
}

impl Framebuffer {
    pub fn new(width: u32, height: u32) -> Self {
        let size = (width * height) as usize;
        let bg = Color::BLACK;
        Self {
            color_buffer: vec![bg; size],
            width,
            height,
            background_color: bg,
            current_color: Color::WHITE,
        }
    }

    #[inline]
    pub fn clear(&mut self) {
        self.color_buffer.fill(self.background_color);
    }

    #[inline]
    pub fn set_pixel(&mut self, x: u32, y: u32) {
        if x < self.width && y < self.height {
            self.color_buffer[(y * self.width + x) as usize] = self.current_color;
        }
    }

    #[inline]
    pub fn set_pixel_color(&mut self, x: u32, y: u32, color: Color) {
        if x < self.width && y < self.height {
            self.color_buffer[(y * self.width + x) as usize] = color;
        }
    }

    #[inline]
    pub fn get_pixel(&self, x: u32, y: u32) -> Color {
        if x < self.width && y < self.height {
            return self.color_buffer[(y * self.width + x) as usize];
        }
        self.background_color
    }

    #[inline]
    pub fn set_current_color(&mut self, c: Color) {
        self.current_color = c;
    }

    #[inline]
    pub fn set_background_color(&mut self, c: Color) {
        self.background_color = c;
    }

    /// Fill a screen-aligned rectangle with the current color, clipped to
    /// the frame.
    pub fn fill_rect(&mut self, x: i32, y: i32, w: i32, h: i32) {
        let x0 = x.max(0);
        let y0 = y.max(0);
        let x1 = (x + w).min(self.width as i32);
        let y1 = (y + h).min(self.height as i32);
        for py in y0..y1 {
            for px in x0..x1 {
                self.color_buffer[(py as u32 * self.width + px as u32) as usize] =
                    self.current_color;
            }
        }
    }

    /// Fill a circle with the current color, clipped to the frame.
    pub fn fill_circle(&mut self, cx: i32, cy: i32, r: i32) {
        for dy in -r..=r {
            for dx in -r..=r {
                if dx * dx + dy * dy <= r * r {
                    let (x, y) = (cx + dx, cy + dy);
                    if x >= 0 && y >= 0 {
                        self.set_pixel_color(x as u32, y as u32, self.current_color);
                    }
                }
            }
        }
    }

    /// Blend a translucent tint over the whole frame.
    pub fn apply_overlay(&mut self, tint: Color, alpha: u8) {
        let t = alpha as f32 / 255.0;
        let mix = |a: u8, b: u8| -> u8 { ((a as f32) * (1.0 - t) + (b as f32) * t) as u8 };
        for px in &mut self.color_buffer {
            *px = Color::new(mix(px.r, tint.r), mix(px.g, tint.g), mix(px.b, tint.b), px.a);
        }
    }

    /// Upload the pixels to a persistent RGBA8 texture of the same size.
    pub fn upload_to_texture(&self, tex: &mut Texture2D) {
        let byte_len = self.color_buffer.len() * std::mem::size_of::<Color>();
        let bytes: &[u8] = unsafe {
            std::slice::from_raw_parts(self.color_buffer.as_ptr() as *const u8, byte_len)
        };
        let _ = tex.update_texture(bytes);
    }
}
