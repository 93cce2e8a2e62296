//
// Copyright 2022-Present (c) Raja Lehtihet & Wael El Oraiby
//
// Redistribution and use in source and binary forms, with or without
// modification, are permitted provided that the following conditions are met:
//
// 1. Redistributions of source code must retain the above copyright notice,
// this list of conditions and the following disclaimer.
//
// 2. Redistributions in binary form must reproduce the above copyright notice,
// this list of conditions and the following disclaimer in the documentation
// and/or other materials provided with the distribution.
//
// 3. Neither the name of the copyright holder nor the names of its contributors
// may be used to endorse or promote products derived from this software without
// specific prior written permission.
//
// THIS SOFTWARE IS PROVIDED BY THE COPYRIGHT HOLDERS AND CONTRIBUTORS "AS IS"
// AND ANY EXPRESS OR IMPLIED WARRANTIES, INCLUDING, BUT NOT LIMITED TO, THE
// IMPLIED WARRANTIES OF MERCHANTABILITY AND FITNESS FOR A PARTICULAR PURPOSE
// ARE DISCLAIMED. IN NO EVENT SHALL THE COPYRIGHT HOLDER OR CONTRIBUTORS BE
// LIABLE FOR ANY DIRECT, INDIRECT, INCIDENTAL, SPECIAL, EXEMPLARY, OR
// CONSEQUENTIAL DAMAGES (INCLUDING, BUT NOT LIMITED TO, PROCUREMENT OF
// SUBSTITUTE GOODS OR SERVICES; LOSS OF USE, DATA, OR PROFITS; OR BUSINESS
// INTERRUPTION) HOWEVER CAUSED AND ON ANY THEORY OF LIABILITY, WHETHER IN
// CONTRACT, STRICT LIABILITY, OR TORT (INCLUDING NEGLIGENCE OR OTHERWISE)
// ARISING IN ANY WAY OUT OF THE USE OF THIS SOFTWARE, EVEN IF ADVISED OF THE
// POSSIBILITY OF SUCH DAMAGE.
//
use std::collections::HashMap;
use std::path::Path;
use std::time::Instant;

use fontdue::{Font, FontSettings};

use crate::*;

struct SoftTexture {
    width: i32,
    height: i32,
    pixels: Vec<u8>,
}

struct SoftFont {
    font: Font,
    size: f32,
}

/// Headless [`Renderer`] drawing into an RGBA framebuffer.
///
/// Text is rasterized with `fontdue`. Useful for tests, screenshots and hosts that blit the
/// framebuffer themselves.
pub struct SoftwareRenderer {
    width: i32,
    height: i32,
    pixels: Vec<u8>,
    textures: HashMap<TextureId, SoftTexture>,
    fonts: Vec<SoftFont>,
    next_texture: u32,
    start: Instant,
}

fn blend(dst: &mut [u8], c: Color) {
    let a = c.a as u32;
    if a == 0 {
        return;
    }
    let inv = 255 - a;
    dst[0] = ((c.r as u32 * a + dst[0] as u32 * inv) / 255) as u8;
    dst[1] = ((c.g as u32 * a + dst[1] as u32 * inv) / 255) as u8;
    dst[2] = ((c.b as u32 * a + dst[2] as u32 * inv) / 255) as u8;
    dst[3] = (a + dst[3] as u32 * inv / 255) as u8;
}

impl SoftwareRenderer {
    /// Creates a cleared framebuffer of the given size.
    pub fn new(width: i32, height: i32) -> Self {
        let (width, height) = (width.max(0), height.max(0));
        Self {
            width,
            height,
            pixels: vec![0; (width * height * 4) as usize],
            textures: HashMap::new(),
            fonts: Vec::new(),
            next_texture: 1,
            start: Instant::now(),
        }
    }

    /// Framebuffer width.
    pub fn width(&self) -> i32 { self.width }
    /// Framebuffer height.
    pub fn height(&self) -> i32 { self.height }
    /// Row major RGBA framebuffer.
    pub fn pixels(&self) -> &[u8] { &self.pixels }
    /// Number of live textures.
    pub fn texture_count(&self) -> usize { self.textures.len() }

    /// Returns the pixel at `(x, y)`, `None` outside the framebuffer.
    pub fn pixel(&self, x: i32, y: i32) -> Option<Color> {
        if x < 0 || y < 0 || x >= self.width || y >= self.height {
            return None;
        }
        let i = ((y * self.width + x) * 4) as usize;
        let p = &self.pixels[i..i + 4];
        Some(color(p[0], p[1], p[2], p[3]))
    }

    /// Fills the whole framebuffer.
    pub fn clear(&mut self, c: Color) {
        for px in self.pixels.chunks_exact_mut(4) {
            px.copy_from_slice(&[c.r, c.g, c.b, c.a]);
        }
    }

    fn plot(&mut self, x: i32, y: i32, c: Color) {
        if x < 0 || y < 0 || x >= self.width || y >= self.height {
            return;
        }
        let i = ((y * self.width + x) * 4) as usize;
        blend(&mut self.pixels[i..i + 4], c);
    }

    fn hline(&mut self, x0: i32, x1: i32, y: i32, c: Color) {
        if y < 0 || y >= self.height {
            return;
        }
        for x in x0.max(0)..x1.min(self.width) {
            self.plot(x, y, c);
        }
    }

    fn line(&mut self, a: Vec2i, b: Vec2i, c: Color) {
        let (mut x, mut y) = (a.x, a.y);
        let dx = (b.x - a.x).abs();
        let dy = -(b.y - a.y).abs();
        let sx = if a.x < b.x { 1 } else { -1 };
        let sy = if a.y < b.y { 1 } else { -1 };
        let mut err = dx + dy;
        loop {
            self.plot(x, y, c);
            if x == b.x && y == b.y {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x += sx;
            }
            if e2 <= dx {
                err += dx;
                y += sy;
            }
        }
    }

    fn font(&self, font: FontId) -> Result<&SoftFont> { self.fonts.get(font.raw() as usize).ok_or(WidgetError::FontNotLoaded) }
}

impl Renderer for SoftwareRenderer {
    fn ticks(&self) -> u64 { self.start.elapsed().as_millis() as u64 }

    fn fill_rect(&mut self, r: Recti, c: Color) {
        for y in r.y..r.y + r.height {
            self.hline(r.x, r.x + r.width, y, c);
        }
    }

    fn draw_rect(&mut self, r: Recti, c: Color) {
        if r.width <= 0 || r.height <= 0 {
            return;
        }
        let (x1, y1) = (r.x + r.width - 1, r.y + r.height - 1);
        self.hline(r.x, x1 + 1, r.y, c);
        self.hline(r.x, x1 + 1, y1, c);
        for y in r.y + 1..y1 {
            self.plot(r.x, y, c);
            self.plot(x1, y, c);
        }
    }

    fn fill_polygon(&mut self, points: &[Vec2i], c: Color) {
        if points.len() < 3 {
            return;
        }
        let min_y = points.iter().map(|p| p.y).min().unwrap_or(0).max(0);
        let max_y = points.iter().map(|p| p.y).max().unwrap_or(0).min(self.height - 1);
        let mut nodes = Vec::with_capacity(points.len());
        for y in min_y..=max_y {
            let sy = y as f32 + 0.5;
            nodes.clear();
            for i in 0..points.len() {
                let a = points[i];
                let b = points[(i + 1) % points.len()];
                let (ay, by) = (a.y as f32, b.y as f32);
                if (ay <= sy && by > sy) || (by <= sy && ay > sy) {
                    nodes.push(a.x as f32 + (sy - ay) / (by - ay) * (b.x - a.x) as f32);
                }
            }
            nodes.sort_by(|a, b| a.total_cmp(b));
            for pair in nodes.chunks_exact(2) {
                self.hline(pair[0].round() as i32, pair[1].round() as i32, y, c);
            }
        }
    }

    fn draw_polygon(&mut self, points: &[Vec2i], c: Color) {
        for i in 0..points.len() {
            self.line(points[i], points[(i + 1) % points.len()], c);
        }
    }

    fn create_texture(&mut self, width: i32, height: i32, pixels: &[u8]) -> Result<TextureId> {
        if width <= 0 || height <= 0 || pixels.len() != (width * height * 4) as usize {
            return Err(WidgetError::Render(format!("texture of {}x{} cannot hold {} bytes", width, height, pixels.len())));
        }
        let id = TextureId::new(self.next_texture);
        self.next_texture += 1;
        self.textures.insert(id, SoftTexture { width, height, pixels: pixels.to_vec() });
        Ok(id)
    }

    fn destroy_texture(&mut self, id: TextureId) { self.textures.remove(&id); }

    fn draw_texture(&mut self, id: TextureId, src: Option<Recti>, dst: Recti) {
        let Some(tex) = self.textures.remove(&id) else {
            log::warn!("draw of unknown texture {}", id.raw());
            return;
        };
        let src = src.unwrap_or(rect(0, 0, tex.width, tex.height));
        if src.width > 0 && src.height > 0 && dst.width > 0 && dst.height > 0 {
            for dy in 0..dst.height {
                let sy = src.y + dy * src.height / dst.height;
                if sy < 0 || sy >= tex.height {
                    continue;
                }
                for dx in 0..dst.width {
                    let sx = src.x + dx * src.width / dst.width;
                    if sx < 0 || sx >= tex.width {
                        continue;
                    }
                    let i = ((sy * tex.width + sx) * 4) as usize;
                    let p = &tex.pixels[i..i + 4];
                    self.plot(dst.x + dx, dst.y + dy, color(p[0], p[1], p[2], p[3]));
                }
            }
        }
        self.textures.insert(id, tex);
    }

    fn load_font(&mut self, path: &Path, size: usize) -> Result<FontId> {
        let data = std::fs::read(path)?;
        let font = Font::from_bytes(data, FontSettings::default()).map_err(|e| WidgetError::Render(format!("cannot load font '{}': {}", path.display(), e)))?;
        self.fonts.push(SoftFont { font, size: size as f32 });
        Ok(FontId::new((self.fonts.len() - 1) as u32))
    }

    fn render_text(&mut self, font: FontId, text: &str, c: Color) -> Result<Texture> {
        let f = self.font(font)?;
        let size = f.size;
        let (height, baseline) = match f.font.horizontal_line_metrics(size) {
            Some(m) => (m.new_line_size.ceil() as i32, m.ascent.round() as i32),
            None => (size.ceil() as i32, size.ceil() as i32),
        };
        let glyphs: Vec<_> = text.chars().map(|ch| f.font.rasterize(ch, size)).collect();
        let width = glyphs.iter().map(|(m, _)| m.advance_width).sum::<f32>().ceil() as i32;
        let (width, height) = (width.max(1), height.max(1));

        let mut pixels = vec![0u8; (width * height * 4) as usize];
        let mut pen = 0.0f32;
        for (m, bitmap) in &glyphs {
            let gx = pen.round() as i32 + m.xmin;
            let gy = baseline - m.ymin - m.height as i32;
            for row in 0..m.height as i32 {
                for col in 0..m.width as i32 {
                    let (x, y) = (gx + col, gy + row);
                    if x < 0 || y < 0 || x >= width || y >= height {
                        continue;
                    }
                    let coverage = bitmap[(row * m.width as i32 + col) as usize] as u32;
                    let i = ((y * width + x) * 4) as usize;
                    let a = (coverage * c.a as u32 / 255) as u8;
                    if a > pixels[i + 3] {
                        pixels[i..i + 4].copy_from_slice(&[c.r, c.g, c.b, a]);
                    }
                }
            }
            pen += m.advance_width;
        }

        let id = self.create_texture(width, height, &pixels)?;
        Ok(Texture { id, width, height })
    }
}
