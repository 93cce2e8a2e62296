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
#![deny(missing_docs)]
//! `retained-ui` provides a retained-mode widget toolkit: buttons, labels, text entries, images,
//! shapes, separators, file lists, and the containers that group them.
//! Widgets keep their own geometry and state bits, cache rendered text in a shared texture cache,
//! and draw through the [`Renderer`] trait so any 2D backend able to fill rectangles and blit
//! textures can host them.

use std::path::Path;

mod clipboard;
mod container;
mod error;
mod file_list;
mod image;
mod key;
mod mouse;
mod resources;
mod software;
mod state;
mod texture_cache;
mod widget;
mod widgets;

#[cfg(test)]
pub(crate) mod testing;

pub use clipboard::*;
pub use container::*;
pub use error::*;
pub use file_list::*;
pub use image::*;
pub use key::*;
pub use mouse::*;
pub use resources::*;
pub use rs_math3d::*;
pub use software::*;
pub use state::*;
pub use texture_cache::*;
pub use widget::*;
pub use widgets::*;

/// Numeric widget identifier supplied by the application.
pub type WidgetId = i32;

#[derive(Default, Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[repr(C)]
/// Simple RGBA color stored with 8-bit components.
pub struct Color {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel.
    pub a: u8,
}

impl Color {
    /// Opaque red used to flag widgets that failed to render.
    pub const ERROR_RED: Color = Color { r: 255, g: 0, b: 0, a: 255 };
    /// Opaque white.
    pub const WHITE: Color = Color { r: 255, g: 255, b: 255, a: 255 };

    /// Packs the color into a stable identifier (`A | R<<8 | G<<16 | B<<24`).
    /// Used to key per-color glyph textures.
    pub fn id(&self) -> u32 { self.a as u32 | (self.r as u32) << 8 | (self.g as u32) << 16 | (self.b as u32) << 24 }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
/// Handle referencing a renderer-owned texture.
pub struct TextureId(u32);

impl TextureId {
    /// Wraps a backend specific texture number.
    pub fn new(raw: u32) -> Self { Self(raw) }

    /// Returns the raw numeric identifier stored inside the handle.
    pub fn raw(self) -> u32 { self.0 }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
/// Handle referencing a renderer-owned font.
pub struct FontId(u32);

impl FontId {
    /// Wraps a backend specific font number.
    pub fn new(raw: u32) -> Self { Self(raw) }

    /// Returns the raw numeric identifier stored inside the handle.
    pub fn raw(self) -> u32 { self.0 }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
/// A texture created by a renderer along with its pixel dimensions.
pub struct Texture {
    /// Renderer handle.
    pub id: TextureId,
    /// Width in pixels.
    pub width: i32,
    /// Height in pixels.
    pub height: i32,
}

/// Trait implemented by render backends hosting the widgets.
///
/// The trait is object safe; widgets receive it as `&mut dyn Renderer`.
pub trait Renderer {
    /// Milliseconds elapsed since the renderer was created. Drives caret blinking.
    fn ticks(&self) -> u64;
    /// Fills a rectangle with a solid color.
    fn fill_rect(&mut self, rect: Recti, color: Color);
    /// Draws a one pixel rectangle outline.
    fn draw_rect(&mut self, rect: Recti, color: Color);
    /// Fills a closed polygon.
    fn fill_polygon(&mut self, points: &[Vec2i], color: Color);
    /// Outlines a closed polygon.
    fn draw_polygon(&mut self, points: &[Vec2i], color: Color);
    /// Creates a texture from RGBA8888 pixels laid out as width × height × 4 bytes.
    fn create_texture(&mut self, width: i32, height: i32, pixels: &[u8]) -> Result<TextureId>;
    /// Destroys a previously created texture.
    fn destroy_texture(&mut self, id: TextureId);
    /// Copies `src` (or the whole texture) of a texture into `dst`, scaling as needed.
    fn draw_texture(&mut self, id: TextureId, src: Option<Recti>, dst: Recti);
    /// Opens a font file at the given pixel size.
    fn load_font(&mut self, path: &Path, size: usize) -> Result<FontId>;
    /// Renders a line of text to a new texture.
    fn render_text(&mut self, font: FontId, text: &str, color: Color) -> Result<Texture>;
}

/// Per-draw context handed from containers down to widgets.
pub struct DrawCtx<'a> {
    /// Backend receiving draw calls.
    pub renderer: &'a mut dyn Renderer,
    /// Shared colors, fonts, and textures.
    pub resources: &'a ResourceContext,
    /// Font override for this subtree; falls back to the resource font.
    pub font: Option<FontId>,
}

impl<'a> DrawCtx<'a> {
    /// Creates a draw context using the resource font.
    pub fn new(renderer: &'a mut dyn Renderer, resources: &'a ResourceContext) -> Self { Self { renderer, resources, font: None } }

    /// Returns the font to draw with, if one is available.
    pub fn font(&self) -> Option<FontId> { self.font.or(self.resources.font()) }

    /// Runs `f` with a different font override, restoring the previous one afterwards.
    pub fn with_font<R>(&mut self, font: Option<FontId>, f: impl FnOnce(&mut Self) -> R) -> R {
        let prev = self.font;
        if font.is_some() {
            self.font = font;
        }
        let res = f(self);
        self.font = prev;
        res
    }

    /// Paints the red indicator used when a widget cannot render.
    pub fn draw_error_rect(&mut self, r: Recti) { self.renderer.draw_rect(r, Color::ERROR_RED); }
}

/// Convenience constructor for [`Vec2i`].
pub fn vec2(x: i32, y: i32) -> Vec2i { Vec2i { x, y } }

/// Convenience constructor for [`Recti`].
pub fn rect(x: i32, y: i32, w: i32, h: i32) -> Recti { Recti { x, y, width: w, height: h } }

/// Convenience constructor for [`Color`].
pub fn color(r: u8, g: u8, b: u8, a: u8) -> Color { Color { r, g, b, a } }

/// Shrinks a rectangle uniformly on all sides.
pub fn shrink_rect(r: Recti, n: i32) -> Recti { rect(r.x + n, r.y + n, r.width - n * 2, r.height - n * 2) }

/// Returns `true` when the point lies inside `r`, edges included.
pub fn inside_rect(x: i32, y: i32, r: Recti) -> bool { x >= r.x && y >= r.y && x <= r.x + r.width && y <= r.y + r.height }

/// Returns the smallest rectangle covering both inputs. Empty rectangles are ignored.
pub fn union_rect(a: Recti, b: Recti) -> Recti {
    if a.width <= 0 || a.height <= 0 {
        return b;
    }
    if b.width <= 0 || b.height <= 0 {
        return a;
    }
    let x = a.x.min(b.x);
    let y = a.y.min(b.y);
    let right = (a.x + a.width).max(b.x + b.width);
    let bottom = (a.y + a.height).max(b.y + b.height);
    rect(x, y, right - x, bottom - y)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn color_id_packs_alpha_low() {
        assert_eq!(color(0, 0, 0, 255).id(), 0xFF);
        assert_eq!(color(255, 0, 0, 255).id(), 0xFF | 0xFF00);
        assert_eq!(color(0, 0, 255, 0).id(), 0xFF00_0000);
        assert_ne!(color(1, 2, 3, 4).id(), color(4, 3, 2, 1).id());
    }

    #[test]
    fn inside_rect_includes_edges() {
        let r = rect(10, 10, 10, 10);
        assert!(inside_rect(10, 10, r));
        assert!(inside_rect(20, 20, r));
        assert!(!inside_rect(9, 15, r));
        assert!(!inside_rect(15, 21, r));
    }

    #[test]
    fn union_rect_skips_empty() {
        let u = union_rect(rect(0, 0, 0, 0), rect(5, 5, 10, 10));
        assert_eq!((u.x, u.y, u.width, u.height), (5, 5, 10, 10));
        let u = union_rect(rect(5, 5, 10, 10), rect(0, 20, 2, 2));
        assert_eq!((u.x, u.y, u.width, u.height), (0, 5, 15, 17));
    }
}
