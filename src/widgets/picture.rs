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
use std::time::{Duration, Instant};

use super::*;

/// Cached texture drawn into the widget rectangle, optionally a strip of animation frames.
pub struct Image {
    base: WidgetBase,
    texture_name: String,
    frame: usize,
    frame_count: usize,
    on_click: Option<OnClick>,
}

impl Image {
    /// Creates an image showing the cached texture `texture_name`. A strip texture holds
    /// `frame_count` frames of equal width side by side.
    pub fn new(x: i32, y: i32, w: i32, h: i32, id: WidgetId, texture_name: impl Into<String>, frame_count: usize, style: StateBits, on_click: Option<OnClick>) -> Self {
        Self { base: WidgetBase::new(x, y, w, h, id, style), texture_name: texture_name.into(), frame: 0, frame_count: frame_count.max(1), on_click }
    }

    /// Suppresses repeat clicks for `debounce` after each accepted click.
    pub fn with_debounce(mut self, debounce: Duration) -> Self {
        self.base.set_debounce(debounce);
        self
    }

    /// Name of the cached texture.
    pub fn texture_name(&self) -> &str { &self.texture_name }
    /// Switches to another cached texture.
    pub fn set_texture_name(&mut self, name: impl Into<String>) { self.texture_name = name.into(); }

    fn render(&mut self, ctx: &mut DrawCtx<'_>) -> Result<()> {
        if !self.base.is_visible() {
            return Ok(());
        }
        let r = self.base.rect();
        let t = match ctx.resources.texture_for_name(&self.texture_name) {
            Ok(t) => t,
            Err(e) => {
                render_failed(ctx, rect(r.x, r.y, 100, 100), "image", &e);
                return Ok(());
            }
        };
        self.base.draw_background(ctx);
        let fw = t.width / self.frame_count as i32;
        let src = rect(fw * self.frame as i32, 0, fw, t.height);
        let framed = self.base.should_draw_background() || self.base.should_draw_border();
        let dst = if framed { shrink_rect(r, 4) } else { r };
        ctx.renderer.draw_texture(t.id, Some(src), dst);
        self.base.draw_border(ctx);
        Ok(())
    }

    fn handle_click(&mut self, md: &MouseData) -> bool {
        if !self.base.is_enabled() {
            return false;
        }
        let Some(on_click) = self.on_click.as_mut() else {
            return false;
        };
        self.base.press(Instant::now());
        on_click(&ClickEvent { text: self.texture_name.clone(), id: self.base.id(), x: md.x(), y: md.y() })
    }
}

impl Animatable for Image {
    fn frame(&self) -> usize { self.frame }

    fn set_frame(&mut self, frame: usize) { self.frame = if frame < self.frame_count { frame } else { 0 }; }

    fn frame_count(&self) -> usize { self.frame_count }

    fn next_frame(&mut self) -> usize {
        self.set_frame(self.frame + 1);
        self.frame
    }
}

impl Widget for Image {
    fn base(&self) -> &WidgetBase { &self.base }
    fn base_mut(&mut self) -> &mut WidgetBase { &mut self.base }
    fn draw(&mut self, ctx: &mut DrawCtx<'_>) -> Result<()> { self.render(ctx) }
    fn click(&mut self, md: &MouseData) -> bool { self.handle_click(md) }
    fn as_animatable(&mut self) -> Option<&mut dyn Animatable> { Some(self) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::*;

    fn cached(res: &ResourceContext, r: &mut MockRenderer, name: &str, w: i32, h: i32) -> TextureId {
        let id = r.create_texture(w, h, &vec![0; (w * h * 4) as usize]).unwrap();
        res.textures().scope_mut(|c| c.add(r, name, TextureCacheEntry::new(Texture { id, width: w, height: h }, name)));
        id
    }

    #[test]
    fn strip_frames_and_wrap() {
        let res = ResourceContext::new();
        let mut r = MockRenderer::new();
        let id = cached(&res, &mut r, "walk", 90, 20);
        let mut img = Image::new(0, 0, 30, 20, 1, "walk", 3, StateBits::DRAW_NONE, None);

        img.draw(&mut DrawCtx::new(&mut r, &res)).unwrap();
        assert_eq!(img.next_frame(), 1);
        assert_eq!(img.next_frame(), 2);
        img.draw(&mut DrawCtx::new(&mut r, &res)).unwrap();
        assert_eq!(img.next_frame(), 0);
        img.set_frame(9);
        assert_eq!(img.frame(), 0);

        let draws = r.texture_draws();
        assert_eq!(draws[0], (id, Some((0, 0, 30, 20)), (0, 0, 30, 20)));
        assert_eq!(draws[1], (id, Some((60, 0, 30, 20)), (0, 0, 30, 20)));
    }

    #[test]
    fn framed_image_is_inset() {
        let res = ResourceContext::new();
        let mut r = MockRenderer::new();
        cached(&res, &mut r, "icon", 10, 10);
        let mut img = Image::new(10, 10, 50, 50, 1, "icon", 1, StateBits::DRAW_BORDER, None);
        img.draw(&mut DrawCtx::new(&mut r, &res)).unwrap();
        assert_eq!(r.texture_draws()[0].2, (14, 14, 42, 42));
    }

    #[test]
    fn missing_texture_paints_indicator() {
        let res = ResourceContext::new();
        let mut r = MockRenderer::new();
        let mut img = Image::new(5, 6, 30, 20, 1, "nope", 1, StateBits::DRAW_NONE, None);
        img.draw(&mut DrawCtx::new(&mut r, &res)).unwrap();
        assert_eq!(r.outlines_with(Color::ERROR_RED), vec![(5, 6, 100, 100)]);
    }
}
