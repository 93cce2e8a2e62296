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

use crate::*;

pub(crate) type RectTuple = (i32, i32, i32, i32);

pub(crate) fn tuple(r: Recti) -> RectTuple { (r.x, r.y, r.width, r.height) }

#[derive(Clone, Debug, PartialEq)]
pub(crate) enum Call {
    FillRect(RectTuple, Color),
    DrawRect(RectTuple, Color),
    FillPolygon(Vec<(i32, i32)>, Color),
    DrawPolygon(Vec<(i32, i32)>, Color),
    DrawTexture(TextureId, Option<RectTuple>, RectTuple),
}

/// Recording renderer. Text renders as fixed size cells so layouts are predictable.
pub(crate) struct MockRenderer {
    pub glyph_width: i32,
    pub glyph_height: i32,
    pub ticks: u64,
    pub fail_text: bool,
    next_texture: u32,
    created: HashMap<TextureId, (i32, i32)>,
    destroyed: Vec<TextureId>,
    rendered: Vec<String>,
    calls: Vec<Call>,
}

impl MockRenderer {
    pub fn new() -> Self {
        Self {
            glyph_width: 10,
            glyph_height: 20,
            ticks: 0,
            fail_text: false,
            next_texture: 1,
            created: HashMap::new(),
            destroyed: Vec::new(),
            rendered: Vec::new(),
            calls: Vec::new(),
        }
    }

    pub fn created_count(&self) -> usize { self.created.len() }
    pub fn destroyed_count(&self) -> usize { self.destroyed.len() }
    pub fn destroy_calls(&self, id: TextureId) -> usize { self.destroyed.iter().filter(|d| **d == id).count() }
    pub fn rendered(&self) -> &[String] { &self.rendered }
    pub fn calls(&self) -> &[Call] { &self.calls }
    pub fn clear_calls(&mut self) { self.calls.clear(); }

    pub fn texture_draws(&self) -> Vec<(TextureId, Option<RectTuple>, RectTuple)> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                Call::DrawTexture(id, src, dst) => Some((*id, *src, *dst)),
                _ => None,
            })
            .collect()
    }

    pub fn fills_with(&self, color: Color) -> Vec<RectTuple> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                Call::FillRect(r, c) if *c == color => Some(*r),
                _ => None,
            })
            .collect()
    }

    pub fn outlines_with(&self, color: Color) -> Vec<RectTuple> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                Call::DrawRect(r, c) if *c == color => Some(*r),
                _ => None,
            })
            .collect()
    }
}

impl Renderer for MockRenderer {
    fn ticks(&self) -> u64 { self.ticks }

    fn fill_rect(&mut self, rect: Recti, color: Color) { self.calls.push(Call::FillRect(tuple(rect), color)); }

    fn draw_rect(&mut self, rect: Recti, color: Color) { self.calls.push(Call::DrawRect(tuple(rect), color)); }

    fn fill_polygon(&mut self, points: &[Vec2i], color: Color) { self.calls.push(Call::FillPolygon(points.iter().map(|p| (p.x, p.y)).collect(), color)); }

    fn draw_polygon(&mut self, points: &[Vec2i], color: Color) { self.calls.push(Call::DrawPolygon(points.iter().map(|p| (p.x, p.y)).collect(), color)); }

    fn create_texture(&mut self, width: i32, height: i32, pixels: &[u8]) -> Result<TextureId> {
        if pixels.len() != (width * height * 4) as usize {
            return Err(WidgetError::Render(format!("expected {} bytes, found {}", width * height * 4, pixels.len())));
        }
        let id = TextureId::new(self.next_texture);
        self.next_texture += 1;
        self.created.insert(id, (width, height));
        Ok(id)
    }

    fn destroy_texture(&mut self, id: TextureId) { self.destroyed.push(id); }

    fn draw_texture(&mut self, id: TextureId, src: Option<Recti>, dst: Recti) { self.calls.push(Call::DrawTexture(id, src.map(tuple), tuple(dst))); }

    fn load_font(&mut self, path: &Path, _size: usize) -> Result<FontId> {
        if !path.exists() {
            return Err(WidgetError::Render(format!("no font at {}", path.display())));
        }
        Ok(FontId::new(1))
    }

    fn render_text(&mut self, _font: FontId, text: &str, _color: Color) -> Result<Texture> {
        if self.fail_text {
            return Err(WidgetError::Render(format!("cannot render '{}'", text)));
        }
        let width = self.glyph_width * text.chars().count() as i32;
        let id = TextureId::new(self.next_texture);
        self.next_texture += 1;
        self.created.insert(id, (width, self.glyph_height));
        self.rendered.push(text.to_string());
        Ok(Texture { id, width, height: self.glyph_height })
    }
}
