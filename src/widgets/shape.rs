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
use super::*;

/// Closed polygon filled with the background color and outlined with the border color.
///
/// Points are stored relative to the widget position.
pub struct Shape {
    base: WidgetBase,
    points: Vec<Vec2i>,
    on_click: Option<OnClick>,
}

impl Shape {
    /// Creates an empty shape anchored at `(x, y)`.
    pub fn new(x: i32, y: i32, id: WidgetId, style: StateBits, on_click: Option<OnClick>) -> Self {
        Self { base: WidgetBase::new(x, y, 0, 0, id, style), points: Vec::new(), on_click }
    }

    /// Creates an arrow pointing right that fills a `w` × `h` box.
    pub fn right_arrow(x: i32, y: i32, w: i32, h: i32, id: WidgetId, style: StateBits, on_click: Option<OnClick>) -> Self {
        let mut s = Self::new(x, y, id, style, on_click);
        let (hw, qh) = (w / 2, h / 4);
        for (px, py) in [(0, qh), (hw, qh), (hw, 0), (w, h / 2), (hw, h), (hw, h - qh), (0, h - qh)] {
            s.add(px, py);
        }
        s
    }

    /// Appends a point relative to the position.
    pub fn add(&mut self, x: i32, y: i32) {
        self.points.push(vec2(x, y));
        self.update_size();
    }

    /// Points relative to the position.
    pub fn points(&self) -> &[Vec2i] { &self.points }

    /// Rotates every point about the position by `deg` degrees.
    pub fn rotate(&mut self, deg: f32) {
        let (sin, cos) = deg.to_radians().sin_cos();
        for p in self.points.iter_mut() {
            let (x, y) = (p.x as f32, p.y as f32);
            *p = vec2((x * cos - y * sin).round() as i32, (x * sin + y * cos).round() as i32);
        }
        self.update_size();
    }

    fn update_size(&mut self) {
        let r = self.bounds();
        self.base.set_size(r.width, r.height);
    }

    /// Bounding rectangle of the points in screen coordinates.
    pub fn bounds(&self) -> Recti {
        let Some(first) = self.points.first() else {
            let p = self.base.position();
            return rect(p.x, p.y, 0, 0);
        };
        let (mut min, mut max) = (*first, *first);
        for p in &self.points {
            min = vec2(min.x.min(p.x), min.y.min(p.y));
            max = vec2(max.x.max(p.x), max.y.max(p.y));
        }
        let p = self.base.position();
        rect(p.x + min.x, p.y + min.y, max.x - min.x, max.y - min.y)
    }

    fn absolute(&self) -> Vec<Vec2i> {
        let o = self.base.position();
        self.points.iter().map(|p| vec2(o.x + p.x, o.y + p.y)).collect()
    }

    fn render(&mut self, ctx: &mut DrawCtx<'_>) -> Result<()> {
        if !self.base.is_visible() || self.points.is_empty() {
            return Ok(());
        }
        let points = self.absolute();
        if self.base.should_draw_background() {
            let c = self.base.background(ctx.resources);
            ctx.renderer.fill_polygon(&points, c);
        }
        if self.base.should_draw_border() {
            let c = self.base.border_colour(ctx.resources);
            ctx.renderer.draw_polygon(&points, c);
        }
        Ok(())
    }

    fn handle_click(&mut self, md: &MouseData) -> bool {
        if !self.base.is_enabled() {
            return false;
        }
        match self.on_click.as_mut() {
            Some(on_click) => on_click(&ClickEvent { text: String::new(), id: self.base.id(), x: md.x(), y: md.y() }),
            None => false,
        }
    }
}

impl Widget for Shape {
    fn base(&self) -> &WidgetBase { &self.base }
    fn base_mut(&mut self) -> &mut WidgetBase { &mut self.base }
    fn draw(&mut self, ctx: &mut DrawCtx<'_>) -> Result<()> { self.render(ctx) }
    fn click(&mut self, md: &MouseData) -> bool { self.handle_click(md) }

    fn rect(&self) -> Recti { self.bounds() }

    fn inside(&self, x: i32, y: i32) -> bool { self.base.is_visible() && inside_rect(x, y, self.bounds()) }

    fn scale(&mut self, s: f32) {
        self.base.scale(s);
        for p in self.points.iter_mut() {
            *p = vec2((p.x as f32 * s) as i32, (p.y as f32 * s) as i32);
        }
    }
}
