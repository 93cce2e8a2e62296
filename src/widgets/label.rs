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

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
/// Horizontal placement of label text.
pub enum Align {
    /// Centred in the widget.
    Center,
    /// Ten pixels in from the left edge.
    Left,
    /// Flush with the right edge.
    Right,
    /// Widget is resized to the text width.
    Fit,
}

/// Single line of static text.
pub struct Label {
    base: WidgetBase,
    text: String,
    align: Align,
    cache_key: String,
    on_click: Option<OnClick>,
}

impl Label {
    /// Creates a label.
    pub fn new(x: i32, y: i32, w: i32, h: i32, id: WidgetId, text: impl Into<String>, align: Align, style: StateBits, on_click: Option<OnClick>) -> Self {
        // labels may share an id with a sibling, so the key needs more than the id
        let cache_key = format!("label:{}:{:016x}.", id, rand::random::<u64>());
        Self { base: WidgetBase::new(x, y, w, h, id, style), text: text.into(), align, cache_key, on_click }
    }

    /// Label text.
    pub fn text(&self) -> &str { &self.text }
    /// Replaces the text.
    pub fn set_text(&mut self, text: impl Into<String>) { self.text = text.into(); }
    /// Text alignment.
    pub fn align(&self) -> Align { self.align }
    /// Changes the text alignment.
    pub fn set_align(&mut self, align: Align) { self.align = align; }

    fn render(&mut self, ctx: &mut DrawCtx<'_>) -> Result<()> {
        if !self.base.is_visible() {
            return Ok(());
        }
        let fg = self.base.foreground(ctx.resources);
        let key = format!("{}{}", self.cache_key, fg.id());
        let t = match string_texture(ctx, &key, &self.text, fg) {
            Ok(t) => t,
            Err(e) => {
                render_failed(ctx, self.base.rect(), "label", &e);
                return Ok(());
            }
        };
        let (inset, th, tw) = text_extent(&t, self.base.rect().height);
        if self.align == Align::Fit {
            self.base.set_size(tw, 0);
        }
        let r = self.base.rect();
        let tx = match self.align {
            Align::Center => (r.width - tw) / 2,
            Align::Left => 10,
            Align::Right => r.width - tw,
            Align::Fit => 0,
        };
        self.base.draw_background(ctx);
        ctx.renderer.draw_texture(t.id, None, rect(r.x + tx, r.y + inset / 2, tw, th));
        self.base.draw_border(ctx);
        Ok(())
    }

    fn handle_click(&mut self, md: &MouseData) -> bool {
        if !self.base.is_enabled() {
            return false;
        }
        match self.on_click.as_mut() {
            Some(on_click) => on_click(&ClickEvent { text: self.text.clone(), id: self.base.id(), x: md.x(), y: md.y() }),
            None => false,
        }
    }
}

implement_widget!(Label, render, handle_click);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::*;

    fn draw(align: Align) -> (Label, MockRenderer) {
        let mut res = ResourceContext::new();
        res.set_font(Some(FontId::new(1)));
        let mut r = MockRenderer::new();
        let mut l = Label::new(0, 0, 200, 40, 3, "abcd", align, StateBits::DRAW_NONE, None);
        l.draw(&mut DrawCtx::new(&mut r, &res)).unwrap();
        (l, r)
    }

    #[test]
    fn alignment() {
        // "abcd" renders 40x20, drawn 30 high so 60 wide
        assert_eq!(draw(Align::Center).1.texture_draws()[0].2, (70, 5, 60, 30));
        assert_eq!(draw(Align::Left).1.texture_draws()[0].2, (10, 5, 60, 30));
        assert_eq!(draw(Align::Right).1.texture_draws()[0].2, (140, 5, 60, 30));

        let (fit, r) = draw(Align::Fit);
        assert_eq!(r.texture_draws()[0].2, (0, 5, 60, 30));
        assert_eq!(fit.size().x, 60);
    }

    #[test]
    fn text_change_rerenders() {
        let mut res = ResourceContext::new();
        res.set_font(Some(FontId::new(1)));
        let mut r = MockRenderer::new();
        let mut l = Label::new(0, 0, 200, 40, 3, "a", Align::Left, StateBits::DRAW_NONE, None);
        l.draw(&mut DrawCtx::new(&mut r, &res)).unwrap();
        l.draw(&mut DrawCtx::new(&mut r, &res)).unwrap();
        l.set_text("b");
        l.draw(&mut DrawCtx::new(&mut r, &res)).unwrap();
        assert_eq!(r.rendered(), &["a", "b"]);
        assert_eq!(r.destroyed_count(), 1);
        assert!(!l.click(&crate::mouse::click_at(1, 1, 1)));
    }

    #[test]
    fn labels_sharing_an_id_keep_their_textures() {
        let mut res = ResourceContext::new();
        res.set_font(Some(FontId::new(1)));
        let mut r = MockRenderer::new();
        let mut labels: Vec<Label> = (0..150).map(|i| Label::new(0, 0, 200, 40, 7, format!("row {}", i), Align::Left, StateBits::DRAW_NONE, None)).collect();
        for l in labels.iter_mut() {
            l.draw(&mut DrawCtx::new(&mut r, &res)).unwrap();
        }
        assert_eq!(r.rendered().len(), 150);

        for l in labels.iter_mut() {
            l.draw(&mut DrawCtx::new(&mut r, &res)).unwrap();
        }
        assert_eq!(r.rendered().len(), 150);
        assert_eq!(r.destroyed_count(), 0);
    }
}
