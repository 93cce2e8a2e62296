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

/// Push button showing a line of text.
pub struct Button {
    base: WidgetBase,
    text: String,
    on_click: Option<OnClick>,
}

impl Button {
    /// Creates a button. `on_click` receives the button text and id.
    pub fn new(x: i32, y: i32, w: i32, h: i32, id: WidgetId, text: impl Into<String>, style: StateBits, on_click: Option<OnClick>) -> Self {
        Self { base: WidgetBase::new(x, y, w, h, id, style), text: text.into(), on_click }
    }

    /// Suppresses repeat clicks for `debounce` after each accepted click.
    pub fn with_debounce(mut self, debounce: Duration) -> Self {
        self.base.set_debounce(debounce);
        self
    }

    /// Button text.
    pub fn text(&self) -> &str { &self.text }
    /// Replaces the text. The texture is re-rendered on the next draw.
    pub fn set_text(&mut self, text: impl Into<String>) { self.text = text.into(); }

    fn cache_key(&self, fg: Color) -> String { format!("TxCaPr987.{}.{}.{}", self.text, self.base.is_enabled(), fg.id()) }

    fn render(&mut self, ctx: &mut DrawCtx<'_>) -> Result<()> {
        if !self.base.is_visible() {
            return Ok(());
        }
        self.base.draw_background(ctx);
        let fg = self.base.foreground(ctx.resources);
        let r = self.base.rect();
        match string_texture(ctx, &self.cache_key(fg), &self.text, fg) {
            Ok(t) => {
                let (inset, th, tw) = text_extent(&t, r.height);
                ctx.renderer.draw_texture(t.id, None, rect(r.x + (r.width - tw) / 2, r.y + inset / 2, tw, th));
            }
            Err(e) => {
                render_failed(ctx, r, "button", &e);
                return Ok(());
            }
        }
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
        on_click(&ClickEvent { text: self.text.clone(), id: self.base.id(), x: md.x(), y: md.y() })
    }
}

implement_widget!(Button, render, handle_click);

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::mouse::click_at;
    use crate::testing::*;

    fn resources() -> ResourceContext {
        let mut res = ResourceContext::new();
        res.set_font(Some(FontId::new(1)));
        res
    }

    #[test]
    fn text_is_centred_at_three_quarters_height() {
        let res = resources();
        let mut r = MockRenderer::new();
        let mut b = Button::new(10, 20, 100, 40, 1, "OK", StateBits::DRAW_BORDER_AND_BG, None);
        b.draw(&mut DrawCtx::new(&mut r, &res)).unwrap();

        let draws = r.texture_draws();
        assert_eq!(draws.len(), 1);
        assert_eq!(draws[0].2, (45, 25, 30, 30));
        assert_eq!(r.fills_with(color(0, 100, 0, 255)), vec![(10, 20, 100, 40)]);
        assert_eq!(r.outlines_with(color(0, 255, 0, 255)), vec![(11, 21, 98, 38)]);

        r.clear_calls();
        b.draw(&mut DrawCtx::new(&mut r, &res)).unwrap();
        assert_eq!(r.rendered().len(), 1);
    }

    #[test]
    fn missing_font_paints_indicator() {
        let res = ResourceContext::new();
        let mut r = MockRenderer::new();
        let mut b = Button::new(0, 0, 50, 20, 1, "X", StateBits::DRAW_BORDER, None);
        assert!(b.draw(&mut DrawCtx::new(&mut r, &res)).is_ok());
        assert_eq!(r.outlines_with(Color::ERROR_RED), vec![(0, 0, 50, 20)]);
        assert!(r.texture_draws().is_empty());
    }

    #[test]
    fn click_fires_and_debounces() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let log = seen.clone();
        let on_click: OnClick = Box::new(move |e: &ClickEvent| {
            log.borrow_mut().push((e.text.clone(), e.id));
            true
        });
        let mut b = Button::new(0, 0, 50, 20, 7, "Go", StateBits::DRAW_NONE, Some(on_click)).with_debounce(Duration::from_secs(60));

        assert!(b.click(&click_at(5, 5, 1)));
        assert!(b.is_clicked());
        assert!(!b.click(&click_at(5, 5, 1)));
        assert_eq!(*seen.borrow(), vec![("Go".to_string(), 7)]);

        let mut plain = Button::new(0, 0, 50, 20, 8, "No", StateBits::DRAW_NONE, None);
        assert!(!plain.click(&click_at(5, 5, 1)));
    }
}
