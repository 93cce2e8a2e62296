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
macro_rules! implement_widget {
    ($ty:ty, $draw:ident, $click:ident) => {
        impl Widget for $ty {
            fn base(&self) -> &WidgetBase { &self.base }
            fn base_mut(&mut self) -> &mut WidgetBase { &mut self.base }
            fn draw(&mut self, ctx: &mut DrawCtx<'_>) -> Result<()> { self.$draw(ctx) }
            fn click(&mut self, md: &MouseData) -> bool { self.$click(md) }
        }
    };
}

mod button;
mod entry;
mod label;
mod picture;
mod separator;
mod shape;

pub use button::*;
pub use entry::*;
pub use label::*;
pub use picture::*;
pub use separator::*;
pub use shape::*;

use crate::*;

/// Logs a render failure and paints the red indicator over `r`.
pub(crate) fn render_failed(ctx: &mut DrawCtx<'_>, r: Recti, what: &str, err: &WidgetError) {
    log::warn!("{} failed to render: {}", what, err);
    ctx.draw_error_rect(r);
}

/// Text height inset, text height and scaled text width for a string texture drawn into a
/// widget `h` pixels high.
pub(crate) fn text_extent(t: &Texture, h: i32) -> (i32, i32, i32) {
    let inset = h / 4;
    let th = h - inset;
    let tw = if t.height > 0 { (th as f32 * (t.width as f32 / t.height as f32)) as i32 } else { 0 };
    (inset, th, tw)
}

/// Renders (or fetches) the string texture cached under `key` in the widget foreground.
pub(crate) fn string_texture(ctx: &mut DrawCtx<'_>, key: &str, text: &str, fg: Color) -> Result<Texture> {
    let font = ctx.font().ok_or(WidgetError::FontNotLoaded)?;
    ctx.resources.update_texture_from_string(ctx.renderer, key, text, font, fg)
}
