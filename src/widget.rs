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

use crate::*;

#[derive(Clone, Debug)]
/// Geometry, identity and state shared by every widget.
pub struct WidgetBase {
    x: i32,
    y: i32,
    w: i32,
    h: i32,
    id: WidgetId,
    state: StateBits,
    fg: Option<Color>,
    bg: Option<Color>,
    border: Option<Color>,
    debounce: Duration,
    clicked_until: Option<Instant>,
}

impl WidgetBase {
    /// Creates a base with the runtime state set to enabled, visible and not clicked.
    /// Only the style bits of `style` are kept.
    pub fn new(x: i32, y: i32, w: i32, h: i32, id: WidgetId, style: StateBits) -> Self {
        Self { x, y, w, h, id, state: StateBits::initial(style), fg: None, bg: None, border: None, debounce: Duration::ZERO, clicked_until: None }
    }

    /// Sets the click debounce period.
    pub fn with_debounce(mut self, debounce: Duration) -> Self {
        self.debounce = debounce;
        self
    }

    /// Returns the widget identifier.
    pub fn id(&self) -> WidgetId { self.id }
    /// Replaces the widget identifier.
    pub fn set_id(&mut self, id: WidgetId) { self.id = id; }
    /// Returns the raw state bits.
    pub fn state(&self) -> StateBits { self.state }

    /// Returns the top-left corner as given at construction.
    pub fn position(&self) -> Vec2i { vec2(self.x, self.y) }
    /// Returns the signed width and height.
    pub fn size(&self) -> Vec2i { vec2(self.w, self.h) }

    /// Moves the widget. Returns `true` when the position changed.
    pub fn set_position(&mut self, x: i32, y: i32) -> bool {
        if self.x != x || self.y != y {
            self.x = x;
            self.y = y;
            return true;
        }
        false
    }

    /// Moves the widget by a relative offset.
    pub fn set_position_rel(&mut self, dx: i32, dy: i32) -> bool { self.set_position(self.x + dx, self.y + dy) }

    /// Resizes the widget. Non positive dimensions are ignored.
    pub fn set_size(&mut self, w: i32, h: i32) -> bool {
        let mut changed = false;
        if w > 0 && self.w != w {
            self.w = w;
            changed = true;
        }
        if h > 0 && self.h != h {
            self.h = h;
            changed = true;
        }
        changed
    }

    /// Returns the widget rectangle. A negative width or height anchors the rectangle at the
    /// far corner.
    pub fn rect(&self) -> Recti {
        let x = if self.w < 0 { self.x + self.w } else { self.x };
        let y = if self.h < 0 { self.y + self.h } else { self.y };
        rect(x, y, self.w.abs(), self.h.abs())
    }

    /// Multiplies position and size by `s`.
    pub fn scale(&mut self, s: f32) {
        self.w = (self.w as f32 * s) as i32;
        self.h = (self.h as f32 * s) as i32;
        self.x = (self.x as f32 * s) as i32;
        self.y = (self.y as f32 * s) as i32;
    }

    /// Returns `true` when the widget is visible and the point lies inside its rectangle.
    pub fn inside(&self, x: i32, y: i32) -> bool { self.is_visible() && inside_rect(x, y, self.rect()) }

    fn set_bit(&mut self, bit: StateBits, on: bool) { self.state.set(bit, on); }

    /// Enables or disables the widget. Disabling also drops focus.
    pub fn set_enabled(&mut self, e: bool) {
        self.set_bit(StateBits::ENABLED, e);
        if !e {
            self.set_bit(StateBits::FOCUSED, false);
        }
    }
    /// Returns `true` when enabled, visible and not inside a debounce period.
    pub fn is_enabled(&self) -> bool { self.state.is_enabled() }
    /// Shows or hides the widget.
    pub fn set_visible(&mut self, v: bool) { self.set_bit(StateBits::VISIBLE, v); }
    /// Returns `true` when visible.
    pub fn is_visible(&self) -> bool { self.state.is_visible() }

    /// Requests or drops focus. A request is ignored unless the widget is enabled and focusable.
    /// Returns `true` when the focus bit changed.
    pub fn set_focused(&mut self, f: bool) -> bool {
        let before = self.state.contains(StateBits::FOCUSED);
        if f && !(self.is_enabled() && self.can_focus()) {
            return false;
        }
        self.set_bit(StateBits::FOCUSED, f);
        before != f
    }
    /// Returns `true` when focused and enabled.
    pub fn is_focused(&self) -> bool { self.state.is_focused() }
    /// Returns `true` when the widget accepts focus.
    pub fn can_focus(&self) -> bool { self.state.can_focus() }
    /// Marks the widget as accepting focus.
    pub fn set_can_focus(&mut self, f: bool) { self.set_bit(StateBits::FOCUSABLE, f); }

    /// Sets or clears the error flag.
    pub fn set_error(&mut self, e: bool) { self.set_bit(StateBits::ERROR, e); }
    /// Returns `true` when in error.
    pub fn is_error(&self) -> bool { self.state.is_error() }

    /// Sets or clears the clicked (debouncing) state.
    pub fn set_clicked(&mut self, c: bool) { self.set_bit(StateBits::NOT_CLICKED, !c); }
    /// Returns `true` while the widget is debouncing a click.
    pub fn is_clicked(&self) -> bool { self.state.is_clicked() }

    /// Enables or disables border drawing.
    pub fn set_draw_border(&mut self, d: bool) { self.set_bit(StateBits::DRAW_BORDER, d); }
    /// Returns `true` when the border is drawn.
    pub fn should_draw_border(&self) -> bool { self.state.should_draw_border() }
    /// Enables or disables background filling.
    pub fn set_draw_background(&mut self, d: bool) { self.set_bit(StateBits::DRAW_BG, d); }
    /// Returns `true` when the background is filled.
    pub fn should_draw_background(&self) -> bool { self.state.should_draw_background() }

    /// Overrides the foreground color. `None` restores the resource color.
    pub fn set_foreground(&mut self, c: Option<Color>) { self.fg = c; }
    /// Overrides the background color.
    pub fn set_background(&mut self, c: Option<Color>) { self.bg = c; }
    /// Overrides the border color.
    pub fn set_border_colour(&mut self, c: Option<Color>) { self.border = c; }

    /// Resolves the foreground color for the current state.
    pub fn foreground(&self, res: &ResourceContext) -> Color { self.fg.unwrap_or_else(|| res.colour(self.state.colour_state(), StyleSlot::Fg)) }
    /// Resolves the background color for the current state.
    pub fn background(&self, res: &ResourceContext) -> Color { self.bg.unwrap_or_else(|| res.colour(self.state.colour_state(), StyleSlot::Bg)) }
    /// Resolves the border color for the current state.
    pub fn border_colour(&self, res: &ResourceContext) -> Color { self.border.unwrap_or_else(|| res.colour(self.state.colour_state(), StyleSlot::Border)) }

    /// Returns the click debounce period.
    pub fn debounce(&self) -> Duration { self.debounce }
    /// Changes the click debounce period.
    pub fn set_debounce(&mut self, d: Duration) { self.debounce = d; }

    /// Starts the debounce period. The widget reports clicked and disabled until [`WidgetBase::tick`]
    /// observes the period has elapsed.
    pub fn press(&mut self, now: Instant) {
        if self.debounce.is_zero() {
            return;
        }
        self.set_clicked(true);
        self.clicked_until = Some(now + self.debounce);
    }

    /// Ends an elapsed debounce period.
    pub fn tick(&mut self, now: Instant) {
        if let Some(until) = self.clicked_until {
            if now >= until {
                self.clicked_until = None;
                self.set_clicked(false);
            }
        }
    }

    /// Fills the widget rectangle with the background color when enabled by style.
    pub fn draw_background(&self, ctx: &mut DrawCtx<'_>) {
        if self.should_draw_background() {
            let c = self.background(ctx.resources);
            ctx.renderer.fill_rect(self.rect(), c);
        }
    }

    /// Outlines the widget one pixel inside its rectangle when enabled by style.
    pub fn draw_border(&self, ctx: &mut DrawCtx<'_>) {
        if self.should_draw_border() {
            let c = self.border_colour(ctx.resources);
            ctx.renderer.draw_rect(shrink_rect(self.rect(), 1), c);
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
/// Details handed to click callbacks.
pub struct ClickEvent {
    /// Text of the clicked widget, empty for widgets without text.
    pub text: String,
    /// Identifier of the clicked widget.
    pub id: WidgetId,
    /// Mouse x coordinate.
    pub x: i32,
    /// Mouse y coordinate.
    pub y: i32,
}

/// Click callback. Returns `true` when the click was handled.
pub type OnClick = Box<dyn FnMut(&ClickEvent) -> bool>;

/// Widgets made of a horizontal strip of animation frames.
pub trait Animatable {
    /// Returns the current frame.
    fn frame(&self) -> usize;
    /// Selects a frame. Out of range values wrap to the first frame.
    fn set_frame(&mut self, frame: usize);
    /// Returns the number of frames in the strip.
    fn frame_count(&self) -> usize;
    /// Advances to the next frame, wrapping at the end, and returns it.
    fn next_frame(&mut self) -> usize;
}

/// Widgets holding a text selection.
pub trait Selectable {
    /// Returns the selected text, empty when nothing is selected.
    fn selected_text(&self) -> String;
    /// Selects the inclusive character range `from..=to`.
    fn set_selected_text_bounds(&mut self, from: usize, to: usize) -> Result<()>;
    /// Drops the selection.
    fn clear_selection(&mut self);
}

/// Retained widget driven by a container.
///
/// Only [`Widget::base`], [`Widget::base_mut`], [`Widget::draw`] and [`Widget::click`] are required;
/// everything else forwards to the [`WidgetBase`]. Optional capabilities are discovered at
/// container boundaries through the `as_*` probes.
pub trait Widget {
    /// Shared state.
    fn base(&self) -> &WidgetBase;
    /// Mutable shared state.
    fn base_mut(&mut self) -> &mut WidgetBase;
    /// Renders the widget.
    fn draw(&mut self, ctx: &mut DrawCtx<'_>) -> Result<()>;
    /// Handles a mouse click. Returns `true` when consumed.
    fn click(&mut self, md: &MouseData) -> bool;

    /// Handles a key event. Returns `true` when consumed.
    fn key_press(&mut self, _key: Key, _down: bool) -> bool { false }
    /// Releases widget resources. Cached textures belong to the shared cache.
    fn destroy(&mut self) {}

    /// Returns the widget identifier.
    fn id(&self) -> WidgetId { self.base().id() }
    /// Returns the widget rectangle.
    fn rect(&self) -> Recti { self.base().rect() }
    /// Returns the position.
    fn position(&self) -> Vec2i { self.base().position() }
    /// Returns the size.
    fn size(&self) -> Vec2i { self.base().size() }
    /// Moves the widget.
    fn set_position(&mut self, x: i32, y: i32) -> bool { self.base_mut().set_position(x, y) }
    /// Moves the widget by an offset.
    fn set_position_rel(&mut self, dx: i32, dy: i32) -> bool { self.base_mut().set_position_rel(dx, dy) }
    /// Resizes the widget.
    fn set_size(&mut self, w: i32, h: i32) -> bool { self.base_mut().set_size(w, h) }
    /// Scales geometry.
    fn scale(&mut self, s: f32) { self.base_mut().scale(s) }
    /// Hit test.
    fn inside(&self, x: i32, y: i32) -> bool { self.base().inside(x, y) }

    /// Returns `true` when the widget reacts to input.
    fn is_enabled(&self) -> bool { self.base().is_enabled() }
    /// Enables or disables the widget.
    fn set_enabled(&mut self, e: bool) { self.base_mut().set_enabled(e) }
    /// Returns `true` when visible.
    fn is_visible(&self) -> bool { self.base().is_visible() }
    /// Shows or hides the widget.
    fn set_visible(&mut self, v: bool) { self.base_mut().set_visible(v) }
    /// Returns `true` when focused.
    fn is_focused(&self) -> bool { self.base().is_focused() }
    /// Requests or drops focus.
    fn set_focused(&mut self, f: bool) { self.base_mut().set_focused(f); }
    /// Returns `true` when the widget accepts focus.
    fn can_focus(&self) -> bool { self.base().can_focus() }
    /// Returns `true` when in error.
    fn is_error(&self) -> bool { self.base().is_error() }
    /// Sets or clears the error flag.
    fn set_error(&mut self, e: bool) { self.base_mut().set_error(e) }
    /// Returns `true` while debouncing a click.
    fn is_clicked(&self) -> bool { self.base().is_clicked() }
    /// Sets or clears the clicked state.
    fn set_clicked(&mut self, c: bool) { self.base_mut().set_clicked(c) }
    /// Advances time based state such as click debouncing.
    fn tick(&mut self, now: Instant) { self.base_mut().tick(now) }
    /// Applies input queued for the next frame. Containers call it even when they skip drawing.
    fn process_pending(&mut self) {}

    /// Drops any text selection.
    fn clear_selection(&mut self) {
        if let Some(s) = self.as_selectable() {
            s.clear_selection();
        }
    }

    /// Text entry probe.
    fn as_text_entry(&mut self) -> Option<&mut Entry> { None }
    /// Selection probe.
    fn as_selectable(&mut self) -> Option<&mut dyn Selectable> { None }
    /// Animation probe.
    fn as_animatable(&mut self) -> Option<&mut dyn Animatable> { None }
    /// Container probe.
    fn as_container(&self) -> Option<&SubGroup> { None }
    /// Mutable container probe.
    fn as_container_mut(&mut self) -> Option<&mut SubGroup> { None }
}
