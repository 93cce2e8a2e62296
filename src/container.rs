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
use std::time::Instant;

use crate::*;

/// Ordered collection of widgets that is itself a widget.
///
/// Broadcast operations run in insertion order; lookups and hit tests return the first match.
pub struct SubGroup {
    base: WidgetBase,
    font: Option<FontId>,
    widgets: Vec<Box<dyn Widget>>,
}

impl SubGroup {
    /// Creates an empty sub-group. `font` overrides the resource font for its members.
    pub fn new(x: i32, y: i32, w: i32, h: i32, id: WidgetId, font: Option<FontId>, style: StateBits) -> Self {
        Self { base: WidgetBase::new(x, y, w, h, id, style), font, widgets: Vec::new() }
    }

    /// Font override for members.
    pub fn font(&self) -> Option<FontId> { self.font }
    /// Sets the font override.
    pub fn set_font(&mut self, font: Option<FontId>) { self.font = font; }

    /// Appends a widget and returns it.
    pub fn add(&mut self, widget: Box<dyn Widget>) -> &mut dyn Widget {
        self.widgets.push(widget);
        let last = self.widgets.len() - 1;
        &mut *self.widgets[last]
    }

    /// Number of members.
    pub fn len(&self) -> usize { self.widgets.len() }
    /// Returns `true` when there are no members.
    pub fn is_empty(&self) -> bool { self.widgets.is_empty() }
    /// Members in insertion order.
    pub fn widgets(&self) -> &[Box<dyn Widget>] { &self.widgets }
    /// Member ids in insertion order.
    pub fn widget_ids(&self) -> Vec<WidgetId> { self.widgets.iter().map(|w| w.id()).collect() }

    /// Finds a member by id, searching nested containers after direct members.
    pub fn widget_with_id(&self, id: WidgetId) -> Option<&dyn Widget> {
        if let Some(w) = self.widgets.iter().find(|w| w.id() == id) {
            return Some(&**w);
        }
        self.widgets.iter().filter_map(|w| w.as_container()).find_map(|c| c.widget_with_id(id))
    }

    /// Mutable variant of [`SubGroup::widget_with_id`].
    pub fn widget_with_id_mut(&mut self, id: WidgetId) -> Option<&mut dyn Widget> {
        if let Some(i) = self.widgets.iter().position(|w| w.id() == id) {
            let found: &mut dyn Widget = &mut *self.widgets[i];
            return Some(found);
        }
        let i = self.widgets.iter().position(|w| w.as_container().is_some_and(|c| c.widget_with_id(id).is_some()))?;
        self.widgets[i].as_container_mut().and_then(|c| c.widget_with_id_mut(id))
    }

    /// Id of the first member under the point, descending into nested containers.
    pub fn inside_widget_id(&self, x: i32, y: i32) -> Option<WidgetId> {
        let w = self.widgets.iter().find(|w| w.inside(x, y))?;
        match w.as_container() {
            Some(c) => c.inside_widget_id(x, y).or(Some(w.id())),
            None => Some(w.id()),
        }
    }

    /// First member under the point, descending into nested containers. A nested container
    /// with no member under the point is returned itself.
    pub fn inside_widget(&mut self, x: i32, y: i32) -> Option<&mut dyn Widget> {
        let i = self.widgets.iter().position(|w| w.inside(x, y))?;
        let nested = self.widgets[i].as_container().is_some_and(|c| c.inside_widget_id(x, y).is_some());
        if nested {
            return self.widgets[i].as_container_mut().and_then(|c| c.inside_widget(x, y));
        }
        let found: &mut dyn Widget = &mut *self.widgets[i];
        Some(found)
    }

    /// Focuses the focusable member with `id` and unfocuses every other focusable member.
    pub fn set_focused_id(&mut self, id: WidgetId) {
        for w in self.widgets.iter_mut() {
            if w.can_focus() {
                let f = w.id() == id;
                w.set_focused(f);
            }
            if let Some(c) = w.as_container_mut() {
                c.set_focused_id(id);
            }
        }
    }

    /// Unfocuses every focusable member.
    pub fn clear_focus(&mut self) {
        for w in self.widgets.iter_mut() {
            if w.can_focus() {
                w.set_focused(false);
            }
            if let Some(c) = w.as_container_mut() {
                c.clear_focus();
            }
        }
    }

    /// Drops the text selection of every selectable member.
    pub fn clear_selection(&mut self) {
        for w in self.widgets.iter_mut() {
            w.clear_selection();
        }
    }

    /// First focusable member holding focus.
    pub fn focused_widget(&self) -> Option<&dyn Widget> {
        for w in &self.widgets {
            if w.can_focus() && w.is_focused() {
                return Some(&**w);
            }
            if let Some(f) = w.as_container().and_then(|c| c.focused_widget()) {
                return Some(f);
            }
        }
        None
    }

    /// Destroys and removes every member.
    pub fn remove_all_widgets(&mut self) {
        for w in self.widgets.iter_mut() {
            w.destroy();
        }
        self.widgets.clear();
    }

    /// Places visible members left to right from `(x, y)`, `padding` pixels apart. Returns
    /// the position after the last member.
    pub fn arrange_lr(&mut self, x: i32, y: i32, padding: i32) -> (i32, i32) {
        let mut x = x;
        for w in self.widgets.iter_mut().filter(|w| w.is_visible()) {
            w.set_position(x, y);
            x += w.size().x + padding;
        }
        (x, y)
    }

    /// Places visible members right to left ending at `(x, y)`, `padding` pixels apart.
    /// Returns the position before the last member.
    pub fn arrange_rl(&mut self, x: i32, y: i32, padding: i32) -> (i32, i32) {
        let mut x = x;
        for w in self.widgets.iter_mut().filter(|w| w.is_visible()) {
            let width = w.size().x;
            w.set_position(x - width, y);
            x = x - width - padding;
        }
        (x, y)
    }

    /// Union of the member rectangles.
    pub fn smallest_rect(&self) -> Recti { self.widgets.iter().fold(rect(0, 0, 0, 0), |acc, w| union_rect(acc, w.rect())) }

    /// Advances every animated member by one frame.
    pub fn next_frame(&mut self) {
        for w in self.widgets.iter_mut() {
            if let Some(a) = w.as_animatable() {
                a.next_frame();
            }
            if let Some(c) = w.as_container_mut() {
                c.next_frame();
            }
        }
    }

    fn draw_members(&mut self, ctx: &mut DrawCtx<'_>) -> Result<()> {
        let now = Instant::now();
        for w in self.widgets.iter_mut() {
            w.tick(now);
            w.draw(ctx)?;
        }
        Ok(())
    }
}

impl Widget for SubGroup {
    fn base(&self) -> &WidgetBase { &self.base }
    fn base_mut(&mut self) -> &mut WidgetBase { &mut self.base }

    fn draw(&mut self, ctx: &mut DrawCtx<'_>) -> Result<()> {
        if !self.base.is_enabled() {
            Widget::process_pending(self);
            return Ok(());
        }
        self.base.draw_background(ctx);
        let font = self.font;
        ctx.with_font(font, |ctx| self.draw_members(ctx))?;
        if self.base.should_draw_border() {
            let c = self.base.border_colour(ctx.resources);
            let r = self.base.rect();
            ctx.renderer.draw_rect(shrink_rect(r, 1), c);
            ctx.renderer.draw_rect(shrink_rect(r, 2), c);
        }
        Ok(())
    }

    fn click(&mut self, md: &MouseData) -> bool {
        if !self.base.is_enabled() {
            return false;
        }
        self.widgets.iter_mut().filter(|w| w.inside(md.x(), md.y())).any(|w| w.click(md))
    }

    fn key_press(&mut self, key: Key, down: bool) -> bool {
        if !self.base.is_enabled() {
            return false;
        }
        for w in self.widgets.iter_mut() {
            let routed = (w.can_focus() && w.is_focused()) || w.as_container().is_some();
            if routed && w.key_press(key, down) {
                return true;
            }
        }
        false
    }

    fn destroy(&mut self) {
        for w in self.widgets.iter_mut() {
            w.destroy();
        }
    }

    fn process_pending(&mut self) {
        for w in self.widgets.iter_mut() {
            w.process_pending();
        }
    }

    fn set_position(&mut self, x: i32, y: i32) -> bool {
        let min = self.smallest_rect();
        self.set_position_rel(x - min.x, y - min.y)
    }

    fn set_position_rel(&mut self, dx: i32, dy: i32) -> bool {
        if dx == 0 && dy == 0 {
            return false;
        }
        self.base.set_position_rel(dx, dy);
        for w in self.widgets.iter_mut() {
            w.set_position_rel(dx, dy);
        }
        true
    }

    fn scale(&mut self, s: f32) {
        self.base.scale(s);
        for w in self.widgets.iter_mut() {
            w.scale(s);
        }
    }

    fn set_enabled(&mut self, e: bool) {
        self.base.set_enabled(e);
        for w in self.widgets.iter_mut() {
            w.set_enabled(e);
        }
    }

    fn set_visible(&mut self, v: bool) {
        self.base.set_visible(v);
        for w in self.widgets.iter_mut() {
            w.set_visible(v);
        }
    }

    fn clear_selection(&mut self) { SubGroup::clear_selection(self) }

    fn as_container(&self) -> Option<&SubGroup> { Some(self) }
    fn as_container_mut(&mut self) -> Option<&mut SubGroup> { Some(self) }
}

#[derive(Default)]
/// Top level list of sub-groups fed by the host event loop.
pub struct Group {
    font: Option<FontId>,
    sub_groups: Vec<SubGroup>,
}

impl Group {
    /// Creates an empty group. `font` becomes the font of every sub-group it creates.
    pub fn new(font: Option<FontId>) -> Self { Self { font, sub_groups: Vec::new() } }

    /// Creates, appends and returns a new sub-group.
    pub fn new_sub_group(&mut self, x: i32, y: i32, w: i32, h: i32, id: WidgetId, style: StateBits) -> &mut SubGroup {
        self.sub_groups.push(SubGroup::new(x, y, w, h, id, self.font, style));
        let last = self.sub_groups.len() - 1;
        &mut self.sub_groups[last]
    }

    /// Sub-groups in creation order.
    pub fn sub_groups(&self) -> &[SubGroup] { &self.sub_groups }

    /// Sub-group with `id`.
    pub fn sub_group(&self, id: WidgetId) -> Option<&SubGroup> { self.sub_groups.iter().find(|sg| sg.id() == id) }
    /// Mutable sub-group with `id`.
    pub fn sub_group_mut(&mut self, id: WidgetId) -> Option<&mut SubGroup> { self.sub_groups.iter_mut().find(|sg| sg.id() == id) }

    /// Ids of every widget in every sub-group.
    pub fn all_widget_ids(&self) -> Vec<WidgetId> { self.sub_groups.iter().flat_map(|sg| sg.widget_ids()).collect() }

    /// First widget with `id` across sub-groups.
    pub fn widget_with_id(&self, id: WidgetId) -> Option<&dyn Widget> { self.sub_groups.iter().find_map(|sg| sg.widget_with_id(id)) }

    /// Mutable variant of [`Group::widget_with_id`].
    pub fn widget_with_id_mut(&mut self, id: WidgetId) -> Option<&mut dyn Widget> {
        let i = self.sub_groups.iter().position(|sg| sg.widget_with_id(id).is_some())?;
        self.sub_groups[i].widget_with_id_mut(id)
    }

    /// Focuses `id` in every sub-group, unfocusing everything else.
    pub fn set_focused_id(&mut self, id: WidgetId) {
        for sg in self.sub_groups.iter_mut() {
            sg.set_focused_id(id);
        }
    }

    /// Unfocuses every widget.
    pub fn clear_focus(&mut self) {
        for sg in self.sub_groups.iter_mut() {
            sg.clear_focus();
        }
    }

    /// Drops every text selection.
    pub fn clear_selection(&mut self) {
        for sg in self.sub_groups.iter_mut() {
            SubGroup::clear_selection(sg);
        }
    }

    /// First focused widget across sub-groups.
    pub fn focused_widget(&self) -> Option<&dyn Widget> { self.sub_groups.iter().find_map(|sg| sg.focused_widget()) }

    /// Routes a key to the enabled sub-groups until one consumes it.
    pub fn key_press(&mut self, key: Key, down: bool) -> bool { self.sub_groups.iter_mut().filter(|sg| sg.is_enabled()).any(|sg| sg.key_press(key, down)) }

    /// Dispatches a click to the widget under the pointer.
    pub fn click(&mut self, md: &MouseData) -> bool {
        match self.inside_widget(md.x(), md.y()) {
            Some(w) => w.click(md),
            None => false,
        }
    }

    /// First widget under the point in an enabled sub-group.
    pub fn inside_widget(&mut self, x: i32, y: i32) -> Option<&mut dyn Widget> {
        let i = self.sub_groups.iter().position(|sg| sg.is_enabled() && sg.inside_widget_id(x, y).is_some())?;
        self.sub_groups[i].inside_widget(x, y)
    }

    /// Scales every sub-group and its members.
    pub fn scale(&mut self, s: f32) {
        for sg in self.sub_groups.iter_mut() {
            Widget::scale(sg, s);
        }
    }

    /// Advances every animated widget.
    pub fn next_frame(&mut self) {
        for sg in self.sub_groups.iter_mut() {
            sg.next_frame();
        }
    }

    /// Destroys every sub-group.
    pub fn destroy(&mut self) {
        for sg in self.sub_groups.iter_mut() {
            Widget::destroy(sg);
        }
    }

    /// Draws the visible sub-groups in creation order. Hidden sub-groups still apply their
    /// queued input.
    pub fn draw(&mut self, ctx: &mut DrawCtx<'_>) -> Result<()> {
        for sg in self.sub_groups.iter_mut() {
            if sg.is_visible() {
                sg.draw(ctx)?;
            } else {
                Widget::process_pending(sg);
            }
        }
        Ok(())
    }
}
