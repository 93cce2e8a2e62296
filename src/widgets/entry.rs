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
use std::collections::VecDeque;

use super::*;

const INDENT: i32 = 10;
const CARET_WIDTH: i32 = 5;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
/// Reason an [`Entry`] change callback fired.
pub enum ChangeKind {
    /// Characters typed or pasted at the cursor.
    Insert,
    /// Character at the cursor removed.
    Delete,
    /// Character before the cursor removed.
    Backspace,
    /// Previous value restored from history.
    Undo,
    /// Return pressed. The old value is empty and the new value is the current text.
    Finish,
    /// Entry gained focus.
    Focus,
    /// Entry lost focus.
    Unfocus,
    /// Drag selection offered. Values are the old and proposed selected text.
    Selected,
}

#[derive(Clone, Debug, PartialEq, Eq)]
/// Result of an [`Entry`] change callback.
pub struct ChangeResponse {
    /// Value to apply. Returning the old value vetoes the change.
    pub value: String,
    /// Flags the entry as being in error. The value is still applied.
    pub error: bool,
}

impl ChangeResponse {
    /// Accepts `value`.
    pub fn accept(value: impl Into<String>) -> Self { Self { value: value.into(), error: false } }
    /// Applies `value` and flags the entry in error.
    pub fn error(value: impl Into<String>) -> Self { Self { value: value.into(), error: true } }
}

/// Change callback: `(old, new, kind)`.
pub type OnChange = Box<dyn FnMut(&str, &str, ChangeKind) -> ChangeResponse>;

#[derive(Clone, Debug, PartialEq, Eq)]
/// Mutation queued by input handling and applied at the start of the next draw.
pub enum PendingEdit {
    /// Place the cursor at the glyph under screen x.
    PlaceCursor {
        /// Screen x of the click.
        x: i32,
    },
    /// Select the glyphs spanned by a drag between two screen x values.
    SelectRange {
        /// Drag start.
        from: i32,
        /// Drag end.
        to: i32,
    },
    /// Deliver a notification to the change callback.
    Notify(ChangeKind),
}

#[derive(Copy, Clone, Debug)]
struct GlyphSpan {
    pos: usize,
    x: i32,
    width: i32,
}

impl GlyphSpan {
    fn inside(&self, x: i32) -> bool { x >= self.x && x <= self.x + self.width }
}

/// Single line editable text field.
///
/// Each character is drawn from a per color glyph texture in the shared cache. The visible
/// window starts at the lead-in character and scrolls one character per frame to follow the
/// cursor. Selection bounds are inclusive character indices.
pub struct Entry {
    base: WidgetBase,
    text: String,
    cursor: usize,
    selection: Option<(usize, usize)>,
    history: Vec<String>,
    lead_in: usize,
    lead_out: usize,
    spans: Vec<GlyphSpan>,
    glyph_colour: Option<Color>,
    invalid: bool,
    drag_from: i32,
    drag_to: i32,
    dragging: bool,
    ctrl_down: bool,
    select_fwd: String,
    select_rev: String,
    pending: VecDeque<PendingEdit>,
    on_change: Option<OnChange>,
    clipboard: ClipboardHandle,
}

impl Entry {
    /// Creates a focusable entry. Word delimiters and the clipboard come from `res`.
    pub fn new(res: &ResourceContext, x: i32, y: i32, w: i32, h: i32, id: WidgetId, text: impl Into<String>, style: StateBits, on_change: Option<OnChange>) -> Self {
        Self {
            base: WidgetBase::new(x, y, w, h, id, style | StateBits::FOCUSABLE),
            text: text.into(),
            cursor: 0,
            selection: None,
            history: Vec::new(),
            lead_in: 0,
            lead_out: 0,
            spans: Vec::new(),
            glyph_colour: None,
            invalid: true,
            drag_from: 0,
            drag_to: 0,
            dragging: false,
            ctrl_down: false,
            select_fwd: res.select_chars_fwd().to_string(),
            select_rev: res.select_chars_rev().to_string(),
            pending: VecDeque::new(),
            on_change,
            clipboard: res.clipboard(),
        }
    }

    /// Current text.
    pub fn text(&self) -> &str { &self.text }

    /// Replaces the text, drops the selection and clamps the cursor.
    pub fn set_text(&mut self, text: impl Into<String>) {
        let text = text.into();
        if self.text != text {
            self.text = text;
            self.selection = None;
            self.invalid = true;
            self.cursor = self.cursor.min(self.len());
        }
    }

    /// Number of characters.
    pub fn len(&self) -> usize { self.text.chars().count() }
    /// Returns `true` when the text is empty.
    pub fn is_empty(&self) -> bool { self.text.is_empty() }

    /// Cursor position, `0..=len`.
    pub fn cursor(&self) -> usize { self.cursor }
    /// First character of the visible window.
    pub fn lead_in(&self) -> usize { self.lead_in }
    /// Last character drawn in the previous frame.
    pub fn lead_out(&self) -> usize { self.lead_out }
    /// Number of undo steps held.
    pub fn history_len(&self) -> usize { self.history.len() }
    /// Selected character range, inclusive.
    pub fn selection(&self) -> Option<(usize, usize)> { self.selection }

    /// Forward word delimiters.
    pub fn select_chars_fwd(&self) -> &str { &self.select_fwd }
    /// Sets the forward word delimiters.
    pub fn set_select_chars_fwd(&mut self, s: &str) { self.select_fwd = s.to_string(); }
    /// Reverse word delimiters.
    pub fn select_chars_rev(&self) -> &str { &self.select_rev }
    /// Sets the reverse word delimiters.
    pub fn set_select_chars_rev(&mut self, s: &str) { self.select_rev = s.to_string(); }

    /// Moves the cursor to `i`, clamped to `0..=len`. The visible window follows on the
    /// following frames.
    pub fn set_cursor(&mut self, i: i32) { self.cursor = i.clamp(0, self.len() as i32) as usize; }

    /// Moves the cursor by `delta` characters, clamped to the text.
    pub fn move_cursor(&mut self, delta: i32) { self.set_cursor(self.cursor as i32 + delta) }

    /// Returns the selected text, empty when nothing is selected.
    pub fn selected_text(&self) -> String {
        match self.selection {
            Some((from, to)) if from <= to => self.text.chars().skip(from).take(to - from + 1).collect(),
            _ => String::new(),
        }
    }

    /// Selects `from..=to`. Fails and drops the selection unless `from <= to <= len`.
    pub fn set_selected_text_bounds(&mut self, from: usize, to: usize) -> Result<()> {
        if from > to || to > self.len() {
            self.selection = None;
            return Err(WidgetError::InvalidSelection { from, to });
        }
        self.selection = Some((from, to));
        Ok(())
    }

    /// Drops the selection.
    pub fn clear_selection(&mut self) { self.selection = None; }

    /// Number of queued edits.
    pub fn pending_len(&self) -> usize { self.pending.len() }

    /// Applies queued cursor placements, drag selections and notifications in arrival order.
    pub fn process_pending(&mut self) {
        while let Some(edit) = self.pending.pop_front() {
            match edit {
                PendingEdit::PlaceCursor { x } => {
                    let pos = self.cursor_for_x(x);
                    self.set_cursor(pos as i32);
                }
                PendingEdit::SelectRange { from, to } => self.select_pixels(from, to),
                PendingEdit::Notify(kind) => {
                    if let Some(on_change) = self.on_change.as_mut() {
                        on_change(&self.text, &self.text, kind);
                    }
                }
            }
        }
    }

    fn byte_index(&self, i: usize) -> usize { self.text.char_indices().nth(i).map(|(b, _)| b).unwrap_or(self.text.len()) }

    fn insert_at_cursor(&self, s: &str) -> String {
        let mut t = self.text.clone();
        t.insert_str(self.byte_index(self.cursor), s);
        t
    }

    fn remove_at(&self, i: usize) -> String {
        let mut t = self.text.clone();
        t.remove(self.byte_index(i));
        t
    }

    fn push_history(&mut self, value: String) {
        if self.history.last() != Some(&value) {
            self.history.push(value);
        }
    }

    fn is_selected(&self, pos: usize) -> bool { matches!(self.selection, Some((from, to)) if pos >= from && pos <= to) }

    /// Start of the word around the cursor: one past the nearest reverse delimiter.
    fn word_start(&self) -> usize {
        let chars: Vec<char> = self.text.chars().collect();
        if chars.is_empty() {
            return 0;
        }
        let cur = self.cursor.min(chars.len() - 1);
        for i in (1..=cur).rev() {
            if self.select_rev.contains(chars[i]) {
                return i + 1;
            }
        }
        0
    }

    /// End of the word around the cursor: one before the nearest forward delimiter.
    fn word_end(&self) -> usize {
        let chars: Vec<char> = self.text.chars().collect();
        for i in self.cursor..chars.len() {
            if self.select_fwd.contains(chars[i]) {
                return i.saturating_sub(1);
            }
        }
        chars.len()
    }

    fn select_at_cursor(&mut self, clicks: u8) -> bool {
        self.process_pending();
        let len = self.len();
        let (from, to) = match clicks {
            2 => (self.word_start(), self.word_end()),
            _ => (0, len.saturating_sub(1)),
        };
        if len == 0 || self.set_selected_text_bounds(from, to).is_err() {
            self.selection = None;
        }
        true
    }

    fn cursor_for_x(&self, x: i32) -> usize {
        for g in &self.spans {
            if g.inside(x) {
                return if (x - g.x) * 2 > g.width { g.pos + 1 } else { g.pos };
            }
        }
        self.len()
    }

    fn select_pixels(&mut self, from: i32, to: i32) {
        let (from, to) = if from <= to { (from, to) } else { (to, from) };
        let mut hits = self.spans.iter().filter(|g| g.x <= to && g.x + g.width >= from);
        let Some(first) = hits.next() else {
            return;
        };
        let last = hits.last().unwrap_or(first);
        let (a, b) = (first.pos, last.pos);
        let proposed: String = self.text.chars().skip(a).take(b - a + 1).collect();
        let old = self.selected_text();
        if let Some(on_change) = self.on_change.as_mut() {
            if on_change(&old, &proposed, ChangeKind::Selected).error {
                return;
            }
        }
        self.selection = Some((a, b));
    }

    fn handle_key(&mut self, key: Key, down: bool) -> bool {
        if !self.base.is_focused() {
            return false;
        }
        if key.is_ctrl() {
            self.ctrl_down = down;
            return true;
        }
        if !down {
            return false;
        }
        let old = self.text.clone();
        let mut new = old.clone();
        let mut kind = None;
        let mut insert_len = 1;
        if self.ctrl_down {
            self.ctrl_down = false;
            match key {
                Key::Char('z' | 'Z') => {
                    if let Some(prev) = self.history.pop() {
                        new = prev;
                        kind = Some(ChangeKind::Undo);
                    }
                }
                Key::Char('c' | 'C') => {
                    if let Err(e) = self.clipboard.set_text(&self.selected_text()) {
                        log::warn!("copy failed: {}", e);
                    }
                    return true;
                }
                Key::Char('v' | 'V') => match self.clipboard.text() {
                    Ok(s) => {
                        insert_len = s.chars().count();
                        new = self.insert_at_cursor(&s);
                        kind = Some(ChangeKind::Insert);
                    }
                    Err(e) => log::warn!("paste failed: {}", e),
                },
                _ => (),
            }
        } else {
            let len = self.len();
            match key {
                Key::Delete => {
                    if self.cursor < len {
                        new = self.remove_at(self.cursor);
                        kind = Some(ChangeKind::Delete);
                    }
                }
                Key::Backspace => {
                    if self.cursor > 0 {
                        new = self.remove_at(self.cursor - 1);
                        kind = Some(ChangeKind::Backspace);
                    }
                }
                Key::Return => {
                    if let Some(on_change) = self.on_change.as_mut() {
                        on_change("", &self.text, ChangeKind::Finish);
                    }
                    return true;
                }
                Key::Right => {
                    self.move_cursor(1);
                    return true;
                }
                Key::Left => {
                    self.move_cursor(-1);
                    return true;
                }
                Key::Up => {
                    self.set_cursor(len as i32);
                    return true;
                }
                Key::Down => {
                    self.set_cursor(0);
                    return true;
                }
                Key::Char(c) => {
                    new = self.insert_at_cursor(c.encode_utf8(&mut [0; 4]));
                    kind = Some(ChangeKind::Insert);
                }
                _ => return false,
            }
        }

        let Some(kind) = kind else {
            return false;
        };
        if let Some(on_change) = self.on_change.as_mut() {
            let response = on_change(&old, &new, kind);
            self.base.set_error(response.error);
            new = response.value;
        }
        if new == old {
            return false;
        }
        if kind != ChangeKind::Undo {
            self.push_history(old);
        }
        self.set_text(new);
        match kind {
            ChangeKind::Insert => self.move_cursor(insert_len as i32),
            ChangeKind::Backspace => self.move_cursor(-1),
            _ => (),
        }
        true
    }

    fn handle_click(&mut self, md: &MouseData) -> bool {
        if !self.base.is_enabled() {
            return false;
        }
        if md.click_count() > 1 {
            return self.select_at_cursor(md.click_count());
        }
        if md.is_dragging() {
            if self.dragging {
                self.drag_to = md.dragging_x();
            } else {
                self.drag_from = md.dragging_x();
                self.drag_to = self.drag_from;
                self.dragging = true;
            }
            return true;
        }
        self.dragging = false;
        if md.is_dragged() {
            self.pending.push_back(PendingEdit::SelectRange { from: self.drag_from, to: self.drag_to });
            return true;
        }
        self.pending.push_back(PendingEdit::PlaceCursor { x: md.x() });
        true
    }

    fn change_focus(&mut self, focus: bool) {
        if self.base.set_focused(focus) {
            self.pending.push_back(PendingEdit::Notify(if focus { ChangeKind::Focus } else { ChangeKind::Unfocus }));
            self.selection = None;
            self.invalid = true;
        }
    }

    fn focus_lost(&mut self) {
        self.pending.push_back(PendingEdit::Notify(ChangeKind::Unfocus));
        self.selection = None;
        self.invalid = true;
    }

    fn render(&mut self, ctx: &mut DrawCtx<'_>) -> Result<()> {
        self.process_pending();
        if !self.base.is_visible() {
            return Ok(());
        }
        let r = self.base.rect();
        let th = r.height - r.height / 6;
        let ty = (r.height - th) / 2;
        let fg = self.base.foreground(ctx.resources);

        if self.invalid || self.glyph_colour != Some(fg) {
            let refreshed = match ctx.font() {
                Some(font) => ctx.resources.update_cached_glyphs(ctx.renderer, font, fg, &self.text),
                None => Err(WidgetError::FontNotLoaded),
            };
            if let Err(e) = refreshed {
                render_failed(ctx, r, "entry", &e);
                return Ok(());
            }
            self.invalid = false;
            self.glyph_colour = Some(fg);
        }
        let glyphs = ctx.resources.scaled_glyph_list(&self.text, fg, th);

        let len = self.len();
        if self.lead_in >= len {
            self.lead_in = len.saturating_sub(1);
        }

        self.base.draw_background(ctx);
        let focused = self.base.is_focused();
        let select_colour = ctx.resources.cursor_select_colour();
        if self.dragging && focused {
            let x = self.drag_from.min(self.drag_to);
            ctx.renderer.fill_rect(rect(x, r.y + 1, (self.drag_to - self.drag_from).abs(), r.height - 2), select_colour);
        }

        let paint_caret = focused && ctx.renderer.ticks() % 1000 > 300;
        let at_end = self.cursor >= len;
        let max = r.x + r.width;
        let mut tx = r.x + INDENT;
        let mut last = self.lead_in;
        let mut caret_shown = false;
        self.spans.clear();
        for g in glyphs.iter().skip(self.lead_in) {
            if tx + g.width >= max {
                break;
            }
            let dst = rect(tx, r.y + ty, g.width, th);
            if self.is_selected(g.pos) {
                ctx.renderer.fill_rect(dst, select_colour);
            }
            ctx.renderer.draw_texture(g.texture, None, dst);
            if !at_end && g.pos == self.cursor {
                caret_shown = true;
                if paint_caret {
                    ctx.renderer.fill_rect(rect(tx, r.y, CARET_WIDTH, r.height), ctx.resources.cursor_insert_colour());
                }
            }
            self.spans.push(GlyphSpan { pos: g.pos, x: tx, width: g.width });
            last = g.pos;
            tx += g.width;
        }
        self.lead_out = last;
        if at_end && tx < max && (len == 0 || last + 1 == len) {
            caret_shown = true;
            if paint_caret {
                ctx.renderer.fill_rect(rect(tx, r.y, CARET_WIDTH, r.height), ctx.resources.cursor_append_colour());
            }
        }

        // one character per frame towards the cursor
        if self.cursor < self.lead_in {
            self.lead_in -= 1;
        } else if !caret_shown && self.lead_in + 1 < len {
            self.lead_in += 1;
        } else if self.lead_in > 0 && last + 1 == len && glyphs.get(self.lead_in - 1).is_some_and(|g| tx + g.width < max) {
            self.lead_in -= 1;
        }

        self.base.draw_border(ctx);
        Ok(())
    }
}

impl Selectable for Entry {
    fn selected_text(&self) -> String { Entry::selected_text(self) }
    fn set_selected_text_bounds(&mut self, from: usize, to: usize) -> Result<()> { Entry::set_selected_text_bounds(self, from, to) }
    fn clear_selection(&mut self) { Entry::clear_selection(self) }
}

impl Widget for Entry {
    fn base(&self) -> &WidgetBase { &self.base }
    fn base_mut(&mut self) -> &mut WidgetBase { &mut self.base }
    fn draw(&mut self, ctx: &mut DrawCtx<'_>) -> Result<()> { self.render(ctx) }
    fn click(&mut self, md: &MouseData) -> bool { self.handle_click(md) }
    fn key_press(&mut self, key: Key, down: bool) -> bool { self.handle_key(key, down) }

    fn set_focused(&mut self, f: bool) { self.change_focus(f) }

    fn set_enabled(&mut self, e: bool) {
        let was_focused = self.base.is_focused();
        self.base.set_enabled(e);
        if was_focused && !e {
            self.focus_lost();
        }
    }

    fn set_visible(&mut self, v: bool) {
        let was_focused = self.base.is_focused();
        self.base.set_visible(v);
        if was_focused && !v {
            self.base.set_focused(false);
            self.focus_lost();
        }
    }

    fn process_pending(&mut self) { Entry::process_pending(self) }

    fn clear_selection(&mut self) { Entry::clear_selection(self) }

    fn as_text_entry(&mut self) -> Option<&mut Entry> { Some(self) }
    fn as_selectable(&mut self) -> Option<&mut dyn Selectable> { Some(self) }
}

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

    fn focused(res: &ResourceContext, text: &str, on_change: Option<OnChange>) -> Entry {
        let mut e = Entry::new(res, 0, 0, 300, 24, 1, text, StateBits::DRAW_BORDER_AND_BG, on_change);
        e.set_focused(true);
        e
    }

    fn recorder() -> (Rc<RefCell<Vec<(String, String, ChangeKind)>>>, OnChange) {
        let calls = Rc::new(RefCell::new(Vec::new()));
        let log = calls.clone();
        let cb: OnChange = Box::new(move |old: &str, new: &str, kind: ChangeKind| {
            log.borrow_mut().push((old.to_string(), new.to_string(), kind));
            ChangeResponse::accept(new)
        });
        (calls, cb)
    }

    fn type_str(e: &mut Entry, s: &str) {
        for c in s.chars() {
            assert!(e.key_press(Key::Char(c), true));
        }
    }

    #[test]
    fn right_three_then_backspace() {
        let res = resources();
        let mut e = focused(&res, "hello", None);
        assert_eq!(e.cursor(), 0);
        for _ in 0..3 {
            assert!(e.key_press(Key::Right, true));
        }
        assert_eq!(e.cursor(), 3);
        assert!(e.key_press(Key::Backspace, true));
        assert_eq!(e.text(), "helo");
        assert_eq!(e.cursor(), 2);
    }

    #[test]
    fn move_cursor_clamps() {
        let res = resources();
        let mut e = focused(&res, "abcd", None);
        for i in 0..=4 {
            e.set_cursor(2);
            e.move_cursor(i - 2);
            assert_eq!(e.cursor(), i as usize);
        }
        e.move_cursor(-10);
        assert_eq!(e.cursor(), 0);
        e.move_cursor(10);
        assert_eq!(e.cursor(), 4);
        assert!(e.key_press(Key::Down, true));
        assert_eq!(e.cursor(), 0);
        assert!(e.key_press(Key::Up, true));
        assert_eq!(e.cursor(), 4);
    }

    #[test]
    fn keys_need_focus_and_down() {
        let res = resources();
        let mut e = Entry::new(&res, 0, 0, 100, 20, 1, "x", StateBits::DRAW_NONE, None);
        assert!(!e.key_press(Key::Char('a'), true));
        e.set_focused(true);
        assert!(!e.key_press(Key::Char('a'), false));
        assert!(!e.key_press(Key::Other(27), true));
        assert!(e.key_press(Key::Char('a'), true));
        assert_eq!(e.text(), "ax");
    }

    #[test]
    fn delete_and_bounds() {
        let res = resources();
        let mut e = focused(&res, "abc", None);
        assert!(!e.key_press(Key::Backspace, true));
        assert!(e.key_press(Key::Delete, true));
        assert_eq!((e.text(), e.cursor()), ("bc", 0));
        e.set_cursor(2);
        assert!(!e.key_press(Key::Delete, true));
        assert_eq!(e.text(), "bc");
    }

    #[test]
    fn undo_restores_without_duplicate_history() {
        let res = resources();
        let mut e = focused(&res, "ab", None);
        e.set_cursor(2);
        type_str(&mut e, "c");
        assert_eq!(e.history_len(), 1);

        assert!(e.key_press(Key::LCtrl, true));
        assert!(e.key_press(Key::Char('z'), true));
        assert_eq!(e.text(), "ab");
        assert_eq!(e.history_len(), 0);

        // the latch clears after one command
        assert!(e.key_press(Key::Char('z'), true));
        assert_eq!(e.text(), "abz");

        // "ab" is already the newest entry and is not pushed again
        e.set_text("ab");
        e.set_cursor(2);
        type_str(&mut e, "c");
        assert_eq!(e.history_len(), 1);
        e.key_press(Key::RCtrl, true);
        e.key_press(Key::Char('z'), true);
        assert_eq!((e.text(), e.history_len()), ("ab", 0));
        type_str(&mut e, "c");
        e.key_press(Key::RCtrl, true);
        e.key_press(Key::Char('z'), true);
        assert_eq!((e.text(), e.history_len()), ("ab", 0));

        type_str(&mut e, "cd");
        assert_eq!(e.history_len(), 2);
        e.key_press(Key::RCtrl, true);
        e.key_press(Key::Char('z'), true);
        assert_eq!((e.text(), e.history_len()), ("abc", 1));
        e.key_press(Key::RCtrl, true);
        e.key_press(Key::Char('z'), true);
        assert_eq!((e.text(), e.history_len()), ("ab", 0));
    }

    #[test]
    fn copy_and_paste_share_clipboard() {
        let res = resources();
        let mut e = focused(&res, "hello world", None);
        e.set_selected_text_bounds(0, 4).unwrap();
        e.key_press(Key::LCtrl, true);
        assert!(e.key_press(Key::Char('c'), true));
        assert_eq!(res.clipboard().text().unwrap(), "hello");

        let mut other = focused(&res, "!", None);
        other.key_press(Key::LCtrl, true);
        other.key_press(Key::LCtrl, false);
        assert!(other.key_press(Key::Char('v'), true));
        assert_eq!(other.text(), "v!");

        other.key_press(Key::LCtrl, true);
        assert!(other.key_press(Key::Char('v'), true));
        assert_eq!(other.text(), "vhello!");
        assert_eq!(other.cursor(), 6);
    }

    #[test]
    fn callback_can_transform_and_flag() {
        let res = resources();
        let cb: OnChange = Box::new(|_old: &str, new: &str, _kind: ChangeKind| {
            if new.chars().all(|c| c.is_ascii_digit()) { ChangeResponse::accept(new) } else { ChangeResponse::error(new.to_uppercase()) }
        });
        let mut e = focused(&res, "", Some(cb));
        type_str(&mut e, "1");
        assert!(!e.is_error());
        type_str(&mut e, "a");
        assert_eq!(e.text(), "1A");
        assert!(e.is_error());

        let veto: OnChange = Box::new(|old: &str, _new: &str, _kind: ChangeKind| ChangeResponse::accept(old));
        let mut v = focused(&res, "keep", Some(veto));
        assert!(!v.key_press(Key::Char('x'), true));
        assert_eq!((v.text(), v.history_len()), ("keep", 0));
    }

    #[test]
    fn return_and_focus_notify() {
        let res = resources();
        let (calls, cb) = recorder();
        let mut e = Entry::new(&res, 0, 0, 100, 20, 1, "done", StateBits::DRAW_NONE, Some(cb));
        e.set_focused(true);
        e.set_focused(true);
        assert!(e.key_press(Key::Return, true));
        e.set_focused(false);
        assert_eq!(e.pending_len(), 2);
        e.process_pending();

        let calls = calls.borrow();
        assert_eq!(calls[0], (String::new(), "done".to_string(), ChangeKind::Finish));
        assert_eq!(calls[1].2, ChangeKind::Focus);
        assert_eq!(calls[2].2, ChangeKind::Unfocus);
        assert_eq!(calls.len(), 3);
    }

    #[test]
    fn disable_drops_focus() {
        let res = resources();
        let mut e = focused(&res, "x", None);
        assert!(e.is_focused());
        e.set_enabled(false);
        assert!(!e.is_focused());
        e.set_enabled(true);
        assert!(!e.is_focused());
        assert!(!e.key_press(Key::Char('y'), true));
    }

    #[test]
    fn hiding_drops_focus_and_notifies() {
        let res = resources();
        let (calls, cb) = recorder();
        let mut e = focused(&res, "x", Some(cb));
        e.process_pending();
        e.set_visible(false);
        assert!(!e.is_focused());
        assert_eq!(e.pending_len(), 1);
        e.process_pending();
        assert_eq!(calls.borrow().last().map(|c| c.2), Some(ChangeKind::Unfocus));

        e.set_visible(true);
        assert!(!e.is_focused());
        e.set_visible(false);
        assert_eq!(e.pending_len(), 0);
    }

    #[test]
    fn selection_bounds() {
        let res = resources();
        let mut e = focused(&res, "abcdef", None);
        e.set_selected_text_bounds(1, 3).unwrap();
        assert_eq!(e.selected_text(), "bcd");
        assert!(e.set_selected_text_bounds(3, 1).is_err());
        assert_eq!(e.selected_text(), "");
        assert!(e.set_selected_text_bounds(0, 7).is_err());
        e.set_selected_text_bounds(2, 6).unwrap();
        assert_eq!(e.selected_text(), "cdef");
        e.set_text("other");
        assert_eq!(e.selection(), None);
    }

    #[test]
    fn double_click_selects_word() {
        let res = resources();
        let mut e = focused(&res, "a/b.c", None);
        e.set_cursor(2);
        assert!(e.click(&click_at(0, 0, 2)));
        assert_eq!(e.selected_text(), "b");

        let mut path = focused(&res, "usr/local/bin", None);
        path.set_cursor(6);
        path.click(&click_at(0, 0, 2));
        assert_eq!(path.selected_text(), "local");
    }

    #[test]
    fn triple_click_selects_all() {
        let res = resources();
        let mut e = focused(&res, "a/b.c", None);
        e.set_cursor(4);
        assert!(e.click(&click_at(0, 0, 3)));
        assert_eq!(e.selected_text(), "a/b.c");

        let mut empty = focused(&res, "", None);
        assert!(empty.click(&click_at(0, 0, 3)));
        assert_eq!(empty.selection(), None);
    }

    fn draw(e: &mut Entry, res: &ResourceContext, r: &mut MockRenderer) { e.draw(&mut DrawCtx::new(r, res)).unwrap(); }

    #[test]
    fn draw_lays_out_glyphs_and_caret() {
        let res = resources();
        let mut r = MockRenderer::new();
        r.ticks = 500;
        let mut e = focused(&res, "abc", None);
        e.set_cursor(1);
        draw(&mut e, &res, &mut r);

        // 24 high: text 20 high, glyphs 10 wide at 20 high
        let draws = r.texture_draws();
        assert_eq!(draws.len(), 3);
        assert_eq!(draws[0].2, (10, 2, 10, 20));
        assert_eq!(draws[2].2, (30, 2, 10, 20));
        assert_eq!(r.fills_with(res.cursor_insert_colour()), vec![(20, 0, 5, 24)]);
        assert_eq!(r.outlines_with(color(255, 255, 0, 255)), vec![(1, 1, 298, 22)]);
        assert_eq!(e.lead_out(), 2);

        r.clear_calls();
        e.set_cursor(3);
        draw(&mut e, &res, &mut r);
        assert_eq!(r.fills_with(res.cursor_append_colour()), vec![(40, 0, 5, 24)]);

        r.clear_calls();
        r.ticks = 1200;
        draw(&mut e, &res, &mut r);
        assert!(r.fills_with(res.cursor_append_colour()).is_empty());
    }

    #[test]
    fn click_places_cursor_on_next_draw() {
        let res = resources();
        let mut r = MockRenderer::new();
        let mut e = focused(&res, "abcd", None);
        draw(&mut e, &res, &mut r);

        assert!(e.click(&click_at(22, 5, 1)));
        assert_eq!(e.pending_len(), 1);
        assert_eq!(e.cursor(), 0);
        draw(&mut e, &res, &mut r);
        assert_eq!(e.cursor(), 1);

        e.click(&click_at(28, 5, 1));
        e.process_pending();
        assert_eq!(e.cursor(), 2);

        e.click(&click_at(250, 5, 1));
        e.process_pending();
        assert_eq!(e.cursor(), 4);
    }

    #[test]
    fn drag_selects_spanned_glyphs() {
        let res = resources();
        let mut r = MockRenderer::new();
        let (calls, cb) = recorder();
        let mut e = focused(&res, "abcdef", Some(cb));
        draw(&mut e, &res, &mut r);

        let mut md = click_at(25, 5, 1);
        md.set_dragging(true);
        assert!(e.click(&md));
        md.set_xy(44, 5);
        assert!(e.click(&md));

        r.clear_calls();
        draw(&mut e, &res, &mut r);
        assert_eq!(r.fills_with(res.cursor_select_colour()), vec![(25, 1, 19, 22)]);

        md.set_dragged(true);
        assert!(e.click(&md));
        e.process_pending();
        assert_eq!(e.selected_text(), "bcd");
        assert_eq!(calls.borrow().last().cloned(), Some((String::new(), "bcd".to_string(), ChangeKind::Selected)));
    }

    #[test]
    fn rejected_drag_keeps_selection() {
        let res = resources();
        let mut r = MockRenderer::new();
        let cb: OnChange = Box::new(|old: &str, _new: &str, _kind: ChangeKind| ChangeResponse::error(old));
        let mut e = focused(&res, "abcdef", Some(cb));
        draw(&mut e, &res, &mut r);
        e.set_selected_text_bounds(0, 0).unwrap();

        let mut md = click_at(25, 5, 1);
        md.set_dragging(true);
        e.click(&md);
        md.set_xy(44, 5);
        e.click(&md);
        md.set_dragged(true);
        e.click(&md);
        e.process_pending();
        assert_eq!(e.selected_text(), "a");
    }

    #[test]
    fn render_failure_paints_red_and_retries() {
        let res = resources();
        let mut r = MockRenderer::new();
        r.fail_text = true;
        let mut e = focused(&res, "ab", None);
        draw(&mut e, &res, &mut r);
        assert_eq!(r.outlines_with(Color::ERROR_RED), vec![(0, 0, 300, 24)]);
        assert!(r.texture_draws().is_empty());

        r.fail_text = false;
        r.clear_calls();
        draw(&mut e, &res, &mut r);
        assert_eq!(r.texture_draws().len(), 2);
        assert!(r.outlines_with(Color::ERROR_RED).is_empty());
    }

    #[test]
    fn narrow_entry_scrolls_towards_cursor() {
        let res = resources();
        let mut r = MockRenderer::new();
        let mut e = Entry::new(&res, 0, 0, 60, 24, 1, "abcdefghij", StateBits::DRAW_NONE, None);
        e.set_focused(true);
        e.set_cursor(10);
        draw(&mut e, &res, &mut r);
        // window of 4 glyphs between x 10 and 60
        assert_eq!((e.lead_in(), e.lead_out()), (1, 3));
        for _ in 0..10 {
            draw(&mut e, &res, &mut r);
        }
        assert_eq!(e.lead_out(), 9);
        assert_eq!(e.lead_in(), 6);

        e.set_cursor(0);
        for _ in 0..10 {
            draw(&mut e, &res, &mut r);
        }
        assert_eq!(e.lead_in(), 0);
    }
}
