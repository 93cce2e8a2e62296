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
use std::fmt;

use crate::*;

#[derive(Clone, Debug, Default)]
/// Snapshot of the mouse handed to [`Widget::click`].
///
/// The host updates it from its event loop: position on motion, button and click count on
/// press, drag state while the button is held over a widget.
pub struct MouseData {
    x: i32,
    y: i32,
    dragging_x: i32,
    dragging_y: i32,
    button: u8,
    down: bool,
    dragged: bool,
    dragging: bool,
    widget_id: WidgetId,
    click_count: u8,
}

impl MouseData {
    /// Creates an idle snapshot.
    pub fn new() -> Self { Self::default() }

    /// Records a pointer position. While dragging only the drag target moves.
    pub fn set_xy(&mut self, x: i32, y: i32) {
        if self.dragging {
            self.dragging_x = x;
            self.dragging_y = y;
        } else {
            self.x = x;
            self.y = y;
        }
        self.down = true;
        self.dragged = false;
    }

    /// Sets the pressed button.
    pub fn set_button(&mut self, button: u8) { self.button = button; }
    /// Sets the button state.
    pub fn set_down(&mut self, down: bool) { self.down = down; }
    /// Sets the click count reported by the host (1 single, 2 double, 3 triple).
    pub fn set_click_count(&mut self, n: u8) { self.click_count = n; }

    /// Starts or ends a drag. A new drag targets the pointer position; ending a drag resets
    /// the target and the widget id.
    pub fn set_dragging(&mut self, dragging: bool) {
        if dragging && !self.dragging {
            self.dragging_x = self.x;
            self.dragging_y = self.y;
        }
        if !dragging {
            self.dragging_x = 0;
            self.dragging_y = 0;
            self.widget_id = 0;
        }
        self.dragging = dragging;
    }

    /// Marks a drag as completed on button release.
    pub fn set_dragged(&mut self, dragged: bool) {
        self.dragged = dragged;
        if dragged {
            self.dragging = false;
        }
    }

    /// Sets the widget under the pointer. Changing widget cancels any drag in progress.
    pub fn set_widget_id(&mut self, id: WidgetId) {
        if id != self.widget_id {
            self.dragging_x = 0;
            self.dragging_y = 0;
            self.dragging = false;
            self.dragged = false;
        }
        self.widget_id = id;
    }

    /// Pointer x.
    pub fn x(&self) -> i32 { self.x }
    /// Pointer y.
    pub fn y(&self) -> i32 { self.y }
    /// Current drag target x.
    pub fn dragging_x(&self) -> i32 { self.dragging_x }
    /// Current drag target y.
    pub fn dragging_y(&self) -> i32 { self.dragging_y }
    /// Pressed button.
    pub fn button(&self) -> u8 { self.button }
    /// Button state.
    pub fn is_down(&self) -> bool { self.down }
    /// `true` once a drag has been released.
    pub fn is_dragged(&self) -> bool { self.dragged }
    /// `true` while a drag is in progress.
    pub fn is_dragging(&self) -> bool { self.dragging }
    /// Widget under the pointer.
    pub fn widget_id(&self) -> WidgetId { self.widget_id }
    /// Number of rapid clicks.
    pub fn click_count(&self) -> u8 { self.click_count }
}

impl fmt::Display for MouseData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "x:{} y:{} Dx:{} Dy:{} ID:{} Btn:{} Down:{} Dragged:{} Dragging:{}",
            self.x, self.y, self.dragging_x, self.dragging_y, self.widget_id, self.button, self.down, self.dragged, self.dragging
        )
    }
}

#[cfg(test)]
pub(crate) fn click_at(x: i32, y: i32, count: u8) -> MouseData {
    let mut md = MouseData::new();
    md.set_xy(x, y);
    md.set_button(1);
    md.set_click_count(count);
    md
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drag_tracks_target_only() {
        let mut md = MouseData::new();
        md.set_widget_id(5);
        md.set_xy(10, 20);
        md.set_dragging(true);
        md.set_xy(40, 25);
        assert_eq!((md.x(), md.y()), (10, 20));
        assert_eq!((md.dragging_x(), md.dragging_y()), (40, 25));

        md.set_dragged(true);
        assert!(md.is_dragged());
        assert!(!md.is_dragging());
        assert_eq!(md.dragging_x(), 40);

        md.set_dragging(false);
        assert_eq!((md.dragging_x(), md.widget_id()), (0, 0));
    }

    #[test]
    fn widget_change_cancels_drag() {
        let mut md = MouseData::new();
        md.set_widget_id(1);
        md.set_dragging(true);
        md.set_xy(3, 3);
        md.set_widget_id(2);
        assert!(!md.is_dragging());
        assert_eq!(md.dragging_x(), 0);
        assert_eq!(md.to_string(), "x:0 y:0 Dx:0 Dy:0 ID:2 Btn:0 Down:true Dragged:false Dragging:false");
    }
}
