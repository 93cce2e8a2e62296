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
use bitflags::*;

bitflags! {
    #[derive(Copy, Clone, Debug, PartialEq, Eq)]
    /// Packed style and runtime state of a widget.
    ///
    /// The low byte holds style bits fixed at construction, the second byte holds the
    /// runtime state mutated during interaction.
    pub struct StateBits : u32 {
        /// Draw a border around the widget.
        const DRAW_BORDER = 0x0001;
        /// Fill the widget background.
        const DRAW_BG = 0x0002;
        /// Widget accepts keyboard focus.
        const FOCUSABLE = 0x0004;
        /// Widget is enabled.
        const ENABLED = 0x0100;
        /// Widget is visible.
        const VISIBLE = 0x0200;
        /// Widget is not inside a click debounce period.
        const NOT_CLICKED = 0x0400;
        /// Widget wants keyboard focus.
        const FOCUSED = 0x0800;
        /// Widget is flagged as being in error.
        const ERROR = 0x1000;
        /// No style bits.
        const DRAW_NONE = 0;
        /// Border and background.
        const DRAW_BORDER_AND_BG = Self::DRAW_BORDER.bits() | Self::DRAW_BG.bits();
        /// All bits that must be set for a widget to react to input.
        const ENA_SET = Self::ENABLED.bits() | Self::VISIBLE.bits() | Self::NOT_CLICKED.bits();
        /// Bits belonging to the style region.
        const STYLE_MASK = 0x00FF;
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[repr(usize)]
/// Row of the resource color table selected by a widget state.
pub enum ColourState {
    /// Plain enabled widget.
    Enabled = 0,
    /// Disabled, hidden, or debouncing widget.
    Disabled = 1,
    /// Focused widget.
    Focused = 2,
    /// Widget flagged in error.
    Error = 3,
}

impl ColourState {
    /// Number of rows in the color table.
    pub const COUNT: usize = 4;

    /// Parses the config-file name of a state row.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "enabled" => Some(Self::Enabled),
            "disabled" => Some(Self::Disabled),
            "focused" => Some(Self::Focused),
            "error" => Some(Self::Error),
            _ => None,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[repr(usize)]
/// Column of the resource color table.
pub enum StyleSlot {
    /// Foreground (text) color.
    Fg = 0,
    /// Background fill color.
    Bg = 1,
    /// Border color.
    Border = 2,
}

impl StyleSlot {
    /// Number of columns in the color table.
    pub const COUNT: usize = 3;

    /// Parses the config-file name of a style column.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "fg" => Some(Self::Fg),
            "bg" => Some(Self::Bg),
            "border" => Some(Self::Border),
            _ => None,
        }
    }
}

impl StateBits {
    /// Initial bits for a widget constructed with `style`: runtime state cleared, then enabled,
    /// visible, and not clicked.
    pub fn initial(style: StateBits) -> Self { (style & Self::STYLE_MASK) | Self::ENA_SET }

    /// Returns `true` when the widget reacts to input.
    pub fn is_enabled(&self) -> bool { self.contains(Self::ENA_SET) }
    /// Returns `true` when the widget is visible.
    pub fn is_visible(&self) -> bool { self.contains(Self::VISIBLE) }
    /// Returns `true` when the focus bit is set and the widget is enabled.
    pub fn is_focused(&self) -> bool { self.contains(Self::FOCUSED) && self.is_enabled() }
    /// Returns `true` when the error bit is set.
    pub fn is_error(&self) -> bool { self.contains(Self::ERROR) }
    /// Returns `true` while a click debounce is active.
    pub fn is_clicked(&self) -> bool { !self.contains(Self::NOT_CLICKED) }
    /// Returns `true` when the widget accepts focus.
    pub fn can_focus(&self) -> bool { self.contains(Self::FOCUSABLE) }
    /// Returns `true` when the background should be filled.
    pub fn should_draw_background(&self) -> bool { self.contains(Self::DRAW_BG) }
    /// Returns `true` when the border should be drawn.
    pub fn should_draw_border(&self) -> bool { self.contains(Self::DRAW_BORDER) }

    /// Derives the color table row: error over focus over enabled, disabled otherwise.
    pub fn colour_state(&self) -> ColourState {
        if !self.is_enabled() {
            return ColourState::Disabled;
        }
        if self.is_error() {
            ColourState::Error
        } else if self.contains(Self::FOCUSED) {
            ColourState::Focused
        } else {
            ColourState::Enabled
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initial_keeps_only_style() {
        let s = StateBits::initial(StateBits::DRAW_BORDER_AND_BG | StateBits::ERROR);
        assert!(s.should_draw_border());
        assert!(s.should_draw_background());
        assert!(s.is_enabled());
        assert!(!s.is_error());
        assert!(!s.is_clicked());
    }

    #[test]
    fn colour_state_precedence() {
        let mut s = StateBits::initial(StateBits::DRAW_NONE);
        assert_eq!(s.colour_state(), ColourState::Enabled);
        s |= StateBits::FOCUSED;
        assert_eq!(s.colour_state(), ColourState::Focused);
        s |= StateBits::ERROR;
        assert_eq!(s.colour_state(), ColourState::Error);
        s.remove(StateBits::NOT_CLICKED);
        assert_eq!(s.colour_state(), ColourState::Disabled);
    }

    #[test]
    fn focus_requires_enabled() {
        let mut s = StateBits::initial(StateBits::FOCUSABLE) | StateBits::FOCUSED;
        assert!(s.is_focused());
        s.remove(StateBits::VISIBLE);
        assert!(!s.is_focused());
    }
}
