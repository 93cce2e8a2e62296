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
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
/// Keyboard input delivered to [`crate::Widget::key_press`].
pub enum Key {
    /// Printable character.
    Char(char),
    /// Left control.
    LCtrl,
    /// Right control.
    RCtrl,
    /// Delete forward.
    Delete,
    /// Delete backward.
    Backspace,
    /// Enter.
    Return,
    /// Cursor left.
    Left,
    /// Cursor right.
    Right,
    /// Cursor up.
    Up,
    /// Cursor down.
    Down,
    /// Any other key code, ignored by the widgets.
    Other(i32),
}

const SDLK_BACKSPACE: i32 = 8;
const SDLK_RETURN: i32 = 13;
const SDLK_DELETE: i32 = 127;
const SDLK_RIGHT: i32 = 0x4000_004F;
const SDLK_LEFT: i32 = 0x4000_0050;
const SDLK_DOWN: i32 = 0x4000_0051;
const SDLK_UP: i32 = 0x4000_0052;
const SDLK_LCTRL: i32 = 0x4000_00E0;
const SDLK_RCTRL: i32 = 0x4000_00E4;

impl Key {
    /// Maps an SDL keycode. Printable ASCII becomes [`Key::Char`].
    pub fn from_sdl(code: i32) -> Self {
        match code {
            SDLK_BACKSPACE => Self::Backspace,
            SDLK_RETURN => Self::Return,
            SDLK_DELETE => Self::Delete,
            SDLK_RIGHT => Self::Right,
            SDLK_LEFT => Self::Left,
            SDLK_DOWN => Self::Down,
            SDLK_UP => Self::Up,
            SDLK_LCTRL => Self::LCtrl,
            SDLK_RCTRL => Self::RCtrl,
            32..=126 => Self::Char(code as u8 as char),
            _ => Self::Other(code),
        }
    }

    /// Returns `true` for either control key.
    pub fn is_ctrl(&self) -> bool { matches!(self, Self::LCtrl | Self::RCtrl) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sdl_codes() {
        assert_eq!(Key::from_sdl(8), Key::Backspace);
        assert_eq!(Key::from_sdl(0x4000_004F), Key::Right);
        assert_eq!(Key::from_sdl('z' as i32), Key::Char('z'));
        assert_eq!(Key::from_sdl(27), Key::Other(27));
        assert!(Key::from_sdl(0x4000_00E4).is_ctrl());
    }
}
