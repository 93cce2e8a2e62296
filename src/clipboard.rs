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
use std::cell::RefCell;
use std::rc::Rc;

use crate::*;

/// Text clipboard used by the entry copy and paste commands.
pub trait Clipboard {
    /// Returns the clipboard contents.
    fn text(&mut self) -> Result<String>;
    /// Replaces the clipboard contents.
    fn set_text(&mut self, text: &str) -> Result<()>;
}

#[derive(Default, Clone, Debug)]
/// Process local clipboard. Used when no system clipboard is wired in.
pub struct LocalClipboard {
    text: String,
}

impl Clipboard for LocalClipboard {
    fn text(&mut self) -> Result<String> { Ok(self.text.clone()) }

    fn set_text(&mut self, text: &str) -> Result<()> {
        self.text = text.to_string();
        Ok(())
    }
}

#[cfg(feature = "system-clipboard")]
/// Clipboard backed by the operating system through `arboard`.
pub struct SystemClipboard {
    inner: arboard::Clipboard,
}

#[cfg(feature = "system-clipboard")]
impl SystemClipboard {
    /// Connects to the system clipboard.
    pub fn new() -> Result<Self> {
        let inner = arboard::Clipboard::new().map_err(|e| WidgetError::Clipboard(e.to_string()))?;
        Ok(Self { inner })
    }
}

#[cfg(feature = "system-clipboard")]
impl Clipboard for SystemClipboard {
    fn text(&mut self) -> Result<String> { self.inner.get_text().map_err(|e| WidgetError::Clipboard(e.to_string())) }

    fn set_text(&mut self, text: &str) -> Result<()> { self.inner.set_text(text.to_string()).map_err(|e| WidgetError::Clipboard(e.to_string())) }
}

#[derive(Clone)]
/// Shared handle to the clipboard owned by a [`ResourceContext`].
pub struct ClipboardHandle(Rc<RefCell<Box<dyn Clipboard>>>);

impl Default for ClipboardHandle {
    fn default() -> Self { Self::new(Box::new(LocalClipboard::default())) }
}

impl ClipboardHandle {
    /// Wraps a clipboard implementation.
    pub fn new(clipboard: Box<dyn Clipboard>) -> Self { Self(Rc::new(RefCell::new(clipboard))) }

    /// Swaps the implementation for every holder of this handle.
    pub fn replace(&self, clipboard: Box<dyn Clipboard>) { *self.0.borrow_mut() = clipboard; }

    /// Reads the clipboard.
    pub fn text(&self) -> Result<String> { self.0.borrow_mut().text() }

    /// Writes the clipboard.
    pub fn set_text(&self, text: &str) -> Result<()> { self.0.borrow_mut().set_text(text) }
}
