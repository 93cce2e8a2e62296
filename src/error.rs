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
use std::path::PathBuf;

use thiserror::Error;

/// Errors reported by widgets, resources, and render backends.
#[derive(Debug, Error)]
pub enum WidgetError {
    /// A backend failed to create a texture or render text.
    #[error("render failed: {0}")]
    Render(String),
    /// Text was requested before a font was loaded.
    #[error("no font has been loaded")]
    FontNotLoaded,
    /// Image bytes could not be decoded.
    #[error("image '{path}': {reason}")]
    Image {
        /// Source of the image bytes.
        path: String,
        /// Decoder message.
        reason: String,
    },
    /// Underlying IO failure.
    #[error(transparent)]
    Io(#[from] std::io::Error),
    /// Selection bounds outside the text.
    #[error("invalid selection from:{from}, to:{to}")]
    InvalidSelection {
        /// First selected character.
        from: usize,
        /// Last selected character.
        to: usize,
    },
    /// A configuration entry was rejected.
    #[error("{0}")]
    Config(String),
    /// No cached texture exists for the name.
    #[error("texture cache does not contain {0}")]
    TextureNotFound(String),
    /// A directory listing returned nothing.
    #[error("no files found for path {}", .0.display())]
    EmptyDirectory(PathBuf),
    /// The clipboard could not be read or written.
    #[error("clipboard: {0}")]
    Clipboard(String),
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, WidgetError>;
