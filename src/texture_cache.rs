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
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, RwLock};

use crate::*;

#[derive(Clone, Debug)]
/// A renderer texture held by the cache together with the value it was rendered from.
pub struct TextureCacheEntry {
    texture: Option<TextureId>,
    width: i32,
    height: i32,
    value: String,
}

impl TextureCacheEntry {
    /// Wraps a freshly created texture.
    pub fn new(texture: Texture, value: impl Into<String>) -> Self {
        Self { texture: Some(texture.id), width: texture.width, height: texture.height, value: value.into() }
    }

    /// Returns the texture, `None` once destroyed.
    pub fn texture(&self) -> Option<Texture> { self.texture.map(|id| Texture { id, width: self.width, height: self.height }) }

    /// Pixel width.
    pub fn width(&self) -> i32 { self.width }
    /// Pixel height.
    pub fn height(&self) -> i32 { self.height }
    /// Source string or character.
    pub fn value(&self) -> &str { &self.value }

    /// Releases the renderer texture. Returns 1 the first time and 0 afterwards.
    pub fn destroy(&mut self, renderer: &mut dyn Renderer) -> usize {
        match self.texture.take() {
            Some(id) => {
                renderer.destroy_texture(id);
                1
            }
            None => 0,
        }
    }
}

#[derive(Default)]
/// Name keyed store of rendered textures. At most one live texture exists per key.
pub struct TextureCache {
    entries: HashMap<String, TextureCacheEntry>,
    added: usize,
    destroyed: usize,
}

impl TextureCache {
    /// Creates an empty cache.
    pub fn new() -> Self { Self::default() }

    /// Stores `entry` under `name`, destroying any entry it replaces.
    pub fn add(&mut self, renderer: &mut dyn Renderer, name: &str, entry: TextureCacheEntry) {
        if let Some(mut old) = self.entries.insert(name.to_string(), entry) {
            self.destroyed += old.destroy(renderer);
        }
        self.added += 1;
    }

    /// Returns `true` when `name` is cached.
    pub fn peek(&self, name: &str) -> bool { self.entries.contains_key(name) }

    /// Returns the entry for `name`.
    pub fn get(&self, name: &str) -> Option<&TextureCacheEntry> { self.entries.get(name) }

    /// Removes and destroys the entry for `name`. Returns `true` when an entry was present.
    pub fn remove(&mut self, renderer: &mut dyn Renderer, name: &str) -> bool {
        match self.entries.remove(name) {
            Some(mut old) => {
                self.destroyed += old.destroy(renderer);
                true
            }
            None => false,
        }
    }

    /// Destroys every entry once and empties the cache.
    pub fn destroy(&mut self, renderer: &mut dyn Renderer) {
        for (_, mut entry) in self.entries.drain() {
            self.destroyed += entry.destroy(renderer);
        }
    }

    /// Number of cached entries.
    pub fn len(&self) -> usize { self.entries.len() }
    /// Returns `true` when nothing is cached.
    pub fn is_empty(&self) -> bool { self.entries.is_empty() }
    /// Number of entries added since creation.
    pub fn added(&self) -> usize { self.added }
    /// Number of renderer textures released since creation.
    pub fn destroyed(&self) -> usize { self.destroyed }
}

impl fmt::Display for TextureCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "TextureCache in:{} out:{}", self.added, self.destroyed) }
}

#[derive(Clone, Default)]
/// Shared, lock guarded texture cache.
pub struct TextureCacheHandle {
    handle: Arc<RwLock<TextureCache>>,
}

impl TextureCacheHandle {
    /// Wraps a cache so it can be shared.
    pub fn new(cache: TextureCache) -> Self { Self { handle: Arc::new(RwLock::new(cache)) } }

    /// Executes the provided closure with a shared reference to the cache.
    pub fn scope<Res, F: FnOnce(&TextureCache) -> Res>(&self, f: F) -> Res {
        match self.handle.read() {
            Ok(guard) => f(&*guard),
            // A panic while holding the lock leaves the map itself consistent.
            Err(poisoned) => f(&*poisoned.into_inner()),
        }
    }

    /// Executes the provided closure with a mutable reference to the cache.
    pub fn scope_mut<Res, F: FnOnce(&mut TextureCache) -> Res>(&self, f: F) -> Res {
        match self.handle.write() {
            Ok(mut guard) => f(&mut *guard),
            Err(poisoned) => f(&mut *poisoned.into_inner()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MockRenderer;

    fn entry(r: &mut MockRenderer, value: &str) -> TextureCacheEntry {
        let t = r.render_text(FontId::new(0), value, Color::WHITE).unwrap();
        TextureCacheEntry::new(t, value)
    }

    #[test]
    fn entry_destroys_once() {
        let mut r = MockRenderer::new();
        let mut e = entry(&mut r, "a");
        assert_eq!(e.destroy(&mut r), 1);
        assert_eq!(e.destroy(&mut r), 0);
        assert_eq!(r.destroyed_count(), 1);
        assert!(e.texture().is_none());
    }

    #[test]
    fn add_replaces_and_destroys_previous() {
        let mut r = MockRenderer::new();
        let mut cache = TextureCache::new();
        let a = entry(&mut r, "A");
        let a_id = a.texture().unwrap().id;
        let b = entry(&mut r, "B");
        let b_id = b.texture().unwrap().id;

        cache.add(&mut r, "k", a);
        cache.add(&mut r, "k", b);

        assert_eq!(r.destroy_calls(a_id), 1);
        assert_eq!(r.destroy_calls(b_id), 0);
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.get("k").unwrap().value(), "B");
        assert_eq!(cache.get("k").unwrap().texture().unwrap().id, b_id);
    }

    #[test]
    fn peek_remove_and_destroy() {
        let mut r = MockRenderer::new();
        let mut cache = TextureCache::new();
        assert!(!cache.peek("x"));
        let x = entry(&mut r, "x");
        cache.add(&mut r, "x", x);
        let y = entry(&mut r, "y");
        cache.add(&mut r, "y", y);
        assert!(cache.peek("x"));
        assert!(cache.remove(&mut r, "x"));
        assert!(!cache.remove(&mut r, "x"));

        cache.destroy(&mut r);
        assert!(cache.is_empty());
        assert_eq!(r.destroyed_count(), 2);
        assert_eq!(cache.to_string(), "TextureCache in:2 out:2");
    }

    #[test]
    fn handle_clones_share_cache() {
        let mut r = MockRenderer::new();
        let handle = TextureCacheHandle::default();
        let other = handle.clone();
        let e = entry(&mut r, "shared");
        handle.scope_mut(|c| c.add(&mut r, "s", e));
        assert!(other.scope(|c| c.peek("s")));
    }
}
