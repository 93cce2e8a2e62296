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
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use crate::*;

/// Default font file name looked up inside the resource directory.
pub const DEFAULT_FONT_FILE: &str = "buttonFont.ttf";
/// Default font pixel size.
pub const DEFAULT_FONT_SIZE: usize = 35;
/// Smallest accepted font size.
pub const MIN_FONT_SIZE: usize = 10;

#[derive(Copy, Clone, Debug)]
/// One glyph of a laid out string, scaled to a target height.
pub struct ScaledGlyph {
    /// Character index in the source string.
    pub pos: usize,
    /// Cached glyph texture.
    pub texture: TextureId,
    /// Width after scaling, aspect ratio preserved.
    pub width: i32,
}

/// Returns the cache key of a glyph rendered in a given color.
pub fn glyph_key(c: char, colour: Color) -> String { format!("|{}{}", c, colour.id()) }

/// Parses `R,G,B` or `R,G,B,A` with components in `0..=255`. Alpha defaults to 255.
pub fn parse_colour(s: &str) -> Result<Color> {
    let parts: Vec<&str> = s.split(',').collect();
    if parts.len() < 3 || parts.len() > 4 {
        return Err(WidgetError::Config(format!("invalid colour. Expecting 3 or 4 byte values (for R,G,B,A) e.g. 255,255,255. found '{}'", s)));
    }
    let mut v = [255u8; 4];
    for (i, p) in parts.iter().enumerate() {
        v[i] = p
            .trim()
            .parse::<u8>()
            .map_err(|_| WidgetError::Config(format!("invalid colour byte. Expecting int value from 0 to 255. Found '{}'", p)))?;
    }
    Ok(color(v[0], v[1], v[2], v[3]))
}

/// Colors, fonts, textures and clipboard shared by every widget.
///
/// Constructed once at startup and handed to constructors and draw calls by reference.
pub struct ResourceContext {
    colours: [[Color; StyleSlot::COUNT]; ColourState::COUNT],
    colour_names: HashMap<String, Color>,
    cursor_insert: Color,
    cursor_append: Color,
    cursor_select: Color,
    select_fwd: String,
    select_rev: String,
    resource_dir: PathBuf,
    font_path: PathBuf,
    font_size: usize,
    font: Option<FontId>,
    textures: TextureCacheHandle,
    clipboard: ClipboardHandle,
}

impl Default for ResourceContext {
    fn default() -> Self { Self::new() }
}

impl ResourceContext {
    /// Creates a context holding the default palette, `resources/buttonFont.ttf` at size 35,
    /// an empty texture cache and a process local clipboard.
    pub fn new() -> Self {
        let resource_dir = std::env::current_dir().map(|p| p.join("resources")).unwrap_or_else(|_| PathBuf::from("resources"));
        let font_path = resource_dir.join(DEFAULT_FONT_FILE);
        let mut colours = [[Color::default(); StyleSlot::COUNT]; ColourState::COUNT];
        colours[ColourState::Enabled as usize] = [color(0, 255, 0, 255), color(0, 100, 0, 255), color(0, 255, 0, 255)];
        colours[ColourState::Disabled as usize] = [color(0, 150, 0, 255), color(0, 100, 0, 255), color(0, 150, 0, 255)];
        colours[ColourState::Focused as usize] = [color(255, 255, 0, 255), color(150, 150, 0, 255), color(255, 255, 0, 255)];
        colours[ColourState::Error as usize] = [color(255, 0, 0, 255), color(100, 0, 0, 255), color(255, 0, 0, 255)];
        Self {
            colours,
            colour_names: HashMap::new(),
            cursor_insert: color(255, 255, 255, 255),
            cursor_append: color(255, 0, 255, 255),
            cursor_select: color(100, 0, 100, 255),
            select_fwd: "/.".to_string(),
            select_rev: "/".to_string(),
            resource_dir,
            font_path,
            font_size: DEFAULT_FONT_SIZE,
            font: None,
            textures: TextureCacheHandle::default(),
            clipboard: ClipboardHandle::default(),
        }
    }

    /// Returns a color from the state/style table.
    pub fn colour(&self, state: ColourState, slot: StyleSlot) -> Color { self.colours[state as usize][slot as usize] }
    /// Replaces a color in the state/style table.
    pub fn set_colour(&mut self, state: ColourState, slot: StyleSlot, c: Color) { self.colours[state as usize][slot as usize] = c; }

    /// Registers a named color. Names must be at least two characters long.
    pub fn set_colour_name(&mut self, name: &str, c: Color) -> Result<()> {
        if name.chars().count() < 2 {
            return Err(WidgetError::Config(format!("failed to set colour name. Name '{}' must be longer than 1 char", name)));
        }
        self.colour_names.insert(name.to_string(), c);
        Ok(())
    }

    /// Returns a named color, falling back to the state/style table.
    pub fn colour_name(&self, name: &str, state: ColourState, slot: StyleSlot) -> Color {
        self.colour_names.get(name).copied().unwrap_or_else(|| self.colour(state, slot))
    }

    /// Caret color while inserting mid text.
    pub fn cursor_insert_colour(&self) -> Color { self.cursor_insert }
    /// Caret color at the end of the text.
    pub fn cursor_append_colour(&self) -> Color { self.cursor_append }
    /// Selection highlight color.
    pub fn cursor_select_colour(&self) -> Color { self.cursor_select }
    /// Sets the insert caret color.
    pub fn set_cursor_insert_colour(&mut self, c: Color) { self.cursor_insert = c; }
    /// Sets the append caret color.
    pub fn set_cursor_append_colour(&mut self, c: Color) { self.cursor_append = c; }
    /// Sets the selection highlight color.
    pub fn set_cursor_select_colour(&mut self, c: Color) { self.cursor_select = c; }

    /// Characters that end a double click selection scanning forward.
    pub fn select_chars_fwd(&self) -> &str { &self.select_fwd }
    /// Characters that end a double click selection scanning backward.
    pub fn select_chars_rev(&self) -> &str { &self.select_rev }
    /// Sets the forward delimiters.
    pub fn set_select_chars_fwd(&mut self, s: &str) { self.select_fwd = s.to_string(); }
    /// Sets the backward delimiters.
    pub fn set_select_chars_rev(&mut self, s: &str) { self.select_rev = s.to_string(); }

    /// Directory holding fonts and images.
    pub fn resource_dir(&self) -> &Path { &self.resource_dir }

    /// Sets the resource directory. Relative paths that do not exist as given are resolved
    /// against the working directory.
    pub fn set_resource_dir(&mut self, dir: &str) -> Result<()> {
        let mut path = PathBuf::from(dir);
        if !path.exists() {
            path = std::env::current_dir()?.join(dir);
        }
        let meta = std::fs::metadata(&path).map_err(|e| WidgetError::Config(format!("failed to set resource directory '{}': {}", path.display(), e)))?;
        if !meta.is_dir() {
            return Err(WidgetError::Config(format!("failed to set resource directory. Path '{}' is NOT a directory", path.display())));
        }
        self.resource_dir = path;
        Ok(())
    }

    /// Font file used by [`ResourceContext::load_font`].
    pub fn font_path(&self) -> &Path { &self.font_path }

    /// Sets the font file. Names not found as given are looked up in the resource directory.
    pub fn set_font_path(&mut self, file: &str) -> Result<()> {
        let mut path = PathBuf::from(file);
        if !path.exists() {
            path = self.resource_dir.join(file);
        }
        let meta = std::fs::metadata(&path).map_err(|e| WidgetError::Config(format!("failed to set font file '{}': {}", path.display(), e)))?;
        if meta.is_dir() {
            return Err(WidgetError::Config(format!("failed to set font file. '{}' is a directory", path.display())));
        }
        self.font_path = path;
        Ok(())
    }

    /// Font pixel size.
    pub fn font_size(&self) -> usize { self.font_size }

    /// Sets the font pixel size. Sizes below 10 are rejected.
    pub fn set_font_size(&mut self, size: usize) -> Result<()> {
        if size < MIN_FONT_SIZE {
            return Err(WidgetError::Config(format!("failed to set font size. Must be {} or above. Was set to '{}'", MIN_FONT_SIZE, size)));
        }
        self.font_size = size;
        Ok(())
    }

    /// Loaded font, if any.
    pub fn font(&self) -> Option<FontId> { self.font }
    /// Installs a font loaded elsewhere.
    pub fn set_font(&mut self, font: Option<FontId>) { self.font = font; }

    /// Loads the configured font through the renderer. An already loaded font is kept.
    pub fn load_font(&mut self, renderer: &mut dyn Renderer) -> Result<FontId> {
        if let Some(font) = self.font {
            return Ok(font);
        }
        let meta = std::fs::metadata(&self.font_path).map_err(|e| WidgetError::Config(format!("failed to load font '{}': {}", self.font_path.display(), e)))?;
        if meta.is_dir() {
            return Err(WidgetError::Config(format!("failed to load font. Path '{}' is a directory", self.font_path.display())));
        }
        let font = renderer.load_font(&self.font_path, self.font_size)?;
        self.font = Some(font);
        Ok(font)
    }

    /// Shared texture cache.
    pub fn textures(&self) -> &TextureCacheHandle { &self.textures }

    /// Clipboard handle shared with text entries.
    pub fn clipboard(&self) -> ClipboardHandle { self.clipboard.clone() }
    /// Replaces the clipboard implementation for every holder of the handle.
    pub fn set_clipboard(&self, clipboard: Box<dyn Clipboard>) { self.clipboard.replace(clipboard); }

    /// Reads a configuration file of `res.<a>.<b>=<value>` lines. Blank lines and lines
    /// starting with `#` are skipped.
    pub fn load_config(&mut self, path: &Path) -> Result<()> {
        let reader = BufReader::new(File::open(path)?);
        for line in reader.lines() {
            let line = line?;
            let s = line.trim();
            if s.is_empty() || s.starts_with('#') {
                continue;
            }
            let parts: Vec<&str> = s.split('=').collect();
            if parts.len() != 2 {
                return Err(WidgetError::Config(format!("config file line is invalid '{}'. Config File is '{}'", s, path.display())));
            }
            self.config_name_value(parts[0], parts[1])
                .map_err(|e| WidgetError::Config(format!("line:'{}'. {}. Config File is '{}'", s, e, path.display())))?;
        }
        Ok(())
    }

    /// Applies a single `name=value` configuration entry.
    pub fn config_name_value(&mut self, name: &str, value: &str) -> Result<()> {
        let name = name.trim();
        if name.is_empty() {
            return Ok(());
        }
        let value = value.trim();
        let parts: Vec<&str> = name.split('.').collect();
        if parts.len() < 3 || parts[0] != "res" {
            return Err(WidgetError::Config(format!("config name is invalid. Expecting prefix 'res.*.*' Found '{}'", name)));
        }
        self.set_config_value(parts[1], parts[2], value)
    }

    fn set_config_value(&mut self, group: &str, key: &str, value: &str) -> Result<()> {
        let n0 = group.to_lowercase();
        let n1 = key.to_lowercase();
        if let Some(state) = ColourState::from_name(&n0) {
            let slot = StyleSlot::from_name(&n1).ok_or_else(|| WidgetError::Config(format!("config name. Expecting style name from fg, bg, border Found '{}'", n1)))?;
            self.set_colour(state, slot, parse_colour(value)?);
            return Ok(());
        }
        match n0.as_str() {
            "font" => match n1.as_str() {
                "name" => self.set_font_path(value),
                "size" => {
                    let size = value.parse::<usize>().map_err(|e| WidgetError::Config(format!("invalid font size '{}': {}", value, e)))?;
                    self.set_font_size(size)
                }
                _ => Err(WidgetError::Config(format!("invalid name. Expecting 'font.name, font.size' Found '{}'", key))),
            },
            "resource" => match n1.as_str() {
                "dir" => self.set_resource_dir(value),
                _ => Err(WidgetError::Config(format!("invalid name. Expecting 'resource.dir' Found '{}'", key))),
            },
            "colour" | "color" => {
                let c = parse_colour(value)?;
                self.set_colour_name(key, c)
            }
            "cursor" => {
                let c = parse_colour(value)?;
                match n1.as_str() {
                    "insert" => self.set_cursor_insert_colour(c),
                    "append" => self.set_cursor_append_colour(c),
                    "select" => self.set_cursor_select_colour(c),
                    _ => return Err(WidgetError::Config(format!("invalid name. Expecting 'cursor.insert, cursor.append, cursor.select' Found '{}'", key))),
                }
                Ok(())
            }
            "select" => {
                if value.is_empty() {
                    return Err(WidgetError::Config("invalid value. Expecting at least one char".to_string()));
                }
                match n1.as_str() {
                    "forward" => self.set_select_chars_fwd(value),
                    "backward" => self.set_select_chars_rev(value),
                    _ => return Err(WidgetError::Config(format!("invalid name. Expecting 'select.forward, select.backward' Found '{}'", key))),
                }
                Ok(())
            }
            _ => Err(WidgetError::Config(format!(
                "invalid name. Expecting enabled, disabled, focused, error, font, resource, colour, cursor or select. Found '{}'",
                group
            ))),
        }
    }

    /// Returns the cached texture stored under `name`.
    pub fn texture_for_name(&self, name: &str) -> Result<Texture> {
        self.textures
            .scope(|c| c.get(name).and_then(|e| e.texture()))
            .ok_or_else(|| WidgetError::TextureNotFound(name.to_string()))
    }

    /// Renders every `(name, text)` pair with `font` and caches it under `name`.
    pub fn add_textures_from_string_map(&self, renderer: &mut dyn Renderer, strings: &HashMap<String, String>, font: FontId, colour: Color) -> Result<()> {
        self.textures.scope_mut(|cache| {
            for (name, text) in strings {
                let t = renderer.render_text(font, text, colour)?;
                cache.add(renderer, name, TextureCacheEntry::new(t, text.as_str()));
            }
            Ok(())
        })
    }

    /// Loads every `(name, file)` pair from the resource directory and caches it under `name`.
    ///
    /// `colours` is read pairwise as `(from, to)` swaps applied before upload; an odd trailing
    /// color is swapped to the enabled foreground.
    pub fn add_textures_from_file_map(&self, renderer: &mut dyn Renderer, files: &HashMap<String, String>, colours: &[Color]) -> Result<()> {
        let fallback = self.colour(ColourState::Enabled, StyleSlot::Fg);
        self.textures.scope_mut(|cache| {
            for (name, file) in files {
                let path = self.resource_dir.join(file);
                let mut img = load_image_file(&path)?;
                if !colours.is_empty() {
                    img.swap_colours(colours, fallback);
                }
                let t = img.upload(renderer)?;
                cache.add(renderer, name, TextureCacheEntry::new(t, path.display().to_string()));
            }
            Ok(())
        })
    }

    /// Makes sure a glyph texture in `colour` is cached for every character of `text`.
    pub fn update_cached_glyphs(&self, renderer: &mut dyn Renderer, font: FontId, colour: Color, text: &str) -> Result<()> {
        self.textures.scope_mut(|cache| {
            for c in text.chars() {
                let key = glyph_key(c, colour);
                if !cache.peek(&key) {
                    let t = renderer.render_text(font, &c.to_string(), colour)?;
                    cache.add(renderer, &key, TextureCacheEntry::new(t, c.to_string()));
                }
            }
            Ok(())
        })
    }

    /// Lays out the cached glyphs of `text`, each scaled to `height` pixels.
    /// Stops at the first character without a cached glyph.
    pub fn scaled_glyph_list(&self, text: &str, colour: Color, height: i32) -> Vec<ScaledGlyph> {
        self.textures.scope(|cache| {
            let mut list = Vec::with_capacity(text.len());
            for (pos, c) in text.chars().enumerate() {
                let Some(t) = cache.get(&glyph_key(c, colour)).and_then(|e| e.texture()) else {
                    break;
                };
                let width = if t.height > 0 { (height as f32 * (t.width as f32 / t.height as f32)) as i32 } else { 0 };
                list.push(ScaledGlyph { pos, texture: t.id, width });
            }
            list
        })
    }

    /// Returns the texture cached under `key`, re-rendering it when `text` differs from the
    /// cached value.
    pub fn update_texture_from_string(&self, renderer: &mut dyn Renderer, key: &str, text: &str, font: FontId, colour: Color) -> Result<Texture> {
        self.textures.scope_mut(|cache| {
            if let Some(t) = cache.get(key).filter(|e| e.value() == text).and_then(|e| e.texture()) {
                return Ok(t);
            }
            let t = renderer.render_text(font, text, colour)?;
            cache.add(renderer, key, TextureCacheEntry::new(t, text));
            Ok(t)
        })
    }

    /// Destroys every cached texture. The cache must not be drawn from afterwards.
    pub fn destroy(&self, renderer: &mut dyn Renderer) {
        self.textures.scope_mut(|cache| {
            cache.destroy(renderer);
            log::debug!("{}", cache);
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image::tests::encode_png;
    use crate::testing::MockRenderer;

    #[test]
    fn defaults() {
        let res = ResourceContext::new();
        assert_eq!(res.colour(ColourState::Enabled, StyleSlot::Fg), color(0, 255, 0, 255));
        assert_eq!(res.colour(ColourState::Disabled, StyleSlot::Border), color(0, 150, 0, 255));
        assert_eq!(res.colour(ColourState::Focused, StyleSlot::Bg), color(150, 150, 0, 255));
        assert_eq!(res.colour(ColourState::Error, StyleSlot::Bg), color(100, 0, 0, 255));
        assert_eq!(res.cursor_append_colour(), color(255, 0, 255, 255));
        assert_eq!(res.select_chars_fwd(), "/.");
        assert_eq!(res.select_chars_rev(), "/");
        assert_eq!(res.font_size(), 35);
        assert!(res.font_path().ends_with("resources/buttonFont.ttf"));
        assert!(res.font().is_none());
    }

    #[test]
    fn parse_colour_strings() {
        assert_eq!(parse_colour("1,2,3").unwrap(), color(1, 2, 3, 255));
        assert_eq!(parse_colour("1, 2, 3, 4").unwrap(), color(1, 2, 3, 4));
        assert!(parse_colour("1,2").is_err());
        assert!(parse_colour("1,2,256").is_err());
        assert!(parse_colour("1,2,-1").is_err());
        assert!(parse_colour("1,2,3,4,5").is_err());
    }

    #[test]
    fn config_entries() {
        let mut res = ResourceContext::new();
        res.config_name_value("res.focused.bg", "1,2,3").unwrap();
        assert_eq!(res.colour(ColourState::Focused, StyleSlot::Bg), color(1, 2, 3, 255));
        res.config_name_value(" res.cursor.insert ", " 9,9,9,9 ").unwrap();
        assert_eq!(res.cursor_insert_colour(), color(9, 9, 9, 9));
        res.config_name_value("res.select.forward", "-_").unwrap();
        assert_eq!(res.select_chars_fwd(), "-_");
        res.config_name_value("res.colour.Sky", "0,0,200").unwrap();
        assert_eq!(res.colour_name("Sky", ColourState::Enabled, StyleSlot::Fg), color(0, 0, 200, 255));
        assert_eq!(res.colour_name("Sea", ColourState::Enabled, StyleSlot::Fg), color(0, 255, 0, 255));
        res.config_name_value("res.font.size", "12").unwrap();
        assert_eq!(res.font_size(), 12);
        res.config_name_value("", "ignored").unwrap();

        assert!(res.config_name_value("font.size", "12").is_err());
        assert!(res.config_name_value("res.font.size", "9").is_err());
        assert!(res.config_name_value("res.enabled.middle", "1,1,1").is_err());
        assert!(res.config_name_value("res.colour.x", "1,1,1").is_err());
        assert!(res.config_name_value("res.select.backward", "").is_err());
        assert!(res.config_name_value("res.cursor.blink", "1,1,1").is_err());
        assert!(res.config_name_value("res.wobble.x", "1").is_err());
    }

    #[test]
    fn load_config_file() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().to_path_buf();
        std::fs::write(dir.join("font.ttf"), b"not really a font").unwrap();
        let cfg = dir.join("widgets.cfg");
        let text = format!("# palette\n\nres.resource.dir={}\nres.font.name=font.ttf\nres.error.fg=10,20,30\n", dir.display());
        std::fs::write(&cfg, text).unwrap();

        let mut res = ResourceContext::new();
        res.load_config(&cfg).unwrap();
        assert_eq!(res.resource_dir(), dir.as_path());
        assert_eq!(res.font_path(), dir.join("font.ttf").as_path());
        assert_eq!(res.colour(ColourState::Error, StyleSlot::Fg), color(10, 20, 30, 255));

        std::fs::write(&cfg, "res.error.fg\n").unwrap();
        assert!(res.load_config(&cfg).is_err());
        assert!(res.load_config(&dir.join("missing.cfg")).is_err());
    }

    #[test]
    fn glyph_cache_and_layout() {
        let mut r = MockRenderer::new();
        let res = ResourceContext::new();
        let font = FontId::new(1);
        let fg = color(0, 255, 0, 255);
        res.update_cached_glyphs(&mut r, font, fg, "abca").unwrap();
        assert_eq!(r.rendered(), &["a", "b", "c"]);
        assert!(res.textures().scope(|c| c.peek(&glyph_key('a', fg))));
        assert!(!res.textures().scope(|c| c.peek(&glyph_key('a', Color::WHITE))));

        let list = res.scaled_glyph_list("abx", fg, 40);
        assert_eq!(list.len(), 2);
        assert_eq!((list[1].pos, list[1].width), (1, 20));
    }

    #[test]
    fn string_texture_reused_while_unchanged() {
        let mut r = MockRenderer::new();
        let res = ResourceContext::new();
        let font = FontId::new(1);
        let a = res.update_texture_from_string(&mut r, "k", "one", font, Color::WHITE).unwrap();
        let again = res.update_texture_from_string(&mut r, "k", "one", font, Color::WHITE).unwrap();
        assert_eq!(a.id, again.id);
        let b = res.update_texture_from_string(&mut r, "k", "three", font, Color::WHITE).unwrap();
        assert_ne!(a.id, b.id);
        assert_eq!(r.destroy_calls(a.id), 1);
        assert_eq!(res.texture_for_name("k").unwrap().width, 50);
        assert!(res.texture_for_name("nope").is_err());

        r.fail_text = true;
        assert!(res.update_texture_from_string(&mut r, "k", "four", font, Color::WHITE).is_err());
        assert_eq!(res.texture_for_name("k").unwrap().id, b.id);
    }

    #[test]
    fn file_and_string_maps() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().to_path_buf();
        let png = encode_png(png::ColorType::Rgba, &[255, 0, 0, 255, 0, 0, 0, 255], 2, 1, None);
        std::fs::write(dir.join("arrow.png"), png).unwrap();

        let mut r = MockRenderer::new();
        let mut res = ResourceContext::new();
        res.set_resource_dir(dir.to_str().unwrap()).unwrap();
        let files: HashMap<String, String> = [("arrow".to_string(), "arrow.png".to_string())].into_iter().collect();
        res.add_textures_from_file_map(&mut r, &files, &[color(255, 0, 0, 255)]).unwrap();
        let t = res.texture_for_name("arrow").unwrap();
        assert_eq!((t.width, t.height), (2, 1));

        let missing: HashMap<String, String> = [("x".to_string(), "missing.png".to_string())].into_iter().collect();
        assert!(res.add_textures_from_file_map(&mut r, &missing, &[]).is_err());

        let strings: HashMap<String, String> = [("title".to_string(), "Hi".to_string())].into_iter().collect();
        res.add_textures_from_string_map(&mut r, &strings, FontId::new(1), Color::WHITE).unwrap();
        assert_eq!(res.texture_for_name("title").unwrap().width, 20);

        res.destroy(&mut r);
        assert!(res.texture_for_name("title").is_err());
        assert_eq!(r.destroyed_count(), 2);
    }

    #[test]
    fn load_font_requires_file() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().to_path_buf();
        let mut r = MockRenderer::new();
        let mut res = ResourceContext::new();
        res.set_resource_dir(dir.to_str().unwrap()).unwrap();
        assert!(res.set_font_path("nope.ttf").is_err());
        assert!(res.load_font(&mut r).is_err());

        std::fs::write(dir.join("ok.ttf"), b"bytes").unwrap();
        res.set_font_path("ok.ttf").unwrap();
        let font = res.load_font(&mut r).unwrap();
        assert_eq!(res.font(), Some(font));
    }
}
