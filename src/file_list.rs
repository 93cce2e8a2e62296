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
use std::fs;
use std::path::{Component, Path, PathBuf};

use crate::*;

const DEFAULT_WIDTH: i32 = 1000;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
/// Reason reported to the selection callback or recorded when the list closes.
pub enum FileListResponse {
    /// The cancel row was clicked.
    CloseCancel,
    /// A file row was clicked and accepted.
    FileSelect,
    /// The parent directory row was clicked.
    PathUp,
    /// A directory row was clicked.
    PathSelect,
}

/// Selection callback. Receives the selected path, the reason and the row id. Returning
/// `false` vetoes the navigation or selection.
pub type OnFileSelect = Box<dyn FnMut(&Path, FileListResponse, WidgetId) -> bool>;

/// Row filter. Receives `true` for directories and the entry name.
pub type FileFilter = Box<dyn Fn(bool, &str) -> bool>;

#[derive(Clone, Debug)]
enum Row {
    Cancel,
    Path,
    Parent,
    Dir(String),
    File(String),
}

/// Browse-and-select dialog listing one directory as clickable rows.
///
/// Rows, top to bottom: cancel, current path, `D:..` unless at the root, then the filtered
/// directories and files, each sorted by name.
pub struct FileList {
    group: SubGroup,
    rows: Vec<Row>,
    current_path: PathBuf,
    selected_file: Option<PathBuf>,
    response: Option<FileListResponse>,
    row_height: i32,
    on_select: Option<OnFileSelect>,
    filter: Option<FileFilter>,
}

impl FileList {
    /// Creates a list showing `path`. A path that is not a directory falls back to the working
    /// directory, then to the temp directory. A listing failure leaves the list empty.
    pub fn new(x: i32, y: i32, row_height: i32, id: WidgetId, path: impl AsRef<Path>, style: StateBits, on_select: Option<OnFileSelect>, filter: Option<FileFilter>) -> Self {
        let start = start_dir(path.as_ref());
        let mut fl = Self {
            group: SubGroup::new(x, y, DEFAULT_WIDTH, row_height, id, None, style),
            rows: Vec::new(),
            current_path: start.clone(),
            selected_file: None,
            response: None,
            row_height,
            on_select,
            filter,
        };
        if let Err(e) = fl.reload(&start) {
            log::warn!("file list {}: cannot list {}: {}", id, start.display(), e);
        }
        fl
    }

    /// Lists `path`. The rows are only replaced once the whole listing succeeded; on error the
    /// previous rows and path are kept.
    pub fn reload(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let dir = absolute_clean(path.as_ref())?;
        let (widgets, rows) = self.build_rows(&dir)?;
        self.group.remove_all_widgets();
        for w in widgets {
            self.group.add(w);
        }
        self.rows = rows;
        self.current_path = dir;
        let w = self.group.size().x;
        self.group.set_size(w, self.row_height * self.rows.len() as i32);
        log::debug!("file list {}: {} rows for {}", self.group.id(), self.rows.len(), self.current_path.display());
        Ok(())
    }

    fn build_rows(&self, dir: &Path) -> Result<(Vec<Box<dyn Widget>>, Vec<Row>)> {
        let mut dirs = Vec::new();
        let mut files = Vec::new();
        for entry in fs::read_dir(dir)? {
            let entry = entry?;
            let name = entry.file_name().to_string_lossy().into_owned();
            if entry.path().is_dir() {
                dirs.push(name);
            } else {
                files.push(name);
            }
        }
        if dirs.is_empty() && files.is_empty() {
            return Err(WidgetError::EmptyDirectory(dir.to_path_buf()));
        }
        dirs.retain(|n| self.accepts(true, n));
        files.retain(|n| self.accepts(false, n));
        dirs.sort();
        files.sort();

        let p = self.group.position();
        let (w, h) = (self.group.size().x, self.row_height);
        let mut wid = self.group.id() + 1;
        let mut widgets: Vec<Box<dyn Widget>> = Vec::new();
        widgets.push(Box::new(Button::new(p.x, p.y, w, h, wid, "Cancel", StateBits::DRAW_BORDER, None)));
        widgets.push(Box::new(Label::new(p.x, p.y + h, w, h, wid, dir.display().to_string(), Align::Left, StateBits::DRAW_BORDER_AND_BG, None)));
        let mut rows = vec![Row::Cancel, Row::Path];
        let mut push = |wid: WidgetId, text: String, row: Row| {
            let y = p.y + h * rows.len() as i32;
            widgets.push(Box::new(Label::new(p.x, y, w, h, wid, text, Align::Left, StateBits::DRAW_BG, None)));
            rows.push(row);
        };
        if dir.parent().is_some() {
            push(wid, "D:..".into(), Row::Parent);
        }
        for name in dirs {
            wid += 1;
            push(wid, format!("D:{}", name), Row::Dir(name));
        }
        for name in files {
            wid += 1;
            push(wid, format!("F:{}", name), Row::File(name));
        }
        Ok((widgets, rows))
    }

    fn accepts(&self, is_dir: bool, name: &str) -> bool { self.filter.as_ref().is_none_or(|f| f(is_dir, name)) }

    fn notify(&mut self, path: &Path, r: FileListResponse, id: WidgetId) -> bool {
        match self.on_select.as_mut() {
            Some(on_select) => on_select(path, r, id),
            None => true,
        }
    }

    /// Makes the list visible again.
    pub fn show(&mut self) {
        self.response = None;
        self.group.set_visible(true);
    }

    /// Hides the list, recording why.
    pub fn close(&mut self, r: FileListResponse) {
        self.response = Some(r);
        self.group.set_visible(false);
    }

    /// Why the list last closed, `None` while open.
    pub fn response(&self) -> Option<FileListResponse> { self.response }
    /// Directory being listed.
    pub fn current_path(&self) -> &Path { &self.current_path }
    /// Accepted file, relative to the working directory.
    pub fn selected_file(&self) -> Option<&Path> { self.selected_file.as_deref() }
    /// Row height in pixels.
    pub fn row_height(&self) -> i32 { self.row_height }
    /// Rows backing the list.
    pub fn rows(&self) -> &SubGroup { &self.group }

    /// Text of every row, top to bottom.
    pub fn row_labels(&self) -> Vec<String> {
        self.rows
            .iter()
            .map(|r| match r {
                Row::Cancel => "Cancel".to_string(),
                Row::Path => self.current_path.display().to_string(),
                Row::Parent => "D:..".to_string(),
                Row::Dir(n) => format!("D:{}", n),
                Row::File(n) => format!("F:{}", n),
            })
            .collect()
    }

    fn enter(&mut self, dir: PathBuf, r: FileListResponse, id: WidgetId) {
        if self.notify(&dir, r, id) {
            if let Err(e) = self.reload(&dir) {
                log::warn!("file list {}: cannot list {}: {}", self.group.id(), dir.display(), e);
            }
        }
    }

    fn select_file(&mut self, name: &str, id: WidgetId) -> bool {
        let full = self.current_path.join(name);
        let cwd = match std::env::current_dir() {
            Ok(cwd) => cwd,
            Err(e) => {
                log::warn!("file list {}: no working directory: {}", self.group.id(), e);
                return false;
            }
        };
        let Some(rel) = relative_to(&full, &cwd) else {
            log::warn!("file list {}: {} is not reachable from {}", self.group.id(), full.display(), cwd.display());
            return false;
        };
        if self.notify(&rel, FileListResponse::FileSelect, id) {
            self.selected_file = Some(rel);
            self.close(FileListResponse::FileSelect);
        }
        true
    }

    fn handle_click(&mut self, md: &MouseData) -> bool {
        if !self.group.is_enabled() {
            return false;
        }
        let Some(i) = self.group.widgets().iter().position(|w| w.inside(md.x(), md.y())) else {
            return false;
        };
        let id = self.group.widgets()[i].id();
        match self.rows.get(i).cloned() {
            Some(Row::Cancel) => {
                self.close(FileListResponse::CloseCancel);
                true
            }
            Some(Row::Parent) => {
                if let Some(parent) = self.current_path.parent().map(Path::to_path_buf) {
                    self.enter(parent, FileListResponse::PathUp, id);
                }
                true
            }
            Some(Row::Dir(name)) => {
                let dir = self.current_path.join(name);
                self.enter(dir, FileListResponse::PathSelect, id);
                true
            }
            Some(Row::File(name)) => self.select_file(&name, id),
            Some(Row::Path) | None => false,
        }
    }
}

fn start_dir(path: &Path) -> PathBuf {
    if path.is_dir() {
        if let Ok(p) = absolute_clean(path) {
            return p;
        }
    }
    std::env::current_dir().unwrap_or_else(|_| std::env::temp_dir())
}

/// Makes `path` absolute and folds `.` and `..` components lexically.
fn absolute_clean(path: &Path) -> std::io::Result<PathBuf> {
    let mut out = PathBuf::new();
    for c in std::path::absolute(path)?.components() {
        match c {
            Component::CurDir => (),
            Component::ParentDir => {
                if matches!(out.components().next_back(), Some(Component::Normal(_))) {
                    out.pop();
                }
            }
            c => out.push(c),
        }
    }
    Ok(out)
}

/// Expresses `path` relative to `base`. Both must be absolute on the same root.
fn relative_to(path: &Path, base: &Path) -> Option<PathBuf> {
    if !path.has_root() || !base.has_root() {
        return None;
    }
    let path: Vec<Component> = path.components().filter(|c| *c != Component::CurDir).collect();
    let base: Vec<Component> = base.components().filter(|c| *c != Component::CurDir).collect();
    let common = path.iter().zip(&base).take_while(|(a, b)| a == b).count();
    if common == 0 {
        return None;
    }
    let mut rel: PathBuf = base[common..].iter().map(|_| Component::ParentDir).collect();
    rel.extend(&path[common..]);
    if rel.as_os_str().is_empty() {
        rel.push(".");
    }
    Some(rel)
}

impl Widget for FileList {
    fn base(&self) -> &WidgetBase { self.group.base() }
    fn base_mut(&mut self) -> &mut WidgetBase { self.group.base_mut() }
    fn draw(&mut self, ctx: &mut DrawCtx<'_>) -> Result<()> { self.group.draw(ctx) }
    fn click(&mut self, md: &MouseData) -> bool { self.handle_click(md) }
    fn key_press(&mut self, key: Key, down: bool) -> bool { self.group.key_press(key, down) }
    fn destroy(&mut self) { self.group.destroy() }
    fn process_pending(&mut self) { self.group.process_pending() }

    fn set_position(&mut self, x: i32, y: i32) -> bool { self.group.set_position(x, y) }
    fn set_position_rel(&mut self, dx: i32, dy: i32) -> bool { self.group.set_position_rel(dx, dy) }

    fn scale(&mut self, s: f32) {
        self.row_height = (self.row_height as f32 * s) as i32;
        self.group.scale(s);
    }

    fn set_enabled(&mut self, e: bool) { self.group.set_enabled(e) }
    fn set_visible(&mut self, v: bool) { self.group.set_visible(v) }
}
