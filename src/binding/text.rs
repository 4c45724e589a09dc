//! Text box state and the rich-text editing capability boundary.
//!
//! The shipped text widget leaned on the browser's ambient editable-region
//! and selection APIs. Here that dependency is an explicit capability trait:
//! the core needs `apply_bold` / `apply_color` / `apply_font_size` and
//! selection get/set, not a concrete DOM primitive. `BufferEditor` is the
//! host-neutral implementation used in tests and headless contexts.

#[cfg(test)]
#[path = "text_test.rs"]
mod text_test;

use serde_json::{Value, json};

use super::str_field;

/// Editable state of a text widget.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextState {
    /// Marked-up content as produced by the host editor.
    pub content: String,
    pub bg_color: String,
}

impl Default for TextState {
    fn default() -> Self {
        Self { content: String::new(), bg_color: "rgba(30, 41, 59, 0.8)".into() }
    }
}

impl TextState {
    /// Hydrate from a persisted payload; unrecognized fields keep defaults.
    #[must_use]
    pub fn hydrate(data: &Value) -> Self {
        let defaults = Self::default();
        Self {
            content: str_field(data, "content", &defaults.content),
            bg_color: str_field(data, "bgColor", &defaults.bg_color),
        }
    }

    /// Emit the whole-snapshot payload.
    #[must_use]
    pub fn emit(&self) -> Value {
        json!({
            "content": self.content,
            "bgColor": self.bg_color,
        })
    }
}

/// A selected character range within the editor content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Selection {
    pub start: usize,
    pub end: usize,
}

impl Selection {
    #[must_use]
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// Rich-text editing capabilities the text widget requires from its host.
pub trait RichTextEditor {
    /// Toggle bold over the current selection.
    fn apply_bold(&mut self);
    /// Set the text color of the current selection.
    fn apply_color(&mut self, color: &str);
    /// Set the font size (pixels) of the current selection.
    fn apply_font_size(&mut self, size: f64);
    /// The current selection range.
    fn selection(&self) -> Selection;
    /// Restore a previously captured selection range.
    fn set_selection(&mut self, range: Selection);
    /// The current marked-up content.
    fn content(&self) -> String;
}

/// In-memory editor over a plain buffer with span markup, for tests and
/// headless hosts. Formatting wraps the selected range in pseudo-tags.
#[derive(Debug, Default)]
pub struct BufferEditor {
    buffer: String,
    selection: Selection,
}

impl BufferEditor {
    #[must_use]
    pub fn new(content: impl Into<String>) -> Self {
        Self { buffer: content.into(), selection: Selection::default() }
    }

    fn wrap_selection(&mut self, open: &str, close: &str) {
        let Selection { start, end } = self.selection;
        if start >= end || end > self.buffer.len() {
            return;
        }
        // Selections are byte offsets; one landing inside a multibyte
        // character is treated like any other invalid range.
        if !self.buffer.is_char_boundary(start) || !self.buffer.is_char_boundary(end) {
            return;
        }
        let selected = self.buffer[start..end].to_string();
        self.buffer.replace_range(start..end, &format!("{open}{selected}{close}"));
        self.selection = Selection::new(start, start + open.len() + selected.len() + close.len());
    }
}

impl RichTextEditor for BufferEditor {
    fn apply_bold(&mut self) {
        self.wrap_selection("<b>", "</b>");
    }

    fn apply_color(&mut self, color: &str) {
        self.wrap_selection(&format!("<span style=\"color:{color}\">"), "</span>");
    }

    fn apply_font_size(&mut self, size: f64) {
        self.wrap_selection(&format!("<span style=\"font-size:{size}px\">"), "</span>");
    }

    fn selection(&self) -> Selection {
        self.selection
    }

    fn set_selection(&mut self, range: Selection) {
        self.selection = range;
    }

    fn content(&self) -> String {
        self.buffer.clone()
    }
}
