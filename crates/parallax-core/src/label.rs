//! Multi-line node labels with per-line style runs
//!
//! Labels carry the disassembly text a node displays plus the styling state a
//! highlighter reads and restores. Restoration must be bit-exact, so runs and
//! the border color are plain value types that can be snapshotted wholesale.

use serde::{Deserialize, Serialize};

/// 0xRRGGBB color value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct Color(pub u32);

impl Color {
    pub const BLACK: Color = Color(0x000000);
    pub const WHITE: Color = Color(0xFFFFFF);
}

/// A styled span within one label line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StyleRun {
    pub start: usize,
    pub length: usize,
    pub color: Color,
}

/// One line of label text plus its current style runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelLine {
    pub text: String,
    pub runs: Vec<StyleRun>,
}

impl LabelLine {
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let runs = vec![StyleRun {
            start: 0,
            length: text.len(),
            color: Color::BLACK,
        }];
        LabelLine { text, runs }
    }
}

/// A node's full label: its lines and current border color.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Label {
    pub lines: Vec<LabelLine>,
    pub border_color: Color,
}

impl Label {
    pub fn new(lines: Vec<LabelLine>) -> Self {
        Label {
            lines,
            border_color: Color::BLACK,
        }
    }

    /// Convenience constructor from plain text lines.
    pub fn from_text<S: AsRef<str>>(lines: &[S]) -> Self {
        Label::new(lines.iter().map(|l| LabelLine::new(l.as_ref())).collect())
    }

    pub fn empty() -> Self {
        Label::new(Vec::new())
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    pub fn line(&self, index: usize) -> Option<&LabelLine> {
        self.lines.get(index)
    }

    pub fn line_mut(&mut self, index: usize) -> Option<&mut LabelLine> {
        self.lines.get_mut(index)
    }
}

impl Default for Label {
    fn default() -> Self {
        Label::empty()
    }
}
