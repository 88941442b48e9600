//! The slide model produced from Markdown and consumed by layout matching and
//! request generation.
//!
//! All offsets are counted in Unicode scalar values over `TextBlock::raw_text`.

use serde::{Deserialize, Serialize};

use crate::models::properties::TextStyle;

/// A styled range `[start, end)` of a text block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StyleRun {
    pub start: usize,
    pub end: usize,
    pub style: TextStyle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListKind {
    Ordered,
    Unordered,
}

/// A range `[start, end)` of paragraphs that form one (possibly nested) list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListMarker {
    pub start: usize,
    pub end: usize,
    #[serde(rename = "type")]
    pub kind: ListKind,
}

/// Plain text plus the styling and list ranges that apply to it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextBlock {
    pub raw_text: String,
    pub runs: Vec<StyleRun>,
    pub list_markers: Vec<ListMarker>,
    /// Render in large format (`{.big}`).
    pub big: bool,
}

impl TextBlock {
    pub fn new(raw_text: impl Into<String>) -> Self {
        TextBlock {
            raw_text: raw_text.into(),
            ..Default::default()
        }
    }

    /// Length of the text in code points.
    pub fn len(&self) -> usize {
        self.raw_text.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.raw_text.is_empty()
    }

    /// True when the block holds nothing worth inserting.
    pub fn is_blank(&self) -> bool {
        self.raw_text.trim().is_empty()
    }

    pub fn ends_with_newline(&self) -> bool {
        self.raw_text.ends_with('\n')
    }

    /// Seals the block: trailing newlines are dropped and every run and marker is
    /// clamped to the remaining text. Ranges left empty are discarded.
    pub fn finish(mut self) -> TextBlock {
        let trimmed = self.raw_text.trim_end_matches('\n').len();
        self.raw_text.truncate(trimmed);
        let len = self.len();

        self.runs.retain_mut(|run| {
            run.end = run.end.min(len);
            run.start < run.end && !run.style.is_empty()
        });
        self.list_markers.retain_mut(|marker| {
            marker.end = marker.end.min(len);
            marker.start < marker.end
        });
        self
    }
}

/// A table whose cells are independent text blocks, stored row-major.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableModel {
    pub rows: usize,
    pub columns: usize,
    pub cells: Vec<Vec<TextBlock>>,
}

impl TableModel {
    pub fn from_cells(cells: Vec<Vec<TextBlock>>) -> Self {
        TableModel {
            rows: cells.len(),
            columns: cells.iter().map(Vec::len).max().unwrap_or(0),
            cells,
        }
    }
}

/// Content for one body placeholder (one column).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BodyBlock {
    pub text: TextBlock,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageDefinition {
    pub url: String,
    pub alt: String,
    /// Stretch over the whole page (`{.background}`).
    pub background: bool,
}

/// Everything extracted for a single slide.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlideDefinition {
    pub title: Option<TextBlock>,
    pub subtitle: Option<TextBlock>,
    pub bodies: Vec<BodyBlock>,
    pub tables: Vec<TableModel>,
    pub images: Vec<ImageDefinition>,
    pub notes: Option<String>,
    pub custom_layout: Option<String>,
    /// Assigned when the slide is scheduled for creation.
    pub object_id: Option<String>,
}

impl SlideDefinition {
    /// Appends speaker notes, separating successive comments by a newline.
    pub fn append_notes(&mut self, text: &str) {
        match &mut self.notes {
            Some(notes) if !notes.is_empty() => {
                notes.push('\n');
                notes.push_str(text);
            }
            _ => self.notes = Some(text.to_string()),
        }
    }

    pub fn is_big(&self) -> bool {
        self.title.as_ref().is_some_and(|t| t.big)
    }
}
