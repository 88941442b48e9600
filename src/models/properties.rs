// src/models/properties.rs

use serde::{Deserialize, Serialize};

use crate::models::colors::OptionalColor;
use crate::models::common::Dimension;
use crate::models::link::Link;
use crate::models::page::Page;

/// The text's vertical offset from its normal position.
/// Derived from: https://developers.google.com/slides/api/reference/rest/v1/presentations.pages/text#BaselineOffset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BaselineOffset {
    /// The baseline offset is unspecified or inherited.
    BaselineOffsetUnspecified,
    /// The text is not vertically offset.
    None,
    /// The text is vertically offset upwards (superscript).
    Superscript,
    /// The text is vertically offset downwards (subscript).
    Subscript,
}

/// Represents the styling that can be applied to a TextRun.
///
/// Unset fields are skipped when serialized, so the keys of the serialized object are
/// exactly the fields an update request touches. Fields are declared in alphabetical
/// order of their wire names, which keeps field masks sorted.
/// Derived from: https://developers.google.com/slides/api/reference/rest/v1/presentations.pages/text#TextStyle
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextStyle {
    /// The background color of the text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_color: Option<OptionalColor>,

    /// The text's vertical offset from its normal position (superscript, subscript).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub baseline_offset: Option<BaselineOffset>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub bold: Option<bool>,

    /// The font family of the text. If unrecognized, rendered in Arial.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_family: Option<String>,

    /// The size of the text's font.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_size: Option<Dimension>,

    /// The foreground color of the text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub foreground_color: Option<OptionalColor>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub italic: Option<bool>,

    /// The hyperlink destination of the text. If unset, there is no link.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<Link>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub small_caps: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub strikethrough: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub underline: Option<bool>,
}

impl TextStyle {
    /// True when no attribute is set.
    pub fn is_empty(&self) -> bool {
        *self == TextStyle::default()
    }
}

/// The properties specific to a page with type `SLIDE`.
/// Derived from: https://developers.google.com/slides/api/reference/rest/v1/presentations.pages#SlideProperties
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlideProperties {
    /// Output only. The object ID of the layout that this slide is based on.
    pub layout_object_id: Option<String>,

    /// Output only. The object ID of the master that this slide is based on.
    pub master_object_id: Option<String>,

    /// Output only. The notes page that this slide is associated with. Its `BODY`
    /// placeholder holds the speaker notes (see `NotesProperties.speakerNotesObjectId`).
    /// Boxed to handle recursive type (`SlideProperties` -> `Page` -> `SlideProperties`).
    pub notes_page: Option<Box<Page>>,
}

/// The properties specific to a page with type `LAYOUT`.
/// Derived from: https://developers.google.com/slides/api/reference/rest/v1/presentations.pages#LayoutProperties
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutProperties {
    /// The object ID of the master that this layout is based on.
    pub master_object_id: Option<String>,
    /// The name of the layout (e.g., "TITLE_AND_BODY").
    pub name: Option<String>,
    /// Output only. The human-readable name of the layout (e.g., "Title and body").
    pub display_name: Option<String>,
}

/// The properties specific to a page with type `NOTES`.
/// Derived from: https://developers.google.com/slides/api/reference/rest/v1/presentations.pages#NotesProperties
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotesProperties {
    /// The object ID of the shape on this notes page that contains the speaker notes
    /// for the corresponding slide.
    pub speaker_notes_object_id: Option<String>,
}
