//! Request objects for `presentations.batchUpdate`.
//!
//! Each [`Request`] serializes to the single-key union object the API expects,
//! e.g. `{"insertText": {...}}`.

use serde::{Deserialize, Serialize};

use crate::models::common::{AffineTransform, Size};
use crate::models::properties::TextStyle;
use crate::models::table::TableCellLocation;

/// A single kind of update to apply to a presentation.
/// Derived from: https://developers.google.com/slides/api/reference/rest/v1/presentations/request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Request {
    CreateSlide(CreateSlideRequest),
    InsertText(InsertTextRequest),
    UpdateTextStyle(UpdateTextStyleRequest),
    CreateParagraphBullets(CreateParagraphBulletsRequest),
    CreateTable(CreateTableRequest),
    CreateImage(CreateImageRequest),
    DeleteObject(DeleteObjectRequest),
    UpdatePageElementsZOrder(UpdatePageElementsZOrderRequest),
}

/// Slide layout reference. Only the layout object id form is produced.
/// Derived from: https://developers.google.com/slides/api/reference/rest/v1/presentations/request#LayoutReference
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutReference {
    pub layout_id: String,
}

/// Creates a slide.
/// Derived from: https://developers.google.com/slides/api/reference/rest/v1/presentations/request#CreateSlideRequest
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSlideRequest {
    /// A user-supplied object ID for the new slide.
    pub object_id: String,
    /// Optional zero-based insertion index. Slides are appended when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub insertion_index: Option<usize>,
    pub slide_layout_reference: LayoutReference,
}

/// Inserts text into a shape or a table cell.
/// Derived from: https://developers.google.com/slides/api/reference/rest/v1/presentations/request#InsertTextRequest
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InsertTextRequest {
    /// The object ID of the shape or table where the text will be inserted.
    pub object_id: String,
    /// The cell location when inserting into a table.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cell_location: Option<TableCellLocation>,
    pub text: String,
    /// The index where the text will be inserted, in Unicode code units.
    pub insertion_index: usize,
}

/// The type of a [`Range`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RangeType {
    /// A fixed range. Both `start_index` and `end_index` must be specified.
    FixedRange,
    FromStartIndex,
    All,
}

/// Specifies a contiguous range of an indexed collection, such as characters in text.
/// Derived from: https://developers.google.com/slides/api/reference/rest/v1/presentations/request#Range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Range {
    pub start_index: usize,
    pub end_index: usize,
    #[serde(rename = "type")]
    pub range_type: RangeType,
}

impl Range {
    pub fn fixed(start_index: usize, end_index: usize) -> Self {
        Range {
            start_index,
            end_index,
            range_type: RangeType::FixedRange,
        }
    }
}

/// Updates the styling of text in a shape or table cell.
/// Derived from: https://developers.google.com/slides/api/reference/rest/v1/presentations/request#UpdateTextStyleRequest
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTextStyleRequest {
    pub object_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cell_location: Option<TableCellLocation>,
    pub style: TextStyle,
    pub text_range: Range,
    /// Comma separated field mask naming the style attributes to update.
    pub fields: String,
}

/// Preset bullet glyph sequences.
/// Derived from: https://developers.google.com/slides/api/reference/rest/v1/presentations/request#BulletGlyphPreset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BulletGlyphPreset {
    /// DISC, CIRCLE and SQUARE for the first three nesting levels.
    BulletDiscCircleSquare,
    /// DIGIT, ALPHA and ROMAN followed by periods.
    NumberedDigitAlphaRoman,
}

/// Creates bullets for the paragraphs overlapping a text range. Leading tabs on each
/// paragraph set its nesting level and are removed by the server.
/// Derived from: https://developers.google.com/slides/api/reference/rest/v1/presentations/request#CreateParagraphBulletsRequest
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateParagraphBulletsRequest {
    pub object_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cell_location: Option<TableCellLocation>,
    pub text_range: Range,
    pub bullet_preset: BulletGlyphPreset,
}

/// Common properties for a page element being created.
/// Derived from: https://developers.google.com/slides/api/reference/rest/v1/presentations/request#PageElementProperties
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageElementProperties {
    /// The object ID of the page where the element is located.
    pub page_object_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<Size>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transform: Option<AffineTransform>,
}

impl PageElementProperties {
    pub fn on_page(page_object_id: impl Into<String>) -> Self {
        PageElementProperties {
            page_object_id: page_object_id.into(),
            size: None,
            transform: None,
        }
    }
}

/// Creates a new table.
/// Derived from: https://developers.google.com/slides/api/reference/rest/v1/presentations/request#CreateTableRequest
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTableRequest {
    pub object_id: String,
    pub element_properties: PageElementProperties,
    pub rows: usize,
    pub columns: usize,
}

/// Creates an image from a publicly reachable URL.
/// Derived from: https://developers.google.com/slides/api/reference/rest/v1/presentations/request#CreateImageRequest
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateImageRequest {
    pub object_id: String,
    pub url: String,
    pub element_properties: PageElementProperties,
}

/// Deletes a page or page element from the presentation.
/// Derived from: https://developers.google.com/slides/api/reference/rest/v1/presentations/request#DeleteObjectRequest
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteObjectRequest {
    pub object_id: String,
}

/// How a z-order update moves the targeted elements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ZOrderOperation {
    BringToFront,
    BringForward,
    SendBackward,
    SendToBack,
}

/// Changes the stacking order of page elements on one page.
/// Derived from: https://developers.google.com/slides/api/reference/rest/v1/presentations/request#UpdatePageElementsZOrderRequest
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePageElementsZOrderRequest {
    pub page_element_object_ids: Vec<String>,
    pub operation: ZOrderOperation,
}

/// Body of a `presentations.batchUpdate` call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchUpdateRequest {
    pub requests: Vec<Request>,
}

/// Response of a `presentations.batchUpdate` call. Replies are kept as raw JSON
/// since nothing downstream inspects them.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchUpdateResponse {
    pub presentation_id: String,
    #[serde(default)]
    pub replies: Vec<serde_json::Value>,
}
