// src/models/page.rs

use serde::{Deserialize, Serialize};

use crate::models::elements::PageElement;
use crate::models::properties::{LayoutProperties, NotesProperties, SlideProperties};

/// The type of the page.
/// Derived from: https://developers.google.com/slides/api/reference/rest/v1/presentations.pages#PageType
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PageType {
    #[default]
    PageTypeUnspecified,
    Slide,
    Master,
    Layout,
    Notes,
    NotesMaster,
}

/// A page in a presentation.
/// Derived from: https://developers.google.com/slides/api/reference/rest/v1/presentations.pages#Page
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    /// The object ID for this page. Object IDs used by Page and PageElement share
    /// the same namespace.
    pub object_id: String,

    /// The type of the page. This might be omitted in some contexts (e.g., top-level slides).
    #[serde(default)]
    pub page_type: Option<PageType>,

    /// The page elements rendered on the page.
    pub page_elements: Option<Vec<PageElement>>,

    // Only one of these will be populated based on `page_type`.
    /// Slide specific properties. Only set if page_type = SLIDE.
    pub slide_properties: Option<SlideProperties>,

    /// Layout specific properties. Only set if page_type = LAYOUT.
    pub layout_properties: Option<LayoutProperties>,

    /// Notes specific properties. Only set if page_type = NOTES.
    pub notes_properties: Option<NotesProperties>,
}

impl Page {
    /// The page elements, or an empty slice when the page has none.
    pub fn elements(&self) -> &[PageElement] {
        self.page_elements.as_deref().unwrap_or_default()
    }
}
