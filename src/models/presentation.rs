use serde::{Deserialize, Serialize};

use crate::models::common::Size;
use crate::models::page::Page;

/// Represents a Google Slides presentation.
/// Derived from: https://developers.google.com/slides/api/reference/rest/v1/presentations
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Presentation {
    /// The ID of the presentation.
    pub presentation_id: String,

    /// The size of pages in the presentation.
    pub page_size: Option<Size>,

    /// The slides in the presentation. A slide inherits properties from a slide layout.
    pub slides: Option<Vec<Page>>,

    /// The title of the presentation.
    pub title: Option<String>,

    /// The layouts in the presentation. A layout is a template that determines
    /// how content is arranged and styled on the slides that inherit from that
    /// layout.
    pub layouts: Option<Vec<Page>>,

    /// Output only. The revision ID of the presentation.
    pub revision_id: Option<String>,
}
