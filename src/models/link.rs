use serde::{Deserialize, Serialize};

/// A hypertext link. Markdown only ever produces external URLs, so the slide-relative
/// destinations of the API union are not modelled.
/// Derived from: https://developers.google.com/slides/api/reference/rest/v1/presentations.pages/other#Link
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Link {
    /// If set, indicates this is a link to the external web page at this URL.
    pub url: String,
}

impl Link {
    pub fn url(url: impl Into<String>) -> Self {
        Link { url: url.into() }
    }
}
