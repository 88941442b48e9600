use serde::{Deserialize, Serialize};

/// The role of a placeholder shape, as inherited from its layout.
/// Derived from: https://developers.google.com/slides/api/reference/rest/v1/presentations.pages/other#Type_4
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PlaceholderType {
    /// Default value, signifies it is not a placeholder.
    None,
    Body,
    Chart,
    ClipArt,
    CenteredTitle,
    Diagram,
    DateAndTime,
    Footer,
    Header,
    Media,
    /// Any content type placeholder.
    Object,
    Picture,
    SlideNumber,
    Subtitle,
    Table,
    Title,
    /// Slide thumbnail on a notes page.
    SlideImage,
}

impl PlaceholderType {
    /// Roles that can receive a slide title, in order of preference.
    pub const TITLES: [PlaceholderType; 2] = [PlaceholderType::Title, PlaceholderType::CenteredTitle];
}

/// The placeholder information that uniquely identifies a placeholder shape.
/// Derived from: https://developers.google.com/slides/api/reference/rest/v1/presentations.pages/other#Placeholder
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Placeholder {
    /// The type of the placeholder.
    #[serde(rename = "type")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub placeholder_type: Option<PlaceholderType>,
    /// The index of the placeholder. If the same placeholder types are present on the
    /// same page, they would have different index values.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub index: Option<i32>,
    /// The object ID of this shape's parent placeholder on the layout.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_object_id: Option<String>,
}

/// A PageElement kind representing a generic shape. Only the parts needed to find
/// insertion targets are read; everything else in the API resource is ignored.
/// Derived from: https://developers.google.com/slides/api/reference/rest/v1/presentations.pages/shapes
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Shape {
    /// The type of the shape, e.g. `TEXT_BOX` or `RECTANGLE`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shape_type: Option<String>,

    /// The placeholder information for the shape. If set, the shape is a placeholder shape
    /// and inherits properties from the corresponding placeholder shape on the layout or master.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<Placeholder>,
}

impl Shape {
    pub fn placeholder_type(&self) -> Option<PlaceholderType> {
        self.placeholder.as_ref().and_then(|p| p.placeholder_type)
    }
}
