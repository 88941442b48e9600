// src/models/elements.rs

use serde::{Deserialize, Serialize};

use crate::models::common::{AffineTransform, Size};
use crate::models::shape::{PlaceholderType, Shape};
use crate::models::table::Table;

/// A visual element rendered on a page.
///
/// The API encodes the element kind as a union keyed by field name (`shape`, `table`,
/// `image`, ...). Only shapes and tables are ever targeted by generated requests, so
/// the remaining kinds are left to serde's unknown-field handling.
/// Derived from: https://developers.google.com/slides/api/reference/rest/v1/presentations.pages#PageElement
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageElement {
    /// The object ID for this page element. Object IDs used by Page and PageElement
    /// share the same namespace.
    pub object_id: String,

    /// The size of the page element.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<Size>,

    /// The transform of the page element.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transform: Option<AffineTransform>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub shape: Option<Shape>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub table: Option<Table>,
}

impl PageElement {
    /// The placeholder role of this element, if it is a placeholder shape.
    pub fn placeholder_type(&self) -> Option<PlaceholderType> {
        self.shape.as_ref().and_then(Shape::placeholder_type)
    }

    pub(crate) fn translate_x(&self) -> f64 {
        self.transform
            .as_ref()
            .and_then(|t| t.translate_x)
            .unwrap_or(0.0)
    }

    pub(crate) fn translate_y(&self) -> f64 {
        self.transform
            .as_ref()
            .and_then(|t| t.translate_y)
            .unwrap_or(0.0)
    }
}
