use serde::{Deserialize, Serialize};

/// Specifies a unit of length.
/// Derived from: https://developers.google.com/slides/api/reference/rest/v1/Dimension#Unit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Unit {
    /// The units are unknown. Should not be used.
    #[serde(rename = "UNIT_UNSPECIFIED")]
    UnitUnspecified,
    /// An English Metric Unit (EMU). 1 EMU = 1/914400 inch = 1/360000 cm.
    Emu,
    /// A point (pt). 1 pt = 1/72 inch.
    Pt,
}

/// A magnitude in a specific unit.
/// Derived from: https://developers.google.com/slides/api/reference/rest/v1/Dimension
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dimension {
    /// The magnitude.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub magnitude: Option<f64>,
    /// The units for magnitude.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit: Option<Unit>,
}

impl Dimension {
    pub fn pt(magnitude: f64) -> Self {
        Dimension {
            magnitude: Some(magnitude),
            unit: Some(Unit::Pt),
        }
    }

    pub fn emu(magnitude: f64) -> Self {
        Dimension {
            magnitude: Some(magnitude),
            unit: Some(Unit::Emu),
        }
    }
}

/// A width and height.
/// Derived from: https://developers.google.com/slides/api/reference/rest/v1/Size
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Size {
    /// The width. Missing width does not inherit from parents.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<Dimension>,
    /// The height. Missing height does not inherit from parents.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<Dimension>,
}

/// AffineTransform uses a 3x3 matrix with an implied last row of [ 0 0 1 ]
/// to transform source coordinates (x,y) into destination coordinates (x', y').
///
/// Only the translation elements are read when ordering placeholders; the scale
/// elements are written when placing images.
/// Derived from: https://developers.google.com/slides/api/reference/rest/v1/AffineTransform
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AffineTransform {
    /// The X coordinate scaling element.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scale_x: Option<f64>,
    /// The Y coordinate scaling element.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scale_y: Option<f64>,
    /// The X coordinate translation element.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub translate_x: Option<f64>,
    /// The Y coordinate translation element.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub translate_y: Option<f64>,
    /// The units for the translation elements.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit: Option<Unit>,
}

impl AffineTransform {
    /// Identity scale, translated to the given offset in EMU.
    pub fn translate_emu(x: f64, y: f64) -> Self {
        AffineTransform {
            scale_x: Some(1.0),
            scale_y: Some(1.0),
            translate_x: Some(x),
            translate_y: Some(y),
            unit: Some(Unit::Emu),
        }
    }
}
