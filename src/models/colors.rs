use serde::{Deserialize, Serialize};

/// An RGB color.
/// Derived from: https://developers.google.com/slides/api/reference/rest/v1/presentations.pages/other#RgbColor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RgbColor {
    /// The red component of the color, from 0.0 to 1.0.
    pub red: f32,
    /// The green component of the color, from 0.0 to 1.0.
    pub green: f32,
    /// The blue component of the color, from 0.0 to 1.0.
    pub blue: f32,
}

impl RgbColor {
    /// Builds a color from 8-bit channels.
    pub fn from_u8(red: u8, green: u8, blue: u8) -> Self {
        RgbColor {
            red: f32::from(red) / 255.0,
            green: f32::from(green) / 255.0,
            blue: f32::from(blue) / 255.0,
        }
    }
}

/// A solid color value. Theme colors are never produced from Markdown, so only
/// the RGB arm of the API union is modelled.
/// Derived from: https://developers.google.com/slides/api/reference/rest/v1/presentations.pages/other#OpaqueColor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OpaqueColor {
    pub rgb_color: RgbColor,
}

/// A color that can either be fully opaque or fully transparent.
/// Derived from: https://developers.google.com/slides/api/reference/rest/v1/presentations.pages/other#OptionalColor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptionalColor {
    /// If set, this will be used as an opaque color. If unset, the color is rendered as transparent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opaque_color: Option<OpaqueColor>,
}

impl From<RgbColor> for OptionalColor {
    fn from(rgb_color: RgbColor) -> Self {
        OptionalColor {
            opaque_color: Some(OpaqueColor { rgb_color }),
        }
    }
}
