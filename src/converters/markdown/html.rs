//! Raw HTML recognised inside Markdown: comments (speaker notes) and a handful of
//! inline elements that toggle text styles.

use log::{debug, warn};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::errors::{Result, SlidesError};
use crate::models::colors::RgbColor;
use crate::models::common::Dimension;
use crate::models::properties::{BaselineOffset, TextStyle};

pub const MONOSPACE_FONT: &str = "Courier New";

static TAG: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^<\s*(/)?\s*([A-Za-z][A-Za-z0-9]*)\b([^>]*)>$").expect("valid tag regex")
});

static COMMENT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)<!--(.*?)-->").expect("valid comment regex"));

static STYLE_ATTR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?i)\bstyle\s*=\s*(?:"([^"]*)"|'([^']*)')"#).expect("valid style regex")
});

static RGB_FN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^rgb\(\s*(\d{1,3})\s*,\s*(\d{1,3})\s*,\s*(\d{1,3})\s*\)$").expect("valid rgb regex")
});

static FONT_SIZE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d+(?:\.\d+)?)\s*(pt|px)?$").expect("valid size regex"));

/// An inline HTML fragment that the extractor understands.
#[derive(Debug, Clone, PartialEq)]
pub enum InlineHtml {
    Open { tag: String, style: TextStyle },
    Close { tag: String },
    Comment(String),
}

/// Extracts the bodies of the HTML comments in a raw HTML fragment.
///
/// Returns `Ok(None)` when the fragment does not start with a comment and an error
/// when a comment is never terminated. Anything outside the comments is dropped.
pub fn comment_bodies(html: &str) -> Result<Option<Vec<String>>> {
    let trimmed = html.trim();
    if !trimmed.starts_with("<!--") {
        return Ok(None);
    }

    let mut bodies = Vec::new();
    let mut cursor = 0;
    for caps in COMMENT.captures_iter(trimmed) {
        let Some(whole) = caps.get(0) else {
            continue;
        };
        let between = trimmed[cursor..whole.start()].trim();
        if !between.is_empty() {
            warn!("Ignoring HTML between comments: {}", between);
        }
        bodies.push(caps.get(1).map_or("", |m| m.as_str()).to_string());
        cursor = whole.end();
    }

    let rest = trimmed[cursor..].trim();
    if rest.contains("<!--") {
        return Err(SlidesError::Parse(format!(
            "Malformed HTML comment: {}",
            trimmed
        )));
    }
    if !rest.is_empty() {
        warn!("Ignoring HTML after comment: {}", rest);
    }
    Ok(Some(bodies))
}

/// Classifies an inline HTML fragment. Elements outside the supported set are an error.
pub fn parse_inline(html: &str) -> Result<InlineHtml> {
    if let Some(bodies) = comment_bodies(html)? {
        return Ok(InlineHtml::Comment(bodies.join("\n")));
    }

    let trimmed = html.trim();
    let caps = TAG.captures(trimmed).ok_or_else(|| {
        SlidesError::Parse(format!("Unsupported inline HTML element: {}", trimmed))
    })?;
    let tag = caps
        .get(2)
        .map(|m| m.as_str().to_ascii_lowercase())
        .unwrap_or_default();

    if caps.get(1).is_some() {
        style_for_tag(&tag, "")?;
        return Ok(InlineHtml::Close { tag });
    }

    let attributes = caps.get(3).map_or("", |m| m.as_str());
    let style = style_for_tag(&tag, attributes)?;
    Ok(InlineHtml::Open { tag, style })
}

fn style_for_tag(tag: &str, attributes: &str) -> Result<TextStyle> {
    let mut style = TextStyle::default();
    match tag {
        "strong" | "b" => style.bold = Some(true),
        "em" | "i" => style.italic = Some(true),
        "code" => style.font_family = Some(MONOSPACE_FONT.to_string()),
        "sub" => style.baseline_offset = Some(BaselineOffset::Subscript),
        "sup" => style.baseline_offset = Some(BaselineOffset::Superscript),
        "span" => {
            if let Some(caps) = STYLE_ATTR.captures(attributes) {
                let css = caps.get(1).or_else(|| caps.get(2)).map_or("", |m| m.as_str());
                style = parse_css(css);
            }
        }
        other => {
            return Err(SlidesError::Parse(format!(
                "Unsupported inline HTML element: {}",
                other
            )))
        }
    }
    Ok(style)
}

/// Maps a CSS declaration list onto a text style. Unknown declarations are skipped.
pub fn parse_css(css: &str) -> TextStyle {
    let mut style = TextStyle::default();
    for declaration in css.split(';') {
        let Some((property, value)) = declaration.split_once(':') else {
            continue;
        };
        let property = property.trim().to_ascii_lowercase();
        let value = value.trim();
        let lowered = value.to_ascii_lowercase();

        match property.as_str() {
            "color" => style.foreground_color = parse_color(&lowered).map(Into::into),
            "background-color" => style.background_color = parse_color(&lowered).map(Into::into),
            "font-family" => {
                let family = value
                    .split(',')
                    .next()
                    .unwrap_or_default()
                    .trim()
                    .trim_matches(|c| c == '"' || c == '\'');
                if !family.is_empty() {
                    style.font_family = Some(family.to_string());
                }
            }
            "font-size" => style.font_size = parse_font_size(&lowered),
            "font-weight" => {
                style.bold = Some(lowered == "bold" || lowered.parse::<u32>().is_ok_and(|w| w >= 700))
            }
            "font-style" => style.italic = Some(lowered == "italic" || lowered == "oblique"),
            "font-variant" => style.small_caps = Some(lowered == "small-caps"),
            "text-decoration" | "text-decoration-line" => {
                if lowered.contains("underline") {
                    style.underline = Some(true);
                }
                if lowered.contains("line-through") {
                    style.strikethrough = Some(true);
                }
            }
            other => debug!("[parse_css] Ignoring CSS property '{}'", other),
        }
    }
    style
}

fn parse_color(value: &str) -> Option<RgbColor> {
    if let Some(hex) = value.strip_prefix('#') {
        let expanded: String = match hex.len() {
            3 => hex.chars().flat_map(|c| [c, c]).collect(),
            6 => hex.to_string(),
            _ => return None,
        };
        let channel = |i: usize| u8::from_str_radix(expanded.get(i..i + 2)?, 16).ok();
        return Some(RgbColor::from_u8(channel(0)?, channel(2)?, channel(4)?));
    }

    let caps = RGB_FN.captures(value)?;
    let channel = |i: usize| caps.get(i)?.as_str().parse::<u8>().ok();
    Some(RgbColor::from_u8(channel(1)?, channel(2)?, channel(3)?))
}

fn parse_font_size(value: &str) -> Option<Dimension> {
    let caps = FONT_SIZE.captures(value)?;
    let magnitude: f64 = caps.get(1)?.as_str().parse().ok()?;
    match caps.get(2).map(|m| m.as_str()) {
        Some("px") => Some(Dimension::pt(magnitude * 0.75)),
        _ => Some(Dimension::pt(magnitude)),
    }
}
