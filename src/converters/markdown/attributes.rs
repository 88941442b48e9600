//! Trailing `{.class #id key=value}` attribute suffixes on block elements.
//!
//! Parsing is best effort: anything that does not fully match the grammar is left
//! in place as ordinary text.

use indexmap::IndexMap;
use once_cell::sync::Lazy;
use regex::Regex;

static TRAILING: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{([^{}]*)\}\s*$").expect("valid attribute regex"));

static ITEM: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"\s*(?:\.([\w-]+)|#([\w-]+)|([\w-]+)=(?:"([^"]*)"|'([^']*)'|([^\s"']+)))\s*"#)
        .expect("valid attribute item regex")
});

/// Attributes attached to a block token.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Attributes {
    pub id: Option<String>,
    pub classes: Vec<String>,
    pub pairs: IndexMap<String, String>,
}

impl Attributes {
    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs.get(key).map(String::as_str)
    }

    /// Parses the inside of a `{...}` group. Returns `None` unless every item is valid.
    pub fn parse(body: &str) -> Option<Attributes> {
        let body = body.trim();
        if body.is_empty() {
            return None;
        }

        let mut attrs = Attributes::default();
        let mut cursor = 0;
        for caps in ITEM.captures_iter(body) {
            let whole = caps.get(0)?;
            if whole.start() != cursor {
                return None;
            }
            cursor = whole.end();

            if let Some(class) = caps.get(1) {
                attrs.classes.push(class.as_str().to_string());
            } else if let Some(id) = caps.get(2) {
                attrs.id = Some(id.as_str().to_string());
            } else if let Some(key) = caps.get(3) {
                let value = caps
                    .get(4)
                    .or_else(|| caps.get(5))
                    .or_else(|| caps.get(6))
                    .map_or("", |m| m.as_str());
                attrs
                    .pairs
                    .insert(key.as_str().to_string(), value.to_string());
            }
        }

        (cursor == body.len()).then_some(attrs)
    }

    /// Splits a trailing attribute group off `text`, returning the remaining text.
    pub fn split_trailing(text: &str) -> Option<(&str, Attributes)> {
        let caps = TRAILING.captures(text)?;
        let whole = caps.get(0)?;
        let attrs = Attributes::parse(caps.get(1)?.as_str())?;
        Some((text[..whole.start()].trim_end(), attrs))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_classes_ids_and_pairs() {
        let attrs = Attributes::parse(r#".big #intro layout=TITLE_ONLY note="two words""#).unwrap();
        assert!(attrs.has_class("big"));
        assert_eq!(attrs.id.as_deref(), Some("intro"));
        assert_eq!(attrs.get("layout"), Some("TITLE_ONLY"));
        assert_eq!(attrs.get("note"), Some("two words"));
    }

    #[test]
    fn splits_suffix_from_text() {
        let (rest, attrs) = Attributes::split_trailing("Left column {.column}").unwrap();
        assert_eq!(rest, "Left column");
        assert!(attrs.has_class("column"));

        let (rest, attrs) = Attributes::split_trailing("{layout=MAIN_POINT}").unwrap();
        assert_eq!(rest, "");
        assert_eq!(attrs.get("layout"), Some("MAIN_POINT"));
    }

    #[test]
    fn malformed_suffix_is_ignored() {
        assert!(Attributes::split_trailing("a set {1, 2}").is_none());
        assert!(Attributes::split_trailing("empty {}").is_none());
        assert!(Attributes::split_trailing("no braces").is_none());
    }
}
