//! Chooses a predefined layout for a slide from the shape of its content.

use indexmap::IndexSet;
use log::debug;

use crate::definition::SlideDefinition;

pub const SECTION_TITLE_AND_DESCRIPTION: &str = "SECTION_TITLE_AND_DESCRIPTION";
pub const TITLE: &str = "TITLE";
pub const BIG_NUMBER: &str = "BIG_NUMBER";
pub const MAIN_POINT: &str = "MAIN_POINT";
pub const TITLE_AND_TWO_COLUMNS: &str = "TITLE_AND_TWO_COLUMNS";
pub const TITLE_AND_BODY: &str = "TITLE_AND_BODY";
pub const SECTION_HEADER: &str = "SECTION_HEADER";
pub const BLANK: &str = "BLANK";

/// Classifies a slide by shape alone. The first matching rule wins.
pub fn classify(slide: &SlideDefinition) -> &'static str {
    let title = slide.title.is_some();
    let subtitle = slide.subtitle.is_some();
    let bodies = slide.bodies.len();
    let tables = !slide.tables.is_empty();
    let big = slide.is_big();

    if !title {
        BLANK
    } else if subtitle && bodies > 0 {
        SECTION_TITLE_AND_DESCRIPTION
    } else if subtitle && !tables {
        TITLE
    } else if big && bodies == 1 && !tables {
        BIG_NUMBER
    } else if big && bodies == 0 && !tables {
        MAIN_POINT
    } else if bodies == 2 {
        TITLE_AND_TWO_COLUMNS
    } else if bodies > 0 || tables {
        TITLE_AND_BODY
    } else {
        SECTION_HEADER
    }
}

/// Picks the layout name for `slide` among the deck's `available` layouts.
///
/// A custom layout wins when the deck has it. Otherwise the slide is classified; a
/// classification the deck lacks falls back to the deck's first layout. With no
/// layouts at all the classified name is returned unchanged.
pub fn match_layout(available: &IndexSet<String>, slide: &SlideDefinition) -> String {
    if let Some(custom) = &slide.custom_layout {
        if available.contains(custom) {
            return custom.clone();
        }
    }

    let classified = classify(slide);
    match available.first() {
        Some(fallback) if !available.contains(classified) => {
            debug!(
                "[match_layout] Layout {} not in deck, falling back to {}",
                classified, fallback
            );
            fallback.clone()
        }
        _ => classified.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::definition::{BodyBlock, TableModel, TextBlock};

    fn names(list: &[&str]) -> IndexSet<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    fn all_layouts() -> IndexSet<String> {
        names(&[
            SECTION_TITLE_AND_DESCRIPTION,
            TITLE,
            BIG_NUMBER,
            MAIN_POINT,
            TITLE_AND_TWO_COLUMNS,
            TITLE_AND_BODY,
            SECTION_HEADER,
            BLANK,
        ])
    }

    fn slide(title: bool, subtitle: bool, bodies: usize) -> SlideDefinition {
        SlideDefinition {
            title: title.then(|| TextBlock::new("Title")),
            subtitle: subtitle.then(|| TextBlock::new("Subtitle")),
            bodies: (0..bodies)
                .map(|i| BodyBlock {
                    text: TextBlock::new(format!("body {i}")),
                })
                .collect(),
            ..Default::default()
        }
    }

    fn big(mut slide: SlideDefinition) -> SlideDefinition {
        if let Some(title) = &mut slide.title {
            title.big = true;
        }
        slide
    }

    #[test]
    fn classification_follows_priority_order() {
        assert_eq!(classify(&slide(true, true, 1)), SECTION_TITLE_AND_DESCRIPTION);
        assert_eq!(classify(&slide(true, true, 0)), TITLE);
        assert_eq!(classify(&big(slide(true, false, 1))), BIG_NUMBER);
        assert_eq!(classify(&big(slide(true, false, 0))), MAIN_POINT);
        assert_eq!(classify(&slide(true, false, 2)), TITLE_AND_TWO_COLUMNS);
        assert_eq!(classify(&slide(true, false, 3)), TITLE_AND_BODY);
        assert_eq!(classify(&slide(true, false, 0)), SECTION_HEADER);
        assert_eq!(classify(&slide(false, false, 2)), BLANK);
    }

    #[test]
    fn tables_count_as_body_content() {
        let mut with_table = slide(true, false, 0);
        with_table.tables.push(TableModel::from_cells(vec![vec![TextBlock::new("x")]]));
        assert_eq!(classify(&with_table), TITLE_AND_BODY);
    }

    #[test]
    fn custom_layout_is_used_when_available() {
        let mut custom = slide(true, false, 1);
        custom.custom_layout = Some("MAIN_POINT".to_string());
        assert_eq!(match_layout(&all_layouts(), &custom), "MAIN_POINT");

        custom.custom_layout = Some("Missing".to_string());
        assert_eq!(match_layout(&all_layouts(), &custom), TITLE_AND_BODY);
    }

    #[test]
    fn missing_classification_falls_back_to_first_layout() {
        let available = names(&["TITLE", "BLANK"]);
        assert_eq!(match_layout(&available, &slide(true, false, 1)), "TITLE");
        assert_eq!(match_layout(&IndexSet::new(), &slide(true, false, 1)), TITLE_AND_BODY);
    }

    #[test]
    fn matching_is_deterministic() {
        let available = names(&["BLANK", "TITLE_AND_BODY"]);
        let input = slide(true, false, 2);
        let first = match_layout(&available, &input);
        for _ in 0..10 {
            assert_eq!(match_layout(&available, &input), first);
        }
        assert_eq!(first, "BLANK");
    }
}
