//! Read-only queries over a fetched presentation.

use std::cmp::Ordering;

use indexmap::IndexMap;

use crate::models::common::{Dimension, Unit};
use crate::models::elements::PageElement;
use crate::models::page::Page;
use crate::models::presentation::Presentation;
use crate::models::shape::PlaceholderType;

const EMU_PER_PT: f64 = 12700.0;

/// Orders elements top-to-bottom, then left-to-right.
fn compare_by_position(a: &PageElement, b: &PageElement) -> Ordering {
    a.translate_y()
        .partial_cmp(&b.translate_y())
        .unwrap_or(Ordering::Equal)
        .then_with(|| {
            a.translate_x()
                .partial_cmp(&b.translate_x())
                .unwrap_or(Ordering::Equal)
        })
}

fn dimension_to_emu(dimension: &Dimension) -> Option<f64> {
    let magnitude = dimension.magnitude?;
    match dimension.unit.as_ref() {
        Some(Unit::Pt) => Some(magnitude * EMU_PER_PT),
        Some(Unit::Emu) => Some(magnitude),
        _ => None,
    }
}

impl Presentation {
    /// Finds a slide by object id.
    pub fn find_slide(&self, slide_id: &str) -> Option<&Page> {
        self.slides
            .as_deref()
            .unwrap_or_default()
            .iter()
            .find(|page| page.object_id == slide_id)
    }

    /// Placeholders of the given role on a slide, top-to-bottom then left-to-right.
    pub fn find_placeholders(&self, slide_id: &str, role: PlaceholderType) -> Vec<&PageElement> {
        let Some(slide) = self.find_slide(slide_id) else {
            return Vec::new();
        };
        let mut found: Vec<&PageElement> = slide
            .elements()
            .iter()
            .filter(|element| element.placeholder_type() == Some(role))
            .collect();
        found.sort_by(|a, b| compare_by_position(a, b));
        found
    }

    /// The first placeholder matching any of `roles`, in order of preference.
    pub fn find_first_placeholder(
        &self,
        slide_id: &str,
        roles: &[PlaceholderType],
    ) -> Option<&PageElement> {
        roles
            .iter()
            .find_map(|role| self.find_placeholders(slide_id, *role).into_iter().next())
    }

    /// Object id of the shape holding the speaker notes for a slide.
    pub fn find_speaker_notes_object_id(&self, slide_id: &str) -> Option<&str> {
        self.find_slide(slide_id)?
            .slide_properties
            .as_ref()?
            .notes_page
            .as_ref()?
            .notes_properties
            .as_ref()?
            .speaker_notes_object_id
            .as_deref()
    }

    /// Default page width and height in EMU.
    pub fn page_dimensions(&self) -> Option<(f64, f64)> {
        let size = self.page_size.as_ref()?;
        let width = dimension_to_emu(size.width.as_ref()?)?;
        let height = dimension_to_emu(size.height.as_ref()?)?;
        Some((width, height))
    }

    /// Named layouts mapped to their object ids, in deck order.
    pub fn layout_ids(&self) -> IndexMap<String, String> {
        self.layouts
            .as_deref()
            .unwrap_or_default()
            .iter()
            .filter_map(|layout| {
                let name = layout.layout_properties.as_ref()?.name.clone()?;
                Some((name, layout.object_id.clone()))
            })
            .collect()
    }

    /// Object ids of every slide currently in the deck.
    pub fn slide_ids(&self) -> Vec<&str> {
        self.slides
            .as_deref()
            .unwrap_or_default()
            .iter()
            .map(|page| page.object_id.as_str())
            .collect()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use serde_json::json;

    /// A deck with a handful of layouts and one slide carrying two body columns.
    pub(crate) fn sample_presentation() -> Presentation {
        serde_json::from_value(json!({
            "presentationId": "deck",
            "pageSize": {
                "width": {"magnitude": 9144000, "unit": "EMU"},
                "height": {"magnitude": 5143500, "unit": "EMU"}
            },
            "layouts": [
                {"objectId": "l_title", "layoutProperties": {"name": "TITLE", "displayName": "Title slide"}},
                {"objectId": "l_body", "layoutProperties": {"name": "TITLE_AND_BODY"}},
                {"objectId": "l_cols", "layoutProperties": {"name": "TITLE_AND_TWO_COLUMNS"}},
                {"objectId": "l_blank", "layoutProperties": {"name": "BLANK"}},
                {"objectId": "l_unnamed"}
            ],
            "slides": [{
                "objectId": "s1",
                "pageElements": [
                    {
                        "objectId": "s1_right",
                        "transform": {"translateX": 4800000, "translateY": 1200000, "unit": "EMU"},
                        "shape": {"shapeType": "TEXT_BOX", "placeholder": {"type": "BODY", "index": 2}}
                    },
                    {
                        "objectId": "s1_title",
                        "transform": {"translateX": 300000, "translateY": 200000, "unit": "EMU"},
                        "shape": {"placeholder": {"type": "TITLE"}}
                    },
                    {
                        "objectId": "s1_left",
                        "transform": {"translateX": 300000, "translateY": 1200000, "unit": "EMU"},
                        "shape": {"placeholder": {"type": "BODY", "index": 1}}
                    },
                    {
                        "objectId": "s1_pic",
                        "image": {"contentUrl": "https://example.com/x.png"}
                    }
                ],
                "slideProperties": {
                    "layoutObjectId": "l_cols",
                    "notesPage": {
                        "objectId": "s1_notes",
                        "pageType": "NOTES",
                        "notesProperties": {"speakerNotesObjectId": "s1_speaker"}
                    }
                }
            }]
        }))
        .expect("sample presentation deserializes")
    }

    #[test]
    fn placeholders_are_ordered_by_position() {
        let deck = sample_presentation();
        let bodies: Vec<&str> = deck
            .find_placeholders("s1", PlaceholderType::Body)
            .iter()
            .map(|e| e.object_id.as_str())
            .collect();
        assert_eq!(bodies, vec!["s1_left", "s1_right"]);
        assert!(deck.find_placeholders("missing", PlaceholderType::Body).is_empty());
    }

    #[test]
    fn title_lookup_falls_back_across_roles() {
        let deck = sample_presentation();
        let title = deck
            .find_first_placeholder("s1", &[PlaceholderType::CenteredTitle, PlaceholderType::Title])
            .unwrap();
        assert_eq!(title.object_id, "s1_title");
        assert!(deck
            .find_first_placeholder("s1", &[PlaceholderType::Subtitle])
            .is_none());
    }

    #[test]
    fn notes_and_page_size() {
        let deck = sample_presentation();
        assert_eq!(deck.find_speaker_notes_object_id("s1"), Some("s1_speaker"));
        assert_eq!(deck.page_dimensions(), Some((9144000.0, 5143500.0)));
    }

    #[test]
    fn layouts_keep_deck_order_and_skip_unnamed() {
        let deck = sample_presentation();
        let layouts = deck.layout_ids();
        let names: Vec<&str> = layouts.keys().map(String::as_str).collect();
        assert_eq!(names, vec!["TITLE", "TITLE_AND_BODY", "TITLE_AND_TWO_COLUMNS", "BLANK"]);
        assert_eq!(layouts["BLANK"], "l_blank");
    }
}
