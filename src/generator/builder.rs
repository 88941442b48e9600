//! Turns slide definitions into `batchUpdate` requests.
//!
//! Creation and population are separate passes: placeholder ids only exist once the
//! server has created the slide, so `populate_slide` must run against a freshly
//! reloaded presentation.

use indexmap::{IndexMap, IndexSet};
use log::{debug, warn};
use serde_json::Value;

use crate::definition::{ListKind, SlideDefinition, TableModel, TextBlock};
use crate::errors::{Result, SlidesError};
use crate::generator::layout::match_layout;
use crate::ids::ObjectIdSource;
use crate::models::common::{AffineTransform, Dimension, Size};
use crate::models::presentation::Presentation;
use crate::models::properties::TextStyle;
use crate::models::requests::{
    BulletGlyphPreset, CreateImageRequest, CreateParagraphBulletsRequest, CreateSlideRequest,
    CreateTableRequest, InsertTextRequest, LayoutReference, PageElementProperties, Range, Request,
    UpdatePageElementsZOrderRequest, UpdateTextStyleRequest, ZOrderOperation,
};
use crate::models::shape::PlaceholderType;
use crate::models::table::TableCellLocation;

/// Names of the style attributes set on `style`, in declaration order.
///
/// An attribute explicitly set to `false` is part of the mask; only unset ones are left out.
pub fn field_mask(style: &TextStyle) -> Result<Vec<String>> {
    match serde_json::to_value(style)? {
        Value::Object(map) => Ok(map.keys().cloned().collect()),
        _ => Ok(Vec::new()),
    }
}

fn bullet_preset(kind: ListKind) -> BulletGlyphPreset {
    match kind {
        ListKind::Ordered => BulletGlyphPreset::NumberedDigitAlphaRoman,
        ListKind::Unordered => BulletGlyphPreset::BulletDiscCircleSquare,
    }
}

/// Emits the requests that insert one text block into a shape or table cell:
/// the text itself, one style update per run, then bullets.
///
/// Bullets are created in descending start order. Creating bullets strips the
/// leading tabs of each paragraph, which shifts every later offset, so later
/// lists must be handled first.
pub fn emit_text_block(
    object_id: &str,
    cell_location: Option<TableCellLocation>,
    block: &TextBlock,
) -> Result<Vec<Request>> {
    if block.is_empty() {
        return Ok(Vec::new());
    }

    let mut requests = vec![Request::InsertText(InsertTextRequest {
        object_id: object_id.to_string(),
        cell_location,
        text: block.raw_text.clone(),
        insertion_index: 0,
    })];

    for run in &block.runs {
        let mask = field_mask(&run.style)?;
        if mask.is_empty() {
            continue;
        }
        requests.push(Request::UpdateTextStyle(UpdateTextStyleRequest {
            object_id: object_id.to_string(),
            cell_location,
            style: run.style.clone(),
            text_range: Range::fixed(run.start, run.end),
            fields: mask.join(","),
        }));
    }

    let mut markers = block.list_markers.clone();
    markers.sort_by(|a, b| b.start.cmp(&a.start));
    for marker in markers {
        requests.push(Request::CreateParagraphBullets(
            CreateParagraphBulletsRequest {
                object_id: object_id.to_string(),
                cell_location,
                text_range: Range::fixed(marker.start, marker.end),
                bullet_preset: bullet_preset(marker.kind),
            },
        ));
    }

    Ok(requests)
}

/// Creation pass for one slide.
///
/// Resolves the slide's layout against `layouts` (layout name to object id, in deck
/// order), assigns the slide a fresh object id and returns the `createSlide` request.
pub fn create_slide(
    layouts: &IndexMap<String, String>,
    slide: &mut SlideDefinition,
    ids: &mut dyn ObjectIdSource,
) -> Result<Request> {
    let available: IndexSet<String> = layouts.keys().cloned().collect();
    let unresolved = |name: &str| SlidesError::LayoutResolution {
        name: name.to_string(),
        available: available.iter().cloned().collect(),
    };

    if let Some(custom) = &slide.custom_layout {
        if !available.contains(custom) {
            return Err(unresolved(custom));
        }
    }

    let name = match_layout(&available, slide);
    let layout_id = layouts.get(&name).ok_or_else(|| unresolved(&name))?;

    let object_id = ids.next_id()?;
    debug!("[create_slide] {} uses layout {} ({})", object_id, name, layout_id);
    slide.object_id = Some(object_id.clone());

    Ok(Request::CreateSlide(CreateSlideRequest {
        object_id,
        insertion_index: None,
        slide_layout_reference: LayoutReference {
            layout_id: layout_id.clone(),
        },
    }))
}

/// Population pass for one slide, run against the presentation as reloaded after
/// the creation batch was applied.
pub fn populate_slide(
    presentation: &Presentation,
    slide: &SlideDefinition,
    ids: &mut dyn ObjectIdSource,
) -> Result<Vec<Request>> {
    let slide_id = slide.object_id.as_deref().ok_or_else(|| {
        SlidesError::Precondition("Slide must be created before it is populated".to_string())
    })?;
    if presentation.find_slide(slide_id).is_none() {
        return Err(SlidesError::Precondition(format!(
            "Slide {} not found in presentation {}",
            slide_id, presentation.presentation_id
        )));
    }
    if slide.tables.len() > 1 {
        return Err(SlidesError::Structural(
            "Multiple tables per slide are not supported.".to_string(),
        ));
    }

    let mut requests = Vec::new();

    if let Some(title) = &slide.title {
        match presentation.find_first_placeholder(slide_id, &PlaceholderType::TITLES) {
            Some(target) => requests.extend(emit_text_block(&target.object_id, None, title)?),
            None => warn!("[populate_slide] No title placeholder on slide {}", slide_id),
        }
    }

    if let Some(subtitle) = &slide.subtitle {
        match presentation.find_first_placeholder(slide_id, &[PlaceholderType::Subtitle]) {
            Some(target) => requests.extend(emit_text_block(&target.object_id, None, subtitle)?),
            None => warn!("[populate_slide] No subtitle placeholder on slide {}", slide_id),
        }
    }

    let placeholders = presentation.find_placeholders(slide_id, PlaceholderType::Body);
    for (index, body) in slide.bodies.iter().enumerate() {
        match placeholders.get(index) {
            Some(target) => requests.extend(emit_text_block(&target.object_id, None, &body.text)?),
            None => warn!(
                "[populate_slide] Slide {} has no body placeholder for column {}, skipping",
                slide_id,
                index + 1
            ),
        }
    }

    if let Some(table) = slide.tables.first() {
        requests.extend(emit_table(slide_id, table, ids)?);
    }

    for image in &slide.images {
        let image_id = ids.next_id()?;
        let mut element_properties = PageElementProperties::on_page(slide_id);
        let background = match presentation.page_dimensions() {
            Some((width, height)) if image.background => {
                element_properties.size = Some(Size {
                    width: Some(Dimension::emu(width)),
                    height: Some(Dimension::emu(height)),
                });
                element_properties.transform = Some(AffineTransform::translate_emu(0.0, 0.0));
                true
            }
            None if image.background => {
                warn!(
                    "[populate_slide] Page size unknown, placing background image {} as a regular image",
                    image.url
                );
                false
            }
            _ => false,
        };
        requests.push(Request::CreateImage(CreateImageRequest {
            object_id: image_id.clone(),
            url: image.url.clone(),
            element_properties,
        }));
        if background {
            requests.push(Request::UpdatePageElementsZOrder(
                UpdatePageElementsZOrderRequest {
                    page_element_object_ids: vec![image_id],
                    operation: ZOrderOperation::SendToBack,
                },
            ));
        }
    }

    if let Some(notes) = slide.notes.as_deref().filter(|n| !n.is_empty()) {
        match presentation.find_speaker_notes_object_id(slide_id) {
            Some(notes_id) => requests.push(Request::InsertText(InsertTextRequest {
                object_id: notes_id.to_string(),
                cell_location: None,
                text: notes.to_string(),
                insertion_index: 0,
            })),
            None => warn!("[populate_slide] Slide {} has no speaker notes shape", slide_id),
        }
    }

    debug!(
        "[populate_slide] {} requests for slide {}",
        requests.len(),
        slide_id
    );
    Ok(requests)
}

fn emit_table(
    slide_id: &str,
    table: &TableModel,
    ids: &mut dyn ObjectIdSource,
) -> Result<Vec<Request>> {
    let table_id = ids.next_id()?;
    let mut requests = vec![Request::CreateTable(CreateTableRequest {
        object_id: table_id.clone(),
        element_properties: PageElementProperties::on_page(slide_id),
        rows: table.rows,
        columns: table.columns,
    })];

    for (row_index, row) in table.cells.iter().enumerate() {
        for (column_index, cell) in row.iter().enumerate() {
            let location = TableCellLocation {
                row_index,
                column_index,
            };
            requests.extend(emit_text_block(&table_id, Some(location), cell)?);
        }
    }
    Ok(requests)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::converters::markdown::extract_slides;
    use crate::definition::{BodyBlock, ImageDefinition, ListMarker, StyleRun};
    use crate::generator::introspection::tests::sample_presentation;
    use crate::ids::SequentialIds;

    fn layouts(names: &[(&str, &str)]) -> IndexMap<String, String> {
        names
            .iter()
            .map(|(name, id)| (name.to_string(), id.to_string()))
            .collect()
    }

    fn created(slide: SlideDefinition) -> SlideDefinition {
        SlideDefinition {
            object_id: Some("s1".to_string()),
            ..slide
        }
    }

    #[test]
    fn field_mask_lists_set_attributes_only() {
        let style = TextStyle {
            underline: Some(false),
            bold: Some(true),
            font_family: Some(String::new()),
            ..Default::default()
        };
        assert_eq!(field_mask(&style).unwrap(), vec!["bold", "fontFamily", "underline"]);
        assert!(field_mask(&TextStyle::default()).unwrap().is_empty());
    }

    #[test]
    fn missing_custom_layout_lists_available_layouts() {
        let mut slide = extract_slides("# Title").unwrap().remove(0);
        slide.custom_layout = Some("Missing".to_string());
        let mut ids = SequentialIds::new("slide");

        let err = create_slide(
            &layouts(&[("TITLE", "l_title"), ("BLANK", "l_blank")]),
            &mut slide,
            &mut ids,
        )
        .unwrap_err();
        assert!(matches!(err, SlidesError::LayoutResolution { .. }));
        assert!(err.to_string().contains("TITLE, BLANK"));
        assert_eq!(slide.object_id, None);
    }

    #[test]
    fn create_slide_assigns_id_and_layout() {
        let mut slide = extract_slides("# Title\n\nSome body").unwrap().remove(0);
        let mut ids = SequentialIds::new("slide");
        let request = create_slide(
            &layouts(&[("TITLE", "l_title"), ("TITLE_AND_BODY", "l_body")]),
            &mut slide,
            &mut ids,
        )
        .unwrap();

        assert_eq!(slide.object_id.as_deref(), Some("slide_000"));
        assert_eq!(
            request,
            Request::CreateSlide(CreateSlideRequest {
                object_id: "slide_000".into(),
                insertion_index: None,
                slide_layout_reference: LayoutReference {
                    layout_id: "l_body".into()
                },
            })
        );
    }

    #[test]
    fn empty_deck_cannot_resolve_layout() {
        let mut slide = extract_slides("# Title").unwrap().remove(0);
        let err = create_slide(&IndexMap::new(), &mut slide, &mut SequentialIds::default())
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Unable to find layout 'SECTION_HEADER'. Available layouts: "
        );
    }

    #[test]
    fn bullets_are_emitted_in_descending_start_order() {
        let block = TextBlock {
            raw_text: "a\nb\nintro\nc\nd".to_string(),
            runs: vec![],
            list_markers: vec![
                ListMarker {
                    start: 0,
                    end: 3,
                    kind: ListKind::Unordered,
                },
                ListMarker {
                    start: 10,
                    end: 13,
                    kind: ListKind::Ordered,
                },
            ],
            big: false,
        };
        let requests = emit_text_block("body", None, &block).unwrap();
        let starts: Vec<usize> = requests
            .iter()
            .filter_map(|r| match r {
                Request::CreateParagraphBullets(b) => Some(b.text_range.start_index),
                _ => None,
            })
            .collect();
        assert_eq!(starts, vec![10, 0]);
        assert!(matches!(
            &requests[1],
            Request::CreateParagraphBullets(b) if b.bullet_preset == BulletGlyphPreset::NumberedDigitAlphaRoman
        ));
    }

    #[test]
    fn text_then_styles_then_bullets() {
        let block = TextBlock {
            raw_text: "bold item".to_string(),
            runs: vec![
                StyleRun {
                    start: 0,
                    end: 4,
                    style: TextStyle {
                        bold: Some(true),
                        ..Default::default()
                    },
                },
                StyleRun {
                    start: 5,
                    end: 9,
                    style: TextStyle::default(),
                },
            ],
            list_markers: vec![ListMarker {
                start: 0,
                end: 9,
                kind: ListKind::Unordered,
            }],
            big: false,
        };
        let requests = emit_text_block("body", None, &block).unwrap();
        assert_eq!(requests.len(), 3);
        assert!(matches!(&requests[0], Request::InsertText(t) if t.text == "bold item"));
        assert!(matches!(&requests[1], Request::UpdateTextStyle(u) if u.fields == "bold"));
        assert!(matches!(&requests[2], Request::CreateParagraphBullets(_)));
    }

    #[test]
    fn empty_block_emits_nothing() {
        assert!(emit_text_block("body", None, &TextBlock::default())
            .unwrap()
            .is_empty());
    }

    #[test]
    fn populate_requires_created_slide() {
        let deck = sample_presentation();
        let mut ids = SequentialIds::default();

        let err = populate_slide(&deck, &SlideDefinition::default(), &mut ids).unwrap_err();
        assert!(matches!(err, SlidesError::Precondition(_)));

        let ghost = SlideDefinition {
            object_id: Some("ghost".into()),
            ..Default::default()
        };
        assert!(matches!(
            populate_slide(&deck, &ghost, &mut ids),
            Err(SlidesError::Precondition(_))
        ));
    }

    #[test]
    fn populate_fills_title_columns_and_notes() {
        let deck = sample_presentation();
        let slide = created(SlideDefinition {
            title: Some(TextBlock::new("Hello")),
            bodies: vec![
                BodyBlock {
                    text: TextBlock::new("left"),
                },
                BodyBlock {
                    text: TextBlock::new("right"),
                },
                BodyBlock {
                    text: TextBlock::new("dropped"),
                },
            ],
            notes: Some("say this".into()),
            ..Default::default()
        });

        let requests = populate_slide(&deck, &slide, &mut SequentialIds::default()).unwrap();
        let inserts: Vec<(&str, &str)> = requests
            .iter()
            .filter_map(|r| match r {
                Request::InsertText(t) => Some((t.object_id.as_str(), t.text.as_str())),
                _ => None,
            })
            .collect();
        assert_eq!(
            inserts,
            vec![
                ("s1_title", "Hello"),
                ("s1_left", "left"),
                ("s1_right", "right"),
                ("s1_speaker", "say this"),
            ]
        );
    }

    #[test]
    fn tables_are_created_and_filled_by_cell() {
        let deck = sample_presentation();
        let mut slide = extract_slides("# T\n\n| a | b |\n|---|---|\n| **c** | d |")
            .unwrap()
            .remove(0);
        slide.object_id = Some("s1".into());

        let requests =
            populate_slide(&deck, &slide, &mut SequentialIds::new("tbl")).unwrap();
        let create = requests
            .iter()
            .find_map(|r| match r {
                Request::CreateTable(t) => Some(t),
                _ => None,
            })
            .unwrap();
        assert_eq!((create.rows, create.columns), (2, 2));
        assert_eq!(create.object_id, "tbl_000");

        let styled = requests
            .iter()
            .find_map(|r| match r {
                Request::UpdateTextStyle(u) if u.object_id == "tbl_000" => Some(u),
                _ => None,
            })
            .unwrap();
        assert_eq!(
            styled.cell_location,
            Some(TableCellLocation {
                row_index: 1,
                column_index: 0
            })
        );
        assert_eq!(styled.fields, "bold");
    }

    #[test]
    fn second_table_is_rejected() {
        let deck = sample_presentation();
        let table = TableModel::from_cells(vec![vec![TextBlock::new("x")]]);
        let slide = created(SlideDefinition {
            tables: vec![table.clone(), table],
            ..Default::default()
        });
        let err = populate_slide(&deck, &slide, &mut SequentialIds::default()).unwrap_err();
        assert_eq!(err.to_string(), "Multiple tables per slide are not supported.");
    }

    #[test]
    fn background_image_covers_page_and_goes_to_back() {
        let deck = sample_presentation();
        let slide = created(SlideDefinition {
            images: vec![ImageDefinition {
                url: "https://example.com/bg.png".into(),
                alt: String::new(),
                background: true,
            }],
            ..Default::default()
        });

        let requests = populate_slide(&deck, &slide, &mut SequentialIds::new("img")).unwrap();
        assert_eq!(requests.len(), 2);
        let Request::CreateImage(image) = &requests[0] else {
            panic!("expected createImage, got {:?}", requests[0]);
        };
        assert_eq!(
            image.element_properties.size,
            Some(Size {
                width: Some(Dimension::emu(9144000.0)),
                height: Some(Dimension::emu(5143500.0)),
            })
        );
        assert_eq!(
            requests[1],
            Request::UpdatePageElementsZOrder(UpdatePageElementsZOrderRequest {
                page_element_object_ids: vec!["img_000".into()],
                operation: ZOrderOperation::SendToBack,
            })
        );
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn field_mask_names_exactly_the_set_attributes(
                bold in any::<Option<bool>>(),
                font_family in proptest::option::of("[A-Za-z ]{0,10}"),
                font_size in proptest::option::of(1.0f64..96.0),
                italic in any::<Option<bool>>(),
                small_caps in any::<Option<bool>>(),
                strikethrough in any::<Option<bool>>(),
                underline in any::<Option<bool>>(),
            ) {
                let style = TextStyle {
                    bold,
                    font_family: font_family.clone(),
                    font_size: font_size.map(Dimension::pt),
                    italic,
                    small_caps,
                    strikethrough,
                    underline,
                    ..Default::default()
                };
                let expected: Vec<String> = [
                    ("bold", bold.is_some()),
                    ("fontFamily", font_family.is_some()),
                    ("fontSize", font_size.is_some()),
                    ("italic", italic.is_some()),
                    ("smallCaps", small_caps.is_some()),
                    ("strikethrough", strikethrough.is_some()),
                    ("underline", underline.is_some()),
                ]
                .iter()
                .filter(|(_, set)| *set)
                .map(|(name, _)| name.to_string())
                .collect();
                prop_assert_eq!(field_mask(&style).unwrap(), expected);
            }
        }
    }
}
