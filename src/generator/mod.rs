//! Layout matching, presentation introspection and request generation.

pub mod builder;
pub mod introspection;
pub mod layout;

use log::{debug, info};

use crate::converters::markdown::extract_slides;
use crate::definition::SlideDefinition;
use crate::errors::Result;
use crate::ids::{ObjectIdSource, RandomIds};
use crate::models::presentation::Presentation;
use crate::models::requests::{BatchUpdateRequest, DeleteObjectRequest, Request};

/// Builder for creating a `SlideGenerator`.
#[derive(Default)]
pub struct SlideGeneratorBuilder {
    erase: bool,
    id_source: Option<Box<dyn ObjectIdSource>>,
}

impl SlideGeneratorBuilder {
    pub fn new() -> Self {
        Default::default()
    }

    /// Delete every existing slide before creating new ones.
    pub fn set_erase(mut self, erase: bool) -> Self {
        self.erase = erase;
        self
    }

    /// Source of object ids for created slides, tables and images. Random by default.
    pub fn set_id_source(mut self, id_source: Box<dyn ObjectIdSource>) -> Self {
        self.id_source = Some(id_source);
        self
    }

    pub fn build(self) -> SlideGenerator {
        SlideGenerator {
            erase: self.erase,
            ids: self.id_source.unwrap_or_else(|| Box::new(RandomIds)),
        }
    }
}

/// Compiles Markdown and plans the two request batches that build the slides.
///
/// The creation batch must be applied and the presentation reloaded before
/// planning population, since placeholder ids are assigned by the server.
pub struct SlideGenerator {
    erase: bool,
    ids: Box<dyn ObjectIdSource>,
}

impl SlideGenerator {
    /// Parses Markdown into slide definitions.
    pub fn compile(&self, markdown: &str) -> Result<Vec<SlideDefinition>> {
        extract_slides(markdown)
    }

    /// Plans the creation batch and assigns each slide its object id.
    pub fn plan_creation(
        &mut self,
        presentation: &Presentation,
        slides: &mut [SlideDefinition],
    ) -> Result<BatchUpdateRequest> {
        let mut requests = Vec::new();

        if self.erase {
            let existing = presentation.slide_ids();
            debug!("[plan_creation] Erasing {} existing slides", existing.len());
            requests.extend(existing.into_iter().map(|object_id| {
                Request::DeleteObject(DeleteObjectRequest {
                    object_id: object_id.to_string(),
                })
            }));
        }

        let layouts = presentation.layout_ids();
        for slide in slides.iter_mut() {
            requests.push(builder::create_slide(&layouts, slide, self.ids.as_mut())?);
        }

        info!(
            "Planned creation of {} slides in {}",
            slides.len(),
            presentation.presentation_id
        );
        Ok(BatchUpdateRequest { requests })
    }

    /// Plans the population batch for slides created by [`Self::plan_creation`].
    pub fn plan_population(
        &mut self,
        presentation: &Presentation,
        slides: &[SlideDefinition],
    ) -> Result<BatchUpdateRequest> {
        let mut requests = Vec::new();
        for slide in slides {
            requests.extend(builder::populate_slide(
                presentation,
                slide,
                self.ids.as_mut(),
            )?);
        }
        info!(
            "Planned {} population requests for {}",
            requests.len(),
            presentation.presentation_id
        );
        Ok(BatchUpdateRequest { requests })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::introspection::tests::sample_presentation;
    use crate::ids::SequentialIds;

    fn generator(erase: bool) -> SlideGenerator {
        let _ = env_logger::builder().is_test(true).try_init();
        SlideGeneratorBuilder::new()
            .set_erase(erase)
            .set_id_source(Box::new(SequentialIds::new("gen")))
            .build()
    }

    #[test]
    fn creation_preserves_document_order() {
        let deck = sample_presentation();
        let mut gen = generator(false);
        let mut slides = gen
            .compile("# One\n\nbody\n\n---\n\n# Two\n\nleft\n\n{.column}\n\nright\n\n---\n\nplain")
            .unwrap();
        let batch = gen.plan_creation(&deck, &mut slides).unwrap();

        let created: Vec<(&str, &str)> = batch
            .requests
            .iter()
            .filter_map(|r| match r {
                Request::CreateSlide(c) => Some((
                    c.object_id.as_str(),
                    c.slide_layout_reference.layout_id.as_str(),
                )),
                _ => None,
            })
            .collect();
        assert_eq!(
            created,
            vec![
                ("gen_000", "l_body"),
                ("gen_001", "l_cols"),
                ("gen_002", "l_blank"),
            ]
        );
        assert_eq!(slides[1].object_id.as_deref(), Some("gen_001"));
    }

    #[test]
    fn erase_deletes_existing_slides_first() {
        let deck = sample_presentation();
        let mut gen = generator(true);
        let mut slides = gen.compile("# Only").unwrap();
        let batch = gen.plan_creation(&deck, &mut slides).unwrap();
        assert_eq!(
            batch.requests[0],
            Request::DeleteObject(DeleteObjectRequest {
                object_id: "s1".into()
            })
        );
        assert!(matches!(batch.requests[1], Request::CreateSlide(_)));
    }

    #[test]
    fn population_runs_against_reloaded_deck() {
        let deck = sample_presentation();
        let mut gen = generator(false);
        let mut slides = gen.compile("# Hello\n\nworld").unwrap();
        slides[0].object_id = Some("s1".into());

        let batch = gen.plan_population(&deck, &slides).unwrap();
        let json = serde_json::to_value(&batch).unwrap();
        assert_eq!(json["requests"][0]["insertText"]["objectId"], "s1_title");
        assert_eq!(json["requests"][1]["insertText"]["objectId"], "s1_left");
    }
}
