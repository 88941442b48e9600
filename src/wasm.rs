//! JavaScript bindings. Every function takes and returns JSON strings so the host
//! can hand the batches straight to its own Slides API transport.

use serde::Serialize;
use wasm_bindgen::prelude::*;

use crate::definition::SlideDefinition;
use crate::errors::SlidesError;
use crate::generator::SlideGeneratorBuilder;
use crate::models::presentation::Presentation;
use crate::models::requests::BatchUpdateRequest;

#[derive(Serialize)]
struct CreationPlan<'a> {
    slides: &'a [SlideDefinition],
    batch: &'a BatchUpdateRequest,
}

impl From<SlidesError> for JsValue {
    fn from(err: SlidesError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn start() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
    // Already initialised when the module is instantiated twice.
    let _ = console_log::init_with_level(log::Level::Info);
}

fn parse_presentation(presentation_json: &str) -> Result<Presentation, SlidesError> {
    Ok(serde_json::from_str(presentation_json)?)
}

/// Compiles Markdown into a JSON array of slide definitions.
#[wasm_bindgen]
pub fn compile_markdown(markdown: &str) -> Result<String, JsValue> {
    let slides = crate::converters::markdown::extract_slides(markdown)?;
    Ok(serde_json::to_string(&slides).map_err(SlidesError::from)?)
}

/// Plans the creation batch for `markdown` against the given presentation.
///
/// Returns `{"slides": [...], "batch": {"requests": [...]}}`; the slides carry their
/// assigned object ids and must be passed back to `plan_population`.
#[wasm_bindgen]
pub fn plan_creation(markdown: &str, presentation_json: &str, erase: bool) -> Result<String, JsValue> {
    let presentation = parse_presentation(presentation_json)?;
    let mut generator = SlideGeneratorBuilder::new().set_erase(erase).build();
    let mut slides = generator.compile(markdown)?;
    let batch = generator.plan_creation(&presentation, &mut slides)?;
    let plan = CreationPlan {
        slides: &slides,
        batch: &batch,
    };
    Ok(serde_json::to_string(&plan).map_err(SlidesError::from)?)
}

/// Plans the population batch for slides returned by `plan_creation`, against the
/// presentation as reloaded after the creation batch was applied.
#[wasm_bindgen]
pub fn plan_population(slides_json: &str, presentation_json: &str) -> Result<String, JsValue> {
    let presentation = parse_presentation(presentation_json)?;
    let slides: Vec<SlideDefinition> = serde_json::from_str(slides_json).map_err(SlidesError::from)?;
    let mut generator = SlideGeneratorBuilder::new().build();
    let batch = generator.plan_population(&presentation, &slides)?;
    Ok(serde_json::to_string(&batch).map_err(SlidesError::from)?)
}
