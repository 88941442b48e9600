#[cfg(not(target_arch = "wasm32"))]
#[cfg(feature = "yup-oauth2")]
pub mod client;

#[cfg(not(target_arch = "wasm32"))]
#[cfg(feature = "yup-oauth2")]
pub use client::{batch_update_sa, create_presentation_sa, generate_slides_sa, get_presentation_sa};

pub mod converters;
pub mod definition;
pub mod errors;
pub mod generator;
pub mod ids;
pub mod models;

pub use converters::markdown;
pub use converters::markdown::extract_slides;
pub use definition::SlideDefinition;
pub use errors::{Result, SlidesError};
pub use generator::{SlideGenerator, SlideGeneratorBuilder};
pub use models::presentation::Presentation;

// bindings
pub mod wasm;
