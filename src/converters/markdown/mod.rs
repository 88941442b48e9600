//! Markdown front-end: tokenizer and slide extractor.

pub mod attributes;
pub mod emoji;
pub mod extractor;
pub mod html;
pub mod tokenizer;

pub use extractor::{extract_slides, ParseMode};
pub use tokenizer::{tokenize, Token};
