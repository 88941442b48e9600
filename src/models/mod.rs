//! Serde models of the Google Slides REST resources read and written by the generator.

pub mod colors;
pub mod common;
pub mod elements;
pub mod link;
pub mod page;
pub mod presentation;
pub mod properties;
pub mod requests;
pub mod shape;
pub mod table;
