//! Shared domain types for the lectern pipeline.

pub mod types;

pub use types::{ContentLine, DeckSpec, PublicationResult, Rgb, SlideSpec, ThemeName};
