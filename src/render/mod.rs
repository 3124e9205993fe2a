//! Rendering module for converting outlines and rankings to output formats.

mod json;
mod markdown;
mod output;

pub use json::{collection_to_json, outline_to_json, to_json, JsonFormat};
pub use markdown::outline_to_markdown;
pub use output::{
    CollectionOutput, ExtractedSection, Metadata, OutlineOutput, SkippedEntry,
    SubsectionAnalysis,
};
