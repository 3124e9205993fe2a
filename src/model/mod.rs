//! Data model shared by the layout and ranking stages.
//!
//! Text runs come in from the extraction collaborator, outlines and
//! sections are derived from them, and ranked sections go out.

mod document;
mod outline;
mod run;
mod section;

pub use document::Document;
pub use outline::{HeadingLevel, Outline, OutlineEntry, OutlineNode};
pub use run::{BoundingBox, FontWeight, TextRun};
pub use section::{HeadingRef, Query, RankedSection, Section};
