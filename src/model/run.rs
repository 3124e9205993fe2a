//! Text run types supplied by the PDF extraction collaborator.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Font weight of a text run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FontWeight {
    /// Regular weight
    #[default]
    Normal,
    /// Bold (or heavier) weight
    Bold,
}

/// Axis-aligned box in page coordinates.
///
/// The origin is the top-left corner of the page and `y` grows downward,
/// so `y0` is the top edge and `y1` the bottom edge.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct BoundingBox {
    /// Left edge
    pub x0: f32,
    /// Top edge
    pub y0: f32,
    /// Right edge
    pub x1: f32,
    /// Bottom edge
    pub y1: f32,
}

impl BoundingBox {
    /// Create a new bounding box.
    pub fn new(x0: f32, y0: f32, x1: f32, y1: f32) -> Self {
        Self { x0, y0, x1, y1 }
    }

    /// Width of the box.
    pub fn width(&self) -> f32 {
        (self.x1 - self.x0).max(0.0)
    }

    /// Height of the box.
    pub fn height(&self) -> f32 {
        (self.y1 - self.y0).max(0.0)
    }

    /// Smallest box containing both boxes.
    pub fn union(&self, other: &BoundingBox) -> BoundingBox {
        BoundingBox {
            x0: self.x0.min(other.x0),
            y0: self.y0.min(other.y0),
            x1: self.x1.max(other.x1),
            y1: self.y1.max(other.y1),
        }
    }

    fn is_finite(&self) -> bool {
        self.x0.is_finite() && self.y0.is_finite() && self.x1.is_finite() && self.y1.is_finite()
    }
}

/// A run of text with uniform font, as produced by the PDF extractor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextRun {
    /// The text content
    pub text: String,

    /// Page number (1-indexed)
    pub page_number: u32,

    /// Font size in points
    pub font_size: f32,

    /// Declared font weight
    #[serde(default)]
    pub font_weight: FontWeight,

    /// Font family name (e.g., "Helvetica-Bold")
    #[serde(default)]
    pub font_family: String,

    /// Position of the run on its page
    pub bounding_box: BoundingBox,

    /// Baseline Y position
    pub baseline_y: f32,
}

impl TextRun {
    /// Create a new run with normal weight. The baseline is placed on the
    /// bottom edge of the bounding box.
    pub fn new(text: impl Into<String>, page_number: u32, font_size: f32, bbox: BoundingBox) -> Self {
        Self {
            text: text.into(),
            page_number,
            font_size,
            font_weight: FontWeight::Normal,
            font_family: String::new(),
            bounding_box: bbox,
            baseline_y: bbox.y1,
        }
    }

    /// Set the font weight to bold.
    pub fn bold(mut self) -> Self {
        self.font_weight = FontWeight::Bold;
        self
    }

    /// Set the font family.
    pub fn with_font_family(mut self, family: impl Into<String>) -> Self {
        self.font_family = family.into();
        self
    }

    /// Whether the run is bold, either by declared weight or by font name.
    pub fn is_bold(&self) -> bool {
        if self.font_weight == FontWeight::Bold {
            return true;
        }
        let family = self.font_family.to_lowercase();
        family.contains("bold") || family.contains("black") || family.contains("heavy")
    }

    /// Whether the run contains at least one alphabetic character.
    pub fn has_letters(&self) -> bool {
        self.text.chars().any(|c| c.is_alphabetic())
    }

    /// Check the run for values the analysis cannot work with.
    pub fn validate(&self) -> Result<()> {
        if self.page_number == 0 {
            return Err(Error::InvalidInput(format!(
                "run {:?} has page number 0 (pages are 1-indexed)",
                self.text
            )));
        }
        if !self.font_size.is_finite() || self.font_size <= 0.0 {
            return Err(Error::InvalidInput(format!(
                "run {:?} has invalid font size {}",
                self.text, self.font_size
            )));
        }
        if !self.bounding_box.is_finite() || !self.baseline_y.is_finite() {
            return Err(Error::InvalidInput(format!(
                "run {:?} has non-finite coordinates",
                self.text
            )));
        }
        Ok(())
    }
}
