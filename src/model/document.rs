//! Document-level types.

use std::io::Read;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::TextRun;
use crate::error::Result;

/// One input PDF, represented by the text runs its extractor produced.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Document {
    /// Document identifier (usually the PDF file name)
    pub id: String,

    /// Path of the source PDF
    #[serde(default)]
    pub file_path: PathBuf,

    /// Text runs in reading order as delivered by the extractor
    #[serde(default)]
    pub runs: Vec<TextRun>,

    /// Declared number of pages (0 = unknown)
    #[serde(default)]
    pub page_count: u32,
}

impl Document {
    /// Create a new empty document.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Default::default()
        }
    }

    /// Set the source file path.
    pub fn with_file_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.file_path = path.into();
        self
    }

    /// Set the declared page count.
    pub fn with_page_count(mut self, pages: u32) -> Self {
        self.page_count = pages;
        self
    }

    /// Set the text runs.
    pub fn with_runs(mut self, runs: Vec<TextRun>) -> Self {
        self.runs = runs;
        self
    }

    /// Number of pages: the declared count, or the highest page a run sits
    /// on if that is larger.
    pub fn page_count(&self) -> u32 {
        let max_run_page = self.runs.iter().map(|r| r.page_number).max().unwrap_or(0);
        self.page_count.max(max_run_page)
    }

    /// Check whether the document has any non-blank text.
    pub fn is_empty(&self) -> bool {
        self.runs.iter().all(|r| r.text.trim().is_empty())
    }

    /// Runs located on the given page (1-indexed).
    pub fn runs_on_page(&self, page_number: u32) -> impl Iterator<Item = &TextRun> {
        self.runs.iter().filter(move |r| r.page_number == page_number)
    }

    /// Validate every run.
    pub fn validate(&self) -> Result<()> {
        self.runs.iter().try_for_each(TextRun::validate)
    }

    /// Read a run dump from JSON.
    pub fn from_json_reader<R: Read>(reader: R) -> Result<Self> {
        let doc: Document = serde_json::from_reader(reader)?;
        doc.validate()?;
        Ok(doc)
    }

    /// Read a run dump from a JSON string.
    pub fn from_json_str(s: &str) -> Result<Self> {
        Self::from_json_reader(s.as_bytes())
    }
}
