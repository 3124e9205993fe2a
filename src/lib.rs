//! # docsift
//!
//! Offline document structure extraction and persona-driven section ranking
//! from PDF layout signals.
//!
//! The library consumes the text runs of a PDF (text, page, font size,
//! weight, position) as produced by an extraction tool, and provides:
//!
//! - **Outline extraction**: a title plus an H1/H2/H3 heading hierarchy,
//!   derived from per-document font-size buckets, boldness, indentation and
//!   line isolation.
//! - **Section ranking**: splits a collection of documents into sections,
//!   scores them against a persona and job-to-be-done, and returns a global
//!   ranking with short extractive excerpts.
//!
//! ## Quick Start
//!
//! ```no_run
//! use docsift::{extract_outline, load_document, render};
//!
//! fn main() -> docsift::Result<()> {
//!     // Load a run dump produced by the PDF extractor
//!     let doc = load_document("runs/report.json")?;
//!
//!     // Build the outline and print it as JSON
//!     let outline = extract_outline(&doc);
//!     println!("{}", render::outline_to_json(&outline, render::JsonFormat::Pretty)?);
//!
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod input;
pub mod layout;
pub mod model;
pub mod rank;
pub mod render;
pub mod text;

// Re-export commonly used types
pub use error::{Error, Result};
pub use input::{load_collection, load_document, CollectionInput, LoadedCollection};
pub use layout::{DocumentLayout, DocumentStats, LayoutAnalyzer, LayoutOptions};
pub use model::{
    BoundingBox, Document, FontWeight, HeadingLevel, Outline, OutlineEntry, OutlineNode, Query,
    RankedSection, Section, TextRun,
};
pub use rank::{
    CollectionRanker, CollectionResult, DocumentInput, EmbeddingProvider, HashingEmbedder,
    RankOptions, ScoringWeights, SkipReason,
};
pub use render::{CollectionOutput, JsonFormat, OutlineOutput};
pub use text::{CleanupOptions, CleanupPreset};

use std::path::Path;
use std::sync::Arc;

/// Extract the outline of a document with default options.
///
/// A document without text yields an empty outline (`title: ""`, no
/// headings).
///
/// # Example
///
/// ```
/// use docsift::{extract_outline, BoundingBox, Document, TextRun};
///
/// let doc = Document::new("memo.pdf").with_runs(vec![TextRun::new(
///     "Quarterly Memo",
///     1,
///     20.0,
///     BoundingBox::new(72.0, 72.0, 240.0, 92.0),
/// )]);
/// let outline = extract_outline(&doc);
/// assert_eq!(outline.title, "Quarterly Memo");
/// ```
pub fn extract_outline(doc: &Document) -> Outline {
    analyze_document(doc).outline
}

/// Analyze the layout of a document with default options.
pub fn analyze_document(doc: &Document) -> DocumentLayout {
    LayoutAnalyzer::new().analyze(doc)
}

/// Analyze several documents in parallel, keeping input order.
pub fn analyze_documents(docs: &[Document]) -> Vec<DocumentLayout> {
    LayoutAnalyzer::new().analyze_all(docs)
}

/// Load a run dump and extract its outline.
///
/// # Example
///
/// ```no_run
/// use docsift::outline_file;
///
/// let outline = outline_file("runs/report.json").unwrap();
/// println!("{}", outline.title);
/// ```
pub fn outline_file<P: AsRef<Path>>(path: P) -> Result<Outline> {
    let doc = load_document(path)?;
    Ok(extract_outline(&doc))
}

/// Rank the sections of loaded documents against a persona and job.
///
/// Fails only when persona or job is blank; documents without text are
/// reported as skipped.
///
/// # Example
///
/// ```no_run
/// use docsift::{load_document, rank_collection};
///
/// let docs = vec![load_document("runs/cities.json")?];
/// let result = rank_collection("Travel Planner", "Plan a 4-day trip", docs)?;
/// for section in &result.ranked {
///     println!("{} {}", section.importance_rank, section.section_title);
/// }
/// # Ok::<(), docsift::Error>(())
/// ```
pub fn rank_collection(
    persona: &str,
    job_to_be_done: &str,
    docs: Vec<Document>,
) -> Result<CollectionResult> {
    let query = Query::new(persona, job_to_be_done)?;
    Ok(CollectionRanker::new().rank_documents(&query, docs))
}

/// Rank a collection directory (`challenge1b_input.json` + `runs/`).
pub fn rank_collection_dir<P: AsRef<Path>>(dir: P) -> Result<CollectionResult> {
    Docsift::new().rank_dir(dir)
}

/// Builder for outline extraction and collection ranking.
///
/// # Example
///
/// ```no_run
/// use docsift::Docsift;
///
/// let json = Docsift::new()
///     .with_title_zone(0.5)
///     .sequential()
///     .load("runs/report.json")?
///     .to_json(docsift::JsonFormat::Compact)?;
/// # Ok::<(), docsift::Error>(())
/// ```
pub struct Docsift {
    layout_options: LayoutOptions,
    rank_options: RankOptions,
    embedder: Option<Arc<dyn EmbeddingProvider>>,
}

impl Docsift {
    /// Create a new builder with default options.
    pub fn new() -> Self {
        Self {
            layout_options: LayoutOptions::default(),
            rank_options: RankOptions::default(),
            embedder: None,
        }
    }

    /// Replace the layout options.
    pub fn with_layout_options(mut self, options: LayoutOptions) -> Self {
        self.layout_options = options;
        self
    }

    /// Replace the ranking options.
    pub fn with_rank_options(mut self, options: RankOptions) -> Self {
        self.rank_options = options;
        self
    }

    /// Disable parallel processing.
    pub fn sequential(mut self) -> Self {
        self.layout_options = self.layout_options.sequential();
        self
    }

    /// Set the heading size tolerance in points.
    pub fn with_size_tolerance(mut self, points: f32) -> Self {
        self.layout_options = self.layout_options.with_size_tolerance(points);
        self
    }

    /// Set the fraction of page 1 searched for the title.
    pub fn with_title_zone(mut self, fraction: f32) -> Self {
        self.layout_options = self.layout_options.with_title_zone(fraction);
        self
    }

    /// Set cleanup preset.
    pub fn with_cleanup(mut self, preset: CleanupPreset) -> Self {
        self.layout_options = self.layout_options.with_cleanup_preset(preset);
        self
    }

    /// Set the number of sections that get refined text.
    pub fn with_top_k(mut self, k: usize) -> Self {
        self.rank_options = self.rank_options.with_top_k(k);
        self
    }

    /// Set the maximum number of ranked sections.
    pub fn with_max_sections(mut self, n: usize) -> Self {
        self.rank_options = self.rank_options.with_max_sections(n);
        self
    }

    /// Set the refined text character cap.
    pub fn with_char_cap(mut self, chars: usize) -> Self {
        self.rank_options = self.rank_options.with_char_cap(chars);
        self
    }

    /// Set the scoring weights.
    pub fn with_weights(mut self, weights: ScoringWeights) -> Self {
        self.rank_options = self.rank_options.with_weights(weights);
        self
    }

    /// Enable semantic scoring with an embedding provider.
    pub fn with_embedder(mut self, embedder: Arc<dyn EmbeddingProvider>) -> Self {
        self.embedder = Some(embedder);
        self
    }

    /// Enable semantic scoring with the built-in hashing embedder.
    pub fn with_hashing_embedder(self) -> Self {
        self.with_embedder(Arc::new(HashingEmbedder::default()))
    }

    /// Analyze a loaded document.
    pub fn analyze(&self, document: Document) -> DocsiftResult {
        let layout = LayoutAnalyzer::with_options(self.layout_options.clone()).analyze(&document);
        DocsiftResult { document, layout }
    }

    /// Load a run dump and analyze it.
    pub fn load<P: AsRef<Path>>(&self, path: P) -> Result<DocsiftResult> {
        let document = load_document(path)?;
        Ok(self.analyze(document))
    }

    /// Build the collection ranker for the current options.
    pub fn ranker(&self) -> CollectionRanker {
        let ranker =
            CollectionRanker::with_options(self.layout_options.clone(), self.rank_options.clone());
        match &self.embedder {
            Some(embedder) => ranker.with_embedder(Arc::clone(embedder)),
            None => ranker,
        }
    }

    /// Rank collection inputs against a query.
    pub fn rank(&self, query: &Query, inputs: Vec<DocumentInput>) -> CollectionResult {
        self.ranker().rank(query, inputs)
    }

    /// Load and rank a collection directory.
    pub fn rank_dir<P: AsRef<Path>>(&self, dir: P) -> Result<CollectionResult> {
        let collection = load_collection(dir)?;
        Ok(self.rank(&collection.query, collection.documents))
    }
}

impl Default for Docsift {
    fn default() -> Self {
        Self::new()
    }
}

/// An analyzed document.
pub struct DocsiftResult {
    /// The input document
    pub document: Document,
    /// Its analyzed layout
    pub layout: DocumentLayout,
}

impl DocsiftResult {
    /// Get the outline.
    pub fn outline(&self) -> &Outline {
        &self.layout.outline
    }

    /// Convert the outline to its JSON record.
    pub fn to_json(&self, format: JsonFormat) -> Result<String> {
        render::outline_to_json(&self.layout.outline, format)
    }

    /// Convert the outline to Markdown.
    pub fn to_markdown(&self) -> String {
        render::outline_to_markdown(&self.layout.outline)
    }

    /// Get document statistics.
    pub fn stats(&self) -> DocumentStats {
        self.layout.stats()
    }
}
