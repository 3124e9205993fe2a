//! Layout analysis: runs → lines → classified blocks → outline.

mod classify;
mod features;
mod options;
mod outline;

pub use classify::{Classification, HeadingClassifier, TextBlock};
pub use features::{FeatureExtractor, FeatureSet, FontStatistics, TextLine};
pub use options::LayoutOptions;
pub use outline::OutlineBuilder;

use rayon::prelude::*;
use serde::Serialize;

use crate::model::{Document, HeadingLevel, Outline};

/// The analyzed layout of one document.
#[derive(Debug, Clone)]
pub struct DocumentLayout {
    /// Document identifier
    pub document_id: String,
    /// Number of pages
    pub page_count: u32,
    /// Number of input runs
    pub run_count: usize,
    /// Number of logical lines
    pub line_count: usize,
    /// Font statistics
    pub stats: FontStatistics,
    /// Title block, if any
    pub title: Option<TextBlock>,
    /// Non-title blocks in reading order
    pub blocks: Vec<TextBlock>,
    /// Outline tree
    pub outline: Outline,
}

impl DocumentLayout {
    /// Whether the document yielded no text at all.
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.blocks.is_empty()
    }

    /// Title text, or the empty string.
    pub fn title_text(&self) -> &str {
        self.title.as_ref().map(|t| t.text.as_str()).unwrap_or("")
    }

    /// Summary statistics.
    pub fn stats(&self) -> DocumentStats {
        let count = |level: HeadingLevel| self.blocks.iter().filter(|b| b.level == level).count();

        DocumentStats {
            document: self.document_id.clone(),
            page_count: self.page_count,
            run_count: self.run_count,
            line_count: self.line_count,
            block_count: self.blocks.len(),
            body_size: self.stats.body_size,
            distinct_sizes: self.stats.distinct_sizes(),
            has_title: self.title.is_some(),
            h1_count: count(HeadingLevel::H1),
            h2_count: count(HeadingLevel::H2),
            h3_count: count(HeadingLevel::H3),
        }
    }
}

/// Document statistics.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DocumentStats {
    pub document: String,
    pub page_count: u32,
    pub run_count: usize,
    pub line_count: usize,
    pub block_count: usize,
    pub body_size: f32,
    pub distinct_sizes: Vec<f32>,
    pub has_title: bool,
    pub h1_count: usize,
    pub h2_count: usize,
    pub h3_count: usize,
}

impl DocumentStats {
    /// Total number of headings (excluding the title).
    pub fn heading_count(&self) -> usize {
        self.h1_count + self.h2_count + self.h3_count
    }
}

/// Layout analyzer for documents.
#[derive(Debug, Clone, Default)]
pub struct LayoutAnalyzer {
    options: LayoutOptions,
}

impl LayoutAnalyzer {
    /// Create an analyzer with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an analyzer with the given options.
    pub fn with_options(options: LayoutOptions) -> Self {
        Self { options }
    }

    /// Get the options.
    pub fn options(&self) -> &LayoutOptions {
        &self.options
    }

    /// Analyze one document.
    pub fn analyze(&self, doc: &Document) -> DocumentLayout {
        let features = FeatureExtractor::new(&self.options).extract(doc);
        let line_count = features.lines.len();
        let classification = HeadingClassifier::new(&self.options).classify(&features);
        let outline = OutlineBuilder::build(classification.title.as_ref(), &classification.blocks);

        log::debug!(
            "{}: title {:?}, {} headings",
            doc.id,
            outline.title,
            outline.total_items()
        );

        DocumentLayout {
            document_id: doc.id.clone(),
            page_count: doc.page_count(),
            run_count: doc.runs.len(),
            line_count,
            stats: features.stats,
            title: classification.title,
            blocks: classification.blocks,
            outline,
        }
    }

    /// Analyze several documents, in parallel when enabled. Results keep
    /// the input order.
    pub fn analyze_all(&self, docs: &[Document]) -> Vec<DocumentLayout> {
        if self.options.parallel {
            docs.par_iter().map(|doc| self.analyze(doc)).collect()
        } else {
            docs.iter().map(|doc| self.analyze(doc)).collect()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{BoundingBox, TextRun};

    fn doc_with_heading(id: &str) -> Document {
        let heading = TextRun::new("Overview", 1, 18.0, BoundingBox::new(72.0, 72.0, 144.0, 90.0));
        let mut runs = vec![heading.bold()];
        for i in 0..5 {
            let top = 92.0 + i as f32 * 12.0;
            runs.push(TextRun::new(
                "some body text here",
                1,
                10.0,
                BoundingBox::new(72.0, top, 170.0, top + 10.0),
            ));
        }
        Document::new(id).with_runs(runs)
    }

    #[test]
    fn test_analyze_empty_document() {
        let layout = LayoutAnalyzer::new().analyze(&Document::new("blank.pdf").with_page_count(3));
        assert!(layout.is_empty());
        assert_eq!(layout.title_text(), "");
        assert!(layout.outline.is_empty());
        assert_eq!(layout.page_count, 3);
    }

    #[test]
    fn test_analyze_all_preserves_order() {
        let docs: Vec<Document> = (0..8).map(|i| doc_with_heading(&format!("doc{i}.pdf"))).collect();
        let parallel = LayoutAnalyzer::new().analyze_all(&docs);
        let sequential =
            LayoutAnalyzer::with_options(LayoutOptions::default().sequential()).analyze_all(&docs);

        let ids: Vec<&str> = parallel.iter().map(|l| l.document_id.as_str()).collect();
        assert_eq!(ids[0], "doc0.pdf");
        assert_eq!(ids[7], "doc7.pdf");
        for (a, b) in parallel.iter().zip(&sequential) {
            assert_eq!(a.outline, b.outline);
        }
    }

    #[test]
    fn test_stats() {
        let layout = LayoutAnalyzer::new().analyze(&doc_with_heading("a.pdf"));
        let stats = layout.stats();
        assert_eq!(stats.run_count, 6);
        assert_eq!(stats.line_count, 6);
        assert_eq!(stats.body_size, 10.0);
        assert_eq!(stats.distinct_sizes, vec![18.0, 10.0]);
        assert_eq!(stats.heading_count() + usize::from(stats.has_title), 1);
    }
}
