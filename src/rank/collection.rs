//! Collection ranking: analyze, segment and score every document, then
//! order all sections globally and refine the top ones.

use std::cmp::Ordering;
use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use rayon::prelude::*;

use super::embedding::EmbeddingProvider;
use super::options::RankOptions;
use super::refine::refine_text;
use super::score::RelevanceScorer;
use super::segment::SectionSegmenter;
use crate::error::Error;
use crate::layout::{LayoutAnalyzer, LayoutOptions};
use crate::model::{Document, Query, RankedSection, Section};
use crate::text::Lexicon;

/// Why a document contributed no sections.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// The document has no extractable text (e.g. image-only)
    NoText,
    /// The document's run dump does not exist
    NotFound,
    /// The run dump could not be read or parsed
    LoadFailed(String),
}

impl SkipReason {
    /// Stable reason code used in output.
    pub fn code(&self) -> &'static str {
        match self {
            SkipReason::NoText => "no_text",
            SkipReason::NotFound => "not_found",
            SkipReason::LoadFailed(_) => "load_failed",
        }
    }
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::LoadFailed(detail) => write!(f, "{}: {}", self.code(), detail),
            _ => f.write_str(self.code()),
        }
    }
}

/// A document left out of a collection run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedDocument {
    pub document: String,
    pub reason: SkipReason,
}

/// One input slot of a collection run.
#[derive(Debug, Clone)]
pub enum DocumentInput {
    /// A loaded run dump
    Loaded(Document),
    /// A document that could not be loaded
    Unavailable { id: String, reason: SkipReason },
}

impl DocumentInput {
    /// Identifier of the document.
    pub fn id(&self) -> &str {
        match self {
            DocumentInput::Loaded(doc) => &doc.id,
            DocumentInput::Unavailable { id, .. } => id,
        }
    }
}

impl From<Document> for DocumentInput {
    fn from(doc: Document) -> Self {
        DocumentInput::Loaded(doc)
    }
}

/// Result of ranking one collection.
#[derive(Debug, Clone)]
pub struct CollectionResult {
    /// The query the collection was ranked against
    pub query: Query,
    /// All input document ids, in input order
    pub input_documents: Vec<String>,
    /// Documents that contributed sections, in input order
    pub processed_documents: Vec<String>,
    /// Documents that were left out, in input order
    pub skipped_documents: Vec<SkippedDocument>,
    /// Ranked sections, best first
    pub ranked: Vec<RankedSection>,
    /// When the run finished
    pub processed_at: DateTime<Utc>,
}

impl CollectionResult {
    /// Ranked sections that carry refined text.
    pub fn refined(&self) -> impl Iterator<Item = &RankedSection> {
        self.ranked.iter().filter(|r| !r.refined_text.is_empty())
    }
}

/// A scored section with its tie-break key.
struct Candidate<'a> {
    section: &'a Section,
    doc_position: usize,
    section_index: usize,
    score: f64,
}

/// Ranks the sections of a document collection against a query.
pub struct CollectionRanker {
    analyzer: LayoutAnalyzer,
    segmenter: SectionSegmenter,
    options: RankOptions,
    lexicon: Lexicon,
    embedder: Option<Arc<dyn EmbeddingProvider>>,
}

impl CollectionRanker {
    /// Create a ranker with default options.
    pub fn new() -> Self {
        Self::with_options(LayoutOptions::default(), RankOptions::default())
    }

    /// Create a ranker with the given options.
    pub fn with_options(layout: LayoutOptions, options: RankOptions) -> Self {
        Self {
            segmenter: SectionSegmenter::with_cleanup(layout.cleanup.clone()),
            analyzer: LayoutAnalyzer::with_options(layout),
            options,
            lexicon: Lexicon::english(),
            embedder: None,
        }
    }

    /// Use a custom lexicon.
    pub fn with_lexicon(mut self, lexicon: Lexicon) -> Self {
        self.lexicon = lexicon;
        self
    }

    /// Enable semantic scoring with an embedding provider.
    pub fn with_embedder(mut self, embedder: Arc<dyn EmbeddingProvider>) -> Self {
        self.embedder = Some(embedder);
        self
    }

    /// Get the ranking options.
    pub fn options(&self) -> &RankOptions {
        &self.options
    }

    /// Rank already-loaded documents.
    pub fn rank_documents(&self, query: &Query, docs: Vec<Document>) -> CollectionResult {
        self.rank(query, docs.into_iter().map(DocumentInput::from).collect())
    }

    /// Rank a collection. Per-document failures are reported as skipped.
    pub fn rank(&self, query: &Query, inputs: Vec<DocumentInput>) -> CollectionResult {
        let input_documents: Vec<String> = inputs.iter().map(|i| i.id().to_string()).collect();

        let mut loaded: Vec<Document> = Vec::new();
        let mut loaded_positions: Vec<usize> = Vec::new();
        let mut skipped: Vec<(usize, SkippedDocument)> = Vec::new();
        for (position, input) in inputs.into_iter().enumerate() {
            match input {
                DocumentInput::Loaded(doc) => {
                    loaded.push(doc);
                    loaded_positions.push(position);
                }
                DocumentInput::Unavailable { id, reason } => {
                    log::warn!("skipping {}: {}", id, reason);
                    skipped.push((
                        position,
                        SkippedDocument {
                            document: id,
                            reason,
                        },
                    ));
                }
            }
        }

        let layouts = self.analyzer.analyze_all(&loaded);
        let sections: Vec<Vec<Section>> = if self.analyzer.options().parallel {
            layouts.par_iter().map(|l| self.segmenter.segment(l)).collect()
        } else {
            layouts.iter().map(|l| self.segmenter.segment(l)).collect()
        };

        let mut processed: Vec<String> = Vec::new();
        for ((layout, doc_sections), &position) in
            layouts.iter().zip(&sections).zip(&loaded_positions)
        {
            if doc_sections.is_empty() {
                log::warn!("skipping: {}", Error::MalformedInput(layout.document_id.clone()));
                skipped.push((
                    position,
                    SkippedDocument {
                        document: layout.document_id.clone(),
                        reason: SkipReason::NoText,
                    },
                ));
            } else {
                processed.push(layout.document_id.clone());
            }
        }
        skipped.sort_by_key(|(position, _)| *position);

        let ranked = self.rank_sections(query, &sections);

        log::info!(
            "ranked {} sections from {} documents ({} skipped)",
            ranked.len(),
            processed.len(),
            skipped.len()
        );

        CollectionResult {
            query: query.clone(),
            input_documents,
            processed_documents: processed,
            skipped_documents: skipped.into_iter().map(|(_, s)| s).collect(),
            ranked,
            processed_at: Utc::now(),
        }
    }

    /// Score, order and refine sections grouped per document (in input order).
    pub fn rank_sections(&self, query: &Query, sections: &[Vec<Section>]) -> Vec<RankedSection> {
        let mut scorer = RelevanceScorer::new(query, &self.lexicon, self.options.weights);
        if let Some(embedder) = &self.embedder {
            scorer = scorer.with_embedder(query, embedder.as_ref());
        }

        let mut candidates: Vec<Candidate<'_>> = sections
            .iter()
            .enumerate()
            .flat_map(|(doc_position, doc_sections)| {
                doc_sections
                    .iter()
                    .enumerate()
                    .map(move |(section_index, section)| (doc_position, section_index, section))
            })
            .map(|(doc_position, section_index, section)| Candidate {
                section,
                doc_position,
                section_index,
                score: scorer.score(section).total,
            })
            .collect();

        candidates.sort_by(compare_candidates);

        // Repeated titles within a document (running headers, repeated
        // headings) keep only their best-ranked occurrence.
        let mut seen_titles: HashSet<(String, String)> = HashSet::new();
        candidates.retain(|c| {
            let key = (
                c.section.document_id.clone(),
                c.section.title.trim().to_lowercase(),
            );
            if seen_titles.insert(key) {
                true
            } else {
                log::debug!(
                    "dropping repeated section {:?} in {}",
                    c.section.title,
                    c.section.document_id
                );
                false
            }
        });
        candidates.truncate(self.options.max_sections);

        let mut seen_refined: HashSet<String> = HashSet::new();
        candidates
            .into_iter()
            .enumerate()
            .map(|(i, c)| {
                let mut refined_text = if i < self.options.top_k {
                    refine_text(
                        &c.section.body_text,
                        scorer.query_terms(),
                        &self.lexicon,
                        self.options.refined_char_cap,
                    )
                } else {
                    String::new()
                };
                if !refined_text.is_empty() && !seen_refined.insert(refined_text.clone()) {
                    refined_text.clear();
                }

                RankedSection {
                    document_id: c.section.document_id.clone(),
                    section_title: c.section.title.clone(),
                    page_number: c.section.page_number,
                    importance_rank: i as u32 + 1,
                    score: c.score,
                    refined_text,
                }
            })
            .collect()
    }
}

impl Default for CollectionRanker {
    fn default() -> Self {
        Self::new()
    }
}

/// Score descending, then document id, page and section order ascending.
fn compare_candidates(a: &Candidate<'_>, b: &Candidate<'_>) -> Ordering {
    b.score
        .total_cmp(&a.score)
        .then_with(|| a.section.document_id.cmp(&b.section.document_id))
        .then_with(|| a.doc_position.cmp(&b.doc_position))
        .then_with(|| a.section.page_number.cmp(&b.section.page_number))
        .then_with(|| a.section_index.cmp(&b.section_index))
}
