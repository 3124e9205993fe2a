//! Section relevance scoring.

use std::collections::BTreeSet;

use super::embedding::{cosine_similarity, EmbeddingProvider};
use super::options::ScoringWeights;
use crate::model::{Query, Section};
use crate::text::Lexicon;

/// Weight of a query term found in the section heading.
const HEADING_HIT: f64 = 3.0;
/// Weight of a query term found in the section body.
const BODY_HIT: f64 = 1.0;

/// The components of a section score.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScoreBreakdown {
    /// Weighted count of distinct query terms in heading and body
    pub lexical: f64,
    /// Query-term occurrences per body token
    pub density: f64,
    /// Clamped cosine similarity (0 when unavailable)
    pub semantic: f64,
    /// Weighted sum
    pub total: f64,
}

/// Scores sections against one query.
pub struct RelevanceScorer<'a> {
    lexicon: &'a Lexicon,
    weights: ScoringWeights,
    query_terms: BTreeSet<String>,
    embedder: Option<&'a dyn EmbeddingProvider>,
    query_embedding: Option<Vec<f32>>,
}

impl<'a> RelevanceScorer<'a> {
    /// Create a lexical-only scorer.
    pub fn new(query: &Query, lexicon: &'a Lexicon, weights: ScoringWeights) -> Self {
        Self {
            lexicon,
            weights,
            query_terms: lexicon.terms(&query.text()),
            embedder: None,
            query_embedding: None,
        }
    }

    /// Enable semantic scoring. When the query cannot be embedded the
    /// scorer stays lexical-only.
    pub fn with_embedder(mut self, query: &Query, embedder: &'a dyn EmbeddingProvider) -> Self {
        match embedder.embed(&query.text()) {
            Ok(vector) => {
                self.embedder = Some(embedder);
                self.query_embedding = Some(vector);
            }
            Err(e) => {
                log::warn!(
                    "embedding provider {} unavailable, using lexical scoring only: {}",
                    embedder.model_name(),
                    e
                );
            }
        }
        self
    }

    /// Distinct normalized query terms.
    pub fn query_terms(&self) -> &BTreeSet<String> {
        &self.query_terms
    }

    /// Whether semantic similarity contributes to scores.
    pub fn is_semantic(&self) -> bool {
        self.query_embedding.is_some()
    }

    /// Score one section.
    pub fn score(&self, section: &Section) -> ScoreBreakdown {
        let heading_terms = self.lexicon.terms(&section.title);
        let body_tokens = self.lexicon.tokenize(&section.body_text);

        let mut lexical = 0.0;
        for term in &self.query_terms {
            if heading_terms.contains(term) {
                lexical += HEADING_HIT;
            }
            if body_tokens.iter().any(|t| t == term) {
                lexical += BODY_HIT;
            }
        }

        let density = if body_tokens.is_empty() {
            0.0
        } else {
            let hits = body_tokens
                .iter()
                .filter(|t| self.query_terms.contains(*t))
                .count();
            hits as f64 / body_tokens.len() as f64
        };

        let semantic = self.semantic(section);

        ScoreBreakdown {
            lexical,
            density,
            semantic,
            total: self.weights.lexical * lexical
                + self.weights.density * density
                + self.weights.semantic * semantic,
        }
    }

    fn semantic(&self, section: &Section) -> f64 {
        let (Some(embedder), Some(query)) = (self.embedder, self.query_embedding.as_ref()) else {
            return 0.0;
        };

        let text = format!("{} {}", section.title, section.body_text);
        match embedder.embed(&text) {
            Ok(vector) => (cosine_similarity(query, &vector) as f64).clamp(0.0, 1.0),
            Err(e) => {
                log::debug!("{}: no embedding for {:?}: {}", section.document_id, section.title, e);
                0.0
            }
        }
    }
}
