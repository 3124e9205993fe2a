//! Persona-driven section ranking across a document collection.

mod collection;
mod embedding;
mod options;
mod refine;
mod score;
mod segment;

pub use collection::{
    CollectionRanker, CollectionResult, DocumentInput, SkipReason, SkippedDocument,
};
pub use embedding::{cosine_similarity, EmbeddingProvider, HashingEmbedder};
pub use options::{RankOptions, ScoringWeights};
pub use refine::refine_text;
pub use score::{RelevanceScorer, ScoreBreakdown};
pub use segment::SectionSegmenter;
