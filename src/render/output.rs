//! Serialized output records for outlines and collection rankings.

use chrono::SecondsFormat;
use serde::{Deserialize, Serialize};

use crate::model::{HeadingLevel, Outline, OutlineEntry};
use crate::rank::CollectionResult;

/// Outline of one document: `{title, outline: [{level, text, page}]}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutlineOutput {
    pub title: String,
    pub outline: Vec<OutlineEntry>,
}

impl From<&Outline> for OutlineOutput {
    fn from(outline: &Outline) -> Self {
        Self {
            title: outline.title.clone(),
            outline: outline
                .entries()
                .into_iter()
                .filter(|e| e.level.is_heading())
                .collect(),
        }
    }
}

impl OutlineOutput {
    /// Number of entries at a level.
    pub fn count(&self, level: HeadingLevel) -> usize {
        self.outline.iter().filter(|e| e.level == level).count()
    }
}

/// A document that was left out of a collection run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkippedEntry {
    pub document: String,
    pub reason: String,
}

/// Metadata block of a collection output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Metadata {
    pub input_documents: Vec<String>,
    pub persona: String,
    pub job_to_be_done: String,
    pub processing_timestamp: String,
    pub processed_documents: Vec<String>,
    pub skipped_documents: Vec<SkippedEntry>,
}

/// One ranked section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractedSection {
    pub document: String,
    pub section_title: String,
    pub importance_rank: u32,
    pub page_number: u32,
}

/// Refined text of one top-ranked section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubsectionAnalysis {
    pub document: String,
    pub refined_text: String,
    pub page_number: u32,
}

/// Ranking of one collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollectionOutput {
    pub metadata: Metadata,
    pub extracted_sections: Vec<ExtractedSection>,
    pub subsection_analysis: Vec<SubsectionAnalysis>,
}

impl From<&CollectionResult> for CollectionOutput {
    fn from(result: &CollectionResult) -> Self {
        Self {
            metadata: Metadata {
                input_documents: result.input_documents.clone(),
                persona: result.query.persona().to_string(),
                job_to_be_done: result.query.job_to_be_done().to_string(),
                processing_timestamp: result
                    .processed_at
                    .to_rfc3339_opts(SecondsFormat::Micros, true),
                processed_documents: result.processed_documents.clone(),
                skipped_documents: result
                    .skipped_documents
                    .iter()
                    .map(|s| SkippedEntry {
                        document: s.document.clone(),
                        reason: s.reason.code().to_string(),
                    })
                    .collect(),
            },
            extracted_sections: result
                .ranked
                .iter()
                .map(|r| ExtractedSection {
                    document: r.document_id.clone(),
                    section_title: r.section_title.clone(),
                    importance_rank: r.importance_rank,
                    page_number: r.page_number,
                })
                .collect(),
            subsection_analysis: result
                .refined()
                .map(|r| SubsectionAnalysis {
                    document: r.document_id.clone(),
                    refined_text: r.refined_text.clone(),
                    page_number: r.page_number,
                })
                .collect(),
        }
    }
}
