//! Section, query and ranking types.

use serde::{Deserialize, Serialize};

use super::HeadingLevel;
use crate::error::{Error, Result};

/// Lookup reference from a section to the heading that opened it.
///
/// `index` points into [`Outline::entries`](super::Outline::entries) of the
/// same document; the section does not own the heading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeadingRef {
    /// Position in the flattened outline
    pub index: usize,
    /// Level of the heading
    pub level: HeadingLevel,
}

/// A contiguous span of a document bounded by heading boundaries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    /// Owning document
    pub document_id: String,

    /// Heading that opened the section (`None` for leading or whole-document sections)
    pub heading: Option<HeadingRef>,

    /// Section title (heading text, or a stand-in for unheaded sections)
    pub title: String,

    /// Page where the section's heading (or first text) appears
    pub page_number: u32,

    /// First page covered
    pub start_page: u32,

    /// Last page covered (inclusive)
    pub end_page: u32,

    /// Body text: H3 headings and body lines joined in reading order
    pub body_text: String,
}

impl Section {
    /// Whether the section carries any body text.
    pub fn has_body(&self) -> bool {
        !self.body_text.trim().is_empty()
    }

    /// Number of pages covered.
    pub fn page_span(&self) -> u32 {
        self.end_page.saturating_sub(self.start_page) + 1
    }
}

/// A persona plus the job they want done.
///
/// Both parts are non-blank; the only ways to obtain a `Query` are
/// [`Query::new`] and deserialization, which validate the same way.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "QueryRecord")]
pub struct Query {
    persona: String,
    job_to_be_done: String,
}

#[derive(Deserialize)]
struct QueryRecord {
    persona: String,
    job_to_be_done: String,
}

impl TryFrom<QueryRecord> for Query {
    type Error = Error;

    fn try_from(record: QueryRecord) -> Result<Self> {
        Query::new(record.persona, record.job_to_be_done)
    }
}

impl Query {
    /// Create a query; both parts must be non-blank.
    pub fn new(persona: impl Into<String>, job_to_be_done: impl Into<String>) -> Result<Self> {
        let persona = persona.into().trim().to_string();
        let job_to_be_done = job_to_be_done.into().trim().to_string();

        if persona.is_empty() {
            return Err(Error::MissingQuery("persona is empty".to_string()));
        }
        if job_to_be_done.is_empty() {
            return Err(Error::MissingQuery("job to be done is empty".to_string()));
        }

        Ok(Self {
            persona,
            job_to_be_done,
        })
    }

    /// Description of the intended reader.
    pub fn persona(&self) -> &str {
        &self.persona
    }

    /// The reader's stated task.
    pub fn job_to_be_done(&self) -> &str {
        &self.job_to_be_done
    }

    /// Persona and job joined into one string.
    pub fn text(&self) -> String {
        format!("{} {}", self.persona, self.job_to_be_done)
    }
}

/// A section placed in the global ranking of a collection run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedSection {
    /// Owning document
    pub document_id: String,

    /// Section title
    pub section_title: String,

    /// Page of the section heading
    pub page_number: u32,

    /// 1 = most relevant; unique within a run
    pub importance_rank: u32,

    /// Relevance score the rank was derived from
    pub score: f64,

    /// Extractive excerpt (empty outside the top-K)
    pub refined_text: String,
}
