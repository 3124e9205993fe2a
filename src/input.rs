//! On-disk inputs: run dumps and collection descriptions.
//!
//! A collection directory holds `challenge1b_input.json` plus one run dump
//! per PDF at `runs/<pdf stem>.json`.

use std::fs::File;
use std::io::{BufReader, ErrorKind};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::model::{Document, Query};
use crate::rank::{DocumentInput, SkipReason};

/// File name of the collection description.
pub const COLLECTION_INPUT_FILE: &str = "challenge1b_input.json";
/// File name of the collection ranking output.
pub const COLLECTION_OUTPUT_FILE: &str = "challenge1b_output.json";
/// Directory holding the run dumps of a collection.
pub const RUNS_DIR: &str = "runs";

/// Optional challenge metadata.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChallengeInfo {
    #[serde(default)]
    pub challenge_id: String,
    #[serde(default)]
    pub test_case_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// A document listed in a collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentEntry {
    pub filename: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

/// The persona of a collection run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Persona {
    pub role: String,
}

/// The job of a collection run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobToBeDone {
    pub task: String,
}

/// Contents of `challenge1b_input.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollectionInput {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub challenge_info: Option<ChallengeInfo>,
    pub documents: Vec<DocumentEntry>,
    pub persona: Persona,
    pub job_to_be_done: JobToBeDone,
}

impl CollectionInput {
    /// Read a collection description from a file.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path.as_ref())?;
        Ok(serde_json::from_reader(BufReader::new(file))?)
    }

    /// Parse a collection description from a JSON string.
    pub fn from_json_str(s: &str) -> Result<Self> {
        Ok(serde_json::from_str(s)?)
    }

    /// The query of this collection. Fails when persona or job is blank.
    pub fn query(&self) -> Result<Query> {
        Query::new(&self.persona.role, &self.job_to_be_done.task)
    }

    /// Input document file names, in order.
    pub fn filenames(&self) -> Vec<String> {
        self.documents.iter().map(|d| d.filename.clone()).collect()
    }
}

/// Read a run dump from a file.
pub fn load_document<P: AsRef<Path>>(path: P) -> Result<Document> {
    let path = path.as_ref();
    let file = File::open(path)?;
    let doc = Document::from_json_reader(BufReader::new(file))?;
    if doc.file_path.as_os_str().is_empty() {
        return Ok(doc.with_file_path(path));
    }
    Ok(doc)
}

/// Path of the run dump for a PDF file name inside a collection.
pub fn run_dump_path(collection_dir: &Path, filename: &str) -> PathBuf {
    let stem = Path::new(filename)
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| filename.to_string());
    collection_dir.join(RUNS_DIR).join(format!("{stem}.json"))
}

/// A collection read from disk.
#[derive(Debug, Clone)]
pub struct LoadedCollection {
    pub input: CollectionInput,
    pub query: Query,
    pub documents: Vec<DocumentInput>,
}

/// Load a collection directory. Missing or unreadable run dumps become
/// skipped entries; a missing description or blank query is an error.
pub fn load_collection<P: AsRef<Path>>(dir: P) -> Result<LoadedCollection> {
    let dir = dir.as_ref();
    let input_path = dir.join(COLLECTION_INPUT_FILE);
    if !input_path.is_file() {
        return Err(Error::InvalidInput(format!(
            "{} not found",
            input_path.display()
        )));
    }

    let input = CollectionInput::from_path(&input_path)?;
    let query = input.query()?;

    let documents = input
        .documents
        .iter()
        .map(|entry| load_entry(dir, &entry.filename))
        .collect();

    Ok(LoadedCollection {
        input,
        query,
        documents,
    })
}

fn load_entry(dir: &Path, filename: &str) -> DocumentInput {
    let path = run_dump_path(dir, filename);
    match load_document(&path) {
        Ok(mut doc) => {
            if doc.id != filename {
                log::debug!("run dump {} has id {:?}, using {}", path.display(), doc.id, filename);
                doc.id = filename.to_string();
            }
            DocumentInput::Loaded(doc)
        }
        Err(Error::Io(e)) if e.kind() == ErrorKind::NotFound => DocumentInput::Unavailable {
            id: filename.to_string(),
            reason: SkipReason::NotFound,
        },
        Err(e) => DocumentInput::Unavailable {
            id: filename.to_string(),
            reason: SkipReason::LoadFailed(e.to_string()),
        },
    }
}
