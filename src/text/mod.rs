//! Text utilities: cleanup, tokenization and sentence handling.

mod cleanup;
mod sentence;
mod tokenize;

pub use cleanup::{CleanupOptions, CleanupPipeline, CleanupPreset};
pub use sentence::{split_sentences, truncate_at_word};
pub use tokenize::{stem, Lexicon};
