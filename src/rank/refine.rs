//! Extractive refinement of section bodies.

use std::collections::BTreeSet;

use crate::text::{split_sentences, truncate_at_word, Lexicon};

/// Pick the most query-relevant run of consecutive sentences.
///
/// Every window starting at a sentence is extended while it fits in
/// `max_chars`; the window with the most distinct query-term hits (summed
/// per sentence) wins, the earliest one on ties. A first sentence longer
/// than the cap is cut at a word boundary.
pub fn refine_text(
    body: &str,
    query_terms: &BTreeSet<String>,
    lexicon: &Lexicon,
    max_chars: usize,
) -> String {
    let sentences = split_sentences(body);
    if sentences.is_empty() || max_chars == 0 {
        return String::new();
    }

    let scores: Vec<usize> = sentences
        .iter()
        .map(|s| lexicon.terms(s).intersection(query_terms).count())
        .collect();
    let lengths: Vec<usize> = sentences.iter().map(|s| s.chars().count()).collect();

    let mut best: Option<(usize, usize, usize)> = None;
    for start in 0..sentences.len() {
        let mut end = start;
        let mut chars = lengths[start];
        let mut score = scores[start];
        while end + 1 < sentences.len() && chars + 1 + lengths[end + 1] <= max_chars {
            end += 1;
            chars += 1 + lengths[end];
            score += scores[end];
        }

        if best.map_or(true, |(_, _, best_score)| score > best_score) {
            best = Some((start, end, score));
        }
    }

    let Some((start, end, _)) = best else {
        return String::new();
    };

    if lengths[start] > max_chars {
        return truncate_at_word(sentences[start], max_chars);
    }
    sentences[start..=end].join(" ")
}
