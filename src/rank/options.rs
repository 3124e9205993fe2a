//! Ranking options and scoring weights.

/// Weights for the relevance score.
///
/// The final score is `lexical * overlap + density * tf_density +
/// semantic * cosine`:
/// - `lexical`: distinct query terms found (3 per heading hit, 1 per body hit)
/// - `density`: query-term occurrences per body token, in `[0, 1]`
/// - `semantic`: clamped cosine similarity, in `[0, 1]` (0 without embeddings)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoringWeights {
    pub lexical: f64,
    pub density: f64,
    pub semantic: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            lexical: 1.0,
            density: 10.0,
            semantic: 4.0,
        }
    }
}

/// Options for collection ranking and refinement.
#[derive(Debug, Clone)]
pub struct RankOptions {
    /// Score weights
    pub weights: ScoringWeights,

    /// Number of top sections that get refined text
    pub top_k: usize,

    /// Maximum number of ranked sections in the output
    pub max_sections: usize,

    /// Character cap for refined text
    pub refined_char_cap: usize,
}

impl RankOptions {
    /// Create new ranking options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the scoring weights.
    pub fn with_weights(mut self, weights: ScoringWeights) -> Self {
        self.weights = weights;
        self
    }

    /// Set the number of refined sections.
    pub fn with_top_k(mut self, k: usize) -> Self {
        self.top_k = k;
        self
    }

    /// Set the maximum number of ranked sections.
    pub fn with_max_sections(mut self, n: usize) -> Self {
        self.max_sections = n;
        self
    }

    /// Set the refined text character cap.
    pub fn with_char_cap(mut self, chars: usize) -> Self {
        self.refined_char_cap = chars;
        self
    }
}

impl Default for RankOptions {
    fn default() -> Self {
        Self {
            weights: ScoringWeights::default(),
            top_k: 5,
            max_sections: 10,
            refined_char_cap: 500,
        }
    }
}
