//! Layout analysis options and configuration.

use crate::text::{CleanupOptions, CleanupPreset};

/// Options for feature extraction and heading classification.
#[derive(Debug, Clone)]
pub struct LayoutOptions {
    /// Size buckets closer than this (points) are ordered by style instead of size
    pub size_tolerance: f32,

    /// A size must exceed the body size by more than this (points) to be a heading size
    pub min_heading_delta: f32,

    /// Width of one indentation bucket in points
    pub indent_step: f32,

    /// Largest indentation bucket
    pub max_indent_bucket: u8,

    /// Runs on one baseline further apart than this many ems are split into
    /// separate lines (columns)
    pub column_gap_ems: f32,

    /// Fraction of page 1's text extent, from the top, where a title may appear
    pub title_zone: f32,

    /// Extra whitespace (points) beyond the median line gap needed for isolation
    pub isolation_margin: f32,

    /// Headings longer than this many characters are demoted to body text
    pub max_heading_chars: usize,

    /// Headings with more words than this are demoted to body text
    pub max_heading_words: usize,

    /// Merge consecutive heading lines of the same style into one heading
    pub merge_multiline_headings: bool,

    /// Cleanup applied to run text before analysis
    pub cleanup: CleanupOptions,

    /// Whether to analyze documents of a batch in parallel
    pub parallel: bool,
}

impl LayoutOptions {
    /// Create new layout options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the size tolerance used for style tie-breaks.
    pub fn with_size_tolerance(mut self, points: f32) -> Self {
        self.size_tolerance = points.max(0.0);
        self
    }

    /// Set the minimum heading size delta over body text.
    pub fn with_min_heading_delta(mut self, points: f32) -> Self {
        self.min_heading_delta = points.max(0.0);
        self
    }

    /// Set the indentation bucket width.
    pub fn with_indent_step(mut self, points: f32) -> Self {
        self.indent_step = points.max(1.0);
        self
    }

    /// Set the horizontal gap, in ems, that splits a row into columns.
    pub fn with_column_gap(mut self, ems: f32) -> Self {
        self.column_gap_ems = ems.max(0.5);
        self
    }

    /// Set the title zone fraction (clamped to 0..=1).
    pub fn with_title_zone(mut self, fraction: f32) -> Self {
        self.title_zone = fraction.clamp(0.0, 1.0);
        self
    }

    /// Set the isolation margin.
    pub fn with_isolation_margin(mut self, points: f32) -> Self {
        self.isolation_margin = points.max(0.0);
        self
    }

    /// Set heading length limits.
    pub fn with_heading_limits(mut self, max_chars: usize, max_words: usize) -> Self {
        self.max_heading_chars = max_chars;
        self.max_heading_words = max_words;
        self
    }

    /// Enable or disable multi-line heading merging.
    pub fn with_multiline_headings(mut self, merge: bool) -> Self {
        self.merge_multiline_headings = merge;
        self
    }

    /// Set cleanup preset for run text.
    pub fn with_cleanup_preset(mut self, preset: CleanupPreset) -> Self {
        self.cleanup = CleanupOptions::from_preset(preset);
        self
    }

    /// Enable or disable parallel processing.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Disable parallel processing.
    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            size_tolerance: 0.5,
            min_heading_delta: 0.5,
            indent_step: 18.0,
            max_indent_bucket: 7,
            column_gap_ems: 3.0,
            title_zone: 0.35,
            isolation_margin: 1.0,
            max_heading_chars: 200,
            max_heading_words: 24,
            merge_multiline_headings: true,
            cleanup: CleanupOptions::standard(),
            parallel: true,
        }
    }
}
