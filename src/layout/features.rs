//! Page feature extraction.
//!
//! Turns the raw runs of a document into styled lines annotated with the
//! layout signals used for heading classification: font-size percentile,
//! boldness, indentation bucket and line isolation.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use super::LayoutOptions;
use crate::model::{BoundingBox, Document, TextRun};
use crate::text::CleanupPipeline;

/// Font statistics for heading detection.
#[derive(Debug, Clone, Default)]
pub struct FontStatistics {
    /// Body text font size (most common by character count)
    pub body_size: f32,
    /// Font sizes noticeably larger than body, largest first
    pub heading_sizes: Vec<f32>,
    /// Character count per font size (key = size in tenths of a point)
    pub size_histogram: BTreeMap<i32, usize>,
    total_chars: usize,
}

impl FontStatistics {
    /// Histogram key of a font size (0.1 pt resolution).
    pub fn size_key(size: f32) -> i32 {
        (size * 10.0).round() as i32
    }

    /// Font size of a histogram key.
    pub fn key_to_size(key: i32) -> f32 {
        key as f32 / 10.0
    }

    /// Add a font size observation weighted by character count.
    pub fn add_size(&mut self, size: f32, chars: usize) {
        if chars == 0 {
            return;
        }
        *self.size_histogram.entry(Self::size_key(size)).or_insert(0) += chars;
        self.total_chars += chars;
    }

    /// Calculate body size and heading sizes.
    pub fn analyze(&mut self, min_heading_delta: f32) {
        // Ascending iteration with a strict comparison keeps the smaller
        // size on ties.
        let mut body: Option<(i32, usize)> = None;
        for (&key, &count) in &self.size_histogram {
            if body.map_or(true, |(_, best)| count > best) {
                body = Some((key, count));
            }
        }

        let Some((body_key, _)) = body else {
            self.body_size = 0.0;
            self.heading_sizes.clear();
            return;
        };

        self.body_size = Self::key_to_size(body_key);
        self.heading_sizes = self
            .size_histogram
            .keys()
            .rev()
            .map(|&k| Self::key_to_size(k))
            .filter(|&size| size > self.body_size + min_heading_delta)
            .collect();
    }

    /// All distinct sizes, largest first.
    pub fn distinct_sizes(&self) -> Vec<f32> {
        self.size_histogram
            .keys()
            .rev()
            .map(|&k| Self::key_to_size(k))
            .collect()
    }

    /// Share of the document's characters set at or below this size.
    pub fn percentile(&self, size: f32) -> f32 {
        if self.total_chars == 0 {
            return 0.0;
        }
        let at_or_below: usize = self
            .size_histogram
            .range(..=Self::size_key(size))
            .map(|(_, count)| count)
            .sum();
        at_or_below as f32 / self.total_chars as f32
    }

    /// Total number of characters observed.
    pub fn total_chars(&self) -> usize {
        self.total_chars
    }

    /// Whether no sizes were observed.
    pub fn is_empty(&self) -> bool {
        self.size_histogram.is_empty()
    }
}

/// A logical line: runs on the same page and baseline, left to right.
#[derive(Debug, Clone)]
pub struct TextLine {
    /// Combined text
    pub text: String,
    /// Page number (1-indexed)
    pub page_number: u32,
    /// Dominant font size (character-weighted over lettered runs)
    pub font_size: f32,
    /// Whether most lettered characters are bold
    pub is_bold: bool,
    /// Union of the run boxes
    pub bbox: BoundingBox,
    /// Baseline of the first run
    pub baseline_y: f32,
    /// Number of runs merged into this line
    pub run_count: usize,
    /// All lettered runs share one size and weight
    pub uniform_style: bool,
    /// Whether the line contains any alphabetic character
    pub has_letters: bool,
    /// Font-size percentile within the document
    pub size_percentile: f32,
    /// Left-indentation bucket relative to the page's leftmost text
    pub indent_bucket: u8,
    /// No other line shares this line's row
    pub alone_on_row: bool,
    /// Whitespace above the line (`None` at the top of a page)
    pub gap_above: Option<f32>,
    /// Whitespace below the line (`None` at the bottom of a page)
    pub gap_below: Option<f32>,
    /// Alone on its row with more than the median gap above and below
    pub is_isolated: bool,
}

impl TextLine {
    /// Create a line from runs sorted left to right. `runs` must not be empty.
    fn from_runs(runs: &[TextRun]) -> Self {
        let lettered: Vec<&TextRun> = runs.iter().filter(|r| r.has_letters()).collect();
        let basis: Vec<&TextRun> = if lettered.is_empty() {
            runs.iter().collect()
        } else {
            lettered
        };

        let total_chars: usize = basis.iter().map(|r| visible_chars(&r.text).max(1)).sum();
        let weighted_size: f32 = basis
            .iter()
            .map(|r| r.font_size * visible_chars(&r.text).max(1) as f32)
            .sum();
        let bold_chars: usize = basis
            .iter()
            .filter(|r| r.is_bold())
            .map(|r| visible_chars(&r.text).max(1))
            .sum();

        let first = &basis[0];
        let uniform_style = basis.iter().all(|r| {
            FontStatistics::size_key(r.font_size) == FontStatistics::size_key(first.font_size)
                && r.is_bold() == first.is_bold()
        });

        let bbox = runs
            .iter()
            .skip(1)
            .fold(runs[0].bounding_box, |acc, r| acc.union(&r.bounding_box));

        Self {
            text: join_runs(runs),
            page_number: runs[0].page_number,
            font_size: weighted_size / total_chars as f32,
            is_bold: bold_chars * 2 > total_chars,
            bbox,
            baseline_y: runs[0].baseline_y,
            run_count: runs.len(),
            uniform_style,
            has_letters: runs.iter().any(|r| r.has_letters()),
            size_percentile: 0.0,
            indent_bucket: 0,
            alone_on_row: true,
            gap_above: None,
            gap_below: None,
            is_isolated: false,
        }
    }

    /// Histogram key of the line's font size.
    pub fn size_key(&self) -> i32 {
        FontStatistics::size_key(self.font_size)
    }

    /// Number of whitespace-separated words.
    pub fn word_count(&self) -> usize {
        self.text.split_whitespace().count()
    }

    /// Number of characters.
    pub fn char_count(&self) -> usize {
        self.text.chars().count()
    }
}

/// Features of one document: its lines plus document-wide statistics.
#[derive(Debug, Clone, Default)]
pub struct FeatureSet {
    /// Lines in reading order (page, then top to bottom, then left to right)
    pub lines: Vec<TextLine>,
    /// Font size statistics
    pub stats: FontStatistics,
    /// Median whitespace between consecutive rows on a page
    pub median_gap: f32,
}

impl FeatureSet {
    /// Whether no text was extracted.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Vertical extent (top, bottom) of the text on a page.
    pub fn page_extent(&self, page_number: u32) -> Option<(f32, f32)> {
        self.lines
            .iter()
            .filter(|l| l.page_number == page_number)
            .fold(None, |acc, l| match acc {
                None => Some((l.bbox.y0, l.bbox.y1)),
                Some((top, bottom)) => Some((top.min(l.bbox.y0), bottom.max(l.bbox.y1))),
            })
    }
}

/// Extracts line features from a document's runs.
pub struct FeatureExtractor<'a> {
    options: &'a LayoutOptions,
    cleanup: CleanupPipeline,
}

struct Row {
    page: u32,
    top: f32,
    bottom: f32,
    lines: Vec<TextLine>,
}

impl<'a> FeatureExtractor<'a> {
    /// Create a new feature extractor.
    pub fn new(options: &'a LayoutOptions) -> Self {
        Self {
            options,
            cleanup: CleanupPipeline::new(options.cleanup.clone()),
        }
    }

    /// Extract features. A document without text yields an empty set.
    pub fn extract(&self, doc: &Document) -> FeatureSet {
        let runs = self.clean_runs(doc);
        if runs.is_empty() {
            return FeatureSet::default();
        }

        let mut stats = FontStatistics::default();
        for run in &runs {
            stats.add_size(run.font_size, visible_chars(&run.text));
        }
        stats.analyze(self.options.min_heading_delta);

        let rows: Vec<Row> = group_runs_into_rows(runs)
            .into_iter()
            .map(|row_runs| {
                let lines: Vec<TextLine> = split_row(row_runs, self.options.column_gap_ems)
                    .iter()
                    .map(|segment| TextLine::from_runs(segment))
                    .collect();
                let top = lines.iter().map(|l| l.bbox.y0).fold(f32::INFINITY, f32::min);
                let bottom = lines
                    .iter()
                    .map(|l| l.bbox.y1)
                    .fold(f32::NEG_INFINITY, f32::max);
                Row {
                    page: lines[0].page_number,
                    top,
                    bottom,
                    lines,
                }
            })
            .collect();

        let gaps_above: Vec<Option<f32>> = (0..rows.len())
            .map(|i| {
                (i > 0 && rows[i - 1].page == rows[i].page)
                    .then(|| (rows[i].top - rows[i - 1].bottom).max(0.0))
            })
            .collect();
        let gaps_below: Vec<Option<f32>> = (0..rows.len())
            .map(|i| gaps_above.get(i + 1).copied().flatten())
            .collect();

        let mut all_gaps: Vec<f32> = gaps_above.iter().flatten().copied().collect();
        let median_gap = median(&mut all_gaps);
        let threshold = median_gap + self.options.isolation_margin;

        let mut left_edges: BTreeMap<u32, f32> = BTreeMap::new();
        for row in &rows {
            for line in &row.lines {
                let edge = left_edges.entry(row.page).or_insert(line.bbox.x0);
                *edge = edge.min(line.bbox.x0);
            }
        }

        let mut lines = Vec::new();
        for (i, row) in rows.into_iter().enumerate() {
            let alone = row.lines.len() == 1;
            let left = left_edges.get(&row.page).copied().unwrap_or(0.0);
            for mut line in row.lines {
                line.size_percentile = stats.percentile(line.font_size);
                line.indent_bucket = self.indent_bucket(line.bbox.x0 - left);
                line.alone_on_row = alone;
                line.gap_above = gaps_above[i];
                line.gap_below = gaps_below[i];
                line.is_isolated = alone
                    && line.uniform_style
                    && gaps_above[i].map_or(true, |g| g > threshold)
                    && gaps_below[i].map_or(true, |g| g > threshold);
                lines.push(line);
            }
        }

        log::debug!(
            "{}: {} lines, body size {:.1}pt, heading sizes {:?}, median gap {:.1}pt",
            doc.id,
            lines.len(),
            stats.body_size,
            stats.heading_sizes,
            median_gap
        );

        FeatureSet {
            lines,
            stats,
            median_gap,
        }
    }

    fn clean_runs(&self, doc: &Document) -> Vec<TextRun> {
        doc.runs
            .iter()
            .filter_map(|run| {
                let text = self.cleanup.process(&run.text);
                (!text.is_empty()).then(|| TextRun {
                    text,
                    ..run.clone()
                })
            })
            .collect()
    }

    fn indent_bucket(&self, offset: f32) -> u8 {
        let bucket = (offset.max(0.0) / self.options.indent_step).floor();
        bucket.min(self.options.max_indent_bucket as f32) as u8
    }
}

/// Group runs into rows by page and baseline.
fn group_runs_into_rows(mut runs: Vec<TextRun>) -> Vec<Vec<TextRun>> {
    runs.sort_by(|a, b| {
        a.page_number
            .cmp(&b.page_number)
            .then_with(|| a.baseline_y.total_cmp(&b.baseline_y))
            .then_with(|| a.bounding_box.x0.total_cmp(&b.bounding_box.x0))
    });

    let mut rows: Vec<Vec<TextRun>> = Vec::new();
    let mut current: Vec<TextRun> = Vec::new();
    let mut row_baseline = 0.0f32;

    for run in runs {
        let same_row = current.first().is_some_and(|first| {
            first.page_number == run.page_number
                && (run.baseline_y - row_baseline).abs() <= run.font_size * 0.3
        });

        if !same_row && !current.is_empty() {
            rows.push(std::mem::take(&mut current));
        }
        if current.is_empty() {
            row_baseline = run.baseline_y;
        }
        current.push(run);
    }

    if !current.is_empty() {
        rows.push(current);
    }
    rows
}

/// Split a row at horizontal gaps wider than `gap_ems` ems, left to right.
fn split_row(mut runs: Vec<TextRun>, gap_ems: f32) -> Vec<Vec<TextRun>> {
    runs.sort_by(|a, b| a.bounding_box.x0.total_cmp(&b.bounding_box.x0));

    let mut segments: Vec<Vec<TextRun>> = Vec::new();
    for run in runs {
        let split = segments.last().and_then(|s| s.last()).map_or(true, |prev| {
            let gap = run.bounding_box.x0 - prev.bounding_box.x1;
            gap > gap_ems * prev.font_size.max(run.font_size)
        });
        if split {
            segments.push(vec![run]);
        } else if let Some(segment) = segments.last_mut() {
            segment.push(run);
        }
    }
    segments
}

/// Join run texts, inserting a space where the horizontal gap implies one.
fn join_runs(runs: &[TextRun]) -> String {
    let mut result = String::new();

    for (i, run) in runs.iter().enumerate() {
        if i == 0 {
            result.push_str(&run.text);
            continue;
        }

        let prev = &runs[i - 1];
        let gap = run.bounding_box.x0 - prev.bounding_box.x1;

        let char_count = run.text.chars().count();
        let avg_char_width = if char_count > 0 && run.bounding_box.width() > 0.0 {
            run.bounding_box.width() / char_count as f32
        } else {
            run.font_size * 0.5
        };

        let prev_is_spaceless = prev.text.chars().last().is_some_and(is_spaceless_script_char);
        let curr_is_spaceless = run.text.chars().next().is_some_and(is_spaceless_script_char);

        if gap > avg_char_width * 0.2 && !(prev_is_spaceless && curr_is_spaceless) {
            result.push(' ');
        }
        result.push_str(&run.text);
    }

    result
}

fn visible_chars(text: &str) -> usize {
    text.chars().filter(|c| !c.is_whitespace()).count()
}

fn median(values: &mut [f32]) -> f32 {
    if values.is_empty() {
        return 0.0;
    }
    values.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));
    let mid = values.len() / 2;
    if values.len() % 2 == 0 {
        (values[mid - 1] + values[mid]) / 2.0
    } else {
        values[mid]
    }
}

/// Chinese and Japanese don't use spaces between words, but Korean does.
fn is_spaceless_script_char(c: char) -> bool {
    let code = c as u32;

    // CJK Unified Ideographs and Extension A
    (0x4E00..=0x9FFF).contains(&code)
    || (0x3400..=0x4DBF).contains(&code)
    // Hiragana, Katakana
    || (0x3040..=0x309F).contains(&code)
    || (0x30A0..=0x30FF).contains(&code)
    // CJK Symbols and Punctuation
    || (0x3000..=0x303F).contains(&code)
}
