//! Heading classification.
//!
//! Assigns a [`HeadingLevel`] to every line from per-document font-size
//! buckets, then merges numbering prefixes and multi-line headings into
//! single blocks.

use std::collections::{BTreeSet, HashMap};

use super::features::{FeatureSet, TextLine};
use super::LayoutOptions;
use crate::model::{BoundingBox, HeadingLevel};

/// A classified unit of text: one line, or several merged heading lines.
#[derive(Debug, Clone, PartialEq)]
pub struct TextBlock {
    /// Assigned level
    pub level: HeadingLevel,
    /// Text content
    pub text: String,
    /// Page number (1-indexed)
    pub page_number: u32,
    /// Bounding box on the page
    pub bbox: BoundingBox,
    /// Dominant font size
    pub font_size: f32,
    /// Whether the text is bold
    pub is_bold: bool,
}

impl TextBlock {
    fn from_line(line: &TextLine, level: HeadingLevel) -> Self {
        Self {
            level,
            text: line.text.clone(),
            page_number: line.page_number,
            bbox: line.bbox,
            font_size: line.font_size,
            is_bold: line.is_bold,
        }
    }

    /// Check if this block is a heading (H1 to H3).
    pub fn is_heading(&self) -> bool {
        self.level.is_heading()
    }

    fn append(&mut self, text: &str, bbox: &BoundingBox) {
        if !self.text.is_empty() {
            self.text.push(' ');
        }
        self.text.push_str(text);
        self.bbox = self.bbox.union(bbox);
    }
}

/// Result of classifying one document.
#[derive(Debug, Clone, Default)]
pub struct Classification {
    /// The title block, if one was detected
    pub title: Option<TextBlock>,
    /// All other blocks in reading order
    pub blocks: Vec<TextBlock>,
}

impl Classification {
    /// Iterate over heading blocks in reading order.
    pub fn headings(&self) -> impl Iterator<Item = &TextBlock> {
        self.blocks.iter().filter(|b| b.is_heading())
    }
}

/// A group of heading sizes close enough to be ordered by style.
struct SizeCluster {
    keys: Vec<i32>,
}

/// Style summary of the candidate lines set at one size.
#[derive(Debug, Clone, Copy)]
struct BucketStyle {
    key: i32,
    bold: bool,
    mean_indent: f32,
}

/// Classifies lines into title, headings and body text.
pub struct HeadingClassifier<'a> {
    options: &'a LayoutOptions,
}

impl<'a> HeadingClassifier<'a> {
    /// Create a new classifier.
    pub fn new(options: &'a LayoutOptions) -> Self {
        Self { options }
    }

    /// Classify all lines of a document.
    pub fn classify(&self, features: &FeatureSet) -> Classification {
        if features.is_empty() {
            return Classification::default();
        }

        let lines = &features.lines;
        let title_lines = self.find_title(features);
        let title = self.build_title(lines, &title_lines);

        let excluded_key = title_lines
            .first()
            .map(|&i| lines[i].size_key())
            .filter(|&key| {
                lines
                    .iter()
                    .enumerate()
                    .filter(|(_, l)| l.size_key() == key)
                    .all(|(i, _)| title_lines.contains(&i))
            });

        let bucket_levels = self.rank_buckets(features, &title_lines, excluded_key);

        let levels: Vec<HeadingLevel> = lines
            .iter()
            .map(|line| {
                let level = bucket_levels
                    .get(&line.size_key())
                    .copied()
                    .unwrap_or(HeadingLevel::Body);
                if level.is_heading() && !self.has_heading_shape(line) {
                    log::debug!("demoting {:?}: not heading-shaped", line.text);
                    return HeadingLevel::Body;
                }
                level
            })
            .collect();

        let blocks = self.build_blocks(lines, &levels, &title_lines);

        Classification { title, blocks }
    }

    /// Indices of the lines forming the title, in reading order.
    fn find_title(&self, features: &FeatureSet) -> BTreeSet<usize> {
        let lines = &features.lines;
        let mut title = BTreeSet::new();

        let Some(max_key) = lines
            .iter()
            .filter(|l| l.page_number == 1 && l.has_letters)
            .map(|l| l.size_key())
            .max()
        else {
            return title;
        };

        let Some((top, bottom)) = features.page_extent(1) else {
            return title;
        };
        let zone_bottom = top + (bottom - top) * self.options.title_zone;
        let threshold = features.median_gap + self.options.isolation_margin;

        let is_candidate = |line: &TextLine| {
            line.page_number == 1
                && line.has_letters
                && line.size_key() == max_key
                && line.bbox.y0 <= zone_bottom
        };

        let mut leading_group: Option<(usize, usize)> = None;
        let mut i = 0;
        while i < lines.len() {
            if !is_candidate(&lines[i]) {
                i += 1;
                continue;
            }

            let start = i;
            while i + 1 < lines.len() && is_candidate(&lines[i + 1]) {
                i += 1;
            }
            let group = &lines[start..=i];
            leading_group.get_or_insert((start, i));

            let isolated = group.iter().all(|l| l.alone_on_row && l.uniform_style)
                && group[0].gap_above.map_or(true, |g| g > threshold)
                && group[group.len() - 1].gap_below.map_or(true, |g| g > threshold);

            if isolated {
                title.extend(start..=i);
            }
            i += 1;
        }

        // A heading-size group that opens page 1 is the title even when the
        // body follows at normal line spacing.
        if title.is_empty() {
            let is_heading_size = features
                .stats
                .heading_sizes
                .iter()
                .any(|&size| super::FontStatistics::size_key(size) == max_key);
            let first_lettered = lines
                .iter()
                .position(|l| l.page_number == 1 && l.has_letters);

            if let Some((start, end)) = leading_group {
                let opens_page = first_lettered == Some(start);
                let standalone = lines[start..=end]
                    .iter()
                    .all(|l| l.alone_on_row && l.uniform_style);
                if is_heading_size && opens_page && standalone {
                    log::debug!("title taken from the top of page 1 without isolation");
                    title.extend(start..=end);
                }
            }
        }

        title
    }

    fn build_title(&self, lines: &[TextLine], title_lines: &BTreeSet<usize>) -> Option<TextBlock> {
        let mut iter = title_lines.iter().map(|&i| &lines[i]);
        let first = iter.next()?;
        let mut block = TextBlock::from_line(first, HeadingLevel::Title);
        for line in iter {
            block.append(&line.text, &line.bbox);
        }
        log::debug!("title: {:?}", block.text);
        Some(block)
    }

    /// Map heading-size keys to levels.
    fn rank_buckets(
        &self,
        features: &FeatureSet,
        title_lines: &BTreeSet<usize>,
        excluded_key: Option<i32>,
    ) -> HashMap<i32, HeadingLevel> {
        let tolerance = (self.options.size_tolerance * 10.0).round() as i32;

        let mut clusters: Vec<SizeCluster> = Vec::new();
        for size in &features.stats.heading_sizes {
            let key = super::FontStatistics::size_key(*size);
            if Some(key) == excluded_key {
                continue;
            }
            match clusters.last_mut() {
                Some(cluster)
                    if cluster
                        .keys
                        .first()
                        .is_some_and(|&largest| largest - key <= tolerance) =>
                {
                    cluster.keys.push(key)
                }
                _ => clusters.push(SizeCluster { keys: vec![key] }),
            }
        }

        let mut ordered: Vec<i32> = Vec::new();
        for cluster in clusters {
            let mut styles: Vec<BucketStyle> = cluster
                .keys
                .iter()
                .filter_map(|&key| self.bucket_style(features, title_lines, key))
                .collect();
            styles.sort_by(|a, b| {
                b.bold
                    .cmp(&a.bold)
                    .then_with(|| a.mean_indent.total_cmp(&b.mean_indent))
                    .then_with(|| b.key.cmp(&a.key))
            });
            ordered.extend(styles.into_iter().map(|s| s.key));
        }

        let levels: HashMap<i32, HeadingLevel> = ordered
            .iter()
            .enumerate()
            .map(|(rank, &key)| (key, HeadingLevel::from_rank(rank)))
            .collect();

        log::debug!(
            "body size {:.1}pt, heading buckets {:?}",
            features.stats.body_size,
            ordered
                .iter()
                .map(|&k| super::FontStatistics::key_to_size(k))
                .collect::<Vec<_>>()
        );

        levels
    }

    fn bucket_style(
        &self,
        features: &FeatureSet,
        title_lines: &BTreeSet<usize>,
        key: i32,
    ) -> Option<BucketStyle> {
        let members: Vec<&TextLine> = features
            .lines
            .iter()
            .enumerate()
            .filter(|(i, l)| !title_lines.contains(i) && l.has_letters && l.size_key() == key)
            .map(|(_, l)| l)
            .collect();

        if members.is_empty() {
            return None;
        }

        let bold = members.iter().filter(|l| l.is_bold).count() * 2 > members.len();
        let mean_indent = members.iter().map(|l| l.indent_bucket as f32).sum::<f32>()
            / members.len() as f32;

        Some(BucketStyle {
            key,
            bold,
            mean_indent,
        })
    }

    fn has_heading_shape(&self, line: &TextLine) -> bool {
        line.has_letters
            && line.char_count() <= self.options.max_heading_chars
            && line.word_count() <= self.options.max_heading_words
    }

    fn build_blocks(
        &self,
        lines: &[TextLine],
        levels: &[HeadingLevel],
        title_lines: &BTreeSet<usize>,
    ) -> Vec<TextBlock> {
        let body: Vec<usize> = (0..lines.len()).filter(|i| !title_lines.contains(i)).collect();

        let mut blocks: Vec<TextBlock> = Vec::with_capacity(body.len());
        let mut prefix: Option<&TextLine> = None;

        for (pos, &i) in body.iter().enumerate() {
            let line = &lines[i];
            let level = levels[i];

            if !line.has_letters {
                let next = body.get(pos + 1).map(|&n| (&lines[n], levels[n]));
                if let Some((next_line, next_level)) = next {
                    if next_level.is_heading() && prefixes(line, next_line) {
                        prefix = Some(line);
                        continue;
                    }
                }
            }

            let mut block = TextBlock::from_line(line, level);
            if let Some(p) = prefix.take() {
                block.text = format!("{} {}", p.text, line.text);
                block.bbox = block.bbox.union(&p.bbox);
            }

            if self.options.merge_multiline_headings {
                if let Some(prev) = blocks.last_mut() {
                    if continues_heading(prev, &block) {
                        prev.append(&block.text, &block.bbox);
                        continue;
                    }
                }
            }

            blocks.push(block);
        }

        blocks
    }
}

/// Whether a letterless line is the numbering or bullet of `next`.
fn prefixes(line: &TextLine, next: &TextLine) -> bool {
    line.page_number == next.page_number && next.bbox.y0 - line.bbox.y1 <= next.font_size
}

/// Whether `block` is the next line of the multi-line heading `prev`.
fn continues_heading(prev: &TextBlock, block: &TextBlock) -> bool {
    prev.is_heading()
        && prev.level == block.level
        && prev.page_number == block.page_number
        && prev.is_bold == block.is_bold
        && super::FontStatistics::size_key(prev.font_size)
            == super::FontStatistics::size_key(block.font_size)
        && block.bbox.y0 - prev.bbox.y1 <= block.font_size
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::FeatureExtractor;
    use crate::model::{Document, TextRun};

    struct PageWriter {
        runs: Vec<TextRun>,
        page: u32,
        y: f32,
    }

    impl PageWriter {
        fn new() -> Self {
            Self {
                runs: Vec::new(),
                page: 1,
                y: 72.0,
            }
        }

        fn line(&mut self, text: &str, size: f32, bold: bool, x0: f32, space_before: f32) {
            self.y += space_before;
            let width = text.chars().count() as f32 * size * 0.5;
            let mut run = TextRun::new(
                text,
                self.page,
                size,
                BoundingBox::new(x0, self.y, x0 + width, self.y + size),
            );
            if bold {
                run = run.bold();
            }
            self.runs.push(run);
            self.y += size + 2.0;
        }

        fn body(&mut self, count: usize) {
            for _ in 0..count {
                self.line("plain body text for the paragraph", 10.0, false, 72.0, 0.0);
            }
        }

        fn next_page(&mut self) {
            self.page += 1;
            self.y = 72.0;
        }

        fn classify(self, options: &LayoutOptions) -> Classification {
            let doc = Document::new("test.pdf").with_runs(self.runs);
            let features = FeatureExtractor::new(options).extract(&doc);
            HeadingClassifier::new(options).classify(&features)
        }
    }

    fn heading_levels(c: &Classification) -> Vec<(HeadingLevel, String)> {
        c.headings().map(|b| (b.level, b.text.clone())).collect()
    }

    #[test]
    fn test_title_and_levels() {
        let mut w = PageWriter::new();
        w.line("Annual Report", 24.0, true, 72.0, 0.0);
        w.line("Introduction", 16.0, true, 72.0, 20.0);
        w.body(4);
        w.line("Background", 13.0, true, 72.0, 12.0);
        w.body(4);
        w.next_page();
        w.line("Results", 16.0, true, 72.0, 0.0);
        w.body(4);

        let c = w.classify(&LayoutOptions::default());
        assert_eq!(c.title.as_ref().map(|t| t.text.as_str()), Some("Annual Report"));
        assert_eq!(
            heading_levels(&c),
            vec![
                (HeadingLevel::H1, "Introduction".to_string()),
                (HeadingLevel::H2, "Background".to_string()),
                (HeadingLevel::H1, "Results".to_string()),
            ]
        );
    }

    #[test]
    fn test_title_without_extra_spacing() {
        let mut w = PageWriter::new();
        w.line("Annual Report 2024", 24.0, true, 72.0, 0.0);
        for _ in 0..10 {
            w.line("the year in review for our stakeholders", 11.0, false, 72.0, 0.0);
        }
        let c = w.classify(&LayoutOptions::default());
        assert_eq!(
            c.title.as_ref().map(|t| t.text.as_str()),
            Some("Annual Report 2024")
        );
        assert!(c.headings().next().is_none());
    }

    #[test]
    fn test_title_lines_concatenate() {
        let mut w = PageWriter::new();
        w.line("Annual Report", 24.0, true, 72.0, 0.0);
        w.line("Fiscal Year 2024", 24.0, true, 72.0, 0.0);
        w.line("Overview", 16.0, true, 72.0, 20.0);
        w.body(6);
        let c = w.classify(&LayoutOptions::default());
        assert_eq!(
            c.title.as_ref().map(|t| t.text.as_str()),
            Some("Annual Report Fiscal Year 2024")
        );
        assert_eq!(
            heading_levels(&c),
            vec![(HeadingLevel::H1, "Overview".to_string())]
        );
    }

    #[test]
    fn test_title_zone_excludes_low_lines() {
        let mut w = PageWriter::new();
        w.body(20);
        w.line("Closing Remarks", 24.0, true, 72.0, 20.0);
        w.body(3);
        let c = w.classify(&LayoutOptions::default());
        assert!(c.title.is_none());
        assert_eq!(
            heading_levels(&c),
            vec![(HeadingLevel::H1, "Closing Remarks".to_string())]
        );
    }

    #[test]
    fn test_title_is_largest_on_first_page() {
        let mut w = PageWriter::new();
        w.line("Survey Results", 20.0, true, 72.0, 0.0);
        w.line("Summary", 16.0, true, 72.0, 20.0);
        w.body(4);
        w.next_page();
        w.line("Appendix Chart", 28.0, true, 72.0, 0.0);
        w.body(4);

        let c = w.classify(&LayoutOptions::default());
        let title = c.title.as_ref().unwrap();
        assert_eq!(title.text, "Survey Results");
        assert!(c
            .blocks
            .iter()
            .filter(|b| b.page_number == 1)
            .all(|b| b.font_size <= title.font_size));
        assert_eq!(
            heading_levels(&c),
            vec![
                (HeadingLevel::H2, "Summary".to_string()),
                (HeadingLevel::H1, "Appendix Chart".to_string()),
            ]
        );
    }

    #[test]
    fn test_single_size_has_no_headings() {
        let mut w = PageWriter::new();
        w.body(10);
        let c = w.classify(&LayoutOptions::default());
        assert!(c.title.is_none());
        assert!(c.headings().next().is_none());
        assert_eq!(c.blocks.len(), 10);
    }

    #[test]
    fn test_fourth_bucket_is_body() {
        let mut w = PageWriter::new();
        w.body(2);
        for (text, size) in [("One", 20.0), ("Two", 17.0), ("Three", 14.0), ("Four", 12.0)] {
            w.line(text, size, false, 72.0, 12.0);
            w.body(3);
        }
        let c = w.classify(&LayoutOptions::default());
        let levels = heading_levels(&c);
        assert_eq!(levels.len(), 3);
        assert_eq!(levels[2], (HeadingLevel::H3, "Three".to_string()));
        assert!(c
            .blocks
            .iter()
            .any(|b| b.text == "Four" && b.level == HeadingLevel::Body));
    }

    #[test]
    fn test_tolerance_prefers_bold_bucket() {
        let mut w = PageWriter::new();
        w.body(2);
        w.line("Plain Heading", 14.2, false, 72.0, 12.0);
        w.body(3);
        w.line("Bold Heading", 14.0, true, 72.0, 12.0);
        w.body(3);
        let c = w.classify(&LayoutOptions::default());
        assert_eq!(
            heading_levels(&c),
            vec![
                (HeadingLevel::H2, "Plain Heading".to_string()),
                (HeadingLevel::H1, "Bold Heading".to_string()),
            ]
        );
    }

    #[test]
    fn test_sizes_apart_keep_size_order() {
        let mut w = PageWriter::new();
        w.body(2);
        w.line("Big Plain", 14.0, false, 72.0, 12.0);
        w.body(3);
        w.line("Mid Plain", 13.6, false, 72.0, 12.0);
        w.body(3);
        w.line("Small Bold", 13.2, true, 72.0, 12.0);
        w.body(3);
        let c = w.classify(&LayoutOptions::default());
        assert_eq!(
            heading_levels(&c),
            vec![
                (HeadingLevel::H1, "Big Plain".to_string()),
                (HeadingLevel::H2, "Mid Plain".to_string()),
                (HeadingLevel::H3, "Small Bold".to_string()),
            ]
        );
    }

    #[test]
    fn test_tolerance_prefers_less_indented_bucket() {
        let mut w = PageWriter::new();
        w.body(2);
        w.line("Indented Heading", 14.0, true, 108.0, 12.0);
        w.body(3);
        w.line("Flush Heading", 13.8, true, 72.0, 12.0);
        w.body(3);
        let c = w.classify(&LayoutOptions::default());
        assert_eq!(
            heading_levels(&c),
            vec![
                (HeadingLevel::H2, "Indented Heading".to_string()),
                (HeadingLevel::H1, "Flush Heading".to_string()),
            ]
        );
    }

    #[test]
    fn test_numbering_prefix_merges() {
        let mut w = PageWriter::new();
        w.body(2);
        w.line("2.1", 14.0, true, 72.0, 12.0);
        w.line("Methods", 14.0, true, 72.0, 0.0);
        w.body(3);
        let c = w.classify(&LayoutOptions::default());
        assert_eq!(
            heading_levels(&c),
            vec![(HeadingLevel::H1, "2.1 Methods".to_string())]
        );
    }

    #[test]
    fn test_multiline_heading_merges() {
        let mut w = PageWriter::new();
        w.body(2);
        w.line("A Very Long Heading", 14.0, true, 72.0, 12.0);
        w.line("That Wraps", 14.0, true, 72.0, 0.0);
        w.body(3);

        let c = w.classify(&LayoutOptions::default());
        assert_eq!(
            heading_levels(&c),
            vec![(HeadingLevel::H1, "A Very Long Heading That Wraps".to_string())]
        );

        let mut w = PageWriter::new();
        w.body(2);
        w.line("A Very Long Heading", 14.0, true, 72.0, 12.0);
        w.line("That Wraps", 14.0, true, 72.0, 0.0);
        w.body(3);
        let c = w.classify(&LayoutOptions::default().with_multiline_headings(false));
        assert_eq!(heading_levels(&c).len(), 2);
    }

    #[test]
    fn test_long_line_demoted() {
        let mut w = PageWriter::new();
        w.body(2);
        let long = "word ".repeat(30);
        w.line(long.trim(), 14.0, true, 72.0, 12.0);
        w.body(3);
        let c = w.classify(&LayoutOptions::default());
        assert!(c.headings().next().is_none());
    }

    #[test]
    fn test_empty_features() {
        let options = LayoutOptions::default();
        let c = HeadingClassifier::new(&options).classify(&FeatureSet::default());
        assert!(c.title.is_none());
        assert!(c.blocks.is_empty());
    }
}
