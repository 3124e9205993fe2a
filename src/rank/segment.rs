//! Section segmentation.
//!
//! H1 and H2 headings open sections; H3 headings and body lines accumulate
//! into the open section. Page ranges partition `1..=page_count`.

use crate::layout::{DocumentLayout, TextBlock};
use crate::model::{HeadingLevel, HeadingRef, Section};
use crate::text::{CleanupOptions, CleanupPipeline};

/// A section under construction.
struct OpenSection<'a> {
    heading: Option<HeadingRef>,
    title: String,
    page_number: u32,
    last_page: u32,
    lines: Vec<&'a str>,
}

impl<'a> OpenSection<'a> {
    fn add(&mut self, block: &'a TextBlock) {
        self.lines.push(&block.text);
        self.last_page = self.last_page.max(block.page_number);
    }
}

/// Splits analyzed documents into sections.
pub struct SectionSegmenter {
    cleanup: CleanupPipeline,
}

impl SectionSegmenter {
    /// Create a segmenter with the standard cleanup for section bodies.
    pub fn new() -> Self {
        Self::with_cleanup(CleanupOptions::standard())
    }

    /// Create a segmenter with custom body cleanup.
    pub fn with_cleanup(options: CleanupOptions) -> Self {
        Self {
            cleanup: CleanupPipeline::new(options),
        }
    }

    /// Segment one document. A document without text has no sections.
    pub fn segment(&self, layout: &DocumentLayout) -> Vec<Section> {
        if layout.is_empty() {
            return Vec::new();
        }

        let stand_in_title = match layout.title_text() {
            "" => layout.document_id.clone(),
            title => title.to_string(),
        };
        let first_page = layout
            .title
            .as_ref()
            .or(layout.blocks.first())
            .map(|b| b.page_number)
            .unwrap_or(1);

        let mut leading = OpenSection {
            heading: None,
            title: stand_in_title,
            page_number: first_page,
            last_page: first_page,
            lines: Vec::new(),
        };
        let mut opened: Vec<OpenSection> = Vec::new();
        let mut heading_index = 0;

        for block in &layout.blocks {
            match block.level {
                HeadingLevel::H1 | HeadingLevel::H2 => {
                    opened.push(OpenSection {
                        heading: Some(HeadingRef {
                            index: heading_index,
                            level: block.level,
                        }),
                        title: block.text.clone(),
                        page_number: block.page_number,
                        last_page: block.page_number,
                        lines: Vec::new(),
                    });
                    heading_index += 1;
                }
                level => {
                    if level == HeadingLevel::H3 {
                        heading_index += 1;
                    }
                    opened.last_mut().unwrap_or(&mut leading).add(block);
                }
            }
        }

        let mut sections: Vec<OpenSection> = Vec::with_capacity(opened.len() + 1);
        if opened.is_empty() || !leading.lines.is_empty() {
            sections.push(leading);
        }
        sections.extend(opened);

        self.close(&layout.document_id, layout.page_count, sections)
    }

    /// Assign page ranges and join bodies.
    fn close(&self, document_id: &str, page_count: u32, open: Vec<OpenSection>) -> Vec<Section> {
        let starts: Vec<u32> = open
            .iter()
            .enumerate()
            .map(|(i, s)| if i == 0 { 1 } else { s.page_number })
            .collect();
        let last_content_page = open.iter().map(|s| s.last_page).max().unwrap_or(1);
        let page_count = page_count.max(last_content_page);

        open.into_iter()
            .enumerate()
            .map(|(i, s)| {
                let end_page = match starts.get(i + 1) {
                    // Shares the next section's start page when it still has
                    // content there; otherwise stops right before it.
                    Some(&next) => s.last_page.max(next.saturating_sub(1)),
                    None => page_count,
                };
                Section {
                    document_id: document_id.to_string(),
                    heading: s.heading,
                    title: s.title,
                    page_number: s.page_number,
                    start_page: starts[i],
                    end_page,
                    body_text: self.cleanup.join_lines(s.lines),
                }
            })
            .collect()
    }
}

impl Default for SectionSegmenter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{FontStatistics, OutlineBuilder};
    use crate::model::BoundingBox;

    fn block(level: HeadingLevel, text: &str, page: u32) -> TextBlock {
        TextBlock {
            level,
            text: text.to_string(),
            page_number: page,
            bbox: BoundingBox::default(),
            font_size: 10.0,
            is_bold: false,
        }
    }

    fn layout(title: Option<TextBlock>, blocks: Vec<TextBlock>, page_count: u32) -> DocumentLayout {
        let outline = OutlineBuilder::build(title.as_ref(), &blocks);
        DocumentLayout {
            document_id: "guide.pdf".to_string(),
            page_count,
            run_count: blocks.len(),
            line_count: blocks.len(),
            stats: FontStatistics::default(),
            title,
            blocks,
            outline,
        }
    }

    fn assert_partition(sections: &[Section], page_count: u32) {
        assert_eq!(sections[0].start_page, 1);
        assert_eq!(sections[sections.len() - 1].end_page, page_count);
        for pair in sections.windows(2) {
            let (a, b) = (&pair[0], &pair[1]);
            assert!(a.start_page <= a.end_page);
            assert!(b.start_page == a.end_page || b.start_page == a.end_page + 1);
        }
    }

    #[test]
    fn test_headings_open_sections() {
        let doc = layout(
            Some(block(HeadingLevel::Title, "Guide", 1)),
            vec![
                block(HeadingLevel::Body, "Welcome text.", 1),
                block(HeadingLevel::H1, "Cities", 1),
                block(HeadingLevel::Body, "Nice is lovely.", 2),
                block(HeadingLevel::H3, "Old Town", 2),
                block(HeadingLevel::Body, "Narrow streets.", 2),
                block(HeadingLevel::H2, "Food", 4),
                block(HeadingLevel::Body, "Try socca.", 4),
            ],
            6,
        );
        let sections = SectionSegmenter::new().segment(&doc);

        let titles: Vec<&str> = sections.iter().map(|s| s.title.as_str()).collect();
        assert_eq!(titles, vec!["Guide", "Cities", "Food"]);
        assert_eq!(sections[0].heading, None);
        assert_eq!(sections[0].body_text, "Welcome text.");
        assert_eq!(
            sections[1].body_text,
            "Nice is lovely. Old Town Narrow streets."
        );

        // The k-th heading block is entry k of the outline.
        let entries = doc.outline.entries();
        let food = sections[2].heading.unwrap();
        assert_eq!(food.index, 2);
        assert_eq!(entries[food.index].text, "Food");

        assert_eq!((sections[0].start_page, sections[0].end_page), (1, 1));
        assert_eq!((sections[1].start_page, sections[1].end_page), (1, 3));
        assert_eq!((sections[2].start_page, sections[2].end_page), (4, 6));
        assert_partition(&sections, 6);
    }

    #[test]
    fn test_leading_section_requires_body() {
        let doc = layout(
            None,
            vec![
                block(HeadingLevel::H1, "Intro", 2),
                block(HeadingLevel::Body, "Text.", 2),
            ],
            3,
        );
        let sections = SectionSegmenter::new().segment(&doc);
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].title, "Intro");
        assert_partition(&sections, 3);
    }

    #[test]
    fn test_no_headings_single_section() {
        let doc = layout(
            None,
            vec![
                block(HeadingLevel::Body, "One.", 1),
                block(HeadingLevel::Body, "Two.", 2),
            ],
            2,
        );
        let sections = SectionSegmenter::new().segment(&doc);
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].title, "guide.pdf");
        assert_eq!(sections[0].body_text, "One. Two.");
        assert_eq!((sections[0].start_page, sections[0].end_page), (1, 2));
    }

    #[test]
    fn test_shared_boundary_page() {
        let doc = layout(
            None,
            vec![
                block(HeadingLevel::H1, "A", 1),
                block(HeadingLevel::Body, "a text", 1),
                block(HeadingLevel::Body, "more a", 3),
                block(HeadingLevel::H1, "B", 3),
                block(HeadingLevel::Body, "b text", 3),
            ],
            3,
        );
        let sections = SectionSegmenter::new().segment(&doc);
        assert_eq!((sections[0].start_page, sections[0].end_page), (1, 3));
        assert_eq!((sections[1].start_page, sections[1].end_page), (3, 3));
        assert_partition(&sections, 3);
    }

    #[test]
    fn test_hyphenation_repaired_across_lines() {
        let doc = layout(
            None,
            vec![
                block(HeadingLevel::Body, "an impor-", 1),
                block(HeadingLevel::Body, "tant note", 1),
            ],
            1,
        );
        let sections = SectionSegmenter::new().segment(&doc);
        assert_eq!(sections[0].body_text, "an important note");
    }

    #[test]
    fn test_empty_document() {
        let doc = layout(None, Vec::new(), 4);
        assert!(SectionSegmenter::new().segment(&doc).is_empty());
    }
}
