//! Outline tree assembly.

use super::classify::TextBlock;
use crate::model::{HeadingLevel, Outline, OutlineNode};

/// Builds an [`Outline`] from classified blocks.
///
/// Each heading attaches under the nearest preceding heading that is
/// strictly shallower, or at the top level when there is none. Levels are
/// kept as classified; a skipped level (H1 followed by H3) simply nests the
/// deeper node one step down.
#[derive(Debug, Default)]
pub struct OutlineBuilder {
    roots: Vec<OutlineNode>,
    stack: Vec<OutlineNode>,
}

impl OutlineBuilder {
    /// Create an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one heading in document order. Non-heading levels are ignored.
    pub fn push(&mut self, level: HeadingLevel, text: impl Into<String>, page_number: u32) {
        if !level.is_heading() {
            return;
        }

        while self.stack.last().is_some_and(|top| top.level >= level) {
            self.close_top();
        }
        self.stack.push(OutlineNode::new(level, text, page_number));
    }

    fn close_top(&mut self) {
        if let Some(node) = self.stack.pop() {
            match self.stack.last_mut() {
                Some(parent) => parent.add_child(node),
                None => self.roots.push(node),
            }
        }
    }

    /// Finish the tree.
    pub fn finish(mut self, title: Option<&TextBlock>) -> Outline {
        while !self.stack.is_empty() {
            self.close_top();
        }

        Outline {
            title: title.map(|t| t.text.clone()).unwrap_or_default(),
            title_page: title.map(|t| t.page_number),
            nodes: self.roots,
        }
    }

    /// Build an outline from blocks in reading order.
    pub fn build(title: Option<&TextBlock>, blocks: &[TextBlock]) -> Outline {
        let mut builder = Self::new();
        for block in blocks.iter().filter(|b| b.is_heading()) {
            builder.push(block.level, block.text.clone(), block.page_number);
        }
        builder.finish(title)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn levels_with_parents(outline: &Outline) -> Vec<(HeadingLevel, HeadingLevel)> {
        let mut pairs = Vec::new();
        outline.for_each_with_parent(|parent, node| pairs.push((parent, node.level)));
        pairs
    }

    #[test]
    fn test_nesting() {
        let mut builder = OutlineBuilder::new();
        builder.push(HeadingLevel::H1, "Intro", 1);
        builder.push(HeadingLevel::H2, "Scope", 1);
        builder.push(HeadingLevel::H3, "Details", 2);
        builder.push(HeadingLevel::H2, "Terms", 2);
        builder.push(HeadingLevel::H1, "Methods", 3);
        let outline = builder.finish(None);

        assert_eq!(outline.nodes.len(), 2);
        assert_eq!(outline.nodes[0].children.len(), 2);
        assert_eq!(outline.nodes[0].children[0].children[0].text, "Details");
        assert_eq!(outline.title, "");
        assert_eq!(outline.title_page, None);

        let texts: Vec<String> = outline.entries().into_iter().map(|e| e.text).collect();
        assert_eq!(texts, vec!["Intro", "Scope", "Details", "Terms", "Methods"]);
    }

    #[test]
    fn test_children_strictly_deeper() {
        let mut builder = OutlineBuilder::new();
        builder.push(HeadingLevel::H3, "Orphan", 1);
        builder.push(HeadingLevel::H1, "Chapter", 1);
        builder.push(HeadingLevel::H3, "Skip", 2);
        builder.push(HeadingLevel::H2, "Section", 2);
        builder.push(HeadingLevel::Body, "ignored", 2);
        let outline = builder.finish(None);

        for (parent, child) in levels_with_parents(&outline) {
            assert!(parent < child);
        }
        // Levels are never promoted.
        let levels: Vec<HeadingLevel> = outline.entries().iter().map(|e| e.level).collect();
        assert_eq!(
            levels,
            vec![HeadingLevel::H3, HeadingLevel::H1, HeadingLevel::H3, HeadingLevel::H2]
        );
        assert_eq!(outline.nodes[1].children.len(), 2);
    }

    #[test]
    fn test_empty() {
        let outline = OutlineBuilder::build(None, &[]);
        assert!(outline.is_empty());
    }
}
