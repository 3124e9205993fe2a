//! Heading levels and the document outline tree.

use serde::{Deserialize, Serialize};

/// Structural level assigned to a line of text.
///
/// Variants are ordered from shallowest to deepest, so `a < b` means `a`
/// may be an ancestor of `b`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum HeadingLevel {
    /// Document title
    #[serde(rename = "TITLE")]
    Title,
    /// Top-level heading
    H1,
    /// Second-level heading
    H2,
    /// Third-level heading
    H3,
    /// Body text
    #[serde(rename = "BODY")]
    Body,
}

impl HeadingLevel {
    /// Map a size-bucket rank (0 = largest heading size) to a level.
    pub fn from_rank(rank: usize) -> Self {
        match rank {
            0 => HeadingLevel::H1,
            1 => HeadingLevel::H2,
            2 => HeadingLevel::H3,
            _ => HeadingLevel::Body,
        }
    }

    /// Whether this level is H1, H2 or H3.
    pub fn is_heading(&self) -> bool {
        matches!(self, HeadingLevel::H1 | HeadingLevel::H2 | HeadingLevel::H3)
    }

    /// Nesting depth (TITLE = 0, BODY = 4).
    pub fn depth(&self) -> u8 {
        match self {
            HeadingLevel::Title => 0,
            HeadingLevel::H1 => 1,
            HeadingLevel::H2 => 2,
            HeadingLevel::H3 => 3,
            HeadingLevel::Body => 4,
        }
    }

    /// Label used in serialized output.
    pub fn as_str(&self) -> &'static str {
        match self {
            HeadingLevel::Title => "TITLE",
            HeadingLevel::H1 => "H1",
            HeadingLevel::H2 => "H2",
            HeadingLevel::H3 => "H3",
            HeadingLevel::Body => "BODY",
        }
    }
}

impl std::fmt::Display for HeadingLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A node of the outline tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutlineNode {
    /// Heading level
    pub level: HeadingLevel,

    /// Heading text
    pub text: String,

    /// Page the heading starts on (1-indexed)
    pub page_number: u32,

    /// Child headings in document order
    pub children: Vec<OutlineNode>,
}

impl OutlineNode {
    /// Create a new leaf node.
    pub fn new(level: HeadingLevel, text: impl Into<String>, page_number: u32) -> Self {
        Self {
            level,
            text: text.into(),
            page_number,
            children: Vec::new(),
        }
    }

    /// Add a child node.
    pub fn add_child(&mut self, child: OutlineNode) {
        self.children.push(child);
    }

    /// Number of nodes in this subtree, including this one.
    pub fn total_nodes(&self) -> usize {
        1 + self.children.iter().map(|c| c.total_nodes()).sum::<usize>()
    }
}

/// One heading in the flat, serialized form of an outline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutlineEntry {
    /// Heading level
    pub level: HeadingLevel,

    /// Heading text
    pub text: String,

    /// Page number (1-indexed)
    pub page: u32,
}

/// The outline of one document: a title plus a forest of headings.
///
/// The top-level nodes are the children of the (possibly absent) title.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Outline {
    /// Document title (empty when none was detected)
    pub title: String,

    /// Page of the title, if one was detected
    pub title_page: Option<u32>,

    /// Top-level headings
    pub nodes: Vec<OutlineNode>,
}

impl Outline {
    /// Create a new empty outline.
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if the outline has neither title nor headings.
    pub fn is_empty(&self) -> bool {
        self.title.is_empty() && self.nodes.is_empty()
    }

    /// Whether a title was detected.
    pub fn has_title(&self) -> bool {
        !self.title.is_empty()
    }

    /// Get the total number of headings (including nested, excluding the title).
    pub fn total_items(&self) -> usize {
        self.nodes.iter().map(|n| n.total_nodes()).sum()
    }

    /// Flatten the tree into document order.
    pub fn entries(&self) -> Vec<OutlineEntry> {
        fn walk(nodes: &[OutlineNode], out: &mut Vec<OutlineEntry>) {
            for node in nodes {
                out.push(OutlineEntry {
                    level: node.level,
                    text: node.text.clone(),
                    page: node.page_number,
                });
                walk(&node.children, out);
            }
        }

        let mut out = Vec::with_capacity(self.total_items());
        walk(&self.nodes, &mut out);
        out
    }

    /// Visit every node with its parent level (TITLE for top-level nodes).
    pub fn for_each_with_parent<F: FnMut(HeadingLevel, &OutlineNode)>(&self, mut f: F) {
        fn walk<F: FnMut(HeadingLevel, &OutlineNode)>(
            parent: HeadingLevel,
            nodes: &[OutlineNode],
            f: &mut F,
        ) {
            for node in nodes {
                f(parent, node);
                walk(node.level, &node.children, f);
            }
        }
        walk(HeadingLevel::Title, &self.nodes, &mut f);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_order() {
        assert!(HeadingLevel::Title < HeadingLevel::H1);
        assert!(HeadingLevel::H1 < HeadingLevel::H3);
        assert!(HeadingLevel::H3 < HeadingLevel::Body);
        assert_eq!(HeadingLevel::from_rank(1), HeadingLevel::H2);
        assert_eq!(HeadingLevel::from_rank(3), HeadingLevel::Body);
    }

    #[test]
    fn test_level_serialization() {
        assert_eq!(serde_json::to_string(&HeadingLevel::H2).unwrap(), "\"H2\"");
        assert_eq!(serde_json::to_string(&HeadingLevel::Title).unwrap(), "\"TITLE\"");
    }

    #[test]
    fn test_outline_entries_preorder() {
        let mut outline = Outline::new();
        let mut chapter = OutlineNode::new(HeadingLevel::H1, "Chapter 1", 1);
        let mut section = OutlineNode::new(HeadingLevel::H2, "Section 1.1", 2);
        section.add_child(OutlineNode::new(HeadingLevel::H3, "Detail", 2));
        chapter.add_child(section);
        outline.nodes.push(chapter);
        outline.nodes.push(OutlineNode::new(HeadingLevel::H1, "Chapter 2", 5));

        assert_eq!(outline.total_items(), 4);
        let texts: Vec<String> = outline.entries().into_iter().map(|e| e.text).collect();
        assert_eq!(texts, vec!["Chapter 1", "Section 1.1", "Detail", "Chapter 2"]);
    }

    #[test]
    fn test_for_each_with_parent() {
        let mut outline = Outline::new();
        let mut chapter = OutlineNode::new(HeadingLevel::H1, "A", 1);
        chapter.add_child(OutlineNode::new(HeadingLevel::H3, "B", 1));
        outline.nodes.push(chapter);

        let mut pairs = Vec::new();
        outline.for_each_with_parent(|parent, node| pairs.push((parent, node.level)));
        assert_eq!(
            pairs,
            vec![
                (HeadingLevel::Title, HeadingLevel::H1),
                (HeadingLevel::H1, HeadingLevel::H3)
            ]
        );
    }
}
