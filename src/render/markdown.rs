//! Markdown rendering of outlines for human inspection.

use crate::model::{Outline, OutlineNode};

/// Convert an outline to nested Markdown headings.
///
/// The title becomes `#`, H1 `##`, H2 `###` and H3 `####`; each heading
/// carries its page number.
pub fn outline_to_markdown(outline: &Outline) -> String {
    let mut output = String::new();

    if outline.has_title() {
        output.push_str("# ");
        output.push_str(&escape_markdown(&outline.title));
        output.push_str("\n\n");
    }

    for node in &outline.nodes {
        render_node(&mut output, node);
    }

    output
}

fn render_node(output: &mut String, node: &OutlineNode) {
    let hashes = "#".repeat(node.level.depth() as usize + 1);
    output.push_str(&format!(
        "{} {} (p. {})\n\n",
        hashes,
        escape_markdown(&node.text),
        node.page_number
    ));
    for child in &node.children {
        render_node(output, child);
    }
}

/// Escape special Markdown characters.
/// Only escape characters that could be misinterpreted as Markdown syntax.
fn escape_markdown(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' | '`' | '*' | '_' | '[' | ']' | '|' => {
                result.push('\\');
                result.push(c);
            }
            _ => result.push(c),
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::HeadingLevel;

    #[test]
    fn test_escape_markdown() {
        assert_eq!(escape_markdown("Hello *world*"), "Hello \\*world\\*");
        assert_eq!(escape_markdown("[link]"), "\\[link\\]");
    }

    #[test]
    fn test_render_outline() {
        let mut outline = Outline::new();
        outline.title = "Guide".to_string();
        let mut h1 = OutlineNode::new(HeadingLevel::H1, "Intro", 1);
        h1.add_child(OutlineNode::new(HeadingLevel::H3, "Notes", 2));
        outline.nodes.push(h1);

        let md = outline_to_markdown(&outline);
        assert_eq!(md, "# Guide\n\n## Intro (p. 1)\n\n#### Notes (p. 2)\n\n");
    }

    #[test]
    fn test_render_untitled() {
        let mut outline = Outline::new();
        outline.nodes.push(OutlineNode::new(HeadingLevel::H2, "Only", 3));
        assert_eq!(outline_to_markdown(&outline), "### Only (p. 3)\n\n");
    }
}
