//! JSON rendering for outlines and collection rankings.

use serde::Serialize;

use super::{CollectionOutput, OutlineOutput};
use crate::error::{Error, Result};
use crate::model::Outline;
use crate::rank::CollectionResult;

/// JSON output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonFormat {
    /// Pretty-printed JSON with indentation
    #[default]
    Pretty,
    /// Compact JSON without extra whitespace
    Compact,
}

/// Serialize any output record.
pub fn to_json<T: Serialize + ?Sized>(value: &T, format: JsonFormat) -> Result<String> {
    let result = match format {
        JsonFormat::Pretty => serde_json::to_string_pretty(value),
        JsonFormat::Compact => serde_json::to_string(value),
    };

    result.map_err(|e| Error::Render(format!("JSON serialization error: {}", e)))
}

/// Convert an outline to its JSON record.
pub fn outline_to_json(outline: &Outline, format: JsonFormat) -> Result<String> {
    to_json(&OutlineOutput::from(outline), format)
}

/// Convert a collection ranking to its JSON record.
pub fn collection_to_json(result: &CollectionResult, format: JsonFormat) -> Result<String> {
    to_json(&CollectionOutput::from(result), format)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{HeadingLevel, OutlineNode};

    fn outline() -> Outline {
        let mut outline = Outline::new();
        outline.title = "Test".to_string();
        outline.nodes.push(OutlineNode::new(HeadingLevel::H1, "Intro", 1));
        outline
    }

    #[test]
    fn test_to_json_pretty() {
        let json = outline_to_json(&outline(), JsonFormat::Pretty).unwrap();
        assert!(json.contains("\"title\""));
        assert!(json.contains("Test"));
        assert!(json.contains('\n')); // Pretty has newlines
    }

    #[test]
    fn test_to_json_compact() {
        let json = outline_to_json(&outline(), JsonFormat::Compact).unwrap();
        assert_eq!(
            json,
            r#"{"title":"Test","outline":[{"level":"H1","text":"Intro","page":1}]}"#
        );
    }

    #[test]
    fn test_empty_outline() {
        let json = outline_to_json(&Outline::new(), JsonFormat::Compact).unwrap();
        assert_eq!(json, r#"{"title":"","outline":[]}"#);
    }
}
