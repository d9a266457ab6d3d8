//! Splits a free-form completion into its narrative part and the `{old, new}` edits
//! embedded in a fenced ```` ```json ```` block.
//!
//! Parsing never fails: a missing or malformed block degrades to no suggestions, and
//! the caller always gets the narrative text back.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

const JSON_MARKER: &str = "```json";

/// First fenced block whose body is a JSON array of objects. Lazy, so it stops at the
/// first closing fence after the array.
static JSON_BLOCK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)```json\s*(\[\s*\{.*?\}\s*\])\s*```").expect("valid regex")
});

/// A proposed substitution in the resume text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuggestionEdit {
    pub old: String,
    pub new: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompletionResult {
    pub narrative_text: String,
    pub suggestions: Vec<SuggestionEdit>,
}

pub fn parse_completion(raw: &str) -> CompletionResult {
    let Some(caps) = JSON_BLOCK.captures(raw) else {
        debug!("No JSON suggestion block in completion");
        return CompletionResult {
            narrative_text: raw.trim().to_string(),
            suggestions: Vec::new(),
        };
    };

    let narrative_text = raw
        .split(JSON_MARKER)
        .next()
        .unwrap_or_default()
        .trim()
        .to_string();

    let suggestions = match serde_json::from_str::<Vec<serde_json::Value>>(&caps[1]) {
        Ok(elements) => suggestions_from_elements(elements),
        Err(e) => {
            warn!(error = %e, "Suggestion block is not valid JSON; returning no suggestions");
            Vec::new()
        }
    };

    CompletionResult {
        narrative_text,
        suggestions,
    }
}

/// Keeps elements shaped like `{"old": string, "new": string}`, in order.
fn suggestions_from_elements(elements: Vec<serde_json::Value>) -> Vec<SuggestionEdit> {
    elements
        .into_iter()
        .enumerate()
        .filter_map(|(index, element)| {
            serde_json::from_value::<SuggestionEdit>(element)
                .map_err(|e| warn!(index, error = %e, "Dropping malformed suggestion"))
                .ok()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn edit(old: &str, new: &str) -> SuggestionEdit {
        SuggestionEdit {
            old: old.to_string(),
            new: new.to_string(),
        }
    }

    #[test]
    fn test_end_to_end_example() {
        let raw = "Match: 80%.\n\n```json\n[{\"old\":\"Led team\",\"new\":\"Led a team of 5\"}]\n```";
        let result = parse_completion(raw);
        assert_eq!(result.narrative_text, "Match: 80%.");
        assert_eq!(result.suggestions, vec![edit("Led team", "Led a team of 5")]);
    }

    #[test]
    fn test_multiple_suggestions_keep_input_order() {
        let raw = r#"
Match: 65%. Strong backend overlap, little cloud experience.

- Rust
- PostgreSQL

```json
[
  {"old": "Worked on APIs", "new": "Designed REST APIs serving 2M requests/day"},
  {"old": "Used AWS", "new": "Deployed services on AWS ECS"},
  {"old": "Led team", "new": "Led a team of 5 engineers"}
]
```
"#;
        let result = parse_completion(raw);
        assert_eq!(
            result.narrative_text,
            "Match: 65%. Strong backend overlap, little cloud experience.\n\n- Rust\n- PostgreSQL"
        );
        assert_eq!(
            result.suggestions,
            vec![
                edit("Worked on APIs", "Designed REST APIs serving 2M requests/day"),
                edit("Used AWS", "Deployed services on AWS ECS"),
                edit("Led team", "Led a team of 5 engineers"),
            ]
        );
    }

    #[test]
    fn test_no_marker_returns_trimmed_response() {
        let raw = "  \nMatch: 40%.\nMissing: Kubernetes.\n\n";
        let result = parse_completion(raw);
        assert_eq!(result.narrative_text, "Match: 40%.\nMissing: Kubernetes.");
        assert!(result.suggestions.is_empty());
    }

    #[test]
    fn test_invalid_json_is_swallowed() {
        let raw = "Match: 70%.\n```json\n[{\"old\": \"a\", \"new\": \"b\",}]\n```\ntrailing";
        let result = parse_completion(raw);
        assert_eq!(result.narrative_text, "Match: 70%.");
        assert!(result.suggestions.is_empty());
    }

    #[test]
    fn test_only_first_block_is_used() {
        let raw = "Intro\n```json\n[{\"old\": \"a\", \"new\": \"b\"}]\n```\nMore\n```json\n[{\"old\": \"c\", \"new\": \"d\"}]\n```";
        let result = parse_completion(raw);
        assert_eq!(result.narrative_text, "Intro");
        assert_eq!(result.suggestions, vec![edit("a", "b")]);
    }

    #[test]
    fn test_marker_without_object_array_keeps_whole_response() {
        let raw = "Match: 50%.\n```json\n{\"old\": \"a\", \"new\": \"b\"}\n```";
        let result = parse_completion(raw);
        assert_eq!(result.narrative_text, raw.trim());
        assert!(result.suggestions.is_empty());
    }

    #[test]
    fn test_malformed_elements_are_dropped() {
        let raw = "Match: 90%.\n```json\n[{\"old\": \"a\", \"new\": \"b\"}, {\"old\": \"missing new\"}, {\"old\": 1, \"new\": 2}, {\"old\": \"c\", \"new\": \"d\", \"why\": \"clarity\"}]\n```";
        let result = parse_completion(raw);
        assert_eq!(result.suggestions, vec![edit("a", "b"), edit("c", "d")]);
    }

    #[test]
    fn test_reparsing_narrative_is_idempotent() {
        let raw = "Match: 80%.\n\n```json\n[{\"old\":\"Led team\",\"new\":\"Led a team of 5\"}]\n```";
        let first = parse_completion(raw);
        let second = parse_completion(&first.narrative_text);
        assert_eq!(second.narrative_text, first.narrative_text);
        assert!(second.suggestions.is_empty());
    }

    #[test]
    fn test_block_without_newlines_is_found() {
        let raw = "ok ```json[{\"old\":\"x\",\"new\":\"y\"}]```";
        let result = parse_completion(raw);
        assert_eq!(result.narrative_text, "ok");
        assert_eq!(result.suggestions, vec![edit("x", "y")]);
    }
}
