//! Applies `{old, new}` suggestion edits to a resume's plain text.

use std::collections::HashSet;

use serde::Serialize;

use crate::analysis::response_parser::SuggestionEdit;

/// Minimum word-set similarity for a line to count as a fuzzy match.
const FUZZY_THRESHOLD: f64 = 0.5;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApplyOutcome {
    pub resume_text: String,
    pub applied: Vec<SuggestionEdit>,
    pub unmatched: Vec<SuggestionEdit>,
}

/// Applies each suggestion in order against the progressively edited text.
///
/// An exact occurrence of `old` is replaced (first occurrence only). Otherwise the
/// most similar line above the threshold gets `new` inserted right after it.
pub fn apply_suggestions(resume_text: &str, suggestions: &[SuggestionEdit]) -> ApplyOutcome {
    let mut text = resume_text.to_string();
    let mut applied = Vec::new();
    let mut unmatched = Vec::new();

    for suggestion in suggestions {
        if suggestion.old.is_empty() {
            unmatched.push(suggestion.clone());
            continue;
        }

        if text.contains(&suggestion.old) {
            text = text.replacen(&suggestion.old, &suggestion.new, 1);
            applied.push(suggestion.clone());
        } else if let Some(line_index) = best_matching_line(&text, &suggestion.old) {
            let mut lines: Vec<&str> = text.split('\n').collect();
            lines.insert(line_index + 1, &suggestion.new);
            text = lines.join("\n");
            applied.push(suggestion.clone());
        } else {
            unmatched.push(suggestion.clone());
        }
    }

    ApplyOutcome {
        resume_text: text,
        applied,
        unmatched,
    }
}

fn best_matching_line(text: &str, target: &str) -> Option<usize> {
    let target_words = word_set(target);
    let mut best: Option<(usize, f64)> = None;

    for (index, line) in text.split('\n').enumerate() {
        let score = similarity(&word_set(line), &target_words);
        if score > FUZZY_THRESHOLD && best.map_or(true, |(_, top)| score > top) {
            best = Some((index, score));
        }
    }

    best.map(|(index, _)| index)
}

/// Lower-cased words with punctuation stripped.
fn word_set(s: &str) -> HashSet<String> {
    s.to_lowercase()
        .chars()
        .filter(|c| c.is_alphanumeric() || *c == '_' || c.is_whitespace())
        .collect::<String>()
        .split_whitespace()
        .map(str::to_owned)
        .collect()
}

/// Jaccard similarity of two word sets.
fn similarity(a: &HashSet<String>, b: &HashSet<String>) -> f64 {
    let union = a.union(b).count();
    if union == 0 {
        return 0.0;
    }
    a.intersection(b).count() as f64 / union as f64
}
