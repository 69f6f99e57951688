//! PII-to-region mapping.
//!
//! Given OCR word tokens in reading order and a set of PII strings, decide
//! which word-level bounding boxes must be redacted. This is the one piece
//! of the workflow with real logic: PII values may span multiple OCR words
//! ("John Doe"), and OCR may split numeric values into different groupings
//! than the detector saw ("4532 1234" vs "45321234").
//!
//! The mapper is a pure structural matcher: it never fails, applies no
//! confidence threshold, and does not try to second-guess the detector. A
//! noisy PII value that matches many words simply over-redacts, which is
//! the acceptable failure direction for this domain.

use std::collections::BTreeSet;

use crate::types::{BoundingBox, WordToken};

/// Map PII values to the bounding boxes of the OCR words that carry them.
///
/// Matching policy, per PII value:
///
/// 1. Split the value on whitespace into components (runs collapse, edges
///    trim). A single-word value yields one component.
/// 2. A word matches a component when their normalized texts (lowercased,
///    non-alphanumeric characters stripped) are equal, or when either
///    normalized text contains the other. Containment covers OCR splitting
///    or merging digit groups differently than the original text.
/// 3. Each matched word contributes its box exactly once, deduplicated by
///    position in the sequence (duplicate texts at different locations are
///    independent matches).
///
/// The output preserves the reading order of the input words regardless of
/// the order PII values were supplied in, so results are deterministic.
pub fn map_pii_regions(words: &[WordToken], pii_values: &[String]) -> Vec<BoundingBox> {
    let matched = matched_word_indices(words, pii_values);

    matched
        .into_iter()
        .map(|idx| words[idx].bounding_box)
        .collect()
}

/// Indices (in reading order) of the words matched by any PII value.
fn matched_word_indices(words: &[WordToken], pii_values: &[String]) -> BTreeSet<usize> {
    let normalized_words: Vec<String> = words.iter().map(|w| normalize(&w.text)).collect();

    let mut matched = BTreeSet::new();

    for pii_value in pii_values {
        for component in pii_value.split_whitespace() {
            let component = normalize(component);
            if component.is_empty() {
                continue;
            }

            for (idx, word) in normalized_words.iter().enumerate() {
                if tokens_match(word, &component) {
                    matched.insert(idx);
                }
            }
        }
    }

    matched
}

/// Case-insensitive comparison key: lowercase with separators stripped.
fn normalize(text: &str) -> String {
    text.chars()
        .filter(|c| c.is_alphanumeric())
        .flat_map(|c| c.to_lowercase())
        .collect()
}

/// Bidirectional containment on normalized text.
///
/// `word == component` is the common case. `component` containing `word`
/// handles OCR splitting a value more finely than the detector reported it;
/// `word` containing `component` handles OCR merging pieces. Empty strings
/// never match (a word like "-" normalizes away entirely and must not match
/// every component).
fn tokens_match(word: &str, component: &str) -> bool {
    if word.is_empty() || component.is_empty() {
        return false;
    }

    word == component || component.contains(word) || word.contains(component)
}
