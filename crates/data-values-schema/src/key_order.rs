// crates/data-values-schema/src/key_order.rs
// ============================================================================
// Module: Keyword Ordering
// Description: Canonical total order over JSON Schema keyword names.
// Purpose: Make emitted schema objects byte-stable regardless of build order.
// Dependencies: std
// ============================================================================

//! ## Overview
//! Keywords are ranked by a fixed priority list: structural keywords first,
//! then documentation, then nested schemas and defaults, then validation
//! bounds. Keywords outside the list sort after every listed keyword, by
//! byte-wise comparison. The order depends only on the keyword names.

use std::cmp::Ordering;

/// Ranked keywords, highest priority first.
pub const KEYWORD_ORDER: [&str; 20] = [
    "title",
    "type",
    "format",
    "additionalProperties",
    "deprecated",
    "description",
    "x-example-description",
    "examples",
    "properties",
    "items",
    "default",
    "minLength",
    "maxLength",
    "minimum",
    "maximum",
    "minItems",
    "maxItems",
    "minProperties",
    "maxProperties",
    "enum",
];

/// Returns the priority rank of a keyword, or `None` when it is unranked.
#[must_use]
pub fn keyword_rank(keyword: &str) -> Option<usize> {
    KEYWORD_ORDER.iter().position(|candidate| *candidate == keyword)
}

/// Compares two keyword names under the canonical order.
#[must_use]
pub fn compare_keywords(left: &str, right: &str) -> Ordering {
    match (keyword_rank(left), keyword_rank(right)) {
        (Some(left_rank), Some(right_rank)) => left_rank.cmp(&right_rank),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => left.cmp(right),
    }
}
