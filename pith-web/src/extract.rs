//! Anchor-based content slicing.
//!
//! This is the deterministic core of the system: given the flattened page
//! text and the model's two anchor phrases, compute the span of "main
//! content" as a literal substring of the text. All fuzziness lives on the
//! oracle side; here matching is exact, case-sensitive, first-match-wins.

/// Extract the span of `text` bracketed by `begin` and `end`, both anchors
/// inclusive.
///
/// - `begin` not found: `None`. This is the only absence case.
/// - `end` not found after the `begin` match (the search starts immediately
///   past it, so the result can never start before its own `begin`
///   occurrence): everything from `begin` onward, since no end marker could
///   be confirmed.
/// - An empty `begin` matches at position 0; an empty `end` is treated as
///   unmatchable rather than as an instant match, so it also yields the
///   suffix.
///
/// Pure function over its inputs: identical arguments give byte-identical
/// results.
pub fn extract_content(text: &str, begin: &str, end: &str) -> Option<String> {
    let start = text.find(begin)?;
    let after_begin = start + begin.len();

    if end.is_empty() {
        return Some(text[start..].to_string());
    }

    match text[after_begin..].find(end) {
        Some(rel) => {
            let end_at = after_begin + rel + end.len();
            Some(text[start..end_at].to_string())
        }
        None => Some(text[start..].to_string()),
    }
}
