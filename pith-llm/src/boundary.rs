//! Boundary identification: asking a model where page content begins/ends.
//!
//! The oracle sends the flattened page text to an [`LlmClient`] and expects
//! back a JSON object with the keys `BEGIN` and `END` — each roughly the
//! first/last ten words of the page's main content. The anchors are model
//! output and are *not* guaranteed to be literal substrings of the page
//! text; the extraction side owns all handling of unmatchable anchors.

use crate::traits::LlmClient;
use async_trait::async_trait;
use pith_common::{PithError, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

const BOUNDARY_SYSTEM_PROMPT: &str = "You are a webpage analyzer that finds where the actual \
content of the webpage begins. When you receive text, return a JSON dict that contains the key \
'BEGIN' with the value of the first 10 words of where the content of the webpage begins, and the \
key 'END' with the value of the last 10 words of where the main content ends";

/// The two anchor phrases a model believes bracket the main content.
///
/// Immutable once obtained; a scrape never re-derives anchors for the same
/// page text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnchorPair {
    #[serde(rename = "BEGIN")]
    pub begin: String,
    #[serde(rename = "END")]
    pub end: String,
}

/// Capability interface for boundary identification, so orchestration can
/// be tested against deterministic stand-ins.
#[async_trait]
pub trait BoundaryOracle: Send + Sync {
    async fn identify_boundaries(&self, text: &str) -> Result<AnchorPair>;
}

/// [`BoundaryOracle`] backed by any [`LlmClient`].
pub struct LlmBoundaryOracle {
    client: Arc<dyn LlmClient>,
}

impl LlmBoundaryOracle {
    pub fn new(client: Arc<dyn LlmClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl BoundaryOracle for LlmBoundaryOracle {
    async fn identify_boundaries(&self, text: &str) -> Result<AnchorPair> {
        let resp = self
            .client
            .generate(text, Some(BOUNDARY_SYSTEM_PROMPT), None, None)
            .await?;

        let anchors = parse_anchor_pair(&resp.text)?;
        tracing::debug!(
            model = resp.model.as_deref().unwrap_or("-"),
            begin = %anchors.begin,
            end = %anchors.end,
            "oracle.boundaries"
        );
        Ok(anchors)
    }
}

/// Parse a model completion into an [`AnchorPair`].
///
/// Accepts bare JSON first; falls back to a fenced ```json block or the
/// first brace-delimited object for models that wrap their output. Missing
/// keys are an oracle error, not an absence.
fn parse_anchor_pair(raw: &str) -> Result<AnchorPair> {
    let text = raw.trim();
    let json_str = extract_json_block(text).unwrap_or_else(|| text.to_string());

    serde_json::from_str::<AnchorPair>(&json_str).map_err(|e| {
        PithError::Oracle(format!(
            "failed to parse boundary JSON: {e}, raw: {}",
            snip(text)
        ))
    })
}

/// Try to extract a ```json ... ``` fenced block; fall back to the first
/// brace-delimited object.
fn extract_json_block(text: &str) -> Option<String> {
    let re_fence = Regex::new(r"(?s)```json\s*(\{.*?\})\s*```").ok()?;
    if let Some(caps) = re_fence.captures(text) {
        return Some(caps.get(1)?.as_str().to_string());
    }
    let re_plain = Regex::new(r"(?s)(\{.*\})").ok()?;
    re_plain
        .captures(text)
        .and_then(|c| c.get(1).map(|m| m.as_str().to_string()))
}

fn snip(text: &str) -> String {
    let mut s = text.to_string();
    if s.len() > 200 {
        s.truncate(200);
        s.push_str("...");
    }
    s
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_bare_json() {
        let raw = r#"{"BEGIN": "START Hello", "END": "world END"}"#;
        let anchors = parse_anchor_pair(raw).unwrap();
        assert_eq!(anchors.begin, "START Hello");
        assert_eq!(anchors.end, "world END");
    }

    #[test]
    fn parses_fenced_json() {
        let raw = "Here you go:\n```json\n{\"BEGIN\": \"a\", \"END\": \"b\"}\n```\n";
        let anchors = parse_anchor_pair(raw).unwrap();
        assert_eq!(anchors.begin, "a");
        assert_eq!(anchors.end, "b");
    }

    #[test]
    fn parses_object_embedded_in_prose() {
        let raw = "The boundaries are {\"BEGIN\": \"x\", \"END\": \"y\"} as requested.";
        let anchors = parse_anchor_pair(raw).unwrap();
        assert_eq!(anchors.begin, "x");
        assert_eq!(anchors.end, "y");
    }

    #[test]
    fn missing_key_is_an_oracle_error() {
        let raw = r#"{"BEGIN": "only a start"}"#;
        let err = parse_anchor_pair(raw).unwrap_err();
        assert!(matches!(err, PithError::Oracle(_)));
    }

    #[test]
    fn non_json_is_an_oracle_error() {
        let err = parse_anchor_pair("I could not find any content.").unwrap_err();
        assert!(matches!(err, PithError::Oracle(_)));
    }

    #[test]
    fn anchor_values_are_taken_verbatim() {
        // No trimming or case folding of anchor values.
        let raw = r#"{"BEGIN": "  Spaced  ", "END": "MiXeD Case"}"#;
        let anchors = parse_anchor_pair(raw).unwrap();
        assert_eq!(anchors.begin, "  Spaced  ");
        assert_eq!(anchors.end, "MiXeD Case");
    }
}
