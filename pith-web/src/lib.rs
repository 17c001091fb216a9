//! Page acquisition and content extraction.
//!
//! - Text fetching over HTTP with naive HTML flattening (`fetch`)
//! - Anchor-based content slicing, the deterministic core (`extract`)
//! - The scrape orchestrator tying fetcher, oracle, and extractor
//!   together (`scrape`)

pub mod extract;
pub mod fetch;
pub mod scrape;
