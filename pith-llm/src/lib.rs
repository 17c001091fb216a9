//! LLM integration for pith.
//!
//! This crate exposes a common [`traits::LlmClient`] interface, an OpenAI
//! chat-completions implementation, and the [`boundary`] module: the
//! [`boundary::BoundaryOracle`] capability that asks a model where a page's
//! main content begins and ends.
//!
//! # Examples
//! ```no_run
//! use pith_llm::boundary::{BoundaryOracle, LlmBoundaryOracle};
//! use pith_llm::openai::OpenAiClient;
//! use std::sync::Arc;
//!
//! # #[tokio::main]
//! # async fn main() -> pith_common::Result<()> {
//! let client = OpenAiClient::new("sk-...".into(), "gpt-4o-mini".into())
//!     .map_err(|e| pith_common::PithError::Config(e.to_string()))?
//!     .with_json_mode();
//! let oracle = LlmBoundaryOracle::new(Arc::new(client));
//! let anchors = oracle.identify_boundaries("Header Real content here Footer").await?;
//! println!("{} .. {}", anchors.begin, anchors.end);
//! # Ok(())
//! # }
//! ```

pub mod boundary;
pub mod openai;
pub mod traits;

/// Default model recommendation. The larger models are significantly more
/// expensive and in testing haven't been necessary for boundary finding.
pub const DEFAULT_OPENAI_MODEL: &str = "gpt-4o-mini";
