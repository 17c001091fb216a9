//! Page text acquisition.
//!
//! [`HttpTextFetcher`] pulls a page over HTTP and flattens the HTML into a
//! single whitespace-normalised text blob. The flattener is a deliberately
//! light tag scanner: it drops tags and comments, decodes the handful of
//! entities that show up everywhere, and collapses runs of whitespace to
//! single spaces. It keeps script/style text, mirroring a plain
//! all-text-nodes flatten; the oracle's anchors are what separate content
//! from the noise.

use async_trait::async_trait;
use pith_common::{PithError, Result};
use pith_http::HttpClient;
use url::Url;

/// Capability interface for page retrieval, so orchestration can be tested
/// without a network.
#[async_trait]
pub trait TextFetcher: Send + Sync {
    /// Fetch a page and return its flattened text. Fails with
    /// [`PithError::Fetch`] on transport errors or non-success status.
    async fn fetch(&self, url: &Url) -> Result<String>;
}

/// [`TextFetcher`] over [`pith_http::HttpClient`].
pub struct HttpTextFetcher {
    client: HttpClient,
}

impl HttpTextFetcher {
    pub fn new() -> Result<Self> {
        // The base is unused for absolute-URL GETs; any valid URL anchors it.
        let client = HttpClient::new("http://localhost/")
            .map_err(|e| PithError::Config(format!("HttpClient init failed: {e}")))?;
        Ok(Self { client })
    }
}

#[async_trait]
impl TextFetcher for HttpTextFetcher {
    async fn fetch(&self, url: &Url) -> Result<String> {
        let html = self
            .client
            .get_text(url.as_str())
            .await
            .map_err(|e| PithError::Fetch(format!("{e}")))?;

        let text = text_from_html(&html);
        tracing::debug!(url = %url, html_len = html.len(), text_len = text.len(), "fetch.flattened");
        Ok(text)
    }
}

/// Flatten HTML to whitespace-normalised text.
pub fn text_from_html(html: &str) -> String {
    let mut out = String::with_capacity(html.len() / 4);
    let mut rest = html;

    while let Some(lt) = rest.find('<') {
        out.push_str(&rest[..lt]);
        let tail = &rest[lt..];
        let consumed = if tail.starts_with("<!--") {
            // Comments may contain '>' freely; skip to the closing marker.
            match tail.find("-->") {
                Some(close) => close + 3,
                None => tail.len(),
            }
        } else {
            match tail.find('>') {
                Some(close) => close + 1,
                None => tail.len(),
            }
        };
        // A space where the tag was, so adjacent text nodes don't fuse.
        out.push(' ');
        rest = &tail[consumed..];
    }
    out.push_str(rest);

    let decoded = decode_entities(&out);
    decoded.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Decode the common named entities; anything exotic passes through as-is.
fn decode_entities(text: &str) -> String {
    text.replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}
