//! Scrape orchestration: fetch once, ask the oracle once, slice.

use std::sync::Arc;

use pith_common::Result;
use pith_llm::boundary::BoundaryOracle;
use url::Url;

use crate::extract::extract_content;
use crate::fetch::TextFetcher;

pub const DEFAULT_MAX_RETRIES: usize = 3;

/// Coordinates fetcher, oracle, and extractor for a single URL.
///
/// Each call is independent and stateless; the page text and anchor pair
/// are fixed for the lifetime of one `scrape` call.
pub struct Scraper {
    fetcher: Arc<dyn TextFetcher>,
    oracle: Arc<dyn BoundaryOracle>,
    max_retries: usize,
}

impl Scraper {
    pub fn new(fetcher: Arc<dyn TextFetcher>, oracle: Arc<dyn BoundaryOracle>) -> Self {
        Self {
            fetcher,
            oracle,
            max_retries: DEFAULT_MAX_RETRIES,
        }
    }

    /// Override the extraction attempt budget (`n` retries after the first
    /// attempt). Zero disables retries; the first attempt always runs.
    pub fn with_max_retries(mut self, n: usize) -> Self {
        self.max_retries = n;
        self
    }

    /// Scrape one URL and return its main content, or `None` when no
    /// matching span exists after the attempt budget.
    ///
    /// Fetch and oracle failures propagate unchanged; neither is retried
    /// here. Only extraction gets the bounded attempt loop, and since
    /// extraction is a pure function of the fixed text and anchors, the
    /// extra attempts cannot change the outcome. The budget is kept so a
    /// non-deterministic extractor or per-attempt oracle could be slotted
    /// in without changing this contract.
    pub async fn scrape(&self, url: &Url) -> Result<Option<String>> {
        let text = self.fetcher.fetch(url).await?;
        tracing::info!(url = %url, text_len = text.len(), "scrape.fetched");

        let anchors = self.oracle.identify_boundaries(&text).await?;

        let mut content = None;
        let mut attempts_left = self.max_retries.saturating_add(1);
        while content.is_none() && attempts_left > 0 {
            content = extract_content(&text, &anchors.begin, &anchors.end);
            attempts_left -= 1;
        }

        match &content {
            Some(span) => {
                tracing::info!(url = %url, content_len = span.len(), "scrape.extracted")
            }
            None => tracing::warn!(
                url = %url,
                begin = %anchors.begin,
                end = %anchors.end,
                "scrape.no_content"
            ),
        }
        Ok(content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use pith_common::PithError;
    use pith_llm::boundary::AnchorPair;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct FixedFetcher(&'static str);

    #[async_trait]
    impl TextFetcher for FixedFetcher {
        async fn fetch(&self, _url: &Url) -> Result<String> {
            Ok(self.0.to_string())
        }
    }

    struct FailingFetcher;

    #[async_trait]
    impl TextFetcher for FailingFetcher {
        async fn fetch(&self, _url: &Url) -> Result<String> {
            Err(PithError::Fetch("connection refused".into()))
        }
    }

    struct FixedOracle {
        anchors: AnchorPair,
        calls: AtomicUsize,
    }

    impl FixedOracle {
        fn new(begin: &str, end: &str) -> Self {
            Self {
                anchors: AnchorPair {
                    begin: begin.to_string(),
                    end: end.to_string(),
                },
                calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl BoundaryOracle for FixedOracle {
        async fn identify_boundaries(&self, _text: &str) -> Result<AnchorPair> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.anchors.clone())
        }
    }

    fn url() -> Url {
        Url::parse("https://example.com/article").unwrap()
    }

    #[tokio::test]
    async fn returns_span_between_matching_anchors() {
        let fetcher = Arc::new(FixedFetcher(
            "Header menu Home About START Hello world END Footer copyright",
        ));
        let oracle = Arc::new(FixedOracle::new("START Hello", "world END"));
        let scraper = Scraper::new(fetcher, oracle.clone());

        let got = scraper.scrape(&url()).await.unwrap();
        assert_eq!(got.as_deref(), Some("START Hello world END"));
        // The oracle is consulted exactly once per scrape.
        assert_eq!(oracle.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn unmatchable_begin_exhausts_budget_and_returns_none() {
        let fetcher = Arc::new(FixedFetcher("A B C"));
        let oracle = Arc::new(FixedOracle::new("Z", "C"));
        let scraper = Scraper::new(fetcher, oracle.clone()).with_max_retries(3);

        let got = scraper.scrape(&url()).await.unwrap();
        assert_eq!(got, None);
        // Retries never re-query the oracle.
        assert_eq!(oracle.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn zero_retries_still_attempts_extraction_once() {
        let fetcher = Arc::new(FixedFetcher("A B C D E"));
        let oracle = Arc::new(FixedOracle::new("C", "Z"));
        let scraper = Scraper::new(fetcher, oracle).with_max_retries(0);

        let got = scraper.scrape(&url()).await.unwrap();
        assert_eq!(got.as_deref(), Some("C D E"));
    }

    #[tokio::test]
    async fn huge_retry_budget_does_not_overflow_the_attempt_count() {
        let fetcher = Arc::new(FixedFetcher("A B C D E"));
        let oracle = Arc::new(FixedOracle::new("B", "D"));
        let scraper = Scraper::new(fetcher, oracle).with_max_retries(usize::MAX);

        let got = scraper.scrape(&url()).await.unwrap();
        assert_eq!(got.as_deref(), Some("B C D"));
    }

    #[tokio::test]
    async fn fetch_error_propagates_and_oracle_is_never_queried() {
        let oracle = Arc::new(FixedOracle::new("a", "b"));
        let scraper = Scraper::new(Arc::new(FailingFetcher), oracle.clone());

        let err = scraper.scrape(&url()).await.unwrap_err();
        assert!(matches!(err, PithError::Fetch(_)));
        assert_eq!(oracle.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn oracle_error_propagates_unchanged() {
        struct BrokenOracle;

        #[async_trait]
        impl BoundaryOracle for BrokenOracle {
            async fn identify_boundaries(&self, _text: &str) -> Result<AnchorPair> {
                Err(PithError::Oracle("missing key BEGIN".into()))
            }
        }

        let scraper = Scraper::new(Arc::new(FixedFetcher("text")), Arc::new(BrokenOracle));
        let err = scraper.scrape(&url()).await.unwrap_err();
        assert!(matches!(err, PithError::Oracle(_)));
    }
}
