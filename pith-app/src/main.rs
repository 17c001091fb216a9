//! `pith` — fetch a page, ask a model where the content starts and ends,
//! print the slice in between.
//!
//! Exit codes: 0 on success, 1 when the URL argument is missing, 2 when no
//! content span could be extracted. Fetch and oracle failures propagate out
//! of `main` as errors.

use std::io::Write;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Result;
use clap::{CommandFactory, Parser};
use pith_common::observability::{init_logging, LogConfig};
use pith_common::PithError;
use pith_llm::boundary::LlmBoundaryOracle;
use pith_llm::openai::{OpenAiClient, OPENAI_API_BASE};
use pith_llm::DEFAULT_OPENAI_MODEL;
use pith_web::fetch::HttpTextFetcher;
use pith_web::scrape::{Scraper, DEFAULT_MAX_RETRIES};
use url::Url;

const EXIT_USAGE: u8 = 1;
const EXIT_NO_CONTENT: u8 = 2;

#[derive(Parser, Debug)]
#[command(name = "pith", about = "Extract the main content of a web page")]
struct Cli {
    /// URL of the page to scrape
    url: Option<String>,

    /// OpenAI API key
    #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// Model used for boundary identification
    #[arg(long, env = "PITH_MODEL", default_value = DEFAULT_OPENAI_MODEL)]
    model: String,

    /// OpenAI-compatible endpoint to talk to (gateways, proxies)
    #[arg(long, env = "PITH_API_BASE", default_value = OPENAI_API_BASE)]
    api_base: String,

    /// Extraction retries after the first attempt
    #[arg(long, default_value_t = DEFAULT_MAX_RETRIES)]
    max_retries: usize,
}

/// Map a scrape outcome to the process exit code, writing the content or
/// the failure message to the given sinks.
fn report_outcome(
    outcome: Option<String>,
    url: &Url,
    stdout: &mut impl Write,
    stderr: &mut impl Write,
) -> std::io::Result<u8> {
    match outcome {
        Some(content) => {
            writeln!(stdout, "{content}")?;
            Ok(0)
        }
        None => {
            writeln!(stderr, "Failed to extract content url: {url}")?;
            Ok(EXIT_NO_CONTENT)
        }
    }
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    init_logging(LogConfig::default())?;

    let Some(raw_url) = cli.url else {
        let mut cmd = Cli::command();
        cmd.print_help()?;
        return Ok(ExitCode::from(EXIT_USAGE));
    };
    let url = Url::parse(&raw_url)?;
    let api_key = cli
        .api_key
        .ok_or(PithError::Config("OPENAI_API_KEY is not set".into()))?;

    let fetcher = Arc::new(HttpTextFetcher::new()?);
    let client = OpenAiClient::with_base(&cli.api_base, api_key, cli.model)?.with_json_mode();
    let oracle = Arc::new(LlmBoundaryOracle::new(Arc::new(client)));

    let scraper = Scraper::new(fetcher, oracle).with_max_retries(cli.max_retries);

    let outcome = scraper.scrape(&url).await?;
    let code = report_outcome(
        outcome,
        &url,
        &mut std::io::stdout(),
        &mut std::io::stderr(),
    )?;
    Ok(ExitCode::from(code))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn url() -> Url {
        Url::parse("https://example.com/article").unwrap()
    }

    #[test]
    fn success_prints_content_to_stdout_and_exits_0() {
        let mut out = Vec::new();
        let mut err = Vec::new();
        let code =
            report_outcome(Some("the content".into()), &url(), &mut out, &mut err).unwrap();

        assert_eq!(code, 0);
        assert_eq!(String::from_utf8(out).unwrap(), "the content\n");
        assert!(err.is_empty());
    }

    #[test]
    fn absence_names_the_url_and_exits_2() {
        let mut out = Vec::new();
        let mut err = Vec::new();
        let code = report_outcome(None, &url(), &mut out, &mut err).unwrap();

        assert_eq!(code, EXIT_NO_CONTENT);
        assert!(out.is_empty());
        let msg = String::from_utf8(err).unwrap();
        assert_eq!(
            msg,
            "Failed to extract content url: https://example.com/article\n"
        );
    }
}
