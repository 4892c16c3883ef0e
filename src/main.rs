//! readme-posts — keep a README's "latest posts" section in sync with an RSS
//! feed.
//!
//! ## Architecture overview
//!
//! ```text
//! ┌──────────┐ bytes ┌──────────┐ posts ┌──────────┐ body ┌──────────┐
//! │ source/  │ ────► │ source/  │ ────► │ render   │ ───► │ readme   │
//! │ http.rs  │       │ rss.rs   │       │          │      │ (splice) │
//! └──────────┘       └──────────┘       └──────────┘      └──────────┘
//! ```
//!
//! * **`config`** — flags / environment variables, read once.
//! * **`source/`** — the `FeedSource` trait, the HTTP fetcher, and the RSS
//!   parser that produces sorted, truncated `Post`s.
//! * **`render`** — posts to a markdown bullet list.
//! * **`readme`** — markers: create the section if missing, replace its body.
//! * **`update`** — runs the steps above once and reports what happened.
//! * **`main`** — logging, error reporting, exit code.

mod config;
mod error;
mod readme;
mod render;
mod source;
mod update;

use std::process::ExitCode;

use clap::error::ErrorKind;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use config::Config;
use source::{FeedSource, HttpSource};
use update::Report;

fn main() -> ExitCode {
    // stdout carries the status line only; logs go to stderr.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let config = match Config::try_parse() {
        Ok(config) => config,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => e.exit(),
        Err(e) => return Conclusion::from_config_error(&e).emit(),
    };

    Conclusion::from_run(run(&config)).emit()
}

fn run(config: &Config) -> anyhow::Result<String> {
    let source = HttpSource::new(&config.feed_url)?;
    let outcome = update::run(config, &source)?;

    Ok(Report {
        outcome: &outcome,
        config,
        feed_url: source.url(),
    }
    .to_string())
}

// ---------------------------------------------------------------------------
// Reporting — one line out, one exit code
// ---------------------------------------------------------------------------

/// The line a run ends with and where it goes.
#[derive(Debug, PartialEq, Eq)]
enum Conclusion {
    /// Status line for stdout, exit 0.
    Success(String),
    /// `Error: …` line for stderr, exit 1.
    Failure(String),
}

impl Conclusion {
    fn from_run(result: anyhow::Result<String>) -> Self {
        match result {
            Ok(line) => Self::Success(line),
            Err(e) => {
                tracing::debug!(error = ?e, "run failed");
                Self::Failure(format!("Error: {e:#}"))
            }
        }
    }

    /// Only the first line of clap's message; the usage block and the
    /// `--help` hint are dropped.
    fn from_config_error(e: &clap::Error) -> Self {
        let rendered = e.render().to_string();
        let first = rendered.lines().next().unwrap_or_default();
        Self::Failure(format!("Error: {}", first.trim_start_matches("error: ").trim_end()))
    }

    fn code(&self) -> u8 {
        match self {
            Self::Success(_) => 0,
            Self::Failure(_) => 1,
        }
    }

    fn emit(self) -> ExitCode {
        let code = ExitCode::from(self.code());
        match self {
            Self::Success(line) => println!("{line}"),
            Self::Failure(line) => eprintln!("{line}"),
        }
        code
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
