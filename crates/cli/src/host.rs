//! Terminal implementations of the engine's host capabilities.

use std::io::{self, BufRead, Write};

use async_trait::async_trait;
use sift_engine::{Confirm, ErrorReporter};

/// Asks on stderr and reads a y/n answer from stdin.
///
/// Anything other than an explicit yes counts as a refusal, including EOF.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdinConfirm;

#[async_trait]
impl Confirm for StdinConfirm {
	async fn confirm(&self, prompt: &str) -> bool {
		eprint!("{prompt} [y/N] ");
		let _ = io::stderr().flush();
		match read_line().await {
			Ok(Some(answer)) => is_yes(&answer),
			Ok(None) => false,
			Err(err) => {
				tracing::warn!(error = %err, "failed to read confirmation");
				false
			}
		}
	}
}

/// Prints reports to stderr.
#[derive(Debug, Clone, Copy, Default)]
pub struct StderrReporter;

impl ErrorReporter for StderrReporter {
	fn report_error(&self, message: &str) {
		eprintln!("error: {message}");
	}
}

/// Reads one line from stdin off the async runtime. `None` on EOF.
pub async fn read_line() -> io::Result<Option<String>> {
	tokio::task::spawn_blocking(|| {
		let mut line = String::new();
		let n = io::stdin().lock().read_line(&mut line)?;
		Ok((n > 0).then_some(line))
	})
	.await
	.map_err(io::Error::other)?
}

pub(crate) fn is_yes(answer: &str) -> bool {
	matches!(answer.trim().to_lowercase().as_str(), "y" | "yes" | "예" | "네" | "응")
}

#[cfg(test)]
mod tests {
	use super::is_yes;

	#[test]
	fn only_explicit_yes_confirms() {
		for yes in ["y", "Y\n", " yes ", "네"] {
			assert!(is_yes(yes), "{yes:?}");
		}
		for no in ["", "n", "no", "yep", "\n"] {
			assert!(!is_yes(no), "{no:?}");
		}
	}
}
