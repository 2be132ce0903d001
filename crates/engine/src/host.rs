//! Capabilities the host injects into the engine.

use async_trait::async_trait;
use parking_lot::Mutex;

/// Asks the user to approve an auto-corrected command before it runs.
#[async_trait]
pub trait Confirm: Send + Sync {
	/// Returns true if the user accepts `prompt`.
	async fn confirm(&self, prompt: &str) -> bool;
}

/// Surfaces errors to the user.
pub trait ErrorReporter: Send + Sync {
	fn report_error(&self, message: &str);
}

/// Accepts every correction.
#[derive(Debug, Clone, Copy, Default)]
pub struct AlwaysConfirm;

#[async_trait]
impl Confirm for AlwaysConfirm {
	async fn confirm(&self, _prompt: &str) -> bool {
		true
	}
}

/// Refuses every correction; typos are only ever offered as suggestions.
#[derive(Debug, Clone, Copy, Default)]
pub struct NeverConfirm;

#[async_trait]
impl Confirm for NeverConfirm {
	async fn confirm(&self, _prompt: &str) -> bool {
		false
	}
}

/// Routes reports to the `tracing` subscriber at `error` level.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingReporter;

impl ErrorReporter for TracingReporter {
	fn report_error(&self, message: &str) {
		tracing::error!(target: "sift::report", "{message}");
	}
}

/// Collects reports in memory, for hosts that render them in batches.
#[derive(Debug, Default)]
pub struct MessageLog {
	messages: Mutex<Vec<String>>,
}

impl MessageLog {
	pub fn new() -> Self {
		Self::default()
	}

	/// Removes and returns every collected message.
	pub fn drain(&self) -> Vec<String> {
		std::mem::take(&mut *self.messages.lock())
	}

	pub fn len(&self) -> usize {
		self.messages.lock().len()
	}

	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}
}

impl ErrorReporter for MessageLog {
	fn report_error(&self, message: &str) {
		self.messages.lock().push(message.to_string());
	}
}
