use std::any::Any;
use std::sync::Arc;

use sift_registry::{Command, CommandContext, Environment, HandlerError};

use crate::host::ErrorReporter;

/// Result of running one handler. Never an error: failures are contained here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dispatch {
	/// The handler returned `Ok`.
	Completed,
	/// The handler returned an error or panicked; it has already been reported.
	Failed(HandlerError),
}

impl Dispatch {
	pub fn is_completed(&self) -> bool {
		matches!(self, Self::Completed)
	}
}

/// Invokes resolved handlers and isolates their failures from the engine.
///
/// One call runs exactly one handler: no retries, no queuing. Calls do not
/// serialize against each other.
pub struct Dispatcher {
	reporter: Arc<dyn ErrorReporter>,
	environment: Environment,
}

impl Dispatcher {
	pub fn new(reporter: Arc<dyn ErrorReporter>, environment: Environment) -> Self {
		Self { reporter, environment }
	}

	pub fn environment(&self) -> &Environment {
		&self.environment
	}

	/// Runs `command` with `args`, reporting any failure.
	///
	/// The handler runs on its own task so a panic surfaces as
	/// [`HandlerError::Panicked`] instead of unwinding through the caller.
	pub async fn dispatch(&self, command: &Command, args: Vec<String>, original_input: &str) -> Dispatch {
		let name = command.name().to_string();
		let ctx = CommandContext {
			command: name.clone(),
			args,
			original_input: original_input.to_string(),
			environment: self.environment.clone(),
		};
		let handler = command.handler();

		tracing::debug!(command = %name, args = ?ctx.args, "dispatching");
		let result = match tokio::spawn(async move { handler.invoke(ctx).await }).await {
			Ok(result) => result,
			Err(err) if err.is_panic() => Err(HandlerError::Panicked(panic_message(err.into_panic()))),
			Err(err) => Err(HandlerError::Failed(err.to_string())),
		};

		match result {
			Ok(()) => Dispatch::Completed,
			Err(err) => {
				tracing::warn!(command = %name, error = %err, "command failed");
				self.reporter.report_error(&format!("{name}: {err}"));
				Dispatch::Failed(err)
			}
		}
	}
}

fn panic_message(payload: Box<dyn Any + Send>) -> String {
	payload
		.downcast_ref::<&str>()
		.map(|s| s.to_string())
		.or_else(|| payload.downcast_ref::<String>().cloned())
		.unwrap_or_else(|| "unknown panic payload".to_string())
}

#[cfg(test)]
mod tests {
	use std::sync::Arc;

	use pretty_assertions::assert_eq;
	use sift_registry::{Command, Environment, HandlerError, handler_fn};

	use super::{Dispatch, Dispatcher};
	use crate::host::MessageLog;

	fn dispatcher(log: &Arc<MessageLog>) -> Dispatcher {
		Dispatcher::new(log.clone(), Environment::default().with_var("user", "test"))
	}

	#[tokio::test]
	async fn completed_handler_reports_nothing() {
		let log = Arc::new(MessageLog::new());
		let cmd = Command::new(
			"whoami",
			handler_fn(|ctx| async move {
				assert_eq!(ctx.environment.var("user"), Some("test"));
				assert_eq!(ctx.original_input, "/whoami now");
				assert_eq!(ctx.args, ["now"]);
				Ok(())
			}),
		);
		let out = dispatcher(&log).dispatch(&cmd, vec!["now".into()], "/whoami now").await;
		assert_eq!(out, Dispatch::Completed);
		assert!(log.is_empty());
	}

	#[tokio::test]
	async fn handler_error_is_reported_not_propagated() {
		let log = Arc::new(MessageLog::new());
		let cmd = Command::new(
			"push",
			handler_fn(|_ctx| async { Err(HandlerError::Failed("remote rejected".into())) }),
		);
		let out = dispatcher(&log).dispatch(&cmd, Vec::new(), "push").await;
		assert_eq!(out, Dispatch::Failed(HandlerError::Failed("remote rejected".into())));
		assert_eq!(log.drain(), ["push: remote rejected"]);
	}

	#[tokio::test]
	async fn handler_panic_is_contained() {
		let log = Arc::new(MessageLog::new());
		let cmd = Command::new(
			"boom",
			handler_fn(|_ctx| async {
				if true {
					panic!("kaboom");
				}
				Ok(())
			}),
		);
		let out = dispatcher(&log).dispatch(&cmd, Vec::new(), "boom").await;
		assert_eq!(out, Dispatch::Failed(HandlerError::Panicked("kaboom".into())));
		assert_eq!(log.len(), 1);
	}
}
