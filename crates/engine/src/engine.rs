use std::sync::Arc;

use sift_matcher::{Decomposer, Hangul};
use sift_registry::{CommandRegistry, Environment};

use crate::config::{ConfigError, EngineConfig};
use crate::dispatch::Dispatcher;
use crate::host::{Confirm, ErrorReporter, NeverConfirm, TracingReporter};
use crate::input::ParsedInput;
use crate::outcome::ResolutionOutcome;
use crate::resolve::{self, Candidate, Resolution};
use crate::suggest::{Suggestion, SuggestionRanker};

/// Resolves submitted lines against a registry and runs the result.
///
/// Holds no per-input state: every call pins the current registry snapshot and
/// works from that alone, so one engine can serve concurrent callers.
pub struct Engine {
	registry: Arc<CommandRegistry>,
	config: EngineConfig,
	decomposer: Arc<dyn Decomposer>,
	confirm: Arc<dyn Confirm>,
	reporter: Arc<dyn ErrorReporter>,
	dispatcher: Dispatcher,
}

impl Engine {
	pub fn builder(registry: Arc<CommandRegistry>) -> EngineBuilder {
		EngineBuilder::new(registry)
	}

	pub fn registry(&self) -> &Arc<CommandRegistry> {
		&self.registry
	}

	pub fn config(&self) -> &EngineConfig {
		&self.config
	}

	/// Runs the fallback chain without executing anything.
	pub fn resolve(&self, raw: &str) -> Resolution {
		let snap = self.registry.snapshot();
		let input = ParsedInput::parse(raw, self.config.trigger);
		resolve::resolve(&snap, &input, &self.config, self.decomposer.as_ref())
	}

	/// Resolves `raw` and, if that yields a command, runs it.
	///
	/// A probable typo runs only after the [`Confirm`] capability approves it;
	/// on refusal the remaining close matches are offered instead. Unresolved
	/// input is reported through the [`ErrorReporter`]. Blank input is
	/// unresolved but not reported.
	pub async fn resolve_and_dispatch(&self, raw: &str) -> ResolutionOutcome {
		match self.resolve(raw) {
			Resolution::Empty => ResolutionOutcome::Unresolved { input: raw.to_string() },
			Resolution::Resolved { command, args, tier } => {
				tracing::debug!(command = command.name(), %tier, "resolved");
				let dispatch = self.dispatcher.dispatch(&command, args, raw).await;
				ResolutionOutcome::Executed {
					command: command.name().to_string(),
					dispatch,
				}
			}
			Resolution::Typo {
				original,
				candidate,
				args,
				alternatives,
			} => {
				let prompt = format!("Unknown command '{original}'. Did you mean '{}'?", candidate.name());
				if self.confirm.confirm(&prompt).await {
					tracing::info!(typed = %original, chosen = candidate.name(), "running corrected command");
					let dispatch = self.dispatcher.dispatch(&candidate.command, args, raw).await;
					return ResolutionOutcome::CorrectedAndExecuted {
						original_token: original,
						chosen_command: candidate.name().to_string(),
						dispatch,
					};
				}
				tracing::debug!(typed = %original, refused = candidate.name(), "correction refused");
				if alternatives.is_empty() {
					return self.unresolved(raw, &original);
				}
				offered(original, alternatives)
			}
			Resolution::Suggest { original, candidates } => offered(original, candidates),
			Resolution::Unresolved { original } => self.unresolved(raw, &original),
		}
	}

	/// Live autocomplete rows for a partially typed line.
	pub fn get_suggestions(&self, partial: &str) -> Vec<Suggestion> {
		let snap = self.registry.snapshot();
		SuggestionRanker::new(&snap, self.config.trigger, self.config.suggestion_limit).suggest(partial)
	}

	fn unresolved(&self, raw: &str, token: &str) -> ResolutionOutcome {
		tracing::debug!(input = raw, "unresolved");
		self.reporter.report_error(&format!("unknown command: {token}"));
		ResolutionOutcome::Unresolved { input: raw.to_string() }
	}
}

fn offered(original: String, candidates: Vec<Candidate>) -> ResolutionOutcome {
	ResolutionOutcome::SuggestionsOffered {
		original_token: original,
		candidates: candidates.iter().map(|c| c.name().to_string()).collect(),
	}
}

/// Wires host capabilities into an [`Engine`].
///
/// Defaults: [`EngineConfig::default`], Hangul decomposition, [`NeverConfirm`],
/// [`TracingReporter`], an empty [`Environment`].
pub struct EngineBuilder {
	registry: Arc<CommandRegistry>,
	config: EngineConfig,
	decomposer: Arc<dyn Decomposer>,
	confirm: Arc<dyn Confirm>,
	reporter: Arc<dyn ErrorReporter>,
	environment: Environment,
}

impl EngineBuilder {
	pub fn new(registry: Arc<CommandRegistry>) -> Self {
		Self {
			registry,
			config: EngineConfig::default(),
			decomposer: Arc::new(Hangul),
			confirm: Arc::new(NeverConfirm),
			reporter: Arc::new(TracingReporter),
			environment: Environment::default(),
		}
	}

	pub fn config(mut self, config: EngineConfig) -> Self {
		self.config = config;
		self
	}

	pub fn decomposer(mut self, decomposer: Arc<dyn Decomposer>) -> Self {
		self.decomposer = decomposer;
		self
	}

	pub fn confirm(mut self, confirm: Arc<dyn Confirm>) -> Self {
		self.confirm = confirm;
		self
	}

	pub fn reporter(mut self, reporter: Arc<dyn ErrorReporter>) -> Self {
		self.reporter = reporter;
		self
	}

	/// Environment handed to every handler.
	pub fn environment(mut self, environment: Environment) -> Self {
		self.environment = environment;
		self
	}

	/// Fails if the configuration is out of range.
	pub fn build(self) -> Result<Engine, ConfigError> {
		self.config.validate()?;
		let dangling = self.registry.dangling_intents();
		if !dangling.is_empty() {
			tracing::debug!(
				count = dangling.len(),
				first = %dangling[0].target(),
				"intent phrases point at unregistered commands"
			);
		}
		Ok(Engine {
			dispatcher: Dispatcher::new(self.reporter.clone(), self.environment),
			registry: self.registry,
			config: self.config,
			decomposer: self.decomposer,
			confirm: self.confirm,
			reporter: self.reporter,
		})
	}
}

#[cfg(test)]
mod tests;
