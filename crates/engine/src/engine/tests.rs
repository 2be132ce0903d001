use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;
use pretty_assertions::assert_eq;
use sift_registry::{Command, CommandRegistry, Environment, HandlerError, handler_fn};

use super::Engine;
use crate::config::{ConfigError, EngineConfig};
use crate::dispatch::Dispatch;
use crate::host::{Confirm, MessageLog};
use crate::outcome::ResolutionOutcome;

/// Answers every prompt the same way and remembers what was asked.
struct Scripted {
	answer: bool,
	prompts: Mutex<Vec<String>>,
}

impl Scripted {
	fn new(answer: bool) -> Arc<Self> {
		Arc::new(Self {
			answer,
			prompts: Mutex::new(Vec::new()),
		})
	}

	fn prompts(&self) -> Vec<String> {
		self.prompts.lock().clone()
	}
}

#[async_trait]
impl Confirm for Scripted {
	async fn confirm(&self, prompt: &str) -> bool {
		self.prompts.lock().push(prompt.to_string());
		self.answer
	}
}

type Calls = Arc<Mutex<Vec<(String, Vec<String>)>>>;

fn recording(name: &str, calls: &Calls) -> Command {
	let calls = calls.clone();
	Command::new(
		name,
		handler_fn(move |ctx| {
			let calls = calls.clone();
			async move {
				calls.lock().push((ctx.command, ctx.args));
				Ok(())
			}
		}),
	)
}

struct Fixture {
	engine: Engine,
	calls: Calls,
	confirm: Arc<Scripted>,
	log: Arc<MessageLog>,
}

fn fixture(answer: bool) -> Fixture {
	let calls = Calls::default();
	let registry = Arc::new(CommandRegistry::new());
	registry
		.register_many([
			recording("git", &calls).with_aliases(["g"]),
			recording("help", &calls),
			recording("got", &calls),
			recording("cat", &calls),
			recording("car", &calls),
			Command::new(
				"fail",
				handler_fn(|_ctx| async { Err(HandlerError::MissingArgument("target")) }),
			),
		])
		.unwrap();
	registry.register_intents([("도움말", "help"), ("상태 확인", "git status")]).unwrap();

	let confirm = Scripted::new(answer);
	let log = Arc::new(MessageLog::new());
	let engine = Engine::builder(registry)
		.confirm(confirm.clone())
		.reporter(log.clone())
		.environment(Environment::default().with_var("SHELL", "sh"))
		.build()
		.unwrap();
	Fixture {
		engine,
		calls,
		confirm,
		log,
	}
}

fn calls(fx: &Fixture) -> Vec<(String, Vec<String>)> {
	fx.calls.lock().clone()
}

fn call(name: &str, args: &[&str]) -> (String, Vec<String>) {
	(name.to_string(), args.iter().map(|a| a.to_string()).collect())
}

#[tokio::test]
async fn exact_name_runs_without_confirmation() {
	let fx = fixture(true);
	let outcome = fx.engine.resolve_and_dispatch("/git status -s").await;
	assert_eq!(
		outcome,
		ResolutionOutcome::Executed {
			command: "git".into(),
			dispatch: Dispatch::Completed
		}
	);
	assert_eq!(calls(&fx), [call("git", &["status", "-s"])]);
	assert!(fx.confirm.prompts().is_empty());
	assert!(fx.log.is_empty());
}

#[tokio::test]
async fn confirmed_typo_runs_with_original_args() {
	let fx = fixture(true);
	let outcome = fx.engine.resolve_and_dispatch("/gti push origin").await;
	assert_eq!(
		outcome,
		ResolutionOutcome::CorrectedAndExecuted {
			original_token: "gti".into(),
			chosen_command: "git".into(),
			dispatch: Dispatch::Completed,
		}
	);
	assert_eq!(calls(&fx), [call("git", &["push", "origin"])]);
	let prompts = fx.confirm.prompts();
	assert_eq!(prompts.len(), 1);
	assert!(prompts[0].contains("'gti'") && prompts[0].contains("'git'"));
}

#[tokio::test]
async fn refused_typo_offers_remaining_candidates() {
	let fx = fixture(false);
	let outcome = fx.engine.resolve_and_dispatch("/gti").await;
	assert_eq!(
		outcome,
		ResolutionOutcome::SuggestionsOffered {
			original_token: "gti".into(),
			candidates: vec!["got".into()],
		}
	);
	assert!(calls(&fx).is_empty());
	assert!(fx.log.is_empty());
}

#[tokio::test]
async fn refused_typo_without_alternatives_is_unresolved() {
	let fx = fixture(false);
	let outcome = fx.engine.resolve_and_dispatch("/hlep").await;
	assert_eq!(outcome, ResolutionOutcome::Unresolved { input: "/hlep".into() });
	assert_eq!(fx.confirm.prompts().len(), 1);
	assert_eq!(fx.log.drain(), ["unknown command: hlep"]);
}

#[tokio::test]
async fn tied_typo_is_never_confirmed() {
	let fx = fixture(true);
	let outcome = fx.engine.resolve_and_dispatch("caz").await;
	assert_eq!(
		outcome,
		ResolutionOutcome::SuggestionsOffered {
			original_token: "caz".into(),
			candidates: vec!["car".into(), "cat".into()],
		}
	);
	assert!(fx.confirm.prompts().is_empty());
	assert!(calls(&fx).is_empty());
}

#[tokio::test]
async fn gibberish_reports_and_runs_nothing() {
	let fx = fixture(true);
	let outcome = fx.engine.resolve_and_dispatch("/qqqqzzzz now").await;
	assert_eq!(outcome.executed_command(), None);
	assert!(matches!(outcome, ResolutionOutcome::Unresolved { .. }));
	assert!(calls(&fx).is_empty());
	assert!(fx.confirm.prompts().is_empty());
	assert_eq!(fx.log.drain(), ["unknown command: qqqqzzzz"]);
}

#[tokio::test]
async fn blank_input_is_silently_unresolved() {
	let fx = fixture(true);
	let outcome = fx.engine.resolve_and_dispatch("  / ").await;
	assert_eq!(outcome, ResolutionOutcome::Unresolved { input: "  / ".into() });
	assert!(fx.log.is_empty());
}

#[tokio::test]
async fn intent_phrases_run_their_target() {
	let fx = fixture(false);
	assert_eq!(
		fx.engine.resolve_and_dispatch("도움말").await.executed_command(),
		Some("help")
	);
	assert_eq!(
		fx.engine.resolve_and_dispatch("상태확인 좀").await.executed_command(),
		Some("git")
	);
	assert_eq!(calls(&fx), [call("help", &[]), call("git", &["status"])]);
}

#[tokio::test]
async fn handler_failure_is_contained_and_reported() {
	let fx = fixture(true);
	let outcome = fx.engine.resolve_and_dispatch("/fail").await;
	assert_eq!(
		outcome,
		ResolutionOutcome::Executed {
			command: "fail".into(),
			dispatch: Dispatch::Failed(HandlerError::MissingArgument("target")),
		}
	);
	assert_eq!(fx.log.drain(), ["fail: missing argument: target"]);
	// The engine keeps serving.
	assert!(fx.engine.resolve_and_dispatch("/help").await.executed_command().is_some());
}

#[test]
fn suggestions_follow_configured_trigger_and_limit() {
	let fx = fixture(true);
	let rows = fx.engine.get_suggestions("/ca");
	assert_eq!(rows.iter().map(|r| r.insert_text.as_str()).collect::<Vec<_>>(), ["/car", "/cat"]);

	let registry = fx.engine.registry().clone();
	let engine = Engine::builder(registry)
		.config(EngineConfig {
			trigger: None,
			suggestion_limit: 1,
			..EngineConfig::default()
		})
		.build()
		.unwrap();
	let rows = engine.get_suggestions("ca");
	assert_eq!(rows.len(), 1);
	assert_eq!(rows[0].insert_text, "car");
}

#[test]
fn builder_rejects_invalid_config() {
	let err = Engine::builder(Arc::new(CommandRegistry::new()))
		.config(EngineConfig {
			confirm_distance: 3,
			..EngineConfig::default()
		})
		.build()
		.err()
		.unwrap();
	assert!(matches!(err, ConfigError::Invalid(_)));
}

#[test]
fn resolve_alone_runs_nothing() {
	let fx = fixture(true);
	assert!(fx.engine.resolve("/git").resolved_command().is_some());
	assert!(fx.engine.resolve("gti").resolved_command().is_none());
	assert!(calls(&fx).is_empty());
	assert!(fx.confirm.prompts().is_empty());
}
