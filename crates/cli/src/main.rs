//! `sift`: an interactive prompt over the sift command resolution engine.
//!
//! Lines may name a command exactly (`/git status`), misspell it (`/gti
//! status`, corrected after confirmation) or describe it in Korean (`깃 상태`).

mod cli;
mod commands;
mod host;

use std::io::Write;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use cli::{Cli, Command};
use commands::Session;
use host::{StderrReporter, StdinConfirm};
use sift_engine::{AlwaysConfirm, Confirm, Engine, EngineConfig, Resolution, ResolutionOutcome};
use sift_registry::{BUILTIN_INTENTS, CommandRegistry, Environment};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
	let cli = Cli::parse();
	setup_tracing(cli.verbose);

	let config = match &cli.config {
		Some(path) => EngineConfig::load(path).with_context(|| format!("loading config {}", path.display()))?,
		None => EngineConfig::default(),
	};

	let registry = Arc::new(CommandRegistry::new());
	let session = Session::new();
	commands::register_builtin(&registry, &session)?;
	if !cli.no_builtin_intents {
		registry.load_intents_toml(BUILTIN_INTENTS).context("loading built-in intents")?;
	}
	for path in &cli.intents {
		let added = registry
			.load_intents_file(path)
			.with_context(|| format!("loading intents {}", path.display()))?;
		info!(path = %path.display(), added, "loaded intent table");
	}

	let confirm: Arc<dyn Confirm> = if cli.yes {
		Arc::new(AlwaysConfirm)
	} else {
		Arc::new(StdinConfirm)
	};
	let engine = Engine::builder(registry.clone())
		.config(config)
		.confirm(confirm)
		.reporter(Arc::new(StderrReporter))
		.environment(Environment::from_process())
		.build()?;

	match cli.command.unwrap_or(Command::Repl) {
		Command::Repl => repl(&engine, &session).await?,
		Command::Run { line } => {
			let outcome = engine.resolve_and_dispatch(&line.join(" ")).await;
			if let Some(text) = render(&outcome) {
				println!("{text}");
			}
			if outcome.executed_command().is_none() {
				std::process::exit(1);
			}
		}
		Command::Explain { line } => println!("{}", describe(&engine.resolve(&line.join(" ")))),
		Command::Suggest { partial } => {
			for row in engine.get_suggestions(&partial) {
				println!("{}\t{}\t{}", row.insert_text, row.category, row.description);
			}
		}
		Command::Check => {
			let dangling = registry.dangling_intents();
			for entry in &dangling {
				println!("{}\t-> {} (not registered)", entry.phrase(), entry.target());
			}
			if !dangling.is_empty() {
				std::process::exit(1);
			}
		}
	}
	Ok(())
}

async fn repl(engine: &Engine, session: &Session) -> anyhow::Result<()> {
	let trigger = engine.config().trigger.map(String::from).unwrap_or_default();
	loop {
		print!("{trigger}> ");
		std::io::stdout().flush()?;
		let Some(line) = host::read_line().await? else {
			break;
		};
		session.record(&line);

		let outcome = engine.resolve_and_dispatch(&line).await;
		if let Some(text) = render(&outcome) {
			println!("{text}");
		}
		if outcome.executed_command() == Some("quit") {
			break;
		}
	}
	Ok(())
}

/// User-facing text for outcomes the handler did not already print.
fn render(outcome: &ResolutionOutcome) -> Option<String> {
	match outcome {
		ResolutionOutcome::SuggestionsOffered {
			original_token,
			candidates,
		} => Some(format!("'{original_token}' is not a command. Did you mean: {}?", candidates.join(", "))),
		_ => None,
	}
}

/// One-line summary of what a line would do.
fn describe(resolution: &Resolution) -> String {
	match resolution {
		Resolution::Resolved { command, args, tier } if args.is_empty() => format!("{} ({tier})", command.name()),
		Resolution::Resolved { command, args, tier } => format!("{} {} ({tier})", command.name(), args.join(" ")),
		Resolution::Typo { original, candidate, .. } => {
			format!("{original} -> {} (typo, distance {}, needs confirmation)", candidate.name(), candidate.distance)
		}
		Resolution::Suggest { original, candidates } => {
			let names: Vec<_> = candidates.iter().map(|c| c.name()).collect();
			format!("{original}: suggestions {}", names.join(", "))
		}
		Resolution::Unresolved { original } => format!("{original}: unresolved"),
		Resolution::Empty => "empty input".to_string(),
	}
}

fn setup_tracing(verbose: bool) {
	use tracing_subscriber::EnvFilter;

	let filter = EnvFilter::try_from_env("SIFT_LOG")
		.or_else(|_| EnvFilter::try_from_default_env())
		.unwrap_or_else(|_| {
			if verbose {
				EnvFilter::new("sift=debug,sift_engine=debug,sift_registry=debug,info")
			} else {
				EnvFilter::new("warn")
			}
		});

	tracing_subscriber::fmt()
		.with_env_filter(filter)
		.with_writer(std::io::stderr)
		.with_target(verbose)
		.init();
}
