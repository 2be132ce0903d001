//! Commands the `sift` prompt ships with.

use std::collections::BTreeMap;
use std::sync::{Arc, Weak};

use parking_lot::Mutex;
use sift_registry::{Category, Command, CommandContext, CommandRegistry, HandlerError, RegistryError, handler_fn};

/// State the built-in commands share for one prompt session.
#[derive(Debug, Default)]
pub struct Session {
	history: Mutex<Vec<String>>,
	context: Mutex<BTreeMap<String, String>>,
	tickets: Mutex<Vec<String>>,
}

impl Session {
	pub fn new() -> Arc<Self> {
		Arc::new(Self::default())
	}

	/// Records a submitted line for `history`.
	pub fn record(&self, line: &str) {
		let line = line.trim();
		if !line.is_empty() {
			self.history.lock().push(line.to_string());
		}
	}

	pub fn history(&self) -> Vec<String> {
		self.history.lock().clone()
	}

	pub fn context_value(&self, key: &str) -> Option<String> {
		self.context.lock().get(key).cloned()
	}

	pub fn tickets(&self) -> Vec<String> {
		self.tickets.lock().clone()
	}
}

/// Registers every built-in command against `registry`.
pub fn register_builtin(registry: &Arc<CommandRegistry>, session: &Arc<Session>) -> Result<(), RegistryError> {
	let help = {
		let registry = Arc::downgrade(registry);
		Command::new("help", handler_fn(move |_ctx| {
			let registry = registry.clone();
			async move {
				println!("{}", help_text(&registry)?);
				Ok(())
			}
		}))
		.with_aliases(["h", "?"])
		.with_description("List available commands")
		.with_example("/help")
	};

	let history = {
		let session = session.clone();
		Command::new("history", handler_fn(move |_ctx| {
			let lines = session.history();
			async move {
				for (i, line) in lines.iter().enumerate() {
					println!("{:>4}  {line}", i + 1);
				}
				Ok(())
			}
		}))
		.with_aliases(["hist"])
		.with_description("Show lines entered this session")
	};

	let ctx = {
		let session = session.clone();
		Command::new("ctx", handler_fn(move |ctx| {
			let out = context_command(&session, &ctx);
			async move { out.map(|text| print!("{text}")) }
		}))
		.with_aliases(["context"])
		.with_category(Category::Context)
		.with_description("Remember key/value notes for this session")
		.with_example("/ctx set branch main")
		.with_fixed_subcommands(["set", "get", "list", "clear"])
	};

	let ticket = {
		let session = session.clone();
		Command::new("ticket", handler_fn(move |ctx| {
			let out = ticket_command(&session, &ctx);
			async move { out.map(|text| print!("{text}")) }
		}))
		.with_aliases(["tk"])
		.with_category(Category::Tickets)
		.with_description("Track small to-do tickets")
		.with_example("/ticket create fix login")
		.with_fixed_subcommands(["list", "create", "show"])
	};

	registry.register_many([
		help,
		Command::new("echo", handler_fn(|ctx| async move {
			println!("{}", ctx.args.join(" "));
			Ok(())
		}))
		.with_description("Print the arguments")
		.with_priority(5),
		Command::new("clear", handler_fn(|_ctx| async {
			print!("\x1b[2J\x1b[H");
			Ok(())
		}))
		.with_aliases(["cls"])
		.with_description("Clear the screen"),
		Command::new("quit", handler_fn(|_ctx| async { Ok(()) }))
			.with_aliases(["exit", "q"])
			.with_description("Leave the prompt")
			.with_priority(10),
		history,
		Command::new("git", handler_fn(run_git))
			.with_aliases(["g"])
			.with_category(Category::VersionControl)
			.with_description("Run git in the working directory")
			.with_example("/git status")
			.with_fixed_subcommands(["status", "commit", "push", "pull", "log", "diff", "branch", "checkout"]),
		ctx,
		ticket,
	])
}

fn help_text(registry: &Weak<CommandRegistry>) -> Result<String, HandlerError> {
	let registry = registry.upgrade().ok_or(HandlerError::Unsupported("registry dropped"))?;
	let mut commands = registry.all_commands();
	commands.sort_by(|a, b| a.category().cmp(&b.category()).then_with(|| a.name().cmp(b.name())));

	let mut out = String::new();
	let mut last = None;
	for cmd in commands {
		if last != Some(cmd.category()) {
			out.push_str(&format!("{}:\n", cmd.category()));
			last = Some(cmd.category());
		}
		let aliases = match cmd.aliases() {
			[] => String::new(),
			aliases => format!(" ({})", aliases.join(", ")),
		};
		out.push_str(&format!("  {:<10} {}{aliases}\n", cmd.name(), cmd.description()));
	}
	Ok(out.trim_end().to_string())
}

async fn run_git(ctx: CommandContext) -> Result<(), HandlerError> {
	let mut git = tokio::process::Command::new("git");
	git.args(&ctx.args);
	if let Some(cwd) = &ctx.environment.cwd {
		git.current_dir(cwd);
	}
	let status = git.status().await?;
	if status.success() {
		Ok(())
	} else {
		Err(HandlerError::Failed(format!("git exited with {status}")))
	}
}

pub(crate) fn context_command(session: &Session, ctx: &CommandContext) -> Result<String, HandlerError> {
	let mut store = session.context.lock();
	match ctx.args.iter().map(String::as_str).collect::<Vec<_>>().as_slice() {
		[] | ["list"] => Ok(store.iter().map(|(k, v)| format!("{k} = {v}\n")).collect()),
		["set"] => Err(HandlerError::MissingArgument("key")),
		["set", _] => Err(HandlerError::MissingArgument("value")),
		["set", key, value @ ..] => {
			store.insert(key.to_string(), value.join(" "));
			Ok(String::new())
		}
		["get"] => Err(HandlerError::MissingArgument("key")),
		["get", key] => store
			.get(*key)
			.map(|v| format!("{v}\n"))
			.ok_or_else(|| HandlerError::InvalidArgument(format!("no context entry '{key}'"))),
		["clear"] => {
			store.clear();
			Ok(String::new())
		}
		["clear", key] => {
			store.remove(*key);
			Ok(String::new())
		}
		[other, ..] => Err(HandlerError::InvalidArgument(format!("unknown ctx action '{other}'"))),
	}
}

pub(crate) fn ticket_command(session: &Session, ctx: &CommandContext) -> Result<String, HandlerError> {
	let mut tickets = session.tickets.lock();
	match ctx.args.iter().map(String::as_str).collect::<Vec<_>>().as_slice() {
		[] | ["list"] => Ok(tickets
			.iter()
			.enumerate()
			.map(|(i, t)| format!("#{} {t}\n", i + 1))
			.collect()),
		["create"] => Err(HandlerError::MissingArgument("title")),
		["create", title @ ..] => {
			tickets.push(title.join(" "));
			Ok(format!("created #{}\n", tickets.len()))
		}
		["show"] => Err(HandlerError::MissingArgument("id")),
		["show", id] => {
			let n: usize = id
				.trim_start_matches('#')
				.parse()
				.map_err(|_| HandlerError::InvalidArgument(format!("bad ticket id '{id}'")))?;
			n.checked_sub(1)
				.and_then(|i| tickets.get(i))
				.map(|t| format!("#{n} {t}\n"))
				.ok_or_else(|| HandlerError::InvalidArgument(format!("no ticket #{n}")))
		}
		[other, ..] => Err(HandlerError::InvalidArgument(format!("unknown ticket action '{other}'"))),
	}
}
