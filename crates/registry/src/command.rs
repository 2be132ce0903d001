use std::collections::BTreeMap;
use std::fmt;
use std::future::Future;
use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use sift_matcher::normalize_token;
use thiserror::Error;

/// Closed set of command groups, used for grouping in suggestion lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub enum Category {
	/// Help, settings and anything without a better home.
	#[default]
	General,
	/// Repository operations.
	VersionControl,
	/// Key-value context storage.
	Context,
	/// Issue-tracker integration.
	Tickets,
	/// Requests routed to a language model.
	Assistant,
	/// Conversation and session management.
	Session,
}

impl fmt::Display for Category {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(match self {
			Self::General => "general",
			Self::VersionControl => "version-control",
			Self::Context => "context",
			Self::Tickets => "tickets",
			Self::Assistant => "assistant",
			Self::Session => "session",
		})
	}
}

/// Errors a command handler may return.
///
/// The dispatcher catches every one of these; none crosses the engine boundary.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HandlerError {
	/// General failure with message.
	#[error("{0}")]
	Failed(String),
	/// A required argument was not provided.
	#[error("missing argument: {0}")]
	MissingArgument(&'static str),
	/// An argument was provided but invalid.
	#[error("invalid argument: {0}")]
	InvalidArgument(String),
	/// Host I/O failed.
	#[error("I/O error: {0}")]
	Io(String),
	/// Operation not supported by this host.
	#[error("unsupported operation: {0}")]
	Unsupported(&'static str),
	/// The handler panicked; the payload message if one was available.
	#[error("handler panicked: {0}")]
	Panicked(String),
}

impl From<std::io::Error> for HandlerError {
	fn from(err: std::io::Error) -> Self {
		Self::Io(err.to_string())
	}
}

/// Host environment handed to every handler. Opaque to the engine.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Environment {
	/// Working directory the host considers current, if any.
	pub cwd: Option<PathBuf>,
	/// Host-defined variables.
	pub vars: BTreeMap<String, String>,
}

impl Environment {
	/// Captures the process working directory.
	pub fn from_process() -> Self {
		Self {
			cwd: std::env::current_dir().ok(),
			vars: BTreeMap::new(),
		}
	}

	/// Adds a host variable.
	pub fn with_var(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
		self.vars.insert(key.into(), value.into());
		self
	}

	/// Looks up a host variable.
	pub fn var(&self, key: &str) -> Option<&str> {
		self.vars.get(key).map(String::as_str)
	}
}

/// Context provided to command handlers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandContext {
	/// Canonical name of the command being run.
	pub command: String,
	/// Argument tokens after the command word.
	pub args: Vec<String>,
	/// The line exactly as the user submitted it.
	pub original_input: String,
	/// Host environment.
	pub environment: Environment,
}

/// Executes a command.
///
/// Handlers may perform arbitrary host-side effects. They own their own
/// cancellation; the engine awaits completion and never retries.
#[async_trait]
pub trait CommandHandler: Send + Sync {
	/// Runs the command to completion.
	async fn invoke(&self, ctx: CommandContext) -> Result<(), HandlerError>;
}

/// Handler backed by a closure returning a future. See [`handler_fn`].
pub struct FnHandler<F>(F);

#[async_trait]
impl<F, Fut> CommandHandler for FnHandler<F>
where
	F: Fn(CommandContext) -> Fut + Send + Sync + 'static,
	Fut: Future<Output = Result<(), HandlerError>> + Send + 'static,
{
	async fn invoke(&self, ctx: CommandContext) -> Result<(), HandlerError> {
		(self.0)(ctx).await
	}
}

/// Wraps an async closure as a [`CommandHandler`].
///
/// ```ignore
/// let echo = handler_fn(|ctx| async move {
///     println!("{}", ctx.args.join(" "));
///     Ok(())
/// });
/// ```
pub fn handler_fn<F, Fut>(f: F) -> FnHandler<F>
where
	F: Fn(CommandContext) -> Fut + Send + Sync + 'static,
	Fut: Future<Output = Result<(), HandlerError>> + Send + 'static,
{
	FnHandler(f)
}

/// Produces sub-command completions computed at query time.
pub trait SubcommandProvider: Send + Sync {
	/// Candidate completions for the argument being typed.
	fn complete(&self, partial: &str) -> Vec<String>;
}

/// Where a command's sub-command completions come from.
#[derive(Clone)]
pub enum SubcommandSource {
	/// A closed vocabulary known at registration time.
	Fixed(Vec<String>),
	/// Completions computed by the host on demand.
	Dynamic(Arc<dyn SubcommandProvider>),
}

impl fmt::Debug for SubcommandSource {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Fixed(words) => f.debug_tuple("Fixed").field(words).finish(),
			Self::Dynamic(_) => f.write_str("Dynamic(..)"),
		}
	}
}

/// A registered command.
///
/// Names and aliases are stored trimmed and lowercased; lookups are
/// case-insensitive.
pub struct Command {
	name: String,
	aliases: Vec<String>,
	description: String,
	category: Category,
	priority: i16,
	example: Option<String>,
	subcommands: Option<SubcommandSource>,
	handler: Arc<dyn CommandHandler>,
}

impl Command {
	/// Creates a command with no aliases, default category and priority 0.
	pub fn new(name: impl AsRef<str>, handler: impl CommandHandler + 'static) -> Self {
		Self::from_shared(name, Arc::new(handler))
	}

	/// Creates a command around an already shared handler.
	pub fn from_shared(name: impl AsRef<str>, handler: Arc<dyn CommandHandler>) -> Self {
		Self {
			name: normalize_token(name.as_ref()),
			aliases: Vec::new(),
			description: String::new(),
			category: Category::default(),
			priority: 0,
			example: None,
			subcommands: None,
			handler,
		}
	}

	/// Adds alternative lookup names. Repeats and the command's own name are dropped.
	pub fn with_aliases<I, S>(mut self, aliases: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: AsRef<str>,
	{
		for alias in aliases {
			let alias = normalize_token(alias.as_ref());
			if alias.is_empty() || alias == self.name || self.aliases.contains(&alias) {
				continue;
			}
			self.aliases.push(alias);
		}
		self
	}

	pub fn with_description(mut self, description: impl Into<String>) -> Self {
		self.description = description.into();
		self
	}

	pub fn with_category(mut self, category: Category) -> Self {
		self.category = category;
		self
	}

	/// Suggestion ordering; lower sorts first.
	pub fn with_priority(mut self, priority: i16) -> Self {
		self.priority = priority;
		self
	}

	/// Usage example shown next to suggestions.
	pub fn with_example(mut self, example: impl Into<String>) -> Self {
		self.example = Some(example.into());
		self
	}

	pub fn with_subcommands(mut self, source: SubcommandSource) -> Self {
		self.subcommands = Some(source);
		self
	}

	/// Shorthand for a [`SubcommandSource::Fixed`] vocabulary.
	pub fn with_fixed_subcommands<I, S>(self, words: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		self.with_subcommands(SubcommandSource::Fixed(words.into_iter().map(Into::into).collect()))
	}

	pub fn name(&self) -> &str {
		&self.name
	}

	pub fn aliases(&self) -> &[String] {
		&self.aliases
	}

	/// The canonical name followed by every alias.
	pub fn keys(&self) -> impl Iterator<Item = &str> {
		std::iter::once(self.name.as_str()).chain(self.aliases.iter().map(String::as_str))
	}

	pub fn description(&self) -> &str {
		&self.description
	}

	pub fn category(&self) -> Category {
		self.category
	}

	pub fn priority(&self) -> i16 {
		self.priority
	}

	pub fn example(&self) -> Option<&str> {
		self.example.as_deref()
	}

	pub fn subcommands(&self) -> Option<&SubcommandSource> {
		self.subcommands.as_ref()
	}

	pub fn handler(&self) -> Arc<dyn CommandHandler> {
		Arc::clone(&self.handler)
	}
}

impl fmt::Debug for Command {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Command")
			.field("name", &self.name)
			.field("aliases", &self.aliases)
			.field("category", &self.category)
			.field("priority", &self.priority)
			.field("subcommands", &self.subcommands)
			.finish_non_exhaustive()
	}
}

impl PartialEq for Command {
	fn eq(&self, other: &Self) -> bool {
		self.name == other.name
	}
}

impl Eq for Command {}
