//! The resolution fallback chain.
//!
//! Every tier reads the same [`RegistrySnapshot`]; nothing here touches
//! mutable state, so [`resolve`] can run on many threads at once.

mod exact;
mod fuzzy;
mod intent;
mod typo;


use std::fmt;
use std::sync::Arc;

use sift_matcher::Decomposer;
use sift_registry::{Command, RegistrySnapshot};

pub use self::exact::ExactResolver;
pub use self::fuzzy::FuzzyResolver;
pub use self::intent::IntentResolver;
pub use self::typo::TypoCorrector;
use crate::config::EngineConfig;
use crate::input::ParsedInput;

/// Which tier produced a resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tier {
	/// Name or alias lookup.
	Exact,
	/// Input equals an intent phrase.
	IntentPhrase,
	/// Input contains an intent phrase.
	IntentContains,
	/// Input contains an intent phrase once all whitespace is removed.
	IntentCompact,
	/// Weighted similarity above the threshold.
	Fuzzy,
}

impl fmt::Display for Tier {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(match self {
			Self::Exact => "exact",
			Self::IntentPhrase => "intent-phrase",
			Self::IntentContains => "intent-contains",
			Self::IntentCompact => "intent-compact",
			Self::Fuzzy => "fuzzy",
		})
	}
}

/// A command within edit distance of a mistyped token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
	pub command: Arc<Command>,
	/// Smallest distance between the token and any of the command's keys.
	pub distance: usize,
}

impl Candidate {
	pub fn name(&self) -> &str {
		self.command.name()
	}
}

/// Pure result of running the chain over one input. Nothing has been executed.
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution {
	/// A command was found without any guessing that needs the user's approval.
	Resolved {
		command: Arc<Command>,
		args: Vec<String>,
		tier: Tier,
	},
	/// A single probable typo. Run `candidate` only if the user confirms.
	Typo {
		/// The token as typed (lowercased).
		original: String,
		candidate: Candidate,
		/// The user's arguments, passed through unchanged.
		args: Vec<String>,
		/// Other candidates to offer if the correction is refused.
		alternatives: Vec<Candidate>,
	},
	/// Close matches exist but none is certain enough to run.
	Suggest {
		original: String,
		candidates: Vec<Candidate>,
	},
	/// No tier produced anything.
	Unresolved { original: String },
	/// Blank input.
	Empty,
}

impl Resolution {
	/// Command that would run without asking, if any.
	pub fn resolved_command(&self) -> Option<&Arc<Command>> {
		match self {
			Self::Resolved { command, .. } => Some(command),
			_ => None,
		}
	}
}

/// Runs the fallback chain over `input`.
///
/// Exact lookup first. On a miss, a token written in the canonical command
/// alphabet goes to typo correction; anything else is treated as free text
/// and tried against intent phrases, then by similarity.
pub fn resolve(
	snap: &RegistrySnapshot,
	input: &ParsedInput,
	config: &EngineConfig,
	decomposer: &dyn Decomposer,
) -> Resolution {
	if input.is_empty() {
		return Resolution::Empty;
	}

	if let Some(command) = ExactResolver::new(snap).resolve(&input.token) {
		tracing::debug!(token = %input.token, command = command.name(), "exact match");
		return Resolution::Resolved {
			command: command.clone(),
			args: input.args.clone(),
			tier: Tier::Exact,
		};
	}

	if input.is_canonical() {
		return TypoCorrector::new(snap, config.max_distance).correct(input, config);
	}

	if let Some((command, args, tier)) = IntentResolver::new(snap).resolve(&input.text) {
		tracing::debug!(text = %input.text, command = command.name(), %tier, "intent match");
		return Resolution::Resolved { command, args, tier };
	}

	if let Some((command, args, score)) =
		FuzzyResolver::new(snap, decomposer, config.fuzzy_threshold).resolve(&input.text)
	{
		tracing::debug!(text = %input.text, command = command.name(), score, "fuzzy match");
		return Resolution::Resolved {
			command,
			args,
			tier: Tier::Fuzzy,
		};
	}

	Resolution::Unresolved {
		original: input.token.clone(),
	}
}
