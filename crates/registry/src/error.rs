use std::path::PathBuf;

use thiserror::Error;

/// Which namespace a registry key lives in.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum KeyKind {
	/// A command's canonical name.
	Name,
	/// An alternative lookup name.
	Alias,
}

impl std::fmt::Display for KeyKind {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			KeyKind::Name => write!(f, "name"),
			KeyKind::Alias => write!(f, "alias"),
		}
	}
}

/// Errors raised while registering commands or intents.
///
/// A failed registration never modifies the registry.
#[derive(Debug, Error)]
pub enum RegistryError {
	/// The key is already claimed as a name or alias by another command.
	#[error("{key:?} is already registered as the {kind} of command {owner:?}")]
	Duplicate {
		/// Namespace of the existing claim.
		kind: KeyKind,
		/// The contested key.
		key: String,
		/// Canonical name of the command holding the key.
		owner: String,
	},
	/// Command names must be nonempty and contain no whitespace.
	#[error("invalid command name {0:?}")]
	InvalidName(String),
	/// Intent registration failed.
	#[error(transparent)]
	Intent(#[from] IntentError),
}

/// Errors raised while building the intent table.
#[derive(Debug, Error)]
pub enum IntentError {
	/// Phrase or target was blank after normalization.
	#[error("intent phrase and target must be nonempty (phrase {phrase:?})")]
	Empty {
		/// The offending phrase as given.
		phrase: String,
	},
	/// The phrase is already mapped to a different target.
	#[error("intent phrase {phrase:?} already maps to {existing:?}, cannot remap to {target:?}")]
	Conflict {
		/// Normalized phrase.
		phrase: String,
		/// Target already registered for the phrase.
		existing: String,
		/// Target that was refused.
		target: String,
	},
	/// An intent record named neither `phrase` nor `phrases`.
	#[error("intent record for {command:?} has no phrases")]
	NoPhrases {
		/// Target of the record.
		command: String,
	},
	/// The TOML table could not be parsed.
	#[error("failed to parse intent table: {0}")]
	Parse(#[from] toml::de::Error),
	/// The table file could not be read.
	#[error("failed to read intent table {path}: {error}")]
	Io {
		/// Path that failed to read.
		path: PathBuf,
		/// The underlying I/O error.
		error: std::io::Error,
	},
}
