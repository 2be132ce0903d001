//! Free-text phrases mapped onto command invocations.
//!
//! Phrases are normalized with [`normalize_phrase`] on the way in, and the
//! resolvers normalize queries the same way. The table keeps two precomputed
//! orders (by normalized and by whitespace-free phrase) that put the most
//! specific phrase first: longer phrases before shorter ones, then earlier
//! registrations before later ones.

use std::path::Path;

use rustc_hash::FxHashMap;
use serde::Deserialize;
use sift_matcher::{compact, normalize_phrase, normalize_token};

use crate::error::IntentError;

/// Built-in Korean phrase table.
pub const BUILTIN_INTENTS: &str = include_str!("../data/intents.toml");

/// One phrase and the invocation it stands for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntentEntry {
	phrase: String,
	compact: String,
	command: String,
	args: Vec<String>,
	seq: usize,
	phrase_len: usize,
	compact_len: usize,
}

impl IntentEntry {
	/// Normalized phrase.
	pub fn phrase(&self) -> &str {
		&self.phrase
	}

	/// Phrase with all whitespace removed.
	pub fn compact(&self) -> &str {
		&self.compact
	}

	/// Target command word, lowercased.
	pub fn command(&self) -> &str {
		&self.command
	}

	/// Fixed arguments appended by this phrase (`"git status"` yields `["status"]`).
	pub fn args(&self) -> &[String] {
		&self.args
	}

	/// Registration order within the table.
	pub fn seq(&self) -> usize {
		self.seq
	}

	/// Phrase length in chars.
	pub fn char_len(&self) -> usize {
		self.phrase_len
	}

	/// Target rendered back as `command arg...`.
	pub fn target(&self) -> String {
		std::iter::once(self.command.as_str())
			.chain(self.args.iter().map(String::as_str))
			.collect::<Vec<_>>()
			.join(" ")
	}
}

#[derive(Debug, Deserialize)]
struct IntentFile {
	#[serde(default)]
	intent: Vec<IntentRecord>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct IntentRecord {
	command: String,
	#[serde(default)]
	phrase: Option<String>,
	#[serde(default)]
	phrases: Vec<String>,
}

/// Phrase table with exact lookup and specificity-ordered scans.
#[derive(Debug, Clone, Default)]
pub struct IntentTable {
	entries: Vec<IntentEntry>,
	exact: FxHashMap<String, usize>,
	by_specificity: Vec<usize>,
	by_compact_specificity: Vec<usize>,
}

impl IntentTable {
	pub fn new() -> Self {
		Self::default()
	}

	/// Maps `phrase` to `target` (`"help"`, `"git status"`).
	///
	/// Returns `Ok(false)` if the identical mapping already exists.
	pub fn insert(&mut self, phrase: &str, target: &str) -> Result<bool, IntentError> {
		let inserted = self.insert_unindexed(phrase, target)?;
		if inserted {
			self.reindex();
		}
		Ok(inserted)
	}

	/// Inserts many mappings, reindexing once. Stops at the first error.
	pub fn extend<I, P, T>(&mut self, pairs: I) -> Result<usize, IntentError>
	where
		I: IntoIterator<Item = (P, T)>,
		P: AsRef<str>,
		T: AsRef<str>,
	{
		let mut inserted = 0;
		let result = pairs.into_iter().try_for_each(|(phrase, target)| {
			if self.insert_unindexed(phrase.as_ref(), target.as_ref())? {
				inserted += 1;
			}
			Ok::<(), IntentError>(())
		});
		self.reindex();
		result.map(|()| inserted)
	}

	fn insert_unindexed(&mut self, phrase: &str, target: &str) -> Result<bool, IntentError> {
		let normalized = normalize_phrase(phrase);
		let mut words = target.split_whitespace();
		let Some(command) = words.next().map(normalize_token) else {
			return Err(IntentError::Empty { phrase: phrase.to_string() });
		};
		if normalized.is_empty() {
			return Err(IntentError::Empty { phrase: phrase.to_string() });
		}
		let args: Vec<String> = words.map(str::to_string).collect();

		if let Some(&idx) = self.exact.get(&normalized) {
			let existing = &self.entries[idx];
			if existing.command == command && existing.args == args {
				return Ok(false);
			}
			return Err(IntentError::Conflict {
				phrase: normalized,
				existing: existing.target(),
				target: target.trim().to_string(),
			});
		}

		let compact = compact(&normalized);
		let seq = self.entries.len();
		self.exact.insert(normalized.clone(), seq);
		self.entries.push(IntentEntry {
			phrase_len: normalized.chars().count(),
			compact_len: compact.chars().count(),
			phrase: normalized,
			compact,
			command,
			args,
			seq,
		});
		Ok(true)
	}

	fn reindex(&mut self) {
		let entries = &self.entries;
		let mut order: Vec<usize> = (0..entries.len()).collect();
		order.sort_by(|&a, &b| {
			entries[b]
				.phrase_len
				.cmp(&entries[a].phrase_len)
				.then(entries[a].seq.cmp(&entries[b].seq))
		});
		self.by_specificity = order;

		let mut order: Vec<usize> = (0..entries.len()).collect();
		order.sort_by(|&a, &b| {
			entries[b]
				.compact_len
				.cmp(&entries[a].compact_len)
				.then(entries[a].seq.cmp(&entries[b].seq))
		});
		self.by_compact_specificity = order;
	}

	/// Entry whose normalized phrase equals `normalized`.
	pub fn get(&self, normalized: &str) -> Option<&IntentEntry> {
		self.exact.get(normalized).map(|&idx| &self.entries[idx])
	}

	/// Entries from most to least specific normalized phrase.
	pub fn by_specificity(&self) -> impl Iterator<Item = &IntentEntry> {
		self.by_specificity.iter().map(|&idx| &self.entries[idx])
	}

	/// Entries from most to least specific whitespace-free phrase.
	pub fn by_compact_specificity(&self) -> impl Iterator<Item = &IntentEntry> {
		self.by_compact_specificity.iter().map(|&idx| &self.entries[idx])
	}

	/// Entries in registration order.
	pub fn entries(&self) -> &[IntentEntry] {
		&self.entries
	}

	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	/// Parses a TOML phrase table into `(phrase, target)` pairs.
	///
	/// ```toml
	/// [[intent]]
	/// command = "git status"
	/// phrases = ["깃 상태", "상태 보여줘"]
	///
	/// [[intent]]
	/// command = "help"
	/// phrase = "도움말"
	/// ```
	pub fn parse_toml(src: &str) -> Result<Vec<(String, String)>, IntentError> {
		let file: IntentFile = toml::from_str(src)?;
		let mut pairs = Vec::new();
		for record in file.intent {
			if record.phrase.is_none() && record.phrases.is_empty() {
				return Err(IntentError::NoPhrases { command: record.command });
			}
			for phrase in record.phrase.into_iter().chain(record.phrases) {
				pairs.push((phrase, record.command.clone()));
			}
		}
		Ok(pairs)
	}

	/// Reads and parses a TOML phrase table from disk.
	pub fn read_toml(path: &Path) -> Result<Vec<(String, String)>, IntentError> {
		let src = std::fs::read_to_string(path).map_err(|error| IntentError::Io {
			path: path.to_path_buf(),
			error,
		})?;
		Self::parse_toml(&src)
	}
}

#[cfg(test)]
mod tests;
