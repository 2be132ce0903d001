use std::path::Path;
use std::sync::Arc;

use arc_swap::ArcSwap;
use rustc_hash::FxHashMap as HashMap;
use sift_matcher::normalize_token;

use crate::command::Command;
use crate::error::{KeyKind, RegistryError};
use crate::intent::{IntentEntry, IntentTable};

/// Immutable view of every registered command and intent.
///
/// Resolvers pin one snapshot per input, so a registration that lands
/// mid-resolution is never half-visible.
#[derive(Clone, Default)]
pub struct RegistrySnapshot {
	commands: Vec<Arc<Command>>,
	by_name: HashMap<String, usize>,
	by_alias: HashMap<String, usize>,
	intents: IntentTable,
}

impl RegistrySnapshot {
	/// Command whose canonical name is `name` (already normalized).
	#[inline]
	pub fn get_by_name(&self, name: &str) -> Option<&Arc<Command>> {
		self.by_name.get(name).map(|&idx| &self.commands[idx])
	}

	/// Command owning the alias `alias` (already normalized).
	#[inline]
	pub fn get_by_alias(&self, alias: &str) -> Option<&Arc<Command>> {
		self.by_alias.get(alias).map(|&idx| &self.commands[idx])
	}

	/// Name lookup first, then alias lookup. `token` must already be normalized.
	#[inline]
	pub fn get(&self, token: &str) -> Option<&Arc<Command>> {
		self.get_by_name(token).or_else(|| self.get_by_alias(token))
	}

	/// Commands in registration order.
	pub fn commands(&self) -> &[Arc<Command>] {
		&self.commands
	}

	pub fn intents(&self) -> &IntentTable {
		&self.intents
	}

	pub fn len(&self) -> usize {
		self.commands.len()
	}

	pub fn is_empty(&self) -> bool {
		self.commands.is_empty()
	}

	fn owner_of(&self, key: &str) -> Option<(KeyKind, &Arc<Command>)> {
		self.get_by_name(key)
			.map(|cmd| (KeyKind::Name, cmd))
			.or_else(|| self.get_by_alias(key).map(|cmd| (KeyKind::Alias, cmd)))
	}

	fn insert(&mut self, command: Arc<Command>) -> Result<(), RegistryError> {
		let name = command.name();
		if name.is_empty() || name.chars().any(char::is_whitespace) {
			return Err(RegistryError::InvalidName(name.to_string()));
		}
		for key in command.keys() {
			if let Some((kind, owner)) = self.owner_of(key) {
				return Err(RegistryError::Duplicate {
					kind,
					key: key.to_string(),
					owner: owner.name().to_string(),
				});
			}
		}
		if let Some(alias) = command.aliases().iter().find(|a| a.chars().any(char::is_whitespace)) {
			return Err(RegistryError::InvalidName(alias.clone()));
		}

		let idx = self.commands.len();
		self.by_name.insert(name.to_string(), idx);
		for alias in command.aliases() {
			self.by_alias.insert(alias.clone(), idx);
		}
		self.commands.push(command);
		Ok(())
	}
}

/// Registry of commands and intent phrases.
///
/// Populated at startup and read-mostly afterwards. Every mutation clones the
/// current snapshot, applies the change, and publishes the result with a
/// compare-and-swap, retrying if another writer won the race.
pub struct CommandRegistry {
	snap: ArcSwap<RegistrySnapshot>,
}

impl Default for CommandRegistry {
	fn default() -> Self {
		Self::new()
	}
}

impl CommandRegistry {
	pub fn new() -> Self {
		Self {
			snap: ArcSwap::from_pointee(RegistrySnapshot::default()),
		}
	}

	/// Registers a command.
	///
	/// Fails if the name or any alias is already present as a name or alias.
	pub fn register(&self, command: Command) -> Result<(), RegistryError> {
		let command = Arc::new(command);
		self.update(|next| next.insert(Arc::clone(&command)))
			.inspect(|_| tracing::debug!(command = command.name(), aliases = ?command.aliases(), "registered command"))
			.inspect_err(|err| tracing::warn!(command = command.name(), error = %err, "registration rejected"))
	}

	/// Registers several commands atomically: either all land or none do.
	pub fn register_many<I>(&self, commands: I) -> Result<(), RegistryError>
	where
		I: IntoIterator<Item = Command>,
	{
		let commands: Vec<Arc<Command>> = commands.into_iter().map(Arc::new).collect();
		self.update(|next| commands.iter().try_for_each(|cmd| next.insert(Arc::clone(cmd))))
	}

	/// Maps one phrase onto a target invocation (`"help"`, `"git status"`).
	pub fn register_intent(&self, phrase: &str, target: &str) -> Result<(), RegistryError> {
		self.update(|next| {
			next.intents.insert(phrase, target)?;
			Ok(())
		})
	}

	/// Maps a whole phrase table atomically. Returns the number of new mappings.
	pub fn register_intents<I, P, T>(&self, pairs: I) -> Result<usize, RegistryError>
	where
		I: IntoIterator<Item = (P, T)>,
		P: AsRef<str>,
		T: AsRef<str>,
	{
		let pairs: Vec<(P, T)> = pairs.into_iter().collect();
		self.update(|next| {
			let pairs = pairs.iter().map(|(p, t)| (p.as_ref(), t.as_ref()));
			Ok(next.intents.extend(pairs)?)
		})
		.inspect(|added| tracing::debug!(added, "registered intent phrases"))
	}

	/// Loads a TOML phrase table (see [`IntentTable::parse_toml`]).
	pub fn load_intents_toml(&self, src: &str) -> Result<usize, RegistryError> {
		let pairs = IntentTable::parse_toml(src)?;
		self.register_intents(pairs)
	}

	/// Loads a TOML phrase table from disk.
	pub fn load_intents_file(&self, path: &Path) -> Result<usize, RegistryError> {
		let pairs = IntentTable::read_toml(path)?;
		self.register_intents(pairs)
	}

	/// Looks up a command by canonical name, then by alias. Case-insensitive.
	pub fn lookup_by_name_or_alias(&self, token: &str) -> Option<Arc<Command>> {
		let token = normalize_token(token);
		self.snap.load().get(&token).cloned()
	}

	/// Every command, in registration order.
	pub fn all_commands(&self) -> Vec<Arc<Command>> {
		self.snap.load().commands.clone()
	}

	/// Current snapshot. Hold it for the duration of one resolution.
	pub fn snapshot(&self) -> Arc<RegistrySnapshot> {
		self.snap.load_full()
	}

	/// Intent entries whose target command is not registered.
	pub fn dangling_intents(&self) -> Vec<IntentEntry> {
		let snap = self.snap.load();
		snap.intents
			.entries()
			.iter()
			.filter(|entry| snap.get(entry.command()).is_none())
			.cloned()
			.collect()
	}

	pub fn len(&self) -> usize {
		self.snap.load().len()
	}

	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}

	fn update<R>(&self, mut apply: impl FnMut(&mut RegistrySnapshot) -> Result<R, RegistryError>) -> Result<R, RegistryError> {
		loop {
			let cur = self.snap.load_full();
			let mut next = (*cur).clone();
			let out = apply(&mut next)?;

			let prev = self.snap.compare_and_swap(&cur, Arc::new(next));
			if Arc::ptr_eq(&prev, &cur) {
				return Ok(out);
			}
		}
	}
}
