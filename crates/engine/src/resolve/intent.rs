use std::sync::Arc;

use sift_matcher::compact;
use sift_registry::{Command, IntentEntry, RegistrySnapshot};

use super::exact::ExactResolver;
use super::Tier;

/// Shortest phrase, in characters, the containment tiers will search for.
/// Shorter phrases still match by whole-phrase equality.
const MIN_CONTAINED_CHARS: usize = 2;

/// Maps free text onto commands through the registered phrase table.
///
/// Tiers, first hit wins: whole-phrase equality, substring containment, and
/// containment with all whitespace removed. Containment scans phrases most
/// specific first (longest, then earliest registered), so a longer phrase
/// always beats a shorter one it contains. One-syllable phrases are too
/// common inside ordinary words to match by containment.
pub struct IntentResolver<'a> {
	snap: &'a RegistrySnapshot,
}

impl<'a> IntentResolver<'a> {
	pub fn new(snap: &'a RegistrySnapshot) -> Self {
		Self { snap }
	}

	/// `text` must already be in phrase normal form.
	pub fn resolve(&self, text: &str) -> Option<(Arc<Command>, Vec<String>, Tier)> {
		if text.is_empty() {
			return None;
		}
		let intents = self.snap.intents();

		if let Some(entry) = intents.get(text)
			&& let Some(hit) = self.target(entry)
		{
			return Some((hit.0, hit.1, Tier::IntentPhrase));
		}

		if let Some(hit) = self.first_containing(intents.by_specificity(), text, IntentEntry::phrase) {
			return Some((hit.0, hit.1, Tier::IntentContains));
		}

		let squeezed = compact(text);
		self.first_containing(intents.by_compact_specificity(), &squeezed, IntentEntry::compact)
			.map(|(command, args)| (command, args, Tier::IntentCompact))
	}

	fn first_containing<'e>(
		&self,
		entries: impl Iterator<Item = &'e IntentEntry>,
		haystack: &str,
		key: fn(&IntentEntry) -> &str,
	) -> Option<(Arc<Command>, Vec<String>)> {
		let mut found: Option<(&IntentEntry, (Arc<Command>, Vec<String>))> = None;
		for entry in entries {
			let phrase = key(entry);
			let chars = phrase.chars().count();
			if chars < MIN_CONTAINED_CHARS {
				break;
			}
			if let Some((best, _)) = &found
				&& chars < key(best).chars().count()
			{
				break;
			}
			if !haystack.contains(phrase) {
				continue;
			}
			match &found {
				None => found = self.target(entry).map(|hit| (entry, hit)),
				Some((best, _)) if best.target() != entry.target() => {
					tracing::warn!(
						input = haystack,
						chosen = %best.target(),
						other = %entry.target(),
						"ambiguous intent match, keeping earliest registration"
					);
				}
				Some(_) => {}
			}
		}
		found.map(|(_, hit)| hit)
	}

	/// Command and fixed arguments an entry points at, skipping dangling targets.
	fn target(&self, entry: &IntentEntry) -> Option<(Arc<Command>, Vec<String>)> {
		match ExactResolver::new(self.snap).resolve(entry.command()) {
			Some(command) => Some((command.clone(), entry.args().to_vec())),
			None => {
				tracing::debug!(phrase = entry.phrase(), target = entry.command(), "intent target not registered");
				None
			}
		}
	}
}
