use std::cmp::Ordering;
use std::sync::Arc;

use sift_matcher::{Decomposer, similarity};
use sift_registry::{Command, IntentEntry, RegistrySnapshot};

/// Last-chance phrase match by weighted similarity.
///
/// Only engaged for text the decomposer can split into sub-syllabic parts.
/// The best phrase wins by score, then length, then registration order; two
/// equally specific phrases with the same score and different targets are
/// treated as ambiguous and nothing is returned.
pub struct FuzzyResolver<'a> {
	snap: &'a RegistrySnapshot,
	decomposer: &'a dyn Decomposer,
	threshold: f64,
}

struct Scored<'e> {
	entry: &'e IntentEntry,
	command: &'e Arc<Command>,
	score: f64,
}

impl Scored<'_> {
	fn rank(&self, other: &Self) -> Ordering {
		other
			.score
			.total_cmp(&self.score)
			.then_with(|| other.entry.char_len().cmp(&self.entry.char_len()))
			.then_with(|| self.entry.seq().cmp(&other.entry.seq()))
	}

	fn ties_with(&self, other: &Self) -> bool {
		self.score == other.score && self.entry.char_len() == other.entry.char_len()
	}
}

impl<'a> FuzzyResolver<'a> {
	pub fn new(snap: &'a RegistrySnapshot, decomposer: &'a dyn Decomposer, threshold: f64) -> Self {
		Self {
			snap,
			decomposer,
			threshold,
		}
	}

	/// Best phrase for `text` at or above the threshold, with its score.
	pub fn resolve(&self, text: &str) -> Option<(Arc<Command>, Vec<String>, f64)> {
		if !self.decomposer.is_decomposable(text) {
			return None;
		}

		let mut scored: Vec<Scored<'a>> = self
			.snap
			.intents()
			.entries()
			.iter()
			.filter_map(|entry| {
				let command = self.snap.get(entry.command())?;
				let score = similarity(text, entry.phrase(), self.decomposer);
				(score >= self.threshold).then_some(Scored { entry, command, score })
			})
			.collect();
		scored.sort_by(Scored::rank);

		let best = scored.first()?;
		if let Some(rival) = scored[1..]
			.iter()
			.take_while(|s| s.ties_with(best))
			.find(|s| s.entry.target() != best.entry.target())
		{
			tracing::warn!(
				input = text,
				score = best.score,
				first = %best.entry.target(),
				second = %rival.entry.target(),
				"ambiguous fuzzy match rejected"
			);
			return None;
		}

		Some((best.command.clone(), best.entry.args().to_vec(), best.score))
	}
}
