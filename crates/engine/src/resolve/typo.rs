use std::sync::Arc;

use sift_matcher::edit_distance;
use sift_registry::{Command, RegistrySnapshot};

use super::{Candidate, Resolution};
use crate::config::EngineConfig;
use crate::input::ParsedInput;

/// Edit-distance correction for tokens in the command alphabet.
pub struct TypoCorrector<'a> {
	snap: &'a RegistrySnapshot,
	max_distance: usize,
}

impl<'a> TypoCorrector<'a> {
	pub fn new(snap: &'a RegistrySnapshot, max_distance: usize) -> Self {
		Self { snap, max_distance }
	}

	/// Every command within `max_distance` of `token`, closest first.
	///
	/// A command's distance is the smallest over its name and aliases. Equal
	/// distances sort by priority, then name.
	pub fn candidates(&self, token: &str) -> Vec<Candidate> {
		let mut found: Vec<Candidate> = self
			.snap
			.commands()
			.iter()
			.filter_map(|command| {
				let distance = closest_key(command, token)?;
				(distance <= self.max_distance).then(|| Candidate {
					command: command.clone(),
					distance,
				})
			})
			.collect();
		found.sort_by(|a, b| {
			a.distance
				.cmp(&b.distance)
				.then_with(|| a.command.priority().cmp(&b.command.priority()))
				.then_with(|| a.command.name().cmp(b.command.name()))
		});
		found
	}

	/// Applies the correction policy to a token that missed exact lookup.
	pub fn correct(&self, input: &ParsedInput, config: &EngineConfig) -> Resolution {
		let original = input.token.clone();
		let mut candidates = self.candidates(&original);

		let Some(best) = candidates.first() else {
			return Resolution::Unresolved { original };
		};

		if best.distance <= config.confirm_distance {
			let tied = candidates[1..].iter().take_while(|c| c.distance == best.distance).count();
			if tied == 0 {
				let candidate = candidates.remove(0);
				candidates.truncate(config.max_alternatives);
				tracing::debug!(token = %original, candidate = candidate.name(), distance = candidate.distance, "probable typo");
				return Resolution::Typo {
					original,
					candidate,
					args: input.args.clone(),
					alternatives: candidates,
				};
			}
			tracing::warn!(
				token = %original,
				distance = best.distance,
				tied = tied + 1,
				"ambiguous correction, offering suggestions"
			);
		}

		candidates.truncate(config.max_alternatives);
		Resolution::Suggest { original, candidates }
	}
}

fn closest_key(command: &Command, token: &str) -> Option<usize> {
	command.keys().map(|key| edit_distance(token, key)).min()
}
