use sift_registry::{Category, Command, RegistrySnapshot, SubcommandSource};

use crate::input::strip_trigger;
use crate::resolve::ExactResolver;

/// One autocomplete row for the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Suggestion {
	/// Text shown in the list: a command name or a sub-command word.
	pub label: String,
	pub description: String,
	/// Full line to put in the input box if this row is accepted.
	pub insert_text: String,
	pub category: Category,
	pub example: Option<String>,
}

/// Ranks completions for a partially typed line. Advisory only: never runs anything.
pub struct SuggestionRanker<'a> {
	snap: &'a RegistrySnapshot,
	trigger: Option<char>,
	limit: usize,
}

impl<'a> SuggestionRanker<'a> {
	pub fn new(snap: &'a RegistrySnapshot, trigger: Option<char>, limit: usize) -> Self {
		Self { snap, trigger, limit }
	}

	/// Suggestions for `partial`, best first, at most `limit` of them.
	///
	/// Once the command word is complete (followed by a space or arguments) and
	/// names a command with sub-commands, those are completed against the last
	/// word. Otherwise every command whose name or alias contains the typed
	/// word is listed, ordered by priority then name.
	pub fn suggest(&self, partial: &str) -> Vec<Suggestion> {
		let body = strip_trigger(partial, self.trigger);
		let mut words: Vec<&str> = body.split_whitespace().collect();
		if body.ends_with(char::is_whitespace) && !words.is_empty() {
			words.push("");
		}

		let mut out = match words.as_slice() {
			[] => self.scan(""),
			[token] => self.scan(token),
			[token, prior @ .., last] => match ExactResolver::new(self.snap).resolve(token) {
				Some(command) if command.subcommands().is_some() => self.complete_args(command, prior, last),
				_ => self.scan(token),
			},
		};
		out.truncate(self.limit);
		out
	}

	fn scan(&self, token: &str) -> Vec<Suggestion> {
		let needle = token.to_lowercase();
		let mut hits: Vec<&Command> = self
			.snap
			.commands()
			.iter()
			.map(|cmd| &**cmd)
			.filter(|cmd| cmd.keys().any(|key| key.contains(needle.as_str())))
			.collect();
		hits.sort_by(|a, b| a.priority().cmp(&b.priority()).then_with(|| a.name().cmp(b.name())));

		hits.into_iter()
			.map(|cmd| Suggestion {
				label: cmd.name().to_string(),
				description: cmd.description().to_string(),
				insert_text: self.line([cmd.name()]),
				category: cmd.category(),
				example: cmd.example().map(str::to_string),
			})
			.collect()
	}

	fn complete_args(&self, command: &Command, prior: &[&str], last: &str) -> Vec<Suggestion> {
		let needle = last.to_lowercase();
		let words = match command.subcommands() {
			Some(SubcommandSource::Fixed(vocab)) => {
				let mut words: Vec<&String> = vocab.iter().filter(|w| w.to_lowercase().contains(&needle)).collect();
				words.sort_by(|a, b| {
					let a_prefix = a.to_lowercase().starts_with(&needle);
					let b_prefix = b.to_lowercase().starts_with(&needle);
					b_prefix.cmp(&a_prefix).then_with(|| a.cmp(b))
				});
				words.into_iter().cloned().collect()
			}
			Some(SubcommandSource::Dynamic(provider)) => provider.complete(last),
			None => Vec::new(),
		};

		words
			.into_iter()
			.map(|word| {
				let line = std::iter::once(command.name()).chain(prior.iter().copied()).chain([word.as_str()]);
				Suggestion {
					insert_text: self.line(line),
					label: word,
					description: command.description().to_string(),
					category: command.category(),
					example: command.example().map(str::to_string),
				}
			})
			.collect()
	}

	fn line<'w>(&self, words: impl IntoIterator<Item = &'w str>) -> String {
		let mut line: String = self.trigger.into_iter().collect();
		for (i, word) in words.into_iter().enumerate() {
			if i > 0 {
				line.push(' ');
			}
			line.push_str(word);
		}
		line
	}
}
