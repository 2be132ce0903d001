use sift_matcher::{is_canonical, normalize_phrase, normalize_token};

/// One submitted line, split for the resolvers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedInput {
	/// The line exactly as submitted.
	pub raw: String,
	/// First word, trigger stripped, lowercased.
	pub token: String,
	/// Remaining words, verbatim.
	pub args: Vec<String>,
	/// Whole command text (trigger stripped) in phrase normal form.
	pub text: String,
}

impl ParsedInput {
	/// Splits `raw`, stripping one leading `trigger` char if present.
	pub fn parse(raw: &str, trigger: Option<char>) -> Self {
		let body = strip_trigger(raw, trigger);
		let mut words = body.split_whitespace();
		let token = words.next().map(normalize_token).unwrap_or_default();
		Self {
			raw: raw.to_string(),
			token,
			args: words.map(str::to_string).collect(),
			text: normalize_phrase(body),
		}
	}

	/// True if nothing but whitespace (and the trigger) was submitted.
	pub fn is_empty(&self) -> bool {
		self.token.is_empty()
	}

	/// True if the command word is written in the canonical command alphabet.
	pub fn is_canonical(&self) -> bool {
		is_canonical(&self.token)
	}
}

/// Leading whitespace and one trigger char removed.
pub(crate) fn strip_trigger(raw: &str, trigger: Option<char>) -> &str {
	let body = raw.trim_start();
	trigger.and_then(|t| body.strip_prefix(t)).unwrap_or(body)
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;

	use super::ParsedInput;

	#[test]
	fn splits_token_and_args() {
		let input = ParsedInput::parse("/Git  commit -m Fix", Some('/'));
		assert_eq!(input.token, "git");
		assert_eq!(input.args, ["commit", "-m", "Fix"]);
		assert_eq!(input.text, "git commit -m fix");
		assert_eq!(input.raw, "/Git  commit -m Fix");
	}

	#[test]
	fn trigger_is_optional_and_stripped_once() {
		assert_eq!(ParsedInput::parse("help", Some('/')).token, "help");
		assert_eq!(ParsedInput::parse("  /help", Some('/')).token, "help");
		assert_eq!(ParsedInput::parse("//help", Some('/')).token, "/help");
		assert_eq!(ParsedInput::parse("/help", None).token, "/help");
	}

	#[test]
	fn blank_input_is_empty() {
		assert!(ParsedInput::parse("   ", Some('/')).is_empty());
		assert!(ParsedInput::parse(" / ", Some('/')).is_empty());
	}

	#[test]
	fn script_detection_uses_first_word() {
		assert!(ParsedInput::parse("git 상태", None).is_canonical());
		assert!(!ParsedInput::parse("깃 status", None).is_canonical());
	}
}
