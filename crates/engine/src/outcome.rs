use crate::dispatch::Dispatch;

/// What happened to one submitted line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolutionOutcome {
	/// The input named a command (directly or through an intent phrase) and it ran.
	Executed {
		/// Canonical name of the command that ran.
		command: String,
		/// Whether the handler completed.
		dispatch: Dispatch,
	},
	/// A probable typo was confirmed and the corrected command ran.
	CorrectedAndExecuted {
		/// The token as typed.
		original_token: String,
		/// Canonical name of the command that ran instead.
		chosen_command: String,
		/// Whether the handler completed.
		dispatch: Dispatch,
	},
	/// Nothing ran; these commands are close to what was typed, best first.
	SuggestionsOffered {
		/// The token as typed.
		original_token: String,
		/// Canonical names, best first.
		candidates: Vec<String>,
	},
	/// Nothing matched in any tier. Nothing ran.
	Unresolved {
		/// The line as submitted.
		input: String,
	},
}

impl ResolutionOutcome {
	/// Name of the command that ran, if any.
	pub fn executed_command(&self) -> Option<&str> {
		match self {
			Self::Executed { command, .. } => Some(command),
			Self::CorrectedAndExecuted { chosen_command, .. } => Some(chosen_command),
			Self::SuggestionsOffered { .. } | Self::Unresolved { .. } => None,
		}
	}
}
