//! Engine tuning knobs, loadable from TOML.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

/// Errors that can occur when loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
	/// Error reading a configuration file.
	#[error("I/O error reading {path}: {error}")]
	Io {
		/// Path to the file that failed to read.
		path: PathBuf,
		/// The underlying I/O error.
		error: std::io::Error,
	},
	/// Error parsing TOML syntax or field types.
	#[error("failed to parse engine config: {0}")]
	Parse(#[from] toml::de::Error),
	/// A value is out of range.
	#[error("invalid engine config: {0}")]
	Invalid(String),
}

/// Resolution thresholds and presentation limits.
///
/// ```toml
/// trigger = "/"
/// max-distance = 2
/// confirm-distance = 1
/// max-alternatives = 3
/// fuzzy-threshold = 0.45
/// suggestion-limit = 50
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct EngineConfig {
	/// Optional leading char marking a command line (stripped before resolution).
	pub trigger: Option<char>,
	/// Largest edit distance the typo corrector considers.
	pub max_distance: usize,
	/// Largest edit distance treated as a probable typo worth confirming.
	pub confirm_distance: usize,
	/// How many candidates to offer when not executing.
	pub max_alternatives: usize,
	/// Minimum fuzzy score for a phrase to be accepted.
	pub fuzzy_threshold: f64,
	/// Cap on live suggestions returned per keystroke.
	pub suggestion_limit: usize,
}

impl Default for EngineConfig {
	fn default() -> Self {
		Self {
			trigger: Some('/'),
			max_distance: 2,
			confirm_distance: 1,
			max_alternatives: 3,
			fuzzy_threshold: 0.45,
			suggestion_limit: 50,
		}
	}
}

impl EngineConfig {
	/// Parses and validates a TOML document. Missing keys keep their defaults.
	pub fn from_toml_str(src: &str) -> Result<Self, ConfigError> {
		let config: Self = toml::from_str(src)?;
		config.validate()?;
		Ok(config)
	}

	/// Reads, parses and validates a TOML file.
	pub fn load(path: &Path) -> Result<Self, ConfigError> {
		let src = std::fs::read_to_string(path).map_err(|error| ConfigError::Io {
			path: path.to_path_buf(),
			error,
		})?;
		Self::from_toml_str(&src)
	}

	/// Checks cross-field constraints.
	pub fn validate(&self) -> Result<(), ConfigError> {
		if !(0.0..=1.0).contains(&self.fuzzy_threshold) {
			return Err(ConfigError::Invalid(format!(
				"fuzzy-threshold must be within [0, 1], got {}",
				self.fuzzy_threshold
			)));
		}
		if self.confirm_distance > self.max_distance {
			return Err(ConfigError::Invalid(format!(
				"confirm-distance ({}) exceeds max-distance ({})",
				self.confirm_distance, self.max_distance
			)));
		}
		if self.max_alternatives == 0 {
			return Err(ConfigError::Invalid("max-alternatives must be at least 1".into()));
		}
		if self.trigger.is_some_and(char::is_whitespace) {
			return Err(ConfigError::Invalid("trigger cannot be whitespace".into()));
		}
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use std::io::Write;

	use pretty_assertions::assert_eq;
	use rstest::rstest;

	use super::*;

	#[test]
	fn empty_document_yields_defaults() {
		assert_eq!(EngineConfig::from_toml_str("").unwrap(), EngineConfig::default());
	}

	#[test]
	fn partial_document_overrides_only_given_keys() {
		let config = EngineConfig::from_toml_str("max-distance = 3\ntrigger = \"!\"").unwrap();
		assert_eq!(config.max_distance, 3);
		assert_eq!(config.trigger, Some('!'));
		assert_eq!(config.confirm_distance, 1);
		assert_eq!(config.fuzzy_threshold, 0.45);
	}

	#[test]
	fn unknown_keys_are_rejected() {
		assert!(matches!(EngineConfig::from_toml_str("max-distnce = 3"), Err(ConfigError::Parse(_))));
	}

	#[rstest]
	#[case("fuzzy-threshold = 1.5")]
	#[case("fuzzy-threshold = -0.1")]
	#[case("confirm-distance = 3\nmax-distance = 2")]
	#[case("max-alternatives = 0")]
	#[case("trigger = \" \"")]
	fn out_of_range_values_are_rejected(#[case] src: &str) {
		assert!(matches!(EngineConfig::from_toml_str(src), Err(ConfigError::Invalid(_))));
	}

	#[test]
	fn load_reads_file_and_reports_missing_path() {
		let mut file = tempfile::NamedTempFile::new().unwrap();
		writeln!(file, "suggestion-limit = 5").unwrap();
		assert_eq!(EngineConfig::load(file.path()).unwrap().suggestion_limit, 5);

		let missing = file.path().with_extension("missing");
		assert!(matches!(EngineConfig::load(&missing), Err(ConfigError::Io { .. })));
	}
}
