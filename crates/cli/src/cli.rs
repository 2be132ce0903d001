use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "sift")]
#[command(about = "Resolve typed commands, typos and Korean phrases to actions")]
#[command(version)]
/// Command-line arguments.
pub struct Cli {
	/// Engine config file (TOML)
	#[arg(long, short = 'c', value_name = "PATH")]
	pub config: Option<PathBuf>,

	/// Extra intent phrase tables to load (TOML, repeatable)
	#[arg(long = "intents", short = 'i', value_name = "PATH")]
	pub intents: Vec<PathBuf>,

	/// Skip the built-in Korean phrase table
	#[arg(long)]
	pub no_builtin_intents: bool,

	/// Run corrected commands without asking
	#[arg(long, short = 'y')]
	pub yes: bool,

	/// Verbose logging
	#[arg(long, short = 'v')]
	pub verbose: bool,

	/// Subcommand to execute (interactive prompt if omitted).
	#[command(subcommand)]
	pub command: Option<Command>,
}

/// Available subcommands.
#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Command {
	/// Read lines from stdin and run them until EOF or `quit`
	Repl,
	/// Resolve and run a single line
	Run {
		/// The line to run; words are joined with spaces
		#[arg(required = true, trailing_var_arg = true, allow_hyphen_values = true)]
		line: Vec<String>,
	},
	/// Show how a line would resolve without running it
	Explain {
		#[arg(required = true, trailing_var_arg = true, allow_hyphen_values = true)]
		line: Vec<String>,
	},
	/// List autocomplete suggestions for a partial line
	Suggest {
		/// Partial input; may be empty
		#[arg(default_value = "")]
		partial: String,
	},
	/// Report intent phrases whose target command is not registered
	Check,
}
