//! Command registry for the sift resolution engine.
//!
//! This crate holds the static vocabulary the resolvers read:
//!
//! - [`Command`]: a canonical name, its aliases, presentation metadata and handler.
//! - [`IntentTable`]: free-text phrases mapped onto command invocations.
//! - [`CommandRegistry`]: both of the above behind an atomically swapped
//!   [`RegistrySnapshot`], so lookups never observe a half-applied registration.
//!
//! Registration is checked: a name or alias can belong to exactly one command,
//! and a rejected registration leaves the registry untouched.

mod command;
mod error;
mod intent;
mod registry;

pub use command::{
	Category, Command, CommandContext, CommandHandler, Environment, FnHandler, HandlerError,
	SubcommandProvider, SubcommandSource, handler_fn,
};
pub use error::{IntentError, KeyKind, RegistryError};
pub use intent::{BUILTIN_INTENTS, IntentEntry, IntentTable};
pub use registry::{CommandRegistry, RegistrySnapshot};
