//! Command resolution engine.
//!
//! Turns a free-form line into at most one registered command, trying
//! progressively looser strategies:
//!
//! ```text
//! raw input ─▶ exact name/alias
//!                 │ miss
//!                 ├─ token outside the command alphabet ─▶ intent phrase ─▶ fuzzy phrase
//!                 └─ otherwise ─────────────────────────▶ typo correction
//! ```
//!
//! Resolution ([`Engine::resolve`]) is synchronous and reads one registry
//! snapshot, so it is safe to run concurrently. Dispatch
//! ([`Engine::resolve_and_dispatch`]) awaits the handler and contains its
//! failures. Live autocomplete ([`Engine::get_suggestions`]) is independent of
//! the fallback chain.

mod config;
mod dispatch;
mod engine;
mod host;
mod input;
mod outcome;
pub mod resolve;
mod suggest;

pub use config::{ConfigError, EngineConfig};
pub use dispatch::{Dispatch, Dispatcher};
pub use engine::{Engine, EngineBuilder};
pub use host::{AlwaysConfirm, Confirm, ErrorReporter, MessageLog, NeverConfirm, TracingReporter};
pub use input::ParsedInput;
pub use outcome::ResolutionOutcome;
pub use resolve::{Candidate, Resolution, Tier};
pub use suggest::{Suggestion, SuggestionRanker};
