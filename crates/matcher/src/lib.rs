//! Text metrics used by the sift resolution pipeline.
//!
//! Everything here is pure and allocation-light; nothing knows about commands
//! or registries. The engine composes these pieces into its fallback tiers:
//!
//! - [`normalize_phrase`] / [`compact`]: the shared normal form for intent phrases.
//! - [`is_canonical`]: decides whether a token belongs to the command alphabet.
//! - [`Decomposer`] / [`Hangul`]: leading-component extraction for syllabic scripts.
//! - [`edit_distance`]: Damerau-Levenshtein distance used for typo correction.
//! - [`similarity`]: weighted phonetic/n-gram score used for fuzzy intent matching.

mod distance;
mod normalize;
mod script;
mod similarity;

pub use distance::edit_distance;
pub use normalize::{compact, is_canonical, is_canonical_char, normalize_phrase, normalize_token};
pub use script::{Decomposer, Hangul, initials};
pub use similarity::similarity;
