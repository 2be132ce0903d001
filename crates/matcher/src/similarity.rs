//! Weighted similarity for text in decomposable scripts.
//!
//! The score is a sum of independent signals, each bounded by its weight:
//!
//! | signal              | weight |
//! |---------------------|--------|
//! | leading components  | 0.3    |
//! | unigram Jaccard     | 0.3    |
//! | bigram Jaccard      | 0.4    |
//! | length similarity   | 0.2    |
//! | shared first char   | +0.1   |
//!
//! The total is capped at 1.0. Every signal is symmetric, so swapping the
//! arguments never changes the result.

use std::hash::Hash;

use rustc_hash::FxHashSet;

use crate::normalize::{compact, normalize_phrase};
use crate::script::{Decomposer, initials};

const INITIALS_WEIGHT: f64 = 0.3;
const UNIGRAM_WEIGHT: f64 = 0.3;
const BIGRAM_WEIGHT: f64 = 0.4;
const LENGTH_WEIGHT: f64 = 0.2;
const PREFIX_BONUS: f64 = 0.1;

/// Scores how alike `a` and `b` are, in `[0.0, 1.0]`.
///
/// Both inputs are normalized and stripped of whitespace first. Identical
/// nonempty inputs score exactly 1.0; an empty input scores 0.0.
pub fn similarity<D: Decomposer + ?Sized>(a: &str, b: &str, decomposer: &D) -> f64 {
	let a = compact(&normalize_phrase(a));
	let b = compact(&normalize_phrase(b));
	if a.is_empty() || b.is_empty() {
		return 0.0;
	}
	if a == b {
		return 1.0;
	}

	let a_chars: Vec<char> = a.chars().collect();
	let b_chars: Vec<char> = b.chars().collect();

	let mut score = 0.0;

	if initials(&a, decomposer) == initials(&b, decomposer) {
		score += INITIALS_WEIGHT;
	}

	score += jaccard(&unigrams(&a_chars), &unigrams(&b_chars)) * UNIGRAM_WEIGHT;
	score += jaccard(&bigrams(&a_chars), &bigrams(&b_chars)) * BIGRAM_WEIGHT;

	let (len_a, len_b) = (a_chars.len(), b_chars.len());
	let longest = len_a.max(len_b).max(1);
	score += (1.0 - len_a.abs_diff(len_b) as f64 / longest as f64) * LENGTH_WEIGHT;

	if a_chars[0] == b_chars[0] {
		score += PREFIX_BONUS;
	}

	score.min(1.0)
}

fn unigrams(chars: &[char]) -> FxHashSet<char> {
	chars.iter().copied().collect()
}

/// Adjacent pairs; empty for inputs shorter than two chars.
fn bigrams(chars: &[char]) -> FxHashSet<(char, char)> {
	chars.windows(2).map(|w| (w[0], w[1])).collect()
}

fn jaccard<T: Eq + Hash>(a: &FxHashSet<T>, b: &FxHashSet<T>) -> f64 {
	let union = a.union(b).count();
	if union == 0 {
		return 0.0;
	}
	a.intersection(b).count() as f64 / union as f64
}
