//! Syllable decomposition for scripts whose characters carry sub-syllabic parts.

/// Extracts the leading phonetic component of a syllable.
///
/// The fuzzy tier is script-agnostic: any writing system that can name the
/// initial sound of a character can plug in here.
pub trait Decomposer: Send + Sync {
	/// Leading component of `c`, or `None` if `c` is not a decomposable syllable.
	fn initial(&self, c: char) -> Option<char>;

	/// Returns true if any char of `text` decomposes.
	fn is_decomposable(&self, text: &str) -> bool {
		text.chars().any(|c| self.initial(c).is_some())
	}
}

const SYLLABLE_FIRST: u32 = 0xAC00;
const SYLLABLE_LAST: u32 = 0xD7A3;
const MEDIAL_COUNT: u32 = 21;
const FINAL_COUNT: u32 = 28;

/// Leading consonants in syllable-block order, as compatibility jamo.
const CHOSEONG: [char; 19] = [
	'ㄱ', 'ㄲ', 'ㄴ', 'ㄷ', 'ㄸ', 'ㄹ', 'ㅁ', 'ㅂ', 'ㅃ', 'ㅅ', 'ㅆ', 'ㅇ', 'ㅈ', 'ㅉ', 'ㅊ', 'ㅋ', 'ㅌ', 'ㅍ', 'ㅎ',
];

/// Korean Hangul decomposition.
///
/// Precomposed syllables yield their leading consonant. A bare consonant jamo
/// is its own initial, so initial-only input ("ㄷㅇㅁ") lines up with full
/// syllables ("도움말").
#[derive(Debug, Clone, Copy, Default)]
pub struct Hangul;

impl Decomposer for Hangul {
	fn initial(&self, c: char) -> Option<char> {
		let code = c as u32;
		if (SYLLABLE_FIRST..=SYLLABLE_LAST).contains(&code) {
			let index = (code - SYLLABLE_FIRST) / (MEDIAL_COUNT * FINAL_COUNT);
			return CHOSEONG.get(index as usize).copied();
		}
		CHOSEONG.contains(&c).then_some(c)
	}
}

/// Leading component of every char in `text`, skipping whitespace.
///
/// Chars the decomposer does not recognize are kept unchanged.
pub fn initials<D: Decomposer + ?Sized>(text: &str, decomposer: &D) -> String {
	text.chars()
		.filter(|c| !c.is_whitespace())
		.map(|c| decomposer.initial(c).unwrap_or(c))
		.collect()
}
