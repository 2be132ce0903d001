/// Normal form shared by intent registration and lookup.
///
/// Trims, lowercases, and collapses every whitespace run into a single ASCII space.
pub fn normalize_phrase(text: &str) -> String {
	let mut out = String::with_capacity(text.len());
	for word in text.split_whitespace() {
		if !out.is_empty() {
			out.push(' ');
		}
		out.extend(word.chars().flat_map(char::to_lowercase));
	}
	out
}

/// Normal form for a single command token (name, alias, or typed word).
pub fn normalize_token(token: &str) -> String {
	token.trim().to_lowercase()
}

/// Removes all whitespace, so spacing variants of one phrase compare equal.
pub fn compact(text: &str) -> String {
	text.chars().filter(|c| !c.is_whitespace()).collect()
}

/// Returns true if `c` belongs to the canonical command alphabet (printable ASCII).
#[inline]
pub fn is_canonical_char(c: char) -> bool {
	c.is_ascii_graphic()
}

/// Returns true if every char of `token` is in the canonical command alphabet.
///
/// Tokens that fail this test are treated as free text in another script and
/// routed to intent matching instead of typo correction.
pub fn is_canonical(token: &str) -> bool {
	token.chars().all(is_canonical_char)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn phrase_is_trimmed_lowercased_and_collapsed() {
		assert_eq!(normalize_phrase("  Show   ME\tthe  Log \n"), "show me the log");
		assert_eq!(normalize_phrase("커밋  해줘"), "커밋 해줘");
		assert_eq!(normalize_phrase("   "), "");
	}

	#[test]
	fn compact_strips_all_whitespace() {
		assert_eq!(compact("커밋 해 줘"), "커밋해줘");
		assert_eq!(compact("a\tb\nc"), "abc");
	}

	#[test]
	fn canonical_alphabet_is_printable_ascii() {
		assert!(is_canonical("git"));
		assert!(is_canonical("ctx-set"));
		assert!(is_canonical("?"));
		assert!(!is_canonical("커밋"));
		assert!(!is_canonical("gitå"));
		assert!(is_canonical(""));
	}
}
