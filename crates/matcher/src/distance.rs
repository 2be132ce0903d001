/// Edit distance with unit costs, case-insensitive, ignoring surrounding whitespace.
///
/// Insertions, deletions and substitutions cost one, as does swapping two
/// adjacent chars ("gti" is one edit from "git"). The unrestricted
/// Damerau-Levenshtein variant is used so the result stays a metric.
/// Distance counts chars, not bytes.
pub fn edit_distance(a: &str, b: &str) -> usize {
	strsim::damerau_levenshtein(&a.trim().to_lowercase(), &b.trim().to_lowercase())
}
