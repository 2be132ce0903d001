use pretty_assertions::assert_eq;

use super::{BUILTIN_INTENTS, IntentTable};
use crate::error::IntentError;

#[test]
fn phrases_are_normalized_on_insert() {
	let mut table = IntentTable::new();
	assert!(table.insert("  Git   상태 ", "git status").unwrap());

	let entry = table.get("git 상태").expect("normalized phrase is found");
	assert_eq!(entry.command(), "git");
	assert_eq!(entry.args(), ["status".to_string()]);
	assert_eq!(entry.compact(), "git상태");
	assert_eq!(entry.char_len(), 6);
	assert_eq!(entry.target(), "git status");
}

#[test]
fn identical_mapping_is_a_noop() {
	let mut table = IntentTable::new();
	assert!(table.insert("도움말", "help").unwrap());
	assert!(!table.insert("도움말", "HELP").unwrap());
	assert_eq!(table.len(), 1);
}

#[test]
fn remapping_a_phrase_is_rejected() {
	let mut table = IntentTable::new();
	table.insert("도움말", "help").unwrap();
	let err = table.insert("도움말", "quit").unwrap_err();
	assert!(matches!(err, IntentError::Conflict { ref existing, .. } if existing == "help"));
	assert_eq!(table.get("도움말").unwrap().command(), "help");
}

#[test]
fn blank_phrase_or_target_is_rejected() {
	let mut table = IntentTable::new();
	assert!(matches!(table.insert("   ", "help"), Err(IntentError::Empty { .. })));
	assert!(matches!(table.insert("도움말", "  "), Err(IntentError::Empty { .. })));
	assert!(table.is_empty());
}

#[test]
fn specificity_order_is_longest_then_earliest() {
	let mut table = IntentTable::new();
	table
		.extend([("커밋", "git commit"), ("로그", "git log"), ("커밋 로그", "git log"), ("푸시", "git push")])
		.unwrap();

	let order: Vec<&str> = table.by_specificity().map(|e| e.phrase()).collect();
	assert_eq!(order, ["커밋 로그", "커밋", "로그", "푸시"]);

	let compact: Vec<&str> = table.by_compact_specificity().map(|e| e.compact()).collect();
	assert_eq!(compact, ["커밋로그", "커밋", "로그", "푸시"]);
}

#[test]
fn extend_reports_inserted_count() {
	let mut table = IntentTable::new();
	let n = table.extend([("도움말", "help"), ("도움말", "help"), ("종료", "quit")]).unwrap();
	assert_eq!(n, 2);
}

#[test]
fn toml_accepts_single_and_multiple_phrases() {
	let src = r#"
		[[intent]]
		command = "help"
		phrase = "도움말"

		[[intent]]
		command = "git status"
		phrases = ["깃 상태", "상태 보여줘"]
	"#;
	let pairs = IntentTable::parse_toml(src).unwrap();
	assert_eq!(
		pairs,
		vec![
			("도움말".to_string(), "help".to_string()),
			("깃 상태".to_string(), "git status".to_string()),
			("상태 보여줘".to_string(), "git status".to_string()),
		]
	);
}

#[test]
fn toml_record_without_phrases_is_rejected() {
	let src = r#"
		[[intent]]
		command = "help"
	"#;
	assert!(matches!(IntentTable::parse_toml(src), Err(IntentError::NoPhrases { .. })));
}

#[test]
fn toml_syntax_errors_surface_as_parse_errors() {
	assert!(matches!(IntentTable::parse_toml("[[intent"), Err(IntentError::Parse(_))));
}

#[test]
fn builtin_table_loads_without_conflicts() {
	let pairs = IntentTable::parse_toml(BUILTIN_INTENTS).unwrap();
	let mut table = IntentTable::new();
	table.extend(pairs).unwrap();
	assert!(table.len() > 20);
	assert_eq!(table.get("도움말").map(|e| e.command()), Some("help"));
}
