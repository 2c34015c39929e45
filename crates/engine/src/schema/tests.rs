//! Tests for rule file schema types.

use super::*;

const FULL_RULE_FILE_YAML: &str = r#"
version: 1
imports:
  - ./common.yml
  - path: ./extra.yml
    disableImports: true
    ignoreRules:
      - ルール
rules:
  - expected: JavaScript
    pattern: javascript
    options:
      wordBoundary: true
    specs:
      - from: javascript
        to: JavaScript
    prh: 正式な表記は JavaScript です
  - expected: $1する
    patterns:
      - /(確認|検討)を行う/
      - /(確認|検討)をおこなう/
    regexpMustEmpty: $2
"#;

#[test]
fn parse_full_rule_file() {
    let file: RuleFile = serde_yaml::from_str(FULL_RULE_FILE_YAML).unwrap();

    assert_eq!(file.version, 1);
    assert_eq!(file.imports.len(), 2);
    assert_eq!(file.rules.len(), 2);

    let js = &file.rules[0];
    assert_eq!(js.expected, "JavaScript");
    assert_eq!(js.pattern, Some(OneOrMany::One("javascript".to_string())));
    assert!(js.patterns.is_none());
    assert!(js.options.word_boundary);
    assert_eq!(js.specs.len(), 1);
    assert_eq!(js.specs[0].to, "JavaScript");
    assert_eq!(js.prh.as_deref(), Some("正式な表記は JavaScript です"));

    let suru = &file.rules[1];
    assert_eq!(suru.raw_patterns().len(), 2);
    assert_eq!(suru.regexp_must_empty.as_deref(), Some("$2"));
    assert!(!suru.options.word_boundary);
}

#[test]
fn import_entry_accessors() {
    let file: RuleFile = serde_yaml::from_str(FULL_RULE_FILE_YAML).unwrap();

    let plain = &file.imports[0];
    assert_eq!(plain.path(), "./common.yml");
    assert!(plain.follows_imports());
    assert!(plain.ignore_rules().is_empty());

    let detailed = &file.imports[1];
    assert_eq!(detailed.path(), "./extra.yml");
    assert!(!detailed.follows_imports());
    assert_eq!(detailed.ignore_rules(), ["ルール".to_string()]);
}

#[test]
fn version_and_lists_default_when_missing() {
    let file: RuleFile = serde_yaml::from_str("rules: []\n").unwrap();
    assert_eq!(file.version, SUPPORTED_VERSION);
    assert!(file.imports.is_empty());
    assert!(file.rules.is_empty());
}

#[test]
fn unknown_keys_are_ignored() {
    let yaml = r#"
version: 1
author: someone
rules:
  - expected: GitHub
    note: extra key
"#;
    let file: RuleFile = serde_yaml::from_str(yaml).unwrap();
    assert_eq!(file.rules[0].expected, "GitHub");
    assert!(file.rules[0].raw_patterns().is_empty());
}

#[test]
fn missing_expected_is_rejected() {
    let yaml = r#"
rules:
  - pattern: github
"#;
    let err = serde_yaml::from_str::<RuleFile>(yaml).unwrap_err();
    assert!(err.to_string().contains("expected"), "unexpected error: {err}");
}

#[test]
fn pattern_and_patterns_are_combined_in_order() {
    let yaml = r#"
rules:
  - expected: GitHub
    pattern: Github
    patterns: [github, GITHUB]
"#;
    let file: RuleFile = serde_yaml::from_str(yaml).unwrap();
    assert_eq!(file.rules[0].raw_patterns(), vec!["Github", "github", "GITHUB"]);
}
