//! Compiled rules: patterns, replacement, and embedded specs.

use crate::changeset::{ChangeSet, Diff};
use crate::pattern::{self, Pattern};
use crate::schema::{RawRule, RuleSpec};

/// Errors raised while compiling a single rule.
#[derive(Debug, thiserror::Error)]
pub enum RuleError {
    #[error("rule has an empty `expected`")]
    EmptyExpected,

    #[error("rule has an empty pattern")]
    EmptyPattern,

    #[error("invalid pattern `{pattern}`: {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    /// `regexpMustEmpty` is not of the form `$N`.
    #[error("invalid regexpMustEmpty `{0}`, expected a group reference like `$1`")]
    InvalidMustEmpty(String),

    #[error("spec failed: from `{from}` expected `{to}` but got `{actual}`")]
    SpecMismatch {
        from: String,
        to: String,
        actual: String,
    },
}

/// A rule ready to be matched against text.
#[derive(Debug, Clone)]
pub struct Rule {
    expected: String,
    patterns: Vec<Pattern>,
    must_empty: Option<usize>,
    specs: Vec<RuleSpec>,
    description: Option<String>,
}

impl Rule {
    /// Compile a raw rule and check its embedded specs.
    ///
    /// Without any `pattern`/`patterns`, the pattern is derived from `expected`.
    pub fn compile(raw: &RawRule) -> Result<Self, RuleError> {
        if raw.expected.is_empty() {
            return Err(RuleError::EmptyExpected);
        }

        let mut sources = raw.raw_patterns();
        if sources.is_empty() {
            sources.push(raw.expected.clone());
        }

        let patterns = sources
            .iter()
            .map(|s| Pattern::compile(s, raw.options.word_boundary))
            .collect::<Result<Vec<_>, _>>()?;

        let must_empty = raw
            .regexp_must_empty
            .as_deref()
            .map(parse_group_reference)
            .transpose()?;

        let rule = Self {
            expected: raw.expected.clone(),
            patterns,
            must_empty,
            specs: raw.specs.clone(),
            description: raw.prh.clone(),
        };
        rule.check_specs()?;
        Ok(rule)
    }

    pub fn expected(&self) -> &str {
        &self.expected
    }

    pub fn patterns(&self) -> &[Pattern] {
        &self.patterns
    }

    pub fn specs(&self) -> &[RuleSpec] {
        &self.specs
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Whether an `ignoreRules` entry refers to this rule.
    pub fn matches_ignore(&self, entry: &str) -> bool {
        self.expected == entry || self.patterns.iter().any(|p| p.source() == entry)
    }

    /// Collect every proposed change of this rule in `content`.
    ///
    /// `rule_index` is recorded on each diff so overlapping changes from
    /// different rules can be ordered.
    pub(crate) fn find_diffs(&self, rule_index: usize, content: &str, out: &mut Vec<Diff>) {
        for pattern in &self.patterns {
            for caps in pattern.regex().captures_iter(content) {
                let Some(whole) = caps.get(0) else {
                    continue;
                };
                if whole.as_str().is_empty() {
                    continue;
                }
                if let Some(group) = self.must_empty {
                    if caps.get(group).is_some_and(|m| !m.as_str().is_empty()) {
                        continue;
                    }
                }

                let replacement = pattern::expand_replacement(&self.expected, &caps);
                if replacement == whole.as_str() {
                    continue;
                }

                out.push(Diff {
                    rule_index,
                    pattern: pattern.source().to_string(),
                    expected: self.expected.clone(),
                    replacement,
                    index: whole.start(),
                    matched: whole.as_str().to_string(),
                });
            }
        }
    }

    /// Apply only this rule to `content`.
    pub fn apply(&self, content: &str) -> String {
        let mut diffs = Vec::new();
        self.find_diffs(0, content, &mut diffs);
        ChangeSet::from_diffs(diffs).apply(content)
    }

    /// Run every embedded spec, failing on the first mismatch.
    pub fn check_specs(&self) -> Result<(), RuleError> {
        for spec in &self.specs {
            let actual = self.apply(&spec.from);
            if actual != spec.to {
                return Err(RuleError::SpecMismatch {
                    from: spec.from.clone(),
                    to: spec.to.clone(),
                    actual,
                });
            }
        }
        Ok(())
    }
}

/// Parse `$N` into N.
fn parse_group_reference(value: &str) -> Result<usize, RuleError> {
    value
        .strip_prefix('$')
        .and_then(|n| n.parse::<usize>().ok())
        .filter(|n| *n > 0)
        .ok_or_else(|| RuleError::InvalidMustEmpty(value.to_string()))
}
