//! Change sets: the proposed replacements for one document.

/// A single proposed replacement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diff {
    /// Position of the producing rule in the engine's rule list.
    pub rule_index: usize,
    /// Pattern source that matched.
    pub pattern: String,
    /// The rule's `expected` template.
    pub expected: String,
    /// `expected` with capture groups expanded.
    pub replacement: String,
    /// Byte offset of the match.
    pub index: usize,
    pub matched: String,
}

impl Diff {
    /// Byte offset one past the end of the match.
    pub fn end(&self) -> usize {
        self.index + self.matched.len()
    }

    /// 1-based line and column (in characters) of the match within `content`.
    pub fn line_column(&self, content: &str) -> (usize, usize) {
        let before = content.get(..self.index).unwrap_or(content);
        let line = before.matches('\n').count() + 1;
        let line_start = before.rfind('\n').map_or(0, |i| i + 1);
        let column = before[line_start..].chars().count() + 1;
        (line, column)
    }
}

/// Ordered, non-overlapping set of diffs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChangeSet {
    diffs: Vec<Diff>,
}

impl ChangeSet {
    /// Build a change set, sorting by position then rule order.
    ///
    /// A diff that overlaps one already kept is dropped, so the earliest
    /// match (and on ties, the earliest rule) wins.
    pub fn from_diffs(mut diffs: Vec<Diff>) -> Self {
        diffs.sort_by_key(|d| (d.index, d.rule_index));

        let mut kept: Vec<Diff> = Vec::with_capacity(diffs.len());
        for diff in diffs {
            if kept.last().is_some_and(|last| diff.index < last.end()) {
                continue;
            }
            kept.push(diff);
        }
        Self { diffs: kept }
    }

    pub fn len(&self) -> usize {
        self.diffs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.diffs.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Diff> {
        self.diffs.iter()
    }

    pub fn diffs(&self) -> &[Diff] {
        &self.diffs
    }

    /// Apply every diff to `content`, which must be the text the change set
    /// was computed from. Diffs whose range does not fit `content` are skipped.
    pub fn apply(&self, content: &str) -> String {
        let mut out = String::with_capacity(content.len());
        let mut cursor = 0;
        for diff in &self.diffs {
            let head = content.get(cursor..diff.index);
            let (Some(head), Some(_)) = (head, content.get(diff.index..diff.end())) else {
                continue;
            };
            out.push_str(head);
            out.push_str(&diff.replacement);
            cursor = diff.end();
        }
        out.push_str(content.get(cursor..).unwrap_or_default());
        out
    }
}

impl<'a> IntoIterator for &'a ChangeSet {
    type Item = &'a Diff;
    type IntoIter = std::slice::Iter<'a, Diff>;

    fn into_iter(self) -> Self::IntoIter {
        self.diffs.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn diff(rule_index: usize, index: usize, matched: &str, replacement: &str) -> Diff {
        Diff {
            rule_index,
            pattern: matched.to_string(),
            expected: replacement.to_string(),
            replacement: replacement.to_string(),
            index,
            matched: matched.to_string(),
        }
    }

    #[test]
    fn sorted_by_position() {
        let set = ChangeSet::from_diffs(vec![diff(0, 10, "b", "B"), diff(1, 2, "a", "A")]);
        let positions: Vec<usize> = set.iter().map(|d| d.index).collect();
        assert_eq!(positions, vec![2, 10]);
    }

    #[test]
    fn overlapping_diffs_keep_the_earliest() {
        // "abcdef": rule 1 matches "bcd", rule 0 matches "cde".
        let set = ChangeSet::from_diffs(vec![diff(0, 2, "cde", "X"), diff(1, 1, "bcd", "Y")]);
        assert_eq!(set.len(), 1);
        assert_eq!(set.diffs()[0].rule_index, 1);
        assert_eq!(set.apply("abcdef"), "aYef");
    }

    #[test]
    fn same_position_prefers_earlier_rule() {
        let set = ChangeSet::from_diffs(vec![diff(3, 0, "ab", "X"), diff(1, 0, "abc", "Y")]);
        assert_eq!(set.len(), 1);
        assert_eq!(set.diffs()[0].rule_index, 1);
    }

    #[test]
    fn adjacent_diffs_both_apply() {
        let set = ChangeSet::from_diffs(vec![diff(0, 0, "ab", "X"), diff(0, 2, "cd", "Y")]);
        assert_eq!(set.apply("abcd!"), "XY!");
    }

    #[test]
    fn apply_multibyte_offsets() {
        let content = "サーバとサーバ";
        let second = content.rfind("サーバ").unwrap();
        let set = ChangeSet::from_diffs(vec![
            diff(0, 0, "サーバ", "サーバー"),
            diff(0, second, "サーバ", "サーバー"),
        ]);
        assert_eq!(set.apply(content), "サーバーとサーバー");
    }

    #[test]
    fn apply_skips_out_of_range_diffs() {
        let set = ChangeSet::from_diffs(vec![diff(0, 40, "zz", "Z")]);
        assert_eq!(set.apply("short"), "short");
    }

    #[test]
    fn empty_change_set_is_identity() {
        let set = ChangeSet::default();
        assert!(set.is_empty());
        assert_eq!(set.apply("unchanged"), "unchanged");
    }

    #[test]
    fn line_column_counts_characters() {
        let content = "一行目\n二行目のサーバ";
        let index = content.find("サーバ").unwrap();
        let d = diff(0, index, "サーバ", "サーバー");
        assert_eq!(d.line_column(content), (2, 5));
    }
}
