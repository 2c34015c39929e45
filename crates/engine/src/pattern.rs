//! Pattern compilation and replacement-template expansion.
//!
//! A pattern is written either as a plain string or as a `/body/flags`
//! regex literal. Plain strings match literally, except that ASCII letters
//! and digits also match their full-width forms.

use regex::{Captures, Regex};

use crate::rule::RuleError;

/// Flags accepted after the closing `/` of a regex literal.
const REGEX_FLAGS: &str = "gimsuy";

/// Offset between an ASCII printable character and its full-width form.
const FULLWIDTH_OFFSET: u32 = 0xFEE0;

/// A compiled pattern, keeping the text it was written as.
#[derive(Debug, Clone)]
pub struct Pattern {
    source: String,
    regex: Regex,
}

impl Pattern {
    /// Compile a pattern as written in a rule file.
    pub fn compile(source: &str, word_boundary: bool) -> Result<Self, RuleError> {
        if source.is_empty() {
            return Err(RuleError::EmptyPattern);
        }

        let mut body = match parse_regex_literal(source) {
            Some((body, flags)) => {
                if body.is_empty() {
                    return Err(RuleError::EmptyPattern);
                }
                with_inline_flags(body, flags)
            }
            None => spread_alnum(source),
        };

        if word_boundary {
            body = format!(r"(?-u:\b)(?:{body})(?-u:\b)");
        }

        let regex = Regex::new(&body).map_err(|e| RuleError::InvalidPattern {
            pattern: source.to_string(),
            source: e,
        })?;

        Ok(Self {
            source: source.to_string(),
            regex,
        })
    }

    /// The pattern text as written in the rule file.
    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn regex(&self) -> &Regex {
        &self.regex
    }
}

/// Split `/body/flags` into its parts. Returns `None` for anything that is not
/// a regex literal, including strings whose trailing segment is not a flag set
/// (so `/usr/bin` stays a plain string).
pub(crate) fn parse_regex_literal(source: &str) -> Option<(&str, &str)> {
    let rest = source.strip_prefix('/')?;
    let close = rest.rfind('/')?;
    let (body, flags) = (&rest[..close], &rest[close + 1..]);
    if flags.chars().all(|c| REGEX_FLAGS.contains(c)) {
        Some((body, flags))
    } else {
        None
    }
}

fn with_inline_flags(body: &str, flags: &str) -> String {
    let inline: String = flags.chars().filter(|c| matches!(c, 'i' | 'm' | 's')).collect();
    if inline.is_empty() {
        body.to_string()
    } else {
        format!("(?{inline}){body}")
    }
}

/// Escape `text` for use in a regex, widening every ASCII letter or digit
/// (and every full-width letter or digit) into a class matching both widths.
pub(crate) fn spread_alnum(text: &str) -> String {
    let mut out = String::with_capacity(text.len() * 2);
    let mut buf = [0u8; 4];
    for ch in text.chars() {
        if ch.is_ascii_alphanumeric() {
            if let Some(wide) = to_fullwidth(ch) {
                out.push('[');
                out.push(ch);
                out.push(wide);
                out.push(']');
                continue;
            }
        } else if let Some(narrow) = to_halfwidth_alnum(ch) {
            out.push('[');
            out.push(narrow);
            out.push(ch);
            out.push(']');
            continue;
        }
        out.push_str(&regex::escape(ch.encode_utf8(&mut buf)));
    }
    out
}

fn to_fullwidth(ch: char) -> Option<char> {
    char::from_u32(ch as u32 + FULLWIDTH_OFFSET)
}

fn to_halfwidth_alnum(ch: char) -> Option<char> {
    let code = ch as u32;
    if !(0xFF01..=0xFF5E).contains(&code) {
        return None;
    }
    char::from_u32(code - FULLWIDTH_OFFSET).filter(char::is_ascii_alphanumeric)
}

/// Expand a JavaScript-style replacement template against a match.
///
/// `$$` is a literal dollar, `$&` the whole match, `$1`..`$99` a capture group.
/// Two digits are taken only when that group exists. References to groups that
/// do not exist are left as written; groups that did not participate expand to
/// nothing.
pub fn expand_replacement(template: &str, caps: &Captures<'_>) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(pos) = rest.find('$') {
        out.push_str(&rest[..pos]);
        rest = &rest[pos..];
        let consumed = expand_token(rest, caps, &mut out);
        rest = &rest[consumed..];
    }
    out.push_str(rest);
    out
}

/// Expand the `$` token at the start of `token`, returning how many bytes it used.
fn expand_token(token: &str, caps: &Captures<'_>, out: &mut String) -> usize {
    let bytes = token.as_bytes();
    match bytes.get(1) {
        Some(b'$') => {
            out.push('$');
            2
        }
        Some(b'&') => {
            out.push_str(caps.get(0).map_or("", |m| m.as_str()));
            2
        }
        Some(d) if d.is_ascii_digit() => {
            let first = usize::from(d - b'0');
            if let Some(d2) = bytes.get(2).filter(|b| b.is_ascii_digit()) {
                let index = first * 10 + usize::from(d2 - b'0');
                if index > 0 && index < caps.len() {
                    out.push_str(caps.get(index).map_or("", |m| m.as_str()));
                    return 3;
                }
            }
            if first > 0 && first < caps.len() {
                out.push_str(caps.get(first).map_or("", |m| m.as_str()));
                return 2;
            }
            out.push('$');
            1
        }
        _ => {
            out.push('$');
            1
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn expand(pattern: &str, text: &str, template: &str) -> String {
        let re = Regex::new(pattern).unwrap();
        let caps = re.captures(text).unwrap();
        expand_replacement(template, &caps)
    }

    #[test]
    fn plain_string_matches_both_widths() {
        let p = Pattern::compile("Web2", false).unwrap();
        assert!(p.regex().is_match("Web2"));
        assert!(p.regex().is_match("Ｗｅｂ２"));
        assert!(p.regex().is_match("Wｅb２"));
        assert!(!p.regex().is_match("web2"));
    }

    #[test]
    fn plain_string_escapes_metacharacters() {
        let p = Pattern::compile("a.b(c)", false).unwrap();
        assert!(p.regex().is_match("a.b(c)"));
        assert!(!p.regex().is_match("axb(c)"));
    }

    #[test]
    fn fullwidth_source_matches_halfwidth_text() {
        let p = Pattern::compile("ＯＫ", false).unwrap();
        assert!(p.regex().is_match("OK"));
    }

    #[test]
    fn regex_literal_with_flags() {
        let p = Pattern::compile("/git(hub)?/i", false).unwrap();
        assert!(p.regex().is_match("GITHUB"));
        assert_eq!(p.source(), "/git(hub)?/i");
    }

    #[test]
    fn regex_literal_ignores_global_and_unicode_flags() {
        let p = Pattern::compile("/サーバー?/gu", false).unwrap();
        assert!(p.regex().is_match("サーバ"));
    }

    #[test]
    fn path_like_string_is_not_a_regex() {
        assert!(parse_regex_literal("/usr/bin").is_none());
        let p = Pattern::compile("/usr/bin", false).unwrap();
        assert!(p.regex().is_match("/usr/bin"));
    }

    #[test]
    fn word_boundary_wraps_pattern() {
        let p = Pattern::compile("java", true).unwrap();
        assert!(p.regex().is_match("use java here"));
        assert!(!p.regex().is_match("javascript"));
    }

    #[test]
    fn invalid_regex_is_reported() {
        let err = Pattern::compile("/(unclosed/", false).unwrap_err();
        assert!(matches!(err, RuleError::InvalidPattern { .. }));
    }

    #[test]
    fn look_around_is_rejected() {
        let err = Pattern::compile("/foo(?!bar)/", false).unwrap_err();
        assert!(matches!(err, RuleError::InvalidPattern { .. }));
    }

    #[test]
    fn empty_patterns_are_rejected() {
        assert!(matches!(Pattern::compile("", false), Err(RuleError::EmptyPattern)));
        assert!(matches!(Pattern::compile("//", false), Err(RuleError::EmptyPattern)));
    }

    #[test]
    fn expand_numbered_groups() {
        assert_eq!(expand("(確認)を行う", "確認を行う", "$1する"), "確認する");
        assert_eq!(expand("(a)(b)", "ab", "$2$1"), "ba");
    }

    #[test]
    fn expand_digit_after_group_is_literal() {
        // Only one group exists, so `$12` is group 1 followed by `2`.
        assert_eq!(expand("(x)", "x", "$12"), "x2");
    }

    #[test]
    fn expand_special_tokens() {
        assert_eq!(expand("abc", "abc", "[$&]"), "[abc]");
        assert_eq!(expand("abc", "abc", "$$5"), "$5");
        assert_eq!(expand("abc", "abc", "cost $"), "cost $");
    }

    #[test]
    fn expand_missing_group_is_left_as_written() {
        assert_eq!(expand("abc", "abc", "$1"), "$1");
    }

    #[test]
    fn expand_non_participating_group_is_empty() {
        assert_eq!(expand("(x)?y", "y", "[$1]"), "[]");
    }
}
