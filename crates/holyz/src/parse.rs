//! Line-oriented source scanning.
//!
//! Holy Z is deliberately not parsed into a syntax tree. A script becomes a
//! matrix of whitespace-separated tokens, one row per surviving source line,
//! and every later stage (definition loading, statement execution, expression
//! evaluation) works directly on that token matrix. The helpers here recover
//! structure the token split destroys: parenthesised argument lists, quoted
//! regions, and brace-balanced blocks.

/// Splits source text into trimmed, comment-free, tokenised lines.
///
/// Blank lines and `//` comment lines are dropped; the remaining lines are
/// split on whitespace. Quoted strings are *not* protected here: a literal
/// containing spaces spans several tokens and is reassembled downstream.
pub(crate) fn split_lines(source: &str) -> Vec<Vec<String>> {
    source
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with("//"))
        .map(|line| line.split_whitespace().map(str::to_owned).collect())
        .collect()
}

/// Joins tokens back into a single space-separated expression string.
pub(crate) fn join_tokens(tokens: &[String]) -> String {
    tokens.join(" ")
}

/// Net brace balance of one token row: tokens equal to `{` minus tokens equal
/// to `}`. Block delimiters are expected to stand alone as tokens.
pub(crate) fn brace_delta(tokens: &[String]) -> i32 {
    let opens = tokens.iter().filter(|t| t.as_str() == "{").count() as i32;
    let closes = tokens.iter().filter(|t| t.as_str() == "}").count() as i32;
    opens - closes
}

/// Counts occurrences of `ch` at parenthesis depth zero.
pub(crate) fn count_outside_parens(s: &str, ch: char) -> usize {
    let mut depth = 0i32;
    let mut count = 0;
    for c in s.chars() {
        if c == '(' {
            depth += 1;
        } else if c == ')' {
            depth -= 1;
        } else if c == ch && depth == 0 {
            count += 1;
        }
    }
    count
}

/// Returns the text between the first `open` and the last `close`, or an
/// empty string when the pair is absent or inverted.
///
/// Taking the outermost span keeps nested argument lists intact:
/// `square ( square ( 2 ) )` yields ` square ( 2 ) `.
pub(crate) fn between_chars(s: &str, open: char, close: char) -> &str {
    let Some(start) = s.find(open) else { return "" };
    let Some(end) = s.rfind(close) else { return "" };
    if end <= start {
        return "";
    }
    &s[start + open.len_utf8()..end]
}

/// Splits `s` on `sep`, ignoring separators nested inside `open`/`close`
/// pairs. Used to split argument lists on commas without cutting through
/// nested calls.
pub(crate) fn split_no_overlap(s: &str, sep: char, open: char, close: char) -> Vec<String> {
    let mut parts = Vec::new();
    let mut current = String::new();
    let mut depth = 0i32;
    for c in s.chars() {
        if c == open {
            depth += 1;
        } else if c == close {
            depth -= 1;
        }
        if c == sep && depth == 0 {
            parts.push(std::mem::take(&mut current));
        } else {
            current.push(c);
        }
    }
    parts.push(current);
    parts
}

/// True when the byte at `index` is preceded by an odd number of backslashes.
pub(crate) fn is_escaped(s: &str, index: usize) -> bool {
    s.as_bytes()[..index].iter().rev().take_while(|&&b| b == b'\\').count() % 2 == 1
}

/// Strips surrounding double quotes (when present) and decodes the common
/// escape sequences `\n`, `\t`, `\"`, and `\\`. Unknown escapes are kept
/// verbatim.
pub(crate) fn string_raw(s: &str) -> String {
    let trimmed = s.trim();
    let inner = if trimmed.len() >= 2 && trimmed.starts_with('"') && trimmed.ends_with('"') && !is_escaped(trimmed, trimmed.len() - 1) {
        &trimmed[1..trimmed.len() - 1]
    } else {
        trimmed
    };

    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('"') => out.push('"'),
            Some('\\') => out.push('\\'),
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_lines_drops_comments_and_blanks() {
        let lines = split_lines("int x = 1\n\n// comment\n  ZS.System.PrintLine ( x )  \n");
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], ["int", "x", "=", "1"]);
        assert_eq!(lines[1][0], "ZS.System.PrintLine");
    }

    #[test]
    fn between_chars_spans_outermost_pair() {
        assert_eq!(between_chars("f ( g ( 1 ) , 2 )", '(', ')'), " g ( 1 ) , 2 ");
        assert_eq!(between_chars("no parens", '(', ')'), "");
        assert_eq!(between_chars(") inverted (", '(', ')'), "");
    }

    #[test]
    fn split_no_overlap_respects_nesting() {
        let parts = split_no_overlap("a, f(b, c), d", ',', '(', ')');
        assert_eq!(parts, vec!["a", " f(b, c)", " d"]);
    }

    #[test]
    fn count_outside_parens_skips_nested() {
        assert_eq!(count_outside_parens("1 + f(2 + 3)", '+'), 1);
        assert_eq!(count_outside_parens("(1 + 2)", '+'), 0);
    }

    #[test]
    fn is_escaped_counts_backslash_runs() {
        let s = r#"a\"b"#;
        assert!(is_escaped(s, 2));
        let s2 = r#"a\\"b"#;
        assert!(!is_escaped(s2, 3));
    }

    #[test]
    fn string_raw_strips_quotes_and_decodes() {
        assert_eq!(string_raw("\"hi\\nthere\""), "hi\nthere");
        assert_eq!(string_raw("plain"), "plain");
        assert_eq!(string_raw("\"tab\\there\""), "tab\there");
    }

    #[test]
    fn brace_delta_counts_standalone_tokens() {
        let toks: Vec<String> = ["while", "i", "<", "3", "{"].iter().map(|s| (*s).to_owned()).collect();
        assert_eq!(brace_delta(&toks), 1);
        let close: Vec<String> = vec!["}".to_owned()];
        assert_eq!(brace_delta(&close), -1);
    }
}
