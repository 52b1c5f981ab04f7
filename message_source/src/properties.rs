//! Parser for `.properties` catalogues.
//!
//! Follows the classic line-oriented format: `#` and `!` start comments, keys
//! end at the first unescaped `=`, `:` or whitespace, a trailing odd run of
//! backslashes continues the logical line, and `\t`, `\n`, `\r`, `\f` and
//! `\uXXXX` escapes are decoded in both keys and values.

use thiserror::Error;

/// A single `key=value` pair together with the line it started on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyEntry {
    /// Decoded key.
    pub key: String,
    /// Decoded value.
    pub value: String,
    /// One-based line on which the entry starts.
    pub line: usize,
}

/// Failure to decode a properties document.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("line {line}: {message}")]
pub struct PropertiesError {
    /// One-based line of the offending entry.
    pub line: usize,
    /// What went wrong.
    pub message: String,
}

/// Parses `text` into entries in document order.
///
/// Duplicate keys are all returned; callers decide which one wins.
///
/// # Examples
///
/// ```rust
/// use message_source::properties::parse;
///
/// let entries = parse("# greeting\nhello = Hello, {}!\nbye:Goodbye").expect("valid");
/// assert_eq!(entries.len(), 2);
/// assert_eq!(entries[0].key, "hello");
/// assert_eq!(entries[0].value, "Hello, {}!");
/// assert_eq!(entries[1].value, "Goodbye");
/// ```
///
/// # Errors
///
/// Returns [`PropertiesError`] when an entry contains a malformed `\uXXXX`
/// escape.
pub fn parse(text: &str) -> Result<Vec<PropertyEntry>, PropertiesError> {
    let body = text.strip_prefix('\u{feff}').unwrap_or(text);
    let mut entries = Vec::new();
    let mut lines = body.lines().enumerate();
    while let Some((index, first)) = lines.next() {
        let start = first.trim_start();
        if start.is_empty() || start.starts_with(['#', '!']) {
            continue;
        }
        let line = index + 1;
        let mut logical = String::from(start);
        while ends_with_continuation(&logical) {
            logical.pop();
            match lines.next() {
                Some((_, next)) => logical.push_str(next.trim_start()),
                None => break,
            }
        }
        let (raw_key, raw_value) = split_entry(&logical);
        entries.push(PropertyEntry {
            key: unescape(raw_key, line)?,
            value: unescape(raw_value, line)?,
            line,
        });
    }
    Ok(entries)
}

fn ends_with_continuation(line: &str) -> bool {
    let trailing = line.chars().rev().take_while(|ch| *ch == '\\').count();
    !trailing.is_multiple_of(2)
}

fn is_separator(ch: char) -> bool {
    matches!(ch, '=' | ':')
}

fn is_blank(ch: char) -> bool {
    matches!(ch, ' ' | '\t' | '\u{000c}')
}

/// Splits a logical line into its raw (still escaped) key and value.
fn split_entry(logical: &str) -> (&str, &str) {
    let mut escaped = false;
    let mut key_end = logical.len();
    for (idx, ch) in logical.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        if ch == '\\' {
            escaped = true;
        } else if is_separator(ch) || is_blank(ch) {
            key_end = idx;
            break;
        }
    }
    let (key, rest) = logical.split_at(key_end);
    let after_blanks = rest.trim_start_matches(is_blank);
    let value = after_blanks
        .strip_prefix(is_separator)
        .unwrap_or(after_blanks);
    (key, value.trim_start_matches(is_blank))
}

fn unescape(raw: &str, line: usize) -> Result<String, PropertiesError> {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(ch) = chars.next() {
        if ch != '\\' {
            out.push(ch);
            continue;
        }
        match chars.next() {
            Some('t') => out.push('\t'),
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('f') => out.push('\u{000c}'),
            Some('u') => out.push(decode_unicode(&mut chars, line)?),
            Some(other) => out.push(other),
            None => {}
        }
    }
    Ok(out)
}

fn decode_unicode(chars: &mut std::str::Chars<'_>, line: usize) -> Result<char, PropertiesError> {
    let digits: String = chars.by_ref().take(4).collect();
    let malformed = || PropertiesError {
        line,
        message: format!("malformed \\uxxxx escape '\\u{digits}'"),
    };
    if digits.chars().count() != 4 {
        return Err(malformed());
    }
    let code = u32::from_str_radix(&digits, 16).map_err(|_| malformed())?;
    char::from_u32(code).ok_or_else(malformed)
}
