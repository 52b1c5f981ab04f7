//! Message pattern helpers: `{code}` references and positional `{}` slots.
//!
//! Both functions are pure. [`resolve_code`] recognises text that is nothing
//! but a wrapped message code, and [`format`] fills literal `{}` placeholders
//! from left to right using each argument's [`Display`](fmt::Display) output.

use std::fmt::{self, Write as _};

/// Positional argument substituted into a `{}` placeholder.
pub type MessageArg<'a> = &'a dyn fmt::Display;

const PLACEHOLDER: &str = "{}";

/// Extracts the code from text of the form `{code}`.
///
/// The trimmed text must start with `{`, end with `}`, and enclose a
/// non-empty code that itself contains no braces. Anything else is literal
/// text and yields `None`.
///
/// # Examples
///
/// ```rust
/// use message_source::pattern::resolve_code;
///
/// assert_eq!(resolve_code("{a}"), Some("a"));
/// assert_eq!(resolve_code(" {user.not-found} "), Some("user.not-found"));
/// assert_eq!(resolve_code("a"), None);
/// assert_eq!(resolve_code("{}"), None);
/// ```
#[must_use]
pub fn resolve_code(message: &str) -> Option<&str> {
    let code = message
        .trim()
        .strip_prefix('{')
        .and_then(|rest| rest.strip_suffix('}'))?;
    if code.is_empty() || code.contains(['{', '}']) {
        return None;
    }
    Some(code)
}

/// Substitutes `args` into the `{}` placeholders of `template`.
///
/// Surplus placeholders stay verbatim and surplus arguments are ignored.
/// Braces enclosing anything are not placeholders.
///
/// # Examples
///
/// ```rust
/// use message_source::pattern::format;
///
/// assert_eq!(format("A,{},C,{},E", &[&"B", &"D"]), "A,B,C,D,E");
/// assert_eq!(format("A,{},C,{},E", &[&"B"]), "A,B,C,{},E");
/// assert_eq!(format("{} of {}", &[&3, &7]), "3 of 7");
/// ```
#[must_use]
pub fn format(template: &str, args: &[MessageArg<'_>]) -> String {
    if args.is_empty() {
        return template.to_owned();
    }
    let mut rendered = String::with_capacity(template.len());
    let mut remaining = template;
    let mut pending = args.iter();
    while let Some((before, after)) = remaining.split_once(PLACEHOLDER) {
        rendered.push_str(before);
        match pending.next() {
            Some(arg) => {
                // Writing into a String cannot fail.
                let _written = write!(rendered, "{arg}");
            }
            None => rendered.push_str(PLACEHOLDER),
        }
        remaining = after;
    }
    rendered.push_str(remaining);
    rendered
}
