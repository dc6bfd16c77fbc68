//! Markup escaping for character data and attribute values.
//!
//! Five characters are replaced, everything else passes through:
//!
//! | Char | Entity   |
//! |------|----------|
//! | `&`  | `&amp;`  |
//! | `"`  | `&quot;` |
//! | `'`  | `&apos;` |
//! | `<`  | `&lt;`   |
//! | `>`  | `&gt;`   |
//!
//! Element and attribute names are never escaped.

use std::borrow::Cow;

use memchr::{memchr, memchr2, memchr3};
use thiserror::Error;

/// Errors from [`unescape`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EscapeError {
    /// `&` at the given byte offset has no closing `;`.
    #[error("unterminated entity at byte {0}")]
    UnterminatedEntity(usize),

    /// Entity name other than the five produced by [`escape`].
    #[error("unknown entity '&{0};'")]
    UnknownEntity(String),
}

#[inline]
fn entity_for(byte: u8) -> Option<&'static str> {
    match byte {
        b'&' => Some("&amp;"),
        b'"' => Some("&quot;"),
        b'\'' => Some("&apos;"),
        b'<' => Some("&lt;"),
        b'>' => Some("&gt;"),
        _ => None,
    }
}

/// Offset of the next byte that needs escaping.
#[inline]
fn find_special(bytes: &[u8]) -> Option<usize> {
    match (memchr3(b'&', b'<', b'>', bytes), memchr2(b'"', b'\'', bytes)) {
        (Some(a), Some(b)) => Some(a.min(b)),
        (a, b) => a.or(b),
    }
}

/// Escape `input` for use as character data or an attribute value.
///
/// Borrows the input when nothing needs replacing.
pub fn escape(input: &str) -> Cow<'_, str> {
    let bytes = input.as_bytes();
    let Some(first) = find_special(bytes) else {
        return Cow::Borrowed(input);
    };

    let mut output = String::with_capacity(input.len() + 8);
    let mut pos = 0;
    let mut next = Some(first);
    while let Some(rel) = next {
        let at = pos + rel;
        // Specials are ASCII, so `at` and `at + 1` are char boundaries.
        output.push_str(&input[pos..at]);
        match entity_for(bytes[at]) {
            Some(entity) => output.push_str(entity),
            None => output.push(char::from(bytes[at])),
        }
        pos = at + 1;
        next = find_special(&bytes[pos..]);
    }
    output.push_str(&input[pos..]);
    Cow::Owned(output)
}

/// Reverse [`escape`].
///
/// Only the five entities `escape` produces are recognized; numeric
/// character references and named entities from DTDs are rejected.
pub fn unescape(input: &str) -> Result<Cow<'_, str>, EscapeError> {
    let bytes = input.as_bytes();
    let Some(first) = memchr(b'&', bytes) else {
        return Ok(Cow::Borrowed(input));
    };

    let mut output = String::with_capacity(input.len());
    let mut pos = 0;
    let mut next = Some(first);
    while let Some(rel) = next {
        let amp = pos + rel;
        output.push_str(&input[pos..amp]);

        let semi = memchr(b';', &bytes[amp..]).ok_or(EscapeError::UnterminatedEntity(amp))?;
        let name = &input[amp + 1..amp + semi];
        let ch = match name {
            "amp" => '&',
            "quot" => '"',
            "apos" => '\'',
            "lt" => '<',
            "gt" => '>',
            other => return Err(EscapeError::UnknownEntity(other.to_string())),
        };
        output.push(ch);

        pos = amp + semi + 1;
        next = memchr(b'&', &bytes[pos..]);
    }
    output.push_str(&input[pos..]);
    Ok(Cow::Owned(output))
}
