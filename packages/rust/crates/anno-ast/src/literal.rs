//! Literal canonicalisation.
//!
//! Two spellings of the same Python constant must lower to the same
//! token: `0x10` and `16`, `'a'` and `"a"`, `"\x41"` and `"A"`.

use std::iter::Peekable;
use std::str::Chars;

use crate::tree::StrKind;

/// Prefix flags of a string literal, read from its opening delimiter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct StrPrefix {
    pub raw: bool,
    pub bytes: bool,
    pub format: bool,
}

impl StrPrefix {
    /// Parse the letters in front of the quote (`rb"`, `F'''`, `"`).
    pub(crate) fn from_delimiter(delimiter: &str) -> Self {
        let letters: String = delimiter
            .chars()
            .take_while(char::is_ascii_alphabetic)
            .map(|c| c.to_ascii_lowercase())
            .collect();
        Self {
            raw: letters.contains('r'),
            bytes: letters.contains('b'),
            format: letters.contains('f') || letters.contains('t'),
        }
    }

    pub(crate) fn kind(self) -> StrKind {
        if self.format {
            StrKind::Format
        } else if self.bytes {
            StrKind::Bytes
        } else {
            StrKind::Text
        }
    }

    /// Literal value of a content run.
    pub(crate) fn decode(self, content: &str) -> String {
        let text = if self.raw {
            content.to_string()
        } else {
            decode_escapes(content, self.bytes)
        };
        if self.format {
            text.replace("{{", "{").replace("}}", "}")
        } else {
            text
        }
    }
}

/// Decode backslash escapes of a non-raw literal.
///
/// Unknown escapes are kept verbatim, as Python does. `\u`, `\U` and `\N`
/// are only escapes in text literals.
pub(crate) fn decode_escapes(content: &str, bytes: bool) -> String {
    let mut out = String::with_capacity(content.len());
    let mut chars = content.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        let Some(escape) = chars.next() else {
            out.push('\\');
            break;
        };
        match escape {
            '\n' => {}
            '\r' => {
                if chars.peek() == Some(&'\n') {
                    chars.next();
                }
            }
            '\\' | '\'' | '"' => out.push(escape),
            'n' => out.push('\n'),
            't' => out.push('\t'),
            'r' => out.push('\r'),
            'a' => out.push('\u{07}'),
            'b' => out.push('\u{08}'),
            'f' => out.push('\u{0c}'),
            'v' => out.push('\u{0b}'),
            '0'..='7' => {
                let mut value = escape.to_digit(8).unwrap_or(0);
                for _ in 0..2 {
                    match chars.peek().and_then(|d| d.to_digit(8)) {
                        Some(d) => {
                            value = value * 8 + d;
                            chars.next();
                        }
                        None => break,
                    }
                }
                push_code_point(&mut out, value, escape);
            }
            'x' => push_hex_escape(&mut out, &mut chars, 'x', 2),
            'u' if !bytes => push_hex_escape(&mut out, &mut chars, 'u', 4),
            'U' if !bytes => push_hex_escape(&mut out, &mut chars, 'U', 8),
            other => {
                out.push('\\');
                out.push(other);
            }
        }
    }

    out
}

fn push_hex_escape(out: &mut String, chars: &mut Peekable<Chars<'_>>, marker: char, width: usize) {
    let mut digits = String::with_capacity(width);
    while digits.len() < width {
        match chars.peek() {
            Some(d) if d.is_ascii_hexdigit() => {
                digits.push(*d);
                chars.next();
            }
            _ => break,
        }
    }
    match u32::from_str_radix(&digits, 16) {
        Ok(value) if digits.len() == width => push_code_point(out, value, marker),
        _ => {
            out.push('\\');
            out.push(marker);
            out.push_str(&digits);
        }
    }
}

fn push_code_point(out: &mut String, value: u32, fallback: char) {
    match char::from_u32(value) {
        Some(c) => out.push(c),
        None => {
            out.push('\\');
            out.push(fallback);
        }
    }
}

/// Canonical decimal spelling of an integer literal.
///
/// Imaginary literals and values beyond `u128` keep their cleaned text.
pub(crate) fn canonical_integer(text: &str) -> String {
    let cleaned: String = text
        .chars()
        .filter(|c| *c != '_')
        .map(|c| c.to_ascii_lowercase())
        .collect();
    if cleaned.ends_with('j') {
        return cleaned;
    }

    let (digits, radix) = if let Some(rest) = cleaned.strip_prefix("0x") {
        (rest, 16)
    } else if let Some(rest) = cleaned.strip_prefix("0o") {
        (rest, 8)
    } else if let Some(rest) = cleaned.strip_prefix("0b") {
        (rest, 2)
    } else {
        (cleaned.as_str(), 10)
    };

    u128::from_str_radix(digits, radix).map_or_else(|_| cleaned.clone(), |v| v.to_string())
}

/// Canonical spelling of a float literal (`1_0.50` and `10.5` agree).
pub(crate) fn canonical_float(text: &str) -> String {
    let cleaned: String = text
        .chars()
        .filter(|c| *c != '_')
        .map(|c| c.to_ascii_lowercase())
        .collect();
    if cleaned.ends_with('j') {
        return cleaned;
    }
    cleaned
        .parse::<f64>()
        .map_or(cleaned.clone(), |value| format!("{value:?}"))
}
