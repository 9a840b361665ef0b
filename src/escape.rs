//! The escape codec shared by the reader and the writer.
//!
//! Decoding turns `\uXXXX` and the single-letter escapes back into raw
//! characters. Encoding does the reverse for keys, values and comment blocks.
//!
//! | Escape | Character |
//! |--------|-----------|
//! | `\t` `\n` `\r` `\f` | tab, line feed, carriage return, form feed |
//! | `\uXXXX` | UTF-16 code unit, four hex digits |
//! | `\` + anything else | that character, literally |

use crate::options::Encoding;
use crate::{Error, Result};

const HEX_DIGITS: &[u8; 16] = b"0123456789ABCDEF";

/// Converts a nibble to an uppercase hex digit.
#[inline]
pub(crate) fn to_hex(nibble: u32) -> char {
    HEX_DIGITS[(nibble & 0xF) as usize] as char
}

/// Appends `\uXXXX` for every UTF-16 code unit of `ch`.
fn push_unicode_escape(ch: char, out: &mut String) {
    let mut units = [0u16; 2];
    for unit in ch.encode_utf16(&mut units) {
        let unit = u32::from(*unit);
        out.push_str("\\u");
        out.push(to_hex(unit >> 12));
        out.push(to_hex(unit >> 8));
        out.push(to_hex(unit >> 4));
        out.push(to_hex(unit));
    }
}

/// Decodes raw logical-line bytes into a string according to `encoding`.
pub(crate) fn decode_bytes(bytes: &[u8], encoding: Encoding, line: usize) -> Result<String> {
    match encoding {
        Encoding::Latin1 => Ok(bytes.iter().map(|&b| char::from(b)).collect()),
        Encoding::Utf8 => std::str::from_utf8(bytes)
            .map(str::to_owned)
            .map_err(|_| Error::InvalidEncoding {
                line,
                encoding: encoding.name(),
            }),
    }
}

/// Encodes output text into bytes according to `encoding`.
///
/// ISO-8859-1 has no byte for characters above U+00FF, so those are written
/// as `\uXXXX`, which reads back as the same character.
pub(crate) fn encode_text(text: &str, encoding: Encoding, out: &mut Vec<u8>) {
    match encoding {
        Encoding::Utf8 => out.extend_from_slice(text.as_bytes()),
        Encoding::Latin1 => {
            let mut escaped = String::new();
            for ch in text.chars() {
                match u8::try_from(u32::from(ch)) {
                    Ok(byte) => out.push(byte),
                    Err(_) => {
                        escaped.clear();
                        push_unicode_escape(ch, &mut escaped);
                        out.extend_from_slice(escaped.as_bytes());
                    }
                }
            }
        }
    }
}

/// Decodes one key or value: raw bytes first, then escape sequences.
///
/// Fails with [`Error::MalformedEscape`] when a `\u` is not followed by four
/// hex digits. `line` is only used for error reporting.
pub(crate) fn load_convert(bytes: &[u8], encoding: Encoding, line: usize) -> Result<String> {
    let text = decode_bytes(bytes, encoding, line)?;
    if !text.contains('\\') {
        return Ok(text);
    }

    let chars: Vec<char> = text.chars().collect();
    let mut out = String::with_capacity(text.len());
    let mut pending_high: Option<u16> = None;
    let mut i = 0;

    while i < chars.len() {
        let ch = chars[i];
        i += 1;
        if ch != '\\' {
            flush_surrogate(&mut pending_high, &mut out, line);
            out.push(ch);
            continue;
        }

        // A lone trailing backslash has nothing to escape.
        let Some(&escaped) = chars.get(i) else {
            break;
        };
        i += 1;

        if escaped == 'u' {
            let digits = chars.get(i..i + 4).unwrap_or(&chars[i..]);
            let mut unit: u16 = 0;
            for &digit in digits {
                let Some(value) = digit.to_digit(16) else {
                    return Err(malformed(digits, line));
                };
                unit = (unit << 4) | value as u16;
            }
            if digits.len() < 4 {
                return Err(malformed(digits, line));
            }
            i += 4;
            push_code_unit(unit, &mut pending_high, &mut out, line);
            continue;
        }

        flush_surrogate(&mut pending_high, &mut out, line);
        out.push(match escaped {
            't' => '\t',
            'r' => '\r',
            'n' => '\n',
            'f' => '\u{000C}',
            other => other,
        });
    }
    flush_surrogate(&mut pending_high, &mut out, line);

    Ok(out)
}

fn malformed(digits: &[char], line: usize) -> Error {
    let sequence: String = "\\u".chars().chain(digits.iter().copied()).collect();
    Error::malformed_escape(line, &sequence)
}

/// Combines UTF-16 code units from consecutive `\u` escapes into characters.
fn push_code_unit(unit: u16, pending_high: &mut Option<u16>, out: &mut String, line: usize) {
    if let Some(high) = pending_high.take() {
        if (0xDC00..=0xDFFF).contains(&unit) {
            match char::decode_utf16([high, unit]).next() {
                Some(Ok(ch)) => out.push(ch),
                _ => out.push(char::REPLACEMENT_CHARACTER),
            }
            return;
        }
        *pending_high = Some(high);
        flush_surrogate(pending_high, out, line);
    }

    match unit {
        0xD800..=0xDBFF => *pending_high = Some(unit),
        0xDC00..=0xDFFF => {
            tracing::warn!(line, unit = format_args!("{:#06x}", unit), "unpaired low surrogate replaced");
            out.push(char::REPLACEMENT_CHARACTER);
        }
        _ => out.push(char::from_u32(u32::from(unit)).unwrap_or(char::REPLACEMENT_CHARACTER)),
    }
}

fn flush_surrogate(pending_high: &mut Option<u16>, out: &mut String, line: usize) {
    if let Some(high) = pending_high.take() {
        tracing::warn!(line, unit = format_args!("{:#06x}", high), "unpaired high surrogate replaced");
        out.push(char::REPLACEMENT_CHARACTER);
    }
}

/// Escapes a key or value for output.
///
/// Keys pass `escape_space = true`; values only escape a leading space.
pub(crate) fn save_convert(text: &str, escape_space: bool, escape_unicode: bool, out: &mut String) {
    out.reserve(text.len() * 2);
    for (index, ch) in text.chars().enumerate() {
        let code = u32::from(ch);
        // Common case first: everything above '=' up to '~'.
        if code > 61 && code < 127 {
            if ch == '\\' {
                out.push_str("\\\\");
            } else {
                out.push(ch);
            }
            continue;
        }
        match ch {
            ' ' => {
                if index == 0 || escape_space {
                    out.push('\\');
                }
                out.push(' ');
            }
            '\t' => out.push_str("\\t"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\u{000C}' => out.push_str("\\f"),
            '=' | ':' | '#' | '!' => {
                out.push('\\');
                out.push(ch);
            }
            _ => {
                if (code < 0x20 || code > 0x7E) && escape_unicode {
                    push_unicode_escape(ch, out);
                } else {
                    out.push(ch);
                }
            }
        }
    }
}

/// Renders a comment block, one `#`-prefixed line per physical comment line.
///
/// Lines that already start with `#` or `!` keep their marker. Characters
/// above U+00FF are escaped.
pub(crate) fn write_comments(comments: &str, newline: &str, out: &mut String) {
    out.push('#');
    let chars: Vec<char> = comments.chars().collect();
    let len = chars.len();
    let mut current = 0;

    while current < len {
        let ch = chars[current];
        match ch {
            '\n' | '\r' => {
                out.push_str(newline);
                if ch == '\r' && current + 1 < len && chars[current + 1] == '\n' {
                    current += 1;
                }
                if current == len - 1 || (chars[current + 1] != '#' && chars[current + 1] != '!') {
                    out.push('#');
                }
            }
            c if u32::from(c) > 0xFF => push_unicode_escape(c, out),
            c => out.push(c),
        }
        current += 1;
    }
    out.push_str(newline);
}
