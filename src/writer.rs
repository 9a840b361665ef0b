//! Writing key/value pairs in `.properties` form.
//!
//! Output layout:
//!
//! ```text
//! #optional user comment, one line per comment line
//! # Mon Jan 15 10:30:00 +00:00 2024
//! escaped\ key = escaped value
//! ```

use crate::escape::{encode_text, save_convert, write_comments};
use crate::options::PropertiesOptions;
use crate::Result;
use chrono::Local;
use std::io::{BufWriter, Write};

/// `strftime` pattern of the header timestamp.
pub const TIMESTAMP_FORMAT: &str = "%a %b %d %H:%M:%S %Z %Y";

fn timestamp(options: &PropertiesOptions) -> String {
    match options.timestamp {
        Some(fixed) => fixed.format(TIMESTAMP_FORMAT).to_string(),
        None => Local::now().format(TIMESTAMP_FORMAT).to_string(),
    }
}

/// Writes `entries` to `writer`, preceded by the comment block and a timestamp line.
///
/// Entries are written in iteration order. The writer is buffered
/// internally and flushed before returning.
///
/// # Examples
///
/// ```rust
/// use chrono::DateTime;
/// use serde_properties::{store_entries, PropertiesOptions};
///
/// let options = PropertiesOptions::new()
///     .with_timestamp(DateTime::parse_from_rfc3339("2024-01-15T10:30:00+00:00").unwrap());
/// let mut out = Vec::new();
/// store_entries(&mut out, [("greeting", "hi there")], Some("demo"), &options).unwrap();
///
/// assert_eq!(
///     String::from_utf8(out).unwrap(),
///     "#demo\n# Mon Jan 15 10:30:00 +00:00 2024\ngreeting = hi there\n"
/// );
/// ```
///
/// # Errors
///
/// Returns [`Error::Io`](crate::Error::Io) as soon as a write fails. Bytes
/// already flushed stay written.
pub fn store_entries<'a, W, I>(
    writer: W,
    entries: I,
    comments: Option<&str>,
    options: &PropertiesOptions,
) -> Result<()>
where
    W: Write,
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    let newline = options.line_ending.as_str();
    let mut out = BufWriter::new(writer);
    let mut text = String::with_capacity(256);
    let mut bytes = Vec::with_capacity(256);

    if let Some(comments) = comments {
        write_comments(comments, newline, &mut text);
    }
    text.push_str("# ");
    text.push_str(&timestamp(options));
    text.push_str(newline);
    encode_text(&text, options.encoding, &mut bytes);
    out.write_all(&bytes)?;

    let mut count = 0usize;
    for (key, value) in entries {
        text.clear();
        bytes.clear();
        save_convert(key, true, options.escape_unicode, &mut text);
        text.push_str(" = ");
        save_convert(value, false, options.escape_unicode, &mut text);
        text.push_str(newline);
        encode_text(&text, options.encoding, &mut bytes);
        out.write_all(&bytes)?;
        count += 1;
    }

    out.flush()?;
    tracing::debug!(
        entries = count,
        encoding = options.encoding.name(),
        "stored properties"
    );
    Ok(())
}
