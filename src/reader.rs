//! Logical line reading and key/value splitting.
//!
//! A *physical* line ends at `\n`, `\r` or `\r\n`. A *logical* line is what
//! remains after joining physical lines that end in an unescaped backslash,
//! dropping comment and blank lines and trimming leading whitespace.
//!
//! ```text
//! # comment              -> skipped
//!                        -> skipped (blank or whitespace only)
//! fruits = apple, \
//!          banana        -> "fruits = apple, banana"
//! ```
//!
//! [`LineReader`] produces logical lines and [`split_key_value`] finds the
//! key/value boundary inside one. [`load_into`] drives both and fills a
//! [`PropertyStore`].

use crate::escape::load_convert;
use crate::map::PropertyStore;
use crate::options::PropertiesOptions;
use crate::Result;
use std::io::{ErrorKind, Read};

const INPUT_BUFFER_SIZE: usize = 8192;
const LINE_BUFFER_SIZE: usize = 1024;

/// One logical line, borrowed from the reader's line buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogicalLine<'a> {
    /// Continuation-joined bytes, without the line terminator.
    pub bytes: &'a [u8],
    /// 1-based physical line on which the logical line starts.
    pub line: usize,
}

/// Reads logical lines from a byte source.
///
/// # Examples
///
/// ```rust
/// use serde_properties::LineReader;
///
/// let input = b"# header\nkey = a \\\n    b\n\n!other comment\nlast";
/// let mut reader = LineReader::new(&input[..]);
///
/// let line = reader.read_line().unwrap().unwrap();
/// assert_eq!(line.bytes, b"key = a b");
/// assert_eq!(line.line, 2);
///
/// let line = reader.read_line().unwrap().unwrap();
/// assert_eq!(line.bytes, b"last");
///
/// assert!(reader.read_line().unwrap().is_none());
/// ```
pub struct LineReader<R> {
    reader: R,
    in_buf: Vec<u8>,
    in_off: usize,
    in_limit: usize,
    line_buf: Vec<u8>,
    /// Physical line terminators consumed so far.
    lines_seen: usize,
    last_was_cr: bool,
}

impl<R: Read> LineReader<R> {
    pub fn new(reader: R) -> Self {
        LineReader {
            reader,
            in_buf: vec![0; INPUT_BUFFER_SIZE],
            in_off: 0,
            in_limit: 0,
            line_buf: vec![0; LINE_BUFFER_SIZE],
            lines_seen: 0,
            last_was_cr: false,
        }
    }

    /// Consumes the reader, returning the underlying source.
    pub fn into_inner(self) -> R {
        self.reader
    }

    /// Refills the input buffer if it is exhausted.
    ///
    /// Returns `false` at end of input.
    fn fill(&mut self) -> Result<bool> {
        if self.in_off < self.in_limit {
            return Ok(true);
        }
        loop {
            match self.reader.read(&mut self.in_buf) {
                Ok(n) => {
                    self.in_off = 0;
                    self.in_limit = n;
                    return Ok(n > 0);
                }
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            }
        }
    }

    fn next_byte(&mut self) -> Result<Option<u8>> {
        if !self.fill()? {
            return Ok(None);
        }
        let c = self.in_buf[self.in_off];
        self.in_off += 1;
        if c == b'\r' || (c == b'\n' && !self.last_was_cr) {
            self.lines_seen += 1;
        }
        self.last_was_cr = c == b'\r';
        Ok(Some(c))
    }

    /// Appends a byte to the line buffer, doubling it when full.
    fn push(&mut self, len: usize, c: u8) -> usize {
        self.line_buf[len] = c;
        let len = len + 1;
        if len == self.line_buf.len() {
            self.line_buf.resize(len * 2, 0);
        }
        len
    }

    /// Reads the next logical line.
    ///
    /// Returns `Ok(None)` at end of input. A trailing continuation backslash
    /// right before end of input is dropped and the partial line returned.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`](crate::Error::Io) if the source fails.
    pub fn read_line(&mut self) -> Result<Option<LogicalLine<'_>>> {
        let mut len = 0;
        let mut start_line = self.lines_seen + 1;

        let mut skip_white_space = true;
        let mut is_comment_line = false;
        let mut is_new_line = true;
        let mut appended_line_begin = false;
        let mut preceding_backslash = false;
        let mut skip_lf = false;

        loop {
            let Some(c) = self.next_byte()? else {
                if len == 0 || is_comment_line {
                    return Ok(None);
                }
                if preceding_backslash {
                    len -= 1;
                }
                return Ok(Some(self.logical_line(len, start_line)));
            };

            if skip_lf {
                skip_lf = false;
                if c == b'\n' {
                    continue;
                }
            }
            if skip_white_space {
                if c == b' ' || c == b'\t' || c == 0x0C {
                    continue;
                }
                if !appended_line_begin && (c == b'\r' || c == b'\n') {
                    continue;
                }
                skip_white_space = false;
                appended_line_begin = false;
            }
            if is_new_line {
                is_new_line = false;
                start_line = self.lines_seen + 1;
                if c == b'#' || c == b'!' {
                    is_comment_line = true;
                    continue;
                }
            }

            if c != b'\n' && c != b'\r' {
                len = self.push(len, c);
                if c == b'\\' {
                    preceding_backslash = !preceding_backslash;
                } else {
                    preceding_backslash = false;
                }
                continue;
            }

            // Reached a line terminator.
            if is_comment_line || len == 0 {
                is_comment_line = false;
                is_new_line = true;
                skip_white_space = true;
                len = 0;
                continue;
            }
            if !self.fill()? {
                if preceding_backslash {
                    len -= 1;
                }
                return Ok(Some(self.logical_line(len, start_line)));
            }
            if !preceding_backslash {
                return Ok(Some(self.logical_line(len, start_line)));
            }

            // Continuation: drop the backslash, trim the next line's indent.
            len -= 1;
            skip_white_space = true;
            appended_line_begin = true;
            preceding_backslash = false;
            if c == b'\r' {
                skip_lf = true;
            }
        }
    }

    fn logical_line(&self, len: usize, line: usize) -> LogicalLine<'_> {
        LogicalLine {
            bytes: &self.line_buf[..len],
            line,
        }
    }
}

#[inline]
fn is_separator_space(c: u8) -> bool {
    c == b' ' || c == b'\t' || c == 0x0C
}

/// Finds the key/value boundary in a logical line.
///
/// Returns `(key_end, value_start)`: the key is `line[..key_end]` and the
/// value is `line[value_start..]`, both still escaped. The key ends at the
/// first unescaped `=`, `:` or whitespace. At most one `=`/`:` separator is
/// consumed, optionally surrounded by whitespace.
///
/// # Examples
///
/// ```rust
/// use serde_properties::split_key_value;
///
/// let line = b"key : value";
/// let (key_end, value_start) = split_key_value(line);
/// assert_eq!(&line[..key_end], b"key");
/// assert_eq!(&line[value_start..], b"value");
///
/// let line = br"a\=b=c";
/// let (key_end, value_start) = split_key_value(line);
/// assert_eq!(&line[..key_end], br"a\=b");
/// assert_eq!(&line[value_start..], b"c");
/// ```
#[must_use]
pub fn split_key_value(line: &[u8]) -> (usize, usize) {
    let limit = line.len();
    let mut key_len = 0;
    let mut value_start = limit;
    let mut has_sep = false;
    let mut preceding_backslash = false;

    while key_len < limit {
        let c = line[key_len];
        if (c == b'=' || c == b':') && !preceding_backslash {
            value_start = key_len + 1;
            has_sep = true;
            break;
        } else if is_separator_space(c) && !preceding_backslash {
            value_start = key_len + 1;
            break;
        }
        if c == b'\\' {
            preceding_backslash = !preceding_backslash;
        } else {
            preceding_backslash = false;
        }
        key_len += 1;
    }

    while value_start < limit {
        let c = line[value_start];
        if !is_separator_space(c) {
            if !has_sep && (c == b'=' || c == b':') {
                has_sep = true;
            } else {
                break;
            }
        }
        value_start += 1;
    }

    (key_len, value_start)
}

/// Reads every logical line from `reader` into `store`.
///
/// Returns the number of pairs read. Pairs are put as they are parsed, so
/// on error everything before the failing line stays in the store.
///
/// # Errors
///
/// - [`Error::Io`](crate::Error::Io) if the source fails
/// - [`Error::MalformedEscape`](crate::Error::MalformedEscape) for a bad `\uXXXX`
/// - [`Error::InvalidEncoding`](crate::Error::InvalidEncoding) for non-UTF-8 input in UTF-8 mode
pub fn load_into<R, S>(reader: R, store: &mut S, options: &PropertiesOptions) -> Result<usize>
where
    R: Read,
    S: PropertyStore + ?Sized,
{
    let mut lines = LineReader::new(reader);
    let mut count = 0;

    while let Some(logical) = lines.read_line()? {
        let (key_end, value_start) = split_key_value(logical.bytes);
        let key = load_convert(&logical.bytes[..key_end], options.encoding, logical.line)?;
        let value = load_convert(&logical.bytes[value_start..], options.encoding, logical.line)?;
        tracing::trace!(line = logical.line, key = %key, "parsed property");
        store.put(key, value);
        count += 1;
    }

    tracing::debug!(
        pairs = count,
        lines = lines.lines_seen,
        encoding = options.encoding.name(),
        "loaded properties"
    );
    Ok(count)
}
