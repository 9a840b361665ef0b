//! Configuration options for loading and storing properties.
//!
//! This module provides types to customize the codec:
//!
//! - [`PropertiesOptions`]: Main configuration struct
//! - [`LineEnding`]: Line terminator written after every output line
//! - [`Encoding`]: How raw bytes map to characters in both directions
//!
//! ## Examples
//!
//! ```rust
//! use serde_properties::{Encoding, LineEnding, PropertiesOptions};
//!
//! // Classic ISO-8859-1 output with `\uXXXX` escapes and `\n` terminators
//! let options = PropertiesOptions::new();
//! assert_eq!(options.encoding, Encoding::Latin1);
//!
//! // UTF-8 output, non-ASCII characters written raw, CRLF terminators
//! let options = PropertiesOptions::utf8().with_line_ending(LineEnding::CrLf);
//! assert!(!options.escape_unicode);
//! ```

use chrono::{DateTime, FixedOffset};

/// Line terminator used when storing.
///
/// The terminator is never inferred from the host: [`LineEnding::Lf`] is the
/// default and [`LineEnding::native`] has to be asked for explicitly.
///
/// # Examples
///
/// ```rust
/// use serde_properties::LineEnding;
///
/// assert_eq!(LineEnding::Lf.as_str(), "\n");
/// assert_eq!(LineEnding::CrLf.as_str(), "\r\n");
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum LineEnding {
    #[default]
    Lf,
    CrLf,
}

impl LineEnding {
    /// Returns the string representation of this line ending.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            LineEnding::Lf => "\n",
            LineEnding::CrLf => "\r\n",
        }
    }

    /// The platform convention: `\r\n` on Windows, `\n` everywhere else.
    #[must_use]
    pub const fn native() -> Self {
        if cfg!(windows) {
            LineEnding::CrLf
        } else {
            LineEnding::Lf
        }
    }
}

/// Byte encoding of a properties document.
///
/// - **Latin1**: ISO-8859-1, one byte per character. On store, characters
///   above U+00FF are written as `\uXXXX` escapes.
/// - **Utf8**: UTF-8. Invalid input fails the load.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Encoding {
    #[default]
    Latin1,
    Utf8,
}

impl Encoding {
    /// Returns the canonical name of this encoding.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_properties::Encoding;
    ///
    /// assert_eq!(Encoding::Latin1.name(), "ISO-8859-1");
    /// assert_eq!(Encoding::Utf8.name(), "UTF-8");
    /// ```
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Encoding::Latin1 => "ISO-8859-1",
            Encoding::Utf8 => "UTF-8",
        }
    }
}

/// Configuration options for loading and storing properties.
///
/// # Examples
///
/// ```rust
/// use chrono::DateTime;
/// use serde_properties::{LineEnding, PropertiesOptions};
///
/// let stamp = DateTime::parse_from_rfc3339("2024-01-15T10:30:00+00:00").unwrap();
/// let options = PropertiesOptions::new()
///     .with_line_ending(LineEnding::CrLf)
///     .with_escape_unicode(false)
///     .with_timestamp(stamp);
///
/// assert_eq!(options.timestamp, Some(stamp));
/// ```
#[derive(Clone, Debug)]
pub struct PropertiesOptions {
    pub line_ending: LineEnding,
    pub encoding: Encoding,
    pub escape_unicode: bool,
    /// Fixed time for the header comment; `None` uses the local clock.
    pub timestamp: Option<DateTime<FixedOffset>>,
}

impl Default for PropertiesOptions {
    fn default() -> Self {
        PropertiesOptions {
            line_ending: LineEnding::default(),
            encoding: Encoding::default(),
            escape_unicode: true,
            timestamp: None,
        }
    }
}

impl PropertiesOptions {
    /// Creates default options (ISO-8859-1, unicode escaping on, `\n` terminators).
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_properties::{LineEnding, PropertiesOptions};
    ///
    /// let options = PropertiesOptions::new();
    /// assert!(options.escape_unicode);
    /// assert_eq!(options.line_ending, LineEnding::Lf);
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates options for UTF-8 documents: no `\uXXXX` escaping on store.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_properties::{Encoding, PropertiesOptions};
    ///
    /// let options = PropertiesOptions::utf8();
    /// assert_eq!(options.encoding, Encoding::Utf8);
    /// assert!(!options.escape_unicode);
    /// ```
    #[must_use]
    pub fn utf8() -> Self {
        PropertiesOptions {
            encoding: Encoding::Utf8,
            escape_unicode: false,
            ..Default::default()
        }
    }

    /// Sets the line terminator written after every output line.
    #[must_use]
    pub fn with_line_ending(mut self, line_ending: LineEnding) -> Self {
        self.line_ending = line_ending;
        self
    }

    /// Sets the byte encoding used by both load and store.
    #[must_use]
    pub fn with_encoding(mut self, encoding: Encoding) -> Self {
        self.encoding = encoding;
        self
    }

    /// Controls whether characters outside printable ASCII are written as `\uXXXX`.
    #[must_use]
    pub fn with_escape_unicode(mut self, escape_unicode: bool) -> Self {
        self.escape_unicode = escape_unicode;
        self
    }

    /// Pins the header timestamp, which makes stored output reproducible.
    #[must_use]
    pub fn with_timestamp(mut self, timestamp: DateTime<FixedOffset>) -> Self {
        self.timestamp = Some(timestamp);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_native_line_ending_matches_target() {
        if cfg!(windows) {
            assert_eq!(LineEnding::native(), LineEnding::CrLf);
        } else {
            assert_eq!(LineEnding::native(), LineEnding::Lf);
        }
    }

    #[test]
    fn test_builder_chain() {
        let options = PropertiesOptions::utf8()
            .with_encoding(Encoding::Latin1)
            .with_escape_unicode(true)
            .with_line_ending(LineEnding::CrLf);

        assert_eq!(options.encoding, Encoding::Latin1);
        assert!(options.escape_unicode);
        assert_eq!(options.line_ending.as_str(), "\r\n");
        assert!(options.timestamp.is_none());
    }
}
