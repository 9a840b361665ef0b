//! Error types for reading and writing `.properties` documents.
//!
//! ## Error Categories
//!
//! - **I/O Errors**: Failures of the underlying byte source or sink, passed through unchanged
//! - **Malformed Escapes**: A `\uXXXX` escape whose four characters are not all hexadecimal
//! - **Encoding Errors**: Input that is not valid in the configured [`Encoding`](crate::Encoding)
//! - **XML Errors**: Failures of the XML transcoding path
//! - **Serde Errors**: Values that cannot be mapped to or from flat string pairs
//!
//! A malformed escape aborts the whole load. Pairs stored before the failing
//! line stay in the property list; the failing pair is never stored.
//!
//! ## Examples
//!
//! ```rust
//! use serde_properties::{Error, Properties};
//!
//! let mut props: Properties = Properties::new();
//! let result = props.load(&b"ok=1\nbad=\\uZZZZ\n"[..]);
//!
//! assert!(matches!(result, Err(Error::MalformedEscape { line: 2, .. })));
//! assert_eq!(props.get_property("ok"), Some("1"));
//! assert_eq!(props.get_property("bad"), None);
//! ```

use std::fmt;
use std::io;
use thiserror::Error;

/// Represents all possible errors that can occur while loading or storing properties.
#[derive(Debug, Error)]
pub enum Error {
    /// IO error from the underlying reader or writer
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// A `\uXXXX` escape with non-hexadecimal digits
    #[error("Malformed \\uxxxx encoding at line {line}: {sequence:?}")]
    MalformedEscape { line: usize, sequence: String },

    /// A logical line that is not valid in the configured encoding
    #[error("Invalid {encoding} input at line {line}")]
    InvalidEncoding { line: usize, encoding: &'static str },

    /// Malformed XML document or XML writer failure
    #[error("XML error: {0}")]
    Xml(String),

    /// Encoding name not supported by the XML path
    #[error("Unsupported encoding: {0}")]
    UnsupportedEncoding(String),

    /// A property value that could not be parsed into the requested type
    #[error("Invalid value for key {key:?}: expected {expected}, found {found:?}")]
    InvalidValue {
        key: String,
        expected: &'static str,
        found: String,
    },

    /// Unsupported type for serialization
    #[error("Unsupported type: {0}")]
    UnsupportedType(String),

    /// Custom error
    #[error("Error: {0}")]
    Custom(String),
}

impl Error {
    /// Creates a malformed escape error for the given physical line.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_properties::Error;
    ///
    /// let err = Error::malformed_escape(3, "\\u12G4");
    /// assert!(err.to_string().contains("line 3"));
    /// ```
    pub fn malformed_escape(line: usize, sequence: &str) -> Self {
        Error::MalformedEscape {
            line,
            sequence: sequence.to_string(),
        }
    }

    /// Creates an XML error from anything displayable, usually a `quick_xml` error.
    pub fn xml<T: fmt::Display>(msg: T) -> Self {
        Error::Xml(msg.to_string())
    }

    pub fn invalid_value(key: &str, expected: &'static str, found: &str) -> Self {
        Error::InvalidValue {
            key: key.to_string(),
            expected,
            found: found.to_string(),
        }
    }

    /// Creates an unsupported type error for values that have no flat string form.
    pub fn unsupported_type(msg: &str) -> Self {
        Error::UnsupportedType(msg.to_string())
    }

    /// Creates a custom error with a display message.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_properties::Error;
    ///
    /// let err = Error::custom("something went wrong");
    /// assert!(err.to_string().contains("something went wrong"));
    /// ```
    pub fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }
}

impl serde::ser::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }
}

impl serde::de::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
