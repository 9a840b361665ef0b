//! # serde_properties
//!
//! A reader and writer for the line-oriented `.properties` configuration format,
//! with Serde support for flat structs and maps.
//!
//! ## What is a `.properties` file?
//!
//! A text file of `key=value` pairs, one logical line each:
//!
//! ```text
//! # comment lines start with '#' or '!'
//! greeting = Hello, world
//! path: C:\\tools\\bin
//! multi = first part \
//!         second part
//! unicode = caf\u00E9
//! ```
//!
//! ## Key Features
//!
//! - **Faithful codec**: Continuation lines, backslash escapes, `\uXXXX` and
//!   every separator form (`=`, `:`, whitespace) behave as the format defines
//! - **Streaming reader**: Input is read through a fixed buffer; any `Read` works
//! - **Defaults chains**: Lookups fall back through shared parent lists
//! - **Pluggable stores**: Unordered `HashMap` or insertion-ordered `IndexMap`
//! - **XML form**: Load and store the `<properties>` XML document
//! - **Serde Compatible**: Flat structs round-trip via `#[derive(Serialize, Deserialize)]`
//!
//! ## Quick Start
//!
//! Add this to your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! serde_properties = "0.1"
//! serde = { version = "1.0", features = ["derive"] }
//! ```
//!
//! ### Loading and Storing
//!
//! ```rust
//! use serde_properties::{OrderedProperties, PropertiesOptions};
//! use chrono::DateTime;
//!
//! let mut props = OrderedProperties::new().with_options(
//!     PropertiesOptions::new()
//!         .with_timestamp(DateTime::parse_from_rfc3339("2024-01-15T10:30:00+00:00").unwrap()),
//! );
//! props.load(&b"name = demo\nsize: 3\n"[..]).unwrap();
//! props.set_property("empty", "");
//!
//! let mut out = Vec::new();
//! props.store(&mut out, Some("generated")).unwrap();
//! assert_eq!(
//!     String::from_utf8(out).unwrap(),
//!     "#generated\n# Mon Jan 15 10:30:00 +00:00 2024\nname = demo\nsize = 3\nempty = \n"
//! );
//! ```
//!
//! ### Serde
//!
//! ```rust
//! use serde::{Deserialize, Serialize};
//! use serde_properties::{from_str, to_string};
//!
//! #[derive(Serialize, Deserialize, PartialEq, Debug)]
//! struct Database {
//!     url: String,
//!     pool_size: u32,
//!     read_only: bool,
//! }
//!
//! let db = Database {
//!     url: "postgres://localhost/app".to_string(),
//!     pool_size: 16,
//!     read_only: false,
//! };
//!
//! let text = to_string(&db).unwrap();
//! // Output (after the timestamp line): "url = postgres\://localhost/app\npool_size = 16\n..."
//!
//! let back: Database = from_str(&text).unwrap();
//! assert_eq!(db, back);
//! ```
//!
//! ### Building Lists with properties! Macro
//!
//! ```rust
//! use serde_properties::properties;
//!
//! let props = properties! {
//!     "user" => "admin",
//!     "timeout" => "30",
//! };
//! assert_eq!(props.get_property("timeout"), Some("30"));
//! ```
//!
//! ## Encodings
//!
//! Input and output bytes map to characters through [`Encoding`]:
//! ISO-8859-1 by default (one byte per character), or UTF-8. With the
//! default options every character outside printable ASCII is written as
//! `\uXXXX`, so stored files are plain ASCII.
//!
//! ## Logging
//!
//! The crate emits `tracing` events: `trace` per parsed pair, `debug` per
//! completed load or store, `warn` when a lone surrogate escape is replaced.
//! No subscriber is installed.
//!
//! ## Safety Guarantees
//!
//! - No `unsafe` code blocks
//! - Line buffers grow on demand, with no fixed line length limit
//! - Proper error propagation with `Result` types

pub mod de;
pub mod error;
mod escape;
pub mod macros;
pub mod map;
pub mod options;
pub mod properties;
pub mod reader;
pub mod ser;
pub mod writer;
pub mod xml;

pub use de::Deserializer;
pub use error::{Error, Result};
pub use map::PropertyStore;
pub use options::{Encoding, LineEnding, PropertiesOptions};
pub use properties::{OrderedProperties, Properties};
pub use reader::{load_into, split_key_value, LineReader, LogicalLine};
pub use ser::Serializer;
pub use writer::store_entries;
pub use xml::{QuickXml, XmlSupport};

use serde::{Deserialize, Serialize};
use std::io;

/// Flatten any `T: Serialize` into an ordered property list.
///
/// # Examples
///
/// ```rust
/// use serde_properties::to_properties;
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct Point { x: i32, y: i32 }
///
/// let props = to_properties(&Point { x: 1, y: 2 }).unwrap();
/// assert_eq!(props.get_property("y"), Some("2"));
/// ```
///
/// # Errors
///
/// Returns [`Error::UnsupportedType`] unless `T` is a struct or map of scalars.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_properties<T>(value: &T) -> Result<OrderedProperties>
where
    T: ?Sized + Serialize,
{
    let mut serializer = Serializer::new();
    value.serialize(&mut serializer)?;
    Ok(serializer.into_inner())
}

/// Serialize any `T: Serialize` to `.properties` text with the default options.
///
/// The text starts with a timestamp comment line.
///
/// # Errors
///
/// Returns an error if the value cannot be flattened into string pairs.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string<T>(value: &T) -> Result<String>
where
    T: ?Sized + Serialize,
{
    to_string_with_options(value, PropertiesOptions::default())
}

/// Serialize any `T: Serialize` to `.properties` text with custom options.
///
/// # Examples
///
/// ```rust
/// use serde_properties::{to_string_with_options, LineEnding, PropertiesOptions};
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct Point { x: i32, y: i32 }
///
/// let options = PropertiesOptions::utf8().with_line_ending(LineEnding::CrLf);
/// let text = to_string_with_options(&Point { x: 1, y: 2 }, options).unwrap();
/// assert!(text.ends_with("x = 1\r\ny = 2\r\n"));
/// ```
///
/// # Errors
///
/// Returns an error if the value cannot be flattened, or if Latin-1 output
/// without unicode escaping produced bytes that are not valid UTF-8.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string_with_options<T>(value: &T, options: PropertiesOptions) -> Result<String>
where
    T: ?Sized + Serialize,
{
    let mut buffer = Vec::with_capacity(256);
    to_writer_with_options(&mut buffer, value, options)?;
    String::from_utf8(buffer).map_err(|e| Error::custom(format!("stored text is not UTF-8: {}", e)))
}

/// Serialize any `T: Serialize` to a writer in `.properties` form.
///
/// # Examples
///
/// ```rust
/// use serde_properties::to_writer;
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct Point { x: i32, y: i32 }
///
/// let mut buffer = Vec::new();
/// to_writer(&mut buffer, &Point { x: 1, y: 2 }).unwrap();
/// assert!(buffer.ends_with(b"x = 1\ny = 2\n"));
/// ```
///
/// # Errors
///
/// Returns an error if serialization fails or writing to the writer fails.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_writer<W, T>(writer: W, value: &T) -> Result<()>
where
    W: io::Write,
    T: ?Sized + Serialize,
{
    to_writer_with_options(writer, value, PropertiesOptions::default())
}

/// Serialize any `T: Serialize` to a writer in `.properties` form with custom options.
///
/// # Errors
///
/// Returns an error if serialization fails or writing to the writer fails.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_writer_with_options<W, T>(writer: W, value: &T, options: PropertiesOptions) -> Result<()>
where
    W: io::Write,
    T: ?Sized + Serialize,
{
    let props = to_properties(value)?.with_options(options);
    props.store(writer, None)
}

/// Deserialize an instance of type `T` from `.properties` text.
///
/// The text is read as UTF-8, so non-ASCII characters may appear literally
/// as well as in `\uXXXX` form.
///
/// # Examples
///
/// ```rust
/// use serde_properties::from_str;
/// use serde::Deserialize;
///
/// #[derive(Deserialize, PartialEq, Debug)]
/// struct Point { x: i32, y: i32 }
///
/// let point: Point = from_str("x = 1\ny: 2").unwrap();
/// assert_eq!(point, Point { x: 1, y: 2 });
/// ```
///
/// # Errors
///
/// Returns an error on a malformed escape, or if a value cannot be parsed
/// as the field type requires.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_str<T>(s: &str) -> Result<T>
where
    T: for<'de> Deserialize<'de>,
{
    from_reader_with_options(s.as_bytes(), &PropertiesOptions::utf8())
}

/// Deserialize an instance of type `T` from ISO-8859-1 `.properties` bytes.
///
/// # Examples
///
/// ```rust
/// use serde_properties::from_slice;
/// use serde::Deserialize;
///
/// #[derive(Deserialize, PartialEq, Debug)]
/// struct Label { text: String }
///
/// let label: Label = from_slice(b"text = caf\xE9").unwrap();
/// assert_eq!(label.text, "caf\u{e9}");
/// ```
///
/// # Errors
///
/// Returns an error on a malformed escape or a value of the wrong form.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_slice<T>(v: &[u8]) -> Result<T>
where
    T: for<'de> Deserialize<'de>,
{
    from_reader(v)
}

/// Deserialize an instance of type `T` from an I/O stream of ISO-8859-1 `.properties`.
///
/// # Examples
///
/// ```rust
/// use serde_properties::from_reader;
/// use serde::Deserialize;
/// use std::io::Cursor;
///
/// #[derive(Deserialize, PartialEq, Debug)]
/// struct Point { x: i32, y: i32 }
///
/// let cursor = Cursor::new(b"x 1\ny 2\n");
/// let point: Point = from_reader(cursor).unwrap();
/// assert_eq!(point, Point { x: 1, y: 2 });
/// ```
///
/// # Errors
///
/// Returns an error if reading fails, the input has a malformed escape,
/// or the pairs cannot be deserialized to type `T`.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_reader<R, T>(reader: R) -> Result<T>
where
    R: io::Read,
    T: for<'de> Deserialize<'de>,
{
    from_reader_with_options(reader, &PropertiesOptions::default())
}

/// Deserialize an instance of type `T` from an I/O stream with custom options.
///
/// Only [`PropertiesOptions::encoding`] affects loading.
///
/// # Errors
///
/// Returns an error if reading fails, the input is not valid in the chosen
/// encoding, or the pairs cannot be deserialized to type `T`.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_reader_with_options<R, T>(reader: R, options: &PropertiesOptions) -> Result<T>
where
    R: io::Read,
    T: for<'de> Deserialize<'de>,
{
    let mut table: indexmap::IndexMap<String, String> = indexmap::IndexMap::new();
    load_into(reader, &mut table, options)?;
    T::deserialize(Deserializer::new(table))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::DateTime;
    use serde::{Deserialize, Serialize};

    #[derive(Serialize, Deserialize, Debug, PartialEq)]
    struct Point {
        x: i32,
        y: i32,
    }

    #[derive(Serialize, Deserialize, Debug, PartialEq)]
    struct Account {
        id: u32,
        name: String,
        active: bool,
        note: Option<String>,
    }

    fn fixed() -> PropertiesOptions {
        PropertiesOptions::new()
            .with_timestamp(DateTime::parse_from_rfc3339("2024-01-15T10:30:00+00:00").unwrap())
    }

    #[test]
    fn test_serialize_deserialize_point() {
        let point = Point { x: 1, y: 2 };
        let text = to_string(&point).unwrap();
        let point_back: Point = from_str(&text).unwrap();
        assert_eq!(point, point_back);
    }

    #[test]
    fn test_serialize_deserialize_account() {
        let account = Account {
            id: 123,
            name: "Zoë = admin: #1".to_string(),
            active: true,
            note: None,
        };

        let text = to_string(&account).unwrap();
        assert!(text.is_ascii());
        let account_back: Account = from_str(&text).unwrap();
        assert_eq!(account, account_back);
    }

    #[test]
    fn test_exact_output() {
        let text = to_string_with_options(&Point { x: 1, y: -2 }, fixed()).unwrap();
        assert_eq!(text, "# Mon Jan 15 10:30:00 +00:00 2024\nx = 1\ny = -2\n");
    }

    #[test]
    fn test_latin1_without_escapes_is_not_a_string() {
        let options = fixed().with_escape_unicode(false);
        let account = Account {
            id: 1,
            name: "é".to_string(),
            active: false,
            note: None,
        };
        assert!(matches!(
            to_string_with_options(&account, options),
            Err(Error::Custom(_))
        ));
    }

    #[test]
    fn test_utf8_round_trip_through_writer() {
        let account = Account {
            id: 9,
            name: "日本".to_string(),
            active: false,
            note: Some("line one\nline two".to_string()),
        };

        let mut buffer = Vec::new();
        to_writer_with_options(&mut buffer, &account, PropertiesOptions::utf8()).unwrap();
        assert!(String::from_utf8_lossy(&buffer).contains("name = 日本"));

        let back: Account =
            from_reader_with_options(buffer.as_slice(), &PropertiesOptions::utf8()).unwrap();
        assert_eq!(account, back);
    }

    #[test]
    fn test_from_slice_reads_latin1() {
        let point: Point = from_slice(b"x=\\u0031\ny=2").unwrap();
        assert_eq!(point, Point { x: 1, y: 2 });
    }

    #[test]
    fn test_to_properties_rejects_scalar() {
        assert!(matches!(to_properties(&5u8), Err(Error::UnsupportedType(_))));
    }
}
