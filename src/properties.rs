//! The property list: a store of string pairs with optional defaults.
//!
//! [`Properties`] ties the codec to an association store. Loading reads
//! pairs into the own table; lookups fall back through a chain of default
//! property lists; storing writes only the own table.
//!
//! ## Examples
//!
//! ```rust
//! use std::sync::Arc;
//! use serde_properties::Properties;
//!
//! let mut defaults: Properties = Properties::new();
//! defaults.set_property("color", "blue");
//! defaults.set_property("size", "M");
//!
//! let mut props = Properties::with_defaults(Arc::new(defaults));
//! props.load(&b"size = XL\n"[..]).unwrap();
//!
//! assert_eq!(props.get_property("size"), Some("XL"));
//! assert_eq!(props.get_property("color"), Some("blue"));
//! assert_eq!(props.get_property_or("shape", "round"), "round");
//! ```

use crate::map::PropertyStore;
use crate::options::PropertiesOptions;
use crate::reader::load_into;
use crate::writer::store_entries;
use crate::xml::{QuickXml, XmlSupport};
use crate::Result;
use indexmap::IndexMap;
use std::collections::HashMap;
use std::io::{Read, Write};
use std::sync::Arc;

/// Values longer than this are shortened by [`Properties::list`].
const LIST_VALUE_WIDTH: usize = 40;

/// A property list backed by the store `S`.
///
/// The default store is an unordered `HashMap`; see [`OrderedProperties`]
/// for insertion order.
#[derive(Debug, Clone, Default)]
pub struct Properties<S: PropertyStore = HashMap<String, String>> {
    table: S,
    defaults: Option<Arc<Properties<S>>>,
    options: PropertiesOptions,
}

/// A property list that keeps entries in insertion order.
pub type OrderedProperties = Properties<IndexMap<String, String>>;

impl<S: PropertyStore> Properties<S> {
    /// Creates an empty property list with no defaults.
    #[must_use]
    pub fn new() -> Self {
        Properties {
            table: S::default(),
            defaults: None,
            options: PropertiesOptions::default(),
        }
    }

    /// Creates an empty property list that falls back to `defaults`.
    #[must_use]
    pub fn with_defaults(defaults: Arc<Properties<S>>) -> Self {
        Properties {
            defaults: Some(defaults),
            ..Self::new()
        }
    }

    /// Sets the options used by [`load`](Self::load) and [`store`](Self::store).
    #[must_use]
    pub fn with_options(mut self, options: PropertiesOptions) -> Self {
        self.options = options;
        self
    }

    pub fn options(&self) -> &PropertiesOptions {
        &self.options
    }

    pub fn defaults(&self) -> Option<&Arc<Properties<S>>> {
        self.defaults.as_ref()
    }

    /// Sets a property in the own table, returning the previous value.
    pub fn set_property(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.table.put(key.into(), value.into())
    }

    /// Looks a key up in the own table, then in the defaults, recursively.
    #[must_use]
    pub fn get_property(&self, key: &str) -> Option<&str> {
        match self.table.get(key) {
            Some(value) => Some(value),
            None => self.defaults.as_ref().and_then(|d| d.get_property(key)),
        }
    }

    /// Like [`get_property`](Self::get_property), with a fallback value.
    #[must_use]
    pub fn get_property_or<'a>(&'a self, key: &str, default_value: &'a str) -> &'a str {
        self.get_property(key).unwrap_or(default_value)
    }

    /// Removes a key from the own table. Defaults are not touched.
    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.table.remove(key)
    }

    /// Whether the own table contains `key`.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.table.get(key).is_some()
    }

    /// Number of entries in the own table.
    #[must_use]
    pub fn len(&self) -> usize {
        self.table.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Keys of the own table, in store order.
    pub fn keys(&self) -> impl Iterator<Item = &str> + '_ {
        self.table.keys()
    }

    /// Pairs of the own table, in store order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.table
            .keys()
            .filter_map(move |key| self.table.get(key).map(|value| (key, value)))
    }

    /// All keys, including distinct keys of the defaults chain.
    ///
    /// Defaults are enumerated first, so with an ordered store their keys
    /// come before the own keys.
    #[must_use]
    pub fn property_names(&self) -> Vec<String> {
        let mut merged = S::default();
        self.enumerate(&mut merged);
        merged.keys().map(str::to_owned).collect()
    }

    /// Copies the effective pairs (defaults overridden by own entries) into `into`.
    fn enumerate(&self, into: &mut S) {
        if let Some(defaults) = &self.defaults {
            defaults.enumerate(into);
        }
        for (key, value) in self.iter() {
            into.put(key.to_owned(), value.to_owned());
        }
    }

    /// Effective pairs, in [`property_names`](Self::property_names) order.
    fn effective_entries(&self) -> Vec<(String, String)> {
        self.property_names()
            .into_iter()
            .filter_map(|key| {
                let value = self.get_property(&key)?.to_owned();
                Some((key, value))
            })
            .collect()
    }

    /// Reads pairs from `reader` into the own table.
    ///
    /// Returns the number of pairs read. On error the pairs read before the
    /// failing line stay in the table.
    ///
    /// # Errors
    ///
    /// See [`load_into`](crate::load_into).
    pub fn load<R: Read>(&mut self, reader: R) -> Result<usize> {
        load_into(reader, &mut self.table, &self.options)
    }

    /// Writes the own table to `writer`, preceded by `comments` and a timestamp.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`](crate::Error::Io) if the writer fails.
    pub fn store<W: Write>(&self, writer: W, comments: Option<&str>) -> Result<()> {
        store_entries(writer, self.iter(), comments, &self.options)
    }

    /// Replaces the own table with the entries of an XML properties document.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Xml`](crate::Error::Xml) for malformed documents; the
    /// table is left untouched in that case.
    pub fn load_from_xml<R: Read>(&mut self, reader: R) -> Result<usize> {
        self.load_from_xml_with(reader, &QuickXml)
    }

    /// [`load_from_xml`](Self::load_from_xml) with an explicit XML implementation.
    pub fn load_from_xml_with<R: Read, X: XmlSupport + ?Sized>(
        &mut self,
        mut reader: R,
        xml: &X,
    ) -> Result<usize> {
        let entries = xml.load(&mut reader)?;
        let mut table = S::default();
        for (key, value) in entries {
            table.put(key, value);
        }
        let count = table.len();
        self.table = table;
        Ok(count)
    }

    /// Writes all effective pairs, defaults included, as a UTF-8 XML document.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`](crate::Error::Io) or [`Error::Xml`](crate::Error::Xml)
    /// on writer failure.
    pub fn store_to_xml<W: Write>(&self, writer: W, comments: Option<&str>) -> Result<()> {
        self.store_to_xml_with(writer, comments, "UTF-8", &QuickXml)
    }

    /// [`store_to_xml`](Self::store_to_xml) with an explicit encoding name and XML implementation.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedEncoding`](crate::Error::UnsupportedEncoding)
    /// if `xml` does not support `encoding`.
    pub fn store_to_xml_with<W: Write, X: XmlSupport + ?Sized>(
        &self,
        mut writer: W,
        comments: Option<&str>,
        encoding: &str,
        xml: &X,
    ) -> Result<()> {
        let entries = self.effective_entries();
        xml.store(&mut writer, &entries, comments, encoding)
    }

    /// Prints every effective pair, shortening long values, for debugging.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_properties::properties;
    ///
    /// let props = properties! { "name" => "demo" };
    /// let mut out = Vec::new();
    /// props.list(&mut out).unwrap();
    /// assert_eq!(out, b"-- listing properties --\nname=demo\n");
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`](crate::Error::Io) if the writer fails.
    pub fn list<W: Write>(&self, mut out: W) -> Result<()> {
        let newline = self.options.line_ending.as_str();
        write!(out, "-- listing properties --{}", newline)?;
        for (key, value) in self.effective_entries() {
            if value.chars().count() > LIST_VALUE_WIDTH {
                let short: String = value.chars().take(LIST_VALUE_WIDTH - 3).collect();
                write!(out, "{}={}...{}", key, short, newline)?;
            } else {
                write!(out, "{}={}{}", key, value, newline)?;
            }
        }
        Ok(())
    }

    /// Effective pairs as a `HashMap`, defaults included.
    #[must_use]
    pub fn to_map(&self) -> HashMap<String, String> {
        self.effective_entries().into_iter().collect()
    }

    /// Returns the own table, dropping defaults and options.
    pub fn into_inner(self) -> S {
        self.table
    }
}

impl<S: PropertyStore> From<S> for Properties<S> {
    fn from(table: S) -> Self {
        Properties {
            table,
            ..Self::new()
        }
    }
}

impl<S: PropertyStore> FromIterator<(String, String)> for Properties<S> {
    fn from_iter<T: IntoIterator<Item = (String, String)>>(iter: T) -> Self {
        let mut props = Self::new();
        for (key, value) in iter {
            props.table.put(key, value);
        }
        props
    }
}
