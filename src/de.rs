//! Deserializing Rust values from `.properties` documents.
//!
//! This module provides the [`Deserializer`] that maps loaded key/value
//! pairs onto a top-level struct or map.
//!
//! ## Overview
//!
//! - Every key is a field name or map key
//! - Every value is a string, parsed on demand into `bool`, integers,
//!   floats, `char`, unit enum variants or `Option`
//! - Missing `Option` fields become `None`
//!
//! ## Usage
//!
//! Most users should use the high-level functions in the crate root:
//!
//! ```rust
//! use serde_properties::from_str;
//! use serde::Deserialize;
//!
//! #[derive(Deserialize, Debug, PartialEq)]
//! struct Server { host: String, port: u16, secure: bool }
//!
//! let text = "host = example.org\nport: 8080\nsecure true";
//! let server: Server = from_str(text).unwrap();
//! assert_eq!(server, Server { host: "example.org".into(), port: 8080, secure: true });
//! ```

use crate::{Error, Result};
use indexmap::IndexMap;
use serde::de::{self, IntoDeserializer};
use serde::forward_to_deserialize_any;

/// Deserializer over already-decoded pairs.
///
/// Created via [`Deserializer::new`] from any iterator of string pairs.
pub struct Deserializer {
    entries: indexmap::map::IntoIter<String, String>,
    pending: Option<(String, String)>,
}

impl Deserializer {
    pub fn new<I: IntoIterator<Item = (String, String)>>(entries: I) -> Self {
        let entries: IndexMap<String, String> = entries.into_iter().collect();
        Deserializer {
            entries: entries.into_iter(),
            pending: None,
        }
    }
}

impl<'de> de::Deserializer<'de> for Deserializer {
    type Error = Error;

    fn deserialize_any<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_map(self)
    }

    forward_to_deserialize_any! {
        bool i8 i16 i32 i64 i128 u8 u16 u32 u64 u128 f32 f64 char str string
        bytes byte_buf option unit unit_struct newtype_struct seq tuple
        tuple_struct map struct enum identifier ignored_any
    }
}

impl<'de> de::MapAccess<'de> for Deserializer {
    type Error = Error;

    fn next_key_seed<K>(&mut self, seed: K) -> Result<Option<K::Value>>
    where
        K: de::DeserializeSeed<'de>,
    {
        match self.entries.next() {
            Some((key, value)) => {
                let result = seed.deserialize(key.as_str().into_deserializer()).map(Some);
                self.pending = Some((key, value));
                result
            }
            None => Ok(None),
        }
    }

    fn next_value_seed<V>(&mut self, seed: V) -> Result<V::Value>
    where
        V: de::DeserializeSeed<'de>,
    {
        match self.pending.take() {
            Some((key, value)) => seed.deserialize(ValueDeserializer { key, value }),
            None => Err(Error::custom("value requested before key")),
        }
    }

    fn size_hint(&self) -> Option<usize> {
        Some(self.entries.len())
    }
}

/// Deserializes one property value, parsing it as the visitor requests.
struct ValueDeserializer {
    key: String,
    value: String,
}

macro_rules! deserialize_parsed {
    ($($method:ident => $visit:ident: $ty:ty,)*) => {
        $(
            fn $method<V>(self, visitor: V) -> Result<V::Value>
            where
                V: de::Visitor<'de>,
            {
                match self.value.trim().parse::<$ty>() {
                    Ok(parsed) => visitor.$visit(parsed),
                    Err(_) => Err(Error::invalid_value(&self.key, stringify!($ty), &self.value)),
                }
            }
        )*
    };
}

impl<'de> de::Deserializer<'de> for ValueDeserializer {
    type Error = Error;

    fn deserialize_any<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_string(self.value)
    }

    deserialize_parsed! {
        deserialize_bool => visit_bool: bool,
        deserialize_i8 => visit_i8: i8,
        deserialize_i16 => visit_i16: i16,
        deserialize_i32 => visit_i32: i32,
        deserialize_i64 => visit_i64: i64,
        deserialize_i128 => visit_i128: i128,
        deserialize_u8 => visit_u8: u8,
        deserialize_u16 => visit_u16: u16,
        deserialize_u32 => visit_u32: u32,
        deserialize_u64 => visit_u64: u64,
        deserialize_u128 => visit_u128: u128,
        deserialize_f32 => visit_f32: f32,
        deserialize_f64 => visit_f64: f64,
        deserialize_char => visit_char: char,
    }

    fn deserialize_option<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_some(self)
    }

    fn deserialize_unit<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        if self.value.is_empty() {
            visitor.visit_unit()
        } else {
            Err(Error::invalid_value(&self.key, "empty value", &self.value))
        }
    }

    fn deserialize_newtype_struct<V>(self, _name: &'static str, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_newtype_struct(self)
    }

    fn deserialize_enum<V>(
        self,
        _name: &'static str,
        _variants: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        let variant: de::value::StringDeserializer<Error> = self.value.into_deserializer();
        visitor.visit_enum(variant)
    }

    fn deserialize_seq<V>(self, _visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        Err(Error::unsupported_type(&format!(
            "sequence for key {:?}; property values are flat strings",
            self.key
        )))
    }

    forward_to_deserialize_any! {
        str string bytes byte_buf unit_struct tuple tuple_struct map struct
        identifier ignored_any
    }
}
