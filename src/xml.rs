//! XML transcoding of property lists.
//!
//! The XML form carries the same pairs as the text form:
//!
//! ```text
//! <?xml version="1.0" encoding="UTF-8" standalone="no"?>
//! <!DOCTYPE properties SYSTEM "http://java.sun.com/dtd/properties.dtd">
//! <properties>
//!     <comment>optional</comment>
//!     <entry key="name">value</entry>
//! </properties>
//! ```
//!
//! The implementation is a strategy value passed to
//! [`Properties::load_from_xml_with`](crate::Properties::load_from_xml_with) and
//! [`Properties::store_to_xml_with`](crate::Properties::store_to_xml_with).
//! [`QuickXml`] is the default.

use crate::{Error, Result};
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::{Reader, Writer};
use std::io::{Read, Write};

/// Body of the DOCTYPE declaration written before the root element.
pub const DOCTYPE: &str = r#"properties SYSTEM "http://java.sun.com/dtd/properties.dtd""#;

/// Reads and writes the XML form of a property list.
pub trait XmlSupport {
    /// Parses a whole document, returning its entries in document order.
    fn load(&self, input: &mut dyn Read) -> Result<Vec<(String, String)>>;

    /// Writes `entries` as a document in the named encoding.
    fn store(
        &self,
        output: &mut dyn Write,
        entries: &[(String, String)],
        comment: Option<&str>,
        encoding: &str,
    ) -> Result<()>;
}

/// [`XmlSupport`] on top of `quick-xml`. Only UTF-8 is supported.
#[derive(Debug, Clone, Copy, Default)]
pub struct QuickXml;

impl QuickXml {
    fn attribute_key(start: &BytesStart<'_>) -> Result<String> {
        for attr in start.attributes() {
            let attr = attr.map_err(|e| Error::xml(format!("Failed to parse XML attribute: {}", e)))?;
            if attr.key.as_ref() == b"key" {
                return attr
                    .unescape_value()
                    .map(|v| v.into_owned())
                    .map_err(|e| Error::xml(format!("Failed to decode XML value: {}", e)));
            }
        }
        Err(Error::xml("entry element without a key attribute"))
    }
}

impl XmlSupport for QuickXml {
    fn load(&self, input: &mut dyn Read) -> Result<Vec<(String, String)>> {
        let mut text = String::new();
        input.read_to_string(&mut text)?;

        let mut reader = Reader::from_str(&text);
        let mut buf = Vec::new();
        let mut entries = Vec::new();
        // Key and accumulated text of the entry being read.
        let mut current: Option<(String, String)> = None;

        loop {
            match reader.read_event_into(&mut buf) {
                Ok(Event::Start(e)) if e.name().as_ref() == b"entry" => {
                    current = Some((Self::attribute_key(&e)?, String::new()));
                }
                Ok(Event::Empty(e)) if e.name().as_ref() == b"entry" => {
                    entries.push((Self::attribute_key(&e)?, String::new()));
                }
                Ok(Event::Text(e)) => {
                    if let Some((_, value)) = current.as_mut() {
                        let unescaped = e
                            .unescape()
                            .map_err(|e| Error::xml(format!("Failed to decode XML text: {}", e)))?;
                        value.push_str(&unescaped);
                    }
                }
                Ok(Event::CData(e)) => {
                    if let Some((_, value)) = current.as_mut() {
                        let raw = e.into_inner();
                        value.push_str(&String::from_utf8_lossy(&raw));
                    }
                }
                Ok(Event::End(e)) if e.name().as_ref() == b"entry" => {
                    if let Some(entry) = current.take() {
                        entries.push(entry);
                    }
                }
                Ok(Event::Eof) => break,
                Err(e) => return Err(Error::xml(format!("Failed to read properties XML: {}", e))),
                _ => {}
            }
            buf.clear();
        }

        if current.is_some() {
            return Err(Error::xml("unterminated entry element"));
        }
        tracing::debug!(entries = entries.len(), "loaded properties XML");
        Ok(entries)
    }

    fn store(
        &self,
        output: &mut dyn Write,
        entries: &[(String, String)],
        comment: Option<&str>,
        encoding: &str,
    ) -> Result<()> {
        if !encoding.eq_ignore_ascii_case("UTF-8") {
            return Err(Error::UnsupportedEncoding(encoding.to_string()));
        }

        let mut writer = Writer::new_with_indent(Vec::new(), b' ', 4);
        writer
            .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), Some("no"))))
            .map_err(Error::xml)?;
        writer
            .write_event(Event::DocType(BytesText::from_escaped(DOCTYPE)))
            .map_err(Error::xml)?;
        writer
            .write_event(Event::Start(BytesStart::new("properties")))
            .map_err(Error::xml)?;
        if let Some(comment) = comment {
            writer
                .write_event(Event::Start(BytesStart::new("comment")))
                .map_err(Error::xml)?;
            writer
                .write_event(Event::Text(BytesText::new(comment)))
                .map_err(Error::xml)?;
            writer
                .write_event(Event::End(BytesEnd::new("comment")))
                .map_err(Error::xml)?;
        }
        for (key, value) in entries {
            let start = BytesStart::new("entry").with_attributes([("key", key.as_str())]);
            writer.write_event(Event::Start(start)).map_err(Error::xml)?;
            writer
                .write_event(Event::Text(BytesText::new(value)))
                .map_err(Error::xml)?;
            writer
                .write_event(Event::End(BytesEnd::new("entry")))
                .map_err(Error::xml)?;
        }
        writer
            .write_event(Event::End(BytesEnd::new("properties")))
            .map_err(Error::xml)?;

        let mut document = writer.into_inner();
        document.push(b'\n');
        output.write_all(&document)?;
        output.flush()?;
        tracing::debug!(entries = entries.len(), "stored properties XML");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store(entries: &[(&str, &str)], comment: Option<&str>) -> String {
        let entries: Vec<(String, String)> = entries
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        let mut out = Vec::new();
        QuickXml.store(&mut out, &entries, comment, "utf-8").unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_store_layout() {
        let xml = store(&[("status", "warn")], Some("log settings"));
        assert!(xml.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"no\"?>"));
        assert!(xml.contains("<!DOCTYPE properties SYSTEM \"http://java.sun.com/dtd/properties.dtd\">"));
        assert!(xml.contains("<comment>log settings</comment>"));
        assert!(xml.contains("<entry key=\"status\">warn</entry>"));
        assert!(xml.trim_end().ends_with("</properties>"));
    }

    #[test]
    fn test_round_trip_with_markup_characters() {
        let xml = store(&[("a<b", "x & \"y\""), ("empty", "")], None);
        let entries = QuickXml.load(&mut xml.as_bytes()).unwrap();
        assert_eq!(
            entries,
            vec![
                ("a<b".to_string(), "x & \"y\"".to_string()),
                ("empty".to_string(), String::new()),
            ]
        );
    }

    #[test]
    fn test_load_cdata_and_empty_entries() {
        let doc = r#"<?xml version="1.0"?>
<properties>
    <comment>ignored</comment>
    <entry key="pattern"><![CDATA[%d <%t>]]></entry>
    <entry key="blank"/>
</properties>"#;
        let entries = QuickXml.load(&mut doc.as_bytes()).unwrap();
        assert_eq!(
            entries,
            vec![
                ("pattern".to_string(), "%d <%t>".to_string()),
                ("blank".to_string(), String::new()),
            ]
        );
    }

    #[test]
    fn test_missing_key_is_an_error() {
        let doc = "<properties><entry>v</entry></properties>";
        assert!(matches!(QuickXml.load(&mut doc.as_bytes()), Err(Error::Xml(_))));
    }

    #[test]
    fn test_unsupported_encoding() {
        let mut out = Vec::new();
        let result = QuickXml.store(&mut out, &[], None, "ISO-8859-1");
        assert!(matches!(result, Err(Error::UnsupportedEncoding(name)) if name == "ISO-8859-1"));
        assert!(out.is_empty());
    }
}
