use chrono::DateTime;
use serde::{Deserialize, Serialize};
use serde_properties::{
    from_str, load_into, to_string_with_options, Encoding, Error, LineEnding, LineReader,
    OrderedProperties, Properties, PropertiesOptions, QuickXml,
};
use std::sync::Arc;

fn load(text: &str) -> OrderedProperties {
    let mut props = OrderedProperties::new();
    props.load(text.as_bytes()).unwrap();
    props
}

fn pairs(props: &OrderedProperties) -> Vec<(String, String)> {
    props
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

fn fixed() -> PropertiesOptions {
    PropertiesOptions::new()
        .with_timestamp(DateTime::parse_from_rfc3339("2024-01-15T10:30:00+00:00").unwrap())
}

#[test]
fn test_continuation_joins_lines() {
    let props = load("a=1\\\n    2\n");
    assert_eq!(props.get_property("a"), Some("12"));

    let mut reader = LineReader::new(&b"a=1\\\n    2\n"[..]);
    let line = reader.read_line().unwrap().unwrap();
    assert_eq!(line.bytes, b"a=12");
    assert!(reader.read_line().unwrap().is_none());
}

#[test]
fn test_continuation_across_line_terminators() {
    let props = load("crlf=a\\\r\n  b\r\ncr=c\\\r  d\rlast=e");
    assert_eq!(props.get_property("crlf"), Some("ab"));
    assert_eq!(props.get_property("cr"), Some("cd"));
    assert_eq!(props.get_property("last"), Some("e"));
}

#[test]
fn test_comment_skipping() {
    let props = load("# comment\nkey=val\n");
    assert_eq!(pairs(&props), vec![("key".to_string(), "val".to_string())]);
}

#[test]
fn test_comment_with_trailing_backslash_does_not_continue() {
    let props = load("! note \\\nkey=val\n");
    assert_eq!(props.len(), 1);
    assert_eq!(props.get_property("key"), Some("val"));
}

#[test]
fn test_whitespace_only_line_is_skipped() {
    let props = load("   \nkey=val\n");
    assert_eq!(pairs(&props), vec![("key".to_string(), "val".to_string())]);
}

#[test]
fn test_unicode_escape() {
    let props = load("k=\\u0041");
    assert_eq!(props.get_property("k"), Some("A"));

    let mut encoded = OrderedProperties::new().with_options(fixed());
    encoded.set_property("k", "\u{1}A\u{7f}");
    let mut out = Vec::new();
    encoded.store(&mut out, None).unwrap();
    let text = String::from_utf8(out).unwrap();
    assert!(text.ends_with("k = \\u0001A\\u007F\n"));
}

#[test]
fn test_malformed_escape_stores_nothing_for_key() {
    let mut props = OrderedProperties::new();
    let result = props.load(&b"before=1\nk=\\uZZZZ\nafter=2\n"[..]);

    match result {
        Err(Error::MalformedEscape { line, sequence }) => {
            assert_eq!(line, 2);
            assert_eq!(sequence, "\\uZZZZ");
        }
        other => panic!("Expected MalformedEscape, got {:?}", other),
    }
    assert!(!props.contains_key("k"));
    assert!(!props.contains_key("after"));
}

#[test]
fn test_separator_forms() {
    for input in ["k : v", "k=v", "k v", "k\t=\tv", "k:v"] {
        let props = load(input);
        assert_eq!(
            pairs(&props),
            vec![("k".to_string(), "v".to_string())],
            "input {:?}",
            input
        );
    }
}

#[test]
fn test_only_one_separator_consumed() {
    let props = load("k == v\nj :: w");
    assert_eq!(props.get_property("k"), Some("= v"));
    assert_eq!(props.get_property("j"), Some(": w"));
}

#[test]
fn test_escaped_separators_in_key() {
    let props = load("a\\=b\\:c\\ d = value");
    assert_eq!(props.get_property("a=b:c d"), Some("value"));
}

#[test]
fn test_multi_line_comment_emission() {
    let mut props = OrderedProperties::new().with_options(fixed());
    props.set_property("k", "v");
    let mut out = Vec::new();
    props.store(&mut out, Some("first\nsecond")).unwrap();

    let text = String::from_utf8(out).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines[0], "#first");
    assert_eq!(lines[1], "#second");
    assert_eq!(lines[2], "# Mon Jan 15 10:30:00 +00:00 2024");
    assert_eq!(lines[3], "k = v");
}

#[test]
fn test_store_load_round_trip() {
    let mut props = OrderedProperties::new().with_options(fixed());
    props.set_property(" leading key", "  leading value");
    props.set_property("symbols", "= : # ! \\");
    props.set_property("control", "tab\tnl\ncr\rff\u{c}");
    props.set_property("unicode", "日本語 é 😀");
    props.set_property("", "");

    let mut out = Vec::new();
    props.store(&mut out, Some("round trip")).unwrap();
    assert!(out.is_ascii());

    let mut back = OrderedProperties::new();
    back.load(out.as_slice()).unwrap();
    assert_eq!(pairs(&back), pairs(&props));
}

#[test]
fn test_utf8_round_trip_with_crlf() {
    let options = PropertiesOptions::utf8().with_line_ending(LineEnding::CrLf);
    let mut props = OrderedProperties::new().with_options(options.clone());
    props.set_property("greeting", "grüß dich");

    let mut out = Vec::new();
    props.store(&mut out, None).unwrap();
    let text = String::from_utf8(out.clone()).unwrap();
    assert!(text.ends_with("greeting = grüß dich\r\n"));

    let mut back = OrderedProperties::new().with_options(options);
    back.load(out.as_slice()).unwrap();
    assert_eq!(back.get_property("greeting"), Some("grüß dich"));
}

#[test]
fn test_invalid_utf8_input() {
    let mut props = OrderedProperties::new().with_options(PropertiesOptions::utf8());
    let result = props.load(&b"ok=1\nbad=\xff\n"[..]);
    assert!(matches!(
        result,
        Err(Error::InvalidEncoding { line: 2, .. })
    ));
}

#[test]
fn test_latin1_input_bytes() {
    let mut table = indexmap::IndexMap::<String, String>::new();
    let options = PropertiesOptions::new().with_encoding(Encoding::Latin1);
    let count = load_into(&b"name=Jos\xe9\n"[..], &mut table, &options).unwrap();
    assert_eq!(count, 1);
    assert_eq!(table["name"], "José");
}

#[test]
fn test_defaults_chain() {
    let mut base: Properties = Properties::new();
    base.set_property("a", "base-a");
    base.set_property("b", "base-b");

    let mut middle = Properties::with_defaults(Arc::new(base));
    middle.set_property("b", "middle-b");

    let mut top = Properties::with_defaults(Arc::new(middle));
    top.set_property("c", "top-c");

    assert_eq!(top.get_property("a"), Some("base-a"));
    assert_eq!(top.get_property("b"), Some("middle-b"));
    assert_eq!(top.get_property("c"), Some("top-c"));
    assert_eq!(top.get_property("d"), None);
    assert_eq!(top.len(), 1);

    let mut names = top.property_names();
    names.sort();
    assert_eq!(names, vec!["a", "b", "c"]);
}

#[test]
fn test_xml_round_trip() {
    let mut props = OrderedProperties::new();
    props.set_property("path", "C:\\temp <dir>");
    props.set_property("empty", "");

    let mut xml = Vec::new();
    props.store_to_xml(&mut xml, Some("exported")).unwrap();

    let mut back = OrderedProperties::new();
    let count = back.load_from_xml_with(xml.as_slice(), &QuickXml).unwrap();
    assert_eq!(count, 2);
    assert_eq!(pairs(&back), pairs(&props));
}

#[derive(Serialize, Deserialize, Debug, PartialEq)]
#[serde(rename_all = "snake_case")]
enum Level {
    Info,
    Error,
}

#[derive(Serialize, Deserialize, Debug, PartialEq)]
struct Logging {
    level: Level,
    file: String,
    max_size: u64,
    rotate: bool,
    backups: Option<u8>,
}

#[test]
fn test_serde_round_trip() {
    let logging = Logging {
        level: Level::Error,
        file: "/var/log/app: main.log".to_string(),
        max_size: 10_485_760,
        rotate: true,
        backups: Some(5),
    };

    let text = to_string_with_options(&logging, fixed()).unwrap();
    assert_eq!(
        text,
        "# Mon Jan 15 10:30:00 +00:00 2024\n\
         level = error\n\
         file = /var/log/app\\: main.log\n\
         max_size = 10485760\n\
         rotate = true\n\
         backups = 5\n"
    );

    let back: Logging = from_str(&text).unwrap();
    assert_eq!(back, logging);
}

#[test]
fn test_serde_from_hand_written_file() {
    let text = "\
# application logging
level   info
file  = app.log
max_size: 1024
rotate=false
";
    let logging: Logging = from_str(text).unwrap();
    assert_eq!(
        logging,
        Logging {
            level: Level::Info,
            file: "app.log".to_string(),
            max_size: 1024,
            rotate: false,
            backups: None,
        }
    );
}
