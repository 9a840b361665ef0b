/// Builds an [`OrderedProperties`](crate::OrderedProperties) from literal pairs.
///
/// Keys and values may be any expression implementing `Into<String>`.
/// Entries keep the order they are written in.
///
/// ```rust
/// use serde_properties::properties;
///
/// let props = properties! {
///     "host" => "localhost",
///     "port" => 8080.to_string(),
/// };
/// assert_eq!(props.get_property("port"), Some("8080"));
/// assert_eq!(props.keys().collect::<Vec<_>>(), vec!["host", "port"]);
/// ```
#[macro_export]
macro_rules! properties {
    () => {
        $crate::OrderedProperties::new()
    };

    ($($key:expr => $value:expr),+ $(,)?) => {{
        let mut props = $crate::OrderedProperties::new();
        $(
            props.set_property($key, $value);
        )+
        props
    }};
}

#[cfg(test)]
mod tests {
    #[test]
    fn test_properties_macro_empty() {
        let props = properties! {};
        assert!(props.is_empty());
    }

    #[test]
    fn test_properties_macro_order_and_overwrite() {
        let name = String::from("dynamic");
        let props = properties! {
            "b" => "1",
            "a" => "2",
            name.clone() => format!("{}-value", name),
            "b" => "3",
        };

        assert_eq!(props.len(), 3);
        assert_eq!(props.keys().collect::<Vec<_>>(), vec!["b", "a", "dynamic"]);
        assert_eq!(props.get_property("b"), Some("3"));
        assert_eq!(props.get_property("dynamic"), Some("dynamic-value"));
    }
}
