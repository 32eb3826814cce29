use crate::dataset::extract_dataset;
use crate::node::Attributes;
use crate::style::parse_style;
use crate::vdom::{PropValue, Properties};

/// Attributes whose DOM property name differs from the markup name.
pub const RENAMED_ATTRIBUTES: &[(&str, &str)] = &[
    ("class", "className"),
    ("for", "htmlFor"),
    ("tabindex", "tabIndex"),
];

/// Attributes whose values are entity-decoded.
pub const DECODED_ATTRIBUTES: &[&str] = &["placeholder", "title", "alt"];

pub const STYLE_ATTRIBUTE: &str = "style";

pub const DATASET_PROPERTY: &str = "dataset";

fn renamed(name: &str) -> Option<&'static str> {
    RENAMED_ATTRIBUTES
        .iter()
        .find(|(from, _)| *from == name)
        .map(|(_, to)| *to)
}

/// Build the property map of an element from its markup attributes.
///
/// `dataset` is inserted first and always present. Each attribute is then
/// renamed, decoded, parsed as a style, or copied verbatim, in that order of
/// precedence.
pub fn normalize_attributes<H>(
    attribs: Option<&Attributes>,
    decode: &dyn Fn(&str) -> String,
) -> Properties<H> {
    let mut properties = Properties::new();
    properties.insert(
        DATASET_PROPERTY.to_string(),
        PropValue::Map(extract_dataset(attribs)),
    );

    for (name, value) in attribs.into_iter().flatten() {
        let (key, value) = if let Some(to) = renamed(name) {
            (to.to_string(), PropValue::Text(value.clone()))
        } else if DECODED_ATTRIBUTES.contains(&name.as_str()) {
            (name.clone(), PropValue::Text(decode(value)))
        } else if name == STYLE_ATTRIBUTE {
            (name.clone(), PropValue::Map(parse_style(value)))
        } else {
            (name.clone(), PropValue::Text(value.clone()))
        };
        properties.insert(key, value);
    }

    properties
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities;
    use crate::vdom::StringMap;
    use std::collections::HashSet;

    fn decode(s: &str) -> String {
        entities::decode(s).into_owned()
    }

    fn attrs(pairs: &[(&str, &str)]) -> Attributes {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn text<'a>(props: &'a Properties<()>, name: &str) -> Option<&'a str> {
        props.get(name).and_then(PropValue::as_str)
    }

    #[test]
    fn test_attribute_tables_are_disjoint() {
        let mut seen = HashSet::new();
        for (from, _) in RENAMED_ATTRIBUTES {
            assert!(seen.insert(*from), "duplicate attribute '{}'", from);
        }
        for name in DECODED_ATTRIBUTES {
            assert!(seen.insert(*name), "attribute '{}' is in more than one table", name);
        }
        assert!(seen.insert(STYLE_ATTRIBUTE));
    }

    #[test]
    fn test_dataset_always_first_and_present() {
        let props: Properties<()> = normalize_attributes(None, &decode);
        assert_eq!(props.len(), 1);
        assert_eq!(
            props.get_index(0),
            Some((&"dataset".to_string(), &PropValue::Map(StringMap::new())))
        );
    }

    #[test]
    fn test_renamed_attributes_are_not_decoded() {
        let props: Properties<()> = normalize_attributes(
            Some(&attrs(&[("class", "a &amp; b"), ("for", "email"), ("tabindex", "-1")])),
            &decode,
        );
        assert_eq!(text(&props, "className"), Some("a &amp; b"));
        assert_eq!(text(&props, "htmlFor"), Some("email"));
        assert_eq!(text(&props, "tabIndex"), Some("-1"));
        assert!(props.get("class").is_none());
        assert!(props.get("for").is_none());
        assert!(props.get("tabindex").is_none());
    }

    #[test]
    fn test_decoded_attributes() {
        let props: Properties<()> = normalize_attributes(
            Some(&attrs(&[
                ("title", "&amp;"),
                ("alt", "&lt;img&gt;"),
                ("placeholder", "Name&hellip;"),
                ("href", "?a=1&amp;b=2"),
            ])),
            &decode,
        );
        assert_eq!(text(&props, "title"), Some("&"));
        assert_eq!(text(&props, "alt"), Some("<img>"));
        assert_eq!(text(&props, "placeholder"), Some("Name\u{2026}"));
        assert_eq!(text(&props, "href"), Some("?a=1&amp;b=2"));
    }

    #[test]
    fn test_style_is_parsed() {
        let props: Properties<()> =
            normalize_attributes(Some(&attrs(&[("style", "color: red; margin:0 auto;")])), &decode);
        let style = props.get("style").and_then(PropValue::as_map).unwrap();
        assert_eq!(style.get("color").map(String::as_str), Some("red"));
        assert_eq!(style.get("margin").map(String::as_str), Some("0 auto"));
    }

    #[test]
    fn test_other_attributes_verbatim_in_order() {
        let props: Properties<()> = normalize_attributes(
            Some(&attrs(&[("id", "x"), ("data-a", "1"), ("aria-label", "&amp;")])),
            &decode,
        );
        let keys: Vec<_> = props.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["dataset", "id", "data-a", "aria-label"]);
        assert_eq!(text(&props, "aria-label"), Some("&amp;"));
        assert_eq!(text(&props, "data-a"), Some("1"));
    }

    #[test]
    fn test_injected_decoder_is_used() {
        let shout = |s: &str| s.to_uppercase();
        let props: Properties<()> =
            normalize_attributes(Some(&attrs(&[("title", "hi"), ("id", "hi")])), &shout);
        assert_eq!(text(&props, "title"), Some("HI"));
        assert_eq!(text(&props, "id"), Some("hi"));
    }
}
