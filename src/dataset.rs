use std::borrow::Cow;
use std::sync::OnceLock;

use regex::{Captures, Regex};

use crate::node::Attributes;
use crate::vdom::StringMap;

const DATA_PREFIX: &str = "data-";

/// Collect `data-*` attributes into a dataset map.
///
/// Keys lose the `data-` prefix and are camelCased; values are copied as-is.
pub fn extract_dataset(attribs: Option<&Attributes>) -> StringMap {
    let Some(attribs) = attribs.filter(|a| !a.is_empty()) else {
        return StringMap::new();
    };

    attribs
        .iter()
        .filter_map(|(name, value)| {
            name.strip_prefix(DATA_PREFIX)
                .map(|rest| (dataset_key(rest).into_owned(), value.clone()))
        })
        .collect()
}

/// `foo-bar-baz` → `fooBarBaz`. Only a hyphen followed by a lowercase ASCII
/// letter is folded.
pub fn dataset_key(unprefixed: &str) -> Cow<'_, str> {
    static HYPHEN_LOWER_REGEX: OnceLock<Regex> = OnceLock::new();
    let re = HYPHEN_LOWER_REGEX.get_or_init(|| Regex::new(r"-([a-z])").unwrap());
    re.replace_all(unprefixed, |caps: &Captures| caps[1].to_ascii_uppercase())
}
