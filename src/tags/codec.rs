use std::sync::LazyLock;

use regex::Regex;

use super::TagMap;

static TAG_PAIR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"([A-Za-z0-9_]+):"([^"]*)""#).expect("tag pair pattern is valid")
});

static TAG_KEY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_]+$").expect("tag key pattern is valid"));

/// Parse a raw tag string into a [`TagMap`].
///
/// Permissive: anything that is not a `key:"value"` pair is skipped, and a
/// repeated key keeps its last value.
///
/// # Examples
/// ```
/// use gotag::tags::decode;
///
/// let tags = decode(r#"json:"name,omitempty" xml:"name""#);
/// assert_eq!(tags.get("json"), Some("name,omitempty"));
/// assert_eq!(tags.get("xml"), Some("name"));
/// ```
#[must_use]
pub fn decode(raw: &str) -> TagMap {
    TAG_PAIR
        .captures_iter(raw)
        .map(|caps| (caps[1].to_string(), caps[2].to_string()))
        .collect()
}

/// Serialize a [`TagMap`] into canonical tag text.
///
/// An empty map encodes to the empty string, which callers treat as
/// "no tag at all".
#[must_use]
pub fn encode(tags: &TagMap) -> String {
    tags.iter()
        .map(|(key, value)| format!(r#"{key}:"{value}""#))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Whether `key` can be written to and read back from a tag
#[must_use]
pub fn is_valid_key(key: &str) -> bool {
    TAG_KEY.is_match(key)
}

/// Whether `value` can be written between the quotes of a tag pair
#[must_use]
pub fn is_valid_value(value: &str) -> bool {
    !value.contains('"')
}
