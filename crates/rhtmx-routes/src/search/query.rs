// File: src/search/query.rs
// Purpose: Ordered multimap for query strings (?key=value&key=value)

use std::fmt;
use std::str::FromStr;

/// Query string parameters, keeping every pair in insertion order
///
/// # Examples
///
/// ```
/// use rhtmx_routes::SearchParams;
///
/// let query = SearchParams::parse("?tags=1&tags=2&q=hello+world");
/// assert_eq!(query.get("q"), Some("hello world"));
/// assert_eq!(query.get_all("tags"), vec!["1", "2"]);
/// assert_eq!(query.to_string(), "tags=1&tags=2&q=hello+world");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchParams {
    pairs: Vec<(String, String)>,
}

impl SearchParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a query string, with or without the leading `?`
    ///
    /// `+` decodes to a space and percent escapes are decoded; malformed
    /// escapes are kept as written.
    pub fn parse(query: &str) -> Self {
        let query = query.strip_prefix('?').unwrap_or(query);

        let pairs = query
            .split('&')
            .filter(|pair| !pair.is_empty())
            .map(|pair| {
                let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
                (decode_component(key), decode_component(value))
            })
            .collect();

        Self { pairs }
    }

    /// First value for `key`
    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Every value for `key`, in order
    pub fn get_all(&self, key: &str) -> Vec<&str> {
        self.pairs
            .iter()
            .filter(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
            .collect()
    }

    pub fn has(&self, key: &str) -> bool {
        self.pairs.iter().any(|(k, _)| k == key)
    }

    /// Adds a pair after the existing ones
    pub fn append(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.pairs.push((key.into(), value.into()));
    }

    /// Replaces every value of `key` with one value, at the position of the
    /// first existing pair (or at the end)
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();

        match self.pairs.iter().position(|(k, _)| *k == key) {
            Some(first) => {
                self.pairs[first].1 = value;
                let mut idx = 0;
                self.pairs.retain(|(k, _)| {
                    let keep = idx <= first || *k != key;
                    idx += 1;
                    keep
                });
            }
            None => self.pairs.push((key, value)),
        }
    }

    pub fn delete(&mut self, key: &str) {
        self.pairs.retain(|(k, _)| k != key);
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

fn decode_component(component: &str) -> String {
    let spaced = component.replace('+', " ");
    match urlencoding::decode(&spaced) {
        Ok(decoded) => decoded.into_owned(),
        Err(_) => spaced,
    }
}

/// Form-style encoding: space as `+`, `*` kept, `~` escaped
fn encode_component(component: &str) -> String {
    urlencoding::encode(component)
        .replace("%20", "+")
        .replace("%2A", "*")
        .replace('~', "%7E")
}

impl fmt::Display for SearchParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, (key, value)) in self.pairs.iter().enumerate() {
            if idx > 0 {
                f.write_str("&")?;
            }
            write!(f, "{}={}", encode_component(key), encode_component(value))?;
        }
        Ok(())
    }
}

impl FromStr for SearchParams {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for SearchParams {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            pairs: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl<K: Into<String>, V: Into<String>> Extend<(K, V)> for SearchParams {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        self.pairs
            .extend(iter.into_iter().map(|(k, v)| (k.into(), v.into())));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_without_values() {
        let query = SearchParams::parse("flag&x=");
        assert_eq!(query.get("flag"), Some(""));
        assert_eq!(query.get("x"), Some(""));
        assert_eq!(query.get("missing"), None);
    }

    #[test]
    fn test_parse_percent_escapes() {
        let query = SearchParams::parse("name=J%C3%BCrgen&path=a%2Fb&bad=%zz");
        assert_eq!(query.get("name"), Some("Jürgen"));
        assert_eq!(query.get("path"), Some("a/b"));
        assert_eq!(query.get("bad"), Some("%zz"));
    }

    #[test]
    fn test_set_replaces_in_place() {
        let mut query = SearchParams::parse("a=1&b=2&a=3");
        query.set("a", "9");
        assert_eq!(query.to_string(), "a=9&b=2");

        query.set("c", "4");
        assert_eq!(query.to_string(), "a=9&b=2&c=4");
    }

    #[test]
    fn test_delete_and_append() {
        let mut query = SearchParams::new();
        query.append("a", "1");
        query.append("a", "2");
        assert_eq!(query.get_all("a"), vec!["1", "2"]);

        query.delete("a");
        assert!(query.is_empty());
    }

    #[test]
    fn test_display_encodes() {
        let query: SearchParams = [("q", "a&b=c"), ("k y", "v")].into_iter().collect();
        assert_eq!(query.to_string(), "q=a%26b%3Dc&k+y=v");
    }

    #[test]
    fn test_display_uses_form_encoding() {
        let query: SearchParams = [("q", "a b*c~d+e")].into_iter().collect();
        assert_eq!(query.to_string(), "q=a+b*c%7Ed%2Be");
        assert_eq!(SearchParams::parse(&query.to_string()).get("q"), Some("a b*c~d+e"));
    }
}
