/// Path parameters: building substitution values and parsing captures
///
/// All functions are **pure**: given same input, always produce same output
/// with no side effects (apart from trace events for swallowed failures).

use std::collections::{BTreeMap, HashMap};
use std::hash::BuildHasher;

use tracing::trace;

use crate::codec::{CodecMap, Raw};
use crate::error::RouteError;
use crate::params::Params;
use crate::route::WILDCARD;
use crate::value::Value;

pub mod interpolate;
pub use interpolate::interpolate;

// ============================================================================
// Capture Sources
// ============================================================================

/// Source of raw path captures, as produced by a host router after matching
pub trait PathCaptures {
    fn capture(&self, key: &str) -> Option<&str>;
}

impl<S: BuildHasher> PathCaptures for HashMap<String, String, S> {
    fn capture(&self, key: &str) -> Option<&str> {
        self.get(key).map(String::as_str)
    }
}

impl<S: BuildHasher> PathCaptures for HashMap<&str, &str, S> {
    fn capture(&self, key: &str) -> Option<&str> {
        self.get(key).copied()
    }
}

impl PathCaptures for BTreeMap<String, String> {
    fn capture(&self, key: &str) -> Option<&str> {
        self.get(key).map(String::as_str)
    }
}

impl PathCaptures for [(&str, &str)] {
    fn capture(&self, key: &str) -> Option<&str> {
        self.iter().find(|(k, _)| *k == key).map(|(_, v)| *v)
    }
}

impl<const N: usize> PathCaptures for [(&str, &str); N] {
    fn capture(&self, key: &str) -> Option<&str> {
        self.as_slice().capture(key)
    }
}

// ============================================================================
// Build / Parse
// ============================================================================

/// Converts a parameter record into template substitution values
///
/// A declared key with a codec is stored through the codec; any other text
/// value is used verbatim; everything else is omitted.
pub fn store_params(
    keys: &[String],
    params: &Params,
    codecs: &CodecMap,
) -> Result<BTreeMap<String, String>, RouteError> {
    let mut stored = BTreeMap::new();

    for (key, value) in params {
        let codec = keys
            .iter()
            .any(|k| k == key)
            .then(|| codecs.get(key))
            .flatten();

        let text = match (codec, value) {
            (Some(codec), _) => codec
                .store(value)
                .map_err(|source| RouteError::Codec {
                    key: key.clone(),
                    source,
                })?
                .into_joined(),
            (None, Value::Text(text)) => text.clone(),
            (None, _) => continue,
        };

        stored.insert(key.clone(), text);
    }

    Ok(stored)
}

/// Decodes raw captures into a typed record
///
/// Fails with [`RouteError::InsufficientParams`] when a non-wildcard key is
/// missing, and with [`RouteError::Codec`] when a non-wildcard key cannot be
/// decoded. A wildcard that fails to decode is left out.
pub fn retrieve_params<C>(keys: &[String], captures: &C, codecs: &CodecMap) -> Result<Params, RouteError>
where
    C: PathCaptures + ?Sized,
{
    let missing: Vec<String> = keys
        .iter()
        .filter(|key| key.as_str() != WILDCARD && captures.capture(key).is_none())
        .cloned()
        .collect();

    if !missing.is_empty() {
        return Err(RouteError::InsufficientParams { missing });
    }

    let mut params = Params::new();

    for key in keys {
        let Some(raw) = captures.capture(key) else {
            continue;
        };

        match codecs.get(key).map(|codec| codec.retrieve(&Raw::Text(raw))) {
            Some(Ok(value)) => {
                params.insert(key.as_str(), value);
            }
            Some(Err(err)) if key == WILDCARD => {
                trace!(error = %err, raw, "dropping undecodable wildcard capture");
            }
            Some(Err(source)) => {
                return Err(RouteError::Codec {
                    key: key.clone(),
                    source,
                })
            }
            None => {
                params.insert(key.as_str(), raw);
            }
        }
    }

    Ok(params)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::{boolean, number};

    fn keys(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_store_params_codec_and_verbatim() {
        let codecs = CodecMap::new().with("id", number());
        let params = Params::new()
            .with("id", 7)
            .with("slug", "hello")
            .with("flag", true);

        let stored = store_params(&keys(&["id", "slug"]), &params, &codecs).unwrap();
        assert_eq!(stored.get("id").map(String::as_str), Some("7"));
        assert_eq!(stored.get("slug").map(String::as_str), Some("hello"));
        assert!(!stored.contains_key("flag"));
    }

    #[test]
    fn test_store_params_undeclared_key_skips_codec() {
        let codecs = CodecMap::new().with("id", number());
        let params = Params::new().with("id", 7);

        let stored = store_params(&keys(&["other"]), &params, &codecs).unwrap();
        assert!(stored.is_empty());
    }

    #[test]
    fn test_retrieve_params_insufficient() {
        let err = retrieve_params(&keys(&["id", "*"]), &[("x", "1")], &CodecMap::new()).unwrap_err();
        assert_eq!(
            err,
            RouteError::InsufficientParams {
                missing: vec!["id".to_string()]
            }
        );
    }

    #[test]
    fn test_retrieve_params_wildcard_failure_dropped() {
        let codecs = CodecMap::new().with("*", number());
        let params = retrieve_params(&keys(&["*"]), &[("*", "a/b")], &codecs).unwrap();
        assert!(params.is_empty());
    }

    #[test]
    fn test_retrieve_params_named_failure_fatal() {
        let codecs = CodecMap::new().with("flag", boolean());
        let err = retrieve_params(&keys(&["flag"]), &[("flag", "maybe")], &codecs).unwrap_err();
        assert!(matches!(err, RouteError::Codec { ref key, .. } if key == "flag"));
    }
}
