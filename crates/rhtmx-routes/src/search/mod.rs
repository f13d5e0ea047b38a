/// Search (query string) parameters
///
/// Building drops keys without a codec; parsing reads every declared codec
/// from the wire and silently omits anything that fails to decode.

use tracing::trace;

use crate::codec::{CodecMap, Raw, Stored};
use crate::error::RouteError;
use crate::params::Params;

pub mod query;
pub use query::SearchParams;

/// Encodes a record into query string pairs
///
/// Only keys with a registered codec are kept. Array codecs produce one pair
/// per element, preserving element order.
pub fn store_search_params(
    params: Option<&Params>,
    codecs: &CodecMap,
) -> Result<SearchParams, RouteError> {
    let mut search = SearchParams::new();

    let Some(params) = params else {
        return Ok(search);
    };

    for (key, value) in params {
        let Some(codec) = codecs.get(key) else {
            continue;
        };

        let stored = codec.store(value).map_err(|source| RouteError::Codec {
            key: key.clone(),
            source,
        })?;

        match stored {
            Stored::Single(text) => search.append(key.as_str(), text),
            Stored::Multi(items) => search.extend(items.into_iter().map(|item| (key.as_str(), item))),
        }
    }

    Ok(search)
}

/// Decodes every declared search param from the wire
///
/// Never fails: a key that cannot be decoded is left out of the result.
pub fn retrieve_search_params(search: &SearchParams, codecs: &CodecMap) -> Params {
    codecs
        .iter()
        .filter_map(|(key, codec)| {
            let raw = if codec.is_array() {
                Raw::list(search.get_all(key))
            } else {
                Raw::from(search.get(key))
            };

            codec
                .retrieve(&raw)
                .map_err(|err| trace!(key = %key, error = %err, "dropping search param"))
                .ok()
                .map(|value| (key.clone(), value))
        })
        .collect()
}
