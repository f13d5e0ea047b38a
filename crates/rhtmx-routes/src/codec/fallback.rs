/// Fallback wrapping for codecs
///
/// A [`WithFallback`] codec never fails to retrieve: decode errors of the
/// wrapped codec are replaced by a fixed value. It also implements
/// [`TotalCodec`], so code that needs a guaranteed value can require it in a
/// bound instead of handling a `Result`.

use tracing::trace;

use super::{Codec, Raw, Stored};
use crate::error::CodecError;

/// Codecs whose `retrieve` cannot fail
pub trait TotalCodec: Codec {
    fn retrieve_total(&self, raw: &Raw<'_>) -> Self::Retrieved;
}

/// A codec that substitutes `fallback` for any retrieve failure
///
/// # Examples
///
/// ```
/// use rhtmx_routes::codec::{number, Codec, Raw, TotalCodec};
///
/// let page = number().with_fallback(1.0);
/// assert_eq!(page.retrieve_total(&Raw::Text("3")), 3.0);
/// assert_eq!(page.retrieve_total(&Raw::Text("three")), 1.0);
/// assert_eq!(page.retrieve_total(&Raw::Missing), 1.0);
/// ```
#[derive(Debug, Clone)]
pub struct WithFallback<C: Codec> {
    inner: C,
    fallback: C::Retrieved,
}

impl<C: Codec> WithFallback<C> {
    pub fn new(inner: C, fallback: C::Retrieved) -> Self {
        Self { inner, fallback }
    }

    pub fn fallback(&self) -> &C::Retrieved {
        &self.fallback
    }

    pub fn inner(&self) -> &C {
        &self.inner
    }
}

impl<C: Codec> TotalCodec for WithFallback<C> {
    fn retrieve_total(&self, raw: &Raw<'_>) -> C::Retrieved {
        self.inner.retrieve(raw).unwrap_or_else(|err| {
            trace!(error = %err, fallback = ?self.fallback, "codec failed, using fallback");
            self.fallback.clone()
        })
    }
}

impl<C: Codec> Codec for WithFallback<C> {
    type Original = C::Original;
    type Retrieved = C::Retrieved;

    fn store(&self, value: &C::Original) -> Stored {
        self.inner.store(value)
    }

    fn retrieve(&self, raw: &Raw<'_>) -> Result<C::Retrieved, CodecError> {
        Ok(self.retrieve_total(raw))
    }

    fn is_array(&self) -> bool {
        self.inner.is_array()
    }

    fn has_fallback(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::{array_of, boolean, string};

    #[test]
    fn test_fallback_preserves_store_and_array() {
        let codec = array_of(string()).with_fallback(vec![]);
        assert!(codec.is_array());
        assert!(codec.has_fallback());
        assert_eq!(
            codec.store(&vec!["a".to_string(), "b".to_string()]),
            Stored::Multi(vec!["a".to_string(), "b".to_string()])
        );
        assert_eq!(codec.retrieve(&Raw::Text("a")), Ok(Vec::<String>::new()));
    }

    #[test]
    fn test_fallback_passes_success_through() {
        let codec = boolean().with_fallback(false);
        assert_eq!(codec.retrieve(&Raw::Text("true")), Ok(true));
        assert_eq!(codec.retrieve(&Raw::Text("yes")), Ok(false));
    }
}
