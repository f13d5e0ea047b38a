// File: src/hash.rs
// Purpose: Fragment (#hash) validation against declared values

/// Which fragments a route accepts
///
/// # Examples
///
/// ```
/// use rhtmx_routes::HashValues;
///
/// let hash = HashValues::listed(["intro", "usage"]);
/// assert_eq!(hash.build("usage"), Some("usage"));
/// assert_eq!(hash.build("other"), None);
/// assert_eq!(hash.parse("#intro").as_deref(), Some("intro"));
///
/// assert_eq!(HashValues::Any.parse("#anything").as_deref(), Some("anything"));
/// assert_eq!(HashValues::Unsupported.parse("#intro"), None);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum HashValues {
    /// No fragment is supported at this route
    #[default]
    Unsupported,
    /// Any fragment is legal (declared as an empty list)
    Any,
    /// Only the listed fragments are legal
    Listed(Vec<String>),
}

impl HashValues {
    /// Builds from a declared list; an empty list means "any value"
    pub fn listed<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let values: Vec<String> = values.into_iter().map(Into::into).collect();
        if values.is_empty() {
            HashValues::Any
        } else {
            HashValues::Listed(values)
        }
    }

    pub fn is_supported(&self) -> bool {
        !matches!(self, HashValues::Unsupported)
    }

    /// True when `hash` is a legal fragment
    pub fn accepts(&self, hash: &str) -> bool {
        match self {
            HashValues::Unsupported => false,
            HashValues::Any => true,
            HashValues::Listed(values) => values.iter().any(|v| v == hash),
        }
    }

    /// Combines an ancestor's values with a descendant's
    ///
    /// Both unsupported stays unsupported, `Any` on either side wins, and
    /// lists concatenate in parent-then-child order (duplicates kept).
    pub fn merged(&self, child: &HashValues) -> HashValues {
        match (self, child) {
            (HashValues::Unsupported, HashValues::Unsupported) => HashValues::Unsupported,
            (HashValues::Any, _) | (_, HashValues::Any) => HashValues::Any,
            (HashValues::Listed(parent), HashValues::Listed(child)) => {
                HashValues::Listed(parent.iter().chain(child).cloned().collect())
            }
            (HashValues::Listed(values), HashValues::Unsupported)
            | (HashValues::Unsupported, HashValues::Listed(values)) => {
                HashValues::Listed(values.clone())
            }
        }
    }

    /// Returns the candidate when it may be emitted as a fragment
    pub fn build<'a>(&self, candidate: &'a str) -> Option<&'a str> {
        self.accepts(candidate).then_some(candidate)
    }

    /// Extracts a legal fragment from raw `#text` input
    ///
    /// Empty input means no fragment at all; a bare `#` is the empty fragment.
    pub fn parse(&self, raw: &str) -> Option<String> {
        if raw.is_empty() {
            return None;
        }

        let hash = raw.strip_prefix('#').unwrap_or(raw);
        self.accepts(hash).then(|| hash.to_string())
    }
}
