/// Codec module: conversions between application values and their wire form
///
/// A codec pairs a total `store` (value → wire text) with a partial
/// `retrieve` (raw wire input → value). Route trees keep codecs of different
/// value types side by side, so this module also provides the type-erased
/// [`ParamCodec`] and the keyed [`CodecMap`].

use std::collections::btree_map::{self, BTreeMap};
use std::fmt;
use std::sync::Arc;

use crate::error::CodecError;
use crate::value::{FromValue, Value};

pub mod builtin;
pub mod fallback;

pub use builtin::{
    array_of, boolean, date, number, one_of, string, ArrayOf, BooleanCodec, DateCodec,
    NumberCodec, OneOf, StringCodec,
};
pub use fallback::{TotalCodec, WithFallback};

// ============================================================================
// Wire Shapes
// ============================================================================

/// Raw input handed to [`Codec::retrieve`]
///
/// Path captures arrive as `Text`; a scalar search param arrives as `Text`
/// or `Missing`; an array search param arrives as a `List` of `Text`.
#[derive(Debug, Clone, PartialEq)]
pub enum Raw<'a> {
    Missing,
    Text(&'a str),
    Number(f64),
    List(Vec<Raw<'a>>),
}

impl<'a> Raw<'a> {
    /// Builds a `List` of `Text` items
    pub fn list<I>(items: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        Raw::List(items.into_iter().map(Raw::Text).collect())
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Raw::Missing => "nothing",
            Raw::Text(_) => "text",
            Raw::Number(_) => "number",
            Raw::List(_) => "list",
        }
    }

    /// Human-readable rendering for error messages
    pub fn describe(&self) -> String {
        match self {
            Raw::Missing => "<missing>".to_string(),
            Raw::Text(s) => s.to_string(),
            Raw::Number(n) => builtin::format_number(*n),
            Raw::List(items) => {
                let items: Vec<String> = items.iter().map(Raw::describe).collect();
                format!("[{}]", items.join(", "))
            }
        }
    }

    pub(crate) fn shape_error(&self, expected: &'static str) -> CodecError {
        CodecError::Shape {
            expected,
            found: self.kind(),
        }
    }
}

impl<'a> From<&'a str> for Raw<'a> {
    fn from(s: &'a str) -> Self {
        Raw::Text(s)
    }
}

impl<'a> From<Option<&'a str>> for Raw<'a> {
    fn from(s: Option<&'a str>) -> Self {
        s.map_or(Raw::Missing, Raw::Text)
    }
}

/// Wire output of [`Codec::store`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Stored {
    Single(String),
    Multi(Vec<String>),
}

impl Stored {
    /// Flattens into the individual wire strings
    pub fn into_strings(self) -> Vec<String> {
        match self {
            Stored::Single(s) => vec![s],
            Stored::Multi(items) => items,
        }
    }

    /// Collapses into one string (list items joined with `,`)
    pub fn into_joined(self) -> String {
        match self {
            Stored::Single(s) => s,
            Stored::Multi(items) => items.join(","),
        }
    }
}

// ============================================================================
// Codec Trait
// ============================================================================

/// Converts one typed value to and from its wire form
///
/// `store` must be pure and total. `retrieve` validates the shape of the raw
/// input before decoding it and reports a [`CodecError`] instead of coercing.
///
/// # Examples
///
/// ```
/// use rhtmx_routes::codec::{number, Codec, Raw, Stored};
///
/// let codec = number();
/// assert_eq!(codec.store(&24.0), Stored::Single("24".to_string()));
/// assert_eq!(codec.retrieve(&Raw::Text("24")), Ok(24.0));
/// assert!(codec.retrieve(&Raw::Text("abc")).is_err());
/// ```
pub trait Codec: fmt::Debug + Send + Sync + 'static {
    /// Value accepted by `store`
    type Original;
    /// Value produced by `retrieve`
    type Retrieved: Clone + fmt::Debug + Send + Sync + 'static;

    fn store(&self, value: &Self::Original) -> Stored;

    fn retrieve(&self, raw: &Raw<'_>) -> Result<Self::Retrieved, CodecError>;

    /// True when the wire form is a sequence of values
    fn is_array(&self) -> bool {
        false
    }

    /// True when `retrieve` cannot fail
    fn has_fallback(&self) -> bool {
        false
    }

    /// Wraps this codec so that `retrieve` returns `fallback` instead of failing
    fn with_fallback(self, fallback: Self::Retrieved) -> WithFallback<Self>
    where
        Self: Sized,
    {
        WithFallback::new(self, fallback)
    }
}

// ============================================================================
// Type Erasure
// ============================================================================

/// Object-safe view of a [`Codec`] working on [`Value`]s
pub trait DynCodec: fmt::Debug + Send + Sync {
    fn store_value(&self, value: &Value) -> Result<Stored, CodecError>;
    fn retrieve_value(&self, raw: &Raw<'_>) -> Result<Value, CodecError>;
    fn is_array(&self) -> bool;
    fn has_fallback(&self) -> bool;
}

impl<C> DynCodec for C
where
    C: Codec,
    C::Original: FromValue,
    C::Retrieved: Into<Value>,
{
    fn store_value(&self, value: &Value) -> Result<Stored, CodecError> {
        let original = C::Original::from_value(value)?;
        Ok(self.store(&original))
    }

    fn retrieve_value(&self, raw: &Raw<'_>) -> Result<Value, CodecError> {
        self.retrieve(raw).map(Into::into)
    }

    fn is_array(&self) -> bool {
        Codec::is_array(self)
    }

    fn has_fallback(&self) -> bool {
        Codec::has_fallback(self)
    }
}

/// Shared, type-erased codec as stored in a route
#[derive(Debug, Clone)]
pub struct ParamCodec(Arc<dyn DynCodec>);

impl ParamCodec {
    pub fn new<C>(codec: C) -> Self
    where
        C: Codec,
        C::Original: FromValue,
        C::Retrieved: Into<Value>,
    {
        ParamCodec(Arc::new(codec))
    }

    pub fn store(&self, value: &Value) -> Result<Stored, CodecError> {
        self.0.store_value(value)
    }

    pub fn retrieve(&self, raw: &Raw<'_>) -> Result<Value, CodecError> {
        self.0.retrieve_value(raw)
    }

    pub fn is_array(&self) -> bool {
        self.0.is_array()
    }

    pub fn has_fallback(&self) -> bool {
        self.0.has_fallback()
    }

    /// True when both handles point at the same codec instance
    pub fn ptr_eq(&self, other: &ParamCodec) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl<C> From<C> for ParamCodec
where
    C: Codec,
    C::Original: FromValue,
    C::Retrieved: Into<Value>,
{
    fn from(codec: C) -> Self {
        ParamCodec::new(codec)
    }
}

// ============================================================================
// Codec Maps
// ============================================================================

/// Codecs keyed by parameter name
#[derive(Debug, Clone, Default)]
pub struct CodecMap {
    codecs: BTreeMap<String, ParamCodec>,
}

impl CodecMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: impl Into<String>, codec: impl Into<ParamCodec>) -> Self {
        self.insert(key, codec);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, codec: impl Into<ParamCodec>) {
        self.codecs.insert(key.into(), codec.into());
    }

    pub fn get(&self, key: &str) -> Option<&ParamCodec> {
        self.codecs.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.codecs.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.codecs.keys().map(String::as_str)
    }

    pub fn iter(&self) -> btree_map::Iter<'_, String, ParamCodec> {
        self.codecs.iter()
    }

    pub fn len(&self) -> usize {
        self.codecs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codecs.is_empty()
    }

    /// Returns a new map where entries of `overrides` replace entries of `self`
    ///
    /// Used when composing route trees: the child's codec wins on a key
    /// collision with an ancestor.
    pub fn merged(&self, overrides: &CodecMap) -> CodecMap {
        let mut codecs = self.codecs.clone();
        codecs.extend(
            overrides
                .codecs
                .iter()
                .map(|(key, codec)| (key.clone(), codec.clone())),
        );
        CodecMap { codecs }
    }
}
