// File: src/node.rs
// Purpose: Declared (pre-composition) route nodes

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::codec::{CodecMap, ParamCodec};
use crate::compose;
use crate::config::RoutesConfig;
use crate::error::Result;
use crate::hash::HashValues;
use crate::resolved::Route;

/// A route as authored by the application
///
/// Declarations are immutable once attached to a parent: children are held
/// behind `Arc`, so the same subtree can be attached under several parents
/// and composed independently each time.
///
/// # Examples
///
/// ```
/// use rhtmx_routes::{codec::number, route, Params};
///
/// let grandchild = route("grand/:id").with_path_codec("id", number());
/// let child = route("child").with_child("GRANDCHILD", grandchild);
/// let root = route("test").with_child("CHILD", child).build().unwrap();
///
/// let leaf = &root["CHILD"]["GRANDCHILD"];
/// assert_eq!(leaf.path(), "/test/child/grand/:id");
/// assert_eq!(
///     leaf.build_url(&Params::new().with("id", 24), None, None).unwrap(),
///     "/test/child/grand/24"
/// );
/// ```
#[derive(Debug, Clone, Default)]
pub struct RouteDef {
    template: String,
    path_codecs: CodecMap,
    search_codecs: CodecMap,
    hash: HashValues,
    children: BTreeMap<String, Arc<RouteDef>>,
}

impl RouteDef {
    /// Creates a declaration for a template such as `"users/:id"`
    pub fn new(template: impl Into<String>) -> Self {
        Self {
            template: template.into(),
            ..Self::default()
        }
    }

    // ========================================================================
    // Builder Methods
    // ========================================================================

    /// Registers the codec for a path param
    pub fn with_path_codec(mut self, key: impl Into<String>, codec: impl Into<ParamCodec>) -> Self {
        self.path_codecs.insert(key, codec);
        self
    }

    /// Replaces all path codecs
    pub fn with_path_codecs(mut self, codecs: CodecMap) -> Self {
        self.path_codecs = codecs;
        self
    }

    /// Registers the codec for a search param
    pub fn with_search_codec(mut self, key: impl Into<String>, codec: impl Into<ParamCodec>) -> Self {
        self.search_codecs.insert(key, codec);
        self
    }

    /// Replaces all search codecs
    pub fn with_search_codecs(mut self, codecs: CodecMap) -> Self {
        self.search_codecs = codecs;
        self
    }

    /// Declares the legal fragments; an empty list accepts any fragment
    pub fn with_hash<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.hash = HashValues::listed(values);
        self
    }

    /// Accepts any fragment
    pub fn with_any_hash(mut self) -> Self {
        self.hash = HashValues::Any;
        self
    }

    /// Attaches a child under `key`
    ///
    /// Accepts a declaration, a shared declaration, or an already resolved
    /// [`Route`] (whose original declaration is reused).
    pub fn with_child(mut self, key: impl Into<String>, child: impl Into<Arc<RouteDef>>) -> Self {
        self.children.insert(key.into(), child.into());
        self
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    pub fn template(&self) -> &str {
        &self.template
    }

    pub fn path_codecs(&self) -> &CodecMap {
        &self.path_codecs
    }

    pub fn search_codecs(&self) -> &CodecMap {
        &self.search_codecs
    }

    pub fn hash(&self) -> &HashValues {
        &self.hash
    }

    pub fn children(&self) -> impl Iterator<Item = (&str, &Arc<RouteDef>)> {
        self.children.iter().map(|(key, child)| (key.as_str(), child))
    }

    // ========================================================================
    // Composition
    // ========================================================================

    /// Composes this declaration (and its whole subtree) with default options
    pub fn build(self) -> Result<Route> {
        self.build_with(&RoutesConfig::default())
    }

    /// Composes this declaration with explicit options
    pub fn build_with(self, config: &RoutesConfig) -> Result<Route> {
        compose::compose(&Arc::new(self), config)
    }
}

impl From<Route> for Arc<RouteDef> {
    fn from(route: Route) -> Self {
        route.definition().clone()
    }
}

impl From<&Route> for Arc<RouteDef> {
    fn from(route: &Route) -> Self {
        route.definition().clone()
    }
}
