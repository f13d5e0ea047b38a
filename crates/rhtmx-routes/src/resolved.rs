// File: src/resolved.rs
// Purpose: Resolved routes with URL builders and parsers

use std::collections::BTreeMap;
use std::ops::Index;
use std::sync::Arc;

use crate::codec::CodecMap;
use crate::error::Result;
use crate::hash::HashValues;
use crate::node::RouteDef;
use crate::params::Params;
use crate::path::{self, interpolate, PathCaptures};
use crate::search::{self, SearchParams};

/// A fully composed route
///
/// Carries the merged template, codecs and hash values of every ancestor, so
/// it can build and parse URLs on its own, whatever its depth in the tree.
#[derive(Debug, Clone)]
pub struct Route {
    pub(crate) definition: Arc<RouteDef>,
    pub(crate) relative_path: String,
    pub(crate) path: String,
    pub(crate) mount: String,
    pub(crate) keys: Vec<String>,
    pub(crate) path_codecs: CodecMap,
    pub(crate) search_codecs: CodecMap,
    pub(crate) hash: HashValues,
    pub(crate) children: BTreeMap<String, Route>,
}

/// Everything recovered from a URL for one route
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RouteValues {
    pub params: Params,
    pub search: Params,
    pub hash: Option<String>,
}

impl Route {
    // ========================================================================
    // Accessors
    // ========================================================================

    /// Absolute template, e.g. `/users/:id`
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Template without the leading `/` (and without the mount prefix)
    pub fn relative_path(&self) -> &str {
        &self.relative_path
    }

    /// Params captured by the template, the wildcard last
    pub fn keys(&self) -> &[String] {
        &self.keys
    }

    pub fn path_codecs(&self) -> &CodecMap {
        &self.path_codecs
    }

    pub fn search_codecs(&self) -> &CodecMap {
        &self.search_codecs
    }

    pub fn hash_values(&self) -> &HashValues {
        &self.hash
    }

    /// The declaration this route was composed from (before merging)
    pub fn definition(&self) -> &Arc<RouteDef> {
        &self.definition
    }

    /// Search keys that always come back from [`Route::retrieve_search_params`]
    /// because their codec has a fallback
    pub fn guaranteed_search_keys(&self) -> impl Iterator<Item = &str> {
        self.search_codecs
            .iter()
            .filter(|(_, codec)| codec.has_fallback())
            .map(|(key, _)| key.as_str())
    }

    pub fn child(&self, key: &str) -> Option<&Route> {
        self.children.get(key)
    }

    pub fn children(&self) -> impl Iterator<Item = (&str, &Route)> {
        self.children.iter().map(|(key, route)| (key.as_str(), route))
    }

    // ========================================================================
    // Building
    // ========================================================================

    /// Template substitution values for `params`
    pub fn store_params(&self, params: &Params) -> Result<BTreeMap<String, String>> {
        path::store_params(&self.keys, params, &self.path_codecs)
    }

    /// Query string pairs for `params`
    pub fn store_search_params(&self, params: &Params) -> Result<SearchParams> {
        search::store_search_params(Some(params), &self.search_codecs)
    }

    /// Path without the leading `/`, e.g. `users/24`
    pub fn build_relative_path(&self, params: &Params) -> Result<String> {
        interpolate(&self.relative_path, &self.store_params(params)?)
    }

    /// Absolute path, e.g. `/users/24`
    pub fn build_path(&self, params: &Params) -> Result<String> {
        Ok(self.absolute(self.build_relative_path(params)?))
    }

    /// `?key=value…`, or an empty string when nothing is stored
    pub fn build_search(&self, params: &Params) -> Result<String> {
        let search = self.store_search_params(params)?;
        Ok(if search.is_empty() {
            String::new()
        } else {
            format!("?{search}")
        })
    }

    /// `#hash` when `hash` is legal here, otherwise an empty string
    pub fn build_hash(&self, hash: &str) -> String {
        self.hash
            .build(hash)
            .map(|hash| format!("#{hash}"))
            .unwrap_or_default()
    }

    /// Relative URL with optional query string and fragment
    pub fn build_relative_url(
        &self,
        params: &Params,
        search: Option<&Params>,
        hash: Option<&str>,
    ) -> Result<String> {
        let mut url = self.build_relative_path(params)?;

        if let Some(search) = search {
            url.push_str(&self.build_search(search)?);
        }
        if let Some(hash) = hash {
            url.push_str(&self.build_hash(hash));
        }

        Ok(url)
    }

    /// Absolute URL with optional query string and fragment
    ///
    /// # Examples
    ///
    /// ```
    /// use rhtmx_routes::{codec::{array_of, number}, route, Params};
    ///
    /// let posts = route("posts/:id")
    ///     .with_path_codec("id", number())
    ///     .with_search_codec("tags", array_of(number()))
    ///     .with_hash(["comments"])
    ///     .build()
    ///     .unwrap();
    ///
    /// let url = posts
    ///     .build_url(
    ///         &Params::new().with("id", 7),
    ///         Some(&Params::new().with("tags", vec![1, 2])),
    ///         Some("comments"),
    ///     )
    ///     .unwrap();
    /// assert_eq!(url, "/posts/7?tags=1&tags=2#comments");
    /// ```
    pub fn build_url(
        &self,
        params: &Params,
        search: Option<&Params>,
        hash: Option<&str>,
    ) -> Result<String> {
        Ok(self.absolute(self.build_relative_url(params, search, hash)?))
    }

    fn absolute(&self, relative: String) -> String {
        format!("{}/{}", self.mount, relative)
    }

    // ========================================================================
    // Parsing
    // ========================================================================

    /// Decodes path captures from a host router's match
    ///
    /// Fails with [`crate::RouteError::InsufficientParams`] when a required
    /// capture is missing, or [`crate::RouteError::Codec`] when a
    /// non-wildcard capture cannot be decoded.
    pub fn retrieve_params<C>(&self, captures: &C) -> Result<Params>
    where
        C: PathCaptures + ?Sized,
    {
        path::retrieve_params(&self.keys, captures, &self.path_codecs)
    }

    /// Decodes every declared search param; never fails
    pub fn retrieve_search_params(&self, search: &SearchParams) -> Params {
        search::retrieve_search_params(search, &self.search_codecs)
    }

    /// Like [`Route::retrieve_search_params`], from a raw query string
    pub fn parse_search(&self, query: &str) -> Params {
        self.retrieve_search_params(&SearchParams::parse(query))
    }

    /// Decodes the fragment (`#text` or empty) if it is legal here
    pub fn parse_hash(&self, fragment: &str) -> Option<String> {
        self.hash.parse(fragment)
    }

    /// Decodes path captures, query string and fragment at once
    pub fn retrieve<C>(&self, captures: &C, query: &str, fragment: &str) -> Result<RouteValues>
    where
        C: PathCaptures + ?Sized,
    {
        Ok(RouteValues {
            params: self.retrieve_params(captures)?,
            search: self.parse_search(query),
            hash: self.parse_hash(fragment),
        })
    }
}

impl Index<&str> for Route {
    type Output = Route;

    /// Child route by key
    ///
    /// # Panics
    ///
    /// Panics when there is no child with that key; use [`Route::child`] for
    /// a fallible lookup.
    fn index(&self, key: &str) -> &Route {
        match self.child(key) {
            Some(child) => child,
            None => panic!("no child route {key:?} under {:?}", self.path),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::{array_of, boolean, number, string, Codec};
    use crate::config::RoutesConfig;
    use crate::error::RouteError;
    use crate::route;
    use crate::value::Value;

    fn users() -> Route {
        route("users/:id")
            .with_path_codec("id", number())
            .with_search_codec("tags", array_of(number()))
            .with_search_codec("draft", boolean().with_fallback(false))
            .with_hash(["bio"])
            .build()
            .unwrap()
    }

    #[test]
    fn test_build_path_forms() {
        let route = users();
        let params = Params::new().with("id", 24);

        assert_eq!(route.build_relative_path(&params).unwrap(), "users/24");
        assert_eq!(route.build_path(&params).unwrap(), "/users/24");
    }

    #[test]
    fn test_build_search_empty() {
        assert_eq!(users().build_search(&Params::new()).unwrap(), "");
    }

    #[test]
    fn test_build_hash_validated() {
        let route = users();
        assert_eq!(route.build_hash("bio"), "#bio");
        assert_eq!(route.build_hash("posts"), "");
    }

    #[test]
    fn test_build_relative_url_all_parts() {
        let url = users()
            .build_relative_url(
                &Params::new().with("id", 1),
                Some(&Params::new().with("draft", true)),
                Some("bio"),
            )
            .unwrap();
        assert_eq!(url, "users/1?draft=true#bio");
    }

    #[test]
    fn test_build_url_missing_param() {
        assert!(matches!(
            users().build_url(&Params::new(), None, None),
            Err(RouteError::MissingParam { .. })
        ));
    }

    #[test]
    fn test_build_url_with_mount() {
        let config = RoutesConfig::default().with_base_path("/app");
        let route = route("users/:id").build_with(&config).unwrap();

        assert_eq!(route.path(), "/app/users/:id");
        assert_eq!(
            route.build_url(&Params::new().with("id", "x"), None, None).unwrap(),
            "/app/users/x"
        );
    }

    #[test]
    fn test_guaranteed_search_keys() {
        let route = users();
        assert_eq!(route.guaranteed_search_keys().collect::<Vec<_>>(), vec!["draft"]);
    }

    #[test]
    fn test_retrieve_everything() {
        let values = users()
            .retrieve(&[("id", "5")], "?tags=1&tags=2", "#bio")
            .unwrap();

        assert_eq!(values.params.get("id"), Some(&Value::Number(5.0)));
        assert_eq!(values.search.get("tags"), Some(&Value::from(vec![1, 2])));
        assert_eq!(values.search.get("draft"), Some(&Value::Bool(false)));
        assert_eq!(values.hash.as_deref(), Some("bio"));
    }

    #[test]
    fn test_retrieve_bad_capture() {
        assert!(matches!(
            users().retrieve_params(&[("id", "five")]),
            Err(RouteError::Codec { .. })
        ));
    }

    #[test]
    fn test_child_lookup() {
        let root = route("docs")
            .with_child("PAGE", route(":slug").with_path_codec("slug", string()))
            .build()
            .unwrap();

        assert_eq!(root.child("PAGE").map(Route::path), Some("/docs/:slug"));
        assert!(root.child("MISSING").is_none());
        assert_eq!(root.children().count(), 1);
    }

    #[test]
    #[should_panic(expected = "no child route")]
    fn test_index_missing_child_panics() {
        let root = users();
        let _ = &root["NOPE"];
    }
}
