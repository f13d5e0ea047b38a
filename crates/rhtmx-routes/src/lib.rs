//! # RHTMX Routes
//!
//! Typed route trees for building and parsing URLs:
//! - Templates with named params (`users/:id`) and a trailing wildcard (`files/*`)
//! - Codecs that convert typed values to and from their URL text
//! - Search params with per-key codecs, arrays and fallbacks
//! - Declared `#hash` values, validated on both build and parse
//!
//! ## Composition
//!
//! Routes are declared as a tree of [`RouteDef`] nodes and composed once into
//! a tree of [`Route`]s. Every resolved route carries the merged state of its
//! ancestors, so it builds and parses URLs on its own:
//! - Templates join with `/`, and a `*` followed by more segments is dropped
//! - Codecs merge per key, the descendant winning
//! - Hash values merge (an empty list accepts any fragment)
//!
//! Declarations are shared behind `Arc`, so the same subtree can be attached
//! under several parents without either composition seeing the other.
//!
//! ## Example
//!
//! ```
//! use rhtmx_routes::codec::{number, string, Codec};
//! use rhtmx_routes::{route, Params, Value};
//!
//! let routes = route("")
//!     .with_child(
//!         "USER",
//!         route("users/:id")
//!             .with_path_codec("id", number())
//!             .with_search_codec("tab", string().with_fallback("profile".to_string())),
//!     )
//!     .build()
//!     .unwrap();
//!
//! let user = &routes["USER"];
//! assert_eq!(user.path(), "/users/:id");
//! assert_eq!(
//!     user.build_url(&Params::new().with("id", 7), None, None).unwrap(),
//!     "/users/7"
//! );
//!
//! let params = user.retrieve_params(&[("id", "7")]).unwrap();
//! assert_eq!(params.get("id"), Some(&Value::Number(7.0)));
//! assert_eq!(user.parse_search("").get_as::<String>("tab").as_deref(), Some("profile"));
//! ```

// ============================================================================
// Module Declarations
// ============================================================================

pub mod codec;
mod compose;
pub mod config;
pub mod error;
pub mod hash;
pub mod node;
pub mod params;
pub mod path;
pub mod resolved;
pub mod route;
pub mod search;
pub mod value;

pub use config::RoutesConfig;
pub use error::{CodecError, RouteError};
pub use hash::HashValues;
pub use node::RouteDef;
pub use params::Params;
pub use path::PathCaptures;
pub use resolved::{Route, RouteValues};
pub use search::SearchParams;
pub use value::{FromValue, Literal, Value};

/// Declares a route node for `template`
///
/// Shorthand for [`RouteDef::new`].
pub fn route(template: impl Into<String>) -> RouteDef {
    RouteDef::new(template)
}
