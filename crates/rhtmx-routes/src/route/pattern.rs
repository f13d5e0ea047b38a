/// Pattern parsing for route templates
///
/// Pure functional parsing of `:name` / `*` templates into typed segments.
/// All functions are **pure**: same input → same output, no side effects.

use once_cell::sync::Lazy;
use regex::Regex;

/// The key under which a wildcard capture is stored
pub const WILDCARD: &str = "*";

static PARAM_NAME: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\w+$").expect("valid regex"));

/// Represents different types of template segments
///
/// # Examples
///
/// ```
/// use rhtmx_routes::route::pattern::{classify_segment, PatternSegmentType};
///
/// assert!(matches!(classify_segment("users"), PatternSegmentType::Static(_)));
/// assert!(matches!(classify_segment(":id"), PatternSegmentType::Param(_)));
/// assert!(matches!(classify_segment("*"), PatternSegmentType::Wildcard));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum PatternSegmentType {
    /// Named capture: `:id`
    Param(String),
    /// Wildcard capture: `*`
    Wildcard,
    /// Static text segment
    Static(String),
}

/// Classifies a single `/`-free segment (pure function)
///
/// # Parsing Rules (evaluated in order)
///
/// 1. **Wildcard**: exactly `*`
/// 2. **Param**: `:name`
/// 3. **Static**: any other text
pub fn classify_segment(segment: &str) -> PatternSegmentType {
    if segment == WILDCARD {
        return PatternSegmentType::Wildcard;
    }

    match segment.strip_prefix(':') {
        Some(name) => PatternSegmentType::Param(name.to_string()),
        None => PatternSegmentType::Static(segment.to_string()),
    }
}

/// True when `name` is usable as a parameter name (word characters only)
pub fn is_valid_param_name(name: &str) -> bool {
    PARAM_NAME.is_match(name)
}

/// Extracts the parameter keys a template declares, in order
///
/// Every piece after a `:` up to the next `/` is a key; a `*` anywhere in the
/// template adds the wildcard key at the end.
///
/// # Examples
///
/// ```
/// use rhtmx_routes::route::pattern::extract_keys;
///
/// assert_eq!(extract_keys("users/:id/posts/:post"), vec!["id", "post"]);
/// assert_eq!(extract_keys("docs/*"), vec!["*"]);
/// assert!(extract_keys("about").is_empty());
/// ```
pub fn extract_keys(template: &str) -> Vec<String> {
    let mut keys: Vec<String> = template
        .split(':')
        .skip(1)
        .map(|part| part.split('/').next().unwrap_or_default().to_string())
        .collect();

    if template.contains('*') {
        keys.push(WILDCARD.to_string());
    }

    keys
}

/// Joins two templates with `/`, dropping the slash when either side is empty
pub fn join_templates(parent: &str, child: &str) -> String {
    match (parent.is_empty(), child.is_empty()) {
        (true, _) => child.to_string(),
        (_, true) => parent.to_string(),
        _ => format!("{parent}/{child}"),
    }
}

/// Removes every wildcard that is not the final segment
///
/// A wildcard only captures at the end of a path; an embedded `*/` would
/// swallow the segments after it.
///
/// # Examples
///
/// ```
/// use rhtmx_routes::route::pattern::remove_intermediate_stars;
///
/// assert_eq!(remove_intermediate_stars("a/*/c"), "a/c");
/// assert_eq!(remove_intermediate_stars("a/*"), "a/*");
/// ```
pub fn remove_intermediate_stars(template: &str) -> String {
    template.replace("*/", "")
}
