/// Template validation
///
/// Pure functional parser that checks a node's template and records what it
/// captures. All functions are **pure**: same input → same output.

use crate::error::RouteError;
use super::pattern::{classify_segment, is_valid_param_name, PatternSegmentType, WILDCARD};

/// What a valid template declares
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TemplateInfo {
    /// Classified segments in order
    pub segments: Vec<PatternSegmentType>,
    /// Named params in order (the wildcard is not included)
    pub params: Vec<String>,
    /// Whether the template ends with a wildcard
    pub has_wildcard: bool,
}

/// Internal state accumulator for fold-based parsing
///
/// All mutations are local to the fold accumulator; each step returns the
/// new state or the first error found.
#[derive(Default)]
struct ParseState {
    info: TemplateInfo,
}

impl ParseState {
    fn with_static_segment(mut self, template: &str, segment: String) -> Result<Self, RouteError> {
        if segment.contains(':') {
            return Err(RouteError::invalid_template(
                template,
                format!("`:` must start a segment, found {segment:?}"),
            ));
        }
        if segment.contains('*') {
            return Err(RouteError::invalid_template(
                template,
                format!("`*` must be a whole segment, found {segment:?}"),
            ));
        }

        self.info.segments.push(PatternSegmentType::Static(segment));
        Ok(self)
    }

    fn with_param(mut self, template: &str, name: String) -> Result<Self, RouteError> {
        if !is_valid_param_name(&name) {
            return Err(RouteError::invalid_template(
                template,
                format!("invalid param name {name:?}"),
            ));
        }
        if self.info.params.contains(&name) {
            return Err(RouteError::invalid_template(
                template,
                format!("param `{name}` declared twice"),
            ));
        }

        self.info.params.push(name.clone());
        self.info.segments.push(PatternSegmentType::Param(name));
        Ok(self)
    }

    fn with_wildcard(mut self, template: &str, is_last: bool) -> Result<Self, RouteError> {
        if !is_last {
            return Err(RouteError::invalid_template(
                template,
                "`*` must be the last segment",
            ));
        }

        self.info.has_wildcard = true;
        self.info.segments.push(PatternSegmentType::Wildcard);
        Ok(self)
    }
}

/// Validates a single node's template
///
/// # Rules
///
/// - No leading, trailing or doubled `/`
/// - `:name` params use word characters only and appear once
/// - `*` is a whole segment and the last one
///
/// # Examples
///
/// ```
/// use rhtmx_routes::route::parser::parse_template;
///
/// let info = parse_template("users/:id/*").unwrap();
/// assert_eq!(info.params, vec!["id"]);
/// assert!(info.has_wildcard);
///
/// assert!(parse_template("a/*/b").is_err());
/// assert!(parse_template(":id/:id").is_err());
/// ```
pub fn parse_template(template: &str) -> Result<TemplateInfo, RouteError> {
    if template.is_empty() {
        return Ok(TemplateInfo::default());
    }

    let segments: Vec<&str> = template.split('/').collect();
    if segments.iter().any(|s| s.is_empty()) {
        return Err(RouteError::invalid_template(
            template,
            "empty segment (leading, trailing or doubled `/`)",
        ));
    }

    let last = segments.len() - 1;
    segments
        .into_iter()
        .enumerate()
        .try_fold(ParseState::default(), |state, (idx, segment)| {
            match classify_segment(segment) {
                PatternSegmentType::Wildcard => state.with_wildcard(template, idx == last),
                PatternSegmentType::Param(name) => state.with_param(template, name),
                PatternSegmentType::Static(text) => state.with_static_segment(template, text),
            }
        })
        .map(|state| state.info)
}

/// Finds the first key that appears more than once (the wildcard excluded)
pub fn find_duplicate_key(keys: &[String]) -> Option<&str> {
    keys.iter()
        .enumerate()
        .find(|(idx, key)| key.as_str() != WILDCARD && keys[..*idx].contains(*key))
        .map(|(_, key)| key.as_str())
}
