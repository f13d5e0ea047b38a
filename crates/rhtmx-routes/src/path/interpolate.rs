/// Template interpolation
///
/// Substitutes `:name` tokens and a trailing `*` with stored values, the way a
/// router's path generator does. Values are inserted verbatim (no escaping).

use std::collections::BTreeMap;

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use crate::error::RouteError;
use crate::route::WILDCARD;

static PARAM_TOKEN: Lazy<Regex> = Lazy::new(|| Regex::new(r":(\w+)").expect("valid regex"));

/// Fills a template with values
///
/// Every `:name` must have a value, otherwise [`RouteError::MissingParam`] is
/// returned. A trailing `*` is replaced by the `"*"` value; when that value is
/// absent (or empty) the wildcard is dropped together with the `/` before it.
///
/// # Examples
///
/// ```
/// use std::collections::BTreeMap;
/// use rhtmx_routes::path::interpolate;
///
/// let mut values = BTreeMap::new();
/// values.insert("id".to_string(), "24".to_string());
/// values.insert("*".to_string(), "a/b".to_string());
///
/// assert_eq!(interpolate("users/:id/*", &values).unwrap(), "users/24/a/b");
/// assert_eq!(interpolate("users/*", &BTreeMap::new()).unwrap(), "users");
/// assert!(interpolate("users/:id", &BTreeMap::new()).is_err());
/// ```
pub fn interpolate(template: &str, values: &BTreeMap<String, String>) -> Result<String, RouteError> {
    // Only the template's own separator goes with the wildcard, never a slash
    // inside a substituted value
    let (body, has_wildcard) = match template.strip_suffix(WILDCARD) {
        Some(body) => (body.trim_end_matches('/'), true),
        None => (template, false),
    };

    let mut missing: Option<String> = None;

    let prefix = PARAM_TOKEN.replace_all(body, |caps: &Captures<'_>| {
        match values.get(&caps[1]) {
            Some(value) => value.clone(),
            None => {
                missing.get_or_insert_with(|| caps[1].to_string());
                String::new()
            }
        }
    });

    if let Some(name) = missing {
        return Err(RouteError::MissingParam { name });
    }

    if !has_wildcard {
        return Ok(prefix.into_owned());
    }

    let filled = match values.get(WILDCARD).map(|v| v.trim_start_matches('/')) {
        Some(rest) if !rest.is_empty() && !prefix.is_empty() => format!("{prefix}/{rest}"),
        Some(rest) if !rest.is_empty() => rest.to_string(),
        _ => prefix.to_string(),
    };

    Ok(filled)
}
