// File: src/compose.rs
// Purpose: Turns a declared route tree into independent resolved routes

use std::collections::BTreeMap;
use std::sync::Arc;

use tracing::{debug, warn};

use crate::codec::CodecMap;
use crate::config::RoutesConfig;
use crate::error::{Result, RouteError};
use crate::hash::HashValues;
use crate::node::RouteDef;
use crate::resolved::Route;
use crate::route::{
    extract_keys, find_duplicate_key, join_templates, parse_template, remove_intermediate_stars,
};

/// Everything a node inherits from its ancestors
///
/// Passed by value into each recursive call, so sibling subtrees never see
/// each other's state.
#[derive(Debug, Clone, Default)]
struct Inherited {
    template: String,
    path_codecs: CodecMap,
    search_codecs: CodecMap,
    hash: HashValues,
}

struct Composer<'a> {
    config: &'a RoutesConfig,
    mount: String,
}

/// Composes a declaration and all of its descendants
pub(crate) fn compose(def: &Arc<RouteDef>, config: &RoutesConfig) -> Result<Route> {
    let composer = Composer {
        config,
        mount: config.mount_prefix(),
    };

    composer.compose_node(def, Inherited::default())
}

impl Composer<'_> {
    fn compose_node(&self, def: &Arc<RouteDef>, inherited: Inherited) -> Result<Route> {
        let template = join_templates(&inherited.template, def.template());

        self.check(parse_template(def.template()).map(|_| ()))?;
        self.check(check_composed(&template, def.path_codecs()))?;

        let relative_path = remove_intermediate_stars(&template);
        let keys = extract_keys(&relative_path);

        let state = Inherited {
            template,
            path_codecs: inherited.path_codecs.merged(def.path_codecs()),
            search_codecs: inherited.search_codecs.merged(def.search_codecs()),
            hash: inherited.hash.merged(def.hash()),
        };

        let children = def
            .children()
            .map(|(key, child)| {
                self.compose_node(child, state.clone())
                    .map(|route| (key.to_string(), route))
            })
            .collect::<Result<BTreeMap<_, _>>>()?;

        let path = format!("{}/{}", self.mount, relative_path);

        debug!(
            path = %path,
            keys = ?keys,
            children = children.len(),
            "resolved route"
        );

        Ok(Route {
            definition: Arc::clone(def),
            relative_path,
            path,
            mount: self.mount.clone(),
            keys,
            path_codecs: state.path_codecs,
            search_codecs: state.search_codecs,
            hash: state.hash,
            children,
        })
    }

    /// Fails in strict mode, logs and carries on otherwise
    fn check(&self, outcome: Result<()>) -> Result<()> {
        match outcome {
            Err(err) if !self.config.strict_templates => {
                warn!(error = %err, "accepting invalid route template");
                Ok(())
            }
            other => other,
        }
    }
}

/// Validates the composed template against duplicate params and checks that
/// each path codec declared by the node names a captured key
fn check_composed(template: &str, own_codecs: &CodecMap) -> Result<()> {
    let keys = extract_keys(template);

    if let Some(duplicate) = find_duplicate_key(&keys) {
        return Err(RouteError::invalid_template(
            template,
            format!("param `{duplicate}` declared twice"),
        ));
    }

    match own_codecs.keys().find(|key| !keys.iter().any(|k| k.as_str() == *key)) {
        Some(key) => Err(RouteError::UnknownCodecKey {
            key: key.to_string(),
            template: template.to_string(),
        }),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::number;

    #[test]
    fn test_check_composed_unknown_codec() {
        let codecs = CodecMap::new().with("id", number());
        assert!(matches!(
            check_composed("users", &codecs),
            Err(RouteError::UnknownCodecKey { .. })
        ));
        assert!(check_composed("users/:id", &codecs).is_ok());
    }

    #[test]
    fn test_check_composed_wildcard_codec_before_removal() {
        let codecs = CodecMap::new().with("*", number());
        assert!(check_composed("a/*/c", &codecs).is_ok());
    }

    #[test]
    fn test_check_composed_duplicates_across_levels() {
        assert!(matches!(
            check_composed(":id/child/:id", &CodecMap::new()),
            Err(RouteError::InvalidTemplate { .. })
        ));
    }

    #[test]
    fn test_lenient_mode_accepts_bad_template() {
        let config = RoutesConfig::default().with_strict_templates(false);
        let route = RouteDef::new("a/*/b").build_with(&config).unwrap();
        assert_eq!(route.relative_path(), "a/b");
    }
}
