/// Route module for template handling
///
/// Contains pure functional components for template parsing:
/// - Pure functions (same input → same output)
/// - Immutable data structures
/// - Pattern matching for control flow

pub mod parser;
pub mod pattern;

// Re-export commonly used items
pub use parser::{find_duplicate_key, parse_template, TemplateInfo};
pub use pattern::{
    classify_segment, extract_keys, join_templates, remove_intermediate_stars, PatternSegmentType,
    WILDCARD,
};
