//! Codec behaviour through the public API
//!
//! Covers the built-in codecs, fallback wrapping, the type-erased
//! `ParamCodec` handle and a user-defined codec plugged into a route.

use chrono::{TimeZone, Utc};
use pretty_assertions::assert_eq;
use rhtmx_routes::codec::{
    array_of, boolean, date, number, one_of, string, Codec, CodecMap, ParamCodec, Raw, Stored,
    TotalCodec,
};
use rhtmx_routes::*;
use rstest::rstest;

// ============================================================================
// Built-in codecs
// ============================================================================

#[rstest]
#[case("0", 0.0)]
#[case("24", 24.0)]
#[case(" 7 ", 7.0)]
#[case("-2.5", -2.5)]
#[case("1e3", 1000.0)]
fn test_number_accepts(#[case] raw: &str, #[case] expected: f64) {
    assert_eq!(number().retrieve(&Raw::Text(raw)), Ok(expected));
}

#[rstest]
#[case("")]
#[case("   ")]
#[case("abc")]
#[case("NaN")]
#[case("inf")]
#[case("12px")]
fn test_number_rejects(#[case] raw: &str) {
    assert!(matches!(
        number().retrieve(&Raw::Text(raw)),
        Err(CodecError::Parse { target: "number", .. })
    ));
}

#[test]
fn test_number_error_names_value() {
    let err = number().retrieve(&Raw::Text("twelve")).unwrap_err();
    let message = err.to_string();
    assert!(message.contains("twelve"));
    assert!(message.contains("number"));
}

#[rstest]
#[case("true", Some(true))]
#[case("false", Some(false))]
#[case("TRUE", None)]
#[case("1", None)]
#[case("", None)]
fn test_boolean_tokens(#[case] raw: &str, #[case] expected: Option<bool>) {
    assert_eq!(boolean().retrieve(&Raw::Text(raw)).ok(), expected);
}

#[test]
fn test_missing_input_is_shape_error() {
    assert!(matches!(
        string().retrieve(&Raw::Missing),
        Err(CodecError::Shape { found: "nothing", .. })
    ));
    assert!(matches!(
        array_of(number()).retrieve(&Raw::Text("1")),
        Err(CodecError::Shape { expected: "list", .. })
    ));
}

#[test]
fn test_date_forms() {
    let expected = Utc.with_ymd_and_hms(2024, 3, 9, 12, 30, 0).unwrap();

    assert_eq!(date().retrieve(&Raw::Text("2024-03-09T12:30:00Z")), Ok(expected));
    assert_eq!(date().retrieve(&Raw::Text("2024-03-09T14:30:00+02:00")), Ok(expected));
    assert_eq!(date().retrieve(&Raw::Text("2024-03-09T12:30:00")), Ok(expected));
    assert_eq!(
        date().retrieve(&Raw::Number(expected.timestamp_millis() as f64)),
        Ok(expected)
    );
    assert_eq!(date().store(&expected), Stored::Single("2024-03-09T12:30:00.000Z".into()));
    assert!(date().retrieve(&Raw::Text("09/03/2024")).is_err());
}

#[rstest]
#[case::five_digit_year(10000)]
#[case::year_before_one(-1)]
#[case::year_zero(0)]
fn test_date_round_trips_outside_four_digit_years(#[case] year: i32) {
    let value = Utc.with_ymd_and_hms(year, 6, 15, 8, 45, 30).unwrap();
    let Stored::Single(text) = date().store(&value) else {
        panic!("date stores a single value");
    };
    assert_eq!(date().retrieve(&Raw::Text(&text)), Ok(value));
}

#[test]
fn test_one_of_mixed_literals() {
    let codec = one_of([Literal::from("auto"), Literal::from(0.0), Literal::from(true)]);

    assert_eq!(codec.retrieve(&Raw::Text("auto")), Ok(Literal::from("auto")));
    assert_eq!(codec.retrieve(&Raw::Text("0")), Ok(Literal::Number(0.0)));
    assert_eq!(codec.retrieve(&Raw::Text("true")), Ok(Literal::Bool(true)));
    assert_eq!(
        codec.retrieve(&Raw::Text("manual")),
        Err(CodecError::NoMatchingValue {
            value: "manual".into()
        })
    );
}

#[test]
fn test_array_reports_first_bad_element() {
    let codec = array_of(number());
    assert_eq!(codec.retrieve(&Raw::list(["1", "2"])), Ok(vec![1.0, 2.0]));
    assert_eq!(codec.retrieve(&Raw::List(vec![])), Ok(vec![]));
    assert!(codec.retrieve(&Raw::list(["1", "x"])).is_err());
}

// ============================================================================
// Fallbacks
// ============================================================================

#[test]
fn test_fallback_substitutes_on_any_failure() {
    let sort = one_of(["asc", "desc"]).with_fallback(Literal::from("asc"));

    assert_eq!(sort.retrieve_total(&Raw::Text("desc")), Literal::from("desc"));
    assert_eq!(sort.retrieve_total(&Raw::Text("sideways")), Literal::from("asc"));
    assert_eq!(sort.retrieve_total(&Raw::Missing), Literal::from("asc"));
    assert_eq!(sort.retrieve_total(&Raw::list(["desc"])), Literal::from("asc"));
}

#[test]
fn test_fallback_visible_through_erased_codec() {
    let plain = ParamCodec::from(number());
    let total = ParamCodec::from(number().with_fallback(10.0));

    assert!(!plain.has_fallback());
    assert!(total.has_fallback());
    assert!(plain.retrieve(&Raw::Text("x")).is_err());
    assert_eq!(total.retrieve(&Raw::Text("x")), Ok(Value::Number(10.0)));
}

// ============================================================================
// Erased codecs
// ============================================================================

#[test]
fn test_erased_store_checks_value_kind() {
    let codec = ParamCodec::from(boolean());

    assert_eq!(codec.store(&Value::Bool(true)), Ok(Stored::Single("true".into())));
    assert!(matches!(
        codec.store(&Value::from("true")),
        Err(CodecError::Type { expected: "bool", .. })
    ));
}

#[test]
fn test_codec_map_child_wins() {
    let parent = CodecMap::new().with("id", number()).with("q", string());
    let child = CodecMap::new().with("id", boolean());

    let merged = parent.merged(&child);
    assert_eq!(merged.len(), 2);
    assert!(merged.get("id").unwrap().ptr_eq(child.get("id").unwrap()));
    assert!(merged.get("q").unwrap().ptr_eq(parent.get("q").unwrap()));
}

// ============================================================================
// User-defined codecs
// ============================================================================

/// Stores a list of words as one `-`-separated segment
#[derive(Debug)]
struct Slug;

impl Codec for Slug {
    type Original = Vec<String>;
    type Retrieved = Vec<String>;

    fn store(&self, words: &Vec<String>) -> Stored {
        Stored::Single(words.join("-"))
    }

    fn retrieve(&self, raw: &Raw<'_>) -> Result<Vec<String>, CodecError> {
        match raw {
            Raw::Text(text) if !text.is_empty() => {
                Ok(text.split('-').map(str::to_string).collect())
            }
            other => Err(CodecError::Parse {
                value: other.describe(),
                target: "slug",
            }),
        }
    }
}

#[test]
fn test_custom_codec_in_route() {
    let post = route("posts/:slug").with_path_codec("slug", Slug).build().unwrap();

    let words = Value::from(vec!["hello", "world"]);
    assert_eq!(
        post.build_url(&Params::new().with("slug", words.clone()), None, None)
            .unwrap(),
        "/posts/hello-world"
    );
    assert_eq!(
        post.retrieve_params(&[("slug", "hello-world")]).unwrap().get("slug"),
        Some(&words)
    );
}
