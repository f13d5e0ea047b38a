/// Built-in codecs for text, numbers, booleans, dates, literal sets and lists
///
/// All functions are **pure**: `store` never fails, `retrieve` checks the raw
/// shape first and reports a [`CodecError`] on anything it cannot decode.

use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, Utc};

use super::{Codec, Raw, Stored};
use crate::error::CodecError;
use crate::value::Literal;

// ============================================================================
// Formatting Helpers
// ============================================================================

/// Canonical decimal form of a number
///
/// Integral values drop the fractional part (`24.0` → `"24"`), other values
/// use the shortest representation that parses back to the same `f64`.
pub fn format_number(n: f64) -> String {
    if n.is_nan() {
        "NaN".to_string()
    } else if n.is_infinite() {
        let sign = if n > 0.0 { "" } else { "-" };
        format!("{sign}Infinity")
    } else if n == 0.0 {
        // -0 renders as 0
        "0".to_string()
    } else {
        n.to_string()
    }
}

/// Parses number text, rejecting empty input and non-numeric words
pub fn parse_number(text: &str) -> Option<f64> {
    let trimmed = text.trim();
    match trimmed {
        "" => None,
        "Infinity" | "+Infinity" => Some(f64::INFINITY),
        "-Infinity" => Some(f64::NEG_INFINITY),
        // f64::from_str also accepts "inf" and "NaN"
        _ if trimmed
            .chars()
            .all(|c| c.is_ascii_digit() || matches!(c, '+' | '-' | '.' | 'e' | 'E')) =>
        {
            trimmed.parse::<f64>().ok()
        }
        _ => None,
    }
}

/// ISO-8601 with millisecond precision and a `Z` suffix
pub fn format_date(date: &DateTime<Utc>) -> String {
    date.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Parses RFC 3339 text, a zone-less date-time (read as UTC) or a plain date
///
/// Years outside `0000..=9999` use the signed extended form (`+10000-01-01…`,
/// `-0001-01-01…`) that [`format_date`] writes for them.
pub fn parse_date(text: &str) -> Option<DateTime<Utc>> {
    let text = text.trim();

    DateTime::parse_from_rfc3339(text)
        .map(|d| d.with_timezone(&Utc))
        .ok()
        .or_else(|| {
            // %Y takes a leading sign and any number of digits
            let naive = text.strip_suffix('Z').unwrap_or(text);
            NaiveDateTime::parse_from_str(naive, "%Y-%m-%dT%H:%M:%S%.f")
                .ok()
                .map(|d| d.and_utc())
        })
        .or_else(|| {
            NaiveDate::parse_from_str(text, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
                .map(|d| d.and_utc())
        })
}

fn parse_error(raw: &Raw<'_>, target: &'static str) -> CodecError {
    CodecError::Parse {
        value: raw.describe(),
        target,
    }
}

// ============================================================================
// Scalar Codecs
// ============================================================================

/// Identity codec for text
#[derive(Debug, Clone, Copy, Default)]
pub struct StringCodec;

impl Codec for StringCodec {
    type Original = String;
    type Retrieved = String;

    fn store(&self, value: &String) -> Stored {
        Stored::Single(value.clone())
    }

    fn retrieve(&self, raw: &Raw<'_>) -> Result<String, CodecError> {
        match raw {
            Raw::Text(s) => Ok(s.to_string()),
            other => Err(other.shape_error("text")),
        }
    }
}

/// Codec for `f64` numbers
#[derive(Debug, Clone, Copy, Default)]
pub struct NumberCodec;

impl Codec for NumberCodec {
    type Original = f64;
    type Retrieved = f64;

    fn store(&self, value: &f64) -> Stored {
        Stored::Single(format_number(*value))
    }

    fn retrieve(&self, raw: &Raw<'_>) -> Result<f64, CodecError> {
        match raw {
            Raw::Text(s) => parse_number(s).ok_or_else(|| parse_error(raw, "number")),
            Raw::Number(n) if !n.is_nan() => Ok(*n),
            Raw::Number(_) => Err(parse_error(raw, "number")),
            other => Err(other.shape_error("text")),
        }
    }
}

/// Codec for booleans, accepting exactly `"true"` and `"false"`
#[derive(Debug, Clone, Copy, Default)]
pub struct BooleanCodec;

impl Codec for BooleanCodec {
    type Original = bool;
    type Retrieved = bool;

    fn store(&self, value: &bool) -> Stored {
        Stored::Single(value.to_string())
    }

    fn retrieve(&self, raw: &Raw<'_>) -> Result<bool, CodecError> {
        match raw {
            Raw::Text("true") => Ok(true),
            Raw::Text("false") => Ok(false),
            Raw::Text(_) => Err(parse_error(raw, "boolean")),
            other => Err(other.shape_error("text")),
        }
    }
}

/// Codec for UTC timestamps
///
/// Raw numbers are read as milliseconds since the Unix epoch.
#[derive(Debug, Clone, Copy, Default)]
pub struct DateCodec;

impl Codec for DateCodec {
    type Original = DateTime<Utc>;
    type Retrieved = DateTime<Utc>;

    fn store(&self, value: &DateTime<Utc>) -> Stored {
        Stored::Single(format_date(value))
    }

    fn retrieve(&self, raw: &Raw<'_>) -> Result<DateTime<Utc>, CodecError> {
        match raw {
            Raw::Text(s) => parse_date(s).ok_or_else(|| parse_error(raw, "date")),
            Raw::Number(n) if n.is_finite() => DateTime::from_timestamp_millis(*n as i64)
                .ok_or_else(|| parse_error(raw, "date")),
            Raw::Number(_) => Err(parse_error(raw, "date")),
            other => Err(other.shape_error("text or number")),
        }
    }
}

// ============================================================================
// Composite Codecs
// ============================================================================

/// Codec restricted to a closed set of literals
///
/// Candidates are tried in declaration order, each with the codec of its own
/// kind, and the first equal one wins.
#[derive(Debug, Clone)]
pub struct OneOf {
    values: Vec<Literal>,
}

impl OneOf {
    pub fn values(&self) -> &[Literal] {
        &self.values
    }

    fn matches(candidate: &Literal, raw: &Raw<'_>) -> bool {
        match candidate {
            Literal::Text(expected) => StringCodec
                .retrieve(raw)
                .map_or(false, |v| &v == expected),
            Literal::Number(expected) => NumberCodec
                .retrieve(raw)
                .map_or(false, |v| v == *expected),
            Literal::Bool(expected) => BooleanCodec
                .retrieve(raw)
                .map_or(false, |v| v == *expected),
        }
    }
}

impl Codec for OneOf {
    type Original = Literal;
    type Retrieved = Literal;

    fn store(&self, value: &Literal) -> Stored {
        Stored::Single(value.to_string())
    }

    fn retrieve(&self, raw: &Raw<'_>) -> Result<Literal, CodecError> {
        self.values
            .iter()
            .find(|candidate| Self::matches(candidate, raw))
            .cloned()
            .ok_or_else(|| CodecError::NoMatchingValue {
                value: raw.describe(),
            })
    }
}

/// Element-wise codec over lists
#[derive(Debug, Clone)]
pub struct ArrayOf<C> {
    inner: C,
}

impl<C: Codec> ArrayOf<C> {
    pub fn inner(&self) -> &C {
        &self.inner
    }
}

impl<C: Codec> Codec for ArrayOf<C> {
    type Original = Vec<C::Original>;
    type Retrieved = Vec<C::Retrieved>;

    fn store(&self, values: &Vec<C::Original>) -> Stored {
        Stored::Multi(
            values
                .iter()
                .flat_map(|value| self.inner.store(value).into_strings())
                .collect(),
        )
    }

    fn retrieve(&self, raw: &Raw<'_>) -> Result<Vec<C::Retrieved>, CodecError> {
        match raw {
            Raw::List(items) => items.iter().map(|item| self.inner.retrieve(item)).collect(),
            other => Err(other.shape_error("list")),
        }
    }

    fn is_array(&self) -> bool {
        true
    }
}

// ============================================================================
// Constructors
// ============================================================================

pub fn string() -> StringCodec {
    StringCodec
}

pub fn number() -> NumberCodec {
    NumberCodec
}

pub fn boolean() -> BooleanCodec {
    BooleanCodec
}

pub fn date() -> DateCodec {
    DateCodec
}

/// Codec accepting only the given literals
///
/// # Examples
///
/// ```
/// use rhtmx_routes::codec::{one_of, Codec, Raw};
/// use rhtmx_routes::Literal;
///
/// let tab = one_of(["overview", "settings"]);
/// assert_eq!(tab.retrieve(&Raw::Text("settings")), Ok(Literal::from("settings")));
/// assert!(tab.retrieve(&Raw::Text("billing")).is_err());
/// ```
pub fn one_of<I, L>(values: I) -> OneOf
where
    I: IntoIterator<Item = L>,
    L: Into<Literal>,
{
    OneOf {
        values: values.into_iter().map(Into::into).collect(),
    }
}

/// Codec storing a list of values as repeated wire entries
pub fn array_of<C: Codec>(codec: C) -> ArrayOf<C> {
    ArrayOf { inner: codec }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(24.0), "24");
        assert_eq!(format_number(-3.25), "-3.25");
        assert_eq!(format_number(-0.0), "0");
        assert_eq!(format_number(f64::INFINITY), "Infinity");
    }

    #[test]
    fn test_parse_number_rejects_words() {
        assert_eq!(parse_number(" 12 "), Some(12.0));
        assert_eq!(parse_number("1e3"), Some(1000.0));
        assert_eq!(parse_number(""), None);
        assert_eq!(parse_number("NaN"), None);
        assert_eq!(parse_number("inf"), None);
        assert_eq!(parse_number("12px"), None);
    }

    #[test]
    fn test_number_rejects_nan_raw() {
        assert!(NumberCodec.retrieve(&Raw::Number(f64::NAN)).is_err());
    }

    #[test]
    fn test_string_shape_check() {
        assert_eq!(
            StringCodec.retrieve(&Raw::Missing),
            Err(CodecError::Shape {
                expected: "text",
                found: "nothing"
            })
        );
    }

    #[test]
    fn test_boolean_exact_tokens() {
        assert_eq!(BooleanCodec.retrieve(&Raw::Text("true")), Ok(true));
        assert_eq!(BooleanCodec.retrieve(&Raw::Text("false")), Ok(false));
        assert!(BooleanCodec.retrieve(&Raw::Text("TRUE")).is_err());
        assert!(BooleanCodec.retrieve(&Raw::Text("1")).is_err());
    }

    #[test]
    fn test_date_formats() {
        let expected = Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap();
        assert_eq!(parse_date("2024-03-01"), Some(expected));
        assert_eq!(parse_date("2024-03-01T00:00:00"), Some(expected));
        assert_eq!(parse_date("2024-03-01T01:00:00+01:00"), Some(expected));
        assert_eq!(parse_date("2024-02-30"), None);
        assert_eq!(format_date(&expected), "2024-03-01T00:00:00.000Z");
    }

    #[test]
    fn test_date_extended_years_round_trip() {
        let far = Utc.with_ymd_and_hms(10000, 1, 1, 0, 0, 0).unwrap();
        let bce = Utc.with_ymd_and_hms(-1, 1, 1, 0, 0, 0).unwrap();

        assert_eq!(format_date(&far), "+10000-01-01T00:00:00.000Z");
        assert_eq!(format_date(&bce), "-0001-01-01T00:00:00.000Z");
        assert_eq!(parse_date("+10000-01-01T00:00:00.000Z"), Some(far));
        assert_eq!(parse_date("-0001-01-01T00:00:00.000Z"), Some(bce));
    }

    #[test]
    fn test_date_from_millis() {
        let date = DateCodec.retrieve(&Raw::Number(0.0)).unwrap();
        assert_eq!(date, Utc.timestamp_opt(0, 0).unwrap());
    }

    #[test]
    fn test_one_of_declaration_order() {
        let codec = one_of([Literal::from("1"), Literal::from(1)]);
        assert_eq!(codec.retrieve(&Raw::Text("1")), Ok(Literal::from("1")));

        let codec = one_of([Literal::from(1), Literal::from(true)]);
        assert_eq!(codec.retrieve(&Raw::Text("1")), Ok(Literal::Number(1.0)));
        assert_eq!(codec.retrieve(&Raw::Text("true")), Ok(Literal::Bool(true)));
        assert_eq!(
            codec.retrieve(&Raw::Text("nope")),
            Err(CodecError::NoMatchingValue {
                value: "nope".to_string()
            })
        );
    }

    #[test]
    fn test_array_of_requires_list() {
        let codec = array_of(number());
        assert!(codec.is_array());
        assert_eq!(
            codec.retrieve(&Raw::list(["1", "2"])),
            Ok(vec![1.0, 2.0])
        );
        assert!(codec.retrieve(&Raw::Text("1")).is_err());
        assert!(codec.retrieve(&Raw::list(["1", "x"])).is_err());
    }
}
