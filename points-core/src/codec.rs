//! Results-page URL contract.
//!
//! A search is carried in the query string as `oc` (origin), `dc` (destination),
//! `dd` (departure, `MM-DD-YYYY`) and `rd` (return, `MM-DD-YYYY` or `null`).
//! Decoding never fails: missing or unreadable keys come back empty so that a
//! hand-edited or truncated bookmark still opens the results page.

use chrono::NaiveDate;
use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use points_shared::SearchQuery;

pub const ORIGIN_KEY: &str = "oc";
pub const DESTINATION_KEY: &str = "dc";
pub const DEPARTURE_KEY: &str = "dd";
pub const RETURN_KEY: &str = "rd";

/// Written for `rd` on one-way searches.
pub const NULL_MARKER: &str = "null";

pub const DATE_FORMAT: &str = "%m-%d-%Y";

const VALUE: &AsciiSet = &NON_ALPHANUMERIC.remove(b'-').remove(b'_').remove(b'.').remove(b'~');

pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

pub fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT).ok()
}

pub fn encode(query: &SearchQuery) -> String {
    let departure = query.departure_date.map(format_date).unwrap_or_default();
    let ret = query
        .return_date
        .map(format_date)
        .unwrap_or_else(|| NULL_MARKER.to_string());

    [
        (ORIGIN_KEY, query.origin_code.as_str()),
        (DESTINATION_KEY, query.destination_code.as_str()),
        (DEPARTURE_KEY, departure.as_str()),
        (RETURN_KEY, ret.as_str()),
    ]
    .iter()
    .map(|(k, v)| format!("{}={}", k, utf8_percent_encode(v, VALUE)))
    .collect::<Vec<_>>()
    .join("&")
}

/// Accepts the raw query string with or without the leading `?`.
/// Unknown keys are ignored; for repeated keys the last one wins.
pub fn decode(raw: &str) -> SearchQuery {
    let mut query = SearchQuery::default();

    for pair in raw.trim_start_matches('?').split('&').filter(|p| !p.is_empty()) {
        let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
        let value = decode_component(value);

        match key {
            ORIGIN_KEY => query.origin_code = value,
            DESTINATION_KEY => query.destination_code = value,
            DEPARTURE_KEY => query.departure_date = date_field(key, &value),
            RETURN_KEY => {
                query.return_date = if value == NULL_MARKER {
                    None
                } else {
                    date_field(key, &value)
                }
            }
            _ => {}
        }
    }

    query
}

fn date_field(key: &str, value: &str) -> Option<NaiveDate> {
    let date = parse_date(value);
    if date.is_none() && !value.is_empty() {
        tracing::debug!("Ignoring unreadable date {}={}", key, value);
    }
    date
}

fn decode_component(value: &str) -> String {
    let spaced = value.replace('+', " ");
    percent_decode_str(&spaced).decode_utf8_lossy().into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_encode_round_trip() {
        let query = SearchQuery::round_trip("JFK", "LAX", date(2024, 5, 1), date(2024, 5, 9));
        let encoded = encode(&query);
        assert_eq!(encoded, "oc=JFK&dc=LAX&dd=05-01-2024&rd=05-09-2024");
        assert_eq!(decode(&encoded), query);
    }

    #[test]
    fn test_one_way_writes_null_marker() {
        let query = SearchQuery::one_way("SFO", "NRT", date(2025, 1, 15));
        let encoded = encode(&query);
        assert!(encoded.ends_with("rd=null"));
        assert_eq!(decode(&encoded).return_date, None);
    }

    #[test]
    fn test_decode_tolerates_missing_and_garbage() {
        let query = decode("?dc=LHR&dd=13-45-2024&extra=1");
        assert_eq!(query.origin_code, "");
        assert_eq!(query.destination_code, "LHR");
        assert_eq!(query.departure_date, None);
        assert_eq!(query.return_date, None);

        assert_eq!(decode(""), SearchQuery::default());
        assert_eq!(decode("oc"), SearchQuery::default());
    }

    #[test]
    fn test_decode_absent_return_is_one_way() {
        let query = decode("oc=ORD&dc=MIA&dd=12-24-2024");
        assert_eq!(query.departure_date, Some(date(2024, 12, 24)));
        assert!(query.is_one_way());
    }

    #[test]
    fn test_values_are_percent_decoded() {
        let query = decode("oc=New+York&dc=S%C3%A3o%20Paulo");
        assert_eq!(query.origin_code, "New York");
        assert_eq!(query.destination_code, "São Paulo");
    }

    fn arb_date() -> impl Strategy<Value = NaiveDate> {
        (1970i32..2100, 1u32..=12, 1u32..=28).prop_map(|(y, m, d)| date(y, m, d))
    }

    proptest! {
        #[test]
        fn prop_decode_is_left_inverse_of_encode(
            origin in "[A-Za-z0-9 +&=?%]{0,8}",
            destination in "[A-Z]{3}",
            departure in arb_date(),
            ret in proptest::option::of(arb_date()),
        ) {
            let query = SearchQuery {
                origin_code: origin,
                destination_code: destination,
                departure_date: Some(departure),
                return_date: ret,
            };
            prop_assert_eq!(decode(&encode(&query)), query);
        }
    }
}
