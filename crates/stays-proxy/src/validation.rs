//! Inbound request checks. A request that fails here never reaches the upstream.

use axum::body::Bytes;
use chrono::NaiveDate;
use serde_json::{Map, Value};

use stays_common::search::parse_date;

use crate::error::AppError;

const RATES_REQUIRED_FIELDS: [&str; 6] = [
    "hotelIds",
    "checkin",
    "checkout",
    "currency",
    "guestNationality",
    "occupancies",
];

pub fn parse_json_body(bytes: &Bytes) -> Result<Value, AppError> {
    serde_json::from_slice(bytes)
        .map_err(|e| AppError::validation(format!("Invalid JSON body: {e}")))
}

/// Check a rates search body. The body itself is forwarded untouched afterwards.
pub fn validate_rates_body(body: &Value) -> Result<(), AppError> {
    let obj = body
        .as_object()
        .ok_or_else(|| AppError::validation("Request body must be a JSON object"))?;

    for field in RATES_REQUIRED_FIELDS {
        if !is_present(obj.get(field)) {
            return Err(AppError::validation(format!(
                "Missing required field: {field}"
            )));
        }
    }

    let hotel_ids_ok = obj["hotelIds"].as_array().is_some_and(|ids| {
        !ids.is_empty()
            && ids
                .iter()
                .all(|id| id.as_str().is_some_and(|s| !s.trim().is_empty()))
    });
    if !hotel_ids_ok {
        return Err(AppError::validation(
            "hotelIds must be a non-empty array of hotel ID strings",
        ));
    }

    let checkin = date_field(obj, "checkin")?;
    let checkout = date_field(obj, "checkout")?;
    if checkout <= checkin {
        return Err(AppError::validation("checkout must be after checkin"));
    }

    for field in ["currency", "guestNationality"] {
        if !obj[field].is_string() {
            return Err(AppError::validation(format!("{field} must be a string")));
        }
    }

    let occupancies_ok = obj["occupancies"].as_array().is_some_and(|occ| {
        !occ.is_empty() && occ.iter().all(Value::is_object)
    });
    if !occupancies_ok {
        return Err(AppError::validation(
            "occupancies must be a non-empty array of objects",
        ));
    }

    Ok(())
}

/// Upstream ids are short tokens such as "lp3803c"; anything else is rejected
/// before it is spliced into an upstream path.
pub fn validate_id<'a>(label: &str, id: &'a str) -> Result<&'a str, AppError> {
    let id = id.trim();
    if id.is_empty() {
        return Err(AppError::validation(format!("{label} is required")));
    }
    if !id
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        return Err(AppError::validation(format!("{label} is malformed")));
    }
    Ok(id)
}

/// Upstream query for a hotel list search. One of `cityName` / `countryCode` is required.
pub fn location_query(
    city_name: Option<&str>,
    country_code: Option<&str>,
    limit: Option<&str>,
    offset: Option<&str>,
) -> Result<Vec<(String, String)>, AppError> {
    let city_name = non_blank(city_name);
    let country_code = non_blank(country_code);
    if city_name.is_none() && country_code.is_none() {
        return Err(AppError::validation(
            "Either cityName or countryCode is required",
        ));
    }

    let mut query = Vec::new();
    for (key, value) in [
        ("cityName", city_name),
        ("countryCode", country_code),
        ("limit", non_blank(limit)),
        ("offset", non_blank(offset)),
    ] {
        if let Some(value) = value {
            query.push((key.to_string(), value.to_string()));
        }
    }
    Ok(query)
}

/// Optional `YYYY-MM-DD` query parameter.
pub fn optional_date(field: &str, value: Option<&str>) -> Result<Option<NaiveDate>, AppError> {
    match non_blank(value) {
        None => Ok(None),
        Some(raw) => parse_date(raw)
            .map(Some)
            .ok_or_else(|| date_error(field)),
    }
}

fn date_field(obj: &Map<String, Value>, field: &str) -> Result<NaiveDate, AppError> {
    obj[field]
        .as_str()
        .and_then(parse_date)
        .ok_or_else(|| date_error(field))
}

fn date_error(field: &str) -> AppError {
    AppError::validation(format!("{field} must be a date in YYYY-MM-DD format"))
}

// Mirrors the truthiness check the web client used: null, "", 0 and false count as missing.
fn is_present(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => *b,
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Number(n)) => n.as_f64() != Some(0.0),
        Some(Value::Array(_)) | Some(Value::Object(_)) => true,
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn valid_rates() -> Value {
        json!({
            "hotelIds": ["lp3803c", "lp24a8"],
            "checkin": "2024-12-20",
            "checkout": "2024-12-22",
            "currency": "USD",
            "guestNationality": "US",
            "occupancies": [{"rooms": 1, "adults": 2, "children": [5, 7]}],
            "guestId": "guest123"
        })
    }

    fn message(result: Result<(), AppError>) -> String {
        result.unwrap_err().to_string()
    }

    #[test]
    fn accepts_valid_rates_body() {
        assert!(validate_rates_body(&valid_rates()).is_ok());
    }

    #[test]
    fn reports_first_missing_field() {
        let mut body = valid_rates();
        body.as_object_mut().unwrap().remove("checkin");
        body["currency"] = json!("");
        assert_eq!(message(validate_rates_body(&body)), "Missing required field: checkin");

        let mut body = valid_rates();
        body["guestNationality"] = Value::Null;
        assert_eq!(
            message(validate_rates_body(&body)),
            "Missing required field: guestNationality"
        );
    }

    #[test]
    fn rejects_non_object_body() {
        assert_eq!(
            message(validate_rates_body(&json!([1, 2]))),
            "Request body must be a JSON object"
        );
    }

    #[test]
    fn hotel_ids_must_be_non_empty_strings() {
        for bad in [json!([]), json!("lp1"), json!([1, 2]), json!(["lp1", " "])] {
            let mut body = valid_rates();
            body["hotelIds"] = bad.clone();
            assert_eq!(
                message(validate_rates_body(&body)),
                "hotelIds must be a non-empty array of hotel ID strings",
                "{bad}"
            );
        }
    }

    #[test]
    fn dates_must_be_iso_and_ordered() {
        let mut body = valid_rates();
        body["checkin"] = json!("20/12/2024");
        assert_eq!(
            message(validate_rates_body(&body)),
            "checkin must be a date in YYYY-MM-DD format"
        );

        let mut body = valid_rates();
        body["checkout"] = json!("2024-12-20");
        assert_eq!(message(validate_rates_body(&body)), "checkout must be after checkin");
    }

    #[test]
    fn occupancies_must_be_objects() {
        let mut body = valid_rates();
        body["occupancies"] = json!([]);
        assert_eq!(
            message(validate_rates_body(&body)),
            "occupancies must be a non-empty array of objects"
        );

        body["occupancies"] = json!([2]);
        assert!(validate_rates_body(&body).is_err());
    }

    #[test]
    fn currency_must_be_string() {
        let mut body = valid_rates();
        body["currency"] = json!(840);
        assert_eq!(message(validate_rates_body(&body)), "currency must be a string");
    }

    #[test]
    fn ids_are_restricted_tokens() {
        assert_eq!(validate_id("Hotel ID", " lp3803c ").unwrap(), "lp3803c");
        assert_eq!(
            validate_id("Hotel ID", "  ").unwrap_err().to_string(),
            "Hotel ID is required"
        );
        assert!(validate_id("Booking ID", "../admin").is_err());
        assert!(validate_id("Booking ID", "a?b=c").is_err());
    }

    #[test]
    fn location_query_needs_city_or_country() {
        let err = location_query(None, Some(" "), Some("10"), None).unwrap_err();
        assert_eq!(err.to_string(), "Either cityName or countryCode is required");

        let query = location_query(Some("Dubai"), None, Some("10"), Some("")).unwrap();
        assert_eq!(
            query,
            vec![
                ("cityName".to_string(), "Dubai".to_string()),
                ("limit".to_string(), "10".to_string()),
            ]
        );
    }

    #[test]
    fn optional_date_parses_or_rejects() {
        assert_eq!(optional_date("checkin", None).unwrap(), None);
        assert_eq!(optional_date("checkin", Some("")).unwrap(), None);
        assert_eq!(
            optional_date("checkin", Some("2025-01-02")).unwrap(),
            NaiveDate::from_ymd_opt(2025, 1, 2)
        );
        assert!(optional_date("checkin", Some("tomorrow")).is_err());
    }

    #[test]
    fn invalid_json_is_validation_error() {
        let err = parse_json_body(&Bytes::from_static(b"{not json")).unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }
}
