use chrono::NaiveDate;
use serde::Deserialize;
use points_shared::SearchQuery;
use crate::iata::normalize_code;
use crate::{CoreError, CoreResult};

/// Raw input from the search form, before anything is checked.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchForm {
    pub origin_code: Option<String>,
    pub destination_code: Option<String>,
    pub departure_date: Option<NaiveDate>,
    pub return_date: Option<NaiveDate>,
}

/// Turns form input into a query ready for encoding. Runs before any network
/// call; a rejected form never produces a partial query.
pub fn validate_search(form: &SearchForm, today: NaiveDate) -> CoreResult<SearchQuery> {
    let mut missing = Vec::new();
    if form.origin_code.as_deref().map_or(true, |s| s.trim().is_empty()) {
        missing.push("origin");
    }
    if form.destination_code.as_deref().map_or(true, |s| s.trim().is_empty()) {
        missing.push("destination");
    }
    if form.departure_date.is_none() {
        missing.push("departure date");
    }
    if !missing.is_empty() {
        return Err(CoreError::ValidationError(format!(
            "Missing required field(s): {}",
            missing.join(", ")
        )));
    }

    let origin = code_field("origin", form.origin_code.as_deref())?;
    let destination = code_field("destination", form.destination_code.as_deref())?;
    let departure = form
        .departure_date
        .ok_or_else(|| CoreError::ValidationError("Missing required field(s): departure date".into()))?;

    if departure < today {
        return Err(CoreError::ValidationError(format!(
            "Departure date {} is in the past",
            departure
        )));
    }

    if let Some(ret) = form.return_date {
        if ret < departure {
            return Err(CoreError::ValidationError(format!(
                "Return date {} is before departure date {}",
                ret, departure
            )));
        }
    }

    Ok(SearchQuery {
        origin_code: origin,
        destination_code: destination,
        departure_date: Some(departure),
        return_date: form.return_date,
    })
}

fn code_field(name: &str, value: Option<&str>) -> CoreResult<String> {
    let raw = value.unwrap_or_default();
    normalize_code(raw)
        .ok_or_else(|| CoreError::ValidationError(format!("Invalid {} airport code: {}", name, raw)))
}
