use chrono::NaiveDate;
use serde::Serialize;
use thiserror::Error;

/// Reasons a set of trip parameters is rejected
#[derive(Debug, Error, PartialEq)]
pub enum CriteriaError {
    #[error("origin must not be empty")]
    EmptyOrigin,
    #[error("destination must not be empty")]
    EmptyDestination,
    #[error("trip length must be at least one day")]
    ZeroTripLength,
    #[error("departure window ends ({end}) before it starts ({start})")]
    InvertedWindow { start: NaiveDate, end: NaiveDate },
}

/// Trip parameters for a single search
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchCriteria {
    origin: String,
    destination: String,
    trip_length_days: u32,
    window_start: NaiveDate,
    window_end: NaiveDate,
    /// Radius for alternative departure airports, 0 when unused
    radius_km: u32,
}

impl SearchCriteria {
    pub fn new(
        origin: &str,
        destination: &str,
        trip_length_days: u32,
        window_start: NaiveDate,
        window_end: NaiveDate,
        radius_km: u32,
    ) -> Result<Self, CriteriaError> {
        let origin = origin.trim();
        let destination = destination.trim();

        if origin.is_empty() {
            return Err(CriteriaError::EmptyOrigin);
        }
        if destination.is_empty() {
            return Err(CriteriaError::EmptyDestination);
        }
        if trip_length_days == 0 {
            return Err(CriteriaError::ZeroTripLength);
        }
        if window_end < window_start {
            return Err(CriteriaError::InvertedWindow {
                start: window_start,
                end: window_end,
            });
        }

        Ok(Self {
            origin: origin.to_string(),
            destination: destination.to_string(),
            trip_length_days,
            window_start,
            window_end,
            radius_km,
        })
    }

    pub fn origin(&self) -> &str {
        &self.origin
    }

    pub fn destination(&self) -> &str {
        &self.destination
    }

    pub fn trip_length_days(&self) -> u32 {
        self.trip_length_days
    }

    pub fn window_start(&self) -> NaiveDate {
        self.window_start
    }

    pub fn window_end(&self) -> NaiveDate {
        self.window_end
    }

    pub fn radius_km(&self) -> u32 {
        self.radius_km
    }
}

/// Flight-shopping summary returned by the model
///
/// Only `search_link` is guaranteed; everything else is best-effort and may
/// be missing when the model omitted it or returned the wrong type.
#[derive(Debug, Clone, Serialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct FlightSummary {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_range: Option<String>,
    /// Cheapest departure day, ISO `YYYY-MM-DD` when the model complied
    #[serde(skip_serializing_if = "Option::is_none")]
    pub best_day_to_fly: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flight_summary: Option<String>,
    pub airlines_found: Vec<String>,
    pub search_link: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_website: Option<String>,
}

impl FlightSummary {
    pub fn best_day(&self) -> Option<NaiveDate> {
        let raw = self.best_day_to_fly.as_deref()?.trim();
        NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()
    }
}

/// A web source the model consulted while answering
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct WebCitation {
    pub uri: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

impl WebCitation {
    /// Title when present, otherwise the bare uri
    pub fn label(&self) -> &str {
        match self.title.as_deref() {
            Some(title) if !title.trim().is_empty() => title,
            _ => &self.uri,
        }
    }
}

/// Result of one search: the parsed summary, if any, plus cited sources
#[derive(Debug, Clone, Serialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct SearchOutcome {
    pub flight_info: Option<FlightSummary>,
    pub sources: Vec<WebCitation>,
}
