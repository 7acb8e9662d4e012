use crate::models::{FlightSummary, SearchOutcome, WebCitation};
use crate::providers::RawCitation;
use serde_json::{Map, Value};
use tracing::{debug, warn};

const JSON_FENCE: &str = "```json";
const FENCE: &str = "```";

/// Turn raw model output into a validated summary plus its web sources.
///
/// Never fails: anything that is not a JSON object with a non-empty
/// `searchLink` yields `flight_info: None`. The citation list is filtered
/// regardless of whether the summary could be recovered.
pub fn extract_flight_info(raw_text: &str, citations: &[RawCitation]) -> SearchOutcome {
    let flight_info = locate_json(raw_text).and_then(|value| validate_summary(&value));

    if flight_info.is_none() {
        warn!("Model response did not contain a usable flight summary");
        debug!("Raw model text: {}", raw_text);
    }

    SearchOutcome {
        flight_info,
        sources: web_citations(citations),
    }
}

/// Locate the payload in model text and parse it.
///
/// Only the first place found is parsed: a fenced ```json block, else the
/// first top-level array or object literal, else the whole trimmed text.
/// A payload that is found but does not parse gives `None`.
pub fn locate_json(text: &str) -> Option<Value> {
    let candidate = fenced_block(text)
        .or_else(|| bracketed_span(text))
        .unwrap_or_else(|| text.trim());

    match serde_json::from_str::<Value>(candidate) {
        Ok(value) => Some(value),
        Err(e) => {
            debug!("Candidate payload is not JSON: {}", e);
            None
        }
    }
}

fn fenced_block(text: &str) -> Option<&str> {
    let start = text.find(JSON_FENCE)? + JSON_FENCE.len();
    let rest = &text[start..];
    let end = rest.find(FENCE)?;
    Some(rest[..end].trim())
}

/// From the first opening bracket to the last closing bracket of the same kind
fn bracketed_span(text: &str) -> Option<&str> {
    text.char_indices()
        .filter_map(|(i, c)| match c {
            '[' => Some((i, ']')),
            '{' => Some((i, '}')),
            _ => None,
        })
        .find_map(|(open, close)| {
            let end = text.rfind(close)?;
            (end > open).then(|| &text[open..=end])
        })
}

fn validate_summary(value: &Value) -> Option<FlightSummary> {
    let object = value.as_object()?;

    let search_link = object
        .get("searchLink")
        .and_then(Value::as_str)
        .filter(|link| !link.trim().is_empty())?;

    Some(FlightSummary {
        price_range: string_field(object, "priceRange"),
        best_day_to_fly: string_field(object, "bestDayToFly"),
        flight_summary: string_field(object, "flightSummary"),
        airlines_found: object
            .get("airlinesFound")
            .and_then(Value::as_array)
            .map(|airlines| {
                airlines
                    .iter()
                    .filter_map(Value::as_str)
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default(),
        search_link: search_link.to_string(),
        source_website: string_field(object, "sourceWebsite"),
    })
}

fn string_field(object: &Map<String, Value>, key: &str) -> Option<String> {
    object.get(key).and_then(Value::as_str).map(str::to_string)
}

/// Keep citations that point at a web resource, in their original order.
///
/// Entries whose `web` reference has no uri, or an empty one, are dropped as
/// well: a `WebCitation` without a uri cannot be linked.
pub fn web_citations(citations: &[RawCitation]) -> Vec<WebCitation> {
    citations
        .iter()
        .filter_map(|citation| citation.web.as_ref())
        .filter_map(|web| {
            let uri = web.uri.as_deref().filter(|uri| !uri.is_empty())?;
            Some(WebCitation {
                uri: uri.to_string(),
                title: web.title.clone(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_summary() -> FlightSummary {
        FlightSummary {
            price_range: Some("R$ 2.800 - R$ 4.500".to_string()),
            best_day_to_fly: Some("2024-11-12".to_string()),
            flight_summary: Some("Tuesday departures are cheapest.".to_string()),
            airlines_found: vec!["Air France".to_string(), "Latam".to_string()],
            search_link: "https://www.google.com/travel/flights?q=GRU%20CDG".to_string(),
            source_website: Some("Google Flights".to_string()),
        }
    }

    fn citations(value: Value) -> Vec<RawCitation> {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_fenced_object_is_returned_unchanged() {
        let text = r#"Here you go:
```json
{
  "priceRange": "R$ 2.800 - R$ 4.500",
  "bestDayToFly": "2024-11-12",
  "flightSummary": "Tuesday departures are cheapest.",
  "airlinesFound": ["Air France", "Latam"],
  "searchLink": "https://www.google.com/travel/flights?q=GRU%20CDG",
  "sourceWebsite": "Google Flights"
}
```
Enjoy your trip!"#;

        let outcome = extract_flight_info(text, &[]);

        assert_eq!(outcome.flight_info, Some(sample_summary()));
    }

    #[test]
    fn test_array_payload_is_rejected() {
        let outcome = extract_flight_info("[1,2,3]", &[]);

        assert_eq!(outcome.flight_info, None);
    }

    #[test]
    fn test_missing_search_link_is_rejected() {
        let text = r#"{"priceRange": "R$ 100", "airlinesFound": ["Gol"]}"#;

        assert_eq!(extract_flight_info(text, &[]).flight_info, None);
    }

    #[test]
    fn test_empty_or_non_string_search_link_is_rejected() {
        assert_eq!(
            extract_flight_info(r#"{"searchLink": "  "}"#, &[]).flight_info,
            None
        );
        assert_eq!(
            extract_flight_info(r#"{"searchLink": 42}"#, &[]).flight_info,
            None
        );
    }

    #[test]
    fn test_unparseable_text_yields_none() {
        assert_eq!(extract_flight_info("not json at all", &[]).flight_info, None);
        assert_eq!(extract_flight_info("", &[]).flight_info, None);
        assert_eq!(extract_flight_info("{ broken", &[]).flight_info, None);
    }

    #[test]
    fn test_null_payload_yields_none() {
        assert_eq!(extract_flight_info("null", &[]).flight_info, None);
        assert_eq!(
            extract_flight_info("```json\nnull\n```", &[]).flight_info,
            None
        );
    }

    #[test]
    fn test_object_wrapped_in_prose_round_trips() {
        let summary = sample_summary();
        let text = format!(
            "Based on my research, this is the result: {} Let me know if you need more.",
            serde_json::to_string(&summary).unwrap()
        );

        let outcome = extract_flight_info(&text, &[]);

        assert_eq!(outcome.flight_info, Some(summary));
    }

    #[test]
    fn test_unparseable_match_is_not_retried() {
        let text = "```json\n{\"searchLink\": \"https://a.example\"\n```\nActually: {\"searchLink\": \"https://b.example\"}";

        let outcome = extract_flight_info(text, &[]);

        // first brace to last brace spans both objects
        assert_eq!(outcome.flight_info, None);

        let text = "```json\n{oops}\n```";
        assert_eq!(extract_flight_info(text, &[]).flight_info, None);

        let text = "```json\n[oops\n```\n{\"searchLink\": \"https://c.example\"}";
        assert_eq!(extract_flight_info(text, &[]).flight_info, None);

        let text = "The summary {\"searchLink\": \"https://b.example\"} is above.";
        assert_eq!(
            extract_flight_info(text, &[]).flight_info.map(|s| s.search_link),
            Some("https://b.example".to_string())
        );
    }

    #[test]
    fn test_whole_text_parsed_only_without_fence_or_brackets() {
        assert_eq!(locate_json("  42 "), Some(json!(42)));
        assert_eq!(locate_json("\"plain\""), Some(json!("plain")));

        // the whole text is a JSON string, but the braces inside it match first
        assert_eq!(locate_json("\"x{y}\""), None);
    }

    #[test]
    fn test_wrong_typed_fields_degrade_to_missing() {
        let text = json!({
            "priceRange": 3200,
            "bestDayToFly": null,
            "airlinesFound": ["Azul", 7, "Gol"],
            "searchLink": "https://example.com/search",
            "sourceWebsite": ["not", "a", "string"]
        })
        .to_string();

        let summary = extract_flight_info(&text, &[]).flight_info.unwrap();

        assert_eq!(summary.price_range, None);
        assert_eq!(summary.best_day_to_fly, None);
        assert_eq!(summary.flight_summary, None);
        assert_eq!(summary.airlines_found, vec!["Azul", "Gol"]);
        assert_eq!(summary.source_website, None);
    }

    #[test]
    fn test_bracketed_span_prefers_first_opener() {
        assert_eq!(bracketed_span("a [1] b {2}"), Some("[1]"));
        assert_eq!(bracketed_span("x { \"k\": [1] } y"), Some("{ \"k\": [1] }"));
        assert_eq!(bracketed_span("only ] closers }"), None);
        assert_eq!(bracketed_span("[ unclosed then {\"a\":1}"), Some("{\"a\":1}"));
    }

    #[test]
    fn test_citations_keep_web_entries_in_order() {
        let raw = citations(json!([
            {"web": {"uri": "a"}},
            {"other": 1},
            {"web": {"uri": "b", "title": "B"}}
        ]));

        let sources = extract_flight_info("not json at all", &raw).sources;

        assert_eq!(
            sources,
            vec![
                WebCitation {
                    uri: "a".to_string(),
                    title: None
                },
                WebCitation {
                    uri: "b".to_string(),
                    title: Some("B".to_string())
                },
            ]
        );
    }

    #[test]
    fn test_citations_keep_duplicates_and_drop_missing_uri() {
        let raw = citations(json!([
            {"web": {"uri": "https://x.example", "title": "X"}},
            {"web": {"title": "no uri"}},
            {"web": {"uri": ""}},
            {"web": {"uri": "https://x.example", "title": "X"}}
        ]));

        let sources = web_citations(&raw);

        assert_eq!(sources.len(), 2);
        assert_eq!(sources[0], sources[1]);
    }
}
