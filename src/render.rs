use crate::models::{FlightSummary, SearchOutcome, WebCitation};
use crate::providers::ProviderError;
use std::fmt;

const UNAVAILABLE: &str = "Not available";
const NO_SUMMARY: &str = "Could not generate a summary.";
pub const NO_RESULTS_MESSAGE: &str =
    "No information found. Try a new search with different criteria.";
pub const FAILED_MESSAGE: &str = "Something went wrong while searching for flights. Please try again.";

/// What the user sees after a search
#[derive(Debug)]
pub enum Outcome<'a> {
    Found {
        summary: &'a FlightSummary,
        sources: &'a [WebCitation],
    },
    NoResults,
    Failed,
}

impl<'a> Outcome<'a> {
    pub fn classify(result: &'a Result<SearchOutcome, ProviderError>) -> Self {
        match result {
            Ok(SearchOutcome {
                flight_info: Some(summary),
                sources,
            }) => Outcome::Found {
                summary,
                sources: sources.as_slice(),
            },
            Ok(_) => Outcome::NoResults,
            Err(_) => Outcome::Failed,
        }
    }
}

impl fmt::Display for Outcome<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Found { summary, sources } => {
                write!(f, "{}{}", SummaryCard(summary), SourceList(sources))
            }
            Outcome::NoResults => writeln!(f, "{}", NO_RESULTS_MESSAGE),
            Outcome::Failed => writeln!(f, "{}", FAILED_MESSAGE),
        }
    }
}

/// Trip summary card; missing fields show placeholders
pub struct SummaryCard<'a>(pub &'a FlightSummary);

impl fmt::Display for SummaryCard<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let summary = self.0;
        let source = summary.source_website.as_deref().unwrap_or("...");

        writeln!(f, "Trip summary")?;
        writeln!(f, "============")?;
        writeln!(
            f,
            "Price range:     {} (round-trip estimate)",
            non_blank(summary.price_range.as_deref()).unwrap_or(UNAVAILABLE)
        )?;
        writeln!(f, "Best day to fly: {}", best_day_label(summary))?;
        writeln!(f)?;
        writeln!(
            f,
            "{}",
            non_blank(summary.flight_summary.as_deref()).unwrap_or(NO_SUMMARY)
        )?;

        if !summary.airlines_found.is_empty() {
            writeln!(f)?;
            writeln!(f, "Airlines: {}", summary.airlines_found.join(", "))?;
        }

        writeln!(f)?;
        writeln!(f, "Live offers on {}: {}", source, summary.search_link)
    }
}

/// Cited sources, or nothing at all when there are none
pub struct SourceList<'a>(pub &'a [WebCitation]);

impl fmt::Display for SourceList<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return Ok(());
        }

        write!(f, "\nSources\n-------\n")?;
        for (i, source) in self.0.iter().enumerate() {
            if source.label() == source.uri {
                writeln!(f, "{}. {}", i + 1, source.uri)?;
            } else {
                writeln!(f, "{}. {} <{}>", i + 1, source.label(), source.uri)?;
            }
        }
        Ok(())
    }
}

fn best_day_label(summary: &FlightSummary) -> String {
    match (summary.best_day(), non_blank(summary.best_day_to_fly.as_deref())) {
        (Some(day), _) => day.format("%A, %-d %B %Y").to_string(),
        (None, Some(raw)) => raw.to_string(),
        (None, None) => UNAVAILABLE.to_string(),
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}
