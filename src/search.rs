use crate::extract::extract_flight_info;
use crate::models::{SearchCriteria, SearchOutcome};
use crate::prompt::build_prompt;
use crate::providers::{CompletionProvider, ProviderError};
use tracing::{debug, info};

/// Run one flight search against the given provider.
///
/// Provider failures come back as `Err`. A reply without a usable summary is
/// `Ok` with `flight_info: None`, so callers can tell the two apart.
pub async fn search_flights(
    provider: &dyn CompletionProvider,
    criteria: &SearchCriteria,
) -> Result<SearchOutcome, ProviderError> {
    info!(
        "Searching flights {} -> {} ({} days, departing {}..={}) with {}",
        criteria.origin(),
        criteria.destination(),
        criteria.trip_length_days(),
        criteria.window_start(),
        criteria.window_end(),
        provider.model_name()
    );

    let prompt = build_prompt(criteria);
    debug!("Prompt is {} chars", prompt.user_prompt.len());

    let completion = provider
        .complete(&prompt.system_instruction, &prompt.user_prompt)
        .await?;

    let outcome = extract_flight_info(&completion.text, &completion.citations);
    info!(
        "Search finished: summary {}, {} web sources",
        if outcome.flight_info.is_some() { "found" } else { "missing" },
        outcome.sources.len()
    );

    Ok(outcome)
}
