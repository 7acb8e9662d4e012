use crate::models::SearchCriteria;
use chrono::Days;

/// Aggregator the model is asked to build its deep link for
pub const AGGREGATOR_NAME: &str = "Google Flights";
const AGGREGATOR_SEARCH_URL: &str = "https://www.google.com/travel/flights?q=";

const SYSTEM_INSTRUCTION: &str = "You are an expert flight-search assistant. \
Your task is to analyse the user's criteria and return a concise summary of your research \
exclusively as JSON. Do not add any conversation, explanation or introductory text. \
Your answer must be only the requested JSON object.";

/// Instruction pair sent to the completion provider
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    pub system_instruction: String,
    pub user_prompt: String,
}

/// Render the system instruction and user prompt for a search.
///
/// Pure and deterministic: the same criteria always yield byte-identical text.
pub fn build_prompt(criteria: &SearchCriteria) -> Prompt {
    let origin = criteria.origin();
    let destination = criteria.destination();
    let days = criteria.trip_length_days();
    let start = criteria.window_start();
    let end = criteria.window_end();

    let mut prompt = format!(
        "Act as a flight-search expert. Analyse the best options for a {days}-day trip \
departing from \"{origin}\" to \"{destination}\", with a departure date between {start} and {end}.

Use Google Search to:
1. Analyse the price range (minimum and maximum) for the complete round trip.
2. Identify the most advantageous departure day within the given date window.
3. List the main airlines operating this route.
4. Write a short summary with tips or observations about the search (e.g. \"Mid-week flights tend to be cheaper.\").
5. Build a URL to the results page of a large flight aggregator such as {AGGREGATOR_NAME} \
that the user can open to see live options. The URL must contain the search parameters.
"
    );

    if criteria.radius_km() > 0 {
        prompt.push_str(&format!(
            "\nConsider alternative airports within a {radius}km radius of \"{origin}\".\n",
            radius = criteria.radius_km()
        ));
    }

    prompt.push_str(&format!(
        "
Format your answer as a single JSON object with the following keys: \"priceRange\", \"bestDayToFly\", \
\"flightSummary\", \"airlinesFound\", \"searchLink\", \"sourceWebsite\".
- \"priceRange\": a string describing the price (e.g. \"R$ 2.800 - R$ 4.500\").
- \"bestDayToFly\": the cheapest departure date found, formatted YYYY-MM-DD.
- \"flightSummary\": a string with the summary of your analysis.
- \"airlinesFound\": an array of strings with the airline names (e.g. [\"Latam\", \"Azul\", \"Gol\"]).
- \"searchLink\": the full URL of the search results page.
- \"sourceWebsite\": the name of the site the search is based on (e.g. \"{AGGREGATOR_NAME}\").

Example format:
{{
  \"priceRange\": \"R$ 3.200 - R$ 5.100\",
  \"bestDayToFly\": \"{start}\",
  \"flightSummary\": \"Prices are lower for mid-week flights, especially on Tuesdays. Direct flights are available, but one-stop options can be cheaper.\",
  \"airlinesFound\": [\"Air France\", \"KLM\", \"Latam\"],
  \"searchLink\": \"{link}\",
  \"sourceWebsite\": \"{AGGREGATOR_NAME}\"
}}

Return ONLY the JSON object. If you cannot find enough information, return null.",
        link = example_search_link(criteria)
    ));

    Prompt {
        system_instruction: SYSTEM_INSTRUCTION.to_string(),
        user_prompt: prompt,
    }
}

/// Aggregator link for a departure on the first day of the window
fn example_search_link(criteria: &SearchCriteria) -> String {
    let depart = criteria.window_start();
    let back = depart
        .checked_add_days(Days::new(u64::from(criteria.trip_length_days())))
        .unwrap_or(depart);

    let query = format!(
        "Flights from {} to {} on {} through {}",
        criteria.origin(),
        criteria.destination(),
        depart,
        back
    );

    format!("{}{}", AGGREGATOR_SEARCH_URL, urlencoding::encode(&query))
}
