//! Station name filtering.

use crate::domain::Station;

/// Whether the input should produce suggestions at all.
///
/// Blank input never does, and neither does input that mirrors the selected
/// station's name (that is what the input holds right after a selection).
pub fn should_suggest(input: &str, selected_name: Option<&str>) -> bool {
    !input.trim().is_empty() && selected_name != Some(input)
}

/// Stations whose name contains `input`, case-insensitively, in list order.
pub fn filter_stations(stations: &[Station], input: &str) -> Vec<Station> {
    let needle = input.to_lowercase();
    stations
        .iter()
        .filter(|s| s.name.to_lowercase().contains(&needle))
        .cloned()
        .collect()
}

/// Suggestion list for `input` under the local strategy.
pub fn suggestions_for(
    stations: &[Station],
    input: &str,
    selected_name: Option<&str>,
) -> Vec<Station> {
    if should_suggest(input, selected_name) {
        filter_stations(stations, input)
    } else {
        Vec::new()
    }
}
