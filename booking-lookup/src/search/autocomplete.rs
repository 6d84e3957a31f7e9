//! Station autocomplete component state.

use crate::domain::Station;
use crate::store::{Selection, SelectionStore};

use super::config::FilterStrategy;
use super::filter::{should_suggest, suggestions_for};

/// Placeholder shown in the empty search input.
pub const PLACEHOLDER: &str = "Search Station";

/// Local state of a mounted station search.
///
/// The component owns the input text and the suggestion list; the station
/// list and the selection live in the [`SelectionStore`].
#[derive(Debug, Clone)]
pub struct StationSearch {
    strategy: FilterStrategy,
    input: String,
    suggestions: Vec<Station>,
}

impl StationSearch {
    /// A freshly mounted search with empty input.
    pub fn new(strategy: FilterStrategy) -> Self {
        Self {
            strategy,
            input: String::new(),
            suggestions: Vec::new(),
        }
    }

    pub fn strategy(&self) -> FilterStrategy {
        self.strategy
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn suggestions(&self) -> &[Station] {
        &self.suggestions
    }

    /// Whether the input mirrors the selected station's name.
    pub fn is_emphasized(&self, selection: &Selection) -> bool {
        selection.selected_station_name() == Some(self.input.as_str())
    }

    /// Whether the current input warrants suggestions.
    pub fn wants_suggestions(&self, selection: &Selection) -> bool {
        should_suggest(&self.input, selection.selected_station_name())
    }

    /// Replace the input text and recompute suggestions.
    ///
    /// Under the remote strategy this only clears suggestions when the input
    /// no longer warrants any; fresh results arrive via [`apply_remote`].
    ///
    /// [`apply_remote`]: StationSearch::apply_remote
    pub fn set_input(&mut self, text: impl Into<String>, selection: &Selection) {
        self.input = text.into();
        self.sync(selection);
    }

    /// Recompute suggestions against the current selection state.
    pub fn sync(&mut self, selection: &Selection) {
        match self.strategy {
            FilterStrategy::Local => {
                self.suggestions = suggestions_for(
                    &selection.stations,
                    &self.input,
                    selection.selected_station_name(),
                );
            }
            FilterStrategy::Remote => {
                if !self.wants_suggestions(selection) {
                    self.suggestions.clear();
                }
            }
        }
    }

    /// Apply server-filtered results for `query`.
    ///
    /// Ignored if the input has moved on from `query` or no longer warrants
    /// suggestions.
    pub fn apply_remote(&mut self, query: &str, results: Vec<Station>, selection: &Selection) {
        if self.input == query && self.wants_suggestions(selection) {
            self.suggestions = results;
        }
    }

    /// Look up a station among the current suggestions, then the full list.
    pub fn find_candidate(&self, station_id: &str, selection: &Selection) -> Option<Station> {
        self.suggestions
            .iter()
            .chain(selection.stations.iter())
            .find(|s| s.id == station_id)
            .cloned()
    }

    /// Select a suggestion.
    ///
    /// Writes the station into the store, mirrors its name in the input and
    /// closes the dropdown.
    pub fn select(&mut self, station: Station, store: &SelectionStore) {
        self.input = station.name.clone();
        self.suggestions.clear();
        store.set_selected_station(station);
    }
}
