//! Station search (autocomplete).
//!
//! Filters stations by name as the user types. Filtering runs either over
//! the station list already in the store or on the server, debounced; see
//! [`SearchConfig`].

mod autocomplete;
mod config;
mod debounce;
mod filter;

pub use autocomplete::{PLACEHOLDER, StationSearch};
pub use config::{FilterStrategy, InvalidStrategy, SearchConfig};
pub use debounce::{Debouncer, Ticket};
pub use filter::{filter_stations, should_suggest, suggestions_for};
