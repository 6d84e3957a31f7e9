//! Booking lookup server.
//!
//! Find a station by name, browse its bookings week by week, and open a
//! booking to see its details.

pub mod app;
#[cfg(test)]
mod app_tests;
pub mod calendar;
pub mod config;
pub mod detail;
pub mod domain;
pub mod gateway;
pub mod search;
pub mod store;
pub mod web;
