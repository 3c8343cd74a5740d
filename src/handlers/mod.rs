//! HTTP handlers for reports, detail lookups, search, and rental checkout.

pub mod actors;
pub mod customers;
pub mod films;
pub mod rentals;
