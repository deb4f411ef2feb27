//! Bus route search server.
//!
//! A web dashboard over a table of bus trips: pick routes by their leading
//! letters, list a route's trips, and narrow them by time of day, bus type,
//! star rating and price.

pub mod config;
pub mod dashboard;
pub mod domain;
pub mod search;
pub mod source;
pub mod web;
