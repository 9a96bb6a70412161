#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Derived statistics over the ward air-quality dataset.
//!
//! Everything here is a pure function of the loaded [`Dataset`]:
//!
//! - [`stats`] computes the city-wide landing statistics.
//! - [`detail`] derives the per-ward views (pollutant breakdown, ranked
//!   sources, summary sentence, action shortlist).
//! - [`report`] renders the plain-text ward report stub.
//!
//! [`Dataset`]: ward_aqi_dataset::Dataset

pub mod detail;
pub mod report;
pub mod stats;

pub use stats::{average_aqi, category_distribution, city_stats, summarize};
