//! # itinerary
//!
//! Rewrites airport codes (`#LAX`, `##KLAX`) and date markers
//! (`D(2024-03-01T10:00+02:00)`) embedded in plain-text itineraries.
//!
//! See [`itinerary::processor`] for the entry points.

pub mod itinerary;

pub use itinerary::processor::{process, process_file, ProcessingError};
