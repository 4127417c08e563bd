//! Main module for itinerary rewriting
//!
//! Data flows through the submodules in this order:
//!
//! ```text
//! processor (per line) -> matcher -> assembler -> resolver / dates
//! ```
//!
//! `table` and `config` load the airport code table and the settings that
//! the processor is driven with.

pub mod assembler;
pub mod config;
pub mod dates;
pub mod matcher;
pub mod processor;
pub mod resolver;
pub mod table;
