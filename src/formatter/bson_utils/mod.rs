//! BSON value conversion utilities
//!
//! This module converts BSON values to JSON with interchangeable strategies:
//! - Simplified JSON for human consumption
//! - Relaxed or canonical MongoDB Extended JSON
//!
//! # Design
//!
//! The module uses a strategy pattern with a common trait `BsonConverter`
//! so the JSON encoder can pick a strategy at runtime.

mod converter;
mod helpers;
mod strategies;

pub use converter::{BsonConverter, BsonJsonConverter};
pub use strategies::{ExtendedJsonConverter, SimplifiedJsonConverter};
