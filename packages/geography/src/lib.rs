#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Municipality geography for the fire map.
//!
//! Owns the normalization of municipality names (the sole join and
//! group-by key of the system) and the static coordinate reference table
//! loaded once at startup. The lookup is immutable for the process
//! lifetime and passed explicitly into the pipeline, never held as
//! ambient mutable state.

pub mod lookup;
pub mod normalize;

pub use lookup::{CoordinateEntry, CoordinateLookup, LookupError};
pub use normalize::{normalize_municipality, normalize_text_key};
