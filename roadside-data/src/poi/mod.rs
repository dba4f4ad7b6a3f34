//! POI retrieval from Overpass-style OSM search services.
//!
//! [`OverpassClient`] implements [`roadside_core::PoiSource`]: it builds one
//! OR'd Overpass QL union per query, posts it to a list of redundant
//! endpoints (first success wins) and normalises node and way/relation
//! element shapes into the engine's [`roadside_core::Poi`] record.

mod client;
mod overpass;

pub use client::{OverpassClient, OverpassClientConfig};
