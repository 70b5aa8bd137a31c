//! GapScout OSM - OpenStreetMap adapters
//!
//! Overpass API implementation of the `GeoDataSource` port, plus a Nominatim
//! client for free-text geocoding and relevance-ranked autocomplete.

pub mod nominatim;
pub mod overpass;

pub use nominatim::{NominatimClient, PlaceSuggestion};
pub use overpass::OverpassClient;
