//! A typed container mapping string keys to lists of `(longitude, latitude, altitude)` coordinates, plus
//! the adapter that converts it to and from its plain JSON-compatible form.

pub mod domain;
mod geo_coords_config;
mod geo_coords_map;
mod serializer;

pub use domain::{GeoCoord, KeyDecoding, KeyError, KeyInput, Number, canonical_key};
pub use geo_coords_config::{GeoCoordsConfig, GeoCoordsConfigBuilder};
pub use geo_coords_map::{CoordinateMapping, GeoCoordsData, GeoCoordsError, GeoCoordsMap};
pub use serializer::GeoCoordsSerializer;
