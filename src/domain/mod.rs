mod canonical_key;
mod geo_coord;
mod number;

pub use canonical_key::{KeyDecoding, KeyError, KeyInput, canonical_key};
pub use geo_coord::GeoCoord;
pub use number::Number;
