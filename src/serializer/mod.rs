mod geo_coord_serializer;
mod geo_coords_serializer;

pub use geo_coords_serializer::GeoCoordsSerializer;
