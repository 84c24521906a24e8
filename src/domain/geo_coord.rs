use crate::domain::Number;
use crate::geo_coords_map::GeoCoordsError;
use std::fmt::Debug;

/// A `(longitude, latitude, altitude)` triple. Ranges are not checked.
#[derive(Clone, Copy, PartialEq)]
pub struct GeoCoord([Number; 3]);

impl GeoCoord {
    pub fn new(longitude: impl Into<Number>, latitude: impl Into<Number>, altitude: impl Into<Number>) -> Self {
        GeoCoord([longitude.into(), latitude.into(), altitude.into()])
    }

    pub fn longitude(&self) -> Number {
        self.0[0]
    }

    pub fn latitude(&self) -> Number {
        self.0[1]
    }

    pub fn altitude(&self) -> Number {
        self.0[2]
    }

    pub fn components(&self) -> &[Number; 3] {
        &self.0
    }

    pub fn to_f64_array(&self) -> [f64; 3] {
        [self.0[0].as_f64(), self.0[1].as_f64(), self.0[2].as_f64()]
    }
}

impl From<[Number; 3]> for GeoCoord {
    fn from(value: [Number; 3]) -> Self {
        GeoCoord(value)
    }
}

impl From<[f64; 3]> for GeoCoord {
    fn from(value: [f64; 3]) -> Self {
        GeoCoord(value.map(Number::Float))
    }
}

impl From<(f64, f64, f64)> for GeoCoord {
    fn from(value: (f64, f64, f64)) -> Self {
        GeoCoord::new(value.0, value.1, value.2)
    }
}

impl From<[i64; 3]> for GeoCoord {
    fn from(value: [i64; 3]) -> Self {
        GeoCoord(value.map(Number::from))
    }
}

impl From<[u64; 3]> for GeoCoord {
    fn from(value: [u64; 3]) -> Self {
        GeoCoord(value.map(Number::PositiveInt))
    }
}

impl From<&GeoCoord> for GeoCoord {
    fn from(value: &GeoCoord) -> Self {
        *value
    }
}

impl From<GeoCoord> for [f64; 3] {
    fn from(value: GeoCoord) -> Self {
        value.to_f64_array()
    }
}

impl TryFrom<&serde_json::Value> for GeoCoord {
    type Error = GeoCoordsError;

    fn try_from(value: &serde_json::Value) -> Result<Self, Self::Error> {
        let invalid = || GeoCoordsError::invalid_coordinate(value);

        let serde_json::Value::Array(items) = value else {
            return Err(invalid());
        };
        let [lon, lat, alt] = items.as_slice() else {
            return Err(invalid());
        };

        match (lon, lat, alt) {
            (serde_json::Value::Number(lon), serde_json::Value::Number(lat), serde_json::Value::Number(alt)) => {
                Ok(GeoCoord([lon.into(), lat.into(), alt.into()]))
            }
            _ => Err(invalid()),
        }
    }
}

impl TryFrom<serde_json::Value> for GeoCoord {
    type Error = GeoCoordsError;

    fn try_from(value: serde_json::Value) -> Result<Self, Self::Error> {
        GeoCoord::try_from(&value)
    }
}

impl TryFrom<Vec<serde_json::Value>> for GeoCoord {
    type Error = GeoCoordsError;

    fn try_from(value: Vec<serde_json::Value>) -> Result<Self, Self::Error> {
        GeoCoord::try_from(serde_json::Value::Array(value))
    }
}

impl Debug for GeoCoord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}, {}, {}]", self.0[0], self.0[1], self.0[2])
    }
}
