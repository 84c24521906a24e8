use crate::domain::{GeoCoord, Number};
use crate::geo_coords_config::GeoCoordsConfig;
use crate::geo_coords_map::{GeoCoordsData, GeoCoordsError, GeoCoordsMap};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use tracing::{debug, instrument};

/// Converts [`GeoCoordsMap`]s to and from their plain form.
///
/// Has no variants, so it can never be instantiated.
pub enum GeoCoordsSerializer {}

impl GeoCoordsSerializer {
    /// Returns the backing map itself; the plain form and the in-memory form are the same.
    pub fn dumps(map: &GeoCoordsMap) -> &GeoCoordsData {
        map.as_data()
    }

    pub fn to_value(map: &GeoCoordsMap) -> serde_json::Value {
        serde_json::Value::Object(
            map.iter()
                .map(|(key, coords)| {
                    let coords = coords.iter().map(coord_to_value).collect();
                    (key.clone(), serde_json::Value::Array(coords))
                })
                .collect(),
        )
    }

    pub fn loads(plain: serde_json::Value) -> Result<GeoCoordsMap, GeoCoordsError> {
        Self::loads_with_config(plain, GeoCoordsConfig::default())
    }

    #[instrument(skip_all)]
    pub fn loads_with_config(plain: serde_json::Value, config: GeoCoordsConfig) -> Result<GeoCoordsMap, GeoCoordsError> {
        debug!("🌍 Loading coordinates...");
        let entries = match plain {
            serde_json::Value::Object(entries) => entries,
            other => return Err(GeoCoordsError::invalid_mapping(&other)),
        };

        let entries = entries
            .into_iter()
            .map(|(key, coords)| match coords {
                serde_json::Value::Array(coords) => Ok((key, coords)),
                other => Err(GeoCoordsError::invalid_coordinate_list(&key, &other)),
            })
            .collect::<Result<Vec<_>, _>>()?;

        let map = GeoCoordsMap::try_from_entries_with_config(entries, config)?;
        debug!(
            "🌍 Loading coordinates... OK, {} key(s), {} coordinate(s)",
            map.size(),
            map.iter().map(|(_, coords)| coords.len()).sum::<usize>()
        );
        Ok(map)
    }
}

fn coord_to_value(coord: &GeoCoord) -> serde_json::Value {
    serde_json::Value::Array(coord.components().iter().map(number_to_value).collect())
}

fn number_to_value(number: &Number) -> serde_json::Value {
    match *number {
        Number::PositiveInt(n) => serde_json::Value::from(n),
        Number::NegativeInt(n) => serde_json::Value::from(n),
        // Non-finite floats have no JSON representation and become null
        Number::Float(n) => serde_json::Value::from(n),
    }
}

impl Serialize for GeoCoordsMap {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.as_data().serialize(serializer)
    }
}

/// Always builds the map with [`GeoCoordsConfig::default()`]. Use
/// [`GeoCoordsSerializer::loads_with_config`] to load with any other configuration.
impl<'de> Deserialize<'de> for GeoCoordsMap {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let data = GeoCoordsData::deserialize(deserializer)?;
        Ok(GeoCoordsMap::from_data(data, GeoCoordsConfig::default()))
    }
}
