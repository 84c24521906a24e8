use crate::domain::{GeoCoord, KeyDecoding, KeyError, KeyInput, canonical_key};
use crate::geo_coords_config::GeoCoordsConfig;
use std::borrow::Cow;
use std::collections::{BTreeMap, btree_map};
use std::convert::Infallible;
use std::fmt::Debug;
use thiserror::Error;
use tracing::{debug, instrument, trace};

/// The plain form of a [`GeoCoordsMap`], which is also its backing store.
pub type GeoCoordsData = BTreeMap<String, Vec<GeoCoord>>;

/// The mutable mapping contract of a coordinate container.
pub trait CoordinateMapping {
    /// Returns the coordinates stored at `key`, inserting an empty list first if the key is absent.
    fn get<K: KeyInput>(&mut self, key: K) -> Result<&mut Vec<GeoCoord>, GeoCoordsError>;
    fn set<K: KeyInput>(&mut self, key: K, coords: Vec<GeoCoord>) -> Result<Option<Vec<GeoCoord>>, GeoCoordsError>;
    fn delete<K: KeyInput>(&mut self, key: K) -> Result<Vec<GeoCoord>, GeoCoordsError>;
    fn size(&self) -> usize;
    fn keys(&self) -> impl Iterator<Item = &str>;
}

/// Maps string keys to lists of `(longitude, latitude, altitude)` coordinates.
///
/// Keys are normalized to their canonical string form on every access, so a byte key and a text key with
/// the same characters address the same entry. Keys iterate in sorted order.
#[derive(Clone, Default)]
pub struct GeoCoordsMap {
    data: GeoCoordsData,
    config: GeoCoordsConfig,
}

impl GeoCoordsMap {
    pub fn new() -> Self {
        GeoCoordsMap::default()
    }

    pub fn with_config(config: GeoCoordsConfig) -> Self {
        GeoCoordsMap {
            data: BTreeMap::new(),
            config,
        }
    }

    /// Builds a map from `(key, coordinates)` entries, validating every coordinate before anything is stored.
    ///
    /// Keys that normalize to the same canonical key have their coordinates concatenated in input order.
    pub fn try_from_entries<K, C, T>(entries: impl IntoIterator<Item = (K, C)>) -> Result<Self, GeoCoordsError>
    where
        K: KeyInput,
        C: IntoIterator<Item = T>,
        T: TryInto<GeoCoord>,
        GeoCoordsError: From<T::Error>,
    {
        Self::try_from_entries_with_config(entries, GeoCoordsConfig::default())
    }

    pub fn try_from_entries_with_config<K, C, T>(entries: impl IntoIterator<Item = (K, C)>, config: GeoCoordsConfig) -> Result<Self, GeoCoordsError>
    where
        K: KeyInput,
        C: IntoIterator<Item = T>,
        T: TryInto<GeoCoord>,
        GeoCoordsError: From<T::Error>,
    {
        let validated = entries
            .into_iter()
            .map(|entry| validate_entry(entry, config.key_decoding()))
            .collect::<Result<Vec<_>, _>>()?;

        let mut map = GeoCoordsMap::with_config(config);
        for (key, coords) in validated {
            map.data.entry(key).or_default().extend(coords);
        }
        Ok(map)
    }

    pub fn config(&self) -> &GeoCoordsConfig {
        &self.config
    }

    /// Returns the coordinates stored at `key`. An absent key is inserted with an empty list, which is why
    /// this takes `&mut self`; use [`GeoCoordsMap::find`] for a lookup without side effects.
    pub fn get<K: KeyInput>(&mut self, key: K) -> Result<&mut Vec<GeoCoord>, GeoCoordsError> {
        let key = self.normalize(&key)?.into_owned();

        let coords = match self.data.entry(key) {
            btree_map::Entry::Occupied(entry) => entry.into_mut(),
            btree_map::Entry::Vacant(entry) => {
                trace!("🌍 Inserting empty coordinates for missing key '{}'", entry.key());
                entry.insert(Vec::new())
            }
        };
        Ok(coords)
    }

    pub fn find<K: KeyInput>(&self, key: K) -> Result<Option<&[GeoCoord]>, GeoCoordsError> {
        let key = self.normalize(&key)?;
        Ok(self.data.get(key.as_ref()).map(Vec::as_slice))
    }

    pub fn contains_key<K: KeyInput>(&self, key: K) -> Result<bool, GeoCoordsError> {
        let key = self.normalize(&key)?;
        Ok(self.data.contains_key(key.as_ref()))
    }

    /// Replaces the coordinates at `key`, returning the previous ones.
    pub fn set<K: KeyInput>(&mut self, key: K, coords: Vec<GeoCoord>) -> Result<Option<Vec<GeoCoord>>, GeoCoordsError> {
        let key = self.normalize(&key)?.into_owned();
        Ok(self.data.insert(key, coords))
    }

    /// Like [`GeoCoordsMap::set`] but accepts plain coordinate values, validating all of them first.
    pub fn try_set<K, C, T>(&mut self, key: K, coords: C) -> Result<Option<Vec<GeoCoord>>, GeoCoordsError>
    where
        K: KeyInput,
        C: IntoIterator<Item = T>,
        T: TryInto<GeoCoord>,
        GeoCoordsError: From<T::Error>,
    {
        let (key, coords) = validate_entry((key, coords), self.config.key_decoding())?;
        Ok(self.data.insert(key, coords))
    }

    pub fn delete<K: KeyInput>(&mut self, key: K) -> Result<Vec<GeoCoord>, GeoCoordsError> {
        let key = self.normalize(&key)?;
        self.data.remove(key.as_ref()).ok_or_else(|| GeoCoordsError::KeyNotFound(key.into_owned()))
    }

    /// Replaces every named entry with the given coordinates.
    ///
    /// With atomic updates configured, nothing is written unless every entry is valid. Otherwise entries are
    /// applied in order and those before the first invalid one are kept.
    #[instrument(skip_all)]
    pub fn try_extend<K, C, T>(&mut self, entries: impl IntoIterator<Item = (K, C)>) -> Result<(), GeoCoordsError>
    where
        K: KeyInput,
        C: IntoIterator<Item = T>,
        T: TryInto<GeoCoord>,
        GeoCoordsError: From<T::Error>,
    {
        let decoding = self.config.key_decoding();

        if self.config.atomic_updates() {
            let validated = entries
                .into_iter()
                .map(|entry| validate_entry(entry, decoding))
                .collect::<Result<Vec<_>, _>>()?;
            self.data.extend(validated);
        } else {
            for entry in entries {
                let (key, coords) = validate_entry(entry, decoding)?;
                self.data.insert(key, coords);
            }
        }
        Ok(())
    }

    pub fn clear(&mut self) {
        self.data.clear();
    }

    /// Number of keys, not of coordinates.
    pub fn size(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.data.keys().map(String::as_str)
    }

    pub fn iter(&self) -> btree_map::Iter<'_, String, Vec<GeoCoord>> {
        self.data.iter()
    }

    pub fn as_data(&self) -> &GeoCoordsData {
        &self.data
    }

    pub fn into_data(self) -> GeoCoordsData {
        self.data
    }

    pub(crate) fn from_data(data: GeoCoordsData, config: GeoCoordsConfig) -> Self {
        GeoCoordsMap { data, config }
    }

    fn normalize<'k, K: KeyInput>(&self, key: &'k K) -> Result<Cow<'k, str>, KeyError> {
        canonical_key(key, self.config.key_decoding())
    }
}

fn validate_entry<K, C, T>((key, coords): (K, C), decoding: KeyDecoding) -> Result<(String, Vec<GeoCoord>), GeoCoordsError>
where
    K: KeyInput,
    C: IntoIterator<Item = T>,
    T: TryInto<GeoCoord>,
    GeoCoordsError: From<T::Error>,
{
    let key = canonical_key(&key, decoding)?.into_owned();
    let coords = coords
        .into_iter()
        .map(|coord| coord.try_into().map_err(GeoCoordsError::from))
        .collect::<Result<Vec<_>, _>>()
        .inspect_err(|err| debug!("🌍 Rejected coordinates for key '{}': {}", key, err))?;

    Ok((key, coords))
}

impl CoordinateMapping for GeoCoordsMap {
    fn get<K: KeyInput>(&mut self, key: K) -> Result<&mut Vec<GeoCoord>, GeoCoordsError> {
        GeoCoordsMap::get(self, key)
    }

    fn set<K: KeyInput>(&mut self, key: K, coords: Vec<GeoCoord>) -> Result<Option<Vec<GeoCoord>>, GeoCoordsError> {
        GeoCoordsMap::set(self, key, coords)
    }

    fn delete<K: KeyInput>(&mut self, key: K) -> Result<Vec<GeoCoord>, GeoCoordsError> {
        GeoCoordsMap::delete(self, key)
    }

    fn size(&self) -> usize {
        GeoCoordsMap::size(self)
    }

    fn keys(&self) -> impl Iterator<Item = &str> {
        GeoCoordsMap::keys(self)
    }
}

impl PartialEq for GeoCoordsMap {
    fn eq(&self, other: &Self) -> bool {
        self.data == other.data
    }
}

impl<K: Into<String>> FromIterator<(K, Vec<GeoCoord>)> for GeoCoordsMap {
    /// Collects already validated coordinates. Keys are taken as given.
    fn from_iter<T: IntoIterator<Item = (K, Vec<GeoCoord>)>>(iter: T) -> Self {
        let mut map = GeoCoordsMap::new();
        for (key, coords) in iter {
            map.data.entry(key.into()).or_default().extend(coords);
        }
        map
    }
}

impl IntoIterator for GeoCoordsMap {
    type Item = (String, Vec<GeoCoord>);
    type IntoIter = btree_map::IntoIter<String, Vec<GeoCoord>>;

    fn into_iter(self) -> Self::IntoIter {
        self.data.into_iter()
    }
}

impl<'a> IntoIterator for &'a GeoCoordsMap {
    type Item = (&'a String, &'a Vec<GeoCoord>);
    type IntoIter = btree_map::Iter<'a, String, Vec<GeoCoord>>;

    fn into_iter(self) -> Self::IntoIter {
        self.data.iter()
    }
}

impl Debug for GeoCoordsMap {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "GeoCoordsMap(")?;
        f.debug_map().entries(self.data.iter()).finish()?;
        write!(f, ")")
    }
}

#[derive(Error, Debug)]
pub enum GeoCoordsError {
    #[error("{0}")]
    Validation(String),
    #[error("key not found: '{0}'")]
    KeyNotFound(String),
    #[error(transparent)]
    InvalidKey(#[from] KeyError),
}

impl GeoCoordsError {
    pub(crate) fn invalid_coordinate(value: &serde_json::Value) -> Self {
        GeoCoordsError::Validation(format!("expecting three-tuples of lon, lat, alt, and got: {}", value))
    }

    pub(crate) fn invalid_coordinate_list(key: &str, value: &serde_json::Value) -> Self {
        GeoCoordsError::Validation(format!("expecting a list of coordinates for '{}', and got: {}", key, value))
    }

    pub(crate) fn invalid_mapping(value: &serde_json::Value) -> Self {
        GeoCoordsError::Validation(format!("expecting a mapping of keys to coordinates, and got: {}", value))
    }
}

impl From<Infallible> for GeoCoordsError {
    fn from(value: Infallible) -> Self {
        match value {}
    }
}
