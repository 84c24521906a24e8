use crate::domain::KeyDecoding;
use ::config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct GeoCoordsConfig {
    key_decoding: KeyDecoding,
    atomic_updates: bool,
}

impl Default for GeoCoordsConfig {
    fn default() -> Self {
        GeoCoordsConfig {
            key_decoding: KeyDecoding::Strict,
            atomic_updates: true,
        }
    }
}

impl GeoCoordsConfig {
    /// Layers an optional `geocoords` file and `GEOCOORDS_*` environment variables over the defaults.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(Environment::with_prefix("GEOCOORDS"))
    }

    fn load_from(environment: Environment) -> Result<Self, ConfigError> {
        let config = Config::builder()
            .add_source(File::with_name("geocoords").required(false))
            .add_source(environment)
            .build()?;

        Self::from_config(config)
    }

    pub fn from_config(config: Config) -> Result<Self, ConfigError> {
        config.try_deserialize()
    }

    pub fn builder() -> GeoCoordsConfigBuilder {
        GeoCoordsConfigBuilder::new()
    }

    pub fn key_decoding(&self) -> KeyDecoding {
        self.key_decoding
    }

    /// When set, a bulk update is validated in full before any entry is written.
    pub fn atomic_updates(&self) -> bool {
        self.atomic_updates
    }
}

pub struct GeoCoordsConfigBuilder {
    config: GeoCoordsConfig,
}

impl GeoCoordsConfigBuilder {
    pub fn new() -> Self {
        GeoCoordsConfigBuilder {
            config: GeoCoordsConfig::default(),
        }
    }

    pub fn key_decoding(mut self, key_decoding: KeyDecoding) -> Self {
        self.config.key_decoding = key_decoding;
        self
    }

    pub fn atomic_updates(mut self, atomic_updates: bool) -> Self {
        self.config.atomic_updates = atomic_updates;
        self
    }

    pub fn build(self) -> GeoCoordsConfig {
        self.config
    }
}

impl Default for GeoCoordsConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ::config::{FileFormat, Map};
    use pretty_assertions::assert_eq;

    fn environment(vars: &[(&str, &str)]) -> Environment {
        let vars = vars.iter().map(|(name, value)| (name.to_string(), value.to_string())).collect::<Map<_, _>>();
        Environment::with_prefix("GEOCOORDS").source(Some(vars))
    }

    #[test]
    fn defaults_to_strict_keys_and_atomic_updates() {
        let config = GeoCoordsConfig::default();

        assert_eq!(config.key_decoding(), KeyDecoding::Strict);
        assert!(config.atomic_updates());
    }

    #[test]
    fn reads_settings_from_a_source() -> Result<(), ConfigError> {
        let source = Config::builder()
            .add_source(File::from_str(r#"{ "key_decoding": "lossy", "atomic_updates": false }"#, FileFormat::Json))
            .build()?;

        let config = GeoCoordsConfig::from_config(source)?;

        assert_eq!(config, GeoCoordsConfig::builder().key_decoding(KeyDecoding::Lossy).atomic_updates(false).build());
        Ok(())
    }

    #[test]
    fn falls_back_to_defaults_for_missing_settings() -> Result<(), ConfigError> {
        let source = Config::builder().set_override("atomic_updates", false)?.build()?;

        let config = GeoCoordsConfig::from_config(source)?;

        assert_eq!(config.key_decoding(), KeyDecoding::Strict);
        assert!(!config.atomic_updates());
        Ok(())
    }

    #[test]
    fn load_reads_settings_from_the_environment() -> Result<(), ConfigError> {
        let config = GeoCoordsConfig::load_from(environment(&[("GEOCOORDS_KEY_DECODING", "lossy"), ("GEOCOORDS_ATOMIC_UPDATES", "false")]))?;

        assert_eq!(config, GeoCoordsConfig::builder().key_decoding(KeyDecoding::Lossy).atomic_updates(false).build());
        Ok(())
    }

    #[test]
    fn load_ignores_variables_without_the_prefix() -> Result<(), ConfigError> {
        let config = GeoCoordsConfig::load_from(environment(&[("KEY_DECODING", "lossy"), ("OTHER_ATOMIC_UPDATES", "false")]))?;

        assert_eq!(config, GeoCoordsConfig::default());
        Ok(())
    }

    #[test]
    fn load_rejects_an_unknown_key_decoding_from_the_environment() {
        let result = GeoCoordsConfig::load_from(environment(&[("GEOCOORDS_KEY_DECODING", "latin1")]));

        assert!(result.is_err());
    }

    #[test]
    fn rejects_unknown_key_decoding() -> Result<(), ConfigError> {
        let source = Config::builder().set_override("key_decoding", "latin1")?.build()?;

        assert!(GeoCoordsConfig::from_config(source).is_err());
        Ok(())
    }
}
