use crate::property::{Property, PropertyError, PropertyKind};
use config::builder::DefaultState;
use config::{Case, Config, ConfigBuilder, Environment, File, FileFormat, Map};
use std::borrow::Cow;
use std::collections::{BTreeMap, HashMap};
use std::hash::BuildHasher;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Custom error type for reading raw configuration.
#[gate_derive::gate_error]
pub enum ConfigError {
    #[error("Config error{}: {source}", format_context(.context))]
    Config { source: config::ConfigError, context: Option<Cow<'static, str>> },
}

/// A read-only lookup from property name to raw string value.
///
/// Implemented for plain maps, which makes fixtures trivial, and for [`Properties`].
pub trait ConfigSource: Send + Sync {
    /// Returns the raw value of `name`, or `None` if it is not configured.
    ///
    /// # Errors
    /// Returns [`ConfigError`] if the underlying source cannot be read.
    fn raw(&self, name: &str) -> Result<Option<String>, ConfigError>;
}

impl<S: BuildHasher + Send + Sync> ConfigSource for HashMap<String, String, S> {
    fn raw(&self, name: &str) -> Result<Option<String>, ConfigError> {
        Ok(self.get(name).cloned())
    }
}

impl ConfigSource for BTreeMap<String, String> {
    fn raw(&self, name: &str) -> Result<Option<String>, ConfigError> {
        Ok(self.get(name).cloned())
    }
}

/// Typed access to any [`ConfigSource`].
///
/// Defaults live here, with the caller, never inside property parsing: an absent value falls
/// back to the supplied default while an invalid one is always an error.
pub trait ConfigSourceExt: ConfigSource {
    /// Reads and parses a single value.
    ///
    /// # Errors
    /// [`PropertyError`] if the source fails or the raw value does not parse.
    fn property<K: PropertyKind>(
        &self,
        property: &Property<K>,
    ) -> Result<Option<K::Value>, PropertyError> {
        let raw = self.raw(property.name())?;
        property.parse_scalar(raw.as_deref())
    }

    /// Reads a single value, falling back to `default` when it is not configured.
    ///
    /// # Errors
    /// [`PropertyError`] if the source fails or the raw value does not parse.
    fn property_or<K: PropertyKind>(
        &self,
        property: &Property<K>,
        default: K::Value,
    ) -> Result<K::Value, PropertyError> {
        Ok(self.property(property)?.unwrap_or(default))
    }

    /// Reads a single value that must be configured.
    ///
    /// # Errors
    /// [`PropertyError::Missing`] if the value is absent, otherwise as [`Self::property`].
    fn required_property<K: PropertyKind>(
        &self,
        property: &Property<K>,
    ) -> Result<K::Value, PropertyError> {
        self.property(property)?
            .ok_or(PropertyError::Missing { name: property.name(), context: None })
    }

    /// Reads and parses a comma-delimited list.
    ///
    /// # Errors
    /// [`PropertyError`] if the source fails or any entry does not parse.
    fn property_list<K: PropertyKind>(
        &self,
        property: &Property<K>,
    ) -> Result<Option<Vec<K::Value>>, PropertyError> {
        let raw = self.raw(property.name())?;
        property.parse_collection(raw.as_deref())
    }

    /// Reads a comma-delimited list, falling back to `default` when it has no entries.
    ///
    /// # Errors
    /// [`PropertyError`] if the source fails or any entry does not parse.
    fn property_list_or<K: PropertyKind>(
        &self,
        property: &Property<K>,
        default: Vec<K::Value>,
    ) -> Result<Vec<K::Value>, PropertyError> {
        Ok(self.property_list(property)?.unwrap_or(default))
    }
}

impl<S: ConfigSource + ?Sized> ConfigSourceExt for S {}

/// A layered properties source: an INI-style file overridden by environment variables.
///
/// Keys are property names (`totp-bypass-hosts`). An environment variable overrides a key
/// when its name is the prefix, an underscore, and the key in upper snake case
/// (`GATE_TOTP_BYPASS_HOSTS`).
#[derive(Debug, Clone)]
pub struct Properties {
    inner: Config,
}

impl Properties {
    /// Prefix of environment overrides used by [`Properties::load`].
    pub const ENV_PREFIX: &'static str = "GATE";

    /// Returns a new [`PropertiesBuilder`] with no layers.
    #[must_use]
    pub fn builder() -> PropertiesBuilder {
        PropertiesBuilder::default()
    }

    /// Loads the properties file at `path` (default `gate.properties`) with environment
    /// overrides prefixed by [`Self::ENV_PREFIX`].
    ///
    /// # Errors
    /// Returns [`ConfigError`] if the file is missing or not valid INI syntax.
    ///
    /// # Example
    /// ```rust,no_run
    /// use gate_kernel::config::Properties;
    ///
    /// let properties = Properties::load(Some("/etc/gate/gate.properties")).unwrap();
    /// ```
    pub fn load(path: Option<impl AsRef<Path>>) -> Result<Self, ConfigError> {
        let path =
            path.map_or_else(|| PathBuf::from("gate.properties"), |p| p.as_ref().to_path_buf());
        Self::builder().file(path).environment(Self::ENV_PREFIX).build()
    }

    /// Parses properties from an in-memory INI document, without environment overrides.
    ///
    /// # Errors
    /// Returns [`ConfigError`] if `contents` is not valid INI syntax.
    pub fn from_ini(contents: &str) -> Result<Self, ConfigError> {
        Self::builder().ini(contents).build()
    }
}

impl ConfigSource for Properties {
    fn raw(&self, name: &str) -> Result<Option<String>, ConfigError> {
        match self.inner.get_string(name) {
            Ok(value) => Ok(Some(value)),
            Err(config::ConfigError::NotFound(_)) => Ok(None),
            Err(source) => Err(ConfigError::Config {
                source,
                context: Some(format!("Failed to read property \"{name}\"").into()),
            }),
        }
    }
}

/// Assembles the layers of a [`Properties`] source; later layers win.
#[derive(Debug, Default)]
pub struct PropertiesBuilder {
    builder: ConfigBuilder<DefaultState>,
}

impl PropertiesBuilder {
    /// Adds a required INI file.
    #[must_use]
    pub fn file(mut self, path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        info!("Loading properties from {}", path.display());
        self.builder =
            self.builder.add_source(File::from(path).format(FileFormat::Ini).required(true));
        self
    }

    /// Adds an in-memory INI document.
    #[must_use]
    pub fn ini(mut self, contents: &str) -> Self {
        self.builder = self.builder.add_source(File::from_str(contents, FileFormat::Ini));
        self
    }

    /// Adds environment overrides for variables named `<prefix>_<PROPERTY_NAME>`.
    #[must_use]
    pub fn environment(self, prefix: &str) -> Self {
        self.environment_from(prefix, None)
    }

    /// Like [`Self::environment`], reading `vars` instead of the process environment when given.
    #[must_use]
    pub fn environment_from(mut self, prefix: &str, vars: Option<Map<String, String>>) -> Self {
        debug!(prefix, "Enabling environment property overrides");
        self.builder = self
            .builder
            .add_source(Environment::with_prefix(prefix).convert_case(Case::Kebab).source(vars));
        self
    }

    /// Reads every layer.
    ///
    /// # Errors
    /// Returns [`ConfigError`] if a required file is missing or a layer cannot be parsed.
    pub fn build(self) -> Result<Properties, ConfigError> {
        let inner = self.builder.build().context("Failed to build properties")?;
        Ok(Properties { inner })
    }
}
