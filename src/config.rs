//! Configuration: a key/value lookup trait, a map-backed adapter, and the builder used to
//! construct an [`crate::container::ApplicationModules`].

use std::{collections::HashMap, sync::Arc};

use crate::{
    container::detection::{self, DetectionStrategy},
    error::ConfigurationError,
    external::{ExternalRule, NoPackageAnnotations, PackageAnnotationSource},
    name::PackageName,
    stereotype::StereotypeCatalog,
};

/// The conventional fully-qualified name of the marker applied to a module's base package.
pub const DEFAULT_APPLICATION_MODULE_MARKER: &str = "org.springframework.modulith.ApplicationModule";
/// The conventional fully-qualified name of the marker applied to a named interface.
pub const DEFAULT_NAMED_INTERFACE_MARKER: &str = "org.springframework.modulith.NamedInterface";

/// A key/value configuration lookup, implemented over whatever the host application's
/// configuration system is (environment, properties file, in-memory map).
pub trait ConfigurationSource {
    /// Looks up a raw string value by key.
    fn get(&self, key: &str) -> Option<&str>;

    /// Whether fully-qualified package names should be used as module identifiers, from the
    /// `modulith.use-fully-qualified-module-names` key (default `false`).
    ///
    /// # Errors
    /// Returns [`ConfigurationError::InvalidValue`] if the key is set to something other than
    /// `"true"`/`"false"`.
    fn use_fully_qualified_module_names(&self) -> Result<bool, ConfigurationError> {
        match self.get("modulith.use-fully-qualified-module-names") {
            None => Ok(false),
            Some(value) => value.parse().map_err(|_| ConfigurationError::InvalidValue {
                key: "modulith.use-fully-qualified-module-names".to_owned(),
                value: value.to_owned(),
                reason: "expected \"true\" or \"false\"".to_owned(),
            }),
        }
    }

    /// The configured root packages, from the comma-separated `modulith.root-packages` key.
    ///
    /// # Errors
    /// Returns [`ConfigurationError::InvalidValue`] if a listed package name is malformed.
    fn root_packages(&self) -> Result<Vec<PackageName>, ConfigurationError> {
        let Some(raw) = self.get("modulith.root-packages") else {
            return Ok(Vec::new());
        };
        raw.split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|s| {
                s.parse().map_err(|_| ConfigurationError::InvalidValue {
                    key: "modulith.root-packages".to_owned(),
                    value: s.to_owned(),
                    reason: "not a valid package name".to_owned(),
                })
            })
            .collect()
    }

    /// The configured shared-module identifiers, from the comma-separated
    /// `modulith.shared-modules` key.
    fn shared_modules(&self) -> Vec<String> {
        self.get("modulith.shared-modules")
            .map(|raw| raw.split(',').map(str::trim).filter(|s| !s.is_empty()).map(str::to_owned).collect())
            .unwrap_or_default()
    }

    /// An optional human-readable name for the system under analysis, from `modulith.system-name`.
    fn system_name(&self) -> Option<&str> {
        self.get("modulith.system-name")
    }

    /// The configured detection strategy, from `modulith.detection-strategy`
    /// (`"direct-sub-packages"` by default).
    ///
    /// # Errors
    /// Returns [`ConfigurationError::InvalidValue`] if the name is not a recognized built-in.
    fn detection_strategy(&self) -> Result<Box<dyn DetectionStrategy>, ConfigurationError> {
        let name = self.get("modulith.detection-strategy").unwrap_or("direct-sub-packages");
        detection::built_in(name).ok_or_else(|| ConfigurationError::InvalidValue {
            key: "modulith.detection-strategy".to_owned(),
            value: name.to_owned(),
            reason: "not a recognized detection strategy".to_owned(),
        })
    }
}

/// A [`ConfigurationSource`] backed by an in-memory key/value map — used by tests and simple
/// embedding scenarios where the host does not already have its own configuration system.
#[derive(Debug, Clone, Default)]
pub struct MapConfigurationSource {
    values: HashMap<String, String>,
}

impl MapConfigurationSource {
    /// Creates an empty source.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a key, returning `self` for chaining.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.values.insert(key.into(), value.into());
        self
    }
}

impl From<HashMap<String, String>> for MapConfigurationSource {
    fn from(values: HashMap<String, String>) -> Self {
        Self { values }
    }
}

impl ConfigurationSource for MapConfigurationSource {
    fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }
}

/// A fluent builder for the capabilities [`crate::container::ApplicationModules::of`] needs:
/// detection strategy, stereotype catalog, package-annotation source, extra rules, and the
/// identifier-naming options.
pub struct ApplicationModulesOptions {
    pub(crate) application_module_marker: String,
    pub(crate) named_interface_marker: String,
    pub(crate) detection_strategy: Box<dyn DetectionStrategy>,
    pub(crate) detection_strategy_registrations: Vec<String>,
    pub(crate) stereotype_catalog: Arc<StereotypeCatalog>,
    pub(crate) package_annotation_source: Arc<dyn PackageAnnotationSource>,
    pub(crate) extra_rules: Vec<Box<dyn ExternalRule>>,
    pub(crate) use_fully_qualified_module_names: bool,
    pub(crate) shared_modules: Vec<String>,
    pub(crate) ignore: Option<Box<dyn Fn(&PackageName) -> bool>>,
}

impl Default for ApplicationModulesOptions {
    fn default() -> Self {
        Self {
            application_module_marker: DEFAULT_APPLICATION_MODULE_MARKER.to_owned(),
            named_interface_marker: DEFAULT_NAMED_INTERFACE_MARKER.to_owned(),
            detection_strategy: Box::new(crate::container::detection::DirectSubPackages),
            detection_strategy_registrations: Vec::new(),
            stereotype_catalog: Arc::new(StereotypeCatalog::default()),
            package_annotation_source: Arc::new(NoPackageAnnotations),
            extra_rules: Vec::new(),
            use_fully_qualified_module_names: false,
            shared_modules: Vec::new(),
            ignore: None,
        }
    }
}

impl ApplicationModulesOptions {
    /// Creates a builder from typed accessors exposed by a [`ConfigurationSource`].
    ///
    /// # Errors
    /// Propagates any [`ConfigurationError`] raised by the source's typed accessors.
    pub fn from_source(source: &dyn ConfigurationSource) -> Result<Self, ConfigurationError> {
        Ok(Self {
            detection_strategy: source.detection_strategy()?,
            use_fully_qualified_module_names: source.use_fully_qualified_module_names()?,
            shared_modules: source.shared_modules(),
            ..Self::default()
        })
    }

    /// Registers a detection strategy, replacing any previously registered one.
    ///
    /// Registering more than one strategy on the same builder is a configuration mistake rather
    /// than a later-wins override: [`crate::container::ApplicationModules::of`] raises
    /// [`ConfigurationError::MultipleDetectionStrategies`] if this is called more than once.
    #[must_use]
    pub fn with_detection_strategy<S: DetectionStrategy + 'static>(mut self, strategy: S) -> Self {
        self.detection_strategy_registrations.push(std::any::type_name::<S>().to_owned());
        self.detection_strategy = Box::new(strategy);
        self
    }

    /// Overrides the stereotype catalog.
    #[must_use]
    pub fn with_stereotype_catalog(mut self, catalog: StereotypeCatalog) -> Self {
        self.stereotype_catalog = Arc::new(catalog);
        self
    }

    /// Supplies a package-annotation source (e.g. for reading package-descriptor markers).
    #[must_use]
    pub fn with_package_annotation_source(mut self, source: impl PackageAnnotationSource + 'static) -> Self {
        self.package_annotation_source = Arc::new(source);
        self
    }

    /// Registers an additional external rule.
    #[must_use]
    pub fn with_extra_rule(mut self, rule: impl ExternalRule + 'static) -> Self {
        self.extra_rules.push(Box::new(rule));
        self
    }

    /// Toggles fully-qualified module identifiers.
    #[must_use]
    pub fn use_fully_qualified_module_names(mut self, value: bool) -> Self {
        self.use_fully_qualified_module_names = value;
        self
    }

    /// Sets the shared-module identifiers.
    #[must_use]
    pub fn shared_modules(mut self, modules: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.shared_modules = modules.into_iter().map(Into::into).collect();
        self
    }

    /// Excludes candidate base packages matching `predicate` from module detection.
    #[must_use]
    pub fn ignoring(mut self, predicate: impl Fn(&PackageName) -> bool + 'static) -> Self {
        self.ignore = Some(Box::new(predicate));
        self
    }

    /// Overrides the `ApplicationModule` marker's fully-qualified name.
    #[must_use]
    pub fn application_module_marker(mut self, fq_name: impl Into<String>) -> Self {
        self.application_module_marker = fq_name.into();
        self
    }

    /// Overrides the `NamedInterface` marker's fully-qualified name.
    #[must_use]
    pub fn named_interface_marker(mut self, fq_name: impl Into<String>) -> Self {
        self.named_interface_marker = fq_name.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn map_source_parses_typed_values() {
        let source = MapConfigurationSource::new()
            .with("modulith.root-packages", "com.acme, com.other")
            .with("modulith.use-fully-qualified-module-names", "true")
            .with("modulith.shared-modules", "common");
        assert_eq!(
            vec![PackageName::new("com.acme"), PackageName::new("com.other")],
            source.root_packages().unwrap()
        );
        assert!(source.use_fully_qualified_module_names().unwrap());
        assert_eq!(vec!["common".to_owned()], source.shared_modules());
    }

    #[test]
    fn invalid_boolean_is_a_configuration_error() {
        let source = MapConfigurationSource::new().with("modulith.use-fully-qualified-module-names", "yes");
        assert!(source.use_fully_qualified_module_names().is_err());
    }

    #[test]
    fn unknown_detection_strategy_is_a_configuration_error() {
        let source = MapConfigurationSource::new().with("modulith.detection-strategy", "nonexistent");
        assert!(source.detection_strategy().is_err());
    }
}
