//! Numeric bounds that parameterize every generation decision.
//!
//! Keys mirror the configuration file format (`inheritanceHierarchy.max`,
//! `fields.min`, ...). Omitted keys inherit the `Default` impls, so a file
//! only needs to name the bounds it changes.

use std::path::Path;

use rand::{Rng, RngCore};
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Inclusive `[min, max]` range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bounds {
    pub min: usize,
    pub max: usize,
}

impl Bounds {
    pub const fn new(min: usize, max: usize) -> Self {
        Bounds { min, max }
    }

    pub const fn exactly(n: usize) -> Self {
        Bounds { min: n, max: n }
    }

    pub fn contains(&self, n: usize) -> bool {
        (self.min..=self.max).contains(&n)
    }

    /// Uniform draw from the range. Panics when `min > max`; run
    /// [`Configuration::validate`] first.
    pub fn draw(&self, rng: &mut dyn RngCore) -> usize {
        rng.gen_range(self.min..=self.max)
    }

    fn check(&self, name: &'static str) -> Result<(), ConfigError> {
        if self.min > self.max {
            return Err(ConfigError::InvalidRange {
                name,
                min: self.min,
                max: self.max,
            });
        }
        Ok(())
    }
}

/// Single upper bound on superclass chain length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaxBound {
    pub max: usize,
}

/// How many declarations of each kind one run produces.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RunConfig {
    pub interfaces: usize,
    pub abstract_classes: usize,
    pub concrete_classes: usize,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            interfaces: 2,
            abstract_classes: 4,
            concrete_classes: 3,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "ConfigFile")]
pub struct Configuration {
    pub inheritance_hierarchy: MaxBound,
    pub fields: Bounds,
    pub abstract_methods: Bounds,
    pub concrete_methods: Bounds,
    /// Interfaces attached to each class.
    pub interfaces: Bounds,
    pub interface_methods: Bounds,
    pub interface_constants: Bounds,
    /// Statements per synthesized method body.
    pub statements: Bounds,
    pub run: RunConfig,
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            inheritance_hierarchy: MaxBound { max: 3 },
            fields: Bounds::new(1, 4),
            abstract_methods: Bounds::new(1, 3),
            concrete_methods: Bounds::new(1, 3),
            interfaces: Bounds::new(0, 2),
            interface_methods: Bounds::new(1, 3),
            interface_constants: Bounds::new(0, 2),
            statements: Bounds::new(1, 3),
            run: RunConfig::default(),
        }
    }
}

/// A bound as read from a file, either half possibly missing.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct PartialBounds {
    min: Option<usize>,
    max: Option<usize>,
}

impl PartialBounds {
    fn or(self, default: Bounds) -> Bounds {
        Bounds {
            min: self.min.unwrap_or(default.min),
            max: self.max.unwrap_or(default.max),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct PartialMaxBound {
    max: Option<usize>,
}

/// File form of [`Configuration`]; every missing key takes its default.
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct ConfigFile {
    inheritance_hierarchy: PartialMaxBound,
    fields: PartialBounds,
    abstract_methods: PartialBounds,
    concrete_methods: PartialBounds,
    interfaces: PartialBounds,
    interface_methods: PartialBounds,
    interface_constants: PartialBounds,
    statements: PartialBounds,
    run: RunConfig,
}

impl From<ConfigFile> for Configuration {
    fn from(file: ConfigFile) -> Self {
        let default = Configuration::default();
        Configuration {
            inheritance_hierarchy: MaxBound {
                max: file
                    .inheritance_hierarchy
                    .max
                    .unwrap_or(default.inheritance_hierarchy.max),
            },
            fields: file.fields.or(default.fields),
            abstract_methods: file.abstract_methods.or(default.abstract_methods),
            concrete_methods: file.concrete_methods.or(default.concrete_methods),
            interfaces: file.interfaces.or(default.interfaces),
            interface_methods: file.interface_methods.or(default.interface_methods),
            interface_constants: file.interface_constants.or(default.interface_constants),
            statements: file.statements.or(default.statements),
            run: file.run,
        }
    }
}

impl Configuration {
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: Configuration = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&source)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.fields.check("fields")?;
        self.abstract_methods.check("abstractMethods")?;
        self.concrete_methods.check("concreteMethods")?;
        self.interfaces.check("interfaces")?;
        self.interface_methods.check("interfaceMethods")?;
        self.interface_constants.check("interfaceConstants")?;
        self.statements.check("statements")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn test_default_is_valid() {
        assert!(Configuration::default().validate().is_ok());
    }

    #[test]
    fn test_partial_toml_inherits_defaults() {
        let config = Configuration::from_toml_str(
            r#"
            inheritanceHierarchy = { max = 5 }

            [fields]
            min = 2
            max = 2

            [run]
            abstractClasses = 10
            "#,
        )
        .unwrap();
        assert_eq!(config.inheritance_hierarchy.max, 5);
        assert_eq!(config.fields, Bounds::exactly(2));
        assert_eq!(config.abstract_methods, Configuration::default().abstract_methods);
        assert_eq!(config.run.abstract_classes, 10);
        assert_eq!(config.run.interfaces, RunConfig::default().interfaces);
    }

    #[test]
    fn test_missing_half_of_range_uses_default() {
        let default = Configuration::default();
        let config = Configuration::from_toml_str(
            r#"
            inheritanceHierarchy = {}

            [fields]
            min = 2

            [statements]
            max = 5
            "#,
        )
        .unwrap();
        assert_eq!(config.fields, Bounds::new(2, default.fields.max));
        assert_eq!(config.statements, Bounds::new(default.statements.min, 5));
        assert_eq!(config.inheritance_hierarchy, default.inheritance_hierarchy);
    }

    #[test]
    fn test_partial_range_still_validated() {
        let err = Configuration::from_toml_str("[fields]\nmin = 9\n").unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidRange {
                name: "fields",
                min: 9,
                ..
            }
        ));
    }

    #[test]
    fn test_rejects_inverted_range() {
        let err = Configuration::from_toml_str("concreteMethods = { min = 3, max = 1 }").unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidRange {
                name: "concreteMethods",
                min: 3,
                max: 1
            }
        ));
    }

    #[test]
    fn test_rejects_malformed_toml() {
        assert!(matches!(
            Configuration::from_toml_str("fields = ["),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_draw_in_bounds() {
        let mut rng = rand::rngs::StdRng::seed_from_u64(42);
        let bounds = Bounds::new(2, 5);
        for _ in 0..50 {
            assert!(bounds.contains(bounds.draw(&mut rng)));
        }
        assert_eq!(Bounds::exactly(0).draw(&mut rng), 0);
    }
}
