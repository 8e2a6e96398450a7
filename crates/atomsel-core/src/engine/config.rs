use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

const DEFAULT_SEED_RADIUS: f64 = 2.5;
const DEFAULT_GROWTH_FACTOR: f64 = 1.5;
const DEFAULT_BISECTION_STEPS: usize = 6;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("File I/O error for '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("TOML parsing error for '{path}': {source}")]
    Toml {
        path: String,
        source: toml::de::Error,
    },
    #[error("Invalid value for '{name}': {reason}")]
    InvalidParameter { name: &'static str, reason: String },
}

/// Constants of the adaptive radius search used by `nearest` predicates.
///
/// The search starts at `seed_radius`, multiplies the radius by `growth_factor`
/// until enough candidates are in range, then narrows the bracket with
/// `bisection_steps` midpoint trials. The defaults are empirical and suit atomic
/// systems at condensed-phase density; sparse systems benefit from a larger seed.
/// Bisection is a fixed budget, not a convergence criterion: the final top-up
/// step is exact regardless of how far it narrows the bracket.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "kebab-case")]
pub struct NearestSearchConfig {
    pub seed_radius: f64,
    pub growth_factor: f64,
    pub bisection_steps: usize,
}

impl Default for NearestSearchConfig {
    fn default() -> Self {
        Self {
            seed_radius: DEFAULT_SEED_RADIUS,
            growth_factor: DEFAULT_GROWTH_FACTOR,
            bisection_steps: DEFAULT_BISECTION_STEPS,
        }
    }
}

impl NearestSearchConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.seed_radius.is_finite() && self.seed_radius > 0.0) {
            return Err(ConfigError::InvalidParameter {
                name: "seed_radius",
                reason: format!("must be finite and positive, got {}", self.seed_radius),
            });
        }
        if !(self.growth_factor.is_finite() && self.growth_factor > 1.0) {
            return Err(ConfigError::InvalidParameter {
                name: "growth_factor",
                reason: format!(
                    "must be finite and greater than 1, got {}",
                    self.growth_factor
                ),
            });
        }
        Ok(())
    }
}

#[derive(Default)]
pub struct NearestSearchConfigBuilder {
    seed_radius: Option<f64>,
    growth_factor: Option<f64>,
    bisection_steps: Option<usize>,
}

impl NearestSearchConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn seed_radius(mut self, radius: f64) -> Self {
        self.seed_radius = Some(radius);
        self
    }

    pub fn growth_factor(mut self, factor: f64) -> Self {
        self.growth_factor = Some(factor);
        self
    }

    pub fn bisection_steps(mut self, steps: usize) -> Self {
        self.bisection_steps = Some(steps);
        self
    }

    /// Builds the configuration, falling back to the defaults for unset values.
    pub fn build(self) -> Result<NearestSearchConfig, ConfigError> {
        let defaults = NearestSearchConfig::default();
        let config = NearestSearchConfig {
            seed_radius: self.seed_radius.unwrap_or(defaults.seed_radius),
            growth_factor: self.growth_factor.unwrap_or(defaults.growth_factor),
            bisection_steps: self.bisection_steps.unwrap_or(defaults.bisection_steps),
        };
        config.validate()?;
        Ok(config)
    }
}

/// Top-level configuration of the selection engine.
///
/// Every table and key is optional in the TOML form:
///
/// ```toml
/// [nearest]
/// seed-radius = 4.0
/// growth-factor = 2.0
/// bisection-steps = 8
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SelectionConfig {
    pub nearest: NearestSearchConfig,
}

impl SelectionConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let path_str = path.to_string_lossy().to_string();
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path_str.clone(),
            source: e,
        })?;
        Self::parse(&content, path_str)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Self::parse(content, "<string>".to_string())
    }

    fn parse(content: &str, path: String) -> Result<Self, ConfigError> {
        let config: Self =
            toml::from_str(content).map_err(|e| ConfigError::Toml { path, source: e })?;
        config.nearest.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::Write;
    use tempfile::tempdir;

    #[test]
    fn defaults_match_documented_search_constants() {
        let config = SelectionConfig::default();
        assert_eq!(config.nearest.seed_radius, 2.5);
        assert_eq!(config.nearest.growth_factor, 1.5);
        assert_eq!(config.nearest.bisection_steps, 6);
        assert!(config.nearest.validate().is_ok());
    }

    #[test]
    fn builder_uses_defaults_for_unset_values() {
        let config = NearestSearchConfigBuilder::new()
            .seed_radius(4.0)
            .build()
            .unwrap();
        assert_eq!(config.seed_radius, 4.0);
        assert_eq!(config.growth_factor, 1.5);
        assert_eq!(config.bisection_steps, 6);
    }

    #[test]
    fn builder_accepts_zero_bisection_steps() {
        let config = NearestSearchConfigBuilder::new()
            .bisection_steps(0)
            .build()
            .unwrap();
        assert_eq!(config.bisection_steps, 0);
    }

    #[test]
    fn builder_rejects_non_positive_seed_radius() {
        for radius in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            let result = NearestSearchConfigBuilder::new().seed_radius(radius).build();
            assert!(matches!(
                result,
                Err(ConfigError::InvalidParameter {
                    name: "seed_radius",
                    ..
                })
            ));
        }
    }

    #[test]
    fn builder_rejects_growth_factor_not_above_one() {
        for factor in [1.0, 0.5, f64::NAN] {
            let result = NearestSearchConfigBuilder::new()
                .growth_factor(factor)
                .build();
            assert!(matches!(
                result,
                Err(ConfigError::InvalidParameter {
                    name: "growth_factor",
                    ..
                })
            ));
        }
    }

    #[test]
    fn from_toml_str_reads_partial_tables() {
        let config = SelectionConfig::from_toml_str(
            r#"
            [nearest]
            seed-radius = 4.0
            "#,
        )
        .unwrap();
        assert_eq!(config.nearest.seed_radius, 4.0);
        assert_eq!(config.nearest.growth_factor, 1.5);
    }

    #[test]
    fn from_toml_str_accepts_empty_document() {
        let config = SelectionConfig::from_toml_str("").unwrap();
        assert_eq!(config, SelectionConfig::default());
    }

    #[test]
    fn from_toml_str_rejects_unknown_keys() {
        let result = SelectionConfig::from_toml_str(
            r#"
            [nearest]
            seed_radius = 4.0
            "#,
        );
        assert!(matches!(result, Err(ConfigError::Toml { .. })));
    }

    #[test]
    fn from_toml_str_validates_values() {
        let result = SelectionConfig::from_toml_str(
            r#"
            [nearest]
            growth-factor = 0.9
            "#,
        );
        assert!(matches!(result, Err(ConfigError::InvalidParameter { .. })));
    }

    #[test]
    fn load_succeeds_with_valid_toml() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("atomsel.toml");
        let mut file = File::create(&file_path).unwrap();
        writeln!(
            file,
            r#"
            [nearest]
            seed-radius = 3.0
            growth-factor = 2.0
            bisection-steps = 10
            "#
        )
        .unwrap();

        let config = SelectionConfig::load(&file_path).unwrap();
        assert_eq!(
            config.nearest,
            NearestSearchConfig {
                seed_radius: 3.0,
                growth_factor: 2.0,
                bisection_steps: 10,
            }
        );
    }

    #[test]
    fn load_reports_missing_file_path() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("missing.toml");

        match SelectionConfig::load(&file_path) {
            Err(ConfigError::Io { path, .. }) => assert!(path.ends_with("missing.toml")),
            other => panic!("expected an I/O error, got {other:?}"),
        }
    }
}
