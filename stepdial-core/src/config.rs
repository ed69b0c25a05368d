//! TOML panel configuration.
//!
//! ```toml
//! [[setting]]
//! name = "volume"
//! kind = "integer"
//! min = 0
//! max = 1000
//! value = 500
//! slider_min = 200   # optional
//! slider_max = 800   # optional
//! snap = true        # default
//! ```

use std::collections::HashSet;
use std::path::Path;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::control::{Setting, SettingControl};
use crate::converter::{DecimalConverter, FloatConverter, IntegerConverter, NumericKind};
use crate::error::ConfigError;
use crate::range::DecimalRange;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PanelConfig {
    #[serde(rename = "setting", default)]
    pub settings: Vec<SettingConfig>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SettingConfig {
    pub name: String,
    pub kind: NumericKind,
    pub min: Decimal,
    pub max: Decimal,
    pub value: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slider_min: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slider_max: Option<Decimal>,
    #[serde(default = "default_snap")]
    pub snap: bool,
}

fn default_snap() -> bool {
    true
}

impl PanelConfig {
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: PanelConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&content)?;
        debug!(path = %path.display(), settings = config.settings.len(), "loaded panel config");
        Ok(config)
    }

    pub fn to_toml_string(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.settings.is_empty() {
            return Err(ConfigError::Empty);
        }
        let mut seen = HashSet::new();
        for setting in &self.settings {
            if setting.name.trim().is_empty() {
                return Err(ConfigError::EmptyName);
            }
            if !seen.insert(setting.name.as_str()) {
                return Err(ConfigError::DuplicateName(setting.name.clone()));
            }
            setting.maximum_range()?;
            setting.slider_range()?;
        }
        Ok(())
    }

    pub fn find(&self, name: &str) -> Result<&SettingConfig, ConfigError> {
        self.settings
            .iter()
            .find(|s| s.name == name)
            .ok_or_else(|| ConfigError::UnknownSetting(name.to_string()))
    }

    pub fn build(&self) -> Result<Vec<Box<dyn Setting>>, ConfigError> {
        self.settings.iter().map(SettingConfig::build).collect()
    }

    /// Demo panel used when no config file is given.
    pub fn default_panel() -> Self {
        Self {
            settings: vec![
                demo_setting("volume", NumericKind::Integer, (0, 1000), Decimal::from(500), None, true),
                demo_setting("exposure", NumericKind::Float, (-5, 5), Decimal::ZERO, None, true),
                demo_setting(
                    "white_balance",
                    NumericKind::Integer,
                    (1000, 12000),
                    Decimal::from(6500),
                    Some((3000, 9000)),
                    true,
                ),
                demo_setting("gamma", NumericKind::Float, (0, 4), Decimal::new(22, 1), None, true),
                demo_setting(
                    "iterations",
                    NumericKind::Integer,
                    (1, 10000),
                    Decimal::from(256),
                    None,
                    false,
                ),
            ],
        }
    }
}

fn demo_setting(
    name: &str,
    kind: NumericKind,
    (min, max): (i64, i64),
    value: Decimal,
    slider: Option<(i64, i64)>,
    snap: bool,
) -> SettingConfig {
    SettingConfig {
        name: name.to_string(),
        kind,
        min: Decimal::from(min),
        max: Decimal::from(max),
        value,
        slider_min: slider.map(|(lower, _)| Decimal::from(lower)),
        slider_max: slider.map(|(_, upper)| Decimal::from(upper)),
        snap,
    }
}

impl SettingConfig {
    pub fn maximum_range(&self) -> Result<DecimalRange, ConfigError> {
        DecimalRange::new(self.min, self.max).map_err(|source| ConfigError::InvalidRange {
            name: self.name.clone(),
            source,
        })
    }

    /// Declared slider range. A single given bound is paired with the
    /// matching maximum bound.
    pub fn slider_range(&self) -> Result<Option<DecimalRange>, ConfigError> {
        if self.slider_min.is_none() && self.slider_max.is_none() {
            return Ok(None);
        }
        let lower = self.slider_min.unwrap_or(self.min);
        let upper = self.slider_max.unwrap_or(self.max);
        DecimalRange::new(lower, upper)
            .map(Some)
            .map_err(|source| ConfigError::InvalidRange {
                name: self.name.clone(),
                source,
            })
    }

    pub fn build(&self) -> Result<Box<dyn Setting>, ConfigError> {
        let maximum = self.maximum_range()?;
        let slider = self.slider_range()?;
        Ok(match self.kind {
            NumericKind::Integer => {
                let value = IntegerConverter.decimal_to_value(self.value);
                Box::new(SettingControl::new(
                    &self.name,
                    IntegerConverter,
                    value,
                    slider,
                    maximum,
                    self.snap,
                ))
            }
            NumericKind::Float => {
                let value = FloatConverter.decimal_to_value(self.value);
                Box::new(SettingControl::new(
                    &self.name,
                    FloatConverter,
                    value,
                    slider,
                    maximum,
                    self.snap,
                ))
            }
        })
    }
}
