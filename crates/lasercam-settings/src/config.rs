//! Run configuration.
//!
//! A [`Configuration`] is built once per run, from defaults overlaid with the
//! contents of a configuration file, and passed read-only to every stage.
//! Three file formats are accepted: `.toml`, `.json`, and the plain
//! `key = value` format for any other extension.

use crate::error::{ConfigError, ConfigWarning, SettingsError, SettingsResult};
use crate::key_value::{self, ConfigValue, Entry};
use lasercam_core::{Category, OperationClass, Origin};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Largest supported rounding precision.
const MAX_ACCURACY: u32 = 12;

/// Immutable parameter record for one run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Configuration {
    /// Passes for cut-in and cut-out classes
    pub cut_passes: u32,
    pub cut_speed: f64,
    pub engrave_fill_speed: f64,
    pub engrave_contour_speed: f64,
    pub engrave_speed: f64,
    /// Laser-off travel speed
    pub free_travel_speed: f64,
    pub power_cut: f64,
    pub power_engrave: f64,
    pub power_engrave_contour: f64,
    pub power_engrave_fill: f64,
    pub power_move: f64,
    /// Decimal places kept in machine coordinates
    pub accuracy: u32,
    /// Fill pitch in document units
    pub beam_thickness: f64,
    /// Target chord length for curve flattening
    pub curve_segment_length: f64,
    pub engrave_fill_layer: String,
    pub engrave_contour_layer: String,
    pub engrave_layer: String,
    pub cut_in_layer: String,
    pub cut_out_layer: String,
    /// Origin convention: sw, se, ne or c
    pub start_coord: String,
    /// Emission rule name
    pub post_process: String,
    /// Directory searched for `<post_process>.ppr`
    pub post_process_dir: PathBuf,
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            cut_passes: 2,
            cut_speed: 120.0,
            engrave_fill_speed: 700.0,
            engrave_contour_speed: 700.0,
            engrave_speed: 700.0,
            free_travel_speed: 2000.0,
            power_cut: 245.0,
            power_engrave: 75.0,
            power_engrave_contour: 75.0,
            power_engrave_fill: 75.0,
            power_move: 1.0,
            accuracy: 3,
            beam_thickness: 0.5,
            curve_segment_length: 1.0,
            engrave_fill_layer: "ef".to_string(),
            engrave_contour_layer: "ec".to_string(),
            engrave_layer: "e".to_string(),
            cut_in_layer: "ci".to_string(),
            cut_out_layer: "co".to_string(),
            start_coord: "sw".to_string(),
            post_process: "marlin".to_string(),
            post_process_dir: PathBuf::from("pp"),
        }
    }
}

impl Configuration {
    /// Load configuration from a file, logging recoverable problems.
    ///
    /// A missing or unreadable file leaves the defaults in effect.
    pub fn load_from_file(path: &Path) -> SettingsResult<Self> {
        let (config, warnings) = Self::load_with_warnings(path)?;
        for warning in &warnings {
            match warning {
                ConfigWarning::FileMissing(_) => tracing::info!("{}", warning),
                _ => tracing::warn!("{}", warning),
            }
        }
        Ok(config)
    }

    /// Load configuration from a file, returning recoverable problems
    /// alongside the result instead of logging them.
    pub fn load_with_warnings(path: &Path) -> SettingsResult<(Self, Vec<ConfigWarning>)> {
        if !path.exists() {
            return Ok((
                Self::default(),
                vec![ConfigWarning::FileMissing(path.to_path_buf())],
            ));
        }

        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) => {
                return Ok((
                    Self::default(),
                    vec![ConfigWarning::Unreadable {
                        path: path.to_path_buf(),
                        reason: e.to_string(),
                    }],
                ))
            }
        };

        let (config, warnings) = if path.extension().is_some_and(|ext| ext == "json") {
            (serde_json::from_str(&content)?, Vec::new())
        } else if path.extension().is_some_and(|ext| ext == "toml") {
            (toml::from_str(&content)?, Vec::new())
        } else {
            Self::from_key_value_str(&content)
        };

        config.validate()?;
        tracing::debug!("Loaded configuration from {}", path.display());
        Ok((config, warnings))
    }

    /// Build a configuration from `key = value` text. Unknown keys and
    /// values of the wrong type are skipped and reported.
    pub fn from_key_value_str(text: &str) -> (Self, Vec<ConfigWarning>) {
        let (entries, mut warnings) = key_value::parse_entries(text);
        let mut config = Self::default();
        for entry in &entries {
            if let Err(warning) = config.apply_entry(entry) {
                warnings.push(warning);
            }
        }
        (config, warnings)
    }

    fn apply_entry(&mut self, entry: &Entry) -> Result<(), ConfigWarning> {
        let mismatch = || ConfigWarning::TypeMismatch {
            line: entry.line,
            key: entry.key.clone(),
            value: entry.raw.clone(),
        };
        let number = |value: &ConfigValue| value.as_f64().ok_or_else(mismatch);
        let count = |value: &ConfigValue| value.as_u32().ok_or_else(mismatch);

        match entry.key.as_str() {
            "cut_passes" => self.cut_passes = count(&entry.value)?,
            "cut_speed" => self.cut_speed = number(&entry.value)?,
            "engrave_fill_speed" => self.engrave_fill_speed = number(&entry.value)?,
            "engrave_contour_speed" => self.engrave_contour_speed = number(&entry.value)?,
            "engrave_speed" => self.engrave_speed = number(&entry.value)?,
            "free_travel_speed" => self.free_travel_speed = number(&entry.value)?,
            "power_cut" => self.power_cut = number(&entry.value)?,
            "power_engrave" => self.power_engrave = number(&entry.value)?,
            "power_engrave_contour" => self.power_engrave_contour = number(&entry.value)?,
            "power_engrave_fill" => self.power_engrave_fill = number(&entry.value)?,
            "power_move" => self.power_move = number(&entry.value)?,
            "accuracy" => self.accuracy = count(&entry.value)?,
            "beam_thickness" => self.beam_thickness = number(&entry.value)?,
            "curve_segment_length" => self.curve_segment_length = number(&entry.value)?,
            "engrave_fill_layer" => self.engrave_fill_layer = entry.raw.clone(),
            "engrave_contour_layer" => self.engrave_contour_layer = entry.raw.clone(),
            "engrave_layer" => self.engrave_layer = entry.raw.clone(),
            "cut_in_layer" => self.cut_in_layer = entry.raw.clone(),
            "cut_out_layer" => self.cut_out_layer = entry.raw.clone(),
            "start_coord" => self.start_coord = entry.raw.clone(),
            "post_process" => self.post_process = entry.raw.clone(),
            "post_process_dir" => self.post_process_dir = PathBuf::from(&entry.raw),
            _ => {
                return Err(ConfigWarning::UnknownKey {
                    line: entry.line,
                    key: entry.key.clone(),
                })
            }
        }
        Ok(())
    }

    /// Save config to file (JSON or TOML)
    pub fn save_to_file(&self, path: &Path) -> SettingsResult<()> {
        self.validate()?;

        let content = if path.extension().is_some_and(|ext| ext == "json") {
            serde_json::to_string_pretty(self)?
        } else if path.extension().is_some_and(|ext| ext == "toml") {
            toml::to_string_pretty(self).map_err(|e| SettingsError::SaveError(e.to_string()))?
        } else {
            let ext = path
                .extension()
                .map(|e| e.to_string_lossy().into_owned())
                .unwrap_or_default();
            return Err(ConfigError::UnsupportedFormat(ext).into());
        };

        std::fs::write(path, content)?;
        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> SettingsResult<()> {
        if !(self.beam_thickness > 0.0) {
            return Err(SettingsError::InvalidSetting {
                key: "beam_thickness".to_string(),
                reason: "must be > 0".to_string(),
            });
        }

        if !(self.curve_segment_length > 0.0) {
            return Err(SettingsError::InvalidSetting {
                key: "curve_segment_length".to_string(),
                reason: "must be > 0".to_string(),
            });
        }

        if self.cut_passes == 0 {
            return Err(SettingsError::InvalidSetting {
                key: "cut_passes".to_string(),
                reason: "must be > 0".to_string(),
            });
        }

        if self.accuracy > MAX_ACCURACY {
            return Err(ConfigError::ValueOutOfRange {
                key: "accuracy".to_string(),
                value: self.accuracy.to_string(),
            }
            .into());
        }

        Ok(())
    }

    /// Speed for a category.
    pub fn speed_for(&self, category: Category) -> f64 {
        match category {
            Category::Move => self.free_travel_speed,
            Category::EngraveFill => self.engrave_fill_speed,
            Category::EngraveContour => self.engrave_contour_speed,
            Category::Engrave => self.engrave_speed,
            Category::Cut => self.cut_speed,
        }
    }

    /// Power for a category.
    pub fn power_for(&self, category: Category) -> f64 {
        match category {
            Category::Move => self.power_move,
            Category::EngraveFill => self.power_engrave_fill,
            Category::EngraveContour => self.power_engrave_contour,
            Category::Engrave => self.power_engrave,
            Category::Cut => self.power_cut,
        }
    }

    pub fn origin(&self) -> Origin {
        Origin::from_name(&self.start_coord)
    }

    /// Document group label read for an operation class. Fill and
    /// fill-contour share the fill layer.
    pub fn layer_label(&self, class: OperationClass) -> &str {
        match class {
            OperationClass::Fill | OperationClass::FillContour => &self.engrave_fill_layer,
            OperationClass::EngraveContour => &self.engrave_contour_layer,
            OperationClass::EngraveLine => &self.engrave_layer,
            OperationClass::CutIn => &self.cut_in_layer,
            OperationClass::CutOut => &self.cut_out_layer,
        }
    }

    /// Number of passes run for an operation class.
    pub fn passes_for(&self, class: OperationClass) -> u32 {
        if class.is_cut() {
            self.cut_passes
        } else {
            1
        }
    }
}
