//! Plain `key = value` configuration format.
//!
//! One entry per line, `#` starts a comment line, keys are case-insensitive.
//! Values that look like unsigned integers or decimals are typed as numbers,
//! everything else is text.

use crate::error::ConfigWarning;

/// A typed configuration value.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigValue {
    Integer(i64),
    Decimal(f64),
    Text(String),
}

impl ConfigValue {
    /// Classifies a raw value: `^\d+$` is an integer, `^\d*\.\d+$` a decimal.
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        if !raw.is_empty() && raw.bytes().all(|b| b.is_ascii_digit()) {
            if let Ok(i) = raw.parse() {
                return ConfigValue::Integer(i);
            }
        }
        if let Some((int_part, frac_part)) = raw.split_once('.') {
            let digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
            if digits(int_part) && !frac_part.is_empty() && digits(frac_part) {
                if let Ok(f) = raw.parse() {
                    return ConfigValue::Decimal(f);
                }
            }
        }
        ConfigValue::Text(raw.to_string())
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            ConfigValue::Integer(i) => Some(*i as f64),
            ConfigValue::Decimal(f) => Some(*f),
            ConfigValue::Text(_) => None,
        }
    }

    pub fn as_u32(&self) -> Option<u32> {
        match self {
            ConfigValue::Integer(i) => u32::try_from(*i).ok(),
            _ => None,
        }
    }
}

/// One parsed `key = value` line.
#[derive(Debug, Clone, PartialEq)]
pub struct Entry {
    /// 1-based line number
    pub line: usize,
    /// Lowercased key
    pub key: String,
    /// Value text with surrounding whitespace removed
    pub raw: String,
    pub value: ConfigValue,
}

/// Splits configuration text into entries. Blank lines and comments are
/// skipped; lines without `=` are reported as warnings.
pub fn parse_entries(text: &str) -> (Vec<Entry>, Vec<ConfigWarning>) {
    let mut entries = Vec::new();
    let mut warnings = Vec::new();

    for (idx, line) in text.lines().enumerate() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        match trimmed.split_once('=') {
            Some((key, raw)) if !key.trim().is_empty() => {
                let raw = raw.trim().to_string();
                entries.push(Entry {
                    line: idx + 1,
                    key: key.trim().to_ascii_lowercase(),
                    value: ConfigValue::parse(&raw),
                    raw,
                });
            }
            _ => warnings.push(ConfigWarning::MalformedLine {
                line: idx + 1,
                text: trimmed.to_string(),
            }),
        }
    }

    (entries, warnings)
}
