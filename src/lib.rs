//! # LaserCAM
//!
//! Converts a layered SVG drawing into G-code for a laser cutter or engraver.
//!
//! ## Architecture
//!
//! LaserCAM is organized as a workspace with multiple crates:
//!
//! 1. **lasercam-core** - Geometry primitives, categories, origins and the command model
//! 2. **lasercam-settings** - Configuration file loading and validation
//! 3. **lasercam-camtools** - SVG layers, flattening, fill rasterizing, sequencing and emission
//! 4. **lasercam** - Command-line binary that ties the crates together
//!
//! Each SVG layer feeds one operation class (raster fill, fill contour,
//! engrave contour, engrave line, inner cut, outer cut). Classes are
//! processed in a fixed order, cut classes are repeated once per pass, and
//! the resulting command stream is rendered through a post-processing rule.

use std::path::Path;

use anyhow::Context as _;

pub use lasercam_camtools::{
    dump_commands, generate_commands, render, run, write_output, EmissionRule, SvgDocument,
};
pub use lasercam_core::{Category, Command, OperationClass, Origin};
pub use lasercam_settings::Configuration;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Initialize logging with the default configuration
///
/// Logs go to stderr so generated output piped from stdout stays clean.
/// `RUST_LOG` overrides the base level.
pub fn init_logging(verbose: bool) -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    let env_filter = EnvFilter::from_default_env().add_directive(level.into());

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .with_line_number(true);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()
        .context("failed to install tracing subscriber")?;

    Ok(())
}

/// A drawing and the configuration it is converted with, loaded once.
#[derive(Debug, Clone)]
pub struct Job {
    pub config: Configuration,
    pub document: SvgDocument,
}

impl Job {
    pub fn load(svg: &Path, config: &Path) -> anyhow::Result<Self> {
        let config = Configuration::load_from_file(config)
            .with_context(|| format!("invalid configuration in {}", config.display()))?;
        let document = SvgDocument::from_file(svg)
            .with_context(|| format!("cannot read drawing {}", svg.display()))?;
        Ok(Self { config, document })
    }

    /// Assembled command stream of the drawing.
    pub fn commands(&self) -> Vec<Command> {
        generate_commands(&self.document, &self.config)
    }

    /// Rule to render with: the requested one, else the configured one.
    pub fn rule_name<'a>(&'a self, requested: Option<&'a str>) -> &'a str {
        requested.unwrap_or(self.config.post_process.as_str())
    }

    /// Renders `commands` with `rule` and writes the G-code to `output`.
    pub fn write_gcode(&self, commands: &[Command], rule: &str, output: &Path) -> anyhow::Result<()> {
        let gcode = render(commands, &self.config, rule)
            .with_context(|| format!("conversion with rule '{}' failed", rule))?;
        write_output(&gcode, output)
            .with_context(|| format!("cannot write {}", output.display()))?;
        Ok(())
    }

    /// Writes the effective configuration as TOML or JSON.
    pub fn save_config(&self, path: &Path) -> anyhow::Result<()> {
        self.config
            .save_to_file(path)
            .with_context(|| format!("cannot save configuration to {}", path.display()))?;
        Ok(())
    }
}
