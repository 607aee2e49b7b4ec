//! Pipeline facade: document and configuration in, output text out.

use crate::assembler::{assemble, ProcessInput};
use crate::emitter::{emit, EmissionRule};
use crate::error::CamToolResult;
use crate::fill::rasterize;
use crate::flatten::{normalize_path, normalize_paths};
use crate::transform::CoordinateTransform;
use lasercam_core::{Command, CommandKind, LayerSource, OperationClass};
use lasercam_settings::Configuration;
use std::path::Path;

/// Collects the straight segments of every operation class from a document.
///
/// The fill layer feeds two classes: its raster fill (each path filled on
/// its own) and its outline. Missing layers leave their class empty.
pub fn build_input(doc: &dyn LayerSource, config: &Configuration) -> ProcessInput {
    let chord = config.curve_segment_length;
    let mut input = ProcessInput::default();

    for class in OperationClass::ALL {
        let label = config.layer_label(class);
        let Some(paths) = doc.layer(label) else {
            tracing::debug!("No layer '{}' for {}", label, class);
            continue;
        };

        let segments = match class {
            OperationClass::Fill => paths
                .iter()
                .flat_map(|path| rasterize(&normalize_path(path, chord), config.beam_thickness))
                .collect(),
            _ => normalize_paths(paths, chord),
        };
        tracing::debug!(
            "Layer '{}' gave {} segments for {}",
            label,
            segments.len(),
            class
        );
        *input.segments_mut(class) = segments;
    }

    input
}

/// Builds the complete command stream for a document.
pub fn generate_commands(doc: &dyn LayerSource, config: &Configuration) -> Vec<Command> {
    let input = build_input(doc, config);
    let transform = CoordinateTransform::new(config.origin(), doc.bounding_box(), config.accuracy);
    tracing::debug!(
        "Origin {:?}, {} decimals",
        transform.origin(),
        transform.precision()
    );
    assemble(&input, config, &transform)
}

/// Runs the whole pipeline with the named emission rule.
pub fn run(doc: &dyn LayerSource, config: &Configuration, rule_name: &str) -> CamToolResult<String> {
    render(&generate_commands(doc, config), config, rule_name)
}

/// Renders an assembled command stream with the named emission rule.
pub fn render(commands: &[Command], config: &Configuration, rule_name: &str) -> CamToolResult<String> {
    let rule = EmissionRule::load(rule_name, &config.post_process_dir)?;
    let travels = commands
        .iter()
        .filter(|c| c.kind() == CommandKind::Move)
        .count();
    tracing::info!(
        "Emitting {} commands ({} travel moves) with rule '{}'",
        commands.len(),
        travels,
        rule.name
    );
    Ok(emit(commands, config, &rule))
}

/// Command stream as pretty-printed JSON.
pub fn dump_commands(commands: &[Command]) -> CamToolResult<String> {
    Ok(serde_json::to_string_pretty(commands)?)
}

pub fn write_output(text: &str, path: &Path) -> CamToolResult<()> {
    std::fs::write(path, text)?;
    tracing::info!("Wrote {} bytes to {}", text.len(), path.display());
    Ok(())
}
