use std::path::PathBuf;

use clap::Parser;
use lasercam::{dump_commands, init_logging, Job, VERSION};

/// Convert a layered SVG drawing into laser G-code.
#[derive(Parser, Debug)]
#[command(name = "lasercam", version = VERSION)]
struct Cli {
    /// Input SVG drawing.
    svgfile: PathBuf,

    /// Configuration file (key/value, TOML or JSON).
    #[arg(short, long, default_value = "svg2gc.conf")]
    config: PathBuf,

    /// Output G-code file.
    #[arg(short, long, default_value = "out.gcode")]
    output: PathBuf,

    /// Post-processing rule name; overrides `post_process` from the configuration.
    #[arg(short = 'p', long = "postprocess")]
    postprocess: Option<String>,

    /// Print the assembled command stream as JSON before converting.
    #[arg(long)]
    dump_commands: bool,

    /// Write the effective configuration to this `.toml` or `.json` file.
    #[arg(long, value_name = "PATH")]
    save_config: Option<PathBuf>,

    /// Enable debug logging.
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose)?;

    let job = Job::load(&cli.svgfile, &cli.config)?;
    if let Some(path) = &cli.save_config {
        job.save_config(path)?;
    }

    let commands = job.commands();
    if cli.dump_commands {
        println!("{}", dump_commands(&commands)?);
    }

    let rule = job.rule_name(cli.postprocess.as_deref());
    job.write_gcode(&commands, rule, &cli.output)?;
    tracing::debug!("converted {} with rule '{}'", cli.svgfile.display(), rule);

    Ok(())
}
