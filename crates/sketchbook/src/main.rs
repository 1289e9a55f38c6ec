#![forbid(unsafe_code)]

//! # Sketchbook CLI
//!
//! Validates sketch configs and simulates their springs offline.
//!
//! ## Usage
//!
//! ```bash
//! sketchbook check sketch.toml
//! sketchbook simulate sketch.toml --spring rotation --format csv
//! ```

use anyhow::Context;
use sketchbook::cli::{Cli, Command, OutputFormat};
use sketchbook::{SketchConfig, logging, simulate};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse_args();
    logging::init(cli.log_level());

    match cli.command {
        Command::Check { config: path } => {
            let config = SketchConfig::load(&path)
                .with_context(|| format!("failed to load {}", path.display()))?;
            println!(
                "{}: ok ({} springs)",
                config.name.as_deref().unwrap_or("sketch"),
                config.springs.len()
            );
            for (name, options) in &config.springs {
                let settings = options.settings();
                let wrap = options
                    .wrap
                    .map(|modulus| format!(" wrap={modulus}"))
                    .unwrap_or_default();
                println!(
                    "  {name}: frequency={} half_life={}{wrap}",
                    settings.frequency(),
                    settings.half_life()
                );
            }
        }
        Command::Simulate(args) => {
            let config = SketchConfig::load(&args.config)
                .with_context(|| format!("failed to load {}", args.config.display()))?;
            let simulation = simulate(&config, &args.request(config.clock.fps))?;
            match args.format {
                OutputFormat::Json => println!("{}", simulation.to_json()?),
                OutputFormat::Csv => print!("{}", simulation.to_csv()),
            }
        }
    }

    Ok(())
}
