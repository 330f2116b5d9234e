//! nether-fbxconv - FBX conversion front end
//!
//! Validates the command line, resolves material textures from the model's
//! `.txt` manifest and writes the resulting settings as JSON to stdout for the
//! conversion engine.

use anyhow::{Context, Result};
use std::ffi::OsString;
use std::path::Path;

use nether_fbxconv::{parse_flags, validate, ConvDefaults, Invocation};

fn main() -> Result<()> {
    let args: Vec<OsString> = std::env::args_os().collect();
    let defaults = ConvDefaults::discover(Path::new("."))?;

    let settings = match parse_flags(&args, &defaults)? {
        Invocation::Help(text) => {
            print!("{}", text);
            return Ok(());
        }
        Invocation::Convert(settings) => settings,
    };

    // Initialize logging
    let level = if settings.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()),
        )
        .init();

    if settings.verbose {
        let command: Vec<_> = args.iter().skip(1).map(|a| a.to_string_lossy()).collect();
        tracing::debug!("Command: {}", command.join(" "));
    }

    let settings = validate(settings, &defaults)?;
    tracing::info!(
        "Converting {:?} ({}) -> {:?} ({}), {} texture(s) in {} material(s)",
        settings.in_file,
        settings.in_type,
        settings.out_file,
        settings.out_type,
        settings.texture_count(),
        settings.texture_paths.len()
    );

    let json = serde_json::to_string_pretty(&settings).context("Failed to serialize settings")?;
    println!("{}", json);
    Ok(())
}
