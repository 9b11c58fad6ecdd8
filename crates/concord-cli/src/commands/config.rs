//! Config command implementation.

use crate::cli::{ConfigAction, ConfigArgs, PresetArg};
use crate::config::Config;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use concord_orchestrator::PipelineConfig;
use std::path::{Path, PathBuf};

/// Execute the config command.
///
/// `explicit` is the `--config` path, if one was given.
pub fn execute_config(
    args: ConfigArgs,
    config: &Config,
    explicit: Option<&Path>,
    formatter: &Formatter,
) -> Result<()> {
    match args.action {
        ConfigAction::Show => {
            print!("{}", config.to_toml()?);
            Ok(())
        }
        ConfigAction::Path => {
            println!("{}", target_path(explicit)?.display());
            Ok(())
        }
        ConfigAction::Init { preset, force } => {
            let path = target_path(explicit)?;
            init_config(&path, preset, force)?;
            println!(
                "{}",
                formatter.success(&format!("Configuration written to {}", path.display()))
            );
            Ok(())
        }
    }
}

/// Write a fresh configuration file from a preset.
pub fn init_config(path: &Path, preset: PresetArg, force: bool) -> Result<Config> {
    if path.exists() && !force {
        return Err(CliError::Config(format!(
            "{} already exists (use --force to overwrite)",
            path.display()
        )));
    }

    let config = Config {
        pipeline: match preset {
            PresetArg::Default => PipelineConfig::default(),
            PresetArg::Aggressive => PipelineConfig::aggressive(),
            PresetArg::Lenient => PipelineConfig::lenient(),
        },
        ..Config::default()
    };
    config.save_to(path)?;
    Ok(config)
}

fn target_path(explicit: Option<&Path>) -> Result<PathBuf> {
    match explicit {
        Some(path) => Ok(path.to_path_buf()),
        None => Config::path(),
    }
}
