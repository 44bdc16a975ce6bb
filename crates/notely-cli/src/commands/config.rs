use std::io::Write;
use std::path::{Path, PathBuf};

use notely_core::config::normalize_base_url;
use notely_core::util::normalize_text_option;

use crate::cli::ConfigCommands;
use crate::config::{CliConfig, Overrides};
use crate::error::CliError;

pub fn run_config<W: Write>(
    command: ConfigCommands,
    overrides: &Overrides,
    out: &mut W,
) -> Result<(), CliError> {
    match command {
        ConfigCommands::Show => {
            let config = CliConfig::load().map_err(CliError::Config)?;
            show_config(&config, overrides, out)
        }
        ConfigCommands::Set {
            api_url,
            page_size,
            pinned_path,
        } => {
            let mut config = CliConfig::load().map_err(CliError::Config)?;
            apply_config_changes(&mut config, api_url, page_size, pinned_path)?;
            let path = config.save().map_err(CliError::Config)?;
            writeln!(out, "Saved configuration to {}", path.display())?;
            Ok(())
        }
    }
}

/// Prints effective settings, the same values a board command would use.
pub fn show_config<W: Write>(
    config: &CliConfig,
    overrides: &Overrides,
    out: &mut W,
) -> Result<(), CliError> {
    let settings = config.resolve(overrides)?;
    writeln!(out, "api_base_url  {}", settings.client.api_base_url)?;
    writeln!(out, "page_size     {}", settings.client.page_size)?;
    writeln!(out, "pinned_path   {}", settings.pinned_path.display())?;
    Ok(())
}

/// Validates and applies `config set` arguments.
pub fn apply_config_changes(
    config: &mut CliConfig,
    api_url: Option<String>,
    page_size: Option<u32>,
    pinned_path: Option<PathBuf>,
) -> Result<(), CliError> {
    if api_url.is_none() && page_size.is_none() && pinned_path.is_none() {
        return Err(CliError::Config(
            "nothing to set; pass --api-url, --page-size or --pinned-path".to_string(),
        ));
    }

    if let Some(url) = normalize_text_option(api_url) {
        config.api_base_url = Some(normalize_base_url(&url)?);
    }
    if let Some(size) = page_size {
        if size == 0 {
            return Err(CliError::Config(
                "page size must be greater than zero".to_string(),
            ));
        }
        config.page_size = Some(size);
    }
    if let Some(path) = pinned_path.filter(|path| path != Path::new("")) {
        config.pinned_path = Some(path);
    }
    Ok(())
}
