//! Check command implementation
//!
//! Validates the effective configuration and prints it.

use tracing::info;

use crate::config::MaxspanConfig;
use crate::{CliError, Result};

/// Run the check command
pub fn run(config: &MaxspanConfig) -> Result<()> {
    config.validate()?;
    let rendered = toml::to_string_pretty(config)
        .map_err(|e| CliError::InvalidArgument(format!("Failed to render configuration: {}", e)))?;

    info!("Configuration is valid");
    println!("maxspan {}", env!("CARGO_PKG_VERSION"));
    println!();
    print!("{}", rendered);
    Ok(())
}
