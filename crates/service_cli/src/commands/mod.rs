//! CLI command implementations
//!
//! Each submodule implements a specific CLI command.

use std::path::Path;

use crate::{CliError, Result};

pub mod check;
pub mod contracts;
pub mod merge;
pub mod portfolio;

/// Read an input document as text.
pub(crate) fn read_input(path: &Path) -> Result<String> {
    if !path.exists() {
        return Err(CliError::FileNotFound(path.display().to_string()));
    }
    Ok(std::fs::read_to_string(path)?)
}

/// Write text output, creating parent directories.
pub(crate) fn write_output(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, content)?;
    tracing::info!(path = %path.display(), bytes = content.len(), "Wrote output");
    Ok(())
}

/// Format an optional number, `-` when absent.
pub(crate) fn or_dash(value: Option<f64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_else(|| "-".to_string())
}
