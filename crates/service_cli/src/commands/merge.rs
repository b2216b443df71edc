//! Merge command implementation
//!
//! Combines an earlier and a later risk file into one output document.

use std::path::{Path, PathBuf};

use adapter_span::{SpanDocument, SpanParser};
use chrono::Local;
use risk_engine::{merge_snapshots, MergeMode};
use tracing::info;

use crate::commands::{read_input, write_output};
use crate::config::MaxspanConfig;
use crate::{CliError, Result};

/// Arguments of the merge command
pub struct MergeArgs<'a> {
    pub mode: Option<&'a str>,
    pub earlier: Option<&'a Path>,
    pub later: Option<&'a Path>,
    pub output: Option<&'a Path>,
}

fn parse_optional(path: Option<&Path>) -> Result<Option<SpanDocument>> {
    path.map(|p| -> Result<SpanDocument> { Ok(SpanParser::parse(&read_input(p)?)?) })
        .transpose()
}

/// Timestamped output path under the configured output directory
fn default_output(config: &MaxspanConfig, mode: MergeMode) -> PathBuf {
    let stamp = Local::now().format("%Y%m%d_%H%M%S");
    config
        .output_dir
        .join(format!("span_{}_{}.xml", mode.as_str().replace('-', "_"), stamp))
}

/// Run the merge command
pub fn run(args: &MergeArgs<'_>, config: &MaxspanConfig) -> Result<PathBuf> {
    let mode = match args.mode {
        Some(mode) => mode.parse::<MergeMode>().map_err(CliError::InvalidArgument)?,
        None => config.merge_mode,
    };

    // Only documents the mode needs are read.
    let earlier = parse_optional(args.earlier.filter(|_| mode.requires_earlier()))?;
    let later = parse_optional(args.later.filter(|_| mode.requires_later()))?;

    let outcome = merge_snapshots(mode, earlier.as_ref(), later.as_ref())?;
    let xml = outcome.document.to_xml()?;

    let output = args
        .output
        .map(Path::to_path_buf)
        .unwrap_or_else(|| default_output(config, mode));
    write_output(&output, &xml)?;

    let c = outcome.counters;
    info!(mode = %mode, output = %output.display(), "Merge complete");
    println!("Mode: {}", mode);
    if mode == MergeMode::MergeMax {
        println!("Earlier contracts indexed: {}", c.earlier_indexed);
        println!("Later contracts processed: {}", c.later_processed);
        println!("Matched and merged:        {}", c.merged);
        println!("New in later only:         {}", c.new_in_later);
    }
    println!("Output: {}", output.display());
    Ok(output)
}
