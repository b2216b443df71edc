//! Portfolio command implementation
//!
//! Aggregates scenario risk for a position file against the joined contract
//! set and prints the report.

use std::path::Path;

use risk_engine::export::positions_from_csv;
use risk_engine::{PortfolioRisk, RiskSession, SpreadGroup};
use serde::Serialize;
use tracing::{info, warn};

use crate::commands::{or_dash, read_input};
use crate::config::MaxspanConfig;
use crate::{CliError, Result};

/// Arguments of the portfolio command
pub struct PortfolioArgs<'a> {
    pub span: &'a Path,
    pub bhav: &'a Path,
    pub positions: &'a Path,
    pub top: Option<usize>,
    pub scenarios: Option<usize>,
    pub spreads: bool,
    pub format: &'a str,
}

/// Serialisable portfolio report
#[derive(Debug, Serialize)]
pub struct PortfolioReport {
    pub worst: f64,
    /// 1-based scenario number
    pub worst_scenario: Option<usize>,
    pub matched: usize,
    pub inert: usize,
    pub unmatched: Vec<String>,
    pub top_contributors: Vec<ContributorLine>,
    pub scenarios: Vec<ScenarioLine>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub spreads: Vec<SpreadLine>,
}

/// One contributor row
#[derive(Debug, Serialize)]
pub struct ContributorLine {
    pub key: String,
    pub lots: i64,
    pub worst_abs: f64,
}

/// One scenario row
#[derive(Debug, Serialize)]
pub struct ScenarioLine {
    pub scenario: String,
    pub value: f64,
}

/// One spread group row
#[derive(Debug, Serialize)]
pub struct SpreadLine {
    pub group: String,
    pub net_lots: i64,
    pub legs: Vec<SpreadLegLine>,
}

/// One spread leg row
#[derive(Debug, Serialize)]
pub struct SpreadLegLine {
    pub month: String,
    pub lots: i64,
    pub close: Option<f64>,
    pub approx_impact: Option<f64>,
}

impl PortfolioReport {
    /// Build the report from aggregation output
    pub fn new(risk: &PortfolioRisk, spreads: &[SpreadGroup], top: usize, preview: usize) -> Self {
        Self {
            worst: risk.worst,
            worst_scenario: risk.worst_index.map(|i| i + 1),
            matched: risk.contributions.len(),
            inert: risk.inert,
            unmatched: risk.unmatched.iter().map(|p| p.key().to_string()).collect(),
            top_contributors: risk
                .top_contributors(top)
                .into_iter()
                .map(|c| ContributorLine {
                    key: c.key.to_string(),
                    lots: c.position.lots,
                    worst_abs: c.worst_absolute(),
                })
                .collect(),
            scenarios: risk
                .scenario_preview(preview)
                .into_iter()
                .map(|(i, value)| ScenarioLine {
                    scenario: format!("S{}", i + 1),
                    value,
                })
                .collect(),
            spreads: spreads
                .iter()
                .map(|g| SpreadLine {
                    group: g.label(),
                    net_lots: g.net_lots,
                    legs: g
                        .legs
                        .iter()
                        .map(|leg| SpreadLegLine {
                            month: leg.month.to_string(),
                            lots: leg.lots,
                            close: leg.close,
                            approx_impact: leg.approx_impact,
                        })
                        .collect(),
                })
                .collect(),
        }
    }

    /// Plain-text rendering
    pub fn render_text(&self) -> String {
        let mut out = String::new();
        out.push_str(&format!("Portfolio worst: {:.2}", self.worst));
        if let Some(s) = self.worst_scenario {
            out.push_str(&format!(" (scenario S{})", s));
        }
        out.push('\n');
        out.push_str(&format!(
            "Positions: {} matched, {} unmatched, {} inert\n",
            self.matched,
            self.unmatched.len(),
            self.inert
        ));
        for key in &self.unmatched {
            out.push_str(&format!("  unmatched: {}\n", key));
        }

        out.push_str("\nTop contributors\n");
        for c in &self.top_contributors {
            out.push_str(&format!("  {:<32} {:>6} {:>14.2}\n", c.key, c.lots, c.worst_abs));
        }

        out.push_str("\nScenarios\n");
        for s in &self.scenarios {
            out.push_str(&format!("  {:<5} {:>14.2}\n", s.scenario, s.value));
        }

        if !self.spreads.is_empty() {
            out.push_str("\nSpreads\n");
            for g in &self.spreads {
                out.push_str(&format!("  {} (net {})\n", g.group, g.net_lots));
                for leg in &g.legs {
                    out.push_str(&format!(
                        "    {:<9} {:>6} close {:>12} impact {:>12}\n",
                        leg.month,
                        leg.lots,
                        or_dash(leg.close),
                        leg.approx_impact.map(|v| format!("{:.2}", v)).unwrap_or_else(|| "-".to_string())
                    ));
                }
            }
        }
        out
    }
}

/// Run the portfolio command
pub fn run(args: &PortfolioArgs<'_>, config: &MaxspanConfig) -> Result<()> {
    let report = build_report(args, config)?;
    match args.format {
        "text" => print!("{}", report.render_text()),
        "json" => println!("{}", serde_json::to_string_pretty(&report)?),
        other => {
            return Err(CliError::InvalidArgument(format!(
                "Unknown format: {}. Supported: text, json",
                other
            )))
        }
    }
    Ok(())
}

fn build_report(args: &PortfolioArgs<'_>, config: &MaxspanConfig) -> Result<PortfolioReport> {
    let top = args.top.unwrap_or(config.top_contributors);
    let preview = args.scenarios.unwrap_or(config.scenario_preview);
    if top == 0 || preview == 0 {
        return Err(CliError::InvalidArgument(
            "--top and --scenarios must be greater than 0".to_string(),
        ));
    }

    let span = read_input(args.span)?;
    let bhav = read_input(args.bhav)?;
    let positions = positions_from_csv(&read_input(args.positions)?, config.delimiter())?;

    let mut session = RiskSession::new();
    session.load(&span, &bhav)?;
    session.set_positions(positions);

    let risk = session.portfolio_risk();
    if !risk.unmatched.is_empty() {
        warn!(count = risk.unmatched.len(), "Some positions match no contract");
    }
    let spreads = if args.spreads { session.spreads() } else { Vec::new() };
    info!(worst = risk.worst, matched = risk.contributions.len(), "Portfolio aggregated");

    Ok(PortfolioReport::new(&risk, &spreads, top, preview))
}
