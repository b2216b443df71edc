//! Portfolio scenario aggregation and spread grouping.

mod aggregate;
mod spreads;

pub use aggregate::{aggregate_portfolio, PortfolioRisk, PositionImpact};
pub use spreads::{group_spreads, SpreadGroup, SpreadLeg};
