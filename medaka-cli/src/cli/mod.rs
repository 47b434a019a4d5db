//! Command-line interface orchestration for the medaka clustering tools.
//!
//! Offers three commands: `kmeans` (center-based clustering of a coordinate
//! file), `upgma` (average-linkage hierarchy of a coordinate file), and
//! `markers` (explanatory marker search over a binary panel).

mod commands;

pub use commands::{
    Cli, CliError, Command, ExecutionSummary, KmeansArgs, MarkersArgs, StrategyArg, UpgmaArgs,
    render_summary, run_cli,
};

#[cfg(test)]
mod tests;
