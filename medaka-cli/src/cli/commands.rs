//! Command implementations and argument parsing for the medaka CLI.

use std::io::{self, Write};
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use thiserror::Error;
use tracing::{Span, field, info, instrument};

use medaka_core::{
    ClusterError, ClusteringOutcome, Dendrogram, LinkageError, MarkerError, MarkerPanel,
    MarkerTest, MedakaBuilder, PointSet, PointSetError, SeedingStrategy, UpgmaOutcome,
    search_markers, upgma_from_points,
};
use medaka_providers_coords::{CoordsError, read_coordinates, read_marker_panel};

/// Top-level CLI options parsed by [`clap`].
#[derive(Debug, Parser, Clone)]
#[command(name = "medaka", about = "Cluster biological point data.")]
pub struct Cli {
    /// Command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Supported CLI commands.
#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Run center-based clustering over a coordinate file.
    Kmeans(KmeansArgs),
    /// Build the average-linkage hierarchy of a coordinate file.
    Upgma(UpgmaArgs),
    /// Search for an explanatory marker set over a binary panel.
    Markers(MarkersArgs),
}

/// Options accepted by the `kmeans` command.
#[derive(Debug, Args, Clone)]
pub struct KmeansArgs {
    /// Path to a coordinate file (cluster count, dimension, floats).
    pub path: PathBuf,

    /// Seeding strategy to use.
    #[arg(long, value_enum, default_value_t = StrategyArg::Dsquared)]
    pub strategy: StrategyArg,

    /// Fixed random seed for reproducible D² seeding.
    #[arg(long)]
    pub seed: Option<u64>,
}

/// Options accepted by the `upgma` command.
#[derive(Debug, Args, Clone)]
pub struct UpgmaArgs {
    /// Path to a coordinate file (cluster count, dimension, floats).
    pub path: PathBuf,
}

/// Options accepted by the `markers` command.
#[derive(Debug, Args, Clone)]
pub struct MarkersArgs {
    /// Path to a marker-panel file (marker count, samples, bits).
    pub path: PathBuf,
}

/// Seeding strategies selectable on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StrategyArg {
    /// Probability-weighted D² seeding followed by Lloyd refinement.
    Dsquared,
    /// Deterministic farthest-point greedy seeding.
    Farthest,
}

impl From<StrategyArg> for SeedingStrategy {
    fn from(arg: StrategyArg) -> Self {
        match arg {
            StrategyArg::Dsquared => Self::DSquared,
            StrategyArg::Farthest => Self::FarthestPoint,
        }
    }
}

/// Errors surfaced while executing CLI commands.
#[derive(Debug, Error)]
pub enum CliError {
    /// Input ingestion failed.
    #[error(transparent)]
    Coords(#[from] CoordsError),
    /// Point validation failed.
    #[error(transparent)]
    Points(#[from] PointSetError),
    /// Center-based clustering failed.
    #[error(transparent)]
    Cluster(#[from] ClusterError),
    /// Hierarchical clustering failed.
    #[error(transparent)]
    Linkage(#[from] LinkageError),
    /// Marker search failed.
    #[error(transparent)]
    Marker(#[from] MarkerError),
}

impl CliError {
    /// Return the stable machine-readable code of the underlying error.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Coords(inner) => inner.code(),
            Self::Points(inner) => inner.code(),
            Self::Cluster(inner) => inner.code(),
            Self::Linkage(inner) => inner.code(),
            Self::Marker(inner) => inner.code(),
        }
    }
}

/// Summarises the outcome of executing a CLI command.
#[derive(Debug, Clone)]
pub enum ExecutionSummary {
    /// Result of a `kmeans` run.
    Kmeans {
        /// Strategy the run used.
        strategy: StrategyArg,
        /// Centers, assignments, distortion, and iteration count.
        outcome: ClusteringOutcome,
    },
    /// Result of an `upgma` build.
    Upgma {
        /// Merge records and root id.
        outcome: UpgmaOutcome,
        /// Age of the root node.
        root_age: f64,
    },
    /// Result of a `markers` search.
    Markers {
        /// Chosen indices and score.
        test: MarkerTest,
    },
}

/// Executes the CLI command represented by `cli`.
///
/// # Errors
/// Returns [`CliError`] when ingestion, validation, or execution fails.
#[instrument(name = "cli.run", err, skip(cli), fields(command = field::Empty))]
pub fn run_cli(cli: Cli) -> Result<ExecutionSummary, CliError> {
    let span = Span::current();
    match cli.command {
        Command::Kmeans(args) => {
            span.record("command", field::display("kmeans"));
            run_kmeans(&args)
        }
        Command::Upgma(args) => {
            span.record("command", field::display("upgma"));
            run_upgma(&args)
        }
        Command::Markers(args) => {
            span.record("command", field::display("markers"));
            run_markers(&args)
        }
    }
}

fn run_kmeans(args: &KmeansArgs) -> Result<ExecutionSummary, CliError> {
    let file = read_coordinates(&args.path)?;
    let points = PointSet::new(file.points)?;

    let mut builder = MedakaBuilder::new()
        .with_cluster_count(file.cluster_count)
        .with_strategy(args.strategy.into());
    if let Some(seed) = args.seed {
        builder = builder.with_seed(seed);
    }
    let outcome = builder.build()?.run(&points)?;

    info!(
        clusters = outcome.centers().len(),
        distortion = outcome.distortion(),
        "kmeans completed"
    );
    Ok(ExecutionSummary::Kmeans {
        strategy: args.strategy,
        outcome,
    })
}

fn run_upgma(args: &UpgmaArgs) -> Result<ExecutionSummary, CliError> {
    let file = read_coordinates(&args.path)?;
    let points = PointSet::new(file.points)?;
    let (tree, outcome) = upgma_from_points(&points)?;
    let root_age = tree.age(outcome.root)?;

    info!(root = outcome.root, root_age, "upgma completed");
    Ok(ExecutionSummary::Upgma { outcome, root_age })
}

fn run_markers(args: &MarkersArgs) -> Result<ExecutionSummary, CliError> {
    let file = read_marker_panel(&args.path)?;
    let panel = MarkerPanel::new(file.markers)?;
    let test = search_markers(&panel, &file.explain, file.marker_count)?;

    info!(score = test.score(), "marker search completed");
    Ok(ExecutionSummary::Markers { test })
}

/// Renders a human-readable summary to `out`.
///
/// Cluster and marker identifiers are printed 1-indexed to match the
/// conventions of the input files.
///
/// # Errors
/// Propagates I/O errors from the writer.
pub fn render_summary(summary: &ExecutionSummary, out: &mut impl Write) -> io::Result<()> {
    match summary {
        ExecutionSummary::Kmeans { strategy, outcome } => {
            writeln!(
                out,
                "clusters: {} (strategy: {:?}, iterations: {})",
                outcome.centers().len(),
                strategy,
                outcome.iterations()
            )?;
            for (index, center) in outcome.centers().iter().enumerate() {
                writeln!(out, "center {}: {}", index + 1, join_floats(center))?;
            }
            writeln!(out, "distortion: {:.6}", outcome.distortion())?;
        }
        ExecutionSummary::Upgma { outcome, root_age } => {
            for record in &outcome.merges {
                let members: Vec<String> = record
                    .members
                    .iter()
                    .map(|leaf| (leaf + 1).to_string())
                    .collect();
                writeln!(
                    out,
                    "node {} (age {:.6}): {}",
                    record.node + 1,
                    record.age,
                    members.join(" ")
                )?;
            }
            writeln!(out, "root: node {} (age {root_age:.6})", outcome.root + 1)?;
        }
        ExecutionSummary::Markers { test } => {
            let indices: Vec<String> = test
                .indices()
                .iter()
                .map(|index| (index + 1).to_string())
                .collect();
            writeln!(out, "markers: {}", indices.join(" "))?;
            writeln!(out, "score: {:.6}", test.score())?;
        }
    }
    Ok(())
}

fn join_floats(values: &[f64]) -> String {
    values
        .iter()
        .map(|value| format!("{value:.6}"))
        .collect::<Vec<_>>()
        .join(" ")
}
