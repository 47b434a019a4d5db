//! Integration-style tests driving the CLI commands end to end.

use std::path::PathBuf;

use rstest::rstest;
use tempfile::NamedTempFile;

use super::{
    Cli, CliError, Command, ExecutionSummary, KmeansArgs, MarkersArgs, StrategyArg, UpgmaArgs,
    render_summary, run_cli,
};

fn fixture(contents: &str) -> NamedTempFile {
    let file = NamedTempFile::new().expect("temp file must be created");
    std::fs::write(file.path(), contents).expect("write must succeed");
    file
}

fn rendered(summary: &ExecutionSummary) -> String {
    let mut out = Vec::new();
    render_summary(summary, &mut out).expect("rendering must succeed");
    String::from_utf8(out).expect("summary must be UTF-8")
}

#[test]
fn kmeans_with_farthest_seeding_is_deterministic() {
    let file = fixture("2 2\n0.0 0.0\n0.0 1.0\n10.0 0.0\n10.0 1.0\n");
    let cli = Cli {
        command: Command::Kmeans(KmeansArgs {
            path: file.path().to_path_buf(),
            strategy: StrategyArg::Farthest,
            seed: None,
        }),
    };

    let summary = run_cli(cli).expect("run must succeed");
    let text = rendered(&summary);
    assert!(text.contains("clusters: 2"), "got:\n{text}");
    assert!(text.contains("center 1: 0.000000 0.000000"), "got:\n{text}");
    assert!(text.contains("center 2: 10.000000 1.000000"), "got:\n{text}");
    assert!(text.contains("distortion: 0.500000"), "got:\n{text}");
}

#[rstest]
#[case(StrategyArg::Dsquared)]
#[case(StrategyArg::Farthest)]
fn kmeans_honours_the_cluster_count_header(#[case] strategy: StrategyArg) {
    let file = fixture("2 1\n0.0\n0.5\n9.0\n9.5\n");
    let cli = Cli {
        command: Command::Kmeans(KmeansArgs {
            path: file.path().to_path_buf(),
            strategy,
            seed: Some(11),
        }),
    };

    let summary = run_cli(cli).expect("run must succeed");
    match summary {
        ExecutionSummary::Kmeans { outcome, .. } => {
            assert_eq!(outcome.centers().len(), 2);
            assert_eq!(outcome.assignments().len(), 4);
        }
        other => panic!("unexpected summary: {other:?}"),
    }
}

#[test]
fn upgma_merges_the_closest_points_first() {
    let file = fixture("2 1\n0.0\n2.0\n8.0\n");
    let cli = Cli {
        command: Command::Upgma(UpgmaArgs {
            path: file.path().to_path_buf(),
        }),
    };

    let summary = run_cli(cli).expect("run must succeed");
    let text = rendered(&summary);
    assert!(text.contains("node 4 (age 1.000000): 1 2"), "got:\n{text}");
    assert!(text.contains("root: node 5 (age 3.500000)"), "got:\n{text}");
}

#[test]
fn markers_reports_one_indexed_choices() {
    let file = fixture("1 4\n0 0 1 1\n0 0 0 0\n0 0 1 1\n");
    let cli = Cli {
        command: Command::Markers(MarkersArgs {
            path: file.path().to_path_buf(),
        }),
    };

    let summary = run_cli(cli).expect("run must succeed");
    let text = rendered(&summary);
    assert!(text.contains("markers: 2"), "got:\n{text}");
    assert!(text.contains("score: 1.000000"), "got:\n{text}");
}

#[test]
fn missing_input_files_surface_a_stable_error_code() {
    let cli = Cli {
        command: Command::Upgma(UpgmaArgs {
            path: PathBuf::from("/nonexistent/medaka.txt"),
        }),
    };

    let err = run_cli(cli).expect_err("path does not exist");
    assert!(matches!(err, CliError::Coords(_)));
    assert_eq!(err.code(), "COORDS_IO");
}

#[test]
fn ragged_coordinate_files_are_rejected_before_clustering() {
    // Three complete 2-d points plus one stray coordinate.
    let file = fixture("2 2\n0.0 0.0\n1.0 1.0\n2.0 2.0\n3.0\n");
    let cli = Cli {
        command: Command::Kmeans(KmeansArgs {
            path: file.path().to_path_buf(),
            strategy: StrategyArg::Farthest,
            seed: None,
        }),
    };

    let err = run_cli(cli).expect_err("trailing partial point is invalid");
    assert_eq!(err.code(), "COORDS_TRAILING_COORDINATES");
}
