//! Edge cases over real commands

mod common;

use std::sync::Arc;

use mash_core::application::Orchestrator;
use mash_core::domain::ExitClass;
use mash_core::port::time_provider::SystemTimeProvider;
use mash_core::MashConfig;

use common::{bundle, cache_artifacts, config, data_file, InProcessLauncher, FIRST_HANDLE};

async fn run(cfg: MashConfig, commands: &[&str], file: &str) -> (mash_core::application::RunReport, String) {
    let orch = Orchestrator::new(
        cfg.clone(),
        Arc::new(InProcessLauncher::new(cfg)),
        Arc::new(SystemTimeProvider),
    );
    let mut out = Vec::new();
    let report = orch.run(&bundle(commands, file), &mut out).await.unwrap();
    (report, String::from_utf8(out).unwrap())
}

/// Slow first job still reports first; its completion line comes last
#[tokio::test]
async fn test_slow_first_job() {
    let dir = tempfile::tempdir().unwrap();
    let (report, text) = run(
        config(dir.path()),
        &["sleep 0.3", "echo two", "echo three"],
        "",
    )
    .await;

    // Ordinals name the typed position, so job 1 is announced last as "First"
    let first_done = text
        .find(&format!("First process [pid: {}] is finished...", FIRST_HANDLE))
        .unwrap();
    let second_done = text
        .find(&format!("Second process [pid: {}] is finished...", FIRST_HANDLE + 1))
        .unwrap();
    let third_done = text
        .find(&format!("Third process [pid: {}] is finished...", FIRST_HANDLE + 2))
        .unwrap();
    assert!(second_done < first_done && third_done < first_done);
    let sleep = text.find("-----CMD 1: sleep 0.3").unwrap();
    let two = text.find("-----CMD 2: echo two").unwrap();
    assert!(sleep < two);
    assert!(report.elapsed_ms >= 250.0);
}

/// Repeated spaces collapse; the target file follows existing arguments
#[tokio::test]
async fn test_argument_building() {
    let dir = tempfile::tempdir().unwrap();
    let file = data_file(dir.path(), "data.txt", "first\nsecond\nthird\n");
    let (report, text) = run(
        config(dir.path()),
        &["head   -n   1", "tail -n 1", "  wc  -l  "],
        &file,
    )
    .await;

    assert_eq!(report.summary.success, 3);
    assert!(text.contains("first\n"));
    assert!(text.contains("third\n"));
    assert!(text.contains(&format!("3 {}", file)));
}

/// Commands longer than the header get no padding
#[tokio::test]
async fn test_long_command_header() {
    let dir = tempfile::tempdir().unwrap();
    let long = format!("echo {}", "x".repeat(90));
    let (_, text) = run(config(dir.path()), &[&long, "true", "true"], "").await;

    let header = format!("-----CMD 1: {}\n", long);
    assert!(text.contains(&header));
}

/// Job count beyond three
#[tokio::test]
async fn test_nine_jobs() {
    let dir = tempfile::tempdir().unwrap();
    let cfg = MashConfig {
        job_count: 9,
        ..config(dir.path())
    };
    let commands: Vec<String> = (1..=9).map(|i| format!("echo job-{}", i)).collect();
    let refs: Vec<&str> = commands.iter().map(String::as_str).collect();

    let (report, text) = run(cfg, &refs, "").await;

    assert_eq!(report.summary.success, 9);
    let positions: Vec<usize> = (1..=9)
        .map(|i| text.find(&format!("job-{}\n", i)).unwrap())
        .collect();
    assert!(positions.windows(2).all(|w| w[0] < w[1]));
    assert!(text.contains("9th process [pid: "));
    assert!(cache_artifacts(dir.path()).is_empty());
}

/// Non-reserved exit codes are failures carrying their own code
#[tokio::test]
async fn test_other_exit_codes() {
    let dir = tempfile::tempdir().unwrap();
    let script = data_file(dir.path(), "exit7.sh", "exit 7\n");
    let (report, text) = run(
        config(dir.path()),
        &[&format!("sh {}", script), "true", "true"],
        "",
    )
    .await;

    assert_eq!(report.results[0].exit_class, ExitClass::OtherFailure(7));
    assert_eq!(report.summary.failure, 1);
    assert!(text.contains(&format!("{}(7) ", FIRST_HANDLE)));
}
