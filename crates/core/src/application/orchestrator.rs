// Orchestrator - collect, fan out, reconcile, report, clean

use std::io::{BufRead, Read, Write};
use std::sync::Arc;

use tracing::{info, instrument};

use crate::application::cleaner::Cleaner;
use crate::application::codec;
use crate::application::collector::Collector;
use crate::application::palette::Palette;
use crate::application::reporter::{Reporter, Summary};
use crate::application::tracker::{CompletionTracker, JobTable, TrackedRun};
use crate::config::MashConfig;
use crate::domain::{CacheLayout, JobResult, MessageBundle, ProtocolError};
use crate::error::{MashError, Result};
use crate::port::{JobLauncher, TimeProvider};

/// What a finished run looked like
#[derive(Debug, Clone)]
pub struct RunReport {
    pub summary: Summary,
    /// Indexed by job in typed order
    pub results: Vec<JobResult>,
    pub elapsed_ms: f64,
}

pub struct Orchestrator {
    config: MashConfig,
    launcher: Arc<dyn JobLauncher>,
    tracker: CompletionTracker,
    reporter: Reporter,
    cleaner: Cleaner,
}

impl Orchestrator {
    pub fn new(
        config: MashConfig,
        launcher: Arc<dyn JobLauncher>,
        time_provider: Arc<dyn TimeProvider>,
    ) -> Self {
        let cache = CacheLayout::new(&config.cache_dir);
        Self {
            tracker: CompletionTracker::new(time_provider),
            reporter: Reporter::new(cache.clone(), Palette::new(config.color)),
            cleaner: Cleaner::new(cache),
            launcher,
            config,
        }
    }

    /// Run the collector on a blocking thread and receive its bundle
    ///
    /// `sender` and `receiver` are the two ends of a one-way channel; the
    /// collector closes `sender` when done, which ends the read.
    pub async fn collect<I, P, S, R>(
        &self,
        input: I,
        prompt: P,
        sender: S,
        receiver: R,
    ) -> Result<MessageBundle>
    where
        I: BufRead + Send + 'static,
        P: Write + Send + 'static,
        S: Write + Send + 'static,
        R: Read + Send + 'static,
    {
        let collector = Collector::new(self.config.job_count);
        let ui = tokio::task::spawn_blocking(move || collector.run(input, prompt, sender));

        let received = self.receive(receiver).await;
        ui.await
            .map_err(|e| MashError::Wait(format!("collector did not finish: {}", e)))??;
        received
    }

    /// Read the channel to its end and decode exactly one bundle
    pub async fn receive<R>(&self, mut receiver: R) -> Result<MessageBundle>
    where
        R: Read + Send + 'static,
    {
        let bytes = tokio::task::spawn_blocking(move || {
            let mut buf = Vec::new();
            receiver.read_to_end(&mut buf).map(|_| buf)
        })
        .await
        .map_err(|e| MashError::Wait(e.to_string()))?
        .map_err(|e| MashError::Pipe(e.to_string()))?;

        let bundle = codec::decode(&bytes)?;
        if bundle.commands.len() != self.config.job_count {
            return Err(ProtocolError::FieldCount {
                expected: self.config.job_count + 1,
                actual: bundle.field_count(),
            }
            .into());
        }
        info!(jobs = bundle.commands.len(), file = %bundle.file, "Received bundle");
        Ok(bundle)
    }

    /// Spawn one worker per command, wait for all, report and clean up
    #[instrument(skip_all, fields(jobs = bundle.commands.len()))]
    pub async fn run<W: Write>(&self, bundle: &MessageBundle, out: &mut W) -> Result<RunReport> {
        let specs = bundle.job_specs();

        let mut launched = Vec::with_capacity(specs.len());
        for spec in &specs {
            let job = self.launcher.launch(spec)?;
            info!(index = spec.index, handle = %job.handle, command = %spec.raw_command, "Spawned worker");
            launched.push(job);
        }
        let table = JobTable::new(launched.iter().map(|job| job.handle).collect());

        writeln!(out)?;
        let tracked: TrackedRun = self.tracker.await_all(table, launched, out).await?;

        let summary = self.reporter.report(&tracked, &bundle.file, out).await?;
        self.cleaner.clean(tracked.table.job_queue()).await?;

        info!(%summary, jobs = summary.total(), elapsed_ms = tracked.elapsed_ms, "Run complete");
        Ok(RunReport {
            summary,
            results: tracked.results,
            elapsed_ms: tracked.elapsed_ms,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ExitClass, JobHandle};
    use crate::port::job_launcher::mocks::{MockJob, MockJobLauncher};
    use crate::port::time_provider::SystemTimeProvider;
    use std::io::Cursor;
    use std::os::unix::net::UnixStream;

    fn config(dir: &std::path::Path) -> MashConfig {
        MashConfig {
            cache_dir: dir.to_path_buf(),
            color: false,
            ..MashConfig::default()
        }
    }

    fn orchestrator(config: MashConfig, launcher: MockJobLauncher) -> Orchestrator {
        Orchestrator::new(config, Arc::new(launcher), Arc::new(SystemTimeProvider))
    }

    fn bundle(commands: &[&str], file: &str) -> MessageBundle {
        MessageBundle::new(commands.iter().map(|c| c.to_string()).collect(), file)
    }

    #[tokio::test]
    async fn test_report_follows_typed_order_not_completion_order() {
        let dir = tempfile::tempdir().unwrap();
        let cache = CacheLayout::new(dir.path());
        let launcher = MockJobLauncher::new(vec![
            MockJob::new(0, 120).with_output("out-1\n"),
            MockJob::new(0, 60).with_output("out-2\n"),
            MockJob::new(0, 0).with_output("out-3\n"),
        ])
        .with_cache(cache.clone());
        let orch = orchestrator(config(dir.path()), launcher);
        let mut out = Vec::new();

        let report = orch
            .run(&bundle(&["wc -l", "sort", "grep foo"], "data.txt"), &mut out)
            .await
            .unwrap();

        let text = String::from_utf8(out).unwrap();
        let third = text.find("Third process").unwrap();
        let first = text.find("First process").unwrap();
        assert!(third < first, "completion messages follow finish order");

        let one = text.find("out-1").unwrap();
        let two = text.find("out-2").unwrap();
        let three = text.find("out-3").unwrap();
        assert!(one < two && two < three, "artifacts follow typed order");

        assert!(text.contains("Summary: success: 3, warning: 0, failure: 0\t  Target file: data.txt"));
        assert_eq!(report.summary.total(), 3);
        assert_eq!(
            report.results.iter().map(|r| r.handle).collect::<Vec<_>>(),
            vec![
                MockJobLauncher::handle_for(1),
                MockJobLauncher::handle_for(2),
                MockJobLauncher::handle_for(3)
            ]
        );

        // Cleaner ran
        for index in 1..=3 {
            assert!(!cache.artifact_path(MockJobLauncher::handle_for(index)).exists());
        }
    }

    #[tokio::test]
    async fn test_warning_counted_apart_from_failure() {
        let dir = tempfile::tempdir().unwrap();
        let launcher = MockJobLauncher::new(vec![
            MockJob::new(124, 10).with_output("w\n"),
            MockJob::new(0, 0).with_output("s\n"),
            MockJob::new(0, 5).with_output("s\n"),
        ])
        .with_cache(CacheLayout::new(dir.path()));
        let orch = orchestrator(config(dir.path()), launcher);
        let mut out = Vec::new();

        let report = orch
            .run(&bundle(&["", "sort", "grep foo"], "data.txt"), &mut out)
            .await
            .unwrap();

        assert_eq!(report.results[0].exit_class, ExitClass::NoCommand);
        assert_eq!(report.summary.success, 2);
        assert_eq!(report.summary.warning, 1);
        assert_eq!(report.summary.failure, 0);
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains(&format!("{}(124) ", MockJobLauncher::handle_for(1))));
    }

    #[tokio::test]
    async fn test_missing_artifact_is_exec_failure() {
        let dir = tempfile::tempdir().unwrap();
        // No cache layout: the mock never writes artifacts
        let launcher = MockJobLauncher::new(vec![MockJob::new(0, 0); 3]);
        let orch = orchestrator(config(dir.path()), launcher);

        let err = orch
            .run(&bundle(&["a", "b", "c"], ""), &mut std::io::sink())
            .await
            .unwrap_err();
        assert_eq!(err.exit_code(), 243);
    }

    #[tokio::test]
    async fn test_spawn_failure_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let launcher = MockJobLauncher::new(vec![MockJob::new(0, 0); 3]).failing_at(2);
        let orch = orchestrator(config(dir.path()), launcher);

        let err = orch
            .run(&bundle(&["a", "b", "c"], ""), &mut std::io::sink())
            .await
            .unwrap_err();
        assert_eq!(err.exit_code(), 241);
    }

    #[tokio::test]
    async fn test_collect_over_socket_pair() {
        let dir = tempfile::tempdir().unwrap();
        let orch = orchestrator(config(dir.path()), MockJobLauncher::new(vec![]));
        let (sender, receiver) = UnixStream::pair().unwrap();
        let input = Cursor::new("wc -l\n\ngrep foo\ndata.txt\n");

        let bundle = orch
            .collect(input, std::io::sink(), sender, receiver)
            .await
            .unwrap();

        assert_eq!(bundle.commands, vec!["wc -l", "", "grep foo"]);
        assert_eq!(bundle.file, "data.txt");
    }

    #[tokio::test]
    async fn test_receive_rejects_wrong_field_count() {
        let dir = tempfile::tempdir().unwrap();
        let orch = orchestrator(config(dir.path()), MockJobLauncher::new(vec![]));
        let bytes = codec::encode(&bundle(&["only one"], "f")).unwrap();

        let err = orch.receive(Cursor::new(bytes)).await.unwrap_err();
        assert!(matches!(
            err,
            MashError::Protocol(ProtocolError::FieldCount {
                expected: 4,
                actual: 2
            })
        ));
        assert_eq!(err.exit_code(), 240);
    }

    #[tokio::test]
    async fn test_n_jobs() {
        let dir = tempfile::tempdir().unwrap();
        let mut cfg = config(dir.path());
        cfg.job_count = 5;
        let launcher = MockJobLauncher::new(
            (0..5)
                .map(|i| MockJob::new(if i == 4 { 3 } else { 0 }, 10 * (5 - i)).with_output("x\n"))
                .collect(),
        )
        .with_cache(CacheLayout::new(dir.path()));
        let orch = orchestrator(cfg, launcher);
        let mut out = Vec::new();

        let report = orch
            .run(&bundle(&["a", "b", "c", "d", "e"], ""), &mut out)
            .await
            .unwrap();

        assert_eq!(report.summary.success, 4);
        assert_eq!(report.summary.failure, 1);
        assert_eq!(report.results[4].handle, JobHandle::new(1005));
        assert!(String::from_utf8(out).unwrap().contains("5th process [pid: 1005]"));
    }
}
