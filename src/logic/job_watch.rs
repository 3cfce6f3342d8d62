use crate::error::Result;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

/// Anything that can report progress logs for a running climate analysis.
pub trait JobStatusSource: Send + Sync + 'static {
    /// Full log history of the job so far.
    fn fetch_logs(&self, job_id: &str) -> impl Future<Output = Result<Vec<String>>> + Send;

    /// Ask the backend to abandon the running analysis.
    fn request_stop(&self) -> impl Future<Output = Result<()>> + Send;
}

/// Cancels a [`CancelToken`]. Dropping the handle does not cancel.
#[derive(Debug)]
pub struct CancelHandle {
    tx: watch::Sender<bool>,
}

#[derive(Debug, Clone)]
pub struct CancelToken {
    rx: watch::Receiver<bool>,
}

pub fn cancel_pair() -> (CancelHandle, CancelToken) {
    let (tx, rx) = watch::channel(false);
    (CancelHandle { tx }, CancelToken { rx })
}

impl CancelHandle {
    pub fn cancel(&self) {
        self.tx.send_replace(true);
    }
}

impl CancelToken {
    #[cfg(test)]
    pub fn is_cancelled(&self) -> bool {
        *self.rx.borrow()
    }

    /// Resolves once the paired handle cancels; pends forever if it is dropped first.
    pub async fn cancelled(&mut self) {
        if self.rx.wait_for(|cancelled| *cancelled).await.is_err() {
            std::future::pending::<()>().await;
        }
    }
}

#[derive(Debug)]
pub enum JobOutcome {
    Completed { logs: Vec<String> },
    /// Polling stopped on request. `stop_notice` delivers the best-effort stop
    /// request to the backend; awaiting it is optional.
    Cancelled { stop_notice: JoinHandle<()> },
}

pub struct JobWatcher<S: JobStatusSource> {
    source: Arc<S>,
    interval: Duration,
    completion_marker: String,
}

impl<S: JobStatusSource> JobWatcher<S> {
    pub fn new(source: Arc<S>, interval: Duration, completion_marker: impl Into<String>) -> Self {
        Self {
            source,
            interval,
            completion_marker: completion_marker.into(),
        }
    }

    /// Poll until a log line carries the completion marker or `cancel` fires.
    ///
    /// `on_progress` receives the most recent log line after every poll. A
    /// failed poll ends the watch with that error.
    pub async fn watch<F>(
        &self,
        job_id: &str,
        mut cancel: CancelToken,
        mut on_progress: F,
    ) -> Result<JobOutcome>
    where
        F: FnMut(&str),
    {
        let mut ticker = tokio::time::interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                biased;
                _ = cancel.cancelled() => return Ok(self.cancelled(job_id)),
                _ = ticker.tick() => {}
            }

            let logs = tokio::select! {
                biased;
                _ = cancel.cancelled() => return Ok(self.cancelled(job_id)),
                logs = self.source.fetch_logs(job_id) => logs?,
            };

            if let Some(latest) = logs.last() {
                on_progress(latest);
            }

            if logs.iter().any(|line| line.contains(&self.completion_marker)) {
                tracing::info!("Analysis job {} completed", job_id);
                return Ok(JobOutcome::Completed { logs });
            }
        }
    }

    fn cancelled(&self, job_id: &str) -> JobOutcome {
        tracing::info!("Stopped watching analysis job {}", job_id);
        let source = Arc::clone(&self.source);
        let stop_notice = tokio::spawn(async move {
            if let Err(e) = source.request_stop().await {
                tracing::warn!("Failed to notify backend of cancellation: {}", e);
            }
        });
        JobOutcome::Cancelled { stop_notice }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AdvisorError;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    const MARKER: &str = "Processamento completo";

    /// Replays a fixed sequence of log snapshots, repeating the last one.
    struct ScriptedSource {
        snapshots: Vec<Vec<String>>,
        polls: AtomicUsize,
        stops: AtomicUsize,
        fail_on_poll: Option<usize>,
        seen_jobs: Mutex<Vec<String>>,
    }

    impl ScriptedSource {
        fn new(snapshots: Vec<Vec<&str>>) -> Self {
            Self {
                snapshots: snapshots
                    .into_iter()
                    .map(|s| s.into_iter().map(String::from).collect())
                    .collect(),
                polls: AtomicUsize::new(0),
                stops: AtomicUsize::new(0),
                fail_on_poll: None,
                seen_jobs: Mutex::new(Vec::new()),
            }
        }
    }

    impl JobStatusSource for ScriptedSource {
        async fn fetch_logs(&self, job_id: &str) -> Result<Vec<String>> {
            self.seen_jobs.lock().unwrap().push(job_id.to_string());
            let poll = self.polls.fetch_add(1, Ordering::SeqCst);
            if self.fail_on_poll == Some(poll) {
                return Err(AdvisorError::DataSourceUnavailable("status down".into()));
            }
            let index = poll.min(self.snapshots.len() - 1);
            Ok(self.snapshots[index].clone())
        }

        async fn request_stop(&self) -> Result<()> {
            self.stops.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    fn watcher(source: &Arc<ScriptedSource>) -> JobWatcher<ScriptedSource> {
        JobWatcher::new(Arc::clone(source), Duration::from_millis(5), MARKER)
    }

    #[tokio::test]
    async fn completes_when_marker_appears() {
        let source = Arc::new(ScriptedSource::new(vec![
            vec!["Iniciando processamento..."],
            vec!["Iniciando processamento...", "Baixando dados"],
            vec!["Iniciando processamento...", "Baixando dados", MARKER],
        ]));
        let (_handle, token) = cancel_pair();
        let mut progress = Vec::new();

        let outcome = watcher(&source)
            .watch("job-1", token, |line| progress.push(line.to_string()))
            .await
            .unwrap();

        match outcome {
            JobOutcome::Completed { logs } => assert_eq!(logs.len(), 3),
            other => panic!("unexpected outcome: {:?}", other),
        }
        assert_eq!(source.polls.load(Ordering::SeqCst), 3);
        assert_eq!(progress, vec!["Iniciando processamento...", "Baixando dados", MARKER]);
        assert!(source.seen_jobs.lock().unwrap().iter().all(|j| j == "job-1"));
        assert_eq!(source.stops.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn cancel_stops_polling_and_notifies_backend() {
        let source = Arc::new(ScriptedSource::new(vec![vec!["Baixando dados"]]));
        let (handle, token) = cancel_pair();
        let watcher = watcher(&source);

        let canceller = async {
            tokio::time::sleep(Duration::from_millis(30)).await;
            handle.cancel();
        };
        let (outcome, _) = tokio::join!(watcher.watch("job-2", token, |_| {}), canceller);

        let stop_notice = match outcome.unwrap() {
            JobOutcome::Cancelled { stop_notice } => stop_notice,
            other => panic!("unexpected outcome: {:?}", other),
        };
        stop_notice.await.unwrap();
        assert_eq!(source.stops.load(Ordering::SeqCst), 1);

        let polls_at_cancel = source.polls.load(Ordering::SeqCst);
        tokio::time::sleep(Duration::from_millis(30)).await;
        assert_eq!(source.polls.load(Ordering::SeqCst), polls_at_cancel);
    }

    #[tokio::test]
    async fn cancelled_before_start_never_polls() {
        let source = Arc::new(ScriptedSource::new(vec![vec![MARKER]]));
        let (handle, token) = cancel_pair();
        handle.cancel();
        assert!(token.is_cancelled());

        let outcome = watcher(&source).watch("job-3", token, |_| {}).await.unwrap();

        assert!(matches!(outcome, JobOutcome::Cancelled { .. }));
        assert_eq!(source.polls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn dropped_handle_does_not_cancel() {
        let source = Arc::new(ScriptedSource::new(vec![vec!["step"], vec!["step", MARKER]]));
        let (handle, token) = cancel_pair();
        drop(handle);

        let outcome = watcher(&source).watch("job-4", token, |_| {}).await.unwrap();
        assert!(matches!(outcome, JobOutcome::Completed { .. }));
    }

    #[tokio::test]
    async fn poll_failure_propagates() {
        let mut scripted = ScriptedSource::new(vec![vec!["step"]]);
        scripted.fail_on_poll = Some(1);
        let source = Arc::new(scripted);
        let (_handle, token) = cancel_pair();

        let result = watcher(&source).watch("job-5", token, |_| {}).await;
        assert!(matches!(result, Err(AdvisorError::DataSourceUnavailable(_))));
        assert_eq!(source.polls.load(Ordering::SeqCst), 2);
    }
}
