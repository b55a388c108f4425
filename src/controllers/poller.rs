//! Fixed-interval background job.

use futures::StreamExt;
use std::future::Future;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_stream::wrappers::IntervalStream;

/// Runs a job immediately and then every `interval` until stopped.
///
/// The spawned task is aborted on [`Poller::stop`] and on drop, so a poller
/// never outlives its owner.
#[derive(Debug)]
pub struct Poller {
    interval: Duration,
    handle: Option<JoinHandle<()>>,
}

impl Poller {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval: interval.max(Duration::from_millis(1)),
            handle: None,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Start polling. Returns `false` (and does nothing) if already running.
    pub fn start<F, Fut>(&mut self, mut job: F) -> bool
    where
        F: FnMut() -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        if self.is_running() {
            return false;
        }

        let mut interval = tokio::time::interval(self.interval);
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
        let mut ticks = IntervalStream::new(interval);

        self.handle = Some(tokio::spawn(async move {
            while ticks.next().await.is_some() {
                job().await;
            }
        }));
        true
    }

    /// Stop polling. Returns `false` if it was not running.
    pub fn stop(&mut self) -> bool {
        match self.handle.take() {
            Some(handle) => {
                handle.abort();
                true
            }
            None => false,
        }
    }

    pub fn is_running(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }
}

impl Drop for Poller {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tokio::time::sleep;

    fn counting_job(count: &Arc<AtomicUsize>) -> impl FnMut() -> std::future::Ready<()> + Send + 'static {
        let count = Arc::clone(count);
        move || {
            count.fetch_add(1, Ordering::SeqCst);
            std::future::ready(())
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_runs_immediately_then_on_interval() {
        let count = Arc::new(AtomicUsize::new(0));
        let mut poller = Poller::new(Duration::from_secs(5));

        assert!(poller.start(counting_job(&count)));
        sleep(Duration::from_millis(1)).await;
        assert_eq!(count.load(Ordering::SeqCst), 1);

        sleep(Duration::from_secs(5)).await;
        assert_eq!(count.load(Ordering::SeqCst), 2);

        sleep(Duration::from_secs(10)).await;
        assert_eq!(count.load(Ordering::SeqCst), 4);
    }

    #[tokio::test(start_paused = true)]
    async fn test_start_and_stop_are_idempotent() {
        let count = Arc::new(AtomicUsize::new(0));
        let mut poller = Poller::new(Duration::from_secs(5));

        assert!(!poller.stop());
        assert!(poller.start(counting_job(&count)));
        assert!(!poller.start(counting_job(&count)));
        assert!(poller.is_running());

        sleep(Duration::from_millis(1)).await;
        assert_eq!(count.load(Ordering::SeqCst), 1);

        assert!(poller.stop());
        assert!(!poller.stop());
        assert!(!poller.is_running());

        sleep(Duration::from_secs(30)).await;
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_drop_aborts_task() {
        let count = Arc::new(AtomicUsize::new(0));
        {
            let mut poller = Poller::new(Duration::from_secs(5));
            poller.start(counting_job(&count));
            sleep(Duration::from_millis(1)).await;
        }
        sleep(Duration::from_secs(30)).await;
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_restart_after_stop() {
        let count = Arc::new(AtomicUsize::new(0));
        let mut poller = Poller::new(Duration::from_secs(5));
        poller.start(counting_job(&count));
        sleep(Duration::from_millis(1)).await;
        poller.stop();

        assert!(poller.start(counting_job(&count)));
        sleep(Duration::from_millis(1)).await;
        assert_eq!(count.load(Ordering::SeqCst), 2);
    }
}
