use std::future::Future;
use std::ops::ControlFlow;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};

/// A cancellable, fixed-period background task.
///
/// Starting replaces (and aborts) whatever run was scheduled before. The
/// tick closure ends the run by returning `ControlFlow::Break`.
#[derive(Debug, Default)]
pub struct RepeatingTask {
    handle: Mutex<Option<JoinHandle<()>>>,
}

impl RepeatingTask {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `tick` every `period`, the first call one period from now.
    pub fn start<F, Fut>(&self, period: Duration, tick: F)
    where
        F: FnMut() -> Fut + Send + 'static,
        Fut: Future<Output = ControlFlow<()>> + Send + 'static,
    {
        self.spawn(Instant::now() + period, period, tick);
    }

    /// Like [`RepeatingTask::start`], but the first call happens immediately.
    pub fn start_now<F, Fut>(&self, period: Duration, tick: F)
    where
        F: FnMut() -> Fut + Send + 'static,
        Fut: Future<Output = ControlFlow<()>> + Send + 'static,
    {
        self.spawn(Instant::now(), period, tick);
    }

    fn spawn<F, Fut>(&self, first: Instant, period: Duration, mut tick: F)
    where
        F: FnMut() -> Fut + Send + 'static,
        Fut: Future<Output = ControlFlow<()>> + Send + 'static,
    {
        let handle = tokio::spawn(async move {
            let mut interval = time::interval_at(first, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                interval.tick().await;
                if tick().await.is_break() {
                    break;
                }
            }
        });
        if let Some(previous) = self.slot().replace(handle) {
            previous.abort();
        }
    }

    /// Cancel the current run. Safe to call when nothing is running.
    pub fn stop(&self) {
        if let Some(handle) = self.slot().take() {
            handle.abort();
        }
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.slot()
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }

    fn slot(&self) -> MutexGuard<'_, Option<JoinHandle<()>>> {
        self.handle.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Drop for RepeatingTask {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    fn counting(counter: &Arc<AtomicUsize>, limit: usize) -> impl FnMut() -> std::future::Ready<ControlFlow<()>> + Send + 'static {
        let counter = Arc::clone(counter);
        move || {
            let seen = counter.fetch_add(1, Ordering::SeqCst) + 1;
            std::future::ready(if seen >= limit {
                ControlFlow::Break(())
            } else {
                ControlFlow::Continue(())
            })
        }
    }

    #[tokio::test(start_paused = true)]
    async fn first_tick_waits_one_period() {
        let counter = Arc::new(AtomicUsize::new(0));
        let task = RepeatingTask::new();
        task.start(Duration::from_secs(1), counting(&counter, usize::MAX));

        time::sleep(Duration::from_millis(999)).await;
        assert_eq!(counter.load(Ordering::SeqCst), 0);
        time::sleep(Duration::from_millis(2)).await;
        assert_eq!(counter.load(Ordering::SeqCst), 1);
        task.stop();
    }

    #[tokio::test(start_paused = true)]
    async fn start_now_ticks_immediately() {
        let counter = Arc::new(AtomicUsize::new(0));
        let task = RepeatingTask::new();
        task.start_now(Duration::from_secs(3), counting(&counter, usize::MAX));

        time::sleep(Duration::from_millis(1)).await;
        assert_eq!(counter.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn break_ends_the_run() {
        let counter = Arc::new(AtomicUsize::new(0));
        let task = RepeatingTask::new();
        task.start(Duration::from_secs(1), counting(&counter, 3));

        time::sleep(Duration::from_secs(10)).await;
        assert_eq!(counter.load(Ordering::SeqCst), 3);
        assert!(!task.is_running());
    }

    #[tokio::test(start_paused = true)]
    async fn restart_cancels_previous_run() {
        let first = Arc::new(AtomicUsize::new(0));
        let second = Arc::new(AtomicUsize::new(0));
        let task = RepeatingTask::new();
        task.start(Duration::from_secs(1), counting(&first, usize::MAX));
        task.start(Duration::from_secs(1), counting(&second, usize::MAX));

        time::sleep(Duration::from_millis(3500)).await;
        assert_eq!(first.load(Ordering::SeqCst), 0);
        assert_eq!(second.load(Ordering::SeqCst), 3);
        assert!(task.is_running());
    }

    #[tokio::test(start_paused = true)]
    async fn stop_is_idempotent() {
        let counter = Arc::new(AtomicUsize::new(0));
        let task = RepeatingTask::new();
        task.stop();
        task.start(Duration::from_secs(1), counting(&counter, usize::MAX));
        task.stop();
        task.stop();

        time::sleep(Duration::from_secs(5)).await;
        assert_eq!(counter.load(Ordering::SeqCst), 0);
        assert!(!task.is_running());
    }
}
