use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;

/// Delays a callback until calls stop arriving for `delay`.
///
/// Every call aborts the pending timer (if any) and schedules a new one with
/// the latest arguments, so at most one invocation is ever pending. Dropping
/// the debouncer cancels the pending invocation.
///
/// Timers run on the tokio runtime captured at construction, so `call` works
/// from any thread once the debouncer exists.
pub struct Debouncer<T> {
    delay: Duration,
    runtime: Handle,
    callback: Arc<dyn Fn(T) + Send + Sync>,
    pending: Mutex<Option<JoinHandle<()>>>,
}

pub fn debounce<T, F>(callback: F, delay: Duration) -> Debouncer<T>
where
    T: Send + 'static,
    F: Fn(T) + Send + Sync + 'static,
{
    Debouncer::new(delay, callback)
}

impl<T: Send + 'static> Debouncer<T> {
    /// # Panics
    ///
    /// Panics when called outside a tokio runtime; see [`Debouncer::with_handle`].
    pub fn new<F>(delay: Duration, callback: F) -> Self
    where
        F: Fn(T) + Send + Sync + 'static,
    {
        Self::with_handle(Handle::current(), delay, callback)
    }

    pub fn try_new<F>(delay: Duration, callback: F) -> anyhow::Result<Self>
    where
        F: Fn(T) + Send + Sync + 'static,
    {
        let runtime = Handle::try_current()
            .map_err(|e| anyhow::anyhow!("Debouncer needs a tokio runtime: {}", e))?;
        Ok(Self::with_handle(runtime, delay, callback))
    }

    pub fn with_handle<F>(runtime: Handle, delay: Duration, callback: F) -> Self
    where
        F: Fn(T) + Send + Sync + 'static,
    {
        Self {
            delay,
            runtime,
            callback: Arc::new(callback),
            pending: Mutex::new(None),
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    pub fn call(&self, args: T) {
        let callback = Arc::clone(&self.callback);
        let delay = self.delay;

        let mut pending = self.lock_pending();
        if let Some(handle) = pending.take() {
            if !handle.is_finished() {
                tracing::trace!(?delay, "Debounced call superseded pending invocation");
            }
            handle.abort();
        }
        *pending = Some(self.runtime.spawn(async move {
            tokio::time::sleep(delay).await;
            callback(args);
        }));
    }

    /// Returns true if a scheduled invocation was still waiting.
    pub fn cancel(&self) -> bool {
        match self.lock_pending().take() {
            Some(handle) => {
                let was_waiting = !handle.is_finished();
                handle.abort();
                was_waiting
            }
            None => false,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.lock_pending()
            .as_ref()
            .map_or(false, |handle| !handle.is_finished())
    }

    fn lock_pending(&self) -> MutexGuard<'_, Option<JoinHandle<()>>> {
        self.pending.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl<T> Drop for Debouncer<T> {
    fn drop(&mut self) {
        let pending = self.pending.get_mut().unwrap_or_else(|poisoned| poisoned.into_inner());
        if let Some(handle) = pending.take() {
            handle.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::{sleep, Instant};

    type Log = Arc<Mutex<Vec<(u32, Duration)>>>;

    fn recording_debouncer(delay_ms: u64) -> (Debouncer<u32>, Log) {
        let start = Instant::now();
        let log: Log = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&log);
        let debouncer = debounce(
            move |value: u32| sink.lock().unwrap().push((value, start.elapsed())),
            Duration::from_millis(delay_ms),
        );
        (debouncer, log)
    }

    #[tokio::test(start_paused = true)]
    async fn test_only_last_call_in_window_runs() {
        let (debouncer, log) = recording_debouncer(50);

        debouncer.call(1);
        sleep(Duration::from_millis(10)).await;
        debouncer.call(2);
        sleep(Duration::from_millis(10)).await;
        debouncer.call(3);
        assert!(debouncer.is_pending());

        sleep(Duration::from_millis(100)).await;

        let log = log.lock().unwrap();
        assert_eq!(log.len(), 1);
        assert_eq!(log[0].0, 3);
        assert!(log[0].1 >= Duration::from_millis(70) && log[0].1 <= Duration::from_millis(71));
        assert!(!debouncer.is_pending());
    }

    #[tokio::test(start_paused = true)]
    async fn test_calls_spaced_beyond_delay_all_run() {
        let (debouncer, log) = recording_debouncer(50);

        debouncer.call(1);
        sleep(Duration::from_millis(60)).await;
        debouncer.call(2);
        sleep(Duration::from_millis(60)).await;

        let values: Vec<u32> = log.lock().unwrap().iter().map(|(v, _)| *v).collect();
        assert_eq!(values, vec![1, 2]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_discards_pending_call() {
        let (debouncer, log) = recording_debouncer(50);

        debouncer.call(7);
        assert!(debouncer.cancel());
        assert!(!debouncer.cancel());
        sleep(Duration::from_millis(100)).await;

        assert!(log.lock().unwrap().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_call_from_thread_outside_runtime() {
        let (debouncer, log) = recording_debouncer(50);
        let debouncer = Arc::new(debouncer);

        let caller = Arc::clone(&debouncer);
        std::thread::spawn(move || caller.call(4)).join().unwrap();
        assert!(debouncer.is_pending());
        sleep(Duration::from_millis(100)).await;

        let values: Vec<u32> = log.lock().unwrap().iter().map(|(v, _)| *v).collect();
        assert_eq!(values, vec![4]);
    }

    #[test]
    fn test_try_new_outside_runtime_errors() {
        let result = Debouncer::try_new(Duration::from_millis(50), |_: u32| {});
        let err = result.err().unwrap();
        assert!(err.to_string().contains("needs a tokio runtime"));
    }

    #[test]
    fn test_with_handle_outside_runtime_context() {
        let runtime = tokio::runtime::Builder::new_current_thread().enable_time().build().unwrap();
        let log = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&log);
        let debouncer = Debouncer::with_handle(runtime.handle().clone(), Duration::from_millis(5), move |v: u32| {
            sink.lock().unwrap().push(v)
        });

        debouncer.call(1);
        debouncer.call(2);
        runtime.block_on(async { sleep(Duration::from_millis(50)).await });

        assert_eq!(*log.lock().unwrap(), vec![2]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_drop_cancels_pending_call() {
        let (debouncer, log) = recording_debouncer(50);

        debouncer.call(9);
        drop(debouncer);
        sleep(Duration::from_millis(100)).await;

        assert!(log.lock().unwrap().is_empty());
    }
}
