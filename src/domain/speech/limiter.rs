use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{OwnedSemaphorePermit, Semaphore};

/// Bounded-concurrency gate in front of the synthesis engine.
///
/// At most `max_concurrency` engine calls run at once, shared by single and
/// batch requests. Callers beyond capacity wait up to `queue_wait`; once
/// `max_queue_depth` callers are already waiting, new arrivals are turned
/// away immediately.
#[derive(Clone)]
pub struct CapacityLimiter {
    semaphore: Arc<Semaphore>,
    waiting: Arc<AtomicUsize>,
    max_queue_depth: usize,
    queue_wait: Duration,
}

#[derive(Debug, thiserror::Error)]
pub enum LimiterError {
    #[error("synthesis queue is full ({0} requests waiting)")]
    QueueFull(usize),
    #[error("timed out after {0:?} waiting for a synthesis slot")]
    WaitTimeout(Duration),
}

impl CapacityLimiter {
    pub fn new(max_concurrency: usize, max_queue_depth: usize, queue_wait: Duration) -> Self {
        Self {
            semaphore: Arc::new(Semaphore::new(max_concurrency)),
            waiting: Arc::new(AtomicUsize::new(0)),
            max_queue_depth,
            queue_wait,
        }
    }

    /// Acquire a synthesis slot, waiting up to the configured timeout.
    /// The slot is released when the returned permit is dropped.
    pub async fn acquire(&self) -> Result<OwnedSemaphorePermit, LimiterError> {
        // Fast path: a slot is free right now
        if let Ok(permit) = self.semaphore.clone().try_acquire_owned() {
            return Ok(permit);
        }

        let queued = self.waiting.fetch_add(1, Ordering::SeqCst);
        if queued >= self.max_queue_depth {
            self.waiting.fetch_sub(1, Ordering::SeqCst);
            return Err(LimiterError::QueueFull(queued));
        }
        let _guard = WaitGuard(&self.waiting);

        match tokio::time::timeout(self.queue_wait, self.semaphore.clone().acquire_owned()).await {
            Ok(Ok(permit)) => Ok(permit),
            // The semaphore is never closed while the limiter is alive
            Ok(Err(_)) => Err(LimiterError::WaitTimeout(self.queue_wait)),
            Err(_) => Err(LimiterError::WaitTimeout(self.queue_wait)),
        }
    }

    pub fn available_slots(&self) -> usize {
        self.semaphore.available_permits()
    }

    pub fn waiting(&self) -> usize {
        self.waiting.load(Ordering::SeqCst)
    }
}

/// Decrements the waiting counter even if the caller is cancelled mid-wait
struct WaitGuard<'a>(&'a AtomicUsize);

impl Drop for WaitGuard<'_> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}
