//! Per-credential serial request queue.
//!
//! Shopify's call-limit header is an instant snapshot taken at response
//! time; overlapping physical calls for one credential make the header
//! sequence non-monotonic and useless for estimation. [`RequestQueue`]
//! therefore restricts each credential to exactly one in-flight physical
//! call, trading parallelism for a rate model that stays correct.
//!
//! The queue is a Tokio worker task draining an unbounded channel of boxed
//! jobs in FIFO order. Each enqueued task settles a oneshot with its own
//! result, so a failing task never blocks its successors. There is no
//! priority, no cancellation, and no depth limit.

use std::future::Future;
use std::pin::Pin;

use tokio::sync::{mpsc, oneshot};

use crate::clients::errors::QueueClosed;

type Job = Pin<Box<dyn Future<Output = ()> + Send>>;

/// A FIFO execution channel with a concurrency of exactly one.
///
/// Queues for different credentials are independent; work on one never
/// delays work on another.
///
/// # Runtime
///
/// Constructing a queue spawns its worker task and therefore requires a
/// running Tokio runtime.
///
/// # Example
///
/// ```rust
/// use shopify_admin::clients::RequestQueue;
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let queue = RequestQueue::new();
/// let value = queue.enqueue(async { 21 * 2 }).await.unwrap();
/// assert_eq!(value, 42);
/// # }
/// ```
#[derive(Debug)]
pub struct RequestQueue {
    submit: mpsc::UnboundedSender<Job>,
}

impl RequestQueue {
    /// Creates a queue and spawns its worker task.
    #[must_use]
    pub fn new() -> Self {
        let (submit, mut pending) = mpsc::unbounded_channel::<Job>();

        tokio::spawn(async move {
            // One job at a time; the recv order is the submission order.
            while let Some(job) = pending.recv().await {
                job.await;
            }
        });

        Self { submit }
    }

    /// Submits a task and waits for its result.
    ///
    /// The task's position in the queue is fixed at the moment this method
    /// is first polled. Dropping the returned future does not remove the
    /// task from the queue; it will still run, its result discarded.
    ///
    /// # Errors
    ///
    /// Returns [`QueueClosed`] if the worker task is gone, which only
    /// happens while the runtime is shutting down.
    pub async fn enqueue<T, F>(&self, task: F) -> Result<T, QueueClosed>
    where
        F: Future<Output = T> + Send + 'static,
        T: Send + 'static,
    {
        let (done, result) = oneshot::channel();

        let job: Job = Box::pin(async move {
            // The receiver may have been dropped; the task still ran.
            let _ = done.send(task.await);
        });

        self.submit.send(job).map_err(|_| QueueClosed)?;
        result.await.map_err(|_| QueueClosed)
    }
}

impl Default for RequestQueue {
    fn default() -> Self {
        Self::new()
    }
}
