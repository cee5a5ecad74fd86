// Copyright (c) 2025 - Cowboy AI, Inc.
//! Bounded Parallel Runner
//!
//! Runs submitted futures with a fixed concurrency ceiling and streams each
//! successful result to a single consumer.
//!
//! # Architecture
//!
//! ```text
//! run(unit) ──spawn──> [ Semaphore(n) ] ──Ok(v)──> mpsc ──> read()
//!                            │
//!                          Err(e) ──> stop(e) ──> done() fires
//!                                          └──> err() = first error
//! ```
//!
//! The result stream closes once every submitted unit has finished and
//! [`ParallelRunner::read`] has been called. The done signal fires only when
//! the runner is stopped, either explicitly or by the first failing unit.
//! Once stopped, units that have not started yet never start; units already
//! running are left to finish.

use futures::FutureExt;
use std::any::Any;
use std::future::Future;
use std::panic::AssertUnwindSafe;
use std::sync::{Arc, Mutex, MutexGuard};
use tokio::sync::{mpsc, watch, Semaphore};
use tracing::{debug, warn};

/// A unit of work that panicked instead of returning
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskFailure {
    /// Panic payload, when it was a string
    pub message: String,
}

impl TaskFailure {
    fn from_panic(payload: Box<dyn Any + Send>) -> Self {
        let message = if let Some(s) = payload.downcast_ref::<&str>() {
            (*s).to_string()
        } else if let Some(s) = payload.downcast_ref::<String>() {
            s.clone()
        } else {
            "task panicked".to_string()
        };
        Self { message }
    }
}

struct Shared<E> {
    err: Mutex<Option<E>>,
    stopped: watch::Sender<bool>,
}

impl<E> Shared<E> {
    fn stop(&self, cause: E) {
        {
            let mut err = lock(&self.err);
            if err.is_none() {
                *err = Some(cause);
            }
        }
        self.stopped.send_replace(true);
    }

    fn is_stopped(&self) -> bool {
        *self.stopped.borrow()
    }
}

/// Fan-out/fan-in runner with a concurrency ceiling
pub struct ParallelRunner<T, E> {
    semaphore: Arc<Semaphore>,
    sender: Mutex<Option<mpsc::Sender<T>>>,
    receiver: Mutex<Option<mpsc::Receiver<T>>>,
    shared: Arc<Shared<E>>,
}

impl<T, E> ParallelRunner<T, E>
where
    T: Send + 'static,
    E: From<TaskFailure> + Clone + Send + 'static,
{
    /// Create a runner executing at most `parallelism` units at once
    ///
    /// A `parallelism` of zero is treated as one.
    pub fn new(parallelism: usize) -> Self {
        let parallelism = parallelism.max(1);
        let (sender, receiver) = mpsc::channel(parallelism);
        let (stopped, _) = watch::channel(false);

        Self {
            semaphore: Arc::new(Semaphore::new(parallelism)),
            sender: Mutex::new(Some(sender)),
            receiver: Mutex::new(Some(receiver)),
            shared: Arc::new(Shared {
                err: Mutex::new(None),
                stopped,
            }),
        }
    }

    /// Submit a unit of work
    ///
    /// Must be called from within a tokio runtime. Units submitted after
    /// [`stop`](Self::stop) or after [`read`](Self::read) are dropped.
    pub fn run<F>(&self, unit: F)
    where
        F: Future<Output = Result<T, E>> + Send + 'static,
    {
        if self.shared.is_stopped() {
            debug!("Runner stopped, discarding unit");
            return;
        }
        let Some(sender) = lock(&self.sender).clone() else {
            warn!("Runner results already read, discarding unit");
            return;
        };

        let semaphore = Arc::clone(&self.semaphore);
        let shared = Arc::clone(&self.shared);

        tokio::spawn(async move {
            let mut stopped = shared.stopped.subscribe();
            let permit = tokio::select! {
                permit = semaphore.acquire_owned() => match permit {
                    Ok(permit) => permit,
                    Err(_) => return,
                },
                _ = stopped.wait_for(|stopped| *stopped) => return,
            };
            if shared.is_stopped() {
                return;
            }

            let outcome = AssertUnwindSafe(unit).catch_unwind().await;
            drop(permit);

            match outcome {
                Ok(Ok(value)) => {
                    // The consumer may already be gone after a stop.
                    let _ = sender.send(value).await;
                }
                Ok(Err(err)) => shared.stop(err),
                Err(payload) => shared.stop(TaskFailure::from_panic(payload).into()),
            }
        });
    }

    /// Take the result stream
    ///
    /// The stream yields one item per successful unit and closes when every
    /// submitted unit has finished. Only the first call gets the live stream;
    /// later calls get a closed one.
    pub fn read(&self) -> mpsc::Receiver<T> {
        lock(&self.sender).take();
        match lock(&self.receiver).take() {
            Some(receiver) => receiver,
            None => mpsc::channel(1).1,
        }
    }

    /// Completion signal, set to `true` once the runner is stopped
    pub fn done(&self) -> watch::Receiver<bool> {
        self.shared.stopped.subscribe()
    }

    /// First error recorded, either from a failing unit or a stop cause
    pub fn err(&self) -> Option<E> {
        lock(&self.shared.err).clone()
    }

    /// Request a cooperative halt
    ///
    /// `cause` becomes the aggregate error unless a unit already failed.
    pub fn stop(&self, cause: E) {
        self.shared.stop(cause);
    }

    /// Whether the runner has been stopped
    pub fn is_stopped(&self) -> bool {
        self.shared.is_stopped()
    }
}

fn lock<X>(mutex: &Mutex<X>) -> MutexGuard<'_, X> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}
