//! Suspendable snapshot producers.
//!
//! A producer wraps an `async` body that suspends at every
//! `yielder.emit(snapshot).await`. The engine polls the body by hand with a
//! no-op waker, so each [`Producer::resume`] runs the body synchronously up to
//! its next emission and hands that snapshot back.

use std::future::Future;
use std::panic::{self, AssertUnwindSafe};
use std::pin::Pin;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::task::{Context as TaskContext, Poll};

use futures::future::BoxFuture;
use futures::task::noop_waker_ref;
use rand::rngs::StdRng;

use crate::error::ProducerError;
use crate::snapshot::Snapshot;

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Shared handle to an algorithm's logical state.
///
/// Access is closure-scoped so no borrow survives an `.await`.
pub struct StateHandle<T> {
    inner: Arc<Mutex<T>>,
}

impl<T> Clone for StateHandle<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T> StateHandle<T> {
    pub fn new(value: T) -> Self {
        Self {
            inner: Arc::new(Mutex::new(value)),
        }
    }

    pub fn read<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&lock(&self.inner))
    }

    pub fn write<R>(&self, f: impl FnOnce(&mut T) -> R) -> R {
        f(&mut lock(&self.inner))
    }

    /// Replace the whole value, returning the previous one.
    pub fn replace(&self, value: T) -> T {
        std::mem::replace(&mut *lock(&self.inner), value)
    }
}

impl<T: Clone> StateHandle<T> {
    /// Copy of the current value.
    pub fn get(&self) -> T {
        self.read(T::clone)
    }
}

/// What a producer is handed when it is built.
pub struct Context<T> {
    /// Lease on the engine's logical state
    pub state: StateHandle<T>,
    pub rng: StdRng,
}

type Slot<T> = Arc<Mutex<Option<Snapshot<T>>>>;

/// Emits snapshots from inside a producer body.
pub struct Yielder<T> {
    slot: Slot<T>,
}

impl<T> Yielder<T> {
    /// Publish a snapshot. The producer suspends when the returned future
    /// is awaited.
    pub fn emit(&self, snapshot: Snapshot<T>) -> Emit {
        *lock(&self.slot) = Some(snapshot);
        Emit { suspended: false }
    }
}

/// Suspension point returned by [`Yielder::emit`].
#[must_use = "a snapshot only suspends the producer when awaited"]
pub struct Emit {
    suspended: bool,
}

impl Future for Emit {
    type Output = ();

    fn poll(mut self: Pin<&mut Self>, _cx: &mut TaskContext<'_>) -> Poll<()> {
        if self.suspended {
            Poll::Ready(())
        } else {
            self.suspended = true;
            Poll::Pending
        }
    }
}

/// A lazy, finite, non-restartable sequence of snapshots.
pub struct Producer<T> {
    slot: Slot<T>,
    body: Option<BoxFuture<'static, ()>>,
}

impl<T: Send + 'static> Producer<T> {
    /// Build a producer from an async body.
    pub fn new<F, Fut>(body: F) -> Self
    where
        F: FnOnce(Yielder<T>) -> Fut,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let slot: Slot<T> = Arc::new(Mutex::new(None));
        let yielder = Yielder {
            slot: Arc::clone(&slot),
        };
        Self {
            body: Some(Box::pin(body(yielder))),
            slot,
        }
    }

    /// A producer that is already finished.
    pub fn empty() -> Self {
        Self {
            slot: Arc::new(Mutex::new(None)),
            body: None,
        }
    }

    pub fn is_finished(&self) -> bool {
        self.body.is_none()
    }

    /// Run the body to its next emission.
    ///
    /// Returns `Ok(None)` once the body has completed. A snapshot emitted
    /// without being awaited right before completion is still delivered.
    pub fn resume(&mut self) -> Result<Option<Snapshot<T>>, ProducerError> {
        let Some(body) = self.body.as_mut() else {
            return Ok(None);
        };

        let mut cx = TaskContext::from_waker(noop_waker_ref());
        let polled = panic::catch_unwind(AssertUnwindSafe(|| body.as_mut().poll(&mut cx)));

        match polled {
            Ok(Poll::Pending) => match lock(&self.slot).take() {
                Some(snapshot) => Ok(Some(snapshot)),
                None => {
                    self.body = None;
                    Err(ProducerError::Stalled)
                }
            },
            Ok(Poll::Ready(())) => {
                self.body = None;
                Ok(lock(&self.slot).take())
            }
            Err(payload) => {
                self.body = None;
                lock(&self.slot).take();
                Err(ProducerError::Panicked(panic_message(payload.as_ref())))
            }
        }
    }
}

impl<T: Send + 'static> Iterator for Producer<T> {
    type Item = Snapshot<T>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.resume() {
            Ok(snapshot) => snapshot,
            Err(err) => {
                tracing::error!(%err, "producer fault ended iteration");
                None
            }
        }
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
