//! Single-flight deduplication
//!
//! The token-refresh endpoint rotates the refresh token on every call, so two
//! overlapping refresh attempts invalidate each other. Concurrent callers
//! must collapse onto one underlying operation and observe its single
//! outcome.

use futures::FutureExt;
use futures::future::{BoxFuture, Shared};
use std::future::Future;
use std::sync::Mutex;

type Flight<T> = Shared<BoxFuture<'static, T>>;

struct Slot<T: Clone> {
    generation: u64,
    flight: Option<Flight<T>>,
}

/// A slot holding at most one pending operation.
///
/// Callers that find a pending flight attach to it instead of starting their
/// own; the caller that started the flight clears the slot once it settles,
/// success or failure, so the next invocation starts a fresh cycle.
pub struct SingleFlight<T: Clone> {
    slot: Mutex<Slot<T>>,
}

impl<T> SingleFlight<T>
where
    T: Clone + Send + Sync + 'static,
{
    pub fn new() -> Self {
        Self {
            slot: Mutex::new(Slot {
                generation: 0,
                flight: None,
            }),
        }
    }

    /// Join the pending flight, or start a new one by calling `operation`.
    ///
    /// `operation` is invoked only when no flight is pending; otherwise it is
    /// dropped unused and the pending flight's value is returned.
    pub async fn run<F, Fut>(&self, operation: F) -> T
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = T> + Send + 'static,
    {
        let (flight, started) = {
            let mut slot = self.slot.lock().expect("single-flight slot poisoned");
            if let Some(flight) = &slot.flight {
                (flight.clone(), None)
            } else {
                let flight = operation().boxed().shared();
                slot.flight = Some(flight.clone());
                (flight, Some(slot.generation))
            }
        };

        let value = flight.await;

        if let Some(generation) = started {
            let mut slot = self.slot.lock().expect("single-flight slot poisoned");
            // The slot is only ever cleared by the flight that filled it.
            if slot.generation == generation {
                slot.flight = None;
                slot.generation += 1;
            }
        }

        value
    }
}

impl<T> Default for SingleFlight<T>
where
    T: Clone + Send + Sync + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}
