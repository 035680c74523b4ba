//! Async memoization keyed by a dependency value.
//!
//! # Design
//! `AsyncMemo` remembers the last dependency it saw. Handing it a different
//! one starts a new invocation of the producer; handing it the same one is a
//! no-op. Results land in a shared `MemoState` that callers read through
//! `snapshot()`.
//!
//! Every invocation is stamped with a `Generation`. Superseded invocations are
//! not cancelled, but when they settle their result is dropped: only the
//! latest generation may write `value`/`error` or clear `loading`. This keeps
//! a slow, older fetch from overwriting a newer list.
//!
//! `run` spawns onto tokio. `begin`/`settle` expose the same state machine for
//! callers that drive the future themselves.

use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::task::JoinHandle;
use tracing::debug;

/// Latest known outcome of the memoized computation.
///
/// `value` and `error` are not exclusive: a failure after a success keeps the
/// stale value next to the error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoState<T, E> {
    pub value: Option<T>,
    pub loading: bool,
    pub error: Option<E>,
}

impl<T, E> Default for MemoState<T, E> {
    fn default() -> Self {
        Self {
            value: None,
            loading: false,
            error: None,
        }
    }
}

/// Identifies one producer invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Generation(u64);

struct Slot<T, E> {
    state: MemoState<T, E>,
    latest: u64,
    runs: u64,
}

pub struct AsyncMemo<D, T, E> {
    deps: Option<D>,
    slot: Arc<Mutex<Slot<T, E>>>,
}

impl<D, T, E> Default for AsyncMemo<D, T, E> {
    fn default() -> Self {
        Self {
            deps: None,
            slot: Arc::new(Mutex::new(Slot {
                state: MemoState::default(),
                latest: 0,
                runs: 0,
            })),
        }
    }
}

impl<D: PartialEq, T, E> AsyncMemo<D, T, E> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `deps` and, if they changed, open a new generation with
    /// `loading` set. Returns `None` when `deps` equal the previous ones.
    pub fn begin(&mut self, deps: D) -> Option<Generation> {
        if self.deps.as_ref() == Some(&deps) {
            return None;
        }
        self.deps = Some(deps);

        let mut slot = lock(&self.slot);
        slot.latest += 1;
        slot.runs += 1;
        slot.state.loading = true;
        debug!(event = "memo.run.started", generation = slot.latest);
        Some(Generation(slot.latest))
    }

    /// Apply the outcome of `generation`. Returns `false` if a newer
    /// generation has started since, in which case nothing changes.
    pub fn settle(&self, generation: Generation, result: Result<T, E>) -> bool {
        settle(&self.slot, generation, result)
    }

    /// Invoke `producer` if `deps` changed and settle its result on a
    /// spawned task. The handle resolves to whether the result was applied.
    ///
    /// Must be called from within a tokio runtime.
    pub fn run<F, Fut>(&mut self, deps: D, producer: F) -> Option<JoinHandle<bool>>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>> + Send + 'static,
        T: Send + 'static,
        E: Send + 'static,
    {
        let generation = self.begin(deps)?;
        let future = producer();
        let slot = Arc::clone(&self.slot);
        Some(tokio::spawn(async move {
            let result = future.await;
            settle(&slot, generation, result)
        }))
    }

    pub fn snapshot(&self) -> MemoState<T, E>
    where
        T: Clone,
        E: Clone,
    {
        lock(&self.slot).state.clone()
    }

    pub fn is_loading(&self) -> bool {
        lock(&self.slot).state.loading
    }

    /// Number of producer invocations so far.
    pub fn runs(&self) -> u64 {
        lock(&self.slot).runs
    }
}

fn settle<T, E>(slot: &Mutex<Slot<T, E>>, generation: Generation, result: Result<T, E>) -> bool {
    let mut slot = lock(slot);
    if generation.0 != slot.latest {
        debug!(
            event = "memo.run.discarded",
            generation = generation.0,
            latest = slot.latest,
        );
        return false;
    }

    let ok = result.is_ok();
    match result {
        Ok(value) => {
            slot.state.value = Some(value);
            slot.state.error = None;
        }
        Err(error) => slot.state.error = Some(error),
    }
    slot.state.loading = false;
    debug!(event = "memo.run.settled", generation = generation.0, ok = ok);
    true
}

// Slot mutations are plain field stores, so a poisoned slot is still consistent.
fn lock<T, E>(slot: &Mutex<Slot<T, E>>) -> MutexGuard<'_, Slot<T, E>> {
    slot.lock().unwrap_or_else(PoisonError::into_inner)
}
