//! # Taskpage Runtime
//!
//! Runtime implementation for the taskpage architecture.
//!
//! This crate provides the [`Store`]: the imperative shell that owns a
//! feature's state, runs its reducer, executes the effects the reducer
//! returns, and notifies observers when state changes.
//!
//! ## Observation contract
//!
//! The rendering collaborator is external to this crate. It consumes the
//! store through two surfaces:
//!
//! - [`Store::state`] - closure-scoped snapshot reads
//! - [`Store::subscribe`] - a watch channel that yields a fresh snapshot on
//!   every *accepted* mutation; a reduced action that leaves state
//!   unchanged (rejected submit, unknown id) does not signal
//!
//! ## Teardown
//!
//! [`Store::shutdown`] sets a flag that rejects all further actions and
//! waits for in-flight effects. An async effect settling after shutdown
//! has its feedback action dropped instead of mutating state that nothing
//! observes anymore.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;

use taskpage_core::{Effect, Reducer};
use thiserror::Error;
use tokio::sync::{RwLock, watch};

/// Errors from store operations
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    /// The store is shutting down and rejects new actions
    #[error("store is shutting down, action rejected")]
    ShutdownInProgress,

    /// Shutdown timed out with effects still running
    #[error("shutdown timeout: {0} effects still running")]
    ShutdownTimeout(usize),
}

/// Handle for waiting on the effects started by one `send`
///
/// `send()` returns after *starting* effect execution, not after
/// completion. Hold the handle and [`EffectHandle::wait`] to observe the
/// state produced by effect feedback (the feed's fetch settlement, for
/// example).
#[derive(Debug)]
pub struct EffectHandle {
    remaining: Arc<AtomicUsize>,
    completion: watch::Receiver<()>,
}

impl EffectHandle {
    fn new() -> (Self, EffectTracking) {
        let remaining = Arc::new(AtomicUsize::new(0));
        let (notifier, completion) = watch::channel(());

        let handle = Self {
            remaining: Arc::clone(&remaining),
            completion,
        };
        let tracking = EffectTracking {
            remaining,
            notifier: Arc::new(notifier),
        };

        (handle, tracking)
    }

    /// Wait until every effect started by the originating `send` has
    /// finished, including the dispatch of its feedback action.
    pub async fn wait(&mut self) {
        while self.remaining.load(Ordering::Acquire) > 0 {
            // Channel closes when the last tracking guard drops; either
            // signal means progress, so re-check the counter.
            if self.completion.changed().await.is_err() {
                break;
            }
        }
    }

    /// Wait for effect completion with a timeout
    ///
    /// # Errors
    ///
    /// Returns `Err(())` if the timeout expires with effects still running.
    pub async fn wait_with_timeout(&mut self, timeout: Duration) -> Result<(), ()> {
        tokio::time::timeout(timeout, self.wait())
            .await
            .map_err(|_| ())
    }
}

/// Shared tracking state handed to each spawned effect task
#[derive(Clone)]
struct EffectTracking {
    remaining: Arc<AtomicUsize>,
    notifier: Arc<watch::Sender<()>>,
}

impl EffectTracking {
    fn increment(&self) {
        self.remaining.fetch_add(1, Ordering::AcqRel);
    }
}

/// Decrements the tracking counter on drop, so the counter stays correct
/// even if the effect task panics.
struct DecrementGuard(EffectTracking);

impl Drop for DecrementGuard {
    fn drop(&mut self) {
        self.0.remaining.fetch_sub(1, Ordering::AcqRel);
        let _ = self.0.notifier.send(());
    }
}

/// Decrements the store-wide pending-effect counter on drop.
struct PendingGuard(Arc<AtomicUsize>);

impl Drop for PendingGuard {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

/// The Store - owns state and processes actions through a reducer
///
/// # Type Parameters
///
/// - `S`: State type
/// - `A`: Action type
/// - `E`: Environment type
/// - `R`: Reducer implementation
///
/// # Example
///
/// ```ignore
/// let store = Store::new(TodoState::new(), TodoReducer::new(), env);
///
/// store.send(TodoAction::SetPendingText { text: "Buy milk".into() }).await?;
/// store.send(TodoAction::Submit).await?;
///
/// let count = store.state(|s| s.items.len()).await;
/// ```
pub struct Store<S, A, E, R>
where
    R: Reducer<State = S, Action = A, Environment = E>,
{
    state: Arc<RwLock<S>>,
    reducer: R,
    environment: E,
    shutdown: Arc<AtomicBool>,
    pending_effects: Arc<AtomicUsize>,
    /// State snapshot channel for observers.
    ///
    /// Updated only when a reduced action actually changed state, so the
    /// rendering collaborator re-renders exactly once per accepted
    /// mutation and never for silent no-ops.
    changes: watch::Sender<S>,
}

impl<S, A, E, R> Store<S, A, E, R>
where
    R: Reducer<State = S, Action = A, Environment = E> + Clone + Send + Sync + 'static,
    A: Send + 'static,
    S: Clone + PartialEq + Send + Sync + 'static,
    E: Clone + Send + Sync + 'static,
{
    /// Create a new store with initial state, reducer, and environment
    #[must_use]
    pub fn new(initial_state: S, reducer: R, environment: E) -> Self {
        let (changes, _) = watch::channel(initial_state.clone());

        Self {
            state: Arc::new(RwLock::new(initial_state)),
            reducer,
            environment,
            shutdown: Arc::new(AtomicBool::new(false)),
            pending_effects: Arc::new(AtomicUsize::new(0)),
            changes,
        }
    }

    /// Send an action to the store
    ///
    /// This is the primary way to interact with the store:
    /// 1. Acquires the write lock on state
    /// 2. Calls the reducer with (state, action, environment)
    /// 3. Notifies observers if the state changed
    /// 4. Executes returned effects asynchronously
    ///
    /// Effects may produce a feedback action, which is sent back through
    /// the same path. `send()` returns after starting effect execution;
    /// use the returned [`EffectHandle`] to wait for completion.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ShutdownInProgress`] if the store is shutting
    /// down. This is also how a fetch settling after page teardown is
    /// discarded.
    #[tracing::instrument(skip(self, action), name = "store_send")]
    pub async fn send(&self, action: A) -> Result<EffectHandle, StoreError> {
        if self.shutdown.load(Ordering::Acquire) {
            tracing::debug!("rejected action: store is shutting down");
            metrics::counter!("store.actions.rejected").increment(1);
            return Err(StoreError::ShutdownInProgress);
        }

        metrics::counter!("store.actions.total").increment(1);

        let (handle, tracking) = EffectHandle::new();

        let effects = {
            let mut state = self.state.write().await;
            let before = state.clone();

            let span = tracing::debug_span!("reducer_execution");
            let _enter = span.enter();
            let effects = self.reducer.reduce(&mut state, action, &self.environment);

            if *state != before {
                // Accepted mutation: publish the new snapshot.
                self.changes.send_replace(state.clone());
                tracing::trace!("state changed, observers notified");
            } else {
                tracing::trace!("no state change, observers not notified");
            }

            effects
        };

        for effect in effects {
            self.execute_effect(effect, tracking.clone());
        }

        Ok(handle)
    }

    /// Read current state via a closure
    ///
    /// Access state through a closure so the read lock is released
    /// promptly:
    ///
    /// ```ignore
    /// let todo_count = store.state(|s| s.items.len()).await;
    /// ```
    pub async fn state<F, T>(&self, f: F) -> T
    where
        F: FnOnce(&S) -> T,
    {
        let state = self.state.read().await;
        f(&state)
    }

    /// Subscribe to state snapshots
    ///
    /// The receiver holds the latest snapshot and is marked changed on
    /// every accepted mutation. Silent no-ops do not signal.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<S> {
        self.changes.subscribe()
    }

    /// Initiate graceful shutdown of the store
    ///
    /// Sets the shutdown flag (rejecting new actions, including effect
    /// feedback) and waits for pending effects to finish.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ShutdownTimeout`] if the timeout expires
    /// before all pending effects complete.
    pub async fn shutdown(&self, timeout: Duration) -> Result<(), StoreError> {
        tracing::info!("initiating graceful shutdown");
        metrics::counter!("store.shutdown.initiated").increment(1);

        self.shutdown.store(true, Ordering::Release);

        let start = std::time::Instant::now();
        let poll_interval = Duration::from_millis(10);

        loop {
            let pending = self.pending_effects.load(Ordering::Acquire);

            if pending == 0 {
                tracing::info!("all effects completed, shutdown successful");
                return Ok(());
            }

            if start.elapsed() >= timeout {
                tracing::error!(pending_effects = pending, "shutdown timeout");
                return Err(StoreError::ShutdownTimeout(pending));
            }

            tokio::time::sleep(poll_interval).await;
        }
    }

    /// Execute an effect, tracking completion for the originating `send`
    fn execute_effect(&self, effect: Effect<A>, tracking: EffectTracking) {
        match effect {
            Effect::None => {
                tracing::trace!("executing Effect::None (no-op)");
            }
            Effect::Future(fut) => {
                tracing::trace!("executing Effect::Future");
                metrics::counter!("store.effects.executed").increment(1);
                tracking.increment();

                self.pending_effects.fetch_add(1, Ordering::SeqCst);
                let pending_guard = PendingGuard(Arc::clone(&self.pending_effects));

                let store = self.clone();

                tokio::spawn(async move {
                    let _guard = DecrementGuard(tracking);
                    let _pending_guard = pending_guard;

                    if let Some(action) = fut.await {
                        // Feedback goes through send() so shutdown is
                        // honored: a settlement after teardown is dropped.
                        match store.send(action).await {
                            Ok(_) => {
                                tracing::trace!("effect feedback dispatched");
                            }
                            Err(StoreError::ShutdownInProgress) => {
                                tracing::debug!("effect settled after shutdown, feedback dropped");
                            }
                            Err(error) => {
                                tracing::warn!(%error, "effect feedback rejected");
                            }
                        }
                    } else {
                        tracing::trace!("effect completed with no action");
                    }
                });
            }
        }
    }
}

impl<S, A, E, R> Clone for Store<S, A, E, R>
where
    R: Reducer<State = S, Action = A, Environment = E> + Clone,
    E: Clone,
{
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
            reducer: self.reducer.clone(),
            environment: self.environment.clone(),
            shutdown: Arc::clone(&self.shutdown),
            pending_effects: Arc::clone(&self.pending_effects),
            changes: self.changes.clone(),
        }
    }
}
