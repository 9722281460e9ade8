//! Correlates outstanding confirmed requests with their replies.
//!
//! Every pending invoke ID lives in an index keyed by ID, which is the
//! authoritative record, and in a queue ordered by expiry. Resolving a
//! request only touches the index; the queue is reconciled on the next
//! sweep. A single background task runs the sweeps, sleeping until the
//! earliest expiry but never less than the configured minimum interval.

use crate::config::RequestManagerConfig;
use crate::ClientError;
use std::collections::{HashMap, VecDeque};
use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex, MutexGuard, Weak};
use std::task::{Context, Poll};
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tokio::time::Instant;

type Outcome<T> = Result<T, ClientError>;

struct Entry<T> {
    generation: u64,
    tx: oneshot::Sender<Outcome<T>>,
}

struct State<T> {
    entries: HashMap<u8, Entry<T>>,
    /// `(invoke_id, generation, expires_at)`, oldest first. May hold entries
    /// that were already resolved or superseded.
    queue: VecDeque<(u8, u64, Instant)>,
    generation: u64,
    sweep: Option<JoinHandle<()>>,
    /// Bumped per scheduled sweep. A task that lost its slot while blocked
    /// on the lock sees a newer value and exits.
    sweep_epoch: u64,
}

struct Shared<T> {
    config: RequestManagerConfig,
    state: Mutex<State<T>>,
}

impl<T> Drop for Shared<T> {
    fn drop(&mut self) {
        let state = self.state.get_mut().unwrap_or_else(|e| e.into_inner());
        if let Some(sweep) = state.sweep.take() {
            sweep.abort();
        }
    }
}

/// Tracks pending invoke IDs. Clones share the same state.
///
/// [`RequestManager::add`] spawns the sweep task, so it has to be called
/// from within a Tokio runtime.
pub struct RequestManager<T> {
    shared: Arc<Shared<T>>,
}

impl<T> Clone for RequestManager<T> {
    fn clone(&self) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
        }
    }
}

impl<T: Send + 'static> Default for RequestManager<T> {
    fn default() -> Self {
        Self::new(RequestManagerConfig::default())
    }
}

impl<T: Send + 'static> RequestManager<T> {
    pub fn new(config: RequestManagerConfig) -> Self {
        Self {
            shared: Arc::new(Shared {
                config,
                state: Mutex::new(State {
                    entries: HashMap::new(),
                    queue: VecDeque::new(),
                    generation: 0,
                    sweep: None,
                    sweep_epoch: 0,
                }),
            }),
        }
    }

    pub fn config(&self) -> RequestManagerConfig {
        self.shared.config
    }

    /// Registers `invoke_id` and returns the future of its reply.
    ///
    /// Adding an ID that is still pending supersedes the old request, whose
    /// future resolves to [`ClientError::Cancelled`].
    pub fn add(&self, invoke_id: u8) -> PendingRequest<T> {
        let (tx, rx) = oneshot::channel();
        let now = Instant::now();
        let expires_at = now + self.shared.config.timeout;

        let mut state = self.lock();
        state.generation += 1;
        let generation = state.generation;
        if let Some(previous) = state.entries.insert(invoke_id, Entry { generation, tx }) {
            log::debug!("invoke id {invoke_id} reused while pending, cancelling the older request");
            let _ = previous.tx.send(Err(ClientError::Cancelled { invoke_id }));
        }
        state.queue.push_back((invoke_id, generation, expires_at));
        log::debug!(
            "invoke id {invoke_id} added, timeout {:?}",
            self.shared.config.timeout
        );
        if state.sweep.is_none() {
            self.schedule_sweep(&mut state, now);
        }

        PendingRequest { invoke_id, rx }
    }

    /// Completes the request for `invoke_id`. Returns `false` when nothing is
    /// pending under that ID, for example because it already expired.
    pub fn resolve(&self, invoke_id: u8, outcome: Outcome<T>) -> bool {
        let entry = self.lock().entries.remove(&invoke_id);
        match entry {
            Some(entry) => {
                log::trace!("invoke id {invoke_id} found");
                let _ = entry.tx.send(outcome);
                true
            }
            None => {
                log::debug!("invoke id {invoke_id} not found -> drop package");
                false
            }
        }
    }

    /// Expires every request past its deadline, or every pending request
    /// when `force` is set. A non-forced sweep keeps the timer running while
    /// requests remain.
    pub fn clear(&self, force: bool) {
        let mut state = self.lock();
        if let Some(sweep) = state.sweep.take() {
            sweep.abort();
        }
        state.sweep_epoch += 1;
        self.sweep(&mut state, force);
    }

    pub fn pending_len(&self) -> usize {
        self.lock().entries.len()
    }

    pub fn is_pending(&self, invoke_id: u8) -> bool {
        self.lock().entries.contains_key(&invoke_id)
    }

    fn lock(&self) -> MutexGuard<'_, State<T>> {
        // Nothing panics while holding the lock, but a poisoned state is
        // still consistent.
        self.shared
            .state
            .lock()
            .unwrap_or_else(|e| e.into_inner())
    }

    fn sweep(&self, state: &mut State<T>, force: bool) {
        let now = Instant::now();
        let before = state.queue.len();
        let mut expired = 0usize;

        while let Some(&(invoke_id, generation, expires_at)) = state.queue.front() {
            let live = state
                .entries
                .get(&invoke_id)
                .is_some_and(|e| e.generation == generation);
            if live && !force && expires_at > now {
                break;
            }
            state.queue.pop_front();
            if !live {
                continue;
            }
            if let Some(entry) = state.entries.remove(&invoke_id) {
                log::warn!("invoke id {invoke_id} timed out");
                let _ = entry.tx.send(Err(ClientError::Timeout { invoke_id }));
                expired += 1;
            }
        }

        log::debug!(
            "sweep removed {} entries ({expired} expired), {} pending",
            before - state.queue.len(),
            state.entries.len()
        );
        if !force {
            self.schedule_sweep(state, now);
        }
    }

    fn schedule_sweep(&self, state: &mut State<T>, now: Instant) {
        let Some(&(_, _, earliest)) = state.queue.front() else {
            return;
        };
        let delay = earliest
            .saturating_duration_since(now)
            .max(self.shared.config.min_sweep_interval);
        log::trace!("next sweep in {delay:?}");

        state.sweep_epoch += 1;
        let epoch = state.sweep_epoch;
        let shared: Weak<Shared<T>> = Arc::downgrade(&self.shared);
        state.sweep = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let Some(shared) = shared.upgrade() else {
                return;
            };
            let manager = RequestManager { shared };
            let mut state = manager.lock();
            if state.sweep_epoch != epoch {
                return;
            }
            state.sweep = None;
            manager.sweep(&mut state, false);
        }));
    }
}

/// Reply future returned by [`RequestManager::add`].
///
/// Resolves to [`ClientError::Cancelled`] if the manager goes away first.
#[derive(Debug)]
pub struct PendingRequest<T> {
    invoke_id: u8,
    rx: oneshot::Receiver<Outcome<T>>,
}

impl<T> PendingRequest<T> {
    pub fn invoke_id(&self) -> u8 {
        self.invoke_id
    }
}

impl<T> Future for PendingRequest<T> {
    type Output = Outcome<T>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let invoke_id = self.invoke_id;
        Pin::new(&mut self.rx)
            .poll(cx)
            .map(|r| r.unwrap_or(Err(ClientError::Cancelled { invoke_id })))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn manager() -> RequestManager<Vec<u8>> {
        let _ = env_logger::builder().is_test(true).try_init();
        RequestManager::new(RequestManagerConfig::default().with_timeout(Duration::from_secs(1)))
    }

    #[tokio::test(start_paused = true)]
    async fn resolve_fulfils_the_future() {
        let m = manager();
        let pending = m.add(1);
        assert!(m.is_pending(1));
        assert!(m.resolve(1, Ok(vec![0xAA])));
        assert_eq!(pending.await, Ok(vec![0xAA]));
        assert_eq!(m.pending_len(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn resolve_can_reject() {
        let m = manager();
        let pending = m.add(2);
        assert!(m.resolve(2, Err(ClientError::RemoteReject { reason: 9 })));
        assert_eq!(pending.await, Err(ClientError::RemoteReject { reason: 9 }));
    }

    #[tokio::test(start_paused = true)]
    async fn unresolved_request_times_out() {
        let m = manager();
        let pending = m.add(3);
        assert_eq!(pending.await, Err(ClientError::Timeout { invoke_id: 3 }));
        assert!(!m.is_pending(3));
        assert!(!m.resolve(3, Ok(vec![])));
    }

    #[tokio::test(start_paused = true)]
    async fn resolve_after_expiry_is_not_matched() {
        let m = manager();
        let pending = m.add(4);
        tokio::time::sleep(Duration::from_millis(1100)).await;
        assert!(!m.resolve(4, Ok(vec![1])));
        assert_eq!(pending.await, Err(ClientError::Timeout { invoke_id: 4 }));
    }

    #[tokio::test(start_paused = true)]
    async fn early_resolution_leaves_nothing_for_the_sweep() {
        let m = manager();
        let first = m.add(5);
        tokio::time::sleep(Duration::from_millis(500)).await;
        let second = m.add(6);
        assert!(m.resolve(5, Ok(vec![5])));
        assert_eq!(first.await, Ok(vec![5]));

        tokio::time::sleep(Duration::from_millis(600)).await;
        assert!(m.is_pending(6));
        assert_eq!(second.await, Err(ClientError::Timeout { invoke_id: 6 }));
    }

    #[tokio::test(start_paused = true)]
    async fn unknown_id_is_not_matched() {
        let m = manager();
        assert!(!m.resolve(42, Ok(vec![])));
    }

    #[tokio::test(start_paused = true)]
    async fn forced_clear_expires_everything_now() {
        let m = manager();
        let a = m.add(7);
        let b = m.add(8);
        m.clear(true);
        assert_eq!(m.pending_len(), 0);
        assert_eq!(a.await, Err(ClientError::Timeout { invoke_id: 7 }));
        assert_eq!(b.await, Err(ClientError::Timeout { invoke_id: 8 }));
    }

    #[tokio::test(start_paused = true)]
    async fn non_forced_clear_keeps_fresh_requests() {
        let m = manager();
        let pending = m.add(9);
        m.clear(false);
        assert!(m.is_pending(9));
        assert_eq!(pending.await, Err(ClientError::Timeout { invoke_id: 9 }));
    }

    #[tokio::test(start_paused = true)]
    async fn reused_id_supersedes_without_early_expiry() {
        let m = manager();
        let old = m.add(10);
        tokio::time::sleep(Duration::from_millis(800)).await;
        let new = m.add(10);
        assert_eq!(old.await, Err(ClientError::Cancelled { invoke_id: 10 }));

        // The first registration's deadline passes; the new one must survive it.
        tokio::time::sleep(Duration::from_millis(400)).await;
        assert!(m.is_pending(10));
        assert!(m.resolve(10, Ok(vec![10])));
        assert_eq!(new.await, Ok(vec![10]));
    }

    #[tokio::test(start_paused = true)]
    async fn sweep_interval_has_a_floor() {
        let m: RequestManager<()> = RequestManager::new(
            RequestManagerConfig::default()
                .with_timeout(Duration::from_millis(10))
                .with_min_sweep_interval(Duration::from_millis(100)),
        );
        let pending = m.add(11);
        tokio::time::sleep(Duration::from_millis(50)).await;
        assert!(m.is_pending(11));
        tokio::time::sleep(Duration::from_millis(60)).await;
        assert!(!m.is_pending(11));
        assert_eq!(pending.await, Err(ClientError::Timeout { invoke_id: 11 }));
    }

    #[tokio::test(start_paused = true)]
    async fn dropping_the_manager_cancels_pending_requests() {
        let m = manager();
        let pending = m.add(12);
        let clone = m.clone();
        drop(m);
        assert!(clone.is_pending(12));
        drop(clone);
        assert_eq!(pending.await, Err(ClientError::Cancelled { invoke_id: 12 }));
    }
}
