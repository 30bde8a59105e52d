//! Per-website deduplication of concurrent fetches.

use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, Mutex, PoisonError};

use tokio::sync::watch;

type Slot<T> = watch::Receiver<Option<Arc<T>>>;

/// Lets concurrent callers with the same key share one pending computation.
///
/// The first caller for a key runs the computation; callers arriving before it
/// settles wait for its result. Once settled the key is released, so the next
/// caller starts a fresh computation. If the running caller is dropped before
/// finishing, waiters run the computation themselves.
pub struct InFlight<T> {
    pending: Arc<Mutex<HashMap<String, (u64, Slot<T>)>>>,
    next_id: Mutex<u64>,
}

impl<T> Default for InFlight<T> {
    fn default() -> Self {
        Self {
            pending: Arc::new(Mutex::new(HashMap::new())),
            next_id: Mutex::new(0),
        }
    }
}

impl<T: Send + Sync + 'static> InFlight<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of keys with a computation currently running.
    pub fn pending_len(&self) -> usize {
        self.pending
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub async fn run<F, Fut>(&self, key: &str, compute: F) -> Arc<T>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = T>,
    {
        let role = {
            let mut pending = self.pending.lock().unwrap_or_else(PoisonError::into_inner);
            match pending.get(key) {
                Some((_, rx)) => Role::Follower(rx.clone()),
                None => {
                    let (tx, rx) = watch::channel(None);
                    let id = {
                        let mut next = self.next_id.lock().unwrap_or_else(PoisonError::into_inner);
                        *next += 1;
                        *next
                    };
                    pending.insert(key.to_string(), (id, rx));
                    Role::Leader(tx, id)
                }
            }
        };

        let (tx, id) = match role {
            Role::Leader(tx, id) => (tx, id),
            Role::Follower(mut rx) => {
                let shared = match rx.wait_for(Option::is_some).await {
                    Ok(value) => (*value).clone(),
                    Err(_) => None,
                };
                if let Some(shared) = shared {
                    return shared;
                }
                // Leader went away without a result.
                return Arc::new(compute().await);
            }
        };

        let _release = Release {
            pending: Arc::clone(&self.pending),
            key: key.to_string(),
            id,
        };
        let value = Arc::new(compute().await);
        tx.send_replace(Some(Arc::clone(&value)));
        value
    }
}

enum Role<T> {
    Leader(watch::Sender<Option<Arc<T>>>, u64),
    Follower(Slot<T>),
}

/// Removes the leader's entry when it finishes or is dropped mid-flight.
struct Release<T> {
    pending: Arc<Mutex<HashMap<String, (u64, Slot<T>)>>>,
    key: String,
    id: u64,
}

impl<T> Drop for Release<T> {
    fn drop(&mut self) {
        let mut pending = self.pending.lock().unwrap_or_else(PoisonError::into_inner);
        if pending.get(&self.key).is_some_and(|(id, _)| *id == self.id) {
            pending.remove(&self.key);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    use super::*;

    #[tokio::test(start_paused = true)]
    async fn concurrent_callers_share_one_computation() {
        let inflight = InFlight::<usize>::new();
        let calls = AtomicUsize::new(0);
        let calls = &calls;
        let compute = move || async move {
            tokio::time::sleep(Duration::from_millis(100)).await;
            calls.fetch_add(1, Ordering::SeqCst) + 41
        };

        let (a, b) = tokio::join!(inflight.run("site", compute), inflight.run("site", compute));
        assert_eq!(*a, 41);
        assert_eq!(*b, 41);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(inflight.pending_len(), 0);
    }

    #[tokio::test]
    async fn settled_keys_start_fresh() {
        let inflight = InFlight::<usize>::new();
        let calls = AtomicUsize::new(0);
        let calls = &calls;
        let compute = move || async move { calls.fetch_add(1, Ordering::SeqCst) };

        inflight.run("site", compute).await;
        inflight.run("site", compute).await;
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn different_keys_do_not_wait_on_each_other() {
        let inflight = InFlight::<&'static str>::new();
        let (a, b) = tokio::join!(
            inflight.run("a.com", || async {
                tokio::time::sleep(Duration::from_millis(50)).await;
                "a"
            }),
            inflight.run("b.com", || async { "b" }),
        );
        assert_eq!(*a, "a");
        assert_eq!(*b, "b");
    }

    #[tokio::test(start_paused = true)]
    async fn dropped_leader_releases_its_key() {
        let inflight = InFlight::<u8>::new();
        let leader = inflight.run("site", || async {
            tokio::time::sleep(Duration::from_secs(60)).await;
            1
        });
        let timed_out = tokio::time::timeout(Duration::from_millis(10), leader).await;
        assert!(timed_out.is_err());
        assert_eq!(inflight.pending_len(), 0);

        let value = inflight.run("site", || async { 2 }).await;
        assert_eq!(*value, 2);
    }
}
