use std::cell::RefCell;
use std::time::Duration;

use futures::future::{FutureExt, LocalBoxFuture, Shared};
use tokio::time::Instant;

use crate::error::GatewayError;

pub type Fetch<T> = LocalBoxFuture<'static, Result<T, GatewayError>>;
type Pending<T> = Shared<Fetch<T>>;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Expiry {
    /// Only a write replaces the value.
    Never,
    /// Stale once older than the given age, counted from when the
    /// populating response arrived.
    After(Duration),
}

struct Entry<T> {
    value: T,
    populated_at: Instant,
}

/// One lazily populated value plus the fetch currently filling it.
pub struct CacheCell<T> {
    label: &'static str,
    expiry: Expiry,
    entry: RefCell<Option<Entry<T>>>,
    pending: RefCell<Option<Pending<T>>>,
}

impl<T: Clone + PartialEq + 'static> CacheCell<T> {
    pub fn new(label: &'static str, expiry: Expiry) -> Self {
        Self {
            label,
            expiry,
            entry: RefCell::new(None),
            pending: RefCell::new(None),
        }
    }

    fn fresh(&self, now: Instant) -> Option<T> {
        let entry = self.entry.borrow();
        let entry = entry.as_ref()?;
        match self.expiry {
            Expiry::Never => Some(entry.value.clone()),
            Expiry::After(ttl) => {
                if now.duration_since(entry.populated_at) > ttl {
                    tracing::debug!(cache = self.label, "entry expired");
                    None
                } else {
                    Some(entry.value.clone())
                }
            }
        }
    }

    /// The cached value, if present and within its TTL.
    pub fn peek(&self) -> Option<T> {
        self.fresh(Instant::now())
    }

    pub fn is_fetching(&self) -> bool {
        self.pending.borrow().is_some()
    }

    /// Returns the cached value or runs `fetch` at most once for all
    /// callers that arrive while it is in flight.
    pub async fn get<F>(&self, fetch: F) -> Result<T, GatewayError>
    where
        F: FnOnce() -> Fetch<T>,
    {
        if let Some(value) = self.fresh(Instant::now()) {
            tracing::debug!(cache = self.label, "hit");
            return Ok(value);
        }

        let pending = {
            let mut slot = self.pending.borrow_mut();
            match slot.as_ref() {
                Some(p) => {
                    tracing::debug!(cache = self.label, "joining in-flight fetch");
                    p.clone()
                }
                None => {
                    tracing::debug!(cache = self.label, "miss, fetching");
                    let p = fetch().shared();
                    *slot = Some(p.clone());
                    p
                }
            }
        };

        let outcome = pending.clone().await;
        self.settle(&pending, &outcome);
        outcome
    }

    // First waiter to observe the outcome stores it; a write issued while
    // the fetch was in flight has already replaced `pending` and wins.
    fn settle(&self, pending: &Pending<T>, outcome: &Result<T, GatewayError>) {
        {
            let mut slot = self.pending.borrow_mut();
            let current = slot.as_ref().is_some_and(|p| p.ptr_eq(pending));
            if !current {
                return;
            }
            *slot = None;
        }
        match outcome {
            Ok(value) => {
                *self.entry.borrow_mut() = Some(Entry {
                    value: value.clone(),
                    populated_at: Instant::now(),
                });
            }
            Err(err) => {
                tracing::warn!(cache = self.label, error = %err, "fetch failed, cache left empty");
            }
        }
    }

    /// Writes a value known to be current. Returns false when it equals the
    /// cached one, in which case nothing changes.
    pub fn put(&self, value: T) -> bool {
        self.pending.borrow_mut().take();
        let mut entry = self.entry.borrow_mut();
        if entry.as_ref().is_some_and(|e| e.value == value) {
            return false;
        }
        *entry = Some(Entry {
            value,
            populated_at: Instant::now(),
        });
        true
    }
}
