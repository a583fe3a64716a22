//! Call-recording mock functions.
//!
//! A [`MockFn`] records the arguments of every call plus a global sequence
//! number, so tests can check both what a callback received and the order in
//! which several callbacks ran.
//!
//! ```
//! use rangekit_test::MockFn;
//!
//! let before = MockFn::<(f64, usize)>::new();
//! let change = MockFn::<(f64, usize)>::new();
//! before.record((0.0, 0));
//! change.record((1.0, 0));
//! assert!(before.invocation_order()[0] < change.invocation_order()[0]);
//! ```

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

static INVOCATION: AtomicU64 = AtomicU64::new(1);

struct Recorded<A> {
    calls: Vec<A>,
    order: Vec<u64>,
}

/// Records every call made through it. Clones share the same record.
pub struct MockFn<A> {
    inner: Arc<Mutex<Recorded<A>>>,
}

impl<A> Clone for MockFn<A> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<A> Default for MockFn<A> {
    fn default() -> Self {
        Self {
            inner: Arc::new(Mutex::new(Recorded {
                calls: Vec::new(),
                order: Vec::new(),
            })),
        }
    }
}

impl<A> MockFn<A> {
    /// Create a mock with no calls.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a call.
    pub fn record(&self, args: A) {
        let seq = INVOCATION.fetch_add(1, Ordering::SeqCst);
        let mut recorded = self.lock();
        recorded.calls.push(args);
        recorded.order.push(seq);
    }

    /// Number of calls.
    #[must_use]
    pub fn call_count(&self) -> usize {
        self.lock().calls.len()
    }

    /// Whether the mock was called at all.
    #[must_use]
    pub fn was_called(&self) -> bool {
        self.call_count() > 0
    }

    /// Global sequence numbers of each call, comparable across mocks.
    #[must_use]
    pub fn invocation_order(&self) -> Vec<u64> {
        self.lock().order.clone()
    }

    /// Forget all calls.
    pub fn clear(&self) {
        let mut recorded = self.lock();
        recorded.calls.clear();
        recorded.order.clear();
    }

    fn lock(&self) -> MutexGuard<'_, Recorded<A>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<A: Clone> MockFn<A> {
    /// Arguments of every call, in order.
    #[must_use]
    pub fn calls(&self) -> Vec<A> {
        self.lock().calls.clone()
    }

    /// Arguments of the most recent call.
    #[must_use]
    pub fn last_call(&self) -> Option<A> {
        self.lock().calls.last().cloned()
    }
}

impl<T, U> MockFn<(T, U)>
where
    T: Clone + Send + 'static,
    U: Send + 'static,
{
    /// A `(&T, U)` callback that records owned copies of its arguments.
    pub fn recorder(&self) -> impl FnMut(&T, U) + Send + Sync + 'static {
        let mock = self.clone();
        move |a: &T, b: U| mock.record((a.clone(), b))
    }
}

impl<A: fmt::Debug> fmt::Debug for MockFn<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let recorded = self.lock();
        f.debug_struct("MockFn")
            .field("calls", &recorded.calls)
            .field("order", &recorded.order)
            .finish()
    }
}
