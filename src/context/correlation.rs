//! Call-scoped correlation state.
//!
//! This module provides [`CorrelationContext`], the key/value state that carries a
//! request identifier through a logical call chain. Every thread owns its own
//! context, and async tasks can be given an explicit one for the lifetime of a
//! future, so concurrent requests never observe each other's identifiers.
//!
//! # Examples
//!
//! ```
//! use logprint::context::CorrelationContext;
//!
//! let ctx = CorrelationContext::new();
//! let _guard = ctx.clone().enter();
//!
//! CorrelationContext::current().set_request_id("req-42");
//! assert_eq!(ctx.request_id().as_deref(), Some("req-42"));
//! ```

use std::cell::RefCell;
use std::collections::HashMap;
use std::future::Future;
use std::marker::PhantomData;
use std::sync::{Arc, Mutex, MutexGuard};
use uuid::Uuid;

/// Key under which the request identifier is stored.
pub const REQ_ID: &str = "reqId";

thread_local! {
    static THREAD_CONTEXT: RefCell<CorrelationContext> = RefCell::new(CorrelationContext::new());
}

tokio::task_local! {
    static TASK_CONTEXT: CorrelationContext;
}

/// Shared, call-scoped key/value map.
///
/// Clones share the same underlying map, so a value written by a nested call is
/// visible to every holder of the same context.
#[derive(Debug, Clone, Default)]
pub struct CorrelationContext {
    values: Arc<Mutex<HashMap<String, String>>>,
}

impl CorrelationContext {
    /// Create an empty context.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a context seeded with a freshly generated request id.
    pub fn with_generated_request_id() -> Self {
        let ctx = Self::new();
        ctx.set_request_id(Uuid::new_v4().to_string());
        ctx
    }

    /// The context in effect for the caller.
    ///
    /// Inside [`CorrelationContext::scope`] or [`CorrelationContext::sync_scope`] this is
    /// the scoped context; otherwise it is the current thread's context.
    pub fn current() -> Self {
        TASK_CONTEXT
            .try_with(|ctx| ctx.clone())
            .unwrap_or_else(|_| THREAD_CONTEXT.with(|ctx| ctx.borrow().clone()))
    }

    /// Whether a task-scoped context is in effect for the caller.
    pub fn is_scoped() -> bool {
        TASK_CONTEXT.try_with(|_| ()).is_ok()
    }

    /// A new, independent context holding a copy of this one's values.
    pub fn fork(&self) -> Self {
        Self {
            values: Arc::new(Mutex::new(self.snapshot())),
        }
    }

    /// Run a future with this context as the current one.
    pub async fn scope<F: Future>(self, future: F) -> F::Output {
        TASK_CONTEXT.scope(self, future).await
    }

    /// Run a closure with this context as the current one.
    pub fn sync_scope<R>(self, f: impl FnOnce() -> R) -> R {
        TASK_CONTEXT.sync_scope(self, f)
    }

    /// Install this context on the current thread until the guard is dropped.
    pub fn enter(self) -> ContextGuard {
        let previous = THREAD_CONTEXT.with(|ctx| std::mem::replace(&mut *ctx.borrow_mut(), self));
        ContextGuard {
            previous: Some(previous),
            _not_send: PhantomData,
        }
    }

    pub fn get(&self, key: &str) -> Option<String> {
        self.lock().get(key).cloned()
    }

    pub fn insert(&self, key: impl Into<String>, value: impl Into<String>) {
        self.lock().insert(key.into(), value.into());
    }

    pub fn remove(&self, key: &str) -> Option<String> {
        self.lock().remove(key)
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    pub fn request_id(&self) -> Option<String> {
        self.get(REQ_ID)
    }

    pub fn set_request_id(&self, request_id: impl Into<String>) {
        self.insert(REQ_ID, request_id);
    }

    /// Copy of all key/value pairs.
    pub fn snapshot(&self) -> HashMap<String, String> {
        self.lock().clone()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    // A poisoned map is still usable; logging must not panic because a
    // previous holder did.
    fn lock(&self) -> MutexGuard<'_, HashMap<String, String>> {
        self.values.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

/// Restores the previously installed thread context on drop.
#[must_use = "the context is uninstalled as soon as the guard is dropped"]
pub struct ContextGuard {
    previous: Option<CorrelationContext>,
    _not_send: PhantomData<*const ()>,
}

impl Drop for ContextGuard {
    fn drop(&mut self) {
        if let Some(previous) = self.previous.take() {
            // The thread-local may already be gone during thread teardown.
            let _ = THREAD_CONTEXT.try_with(|ctx| *ctx.borrow_mut() = previous);
        }
    }
}
