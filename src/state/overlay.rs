//! Loading indicator and toast notifications

use std::cell::RefCell;
use std::rc::{Rc, Weak};
use std::time::{Duration, Instant};

#[derive(Debug, Default)]
struct OverlayInner {
    next_id: u64,
    /// Live holders in start order, each with its message
    active: Vec<(u64, String)>,
}

/// Blocking "loading" indicator shared by every in-flight request.
///
/// Visibility is reference counted: the overlay stays up while any
/// [`LoadingGuard`] is alive, so one request finishing cannot hide the
/// indicator another request still needs.
#[derive(Debug, Clone, Default)]
pub struct LoadingOverlay {
    inner: Rc<RefCell<OverlayInner>>,
}

impl LoadingOverlay {
    /// Show the overlay with `message` until the returned guard is dropped
    pub fn begin(&self, message: impl Into<String>) -> LoadingGuard {
        let mut inner = self.inner.borrow_mut();
        let id = inner.next_id;
        inner.next_id += 1;
        inner.active.push((id, message.into()));

        LoadingGuard {
            id,
            overlay: Rc::downgrade(&self.inner),
        }
    }

    pub fn is_visible(&self) -> bool {
        !self.inner.borrow().active.is_empty()
    }

    /// Number of requests currently holding the overlay
    pub fn active_count(&self) -> usize {
        self.inner.borrow().active.len()
    }

    /// Message of the most recently started live holder
    pub fn message(&self) -> Option<String> {
        self.inner.borrow().active.last().map(|(_, msg)| msg.clone())
    }
}

/// Keeps the loading overlay visible while alive
#[derive(Debug)]
pub struct LoadingGuard {
    id: u64,
    overlay: Weak<RefCell<OverlayInner>>,
}

impl Drop for LoadingGuard {
    fn drop(&mut self) {
        if let Some(inner) = self.overlay.upgrade() {
            inner.borrow_mut().active.retain(|(id, _)| *id != self.id);
        }
    }
}

/// Severity of a toast, mapped to a theme color when drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Info,
    Success,
    Warning,
    Error,
}

/// A transient notification
#[derive(Debug, Clone)]
pub struct Toast {
    pub id: u64,
    pub kind: ToastKind,
    pub message: String,
    created: Instant,
}

/// Stack of transient notifications that expire on their own
#[derive(Debug)]
pub struct Toasts {
    items: Vec<Toast>,
    next_id: u64,
    lifetime: Duration,
}

impl Default for Toasts {
    fn default() -> Self {
        Self::new(Duration::from_secs(3))
    }
}

impl Toasts {
    pub fn new(lifetime: Duration) -> Self {
        Self {
            items: Vec::new(),
            next_id: 0,
            lifetime,
        }
    }

    pub fn push(&mut self, kind: ToastKind, message: impl Into<String>) {
        let message = message.into();
        match kind {
            ToastKind::Error => tracing::debug!("toast (error): {}", message),
            _ => tracing::debug!("toast: {}", message),
        }

        self.items.push(Toast {
            id: self.next_id,
            kind,
            message,
            created: Instant::now(),
        });
        self.next_id += 1;
    }

    pub fn info(&mut self, message: impl Into<String>) {
        self.push(ToastKind::Info, message);
    }

    pub fn success(&mut self, message: impl Into<String>) {
        self.push(ToastKind::Success, message);
    }

    pub fn warning(&mut self, message: impl Into<String>) {
        self.push(ToastKind::Warning, message);
    }

    pub fn error(&mut self, message: impl Into<String>) {
        self.push(ToastKind::Error, message);
    }

    /// Remove toasts older than the configured lifetime
    pub fn prune(&mut self, now: Instant) {
        let lifetime = self.lifetime;
        self.items
            .retain(|t| now.saturating_duration_since(t.created) < lifetime);
    }

    pub fn dismiss(&mut self, id: u64) {
        self.items.retain(|t| t.id != id);
    }

    pub fn iter(&self) -> impl Iterator<Item = &Toast> {
        self.items.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Most recent toast, if any
    #[cfg(test)]
    pub fn last(&self) -> Option<&Toast> {
        self.items.last()
    }
}
