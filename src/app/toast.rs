use std::time::{Duration, Instant};

pub const DEFAULT_TOAST_DURATION: Duration = Duration::from_millis(5000);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Error,
    Info,
}

#[derive(Debug, Clone)]
pub struct Toast {
    pub id: u64,
    pub message: String,
    pub kind: ToastKind,
    shown_at: Instant,
    /// Zero keeps the toast until it is dismissed.
    duration: Duration,
}

impl Toast {
    fn expired(&self, now: Instant) -> bool {
        !self.duration.is_zero() && now.duration_since(self.shown_at) >= self.duration
    }
}

/// Notifications stacked in the top right corner, oldest first.
#[derive(Debug, Default)]
pub struct Toasts {
    next_id: u64,
    items: Vec<Toast>,
}

impl Toasts {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn show(&mut self, message: impl Into<String>, kind: ToastKind) -> u64 {
        self.show_at(message, kind, DEFAULT_TOAST_DURATION, Instant::now())
    }

    pub fn show_at(
        &mut self,
        message: impl Into<String>,
        kind: ToastKind,
        duration: Duration,
        now: Instant,
    ) -> u64 {
        self.next_id += 1;
        self.items.push(Toast {
            id: self.next_id,
            message: message.into(),
            kind,
            shown_at: now,
            duration,
        });
        self.next_id
    }

    pub fn dismiss(&mut self, id: u64) {
        self.items.retain(|toast| toast.id != id);
    }

    /// Drops the newest toast, bound to the dismiss key.
    pub fn dismiss_latest(&mut self) {
        if let Some(id) = self.items.last().map(|toast| toast.id) {
            self.dismiss(id);
        }
    }

    pub fn expire(&mut self, now: Instant) {
        self.items.retain(|toast| !toast.expired(now));
    }

    pub fn iter(&self) -> impl Iterator<Item = &Toast> {
        self.items.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
