//! Common types used across the frontend.

use geoflip_client::Notification;

use crate::MAX_TOASTS;

/// What the browser store should do after an auth change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageSync {
    /// Logged in and remembered: write the state.
    Save,
    /// Logged in for this tab only: leave storage alone.
    Keep,
    /// Logged out: remove whatever was stored.
    Clear,
}

impl StorageSync {
    pub fn for_session(is_authenticated: bool, remember: bool) -> Self {
        match (is_authenticated, remember) {
            (true, true) => StorageSync::Save,
            (true, false) => StorageSync::Keep,
            (false, _) => StorageSync::Clear,
        }
    }
}

/// A notification on screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub id: u64,
    pub notification: Notification,
}

impl Toast {
    /// CSS classes for this toast.
    pub fn class(&self) -> String {
        format!("toast {}", self.notification.severity.css_class())
    }
}

/// Toasts currently shown, oldest first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ToastQueue {
    items: Vec<Toast>,
    next_id: u64,
}

impl ToastQueue {
    /// Add a toast, dropping the oldest past [`MAX_TOASTS`]. Returns its id.
    pub fn push(&mut self, notification: Notification) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.items.push(Toast { id, notification });
        if self.items.len() > MAX_TOASTS {
            let overflow = self.items.len() - MAX_TOASTS;
            self.items.drain(..overflow);
        }
        id
    }

    pub fn dismiss(&mut self, id: u64) {
        self.items.retain(|t| t.id != id);
    }

    pub fn items(&self) -> &[Toast] {
        &self.items
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_sync_rules() {
        assert_eq!(StorageSync::for_session(true, true), StorageSync::Save);
        assert_eq!(StorageSync::for_session(true, false), StorageSync::Keep);
        assert_eq!(StorageSync::for_session(false, true), StorageSync::Clear);
        assert_eq!(StorageSync::for_session(false, false), StorageSync::Clear);
    }

    #[test]
    fn test_push_and_dismiss() {
        let mut queue = ToastQueue::default();
        let first = queue.push(Notification::success("Saved"));
        let second = queue.push(Notification::error("Oops"));

        queue.dismiss(first);

        assert_eq!(queue.items().len(), 1);
        assert_eq!(queue.items()[0].id, second);
        assert_eq!(queue.items()[0].class(), "toast toast-error");
    }

    #[test]
    fn test_oldest_dropped_past_limit() {
        let mut queue = ToastQueue::default();
        for i in 0..MAX_TOASTS + 2 {
            queue.push(Notification::info(format!("n{}", i)));
        }

        assert_eq!(queue.items().len(), MAX_TOASTS);
        assert_eq!(queue.items()[0].notification.message, "n2");
    }
}
