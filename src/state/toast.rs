//! Transient notifications shown above every page.
//!
//! SYSTEM CONTEXT
//! ==============
//! Forms and session flows push success or error messages here; the
//! `ToastHost` component renders them and expires each one on a timer.
//!
//! DESIGN
//! ======
//! Plain data with no reactive types. `App` wraps it in an `RwSignal` and
//! provides that as context.

#[cfg(test)]
#[path = "toast_test.rs"]
mod toast_test;

use uuid::Uuid;

/// Oldest toasts are dropped beyond this many.
pub const MAX_TOASTS: usize = 5;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
}

impl ToastKind {
    pub fn css_class(self) -> &'static str {
        match self {
            Self::Success => "toast toast--success",
            Self::Error => "toast toast--error",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Toast {
    pub id: Uuid,
    pub kind: ToastKind,
    pub message: String,
}

/// Transient notifications shown in the top-right corner.
#[derive(Clone, Debug, Default)]
pub struct ToastState {
    pub toasts: Vec<Toast>,
}

impl ToastState {
    pub fn push(&mut self, kind: ToastKind, message: impl Into<String>) -> Uuid {
        let id = Uuid::new_v4();
        self.toasts.push(Toast { id, kind, message: message.into() });
        if self.toasts.len() > MAX_TOASTS {
            let excess = self.toasts.len() - MAX_TOASTS;
            self.toasts.drain(..excess);
        }
        id
    }

    pub fn push_success(&mut self, message: impl Into<String>) -> Uuid {
        self.push(ToastKind::Success, message)
    }

    pub fn push_error(&mut self, message: impl Into<String>) -> Uuid {
        self.push(ToastKind::Error, message)
    }

    pub fn dismiss(&mut self, id: Uuid) {
        self.toasts.retain(|t| t.id != id);
    }
}
