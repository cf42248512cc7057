//! In-flight action tracking.
//!
//! Each action kind may have one call in flight per session. A
//! [`PendingGuard`] marks the action pending until it is dropped, so early
//! returns and cancelled futures release it too.

use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use parking_lot::Mutex;

use crate::error::{DeskError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    ChangeStatus,
    Assign,
    Escalate,
    Rate,
    AiSuggestion,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::ChangeStatus => write!(f, "status change"),
            Action::Assign => write!(f, "assignment"),
            Action::Escalate => write!(f, "escalation"),
            Action::Rate => write!(f, "rating"),
            Action::AiSuggestion => write!(f, "AI suggestion"),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct PendingActions {
    inner: Arc<Mutex<HashSet<Action>>>,
}

impl PendingActions {
    pub fn is_pending(&self, action: Action) -> bool {
        self.inner.lock().contains(&action)
    }

    /// Mark `action` in flight, or fail if it already is
    pub fn begin(&self, action: Action) -> Result<PendingGuard> {
        if !self.inner.lock().insert(action) {
            return Err(DeskError::ActionPending(action));
        }
        Ok(PendingGuard {
            action,
            inner: Arc::clone(&self.inner),
        })
    }
}

#[must_use = "the action stays pending only while the guard is alive"]
pub struct PendingGuard {
    action: Action,
    inner: Arc<Mutex<HashSet<Action>>>,
}

impl Drop for PendingGuard {
    fn drop(&mut self) {
        self.inner.lock().remove(&self.action);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_begin_is_exclusive_per_action() {
        let pending = PendingActions::default();
        let guard = pending.begin(Action::Assign).unwrap();
        assert!(pending.is_pending(Action::Assign));
        assert!(matches!(
            pending.begin(Action::Assign),
            Err(DeskError::ActionPending(Action::Assign))
        ));

        // other actions are independent
        let other = pending.begin(Action::ChangeStatus).unwrap();
        drop(other);

        drop(guard);
        assert!(!pending.is_pending(Action::Assign));
        assert!(pending.begin(Action::Assign).is_ok());
    }
}
