use std::{
    collections::HashSet,
    fmt,
    sync::{Arc, Mutex, MutexGuard},
};

use api_types::EntityId;

use crate::error::ListError;

/// Mutating actions tracked by [`PendingActions`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Create,
    Update,
    Delete,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Create => "create",
            Self::Update => "update",
            Self::Delete => "delete",
        };
        f.write_str(label)
    }
}

/// Set of `(action, id)` pairs currently in flight.
///
/// Cloning shares the set. A slot is held by a [`PendingToken`] and released
/// when the token drops, including when the awaiting future is dropped early.
#[derive(Debug, Clone, Default)]
pub struct PendingActions {
    inner: Arc<Mutex<HashSet<(Action, EntityId)>>>,
}

impl PendingActions {
    /// Marks `action` on `id` as pending, or fails with [`ListError::Busy`].
    pub fn begin(&self, action: Action, id: EntityId) -> Result<PendingToken, ListError> {
        if !self.lock().insert((action, id)) {
            return Err(ListError::Busy { action, id });
        }
        Ok(PendingToken {
            owner: self.clone(),
            key: (action, id),
        })
    }

    pub fn is_pending(&self, action: Action, id: EntityId) -> bool {
        self.lock().contains(&(action, id))
    }

    pub fn is_idle(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> MutexGuard<'_, HashSet<(Action, EntityId)>> {
        // The set stays consistent even if a holder panicked.
        self.inner
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[derive(Debug)]
pub struct PendingToken {
    owner: PendingActions,
    key: (Action, EntityId),
}

impl Drop for PendingToken {
    fn drop(&mut self) {
        self.owner.lock().remove(&self.key);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_begin_on_same_key_is_busy() {
        let pending = PendingActions::default();
        let _token = pending.begin(Action::Update, 3).unwrap();
        assert_eq!(
            pending.begin(Action::Update, 3).unwrap_err(),
            ListError::Busy {
                action: Action::Update,
                id: 3
            }
        );
        assert!(pending.begin(Action::Update, 4).is_ok());
        assert!(pending.begin(Action::Delete, 3).is_ok());
    }

    #[test]
    fn dropping_token_releases_slot() {
        let pending = PendingActions::default();
        let token = pending.begin(Action::Delete, 9).unwrap();
        assert!(pending.is_pending(Action::Delete, 9));
        drop(token);
        assert!(!pending.is_pending(Action::Delete, 9));
        assert!(pending.is_idle());
    }
}
