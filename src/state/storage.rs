//! User state storage
//!
//! Holds one [`UserState`] record per user in a sharded concurrent map.
//! Records are created lazily on first lookup and live for the lifetime of
//! the store; there is no eviction, so the map grows with every new user.

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use tracing::debug;
use crate::utils::errors::{ChatFlowError, Result};
use crate::utils::logging::log_state_transition;

/// State assigned to users seen for the first time
pub const DEFAULT_STATE: &str = "start";

/// A user's position in the conversation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserState {
    /// User this record belongs to
    pub user_id: i64,
    /// Current state name
    pub state: String,
    /// When the record was created or last transitioned
    pub updated_at: DateTime<Utc>,
}

impl UserState {
    /// Create a record in the given state
    pub fn new(user_id: i64, state: impl Into<String>) -> Self {
        Self {
            user_id,
            state: state.into(),
            updated_at: Utc::now(),
        }
    }

    /// Check whether the user is in the given state
    pub fn is(&self, state: &str) -> bool {
        self.state == state
    }
}

/// Concurrent per-user state store
#[derive(Debug, Default)]
pub struct StateStore {
    records: DashMap<i64, UserState>,
}

impl StateStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the user's record, creating it in [`DEFAULT_STATE`] when missing.
    ///
    /// Check-then-insert happens under the shard lock, so concurrent first
    /// lookups for one user observe the same record.
    pub fn get(&self, user_id: i64) -> UserState {
        self.records
            .entry(user_id)
            .or_insert_with(|| {
                debug!(user_id = user_id, state = DEFAULT_STATE, "Created user state");
                UserState::new(user_id, DEFAULT_STATE)
            })
            .value()
            .clone()
    }

    /// Overwrite the state of an existing record.
    ///
    /// Fails with [`ChatFlowError::UserNotFound`] when the user was never looked up.
    pub fn set(&self, user_id: i64, state: impl Into<String>) -> Result<()> {
        let mut record = self
            .records
            .get_mut(&user_id)
            .ok_or(ChatFlowError::UserNotFound { user_id })?;

        let previous = std::mem::replace(&mut record.state, state.into());
        record.updated_at = Utc::now();
        log_state_transition(user_id, &previous, &record.state);

        Ok(())
    }

    /// Check whether a record exists for the user
    pub fn contains(&self, user_id: i64) -> bool {
        self.records.contains_key(&user_id)
    }

    /// Number of tracked users
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use proptest::prelude::*;
    use std::sync::Arc;

    #[test]
    fn test_unseen_user_starts_in_default_state() {
        let store = StateStore::new();
        assert!(!store.contains(42));

        let first = store.get(42);
        assert_eq!(first.state, DEFAULT_STATE);
        assert_eq!(first.user_id, 42);
        assert!(store.contains(42));

        let second = store.get(42);
        assert_eq!(first, second);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_set_overwrites_state() {
        let store = StateStore::new();
        store.get(1);

        store.set(1, "greeting").unwrap();
        assert!(store.get(1).is("greeting"));

        store.set(1, "farewell").unwrap();
        assert!(store.get(1).is("farewell"));
    }

    #[test]
    fn test_set_unknown_user_fails() {
        let store = StateStore::new();
        assert_matches!(store.set(99, "greeting"), Err(ChatFlowError::UserNotFound { user_id: 99 }));
        assert!(store.is_empty());
    }

    #[test]
    fn test_users_are_independent() {
        let store = StateStore::new();
        store.get(1);
        store.get(2);
        store.set(1, "greeting").unwrap();

        assert!(store.get(1).is("greeting"));
        assert!(store.get(2).is(DEFAULT_STATE));
    }

    #[test]
    fn test_concurrent_first_lookup_creates_one_record() {
        let store = Arc::new(StateStore::new());
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let store = store.clone();
                std::thread::spawn(move || store.get(5))
            })
            .collect();

        for handle in handles {
            assert!(handle.join().unwrap().is(DEFAULT_STATE));
        }
        assert_eq!(store.len(), 1);
    }

    proptest! {
        #[test]
        fn prop_last_write_wins(user_id in any::<i64>(), states in proptest::collection::vec("[a-z]{1,12}", 1..20)) {
            let store = StateStore::new();
            store.get(user_id);
            for state in &states {
                store.set(user_id, state.as_str()).unwrap();
            }
            prop_assert_eq!(&store.get(user_id).state, states.last().unwrap());
        }
    }
}
