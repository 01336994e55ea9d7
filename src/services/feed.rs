use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError, RwLock, Weak};
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use crate::core::filters::is_listed;
use crate::models::UserProfile;
use crate::services::firestore::FirestoreClient;

/// Population as published at one point in time
#[derive(Debug, Clone, PartialEq)]
pub struct PopulationSnapshot {
    pub revision: u64,
    /// Listed profiles, the population every ranking runs over
    pub profiles: Vec<UserProfile>,
    /// Private or unnamed members, kept only so they can be looked up as viewers
    pub unlisted: Vec<UserProfile>,
    pub refreshed_at: DateTime<Utc>,
}

impl PopulationSnapshot {
    fn empty() -> Self {
        Self {
            revision: 0,
            profiles: Vec::new(),
            unlisted: Vec::new(),
            refreshed_at: Utc::now(),
        }
    }

    /// Look up a listed profile by id
    pub fn find(&self, user_id: &str) -> Option<&UserProfile> {
        self.profiles.iter().find(|profile| profile.user_id() == user_id)
    }

    /// Look up any member by id, listed or not
    ///
    /// Used to resolve the viewer of a request. Unlisted members never show
    /// up in rankings but still get scored as themselves.
    pub fn find_member(&self, user_id: &str) -> Option<&UserProfile> {
        if user_id.is_empty() {
            return None;
        }
        self.find(user_id)
            .or_else(|| self.unlisted.iter().find(|profile| profile.user_id() == user_id))
    }
}

type ChangeCallback = Arc<dyn Fn(&PopulationSnapshot) + Send + Sync>;
type Registry = Mutex<HashMap<u64, ChangeCallback>>;

/// Holds the current population snapshot and notifies subscribers
///
/// Only listed profiles (named and public) are published. Readers get an
/// `Arc` of the snapshot and never hold the lock while computing.
pub struct PopulationStore {
    current: RwLock<Arc<PopulationSnapshot>>,
    subscribers: Arc<Registry>,
    next_subscription: AtomicU64,
}

impl PopulationStore {
    pub fn new() -> Self {
        Self {
            current: RwLock::new(Arc::new(PopulationSnapshot::empty())),
            subscribers: Arc::new(Mutex::new(HashMap::new())),
            next_subscription: AtomicU64::new(1),
        }
    }

    /// Create a store already holding `profiles`
    pub fn with_profiles(profiles: Vec<UserProfile>) -> Self {
        let store = Self::new();
        store.publish(profiles);
        store
    }

    /// Current snapshot
    pub fn snapshot(&self) -> Arc<PopulationSnapshot> {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Replace the population
    ///
    /// Returns false and keeps the revision when both the listed and the
    /// unlisted profiles are identical to the current ones. Subscribers are notified after the
    /// swap, outside the snapshot lock.
    pub fn publish(&self, profiles: Vec<UserProfile>) -> bool {
        let total = profiles.len();
        let (listed, unlisted): (Vec<UserProfile>, Vec<UserProfile>) =
            profiles.into_iter().partition(is_listed);

        let snapshot = {
            let mut current = self.current.write().unwrap_or_else(PoisonError::into_inner);
            if current.revision > 0 && current.profiles == listed && current.unlisted == unlisted {
                tracing::trace!("Population unchanged at revision {}", current.revision);
                return false;
            }

            let next = Arc::new(PopulationSnapshot {
                revision: current.revision + 1,
                profiles: listed,
                unlisted,
                refreshed_at: Utc::now(),
            });
            *current = Arc::clone(&next);
            next
        };

        tracing::debug!(
            "Published population revision {} ({} listed of {} profiles)",
            snapshot.revision,
            snapshot.profiles.len(),
            total
        );

        let callbacks: Vec<ChangeCallback> = self
            .subscribers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .values()
            .cloned()
            .collect();

        for callback in callbacks {
            callback(&snapshot);
        }

        true
    }

    /// Register `on_change` to run after every published change
    pub fn subscribe<F>(&self, on_change: F) -> Subscription
    where
        F: Fn(&PopulationSnapshot) + Send + Sync + 'static,
    {
        let id = self.next_subscription.fetch_add(1, Ordering::Relaxed);
        self.subscribers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(id, Arc::new(on_change));

        Subscription {
            id,
            registry: Arc::downgrade(&self.subscribers),
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

impl Default for PopulationStore {
    fn default() -> Self {
        Self::new()
    }
}

/// Handle returned by [`PopulationStore::subscribe`]
///
/// Dropping the handle leaves the callback registered; call
/// [`Subscription::unsubscribe`] to remove it.
#[derive(Debug)]
pub struct Subscription {
    id: u64,
    registry: Weak<Registry>,
}

impl Subscription {
    /// Stop receiving change notifications
    pub fn unsubscribe(self) {
        if let Some(registry) = self.registry.upgrade() {
            registry
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .remove(&self.id);
        }
    }
}

/// Keep the store in sync with the document database
///
/// Polls every `interval`, starting immediately. A failed poll keeps the
/// previous snapshot.
pub fn spawn_refresh(
    store: Arc<PopulationStore>,
    client: Arc<FirestoreClient>,
    interval: Duration,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            ticker.tick().await;

            match client.list_users().await {
                Ok(profiles) => {
                    let fetched = profiles.len();
                    if store.publish(profiles) {
                        let snapshot = store.snapshot();
                        tracing::info!(
                            "Population refreshed: revision {}, {} listed of {} fetched",
                            snapshot.revision,
                            snapshot.profiles.len(),
                            fetched
                        );
                    }
                }
                Err(e) => {
                    tracing::warn!("Population refresh failed, keeping previous snapshot: {}", e);
                }
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;

    fn named(id: &str) -> UserProfile {
        UserProfile {
            id: id.to_string(),
            name: Some(format!("User {}", id)),
            ..UserProfile::default()
        }
    }

    #[test]
    fn test_publish_filters_unlisted() {
        let store = PopulationStore::new();
        let mut private = named("2");
        private.is_public = Some(false);

        store.publish(vec![named("1"), private, UserProfile::default()]);

        let snapshot = store.snapshot();
        assert_eq!(snapshot.revision, 1);
        assert_eq!(snapshot.profiles.len(), 1);
        assert!(snapshot.find("1").is_some());
        assert!(snapshot.find("2").is_none());
    }

    #[test]
    fn test_unlisted_members_can_be_found() {
        let store = PopulationStore::new();
        let mut private = named("2");
        private.is_public = Some(false);

        store.publish(vec![named("1"), private]);

        let snapshot = store.snapshot();
        assert_eq!(snapshot.unlisted.len(), 1);
        assert_eq!(snapshot.find_member("1").map(|p| p.user_id()), Some("1"));
        assert_eq!(snapshot.find_member("2").map(|p| p.user_id()), Some("2"));
        assert!(snapshot.find_member("3").is_none());
        assert!(snapshot.find_member("").is_none());
    }

    #[test]
    fn test_visibility_change_bumps_revision() {
        let store = PopulationStore::new();
        let mut private = named("2");
        private.is_public = Some(false);

        store.publish(vec![named("1"), private.clone()]);
        private.skills_wanted = vec!["Go".to_string()];

        // The listed population is the same but the private viewer changed
        assert!(store.publish(vec![named("1"), private]));
        assert_eq!(store.snapshot().revision, 2);
    }

    #[test]
    fn test_revision_only_bumps_on_change() {
        let store = PopulationStore::new();

        assert!(store.publish(vec![named("1")]));
        assert!(!store.publish(vec![named("1")]));
        assert_eq!(store.snapshot().revision, 1);

        assert!(store.publish(vec![named("1"), named("2")]));
        assert_eq!(store.snapshot().revision, 2);
    }

    #[test]
    fn test_first_publish_of_empty_population() {
        let store = PopulationStore::new();

        assert!(store.publish(vec![]));
        assert_eq!(store.snapshot().revision, 1);
    }

    #[test]
    fn test_subscribe_and_unsubscribe() {
        let store = PopulationStore::new();
        let calls = Arc::new(AtomicUsize::new(0));
        let seen = Arc::clone(&calls);

        let subscription = store.subscribe(move |snapshot| {
            assert!(snapshot.revision > 0);
            seen.fetch_add(1, Ordering::SeqCst);
        });
        assert_eq!(store.subscriber_count(), 1);

        store.publish(vec![named("1")]);
        store.publish(vec![named("1")]);
        store.publish(vec![named("2")]);
        assert_eq!(calls.load(Ordering::SeqCst), 2);

        subscription.unsubscribe();
        assert_eq!(store.subscriber_count(), 0);

        store.publish(vec![named("3")]);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_readers_keep_old_snapshot() {
        let store = PopulationStore::with_profiles(vec![named("1")]);
        let before = store.snapshot();

        store.publish(vec![named("2")]);

        assert_eq!(before.profiles[0].user_id(), "1");
        assert_eq!(store.snapshot().profiles[0].user_id(), "2");
    }
}
