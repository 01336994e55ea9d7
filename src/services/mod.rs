// Service exports
pub mod cache;
pub mod feed;
pub mod firestore;

pub use cache::{ResultCache, CacheKey, CacheError, CacheStats};
pub use feed::{PopulationStore, PopulationSnapshot, Subscription, spawn_refresh};
pub use firestore::{FirestoreClient, FirestoreError};
