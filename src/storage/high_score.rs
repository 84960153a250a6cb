use log::{info, warn};

use super::store::KeyValueStore;

/// The best score seen so far, mirrored into a key-value store
pub struct HighScore<K: KeyValueStore> {
    store: K,
    key: String,
    value: u32,
}

impl<K: KeyValueStore> HighScore<K> {
    /// Read the stored high score; absent or unreadable values count as 0
    pub fn load(store: K, key: impl Into<String>) -> Self {
        let key = key.into();
        let value = match store.get(&key) {
            Ok(Some(text)) => text.trim().parse().unwrap_or_else(|_| {
                warn!("ignoring unparsable high score {:?}", text);
                0
            }),
            Ok(None) => 0,
            Err(e) => {
                warn!("could not read high score: {}", e);
                0
            }
        };

        info!("high score loaded: {}", value);
        Self { store, key, value }
    }

    pub fn value(&self) -> u32 {
        self.value
    }

    /// Raise the high score to `score` if it is better, writing it through.
    /// Returns whether the high score changed.
    pub fn record(&mut self, score: u32) -> bool {
        if score <= self.value {
            return false;
        }

        self.value = score;
        if let Err(e) = self.store.set(&self.key, &score.to_string()) {
            warn!("could not persist high score {}: {}", score, e);
        }
        true
    }

    /// Give back the underlying store
    pub fn into_store(self) -> K {
        self.store
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::store::{MemoryStore, StoreError};

    const KEY: &str = "snakeHighScore";

    #[test]
    fn test_defaults_to_zero() {
        let high = HighScore::load(MemoryStore::new(), KEY);
        assert_eq!(high.value(), 0);
    }

    #[test]
    fn test_garbage_defaults_to_zero() {
        let mut store = MemoryStore::new();
        store.set(KEY, "lots").unwrap();
        assert_eq!(HighScore::load(store, KEY).value(), 0);
    }

    #[test]
    fn test_monotonic_and_persists_across_restart() {
        let mut high = HighScore::load(MemoryStore::new(), KEY);

        assert!(high.record(30));
        assert!(!high.record(20));
        assert!(!high.record(30));
        assert_eq!(high.value(), 30);
        assert!(high.record(40));

        // Simulated restart: a fresh tracker over the same store
        let restarted = HighScore::load(high.into_store(), KEY);
        assert_eq!(restarted.value(), 40);
    }

    struct BrokenStore;

    impl KeyValueStore for BrokenStore {
        fn get(&self, _key: &str) -> Result<Option<String>, StoreError> {
            Err(StoreError::Io {
                path: "broken".into(),
                source: std::io::Error::other("read failed"),
            })
        }

        fn set(&mut self, _key: &str, _value: &str) -> Result<(), StoreError> {
            Err(StoreError::Io {
                path: "broken".into(),
                source: std::io::Error::other("write failed"),
            })
        }
    }

    #[test]
    fn test_store_failures_are_not_fatal() {
        let mut high = HighScore::load(BrokenStore, KEY);
        assert_eq!(high.value(), 0);
        assert!(high.record(10));
        assert_eq!(high.value(), 10);
    }
}
