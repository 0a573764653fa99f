use super::mem_backend::MemBackend;
use super::DrinkLogStore;

pub type InMemoryStore = DrinkLogStore<MemBackend>;

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryStore {
    pub fn new() -> Self {
        DrinkLogStore::from_parts(MemBackend::new(), Vec::new(), Vec::new())
    }
}

// --- Test Fixtures ---

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    use super::*;
    use crate::model::{DrinkRecord, FavoriteDrink};
    use chrono::{DateTime, Duration, Utc};

    pub struct StoreFixture {
        pub store: InMemoryStore,
        next_id: i64,
    }

    impl Default for StoreFixture {
        fn default() -> Self {
            Self::new()
        }
    }

    impl StoreFixture {
        pub fn new() -> Self {
            Self {
                store: InMemoryStore::new(),
                next_id: 1,
            }
        }

        pub fn with_drink(mut self, name: &str, volume: f64, abv: f64, at: DateTime<Utc>) -> Self {
            let record = DrinkRecord::new(self.next_id, name, volume, abv, at);
            self.next_id += 1;
            self.store.add(record).unwrap();
            self
        }

        /// `count` beers, one per day, ending at `last`.
        pub fn with_daily_beers(mut self, count: usize, last: DateTime<Utc>) -> Self {
            for i in (0..count).rev() {
                self = self.with_drink("Beer", 500.0, 5.0, last - Duration::days(i as i64));
            }
            self
        }

        pub fn with_favorite(mut self, name: &str, volume: f64, abv: f64) -> Self {
            self.store
                .add_favorite(FavoriteDrink::new(name, volume, abv))
                .unwrap();
            self
        }
    }
}
