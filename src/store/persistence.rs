use log::{debug, error, warn};

use crate::form::controller::RecordObserver;
use crate::models::resume::ResumeRecord;
use crate::store::kv::KeyValueStore;

pub const DEFAULT_STORAGE_KEY: &str = "resumeData";

/// Loads and saves the canonical record. Storage faults never leave this
/// type: reads fall back to seed data and writes are logged and dropped.
pub struct PersistenceShim<S: KeyValueStore> {
    store: S,
    key: String,
}

impl<S: KeyValueStore> PersistenceShim<S> {
    pub fn new(store: S, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    pub fn load(&self) -> ResumeRecord {
        let raw = match self.store.get(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                debug!("no saved resume under '{}', starting from seed data", self.key);
                return ResumeRecord::seed();
            }
            Err(e) => {
                warn!("failed to read saved resume: {}", e);
                return ResumeRecord::seed();
            }
        };

        match serde_json::from_str::<ResumeRecord>(&raw) {
            Ok(record) if !record.full_name.is_empty() => record,
            Ok(_) => {
                warn!("saved resume has no name, starting from seed data");
                ResumeRecord::seed()
            }
            Err(e) => {
                warn!("failed to parse saved resume: {}", e);
                ResumeRecord::seed()
            }
        }
    }

    pub fn save(&mut self, record: &ResumeRecord) {
        let json = match serde_json::to_string(record) {
            Ok(json) => json,
            Err(e) => {
                error!("failed to serialize resume: {}", e);
                return;
            }
        };

        if let Err(e) = self.store.set(&self.key, &json) {
            error!("failed to save resume: {}", e);
        }
    }
}

impl<S: KeyValueStore> RecordObserver for PersistenceShim<S> {
    fn record_changed(&mut self, record: &ResumeRecord) {
        self.save(record);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::kv::{MemoryStore, StoreError};

    fn shim_with(raw: Option<&str>) -> PersistenceShim<MemoryStore> {
        let mut store = MemoryStore::default();
        if let Some(raw) = raw {
            store.set(DEFAULT_STORAGE_KEY, raw).unwrap();
        }
        PersistenceShim::new(store, DEFAULT_STORAGE_KEY)
    }

    #[test]
    fn test_round_trip_yields_equal_record() {
        let mut shim = shim_with(None);
        let mut record = ResumeRecord::seed();
        record.full_name = "Jane Doe".to_string();
        record.skills = vec!["Rust".to_string(), "C, the language".to_string()];
        record.work_experience[1].description = "line one\n\n- line two".to_string();

        shim.save(&record);

        assert_eq!(shim.load(), record);
    }

    #[test]
    fn test_missing_entry_loads_seed() {
        assert_eq!(shim_with(None).load(), ResumeRecord::seed());
    }

    #[test]
    fn test_unparsable_entry_loads_seed() {
        assert_eq!(shim_with(Some("{not json")).load(), ResumeRecord::seed());
    }

    #[test]
    fn test_entry_without_name_loads_seed() {
        let mut record = ResumeRecord::seed();
        record.full_name.clear();
        record.email = "kept@nowhere".to_string();
        let raw = serde_json::to_string(&record).unwrap();

        assert_eq!(shim_with(Some(&raw)).load(), ResumeRecord::seed());
    }

    struct BrokenStore;

    impl KeyValueStore for BrokenStore {
        fn get(&self, _key: &str) -> Result<Option<String>, StoreError> {
            Err(std::io::Error::other("disk on fire").into())
        }

        fn set(&mut self, _key: &str, _value: &str) -> Result<(), StoreError> {
            Err(std::io::Error::other("disk on fire").into())
        }
    }

    #[test]
    fn test_storage_faults_are_absorbed() {
        let mut shim = PersistenceShim::new(BrokenStore, DEFAULT_STORAGE_KEY);
        shim.save(&ResumeRecord::seed());
        assert_eq!(shim.load(), ResumeRecord::seed());
    }
}
