// Local mirror of every pattern this extension has ever toggled
use std::sync::Arc;

use tracing::debug;

use crate::{host::KeyValueStore, models::SettingRecord, Result};

/// Deduplicated mirror of toggled rules, one JSON array under one key.
///
/// The host content-settings store cannot be enumerated wholesale, so this
/// mirror is the only record of which patterns the extension has touched.
/// It is best-effort and never authoritative over the store itself.
#[derive(Clone)]
pub struct SettingsCache {
    storage: Arc<dyn KeyValueStore>,
    key: String,
}

impl SettingsCache {
    pub fn new(storage: Arc<dyn KeyValueStore>, key: impl Into<String>) -> Self {
        Self {
            storage,
            key: key.into(),
        }
    }

    /// Every record currently cached.
    ///
    /// An absent or malformed stored value reads as empty rather than
    /// erroring; the mirror rebuilds itself as sites get toggled again.
    pub async fn records(&self) -> Result<Vec<SettingRecord>> {
        let Some(value) = self.storage.get(&self.key).await? else {
            return Ok(Vec::new());
        };

        match serde_json::from_value(value) {
            Ok(records) => Ok(records),
            Err(err) => {
                debug!("Discarding malformed cache value: {}", err);
                Ok(Vec::new())
            }
        }
    }

    /// Insert or replace the record for `record.primary_pattern`, keeping
    /// at most one record per pattern. A replaced record keeps its position.
    ///
    /// The read-modify-write here runs over the whole array with no lock:
    /// two concurrent upserts can interleave and the last writer wins.
    /// Accepted for a single-user, best-effort mirror.
    pub async fn upsert(&self, record: SettingRecord) -> Result<()> {
        let mut records = self.records().await?;

        match records
            .iter()
            .position(|r| r.primary_pattern == record.primary_pattern)
        {
            Some(index) => records[index] = record,
            None => records.push(record),
        }

        self.storage
            .set(&self.key, serde_json::to_value(&records)?)
            .await
    }
}
