//! Persistence contract for ratings and ladder entries.
//!
//! Stores key records by `PlayerIdentity::key()`. A record that fails to
//! decode is reported as missing so callers fall back to the baseline.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use dashmap::DashMap;
use tokio::sync::Mutex;
use tracing::{debug, warn};

use super::model::RatingRecord;
use crate::errors::domain::{DomainError, InfraErrorKind};

#[async_trait]
pub trait RatingStore: Send + Sync {
    async fn load(&self, key: &str) -> Result<Option<RatingRecord>, DomainError>;

    async fn save(&self, key: &str, record: &RatingRecord) -> Result<(), DomainError>;

    /// Write every record or none of them.
    async fn save_many(&self, records: &[(String, RatingRecord)]) -> Result<(), DomainError>;

    /// Every decodable record, sorted by key.
    async fn all(&self) -> Result<Vec<(String, RatingRecord)>, DomainError>;
}

/// In-process store, shared by concurrent matches.
#[derive(Debug, Default)]
pub struct MemoryRatingStore {
    records: DashMap<String, RatingRecord>,
}

impl MemoryRatingStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RatingStore for MemoryRatingStore {
    async fn load(&self, key: &str) -> Result<Option<RatingRecord>, DomainError> {
        Ok(self.records.get(key).map(|r| r.value().clone()))
    }

    async fn save(&self, key: &str, record: &RatingRecord) -> Result<(), DomainError> {
        self.records.insert(key.to_string(), record.clone());
        Ok(())
    }

    async fn save_many(&self, records: &[(String, RatingRecord)]) -> Result<(), DomainError> {
        for (key, record) in records {
            self.records.insert(key.clone(), record.clone());
        }
        Ok(())
    }

    async fn all(&self) -> Result<Vec<(String, RatingRecord)>, DomainError> {
        let mut out: Vec<(String, RatingRecord)> = self
            .records
            .iter()
            .map(|e| (e.key().clone(), e.value().clone()))
            .collect();
        out.sort_by(|a, b| a.0.cmp(&b.0));
        Ok(out)
    }
}

/// Single JSON object on disk: `{ "<identity key>": <record>, ... }`.
///
/// Writes go to a sibling temp file that is renamed over the original.
pub struct JsonFileRatingStore {
    path: PathBuf,
    io_lock: Mutex<()>,
}

type RawRecords = BTreeMap<String, serde_json::Value>;

impl JsonFileRatingStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            io_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_raw(&self) -> Result<RawRecords, DomainError> {
        let text = match tokio::fs::read_to_string(&self.path).await {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(RawRecords::new()),
            Err(e) => {
                return Err(DomainError::infra(
                    InfraErrorKind::StoreUnavailable,
                    format!("read {}: {e}", self.path.display()),
                ))
            }
        };
        if text.trim().is_empty() {
            return Ok(RawRecords::new());
        }
        serde_json::from_str(&text).map_err(|e| {
            DomainError::infra(
                InfraErrorKind::DataCorruption,
                format!("{} is not a rating object: {e}", self.path.display()),
            )
        })
    }

    async fn write_raw(&self, raw: &RawRecords) -> Result<(), DomainError> {
        let json = serde_json::to_string_pretty(raw).map_err(|e| {
            DomainError::infra(InfraErrorKind::Other("serialize".into()), e.to_string())
        })?;
        let tmp = self.path.with_extension("json.tmp");
        let unavailable = |e: std::io::Error| {
            DomainError::infra(
                InfraErrorKind::StoreUnavailable,
                format!("write {}: {e}", self.path.display()),
            )
        };
        tokio::fs::write(&tmp, json).await.map_err(unavailable)?;
        tokio::fs::rename(&tmp, &self.path)
            .await
            .map_err(unavailable)?;
        debug!(path = %self.path.display(), records = raw.len(), "Rating file written");
        Ok(())
    }
}

fn encode(record: &RatingRecord) -> Result<serde_json::Value, DomainError> {
    serde_json::to_value(record)
        .map_err(|e| DomainError::infra(InfraErrorKind::Other("serialize".into()), e.to_string()))
}

fn decode(key: &str, value: &serde_json::Value) -> Option<RatingRecord> {
    match serde_json::from_value::<RatingRecord>(value.clone()) {
        Ok(rec) => Some(rec),
        Err(e) => {
            warn!(key, error = %e, "Malformed rating record; using baseline");
            None
        }
    }
}

#[async_trait]
impl RatingStore for JsonFileRatingStore {
    async fn load(&self, key: &str) -> Result<Option<RatingRecord>, DomainError> {
        let _guard = self.io_lock.lock().await;
        let raw = self.read_raw().await?;
        Ok(raw.get(key).and_then(|v| decode(key, v)))
    }

    async fn save(&self, key: &str, record: &RatingRecord) -> Result<(), DomainError> {
        let _guard = self.io_lock.lock().await;
        let mut raw = self.read_raw().await?;
        raw.insert(key.to_string(), encode(record)?);
        self.write_raw(&raw).await
    }

    /// One read-modify-write; the rename makes the whole batch visible at once.
    async fn save_many(&self, records: &[(String, RatingRecord)]) -> Result<(), DomainError> {
        let _guard = self.io_lock.lock().await;
        let mut raw = self.read_raw().await?;
        for (key, record) in records {
            raw.insert(key.clone(), encode(record)?);
        }
        self.write_raw(&raw).await
    }

    async fn all(&self) -> Result<Vec<(String, RatingRecord)>, DomainError> {
        let _guard = self.io_lock.lock().await;
        let raw = self.read_raw().await?;
        Ok(raw
            .iter()
            .filter_map(|(k, v)| decode(k, v).map(|rec| (k.clone(), rec)))
            .collect())
    }
}
