//! Library store use-case service.
//!
//! # Responsibility
//! - Save, list, look up and delete library records.
//! - Own the serialized form of the collection under one well-known key.
//!
//! # Invariants
//! - The collection is read, mutated and rewritten as a whole on every write.
//! - Listing order is most-recently-saved first.
//! - Generated ids never collide with an id already in the collection.
//! - Records are decoded one at a time. A record this build cannot decode is
//!   hidden from reads and written back unchanged, never dropped.
//! - A stored value that is not a record array reads as empty and is copied
//!   to [`corrupt_backup_key`] before the next write replaces it.
//! - Write failures, and read failures on the write path, are returned to the
//!   caller.

use crate::model::library::{LibraryItem, LibraryItemId, LibraryItemType};
use crate::model::plan::BimesterPlan;
use crate::repo::kv_repo::{KeyValueStore, StoreError};
use chrono::{SubsecRound, Utc};
use log::{error, info, warn};
use serde_json::Value;
use std::collections::HashSet;
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Storage key used by the web client for the library collection.
pub const DEFAULT_LIBRARY_KEY: &str = "escola360_library";

const CORRUPT_BACKUP_SUFFIX: &str = ".corrupt";

/// Key receiving the raw value of a collection that is not a record array.
pub fn corrupt_backup_key(key: &str) -> String {
    format!("{key}{CORRUPT_BACKUP_SUFFIX}")
}

pub type LibraryResult<T> = Result<T, LibraryError>;

/// Library storage failure.
#[derive(Debug)]
pub enum LibraryError {
    Store(StoreError),
    Serialize(serde_json::Error),
}

impl Display for LibraryError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Store(err) => write!(f, "library storage failed: {err}"),
            Self::Serialize(err) => write!(f, "library serialization failed: {err}"),
        }
    }
}

impl Error for LibraryError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Store(err) => Some(err),
            Self::Serialize(err) => Some(err),
        }
    }
}

impl From<StoreError> for LibraryError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

impl From<serde_json::Error> for LibraryError {
    fn from(value: serde_json::Error) -> Self {
        Self::Serialize(value)
    }
}

/// Durable collection of saved plans.
pub struct LibraryService<S: KeyValueStore> {
    store: S,
    key: String,
}

/// Stored collection as decoded for one operation.
enum StoredCollection {
    Missing,
    Records(Vec<StoredRecord>),
    /// Raw value that is not a JSON array of records.
    Corrupt(String),
}

/// One element of the stored array.
enum StoredRecord {
    Item(LibraryItem),
    /// Record this build cannot decode, kept verbatim.
    Opaque(Value),
}

impl StoredRecord {
    fn decode(value: Value) -> Self {
        match serde_json::from_value::<LibraryItem>(value.clone()) {
            Ok(item) => Self::Item(item),
            Err(err) => {
                warn!(
                    "event=library_read module=library status=degraded reason=unreadable_record record_id={} error={err}",
                    opaque_id(&value).unwrap_or("unknown")
                );
                Self::Opaque(value)
            }
        }
    }

    fn id_matches(&self, id: LibraryItemId) -> bool {
        match self {
            Self::Item(item) => item.id == id,
            Self::Opaque(value) => opaque_id(value)
                .and_then(|raw| Uuid::parse_str(raw).ok())
                .is_some_and(|raw_id| raw_id == id),
        }
    }

    fn to_value(&self) -> LibraryResult<Value> {
        match self {
            Self::Item(item) => Ok(serde_json::to_value(item)?),
            Self::Opaque(value) => Ok(value.clone()),
        }
    }
}

impl<S: KeyValueStore> LibraryService<S> {
    /// Creates a service storing its collection under [`DEFAULT_LIBRARY_KEY`].
    pub fn new(store: S) -> Self {
        Self::with_key(store, DEFAULT_LIBRARY_KEY)
    }

    pub fn with_key(store: S, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Saves a new record at the top of the collection.
    ///
    /// `content` is copied; later edits to the caller's plan do not reach the
    /// stored record.
    ///
    /// # Errors
    /// - Returns `LibraryError` when the collection cannot be read, backed up,
    ///   serialized or written. Nothing is reported as saved in that case.
    pub fn save(
        &self,
        kind: LibraryItemType,
        title: impl Into<String>,
        content: &BimesterPlan,
        metadata: Value,
    ) -> LibraryResult<LibraryItem> {
        let mut records = self.load_for_write().inspect_err(|err| {
            error!("event=library_save module=library status=error stage=read error={err}");
        })?;
        let item = LibraryItem {
            id: fresh_id(&records),
            kind,
            title: title.into(),
            // Stored timestamps keep milliseconds only.
            created_at: Utc::now().trunc_subsecs(3),
            content: content.clone(),
            metadata,
        };

        records.insert(0, StoredRecord::Item(item.clone()));
        self.write_records(&records).inspect_err(|err| {
            error!(
                "event=library_save module=library status=error item_id={} error={}",
                item.id, err
            );
        })?;

        info!(
            "event=library_save module=library status=ok item_id={} kind={} units={} total={}",
            item.id,
            item.kind.as_str(),
            item.content.unit_count(),
            records.len()
        );
        Ok(item)
    }

    /// Returns every readable record, most recent first.
    pub fn list(&self) -> Vec<LibraryItem> {
        self.readable_items()
    }

    /// Returns one readable record by id.
    pub fn get(&self, id: LibraryItemId) -> Option<LibraryItem> {
        self.readable_items().into_iter().find(|item| item.id == id)
    }

    /// Removes the record with `id`, readable or not.
    ///
    /// Deleting an id that is not stored is a no-op and does not write.
    ///
    /// # Errors
    /// - Returns `LibraryError` when the collection cannot be read or the
    ///   reduced collection cannot be written.
    pub fn delete(&self, id: LibraryItemId) -> LibraryResult<()> {
        let mut records = match self.read_stored()? {
            StoredCollection::Records(records) => records,
            StoredCollection::Missing | StoredCollection::Corrupt(_) => {
                info!("event=library_delete module=library status=noop item_id={id}");
                return Ok(());
            }
        };
        let before = records.len();
        records.retain(|record| !record.id_matches(id));

        if records.len() == before {
            info!("event=library_delete module=library status=noop item_id={id}");
            return Ok(());
        }

        self.write_records(&records).inspect_err(|err| {
            error!("event=library_delete module=library status=error item_id={id} error={err}");
        })?;
        info!(
            "event=library_delete module=library status=ok item_id={id} total={}",
            records.len()
        );
        Ok(())
    }

    fn readable_items(&self) -> Vec<LibraryItem> {
        let records = match self.read_stored() {
            Ok(StoredCollection::Records(records)) => records,
            Ok(StoredCollection::Missing | StoredCollection::Corrupt(_)) => return Vec::new(),
            Err(err) => {
                warn!(
                    "event=library_read module=library status=degraded reason=store_unavailable error={err}"
                );
                return Vec::new();
            }
        };

        records
            .into_iter()
            .filter_map(|record| match record {
                StoredRecord::Item(item) => Some(item),
                StoredRecord::Opaque(_) => None,
            })
            .collect()
    }

    /// Loads the records a write must preserve, backing up a corrupt value
    /// first.
    fn load_for_write(&self) -> LibraryResult<Vec<StoredRecord>> {
        match self.read_stored()? {
            StoredCollection::Missing => Ok(Vec::new()),
            StoredCollection::Records(records) => Ok(records),
            StoredCollection::Corrupt(raw) => {
                let backup_key = corrupt_backup_key(&self.key);
                self.store.set(&backup_key, &raw)?;
                warn!(
                    "event=library_backup module=library status=ok reason=corrupt_collection bytes={} backup_key={backup_key}",
                    raw.len()
                );
                Ok(Vec::new())
            }
        }
    }

    fn read_stored(&self) -> LibraryResult<StoredCollection> {
        let Some(raw) = self.store.get(&self.key)? else {
            return Ok(StoredCollection::Missing);
        };

        match serde_json::from_str::<Vec<Value>>(&raw) {
            Ok(values) => Ok(StoredCollection::Records(
                values.into_iter().map(StoredRecord::decode).collect(),
            )),
            Err(err) => {
                warn!(
                    "event=library_read module=library status=degraded reason=corrupt_collection bytes={} error={err}",
                    raw.len()
                );
                Ok(StoredCollection::Corrupt(raw))
            }
        }
    }

    fn write_records(&self, records: &[StoredRecord]) -> LibraryResult<()> {
        let values = records
            .iter()
            .map(StoredRecord::to_value)
            .collect::<LibraryResult<Vec<_>>>()?;
        let raw = serde_json::to_string(&values)?;
        self.store.set(&self.key, &raw)?;
        Ok(())
    }
}

fn opaque_id(value: &Value) -> Option<&str> {
    value.get("id").and_then(Value::as_str)
}

fn fresh_id(records: &[StoredRecord]) -> LibraryItemId {
    let taken = records
        .iter()
        .filter_map(|record| match record {
            StoredRecord::Item(item) => Some(item.id.to_string()),
            StoredRecord::Opaque(value) => opaque_id(value).map(str::to_ascii_lowercase),
        })
        .collect::<HashSet<_>>();
    loop {
        let candidate = Uuid::new_v4();
        if !taken.contains(&candidate.to_string()) {
            return candidate;
        }
    }
}
