use crate::storage::model::{InventoryListing, InventoryRecord, StoreError, StoreStatus};
use log::{info, warn};
use serde::Serialize;
use serde_json::Value;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Inventory kept as a JSON array in a single file.
///
/// Writes replace the whole file through a temp file and a rename, so a crash never
/// leaves a half-written array behind. Concurrent writers from separate processes can
/// still lose updates: there is no file lock.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Raw entries of the JSON array, `Ok(None)` when the file does not exist yet.
    fn read_values(&self) -> Result<Option<Vec<Value>>, StoreError> {
        if !self.path.exists() {
            return Ok(None);
        }
        let raw = fs::read_to_string(&self.path)?;
        if raw.trim().is_empty() {
            return Ok(Some(Vec::new()));
        }
        let values: Vec<Value> = serde_json::from_str(&raw)?;
        Ok(Some(values))
    }

    /// `Ok(None)` when the file does not exist yet. Entries that do not parse as a
    /// record are skipped, the rest of the file still reads.
    pub fn read_records(&self) -> Result<Option<Vec<InventoryRecord>>, StoreError> {
        let Some(values) = self.read_values()? else {
            return Ok(None);
        };
        let records = values
            .into_iter()
            .enumerate()
            .filter_map(
                |(idx, value)| match serde_json::from_value::<InventoryRecord>(value) {
                    Ok(record) => Some(record),
                    Err(e) => {
                        warn!(
                            "skipping entry {} in {}: {}",
                            idx,
                            self.path.display(),
                            e
                        );
                        None
                    }
                },
            )
            .collect();
        Ok(Some(records))
    }

    fn write_values(&self, values: &[Value]) -> Result<(), StoreError> {
        let dir = match self.path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };
        fs::create_dir_all(dir)?;

        let mut tmp = NamedTempFile::new_in(dir)?;
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut ser = serde_json::Serializer::with_formatter(&mut tmp, formatter);
        values.serialize(&mut ser)?;
        tmp.write_all(b"\n")?;
        tmp.as_file().sync_all()?;
        tmp.persist(&self.path)?;
        Ok(())
    }

    pub fn list_local(&self) -> InventoryListing {
        match self.read_records() {
            Ok(Some(records)) => InventoryListing {
                records,
                status: StoreStatus::LocalFallback,
                detail: "Offline mode (reading local JSON)".to_string(),
            },
            Ok(None) => InventoryListing {
                records: Vec::new(),
                status: StoreStatus::SimulatedEmpty,
                detail: "Simulated mode (local file not found)".to_string(),
            },
            Err(e) => {
                warn!("could not read {}: {}", self.path.display(), e);
                InventoryListing {
                    records: Vec::new(),
                    status: StoreStatus::SimulatedEmpty,
                    detail: format!("Could not read local JSON: {}", e),
                }
            }
        }
    }

    /// Read, append, rewrite. Entries that are not valid records are kept as they
    /// were; a file that is not a JSON array is reported, not overwritten.
    pub fn append(&self, record: InventoryRecord) -> Result<(), StoreError> {
        let mut values = self.read_values()?.unwrap_or_default();
        values.push(serde_json::to_value(&record)?);
        self.write_values(&values)?;
        info!(
            "inventory saved to {} ({} entries)",
            self.path.display(),
            values.len()
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::model::Category;
    use chrono::NaiveDate;

    fn record(name: &str, qty: i64) -> InventoryRecord {
        InventoryRecord::new(
            name,
            Category::Grain,
            qty,
            NaiveDate::from_ymd_opt(2026, 3, 1).unwrap(),
        )
    }

    #[test]
    fn missing_file_lists_as_simulated() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().join("inventory.json"));
        let listing = store.list_local();
        assert!(listing.records.is_empty());
        assert_eq!(listing.status, StoreStatus::SimulatedEmpty);
    }

    #[test]
    fn append_creates_parent_dirs_and_keeps_order() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().join("data").join("inventory.json"));
        for i in 0..3 {
            store.append(record(&format!("item{}", i), i + 1)).unwrap();
        }
        let listing = store.list_local();
        assert_eq!(listing.status, StoreStatus::LocalFallback);
        let names: Vec<_> = listing.records.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["ITEM0", "ITEM1", "ITEM2"]);
    }

    #[test]
    fn written_file_uses_legacy_keys() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("inventory.json");
        let store = FileStore::new(&path);
        store.append(record("soja", 5)).unwrap();

        let raw = fs::read_to_string(&path).unwrap();
        assert!(raw.contains("\"nome\": \"SOJA\""));
        assert!(raw.contains("\"validade\": \"2026-03-01\""));
        // no temp files left next to the store
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn corrupt_file_is_reported_and_preserved() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("inventory.json");
        fs::write(&path, "{not json").unwrap();
        let store = FileStore::new(&path);

        let listing = store.list_local();
        assert_eq!(listing.status, StoreStatus::SimulatedEmpty);
        assert!(listing.detail.starts_with("Could not read local JSON"));

        assert!(matches!(
            store.append(record("x", 1)),
            Err(StoreError::Json(_))
        ));
        assert_eq!(fs::read_to_string(&path).unwrap(), "{not json");
    }

    #[test]
    fn unknown_category_skips_only_that_entry() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("inventory.json");
        fs::write(
            &path,
            r#"[
    {"nome": "SEMENTE X", "tipo": "Semente", "quantidade": 10, "validade": "2026-01-01"},
    {"nome": "UREIA", "tipo": "Fertilizante", "quantidade": 50, "validade": "2025-12-31"}
]"#,
        )
        .unwrap();
        let store = FileStore::new(&path);

        let listing = store.list_local();
        assert_eq!(listing.status, StoreStatus::LocalFallback);
        assert_eq!(listing.records.len(), 1);
        assert_eq!(listing.records[0].name, "UREIA");
        assert_eq!(listing.records[0].category, Category::Fertilizer);

        store.append(record("soja", 5)).unwrap();
        let names: Vec<_> = store
            .list_local()
            .records
            .into_iter()
            .map(|r| r.name)
            .collect();
        assert_eq!(names, vec!["UREIA", "SOJA"]);

        // the unreadable entry survives the rewrite
        let raw = fs::read_to_string(&path).unwrap();
        assert!(raw.contains("\"Semente\""));
    }
}
