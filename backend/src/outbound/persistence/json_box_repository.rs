//! Flat-file JSON adapter for the box repository port.
//!
//! One JSON array per data directory (`boxes.json`), held in memory and
//! rewritten whole on every mutation, exactly as the store is read. A
//! single in-process mutex serialises read-modify-write cycles so
//! concurrent handlers cannot interleave partial writes; across processes
//! the store stays last-write-wins.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;
use chrono::NaiveDate;
use tracing::info;

use crate::domain::box_record::{BoxId, BoxRecord};
use crate::domain::label::QrBaseUrl;
use crate::domain::ports::{BoxRepository, BoxRepositoryError};

use super::legacy::StoredBox;

/// File name of the record collection inside the data directory.
pub const BOXES_FILE: &str = "boxes.json";

/// Flat-file box store.
///
/// `list` returns records in append order: new records go to the end of the
/// array and migration preserves positions.
#[derive(Debug)]
pub struct JsonBoxRepository {
    path: PathBuf,
    records: Mutex<Vec<BoxRecord>>,
}

impl JsonBoxRepository {
    /// Open (or create) the boxes file under `data_dir` and run the one-time
    /// legacy migration.
    ///
    /// Legacy-shaped records are rewritten into the current schema with
    /// their `qr_url` recomputed from `base_url`; `today` backs creation
    /// dates the legacy data lacks. When anything migrated, the file is
    /// persisted back before the store serves its first read.
    pub fn open(
        data_dir: &Path,
        base_url: &QrBaseUrl,
        today: NaiveDate,
    ) -> Result<Self, BoxRepositoryError> {
        fs::create_dir_all(data_dir)
            .map_err(|err| BoxRepositoryError::write(format!("create {data_dir:?}: {err}")))?;
        let path = data_dir.join(BOXES_FILE);
        if !path.exists() {
            fs::write(&path, "[]")
                .map_err(|err| BoxRepositoryError::write(format!("create {path:?}: {err}")))?;
            info!(path = %path.display(), "created boxes file");
        }

        let raw = fs::read_to_string(&path)
            .map_err(|err| BoxRepositoryError::read(format!("read {path:?}: {err}")))?;
        let entries: Vec<serde_json::Value> = if raw.trim().is_empty() {
            Vec::new()
        } else {
            serde_json::from_str(&raw)
                .map_err(|err| BoxRepositoryError::corrupt(format!("parse {path:?}: {err}")))?
        };

        let mut records = Vec::with_capacity(entries.len());
        let mut migrated_count = 0_usize;
        for (index, entry) in entries.into_iter().enumerate() {
            // Records written before the soft-delete flag existed parse as
            // current but still need a rewrite to carry it explicitly.
            let lacked_deleted_flag = entry.get("deleted").is_none();
            let stored: StoredBox = serde_json::from_value(entry).map_err(|err| {
                BoxRepositoryError::corrupt(format!("record {index} in {path:?}: {err}"))
            })?;
            let record = match stored {
                StoredBox::Current(record) => {
                    if lacked_deleted_flag {
                        migrated_count += 1;
                    }
                    record
                }
                StoredBox::Legacy(legacy) => {
                    let record = legacy.migrate(base_url, today)?;
                    info!(box_id = %record.box_id, "migrated legacy box record");
                    migrated_count += 1;
                    record
                }
            };
            records.push(record);
        }

        let store = Self {
            path,
            records: Mutex::new(records),
        };
        if migrated_count > 0 {
            store.persist_locked()?;
            info!(count = migrated_count, "boxes file migration complete");
        }
        Ok(store)
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<BoxRecord>> {
        self.records.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn persist(
        &self,
        records: &[BoxRecord],
    ) -> Result<(), BoxRepositoryError> {
        let body = serde_json::to_string_pretty(records)
            .map_err(|err| BoxRepositoryError::write(format!("encode boxes: {err}")))?;
        fs::write(&self.path, body)
            .map_err(|err| BoxRepositoryError::write(format!("write {:?}: {err}", self.path)))
    }

    fn persist_locked(&self) -> Result<(), BoxRepositoryError> {
        let records = self.lock();
        self.persist(&records)
    }
}

#[async_trait]
impl BoxRepository for JsonBoxRepository {
    async fn list(&self) -> Result<Vec<BoxRecord>, BoxRepositoryError> {
        Ok(self.lock().clone())
    }

    async fn find(&self, box_id: &BoxId) -> Result<Option<BoxRecord>, BoxRepositoryError> {
        Ok(self
            .lock()
            .iter()
            .find(|record| &record.box_id == box_id)
            .cloned())
    }

    async fn insert(&self, record: BoxRecord) -> Result<(), BoxRepositoryError> {
        let mut records = self.lock();
        // Uniqueness is checked under the same lock as the write, so two
        // concurrent creates cannot both store the same identifier.
        if records.iter().any(|stored| stored.box_id == record.box_id) {
            return Err(BoxRepositoryError::duplicate(record.box_id.as_str()));
        }
        records.push(record);
        if let Err(err) = self.persist(&records) {
            // Keep memory matching the disk: a record the file never took
            // must not be served from the cache.
            records.pop();
            return Err(err);
        }
        Ok(())
    }

    async fn replace(&self, record: BoxRecord) -> Result<bool, BoxRepositoryError> {
        let mut records = self.lock();
        let Some(index) = records
            .iter()
            .position(|stored| stored.box_id == record.box_id)
        else {
            return Ok(false);
        };
        let previous = std::mem::replace(&mut records[index], record);
        if let Err(err) = self.persist(&records) {
            records[index] = previous;
            return Err(err);
        }
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.

    use rstest::rstest;
    use tempfile::TempDir;

    use super::*;

    fn base() -> QrBaseUrl {
        QrBaseUrl::parse("http://boxes.example.test").expect("valid base URL")
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, 14).expect("valid date")
    }

    fn open(dir: &TempDir) -> JsonBoxRepository {
        JsonBoxRepository::open(dir.path(), &base(), today()).expect("store opens")
    }

    fn record(suffix: u64) -> BoxRecord {
        BoxRecord {
            box_id: BoxId::from_suffix(suffix),
            short_description: "Mugs".to_owned(),
            from_room: "Kitchen".to_owned(),
            to_room: "Garage".to_owned(),
            photo_path: "x".to_owned(),
            date_created: today(),
            date_deleted: None,
            deleted: false,
            packed_by: "Sam".to_owned(),
            qr_url: format!("http://boxes.example.test/box/BOX-{suffix:06}"),
        }
    }

    #[rstest]
    #[tokio::test]
    async fn open_creates_the_data_dir_and_an_empty_file() {
        let dir = TempDir::new().expect("tempdir");
        let store = open(&dir);
        assert!(dir.path().join(BOXES_FILE).exists());
        assert!(store.list().await.expect("list succeeds").is_empty());
    }

    #[rstest]
    #[tokio::test]
    async fn inserted_records_survive_a_reopen_in_append_order() {
        let dir = TempDir::new().expect("tempdir");
        {
            let store = open(&dir);
            store.insert(record(1)).await.expect("insert");
            store.insert(record(2)).await.expect("insert");
        }
        let reopened = open(&dir);
        let records = reopened.list().await.expect("list succeeds");
        let ids: Vec<&str> = records.iter().map(|r| r.box_id.as_str()).collect();
        assert_eq!(ids, ["BOX-000001", "BOX-000002"]);
    }

    #[rstest]
    #[tokio::test]
    async fn replace_swaps_the_matching_record_only() {
        let dir = TempDir::new().expect("tempdir");
        let store = open(&dir);
        store.insert(record(1)).await.expect("insert");
        store.insert(record(2)).await.expect("insert");

        let mut changed = record(2);
        changed.to_room = "Loft".to_owned();
        assert!(store.replace(changed).await.expect("replace succeeds"));

        let records = store.list().await.expect("list succeeds");
        assert_eq!(records[0].to_room, "Garage");
        assert_eq!(records[1].to_room, "Loft");
    }

    #[rstest]
    #[tokio::test]
    async fn replace_of_an_unknown_record_reports_false() {
        let dir = TempDir::new().expect("tempdir");
        let store = open(&dir);
        assert!(!store.replace(record(9)).await.expect("replace succeeds"));
    }

    #[rstest]
    #[tokio::test]
    async fn inserting_an_existing_identifier_is_rejected() {
        let dir = TempDir::new().expect("tempdir");
        let store = open(&dir);
        store.insert(record(1)).await.expect("insert");

        let error = store
            .insert(record(1))
            .await
            .expect_err("second insert must fail");
        assert!(matches!(error, BoxRepositoryError::Duplicate { .. }));
        assert_eq!(store.list().await.expect("list succeeds").len(), 1);
    }

    /// Make every subsequent write to the boxes file fail by replacing the
    /// file with a directory of the same name.
    fn block_writes(dir: &TempDir) {
        let path = dir.path().join(BOXES_FILE);
        fs::remove_file(&path).expect("remove boxes file");
        fs::create_dir(&path).expect("shadow boxes file");
    }

    #[rstest]
    #[tokio::test]
    async fn a_failed_write_rolls_back_an_insert() {
        let dir = TempDir::new().expect("tempdir");
        let store = open(&dir);
        store.insert(record(1)).await.expect("insert");

        block_writes(&dir);
        store
            .insert(record(2))
            .await
            .expect_err("write must fail");

        let records = store.list().await.expect("list succeeds");
        let ids: Vec<&str> = records.iter().map(|r| r.box_id.as_str()).collect();
        assert_eq!(ids, ["BOX-000001"]);
    }

    #[rstest]
    #[tokio::test]
    async fn a_failed_write_rolls_back_a_replace() {
        let dir = TempDir::new().expect("tempdir");
        let store = open(&dir);
        store.insert(record(1)).await.expect("insert");

        block_writes(&dir);
        let mut changed = record(1);
        changed.to_room = "Loft".to_owned();
        store
            .replace(changed)
            .await
            .expect_err("write must fail");

        let records = store.list().await.expect("list succeeds");
        assert_eq!(records[0].to_room, "Garage");
    }

    #[rstest]
    #[tokio::test]
    async fn legacy_records_migrate_once_and_are_written_back() {
        let dir = TempDir::new().expect("tempdir");
        let path = dir.path().join(BOXES_FILE);
        fs::write(
            &path,
            r#"[{"id": "7", "photo": "x", "from": "A", "to": "B"}]"#,
        )
        .expect("seed file");

        let store = open(&dir);
        let records = store.list().await.expect("list succeeds");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].box_id.as_str(), "BOX-000007");
        assert_eq!(records[0].photo_path, "x");
        assert_eq!(records[0].from_room, "A");
        assert_eq!(records[0].to_room, "B");
        assert!(!records[0].deleted);
        drop(store);

        // The file now holds the migrated shape; reopening parses it as
        // current and changes nothing further.
        let rewritten = fs::read_to_string(&path).expect("read back");
        assert!(rewritten.contains("\"box_id\""));
        assert!(!rewritten.contains("\"id\""));

        let reopened = open(&dir);
        let records = reopened.list().await.expect("list succeeds");
        assert_eq!(records[0].box_id.as_str(), "BOX-000007");
        let unchanged = fs::read_to_string(&path).expect("read back");
        assert_eq!(unchanged, rewritten);
    }

    #[rstest]
    #[tokio::test]
    async fn records_without_a_deleted_flag_gain_one_on_load() {
        let dir = TempDir::new().expect("tempdir");
        let path = dir.path().join(BOXES_FILE);
        fs::write(
            &path,
            r#"[{
                "box_id": "BOX-000003",
                "short_description": "Lamps",
                "from_room": "Hall",
                "to_room": "Den",
                "photo_path": "x",
                "date_created": "2025-12-01",
                "packed_by": "Kim",
                "qr_url": "http://boxes.example.test/box/BOX-000003"
            }]"#,
        )
        .expect("seed file");

        let _store = open(&dir);
        let rewritten = fs::read_to_string(&path).expect("read back");
        assert!(rewritten.contains("\"deleted\": false"));
    }

    #[rstest]
    fn an_unreadable_record_fails_the_load() {
        let dir = TempDir::new().expect("tempdir");
        fs::write(
            dir.path().join(BOXES_FILE),
            r#"[{"surprise": true}]"#,
        )
        .expect("seed file");

        let error = JsonBoxRepository::open(dir.path(), &base(), today())
            .expect_err("load must fail");
        assert!(error.to_string().contains("record 0"));
    }

    #[rstest]
    #[tokio::test]
    async fn an_empty_file_loads_as_an_empty_store() {
        let dir = TempDir::new().expect("tempdir");
        fs::write(dir.path().join(BOXES_FILE), "").expect("seed file");
        let store = open(&dir);
        assert!(store.list().await.expect("list succeeds").is_empty());
    }
}
