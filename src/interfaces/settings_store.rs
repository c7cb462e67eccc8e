use std::path::Path;

use rusqlite::{params, Connection, OpenFlags, OptionalExtension};
use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;

const TABLENAME: &str = "settings";
const KEY_FIELD: &str = "key";
const VALUE_FIELD: &str = "value";

#[derive(Error, Debug)]
pub enum SettingsStoreError {
    #[error("settings database error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("could not encode or decode setting: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub struct AccessRO;
pub struct AccessRW;

pub struct Store<AccessTag>(Connection, AccessTag);

pub type StoreRW = Store<AccessRW>;
pub type StoreRO = Store<AccessRO>;

// Methods common to read-only and read-write connections
impl<AccessTag> Store<AccessTag> {
    fn select(&self, key: &str) -> Result<Option<Vec<u8>>, SettingsStoreError> {
        self.0
            .query_row(
                &format!("SELECT {VALUE_FIELD} FROM '{TABLENAME}' WHERE {KEY_FIELD} = ?1"),
                [key],
                |r| r.get::<_, Vec<u8>>(0),
            )
            .optional()
            .map_err(Into::into)
    }

    pub fn get<T: DeserializeOwned>(&self, key: impl AsRef<str>) -> Result<Option<T>, SettingsStoreError> {
        self.select(key.as_ref())?
            .map(|v| serde_json::from_slice::<T>(&v))
            .transpose()
            .map_err(Into::into)
    }
}

impl StoreRO {
    /// Opens an existing store. Returns `None` when nothing has been stored yet.
    pub fn open(path: impl AsRef<Path>) -> Result<Option<Self>, SettingsStoreError> {
        if !path.as_ref().exists() {
            return Ok(None);
        }
        log::debug!("Opening settings store {} read-only", path.as_ref().display());
        let connection = Connection::open_with_flags(path, OpenFlags::SQLITE_OPEN_READ_ONLY)?;
        Ok(Some(Store(connection, AccessRO)))
    }
}

impl StoreRW {
    pub fn open(path: impl AsRef<Path>) -> Result<Self, SettingsStoreError> {
        log::debug!("Opening settings store {} read-write", path.as_ref().display());
        // Create directory for DB if it doesn't already exist
        std::fs::create_dir_all(path.as_ref().parent().unwrap_or(Path::new("")))?;
        let connection = Connection::open(path)?;
        connection.execute(
            &format!(
                "CREATE TABLE IF NOT EXISTS '{TABLENAME}' (
                {KEY_FIELD} TEXT PRIMARY KEY NOT NULL,
                {VALUE_FIELD} BLOB NOT NULL
                )"
            ),
            [],
        )?;

        Ok(Store(connection, AccessRW))
    }

    fn upsert(&self, key: &str, value: &[u8]) -> Result<(), SettingsStoreError> {
        let mut stmt = self.0.prepare(&format!(
            "INSERT INTO '{TABLENAME}' ({KEY_FIELD}, {VALUE_FIELD}) values (?1, ?2)
            ON CONFLICT({KEY_FIELD}) DO UPDATE SET {VALUE_FIELD}=?2",
        ))?;
        stmt.execute(params![key, value])?;
        Ok(())
    }

    pub fn set<V: Serialize>(&self, key: impl AsRef<str>, value: V) -> Result<(), SettingsStoreError> {
        self.upsert(key.as_ref(), &serde_json::to_vec(&value)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    #[test]
    fn set_then_get_roundtrips_json() {
        let tempdir = tempfile::tempdir().unwrap();
        let path = tempdir.path().join("nested/settings.db");

        let store = StoreRW::open(&path).unwrap();
        store.set("hub_url", "https://myhub.example.net").unwrap();
        store.set("extra", json!({"a": [1, 2]})).unwrap();
        store.set("hub_url", "https://otherhub.example.net").unwrap();

        let store = StoreRO::open(&path).unwrap().unwrap();
        assert_eq!(
            store.get::<String>("hub_url").unwrap().as_deref(),
            Some("https://otherhub.example.net")
        );
        assert_eq!(store.get::<Value>("extra").unwrap(), Some(json!({"a": [1, 2]})));
        assert!(store.get::<String>("missing").unwrap().is_none());
    }

    #[test]
    fn read_only_open_of_missing_store_is_none() {
        let tempdir = tempfile::tempdir().unwrap();
        assert!(StoreRO::open(tempdir.path().join("settings.db"))
            .unwrap()
            .is_none());
    }
}
