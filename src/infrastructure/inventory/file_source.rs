//! JSON file inventory source.

use async_trait::async_trait;
use std::path::PathBuf;
use tracing::debug;

use crate::domain::{InventoryError, InventoryRecord, InventorySource};

/// Reads inventory records from a JSON array on disk.
///
/// ```json
/// [{ "id": "inv-1", "kind": "invoice", "data": { "month": 6 } }]
/// ```
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl InventorySource for JsonFileSource {
    async fn fetch(&self) -> Result<Vec<InventoryRecord>, InventoryError> {
        debug!("Reading inventory from {}", self.path.display());

        let raw = tokio::fs::read(&self.path).await?;
        Ok(serde_json::from_slice(&raw)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn temp_path(name: &str) -> PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        std::env::temp_dir().join(format!("gatehouse-{name}-{nanos}.json"))
    }

    #[tokio::test]
    async fn test_fetch_records() {
        let path = temp_path("ok");
        std::fs::write(
            &path,
            r#"[{"id":"inv-1","kind":"invoice","data":{"month":6}},{"id":"u-1","kind":"user"}]"#,
        )
        .unwrap();

        let records = JsonFileSource::new(&path).fetch().await.unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].id, "inv-1");
        assert_eq!(records[0].data["month"], 6);
        assert!(records[1].data.is_null());
    }

    #[tokio::test]
    async fn test_fetch_missing_file() {
        let result = JsonFileSource::new(temp_path("missing")).fetch().await;
        assert!(matches!(result, Err(InventoryError::Io(_))));
    }

    #[tokio::test]
    async fn test_fetch_invalid_json() {
        let path = temp_path("bad");
        std::fs::write(&path, "{ not json").unwrap();

        let result = JsonFileSource::new(&path).fetch().await;
        std::fs::remove_file(&path).unwrap();

        assert!(matches!(result, Err(InventoryError::Parse(_))));
    }
}
