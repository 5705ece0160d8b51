use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use bytes::Bytes;

/// One uploaded file: the raw bytes plus the browser-declared MIME type.
/// Every analysis pass re-extracts from these bytes; nothing else is kept.
#[derive(Debug, Clone)]
pub struct UploadRecord {
    pub id: String,
    pub filename: String,
    pub content_type: String,
    pub bytes: Bytes,
}

#[derive(Clone, Default)]
pub struct UploadRegistry {
    inner: Arc<RwLock<HashMap<String, UploadRecord>>>,
}

impl UploadRegistry {
    pub async fn insert(&self, record: UploadRecord) {
        let mut guard = self.inner.write().await;
        guard.insert(record.id.clone(), record);
    }

    pub async fn get(&self, id: &str) -> Option<UploadRecord> {
        let guard = self.inner.read().await;
        guard.get(id).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn insert_then_get_returns_the_record() {
        let registry = UploadRegistry::default();
        let record = UploadRecord {
            id: "abc".to_string(),
            filename: "funcionarios.csv".to_string(),
            content_type: "text/csv".to_string(),
            bytes: Bytes::from_static(b"Departamento\nRH\n"),
        };
        registry.insert(record).await;

        let found = registry.get("abc").await.unwrap();
        assert_eq!(found.filename, "funcionarios.csv");
        assert_eq!(found.bytes.as_ref(), b"Departamento\nRH\n");
    }

    #[tokio::test]
    async fn unknown_id_is_none() {
        let registry = UploadRegistry::default();
        assert!(registry.get("missing").await.is_none());
    }
}
