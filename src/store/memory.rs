use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{ ScanStore, StoredRecord };
use crate::error::RadarError;
use crate::models::report::ScannerReport;

/// In-process store for local runs and tests. Rows only live as long as the
/// process does.
pub struct MemoryScanStore {
    rows: RwLock<Vec<StoredRecord>>,
}

impl MemoryScanStore {
    pub fn new() -> Self {
        Self { rows: RwLock::new(Vec::new()) }
    }
}

impl Default for MemoryScanStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ScanStore for MemoryScanStore {
    async fn insert(&self, report: &ScannerReport) -> Result<StoredRecord, RadarError> {
        let record = StoredRecord {
            id: Uuid::new_v4().to_string(),
            created_at: Utc::now(),
            run_metadata: report.run_metadata.clone(),
            coding_tools: report.coding_tools_and_workflows.clone(),
            ml_resources: report.ml_learning_resources.clone(),
            ai_models: report.ai_models_and_platforms.clone(),
            trends: report.notable_trends_or_patterns.clone(),
        };

        let mut rows = self.rows.write().await;
        rows.push(record.clone());
        Ok(record)
    }

    async fn select_latest(&self) -> Result<Option<StoredRecord>, RadarError> {
        let rows = self.rows.read().await;
        Ok(rows.iter().max_by_key(|r| r.created_at).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::report::RunMetadata;
    use std::sync::Arc;

    fn empty_report(window: &str) -> ScannerReport {
        ScannerReport {
            run_metadata: RunMetadata {
                generated_at_utc: "2025-01-01T00:00:00Z".to_string(),
                time_window_focus: window.to_string(),
            },
            coding_tools_and_workflows: vec![],
            ml_learning_resources: vec![],
            ai_models_and_platforms: vec![],
            notable_trends_or_patterns: vec![],
        }
    }

    #[tokio::test]
    async fn empty_store_has_no_latest() {
        let store = MemoryScanStore::new();
        assert!(store.select_latest().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn latest_resolves_by_creation_timestamp() {
        let store = MemoryScanStore::new();
        store.insert(&empty_report("first")).await.unwrap();
        tokio::time::sleep(std::time::Duration::from_millis(5)).await;
        let second = store.insert(&empty_report("second")).await.unwrap();

        let latest = store.select_latest().await.unwrap().unwrap();
        assert_eq!(latest.id, second.id);
        assert_eq!(latest.run_metadata.time_window_focus, "second");
    }

    #[tokio::test]
    async fn concurrent_inserts_both_land() {
        let store = Arc::new(MemoryScanStore::new());
        let report_a = empty_report("a");
        let report_b = empty_report("b");
        let (a, b) = tokio::join!(
            store.insert(&report_a),
            store.insert(&report_b),
        );
        let a = a.unwrap();
        let b = b.unwrap();
        assert_ne!(a.id, b.id);

        let latest = store.select_latest().await.unwrap().unwrap();
        let max = a.created_at.max(b.created_at);
        assert_eq!(latest.created_at, max);
    }
}
