mod memory;
mod supabase;

use async_trait::async_trait;
use chrono::{ DateTime, Utc };
use log::info;
use serde::{ Serialize, Deserialize };
use std::sync::Arc;

use crate::cli::Args;
use crate::error::RadarError;
use crate::models::report::{ AiModel, CodingTool, MlResource, RunMetadata, ScannerReport, Trend };

pub use memory::MemoryScanStore;
pub use supabase::SupabaseScanStore;

/// Persisted row shape, identical to the `/latest` response body. Rows are
/// append-only; nothing in this crate updates or deletes one.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StoredRecord {
    pub id: String,
    pub created_at: DateTime<Utc>,
    pub run_metadata: RunMetadata,
    pub coding_tools: Vec<CodingTool>,
    pub ml_resources: Vec<MlResource>,
    pub ai_models: Vec<AiModel>,
    pub trends: Vec<Trend>,
}

#[async_trait]
pub trait ScanStore: Send + Sync {
    /// Appends one validated report; returns the stored row with its
    /// assigned id and creation timestamp.
    async fn insert(&self, report: &ScannerReport) -> Result<StoredRecord, RadarError>;

    /// The row with the maximum `created_at`, or `None` when empty.
    async fn select_latest(&self) -> Result<Option<StoredRecord>, RadarError>;
}

pub fn create_store(args: &Args) -> Result<Arc<dyn ScanStore>, RadarError> {
    match args.store_type.to_lowercase().as_str() {
        "memory" => Ok(Arc::new(MemoryScanStore::new())),
        "supabase" => {
            let store = SupabaseScanStore::new(args)?;
            Ok(Arc::new(store))
        }
        other => Err(RadarError::Config(format!("unsupported store type: {}", other))),
    }
}

pub fn initialize_store(args: &Args) -> Result<Arc<dyn ScanStore>, RadarError> {
    info!("Scan results will be stored in: {}", args.store_type);
    create_store(args)
}
