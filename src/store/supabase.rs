use async_trait::async_trait;
use reqwest::{ Client as HttpClient, header::{ HeaderMap, HeaderValue, AUTHORIZATION } };
use serde::Serialize;

use super::{ ScanStore, StoredRecord };
use crate::cli::Args;
use crate::error::RadarError;
use crate::models::report::{ AiModel, CodingTool, MlResource, RunMetadata, ScannerReport, Trend };

/// Store backend over the Supabase PostgREST API, using the service role key
/// for server-side writes. The `id` and `created_at` columns are assigned by
/// the database.
pub struct SupabaseScanStore {
    http: HttpClient,
    base_url: String,
    table: String,
}

#[derive(Serialize)]
struct NewRow<'a> {
    run_metadata: &'a RunMetadata,
    coding_tools: &'a [CodingTool],
    ml_resources: &'a [MlResource],
    ai_models: &'a [AiModel],
    trends: &'a [Trend],
}

impl SupabaseScanStore {
    pub fn new(args: &Args) -> Result<Self, RadarError> {
        if args.store_url.is_empty() || args.store_service_key.is_empty() {
            return Err(RadarError::Config(
                "supabase store requires SUPABASE_URL and SUPABASE_SERVICE_ROLE_KEY".to_string(),
            ));
        }

        let mut headers = HeaderMap::new();
        let key_value = HeaderValue::from_str(&args.store_service_key)
            .map_err(|e| RadarError::Config(format!("invalid service key format: {}", e)))?;
        headers.insert("apikey", key_value);
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {}", args.store_service_key))
                .map_err(|e| RadarError::Config(format!("invalid service key format: {}", e)))?,
        );

        let http = HttpClient::builder()
            .default_headers(headers)
            .build()
            .map_err(|e| RadarError::Config(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http,
            base_url: format!("{}/rest/v1", args.store_url.trim_end_matches('/')),
            table: args.store_table.clone(),
        })
    }
}

#[async_trait]
impl ScanStore for SupabaseScanStore {
    async fn insert(&self, report: &ScannerReport) -> Result<StoredRecord, RadarError> {
        let url = format!("{}/{}", self.base_url, self.table);
        let row = NewRow {
            run_metadata: &report.run_metadata,
            coding_tools: &report.coding_tools_and_workflows,
            ml_resources: &report.ml_learning_resources,
            ai_models: &report.ai_models_and_platforms,
            trends: &report.notable_trends_or_patterns,
        };

        let inserted: Vec<StoredRecord> = self.http.post(&url)
            .header("Prefer", "return=representation")
            .json(&row)
            .send()
            .await
            .map_err(|e| RadarError::Storage(e.to_string()))?
            .error_for_status()
            .map_err(|e| RadarError::Storage(e.to_string()))?
            .json()
            .await
            .map_err(|e| RadarError::Storage(format!("malformed insert response: {}", e)))?;

        inserted.into_iter().next()
            .ok_or_else(|| RadarError::Storage("insert returned no row".to_string()))
    }

    async fn select_latest(&self) -> Result<Option<StoredRecord>, RadarError> {
        let url = format!(
            "{}/{}?select=*&order=created_at.desc&limit=1",
            self.base_url, self.table
        );

        let rows: Vec<StoredRecord> = self.http.get(&url)
            .send()
            .await
            .map_err(|e| RadarError::Storage(e.to_string()))?
            .error_for_status()
            .map_err(|e| RadarError::Storage(e.to_string()))?
            .json()
            .await
            .map_err(|e| RadarError::Storage(format!("malformed select response: {}", e)))?;

        Ok(rows.into_iter().next())
    }
}
