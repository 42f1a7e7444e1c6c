use chrono::{ DateTime, Utc };
use log::{ error, info };
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;

use crate::error::RadarError;
use crate::llm::ChatClient;
use crate::models::chat::ChatMessage;
use crate::prompts::{ BACKGROUND_SCANNER_PROMPT, SCAN_TRIGGER_MESSAGE };
use crate::scanner::extract;
use crate::store::ScanStore;

#[derive(Debug, Clone, Serialize)]
pub struct IngestionStats {
    pub coding_tools: usize,
    pub ml_resources: usize,
    pub ai_models: usize,
    pub trends: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct IngestionSummary {
    pub result_id: String,
    pub timestamp: DateTime<Utc>,
    pub stats: IngestionStats,
}

/// One ingestion run: scan completion -> extract -> validate -> persist.
/// Sequential and atomic at the store boundary: the insert only happens
/// after validation succeeds, and no stage is retried.
pub struct IngestionPipeline {
    client: Arc<dyn ChatClient>,
    store: Arc<dyn ScanStore>,
    max_tokens: u32,
    timeout: Duration,
}

impl IngestionPipeline {
    pub fn new(
        client: Arc<dyn ChatClient>,
        store: Arc<dyn ScanStore>,
        max_tokens: u32,
        timeout: Duration,
    ) -> Self {
        Self { client, store, max_tokens, timeout }
    }

    /// `trigger` names the invocation path ("Scan" or "Refresh") and only
    /// affects log lines.
    pub async fn run(&self, trigger: &str) -> Result<IngestionSummary, RadarError> {
        info!("[{}] Starting scanner job...", trigger);

        let history = [ChatMessage::user(SCAN_TRIGGER_MESSAGE)];
        let completion = tokio::time::timeout(
            self.timeout,
            self.client.complete(BACKGROUND_SCANNER_PROMPT, &history, self.max_tokens),
        )
        .await
        .map_err(|_| {
            RadarError::Upstream(format!(
                "scanner completion timed out after {}s",
                self.timeout.as_secs()
            ))
        })??;

        if completion.trim().is_empty() {
            return Err(RadarError::Upstream("empty response from model".to_string()));
        }

        info!("[{}] Received response from AI", trigger);

        let report = extract::extract(&completion).map_err(|e| {
            if let RadarError::Parse { raw, .. } = &e {
                // Raw model text stays in the server log only.
                error!("[{}] Failed to parse scanner output. Response text: {}", trigger, raw);
            }
            e
        })?;

        let record = self.store.insert(&report).await?;
        info!("[{}] Successfully saved result: {}", trigger, record.id);

        Ok(IngestionSummary {
            result_id: record.id,
            timestamp: record.created_at,
            stats: IngestionStats {
                coding_tools: report.coding_tools_and_workflows.len(),
                ml_resources: report.ml_learning_resources.len(),
                ai_models: report.ai_models_and_platforms.len(),
                trends: report.notable_trends_or_patterns.len(),
            },
        })
    }
}
