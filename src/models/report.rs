use serde::{ Serialize, Deserialize };

/// Structured payload produced by one scanner run. Every list field is
/// required on the wire; absence (or null) is a schema defect, not an empty
/// list. See the validator for the enforcement rules.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScannerReport {
    pub run_metadata: RunMetadata,
    pub coding_tools_and_workflows: Vec<CodingTool>,
    pub ml_learning_resources: Vec<MlResource>,
    pub ai_models_and_platforms: Vec<AiModel>,
    pub notable_trends_or_patterns: Vec<Trend>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RunMetadata {
    pub generated_at_utc: String,
    pub time_window_focus: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CodingTool {
    pub title: String,
    pub summary: String,
    pub why_it_matters_for_devs: String,
    pub link: String,
    pub tags: Vec<String>,
}

/// `level` and `format` are kept as plain strings: the upstream vocabulary
/// drifts, and an unrecognized value is flagged rather than rejected.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MlResource {
    pub title: String,
    pub level: String,
    pub format: String,
    pub summary: String,
    pub what_you_learn: String,
    pub link: String,
    pub tags: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AiModel {
    pub name: String,
    #[serde(rename = "type")]
    pub model_type: String,
    pub summary: String,
    pub key_capabilities: Vec<String>,
    pub is_new_or_updated: bool,
    pub released_or_updated_date: String,
    pub link: String,
    pub tags: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Trend {
    pub short_title: String,
    pub description: String,
    pub evidence_links: Vec<String>,
}

/// Closed vocabularies the validator recognizes today.
pub const RESOURCE_LEVELS: &[&str] = &["beginner", "intermediate", "advanced"];
pub const RESOURCE_FORMATS: &[&str] = &["course", "blog", "notebook", "tutorial", "video", "docs"];
pub const MODEL_TYPES: &[&str] = &["llm", "vision", "audio", "multimodal", "tool", "platform"];
