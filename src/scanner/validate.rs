use log::warn;
use serde_json::{ Map, Value };

use crate::error::RadarError;
use crate::models::report::{
    ScannerReport,
    MODEL_TYPES,
    RESOURCE_FORMATS,
    RESOURCE_LEVELS,
};

/// Checks a decoded value against the report schema before it is trusted.
///
/// Missing or wrongly-typed required fields fail hard with the offending
/// field path in the message; there is no defaulting of absent lists.
/// Enumerated fields (`level`, `format`, `type`) are the one soft spot:
/// values outside the recognized vocabulary are flagged in the log but
/// accepted, since the upstream vocabulary drifts over time.
pub fn validate(value: &Value) -> Result<ScannerReport, RadarError> {
    let root = require_object(value, "report")?;

    let metadata = require_object(
        root.get("run_metadata")
            .ok_or_else(|| missing("run_metadata"))?,
        "run_metadata",
    )?;
    require_str(metadata, "run_metadata", "generated_at_utc")?;
    require_str(metadata, "run_metadata", "time_window_focus")?;

    let coding_tools = require_list(root, "coding_tools_and_workflows")?;
    let ml_resources = require_list(root, "ml_learning_resources")?;
    let ai_models = require_list(root, "ai_models_and_platforms")?;
    let trends = require_list(root, "notable_trends_or_patterns")?;

    for (i, item) in coding_tools.iter().enumerate() {
        let path = format!("coding_tools_and_workflows[{}]", i);
        let obj = require_object(item, &path)?;
        for field in ["title", "summary", "why_it_matters_for_devs", "link"] {
            require_str(obj, &path, field)?;
        }
        require_str_list(obj, &path, "tags")?;
    }

    for (i, item) in ml_resources.iter().enumerate() {
        let path = format!("ml_learning_resources[{}]", i);
        let obj = require_object(item, &path)?;
        for field in ["title", "level", "format", "summary", "what_you_learn", "link"] {
            require_str(obj, &path, field)?;
        }
        require_str_list(obj, &path, "tags")?;
        flag_unrecognized(obj, &path, "level", RESOURCE_LEVELS);
        flag_unrecognized(obj, &path, "format", RESOURCE_FORMATS);
    }

    for (i, item) in ai_models.iter().enumerate() {
        let path = format!("ai_models_and_platforms[{}]", i);
        let obj = require_object(item, &path)?;
        for field in ["name", "type", "summary", "released_or_updated_date", "link"] {
            require_str(obj, &path, field)?;
        }
        require_bool(obj, &path, "is_new_or_updated")?;
        require_str_list(obj, &path, "key_capabilities")?;
        require_str_list(obj, &path, "tags")?;
        flag_unrecognized(obj, &path, "type", MODEL_TYPES);
    }

    for (i, item) in trends.iter().enumerate() {
        let path = format!("notable_trends_or_patterns[{}]", i);
        let obj = require_object(item, &path)?;
        require_str(obj, &path, "short_title")?;
        require_str(obj, &path, "description")?;
        require_str_list(obj, &path, "evidence_links")?;
    }

    serde_json::from_value(value.clone())
        .map_err(|e| RadarError::Validation(format!("report decode failed: {}", e)))
}

fn missing(path: &str) -> RadarError {
    RadarError::Validation(format!("missing required field '{}'", path))
}

fn wrong_type(path: &str, expected: &str) -> RadarError {
    RadarError::Validation(format!("field '{}' must be {}", path, expected))
}

fn require_object<'a>(value: &'a Value, path: &str) -> Result<&'a Map<String, Value>, RadarError> {
    value.as_object().ok_or_else(|| wrong_type(path, "an object"))
}

fn require_str(obj: &Map<String, Value>, parent: &str, field: &str) -> Result<(), RadarError> {
    let path = format!("{}.{}", parent, field);
    obj.get(field)
        .ok_or_else(|| missing(&path))?
        .as_str()
        .ok_or_else(|| wrong_type(&path, "a string"))?;
    Ok(())
}

fn require_bool(obj: &Map<String, Value>, parent: &str, field: &str) -> Result<(), RadarError> {
    let path = format!("{}.{}", parent, field);
    obj.get(field)
        .ok_or_else(|| missing(&path))?
        .as_bool()
        .ok_or_else(|| wrong_type(&path, "a boolean"))?;
    Ok(())
}

fn require_list<'a>(
    obj: &'a Map<String, Value>,
    field: &str,
) -> Result<&'a Vec<Value>, RadarError> {
    obj.get(field)
        .ok_or_else(|| missing(field))?
        .as_array()
        .ok_or_else(|| wrong_type(field, "an array"))
}

fn require_str_list(obj: &Map<String, Value>, parent: &str, field: &str) -> Result<(), RadarError> {
    let path = format!("{}.{}", parent, field);
    let list = obj.get(field)
        .ok_or_else(|| missing(&path))?
        .as_array()
        .ok_or_else(|| wrong_type(&path, "an array"))?;
    for (i, entry) in list.iter().enumerate() {
        if !entry.is_string() {
            return Err(wrong_type(&format!("{}[{}]", path, i), "a string"));
        }
    }
    Ok(())
}

fn flag_unrecognized(obj: &Map<String, Value>, parent: &str, field: &str, recognized: &[&str]) {
    if let Some(value) = obj.get(field).and_then(Value::as_str) {
        if !recognized.contains(&value) {
            warn!("[Scan] unrecognized {}.{} value '{}'", parent, field, value);
        }
    }
}
