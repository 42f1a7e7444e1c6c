use serde_json::Value;

use crate::error::RadarError;
use crate::models::report::ScannerReport;
use super::validate;

/// Strips surrounding markdown code fences plus whitespace. Runs to a fixed
/// point, so normalization is idempotent for any input, fenced or not.
pub fn normalize(raw: &str) -> &str {
    let mut text = raw.trim();

    loop {
        let before = text;

        if let Some(rest) = text.strip_prefix("```") {
            // Drop the optional language tag up to the end of the fence line.
            text = match rest.find('\n') {
                Some(i) => &rest[i + 1..],
                None => rest.trim_start_matches(|c: char| c.is_ascii_alphanumeric()),
            };
        }

        if let Some(rest) = text.strip_suffix("```") {
            text = rest;
        }

        text = text.trim();
        if text == before {
            return text;
        }
    }
}

/// Turns raw model text into a validated report. Formatting noise
/// (code fences, whitespace) is tolerated; anything else fails loudly
/// with a taxonomy-specific error.
pub fn extract(raw: &str) -> Result<ScannerReport, RadarError> {
    let normalized = normalize(raw);

    let value: Value = serde_json::from_str(normalized).map_err(|e| RadarError::Parse {
        message: e.to_string(),
        raw: raw.to_string(),
    })?;

    validate::validate(&value)
}
