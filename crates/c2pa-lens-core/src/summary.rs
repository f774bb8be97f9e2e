//! Summary Model
//!
//! Flat, renderer-friendly projection of a verification result. Absent
//! values are omitted from the JSON output instead of being replaced with
//! placeholders.

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

use crate::assertion::{Action, TrainingMiningEntry, TrainingUse};
use crate::error::{LensError, Result};
use crate::manifest::ValidationStatus;

/// Summary of one verification result
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    /// Title of the active manifest
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Common name of the active manifest's signer
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signer: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub issuer: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signed_at: Option<DateTime<FixedOffset>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub algorithm: Option<String>,

    /// Actions of the active manifest; absent when no active manifest resolved
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actions: Option<Vec<ActionSummary>>,

    /// Upstream verdict, copied verbatim
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub validation_state: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub training_mining: Option<TrainingMiningSummary>,

    /// Failure statuses reported for the active manifest
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub validation_failures: Vec<ValidationFailure>,

    /// One record per manifest, newest signature first
    #[serde(default)]
    pub history: Vec<HistoryRecord>,
}

impl Summary {
    /// Create a summary carrying only the validation state
    pub fn new(validation_state: Option<String>) -> Self {
        Self {
            validation_state,
            ..Self::default()
        }
    }

    /// Serialize to JSON bytes
    pub fn to_json(&self) -> Result<Vec<u8>> {
        serde_json::to_vec(self).map_err(LensError::from)
    }
}

/// An extracted action
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionSummary {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub digital_source_type: Option<String>,
}

impl From<&Action> for ActionSummary {
    fn from(action: &Action) -> Self {
        Self {
            action: action.action.clone(),
            digital_source_type: action.digital_source_type.clone(),
        }
    }
}

/// AI-usage permissions; each category is independently optional
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrainingMiningSummary {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ai_inference: Option<UsageSummary>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ai_generative_training: Option<UsageSummary>,
}

/// `(use, constraintsInfo)` pair for one AI-use category
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageSummary {
    #[serde(rename = "use", default, skip_serializing_if = "Option::is_none")]
    pub usage: Option<TrainingUse>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub constraints_info: Option<String>,
}

impl From<&TrainingMiningEntry> for UsageSummary {
    fn from(entry: &TrainingMiningEntry) -> Self {
        Self {
            usage: entry.usage,
            constraints_info: entry.constraints_info.clone(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationFailure {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
}

impl From<&ValidationStatus> for ValidationFailure {
    fn from(status: &ValidationStatus) -> Self {
        Self {
            code: status.code.clone(),
            explanation: status.explanation.clone(),
        }
    }
}

/// Per-manifest entry of the signing history
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryRecord {
    pub label: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signer: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub issuer: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signed_at: Option<DateTime<FixedOffset>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub algorithm: Option<String>,

    /// Name of the first claim generator
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub claim_generator: Option<String>,

    #[serde(default)]
    pub actions: Vec<ActionSummary>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub training_mining: Option<TrainingMiningSummary>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_empty_summary_serializes_state_and_history_only() {
        let summary = Summary::new(Some("Invalid".into()));
        let value: serde_json::Value = serde_json::from_slice(&summary.to_json().unwrap()).unwrap();

        assert_eq!(value, json!({ "validationState": "Invalid", "history": [] }));
    }

    #[test]
    fn test_field_names_are_camel_case() {
        let signed_at = DateTime::parse_from_rfc3339("2025-06-01T12:30:00+02:00").unwrap();
        let summary = Summary {
            signer: Some("Acme".into()),
            signed_at: Some(signed_at),
            actions: Some(vec![ActionSummary {
                action: Some("c2pa.created".into()),
                digital_source_type: Some("http://cv.iptc.org/newscodes/digitalsourcetype/digitalCapture".into()),
            }]),
            training_mining: Some(TrainingMiningSummary {
                ai_inference: Some(UsageSummary {
                    usage: Some(TrainingUse::Constrained),
                    constraints_info: Some("no facial data".into()),
                }),
                ai_generative_training: None,
            }),
            history: vec![HistoryRecord {
                label: "urn:c2pa:1".into(),
                claim_generator: Some("Camera App".into()),
                ..HistoryRecord::default()
            }],
            ..Summary::default()
        };

        let value = serde_json::to_value(&summary).unwrap();

        assert_eq!(value["signedAt"], "2025-06-01T12:30:00+02:00");
        assert_eq!(value["actions"][0]["digitalSourceType"], "http://cv.iptc.org/newscodes/digitalsourcetype/digitalCapture");
        assert_eq!(
            value["trainingMining"],
            json!({ "aiInference": { "use": "constrained", "constraintsInfo": "no facial data" } })
        );
        assert_eq!(
            value["history"][0],
            json!({ "label": "urn:c2pa:1", "claimGenerator": "Camera App", "actions": [] })
        );
        assert!(value.get("title").is_none());
        assert!(value.get("validationFailures").is_none());
    }
}
