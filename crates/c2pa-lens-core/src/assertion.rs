//! Assertions and their label-dependent payloads
//!
//! An assertion's `data` has no fixed shape: the sibling `label` decides how
//! it is read. Payloads are classified once, at deserialization time, into a
//! closed [`AssertionData`] variant.

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use tracing::debug;

use crate::error::LensError;

/// Label of the action-history assertion read by the summarizer
pub const ACTIONS_LABEL: &str = "c2pa.actions.v2";

/// Label of the first-generation action-history assertion
pub const ACTIONS_V1_LABEL: &str = "c2pa.actions";

/// Label of the CAWG training and data mining assertion
pub const TRAINING_MINING_LABEL: &str = "cawg.training-mining";

/// Entry key for AI inference usage
pub const AI_INFERENCE_KEY: &str = "c2pa.ai_inference";

/// Entry key for generative AI training usage
pub const AI_GENERATIVE_TRAINING_KEY: &str = "c2pa.ai_generative_training";

/// A single typed claim within a manifest
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawAssertion", into = "RawAssertion")]
pub struct Assertion {
    /// Semantic type of the assertion (e.g. `c2pa.actions.v2`)
    pub label: String,

    /// Payload, classified according to `label`
    pub data: Option<AssertionData>,
}

/// Polymorphic assertion payload
#[derive(Debug, Clone, PartialEq)]
pub enum AssertionData {
    /// Payload of an action-history assertion
    Actions(ActionList),
    /// Payload of a training-mining assertion
    TrainingMining(TrainingMining),
    /// Any payload this crate does not interpret, kept verbatim
    Unrecognized(serde_json::Value),
}

/// Wire shape of an assertion before its payload is classified
#[derive(Serialize, Deserialize)]
struct RawAssertion {
    label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    data: Option<serde_json::Value>,
}

impl From<RawAssertion> for Assertion {
    fn from(raw: RawAssertion) -> Self {
        let data = raw
            .data
            .filter(|value| !value.is_null())
            .map(|value| AssertionData::classify(&raw.label, value));

        Self {
            label: raw.label,
            data,
        }
    }
}

impl From<Assertion> for RawAssertion {
    fn from(assertion: Assertion) -> Self {
        Self {
            label: assertion.label,
            data: assertion.data.map(AssertionData::into_value),
        }
    }
}

impl AssertionData {
    /// Classify a raw payload by the label it was found under
    ///
    /// A known label whose payload does not have the expected shape is kept
    /// as [`AssertionData::Unrecognized`] rather than rejecting the document.
    pub fn classify(label: &str, value: serde_json::Value) -> Self {
        match label {
            ACTIONS_LABEL | ACTIONS_V1_LABEL => match ActionList::deserialize(&value) {
                Ok(list) => AssertionData::Actions(list),
                Err(_) => AssertionData::Unrecognized(value),
            },
            TRAINING_MINING_LABEL => match TrainingMining::deserialize(&value) {
                Ok(training) => AssertionData::TrainingMining(training),
                Err(_) => AssertionData::Unrecognized(value),
            },
            _ => AssertionData::Unrecognized(value),
        }
    }

    /// Convert back into the wire representation
    pub fn into_value(self) -> serde_json::Value {
        let value = match self {
            AssertionData::Actions(list) => serde_json::to_value(list),
            AssertionData::TrainingMining(training) => serde_json::to_value(training),
            AssertionData::Unrecognized(value) => return value,
        };
        value.unwrap_or(serde_json::Value::Null)
    }

    /// The action list, if this payload carries one
    pub fn actions(&self) -> Option<&[Action]> {
        match self {
            AssertionData::Actions(list) => Some(&list.actions),
            _ => None,
        }
    }

    /// The training-mining entries, if this payload carries them
    pub fn training_mining(&self) -> Option<&TrainingMining> {
        match self {
            AssertionData::TrainingMining(training) => Some(training),
            _ => None,
        }
    }
}

impl Assertion {
    /// Create an assertion with an already classified payload
    pub fn new(label: impl Into<String>, data: Option<AssertionData>) -> Self {
        Self {
            label: label.into(),
            data,
        }
    }

    /// Create a `c2pa.actions.v2` assertion
    pub fn actions(actions: Vec<Action>) -> Self {
        Self::new(
            ACTIONS_LABEL,
            Some(AssertionData::Actions(ActionList { actions })),
        )
    }

    /// Create a `cawg.training-mining` assertion
    pub fn training_mining(entries: BTreeMap<String, TrainingMiningEntry>) -> Self {
        Self::new(
            TRAINING_MINING_LABEL,
            Some(AssertionData::TrainingMining(TrainingMining { entries })),
        )
    }
}

/// Payload of an action-history assertion
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ActionList {
    #[serde(default)]
    pub actions: Vec<Action>,
}

/// One recorded action (e.g. `c2pa.created`, `c2pa.edited`)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Action {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action: Option<String>,

    /// IPTC digital source type URI
    #[serde(
        rename = "digitalSourceType",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub digital_source_type: Option<String>,
}

impl Action {
    pub fn new(action: impl Into<String>) -> Self {
        Self {
            action: Some(action.into()),
            digital_source_type: None,
        }
    }

    pub fn with_digital_source_type(mut self, uri: impl Into<String>) -> Self {
        self.digital_source_type = Some(uri.into());
        self
    }
}

/// Payload of a training-mining assertion
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrainingMining {
    /// Entries are read one by one; `null` or unreadable entries are dropped
    /// without affecting their siblings
    #[serde(default, deserialize_with = "lenient_entries")]
    pub entries: BTreeMap<String, TrainingMiningEntry>,
}

fn lenient_entries<'de, D>(
    deserializer: D,
) -> Result<BTreeMap<String, TrainingMiningEntry>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<BTreeMap<String, serde_json::Value>> = Option::deserialize(deserializer)?;

    Ok(raw
        .unwrap_or_default()
        .into_iter()
        .filter(|(_, value)| !value.is_null())
        .filter_map(|(key, value)| match TrainingMiningEntry::deserialize(&value) {
            Ok(entry) => Some((key, entry)),
            Err(e) => {
                debug!(key = %key, error = %e, "Dropping unreadable training-mining entry");
                None
            }
        })
        .collect())
}

impl TrainingMining {
    pub fn get(&self, key: &str) -> Option<&TrainingMiningEntry> {
        self.entries.get(key)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Permission for one AI-use category
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrainingMiningEntry {
    /// `None` when absent or outside `allowed|notAllowed|constrained`
    #[serde(
        rename = "use",
        default,
        deserialize_with = "lenient_use",
        skip_serializing_if = "Option::is_none"
    )]
    pub usage: Option<TrainingUse>,

    /// Free-text constraints; meaningful only when `usage` is `Constrained`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub constraints_info: Option<String>,
}

fn lenient_use<'de, D>(deserializer: D) -> Result<Option<TrainingUse>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<serde_json::Value> = Option::deserialize(deserializer)?;
    Ok(raw
        .as_ref()
        .and_then(serde_json::Value::as_str)
        .and_then(|s| s.parse().ok()))
}

impl TrainingMiningEntry {
    pub fn new(usage: TrainingUse) -> Self {
        Self {
            usage: Some(usage),
            constraints_info: None,
        }
    }

    pub fn constrained(constraints_info: impl Into<String>) -> Self {
        Self {
            usage: Some(TrainingUse::Constrained),
            constraints_info: Some(constraints_info.into()),
        }
    }
}

/// Whether content may be used for a given AI purpose
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TrainingUse {
    Allowed,
    NotAllowed,
    Constrained,
}

impl TrainingUse {
    pub fn as_str(&self) -> &'static str {
        match self {
            TrainingUse::Allowed => "allowed",
            TrainingUse::NotAllowed => "notAllowed",
            TrainingUse::Constrained => "constrained",
        }
    }
}

impl fmt::Display for TrainingUse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TrainingUse {
    type Err = LensError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "allowed" => Ok(TrainingUse::Allowed),
            "notAllowed" => Ok(TrainingUse::NotAllowed),
            "constrained" => Ok(TrainingUse::Constrained),
            other => Err(LensError::UnknownTrainingUse(other.to_string())),
        }
    }
}
