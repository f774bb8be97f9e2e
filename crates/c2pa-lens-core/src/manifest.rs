//! Manifest Model
//!
//! Deserialized form of the verification result produced by the upstream
//! C2PA engine. The model is schema tolerant: unknown fields are ignored,
//! optional fields stay `None` when absent, and collections that are missing
//! or `null` become empty. Nothing here carries behavior beyond structural
//! access.

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

use crate::assertion::Assertion;
use crate::error::{LensError, Result};

/// Root of an upstream verification result
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VerificationResult {
    /// Label of the current manifest. Not guaranteed to be a key of `manifests`.
    #[serde(
        rename = "active_manifest",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub active_manifest_label: Option<String>,

    /// Every manifest embedded in the content, keyed by label
    #[serde(default, deserialize_with = "null_as_default")]
    pub manifests: BTreeMap<String, ManifestEntry>,

    /// Overall verdict, e.g. `Valid` or `Invalid`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub validation_state: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub validation_results: Option<ValidationResults>,
}

impl VerificationResult {
    /// Create an empty result with the given validation state
    pub fn new(validation_state: impl Into<String>) -> Self {
        Self {
            validation_state: Some(validation_state.into()),
            ..Self::default()
        }
    }

    /// Parse an upstream JSON payload
    pub fn from_json(bytes: &[u8]) -> Result<Self> {
        serde_json::from_slice(bytes).map_err(|e| LensError::MalformedPayload(e.to_string()))
    }

    /// Serialize back to JSON bytes
    pub fn to_json(&self) -> Result<Vec<u8>> {
        serde_json::to_vec(self).map_err(LensError::from)
    }

    /// Resolve the active manifest
    ///
    /// Returns `None` when no label is set or the label is dangling.
    pub fn active_manifest(&self) -> Option<&ManifestEntry> {
        self.active_manifest_label
            .as_deref()
            .and_then(|label| self.manifests.get(label))
    }

    /// Look up a manifest by label
    pub fn manifest(&self, label: &str) -> Option<&ManifestEntry> {
        self.manifests.get(label)
    }

    /// Insert a manifest under its own label
    pub fn with_manifest(mut self, manifest: ManifestEntry) -> Self {
        self.manifests.insert(manifest.label.clone(), manifest);
        self
    }

    pub fn with_active_manifest(mut self, label: impl Into<String>) -> Self {
        self.active_manifest_label = Some(label.into());
        self
    }

    pub fn with_validation_results(mut self, results: ValidationResults) -> Self {
        self.validation_results = Some(results);
        self
    }
}

/// One manifest in the graph
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ManifestEntry {
    /// Label; matches the key this entry is stored under
    pub label: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instance_id: Option<String>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub assertions: Vec<Assertion>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub claim_generator_info: Vec<ClaimGeneratorInfo>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signature_info: Option<SignatureInfo>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<Thumbnail>,

    /// Ingredient manifests, kept opaque
    #[serde(default, deserialize_with = "null_as_default")]
    pub ingredients: Vec<serde_json::Value>,
}

impl ManifestEntry {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            ..Self::default()
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_signature_info(mut self, signature_info: SignatureInfo) -> Self {
        self.signature_info = Some(signature_info);
        self
    }

    pub fn with_assertion(mut self, assertion: Assertion) -> Self {
        self.assertions.push(assertion);
        self
    }

    pub fn with_claim_generator(mut self, info: ClaimGeneratorInfo) -> Self {
        self.claim_generator_info.push(info);
        self
    }

    /// Name of the first claim generator, if any
    pub fn claim_generator_name(&self) -> Option<&str> {
        self.claim_generator_info
            .first()
            .and_then(|info| info.name.as_deref())
    }

    /// Signing time, if the manifest carries signature info with a time
    pub fn signed_at(&self) -> Option<DateTime<FixedOffset>> {
        self.signature_info.as_ref().and_then(|sig| sig.signed_at)
    }
}

/// Signature metadata, already verified upstream
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignatureInfo {
    #[serde(rename = "alg", default, skip_serializing_if = "Option::is_none")]
    pub algorithm: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cert_serial_number: Option<String>,

    /// Signer identity from the certificate subject
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub common_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub issuer: Option<String>,

    /// Signing time (RFC 3339 with offset)
    #[serde(rename = "time", default, skip_serializing_if = "Option::is_none")]
    pub signed_at: Option<DateTime<FixedOffset>>,
}

impl SignatureInfo {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_algorithm(mut self, algorithm: impl Into<String>) -> Self {
        self.algorithm = Some(algorithm.into());
        self
    }

    pub fn with_common_name(mut self, common_name: impl Into<String>) -> Self {
        self.common_name = Some(common_name.into());
        self
    }

    pub fn with_issuer(mut self, issuer: impl Into<String>) -> Self {
        self.issuer = Some(issuer.into());
        self
    }

    pub fn with_signed_at(mut self, signed_at: DateTime<FixedOffset>) -> Self {
        self.signed_at = Some(signed_at);
        self
    }
}

/// Tool that produced a manifest
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClaimGeneratorInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    /// Version of the c2pa-rs library used by the generator
    #[serde(
        rename = "org.contentauth.c2pa_rs",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub c2pa_rs_version: Option<String>,
}

impl ClaimGeneratorInfo {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Thumbnail {
    /// MIME type, e.g. `image/jpeg`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,

    /// JUMBF URI of the thumbnail
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub identifier: Option<String>,
}

/// Detailed validation outcome reported upstream
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationResults {
    #[serde(
        rename = "activeManifest",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub active_manifest: Option<ActiveManifestValidation>,
}

/// Validation statuses for the active manifest, grouped by outcome
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActiveManifestValidation {
    #[serde(default, deserialize_with = "null_as_default")]
    pub success: Vec<ValidationStatus>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub informational: Vec<ValidationStatus>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub failure: Vec<ValidationStatus>,
}

/// A single validation status code (e.g. `claimSignature.validated`)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationStatus {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl ValidationStatus {
    pub fn new(code: impl Into<String>) -> Self {
        Self {
            code: Some(code.into()),
            ..Self::default()
        }
    }

    pub fn with_explanation(mut self, explanation: impl Into<String>) -> Self {
        self.explanation = Some(explanation.into());
        self
    }
}

/// Treat an explicit `null` the same as a missing field
fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
