//! # C2PA Lens Core
//!
//! Interprets a raw C2PA verification result and distills it into a compact,
//! stable summary: who last signed the content, which actions were recorded,
//! which AI training and mining constraints apply, and the signing history of
//! every manifest embedded in the content.
//!
//! ## Components
//!
//! - **Manifest Model** ([`manifest`], [`assertion`]): the deserialized upstream
//!   verification result. Tolerant of unknown fields.
//! - **Manifest Summarizer** ([`summarizer`]): a pure, stateless transform.
//! - **Summary Model** ([`summary`]): the flat output returned to callers.
//!
//! This crate never verifies signatures. It only re-presents verification
//! results computed upstream.
//!
//! ## Usage
//!
//! ```ignore
//! use c2pa_lens_core::{summarize, VerificationResult};
//!
//! let result = VerificationResult::from_json(&upstream_bytes)?;
//! let summary = summarize(&result);
//! println!("Signed by {:?}", summary.signer);
//! ```

pub mod assertion;
pub mod error;
pub mod manifest;
pub mod summarizer;
pub mod summary;

pub use assertion::{
    Action, ActionList, Assertion, AssertionData, TrainingMining, TrainingMiningEntry,
    TrainingUse, ACTIONS_LABEL, AI_GENERATIVE_TRAINING_KEY, AI_INFERENCE_KEY,
    TRAINING_MINING_LABEL,
};
pub use error::{LensError, Result};
pub use manifest::{
    ActiveManifestValidation, ClaimGeneratorInfo, ManifestEntry, SignatureInfo, Thumbnail,
    ValidationResults, ValidationStatus, VerificationResult,
};
pub use summarizer::summarize;
pub use summary::{
    ActionSummary, HistoryRecord, Summary, TrainingMiningSummary, UsageSummary,
    ValidationFailure,
};
