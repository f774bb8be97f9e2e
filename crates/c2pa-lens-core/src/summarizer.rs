//! Manifest Summarizer
//!
//! Pure transform from a [`VerificationResult`] to a [`Summary`]. It holds no
//! state, performs no I/O and never fails: missing optional data only leaves
//! the corresponding summary field absent.
//!
//! Action extraction and training-mining extraction are two separate folds.
//! Actions accumulate across every matching assertion in
//! order; training-mining is decided by the first qualifying assertion only.

use chrono::{DateTime, FixedOffset};
use std::cmp::Ordering;
use tracing::debug;

use crate::assertion::{
    Assertion, AssertionData, TrainingMining, ACTIONS_LABEL, AI_GENERATIVE_TRAINING_KEY,
    AI_INFERENCE_KEY, TRAINING_MINING_LABEL,
};
use crate::manifest::{ManifestEntry, VerificationResult};
use crate::summary::{
    ActionSummary, HistoryRecord, Summary, TrainingMiningSummary, UsageSummary, ValidationFailure,
};

/// Summarize a verification result
///
/// 1. Copy the validation state
/// 2. Stop early when there are no manifests
/// 3. Populate the top-level fields from the active manifest, if it resolves
/// 4. Build one history record per manifest, newest signature first
pub fn summarize(result: &VerificationResult) -> Summary {
    let mut summary = Summary::new(result.validation_state.clone());

    if result.manifests.is_empty() {
        return summary;
    }

    match result.active_manifest() {
        Some(active) => populate_active(&mut summary, active),
        None => {
            if let Some(label) = result.active_manifest_label.as_deref() {
                debug!(label = %label, "Active manifest label does not resolve to a manifest");
            }
        }
    }

    summary.validation_failures = collect_validation_failures(result);
    summary.history = build_history(result);
    summary
}

/// Copy the active manifest's identity, actions and AI-use info
fn populate_active(summary: &mut Summary, manifest: &ManifestEntry) {
    summary.title = manifest.title.clone();

    if let Some(sig) = &manifest.signature_info {
        summary.signer = sig.common_name.clone();
        summary.issuer = sig.issuer.clone();
        summary.signed_at = sig.signed_at;
        summary.algorithm = sig.algorithm.clone();
    }

    summary.actions = Some(collect_actions(&manifest.assertions));
    summary.training_mining = first_training_mining(&manifest.assertions);
}

/// Accumulate the actions of every `c2pa.actions.v2` assertion, in order
pub fn collect_actions(assertions: &[Assertion]) -> Vec<ActionSummary> {
    assertions
        .iter()
        .filter(|assertion| assertion.label == ACTIONS_LABEL)
        .filter_map(|assertion| assertion.data.as_ref().and_then(AssertionData::actions))
        .flatten()
        .map(ActionSummary::from)
        .collect()
}

/// Training-mining info from the first qualifying assertion
///
/// An assertion qualifies when it carries the training-mining label and a
/// non-empty entry mapping. Later qualifying assertions are ignored.
pub fn first_training_mining(assertions: &[Assertion]) -> Option<TrainingMiningSummary> {
    assertions
        .iter()
        .filter(|assertion| assertion.label == TRAINING_MINING_LABEL)
        .filter_map(|assertion| {
            assertion
                .data
                .as_ref()
                .and_then(AssertionData::training_mining)
        })
        .find(|training| !training.is_empty())
        .map(summarize_training_mining)
}

fn summarize_training_mining(training: &TrainingMining) -> TrainingMiningSummary {
    TrainingMiningSummary {
        ai_inference: training.get(AI_INFERENCE_KEY).map(UsageSummary::from),
        ai_generative_training: training
            .get(AI_GENERATIVE_TRAINING_KEY)
            .map(UsageSummary::from),
    }
}

fn collect_validation_failures(result: &VerificationResult) -> Vec<ValidationFailure> {
    result
        .validation_results
        .as_ref()
        .and_then(|results| results.active_manifest.as_ref())
        .map(|active| active.failure.iter().map(ValidationFailure::from).collect())
        .unwrap_or_default()
}

/// One record per manifest, sorted newest first with unsigned records last
fn build_history(result: &VerificationResult) -> Vec<HistoryRecord> {
    let mut history: Vec<HistoryRecord> = result.manifests.values().map(history_record).collect();

    // Vec::sort_by is stable, so ties keep the map's label order
    history.sort_by(|a, b| newest_first(a.signed_at.as_ref(), b.signed_at.as_ref()));
    history
}

fn history_record(manifest: &ManifestEntry) -> HistoryRecord {
    let sig = manifest.signature_info.as_ref();

    HistoryRecord {
        label: manifest.label.clone(),
        title: manifest.title.clone(),
        signer: sig.and_then(|s| s.common_name.clone()),
        issuer: sig.and_then(|s| s.issuer.clone()),
        signed_at: sig.and_then(|s| s.signed_at),
        algorithm: sig.and_then(|s| s.algorithm.clone()),
        claim_generator: manifest.claim_generator_name().map(str::to_string),
        actions: collect_actions(&manifest.assertions),
        training_mining: first_training_mining(&manifest.assertions),
    }
}

/// Descending by signing time; records without a time sort last
fn newest_first(
    a: Option<&DateTime<FixedOffset>>,
    b: Option<&DateTime<FixedOffset>>,
) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => b.cmp(a),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
