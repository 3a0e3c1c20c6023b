//! Acceptance-policy screening of candidate batches.

use crate::types::{CandidateFile, Event};

use super::IngestPipeline;

impl IngestPipeline {
    /// Partition a candidate batch into the admitted subset
    ///
    /// Candidates are evaluated in input order against the acceptance
    /// policy. Each rejection is reported immediately through the event
    /// channel — at the moment of evaluation, not after the rest of the
    /// batch — and the candidate is discarded without any admission side
    /// effect. A candidate violating both the size and the type rule is
    /// reported once, for the size violation.
    pub(crate) fn screen_candidates(&self, candidates: Vec<CandidateFile>) -> Vec<CandidateFile> {
        let mut admitted = Vec::with_capacity(candidates.len());

        for candidate in candidates {
            match self.config.policy.check(&candidate) {
                Ok(()) => admitted.push(candidate),
                Err(violation) => {
                    tracing::info!(
                        name = %candidate.name,
                        size_bytes = candidate.size_bytes,
                        content_type = %candidate.content_type,
                        reason = %violation,
                        "Candidate rejected"
                    );
                    self.emit_event(Event::Rejected {
                        name: candidate.name.clone(),
                        reason: violation.notification(),
                    });
                }
            }
        }

        admitted
    }
}
