//! Engine error taxonomy.
//!
//! Transport agnostic: callers map these onto their own envelopes. Every
//! blocking validation failure carries the violated rule and its numbers;
//! infrastructure failures are safe to retry wholesale because no partial
//! state was committed.

use serde_json::json;

use super::captable::ArithmeticInconsistency;
use super::mapper::IncompleteMappingError;
use super::validation::{RuleViolation, RuleWarning};

/// Failures of the generation and dry-run validation entry points.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GenerationError {
    /// A referenced entity does not exist. Never retried.
    #[error("{entity} {id} was not found")]
    NotFound {
        /// Kind of the missing entity.
        entity: &'static str,
        /// Identifier the caller supplied.
        id: String,
    },
    /// One or more legal or arithmetic rules were violated. The caller
    /// must correct the act and resubmit.
    #[error("validation failed: {}", blocking_summary(.blocking))]
    ValidationFailed {
        /// Blocking violations, at most one per validation pass.
        blocking: Vec<RuleViolation>,
        /// Advisory warnings surfaced alongside the rejection.
        advisory: Vec<RuleWarning>,
    },
    /// A derived value could not be computed exactly.
    #[error(transparent)]
    Arithmetic(#[from] ArithmeticInconsistency),
    /// A validated act still lacked a field the mapper needs. This is a
    /// validation-catalog bug, not operator error, so the message stays
    /// generic; the detail is logged at error severity.
    #[error("document generation failed internally")]
    IncompleteMapping(#[source] IncompleteMappingError),
    /// The ledger moved between validation and commit. The caller should
    /// re-fetch current state and retry once; the engine never retries.
    #[error("the shareholder ledger changed while the act was being generated")]
    ConcurrentModification,
    /// A collaborator failed. Safe to retry wholesale.
    #[error(transparent)]
    Infrastructure(#[from] InfrastructureError),
}

impl GenerationError {
    /// Structured payload describing the failure, for callers that relay
    /// machine-readable details.
    pub fn details(&self) -> Option<serde_json::Value> {
        match self {
            Self::ValidationFailed { blocking, advisory } => Some(json!({
                "blocking": blocking,
                "advisory": advisory,
                "rules": blocking
                    .iter()
                    .map(RuleViolation::rule_name)
                    .collect::<Vec<_>>(),
            })),
            Self::Arithmetic(inconsistency) => serde_json::to_value(inconsistency).ok(),
            _ => None,
        }
    }
}

fn blocking_summary(blocking: &[RuleViolation]) -> String {
    blocking
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Collaborator failures, by collaborator.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InfrastructureError {
    /// The persistence collaborator failed.
    #[error("persistence failed: {message}")]
    Persistence {
        /// Adapter-supplied detail.
        message: String,
    },
    /// The template-rendering collaborator failed.
    #[error("template rendering failed: {message}")]
    Rendering {
        /// Adapter-supplied detail.
        message: String,
    },
    /// The storage collaborator failed.
    #[error("artifact storage failed: {message}")]
    Storage {
        /// Adapter-supplied detail.
        message: String,
    },
    /// The identity collaborator failed.
    #[error("identity lookup failed: {message}")]
    Identity {
        /// Adapter-supplied detail.
        message: String,
    },
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.

    use rstest::rstest;

    use super::*;
    use crate::domain::money::Money;

    #[rstest]
    fn validation_failure_message_names_rule_and_numbers() {
        let error = GenerationError::ValidationFailed {
            blocking: vec![RuleViolation::ShareAvailability {
                requested: 120,
                available: 80,
                total_shares: 1_000,
                allocated: 920,
            }],
            advisory: Vec::new(),
        };
        let message = error.to_string();
        assert!(message.contains("share availability"));
        assert!(message.contains("requested 120 shares"));
        assert!(message.contains("920 already allocated"));
    }

    #[rstest]
    fn validation_details_expose_rule_names() {
        let error = GenerationError::ValidationFailed {
            blocking: vec![RuleViolation::CapitalFloor {
                new_capital: Money::ZERO,
            }],
            advisory: vec![RuleWarning::CreditorOppositionNotice],
        };
        let details = error.details().expect("structured details");
        assert_eq!(details["rules"][0], "capital_floor");
        assert!(details["advisory"].as_array().is_some_and(|a| a.len() == 1));
    }

    #[rstest]
    fn mapping_gaps_stay_generic_for_callers() {
        let error = GenerationError::IncompleteMapping(IncompleteMappingError {
            placeholder: "president_nom".to_owned(),
        });
        assert_eq!(error.to_string(), "document generation failed internally");
        assert!(error.details().is_none());
    }
}
