//! Ordinary-meeting rules.

use crate::domain::captable;
use crate::domain::legal_act::MeetingVote;
use crate::domain::shareholder::Shareholder;

use super::capital::vote_completeness;
use super::violations::RuleViolation;

/// An ordinary resolution carries on a simple check: every allocated
/// share must have voted exactly once.
pub(super) fn meeting_rules(
    shareholders: &[Shareholder],
    vote: MeetingVote,
) -> Option<RuleViolation> {
    vote_completeness(vote, captable::allocated_shares(shareholders))
}
