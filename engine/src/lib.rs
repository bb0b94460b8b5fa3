//! Shareholding consistency and legal-act generation engine.
//!
//! The engine keeps an always-consistent capitalization ledger for each
//! client company, validates proposed legal acts (capital changes, share
//! transfers, meeting minutes, engagement letters) against corporate-law
//! arithmetic and procedural rules, and deterministically maps validated
//! entity data onto document template contracts. Persistence, template
//! rendering, artifact storage, and identity are collaborator ports; see
//! [`domain::ports`].

pub mod domain;

pub use domain::ports::{GenerationCommand, PresidencyCommand};
pub use domain::{GenerationError, GenerationService, PresidencyService};
