//! The Proposal Controller (C5) and Validation Controller (C6).

pub mod propose;
pub mod validate;

pub use propose::run_propose_cycle;
pub use validate::{run_validate_cycle, ValidationOutcome};
