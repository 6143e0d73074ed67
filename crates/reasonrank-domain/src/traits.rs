//! Trait definitions for external interactions
//!
//! These traits define the boundary between the scoring core and the
//! collaborators that own persistence. Implementations live outside this
//! workspace.

use crate::ArgumentRecord;

/// Supplies the raw argument records of a debate
///
/// Implemented by the persistence or API layer. The core only reads records;
/// storing computed scores back is the collaborator's job.
pub trait ArgumentSource {
    /// Error type for source operations
    type Error;

    /// Load every argument record belonging to a debate
    fn load_arguments(&self, debate_id: &str) -> Result<Vec<ArgumentRecord>, Self::Error>;
}
