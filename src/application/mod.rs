//! Application layer managing wizard state and workflows.
//!
//! This module sits between the domain layer and the presentation layer:
//! it owns the record being filled in, the active step and the submission
//! bookkeeping.

pub mod state;

pub use state::*;
