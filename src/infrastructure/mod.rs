//! Infrastructure layer providing external service integrations.
//!
//! Configuration loading, log output, and the HTTP hand-off of finished
//! checklists.

pub mod config;
pub mod logging;
pub mod submitter;

pub use config::*;
pub use logging::*;
pub use submitter::*;
