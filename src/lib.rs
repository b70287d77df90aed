//! ambucheck - Ambulance Readiness Checklist
//!
//! A terminal wizard for recording the conforming / non-conforming state of
//! an emergency vehicle's equipment and posting the result to a
//! spreadsheet endpoint.

pub mod domain;
pub mod application;
pub mod infrastructure;
pub mod presentation;
pub mod cli;
pub mod error;

pub use domain::*;
pub use application::*;
pub use error::{Error, Result};
