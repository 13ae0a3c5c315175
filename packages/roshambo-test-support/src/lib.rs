//! Roshambo test support utilities
//!
//! Shared by the integration test binaries: one-time logging setup and
//! helpers for unique test data.

pub mod logging;
pub mod unique_helpers;
