//! Error handling for the roshambo library.

pub mod domain;

pub use domain::DomainError;
