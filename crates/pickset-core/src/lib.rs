//! Domain layer for Pickset.
//!
//! Pickset lets a user revise a categorized set of interests through
//! button-driven screens. Every edit is staged in a short-lived session and
//! either committed as one full replace or discarded.
//!
//! This crate holds the models, the collaborator traits and the pure edit
//! logic. It performs no I/O.

pub mod catalog;
pub mod config;
pub mod error;
pub mod selection;
pub mod session;

// Re-export common error type
pub use error::PicksetError;
