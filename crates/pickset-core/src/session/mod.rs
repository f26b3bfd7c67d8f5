//! Edit session domain module.
//!
//! This module contains the session model, the change ledger, the selection
//! mutator and the store interface the engine persists sessions through.
//!
//! # Module Structure
//!
//! - `model`: The per-user edit session (`Session`)
//! - `change`: Ledger entries (`Change`, `ChangeAction`, `ChangeLedger`)
//! - `mutator`: Invariant-preserving edits and `Rejection`
//! - `stats`: Derived progress numbers (`EditStats`)
//! - `summary`: Net change summaries (`ChangeSummary`)
//! - `store`: Store trait for active sessions (`SessionStore`)

mod change;
pub mod mutator;
mod model;
mod stats;
mod store;
mod summary;

// Re-export public API
pub use change::{Change, ChangeAction, ChangeLedger};
pub use model::Session;
pub use mutator::{PrimaryOutcome, Rejection, ToggleOutcome};
pub use stats::{CategoryCounts, EditStats};
pub use store::SessionStore;
pub use summary::{ChangeEntry, ChangeSummary};
