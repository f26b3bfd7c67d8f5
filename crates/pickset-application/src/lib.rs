//! Application layer for Pickset.
//!
//! This crate wires the domain logic to its collaborators: the
//! [`EditSessionEngine`] owns session lifecycle, the [`TokenRouter`] maps
//! interaction tokens to handlers and the [`InterestEditor`] registers the
//! editor's token table and renders every outcome as a [`ScreenState`].

pub mod editor;
pub mod engine;
pub mod presenter;
pub mod router;
pub mod screen;
pub mod tokens;

#[cfg(test)]
mod engine_test;
#[cfg(test)]
mod test_support;

pub use editor::InterestEditor;
pub use engine::{EditOutcome, EditResult, EditSessionEngine, UndoResult};
pub use router::{
    ChatContext, Dispatch, FnHandler, Interaction, TokenHandler, TokenMatcher, TokenRouter,
};
pub use screen::{ActionLabel, Button, ButtonLabel, Notice, ScreenKind, ScreenState};
