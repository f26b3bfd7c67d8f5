//! Selection domain module.
//!
//! A selection is one interest a user picked, optionally flagged primary.
//! The durable set of selections lives behind [`SelectionRepository`].

mod model;
mod repository;

pub use model::{InterestId, Selection, UserId};
pub use repository::SelectionRepository;
