//! Catalog domain module.
//!
//! The catalog is the read-only list of categories and the interests inside
//! them. The editor never mutates it.

mod model;
mod repository;

pub use model::{Category, Interest, InterestIndex};
pub use repository::CatalogRepository;
