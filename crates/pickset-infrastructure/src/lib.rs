//! Infrastructure layer for Pickset.
//!
//! Storage and configuration implementations of the traits defined in
//! `pickset-core`.

pub mod config_service;
pub mod dir_selection_repository;
pub mod dir_session_store;
pub mod memory_catalog_repository;
pub mod memory_selection_repository;
pub mod memory_session_store;
pub mod paths;
pub mod storage;
pub mod toml_catalog_repository;

pub use crate::config_service::ConfigService;
pub use crate::dir_selection_repository::DirSelectionRepository;
pub use crate::dir_session_store::DirSessionStore;
pub use crate::memory_catalog_repository::InMemoryCatalogRepository;
pub use crate::memory_selection_repository::InMemorySelectionRepository;
pub use crate::memory_session_store::InMemorySessionStore;
pub use crate::paths::PicksetPaths;
pub use crate::toml_catalog_repository::TomlCatalogRepository;
