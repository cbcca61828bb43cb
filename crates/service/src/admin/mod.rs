//! Seams for locally persisted admin state.

pub mod api_key_registry;

pub use api_key_registry::{ApiKeyRecord, ApiKeyRegistry};
