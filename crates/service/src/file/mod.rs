pub mod api_key_store;

pub use api_key_store::FileApiKeyStore;
