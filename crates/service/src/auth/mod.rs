//! Admin auth: credential check against configured values and signed session tokens.

pub mod domain;
pub mod errors;
pub mod service;

pub use service::AdminAuthService;
