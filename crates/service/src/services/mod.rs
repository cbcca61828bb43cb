//! Thin proxy operations, one module per upstream resource.

pub mod activity_service;
pub mod club_service;
pub mod device_service;
pub mod keychain_service;
pub mod player_service;
