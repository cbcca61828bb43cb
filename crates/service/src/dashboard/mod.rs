//! JSON views behind `/dashboard/*`.
//!
//! Each builder composes the proxy operations of [`crate::services`] and
//! decodes them into the typed records of [`crate::domain`].

pub mod activities;
pub mod directory;
pub mod keychains;
pub mod overview;
pub mod players;

use std::collections::HashMap;

use crate::domain::Club;

/// `club uid -> display name`
pub(crate) fn club_names(clubs: &[Club]) -> HashMap<String, String> {
    clubs.iter().map(|c| (c.uid.clone(), c.display_name.clone())).collect()
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::time::Duration;

    use crate::upstream::PlayfolioClient;

    pub fn client(base: &str) -> PlayfolioClient {
        PlayfolioClient::new(Some(base), None, Duration::from_secs(2)).unwrap()
    }
}
