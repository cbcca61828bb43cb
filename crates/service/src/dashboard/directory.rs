//! Clubs and devices: plain listings, devices annotated with their club.

use serde::Serialize;
use tracing::warn;

use super::club_names;
use crate::domain::{Club, Device};
use crate::errors::ProxyError;
use crate::services::{club_service, device_service};
use crate::upstream::PlayfolioClient;

#[derive(Debug, Clone, Serialize)]
pub struct ClubsView {
    pub clubs: Vec<Club>,
    pub count: usize,
}

pub async fn clubs(client: &PlayfolioClient) -> Result<ClubsView, ProxyError> {
    let clubs = club_service::list_typed(client).await?;
    Ok(ClubsView { count: clubs.len(), clubs })
}

#[derive(Debug, Clone, Serialize)]
pub struct DeviceRow {
    #[serde(flatten)]
    pub device: Device,
    pub club_name: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct DevicesView {
    pub devices: Vec<DeviceRow>,
    pub count: usize,
}

/// Club names are decoration; a failed club fetch leaves them empty.
pub async fn devices(client: &PlayfolioClient) -> Result<DevicesView, ProxyError> {
    let (devices, clubs) = tokio::join!(device_service::list_typed(client), club_service::list_typed(client));
    let devices = devices?;
    let clubs = clubs.unwrap_or_else(|e| {
        warn!(error = %e, "club names unavailable for devices view");
        Vec::new()
    });
    let names = club_names(&clubs);

    let rows: Vec<DeviceRow> = devices
        .into_iter()
        .map(|device| {
            let club_name = device.club_id.as_ref().and_then(|id| names.get(id)).cloned();
            DeviceRow { device, club_name }
        })
        .collect();
    Ok(DevicesView { count: rows.len(), devices: rows })
}
