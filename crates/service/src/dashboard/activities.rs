use serde::Serialize;
use tracing::warn;

use super::club_names;
use crate::activity_filter::ActivityFilter;
use crate::domain::{Club, Meta};
use crate::errors::ProxyError;
use crate::pagination::{PageInfo, Pagination, ACTIVITIES_PAGE_SIZE};
use crate::services::{activity_service, club_service};
use crate::upstream::PlayfolioClient;

#[derive(Debug, Clone, Serialize)]
pub struct ActivityRow {
    pub uid: String,
    pub format: String,
    pub trigger: Option<String>,
    pub player_uid: Option<String>,
    pub player_label: Option<String>,
    pub club_id: Option<String>,
    pub club_name: Option<String>,
    pub device_id: Option<String>,
    pub meta: Option<Meta>,
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ActivitiesView {
    pub activities: Vec<ActivityRow>,
    pub total: u64,
    pub page: PageInfo,
    pub clubs: Vec<Club>,
}

/// One server-side page of the activity log. The page is not clamped
/// against `total`: upstream decides what lies past the end.
pub async fn activities(
    client: &PlayfolioClient,
    page: Option<u32>,
    filter: &ActivityFilter,
) -> Result<ActivitiesView, ProxyError> {
    let pagination = Pagination::new(page, ACTIVITIES_PAGE_SIZE);
    let query = filter.to_query(pagination);

    let (listing, clubs) = tokio::join!(activity_service::list_typed(client, query), club_service::list_typed(client));
    let (rows, total) = listing?;
    let clubs = clubs.unwrap_or_else(|e| {
        warn!(error = %e, "club names unavailable for activities view");
        Vec::new()
    });
    let names = club_names(&clubs);

    let activities = rows
        .into_iter()
        .map(|a| ActivityRow {
            player_label: a.player_label(),
            trigger: a.login_trigger(),
            club_name: a.club_id.as_ref().and_then(|id| names.get(id)).cloned(),
            uid: a.uid,
            format: a.format,
            player_uid: a.player_uid,
            club_id: a.club_id,
            device_id: a.device_id,
            meta: a.meta,
            created_at: a.created_at,
        })
        .collect();

    Ok(ActivitiesView {
        activities,
        total,
        page: PageInfo::new(pagination.page, pagination.per_page, total),
        clubs,
    })
}
