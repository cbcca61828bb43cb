use chrono::{NaiveDate, NaiveTime};
use serde::Deserialize;

use crate::pagination::Pagination;

/// Filters of the activity log view. Blank values mean "not filtered".
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ActivityFilter {
    pub club_id: Option<String>,
    pub format: Option<String>,
    /// `YYYY-MM-DD` or a full timestamp
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

impl ActivityFilter {
    /// Upstream query: `limit`, `offset`, then whichever filters are set.
    pub fn to_query(&self, pagination: Pagination) -> Vec<(String, String)> {
        let mut q = vec![
            ("limit".to_string(), pagination.limit().to_string()),
            ("offset".to_string(), pagination.offset().to_string()),
        ];
        if let Some(club) = non_blank(&self.club_id) {
            q.push(("club_id".into(), club.to_string()));
        }
        if let Some(format) = non_blank(&self.format) {
            q.push(("format".into(), format.to_string()));
        }
        if let Some(start) = non_blank(&self.start_date) {
            q.push(("start_date".into(), day_bound(start, DayBound::Start)));
        }
        if let Some(end) = non_blank(&self.end_date) {
            q.push(("end_date".into(), day_bound(end, DayBound::End)));
        }
        q
    }
}

#[derive(Debug, Clone, Copy)]
enum DayBound {
    Start,
    End,
}

/// A bare date expands to the first or last second of that day (UTC);
/// anything else passes through for upstream to interpret.
fn day_bound(raw: &str, bound: DayBound) -> String {
    match NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        Ok(date) => {
            let time = match bound {
                DayBound::Start => NaiveTime::MIN,
                DayBound::End => NaiveTime::from_hms_opt(23, 59, 59).unwrap_or(NaiveTime::MIN),
            };
            date.and_time(time).and_utc().format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string()
        }
        Err(_) => raw.to_string(),
    }
}

fn non_blank(v: &Option<String>) -> Option<&str> {
    v.as_deref().map(str::trim).filter(|s| !s.is_empty())
}
