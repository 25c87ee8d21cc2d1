//! View-ready aggregates derived from a flat list of prediction records.
//!
//! Nothing here mutates the fetched list; every function borrows it and
//! returns a new selection or summary.

pub mod charts;
pub mod export;
pub mod peers;

use chrono::NaiveDateTime;

use crate::models::HistoryRecord;

pub use charts::{role_distribution, stacked_by_group, stacked_over_groups, RoleCount, StackedSeries};
pub use export::{admin_csv, history_csv};
pub use peers::{compare_with_peers, PeerComparison, RadarPoint, SubjectPolicy};

/// Rows shown per table page.
pub const PAGE_SIZE: usize = 5;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum UserFilter {
    #[default]
    All,
    User(String),
}

impl UserFilter {
    /// Parse a `<select>` value where "all" means no filter.
    pub fn from_value(value: &str) -> Self {
        match value.trim() {
            "" | "all" => UserFilter::All,
            id => UserFilter::User(id.to_string()),
        }
    }

    pub fn as_value(&self) -> String {
        match self {
            UserFilter::All => "all".to_string(),
            UserFilter::User(id) => id.clone(),
        }
    }

    fn matches(&self, record: &HistoryRecord) -> bool {
        match self {
            UserFilter::All => true,
            UserFilter::User(id) => record.belongs_to(id),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HistoryFilter {
    pub user: UserFilter,
    /// Case-insensitive substring matched against name, email, degree, major.
    pub search: String,
}

impl HistoryFilter {
    pub fn matches(&self, record: &HistoryRecord) -> bool {
        self.user.matches(record) && matches_search(record, &self.search)
    }
}

fn matches_search(record: &HistoryRecord, term: &str) -> bool {
    let term = term.trim().to_lowercase();
    if term.is_empty() {
        return true;
    }
    [
        &record.user_name,
        &record.user_email,
        &record.degree,
        &record.major,
    ]
    .iter()
    .any(|field| field.to_lowercase().contains(&term))
}

/// Records passing `filter`, in source order.
pub fn filter_records(records: &[HistoryRecord], filter: &HistoryFilter) -> Vec<HistoryRecord> {
    records
        .iter()
        .filter(|r| filter.matches(r))
        .cloned()
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserSummary {
    pub id: String,
    pub name: String,
    pub email: String,
}

impl UserSummary {
    pub fn label(&self) -> String {
        format!("{} ({})", self.name, self.email)
    }
}

/// Distinct users appearing in `records`, in order of first appearance.
/// Records without a user id are skipped.
pub fn unique_users(records: &[HistoryRecord]) -> Vec<UserSummary> {
    let mut users: Vec<UserSummary> = Vec::new();
    for record in records {
        let Some(id) = record.user_id.as_ref() else {
            continue;
        };
        let summary = UserSummary {
            id: id.clone(),
            name: record.user_name.clone(),
            email: record.user_email.clone(),
        };
        if !users.contains(&summary) {
            users.push(summary);
        }
    }
    users
}

/// Number of pages needed for `len` rows; zero rows means zero pages.
pub fn page_count(len: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 0;
    }
    len.div_ceil(page_size)
}

/// Rows on the 1-based `page`. Pages past the end are empty.
pub fn paginate<T>(items: &[T], page: usize, page_size: usize) -> &[T] {
    let start = page.saturating_sub(1).saturating_mul(page_size);
    if start >= items.len() {
        return &[];
    }
    let end = (start + page_size).min(items.len());
    &items[start..end]
}

/// Keep a requested page inside `1..=pages` (page 1 when there are none).
pub fn clamp_page(page: usize, pages: usize) -> usize {
    page.clamp(1, pages.max(1))
}

/// Distinct degree-or-major groups, in order of first appearance.
pub fn group_options(records: &[HistoryRecord]) -> Vec<String> {
    let mut groups: Vec<String> = Vec::new();
    for key in records.iter().filter_map(HistoryRecord::group_key) {
        if !groups.iter().any(|g| g == key) {
            groups.push(key.to_string());
        }
    }
    groups
}

/// Render a backend timestamp as `17 Oct 2026, 14:05`. Values that are not
/// timestamps come back unchanged.
pub fn format_date(raw: &str) -> String {
    let raw = raw.trim();
    if raw.is_empty() {
        return String::new();
    }
    const FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S"];
    FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .map(|dt| dt.format("%d %b %Y, %H:%M").to_string())
        .unwrap_or_else(|| raw.to_string())
}

/// Whole-number percentage of a 0..1 confidence.
pub fn percent(confidence: f64) -> u32 {
    (confidence.clamp(0.0, 1.0) * 100.0).round() as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(user_id: &str, name: &str, degree: &str, major: &str) -> HistoryRecord {
        HistoryRecord {
            user_id: Some(user_id.into()),
            user_name: name.into(),
            user_email: format!("{}@example.org", name.to_lowercase()),
            degree: degree.into(),
            major: major.into(),
            ..Default::default()
        }
    }

    fn sample() -> Vec<HistoryRecord> {
        vec![
            record("1", "Asha", "B.Tech", "Computer Science"),
            record("2", "Ravi", "B.Sc", "Physics"),
            record("1", "Asha", "M.Tech", "Data Science"),
        ]
    }

    #[test]
    fn test_filter_all_keeps_everything() {
        let filtered = filter_records(&sample(), &HistoryFilter::default());
        assert_eq!(filtered.len(), 3);
    }

    #[test]
    fn test_filter_by_user() {
        let filter = HistoryFilter {
            user: UserFilter::from_value("1"),
            search: String::new(),
        };
        let filtered = filter_records(&sample(), &filter);
        assert_eq!(filtered.len(), 2);
        assert!(filtered.iter().all(|r| r.belongs_to("1")));
    }

    #[test]
    fn test_filter_unknown_user_is_empty() {
        let filter = HistoryFilter {
            user: UserFilter::User("99".into()),
            search: String::new(),
        };
        let filtered = filter_records(&sample(), &filter);
        assert!(filtered.is_empty());
        assert_eq!(page_count(filtered.len(), PAGE_SIZE), 0);
    }

    #[test]
    fn test_search_case_insensitive_across_fields() {
        let by_major = HistoryFilter {
            user: UserFilter::All,
            search: "PHYSICS".into(),
        };
        assert_eq!(filter_records(&sample(), &by_major).len(), 1);

        let by_email = HistoryFilter {
            user: UserFilter::All,
            search: "asha@".into(),
        };
        assert_eq!(filter_records(&sample(), &by_email).len(), 2);
    }

    #[test]
    fn test_user_filter_values() {
        assert_eq!(UserFilter::from_value("all"), UserFilter::All);
        assert_eq!(UserFilter::from_value(""), UserFilter::All);
        assert_eq!(UserFilter::from_value("7").as_value(), "7");
    }

    #[test]
    fn test_unique_users_first_appearance_order() {
        let users = unique_users(&sample());
        assert_eq!(users.len(), 2);
        assert_eq!(users[0].id, "1");
        assert_eq!(users[1].label(), "Ravi (ravi@example.org)");
    }

    #[test]
    fn test_pagination_bounds() {
        let items: Vec<u32> = (1..=12).collect();
        assert_eq!(page_count(items.len(), 5), 3);
        assert_eq!(paginate(&items, 1, 5), &[1, 2, 3, 4, 5]);
        assert_eq!(paginate(&items, 3, 5), &[11, 12]);
        assert!(paginate(&items, 4, 5).is_empty());
        assert_eq!(clamp_page(9, 3), 3);
        assert_eq!(clamp_page(0, 0), 1);
    }

    #[test]
    fn test_group_options_dedup() {
        let mut records = sample();
        records.push(record("3", "Kiran", "", "Physics"));
        records.push(record("4", "Lata", "B.Tech", "Mechanical"));
        assert_eq!(group_options(&records), vec!["B.Tech", "B.Sc", "M.Tech", "Physics"]);
    }

    #[test]
    fn test_format_date() {
        assert_eq!(format_date("2026-10-17 14:05:09"), "17 Oct 2026, 14:05");
        assert_eq!(format_date("yesterday"), "yesterday");
        assert_eq!(format_date(""), "");
    }

    #[test]
    fn test_percent_rounds() {
        assert_eq!(percent(0.82), 82);
        assert_eq!(percent(0.826), 83);
        assert_eq!(percent(1.7), 100);
    }
}
