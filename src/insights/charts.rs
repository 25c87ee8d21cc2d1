//! Grouped counts behind the bar and pie charts.

use crate::models::HistoryRecord;

/// Stacked bar data: one row per degree group, one series per predicted role.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StackedSeries {
    /// Series keys, in order of first appearance.
    pub roles: Vec<String>,
    pub groups: Vec<GroupCounts>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GroupCounts {
    pub group: String,
    /// Aligned with [`StackedSeries::roles`].
    pub counts: Vec<usize>,
}

impl GroupCounts {
    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }
}

impl StackedSeries {
    /// Tallest stack, for scaling the y axis.
    pub fn max_total(&self) -> usize {
        self.groups.iter().map(GroupCounts::total).max().unwrap_or(0)
    }

    /// True when there is nothing to draw, even if empty groups are listed.
    pub fn is_empty(&self) -> bool {
        self.max_total() == 0
    }
}

fn distinct_roles(records: &[HistoryRecord]) -> Vec<String> {
    let mut roles: Vec<String> = Vec::new();
    for record in records {
        let role = record.role_label();
        if !roles.iter().any(|r| r == role) {
            roles.push(role.to_string());
        }
    }
    roles
}

/// Count records per (degree group, predicted role). Records with neither a
/// degree nor a major belong to no group and are left out.
pub fn stacked_by_group(records: &[HistoryRecord]) -> StackedSeries {
    stacked_over_groups(records, &super::group_options(records))
}

/// Like [`stacked_by_group`], but with a fixed list of groups on the x axis.
/// Groups with no matching records get all-zero counts.
pub fn stacked_over_groups(records: &[HistoryRecord], groups: &[String]) -> StackedSeries {
    let roles = distinct_roles(records);
    let groups = groups
        .iter()
        .cloned()
        .map(|group| {
            let counts = roles
                .iter()
                .map(|role| {
                    records
                        .iter()
                        .filter(|r| r.group_key() == Some(group.as_str()) && r.role_label() == role)
                        .count()
                })
                .collect();
            GroupCounts { group, counts }
        })
        .collect();
    StackedSeries { roles, groups }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleCount {
    pub role: String,
    pub count: usize,
}

/// Predicted-role counts within one degree group, in order of first
/// appearance.
pub fn role_distribution(records: &[HistoryRecord], group: &str) -> Vec<RoleCount> {
    let mut counts: Vec<RoleCount> = Vec::new();
    for record in records.iter().filter(|r| r.group_key() == Some(group)) {
        let role = record.role_label();
        match counts.iter_mut().find(|c| c.role == role) {
            Some(entry) => entry.count += 1,
            None => counts.push(RoleCount {
                role: role.to_string(),
                count: 1,
            }),
        }
    }
    counts
}
