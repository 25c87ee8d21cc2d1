use std::path::PathBuf;

use edu2job::insights::peers::Metric;
use edu2job::insights::*;
use edu2job::models::HistoryRecord;

fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn load_history() -> Vec<HistoryRecord> {
    let path = fixture_path("history_all.json");
    let text = std::fs::read_to_string(&path).expect("Failed to read fixture");
    serde_json::from_str(&text).expect("Failed to parse fixture")
}

#[test]
fn test_fixture_normalizes_loose_types() {
    let records = load_history();
    assert_eq!(records.len(), 6);

    let ravi = &records[1];
    assert_eq!(ravi.cgpa, Some(7.4), "numeric string should parse");
    assert_eq!(ravi.experience, Some(3.0));
    assert_eq!(ravi.skills.count(), 4);
    assert_eq!(ravi.user_id.as_deref(), Some("3"));

    let kiran = &records[3];
    assert_eq!(kiran.degree, "");
    assert_eq!(kiran.experience, None);
    assert!(kiran.skills.is_missing());
    assert_eq!(kiran.role_label(), "Unknown");
    assert!(kiran.top_three().is_empty());

    assert!(records[2].top_predictions.is_empty(), "null ranking becomes empty");
    assert_eq!(records[2].top_three()[0].role, "Data Scientist");
}

#[test]
fn test_filter_and_paginate_fixture() {
    let records = load_history();

    let everything = filter_records(&records, &HistoryFilter::default());
    assert_eq!(page_count(everything.len(), PAGE_SIZE), 2);
    assert_eq!(paginate(&everything, 1, PAGE_SIZE).len(), 5);
    assert_eq!(paginate(&everything, 2, PAGE_SIZE).len(), 1);

    let ravi = filter_records(
        &records,
        &HistoryFilter {
            user: UserFilter::from_value("3"),
            search: String::new(),
        },
    );
    assert_eq!(ravi.len(), 2);
    assert!(ravi.iter().all(|r| r.user_name == "Ravi Kumar"));

    let computing = filter_records(
        &records,
        &HistoryFilter {
            user: UserFilter::All,
            search: "computer".into(),
        },
    );
    assert_eq!(computing.len(), 3);

    let combined = filter_records(
        &records,
        &HistoryFilter {
            user: UserFilter::User("2".into()),
            search: "m.tech".into(),
        },
    );
    assert_eq!(combined.len(), 1);
    assert_eq!(combined[0].id.as_deref(), Some("3"));
}

#[test]
fn test_unique_users_from_fixture() {
    let users = unique_users(&load_history());
    let ids: Vec<&str> = users.iter().map(|u| u.id.as_str()).collect();
    assert_eq!(ids, vec!["2", "3", "5", "6"]);
    assert_eq!(users[0].label(), "Asha Rao (asha@example.org)");
}

#[test]
fn test_chart_series_from_fixture() {
    let records = load_history();

    assert_eq!(group_options(&records), vec!["B.Tech", "M.Tech", "Physics", "BCA"]);

    let series = stacked_by_group(&records);
    assert_eq!(
        series.roles,
        vec!["Data Scientist", "Backend Developer", "Unknown", "Frontend Developer"]
    );
    assert_eq!(series.groups[0].counts, vec![1, 2, 0, 0]);
    assert_eq!(series.groups[2].counts, vec![0, 0, 1, 0]);
    assert_eq!(series.max_total(), 3);

    let pie = role_distribution(&records, "B.Tech");
    assert_eq!(pie.len(), 2);
    assert_eq!((pie[0].role.as_str(), pie[0].count), ("Data Scientist", 1));
    assert_eq!((pie[1].role.as_str(), pie[1].count), ("Backend Developer", 2));
}

#[test]
fn test_own_radar_against_same_major() {
    let records = load_history();
    let policy = SubjectPolicy::MostRecentOwn {
        user_id: Some("2".into()),
    };
    let cmp = compare_with_peers(&records, &policy).expect("comparison");

    assert_eq!(cmp.subject_index, 2);
    assert_eq!(cmp.peer_count, 1);

    let cgpa = cmp.point(Metric::Cgpa).unwrap();
    assert_eq!((cgpa.subject, cgpa.peers), (91, 86));
    let exp = cmp.point(Metric::Experience).unwrap();
    assert_eq!((exp.subject, exp.peers), (50, 25));
    let skills = cmp.point(Metric::Skills).unwrap();
    assert_eq!((skills.subject, skills.peers), (100, 60));
    let certs = cmp.point(Metric::Certifications).unwrap();
    assert_eq!((certs.subject, certs.peers), (100, 100));
}

#[test]
fn test_admin_radar_uses_first_record() {
    let records = load_history();
    let cmp = compare_with_peers(&records, &SubjectPolicy::Leading).expect("comparison");
    assert_eq!(cmp.subject_index, 0);
    let cgpa = cmp.point(Metric::Cgpa).unwrap();
    assert_eq!((cgpa.subject, cgpa.peers), (86, 91));
}

#[test]
fn test_exports_have_one_line_per_record() {
    let records = load_history();

    let history = history_csv(&records, true).expect("history export");
    assert_eq!(history.lines().count(), records.len() + 1);

    let admin = admin_csv(&records).expect("admin export");
    assert_eq!(admin.lines().count(), records.len() + 1);

    let mut reader = csv::Reader::from_reader(admin.as_bytes());
    let rows: Vec<csv::StringRecord> = reader.records().collect::<Result<_, _>>().unwrap();
    assert_eq!(&rows[2][8], "TensorFlow Developer, GCP Data Engineer");
}

#[test]
fn test_missing_values_exported_as_dash() {
    let records = load_history();
    let csv = history_csv(&records[3..4], false).expect("export");
    let row = csv.lines().nth(1).unwrap();
    assert_eq!(row, "\"12 Sep 2026, 18:22\",-,Physics,6.8,-,-,-,-,");
}

#[test]
fn test_filtered_bars_keep_every_degree_group() {
    let records = load_history();
    let ravi = filter_records(
        &records,
        &HistoryFilter {
            user: UserFilter::from_value("3"),
            search: String::new(),
        },
    );

    let series = stacked_over_groups(&ravi, &group_options(&records));
    let labels: Vec<&str> = series.groups.iter().map(|g| g.group.as_str()).collect();
    assert_eq!(labels, vec!["B.Tech", "M.Tech", "Physics", "BCA"]);

    let plotted: usize = series.groups.iter().map(|g| g.total()).sum();
    let grouped = ravi.iter().filter(|r| r.group_key().is_some()).count();
    assert_eq!(plotted, grouped);
    assert!(series.groups.iter().any(|g| g.total() == 0));
}
