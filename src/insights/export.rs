//! CSV export of history records.
//!
//! Fields are quoted where needed, so a certification list containing commas
//! stays in its own column.

use crate::models::HistoryRecord;

use super::{format_date, percent};

const HISTORY_HEADER: [&str; 9] = [
    "Date",
    "Degree",
    "Major",
    "CGPA",
    "Experience",
    "Skills",
    "Certifications",
    "Predicted Role",
    "Top 3 Suggestions",
];

const ADMIN_HEADER: [&str; 10] = [
    "User",
    "Email",
    "Date",
    "Degree",
    "Major",
    "CGPA",
    "Experience",
    "Skills",
    "Certifications",
    "Predicted Role",
];

/// Placeholder for absent values in the history export.
const MISSING: &str = "-";

/// Line breaks become spaces so every record stays on one physical line.
fn one_line(value: &str) -> String {
    value
        .split(['\r', '\n'])
        .filter(|part| !part.trim().is_empty())
        .map(str::trim)
        .collect::<Vec<_>>()
        .join(" ")
}

fn or_missing(value: &str) -> String {
    if value.trim().is_empty() {
        MISSING.to_string()
    } else {
        one_line(value)
    }
}

fn number(value: Option<f64>) -> Option<String> {
    value.map(|n| n.to_string())
}

fn top_suggestions(record: &HistoryRecord) -> String {
    record
        .top_three()
        .iter()
        .map(|p| format!("{}({}%)", one_line(&p.role), percent(p.confidence)))
        .collect::<Vec<_>>()
        .join(" | ")
}

fn finish(writer: csv::Writer<Vec<u8>>) -> Result<String, csv::Error> {
    let bytes = writer
        .into_inner()
        .map_err(|e| csv::Error::from(e.into_error()))?;
    Ok(String::from_utf8(bytes).unwrap_or_else(|e| String::from_utf8_lossy(e.as_bytes()).into_owned()))
}

/// Export for the history page. `include_user` adds the user name and email
/// columns used by the all-users view.
pub fn history_csv(records: &[HistoryRecord], include_user: bool) -> Result<String, csv::Error> {
    let mut writer = csv::Writer::from_writer(Vec::new());

    let mut header: Vec<&str> = Vec::with_capacity(HISTORY_HEADER.len() + 2);
    if include_user {
        header.extend(["User", "Email"]);
    }
    header.extend(HISTORY_HEADER);
    writer.write_record(&header)?;

    for record in records {
        let mut row: Vec<String> = Vec::with_capacity(header.len());
        if include_user {
            row.push(or_missing(&record.user_name));
            row.push(or_missing(&record.user_email));
        }
        row.push(one_line(&format_date(&record.date)));
        row.push(or_missing(&record.degree));
        row.push(or_missing(&record.major));
        row.push(number(record.cgpa).unwrap_or_else(|| MISSING.to_string()));
        row.push(number(record.experience).unwrap_or_else(|| MISSING.to_string()));
        row.push(if record.skills.is_missing() {
            MISSING.to_string()
        } else {
            one_line(&record.skills.joined("; "))
        });
        row.push(or_missing(&record.certifications));
        row.push(or_missing(&record.result));
        row.push(top_suggestions(record));
        writer.write_record(&row)?;
    }

    finish(writer)
}

/// Export for the admin dashboard: user columns always, no ranking column.
pub fn admin_csv(records: &[HistoryRecord]) -> Result<String, csv::Error> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(ADMIN_HEADER)?;

    for record in records {
        writer.write_record([
            one_line(&record.user_name),
            one_line(&record.user_email),
            one_line(&format_date(&record.date)),
            one_line(&record.degree),
            one_line(&record.major),
            number(record.cgpa).unwrap_or_default(),
            number(record.experience).unwrap_or_default(),
            one_line(&record.skills.joined(", ")),
            one_line(&record.certifications),
            one_line(&record.result),
        ])?;
    }

    finish(writer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{RankedRole, Skills};

    fn record(name: &str, certs: &str) -> HistoryRecord {
        HistoryRecord {
            user_id: Some("1".into()),
            user_name: name.into(),
            user_email: "a@example.org".into(),
            date: "2026-03-01 09:30:00".into(),
            degree: "B.Tech".into(),
            major: "CS".into(),
            cgpa: Some(8.5),
            experience: Some(2.0),
            skills: Skills::List(vec!["Python".into(), "SQL".into()]),
            certifications: certs.into(),
            result: "Data Scientist".into(),
            top_predictions: vec![
                RankedRole { role: "Data Scientist".into(), confidence: 0.86 },
                RankedRole { role: "ML Engineer".into(), confidence: 0.78 },
            ],
            ..Default::default()
        }
    }

    #[test]
    fn test_history_csv_line_count() {
        let records = vec![record("Asha", "AWS"), record("Ravi", ""), record("Kiran", "GCP")];
        let csv = history_csv(&records, false).unwrap();
        assert_eq!(csv.lines().count(), records.len() + 1);
        assert!(csv.starts_with("Date,Degree,Major,CGPA,Experience,Skills,Certifications,Predicted Role,Top 3 Suggestions\n"));
    }

    #[test]
    fn test_history_csv_row_format() {
        let csv = history_csv(&[record("Asha", "")], false).unwrap();
        let row = csv.lines().nth(1).unwrap();
        assert_eq!(
            row,
            "\"01 Mar 2026, 09:30\",B.Tech,CS,8.5,2,Python; SQL,-,Data Scientist,Data Scientist(86%) | ML Engineer(78%)"
        );
    }

    #[test]
    fn test_history_csv_with_user_columns() {
        let csv = history_csv(&[record("Asha", "")], true).unwrap();
        assert!(csv.starts_with("User,Email,Date,"));
        assert!(csv.lines().nth(1).unwrap().starts_with("Asha,a@example.org,"));
    }

    #[test]
    fn test_comma_in_value_is_quoted() {
        let csv = admin_csv(&[record("Asha", "AWS, CKA")]).unwrap();
        let row = csv.lines().nth(1).unwrap();
        assert!(row.contains("\"AWS, CKA\""));
        assert!(row.contains("\"Python, SQL\""));

        let mut reader = csv::Reader::from_reader(csv.as_bytes());
        let parsed = reader.records().next().unwrap().unwrap();
        assert_eq!(parsed.len(), ADMIN_HEADER.len());
        assert_eq!(&parsed[8], "AWS, CKA");
    }

    #[test]
    fn test_multiline_certifications_stay_on_one_line() {
        let records = vec![record("Asha", "AWS\nCKA\r\n"), HistoryRecord::default()];

        let admin = admin_csv(&records).unwrap();
        assert_eq!(admin.lines().count(), records.len() + 1);
        let mut reader = csv::Reader::from_reader(admin.as_bytes());
        let parsed = reader.records().next().unwrap().unwrap();
        assert_eq!(&parsed[8], "AWS CKA");

        let history = history_csv(&records, true).unwrap();
        assert_eq!(history.lines().count(), records.len() + 1);
        assert!(history.lines().nth(1).unwrap().contains(",AWS CKA,"));
    }

    #[test]
    fn test_empty_export_is_header_only() {
        let csv = admin_csv(&[]).unwrap();
        assert_eq!(csv.lines().count(), 1);
    }
}
