//! "You vs peers" radar comparison.
//!
//! One record is picked as the subject, a peer group is chosen around it, and
//! four metrics are scaled to 0..100 against the maxima of the whole set.

use crate::models::HistoryRecord;

/// How the subject record is chosen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubjectPolicy {
    /// Last record in the list belonging to `user_id`, falling back to the
    /// last record overall. Used for a user's own history view.
    MostRecentOwn { user_id: Option<String> },
    /// The first record in the list. Used for the admin dashboard.
    Leading,
}

impl SubjectPolicy {
    fn pick(&self, records: &[HistoryRecord]) -> Option<usize> {
        match self {
            SubjectPolicy::MostRecentOwn { user_id } => {
                let own = user_id
                    .as_deref()
                    .and_then(|id| records.iter().rposition(|r| r.belongs_to(id)));
                own.or_else(|| records.len().checked_sub(1))
            }
            SubjectPolicy::Leading => (!records.is_empty()).then_some(0),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Metric {
    Cgpa,
    Experience,
    Skills,
    Certifications,
}

impl Metric {
    pub const ALL: [Metric; 4] = [
        Metric::Cgpa,
        Metric::Experience,
        Metric::Skills,
        Metric::Certifications,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Metric::Cgpa => "CGPA",
            Metric::Experience => "Experience",
            Metric::Skills => "Skills",
            Metric::Certifications => "Certifications",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RadarPoint {
    pub metric: Metric,
    /// Subject's score, 0..=100.
    pub subject: u32,
    /// Peer group's score, 0..=100.
    pub peers: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PeerComparison {
    /// Index of the subject within the compared slice.
    pub subject_index: usize,
    pub peer_count: usize,
    pub points: Vec<RadarPoint>,
}

impl PeerComparison {
    pub fn point(&self, metric: Metric) -> Option<&RadarPoint> {
        self.points.iter().find(|p| p.metric == metric)
    }
}

/// Peers share the subject's major; failing that its degree group; failing
/// that, every other record.
fn peer_indices(records: &[HistoryRecord], subject: usize) -> Vec<usize> {
    let me = &records[subject];
    let others = || (0..records.len()).filter(move |&i| i != subject);

    let by_major: Vec<usize> = if me.major.trim().is_empty() {
        Vec::new()
    } else {
        others().filter(|&i| records[i].major == me.major).collect()
    };
    if !by_major.is_empty() {
        return by_major;
    }

    let by_group: Vec<usize> = match me.group_key() {
        Some(key) => others().filter(|&i| records[i].group_key() == Some(key)).collect(),
        None => Vec::new(),
    };
    if !by_group.is_empty() {
        return by_group;
    }

    others().collect()
}

fn scale(value: f64, max: f64) -> u32 {
    if max <= 0.0 {
        return 0;
    }
    (value / max * 100.0).round().clamp(0.0, 100.0) as u32
}

fn mean(values: impl Iterator<Item = f64>) -> f64 {
    let (sum, n) = values.fold((0.0, 0usize), |(s, n), v| (s + v, n + 1));
    if n == 0 {
        0.0
    } else {
        sum / n as f64
    }
}

/// Compare the subject chosen by `policy` against its peer group.
/// Returns `None` for an empty set.
pub fn compare_with_peers(
    records: &[HistoryRecord],
    policy: &SubjectPolicy,
) -> Option<PeerComparison> {
    let subject_index = policy.pick(records)?;
    let subject = &records[subject_index];
    let peers: Vec<&HistoryRecord> = peer_indices(records, subject_index)
        .into_iter()
        .map(|i| &records[i])
        .collect();

    let max_cgpa = records.iter().map(HistoryRecord::cgpa_value).fold(10.0, f64::max);
    let max_exp = records.iter().map(HistoryRecord::experience_value).fold(1.0, f64::max);
    let max_skills = records
        .iter()
        .map(|r| r.skills.count() as f64)
        .fold(1.0, f64::max);

    let cert_rate = mean(peers.iter().map(|p| if p.has_certifications() { 1.0 } else { 0.0 }));

    let points = Metric::ALL
        .iter()
        .map(|&metric| {
            let (subject_score, peer_score) = match metric {
                Metric::Cgpa => (
                    scale(subject.cgpa_value(), max_cgpa),
                    scale(mean(peers.iter().map(|p| p.cgpa_value())), max_cgpa),
                ),
                Metric::Experience => (
                    scale(subject.experience_value(), max_exp),
                    scale(mean(peers.iter().map(|p| p.experience_value())), max_exp),
                ),
                Metric::Skills => (
                    scale(subject.skills.count() as f64, max_skills),
                    scale(mean(peers.iter().map(|p| p.skills.count() as f64)), max_skills),
                ),
                Metric::Certifications => (
                    if subject.has_certifications() { 100 } else { 0 },
                    scale(cert_rate, 1.0),
                ),
            };
            RadarPoint {
                metric,
                subject: subject_score,
                peers: peer_score,
            }
        })
        .collect();

    Some(PeerComparison {
        subject_index,
        peer_count: peers.len(),
        points,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Skills;

    fn record(user: &str, degree: &str, major: &str, cgpa: f64, exp: f64, skills: &str, certs: &str) -> HistoryRecord {
        HistoryRecord {
            user_id: Some(user.into()),
            degree: degree.into(),
            major: major.into(),
            cgpa: Some(cgpa),
            experience: Some(exp),
            skills: Skills::Text(skills.into()),
            certifications: certs.into(),
            ..Default::default()
        }
    }

    fn sample() -> Vec<HistoryRecord> {
        vec![
            record("1", "B.Tech", "CS", 9.0, 2.0, "Python, SQL", "AWS"),
            record("2", "B.Tech", "CS", 7.0, 0.0, "Java", ""),
            record("3", "B.Tech", "IT", 8.0, 4.0, "Go, Rust, C", "CKA"),
            record("1", "B.Sc", "Physics", 6.0, 1.0, "", ""),
        ]
    }

    #[test]
    fn test_empty_set_has_no_comparison() {
        assert!(compare_with_peers(&[], &SubjectPolicy::Leading).is_none());
    }

    #[test]
    fn test_most_recent_own_scans_from_end() {
        let policy = SubjectPolicy::MostRecentOwn { user_id: Some("1".into()) };
        let cmp = compare_with_peers(&sample(), &policy).unwrap();
        assert_eq!(cmp.subject_index, 3);
    }

    #[test]
    fn test_most_recent_own_falls_back_to_last() {
        let policy = SubjectPolicy::MostRecentOwn { user_id: Some("42".into()) };
        assert_eq!(compare_with_peers(&sample(), &policy).unwrap().subject_index, 3);

        let anonymous = SubjectPolicy::MostRecentOwn { user_id: None };
        assert_eq!(compare_with_peers(&sample(), &anonymous).unwrap().subject_index, 3);
    }

    #[test]
    fn test_leading_policy_takes_first() {
        let cmp = compare_with_peers(&sample(), &SubjectPolicy::Leading).unwrap();
        assert_eq!(cmp.subject_index, 0);
        // Same major "CS" wins over the wider B.Tech group.
        assert_eq!(cmp.peer_count, 1);
    }

    #[test]
    fn test_peers_fall_back_to_degree_group() {
        let records = vec![
            record("1", "B.Tech", "CS", 9.0, 2.0, "", ""),
            record("2", "B.Tech", "IT", 7.0, 0.0, "", ""),
            record("3", "B.Sc", "Maths", 8.0, 0.0, "", ""),
        ];
        let cmp = compare_with_peers(&records, &SubjectPolicy::Leading).unwrap();
        assert_eq!(cmp.peer_count, 1);
    }

    #[test]
    fn test_peers_fall_back_to_everyone_else() {
        let cmp = compare_with_peers(
            &sample(),
            &SubjectPolicy::MostRecentOwn { user_id: Some("1".into()) },
        )
        .unwrap();
        // Physics / B.Sc has no match, so all three other records are peers.
        assert_eq!(cmp.peer_count, 3);
    }

    #[test]
    fn test_subject_at_cgpa_max_scores_100() {
        let records = vec![
            record("1", "B.Tech", "CS", 10.0, 1.0, "a", ""),
            record("2", "B.Tech", "CS", 5.0, 1.0, "a", ""),
        ];
        let cmp = compare_with_peers(&records, &SubjectPolicy::Leading).unwrap();
        let cgpa = cmp.point(Metric::Cgpa).unwrap();
        assert_eq!(cgpa.subject, 100);
        assert_eq!(cgpa.peers, 50);
    }

    #[test]
    fn test_cgpa_scaled_against_at_least_ten() {
        let records = vec![
            record("1", "B.Tech", "CS", 8.0, 0.0, "", ""),
            record("2", "B.Tech", "CS", 6.0, 0.0, "", ""),
        ];
        let cmp = compare_with_peers(&records, &SubjectPolicy::Leading).unwrap();
        assert_eq!(cmp.point(Metric::Cgpa).unwrap().subject, 80);
        assert_eq!(cmp.point(Metric::Experience).unwrap().subject, 0);
    }

    #[test]
    fn test_all_metrics_for_leading_subject() {
        let cmp = compare_with_peers(&sample(), &SubjectPolicy::Leading).unwrap();
        // max cgpa 10, max exp 4, max skills 3; single peer is record 2.
        let exp = cmp.point(Metric::Experience).unwrap();
        assert_eq!((exp.subject, exp.peers), (50, 0));
        let skills = cmp.point(Metric::Skills).unwrap();
        assert_eq!((skills.subject, skills.peers), (67, 33));
        let certs = cmp.point(Metric::Certifications).unwrap();
        assert_eq!((certs.subject, certs.peers), (100, 0));
        assert_eq!(cmp.points.len(), 4);
    }

    #[test]
    fn test_certification_rate_for_peers() {
        let cmp = compare_with_peers(
            &sample(),
            &SubjectPolicy::MostRecentOwn { user_id: Some("1".into()) },
        )
        .unwrap();
        let certs = cmp.point(Metric::Certifications).unwrap();
        assert_eq!(certs.subject, 0);
        // Two of three peers hold certifications.
        assert_eq!(certs.peers, 67);
    }
}
