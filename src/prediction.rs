//! Shaping a `/predict` reply for display.

use crate::models::{PredictionResponse, Profile, RankedRole};

/// Rows always shown in the ranked list.
pub const RESULT_ROWS: usize = 3;

/// Role shown in padded rows.
pub const PLACEHOLDER_ROLE: &str = "N/A";

/// Truncate or pad `ranked` to exactly [`RESULT_ROWS`] entries. Padding rows
/// carry [`PLACEHOLDER_ROLE`] at zero confidence.
pub fn pad_ranked(mut ranked: Vec<RankedRole>) -> Vec<RankedRole> {
    ranked.truncate(RESULT_ROWS);
    while ranked.len() < RESULT_ROWS {
        ranked.push(RankedRole {
            role: PLACEHOLDER_ROLE.to_string(),
            confidence: 0.0,
        });
    }
    ranked
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfidenceBand {
    High,
    Medium,
    Low,
}

impl ConfidenceBand {
    pub fn of(confidence: f64) -> Self {
        if confidence >= 0.7 {
            ConfidenceBand::High
        } else if confidence >= 0.4 {
            ConfidenceBand::Medium
        } else {
            ConfidenceBand::Low
        }
    }

    pub fn css_class(&self) -> &'static str {
        match self {
            ConfidenceBand::High => "confidence-high",
            ConfidenceBand::Medium => "confidence-medium",
            ConfidenceBand::Low => "confidence-low",
        }
    }
}

/// A prediction ready to render: headline role, its confidence, and exactly
/// three ranked rows each with a generated explanation.
#[derive(Debug, Clone, PartialEq)]
pub struct PredictionOutcome {
    pub headline: String,
    pub confidence: f64,
    pub ranked: Vec<RankedRow>,
    /// Explanation text supplied by the backend, if any.
    pub server_explanation: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RankedRow {
    pub role: String,
    pub confidence: f64,
    pub explanation: String,
}

impl RankedRow {
    pub fn band(&self) -> ConfidenceBand {
        ConfidenceBand::of(self.confidence)
    }
}

impl PredictionOutcome {
    /// `form` is the profile that was submitted; explanations quote it.
    pub fn from_response(response: PredictionResponse, form: &Profile) -> Self {
        let ranked = pad_ranked(response.top_predictions)
            .into_iter()
            .map(|p| RankedRow {
                explanation: explain(&p.role, form),
                role: p.role,
                confidence: p.confidence,
            })
            .collect();
        Self {
            headline: response.prediction,
            confidence: response.confidence,
            ranked,
            server_explanation: response
                .explanation
                .map(|e| e.trim().to_string())
                .filter(|e| !e.is_empty()),
        }
    }

    pub fn percent(&self) -> u32 {
        crate::insights::percent(self.confidence)
    }
}

fn or_na(value: &str) -> &str {
    if value.trim().is_empty() {
        "N/A"
    } else {
        value
    }
}

fn years(experience: Option<f64>) -> String {
    experience.unwrap_or(0.0).to_string()
}

/// Template sentence for why `role` suits the submitted profile. Matched by
/// keyword in the role name; the first matching template wins.
pub fn explain(role: &str, form: &Profile) -> String {
    let role = role.to_lowercase();
    let skills = if form.skills.is_empty() {
        "N/A".to_string()
    } else {
        form.skills.join(", ")
    };
    let certifications = or_na(&form.certifications);
    let experience = years(form.experience);

    if role.contains("data scientist") {
        format!(
            "Predicted because of your background in {} - {}, analytical skills like {}, and certifications ({}) relevant to ML/AI.",
            form.degree, form.major, skills, certifications
        )
    } else if role.contains("software engineer") {
        format!(
            "Based on your degree in {}, coding skills ({}), and {} years of experience in development.",
            form.degree, skills, experience
        )
    } else if role.contains("backend") {
        format!(
            "Suggested because of your expertise in server-side skills ({}) and {} years of backend-related work.",
            skills, experience
        )
    } else if role.contains("frontend") {
        let major = if form.major.trim().is_empty() { "your field" } else { form.major.as_str() };
        format!(
            "Likely match due to your UI/UX related skills ({}) and knowledge in {}.",
            skills, major
        )
    } else if role.contains("analyst") {
        format!(
            "Chosen because of your degree in {}, analytical certifications ({}), and skills in {}.",
            form.degree, certifications, skills
        )
    } else {
        format!(
            "Predicted based on your degree: {}, major: {}, skills: {}, certifications: {}, and experience: {} years.",
            or_na(&form.degree),
            or_na(&form.major),
            skills,
            certifications,
            experience
        )
    }
}
