//! Typed shapes of everything exchanged with the prediction backend.
//!
//! The backend is loose about types: numbers arrive as strings when the form
//! that saved them sent strings, ids arrive as integers or strings, and skills
//! arrive either as a list or as a comma-separated string. Everything is
//! normalized here so the rest of the crate never sees that looseness.

use serde::{Deserialize, Serialize};

// -- Session --

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Admin,
    #[serde(other)]
    Unknown,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Admin => "admin",
            Role::Unknown => "unknown",
        }
    }
}

/// Cached attributes of the logged-in user.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct User {
    #[serde(
        default,
        alias = "user_id",
        alias = "_id",
        deserialize_with = "lenient::opt_id"
    )]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub email: String,
    #[serde(default)]
    pub role: Option<Role>,
}

impl User {
    pub fn is_admin(&self) -> bool {
        self.role == Some(Role::Admin)
    }
}

/// Client-held proof of authentication. Also the shape of a `/login` reply.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Session {
    #[serde(default, deserialize_with = "lenient::string")]
    pub token: String,
    #[serde(default)]
    pub user: User,
}

impl Session {
    pub fn has_token(&self) -> bool {
        !self.token.trim().is_empty()
    }
}

// -- Skills --

/// A skills field as stored by the backend.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Skills {
    List(Vec<String>),
    Text(String),
    #[default]
    Missing,
}

impl Skills {
    /// Number of skills: list length, or non-empty comma-separated tokens.
    pub fn count(&self) -> usize {
        match self {
            Skills::List(items) => items.len(),
            Skills::Text(text) => split_skills(text).len(),
            Skills::Missing => 0,
        }
    }

    pub fn to_list(&self) -> Vec<String> {
        match self {
            Skills::List(items) => items.clone(),
            Skills::Text(text) => split_skills(text),
            Skills::Missing => Vec::new(),
        }
    }

    /// Render for display or export, joining list entries with `separator`.
    pub fn joined(&self, separator: &str) -> String {
        match self {
            Skills::List(items) => items.join(separator),
            Skills::Text(text) => text.clone(),
            Skills::Missing => String::new(),
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, Skills::Missing)
    }
}

/// Split a comma-separated skills string into trimmed, non-empty entries.
pub fn split_skills(text: &str) -> Vec<String> {
    text.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

// -- Profile --

/// Academic profile. Also the body of a `/predict` request, which takes the
/// same six fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    #[serde(default, deserialize_with = "lenient::string")]
    pub degree: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub major: String,
    #[serde(default, deserialize_with = "lenient::opt_f64")]
    pub cgpa: Option<f64>,
    #[serde(default, deserialize_with = "lenient::opt_f64")]
    pub experience: Option<f64>,
    #[serde(
        default,
        deserialize_with = "lenient::skill_list",
        serialize_with = "lenient::join_skills"
    )]
    pub skills: Vec<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub certifications: String,
}

// -- Predictions --

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedRole {
    #[serde(default, deserialize_with = "lenient::string")]
    pub role: String,
    #[serde(default, deserialize_with = "lenient::f64_or_zero")]
    pub confidence: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct PredictionResponse {
    #[serde(default, deserialize_with = "lenient::string")]
    pub prediction: String,
    #[serde(default, deserialize_with = "lenient::f64_or_zero")]
    pub confidence: f64,
    #[serde(default, deserialize_with = "lenient::vec_or_empty")]
    pub top_predictions: Vec<RankedRole>,
    #[serde(default)]
    pub explanation: Option<String>,
}

/// One stored prediction outcome. `/history` omits the user columns and ids,
/// `/history/all` includes them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HistoryRecord {
    #[serde(default, deserialize_with = "lenient::opt_id")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_id")]
    pub user_id: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub user_name: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub user_email: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub date: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub degree: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub major: String,
    #[serde(default, deserialize_with = "lenient::opt_f64")]
    pub cgpa: Option<f64>,
    #[serde(default, deserialize_with = "lenient::opt_f64")]
    pub experience: Option<f64>,
    #[serde(default)]
    pub skills: Skills,
    #[serde(default, deserialize_with = "lenient::string")]
    pub certifications: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub result: String,
    #[serde(default, deserialize_with = "lenient::opt_f64")]
    pub confidence: Option<f64>,
    #[serde(default, deserialize_with = "lenient::vec_or_empty")]
    pub top_predictions: Vec<RankedRole>,
}

impl HistoryRecord {
    /// Degree, falling back to major when no degree was recorded.
    pub fn group_key(&self) -> Option<&str> {
        [self.degree.as_str(), self.major.as_str()]
            .into_iter()
            .find(|s| !s.trim().is_empty())
    }

    /// Predicted role, or "Unknown" when the record has none.
    pub fn role_label(&self) -> &str {
        if self.result.trim().is_empty() {
            "Unknown"
        } else {
            &self.result
        }
    }

    pub fn cgpa_value(&self) -> f64 {
        self.cgpa.unwrap_or(0.0)
    }

    pub fn experience_value(&self) -> f64 {
        self.experience.unwrap_or(0.0)
    }

    pub fn has_certifications(&self) -> bool {
        !self.certifications.trim().is_empty()
    }

    pub fn belongs_to(&self, user_id: &str) -> bool {
        self.user_id.as_deref() == Some(user_id)
    }

    /// Up to three ranked roles. Records saved without a ranking fall back to
    /// the stored result at full confidence; records with neither yield none.
    pub fn top_three(&self) -> Vec<RankedRole> {
        if self.top_predictions.is_empty() {
            if self.result.trim().is_empty() {
                return Vec::new();
            }
            return vec![RankedRole {
                role: self.result.clone(),
                confidence: self.confidence.filter(|c| *c > 0.0).unwrap_or(1.0),
            }];
        }
        self.top_predictions.iter().take(3).cloned().collect()
    }
}

// -- Option vocabulary --

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OptionLists {
    #[serde(default, deserialize_with = "lenient::vec_or_empty")]
    pub degrees: Vec<String>,
    #[serde(default, deserialize_with = "lenient::vec_or_empty")]
    pub majors: Vec<String>,
    #[serde(default, deserialize_with = "lenient::vec_or_empty")]
    pub skills: Vec<String>,
}

// -- Admin --

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct AdminStats {
    #[serde(default)]
    pub total_users: u64,
    #[serde(default)]
    pub total_admins: u64,
    #[serde(default)]
    pub total_predictions: u64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct UserAccount {
    #[serde(deserialize_with = "lenient::id")]
    pub user_id: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub user_name: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub user_email: String,
    #[serde(default)]
    pub role: Option<Role>,
}

impl UserAccount {
    pub fn is_admin(&self) -> bool {
        self.role == Some(Role::Admin)
    }
}

/// `(label, count)` pair as returned by the tally endpoints.
pub type Tally = (String, u64);

// -- Request bodies --

#[derive(Debug, Clone, Serialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct Registration {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct PasswordReset {
    pub email: String,
    pub phone: String,
    pub new_password: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct NewAdmin {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Generic `{message}` acknowledgement.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Ack {
    #[serde(default)]
    pub message: Option<String>,
}

mod lenient {
    use serde::{Deserialize, Deserializer, Serializer};

    use super::{split_skills, Skills};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum NumberOrText {
        Number(f64),
        Text(String),
    }

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum IdRepr {
        Int(i64),
        Text(String),
    }

    pub fn string<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
        Ok(Option::<String>::deserialize(d)?.unwrap_or_default())
    }

    pub fn opt_f64<'de, D: Deserializer<'de>>(d: D) -> Result<Option<f64>, D::Error> {
        Ok(match Option::<NumberOrText>::deserialize(d)? {
            Some(NumberOrText::Number(n)) if n.is_finite() => Some(n),
            Some(NumberOrText::Text(s)) => s.trim().parse::<f64>().ok().filter(|n| n.is_finite()),
            _ => None,
        })
    }

    pub fn f64_or_zero<'de, D: Deserializer<'de>>(d: D) -> Result<f64, D::Error> {
        Ok(opt_f64(d)?.unwrap_or(0.0))
    }

    pub fn opt_id<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
        Ok(match Option::<IdRepr>::deserialize(d)? {
            Some(IdRepr::Int(n)) => Some(n.to_string()),
            Some(IdRepr::Text(s)) if !s.trim().is_empty() => Some(s.trim().to_string()),
            _ => None,
        })
    }

    pub fn id<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
        opt_id(d)?.ok_or_else(|| serde::de::Error::custom("missing id"))
    }

    pub fn vec_or_empty<'de, D, T>(d: D) -> Result<Vec<T>, D::Error>
    where
        D: Deserializer<'de>,
        T: Deserialize<'de>,
    {
        Ok(Option::<Vec<T>>::deserialize(d)?.unwrap_or_default())
    }

    pub fn skill_list<'de, D: Deserializer<'de>>(d: D) -> Result<Vec<String>, D::Error> {
        Ok(Skills::deserialize(d)?.to_list())
    }

    /// The backend stores skills as one comma-separated column.
    pub fn join_skills<S: Serializer>(skills: &[String], s: S) -> Result<S::Ok, S::Error> {
        let cleaned: Vec<String> = skills.iter().flat_map(|skill| split_skills(skill)).collect();
        s.serialize_str(&cleaned.join(", "))
    }
}
