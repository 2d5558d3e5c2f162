//! Job posting domain model.
//!
//! Postings are created server-side; the client holds a read-only projection.
//! The wire format uses camelCase keys and Mongo-style `_id` identifiers.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Seniority level of a posting.
///
/// Known levels are typed; anything else the server sends is kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Position {
    Internship,
    Entry,
    Mid,
    Senior,
    Other(String),
}

impl Position {
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Internship => "internship",
            Self::Entry => "entry",
            Self::Mid => "mid",
            Self::Senior => "senior",
            Self::Other(value) => value,
        }
    }

    /// Display label: `internship` as-is, every other level suffixed with
    /// `-level`.
    ///
    /// ```
    /// use jobboard::domain::Position;
    ///
    /// assert_eq!(Position::Internship.label(), "internship");
    /// assert_eq!(Position::Mid.label(), "mid-level");
    /// assert_eq!(Position::from("lead".to_string()).label(), "lead-level");
    /// ```
    #[must_use]
    pub fn label(&self) -> String {
        match self {
            Self::Internship => "internship".to_string(),
            other => format!("{}-level", other.as_str()),
        }
    }
}

impl From<String> for Position {
    fn from(value: String) -> Self {
        match value.as_str() {
            "internship" => Self::Internship,
            "entry" => Self::Entry,
            "mid" => Self::Mid,
            "senior" => Self::Senior,
            _ => Self::Other(value),
        }
    }
}

impl From<Position> for String {
    fn from(position: Position) -> Self {
        position.as_str().to_string()
    }
}

/// A user listed as having applied to a posting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Applicant {
    pub id: String,
    #[serde(default)]
    pub name: String,
}

/// Owner of a posting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostedBy {
    pub id: String,
    #[serde(default)]
    pub name: String,
}

/// Job posting as returned by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "WirePosting")]
pub struct JobPosting {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    pub company_name: String,
    pub position: Position,
    pub description: String,
    pub requirements: Vec<String>,
    pub applicants: Vec<Applicant>,
    pub posted_by: Option<PostedBy>,
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct WirePosting {
    #[serde(rename = "_id")]
    mongo_id: Option<String>,
    id: Option<String>,
    title: String,
    company_name: String,
    position: Position,
    #[serde(default)]
    description: String,
    #[serde(default, deserialize_with = "string_or_list")]
    requirements: Vec<String>,
    #[serde(default)]
    applicants: Vec<Applicant>,
    #[serde(default)]
    posted_by: Option<PostedBy>,
    #[serde(default)]
    created_at: Option<DateTime<Utc>>,
}

impl TryFrom<WirePosting> for JobPosting {
    type Error = String;

    fn try_from(wire: WirePosting) -> Result<Self, Self::Error> {
        Ok(Self {
            id: super::record_id(wire.mongo_id, wire.id)?,
            title: wire.title,
            company_name: wire.company_name,
            position: wire.position,
            description: wire.description,
            requirements: wire.requirements,
            applicants: wire.applicants,
            posted_by: wire.posted_by,
            created_at: wire.created_at,
        })
    }
}

impl JobPosting {
    #[must_use]
    pub fn has_applicant(&self, user_id: &str) -> bool {
        self.applicants.iter().any(|applicant| applicant.id == user_id)
    }

    #[must_use]
    pub fn is_posted_by(&self, user_id: &str) -> bool {
        self.posted_by
            .as_ref()
            .is_some_and(|owner| owner.id == user_id)
    }
}

/// Accepts `requirements` as either a list or the single string the create
/// form submits.
fn string_or_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        One(String),
        Many(Vec<String>),
        Missing(()),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::One(value) if value.is_empty() => vec![],
        Raw::One(value) => vec![value],
        Raw::Many(values) => values,
        Raw::Missing(()) => vec![],
    })
}
