//! User profile read projection.

use serde::{Deserialize, Deserializer, Serialize};

/// Public profile of a user as returned by the user-detail endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "WireProfile")]
pub struct UserProfile {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub image: Option<String>,
    pub phone: Option<String>,
    pub skills: Vec<String>,
    /// Reference to the uploaded CV (path or URL, as stored by the server).
    pub cv: Option<String>,
    pub email: Option<String>,
    pub role: Option<String>,
}

#[derive(Deserialize)]
struct WireProfile {
    #[serde(rename = "_id")]
    mongo_id: Option<String>,
    id: Option<String>,
    #[serde(default)]
    name: String,
    #[serde(default)]
    image: Option<String>,
    #[serde(default)]
    phone: Option<String>,
    #[serde(default, deserialize_with = "skills_list")]
    skills: Vec<String>,
    #[serde(default)]
    cv: Option<String>,
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    role: Option<String>,
}

impl TryFrom<WireProfile> for UserProfile {
    type Error = String;

    fn try_from(wire: WireProfile) -> Result<Self, Self::Error> {
        Ok(Self {
            id: super::record_id(wire.mongo_id, wire.id)?,
            name: wire.name,
            image: wire.image,
            phone: wire.phone,
            skills: wire.skills,
            cv: wire.cv,
            email: wire.email,
            role: wire.role,
        })
    }
}

/// Skills are submitted as a JSON-encoded array inside a multipart field, so
/// some servers hand them back as that string. Accept both shapes.
fn skills_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        List(Vec<String>),
        Encoded(String),
        Missing(()),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::List(skills) => skills,
        Raw::Encoded(text) => serde_json::from_str::<Vec<String>>(&text).unwrap_or_else(|_| {
            text.split(',')
                .map(str::trim)
                .filter(|skill| !skill.is_empty())
                .map(String::from)
                .collect()
        }),
        Raw::Missing(()) => vec![],
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_encoded_skills() {
        let raw = serde_json::json!({
            "_id": "u1",
            "name": "Ada",
            "skills": "[\"rust\",\"sql\"]"
        });
        let profile: UserProfile = serde_json::from_value(raw).unwrap();
        assert_eq!(profile.skills, vec!["rust", "sql"]);
        assert!(profile.image.is_none());
    }

    #[test]
    fn decodes_comma_separated_skills() {
        let raw = serde_json::json!({ "id": "u2", "skills": "go, sql ," });
        let profile: UserProfile = serde_json::from_value(raw).unwrap();
        assert_eq!(profile.skills, vec!["go", "sql"]);
    }

    #[test]
    fn profile_carrying_both_id_keys_decodes() {
        let raw = serde_json::json!({ "_id": "u3", "id": "u3", "skills": ["go"] });
        let profile: UserProfile = serde_json::from_value(raw).unwrap();
        assert_eq!(profile.id, "u3");
        assert_eq!(profile.skills, vec!["go"]);
    }
}
