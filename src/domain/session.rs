//! Authenticated identity held by the client.
//!
//! The user record mirrors whatever the login endpoint returned. Fields the
//! client reads are typed; everything else is kept in `extra` so a profile
//! merge never drops data the server sent.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Role string the API assigns to job seekers.
pub const APPLICANT_ROLE: &str = "user";

/// User snapshot stored alongside the token.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "WireSessionUser")]
pub struct SessionUser {
    #[serde(rename = "_id")]
    pub id: String,

    pub name: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    pub role: String,

    /// Fields the client does not interpret (image, phone, skills, ...).
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Deserialize)]
struct WireSessionUser {
    #[serde(rename = "_id")]
    mongo_id: Option<String>,
    id: Option<String>,
    #[serde(default)]
    name: String,
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    role: String,
    #[serde(flatten)]
    extra: Map<String, Value>,
}

impl TryFrom<WireSessionUser> for SessionUser {
    type Error = String;

    fn try_from(wire: WireSessionUser) -> Result<Self, Self::Error> {
        Ok(Self {
            id: super::record_id(wire.mongo_id, wire.id)?,
            name: wire.name,
            email: wire.email,
            role: wire.role,
            extra: wire.extra,
        })
    }
}

impl SessionUser {
    pub fn new(id: impl Into<String>, name: impl Into<String>, role: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            email: None,
            role: role.into(),
            extra: Map::new(),
        }
    }

    #[must_use]
    pub fn is_applicant(&self) -> bool {
        self.role == APPLICANT_ROLE
    }

    /// Shallow-merges a profile update: fields present in `patch` replace the
    /// stored ones, everything else is preserved.
    pub fn merge_profile(&mut self, patch: &ProfilePatch) {
        self.name.clone_from(&patch.name);
        self.extra
            .insert("image".to_string(), Value::String(patch.image.clone()));
        self.extra
            .insert("phone".to_string(), Value::String(patch.phone.clone()));
        self.extra.insert(
            "skills".to_string(),
            Value::Array(patch.skills.iter().cloned().map(Value::String).collect()),
        );
        if let Some(cv) = &patch.cv {
            self.extra.insert("cv".to_string(), Value::String(cv.clone()));
        }
    }
}

/// Profile fields sent by an edit and merged into the session on success.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfilePatch {
    pub name: String,
    pub image: String,
    pub phone: String,
    pub skills: Vec<String>,
    /// File name of the uploaded CV, if one was attached.
    pub cv: Option<String>,
}

/// Token and user as held by the session controller.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Session {
    pub token: Option<String>,
    pub user: Option<SessionUser>,
}

impl Session {
    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        self.token.is_some() && self.user.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_round_trips_unknown_fields() {
        let raw = serde_json::json!({
            "_id": "u1",
            "name": "Ada",
            "email": "ada@example.com",
            "role": "user",
            "gender": "female",
        });

        let user: SessionUser = serde_json::from_value(raw).unwrap();
        assert_eq!(user.id, "u1");
        assert!(user.is_applicant());
        assert_eq!(user.extra.get("gender"), Some(&Value::from("female")));

        let back = serde_json::to_value(&user).unwrap();
        assert_eq!(back["_id"], "u1");
        assert_eq!(back["gender"], "female");
    }

    #[test]
    fn accepts_both_id_keys_in_one_record() {
        let raw = serde_json::json!({ "_id": "u1", "id": "u1", "name": "Ada", "role": "user" });
        let user: SessionUser = serde_json::from_value(raw).unwrap();
        assert_eq!(user.id, "u1");
        assert!(!user.extra.contains_key("id"));

        let plain: SessionUser = serde_json::from_value(serde_json::json!({ "id": "u2" })).unwrap();
        assert_eq!(plain.id, "u2");

        let missing = serde_json::from_value::<SessionUser>(serde_json::json!({ "name": "x" }));
        assert!(missing.is_err());
    }

    #[test]
    fn merge_profile_preserves_untouched_fields() {
        let mut user = SessionUser::new("u1", "Ada", "user");
        user.email = Some("ada@example.com".to_string());
        user.extra.insert("gender".to_string(), Value::from("female"));

        user.merge_profile(&ProfilePatch {
            name: "Ada L.".to_string(),
            image: "https://img/ada.png".to_string(),
            phone: "555".to_string(),
            skills: vec!["rust".to_string()],
            cv: None,
        });

        assert_eq!(user.name, "Ada L.");
        assert_eq!(user.email.as_deref(), Some("ada@example.com"));
        assert_eq!(user.extra["gender"], "female");
        assert_eq!(user.extra["skills"], serde_json::json!(["rust"]));
        assert!(!user.extra.contains_key("cv"));
    }
}
