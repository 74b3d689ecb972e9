use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Dashboard roles. Serialized exactly as the user service spells them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    Admin,
    Supervisor,
    Translator,
    #[serde(rename = "Voice-over Artist")]
    VoiceOverArtist,
    #[serde(rename = "Sound Engineer")]
    SoundEngineer,
    Editor,
    User,
}

impl Role {
    pub const ALL: [Role; 7] = [
        Role::Admin,
        Role::Supervisor,
        Role::Translator,
        Role::VoiceOverArtist,
        Role::SoundEngineer,
        Role::Editor,
        Role::User,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "Admin",
            Role::Supervisor => "Supervisor",
            Role::Translator => "Translator",
            Role::VoiceOverArtist => "Voice-over Artist",
            Role::SoundEngineer => "Sound Engineer",
            Role::Editor => "Editor",
            Role::User => "User",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Profile of the signed-in user, as returned by the user service and as
/// persisted by the session store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub mobile: Option<String>,
    #[serde(default)]
    pub employee_id: Option<String>,
    #[serde(rename = "expLevel", default)]
    pub exp_level: Option<String>,
    pub role: Role,
    #[serde(default)]
    pub profile_image: Option<String>,
    #[serde(rename = "isverified", default)]
    pub is_verified: bool,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserEnvelope {
    pub success: bool,
    pub user: User,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UsersEnvelope {
    pub success: bool,
    #[serde(default)]
    pub users: Vec<User>,
}

/// Body of `PUT /users/{id}`. Unset fields are left untouched upstream.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct UserUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mobile: Option<String>,
    #[serde(rename = "expLevel", skip_serializing_if = "Option::is_none")]
    pub exp_level: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile_image: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn decodes_the_user_service_shape() {
        let user: User = serde_json::from_value(json!({
            "id": "u-7",
            "name": "Mira",
            "email": "mira@studio.test",
            "mobile": "555-0101",
            "employee_id": "EMP-7",
            "expLevel": "Senior",
            "role": "Voice-over Artist",
            "profile_image": null,
            "isverified": true,
            "created_at": "2024-03-01T09:30:00Z"
        }))
        .unwrap();

        assert_eq!(user.role, Role::VoiceOverArtist);
        assert_eq!(user.exp_level.as_deref(), Some("Senior"));
        assert!(user.is_verified);
        assert!(user.created_at.is_some());
    }

    #[test]
    fn role_names_match_their_wire_spelling() {
        for role in Role::ALL {
            let wire = serde_json::to_value(role).unwrap();
            assert_eq!(wire, json!(role.as_str()));
        }
    }

    #[test]
    fn unknown_roles_are_rejected() {
        assert!(serde_json::from_value::<Role>(json!("Producer")).is_err());
    }

    #[test]
    fn update_body_omits_unset_fields() {
        let body = serde_json::to_value(UserUpdate {
            name: Some("Mira K.".into()),
            ..UserUpdate::default()
        })
        .unwrap();
        assert_eq!(body, json!({ "name": "Mira K." }));
    }
}
