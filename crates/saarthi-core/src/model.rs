//! Wire Records
//!
//! JSON shapes exchanged with the portal API.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Portal roles. The wire form is `SCREAMING_SNAKE_CASE`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    PanchayatOfficer,
    DistrictAdmin,
    #[default]
    RuralUser,
}

impl Role {
    /// Every role, in the order the role picker lists them
    pub const ALL: [Self; 3] = [Self::PanchayatOfficer, Self::DistrictAdmin, Self::RuralUser];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::PanchayatOfficer => "PANCHAYAT_OFFICER",
            Self::DistrictAdmin => "DISTRICT_ADMIN",
            Self::RuralUser => "RURAL_USER",
        }
    }

    /// Human-readable label
    pub const fn label(self) -> &'static str {
        match self {
            Self::PanchayatOfficer => "Panchayat Officer",
            Self::DistrictAdmin => "District Admin",
            Self::RuralUser => "Rural User",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|role| role.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown role: {s}"))
    }
}

/// The signed-in identity returned by `/auth/me`
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub role: Role,
    pub email: String,
    pub full_name: String,
    #[serde(default = "default_active")]
    pub is_active: bool,
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub updated_at: Option<DateTime<Utc>>,
}

const fn default_active() -> bool {
    true
}

/// Display-only timestamp. Accepts RFC 3339 or a naive ISO value (read as
/// UTC); anything else becomes `None` instead of failing the whole record.
fn lenient_timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    let Some(raw) = value.as_str() else {
        return Ok(None);
    };

    let parsed = DateTime::parse_from_rfc3339(raw)
        .map(|at| at.with_timezone(&Utc))
        .ok()
        .or_else(|| {
            NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
                .ok()
                .map(|naive| naive.and_utc())
        });

    Ok(parsed)
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub role: Role,
    pub full_name: String,
    pub email: String,
    pub password: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginRequest {
    pub role: Role,
    pub email: String,
    pub password: String,
}

/// Partial profile update. Absent fields are left untouched server-side.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateMeRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

impl UpdateMeRequest {
    pub const fn is_empty(&self) -> bool {
        self.full_name.is_none() && self.password.is_none()
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default = "default_token_type")]
    pub token_type: String,
}

fn default_token_type() -> String {
    "bearer".into()
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageResponse {
    #[serde(default)]
    pub message: String,
}

/// Public branding copy. Every field may be missing.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Branding {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub tagline: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Health {
    #[serde(default)]
    pub status: Option<String>,
}

/// A record managed through `/api/users`
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub city: String,
    #[serde(default, rename = "createdAt", skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub city: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_wire_format() {
        let json = serde_json::to_string(&Role::PanchayatOfficer).unwrap();
        assert_eq!(json, "\"PANCHAYAT_OFFICER\"");
        assert_eq!("district_admin".parse::<Role>().unwrap(), Role::DistrictAdmin);
        assert!("MAYOR".parse::<Role>().is_err());
        assert_eq!(Role::default(), Role::RuralUser);
    }

    #[test]
    fn empty_update_serializes_to_empty_object() {
        let body = serde_json::to_value(UpdateMeRequest::default()).unwrap();
        assert_eq!(body, serde_json::json!({}));
    }

    #[test]
    fn profile_tolerates_missing_timestamps() {
        let profile: UserProfile = serde_json::from_value(serde_json::json!({
            "role": "RURAL_USER",
            "email": "asha@example.org",
            "full_name": "Asha Devi",
        }))
        .unwrap();
        assert!(profile.is_active);
        assert!(profile.created_at.is_none());
    }

    #[test]
    fn profile_accepts_naive_timestamps() {
        let profile: UserProfile = serde_json::from_value(serde_json::json!({
            "role": "DISTRICT_ADMIN",
            "email": "asha@example.org",
            "full_name": "Asha Devi",
            "created_at": "2026-03-01T09:00:00.123456",
            "updated_at": "2026-03-01T09:00:00+05:30",
        }))
        .unwrap();

        let created = profile.created_at.unwrap();
        assert_eq!(created.format("%Y-%m-%d %H:%M:%S").to_string(), "2026-03-01 09:00:00");
        let updated = profile.updated_at.unwrap();
        assert_eq!(updated.format("%H:%M").to_string(), "03:30");
    }

    #[test]
    fn profile_ignores_unreadable_timestamps() {
        let profile: UserProfile = serde_json::from_value(serde_json::json!({
            "role": "RURAL_USER",
            "email": "asha@example.org",
            "full_name": "Asha Devi",
            "created_at": "last tuesday",
            "updated_at": 1_772_355_600,
        }))
        .unwrap();

        assert!(profile.created_at.is_none());
        assert!(profile.updated_at.is_none());
    }

    #[test]
    fn user_record_reads_camel_case_timestamp() {
        let record: UserRecord = serde_json::from_value(serde_json::json!({
            "id": "a1b2c3d4e5",
            "name": "Ravi",
            "email": "ravi@example.org",
            "createdAt": "2026-01-05T10:00:00+00:00",
        }))
        .unwrap();
        assert_eq!(record.city, "");
        assert_eq!(record.created_at.as_deref(), Some("2026-01-05T10:00:00+00:00"));
    }
}
