//! Data-model records for the portal's JSON resources and the session.
//!
//! Field names follow the published JSON resources; optional fields are
//! genuinely optional in the data (records authored by hand over several
//! school years are uneven).

use indexmap::IndexMap;
use serde::de::Deserializer;
use serde::{Deserialize, Serialize};

/// Roles that may hold a dashboard session.
///
/// Teachers exist in the user directory but have no dashboard yet, so
/// they are deliberately not representable here: a stored session with
/// any other role string fails to parse and reads as "no session".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Student,
}

/// The user half of a session record.
///
/// Administrator records simply leave the student-only fields empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub full_name: String,
    pub national_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grade_level: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_image: Option<String>,
}

/// A persisted login session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub role: Role,
    pub user: UserProfile,
}

/// One record in the user directory (administrator, student, or teacher --
/// the three collections share a shape).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserRecord {
    pub full_name: String,
    pub national_id: String,
    pub password: String,
    #[serde(default)]
    pub class_name: Option<String>,
    #[serde(default)]
    pub grade_level: Option<String>,
    #[serde(default)]
    pub profile_image: Option<String>,
}

impl UserRecord {
    /// The session-safe projection of this record.
    pub fn profile(&self) -> UserProfile {
        UserProfile {
            full_name: self.full_name.clone(),
            national_id: self.national_id.clone(),
            class_name: self.class_name.clone(),
            grade_level: self.grade_level.clone(),
            profile_image: self.profile_image.clone(),
        }
    }
}

/// The `students.json` resource: all three user collections.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UserDirectory {
    #[serde(default)]
    pub admins: Vec<UserRecord>,
    #[serde(default)]
    pub students: Vec<UserRecord>,
    #[serde(default)]
    pub teachers: Vec<UserRecord>,
}

/// An announcement shown on the home page.
#[derive(Debug, Clone, Deserialize)]
pub struct Announcement {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub body: Option<String>,
    #[serde(default)]
    pub published_at: Option<String>,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
}

/// A news item. Ids appear as both numbers and strings in the data, so
/// they are held (and compared) as strings.
#[derive(Debug, Clone, Deserialize)]
pub struct NewsItem {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub body: Option<String>,
    #[serde(default)]
    pub published_at: Option<String>,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub video_url: Option<String>,
}

/// The `live.json` resource: the current live broadcast, if any.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LiveBroadcast {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub body: Option<String>,
    #[serde(default)]
    pub published_at: Option<String>,
    #[serde(default)]
    pub live_embed_code: Option<String>,
}

/// One term's report card for one student.
#[derive(Debug, Clone, Deserialize)]
pub struct ReportCard {
    pub student_national_id: String,
    #[serde(deserialize_with = "string_or_number")]
    pub term: String,
    pub file_url: String,
}

/// Weekly schedules: class name -> weekday -> lessons, in authoring order.
pub type Schedules = IndexMap<String, IndexMap<String, Vec<String>>>;

/// Accept a JSON string or number and hold it as a string.
fn string_or_number<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Str(String),
        Num(serde_json::Number),
    }

    match Raw::deserialize(deserializer)? {
        Raw::Str(s) => Ok(s),
        Raw::Num(n) => Ok(n.to_string()),
    }
}
