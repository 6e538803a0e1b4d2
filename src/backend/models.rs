//! Backend row types
//!
//! Mirrors the `roles`, `user_profiles` and `patient_images` tables, plus the
//! user object handed out by the hosted auth service.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::locale::Language;

/// A permission bundle stored in the `roles` table
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Role {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub permissions: Vec<String>,
}

/// Insert payload for a role
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewRole {
    pub name: String,
    pub permissions: Vec<String>,
}

impl NewRole {
    pub fn new(name: impl Into<String>, permissions: &[&str]) -> Self {
        Self {
            name: name.into(),
            permissions: permissions.iter().map(|p| p.to_string()).collect(),
        }
    }
}

/// A row of the `user_profiles` table
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserProfile {
    pub id: String,
    pub email: String,
    pub role_id: String,
    pub full_name: String,
    pub username: String,
    #[serde(default)]
    pub preferred_language: Language,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

/// Insert payload for a user profile
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewUserProfile {
    pub id: String,
    pub email: String,
    pub role_id: String,
    pub full_name: String,
    pub username: String,
    pub preferred_language: Language,
}

impl NewUserProfile {
    pub fn into_profile(self, created_at: Option<DateTime<Utc>>) -> UserProfile {
        UserProfile {
            id: self.id,
            email: self.email,
            role_id: self.role_id,
            full_name: self.full_name,
            username: self.username,
            preferred_language: self.preferred_language,
            created_at,
        }
    }
}

/// Role name as embedded in the auth user object
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RoleRef {
    pub name: String,
}

/// User as supplied by the external auth service. Read only.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AuthUser {
    pub id: String,
    pub email: String,
    #[serde(default)]
    pub email_confirmed_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub profile: Option<UserProfile>,
    #[serde(default)]
    pub role: Option<RoleRef>,
}

impl AuthUser {
    pub fn new(id: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            email: email.into(),
            email_confirmed_at: None,
            profile: None,
            role: None,
        }
    }

    pub fn email_confirmed(&self) -> bool {
        self.email_confirmed_at.is_some()
    }

    pub fn has_profile(&self) -> bool {
        self.profile.is_some()
    }

    pub fn role_name(&self) -> Option<&str> {
        self.role.as_ref().map(|r| r.name.as_str())
    }
}

/// Category of an uploaded patient image
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ImageType {
    Quotation,
    Progress,
    Medical,
    Identification,
}

impl ImageType {
    pub const ALL: [ImageType; 4] = [
        ImageType::Quotation,
        ImageType::Progress,
        ImageType::Medical,
        ImageType::Identification,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ImageType::Quotation => "quotation",
            ImageType::Progress => "progress",
            ImageType::Medical => "medical",
            ImageType::Identification => "identification",
        }
    }
}

impl fmt::Display for ImageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ImageType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "quotation" => Ok(ImageType::Quotation),
            "progress" => Ok(ImageType::Progress),
            "medical" => Ok(ImageType::Medical),
            "identification" => Ok(ImageType::Identification),
            other => Err(format!("Unknown image type: {}", other)),
        }
    }
}

/// A row of the `patient_images` table
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PatientImage {
    pub id: String,
    pub patient_id: String,
    pub image_type: ImageType,
    pub url: String,
    pub file_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}
