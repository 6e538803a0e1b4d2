//! Data Transfer Objects
//!
//! Request and response types for the API endpoints.
//! These types are serialized/deserialized to/from JSON.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::backend::PatientImage;
use crate::countdown::TimeRemaining;
use crate::locale::Language;

// ============================================
// HEALTH DTOs
// ============================================

/// Full health status
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    /// "healthy", "degraded" or "unhealthy"
    pub status: String,
    /// "connected" or "disconnected"
    pub backend: String,
    pub has_roles: bool,
    pub has_user_profiles: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub uptime_seconds: u64,
    pub version: String,
}

// ============================================
// DEPLOYMENT DTOs
// ============================================

/// Profile repair request
#[derive(Debug, Deserialize)]
pub struct FixProfileRequest {
    pub user_id: String,
    pub email: String,
}

// ============================================
// COUNTDOWN DTOs
// ============================================

#[derive(Debug, Deserialize)]
pub struct CountdownParams {
    #[serde(default)]
    pub target: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CountdownResponse {
    /// Parsed target, absent when missing or unparseable
    pub target: Option<DateTime<Utc>>,
    #[serde(flatten)]
    pub remaining: TimeRemaining,
    pub total_seconds: i64,
    pub display: String,
}

// ============================================
// LOCALE DTOs
// ============================================

#[derive(Debug, Serialize, Deserialize)]
pub struct LanguageInfo {
    pub code: String,
    pub native_name: String,
    pub direction: String,
    pub font_class: String,
}

impl From<Language> for LanguageInfo {
    fn from(language: Language) -> Self {
        Self {
            code: language.code().to_string(),
            native_name: language.native_name().to_string(),
            direction: language.direction().to_string(),
            font_class: language.font_class().to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct TranslateRequest {
    /// Language code; English when omitted
    #[serde(default)]
    pub language: Option<String>,
    pub key: String,
    #[serde(default)]
    pub params: HashMap<String, String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TranslateResponse {
    pub language: Language,
    pub key: String,
    pub text: String,
}

// ============================================
// IMAGE DTOs
// ============================================

#[derive(Debug, Deserialize)]
pub struct ImageListParams {
    #[serde(rename = "type", default)]
    pub image_type: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ImageListResponse {
    pub patient_id: String,
    pub image_type: String,
    pub count: usize,
    pub images: Vec<PatientImage>,
}
