//! Locale Routes
//!
//! - GET /api/v1/languages - Supported languages
//! - POST /api/v1/translate - Translate a catalog key

use axum::Json;

use crate::api::dto::{LanguageInfo, TranslateRequest, TranslateResponse};
use crate::api::error::ApiResult;
use crate::locale::{translate, Language};

/// GET /api/v1/languages
pub async fn list_languages() -> Json<Vec<LanguageInfo>> {
    Json(Language::ALL.into_iter().map(LanguageInfo::from).collect())
}

/// POST /api/v1/translate
pub async fn post_translate(
    Json(request): Json<TranslateRequest>,
) -> ApiResult<Json<TranslateResponse>> {
    let language = match request.language.as_deref() {
        Some(code) => code.parse::<Language>()?,
        None => Language::default(),
    };

    let params: Vec<(&str, &str)> = request
        .params
        .iter()
        .map(|(k, v)| (k.as_str(), v.as_str()))
        .collect();
    let text = translate(language, &request.key, &params);

    Ok(Json(TranslateResponse {
        language,
        key: request.key,
        text,
    }))
}
