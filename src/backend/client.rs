//! Backend REST Client
//!
//! HTTP client for the hosted backend's PostgREST-style API.

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;

use super::error::{BackendError, BackendResult};
use super::models::{ImageType, NewRole, NewUserProfile, PatientImage, Role, UserProfile};
use super::store::{DataStore, ImageStore, Table};

/// REST client for the hosted backend
pub struct RestStore {
    client: Client,
    config: BackendConfig,
}

/// Configuration for the REST client
#[derive(Debug, Clone)]
pub struct BackendConfig {
    /// Project URL (e.g., "https://xyz.supabase.co")
    pub base_url: String,
    /// API key sent as `apikey` and bearer token
    pub api_key: String,
    /// Request timeout in milliseconds
    pub request_timeout_ms: u64,
    /// Maximum attempts for requests that fail to connect
    pub max_retries: u32,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:54321".to_string(),
            api_key: String::new(),
            request_timeout_ms: 5000,
            max_retries: 3,
        }
    }
}

impl RestStore {
    /// Create a new client with the given configuration
    pub fn new(config: BackendConfig) -> BackendResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_millis(config.request_timeout_ms))
            .build()?;

        Ok(Self { client, config })
    }

    /// Get the current configuration
    pub fn config(&self) -> &BackendConfig {
        &self.config
    }

    fn table_url(&self, table: Table) -> String {
        format!(
            "{}/rest/v1/{}",
            self.config.base_url.trim_end_matches('/'),
            table.name()
        )
    }

    fn authorized(&self, builder: RequestBuilder) -> RequestBuilder {
        builder
            .header("apikey", &self.config.api_key)
            .bearer_auth(&self.config.api_key)
    }

    /// Send a request, retrying only when the backend could not be reached
    async fn send_with_retry<F>(&self, build: F) -> BackendResult<Response>
    where
        F: Fn() -> RequestBuilder,
    {
        let attempts = self.config.max_retries.max(1);
        let mut last_error = BackendError::Connection("no attempt made".to_string());

        for attempt in 0..attempts {
            if attempt > 0 {
                // Quadratic backoff: 1s, 4s, 9s...
                let delay = Duration::from_secs((attempt as u64).pow(2));
                tokio::time::sleep(delay).await;
            }

            match self.authorized(build()).send().await {
                Ok(response) => {
                    if response.status().is_success() {
                        return Ok(response);
                    }
                    return Err(query_error(response).await);
                }
                Err(e) => {
                    let err = BackendError::from_transport(e);
                    if !err.is_connection() {
                        return Err(err);
                    }
                    tracing::debug!(attempt, error = %err, "Backend request failed, retrying");
                    last_error = err;
                }
            }
        }

        Err(last_error)
    }

    async fn select<T: DeserializeOwned>(
        &self,
        table: Table,
        filters: &[(&str, String)],
    ) -> BackendResult<Vec<T>> {
        let url = self.table_url(table);
        let response = self
            .send_with_retry(|| {
                self.client
                    .get(&url)
                    .query(&[("select", "*")])
                    .query(filters)
            })
            .await?;

        decode(response).await
    }

    async fn insert<B, T>(&self, table: Table, body: &B) -> BackendResult<Vec<T>>
    where
        B: serde::Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.table_url(table);
        let response = self
            .send_with_retry(|| {
                self.client
                    .post(&url)
                    .header("Prefer", "return=representation")
                    .json(body)
            })
            .await?;

        decode(response).await
    }
}

#[async_trait]
impl DataStore for RestStore {
    async fn count_rows(&self, table: Table) -> BackendResult<u64> {
        let url = self.table_url(table);
        let response = self
            .send_with_retry(|| {
                self.client
                    .get(&url)
                    .query(&[("select", "id"), ("limit", "1")])
                    .header("Prefer", "count=exact")
            })
            .await?;

        let header_total = response
            .headers()
            .get("content-range")
            .and_then(|v| v.to_str().ok())
            .and_then(parse_content_range_total);

        match header_total {
            Some(total) => Ok(total),
            None => {
                let rows: Vec<serde_json::Value> = decode(response).await?;
                Ok(rows.len() as u64)
            }
        }
    }

    async fn list_roles(&self) -> BackendResult<Vec<Role>> {
        self.select(Table::Roles, &[]).await
    }

    async fn find_role_by_name(&self, name: &str) -> BackendResult<Option<Role>> {
        let rows: Vec<Role> = self
            .select(Table::Roles, &[("name", format!("eq.{}", name))])
            .await?;
        Ok(rows.into_iter().next())
    }

    async fn insert_roles(&self, roles: Vec<NewRole>) -> BackendResult<Vec<Role>> {
        if roles.is_empty() {
            return Ok(Vec::new());
        }
        self.insert(Table::Roles, &roles).await
    }

    async fn insert_user_profile(&self, profile: NewUserProfile) -> BackendResult<UserProfile> {
        let rows: Vec<UserProfile> = self.insert(Table::UserProfiles, &profile).await?;
        rows.into_iter()
            .next()
            .ok_or_else(|| BackendError::Decode("insert returned no rows".to_string()))
    }
}

#[async_trait]
impl ImageStore for RestStore {
    async fn list_patient_images(
        &self,
        patient_id: &str,
        image_type: ImageType,
    ) -> BackendResult<Vec<PatientImage>> {
        self.select(
            Table::PatientImages,
            &[
                ("patient_id", format!("eq.{}", patient_id)),
                ("image_type", format!("eq.{}", image_type.as_str())),
                ("order", "created_at.desc".to_string()),
            ],
        )
        .await
    }
}

// ============================================
// Response helpers
// ============================================

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

async fn query_error(response: Response) -> BackendError {
    let status = response.status().as_u16();
    let text = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ErrorBody>(&text)
        .ok()
        .and_then(|b| b.message)
        .unwrap_or(text);

    BackendError::Query { status, message }
}

async fn decode<T: DeserializeOwned>(response: Response) -> BackendResult<T> {
    let bytes = response.bytes().await.map_err(BackendError::from_transport)?;
    Ok(serde_json::from_slice(&bytes)?)
}

/// Total row count from a `Content-Range` header such as `0-0/5` or `*/0`
fn parse_content_range_total(value: &str) -> Option<u64> {
    let (_, total) = value.split_once('/')?;
    total.trim().parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = BackendConfig::default();
        assert_eq!(config.base_url, "http://localhost:54321");
        assert_eq!(config.max_retries, 3);
    }

    #[test]
    fn test_table_url() {
        let store = RestStore::new(BackendConfig {
            base_url: "https://project.example.co/".to_string(),
            ..Default::default()
        })
        .unwrap();

        assert_eq!(
            store.table_url(Table::UserProfiles),
            "https://project.example.co/rest/v1/user_profiles"
        );
    }

    #[test]
    fn test_parse_content_range() {
        assert_eq!(parse_content_range_total("0-0/5"), Some(5));
        assert_eq!(parse_content_range_total("*/0"), Some(0));
        assert_eq!(parse_content_range_total("0-0/*"), None);
        assert_eq!(parse_content_range_total("garbage"), None);
    }

    // ============================================
    // Local PostgREST stand-in
    // ============================================

    use axum::{
        extract::{Query, State},
        http::{header, HeaderMap, StatusCode},
        response::{IntoResponse, Response as AxumResponse},
        routing::get,
        Json, Router,
    };
    use serde_json::json;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    const TEST_KEY: &str = "test-key";

    fn header_value<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
        headers.get(name).and_then(|v| v.to_str().ok())
    }

    fn rejected(headers: &HeaderMap) -> Option<AxumResponse> {
        let bearer = format!("Bearer {}", TEST_KEY);
        if header_value(headers, "apikey") == Some(TEST_KEY)
            && header_value(headers, "authorization") == Some(bearer.as_str())
        {
            return None;
        }
        Some((StatusCode::UNAUTHORIZED, Json(json!({ "message": "Invalid API key" }))).into_response())
    }

    async fn get_roles(
        headers: HeaderMap,
        Query(params): Query<HashMap<String, String>>,
    ) -> AxumResponse {
        if let Some(response) = rejected(&headers) {
            return response;
        }
        if header_value(&headers, "prefer") == Some("count=exact") {
            return ([(header::CONTENT_RANGE, "0-0/5")], Json(json!([{ "id": "R1" }])))
                .into_response();
        }
        if params.get("select").map(String::as_str) != Some("*") {
            return (StatusCode::BAD_REQUEST, "missing select").into_response();
        }

        let rows = match params.get("name").map(String::as_str) {
            Some("eq.Patient") => json!([
                { "id": "R1", "name": "Patient", "permissions": ["view_own_profile"] }
            ]),
            Some(_) => json!([]),
            None => json!([
                { "id": "R1", "name": "Patient", "permissions": ["view_own_profile"] },
                { "id": "R2", "name": "Nurse", "permissions": ["view_patients"] }
            ]),
        };
        Json(rows).into_response()
    }

    async fn post_roles(headers: HeaderMap, Json(rows): Json<Vec<NewRole>>) -> AxumResponse {
        if let Some(response) = rejected(&headers) {
            return response;
        }
        if header_value(&headers, "prefer") != Some("return=representation") {
            return StatusCode::CREATED.into_response();
        }

        let created: Vec<Role> = rows
            .into_iter()
            .enumerate()
            .map(|(i, r)| Role {
                id: format!("N{}", i + 1),
                name: r.name,
                permissions: r.permissions,
            })
            .collect();
        (StatusCode::CREATED, Json(created)).into_response()
    }

    async fn post_profile(headers: HeaderMap) -> AxumResponse {
        if let Some(response) = rejected(&headers) {
            return response;
        }
        (
            StatusCode::CONFLICT,
            Json(json!({
                "code": "23505",
                "message": "duplicate key value violates unique constraint \"user_profiles_pkey\""
            })),
        )
            .into_response()
    }

    async fn get_images(
        State(hits): State<Arc<AtomicUsize>>,
        Query(params): Query<HashMap<String, String>>,
    ) -> AxumResponse {
        hits.fetch_add(1, Ordering::SeqCst);
        let expected = [
            ("patient_id", "eq.p1"),
            ("image_type", "eq.progress"),
            ("order", "created_at.desc"),
        ];
        if expected
            .iter()
            .any(|(k, v)| params.get(*k).map(String::as_str) != Some(*v))
        {
            return (StatusCode::BAD_REQUEST, "unexpected filters").into_response();
        }
        (StatusCode::SERVICE_UNAVAILABLE, "upstream down").into_response()
    }

    /// Serve the stand-in on an ephemeral port; returns its URL and the
    /// image endpoint's hit counter
    async fn spawn_backend() -> (String, Arc<AtomicUsize>) {
        let hits = Arc::new(AtomicUsize::new(0));
        let app = Router::new()
            .route("/rest/v1/roles", get(get_roles).post(post_roles))
            .route("/rest/v1/user_profiles", axum::routing::post(post_profile))
            .route("/rest/v1/patient_images", get(get_images))
            .with_state(hits.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        (format!("http://{}", addr), hits)
    }

    fn store_for(base_url: &str, api_key: &str) -> RestStore {
        RestStore::new(BackendConfig {
            base_url: base_url.to_string(),
            api_key: api_key.to_string(),
            request_timeout_ms: 2000,
            max_retries: 3,
        })
        .unwrap()
    }

    #[tokio::test]
    async fn test_reads_send_key_and_filters() {
        let (url, _) = spawn_backend().await;
        let store = store_for(&url, TEST_KEY);

        assert_eq!(store.count_rows(Table::Roles).await.unwrap(), 5);

        let roles = store.list_roles().await.unwrap();
        assert_eq!(roles.len(), 2);
        assert_eq!(roles[1].name, "Nurse");

        let patient = store.find_role_by_name("Patient").await.unwrap().unwrap();
        assert_eq!(patient.id, "R1");
        assert!(store.find_role_by_name("Sales").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_wrong_key_is_rejected() {
        let (url, _) = spawn_backend().await;
        let store = store_for(&url, "wrong-key");

        let err = store.count_rows(Table::Roles).await.unwrap_err();
        match err {
            BackendError::Query { status, message } => {
                assert_eq!(status, 401);
                assert_eq!(message, "Invalid API key");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_insert_returns_created_rows() {
        let (url, _) = spawn_backend().await;
        let store = store_for(&url, TEST_KEY);

        let created = store
            .insert_roles(vec![
                NewRole::new("Doctor", &["view_patients"]),
                NewRole::new("Admin", &["manage_users"]),
            ])
            .await
            .unwrap();

        assert_eq!(created.len(), 2);
        assert_eq!(created[0].id, "N1");
        assert_eq!(created[1].name, "Admin");
        assert_eq!(created[1].permissions, vec!["manage_users".to_string()]);

        assert!(store.insert_roles(Vec::new()).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_conflict_surfaces_backend_message() {
        let (url, _) = spawn_backend().await;
        let store = store_for(&url, TEST_KEY);

        let err = store
            .insert_user_profile(NewUserProfile {
                id: "u1".to_string(),
                email: "a@example.com".to_string(),
                role_id: "R1".to_string(),
                full_name: "a@example.com".to_string(),
                username: "a_at_example_com".to_string(),
                preferred_language: crate::locale::Language::En,
            })
            .await
            .unwrap_err();

        match err {
            BackendError::Query { status, message } => {
                assert_eq!(status, 409);
                assert!(message.starts_with("duplicate key value"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_http_error_is_not_retried() {
        let (url, hits) = spawn_backend().await;
        let store = store_for(&url, TEST_KEY);

        let err = store
            .list_patient_images("p1", ImageType::Progress)
            .await
            .unwrap_err();

        assert!(matches!(err, BackendError::Query { status: 503, .. }));
        assert!(!err.is_connection());
        assert_eq!(err.to_string(), "Query failed (503): upstream down");
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_unreachable_backend_is_connection_error() {
        // Port 9 (discard) on localhost is not expected to accept HTTP
        let store = RestStore::new(BackendConfig {
            base_url: "http://127.0.0.1:9".to_string(),
            api_key: "key".to_string(),
            request_timeout_ms: 500,
            max_retries: 1,
        })
        .unwrap();

        let err = store.count_rows(Table::Roles).await.unwrap_err();
        assert!(err.is_connection());
    }
}
