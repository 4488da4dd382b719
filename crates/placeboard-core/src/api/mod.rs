//! HTTP client for the placement backend.
//!
//! All endpoints live under `<base>/api/v1`. Responses are decoded into the
//! `placeboard-types` model; failures are categorized as [`ApiError`].

mod error;

use std::time::Duration;

use anyhow::{Context, Result};
use placeboard_types::{Resume, Salary, SeasonList, SeasonSummary};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;
use url::Url;

pub use self::error::{ApiError, ApiErrorKind, ApiResult, classify_reqwest_error};
use crate::config::Config;

const API_PREFIX: [&str; 2] = ["api", "v1"];

/// Connection settings for [`ApiClient`].
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub base_url: String,
    pub api_token: Option<String>,
    pub timeout: Option<Duration>,
}

impl ApiConfig {
    /// Resolves base URL, token, and timeout from config and environment.
    ///
    /// # Errors
    /// Returns an error if the backend URL is invalid.
    pub fn from_config(config: &Config) -> Result<Self> {
        Ok(Self {
            base_url: config.backend_base_url()?,
            api_token: config.effective_api_token(),
            timeout: config.request_timeout(),
        })
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ApplyBody<'a> {
    salary_id: &'a str,
    resume_id: &'a str,
}

/// Backend client. Cheap to clone.
#[derive(Debug, Clone)]
pub struct ApiClient {
    base: Url,
    api_token: Option<String>,
    http: reqwest::Client,
}

impl ApiClient {
    /// # Errors
    /// Returns an error if the base URL cannot carry path segments or the
    /// HTTP client cannot be built.
    pub fn new(config: ApiConfig) -> Result<Self> {
        let base = Url::parse(&config.base_url)
            .with_context(|| format!("Invalid backend base URL: {}", config.base_url))?;
        if base.cannot_be_a_base() {
            anyhow::bail!("Invalid backend base URL: {}", config.base_url);
        }

        let mut builder = reqwest::Client::builder()
            .user_agent(concat!("placeboard/", env!("CARGO_PKG_VERSION")));
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().context("Failed to build HTTP client")?;

        Ok(Self {
            base,
            api_token: config.api_token,
            http,
        })
    }

    /// Convenience constructor from the loaded config.
    ///
    /// # Errors
    /// Returns an error if the config does not resolve to a usable client.
    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(ApiConfig::from_config(config)?)
    }

    pub fn base_url(&self) -> &str {
        self.base.as_str().trim_end_matches('/')
    }

    /// Lists all seasons known to the backend.
    pub async fn list_seasons(&self) -> ApiResult<Vec<SeasonSummary>> {
        let list: SeasonList = self.get_json(&["jaf"], "season list").await?;
        Ok(list.seasons)
    }

    /// Fetches the raw statistics bundle for a season.
    ///
    /// Returned undecoded so shape validation can name the missing dimension;
    /// see [`crate::stats::parse_season_data`].
    pub async fn season_stats(&self, season_id: &str) -> ApiResult<Value> {
        self.get_json(
            &["analytics-dashboard", "stats", season_id],
            "season statistics",
        )
        .await
    }

    /// Fetches one salary record with its job.
    pub async fn salary(&self, salary_id: &str) -> ApiResult<Salary> {
        self.get_json(&["student", "salary", salary_id], "salary record")
            .await
    }

    /// Lists the student's uploaded resumes.
    pub async fn resumes(&self) -> ApiResult<Vec<Resume>> {
        self.get_json(&["student", "resume"], "resume list").await
    }

    /// Downloads a resume file by its backend file path.
    pub async fn download_resume(&self, filepath: &str) -> ApiResult<Vec<u8>> {
        let mut segments = vec!["resumes"];
        segments.extend(filepath.split('/').filter(|s| !s.is_empty()));
        let url = self.endpoint(&segments)?;

        debug!(%url, "GET resume file");
        let response = self.send(self.http.get(url)).await?;
        let bytes = response
            .bytes()
            .await
            .map_err(|e| classify_reqwest_error(&e))?;
        Ok(bytes.to_vec())
    }

    /// Posts an application for `salary_id` with `resume_id`.
    ///
    /// Returns whether the backend acknowledged it: `null`, `false`, `0`,
    /// `""` and an empty body all count as a refusal.
    pub async fn apply(&self, salary_id: &str, resume_id: &str) -> ApiResult<bool> {
        let url = self.endpoint(&["student", "application"])?;
        debug!(%url, salary_id, resume_id, "POST application");

        let request = self.http.post(url).json(&ApplyBody {
            salary_id,
            resume_id,
        });
        let response = self.send(request).await?;
        let body = response
            .text()
            .await
            .map_err(|e| classify_reqwest_error(&e))?;
        Ok(acknowledged(&body))
    }

    fn endpoint(&self, segments: &[&str]) -> ApiResult<Url> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|()| {
                ApiError::new(
                    ApiErrorKind::Request,
                    format!("Backend URL cannot be a base: {}", self.base),
                )
            })?
            .pop_if_empty()
            .extend(API_PREFIX)
            .extend(segments);
        Ok(url)
    }

    async fn get_json<T: DeserializeOwned>(&self, segments: &[&str], what: &str) -> ApiResult<T> {
        let url = self.endpoint(segments)?;
        debug!(%url, "GET {what}");

        let response = self.send(self.http.get(url)).await?;
        let body = response
            .text()
            .await
            .map_err(|e| classify_reqwest_error(&e))?;
        serde_json::from_str(&body).map_err(|e| ApiError::parse(what, &e, &body))
    }

    /// Sends a request and maps non-success statuses to errors.
    async fn send(&self, mut request: reqwest::RequestBuilder) -> ApiResult<reqwest::Response> {
        if let Some(token) = &self.api_token {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .await
            .map_err(|e| classify_reqwest_error(&e))?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        Err(ApiError::http_status(status.as_u16(), &body))
    }
}

/// JavaScript-style truthiness of an acknowledgement body.
fn acknowledged(body: &str) -> bool {
    let body = body.trim();
    if body.is_empty() {
        return false;
    }
    match serde_json::from_str::<Value>(body) {
        Ok(Value::Null) => false,
        Ok(Value::Bool(b)) => b,
        Ok(Value::Number(n)) => n.as_f64().is_some_and(|n| n != 0.0 && !n.is_nan()),
        Ok(Value::String(s)) => !s.is_empty(),
        Ok(Value::Array(_) | Value::Object(_)) | Err(_) => true,
    }
}

#[cfg(test)]
mod tests {
    use placeboard_types::SeasonType;
    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    fn can_bind_localhost() -> bool {
        std::net::TcpListener::bind("127.0.0.1:0").is_ok()
    }

    fn client_for(server: &MockServer, token: Option<&str>) -> ApiClient {
        ApiClient::new(ApiConfig {
            base_url: server.uri(),
            api_token: token.map(str::to_string),
            timeout: Some(Duration::from_secs(5)),
        })
        .unwrap()
    }

    #[test]
    fn test_acknowledged_truthiness() {
        assert!(acknowledged("true"));
        assert!(acknowledged(r#"{"id":"app-1"}"#));
        assert!(acknowledged("1"));
        assert!(acknowledged("\"ok\""));
        assert!(!acknowledged(""));
        assert!(!acknowledged("null"));
        assert!(!acknowledged("false"));
        assert!(!acknowledged("0"));
        assert!(!acknowledged("\"\""));
    }

    #[test]
    fn test_endpoint_keeps_base_path() {
        let client = ApiClient::new(ApiConfig {
            base_url: "http://tpc.example.edu/backend/".to_string(),
            api_token: None,
            timeout: None,
        })
        .unwrap();
        let url = client.endpoint(&["student", "salary", "s 1"]).unwrap();
        assert_eq!(
            url.as_str(),
            "http://tpc.example.edu/backend/api/v1/student/salary/s%201"
        );
    }

    #[tokio::test]
    async fn test_list_seasons_sends_token_and_decodes() {
        if !can_bind_localhost() {
            eprintln!("Skipping: cannot bind localhost TCP port in this environment.");
            return;
        }
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/jaf"))
            .and(header("authorization", "Bearer secret"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "seasons": [
                    {"id": "s1", "type": "INTERN", "year": 2024},
                    {"id": "s2", "type": "Placement", "year": 2024}
                ]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let seasons = client_for(&server, Some("secret"))
            .list_seasons()
            .await
            .unwrap();
        assert_eq!(seasons.len(), 2);
        assert_eq!(seasons[0].season_type, SeasonType::Intern);
        assert_eq!(seasons[1].season_type, SeasonType::Placement);
    }

    #[tokio::test]
    async fn test_unknown_season_type_is_parse_error() {
        if !can_bind_localhost() {
            eprintln!("Skipping: cannot bind localhost TCP port in this environment.");
            return;
        }
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/jaf"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "seasons": [{"id": "s1", "type": "FESTIVAL", "year": 2024}]
            })))
            .mount(&server)
            .await;

        let err = client_for(&server, None).list_seasons().await.unwrap_err();
        assert_eq!(err.kind, ApiErrorKind::Parse);
    }

    #[tokio::test]
    async fn test_http_error_is_categorized() {
        if !can_bind_localhost() {
            eprintln!("Skipping: cannot bind localhost TCP port in this environment.");
            return;
        }
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/student/salary/sal-1"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/v1/analytics-dashboard/stats/s9"))
            .respond_with(
                ResponseTemplate::new(500).set_body_json(json!({"message": "boom"})),
            )
            .mount(&server)
            .await;

        let client = client_for(&server, None);
        let err = client.salary("sal-1").await.unwrap_err();
        assert_eq!(err.kind, ApiErrorKind::Unauthorized);

        let err = client.season_stats("s9").await.unwrap_err();
        assert_eq!(err.kind, ApiErrorKind::HttpStatus);
        assert_eq!(err.message, "HTTP 500: boom");
    }

    #[tokio::test]
    async fn test_connection_refused_is_network_error() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0");
        let Ok(listener) = listener else {
            eprintln!("Skipping: cannot bind localhost TCP port in this environment.");
            return;
        };
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = ApiClient::new(ApiConfig {
            base_url: format!("http://{addr}"),
            api_token: None,
            timeout: Some(Duration::from_secs(5)),
        })
        .unwrap();
        let err = client.resumes().await.unwrap_err();
        assert!(matches!(
            err.kind,
            ApiErrorKind::Network | ApiErrorKind::Timeout
        ));
    }

    #[tokio::test]
    async fn test_apply_posts_body_and_reads_acknowledgement() {
        if !can_bind_localhost() {
            eprintln!("Skipping: cannot bind localhost TCP port in this environment.");
            return;
        }
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/v1/student/application"))
            .and(body_json(json!({"salaryId": "sal-1", "resumeId": "r-2"})))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({"id": "app-9"})))
            .expect(1)
            .mount(&server)
            .await;

        let ok = client_for(&server, None)
            .apply("sal-1", "r-2")
            .await
            .unwrap();
        assert!(ok);
    }

    #[tokio::test]
    async fn test_download_resume_keeps_nested_path() {
        if !can_bind_localhost() {
            eprintln!("Skipping: cannot bind localhost TCP port in this environment.");
            return;
        }
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/resumes/2024/alice.pdf"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(b"%PDF-1.4".to_vec()))
            .expect(1)
            .mount(&server)
            .await;

        let bytes = client_for(&server, None)
            .download_resume("2024/alice.pdf")
            .await
            .unwrap();
        assert_eq!(bytes, b"%PDF-1.4");
    }
}
