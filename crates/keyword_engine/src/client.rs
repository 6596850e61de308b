use bytes::{Bytes, BytesMut};
use futures_util::StreamExt;
use keyword_logging::{kw_debug, kw_warn};
use reqwest::header::CONTENT_TYPE;
use serde::Serialize;
use url::Url;

use crate::types::{ErrorBody, GenerateResponse};
use crate::{DownloadRequest, ExportFormat, FailureKind, GenerateRequest, HealthStatus, ServiceError};

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:5000";

const GENERATE_PATH: &str = "api/generate";
const DOWNLOAD_PATH: &str = "api/download/";
const HEALTH_PATH: &str = "health";

#[derive(Debug, Clone)]
pub struct ClientSettings {
    pub base_url: String,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }
}

#[async_trait::async_trait]
pub trait KeywordService: Send + Sync {
    /// Requests keyword suggestions for a trimmed, non-empty seed.
    async fn generate(&self, keyword: &str) -> Result<Vec<String>, ServiceError>;

    /// Posts the result set to the export endpoint and returns the raw body.
    async fn download(
        &self,
        format: ExportFormat,
        keyword: &str,
        keywords: &[String],
    ) -> Result<Bytes, ServiceError>;

    async fn health(&self) -> Result<HealthStatus, ServiceError>;
}

/// HTTP implementation. No request timeouts are configured; failures surface
/// only through transport errors.
#[derive(Debug, Clone)]
pub struct ReqwestKeywordService {
    base_url: Url,
    client: reqwest::Client,
}

impl ReqwestKeywordService {
    pub fn new(settings: ClientSettings) -> Result<Self, ServiceError> {
        let mut base_url = Url::parse(&settings.base_url)
            .map_err(|err| ServiceError::new(FailureKind::InvalidUrl, err.to_string()))?;
        if base_url.cannot_be_a_base() {
            return Err(ServiceError::new(
                FailureKind::InvalidUrl,
                format!("{} cannot be used as a base url", settings.base_url),
            ));
        }
        // Joining relative paths replaces the last segment unless it ends in '/'.
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let client = reqwest::Client::builder()
            .build()
            .map_err(|err| ServiceError::new(FailureKind::Network, err.to_string()))?;

        Ok(Self { base_url, client })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> Result<Url, ServiceError> {
        self.base_url
            .join(path)
            .map_err(|err| ServiceError::new(FailureKind::InvalidUrl, err.to_string()))
    }

    async fn post_json<T: Serialize + ?Sized>(
        &self,
        url: Url,
        body: &T,
    ) -> Result<reqwest::Response, ServiceError> {
        let payload = serde_json::to_vec(body)
            .map_err(|err| ServiceError::new(FailureKind::Encode, err.to_string()))?;
        kw_debug!("POST {} ({} bytes)", url, payload.len());
        self.client
            .post(url)
            .header(CONTENT_TYPE, "application/json")
            .body(payload)
            .send()
            .await
            .map_err(map_reqwest_error)
    }
}

#[async_trait::async_trait]
impl KeywordService for ReqwestKeywordService {
    async fn generate(&self, keyword: &str) -> Result<Vec<String>, ServiceError> {
        let url = self.endpoint(GENERATE_PATH)?;
        let response = self.post_json(url, &GenerateRequest { keyword }).await?;
        let status = response.status();
        let body = response.bytes().await.map_err(map_reqwest_error)?;
        classify_generate(status.as_u16(), status.is_success(), &body)
    }

    async fn download(
        &self,
        format: ExportFormat,
        keyword: &str,
        keywords: &[String],
    ) -> Result<Bytes, ServiceError> {
        let url = self.endpoint(&format!("{DOWNLOAD_PATH}{}", format.extension()))?;
        let response = self
            .post_json(url, &DownloadRequest { keyword, keywords })
            .await?;

        // The body is the payload whatever the status says.
        let status = response.status();
        if !status.is_success() {
            kw_warn!("Export {} answered with {}; saving body as-is", format, status);
        }

        let mut payload = BytesMut::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(map_reqwest_error)?;
            payload.extend_from_slice(&chunk);
        }
        Ok(payload.freeze())
    }

    async fn health(&self) -> Result<HealthStatus, ServiceError> {
        let url = self.endpoint(HEALTH_PATH)?;
        let response = self.client.get(url).send().await.map_err(map_reqwest_error)?;
        let status = response.status();
        let body = response.bytes().await.map_err(map_reqwest_error)?;
        if !status.is_success() {
            return Err(ServiceError::new(
                FailureKind::Rejected {
                    status: status.as_u16(),
                    reason: None,
                },
                status.to_string(),
            ));
        }
        serde_json::from_slice(&body).map_err(|err| {
            ServiceError::new(
                FailureKind::Rejected {
                    status: status.as_u16(),
                    reason: None,
                },
                err.to_string(),
            )
        })
    }
}

/// Maps a generation response onto a result set or a rejection.
///
/// Only a transport-successful response whose body carries `success: true`
/// and a `keywords` array counts as success.
fn classify_generate(
    status: u16,
    transport_ok: bool,
    body: &[u8],
) -> Result<Vec<String>, ServiceError> {
    let rejected = |reason: Option<String>, message: String| {
        ServiceError::new(FailureKind::Rejected { status, reason }, message)
    };

    let parsed: GenerateResponse = match serde_json::from_slice(body) {
        Ok(parsed) => parsed,
        Err(err) => {
            let reason = serde_json::from_slice::<ErrorBody>(body)
                .ok()
                .and_then(|body| body.error);
            return Err(rejected(reason, format!("malformed response: {err}")));
        }
    };

    match parsed {
        GenerateResponse {
            success: true,
            keywords: Some(keywords),
            ..
        } if transport_ok => Ok(keywords),
        GenerateResponse { error, .. } => {
            let message = error
                .clone()
                .unwrap_or_else(|| format!("generation failed with status {status}"));
            Err(rejected(error, message))
        }
    }
}

fn map_reqwest_error(err: reqwest::Error) -> ServiceError {
    if err.is_builder() {
        return ServiceError::new(FailureKind::InvalidUrl, err.to_string());
    }
    ServiceError::new(FailureKind::Network, err.to_string())
}
