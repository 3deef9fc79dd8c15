use std::time::Duration;

use serde::Serialize;
use serde_json::Value;
use toxscore_core::ClientError;

/// Upper bound for the warm-up probe. Scoring calls have no timeout.
const WARMUP_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Serialize)]
struct ScoreTextsRequest<'a> {
    texts: &'a [String],
}

#[derive(Serialize)]
struct YoutubeScoreRequest<'a> {
    url: &'a str,
    max_comments: u32,
}

/// HTTP client for the scoring backend.
#[derive(Debug, Clone)]
pub struct ScoringClient {
    http: reqwest::Client,
    base_url: String,
}

impl ScoringClient {
    pub fn new(api_url: &str) -> Result<Self, String> {
        Self::with_http(api_url, reqwest::Client::new())
    }

    pub fn with_http(api_url: &str, http: reqwest::Client) -> Result<Self, String> {
        let parsed =
            url::Url::parse(api_url).map_err(|e| format!("Invalid API URL '{api_url}': {e}"))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(format!(
                "Invalid API URL '{api_url}': scheme must be http or https"
            ));
        }

        Ok(Self {
            http,
            base_url: api_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// Hit `/health` so a sleeping backend starts loading its model.
    /// Failures are logged and otherwise ignored.
    pub async fn warmup(&self) {
        let req = self
            .http
            .get(self.endpoint("/health"))
            .timeout(WARMUP_TIMEOUT)
            .send();
        match req.await {
            Ok(resp) => tracing::debug!(status = resp.status().as_u16(), "warm-up probe answered"),
            Err(e) => tracing::debug!(error = %e, "warm-up probe failed"),
        }
    }

    /// `GET /health`. A body that is not JSON is returned as a string.
    pub async fn health(&self) -> Result<Value, ClientError> {
        let resp = self
            .http
            .get(self.endpoint("/health"))
            .send()
            .await
            .map_err(connection_error)?;
        let (_, text) = read_success(resp).await?;
        Ok(serde_json::from_str(&text).unwrap_or(Value::String(text)))
    }

    /// `POST /api/score`.
    pub async fn score_texts(&self, texts: &[String]) -> Result<Value, ClientError> {
        tracing::info!(count = texts.len(), "scoring comments");
        self.post_json("/api/score", &ScoreTextsRequest { texts })
            .await
    }

    /// `POST /api/youtube/score`.
    pub async fn score_youtube(&self, url: &str, max_comments: u32) -> Result<Value, ClientError> {
        tracing::info!(%url, max_comments, "scoring video comments");
        self.post_json("/api/youtube/score", &YoutubeScoreRequest { url, max_comments })
            .await
    }

    async fn post_json<B: Serialize>(&self, path: &str, body: &B) -> Result<Value, ClientError> {
        let url = self.endpoint(path);
        tracing::debug!(%url, "POST");
        let resp = self
            .http
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(connection_error)?;
        let (status, text) = read_success(resp).await?;
        tracing::debug!(%url, status, bytes = text.len(), "response received");
        serde_json::from_str(&text).map_err(|e| ClientError::Decode(e.to_string()))
    }
}

fn connection_error(e: reqwest::Error) -> ClientError {
    ClientError::Connection(e.to_string())
}

/// Read the body as text; non-2xx becomes `ClientError::Status` carrying it.
async fn read_success(resp: reqwest::Response) -> Result<(u16, String), ClientError> {
    let status = resp.status().as_u16();
    let text = resp.text().await.map_err(connection_error)?;
    if !(200..300).contains(&status) {
        tracing::warn!(status, "scoring backend returned an error");
        return Err(ClientError::Status { status, body: text });
    }
    Ok((status, text))
}
