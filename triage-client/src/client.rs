use reqwest::{RequestBuilder, StatusCode};
use serde::{de::DeserializeOwned, Deserialize};
use std::time::Duration;
use thiserror::Error;
use triage_core::{AnalyzedTask, ScoringWeights, TaskRecord};
use url::Url;

const ANALYZE_PATH: &str = "/api/tasks/analyze/";
const SUGGEST_PATH: &str = "/api/tasks/suggest/";

#[derive(Debug, Error)]
pub enum ScoringError {
    #[error("could not reach scoring service: {0}")]
    Network(#[source] reqwest::Error),

    #[error("scoring service returned {status}: {message}")]
    Server { status: StatusCode, message: String },

    #[error("scoring service sent a malformed response: {0}")]
    Malformed(String),

    #[error("{0}")]
    Reported(String),
}

impl ScoringError {
    /// Message for the status line. Errors reported by the service are
    /// shown verbatim, everything else is prefixed with `action`.
    pub fn status_message(&self, action: &str) -> String {
        match self {
            Self::Reported(message) => message.clone(),
            other => format!("{action}: {other}"),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum SuggestResponse {
    Tasks(Vec<AnalyzedTask>),
    Failed { error: String },
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

#[derive(Debug)]
pub struct ScoringClient {
    server: Url,
    http_client: reqwest::Client,
}

impl ScoringClient {
    pub fn new(server: Url, timeout: Duration) -> anyhow::Result<Self> {
        Ok(Self {
            server,
            http_client: reqwest::Client::builder()
                .connect_timeout(Duration::from_secs(3))
                .timeout(timeout)
                .build()?,
        })
    }

    fn url(&self, path: &str, weights: &ScoringWeights) -> Url {
        let mut url = self.server.clone();
        url.set_path(path);

        let pairs = weights.query_pairs();
        if !pairs.is_empty() {
            url.query_pairs_mut().extend_pairs(pairs);
        }

        url
    }

    async fn execute<T>(&self, request: RequestBuilder) -> Result<T, ScoringError>
    where
        T: DeserializeOwned,
    {
        let response = request.send().await.map_err(ScoringError::Network)?;

        let status = response.status();
        let body = response.bytes().await.map_err(ScoringError::Network)?;

        if !status.is_success() {
            let message = match serde_json::from_slice::<ErrorBody>(&body) {
                Ok(ErrorBody { error }) => error,
                Err(_) => String::from_utf8_lossy(&body).trim().to_string(),
            };
            return Err(ScoringError::Server { status, message });
        }

        serde_json::from_slice(&body).map_err(|error| ScoringError::Malformed(error.to_string()))
    }

    #[tracing::instrument(skip_all, err(Debug))]
    pub async fn analyze(
        &self,
        tasks: &[TaskRecord],
        weights: &ScoringWeights,
    ) -> Result<Vec<AnalyzedTask>, ScoringError> {
        let url = self.url(ANALYZE_PATH, weights);
        tracing::debug!("Submitting {} task(s) to {url}", tasks.len());

        let results: Vec<AnalyzedTask> = self
            .execute(self.http_client.post(url).json(tasks))
            .await?;

        tracing::debug!("Received {} analyzed task(s)", results.len());
        Ok(results)
    }

    #[tracing::instrument(skip_all, err(Debug))]
    pub async fn suggest(&self, weights: &ScoringWeights) -> Result<Vec<AnalyzedTask>, ScoringError> {
        let url = self.url(SUGGEST_PATH, weights);
        tracing::debug!("Fetching suggestions from {url}");

        match self.execute(self.http_client.get(url)).await? {
            SuggestResponse::Tasks(tasks) => {
                tracing::debug!("Received {} suggested task(s)", tasks.len());
                Ok(tasks)
            }
            SuggestResponse::Failed { error } => Err(ScoringError::Reported(error)),
        }
    }
}
