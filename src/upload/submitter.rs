use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, info, warn};
use url::Url;

use crate::classify::Probability;
use crate::config::{Config, UPLOAD_FIELD};
use crate::error::WorkflowError;
use crate::upload::SelectedFile;

#[derive(Deserialize)]
struct OddsResponse {
    odds: Option<Value>,
}

/// Remote service that turns an Empire intercept into a success probability.
#[async_trait]
pub trait OddsService: Send + Sync {
    async fn compute_odds(&self, file: &SelectedFile) -> Result<Probability, WorkflowError>;

    /// Whether the service answers at all. Never affects the workflow.
    async fn is_reachable(&self) -> bool;
}

pub struct HttpOddsService {
    client: reqwest::Client,
    endpoint: Url,
    root: Url,
    timeout: Duration,
}

impl HttpOddsService {
    pub fn new(config: &Config) -> Result<Self, WorkflowError> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(WorkflowError::Transport)?;

        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
            root: config.service_root(),
            timeout: config.request_timeout,
        })
    }

    fn map_transport(&self, error: reqwest::Error) -> WorkflowError {
        if error.is_timeout() {
            WorkflowError::Timeout(self.timeout)
        } else {
            WorkflowError::Transport(error)
        }
    }
}

#[async_trait]
impl OddsService for HttpOddsService {
    async fn compute_odds(&self, file: &SelectedFile) -> Result<Probability, WorkflowError> {
        info!(
            "Uploading '{}' ({} bytes) to {}",
            file.name,
            file.size(),
            self.endpoint
        );

        let part = Part::bytes(file.content.clone()).file_name(file.name.clone());
        let form = Form::new().part(UPLOAD_FIELD, part);

        let response = self
            .client
            .post(self.endpoint.clone())
            .multipart(form)
            .send()
            .await
            .map_err(|e| self.map_transport(e))?;

        let status = response.status();
        if !status.is_success() {
            warn!("Odds service answered '{}' with status {}", file.name, status);
            return Err(WorkflowError::Service {
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await.map_err(|e| self.map_transport(e))?;
        let probability = parse_odds(&body)?;
        info!("Odds for '{}': {}", file.name, probability);
        Ok(probability)
    }

    async fn is_reachable(&self) -> bool {
        match self.client.get(self.root.clone()).send().await {
            Ok(response) => {
                debug!("Reachability check {} -> {}", self.root, response.status());
                true
            }
            Err(e) => {
                warn!("Reachability check {} failed: {}", self.root, e);
                false
            }
        }
    }
}

/// Extracts the integer `odds` field from a success body.
pub fn parse_odds(body: &[u8]) -> Result<Probability, WorkflowError> {
    let body: Value = serde_json::from_slice(body)
        .map_err(|e| WorkflowError::MalformedResponse(e.to_string()))?;

    // Derived struct deserialization also accepts arrays positionally.
    if !body.is_object() {
        return Err(WorkflowError::MalformedResponse(format!(
            "expected a JSON object, got {}",
            body
        )));
    }
    let response: OddsResponse = serde_json::from_value(body)
        .map_err(|e| WorkflowError::MalformedResponse(e.to_string()))?;

    let odds = response
        .odds
        .ok_or_else(|| WorkflowError::MalformedResponse("missing `odds` field".to_string()))?;

    let value = odds.as_i64().ok_or_else(|| {
        WorkflowError::MalformedResponse(format!("`odds` is not an integer: {}", odds))
    })?;

    Probability::try_from(value)
}
