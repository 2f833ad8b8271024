//! Chat-completions client backing [`AnalysisOracle`] with a hosted model deployment.
//!
//! The HTTP leg sits behind [`CompletionTransport`]; [`ReqwestTransport`] is the
//! production implementation and drives requests on the surrounding tokio runtime.

use serde::{Deserialize, Serialize};
use std::time::Duration;
use tokio::runtime::Handle;
use tracing::{debug, warn};

use super::analysis::{AnalysisOracle, AnalysisRequest, ChatMessage, OracleError};
use crate::config::LlmConfig;

const ANALYSIS_SYSTEM_PROMPT: &str = "You are a senior talent analyst. Base every \
conclusion only on the employee data and score report provided. Answer in Brazilian \
Portuguese with short HTML paragraphs and lists.";

const CHAT_SYSTEM_PROMPT: &str = "You are the assistant of a talent recognition \
platform. Help HR staff interpret recognition scores, risk factors, retention and \
development plans. Be practical and concise. Answer in Brazilian Portuguese.";

const CONNECTION_PROBE: &str = "Connection test: reply only with OK.";

/// Body posted to the deployment's `chat/completions` endpoint.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompletionRequest {
    pub messages: Vec<ChatMessage>,
    pub max_tokens: u32,
    pub temperature: f64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    pub status: u16,
    pub body: String,
}

impl TransportResponse {
    fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

pub trait CompletionTransport: Send + Sync {
    fn post(
        &self,
        url: &str,
        api_key: &str,
        request: &CompletionRequest,
    ) -> Result<TransportResponse, OracleError>;
}

pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new(timeout: Duration) -> Result<Self, OracleError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|error| OracleError::RequestFailed(error.to_string()))?;
        Ok(Self { client })
    }

    async fn send(
        &self,
        url: &str,
        api_key: &str,
        request: &CompletionRequest,
    ) -> Result<TransportResponse, reqwest::Error> {
        let response = self
            .client
            .post(url)
            .header("api-key", api_key)
            .json(request)
            .send()
            .await?;
        let status = response.status().as_u16();
        let body = response.text().await?;
        Ok(TransportResponse { status, body })
    }
}

impl CompletionTransport for ReqwestTransport {
    fn post(
        &self,
        url: &str,
        api_key: &str,
        request: &CompletionRequest,
    ) -> Result<TransportResponse, OracleError> {
        // Must run on a blocking-pool thread: Handle::block_on panics on a runtime worker.
        let handle = Handle::try_current().map_err(|_| {
            OracleError::RequestFailed("no async runtime available".to_string())
        })?;
        handle
            .block_on(self.send(url, api_key, request))
            .map_err(|error| OracleError::RequestFailed(error.to_string()))
    }
}

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    #[serde(default)]
    choices: Vec<CompletionChoice>,
}

#[derive(Debug, Deserialize)]
struct CompletionChoice {
    message: CompletionMessage,
}

#[derive(Debug, Deserialize)]
struct CompletionMessage {
    #[serde(default)]
    content: Option<String>,
}

/// Oracle talking to a chat-completions deployment.
pub struct ChatCompletionsOracle<T = ReqwestTransport> {
    url: String,
    api_key: String,
    transport: T,
}

impl ChatCompletionsOracle<ReqwestTransport> {
    pub fn from_config(config: &LlmConfig) -> Result<Self, OracleError> {
        let transport = ReqwestTransport::new(Duration::from_secs(config.timeout_secs))?;
        Ok(Self::with_transport(config, transport))
    }
}

impl<T: CompletionTransport> ChatCompletionsOracle<T> {
    pub fn with_transport(config: &LlmConfig, transport: T) -> Self {
        Self {
            url: completions_url(config),
            api_key: config.api_key.clone(),
            transport,
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    fn post(&self, request: &CompletionRequest) -> Result<TransportResponse, OracleError> {
        debug!(messages = request.messages.len(), "posting chat completion");
        let response = self.transport.post(&self.url, &self.api_key, request)?;
        if !response.is_success() {
            warn!(status = response.status, body = %response.body, "chat completion rejected");
            return Err(OracleError::RequestFailed(format!(
                "model endpoint returned status {}",
                response.status
            )));
        }
        Ok(response)
    }

    fn complete(&self, request: CompletionRequest) -> Result<String, OracleError> {
        let response = self.post(&request)?;
        let parsed: CompletionResponse = serde_json::from_str(&response.body).map_err(|error| {
            OracleError::RequestFailed(format!("malformed completion payload: {error}"))
        })?;

        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .filter(|content| !content.trim().is_empty())
            .ok_or(OracleError::EmptyResponse)
    }
}

impl<T: CompletionTransport> AnalysisOracle for ChatCompletionsOracle<T> {
    fn analyze(&self, request: &AnalysisRequest) -> Result<String, OracleError> {
        let employee = &request.employee;
        let prompt = format!(
            "Requested analysis: {}\nEmployee: {} ({}), {} in {}\n\n{}",
            request.analysis_type.label(),
            employee.name,
            employee.id,
            employee.job_title,
            employee.department,
            request.score_report
        );

        self.complete(CompletionRequest {
            messages: vec![
                ChatMessage::system(ANALYSIS_SYSTEM_PROMPT),
                ChatMessage::user(prompt),
            ],
            max_tokens: 1200,
            temperature: 0.3,
        })
    }

    fn chat(&self, conversation: &[ChatMessage]) -> Result<String, OracleError> {
        let mut messages = Vec::with_capacity(conversation.len() + 1);
        messages.push(ChatMessage::system(CHAT_SYSTEM_PROMPT));
        messages.extend_from_slice(conversation);

        self.complete(CompletionRequest {
            messages,
            max_tokens: 800,
            temperature: 0.7,
        })
    }

    fn check_connection(&self) -> Result<(), OracleError> {
        self.post(&CompletionRequest {
            messages: vec![ChatMessage::user(CONNECTION_PROBE)],
            max_tokens: 10,
            temperature: 0.0,
        })
        .map(|_| ())
    }
}

fn completions_url(config: &LlmConfig) -> String {
    format!(
        "{}/openai/deployments/{}/chat/completions?api-version={}",
        config.endpoint.trim_end_matches('/'),
        config.deployment,
        config.api_version
    )
}
