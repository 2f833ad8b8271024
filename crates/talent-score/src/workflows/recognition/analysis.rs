use serde::{Deserialize, Serialize};

use super::domain::EmployeeRecord;
use super::scoring::WeightConfiguration;

/// Narrative angle requested from the oracle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnalysisType {
    Risk,
    Impact,
    Recognition,
    Development,
    Diversity,
}

impl AnalysisType {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Risk => "risk",
            Self::Impact => "impact",
            Self::Recognition => "recognition",
            Self::Development => "development",
            Self::Diversity => "diversity",
        }
    }
}

/// Everything the oracle sees: the freshly scored record plus its audit report.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisRequest {
    pub analysis_type: AnalysisType,
    pub employee: EmployeeRecord,
    pub weights: WeightConfiguration,
    pub score_report: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    System,
    User,
    Assistant,
}

/// One turn of an assistant conversation, in the chat-completions wire shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            content: content.into(),
        }
    }
}

/// Outbound hook to a language-model service. Implementations must report failure
/// instead of inventing a narrative.
///
/// Calls block the current thread; async callers run them on the blocking pool.
pub trait AnalysisOracle: Send + Sync {
    fn analyze(&self, request: &AnalysisRequest) -> Result<String, OracleError>;

    /// Assistant reply to a conversation whose last turn is the user's question.
    fn chat(&self, conversation: &[ChatMessage]) -> Result<String, OracleError>;

    /// Cheap round trip proving the model endpoint answers.
    fn check_connection(&self) -> Result<(), OracleError>;
}

impl<T: AnalysisOracle + ?Sized> AnalysisOracle for Box<T> {
    fn analyze(&self, request: &AnalysisRequest) -> Result<String, OracleError> {
        (**self).analyze(request)
    }

    fn chat(&self, conversation: &[ChatMessage]) -> Result<String, OracleError> {
        (**self).chat(conversation)
    }

    fn check_connection(&self) -> Result<(), OracleError> {
        (**self).check_connection()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum OracleError {
    #[error("analysis oracle is not configured")]
    NotConfigured,
    #[error("analysis request failed: {0}")]
    RequestFailed(String),
    #[error("analysis oracle returned an empty response")]
    EmptyResponse,
}

/// Oracle used when no model endpoint is wired in; every call fails with
/// [`OracleError::NotConfigured`].
#[derive(Debug, Default, Clone, Copy)]
pub struct UnconfiguredOracle;

impl AnalysisOracle for UnconfiguredOracle {
    fn analyze(&self, _request: &AnalysisRequest) -> Result<String, OracleError> {
        Err(OracleError::NotConfigured)
    }

    fn chat(&self, _conversation: &[ChatMessage]) -> Result<String, OracleError> {
        Err(OracleError::NotConfigured)
    }

    fn check_connection(&self) -> Result<(), OracleError> {
        Err(OracleError::NotConfigured)
    }
}

/// Connection check result shown by the assistant widget.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OracleStatus {
    pub connected: bool,
    pub error: Option<String>,
}
