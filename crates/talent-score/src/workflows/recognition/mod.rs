//! Employee recognition scoring: the weighted score engine, roster import, the
//! repository-backed service with its HTTP router, roster-wide analytics, HR alerts
//! and the chat-completions oracle.

pub mod alerts;
pub mod analysis;
pub mod analytics;
pub mod completions;
pub mod domain;
pub mod repository;
pub mod roster;
pub mod router;
pub mod scoring;
pub mod service;
mod text;

#[cfg(test)]
mod tests;

pub use alerts::{Alert, AlertDraft, AlertFeed, AlertSeverity, AlertType, NewAlert};
pub use analysis::{
    AnalysisOracle, AnalysisRequest, AnalysisType, ChatMessage, ChatRole, OracleError,
    OracleStatus, UnconfiguredOracle,
};
pub use completions::{ChatCompletionsOracle, CompletionTransport, ReqwestTransport};
pub use domain::{EmployeeId, EmployeeRecord, RiskLevel};
pub use repository::{AnalysisRecord, RepositoryError, RosterRepository, WeightProfile};
pub use roster::{RosterImportError, RosterImporter};
pub use router::recognition_router;
pub use scoring::{
    compute_breakdown, generate_score_report, recalculate_all_scores, update_employee_score,
    FactorScore, ScoreBreakdown, ScoreFactor, WeightConfiguration, WeightValidationError,
    MAX_SCORE,
};
pub use service::{RecognitionService, RecognitionServiceError};
