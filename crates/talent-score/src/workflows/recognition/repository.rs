use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::alerts::{Alert, AlertDraft};
use super::analysis::AnalysisType;
use super::domain::{EmployeeId, EmployeeRecord};
use super::scoring::WeightConfiguration;

/// Named weight profile as persisted by the settings screen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightProfile {
    pub name: String,
    pub weights: WeightConfiguration,
    pub is_default: bool,
}

/// Stored narrative produced by the analysis oracle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisRecord {
    pub employee_id: EmployeeId,
    pub analysis_type: AnalysisType,
    pub content: String,
    pub weights_used: WeightConfiguration,
    pub score_at_time: f64,
    pub created_at: DateTime<Utc>,
}

/// Storage abstraction so the service module can be exercised in isolation.
pub trait RosterRepository: Send + Sync {
    fn list(&self) -> Result<Vec<EmployeeRecord>, RepositoryError>;
    fn fetch(&self, id: &EmployeeId) -> Result<Option<EmployeeRecord>, RepositoryError>;
    fn insert(&self, record: EmployeeRecord) -> Result<EmployeeRecord, RepositoryError>;
    fn update(&self, record: EmployeeRecord) -> Result<(), RepositoryError>;

    /// Weight profile flagged as default, if any was saved.
    fn default_weights(&self) -> Result<Option<WeightProfile>, RepositoryError>;
    fn save_weights(&self, profile: WeightProfile) -> Result<WeightProfile, RepositoryError>;
    /// Every saved profile, most recently saved first.
    fn weight_profiles(&self) -> Result<Vec<WeightProfile>, RepositoryError>;

    fn save_analysis(&self, record: AnalysisRecord) -> Result<(), RepositoryError>;
    fn analysis_history(&self, id: &EmployeeId) -> Result<Vec<AnalysisRecord>, RepositoryError>;

    /// Stores the draft under a fresh id, unread.
    fn create_alert(&self, draft: AlertDraft) -> Result<Alert, RepositoryError>;
    /// Every alert, newest first.
    fn alerts(&self) -> Result<Vec<Alert>, RepositoryError>;
    fn mark_alert_read(&self, id: u64, at: DateTime<Utc>) -> Result<Alert, RepositoryError>;
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record already exists")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}
