use chrono::Utc;
use std::sync::Arc;
use tracing::{info, warn};

use super::alerts::{Alert, AlertDraft, AlertFeed, NewAlert};
use super::analysis::{
    AnalysisOracle, AnalysisRequest, AnalysisType, ChatMessage, OracleError, OracleStatus,
};
use super::analytics::{
    budget_analysis, dashboard_metrics, promotion_candidates, BudgetAnalysis, CostCenterBudgets,
    DashboardMetrics, PromotionCandidate,
};
use super::domain::{EmployeeId, EmployeeRecord};
use super::repository::{AnalysisRecord, RepositoryError, RosterRepository, WeightProfile};
use super::scoring::{
    compute_breakdown, generate_score_report, recalculate_all_scores, update_employee_score,
    ScoreBreakdown, WeightConfiguration, WeightValidationError,
};

/// Service composing the roster repository, the score engine and the analysis oracle.
pub struct RecognitionService<R, O> {
    repository: Arc<R>,
    oracle: Arc<O>,
    budgets: Arc<CostCenterBudgets>,
}

impl<R, O> RecognitionService<R, O>
where
    R: RosterRepository + 'static,
    O: AnalysisOracle + 'static,
{
    pub fn new(repository: Arc<R>, oracle: Arc<O>) -> Self {
        Self::with_budgets(repository, oracle, CostCenterBudgets::default())
    }

    pub fn with_budgets(repository: Arc<R>, oracle: Arc<O>, budgets: CostCenterBudgets) -> Self {
        Self {
            repository,
            oracle,
            budgets: Arc::new(budgets),
        }
    }

    /// Insert freshly imported records, returning how many were stored.
    pub fn import(&self, records: Vec<EmployeeRecord>) -> Result<usize, RecognitionServiceError> {
        let mut imported = 0;
        for record in records {
            self.repository.insert(record)?;
            imported += 1;
        }
        info!(imported, "roster records stored");
        Ok(imported)
    }

    /// Whole roster rescored with the active weights, best score first.
    pub fn employees(&self) -> Result<Vec<EmployeeRecord>, RecognitionServiceError> {
        let weights = self.weights()?;
        let mut employees = recalculate_all_scores(self.repository.list()?, &weights);
        employees.sort_by(|left, right| right.score.total_cmp(&left.score));
        Ok(employees)
    }

    pub fn employee(&self, id: &EmployeeId) -> Result<EmployeeRecord, RecognitionServiceError> {
        let weights = self.weights()?;
        let record = self.fetch(id)?;
        Ok(update_employee_score(record, &weights))
    }

    /// Breakdown with the active weights, or with ad-hoc weights for what-if scoring.
    /// Ad-hoc weights only need to be finite and non-negative.
    pub fn breakdown(
        &self,
        id: &EmployeeId,
        weights: Option<WeightConfiguration>,
    ) -> Result<ScoreBreakdown, RecognitionServiceError> {
        let weights = match weights {
            Some(candidate) => {
                candidate.validate_components()?;
                candidate
            }
            None => self.weights()?,
        };
        let record = self.fetch(id)?;
        Ok(compute_breakdown(&record, &weights))
    }

    pub fn report(&self, id: &EmployeeId) -> Result<String, RecognitionServiceError> {
        let weights = self.weights()?;
        let record = update_employee_score(self.fetch(id)?, &weights);
        Ok(generate_score_report(&record, &weights))
    }

    /// Rescore and persist every record; returns how many were updated.
    pub fn recalculate_all(&self) -> Result<usize, RecognitionServiceError> {
        let weights = self.weights()?;
        let employees = recalculate_all_scores(self.repository.list()?, &weights);
        let count = employees.len();

        for employee in employees {
            self.repository.update(employee)?;
        }

        info!(count, "scores recalculated");
        Ok(count)
    }

    /// Stored default weights, or the built-in defaults when none were saved.
    pub fn weights(&self) -> Result<WeightConfiguration, RecognitionServiceError> {
        Ok(self
            .repository
            .default_weights()?
            .map(|profile| profile.weights)
            .unwrap_or_default())
    }

    pub fn save_weights(
        &self,
        name: impl Into<String>,
        weights: WeightConfiguration,
        is_default: bool,
    ) -> Result<WeightProfile, RecognitionServiceError> {
        weights.validate()?;

        let profile = self.repository.save_weights(WeightProfile {
            name: name.into(),
            weights,
            is_default,
        })?;

        info!(name = %profile.name, is_default, "weight profile saved");
        Ok(profile)
    }

    /// Every saved profile, most recently saved first.
    pub fn weight_profiles(&self) -> Result<Vec<WeightProfile>, RecognitionServiceError> {
        Ok(self.repository.weight_profiles()?)
    }

    /// Ask the oracle for a narrative and keep it in the employee's history.
    pub fn analyze(
        &self,
        id: &EmployeeId,
        analysis_type: AnalysisType,
    ) -> Result<AnalysisRecord, RecognitionServiceError> {
        let weights = self.weights()?;
        let employee = update_employee_score(self.fetch(id)?, &weights);
        let request = AnalysisRequest {
            analysis_type,
            score_report: generate_score_report(&employee, &weights),
            employee,
            weights,
        };

        let content = match self.oracle.analyze(&request) {
            Ok(content) if content.trim().is_empty() => Err(OracleError::EmptyResponse),
            other => other,
        }
        .map_err(|error| {
            warn!(employee_id = %id, analysis_type = analysis_type.label(), %error, "analysis failed");
            error
        })?;

        let record = AnalysisRecord {
            employee_id: id.clone(),
            analysis_type,
            content,
            weights_used: weights,
            score_at_time: request.employee.score,
            created_at: Utc::now(),
        };
        self.repository.save_analysis(record.clone())?;

        info!(employee_id = %id, analysis_type = analysis_type.label(), "analysis stored");
        Ok(record)
    }

    pub fn analysis_history(
        &self,
        id: &EmployeeId,
    ) -> Result<Vec<AnalysisRecord>, RecognitionServiceError> {
        self.fetch(id)?;
        Ok(self.repository.analysis_history(id)?)
    }

    /// Assistant reply to `message`, given the earlier turns of the conversation.
    pub fn chat(
        &self,
        message: &str,
        history: Vec<ChatMessage>,
    ) -> Result<String, RecognitionServiceError> {
        if message.trim().is_empty() {
            return Err(RecognitionServiceError::InvalidRequest(
                "chat message must not be blank",
            ));
        }

        let mut conversation = history;
        conversation.push(ChatMessage::user(message.trim()));

        match self.oracle.chat(&conversation) {
            Ok(reply) if reply.trim().is_empty() => Err(OracleError::EmptyResponse.into()),
            Ok(reply) => Ok(reply),
            Err(error) => {
                warn!(turns = conversation.len(), %error, "chat failed");
                Err(error.into())
            }
        }
    }

    pub fn oracle_status(&self) -> OracleStatus {
        match self.oracle.check_connection() {
            Ok(()) => OracleStatus {
                connected: true,
                error: None,
            },
            Err(error) => OracleStatus {
                connected: false,
                error: Some(error.to_string()),
            },
        }
    }

    /// Store an alert. A referenced employee must exist and lends its name and, when the
    /// alert names none, its department.
    pub fn create_alert(&self, alert: NewAlert) -> Result<Alert, RecognitionServiceError> {
        if alert.title.trim().is_empty() {
            return Err(RecognitionServiceError::InvalidRequest(
                "alert title must not be blank",
            ));
        }

        let employee = match &alert.employee_id {
            Some(id) => Some(self.fetch(id)?),
            None => None,
        };
        let department = alert
            .department
            .filter(|department| !department.trim().is_empty())
            .or_else(|| {
                employee
                    .as_ref()
                    .map(|employee| employee.department.clone())
                    .filter(|department| !department.trim().is_empty())
            });

        let stored = self.repository.create_alert(AlertDraft {
            alert_type: alert.alert_type,
            severity: alert.severity,
            title: alert.title,
            message: alert.message,
            employee_id: alert.employee_id,
            employee_name: employee.map(|employee| employee.name),
            department,
            action_required: alert.action_required,
            created_at: Utc::now(),
        })?;

        info!(alert_id = stored.id, severity = ?stored.severity, "alert created");
        Ok(stored)
    }

    pub fn alerts(&self, unread_only: bool) -> Result<AlertFeed, RecognitionServiceError> {
        Ok(AlertFeed::new(self.repository.alerts()?, unread_only))
    }

    pub fn mark_alert_read(&self, id: u64) -> Result<Alert, RecognitionServiceError> {
        let alert = self.repository.mark_alert_read(id, Utc::now())?;
        info!(alert_id = id, "alert marked as read");
        Ok(alert)
    }

    pub fn dashboard(&self) -> Result<DashboardMetrics, RecognitionServiceError> {
        Ok(dashboard_metrics(&self.employees()?))
    }

    pub fn promotions(&self) -> Result<Vec<PromotionCandidate>, RecognitionServiceError> {
        Ok(promotion_candidates(&self.employees()?))
    }

    pub fn budget(&self) -> Result<BudgetAnalysis, RecognitionServiceError> {
        Ok(budget_analysis(&self.employees()?, &self.budgets))
    }

    fn fetch(&self, id: &EmployeeId) -> Result<EmployeeRecord, RecognitionServiceError> {
        let record = self
            .repository
            .fetch(id)?
            .ok_or(RepositoryError::NotFound)?;
        Ok(record)
    }
}

/// Error raised by the recognition service.
#[derive(Debug, thiserror::Error)]
pub enum RecognitionServiceError {
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    #[error(transparent)]
    Weights(#[from] WeightValidationError),
    #[error(transparent)]
    Oracle(#[from] OracleError),
    #[error("invalid request: {0}")]
    InvalidRequest(&'static str),
}
