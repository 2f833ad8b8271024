use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use axum::response::Response;
use chrono::{DateTime, Utc};
use serde_json::Value;

use crate::workflows::recognition::alerts::{Alert, AlertDraft};
use crate::workflows::recognition::analysis::{
    AnalysisOracle, AnalysisRequest, ChatMessage, OracleError, UnconfiguredOracle,
};
use crate::workflows::recognition::domain::{EmployeeId, EmployeeRecord};
use crate::workflows::recognition::repository::{
    AnalysisRecord, RepositoryError, RosterRepository, WeightProfile,
};
use crate::workflows::recognition::{recognition_router, RecognitionService};

/// "Excepcional", six years with the company, four in role, high risk and impact, clean
/// attendance.
pub(super) fn scenario_employee() -> EmployeeRecord {
    EmployeeRecord {
        evaluation_result: "Excepcional".to_string(),
        tenure_years: 6.0,
        role_years: 4.0,
        loss_risk: "Alto".to_string(),
        loss_impact: "Alto".to_string(),
        warning_count: 0,
        unexcused_absences: 0,
        absence_rate: 0.01,
        ..EmployeeRecord::new("E-100", "Ana Souza")
    }
}

/// Three employees with clearly separated profiles: a star, an average performer and a
/// struggling one.
pub(super) fn sample_roster() -> Vec<EmployeeRecord> {
    let star = EmployeeRecord {
        job_title: "Analista Pleno".to_string(),
        department: "Tecnologia".to_string(),
        cost_center: "TI-001".to_string(),
        salary: 9500.0,
        schooling: "Pós-graduação".to_string(),
        certifications: "AWS Solutions Architect".to_string(),
        spoken_languages: "Português, Inglês".to_string(),
        ..scenario_employee()
    };

    let steady = EmployeeRecord {
        job_title: "Assistente Administrativo".to_string(),
        department: "Administrativo".to_string(),
        cost_center: "CC105".to_string(),
        salary: 4200.0,
        evaluation_result: "Bom".to_string(),
        tenure_years: 3.2,
        role_years: 2.1,
        years_since_promotion: 2.1,
        loss_risk: "Médio".to_string(),
        loss_impact: "Médio".to_string(),
        absence_rate: 0.03,
        schooling: "Superior completo".to_string(),
        ..EmployeeRecord::new("E-200", "Bruno Lima")
    };

    let struggling = EmployeeRecord {
        job_title: "Auxiliar de Vendas".to_string(),
        department: String::new(),
        cost_center: String::new(),
        salary: 2800.0,
        evaluation_result: "Não atende".to_string(),
        tenure_years: 0.8,
        role_years: 0.8,
        years_since_promotion: 4.0,
        loss_risk: "Baixo".to_string(),
        loss_impact: "Baixo".to_string(),
        warning_count: 2,
        unexcused_absences: 3,
        absence_rate: 0.12,
        anomalous_absence: true,
        ..EmployeeRecord::new("E-300", "Carla Dias")
    };

    vec![star, steady, struggling]
}

pub(super) fn build_service() -> (
    RecognitionService<MemoryRepository, StubOracle>,
    Arc<MemoryRepository>,
    Arc<StubOracle>,
) {
    let repository = Arc::new(MemoryRepository::seeded(sample_roster()));
    let oracle = Arc::new(StubOracle::answering("Strong retention case."));
    let service = RecognitionService::new(repository.clone(), oracle.clone());
    (service, repository, oracle)
}

pub(super) fn unconfigured_service() -> RecognitionService<MemoryRepository, UnconfiguredOracle> {
    RecognitionService::new(
        Arc::new(MemoryRepository::seeded(sample_roster())),
        Arc::new(UnconfiguredOracle),
    )
}

#[derive(Default)]
pub(super) struct MemoryRepository {
    pub(super) records: Mutex<BTreeMap<EmployeeId, EmployeeRecord>>,
    pub(super) profiles: Mutex<Vec<WeightProfile>>,
    pub(super) analyses: Mutex<Vec<AnalysisRecord>>,
    pub(super) alerts: Mutex<Vec<Alert>>,
}

impl MemoryRepository {
    pub(super) fn seeded(records: Vec<EmployeeRecord>) -> Self {
        let repository = Self::default();
        {
            let mut guard = repository.records.lock().expect("repository mutex poisoned");
            for record in records {
                guard.insert(record.id.clone(), record);
            }
        }
        repository
    }

    pub(super) fn stored(&self, id: &str) -> EmployeeRecord {
        self.records
            .lock()
            .expect("repository mutex poisoned")
            .get(&EmployeeId(id.to_string()))
            .cloned()
            .expect("record present")
    }
}

impl RosterRepository for MemoryRepository {
    fn list(&self) -> Result<Vec<EmployeeRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.values().cloned().collect())
    }

    fn fetch(&self, id: &EmployeeId) -> Result<Option<EmployeeRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn insert(&self, record: EmployeeRecord) -> Result<EmployeeRecord, RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        if guard.contains_key(&record.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(record.id.clone(), record.clone());
        Ok(record)
    }

    fn update(&self, record: EmployeeRecord) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        guard.insert(record.id.clone(), record);
        Ok(())
    }

    fn default_weights(&self) -> Result<Option<WeightProfile>, RepositoryError> {
        let guard = self.profiles.lock().expect("profile mutex poisoned");
        Ok(guard.iter().rev().find(|profile| profile.is_default).cloned())
    }

    fn save_weights(&self, profile: WeightProfile) -> Result<WeightProfile, RepositoryError> {
        self.profiles
            .lock()
            .expect("profile mutex poisoned")
            .push(profile.clone());
        Ok(profile)
    }

    fn weight_profiles(&self) -> Result<Vec<WeightProfile>, RepositoryError> {
        let guard = self.profiles.lock().expect("profile mutex poisoned");
        Ok(guard.iter().rev().cloned().collect())
    }

    fn save_analysis(&self, record: AnalysisRecord) -> Result<(), RepositoryError> {
        self.analyses
            .lock()
            .expect("analysis mutex poisoned")
            .push(record);
        Ok(())
    }

    fn analysis_history(&self, id: &EmployeeId) -> Result<Vec<AnalysisRecord>, RepositoryError> {
        let guard = self.analyses.lock().expect("analysis mutex poisoned");
        Ok(guard
            .iter()
            .filter(|record| &record.employee_id == id)
            .cloned()
            .collect())
    }

    fn create_alert(&self, draft: AlertDraft) -> Result<Alert, RepositoryError> {
        let mut guard = self.alerts.lock().expect("alert mutex poisoned");
        let alert = Alert::from_draft(guard.len() as u64 + 1, draft);
        guard.push(alert.clone());
        Ok(alert)
    }

    fn alerts(&self) -> Result<Vec<Alert>, RepositoryError> {
        let guard = self.alerts.lock().expect("alert mutex poisoned");
        Ok(guard.iter().rev().cloned().collect())
    }

    fn mark_alert_read(&self, id: u64, at: DateTime<Utc>) -> Result<Alert, RepositoryError> {
        let mut guard = self.alerts.lock().expect("alert mutex poisoned");
        let alert = guard
            .iter_mut()
            .find(|alert| alert.id == id)
            .ok_or(RepositoryError::NotFound)?;
        alert.mark_read(at);
        Ok(alert.clone())
    }
}

pub(super) struct UnavailableRepository;

impl RosterRepository for UnavailableRepository {
    fn list(&self) -> Result<Vec<EmployeeRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn fetch(&self, _id: &EmployeeId) -> Result<Option<EmployeeRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn insert(&self, _record: EmployeeRecord) -> Result<EmployeeRecord, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn update(&self, _record: EmployeeRecord) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn default_weights(&self) -> Result<Option<WeightProfile>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn save_weights(&self, _profile: WeightProfile) -> Result<WeightProfile, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn save_analysis(&self, _record: AnalysisRecord) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn analysis_history(&self, _id: &EmployeeId) -> Result<Vec<AnalysisRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn weight_profiles(&self) -> Result<Vec<WeightProfile>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn create_alert(&self, _draft: AlertDraft) -> Result<Alert, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn alerts(&self) -> Result<Vec<Alert>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn mark_alert_read(&self, _id: u64, _at: DateTime<Utc>) -> Result<Alert, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

#[derive(Default)]
pub(super) struct StubOracle {
    response: String,
    requests: Mutex<Vec<AnalysisRequest>>,
    conversations: Mutex<Vec<Vec<ChatMessage>>>,
}

impl StubOracle {
    pub(super) fn answering(response: &str) -> Self {
        Self {
            response: response.to_string(),
            ..Self::default()
        }
    }

    pub(super) fn requests(&self) -> Vec<AnalysisRequest> {
        self.requests.lock().expect("oracle mutex poisoned").clone()
    }

    pub(super) fn conversations(&self) -> Vec<Vec<ChatMessage>> {
        self.conversations
            .lock()
            .expect("oracle mutex poisoned")
            .clone()
    }
}

impl AnalysisOracle for StubOracle {
    fn analyze(&self, request: &AnalysisRequest) -> Result<String, OracleError> {
        self.requests
            .lock()
            .expect("oracle mutex poisoned")
            .push(request.clone());
        Ok(self.response.clone())
    }

    fn chat(&self, conversation: &[ChatMessage]) -> Result<String, OracleError> {
        self.conversations
            .lock()
            .expect("oracle mutex poisoned")
            .push(conversation.to_vec());
        Ok(self.response.clone())
    }

    fn check_connection(&self) -> Result<(), OracleError> {
        Ok(())
    }
}

pub(super) struct FailingOracle;

impl AnalysisOracle for FailingOracle {
    fn analyze(&self, _request: &AnalysisRequest) -> Result<String, OracleError> {
        Err(OracleError::RequestFailed("upstream timeout".to_string()))
    }

    fn chat(&self, _conversation: &[ChatMessage]) -> Result<String, OracleError> {
        Err(OracleError::RequestFailed("upstream timeout".to_string()))
    }

    fn check_connection(&self) -> Result<(), OracleError> {
        Err(OracleError::RequestFailed("upstream timeout".to_string()))
    }
}

pub(super) fn router_with_service(
    service: RecognitionService<MemoryRepository, StubOracle>,
) -> axum::Router {
    recognition_router(Arc::new(service))
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 1024 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}

pub(super) async fn read_text_body(response: Response) -> String {
    let body = axum::body::to_bytes(response.into_body(), 1024 * 1024)
        .await
        .expect("read body");
    String::from_utf8(body.to_vec()).expect("utf-8 body")
}

pub(super) fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}
