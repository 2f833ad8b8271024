use chrono::{DateTime, NaiveDate, Utc};
use metrics_exporter_prometheus::PrometheusHandle;
use std::collections::BTreeMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex, MutexGuard};
use talent_score::workflows::recognition::{
    Alert, AlertDraft, AnalysisRecord, EmployeeId, EmployeeRecord, RepositoryError,
    RosterRepository, WeightProfile,
};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Process-local roster store; contents are lost on restart.
#[derive(Default, Clone)]
pub(crate) struct InMemoryRosterRepository {
    records: Arc<Mutex<BTreeMap<EmployeeId, EmployeeRecord>>>,
    profiles: Arc<Mutex<Vec<WeightProfile>>>,
    analyses: Arc<Mutex<Vec<AnalysisRecord>>>,
    alerts: Arc<Mutex<Vec<Alert>>>,
}

fn lock<T>(mutex: &Mutex<T>) -> Result<MutexGuard<'_, T>, RepositoryError> {
    mutex
        .lock()
        .map_err(|_| RepositoryError::Unavailable("in-memory store poisoned".to_string()))
}

impl RosterRepository for InMemoryRosterRepository {
    fn list(&self) -> Result<Vec<EmployeeRecord>, RepositoryError> {
        Ok(lock(&self.records)?.values().cloned().collect())
    }

    fn fetch(&self, id: &EmployeeId) -> Result<Option<EmployeeRecord>, RepositoryError> {
        Ok(lock(&self.records)?.get(id).cloned())
    }

    fn insert(&self, record: EmployeeRecord) -> Result<EmployeeRecord, RepositoryError> {
        let mut guard = lock(&self.records)?;
        if guard.contains_key(&record.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(record.id.clone(), record.clone());
        Ok(record)
    }

    fn update(&self, record: EmployeeRecord) -> Result<(), RepositoryError> {
        let mut guard = lock(&self.records)?;
        if guard.contains_key(&record.id) {
            guard.insert(record.id.clone(), record);
            Ok(())
        } else {
            Err(RepositoryError::NotFound)
        }
    }

    fn default_weights(&self) -> Result<Option<WeightProfile>, RepositoryError> {
        Ok(lock(&self.profiles)?
            .iter()
            .rev()
            .find(|profile| profile.is_default)
            .cloned())
    }

    fn save_weights(&self, profile: WeightProfile) -> Result<WeightProfile, RepositoryError> {
        let mut guard = lock(&self.profiles)?;
        guard.retain(|existing| existing.name != profile.name);
        if profile.is_default {
            for existing in guard.iter_mut() {
                existing.is_default = false;
            }
        }
        guard.push(profile.clone());
        Ok(profile)
    }

    fn weight_profiles(&self) -> Result<Vec<WeightProfile>, RepositoryError> {
        Ok(lock(&self.profiles)?.iter().rev().cloned().collect())
    }

    fn save_analysis(&self, record: AnalysisRecord) -> Result<(), RepositoryError> {
        lock(&self.analyses)?.push(record);
        Ok(())
    }

    fn analysis_history(&self, id: &EmployeeId) -> Result<Vec<AnalysisRecord>, RepositoryError> {
        let mut history: Vec<AnalysisRecord> = lock(&self.analyses)?
            .iter()
            .filter(|record| &record.employee_id == id)
            .cloned()
            .collect();
        history.sort_by(|left, right| right.created_at.cmp(&left.created_at));
        Ok(history)
    }

    fn create_alert(&self, draft: AlertDraft) -> Result<Alert, RepositoryError> {
        let mut guard = lock(&self.alerts)?;
        // Alerts are never deleted, so the last id is the highest.
        let id = guard.last().map_or(1, |alert| alert.id + 1);
        let alert = Alert::from_draft(id, draft);
        guard.push(alert.clone());
        Ok(alert)
    }

    fn alerts(&self) -> Result<Vec<Alert>, RepositoryError> {
        let mut alerts = lock(&self.alerts)?.clone();
        alerts.sort_by(|left, right| {
            right
                .created_at
                .cmp(&left.created_at)
                .then(right.id.cmp(&left.id))
        });
        Ok(alerts)
    }

    fn mark_alert_read(&self, id: u64, at: DateTime<Utc>) -> Result<Alert, RepositoryError> {
        let mut guard = lock(&self.alerts)?;
        let alert = guard
            .iter_mut()
            .find(|alert| alert.id == id)
            .ok_or(RepositoryError::NotFound)?;
        alert.mark_read(at);
        Ok(alert.clone())
    }
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}
