use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::domain::EmployeeId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertType {
    Risk,
    Performance,
    Absenteeism,
    Promotion,
    General,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertSeverity {
    Low,
    Medium,
    High,
    Critical,
}

/// Alert as submitted by HR staff or an automated check.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct NewAlert {
    pub alert_type: AlertType,
    pub severity: AlertSeverity,
    pub title: String,
    pub message: String,
    #[serde(default)]
    pub employee_id: Option<EmployeeId>,
    #[serde(default)]
    pub department: Option<String>,
    #[serde(default)]
    pub action_required: bool,
}

/// Alert ready to be stored; employee details are resolved by the service.
#[derive(Debug, Clone, PartialEq)]
pub struct AlertDraft {
    pub alert_type: AlertType,
    pub severity: AlertSeverity,
    pub title: String,
    pub message: String,
    pub employee_id: Option<EmployeeId>,
    pub employee_name: Option<String>,
    pub department: Option<String>,
    pub action_required: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alert {
    pub id: u64,
    pub alert_type: AlertType,
    pub severity: AlertSeverity,
    pub title: String,
    pub message: String,
    pub employee_id: Option<EmployeeId>,
    pub employee_name: Option<String>,
    pub department: Option<String>,
    pub action_required: bool,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
    pub read_at: Option<DateTime<Utc>>,
}

impl Alert {
    /// Stored form of a draft under the id assigned by the repository.
    pub fn from_draft(id: u64, draft: AlertDraft) -> Self {
        Self {
            id,
            alert_type: draft.alert_type,
            severity: draft.severity,
            title: draft.title,
            message: draft.message,
            employee_id: draft.employee_id,
            employee_name: draft.employee_name,
            department: draft.department,
            action_required: draft.action_required,
            is_read: false,
            created_at: draft.created_at,
            read_at: None,
        }
    }

    /// Marks the alert read; a second call keeps the first read time.
    pub fn mark_read(&mut self, at: DateTime<Utc>) {
        if !self.is_read {
            self.is_read = true;
            self.read_at = Some(at);
        }
    }
}

/// Alert listing with the unread counter shown next to the bell icon.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AlertFeed {
    pub unread: usize,
    pub alerts: Vec<Alert>,
}

impl AlertFeed {
    pub fn new(alerts: Vec<Alert>, unread_only: bool) -> Self {
        let unread = alerts.iter().filter(|alert| !alert.is_read).count();
        let alerts = if unread_only {
            alerts.into_iter().filter(|alert| !alert.is_read).collect()
        } else {
            alerts
        };
        Self { unread, alerts }
    }
}
