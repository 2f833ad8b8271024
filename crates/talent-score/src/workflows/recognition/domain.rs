use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Identifier wrapper for roster entries (the HR system's registration key).
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EmployeeId(pub String);

impl std::fmt::Display for EmployeeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Flat roster record. Every input field is optional on the wire and falls back to an
/// empty string, zero, `false` or `None`; the scoring outputs at the bottom are owned by
/// the score engine and overwritten on every recalculation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmployeeRecord {
    // identity
    pub id: EmployeeId,
    pub name: String,
    pub registration: String,

    // demographic
    pub gender: String,
    pub race_color: String,
    pub sexual_orientation: String,
    pub spoken_languages: String,

    // organizational
    pub job_title: String,
    pub department: String,
    pub cost_center: String,
    pub manager: String,
    pub company: String,

    // compensation
    pub salary: f64,
    pub salary_table: String,
    pub salary_band: String,
    pub salary_level: String,
    pub suggested_raise: f64,

    // tenure
    pub admission_date: Option<NaiveDate>,
    pub last_promotion_date: Option<NaiveDate>,
    pub months_in_role: f64,
    pub tenure_years: f64,
    pub role_years: f64,
    pub years_since_promotion: f64,

    // performance
    pub evaluation_result: String,
    pub last_evaluation_date: Option<NaiveDate>,
    pub evaluation_feedback: String,

    // risk
    pub loss_risk: String,
    pub loss_impact: String,

    // behavior
    pub warning_count: u32,
    pub unexcused_absences: u32,
    pub absence_rate: f64,
    pub anomalous_absence: bool,
    pub leave_days: u32,

    // education
    pub schooling: String,
    pub completed_courses: String,
    pub certifications: String,
    pub education_updated_on: Option<NaiveDate>,

    // engine outputs
    pub score: f64,
    pub experience_score: f64,
    pub education_score: f64,
    pub diversity_score: f64,
    pub sentiment: f64,
    pub risk_factors: Vec<String>,
    pub strengths: Vec<String>,
}

impl EmployeeRecord {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: EmployeeId(id.into()),
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn loss_risk_level(&self) -> Option<RiskLevel> {
        RiskLevel::from_category(&self.loss_risk)
    }

    pub fn loss_impact_level(&self) -> Option<RiskLevel> {
        RiskLevel::from_category(&self.loss_impact)
    }

    pub fn is_high_risk(&self) -> bool {
        self.loss_risk_level() == Some(RiskLevel::High)
    }
}

/// Exact risk/impact category as recorded by HR ("alto", "médio", "baixo").
///
/// Score rules use substring matching instead; this type backs the aggregate views,
/// which only count exact categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    High,
    Medium,
    Low,
}

impl RiskLevel {
    pub fn from_category(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "alto" => Some(Self::High),
            "médio" => Some(Self::Medium),
            "baixo" => Some(Self::Low),
            _ => None,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::High => "alto",
            Self::Medium => "médio",
            Self::Low => "baixo",
        }
    }
}
