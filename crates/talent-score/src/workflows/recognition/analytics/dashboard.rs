use serde::Serialize;
use std::collections::BTreeMap;

use super::super::domain::{EmployeeId, EmployeeRecord, RiskLevel};
use super::super::scoring::NEGATIVE_SENTIMENT_THRESHOLD;
use super::{average, TOP_PERFORMER_SCORE};

const UNDEFINED_DEPARTMENT: &str = "Não definido";
const LOW_SCORE_ALERT: f64 = 250.0;
const PROMOTION_OVERDUE_YEARS: f64 = 3.0;
const TOP_EMPLOYEES: usize = 5;

/// Monthly salary bands as (exclusive upper bound, label); the last band is open-ended.
const SALARY_BANDS: [(f64, &str); 4] = [
    (4_000.0, "Até R$ 4k"),
    (7_000.0, "R$ 4k - R$ 7k"),
    (10_000.0, "R$ 7k - R$ 10k"),
    (f64::INFINITY, "Acima R$ 10k"),
];

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DashboardMetrics {
    pub total_employees: usize,
    pub high_risk_employees: usize,
    pub average_score: f64,
    pub retention_rate: f64,
    pub top_performers: usize,
    pub critical_risk: usize,
    pub anomalous_absenteeism: usize,
    pub negative_sentiment: usize,
    pub promotion_overdue: usize,
    pub average_salary: f64,
    pub average_diversity_score: f64,
    pub gender_distribution: GenderDistribution,
    pub risk_distribution: RiskDistribution,
    pub departments: Vec<DepartmentMetrics>,
    pub salary_ranges: Vec<SalaryRangeMetrics>,
    pub top_employees: Vec<EmployeeSummary>,
    pub critical_alerts: Vec<CriticalAlert>,
}

/// Exact-category counts; records with other values are not counted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RiskDistribution {
    pub high: usize,
    pub medium: usize,
    pub low: usize,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct GenderDistribution {
    pub male: usize,
    pub female: usize,
    pub other: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DepartmentMetrics {
    pub department: String,
    pub employees: usize,
    pub average_score: f64,
    pub high_risk: usize,
    pub average_salary: f64,
    pub average_diversity_score: f64,
}

/// Head count and average score for one salary band. Empty bands are omitted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SalaryRangeMetrics {
    pub range: String,
    pub employees: usize,
    pub average_score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EmployeeSummary {
    pub id: EmployeeId,
    pub name: String,
    pub job_title: String,
    pub department: String,
    pub score: f64,
    pub loss_risk: String,
}

impl From<&EmployeeRecord> for EmployeeSummary {
    fn from(employee: &EmployeeRecord) -> Self {
        Self {
            id: employee.id.clone(),
            name: employee.name.clone(),
            job_title: employee.job_title.clone(),
            department: employee.department.clone(),
            score: employee.score,
            loss_risk: employee.loss_risk.clone(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertReason {
    HighRisk,
    AnomalousAbsenteeism,
    NegativeSentiment,
    LowScore,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CriticalAlert {
    pub employee: EmployeeSummary,
    pub reasons: Vec<AlertReason>,
}

pub fn dashboard_metrics(employees: &[EmployeeRecord]) -> DashboardMetrics {
    let all: Vec<&EmployeeRecord> = employees.iter().collect();
    let total_employees = all.len();
    let high_risk_employees = count(&all, |employee| employee.is_high_risk());

    let retention_rate = if total_employees == 0 {
        0.0
    } else {
        (total_employees - high_risk_employees) as f64 / total_employees as f64 * 100.0
    };

    DashboardMetrics {
        total_employees,
        high_risk_employees,
        average_score: average(&all, |employee| employee.score),
        retention_rate,
        top_performers: count(&all, |employee| employee.score >= TOP_PERFORMER_SCORE),
        critical_risk: count(&all, |employee| {
            employee.is_high_risk() && employee.loss_impact_level() == Some(RiskLevel::High)
        }),
        anomalous_absenteeism: count(&all, |employee| employee.anomalous_absence),
        negative_sentiment: count(&all, |employee| {
            employee.sentiment > NEGATIVE_SENTIMENT_THRESHOLD
        }),
        promotion_overdue: count(&all, |employee| {
            employee.years_since_promotion > PROMOTION_OVERDUE_YEARS
        }),
        average_salary: average(&all, |employee| employee.salary),
        average_diversity_score: average(&all, |employee| employee.diversity_score),
        gender_distribution: GenderDistribution {
            male: count(&all, |employee| employee.gender == "Masculino"),
            female: count(&all, |employee| employee.gender == "Feminino"),
            other: count(&all, |employee| employee.gender == "Outro"),
        },
        risk_distribution: RiskDistribution {
            high: high_risk_employees,
            medium: count(&all, |employee| {
                employee.loss_risk_level() == Some(RiskLevel::Medium)
            }),
            low: count(&all, |employee| {
                employee.loss_risk_level() == Some(RiskLevel::Low)
            }),
        },
        departments: department_metrics(&all),
        salary_ranges: salary_ranges(&all),
        top_employees: top_employees(&all),
        critical_alerts: critical_alerts(&all),
    }
}

fn count<F>(employees: &[&EmployeeRecord], predicate: F) -> usize
where
    F: Fn(&EmployeeRecord) -> bool,
{
    employees
        .iter()
        .filter(|employee| predicate(**employee))
        .count()
}

fn department_metrics(employees: &[&EmployeeRecord]) -> Vec<DepartmentMetrics> {
    let mut by_department: BTreeMap<&str, Vec<&EmployeeRecord>> = BTreeMap::new();
    for &employee in employees {
        let department = match employee.department.trim() {
            "" => UNDEFINED_DEPARTMENT,
            name => name,
        };
        by_department.entry(department).or_default().push(employee);
    }

    by_department
        .into_iter()
        .map(|(department, members)| DepartmentMetrics {
            department: department.to_string(),
            employees: members.len(),
            average_score: average(&members, |employee| employee.score),
            high_risk: count(&members, |employee| employee.is_high_risk()),
            average_salary: average(&members, |employee| employee.salary),
            average_diversity_score: average(&members, |employee| employee.diversity_score),
        })
        .collect()
}

fn salary_ranges(employees: &[&EmployeeRecord]) -> Vec<SalaryRangeMetrics> {
    let mut bands: Vec<Vec<&EmployeeRecord>> = vec![Vec::new(); SALARY_BANDS.len()];
    for &employee in employees {
        let band = SALARY_BANDS
            .iter()
            .position(|(upper, _)| employee.salary < *upper)
            .unwrap_or(SALARY_BANDS.len() - 1);
        bands[band].push(employee);
    }

    SALARY_BANDS
        .iter()
        .zip(bands)
        .filter(|(_, members)| !members.is_empty())
        .map(|((_, label), members)| SalaryRangeMetrics {
            range: label.to_string(),
            employees: members.len(),
            average_score: average(&members, |employee| employee.score),
        })
        .collect()
}

fn top_employees(employees: &[&EmployeeRecord]) -> Vec<EmployeeSummary> {
    let mut ranked = employees.to_vec();
    ranked.sort_by(|left, right| right.score.total_cmp(&left.score));
    ranked
        .into_iter()
        .take(TOP_EMPLOYEES)
        .map(EmployeeSummary::from)
        .collect()
}

fn critical_alerts(employees: &[&EmployeeRecord]) -> Vec<CriticalAlert> {
    employees
        .iter()
        .filter_map(|employee| {
            let mut reasons = Vec::new();
            if employee.is_high_risk() {
                reasons.push(AlertReason::HighRisk);
            }
            if employee.anomalous_absence {
                reasons.push(AlertReason::AnomalousAbsenteeism);
            }
            if employee.sentiment > NEGATIVE_SENTIMENT_THRESHOLD {
                reasons.push(AlertReason::NegativeSentiment);
            }
            if employee.score < LOW_SCORE_ALERT {
                reasons.push(AlertReason::LowScore);
            }

            (!reasons.is_empty()).then(|| CriticalAlert {
                employee: EmployeeSummary::from(*employee),
                reasons,
            })
        })
        .collect()
}
