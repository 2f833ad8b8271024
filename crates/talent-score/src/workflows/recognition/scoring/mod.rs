//! Weighted recognition score engine.
//!
//! Each employee is rated on ten factors, every factor normalized to a raw value in
//! `[0, 100]`. Raw values are combined through a [`WeightConfiguration`] into a composite
//! score capped by [`MAX_SCORE`]:
//!
//! ```text
//! contribution(factor) = raw / 100 * weight / 100 * MAX_SCORE
//! score_total          = sum of contributions
//! ```
//!
//! The engine is a set of pure functions. It never fails on sparse records: every
//! missing field has a default and every raw value is clamped.

mod insights;
mod report;
mod rules;
mod weights;

pub use insights::{risk_factors, sentiment_estimate, strengths, NEGATIVE_SENTIMENT_THRESHOLD};
pub use report::generate_score_report;
pub use weights::{ScoreFactor, WeightConfiguration, WeightValidationError};

use super::domain::EmployeeRecord;
use super::text::{finite_or_zero, or_not_available};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::debug;

/// Ceiling of the composite score; reached only when every raw value is 100 and the
/// weights sum to 100.
pub const MAX_SCORE: f64 = 500.0;

/// One factor's share of the composite score, with an audit trail.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FactorScore {
    pub factor: ScoreFactor,
    pub raw_value: f64,
    pub weight: f64,
    pub contribution: f64,
    pub rationale: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub factors: BTreeMap<ScoreFactor, FactorScore>,
    pub score_total: f64,
}

impl ScoreBreakdown {
    pub fn get(&self, factor: ScoreFactor) -> Option<&FactorScore> {
        self.factors.get(&factor)
    }

    /// Raw value for a factor, `0.0` when the breakdown does not carry it.
    pub fn raw(&self, factor: ScoreFactor) -> f64 {
        self.get(factor).map(|entry| entry.raw_value).unwrap_or(0.0)
    }

    pub fn iter(&self) -> impl Iterator<Item = &FactorScore> {
        self.factors.values()
    }
}

pub fn contribution(raw_value: f64, weight: f64) -> f64 {
    (raw_value / 100.0) * (weight / 100.0) * MAX_SCORE
}

pub fn compute_breakdown(employee: &EmployeeRecord, weights: &WeightConfiguration) -> ScoreBreakdown {
    let factors: BTreeMap<ScoreFactor, FactorScore> = ScoreFactor::ALL
        .into_iter()
        .map(|factor| {
            let raw_value = rules::clamp_raw(raw_value(factor, employee));
            let weight = weights.weight(factor);
            let entry = FactorScore {
                factor,
                raw_value,
                weight,
                contribution: contribution(raw_value, weight),
                rationale: rationale(factor, employee),
            };
            (factor, entry)
        })
        .collect();

    let score_total = factors.values().map(|entry| entry.contribution).sum();

    ScoreBreakdown {
        factors,
        score_total,
    }
}

fn raw_value(factor: ScoreFactor, employee: &EmployeeRecord) -> f64 {
    match factor {
        ScoreFactor::Performance => rules::performance(employee),
        ScoreFactor::TimeInRole => rules::time_in_role(employee),
        ScoreFactor::TimeInCompany => rules::time_in_company(employee),
        ScoreFactor::LossRisk => rules::loss_risk(employee),
        ScoreFactor::LossImpact => rules::loss_impact(employee),
        ScoreFactor::Absenteeism => rules::absenteeism(employee),
        ScoreFactor::SalaryPosition => rules::salary_position(employee),
        ScoreFactor::Education => rules::education(employee),
        ScoreFactor::Diversity => rules::diversity(employee),
        ScoreFactor::Experience => rules::experience(employee),
    }
}

fn rationale(factor: ScoreFactor, employee: &EmployeeRecord) -> String {
    match factor {
        ScoreFactor::Performance => {
            format!("Evaluation: {}", or_not_available(&employee.evaluation_result))
        }
        ScoreFactor::TimeInRole => format!(
            "{:.1} years in current role",
            finite_or_zero(employee.role_years)
        ),
        ScoreFactor::TimeInCompany => format!(
            "{:.1} years with the company",
            finite_or_zero(employee.tenure_years)
        ),
        ScoreFactor::LossRisk => format!(
            "Risk: {} (high risk raises the score for retention)",
            or_not_available(&employee.loss_risk)
        ),
        ScoreFactor::LossImpact => {
            format!("Impact: {}", or_not_available(&employee.loss_impact))
        }
        ScoreFactor::Absenteeism => format!(
            "{:.2}% absence rate, {} warning(s)",
            finite_or_zero(employee.absence_rate) * 100.0,
            employee.warning_count
        ),
        ScoreFactor::SalaryPosition => format!(
            "{} - {}",
            or_not_available(&employee.salary_band),
            or_not_available(&employee.salary_level)
        ),
        ScoreFactor::Education => {
            let certifications = if employee.certifications.trim().is_empty() {
                "none"
            } else {
                employee.certifications.as_str()
            };
            format!(
                "{}, certifications: {}",
                or_not_available(&employee.schooling),
                certifications
            )
        }
        ScoreFactor::Diversity => format!(
            "Gender: {}, race/color: {}, orientation: {}",
            or_not_available(&employee.gender),
            or_not_available(&employee.race_color),
            or_not_available(&employee.sexual_orientation)
        ),
        ScoreFactor::Experience => format!(
            "Combined experience: {:.1} years tenure, {:.1} years in role, {:.1} years since last promotion",
            finite_or_zero(employee.tenure_years),
            finite_or_zero(employee.role_years),
            finite_or_zero(employee.years_since_promotion)
        ),
    }
}

/// Rescores a record and writes every engine-owned field back onto it.
///
/// Rules only read input fields, so applying this twice with the same weights yields the
/// same record.
pub fn update_employee_score(
    mut employee: EmployeeRecord,
    weights: &WeightConfiguration,
) -> EmployeeRecord {
    let breakdown = compute_breakdown(&employee, weights);

    employee.score = breakdown.score_total;
    employee.experience_score = breakdown.raw(ScoreFactor::Experience);
    employee.education_score = breakdown.raw(ScoreFactor::Education);
    employee.diversity_score = breakdown.raw(ScoreFactor::Diversity);

    let sentiment = sentiment_estimate(&employee);
    employee.sentiment = sentiment;
    employee.risk_factors = risk_factors(&employee, &breakdown, sentiment);
    employee.strengths = strengths(&employee, &breakdown);

    debug!(
        employee_id = %employee.id,
        score = employee.score,
        sentiment,
        "employee score updated"
    );

    employee
}

/// Rescores every record independently; output order matches input order.
pub fn recalculate_all_scores(
    employees: Vec<EmployeeRecord>,
    weights: &WeightConfiguration,
) -> Vec<EmployeeRecord> {
    employees
        .into_iter()
        .map(|employee| update_employee_score(employee, weights))
        .collect()
}
