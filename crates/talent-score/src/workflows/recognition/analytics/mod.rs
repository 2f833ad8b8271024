//! Roster-wide views built from scored records: the HR dashboard, promotion candidates
//! and the payroll budget analysis.
//!
//! Every view expects records already rescored by the engine and never mutates them.

mod budget;
mod dashboard;
mod promotions;

pub use budget::{
    budget_analysis, AdjustmentStatus, BudgetAnalysis, CostCenterBudget, CostCenterBudgets,
    DepartmentBudget, SalaryAdjustment,
};
pub use dashboard::{
    dashboard_metrics, AlertReason, CriticalAlert, DashboardMetrics, DepartmentMetrics,
    EmployeeSummary, GenderDistribution, RiskDistribution, SalaryRangeMetrics,
};
pub use promotions::{career_level, next_career_title, promotion_candidates, PromotionCandidate};

use super::domain::EmployeeRecord;

/// Score at or above which an employee counts as a top performer.
pub const TOP_PERFORMER_SCORE: f64 = 400.0;

fn average<F>(employees: &[&EmployeeRecord], value: F) -> f64
where
    F: Fn(&EmployeeRecord) -> f64,
{
    if employees.is_empty() {
        return 0.0;
    }
    employees.iter().map(|employee| value(*employee)).sum::<f64>() / employees.len() as f64
}
