use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::super::domain::{EmployeeId, EmployeeRecord};
use super::TOP_PERFORMER_SCORE;

const DEFAULT_COST_CENTER: &str = "CC101";
const FALLBACK_ANNUAL_BUDGET: f64 = 1_000_000.0;
const FALLBACK_DEPARTMENT: &str = "Outros";
const GROWTH_PROJECTION: f64 = 1.05;
const OVER_BUDGET_PCT: f64 = 90.0;
const UNDER_BUDGET_PCT: f64 = 70.0;
const ADJUSTMENT_MIN_SCORE: f64 = 350.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostCenterBudget {
    pub annual_budget: f64,
    pub department: String,
}

/// Annual payroll budget per cost-center code.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostCenterBudgets {
    centers: BTreeMap<String, CostCenterBudget>,
    fallback_budget: f64,
}

impl Default for CostCenterBudgets {
    fn default() -> Self {
        Self::new(FALLBACK_ANNUAL_BUDGET)
            .with_center("CC101", 1_049_456.0, "Comercial")
            .with_center("CC105", 1_523_142.0, "Administrativo")
            .with_center("TI-001", 2_500_000.0, "Tecnologia")
            .with_center("TI-002", 1_800_000.0, "Tecnologia")
            .with_center("VEN-001", 1_200_000.0, "Vendas")
            .with_center("VEN-002", 900_000.0, "Vendas")
            .with_center("RH-001", 800_000.0, "Recursos Humanos")
            .with_center("RH-002", 600_000.0, "Recursos Humanos")
            .with_center("FIN-001", 1_500_000.0, "Financeiro")
            .with_center("FIN-002", 700_000.0, "Financeiro")
            .with_center("MKT-001", 800_000.0, "Marketing")
            .with_center("OPS-001", 1_000_000.0, "Operações")
    }
}

impl CostCenterBudgets {
    /// Empty table; unknown cost centers get `fallback_budget`.
    pub fn new(fallback_budget: f64) -> Self {
        Self {
            centers: BTreeMap::new(),
            fallback_budget,
        }
    }

    pub fn with_center(
        mut self,
        code: impl Into<String>,
        annual_budget: f64,
        department: impl Into<String>,
    ) -> Self {
        self.centers.insert(
            code.into(),
            CostCenterBudget {
                annual_budget,
                department: department.into(),
            },
        );
        self
    }

    /// Cost-center code, annual budget and owning department for an employee.
    fn resolve(&self, employee: &EmployeeRecord) -> (String, f64, String) {
        let code = match employee.cost_center.trim() {
            "" => DEFAULT_COST_CENTER,
            code => code,
        };

        match self.centers.get(code) {
            Some(center) => (
                code.to_string(),
                center.annual_budget,
                center.department.clone(),
            ),
            None => {
                let department = match employee.department.trim() {
                    "" => FALLBACK_DEPARTMENT,
                    department => department,
                };
                (
                    code.to_string(),
                    self.fallback_budget,
                    department.to_string(),
                )
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DepartmentBudget {
    /// Cost center of the first employee seen for the department; its budget is the
    /// department's budget.
    pub cost_center: String,
    pub department: String,
    pub annual_budget: f64,
    pub used: f64,
    pub available: f64,
    pub utilization_pct: f64,
    pub employees: usize,
    pub average_monthly_salary: f64,
    pub projected_spend: f64,
}

/// Proposals are produced for review only; approval happens outside this service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdjustmentStatus {
    Pending,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SalaryAdjustment {
    pub employee_id: EmployeeId,
    pub employee_name: String,
    pub current_salary: f64,
    pub increase_pct: f64,
    pub new_salary: f64,
    pub justification: String,
    pub annual_impact: f64,
    pub status: AdjustmentStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BudgetAnalysis {
    pub total_budget: f64,
    pub total_used: f64,
    pub total_available: f64,
    pub utilization_rate: f64,
    pub departments: Vec<DepartmentBudget>,
    pub recommendations: Vec<String>,
    pub risk_factors: Vec<String>,
    pub opportunities: Vec<String>,
    pub salary_adjustments: Vec<SalaryAdjustment>,
}

pub fn budget_analysis(employees: &[EmployeeRecord], budgets: &CostCenterBudgets) -> BudgetAnalysis {
    let departments = department_budgets(employees, budgets);

    let total_budget: f64 = departments.iter().map(|entry| entry.annual_budget).sum();
    let total_used: f64 = departments.iter().map(|entry| entry.used).sum();

    let risk_factors = departments
        .iter()
        .filter(|entry| entry.utilization_pct > OVER_BUDGET_PCT)
        .map(|entry| {
            format!(
                "{}: {:.1}% of budget used",
                entry.department, entry.utilization_pct
            )
        })
        .collect();

    let opportunities = departments
        .iter()
        .filter(|entry| entry.utilization_pct < UNDER_BUDGET_PCT)
        .map(|entry| {
            format!(
                "{}: {:.1}% of budget available",
                entry.department,
                100.0 - entry.utilization_pct
            )
        })
        .collect();

    BudgetAnalysis {
        total_budget,
        total_used,
        total_available: total_budget - total_used,
        utilization_rate: percentage(total_used, total_budget),
        departments,
        recommendations: vec![
            "Consider redistributing budget between departments".to_string(),
            "Tighten spending controls in departments with high utilization".to_string(),
            "Review salary optimization opportunities".to_string(),
        ],
        risk_factors,
        opportunities,
        salary_adjustments: salary_adjustments(employees),
    }
}

fn department_budgets(
    employees: &[EmployeeRecord],
    budgets: &CostCenterBudgets,
) -> Vec<DepartmentBudget> {
    let mut by_department: BTreeMap<String, DepartmentBudget> = BTreeMap::new();

    for employee in employees {
        let (cost_center, annual_budget, department) = budgets.resolve(employee);
        let entry = by_department
            .entry(department.clone())
            .or_insert_with(|| DepartmentBudget {
                cost_center,
                department,
                annual_budget,
                used: 0.0,
                available: 0.0,
                utilization_pct: 0.0,
                employees: 0,
                average_monthly_salary: 0.0,
                projected_spend: 0.0,
            });
        entry.employees += 1;
        entry.used += employee.salary * 12.0;
    }

    by_department
        .into_values()
        .map(|mut entry| {
            entry.available = entry.annual_budget - entry.used;
            entry.utilization_pct = percentage(entry.used, entry.annual_budget);
            entry.average_monthly_salary = entry.used / 12.0 / entry.employees as f64;
            entry.projected_spend = entry.used * GROWTH_PROJECTION;
            entry
        })
        .collect()
}

fn percentage(part: f64, whole: f64) -> f64 {
    if whole == 0.0 {
        0.0
    } else {
        part / whole * 100.0
    }
}

/// Raise proposals for strong performers and retention cases. Proposals always start
/// pending; approval happens outside this view.
fn salary_adjustments(employees: &[EmployeeRecord]) -> Vec<SalaryAdjustment> {
    employees
        .iter()
        .filter(|employee| employee.score >= ADJUSTMENT_MIN_SCORE || employee.is_high_risk())
        .map(|employee| {
            let (increase_pct, justification) = if employee.score >= 450.0 {
                (15.0, "top performer, recognition for excellence")
            } else if employee.score >= TOP_PERFORMER_SCORE {
                (10.0, "high performance, talent retention")
            } else if employee.is_high_risk() {
                (12.0, "high attrition risk, retention strategy")
            } else {
                (5.0, "standard performance adjustment")
            };

            let new_salary = employee.salary * (1.0 + increase_pct / 100.0);
            SalaryAdjustment {
                employee_id: employee.id.clone(),
                employee_name: employee.name.clone(),
                current_salary: employee.salary,
                increase_pct,
                new_salary,
                justification: justification.to_string(),
                annual_impact: (new_salary - employee.salary) * 12.0,
                status: AdjustmentStatus::Pending,
            }
        })
        .collect()
}
