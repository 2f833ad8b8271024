use super::common::*;
use crate::workflows::recognition::analytics::{
    budget_analysis, career_level, dashboard_metrics, next_career_title, promotion_candidates,
    AdjustmentStatus, AlertReason, CostCenterBudgets, DashboardMetrics,
};
use crate::workflows::recognition::domain::{EmployeeId, EmployeeRecord};
use crate::workflows::recognition::scoring::{recalculate_all_scores, WeightConfiguration};

fn scored_roster() -> Vec<EmployeeRecord> {
    recalculate_all_scores(sample_roster(), &WeightConfiguration::default())
}

#[test]
fn dashboard_summarises_scored_roster() {
    let metrics = dashboard_metrics(&scored_roster());

    assert_eq!(metrics.total_employees, 3);
    assert_eq!(metrics.high_risk_employees, 1);
    assert_close(metrics.average_score, (452.0 + 325.1 + 183.25) / 3.0);
    assert!((metrics.retention_rate - 66.666_666_666).abs() < 1e-6);
    assert_eq!(metrics.top_performers, 1);
    assert_eq!(metrics.critical_risk, 1);
    assert_eq!(metrics.anomalous_absenteeism, 1);
    assert_eq!(metrics.negative_sentiment, 1);
    assert_eq!(metrics.promotion_overdue, 1);
    assert_close(metrics.average_salary, (9500.0 + 4200.0 + 2800.0) / 3.0);
    assert_close(metrics.average_diversity_score, (70.0 + 60.0 + 60.0) / 3.0);

    assert_eq!(metrics.risk_distribution.high, 1);
    assert_eq!(metrics.risk_distribution.medium, 1);
    assert_eq!(metrics.risk_distribution.low, 1);
    assert_eq!(metrics.gender_distribution.female, 0);
}

#[test]
fn dashboard_groups_departments_and_flags_alerts() {
    let metrics = dashboard_metrics(&scored_roster());

    let names: Vec<&str> = metrics
        .departments
        .iter()
        .map(|entry| entry.department.as_str())
        .collect();
    assert_eq!(names, vec!["Administrativo", "Não definido", "Tecnologia"]);
    assert_eq!(metrics.departments[2].high_risk, 1);

    let top: Vec<&str> = metrics
        .top_employees
        .iter()
        .map(|summary| summary.id.0.as_str())
        .collect();
    assert_eq!(top, vec!["E-100", "E-200", "E-300"]);

    assert_eq!(metrics.critical_alerts.len(), 2);
    assert_eq!(metrics.critical_alerts[0].employee.id, EmployeeId("E-100".into()));
    assert_eq!(metrics.critical_alerts[0].reasons, vec![AlertReason::HighRisk]);
    assert_eq!(
        metrics.critical_alerts[1].reasons,
        vec![
            AlertReason::AnomalousAbsenteeism,
            AlertReason::NegativeSentiment,
            AlertReason::LowScore,
        ]
    );
}

#[test]
fn dashboard_buckets_salaries_into_bands() {
    let metrics = dashboard_metrics(&scored_roster());

    let bands: Vec<(&str, usize)> = metrics
        .salary_ranges
        .iter()
        .map(|band| (band.range.as_str(), band.employees))
        .collect();
    assert_eq!(
        bands,
        vec![("Até R$ 4k", 1), ("R$ 4k - R$ 7k", 1), ("R$ 7k - R$ 10k", 1)]
    );
    assert_close(metrics.salary_ranges[0].average_score, 183.25);
    assert_close(metrics.salary_ranges[2].average_score, 452.0);
}

#[test]
fn salary_band_bounds_are_exclusive() {
    let employee = |id: &str, salary: f64, score: f64| EmployeeRecord {
        salary,
        score,
        ..EmployeeRecord::new(id, "Colaborador")
    };
    let roster = vec![
        employee("E-1", 4_000.0, 300.0),
        employee("E-2", 10_000.0, 400.0),
        employee("E-3", 15_000.0, 200.0),
    ];

    let metrics = dashboard_metrics(&roster);

    assert_eq!(metrics.salary_ranges.len(), 2);
    assert_eq!(metrics.salary_ranges[0].range, "R$ 4k - R$ 7k");
    assert_eq!(metrics.salary_ranges[1].range, "Acima R$ 10k");
    assert_eq!(metrics.salary_ranges[1].employees, 2);
    assert_close(metrics.salary_ranges[1].average_score, 300.0);
}

#[test]
fn empty_roster_yields_zeroed_dashboard() {
    assert_eq!(dashboard_metrics(&[]), DashboardMetrics::default());
}

#[test]
fn promotion_candidates_are_ranked_by_approval_probability() {
    let candidates = promotion_candidates(&scored_roster());

    assert_eq!(candidates.len(), 2);

    let star = &candidates[0];
    assert_eq!(star.employee_id, EmployeeId("E-100".into()));
    assert_eq!(star.suggested_title, "Analista Sênior");
    assert_eq!(star.salary_increase_pct, 15.0);
    assert_eq!(star.approval_probability, 95);
    assert_close(star.annual_salary_impact, 17_100.0);
    assert_eq!(
        star.justification,
        "exceptional performance (score 452.0); solid experience in current role (4.0 years); \
         exceptional rating in the last review"
    );

    let steady = &candidates[1];
    assert_eq!(steady.employee_id, EmployeeId("E-200".into()));
    assert_eq!(steady.suggested_title, "Auxiliar");
    assert_eq!(steady.approval_probability, 60);
    assert_close(steady.annual_salary_impact, 7_560.0);
    assert_eq!(
        steady.justification,
        "adequate time in role (2.1 years); clean disciplinary record; adequate academic qualification"
    );
}

#[test]
fn warnings_block_promotion() {
    let mut roster = scored_roster();
    roster[0].warning_count = 1;

    let candidates = promotion_candidates(&roster);

    assert!(candidates
        .iter()
        .all(|candidate| candidate.employee_id != EmployeeId("E-100".into())));
}

#[test]
fn career_ladder_moves_one_rung() {
    assert_eq!(next_career_title("Estagiário de Marketing"), "Assistente");
    assert_eq!(next_career_title("Analista Júnior"), "Analista Pleno");
    assert_eq!(next_career_title("Analista Pleno"), "Analista Sênior");
    assert_eq!(next_career_title("Desenvolvedor Sênior"), "Coordenador Desenvolvedor");
    assert_eq!(next_career_title("Analista de Dados"), "Coordenador de Dados");
    assert_eq!(next_career_title("Coordenador de Vendas"), "Gerente de Vendas");
    assert_eq!(next_career_title("Gerente"), "Diretor");
    assert_eq!(next_career_title("Motorista"), "Motorista Sênior");
}

#[test]
fn career_levels_use_first_matching_keyword() {
    assert_eq!(career_level("Estagiário"), 1);
    assert_eq!(career_level("Analista Pleno"), 5);
    assert_eq!(career_level("Analista Sênior"), 6);
    assert_eq!(career_level("Gerente Comercial"), 8);
    assert_eq!(career_level("Diretor"), 9);
    assert_eq!(career_level("Motorista"), 5);
}

#[test]
fn budget_groups_payroll_by_department() {
    let analysis = budget_analysis(&scored_roster(), &CostCenterBudgets::default());

    let departments: Vec<(&str, &str, f64)> = analysis
        .departments
        .iter()
        .map(|entry| (entry.department.as_str(), entry.cost_center.as_str(), entry.used))
        .collect();
    assert_eq!(
        departments,
        vec![
            ("Administrativo", "CC105", 50_400.0),
            ("Comercial", "CC101", 33_600.0),
            ("Tecnologia", "TI-001", 114_000.0),
        ]
    );

    assert_close(analysis.total_budget, 1_523_142.0 + 1_049_456.0 + 2_500_000.0);
    assert_close(analysis.total_used, 198_000.0);
    assert_close(
        analysis.total_available,
        analysis.total_budget - analysis.total_used,
    );
    assert_close(analysis.departments[2].projected_spend, 114_000.0 * 1.05);
    assert_close(analysis.departments[2].average_monthly_salary, 9_500.0);

    assert!(analysis.risk_factors.is_empty());
    assert_eq!(analysis.opportunities.len(), 3);
    assert_eq!(analysis.recommendations.len(), 3);
}

#[test]
fn budget_proposes_pending_adjustments_for_top_performers() {
    let analysis = budget_analysis(&scored_roster(), &CostCenterBudgets::default());

    assert_eq!(analysis.salary_adjustments.len(), 1);
    let adjustment = &analysis.salary_adjustments[0];
    assert_eq!(adjustment.employee_id, EmployeeId("E-100".into()));
    assert_eq!(adjustment.increase_pct, 15.0);
    assert!((adjustment.new_salary - 10_925.0).abs() < 1e-6);
    assert!((adjustment.annual_impact - 17_100.0).abs() < 1e-6);
    assert_eq!(adjustment.status, AdjustmentStatus::Pending);
    assert_eq!(
        adjustment.justification,
        "top performer, recognition for excellence"
    );
}

#[test]
fn unknown_cost_center_uses_fallback_budget() {
    let budgets = CostCenterBudgets::new(100_000.0);
    let employee = EmployeeRecord {
        department: "Logística".to_string(),
        cost_center: "LOG-9".to_string(),
        salary: 8_000.0,
        ..EmployeeRecord::new("E-1", "Davi Rocha")
    };

    let analysis = budget_analysis(&[employee], &budgets);

    assert_eq!(analysis.departments.len(), 1);
    assert_eq!(analysis.departments[0].department, "Logística");
    assert_close(analysis.departments[0].utilization_pct, 96.0);
    assert_eq!(
        analysis.risk_factors,
        vec!["Logística: 96.0% of budget used".to_string()]
    );
    assert!(analysis.opportunities.is_empty());
}

#[test]
fn empty_roster_has_zero_utilization() {
    let analysis = budget_analysis(&[], &CostCenterBudgets::default());

    assert!(analysis.departments.is_empty());
    assert_eq!(analysis.utilization_rate, 0.0);
    assert!(analysis.salary_adjustments.is_empty());
}
