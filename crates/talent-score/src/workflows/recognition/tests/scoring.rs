use super::common::*;
use crate::workflows::recognition::domain::EmployeeRecord;
use crate::workflows::recognition::scoring::{
    compute_breakdown, generate_score_report, recalculate_all_scores, update_employee_score,
    ScoreFactor, WeightConfiguration, WeightValidationError, MAX_SCORE,
};

fn raw(employee: &EmployeeRecord, factor: ScoreFactor) -> f64 {
    compute_breakdown(employee, &WeightConfiguration::default()).raw(factor)
}

fn top_of_every_scale() -> EmployeeRecord {
    EmployeeRecord {
        evaluation_result: "Excede expectativas".to_string(),
        tenure_years: 12.0,
        role_years: 6.0,
        years_since_promotion: 1.0,
        loss_risk: "Alto".to_string(),
        loss_impact: "Alto".to_string(),
        salary_level: "Máximo".to_string(),
        salary_band: "Sênior".to_string(),
        schooling: "Mestrado".to_string(),
        certifications: "PMP".to_string(),
        completed_courses: "Liderança avançado".to_string(),
        gender: "Outro".to_string(),
        race_color: "Parda".to_string(),
        sexual_orientation: "Bissexual".to_string(),
        spoken_languages: "Inglês".to_string(),
        ..EmployeeRecord::new("E-500", "Dora Alves")
    }
}

#[test]
fn scenario_breakdown_matches_formula() {
    let employee = scenario_employee();
    let breakdown = compute_breakdown(&employee, &WeightConfiguration::default());

    let expected = [
        (ScoreFactor::Performance, 100.0, 100.0),
        (ScoreFactor::TimeInRole, 85.0, 42.5),
        (ScoreFactor::TimeInCompany, 80.0, 40.0),
        (ScoreFactor::LossRisk, 100.0, 75.0),
        (ScoreFactor::LossImpact, 100.0, 75.0),
        (ScoreFactor::Absenteeism, 100.0, 50.0),
        (ScoreFactor::SalaryPosition, 50.0, 12.5),
        (ScoreFactor::Education, 30.0, 7.5),
        (ScoreFactor::Diversity, 60.0, 15.0),
        (ScoreFactor::Experience, 68.0, 17.0),
    ];

    for (factor, raw_value, contribution) in expected {
        let entry = breakdown.get(factor).expect("factor present");
        assert_close(entry.raw_value, raw_value);
        assert_close(entry.contribution, contribution);
    }
    assert_close(breakdown.score_total, 434.5);
}

#[test]
fn sparse_record_with_zero_weights_scores_zero() {
    let breakdown = compute_breakdown(&EmployeeRecord::default(), &WeightConfiguration::zero());

    assert_eq!(breakdown.factors.len(), ScoreFactor::ALL.len());
    assert_eq!(breakdown.score_total, 0.0);
}

#[test]
fn sparse_record_uses_documented_defaults() {
    let employee = EmployeeRecord::default();

    assert_eq!(raw(&employee, ScoreFactor::Performance), 60.0);
    assert_eq!(raw(&employee, ScoreFactor::TimeInRole), 25.0);
    assert_eq!(raw(&employee, ScoreFactor::TimeInCompany), 30.0);
    assert_eq!(raw(&employee, ScoreFactor::LossRisk), 50.0);
    assert_eq!(raw(&employee, ScoreFactor::LossImpact), 60.0);
    assert_eq!(raw(&employee, ScoreFactor::Absenteeism), 100.0);
    assert_eq!(raw(&employee, ScoreFactor::SalaryPosition), 50.0);
    assert_eq!(raw(&employee, ScoreFactor::Education), 30.0);
    assert_eq!(raw(&employee, ScoreFactor::Diversity), 60.0);
    assert_eq!(raw(&employee, ScoreFactor::Experience), 20.0);
}

#[test]
fn full_marks_reach_the_ceiling() {
    let breakdown = compute_breakdown(&top_of_every_scale(), &WeightConfiguration::default());

    for entry in breakdown.iter() {
        assert_eq!(entry.raw_value, 100.0, "{} should be maxed", entry.factor);
    }
    assert_close(breakdown.score_total, MAX_SCORE);
}

#[test]
fn performance_keywords_keep_legacy_precedence() {
    let mut employee = EmployeeRecord::default();

    employee.evaluation_result = "Muito Bom".to_string();
    assert_eq!(raw(&employee, ScoreFactor::Performance), 85.0);

    // "atende" matches before "não atende" is reached.
    employee.evaluation_result = "Não atende".to_string();
    assert_eq!(raw(&employee, ScoreFactor::Performance), 70.0);

    // "satisfatório" matches before "insatisfatório" is reached.
    employee.evaluation_result = "Insatisfatório".to_string();
    assert_eq!(raw(&employee, ScoreFactor::Performance), 50.0);

    employee.evaluation_result = "Parcialmente".to_string();
    assert_eq!(raw(&employee, ScoreFactor::Performance), 50.0);
}

#[test]
fn loss_risk_is_inverted_for_retention() {
    let mut employee = EmployeeRecord::default();
    let mut scores = Vec::new();
    for category in ["Alto", "Médio", "Baixo"] {
        employee.loss_risk = category.to_string();
        scores.push(raw(&employee, ScoreFactor::LossRisk));
    }

    assert_eq!(scores, vec![100.0, 50.0, 10.0]);
}

#[test]
fn absenteeism_deductions_stack_and_floor_at_zero() {
    let employee = EmployeeRecord {
        absence_rate: 0.06,
        warning_count: 1,
        unexcused_absences: 2,
        ..EmployeeRecord::default()
    };
    assert_eq!(raw(&employee, ScoreFactor::Absenteeism), 50.0);

    let employee = EmployeeRecord {
        absence_rate: 0.2,
        warning_count: 5,
        anomalous_absence: true,
        ..EmployeeRecord::default()
    };
    assert_eq!(raw(&employee, ScoreFactor::Absenteeism), 0.0);
}

#[test]
fn education_requires_real_certifications_and_courses() {
    let employee = EmployeeRecord {
        schooling: "Superior incompleto".to_string(),
        certifications: "Nenhuma".to_string(),
        completed_courses: "nenhum".to_string(),
        ..EmployeeRecord::default()
    };
    assert_eq!(raw(&employee, ScoreFactor::Education), 50.0);

    let employee = EmployeeRecord {
        schooling: "Ensino Médio".to_string(),
        certifications: "Excel".to_string(),
        completed_courses: "Oratória".to_string(),
        ..EmployeeRecord::default()
    };
    assert_eq!(raw(&employee, ScoreFactor::Education), 60.0);
}

#[test]
fn non_finite_inputs_do_not_leak_into_scores() {
    let employee = EmployeeRecord {
        tenure_years: f64::NAN,
        role_years: f64::INFINITY,
        absence_rate: f64::NAN,
        ..EmployeeRecord::default()
    };

    let breakdown = compute_breakdown(&employee, &WeightConfiguration::default());

    assert!(breakdown.score_total.is_finite());
    assert!(breakdown
        .iter()
        .all(|entry| (0.0..=100.0).contains(&entry.raw_value)));
}

#[test]
fn rationales_describe_the_inputs() {
    let breakdown = compute_breakdown(&scenario_employee(), &WeightConfiguration::default());

    let rationale = |factor| {
        breakdown
            .get(factor)
            .map(|entry| entry.rationale.clone())
            .expect("factor present")
    };

    assert_eq!(rationale(ScoreFactor::Performance), "Evaluation: Excepcional");
    assert_eq!(rationale(ScoreFactor::TimeInRole), "4.0 years in current role");
    assert_eq!(
        rationale(ScoreFactor::LossRisk),
        "Risk: Alto (high risk raises the score for retention)"
    );
    assert_eq!(
        rationale(ScoreFactor::Absenteeism),
        "1.00% absence rate, 0 warning(s)"
    );
    assert_eq!(rationale(ScoreFactor::SalaryPosition), "N/A - N/A");
}

#[test]
fn update_writes_engine_outputs() {
    let updated = update_employee_score(scenario_employee(), &WeightConfiguration::default());

    assert_close(updated.score, 434.5);
    assert_close(updated.experience_score, 68.0);
    assert_eq!(updated.education_score, 30.0);
    assert_eq!(updated.diversity_score, 60.0);
    assert_close(updated.sentiment, 0.3);
    assert_eq!(updated.risk_factors, vec!["high attrition risk identified"]);
    assert_eq!(
        updated.strengths,
        vec![
            "consistently exceptional performance",
            "high loyalty/stability",
            "excellent attendance",
        ]
    );
}

#[test]
fn update_is_idempotent() {
    let weights = WeightConfiguration::default();
    let once = update_employee_score(scenario_employee(), &weights);
    let twice = update_employee_score(once.clone(), &weights);

    assert_eq!(once, twice);
}

#[test]
fn batch_preserves_order_and_matches_single_updates() {
    let weights = WeightConfiguration::default();
    let roster = sample_roster();

    let batch = recalculate_all_scores(roster.clone(), &weights);
    let single: Vec<EmployeeRecord> = roster
        .into_iter()
        .map(|employee| update_employee_score(employee, &weights))
        .collect();

    assert_eq!(batch, single);
    let ids: Vec<&str> = batch.iter().map(|employee| employee.id.0.as_str()).collect();
    assert_eq!(ids, vec!["E-100", "E-200", "E-300"]);
}

#[test]
fn report_lists_every_factor_and_stored_insights() {
    let weights = WeightConfiguration::default();
    let employee = update_employee_score(scenario_employee(), &weights);

    let report = generate_score_report(&employee, &weights);

    assert!(report.starts_with("# Score report - Ana Souza"));
    assert!(report.contains("**Total score: 434.5 / 500**"));
    for factor in ScoreFactor::ALL {
        assert!(
            report.contains(&format!("### {}", factor.label())),
            "missing section for {factor}"
        );
    }
    assert!(report.contains("- Contribution: 100.0 points (20.0% of max)"));
    assert!(report.contains("## Risk factors\n- high attrition risk identified"));
    assert!(report.contains("## Strengths"));
}

#[test]
fn report_skips_empty_insight_sections() {
    let report = generate_score_report(&EmployeeRecord::default(), &WeightConfiguration::default());

    assert!(!report.contains("## Risk factors"));
    assert!(!report.contains("## Strengths"));
    assert!(report.starts_with("# Score report - \n\n**Total score: "));
    assert!(report.contains("## Score breakdown\n\n### "));
    assert!(report.ends_with("\n"));
}

#[test]
fn default_weights_pass_settings_validation() {
    let weights = WeightConfiguration::default();

    assert_eq!(weights.total(), 100.0);
    assert!(weights.validate().is_ok());
}

#[test]
fn settings_validation_rejects_bad_configurations() {
    let off_total = WeightConfiguration::default().with_weight(ScoreFactor::Diversity, 4.0);
    assert!(matches!(
        off_total.validate(),
        Err(WeightValidationError::InvalidTotal { .. })
    ));

    let above_max = WeightConfiguration::default()
        .with_weight(ScoreFactor::Performance, 45.0)
        .with_weight(ScoreFactor::LossRisk, 0.0)
        .with_weight(ScoreFactor::LossImpact, 0.0)
        .with_weight(ScoreFactor::Experience, 15.0);
    assert_eq!(
        above_max.validate(),
        Err(WeightValidationError::AboveMaximum {
            factor: ScoreFactor::Performance,
            value: 45.0,
            max: 40.0,
        })
    );

    let negative = WeightConfiguration::default().with_weight(ScoreFactor::Education, -5.0);
    assert!(matches!(
        negative.validate_components(),
        Err(WeightValidationError::Negative { .. })
    ));

    let not_a_number = WeightConfiguration::default().with_weight(ScoreFactor::Diversity, f64::NAN);
    assert_eq!(
        not_a_number.validate_components(),
        Err(WeightValidationError::NonFinite {
            factor: ScoreFactor::Diversity
        })
    );
}

#[test]
fn what_if_weights_only_need_to_be_finite_and_non_negative() {
    let skewed = WeightConfiguration::zero().with_weight(ScoreFactor::Performance, 100.0);

    assert!(skewed.validate_components().is_ok());
    assert!(skewed.validate().is_err());

    let breakdown = compute_breakdown(&scenario_employee(), &skewed);
    assert_close(breakdown.score_total, 500.0);
}

#[test]
fn weights_accept_legacy_field_names() {
    let weights: WeightConfiguration = serde_json::from_value(serde_json::json!({
        "desempenho": 20,
        "tempoCargo": 10,
        "tempoCasa": 10,
        "riscoPerda": 15,
        "impactoPerda": 15,
        "absenteismo": 10,
        "salario": 5,
        "formacao": 5,
        "diversidade": 5,
        "experiencia": 5
    }))
    .expect("legacy payload parses");

    assert_eq!(weights, WeightConfiguration::default());
}
