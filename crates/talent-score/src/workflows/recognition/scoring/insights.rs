use super::super::domain::EmployeeRecord;
use super::super::text::{contains_any, finite_or_zero};
use super::rules::FOREIGN_LANGUAGES;
use super::weights::ScoreFactor;
use super::ScoreBreakdown;

/// Sentiment above this value counts as a dissatisfaction signal.
pub const NEGATIVE_SENTIMENT_THRESHOLD: f64 = 0.6;

/// Negativity estimate on an inverted scale: 0 is most positive, 1 most negative.
pub fn sentiment_estimate(employee: &EmployeeRecord) -> f64 {
    let mut negative = 0.0;

    if employee.is_high_risk() {
        negative += 0.30;
    }
    if employee.warning_count > 0 {
        negative += 0.20;
    }
    if finite_or_zero(employee.absence_rate) > 0.05 {
        negative += 0.20;
    }
    if finite_or_zero(employee.years_since_promotion) > 3.0 {
        negative += 0.15;
    }
    if employee
        .evaluation_result
        .to_lowercase()
        .contains("não atende")
    {
        negative += 0.25;
    }

    f64::min(negative, 1.0)
}

pub fn risk_factors(
    employee: &EmployeeRecord,
    breakdown: &ScoreBreakdown,
    sentiment: f64,
) -> Vec<String> {
    let mut factors = Vec::new();

    if breakdown.raw(ScoreFactor::LossRisk) >= 100.0 {
        factors.push("high attrition risk identified".to_string());
    }
    if breakdown.raw(ScoreFactor::Absenteeism) <= 40.0 {
        factors.push("concerning absence pattern".to_string());
    }
    if employee.warning_count > 0 {
        factors.push(format!("{} warning(s) on record", employee.warning_count));
    }
    if finite_or_zero(employee.years_since_promotion) > 3.0 {
        factors.push("too long without promotion or raise".to_string());
    }
    if breakdown.raw(ScoreFactor::Performance) <= 50.0 {
        factors.push("performance below expectations".to_string());
    }
    if sentiment > NEGATIVE_SENTIMENT_THRESHOLD {
        factors.push("dissatisfaction indicators detected".to_string());
    }

    factors
}

pub fn strengths(employee: &EmployeeRecord, breakdown: &ScoreBreakdown) -> Vec<String> {
    const THRESHOLDS: [(ScoreFactor, f64, &str); 6] = [
        (
            ScoreFactor::Performance,
            85.0,
            "consistently exceptional performance",
        ),
        (ScoreFactor::TimeInCompany, 80.0, "high loyalty/stability"),
        (ScoreFactor::Absenteeism, 90.0, "excellent attendance"),
        (
            ScoreFactor::Education,
            80.0,
            "superior academic/technical qualification",
        ),
        (
            ScoreFactor::Diversity,
            70.0,
            "significant diversity contribution",
        ),
        (
            ScoreFactor::Experience,
            80.0,
            "extensive experience/technical knowledge",
        ),
    ];

    let mut strengths: Vec<String> = THRESHOLDS
        .iter()
        .filter(|(factor, minimum, _)| breakdown.raw(*factor) >= *minimum)
        .map(|(_, _, label)| label.to_string())
        .collect();

    if speaks_english(employee) {
        strengths.push("foreign language proficiency".to_string());
    }

    strengths
}

// Only English counts here, unlike the diversity rule which accepts any listed language.
fn speaks_english(employee: &EmployeeRecord) -> bool {
    contains_any(
        &employee.spoken_languages.to_lowercase(),
        &FOREIGN_LANGUAGES[..1],
    )
}
