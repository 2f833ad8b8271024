//! Raw sub-score calculators. Keyword lists and their order are part of the scoring
//! contract: "não atende" is shadowed by "atende" and "insatisfatório" by "satisfatório",
//! and changing either changes every historical score.

use super::super::domain::EmployeeRecord;
use super::super::text::{contains_any, finite_or_zero, has_content};

const PERFORMANCE_TIERS: &[(&[&str], f64)] = &[
    (&["excepcional", "excede"], 100.0),
    (&["muito bom", "excelente"], 85.0),
    (&["bom", "atende"], 70.0),
    (&["satisfatório", "parcialmente"], 50.0),
    (&["não atende", "insatisfatório"], 20.0),
];
const PERFORMANCE_DEFAULT: f64 = 60.0;

const ROLE_YEAR_TIERS: &[(f64, f64)] = &[
    (5.0, 100.0),
    (3.0, 85.0),
    (2.0, 70.0),
    (1.0, 55.0),
    (0.5, 40.0),
];
const ROLE_YEAR_FLOOR: f64 = 25.0;

const TENURE_TIERS: &[(f64, f64)] = &[
    (10.0, 100.0),
    (7.0, 90.0),
    (5.0, 80.0),
    (3.0, 65.0),
    (1.0, 50.0),
];
const TENURE_FLOOR: f64 = 30.0;

const LOSS_RISK_TIERS: &[(&[&str], f64)] = &[(&["alto"], 100.0), (&["médio"], 50.0), (&["baixo"], 10.0)];
const LOSS_RISK_DEFAULT: f64 = 50.0;

const LOSS_IMPACT_TIERS: &[(&[&str], f64)] = &[(&["alto"], 100.0), (&["médio"], 70.0), (&["baixo"], 40.0)];
const LOSS_IMPACT_DEFAULT: f64 = 60.0;

const SALARY_LEVEL_TIERS: &[(&[&str], f64)] = &[(&["máximo"], 30.0), (&["médio"], 15.0), (&["mínimo"], 5.0)];
const SALARY_BAND_TIERS: &[(&[&str], f64)] = &[
    (&["sênior", "gerente", "diretor"], 25.0),
    (&["pleno", "coordenador"], 15.0),
    (&["júnior", "analista"], 10.0),
];

const SCHOOLING_TIERS: &[(&[&str], f64)] = &[
    (&["pós-graduação", "mestrado", "doutorado"], 40.0),
    (&["superior completo"], 30.0),
    (&["superior incompleto"], 20.0),
    (&["ensino médio"], 10.0),
];
const TECHNICAL_CERTIFICATIONS: &[&str] = &["pmp", "scrum", "aws"];

const UNDER_REPRESENTED_RACES: &[&str] = &["preta", "parda", "indígena", "amarela"];
pub(crate) const FOREIGN_LANGUAGES: &[&str] = &["inglês", "espanhol", "francês"];

const ADVANCED_COURSES: &[&str] = &["avançado", "liderança"];

pub(crate) fn clamp_raw(value: f64) -> f64 {
    finite_or_zero(value).clamp(0.0, 100.0)
}

fn keyword_tier(lowercase_value: &str, tiers: &[(&[&str], f64)], fallback: f64) -> f64 {
    tiers
        .iter()
        .find(|(keywords, _)| contains_any(lowercase_value, keywords))
        .map(|(_, score)| *score)
        .unwrap_or(fallback)
}

fn threshold_tier(value: f64, tiers: &[(f64, f64)], floor: f64) -> f64 {
    let value = finite_or_zero(value);
    tiers
        .iter()
        .find(|(minimum, _)| value >= *minimum)
        .map(|(_, score)| *score)
        .unwrap_or(floor)
}

pub(crate) fn performance(employee: &EmployeeRecord) -> f64 {
    keyword_tier(
        &employee.evaluation_result.to_lowercase(),
        PERFORMANCE_TIERS,
        PERFORMANCE_DEFAULT,
    )
}

pub(crate) fn time_in_role(employee: &EmployeeRecord) -> f64 {
    threshold_tier(employee.role_years, ROLE_YEAR_TIERS, ROLE_YEAR_FLOOR)
}

pub(crate) fn time_in_company(employee: &EmployeeRecord) -> f64 {
    threshold_tier(employee.tenure_years, TENURE_TIERS, TENURE_FLOOR)
}

/// Higher attrition risk deliberately yields a higher score so retention cases surface.
pub(crate) fn loss_risk(employee: &EmployeeRecord) -> f64 {
    keyword_tier(
        &employee.loss_risk.to_lowercase(),
        LOSS_RISK_TIERS,
        LOSS_RISK_DEFAULT,
    )
}

pub(crate) fn loss_impact(employee: &EmployeeRecord) -> f64 {
    keyword_tier(
        &employee.loss_impact.to_lowercase(),
        LOSS_IMPACT_TIERS,
        LOSS_IMPACT_DEFAULT,
    )
}

pub(crate) fn absenteeism(employee: &EmployeeRecord) -> f64 {
    let rate = finite_or_zero(employee.absence_rate);
    let mut score = 100.0;

    if rate > 0.10 {
        score -= 40.0;
    } else if rate > 0.05 {
        score -= 25.0;
    } else if rate > 0.02 {
        score -= 10.0;
    }

    score -= 15.0 * f64::from(employee.warning_count);
    score -= 5.0 * f64::from(employee.unexcused_absences);

    if employee.anomalous_absence {
        score -= 20.0;
    }

    f64::max(score, 0.0)
}

pub(crate) fn salary_position(employee: &EmployeeRecord) -> f64 {
    let level = employee.salary_level.to_lowercase();
    let band = employee.salary_band.to_lowercase();

    let score = 50.0
        + keyword_tier(&level, SALARY_LEVEL_TIERS, 0.0)
        + keyword_tier(&band, SALARY_BAND_TIERS, 0.0);

    f64::min(score, 100.0)
}

pub(crate) fn education(employee: &EmployeeRecord) -> f64 {
    let schooling = employee.schooling.to_lowercase();
    let certifications = employee.certifications.to_lowercase();
    let courses = employee.completed_courses.to_lowercase();

    let mut score = 30.0 + keyword_tier(&schooling, SCHOOLING_TIERS, 0.0);

    if has_content(&certifications, "nenhuma") {
        score += if contains_any(&certifications, TECHNICAL_CERTIFICATIONS) {
            20.0
        } else {
            10.0
        };
    }

    if has_content(&courses, "nenhum") {
        score += 10.0;
    }

    f64::min(score, 100.0)
}

pub(crate) fn diversity(employee: &EmployeeRecord) -> f64 {
    let gender = employee.gender.to_lowercase();
    let race = employee.race_color.to_lowercase();
    let orientation = employee.sexual_orientation.to_lowercase();
    let languages = employee.spoken_languages.to_lowercase();

    let mut score = 50.0;

    if gender.contains("feminino") {
        score += 15.0;
    } else if gender.contains("outro") {
        score += 20.0;
    }

    if contains_any(&race, UNDER_REPRESENTED_RACES) {
        score += 15.0;
    }

    // A blank orientation counts as non-default, matching historical scores.
    if !orientation.contains("heterossexual") {
        score += 10.0;
    }

    if contains_any(&languages, FOREIGN_LANGUAGES) {
        score += 10.0;
    }

    f64::min(score, 100.0)
}

pub(crate) fn experience(employee: &EmployeeRecord) -> f64 {
    let tenure = finite_or_zero(employee.tenure_years);
    let role = finite_or_zero(employee.role_years);
    let since_promotion = finite_or_zero(employee.years_since_promotion);
    let courses = employee.completed_courses.to_lowercase();

    let mut score = f64::min(tenure / 10.0 * 40.0, 40.0) + f64::min(role / 5.0 * 30.0, 30.0);

    score += if since_promotion <= 2.0 {
        20.0
    } else if since_promotion <= 4.0 {
        15.0
    } else {
        5.0
    };

    if contains_any(&courses, ADVANCED_COURSES) {
        score += 10.0;
    } else if has_content(&courses, "nenhum") {
        score += 5.0;
    }

    f64::min(score, 100.0)
}
