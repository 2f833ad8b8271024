use serde::Serialize;

use super::super::domain::{EmployeeId, EmployeeRecord};
use super::super::text::{contains_any, replace_first_ignore_case};
use super::TOP_PERFORMER_SCORE;

const MIN_ROLE_YEARS: f64 = 1.5;
const MIN_SCORE: f64 = 300.0;
const GOOD_EVALUATION: &[&str] = &["bom", "excepcional", "excede"];
const MAX_APPROVAL_PROBABILITY: u8 = 95;

/// How a title is rewritten one step up the ladder.
enum Step {
    /// Replace the whole title.
    Title(&'static str),
    /// Swap the matched keyword for the next grade, keeping the rest.
    Swap(&'static str),
    /// Drop the matched keyword and put the new rank in front of what remains.
    Prefix(&'static str),
}

// First matching keyword wins.
const LADDER: &[(&str, Step)] = &[
    ("estagiário", Step::Title("Assistente")),
    ("assistente", Step::Title("Auxiliar")),
    ("auxiliar", Step::Title("Analista Júnior")),
    ("júnior", Step::Swap("Pleno")),
    ("pleno", Step::Swap("Sênior")),
    ("sênior", Step::Prefix("Coordenador")),
    ("analista", Step::Prefix("Coordenador")),
    ("coordenador", Step::Prefix("Gerente")),
    ("especialista", Step::Prefix("Coordenador")),
    ("consultor", Step::Prefix("Coordenador")),
    ("supervisor", Step::Prefix("Gerente")),
    ("gerente", Step::Prefix("Diretor")),
];

const CAREER_LEVELS: &[(&str, u8)] = &[
    ("estagiário", 1),
    ("assistente", 2),
    ("auxiliar", 3),
    ("júnior", 4),
    ("pleno", 5),
    ("sênior", 6),
    ("especialista", 6),
    ("analista", 5),
    ("consultor", 6),
    ("coordenador", 7),
    ("supervisor", 7),
    ("gerente", 8),
    ("diretor", 9),
];
const DEFAULT_CAREER_LEVEL: u8 = 5;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PromotionCandidate {
    pub employee_id: EmployeeId,
    pub employee_name: String,
    pub department: String,
    pub current_title: String,
    pub suggested_title: String,
    pub score: f64,
    pub role_years: f64,
    pub salary_increase_pct: f64,
    pub annual_salary_impact: f64,
    pub approval_probability: u8,
    pub justification: String,
}

/// Eligible employees with a suggested next title, most likely approvals first.
pub fn promotion_candidates(employees: &[EmployeeRecord]) -> Vec<PromotionCandidate> {
    let mut candidates: Vec<PromotionCandidate> = employees
        .iter()
        .filter(|employee| is_eligible(employee))
        .map(candidate)
        .collect();

    candidates.sort_by(|left, right| right.approval_probability.cmp(&left.approval_probability));
    candidates
}

fn is_eligible(employee: &EmployeeRecord) -> bool {
    employee.role_years >= MIN_ROLE_YEARS
        && employee.score >= MIN_SCORE
        && employee.warning_count == 0
        && contains_any(&employee.evaluation_result.to_lowercase(), GOOD_EVALUATION)
}

fn candidate(employee: &EmployeeRecord) -> PromotionCandidate {
    let suggested_title = next_career_title(&employee.job_title);
    let salary_increase_pct = salary_increase_pct(&employee.job_title, &suggested_title);

    PromotionCandidate {
        employee_id: employee.id.clone(),
        employee_name: employee.name.clone(),
        department: employee.department.clone(),
        current_title: employee.job_title.clone(),
        suggested_title,
        score: employee.score,
        role_years: employee.role_years,
        salary_increase_pct,
        annual_salary_impact: employee.salary * (salary_increase_pct / 100.0) * 12.0,
        approval_probability: approval_probability(employee),
        justification: justification(employee),
    }
}

/// Next rung of the career ladder; unknown titles gain a "Sênior" suffix.
pub fn next_career_title(title: &str) -> String {
    let lower = title.to_lowercase();
    let step = LADDER
        .iter()
        .find(|(keyword, _)| lower.contains(keyword));

    match step {
        Some((_, Step::Title(next))) => next.to_string(),
        Some((keyword, Step::Swap(next))) => replace_first_ignore_case(title, keyword, next),
        Some((keyword, Step::Prefix(rank))) => {
            let remainder = replace_first_ignore_case(title, keyword, "");
            let remainder = remainder.split_whitespace().collect::<Vec<_>>().join(" ");
            format!("{rank} {remainder}").trim_end().to_string()
        }
        None => format!("{title} Sênior"),
    }
}

pub fn career_level(title: &str) -> u8 {
    let lower = title.to_lowercase();
    CAREER_LEVELS
        .iter()
        .find(|(keyword, _)| lower.contains(keyword))
        .map(|(_, level)| *level)
        .unwrap_or(DEFAULT_CAREER_LEVEL)
}

fn salary_increase_pct(current_title: &str, suggested_title: &str) -> f64 {
    let distance = i16::from(career_level(suggested_title)) - i16::from(career_level(current_title));
    match distance {
        i16::MIN..=0 => 5.0,
        1 => 15.0,
        2 => 25.0,
        _ => 35.0,
    }
}

fn approval_probability(employee: &EmployeeRecord) -> u8 {
    let evaluation = employee.evaluation_result.to_lowercase();
    let mut probability: u8 = 50;

    probability += if employee.score >= 450.0 {
        30
    } else if employee.score >= TOP_PERFORMER_SCORE {
        20
    } else if employee.score >= 350.0 {
        10
    } else {
        0
    };

    probability += if employee.role_years >= 3.0 {
        15
    } else if employee.role_years >= 2.0 {
        10
    } else {
        0
    };

    probability += if evaluation.contains("excepcional") {
        20
    } else if evaluation.contains("excede") {
        15
    } else {
        0
    };

    if employee.is_high_risk() {
        probability += 25;
    }

    probability.min(MAX_APPROVAL_PROBABILITY)
}

fn justification(employee: &EmployeeRecord) -> String {
    let mut reasons = Vec::new();

    if employee.score >= 450.0 {
        reasons.push(format!("exceptional performance (score {:.1})", employee.score));
    } else if employee.score >= TOP_PERFORMER_SCORE {
        reasons.push(format!("consistently high performance (score {:.1})", employee.score));
    }

    if employee.role_years >= 3.0 {
        reasons.push(format!(
            "solid experience in current role ({:.1} years)",
            employee.role_years
        ));
    } else if employee.role_years >= 2.0 {
        reasons.push(format!("adequate time in role ({:.1} years)", employee.role_years));
    }

    if employee.evaluation_result.to_lowercase().contains("excepcional") {
        reasons.push("exceptional rating in the last review".to_string());
    }
    if employee.is_high_risk() {
        reasons.push("retention strategy for critical talent".to_string());
    }
    if employee.warning_count == 0 {
        reasons.push("clean disciplinary record".to_string());
    }
    if contains_any(&employee.schooling.to_lowercase(), &["superior", "pós"]) {
        reasons.push("adequate academic qualification".to_string());
    }

    reasons.truncate(3);
    reasons.join("; ")
}
