use std::fmt;

use super::super::domain::EmployeeRecord;
use super::weights::WeightConfiguration;
use super::{compute_breakdown, ScoreBreakdown, MAX_SCORE};

/// Markdown audit report for one employee.
///
/// The breakdown is recomputed from `weights`; risk factors and strengths are the ones
/// stored on the record by the last update.
pub fn generate_score_report(employee: &EmployeeRecord, weights: &WeightConfiguration) -> String {
    ScoreReport {
        employee,
        breakdown: compute_breakdown(employee, weights),
    }
    .to_string()
}

struct ScoreReport<'a> {
    employee: &'a EmployeeRecord,
    breakdown: ScoreBreakdown,
}

impl fmt::Display for ScoreReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# Score report - {}", self.employee.name)?;
        writeln!(f)?;
        writeln!(
            f,
            "**Total score: {:.1} / {:.0}**",
            self.breakdown.score_total, MAX_SCORE
        )?;
        writeln!(f)?;
        writeln!(f, "## Score breakdown")?;

        for entry in self.breakdown.iter() {
            let share_of_max = entry.contribution / MAX_SCORE * 100.0;
            writeln!(f)?;
            writeln!(f, "### {}", entry.factor.label())?;
            writeln!(f, "- Raw value: {:.1}/100", entry.raw_value)?;
            writeln!(f, "- Weight: {}%", entry.weight)?;
            writeln!(
                f,
                "- Contribution: {:.1} points ({:.1}% of max)",
                entry.contribution, share_of_max
            )?;
            writeln!(f, "- Rationale: {}", entry.rationale)?;
        }

        write_section(f, "Risk factors", &self.employee.risk_factors)?;
        write_section(f, "Strengths", &self.employee.strengths)
    }
}

fn write_section(f: &mut fmt::Formatter<'_>, title: &str, items: &[String]) -> fmt::Result {
    if items.is_empty() {
        return Ok(());
    }

    writeln!(f)?;
    writeln!(f, "## {title}")?;
    for item in items {
        writeln!(f, "- {item}")?;
    }
    Ok(())
}
