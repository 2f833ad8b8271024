use serde::{Deserialize, Serialize};
use std::fmt;

/// The ten scoring factors, in breakdown order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreFactor {
    Performance,
    TimeInRole,
    TimeInCompany,
    LossRisk,
    LossImpact,
    Absenteeism,
    SalaryPosition,
    Education,
    Diversity,
    Experience,
}

impl ScoreFactor {
    pub const ALL: [ScoreFactor; 10] = [
        ScoreFactor::Performance,
        ScoreFactor::TimeInRole,
        ScoreFactor::TimeInCompany,
        ScoreFactor::LossRisk,
        ScoreFactor::LossImpact,
        ScoreFactor::Absenteeism,
        ScoreFactor::SalaryPosition,
        ScoreFactor::Education,
        ScoreFactor::Diversity,
        ScoreFactor::Experience,
    ];

    pub const fn key(self) -> &'static str {
        match self {
            Self::Performance => "performance",
            Self::TimeInRole => "time_in_role",
            Self::TimeInCompany => "time_in_company",
            Self::LossRisk => "loss_risk",
            Self::LossImpact => "loss_impact",
            Self::Absenteeism => "absenteeism",
            Self::SalaryPosition => "salary_position",
            Self::Education => "education",
            Self::Diversity => "diversity",
            Self::Experience => "experience",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Performance => "Performance",
            Self::TimeInRole => "Time in role",
            Self::TimeInCompany => "Time in company",
            Self::LossRisk => "Loss risk",
            Self::LossImpact => "Loss impact",
            Self::Absenteeism => "Absenteeism",
            Self::SalaryPosition => "Salary position",
            Self::Education => "Education",
            Self::Diversity => "Diversity",
            Self::Experience => "Combined experience",
        }
    }

    /// Upper bound the settings screen allows for this factor's weight.
    pub const fn max_weight(self) -> f64 {
        match self {
            Self::Performance => 40.0,
            Self::TimeInRole | Self::TimeInCompany | Self::Absenteeism => 20.0,
            Self::LossRisk | Self::LossImpact => 30.0,
            Self::SalaryPosition | Self::Education | Self::Diversity | Self::Experience => 15.0,
        }
    }
}

impl fmt::Display for ScoreFactor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Percentage weight per factor. Portuguese aliases accept configurations stored by the
/// legacy dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeightConfiguration {
    #[serde(alias = "desempenho")]
    pub performance: f64,
    #[serde(alias = "tempoCargo")]
    pub time_in_role: f64,
    #[serde(alias = "tempoCasa")]
    pub time_in_company: f64,
    #[serde(alias = "riscoPerda")]
    pub loss_risk: f64,
    #[serde(alias = "impactoPerda")]
    pub loss_impact: f64,
    #[serde(alias = "absenteismo")]
    pub absenteeism: f64,
    #[serde(alias = "salario")]
    pub salary_position: f64,
    #[serde(alias = "formacao")]
    pub education: f64,
    #[serde(alias = "diversidade")]
    pub diversity: f64,
    #[serde(alias = "experiencia")]
    pub experience: f64,
}

impl Default for WeightConfiguration {
    fn default() -> Self {
        Self {
            performance: 20.0,
            time_in_role: 10.0,
            time_in_company: 10.0,
            loss_risk: 15.0,
            loss_impact: 15.0,
            absenteeism: 10.0,
            salary_position: 5.0,
            education: 5.0,
            diversity: 5.0,
            experience: 5.0,
        }
    }
}

impl WeightConfiguration {
    /// Every weight set to zero; useful as a base for what-if configurations.
    pub const fn zero() -> Self {
        Self {
            performance: 0.0,
            time_in_role: 0.0,
            time_in_company: 0.0,
            loss_risk: 0.0,
            loss_impact: 0.0,
            absenteeism: 0.0,
            salary_position: 0.0,
            education: 0.0,
            diversity: 0.0,
            experience: 0.0,
        }
    }

    pub fn weight(&self, factor: ScoreFactor) -> f64 {
        match factor {
            ScoreFactor::Performance => self.performance,
            ScoreFactor::TimeInRole => self.time_in_role,
            ScoreFactor::TimeInCompany => self.time_in_company,
            ScoreFactor::LossRisk => self.loss_risk,
            ScoreFactor::LossImpact => self.loss_impact,
            ScoreFactor::Absenteeism => self.absenteeism,
            ScoreFactor::SalaryPosition => self.salary_position,
            ScoreFactor::Education => self.education,
            ScoreFactor::Diversity => self.diversity,
            ScoreFactor::Experience => self.experience,
        }
    }

    pub fn with_weight(mut self, factor: ScoreFactor, value: f64) -> Self {
        let slot = match factor {
            ScoreFactor::Performance => &mut self.performance,
            ScoreFactor::TimeInRole => &mut self.time_in_role,
            ScoreFactor::TimeInCompany => &mut self.time_in_company,
            ScoreFactor::LossRisk => &mut self.loss_risk,
            ScoreFactor::LossImpact => &mut self.loss_impact,
            ScoreFactor::Absenteeism => &mut self.absenteeism,
            ScoreFactor::SalaryPosition => &mut self.salary_position,
            ScoreFactor::Education => &mut self.education,
            ScoreFactor::Diversity => &mut self.diversity,
            ScoreFactor::Experience => &mut self.experience,
        };
        *slot = value;
        self
    }

    pub fn total(&self) -> f64 {
        ScoreFactor::ALL
            .iter()
            .map(|factor| self.weight(*factor))
            .sum()
    }

    /// Minimum guard for ad-hoc (what-if) scoring: finite, non-negative weights.
    pub fn validate_components(&self) -> Result<(), WeightValidationError> {
        for factor in ScoreFactor::ALL {
            let value = self.weight(factor);
            if !value.is_finite() {
                return Err(WeightValidationError::NonFinite { factor });
            }
            if value < 0.0 {
                return Err(WeightValidationError::Negative { factor, value });
            }
        }
        Ok(())
    }

    /// Full settings rule applied before a configuration is persisted.
    pub fn validate(&self) -> Result<(), WeightValidationError> {
        self.validate_components()?;

        for factor in ScoreFactor::ALL {
            let value = self.weight(factor);
            let max = factor.max_weight();
            if value > max {
                return Err(WeightValidationError::AboveMaximum { factor, value, max });
            }
        }

        let total = self.total();
        if (total - 100.0).abs() > 1e-9 {
            return Err(WeightValidationError::InvalidTotal { total });
        }

        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum WeightValidationError {
    #[error("weight for {factor} must be a finite number")]
    NonFinite { factor: ScoreFactor },
    #[error("weight for {factor} must not be negative (got {value})")]
    Negative { factor: ScoreFactor, value: f64 },
    #[error("weight for {factor} exceeds its maximum of {max} (got {value})")]
    AboveMaximum {
        factor: ScoreFactor,
        value: f64,
        max: f64,
    },
    #[error("weights must sum to 100 (got {total})")]
    InvalidTotal { total: f64 },
}
