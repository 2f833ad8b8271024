use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Deserializer};
use std::io::Read;

use super::super::domain::{EmployeeId, EmployeeRecord};
use super::tenure::{role_years, years_since};

/// One CSV row keyed by the HR database column names.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct RosterRow {
    pub(crate) employee_id: String,
    #[serde(deserialize_with = "empty_string_as_none")]
    nome: Option<String>,
    #[serde(deserialize_with = "empty_string_as_none")]
    matricula: Option<String>,
    #[serde(deserialize_with = "empty_string_as_none")]
    genero: Option<String>,
    #[serde(deserialize_with = "empty_string_as_none")]
    raca_cor: Option<String>,
    #[serde(deserialize_with = "empty_string_as_none")]
    orientacao_sexual: Option<String>,
    #[serde(deserialize_with = "empty_string_as_none")]
    empresa: Option<String>,
    #[serde(deserialize_with = "empty_string_as_none")]
    unidade_organizacional: Option<String>,
    #[serde(deserialize_with = "empty_string_as_none")]
    centro_custos: Option<String>,
    #[serde(deserialize_with = "empty_string_as_none")]
    gestor_imediato: Option<String>,
    #[serde(deserialize_with = "empty_string_as_none")]
    cargo_atual: Option<String>,
    #[serde(deserialize_with = "empty_string_as_none")]
    tabela_salarial: Option<String>,
    #[serde(deserialize_with = "empty_string_as_none")]
    faixa_salarial: Option<String>,
    #[serde(deserialize_with = "empty_string_as_none")]
    nivel_salarial: Option<String>,
    #[serde(deserialize_with = "empty_string_as_none")]
    salario: Option<String>,
    #[serde(deserialize_with = "empty_string_as_none")]
    data_admissao: Option<String>,
    #[serde(deserialize_with = "empty_string_as_none")]
    data_ultima_promocao: Option<String>,
    #[serde(deserialize_with = "empty_string_as_none")]
    resultado_avaliacao_desempenho: Option<String>,
    #[serde(deserialize_with = "empty_string_as_none")]
    data_ultima_avaliacao: Option<String>,
    #[serde(deserialize_with = "empty_string_as_none")]
    feedback_ultima_avaliacao: Option<String>,
    #[serde(deserialize_with = "empty_string_as_none")]
    numero_advertencias: Option<String>,
    #[serde(deserialize_with = "empty_string_as_none")]
    faltas_injustificadas: Option<String>,
    #[serde(deserialize_with = "empty_string_as_none")]
    dias_afastamento: Option<String>,
    #[serde(deserialize_with = "empty_string_as_none")]
    probabilidade_risco_perda: Option<String>,
    #[serde(deserialize_with = "empty_string_as_none")]
    impacto_perda: Option<String>,
    #[serde(deserialize_with = "empty_string_as_none")]
    absenteismo: Option<String>,
    #[serde(deserialize_with = "empty_string_as_none")]
    is_absenteismo_anomalo: Option<String>,
    #[serde(deserialize_with = "empty_string_as_none")]
    grau_escolaridade: Option<String>,
    #[serde(deserialize_with = "empty_string_as_none")]
    cursos_concluidos: Option<String>,
    #[serde(deserialize_with = "empty_string_as_none")]
    certificacoes_relevantes: Option<String>,
    #[serde(deserialize_with = "empty_string_as_none")]
    idiomas_falados: Option<String>,
    #[serde(deserialize_with = "empty_string_as_none")]
    atualizacao_recente_formacao: Option<String>,
    #[serde(deserialize_with = "empty_string_as_none")]
    tempo_no_cargo: Option<String>,
    #[serde(deserialize_with = "empty_string_as_none")]
    tempo_cargo_atual_meses: Option<String>,
    #[serde(deserialize_with = "empty_string_as_none")]
    reajuste_sugerido: Option<String>,
}

pub(crate) fn parse_rows<R: Read>(reader: R) -> Result<Vec<RosterRow>, csv::Error> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    csv_reader.deserialize::<RosterRow>().collect()
}

impl RosterRow {
    pub(crate) fn into_record(self, as_of: NaiveDate) -> EmployeeRecord {
        let admission_date = self.data_admissao.as_deref().and_then(parse_date);
        let last_promotion_date = self.data_ultima_promocao.as_deref().and_then(parse_date);
        let months_in_role = number(self.tempo_cargo_atual_meses.as_deref());
        let explicit_role_years = number(self.tempo_no_cargo.as_deref());

        EmployeeRecord {
            id: EmployeeId(self.employee_id),
            name: text(self.nome),
            registration: text(self.matricula),
            gender: text(self.genero),
            race_color: text(self.raca_cor),
            sexual_orientation: text(self.orientacao_sexual),
            spoken_languages: text(self.idiomas_falados),
            job_title: text(self.cargo_atual),
            department: text(self.unidade_organizacional),
            cost_center: text(self.centro_custos),
            manager: text(self.gestor_imediato),
            company: text(self.empresa),
            salary: number(self.salario.as_deref()),
            salary_table: text(self.tabela_salarial),
            salary_band: text(self.faixa_salarial),
            salary_level: text(self.nivel_salarial),
            suggested_raise: number(self.reajuste_sugerido.as_deref()),
            admission_date,
            last_promotion_date,
            months_in_role,
            tenure_years: years_since(admission_date, as_of),
            role_years: role_years(explicit_role_years, months_in_role),
            years_since_promotion: years_since(last_promotion_date, as_of),
            evaluation_result: text(self.resultado_avaliacao_desempenho),
            last_evaluation_date: self.data_ultima_avaliacao.as_deref().and_then(parse_date),
            evaluation_feedback: text(self.feedback_ultima_avaliacao),
            loss_risk: text(self.probabilidade_risco_perda),
            loss_impact: text(self.impacto_perda),
            warning_count: count(self.numero_advertencias.as_deref()),
            unexcused_absences: count(self.faltas_injustificadas.as_deref()),
            absence_rate: number(self.absenteismo.as_deref()),
            anomalous_absence: flag(self.is_absenteismo_anomalo.as_deref()),
            leave_days: count(self.dias_afastamento.as_deref()),
            schooling: text(self.grau_escolaridade),
            completed_courses: text(self.cursos_concluidos),
            certifications: text(self.certificacoes_relevantes),
            education_updated_on: self
                .atualizacao_recente_formacao
                .as_deref()
                .and_then(parse_date),
            ..EmployeeRecord::default()
        }
    }
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}

fn text(value: Option<String>) -> String {
    value.unwrap_or_default()
}

/// Accepts `1234.5` and the comma-decimal form `1234,5`; anything else is zero.
fn number(value: Option<&str>) -> f64 {
    let Some(raw) = value.map(str::trim) else {
        return 0.0;
    };

    raw.parse::<f64>()
        .ok()
        .or_else(|| raw.replace(',', ".").parse::<f64>().ok())
        .filter(|parsed| parsed.is_finite())
        .unwrap_or(0.0)
}

fn count(value: Option<&str>) -> u32 {
    let parsed = number(value);
    if parsed <= 0.0 {
        0
    } else if parsed >= f64::from(u32::MAX) {
        u32::MAX
    } else {
        parsed.trunc() as u32
    }
}

fn flag(value: Option<&str>) -> bool {
    matches!(
        value.map(|raw| raw.trim().to_lowercase()).as_deref(),
        Some("true" | "1" | "sim" | "yes" | "t")
    )
}

fn parse_date(value: &str) -> Option<NaiveDate> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.date_naive());
    }

    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(trimmed, "%d/%m/%Y"))
        .ok()
}

#[cfg(test)]
pub(crate) fn parse_date_for_tests(value: &str) -> Option<NaiveDate> {
    parse_date(value)
}

#[cfg(test)]
pub(crate) fn number_for_tests(value: &str) -> f64 {
    number(Some(value))
}
