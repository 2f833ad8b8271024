use crate::infra::{parse_date, InMemoryRosterRepository};
use chrono::{Local, NaiveDate};
use clap::Args;
use std::io::Cursor;
use std::path::PathBuf;
use std::sync::Arc;
use talent_score::error::AppError;
use talent_score::workflows::recognition::analytics::{
    BudgetAnalysis, DashboardMetrics, PromotionCandidate,
};
use talent_score::workflows::recognition::{
    EmployeeId, EmployeeRecord, RecognitionService, RosterImporter, UnconfiguredOracle,
};

type DemoService = RecognitionService<InMemoryRosterRepository, UnconfiguredOracle>;

/// Sample roster exported in the HR database layout.
const SAMPLE_ROSTER: &str = "\
employee_id,nome,genero,raca_cor,orientacao_sexual,cargo_atual,unidade_organizacional,centro_custos,salario,faixa_salarial,nivel_salarial,data_admissao,data_ultima_promocao,tempo_cargo_atual_meses,resultado_avaliacao_desempenho,probabilidade_risco_perda,impacto_perda,numero_advertencias,faltas_injustificadas,absenteismo,is_absenteismo_anomalo,grau_escolaridade,cursos_concluidos,certificacoes_relevantes,idiomas_falados
E-100,Ana Souza,Feminino,Parda,Heterossexual,Analista Pleno,Tecnologia,TI-001,9500,Pleno,Médio,2018-03-01,2022-02-01,48,Excepcional,Alto,Alto,0,0,0.01,false,Pós-graduação,Liderança de equipes,AWS Solutions Architect,\"Português, Inglês\"
E-200,Bruno Lima,Masculino,Branca,Heterossexual,Assistente Administrativo,Administrativo,CC105,4200,Júnior,Mínimo,2021-10-15,2022-11-01,26,Bom,Médio,Médio,0,1,0.03,false,Superior completo,Excel,Nenhuma,Português
E-300,Carla Dias,Feminino,Preta,Bissexual,Auxiliar de Vendas,Vendas,VEN-001,2800,,Mínimo,2024-03-01,2020-06-01,10,Não atende,Baixo,Baixo,2,3,0.12,true,Ensino médio,Nenhum,Nenhuma,Português
E-400,Diego Alves,Masculino,Amarela,Gay,Coordenador de Operações,Operações,OPS-001,12800,Sênior,Máximo,2012-07-09,2019-05-20,66,Muito bom,Médio,Alto,0,0,0.02,false,Mestrado,Gestão avançada,PMP,\"Português, Espanhol\"
";

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Roster CSV export; the built-in sample roster is used when omitted.
    #[arg(long)]
    pub(crate) roster: Option<PathBuf>,
    /// Date tenure is measured against (YYYY-MM-DD). Defaults to today.
    #[arg(long, value_parser = parse_date)]
    pub(crate) as_of: Option<NaiveDate>,
}

#[derive(Args, Debug)]
pub(crate) struct ScoreReportArgs {
    /// Roster CSV export to score
    #[arg(long)]
    pub(crate) roster: PathBuf,
    /// Only print the report for this employee id
    #[arg(long)]
    pub(crate) employee: Option<String>,
    /// Date tenure is measured against (YYYY-MM-DD). Defaults to today.
    #[arg(long, value_parser = parse_date)]
    pub(crate) as_of: Option<NaiveDate>,
}

pub(crate) fn run_score_report(args: ScoreReportArgs) -> Result<(), AppError> {
    let ScoreReportArgs {
        roster,
        employee,
        as_of,
    } = args;

    let as_of = as_of.unwrap_or_else(|| Local::now().date_naive());
    let service = seeded_service(RosterImporter::from_path(roster, as_of)?)?;

    let ids = match employee {
        Some(id) => vec![EmployeeId(id)],
        None => service
            .employees()?
            .into_iter()
            .map(|record| record.id)
            .collect(),
    };

    for (index, id) in ids.iter().enumerate() {
        if index > 0 {
            println!("\n---\n");
        }
        print!("{}", service.report(id)?);
    }

    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs { roster, as_of } = args;
    let as_of = as_of.unwrap_or_else(|| Local::now().date_naive());

    let records = match roster {
        Some(path) => RosterImporter::from_path(path, as_of)?,
        None => sample_roster(as_of)?,
    };
    let service = seeded_service(records)?;

    println!("Talent score demo (as of {as_of})");

    let employees = service.employees()?;
    render_ranking(&employees);

    if let Some(top) = employees.first() {
        println!();
        print!("{}", service.report(&top.id)?);
    }

    render_dashboard(&service.dashboard()?);
    render_promotions(&service.promotions()?);
    render_budget(&service.budget()?);

    Ok(())
}

fn sample_roster(as_of: NaiveDate) -> Result<Vec<EmployeeRecord>, AppError> {
    Ok(RosterImporter::from_reader(
        Cursor::new(SAMPLE_ROSTER),
        as_of,
    )?)
}

fn seeded_service(records: Vec<EmployeeRecord>) -> Result<DemoService, AppError> {
    let service = RecognitionService::new(
        Arc::new(InMemoryRosterRepository::default()),
        Arc::new(UnconfiguredOracle),
    );
    service.import(records)?;
    Ok(service)
}

fn render_ranking(employees: &[EmployeeRecord]) {
    println!("\nRanking");
    for (position, employee) in employees.iter().enumerate() {
        println!(
            "{:>2}. {} ({}) | {} | score {:.1} | sentiment {:.2}",
            position + 1,
            employee.name,
            employee.id,
            employee.job_title,
            employee.score,
            employee.sentiment
        );
    }
}

fn render_dashboard(metrics: &DashboardMetrics) {
    println!("\nDashboard");
    println!(
        "- {} employees | average score {:.1} | retention {:.1}%",
        metrics.total_employees, metrics.average_score, metrics.retention_rate
    );
    println!(
        "- {} high risk | {} critical | {} top performers | {} overdue for promotion",
        metrics.high_risk_employees,
        metrics.critical_risk,
        metrics.top_performers,
        metrics.promotion_overdue
    );

    if !metrics.departments.is_empty() {
        println!("Departments:");
        for department in &metrics.departments {
            println!(
                "  - {}: {} employees | average score {:.1} | {} high risk",
                department.department,
                department.employees,
                department.average_score,
                department.high_risk
            );
        }
    }

    if !metrics.salary_ranges.is_empty() {
        println!("Salary bands:");
        for band in &metrics.salary_ranges {
            println!(
                "  - {}: {} employees | average score {:.1}",
                band.range, band.employees, band.average_score
            );
        }
    }

    if !metrics.critical_alerts.is_empty() {
        println!("Critical alerts:");
        for alert in &metrics.critical_alerts {
            println!("  - {}: {:?}", alert.employee.name, alert.reasons);
        }
    }
}

fn render_promotions(candidates: &[PromotionCandidate]) {
    println!("\nPromotion candidates");
    if candidates.is_empty() {
        println!("- none eligible");
        return;
    }

    for candidate in candidates {
        println!(
            "- {}: {} -> {} | +{:.0}% | {}% approval | {}",
            candidate.employee_name,
            candidate.current_title,
            candidate.suggested_title,
            candidate.salary_increase_pct,
            candidate.approval_probability,
            candidate.justification
        );
    }
}

fn render_budget(analysis: &BudgetAnalysis) {
    println!("\nBudget");
    println!(
        "- used {:.2} of {:.2} ({:.1}%)",
        analysis.total_used, analysis.total_budget, analysis.utilization_rate
    );
    for department in &analysis.departments {
        println!(
            "  - {} [{}]: {:.1}% used | projected {:.2}",
            department.department,
            department.cost_center,
            department.utilization_pct,
            department.projected_spend
        );
    }

    for risk in &analysis.risk_factors {
        println!("! {}", risk);
    }
    for opportunity in &analysis.opportunities {
        println!("+ {}", opportunity);
    }

    if !analysis.salary_adjustments.is_empty() {
        println!("Proposed salary adjustments:");
        for adjustment in &analysis.salary_adjustments {
            println!(
                "  - {}: +{:.0}% -> {:.2} ({})",
                adjustment.employee_name,
                adjustment.increase_pct,
                adjustment.new_salary,
                adjustment.justification
            );
        }
    }
}
