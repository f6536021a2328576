use crate::infra::{load_registry, parse_amount, parse_date};
use chrono::NaiveDate;
use clap::{Args, ValueEnum};
use deposit_ready::config::AppConfig;
use deposit_ready::error::AppError;
use deposit_ready::workflows::deposit::{
    analyze_deadlines, reference_date_or_today, DeadlineAnalysis, DepositError, DiagnosisEngine,
    DiagnosisInput, DiagnosisResult, LandlordRiskInput, NoticeAnswer, RiskAssessment,
    RiskCalculator, StateRules,
};
use serde::Serialize;

#[derive(Args, Debug)]
pub(crate) struct OutputArgs {
    /// Print the result as JSON instead of a text summary
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug)]
pub(crate) struct ShowStateArgs {
    /// State slug, e.g. new-york
    pub(crate) slug: String,
    #[command(flatten)]
    pub(crate) output: OutputArgs,
}

#[derive(Args, Debug)]
pub(crate) struct DeadlineArgs {
    /// Two-letter state code
    #[arg(long)]
    pub(crate) state: String,
    /// Move-out date (YYYY-MM-DD)
    #[arg(long, value_parser = parse_date)]
    pub(crate) move_out: NaiveDate,
    /// Evaluate as of this date (defaults to today)
    #[arg(long, value_parser = parse_date)]
    pub(crate) today: Option<NaiveDate>,
    #[command(flatten)]
    pub(crate) output: OutputArgs,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub(crate) enum NoticeArg {
    Yes,
    No,
    NotSure,
}

impl From<NoticeArg> for NoticeAnswer {
    fn from(value: NoticeArg) -> Self {
        match value {
            NoticeArg::Yes => NoticeAnswer::Yes,
            NoticeArg::No => NoticeAnswer::No,
            NoticeArg::NotSure => NoticeAnswer::NotSure,
        }
    }
}

#[derive(Args, Debug)]
pub(crate) struct DiagnoseArgs {
    #[arg(long)]
    pub(crate) state: String,
    #[arg(long, value_parser = parse_date)]
    pub(crate) move_out: NaiveDate,
    /// Did the landlord send an itemized list of deductions?
    #[arg(long, value_enum)]
    pub(crate) received_notice: NoticeArg,
    /// Date the itemized notice was sent (YYYY-MM-DD)
    #[arg(long, value_parser = parse_date)]
    pub(crate) notice_sent: Option<NaiveDate>,
    #[arg(long, value_parser = parse_amount)]
    pub(crate) total_deposit: f64,
    #[arg(long, value_parser = parse_amount, default_value = "0")]
    pub(crate) withheld: f64,
    #[arg(long, value_parser = parse_date)]
    pub(crate) today: Option<NaiveDate>,
    #[command(flatten)]
    pub(crate) output: OutputArgs,
}

#[derive(Args, Debug)]
pub(crate) struct RiskArgs {
    #[arg(long)]
    pub(crate) state: String,
    /// Date the tenant's demand letter arrived (YYYY-MM-DD)
    #[arg(long, value_parser = parse_date)]
    pub(crate) demand_letter: NaiveDate,
    #[arg(long)]
    pub(crate) deposit_returned: bool,
    #[arg(long)]
    pub(crate) itemized_list_sent: bool,
    #[arg(long, value_parser = parse_amount)]
    pub(crate) deposit_amount: Option<f64>,
    #[arg(long, value_parser = parse_date)]
    pub(crate) today: Option<NaiveDate>,
    #[command(flatten)]
    pub(crate) output: OutputArgs,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct StateSummary<'a> {
    code: &'a str,
    slug: &'a str,
    name: &'a str,
    return_deadline: u32,
    claim_deadline: u32,
    day_unit: &'static str,
    damages_multiplier: f64,
}

impl<'a> From<&'a StateRules> for StateSummary<'a> {
    fn from(rules: &'a StateRules) -> Self {
        Self {
            code: &rules.code,
            slug: &rules.slug,
            name: &rules.name,
            return_deadline: rules.return_deadline,
            claim_deadline: rules.claim_deadline,
            day_unit: rules.day_unit.label(),
            damages_multiplier: rules.damages_multiplier,
        }
    }
}

pub(crate) fn run_states_list(args: OutputArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let registry = load_registry(&config.deposit)?;
    let summaries: Vec<StateSummary<'_>> = registry.all().iter().map(StateSummary::from).collect();

    if args.json {
        return print_json(&summaries);
    }

    println!("{} jurisdictions", summaries.len());
    for state in &summaries {
        println!(
            "  {} {:<22} return {:>2} / itemize {:>2} {} | {}x damages",
            state.code,
            state.name,
            state.return_deadline,
            state.claim_deadline,
            state.day_unit,
            state.damages_multiplier
        );
    }
    Ok(())
}

pub(crate) fn run_states_show(args: ShowStateArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let registry = load_registry(&config.deposit)?;
    let rules = registry
        .by_slug(&args.slug)
        .ok_or_else(|| AppError::NotFound(format!("state '{}'", args.slug.trim())))?;

    if args.output.json {
        return print_json(rules);
    }

    println!("{} ({}) - {}", rules.name, rules.code, rules.statute_title);
    println!(
        "- Return the deposit within {} {}",
        rules.return_deadline,
        rules.day_unit.label()
    );
    println!(
        "- Itemize deductions within {} {}",
        rules.claim_deadline,
        rules.day_unit.label()
    );
    println!(
        "- Penalty: {} ({}x)",
        rules.damages_description, rules.damages_multiplier
    );
    println!("- Additional damages: {}", rules.additional_damages);
    println!(
        "- Small claims limit: ${} ({})",
        rules.max_small_claims, rules.small_claims_note
    );
    Ok(())
}

pub(crate) fn run_deadlines(args: DeadlineArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let registry = load_registry(&config.deposit)?;
    let rules = registry
        .by_code(&args.state)
        .ok_or_else(|| DepositError::InvalidState {
            code: args.state.trim().to_string(),
        })?;

    let today = reference_date_or_today(args.today);
    let analysis = analyze_deadlines(args.move_out, rules, today);

    if args.output.json {
        return print_json(&analysis);
    }
    render_analysis(rules, &analysis);
    Ok(())
}

pub(crate) fn run_diagnose(args: DiagnoseArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let registry = load_registry(&config.deposit)?;
    let engine = DiagnosisEngine::new(&registry).with_packet_price(config.deposit.packet_price);

    let input = DiagnosisInput {
        state_code: args.state,
        move_out_date: args.move_out,
        received_notice: args.received_notice.into(),
        notice_sent_date: args.notice_sent,
        total_deposit: args.total_deposit,
        amount_withheld: args.withheld,
    };
    let result = engine.diagnose(&input, reference_date_or_today(args.today))?;

    if args.output.json {
        return print_json(&result);
    }
    render_diagnosis(&result, engine.packet_price());
    Ok(())
}

pub(crate) fn run_risk(args: RiskArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let registry = load_registry(&config.deposit)?;

    let input = LandlordRiskInput {
        state_code: args.state,
        demand_letter_date: args.demand_letter,
        deposit_returned: args.deposit_returned,
        itemized_list_sent: args.itemized_list_sent,
        deposit_amount: args.deposit_amount,
    };
    let assessment =
        RiskCalculator::new(&registry).assess(&input, reference_date_or_today(args.today))?;

    if args.output.json {
        return print_json(&assessment);
    }
    render_risk(&assessment);
    Ok(())
}

fn render_analysis(rules: &StateRules, analysis: &DeadlineAnalysis) {
    println!(
        "{} deadlines for a {} move-out (as of {})",
        rules.name, analysis.move_out_date, analysis.reference_date
    );
    println!(
        "- Return deposit by {} ({})",
        analysis.return_deadline,
        describe_days(analysis.days_until_return_deadline)
    );
    println!(
        "- Itemized notice by {} ({})",
        analysis.claim_deadline,
        describe_days(analysis.days_until_claim_deadline)
    );
    match analysis.violation_type {
        Some(violation) => println!("- Landlord in violation: {}", violation.label()),
        None => println!("- No violation yet"),
    }
}

fn render_diagnosis(result: &DiagnosisResult, packet_price: f64) {
    println!(
        "{}: {} ({} case)",
        result.state_rules.name,
        result.notice_status.label(),
        result.case_strength.label()
    );
    println!(
        "- Estimated recovery ${:.2}, up to ${:.2} with {}x damages",
        result.recovery_estimate, result.max_recovery, result.state_rules.damages_multiplier
    );
    println!(
        "- {}x the ${:.2} packet price",
        result.roi_multiple, packet_price
    );
    println!("Timeline:");
    for event in &result.timeline {
        println!("  {} [{:?}] {}", event.date, event.kind, event.label);
    }
}

fn render_risk(assessment: &RiskAssessment) {
    println!(
        "{} - respond by {} ({})",
        assessment.risk_label,
        assessment.response_deadline,
        describe_days(assessment.days_remaining)
    );
    println!(
        "- Exposure ${:.2}: {}",
        assessment.exposure_amount, assessment.exposure_description
    );
    if assessment.violations.is_empty() {
        println!("- No violations found");
    }
    for violation in &assessment.violations {
        println!("- Violation: {violation}");
    }
    println!("Recommendations:");
    for recommendation in &assessment.recommendations {
        println!("  - {recommendation}");
    }
}

fn describe_days(days: i64) -> String {
    match days {
        0 => "due today".to_string(),
        1 => "1 day left".to_string(),
        -1 => "passed 1 day ago".to_string(),
        d if d > 0 => format!("{d} days left"),
        d => format!("passed {} days ago", -d),
    }
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<(), AppError> {
    let rendered = serde_json::to_string_pretty(value)
        .map_err(|err| AppError::Io(std::io::Error::new(std::io::ErrorKind::InvalidData, err)))?;
    println!("{rendered}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn day_counts_read_naturally() {
        assert_eq!(describe_days(0), "due today");
        assert_eq!(describe_days(12), "12 days left");
        assert_eq!(describe_days(-29), "passed 29 days ago");
        assert_eq!(describe_days(-1), "passed 1 day ago");
    }

    #[test]
    fn notice_arguments_map_to_answers() {
        assert_eq!(NoticeAnswer::from(NoticeArg::NotSure), NoticeAnswer::NotSure);
        assert_eq!(NoticeAnswer::from(NoticeArg::Yes), NoticeAnswer::Yes);
    }

    #[test]
    fn state_summaries_serialize_camel_case() {
        let registry = deposit_ready::workflows::deposit::RulesRegistry::builtin();
        let florida = registry.by_code("FL").expect("florida present");
        let value = serde_json::to_value(StateSummary::from(florida)).expect("serializes");
        assert_eq!(value["claimDeadline"], 30);
        assert_eq!(value["dayUnit"], "calendar days");
    }
}
