//! Plain-text rendering of comparator results.

use std::fmt::Write;

use rust_decimal::Decimal;
use trifecta_core::calculations::common::format_currency;
use trifecta_core::{
    BusinessGoal, SavingsDelta, StructureRecommendation, TaxAlert, TaxComparison, TaxProjection,
    TaxSavings, TrifectaSection,
};

const LABEL_WIDTH: usize = 22;
const AMOUNT_WIDTH: usize = 14;

fn row(
    out: &mut String,
    label: &str,
    left: Decimal,
    right: Decimal,
) {
    let _ = writeln!(
        out,
        "{label:<LABEL_WIDTH$}{:>AMOUNT_WIDTH$}{:>AMOUNT_WIDTH$}",
        format_currency(left),
        format_currency(right)
    );
}

fn single(
    out: &mut String,
    label: &str,
    value: &str,
) {
    let _ = writeln!(out, "{label:<LABEL_WIDTH$}{value:>AMOUNT_WIDTH$}");
}

fn savings_line(savings: &TaxSavings) -> String {
    format!("{} ({}%)", format_currency(savings.amount), savings.percentage)
}

fn alert_lines(
    out: &mut String,
    alerts: &[TaxAlert],
) {
    for alert in alerts {
        let _ = writeln!(out, "[{}] {}", alert.severity.as_str(), alert.message);
    }
}

pub fn render_comparison(
    comparison: &TaxComparison,
    alerts: &[TaxAlert],
) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Net profit: {}", format_currency(comparison.profit));
    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "{:<LABEL_WIDTH$}{:>AMOUNT_WIDTH$}{:>AMOUNT_WIDTH$}",
        "", "Sole Prop", "S-Corp"
    );

    let sole = &comparison.sole_prop;
    let corp = &comparison.s_corp;
    row(&mut out, "Federal tax", sole.federal_tax, corp.federal_tax);
    row(&mut out, "State tax", sole.state_tax, corp.state_tax);
    row(
        &mut out,
        "SE / payroll tax",
        sole.self_employment_tax,
        corp.payroll_tax,
    );
    row(&mut out, "Total tax", sole.total_tax, corp.total_tax);
    let _ = writeln!(out);
    single(&mut out, "Reasonable salary", &format_currency(corp.reasonable_salary));
    single(&mut out, "Distribution", &format_currency(corp.distribution));
    single(&mut out, "S-Corp savings", &savings_line(&comparison.savings));

    if !alerts.is_empty() {
        let _ = writeln!(out);
        alert_lines(&mut out, alerts);
    }
    out
}

pub fn render_savings_delta(delta: &SavingsDelta) -> String {
    let mut out = String::new();
    single(&mut out, "Current savings", &savings_line(&delta.current_savings));
    single(&mut out, "Target savings", &savings_line(&delta.target_savings));
    single(
        &mut out,
        "Additional savings",
        &savings_line(&delta.additional_savings),
    );
    out
}

pub fn render_projection(rows: &[TaxProjection]) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:>AMOUNT_WIDTH$}{:>AMOUNT_WIDTH$}{:>AMOUNT_WIDTH$}{:>AMOUNT_WIDTH$}",
        "Profit", "Sole Prop", "S-Corp", "Savings"
    );
    for projection in rows {
        let _ = writeln!(
            out,
            "{:>AMOUNT_WIDTH$}{:>AMOUNT_WIDTH$}{:>AMOUNT_WIDTH$}{:>AMOUNT_WIDTH$}",
            format_currency(projection.profit),
            format_currency(projection.sole_prop_tax),
            format_currency(projection.s_corp_tax),
            format_currency(projection.savings)
        );
    }
    out
}

pub fn render_recommendation(
    rec: &StructureRecommendation,
    goals: &[BusinessGoal],
) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Recommended: {} ({} confidence)",
        rec.structure.label(),
        rec.confidence.as_str()
    );
    if !goals.is_empty() {
        let names: Vec<_> = goals.iter().map(BusinessGoal::as_str).collect();
        let _ = writeln!(out, "Goals: {}", names.join(", "));
    }
    let _ = writeln!(out, "Reasons:");
    for reason in &rec.reasons {
        let _ = writeln!(out, "  - {reason}");
    }
    if !rec.considerations.is_empty() {
        let _ = writeln!(out, "Considerations:");
        for consideration in &rec.considerations {
            let _ = writeln!(out, "  - {consideration}");
        }
    }
    out
}

pub fn render_guidance(guidance: Option<&TaxAlert>) -> String {
    match guidance {
        Some(alert) => {
            let mut out = String::new();
            alert_lines(&mut out, std::slice::from_ref(alert));
            out
        }
        None => "No threshold crossed.\n".to_string(),
    }
}

pub fn render_section_list(sections: &[TrifectaSection]) -> String {
    let mut out = String::new();
    for section in sections {
        let marker = if section.is_completed() { "x" } else { " " };
        let _ = writeln!(
            out,
            "{:>3}  [{marker}] {:<12} {}",
            section.id,
            section.name,
            section.position.as_str()
        );
    }
    if sections.is_empty() {
        out.push_str("No sections.\n");
    }
    out
}

pub fn render_section(section: &TrifectaSection) -> String {
    let mut out = String::new();
    let status = if section.is_completed() {
        "completed"
    } else {
        "pending"
    };
    let _ = writeln!(
        out,
        "#{} {} ({}, {status})",
        section.id,
        section.name,
        section.position.as_str()
    );
    if !section.description.is_empty() {
        let _ = writeln!(out, "{}", section.description);
    }
    for metric in &section.metrics {
        let _ = writeln!(
            out,
            "  {}: {}{} ({:?})",
            metric.label, metric.value, metric.unit, metric.trend
        );
    }
    for component in &section.sub_components {
        let _ = writeln!(out, "  * {}: {}", component.name, component.description);
    }
    out
}
