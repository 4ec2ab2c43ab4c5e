//! Plain-text and JSON views of a session.
//!
//! The text view has four blocks: the inputs, the allocation table with each
//! kind's current ceiling, the gross-to-take-home waterfall, and one banner
//! per IRS cap.

use std::fmt::Write;

use alloc_core::{
    AllocationKind, AllocationState, Breakdown, BreakdownCalculator, IrsLimits, LimitEngine,
    LimitStatus,
};
use rust_decimal::Decimal;

use crate::utils::{format_currency, format_percent};

/// Kinds that each get a limit banner; the two 401(k) kinds share one.
const BANNER_KINDS: [AllocationKind; 3] = [
    AllocationKind::Traditional401k,
    AllocationKind::Hsa,
    AllocationKind::RothIra,
];

const LABEL_WIDTH: usize = 28;
const AMOUNT_WIDTH: usize = 16;

fn waterfall_line(
    out: &mut String,
    label: &str,
    amount: Decimal,
) {
    let _ = writeln!(
        out,
        "  {label:<LABEL_WIDTH$}{:>AMOUNT_WIDTH$}",
        format_currency(amount)
    );
}

fn deduction_line(
    out: &mut String,
    label: &str,
    amount: Decimal,
) {
    if !amount.is_zero() {
        waterfall_line(out, &format!("    {label}"), -amount);
    }
}

fn banner_title(
    status: &LimitStatus,
    state: &AllocationState,
) -> String {
    match status.kind {
        AllocationKind::Traditional401k | AllocationKind::Roth401k => {
            "401(k) traditional + Roth".to_string()
        }
        AllocationKind::Hsa => format!("HSA ({})", state.hsa_coverage_type()),
        other => other.label().to_string(),
    }
}

fn render_inputs(
    out: &mut String,
    state: &AllocationState,
    limits: &IrsLimits,
    breakdown: &Breakdown,
) {
    let _ = writeln!(out, "Paycheck allocation ({} IRS limits)", limits.tax_year);
    let _ = writeln!(
        out,
        "  {:<LABEL_WIDTH$}{:>AMOUNT_WIDTH$} / year   {} / month",
        "Gross salary",
        format_currency(breakdown.gross_annual),
        format_currency(breakdown.gross_monthly)
    );
    let _ = writeln!(
        out,
        "  {:<LABEL_WIDTH$}{:>AMOUNT_WIDTH$}",
        "Effective tax rate",
        format_percent(state.effective_tax_rate())
    );
    let _ = writeln!(
        out,
        "  {:<LABEL_WIDTH$}{:>AMOUNT_WIDTH$} / month",
        "Health insurance premium",
        format_currency(state.health_insurance_premium())
    );
    let _ = writeln!(
        out,
        "  {:<LABEL_WIDTH$}{:>AMOUNT_WIDTH$}",
        "HSA coverage",
        state.hsa_coverage_type().as_str()
    );
}

fn render_allocations(
    out: &mut String,
    state: &AllocationState,
    limits: &IrsLimits,
) {
    let engine = LimitEngine::new(state, limits);

    let _ = writeln!(
        out,
        "\nAllocations {:>23}{:>AMOUNT_WIDTH$}{:>10}",
        "percent", "per year", "max"
    );
    for (kind, percent) in state.allocations().iter() {
        let timing = if kind.is_pre_tax() { "pre" } else { "post" };
        let _ = writeln!(
            out,
            "  {:<20}{timing:<5}{:>10}{:>AMOUNT_WIDTH$}{:>10}",
            kind.label(),
            format_percent(percent),
            format_currency(state.allocation_dollars(kind)),
            format_percent(engine.max_percent(kind))
        );
    }
}

fn render_waterfall(
    out: &mut String,
    breakdown: &Breakdown,
) {
    let pre = &breakdown.pre_tax;
    let post = &breakdown.post_tax;

    let _ = writeln!(out, "\nWaterfall (annual)");
    waterfall_line(out, "Gross income", breakdown.gross_annual);
    deduction_line(out, "Traditional 401(k)", pre.traditional_401k);
    deduction_line(out, "HSA", pre.hsa);
    deduction_line(out, "Health insurance", pre.health_insurance);
    waterfall_line(out, "Taxable income", breakdown.taxable_income);
    deduction_line(out, "Estimated taxes", breakdown.estimated_taxes);
    waterfall_line(out, "After-tax income", breakdown.after_tax_income);
    deduction_line(out, "Roth 401(k)", post.roth_401k);
    deduction_line(out, "Roth IRA", post.roth_ira);
    deduction_line(out, "Emergency fund", post.emergency_fund);
    deduction_line(out, "Taxable brokerage", post.taxable_brokerage);
    let _ = writeln!(
        out,
        "  {:<LABEL_WIDTH$}{:>AMOUNT_WIDTH$} / year   {} / month",
        "Take-home pay",
        format_currency(breakdown.take_home_annual),
        format_currency(breakdown.take_home_monthly)
    );
    let _ = writeln!(
        out,
        "  {:<LABEL_WIDTH$}{:>AMOUNT_WIDTH$} / year   {} of gross",
        "Total savings",
        format_currency(breakdown.total_savings_annual),
        format_percent(breakdown.savings_rate)
    );

    if breakdown.is_take_home_negative() {
        let _ = writeln!(
            out,
            "\n! Post-tax allocations exceed after-tax income by {}",
            format_currency(-breakdown.take_home_annual)
        );
    }
}

fn render_limits(
    out: &mut String,
    state: &AllocationState,
    limits: &IrsLimits,
) {
    let engine = LimitEngine::new(state, limits);

    let _ = writeln!(out, "\nIRS limits");
    for status in BANNER_KINDS
        .iter()
        .filter_map(|kind| engine.limit_status(*kind))
    {
        let marker = if status.at_cap { "  [AT LIMIT]" } else { "" };
        let _ = writeln!(
            out,
            "  {:<LABEL_WIDTH$}{} of {} used, {} left{marker}",
            banner_title(&status, state),
            format_currency(status.used),
            format_currency(status.cap),
            format_currency(status.remaining)
        );
    }
}

/// Full text report for `state`, preceded by `notice` when present.
pub fn render_text(
    state: &AllocationState,
    limits: &IrsLimits,
    notice: Option<&str>,
) -> String {
    let breakdown = BreakdownCalculator::new(state).calculate();
    let mut out = String::new();

    if let Some(notice) = notice {
        let _ = writeln!(out, "Note: {notice}\n");
    }
    render_inputs(&mut out, state, limits, &breakdown);
    render_allocations(&mut out, state, limits);
    render_waterfall(&mut out, &breakdown);
    render_limits(&mut out, state, limits);
    out
}

/// The [`Breakdown`] for `state` as pretty-printed JSON.
pub fn render_json(state: &AllocationState) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&BreakdownCalculator::new(state).calculate())
}
