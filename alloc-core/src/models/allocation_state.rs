//! The single mutable record the calculator operates on.
//!
//! The shell owns one [`AllocationState`] and passes it by reference into the
//! limit engine and breakdown calculator. Fields are only reachable through
//! setters, each of which clamps its input, so the state never holds an
//! out-of-range value once a setter returns.

use rust_decimal::Decimal;
use serde::Serialize;
use tracing::debug;

use crate::calculations::LimitEngine;
use crate::calculations::common::round_half_up;
use crate::calculations::conversions::{dollars_to_percent, percent_to_dollars};
use crate::models::{AllocationKind, HsaCoverageType, IrsLimits};

/// Highest annual salary accepted: one trillion dollars.
pub const MAX_GROSS_SALARY: Decimal = Decimal::from_parts(0xD4A5_1000, 0xE8, 0, false, 0);

/// Highest monthly premium accepted: one billion dollars.
pub const MAX_MONTHLY_PREMIUM: Decimal = Decimal::from_parts(1_000_000_000, 0, 0, false, 0);

/// Highest flat effective tax rate, in percent.
pub const MAX_TAX_RATE: Decimal = Decimal::from_parts(50, 0, 0, false, 0);

/// Allocation percentages of gross salary, one per [`AllocationKind`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Allocations {
    traditional_401k: Decimal,
    roth_401k: Decimal,
    hsa: Decimal,
    roth_ira: Decimal,
    emergency_fund: Decimal,
    taxable_brokerage: Decimal,
}

impl Allocations {
    pub fn zero() -> Self {
        Self {
            traditional_401k: Decimal::ZERO,
            roth_401k: Decimal::ZERO,
            hsa: Decimal::ZERO,
            roth_ira: Decimal::ZERO,
            emergency_fund: Decimal::ZERO,
            taxable_brokerage: Decimal::ZERO,
        }
    }

    pub fn get(
        &self,
        kind: AllocationKind,
    ) -> Decimal {
        match kind {
            AllocationKind::Traditional401k => self.traditional_401k,
            AllocationKind::Roth401k => self.roth_401k,
            AllocationKind::Hsa => self.hsa,
            AllocationKind::RothIra => self.roth_ira,
            AllocationKind::EmergencyFund => self.emergency_fund,
            AllocationKind::TaxableBrokerage => self.taxable_brokerage,
        }
    }

    fn slot(
        &mut self,
        kind: AllocationKind,
    ) -> &mut Decimal {
        match kind {
            AllocationKind::Traditional401k => &mut self.traditional_401k,
            AllocationKind::Roth401k => &mut self.roth_401k,
            AllocationKind::Hsa => &mut self.hsa,
            AllocationKind::RothIra => &mut self.roth_ira,
            AllocationKind::EmergencyFund => &mut self.emergency_fund,
            AllocationKind::TaxableBrokerage => &mut self.taxable_brokerage,
        }
    }

    /// `(kind, percent)` pairs in [`AllocationKind::ALL`] order.
    pub fn iter(&self) -> impl Iterator<Item = (AllocationKind, Decimal)> + '_ {
        AllocationKind::ALL.into_iter().map(|kind| (kind, self.get(kind)))
    }

    /// Sum of all six percentages.
    pub fn total_percent(&self) -> Decimal {
        self.iter().map(|(_, percent)| percent).sum()
    }
}

impl Default for Allocations {
    fn default() -> Self {
        Self {
            traditional_401k: Decimal::from(10),
            roth_401k: Decimal::ZERO,
            hsa: Decimal::from(5),
            roth_ira: Decimal::from(5),
            emergency_fund: Decimal::from(5),
            taxable_brokerage: Decimal::from(5),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AllocationState {
    gross_annual_salary: Decimal,
    effective_tax_rate: Decimal,
    health_insurance_premium: Decimal,
    hsa_coverage_type: HsaCoverageType,
    allocations: Allocations,
}

impl Default for AllocationState {
    fn default() -> Self {
        Self {
            gross_annual_salary: Decimal::from(75_000),
            effective_tax_rate: Decimal::from(22),
            health_insurance_premium: Decimal::ZERO,
            hsa_coverage_type: HsaCoverageType::Individual,
            allocations: Allocations::default(),
        }
    }
}

impl AllocationState {
    /// A state with the given salary and tax rate and nothing else allocated.
    pub fn new(
        gross_annual_salary: Decimal,
        effective_tax_rate: Decimal,
    ) -> Self {
        let mut state = Self {
            allocations: Allocations::zero(),
            ..Self::default()
        };
        state.set_gross_salary(gross_annual_salary);
        state.set_tax_rate(effective_tax_rate);
        state
    }

    pub fn gross_annual_salary(&self) -> Decimal {
        self.gross_annual_salary
    }

    pub fn effective_tax_rate(&self) -> Decimal {
        self.effective_tax_rate
    }

    /// Monthly health insurance premium, in dollars.
    pub fn health_insurance_premium(&self) -> Decimal {
        self.health_insurance_premium
    }

    pub fn hsa_coverage_type(&self) -> HsaCoverageType {
        self.hsa_coverage_type
    }

    pub fn allocations(&self) -> &Allocations {
        &self.allocations
    }

    pub fn allocation(
        &self,
        kind: AllocationKind,
    ) -> Decimal {
        self.allocations.get(kind)
    }

    /// Dollar amount of `kind` at the current salary.
    pub fn allocation_dollars(
        &self,
        kind: AllocationKind,
    ) -> Decimal {
        self.percent_to_dollars(self.allocations.get(kind))
    }

    pub fn percent_to_dollars(
        &self,
        percent: Decimal,
    ) -> Decimal {
        percent_to_dollars(percent, self.gross_annual_salary)
    }

    pub fn dollars_to_percent(
        &self,
        dollars: Decimal,
    ) -> Decimal {
        dollars_to_percent(dollars, self.gross_annual_salary)
    }

    /// Sets the annual salary, rounded to cents and clamped to
    /// `[0, MAX_GROSS_SALARY]`.
    ///
    /// Existing allocation percentages are left as they are, even if the new
    /// salary would put them over a dollar cap.
    pub fn set_gross_salary(
        &mut self,
        dollars: Decimal,
    ) {
        self.gross_annual_salary = round_half_up(dollars).clamp(Decimal::ZERO, MAX_GROSS_SALARY);
    }

    /// Sets the flat effective tax rate, clamped to `[0, 50]`.
    pub fn set_tax_rate(
        &mut self,
        percent: Decimal,
    ) {
        self.effective_tax_rate = percent.clamp(Decimal::ZERO, MAX_TAX_RATE);
    }

    /// Sets the monthly premium, clamped to `[0, MAX_MONTHLY_PREMIUM]`.
    pub fn set_health_insurance_premium(
        &mut self,
        dollars: Decimal,
    ) {
        self.health_insurance_premium = dollars.clamp(Decimal::ZERO, MAX_MONTHLY_PREMIUM);
    }

    /// Changes the coverage tier only. Call [`Self::refresh_hsa_allocation`]
    /// afterwards to bring the HSA allocation under the new cap.
    pub fn set_hsa_coverage_type(
        &mut self,
        coverage: HsaCoverageType,
    ) {
        self.hsa_coverage_type = coverage;
    }

    /// Clamps `requested` to the IRS-derived ceiling for `kind`, stores it and
    /// returns the value actually applied.
    pub fn set_allocation(
        &mut self,
        kind: AllocationKind,
        requested: Decimal,
        limits: &IrsLimits,
    ) -> Decimal {
        let applied = LimitEngine::new(self, limits).enforce_limit(kind, requested);
        if applied != requested {
            debug!(
                kind = %kind,
                requested = %requested,
                applied = %applied,
                "allocation clamped"
            );
        }
        *self.allocations.slot(kind) = applied;
        applied
    }

    /// Stores a previously saved percent as is, bounded only to `[0, 100]`.
    ///
    /// IRS caps are not re-applied: a percent that went over its cap after a
    /// salary change stays over it until the user changes it.
    pub(crate) fn restore_allocation(
        &mut self,
        kind: AllocationKind,
        percent: Decimal,
    ) {
        *self.allocations.slot(kind) = percent.clamp(Decimal::ZERO, Decimal::ONE_HUNDRED);
    }

    /// Re-applies the HSA cap to the stored HSA allocation.
    ///
    /// This is the only path that reclamps an already-stored allocation; the
    /// shell runs it after a coverage change.
    pub fn refresh_hsa_allocation(
        &mut self,
        limits: &IrsLimits,
    ) -> Decimal {
        let current = self.allocations.get(AllocationKind::Hsa);
        self.set_allocation(AllocationKind::Hsa, current, limits)
    }

    /// Restores every field to its default.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
