//! IRS contribution-limit enforcement.
//!
//! Translates a requested allocation percent into one that keeps the
//! allocation under its annual dollar cap at the current salary.
//!
//! # Caps
//!
//! | Kind               | Ceiling                                          |
//! |--------------------|--------------------------------------------------|
//! | `traditional401k`  | combined 401(k) cap − Roth 401(k) dollars        |
//! | `roth401k`         | combined 401(k) cap − traditional 401(k) dollars |
//! | `hsa`              | individual or family HSA cap                     |
//! | `rothIRA`          | Roth IRA cap                                     |
//! | everything else    | 100%                                             |
//!
//! Each 401(k) ceiling reads only the *other* 401(k) field, so raising one
//! lowers the other's ceiling immediately and the order of evaluation does
//! not matter.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use alloc_core::{AllocationKind, AllocationState, IrsLimits, LimitEngine};
//!
//! let limits = IrsLimits::default();
//! let mut state = AllocationState::new(dec!(50000), dec!(22));
//! state.set_allocation(AllocationKind::Traditional401k, dec!(20), &limits);
//!
//! let engine = LimitEngine::new(&state, &limits);
//! assert_eq!(engine.max_percent(AllocationKind::Roth401k), dec!(26));
//! assert_eq!(engine.enforce_limit(AllocationKind::Roth401k, dec!(30)), dec!(26));
//! ```

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculations::common::{floor_at_zero, round_half_up};
use crate::models::{AllocationKind, AllocationState, HsaCoverageType, IrsLimits};

/// Cap usage for one capped allocation kind, in dollars.
///
/// For the two 401(k) kinds `used` is the combined traditional + Roth amount.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LimitStatus {
    pub kind: AllocationKind,
    pub used: Decimal,
    pub cap: Decimal,
    pub remaining: Decimal,
    pub at_cap: bool,
}

#[derive(Debug, Clone, Copy)]
pub struct LimitEngine<'a> {
    state: &'a AllocationState,
    limits: &'a IrsLimits,
}

impl<'a> LimitEngine<'a> {
    pub fn new(
        state: &'a AllocationState,
        limits: &'a IrsLimits,
    ) -> Self {
        Self { state, limits }
    }

    /// The HSA cap for the state's coverage tier.
    pub fn hsa_limit(&self) -> Decimal {
        match self.state.hsa_coverage_type() {
            HsaCoverageType::Family => self.limits.hsa_family,
            HsaCoverageType::Individual => self.limits.hsa_individual,
        }
    }

    /// Highest percent of gross `kind` may take, in `[0, 100]`.
    ///
    /// Without a positive salary no dollar cap can be expressed as a percent,
    /// so every kind is unconstrained.
    pub fn max_percent(
        &self,
        kind: AllocationKind,
    ) -> Decimal {
        if self.state.gross_annual_salary() <= Decimal::ZERO {
            return Decimal::ONE_HUNDRED;
        }

        let ceiling = match kind {
            AllocationKind::Traditional401k => {
                self.headroom_percent(AllocationKind::Roth401k)
            }
            AllocationKind::Roth401k => {
                self.headroom_percent(AllocationKind::Traditional401k)
            }
            AllocationKind::Hsa => self.state.dollars_to_percent(self.hsa_limit()),
            AllocationKind::RothIra => self.state.dollars_to_percent(self.limits.roth_ira),
            AllocationKind::EmergencyFund | AllocationKind::TaxableBrokerage => {
                Decimal::ONE_HUNDRED
            }
        };

        floor_at_zero(ceiling).min(Decimal::ONE_HUNDRED)
    }

    /// `clamp(requested, 0, min(100, max_percent(kind)))`.
    pub fn enforce_limit(
        &self,
        kind: AllocationKind,
        requested: Decimal,
    ) -> Decimal {
        let bounded = requested.clamp(Decimal::ZERO, Decimal::ONE_HUNDRED);
        bounded.clamp(Decimal::ZERO, self.max_percent(kind))
    }

    /// Traditional + Roth 401(k) percent of gross.
    pub fn combined_401k_percent(&self) -> Decimal {
        self.state.allocation(AllocationKind::Traditional401k)
            + self.state.allocation(AllocationKind::Roth401k)
    }

    /// Traditional + Roth 401(k) dollars at the current salary.
    pub fn combined_401k_dollars(&self) -> Decimal {
        self.state.allocation_dollars(AllocationKind::Traditional401k)
            + self.state.allocation_dollars(AllocationKind::Roth401k)
    }

    /// Usage against the cap that governs `kind`, or `None` for uncapped kinds.
    pub fn limit_status(
        &self,
        kind: AllocationKind,
    ) -> Option<LimitStatus> {
        let (used, cap) = match kind {
            AllocationKind::Traditional401k | AllocationKind::Roth401k => {
                (self.combined_401k_dollars(), self.limits.combined_401k)
            }
            AllocationKind::Hsa => (self.state.allocation_dollars(kind), self.hsa_limit()),
            AllocationKind::RothIra => (self.state.allocation_dollars(kind), self.limits.roth_ira),
            AllocationKind::EmergencyFund | AllocationKind::TaxableBrokerage => return None,
        };

        let used = round_half_up(used);
        let remaining = floor_at_zero(cap - used);

        Some(LimitStatus {
            kind,
            used,
            cap,
            remaining,
            at_cap: remaining.is_zero(),
        })
    }

    /// Percent of gross left under the shared 401(k) cap after `other`.
    ///
    /// Headroom is rounded to cents first; decimal division leaves residue
    /// past the cent that would otherwise read as a sliver of room.
    fn headroom_percent(
        &self,
        other: AllocationKind,
    ) -> Decimal {
        let used = self.state.allocation_dollars(other);
        let remaining = floor_at_zero(round_half_up(self.limits.combined_401k - used));
        self.state.dollars_to_percent(remaining)
    }
}
