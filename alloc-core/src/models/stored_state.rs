//! Persisted shape of an [`AllocationState`].
//!
//! Every field is optional so records written by an older schema still load:
//! missing fields fall back to [`AllocationState::default`], and the
//! `allocations` map is merged key by key with the default allocations.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::models::{AllocationKind, AllocationState, HsaCoverageType};

/// Fixed identifier the record is stored under.
pub const STORAGE_KEY: &str = "allocation-calculator-state";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredState {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gross_annual_salary: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub effective_tax_rate: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub health_insurance_premium: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hsa_coverage_type: Option<HsaCoverageType>,
    #[serde(default)]
    pub allocations: BTreeMap<String, Decimal>,
}

impl From<&AllocationState> for StoredState {
    fn from(state: &AllocationState) -> Self {
        Self {
            gross_annual_salary: Some(state.gross_annual_salary()),
            effective_tax_rate: Some(state.effective_tax_rate()),
            health_insurance_premium: Some(state.health_insurance_premium()),
            hsa_coverage_type: Some(state.hsa_coverage_type()),
            allocations: state
                .allocations()
                .iter()
                .map(|(kind, percent)| (kind.as_str().to_string(), percent))
                .collect(),
        }
    }
}

impl StoredState {
    /// Merges the record over the defaults.
    ///
    /// Scalars go through the state's setters and so keep their ranges.
    /// Allocation percents are bounded to `[0, 100]` but IRS caps are not
    /// re-applied: a percent saved over its cap (after a salary change) loads
    /// exactly as it was saved.
    pub fn into_state(self) -> AllocationState {
        let mut state = AllocationState::default();

        if let Some(salary) = self.gross_annual_salary {
            state.set_gross_salary(salary);
        }
        if let Some(rate) = self.effective_tax_rate {
            state.set_tax_rate(rate);
        }
        if let Some(premium) = self.health_insurance_premium {
            state.set_health_insurance_premium(premium);
        }
        if let Some(coverage) = self.hsa_coverage_type {
            state.set_hsa_coverage_type(coverage);
        }

        for (key, percent) in self.allocations {
            match AllocationKind::parse(&key) {
                Some(kind) => state.restore_allocation(kind, percent),
                None => debug!(key = %key, "ignoring unknown allocation key"),
            }
        }

        state
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::models::IrsLimits;

    #[test]
    fn empty_record_yields_defaults() {
        let state = StoredState::default().into_state();

        assert_eq!(state, AllocationState::default());
    }

    #[test]
    fn state_survives_conversion_to_record_and_back() {
        let limits = IrsLimits::default();
        let mut state = AllocationState::new(dec!(120000), dec!(24));
        state.set_health_insurance_premium(dec!(310));
        state.set_hsa_coverage_type(HsaCoverageType::Family);
        state.set_allocation(AllocationKind::Traditional401k, dec!(12), &limits);
        state.set_allocation(AllocationKind::Hsa, dec!(6.5), &limits);

        let restored = StoredState::from(&state).into_state();

        assert_eq!(restored, state);
    }

    #[test]
    fn missing_allocation_keys_fall_back_to_defaults() {
        let record: StoredState = serde_json::from_str(
            r#"{"grossAnnualSalary": 90000, "allocations": {"rothIRA": 3}}"#,
        )
        .unwrap();

        let state = record.into_state();

        assert_eq!(state.gross_annual_salary(), dec!(90000));
        assert_eq!(state.allocation(AllocationKind::RothIra), dec!(3));
        assert_eq!(state.allocation(AllocationKind::Traditional401k), dec!(10));
        assert_eq!(state.effective_tax_rate(), dec!(22));
    }

    #[test]
    fn unknown_allocation_keys_are_ignored() {
        let record: StoredState =
            serde_json::from_str(r#"{"allocations": {"crypto": 40, "hsa": 2}}"#).unwrap();

        let state = record.into_state();

        assert_eq!(state.allocation(AllocationKind::Hsa), dec!(2));
        assert_eq!(state.allocations().total_percent(), dec!(27));
    }

    #[test]
    fn out_of_range_values_are_bounded_on_load() {
        let record: StoredState = serde_json::from_str(
            r#"{
                "grossAnnualSalary": "100000",
                "effectiveTaxRate": 80,
                "allocations": {"emergencyFund": 140, "taxableBrokerage": -2}
            }"#,
        )
        .unwrap();

        let state = record.into_state();

        assert_eq!(state.effective_tax_rate(), dec!(50));
        assert_eq!(state.allocation(AllocationKind::EmergencyFund), dec!(100));
        assert_eq!(state.allocation(AllocationKind::TaxableBrokerage), Decimal::ZERO);
    }

    #[test]
    fn over_cap_allocation_survives_reload_after_salary_change() {
        let limits = IrsLimits::default();
        let mut state = AllocationState::new(dec!(100000), dec!(22));
        state.set_allocation(AllocationKind::Traditional401k, dec!(20), &limits);
        state.set_gross_salary(dec!(200000));

        let restored = StoredState::from(&state).into_state();

        assert_eq!(restored.allocation(AllocationKind::Traditional401k), dec!(20));
        assert_eq!(restored, state);
    }

    #[test]
    fn stale_hsa_over_individual_cap_is_not_recapped_on_load() {
        let record: StoredState = serde_json::from_str(
            r#"{
                "grossAnnualSalary": 100000,
                "hsaCoverageType": "individual",
                "allocations": {"hsa": 8}
            }"#,
        )
        .unwrap();

        let state = record.into_state();

        assert_eq!(state.allocation(AllocationKind::Hsa), dec!(8));
    }

    #[test]
    fn record_serializes_with_camel_case_keys() {
        let json = serde_json::to_value(StoredState::from(&AllocationState::default())).unwrap();

        assert_eq!(json["hsaCoverageType"], "individual");
        assert!(json["allocations"].get("taxableBrokerage").is_some());
        assert!(json.get("grossAnnualSalary").is_some());
    }
}
