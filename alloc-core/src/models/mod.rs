mod allocation_kind;
mod allocation_state;
mod breakdown;
mod hsa_coverage;
mod irs_limits;
mod stored_state;

pub use allocation_kind::AllocationKind;
pub use allocation_state::{
    AllocationState, Allocations, MAX_GROSS_SALARY, MAX_MONTHLY_PREMIUM, MAX_TAX_RATE,
};
pub use breakdown::{Breakdown, PostTaxDeductions, PreTaxDeductions};
pub use hsa_coverage::HsaCoverageType;
pub use irs_limits::IrsLimits;
pub use stored_state::{STORAGE_KEY, StoredState};
