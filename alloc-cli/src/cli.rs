use std::path::PathBuf;

use alloc_core::{AllocationKind, HsaCoverageType};
use clap::{Parser, Subcommand};

use crate::config::Overrides;

/// Paycheck allocation calculator.
///
/// Splits a salary across retirement, HSA and savings buckets under the IRS
/// contribution limits for the selected tax year, and prints the resulting
/// gross-to-take-home waterfall. Changes are saved between runs.
#[derive(Debug, Parser)]
#[command(name = "alloc-calc", version)]
pub struct Cli {
    /// TOML config file.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Storage backend.
    #[arg(long, global = true)]
    pub backend: Option<String>,

    /// Storage connection string.
    /// For SQLite this is a file path (e.g. `allocations.db`) or `:memory:`.
    #[arg(long, global = true)]
    pub db: Option<String>,

    /// Tax year whose IRS limits apply.
    #[arg(long, global = true)]
    pub year: Option<i32>,

    /// Log level or filter directive (e.g. `debug`, `warn,alloc_core=debug`).
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Also append log records to this file.
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Cli {
    pub fn overrides(&self) -> Overrides {
        Overrides {
            backend: self.backend.clone(),
            db: self.db.clone(),
            year: self.year,
            log_level: self.log_level.clone(),
        }
    }
}

/// One change per run; every command ends by printing the breakdown.
#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Print the breakdown without changing anything.
    Show {
        /// Emit the breakdown as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Set the gross annual salary (`85000`, `$85,000`).
    Salary {
        #[arg(allow_hyphen_values = true)]
        amount: String,
    },

    /// Set the flat effective tax rate, 0 to 50 percent.
    TaxRate {
        #[arg(allow_hyphen_values = true)]
        percent: String,
    },

    /// Set the monthly health-insurance premium.
    Premium {
        #[arg(allow_hyphen_values = true)]
        amount: String,
    },

    /// Switch HSA coverage; the HSA allocation is re-capped to match.
    Coverage {
        /// `individual` or `family`.
        #[arg(value_parser = parse_coverage)]
        coverage: HsaCoverageType,
    },

    /// Set one allocation as a percent of gross salary, capped by IRS limits.
    Allocate {
        /// `traditional401k`, `roth401k`, `hsa`, `rothIRA`, `emergencyFund`
        /// or `taxableBrokerage` (case and dashes ignored).
        #[arg(value_parser = parse_kind)]
        kind: AllocationKind,

        #[arg(allow_hyphen_values = true)]
        percent: String,
    },

    /// Restore the defaults and forget the saved state.
    Reset,
}

impl Default for Command {
    fn default() -> Self {
        Self::Show { json: false }
    }
}

impl Command {
    /// Whether the command changes state that should then be saved.
    pub fn is_mutation(&self) -> bool {
        !matches!(self, Self::Show { .. } | Self::Reset)
    }
}

fn parse_kind(s: &str) -> Result<AllocationKind, String> {
    AllocationKind::parse(s).ok_or_else(|| {
        let known: Vec<_> = AllocationKind::ALL.iter().map(|k| k.as_str()).collect();
        format!("unknown allocation '{s}'; expected one of {}", known.join(", "))
    })
}

fn parse_coverage(s: &str) -> Result<HsaCoverageType, String> {
    HsaCoverageType::parse(s)
        .ok_or_else(|| format!("unknown coverage '{s}'; expected individual or family"))
}
