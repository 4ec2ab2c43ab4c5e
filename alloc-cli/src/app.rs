use alloc_core::db::{StoreConfig, StoreRegistry, clear_state, load_state, save_state};
use alloc_core::{AllocationKind, AllocationState, IrsLimits, StateRepository, parse_amount};
use alloc_db_sqlite::SqliteStoreFactory;
use rust_decimal::Decimal;
use tracing::{debug, info, warn};

use crate::cli::Command;
use crate::config::AppConfig;
use crate::utils::{format_currency, format_percent};

/// Registry with every storage backend compiled into this binary.
pub fn build_registry() -> StoreRegistry {
    let mut registry = StoreRegistry::new();
    registry.register(Box::new(SqliteStoreFactory));
    registry
}

/// Outcome of one run, ready to render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub state: AllocationState,
    /// Set when the change was adjusted or needs calling out.
    pub notice: Option<String>,
    /// Whether the resulting state (or its removal) reached storage.
    pub persisted: bool,
}

/// Opens the configured store, or logs why it could not and returns `None`.
pub async fn open_store(
    registry: &StoreRegistry,
    config: &StoreConfig,
) -> Option<Box<dyn StateRepository>> {
    debug!(backend = %config.backend, "opening store");
    match registry.create(config).await {
        Ok(repo) => Some(repo),
        Err(error) => {
            warn!(%error, backend = %config.backend, "storage unavailable; changes will not be saved");
            None
        }
    }
}

fn clamp_notice(
    what: &str,
    requested: Decimal,
    applied: Decimal,
    format: fn(Decimal) -> String,
) -> Option<String> {
    (requested != applied).then(|| {
        format!(
            "{what} adjusted to {} (requested {})",
            format(applied),
            format(requested)
        )
    })
}

/// Applies one command to `state` and returns a notice for the user, if any.
pub fn apply_command(
    state: &mut AllocationState,
    command: &Command,
    limits: &IrsLimits,
) -> Option<String> {
    match command {
        Command::Show { .. } => None,
        Command::Salary { amount } => {
            let requested = parse_amount(amount);
            state.set_gross_salary(requested);
            clamp_notice(
                "Salary",
                requested,
                state.gross_annual_salary(),
                format_currency,
            )
        }
        Command::TaxRate { percent } => {
            let requested = parse_amount(percent);
            state.set_tax_rate(requested);
            clamp_notice(
                "Tax rate",
                requested,
                state.effective_tax_rate(),
                format_percent,
            )
        }
        Command::Premium { amount } => {
            let requested = parse_amount(amount);
            state.set_health_insurance_premium(requested);
            clamp_notice(
                "Monthly premium",
                requested,
                state.health_insurance_premium(),
                format_currency,
            )
        }
        Command::Coverage { coverage } => {
            let before = state.allocation(AllocationKind::Hsa);
            state.set_hsa_coverage_type(*coverage);
            let after = state.refresh_hsa_allocation(limits);
            (before != after).then(|| {
                format!(
                    "HSA allocation reduced from {} to {} for {coverage} coverage",
                    format_percent(before),
                    format_percent(after)
                )
            })
        }
        Command::Allocate { kind, percent } => {
            let requested = parse_amount(percent);
            let applied = state.set_allocation(*kind, requested, limits);
            clamp_notice(kind.label(), requested, applied, format_percent)
        }
        Command::Reset => {
            state.reset();
            Some("Restored the default allocation".to_string())
        }
    }
}

/// Loads, changes, and saves the state using `registry` for storage.
///
/// Storage is best effort: an unavailable backend or a failed write is
/// logged and the run carries on with the in-memory state.
pub async fn run_with_registry(
    registry: &StoreRegistry,
    command: &Command,
    config: &AppConfig,
) -> Session {
    let store = open_store(registry, &config.store).await;

    let mut state = match &store {
        Some(repo) => load_state(repo.as_ref()).await,
        None => AllocationState::default(),
    };

    let notice = apply_command(&mut state, command, &config.limits);
    if let Some(adjusted) = &notice {
        info!(notice = %adjusted, "command adjusted");
    }

    let persisted = match &store {
        Some(repo) if matches!(command, Command::Reset) => clear_state(repo.as_ref()).await,
        Some(repo) if command.is_mutation() => save_state(repo.as_ref(), &state).await,
        _ => false,
    };

    Session {
        state,
        notice,
        persisted,
    }
}

/// [`run_with_registry`] against the built-in backends.
pub async fn run(
    command: &Command,
    config: &AppConfig,
) -> Session {
    run_with_registry(&build_registry(), command, config).await
}
