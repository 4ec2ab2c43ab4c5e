//! Best-effort load/save around a [`StateRepository`].
//!
//! Storage problems never reach the calculator: a failed or malformed load
//! yields the default state, and a failed save only means the in-memory state
//! is not durable for this session.

use tracing::{debug, error, warn};

use super::repository::StateRepository;
use crate::models::{AllocationState, StoredState};

/// Loads the saved record merged over the defaults, or the defaults when
/// nothing usable is stored.
pub async fn load_state(repo: &dyn StateRepository) -> AllocationState {
    match repo.load().await {
        Ok(Some(record)) => {
            debug!("restored saved allocation state");
            record.into_state()
        }
        Ok(None) => {
            debug!("no saved allocation state; using defaults");
            AllocationState::default()
        }
        Err(error) => {
            warn!(%error, "discarding saved allocation state; using defaults");
            AllocationState::default()
        }
    }
}

/// Saves `state`, returning whether the write succeeded.
pub async fn save_state(
    repo: &dyn StateRepository,
    state: &AllocationState,
) -> bool {
    match repo.save(&StoredState::from(state)).await {
        Ok(()) => true,
        Err(error) => {
            error!(%error, "failed to save allocation state");
            false
        }
    }
}

/// Removes the saved record, returning whether the delete succeeded.
pub async fn clear_state(repo: &dyn StateRepository) -> bool {
    match repo.clear().await {
        Ok(()) => true,
        Err(error) => {
            error!(%error, "failed to clear saved allocation state");
            false
        }
    }
}
