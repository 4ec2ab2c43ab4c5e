pub mod calculations;
pub mod db;
pub mod input;
pub mod models;

pub use calculations::{BreakdownCalculator, LimitEngine, LimitStatus};
pub use db::repository::{RepositoryError, StateRepository};
pub use input::parse_amount;
pub use models::*;
