pub mod factory;
pub mod persistence;
pub mod repository;

pub use factory::{StoreConfig, StoreFactory, StoreRegistry};
pub use persistence::{clear_state, load_state, save_state};
pub use repository::{RepositoryError, StateRepository};
