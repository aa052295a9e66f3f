pub mod app_config;
pub mod dataset;
pub mod memory_repo;
pub mod seed;

pub use app_config::Config;
pub use dataset::{Dataset, DatasetError};
pub use memory_repo::InMemoryStore;
